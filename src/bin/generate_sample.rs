use std::sync::Arc;

use anyhow::{Context, Result};
use arrow::array::{ArrayRef, Float64Array, Int64Array, StringArray};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use parquet::arrow::ArrowWriter;

use salary_dashboard::data::model::columns;

/// Minimal deterministic PRNG (xoshiro256**)
struct SimpleRng {
    state: [u64; 4],
}

impl SimpleRng {
    fn new(seed: u64) -> Self {
        let mut s = [0u64; 4];
        let mut x = seed;
        for slot in &mut s {
            x = x.wrapping_mul(6364136223846793005).wrapping_add(1);
            *slot = x;
        }
        SimpleRng { state: s }
    }

    fn next_u64(&mut self) -> u64 {
        let result = (self.state[1].wrapping_mul(5)).rotate_left(7).wrapping_mul(9);
        let t = self.state[1] << 17;
        self.state[2] ^= self.state[0];
        self.state[3] ^= self.state[1];
        self.state[1] ^= self.state[2];
        self.state[0] ^= self.state[3];
        self.state[2] ^= t;
        self.state[3] = self.state[3].rotate_left(45);
        result
    }

    fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }

    fn pick<'a>(&mut self, items: &[&'a str]) -> &'a str {
        items[(self.next_u64() % items.len() as u64) as usize]
    }

    /// Log-normal-ish salary around `median`.
    fn salary(&mut self, median: f64) -> f64 {
        let u1 = self.next_f64().max(1e-15);
        let u2 = self.next_f64();
        let z = (-2.0 * u1.ln()).sqrt() * (2.0 * std::f64::consts::PI * u2).cos();
        (median * (0.35 * z).exp()).round()
    }
}

/// (title, median USD salary)
const TITLES: [(&str, f64); 12] = [
    ("Data Scientist", 140_000.0),
    ("Data Analyst", 95_000.0),
    ("Data Engineer", 145_000.0),
    ("Machine Learning Engineer", 175_000.0),
    ("Analytics Engineer", 150_000.0),
    ("BI Analyst", 85_000.0),
    ("Business Analyst", 90_000.0),
    ("Data Architect", 160_000.0),
    ("Research Scientist", 185_000.0),
    ("Data Manager", 130_000.0),
    ("Head of Machine Learning", 240_000.0),
    ("Prompt Engineer", 120_000.0),
];

const SENIORITY: [(&str, f64); 4] = [
    ("junior", 0.6),
    ("pleno", 0.85),
    ("senior", 1.1),
    ("executivo", 1.5),
];

const CONTRACTS: [&str; 4] = ["integral", "parcial", "contrato", "freelancer"];
const REMOTE: [&str; 3] = ["remoto", "presencial", "hibrido"];
const COMPANY_SIZES: [&str; 3] = ["pequena", "media", "grande"];
const COUNTRIES: [&str; 8] = ["USA", "GBR", "CAN", "DEU", "BRA", "IND", "ESP", "FRA"];
const YEARS: [i64; 6] = [2020, 2021, 2022, 2023, 2024, 2025];

struct Rows {
    year: Vec<i64>,
    seniority: Vec<&'static str>,
    contract: Vec<&'static str>,
    title: Vec<&'static str>,
    usd: Vec<f64>,
    residence: Vec<&'static str>,
    remote: Vec<&'static str>,
    company_size: Vec<&'static str>,
}

fn generate(n: usize, rng: &mut SimpleRng) -> Rows {
    let mut rows = Rows {
        year: Vec::with_capacity(n),
        seniority: Vec::with_capacity(n),
        contract: Vec::with_capacity(n),
        title: Vec::with_capacity(n),
        usd: Vec::with_capacity(n),
        residence: Vec::with_capacity(n),
        remote: Vec::with_capacity(n),
        company_size: Vec::with_capacity(n),
    };

    for _ in 0..n {
        let (title, median) = TITLES[(rng.next_u64() % TITLES.len() as u64) as usize];
        let (seniority, factor) = SENIORITY[(rng.next_u64() % SENIORITY.len() as u64) as usize];
        let year = YEARS[(rng.next_u64() % YEARS.len() as u64) as usize];

        rows.year.push(year);
        rows.seniority.push(seniority);
        rows.contract.push(rng.pick(&CONTRACTS));
        rows.title.push(title);
        rows.usd.push(rng.salary(median * factor));
        rows.residence.push(rng.pick(&COUNTRIES));
        rows.remote.push(rng.pick(&REMOTE));
        rows.company_size.push(rng.pick(&COMPANY_SIZES));
    }
    rows
}

fn write_parquet(rows: &Rows, path: &str) -> Result<()> {
    let text = |name: &str| Field::new(name, DataType::Utf8, false);
    let schema = Arc::new(Schema::new(vec![
        Field::new(columns::YEAR, DataType::Int64, false),
        text(columns::SENIORITY),
        text(columns::CONTRACT),
        text(columns::TITLE),
        Field::new(columns::SALARY_USD, DataType::Float64, false),
        text(columns::RESIDENCE),
        text(columns::REMOTE),
        text(columns::COMPANY_SIZE),
    ]));

    let arrays: Vec<ArrayRef> = vec![
        Arc::new(Int64Array::from(rows.year.clone())),
        Arc::new(StringArray::from(rows.seniority.clone())),
        Arc::new(StringArray::from(rows.contract.clone())),
        Arc::new(StringArray::from(rows.title.clone())),
        Arc::new(Float64Array::from(rows.usd.clone())),
        Arc::new(StringArray::from(rows.residence.clone())),
        Arc::new(StringArray::from(rows.remote.clone())),
        Arc::new(StringArray::from(rows.company_size.clone())),
    ];
    let batch = RecordBatch::try_new(schema.clone(), arrays).context("building record batch")?;

    let file = std::fs::File::create(path).with_context(|| format!("creating {path}"))?;
    let mut writer = ArrowWriter::try_new(file, schema, None).context("creating parquet writer")?;
    writer.write(&batch).context("writing parquet batch")?;
    writer.close().context("closing parquet writer")?;
    Ok(())
}

fn write_csv(rows: &Rows, path: &str) -> Result<()> {
    let mut writer = csv::Writer::from_path(path).with_context(|| format!("creating {path}"))?;
    writer.write_record([
        columns::YEAR,
        columns::SENIORITY,
        columns::CONTRACT,
        columns::TITLE,
        columns::SALARY_USD,
        columns::RESIDENCE,
        columns::REMOTE,
        columns::COMPANY_SIZE,
    ])?;
    for i in 0..rows.year.len() {
        writer.write_record([
            rows.year[i].to_string().as_str(),
            rows.seniority[i],
            rows.contract[i],
            rows.title[i],
            rows.usd[i].to_string().as_str(),
            rows.residence[i],
            rows.remote[i],
            rows.company_size[i],
        ])?;
    }
    writer.flush()?;
    Ok(())
}

fn main() -> Result<()> {
    let mut rng = SimpleRng::new(42);
    let rows = generate(2_000, &mut rng);

    write_parquet(&rows, "sample_salaries.parquet")?;
    write_csv(&rows, "sample_salaries.csv")?;

    println!(
        "Wrote {} salary records to sample_salaries.parquet and sample_salaries.csv",
        rows.year.len()
    );
    Ok(())
}
