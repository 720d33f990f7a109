use std::collections::HashMap;

/// Raw dataset title → Portuguese display title.
pub const TITLE_TRANSLATIONS: [(&str, &str); 20] = [
    ("Data Scientist", "Cientista de Dados"),
    ("Data Analyst", "Analista de Dados"),
    ("Data Engineer", "Engenheiro de Dados"),
    ("Machine Learning Engineer", "Engenheiro de Machine Learning"),
    ("Analytics Engineer", "Engenheiro de Analytics"),
    ("BI Analyst", "Analista de BI"),
    ("Business Analyst", "Analista de Negócios"),
    ("Data Architect", "Arquiteto de Dados"),
    ("Research Scientist", "Pesquisador Cientista"),
    ("Data Manager", "Gerente de Dados"),
    ("Research Team Lead", "Líder de Equipe de Pesquisa"),
    ("Analytics Engineering Manager", "Gerente de Engenharia de Analytics"),
    ("Data Science Tech Lead", "Líder Técnico de Ciência de Dados"),
    ("Applied AI ML Lead", "Líder de IA Aplicada e ML"),
    ("Head of Applied AI", "Chefe de IA Aplicada"),
    ("Head of Machine Learning", "Chefe de Machine Learning"),
    ("Machine Learning Performance Engineer", "Engenheiro de Performance de ML"),
    ("Director of Product Management", "Diretor de Gestão de Produtos"),
    ("Engineering Manager", "Gerente de Engenharia"),
    ("AWS Data Architect", "Arquiteto de Dados AWS"),
];

/// Static job-title lookup. Matching is exact and case-sensitive.
#[derive(Debug, Clone)]
pub struct TitleTranslator {
    table: HashMap<&'static str, &'static str>,
}

impl Default for TitleTranslator {
    fn default() -> Self {
        Self {
            table: TITLE_TRANSLATIONS.iter().copied().collect(),
        }
    }
}

impl TitleTranslator {
    /// Display string for `raw`; unknown titles come back unchanged.
    pub fn translate<'a>(&self, raw: &'a str) -> &'a str {
        self.table.get(raw).copied().unwrap_or(raw)
    }

    pub fn len(&self) -> usize {
        self.table.len()
    }

    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }
}
