use std::collections::BTreeMap;

use eframe::egui::Color32;
use palette::{Hsl, IntoColor, Srgb};

use crate::data::model::CellValue;

/// Bar / histogram fill.
pub const ACCENT: Color32 = Color32::from_rgb(0x33, 0x46, 0xf6);

/// Background of the metric cards.
pub const CARD_FILL: Color32 = Color32::from_rgb(0x26, 0x27, 0x30);

// ---------------------------------------------------------------------------
// Category palette
// ---------------------------------------------------------------------------

/// `n` distinct colours on evenly spaced hues, starting from the accent blue.
pub fn category_palette(n: usize) -> Vec<Color32> {
    (0..n)
        .map(|i| {
            let hue = 230.0 + (i as f32 / n as f32) * 360.0;
            let hsl: Hsl = Hsl::new(hue, 0.70, 0.50);
            let rgb: Srgb = hsl.into_color();
            let (r, g, b) = rgb.into_format::<u8>().into_components();
            Color32::from_rgb(r, g, b)
        })
        .collect()
}

/// Stable colour per category for pie slices and their legend.
#[derive(Debug, Clone, Default)]
pub struct CategoryColors {
    mapping: BTreeMap<CellValue, Color32>,
}

impl CategoryColors {
    pub fn new<'a>(categories: impl IntoIterator<Item = &'a CellValue>) -> Self {
        let categories: Vec<&CellValue> = categories.into_iter().collect();
        let mapping = categories
            .iter()
            .zip(category_palette(categories.len()))
            .map(|(v, c)| ((*v).clone(), c))
            .collect();
        Self { mapping }
    }

    pub fn color_for(&self, value: &CellValue) -> Color32 {
        self.mapping.get(value).copied().unwrap_or(Color32::GRAY)
    }
}
