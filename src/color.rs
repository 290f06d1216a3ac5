use std::collections::BTreeMap;

use eframe::egui::Color32;
use palette::{Hsl, IntoColor, Srgb};

// ---------------------------------------------------------------------------
// Color palette generator
// ---------------------------------------------------------------------------

/// Generates `n` visually distinct colours using evenly spaced hues.
pub fn generate_palette(n: usize) -> Vec<Color32> {
    if n == 0 {
        return Vec::new();
    }
    (0..n)
        .map(|i| {
            let hue = (i as f32 / n as f32) * 360.0;
            let hsl = Hsl::new(hue, 0.75, 0.55);
            let rgb: Srgb = hsl.into_color();
            Color32::from_rgb(
                (rgb.red * 255.0) as u8,
                (rgb.green * 255.0) as u8,
                (rgb.blue * 255.0) as u8,
            )
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Color mapping: make → Color32
// ---------------------------------------------------------------------------

/// Assigns each make a stable colour for the session, from the full
/// table's make list so filtering never reshuffles colours.
#[derive(Debug, Clone)]
pub struct MakeColorMap {
    mapping: BTreeMap<String, Color32>,
    default_color: Color32,
}

impl MakeColorMap {
    /// Build a colour map from the (sorted, unique) make list.
    pub fn new(makes: &[String]) -> Self {
        let palette = generate_palette(makes.len());
        let mapping: BTreeMap<String, Color32> = makes
            .iter()
            .zip(palette)
            .map(|(make, color)| (make.clone(), color))
            .collect();

        MakeColorMap {
            mapping,
            default_color: Color32::GRAY,
        }
    }

    /// Look up the colour for a make.
    pub fn color_for(&self, make: &str) -> Color32 {
        self.mapping
            .get(make)
            .copied()
            .unwrap_or(self.default_color)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn palette_size_matches_request() {
        assert!(generate_palette(0).is_empty());
        assert_eq!(generate_palette(7).len(), 7);
    }

    #[test]
    fn makes_get_distinct_stable_colors() {
        let makes = vec!["Acura".to_string(), "BMW".to_string(), "Volvo".to_string()];
        let map = MakeColorMap::new(&makes);
        let a = map.color_for("Acura");
        let b = map.color_for("BMW");
        assert_ne!(a, b);
        // Unknown makes fall back to gray.
        assert_eq!(map.color_for("DeLorean"), Color32::GRAY);
        // Lookups are stable.
        assert_eq!(map.color_for("Acura"), a);
    }
}
