use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};

pub const FONT: &str = "sans-serif";

/// Light grid lines on a white background.
pub const GRID: RGBColor = RGBColor(225, 225, 225);
pub const HIST_FILL: RGBColor = RGBColor(0, 0, 255);
pub const BOX_EDGE: RGBColor = RGBColor(63, 63, 63);
pub const MISSING: RGBColor = RGBColor(200, 200, 200);

/// Qualitative palette for class-coloured series.
pub const SET2: [RGBColor; 8] = [
    RGBColor(102, 194, 165),
    RGBColor(252, 141, 98),
    RGBColor(141, 160, 203),
    RGBColor(231, 138, 195),
    RGBColor(166, 216, 84),
    RGBColor(255, 217, 47),
    RGBColor(229, 196, 148),
    RGBColor(179, 179, 179),
];

const COOL: (f64, f64, f64) = (59.0, 76.0, 192.0);
const NEUTRAL: (f64, f64, f64) = (221.0, 221.0, 221.0);
const WARM: (f64, f64, f64) = (180.0, 4.0, 38.0);

pub fn palette(i: usize) -> RGBColor {
    SET2.iter().cycle().nth(i).copied().unwrap_or(GRID)
}

/// Diverging blue-white-red scale for values in `[-1, 1]`. NaN is grey.
pub fn coolwarm(v: f64) -> RGBColor {
    if v.is_nan() {
        return MISSING;
    }
    let v = v.clamp(-1.0, 1.0);
    let (from, to, t) = if v < 0.0 {
        (COOL, NEUTRAL, v + 1.0)
    } else {
        (NEUTRAL, WARM, v)
    };
    let lerp = |a: f64, b: f64| (a + (b - a) * t).round() as u8;
    RGBColor(lerp(from.0, to.0), lerp(from.1, to.1), lerp(from.2, to.2))
}

pub fn caption_style() -> TextStyle<'static> {
    (FONT, 24).into_font().into()
}

pub fn label_style() -> TextStyle<'static> {
    (FONT, 16).into_font().into()
}

pub fn annotation_style(background: RGBColor) -> TextStyle<'static> {
    // Dark cells get white text.
    let luminance = 0.299 * f64::from(background.0)
        + 0.587 * f64::from(background.1)
        + 0.114 * f64::from(background.2);
    let color = if luminance < 140.0 { WHITE } else { BLACK };
    (FONT, 14)
        .into_font()
        .color(&color)
        .pos(Pos::new(HPos::Center, VPos::Center))
}

/// Category name at integer axis positions, blank elsewhere.
pub fn category_label(names: &[String], x: f64) -> String {
    let nearest = x.round();
    if (x - nearest).abs() > 1e-6 || nearest < 0.0 {
        return String::new();
    }
    names.get(nearest as usize).cloned().unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_coolwarm_endpoints() {
        assert_eq!(coolwarm(-1.0), RGBColor(59, 76, 192));
        assert_eq!(coolwarm(0.0), RGBColor(221, 221, 221));
        assert_eq!(coolwarm(1.0), RGBColor(180, 4, 38));
        assert_eq!(coolwarm(f64::NAN), MISSING);
    }

    #[test]
    fn test_palette_wraps() {
        assert_eq!(palette(0), palette(8));
    }

    #[test]
    fn test_category_label() {
        let names = vec!["legit".to_owned(), "malicious".to_owned()];
        assert_eq!(category_label(&names, 1.0), "malicious");
        assert_eq!(category_label(&names, 0.5), "");
        assert_eq!(category_label(&names, 2.0), "");
    }
}
