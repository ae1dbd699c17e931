//! Color parsing and blending for themes.

use ratatui::style::Color;
use std::collections::HashMap;

/// RGB color (0-255 per channel)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

/// HSL color (h: 0-360, s: 0-1, l: 0-1)
#[derive(Debug, Clone, Copy)]
pub struct Hsl {
    pub h: f32,
    pub s: f32,
    pub l: f32,
}

/// Parse hex color string (e.g., "#2ecc71" or "2ecc71")
pub fn parse_hex(s: &str) -> Result<Rgb, String> {
    let s = s.trim().trim_start_matches('#');
    if s.len() != 6 {
        return Err(format!(
            "invalid hex color: expected 6 characters, got {}",
            s.len()
        ));
    }

    let r = u8::from_str_radix(&s[0..2], 16)
        .map_err(|_| format!("invalid hex color: bad red component in '{}'", s))?;
    let g = u8::from_str_radix(&s[2..4], 16)
        .map_err(|_| format!("invalid hex color: bad green component in '{}'", s))?;
    let b = u8::from_str_radix(&s[4..6], 16)
        .map_err(|_| format!("invalid hex color: bad blue component in '{}'", s))?;

    Ok(Rgb { r, g, b })
}

/// Convert RGB to HSL
pub fn rgb_to_hsl(rgb: Rgb) -> Hsl {
    let r = rgb.r as f32 / 255.0;
    let g = rgb.g as f32 / 255.0;
    let b = rgb.b as f32 / 255.0;

    let max = r.max(g).max(b);
    let min = r.min(g).min(b);
    let l = (max + min) / 2.0;

    if (max - min).abs() < f32::EPSILON {
        return Hsl { h: 0.0, s: 0.0, l };
    }

    let d = max - min;
    let s = if l > 0.5 {
        d / (2.0 - max - min)
    } else {
        d / (max + min)
    };

    let h = if (max - r).abs() < f32::EPSILON {
        let mut h = (g - b) / d;
        if g < b {
            h += 6.0;
        }
        h
    } else if (max - g).abs() < f32::EPSILON {
        (b - r) / d + 2.0
    } else {
        (r - g) / d + 4.0
    };

    Hsl {
        h: (h * 60.0).rem_euclid(360.0),
        s: s.clamp(0.0, 1.0),
        l: l.clamp(0.0, 1.0),
    }
}

/// Convert HSL to RGB
pub fn hsl_to_rgb(hsl: Hsl) -> Rgb {
    let h = hsl.h.rem_euclid(360.0);
    let s = hsl.s.clamp(0.0, 1.0);
    let l = hsl.l.clamp(0.0, 1.0);

    if s.abs() < f32::EPSILON {
        let v = (l * 255.0).round() as u8;
        return Rgb { r: v, g: v, b: v };
    }

    let q = if l < 0.5 {
        l * (1.0 + s)
    } else {
        l + s - l * s
    };
    let p = 2.0 * l - q;

    fn hue_to_rgb(p: f32, q: f32, mut t: f32) -> f32 {
        t = t.rem_euclid(1.0);
        if t < 1.0 / 6.0 {
            p + (q - p) * 6.0 * t
        } else if t < 1.0 / 2.0 {
            q
        } else if t < 2.0 / 3.0 {
            p + (q - p) * (2.0 / 3.0 - t) * 6.0
        } else {
            p
        }
    }

    let h_norm = h / 360.0;
    Rgb {
        r: (hue_to_rgb(p, q, h_norm + 1.0 / 3.0) * 255.0).round() as u8,
        g: (hue_to_rgb(p, q, h_norm) * 255.0).round() as u8,
        b: (hue_to_rgb(p, q, h_norm - 1.0 / 3.0) * 255.0).round() as u8,
    }
}

/// Parse ANSI color name to ratatui Color
pub fn parse_ansi_name(name: &str) -> Option<Color> {
    match name.to_lowercase().replace('-', "_").as_str() {
        "default" | "reset" | "transparent" => Some(Color::Reset),
        "black" => Some(Color::Black),
        "red" => Some(Color::Red),
        "green" => Some(Color::Green),
        "yellow" => Some(Color::Yellow),
        "blue" => Some(Color::Blue),
        "magenta" => Some(Color::Magenta),
        "cyan" => Some(Color::Cyan),
        "gray" | "grey" => Some(Color::Gray),
        "dark_gray" | "dark_grey" | "darkgray" | "darkgrey" => Some(Color::DarkGray),
        "light_red" | "lightred" => Some(Color::LightRed),
        "light_green" | "lightgreen" => Some(Color::LightGreen),
        "light_yellow" | "lightyellow" => Some(Color::LightYellow),
        "light_blue" | "lightblue" => Some(Color::LightBlue),
        "light_magenta" | "lightmagenta" => Some(Color::LightMagenta),
        "light_cyan" | "lightcyan" => Some(Color::LightCyan),
        "white" => Some(Color::White),
        _ => None,
    }
}

/// Resolve a color string: def reference, hex, or ANSI name
pub fn resolve_color(value: &str, defs: &HashMap<String, String>) -> Option<Color> {
    let value = value.trim();

    if let Some(hex) = defs.get(value) {
        return parse_hex(hex)
            .ok()
            .map(|rgb| Color::Rgb(rgb.r, rgb.g, rgb.b));
    }

    if value.starts_with('#') {
        return parse_hex(value)
            .ok()
            .map(|rgb| Color::Rgb(rgb.r, rgb.g, rgb.b));
    }

    parse_ansi_name(value)
}

/// Derive a dimmed version of a color via HSL (reduce saturation and lightness)
pub fn dim_color(color: Color) -> Color {
    match color {
        Color::Rgb(r, g, b) => {
            let mut hsl = rgb_to_hsl(Rgb { r, g, b });
            hsl.s *= 0.4;
            hsl.l *= 0.6;
            let dimmed = hsl_to_rgb(hsl);
            Color::Rgb(dimmed.r, dimmed.g, dimmed.b)
        }
        Color::Reset => color,
        _ => Color::DarkGray,
    }
}

/// Convert ratatui Color to Rgb; None for ANSI names
pub fn color_to_rgb(color: Color) -> Option<Rgb> {
    match color {
        Color::Rgb(r, g, b) => Some(Rgb { r, g, b }),
        _ => None,
    }
}

/// Blend two colors using alpha (0.0 = bg, 1.0 = fg).
pub fn blend_colors(bg: Color, fg: Color, alpha: f32) -> Option<Color> {
    let bg = color_to_rgb(bg)?;
    let fg = color_to_rgb(fg)?;
    let a = alpha.clamp(0.0, 1.0);
    let blend = |b: u8, f: u8| -> u8 { (b as f32 * (1.0 - a) + f as f32 * a).round() as u8 };
    Some(Color::Rgb(
        blend(bg.r, fg.r),
        blend(bg.g, fg.g),
        blend(bg.b, fg.b),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_hex() {
        let rgb = parse_hex("#2ecc71").unwrap();
        assert_eq!(rgb, Rgb { r: 46, g: 204, b: 113 });

        let rgb = parse_hex("e74c3c").unwrap();
        assert_eq!(rgb, Rgb { r: 231, g: 76, b: 60 });

        assert!(parse_hex("#fff").is_err());
        assert!(parse_hex("#gg0000").is_err());
    }

    #[test]
    fn test_rgb_hsl_roundtrip() {
        let original = Rgb { r: 46, g: 204, b: 113 };
        let back = hsl_to_rgb(rgb_to_hsl(original));

        assert!((original.r as i16 - back.r as i16).abs() <= 1);
        assert!((original.g as i16 - back.g as i16).abs() <= 1);
        assert!((original.b as i16 - back.b as i16).abs() <= 1);
    }

    #[test]
    fn test_resolve_color_sources() {
        let mut defs = HashMap::new();
        defs.insert("green1".to_string(), "#A3BE8C".to_string());

        assert_eq!(resolve_color("green1", &defs), Some(Color::Rgb(0xA3, 0xBE, 0x8C)));
        assert_eq!(resolve_color("#BF616A", &defs), Some(Color::Rgb(0xBF, 0x61, 0x6A)));
        assert_eq!(resolve_color("dark-gray", &defs), Some(Color::DarkGray));
        assert_eq!(resolve_color("nope", &defs), None);
    }

    #[test]
    fn test_blend_colors() {
        let blended = blend_colors(Color::Rgb(0, 0, 0), Color::Rgb(200, 100, 50), 0.5);
        assert_eq!(blended, Some(Color::Rgb(100, 50, 25)));
        assert_eq!(blend_colors(Color::Red, Color::Rgb(1, 2, 3), 0.5), None);
    }

    #[test]
    fn test_dim_color() {
        assert_eq!(dim_color(Color::Green), Color::DarkGray);
        match dim_color(Color::Rgb(46, 204, 113)) {
            Color::Rgb(_, g, _) => assert!(g < 204),
            other => panic!("expected rgb, got {:?}", other),
        }
    }
}
