#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba {
    pub const fn opaque(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 0xFF }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FontWeight {
    Regular,
    Bold,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextStyle {
    pub weight: FontWeight,
    pub size: f32,
    pub color: Rgba,
}

/// Fixed card palette and typography.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CardTheme {
    pub background: &'static str,
    pub border: &'static str,
    pub border_width: f64,
    pub corner_radius: f64,
    pub segment_stroke: &'static str,
    pub segment_stroke_width: f64,
    pub title: TextStyle,
    pub subtitle: TextStyle,
    pub metric: TextStyle,
    pub legend: TextStyle,
}

pub const CARD_THEME: CardTheme = CardTheme {
    background: "white",
    border: "#e0e0e0",
    border_width: 1.0,
    corner_radius: 10.0,
    segment_stroke: "white",
    segment_stroke_width: 2.0,
    title: TextStyle {
        weight: FontWeight::Regular,
        size: 14.0,
        color: Rgba::opaque(0x9E, 0x9E, 0x9E),
    },
    subtitle: TextStyle {
        weight: FontWeight::Regular,
        size: 20.0,
        color: Rgba::opaque(0x33, 0x33, 0x33),
    },
    metric: TextStyle {
        weight: FontWeight::Bold,
        size: 14.0,
        color: Rgba::opaque(0x21, 0x21, 0x21),
    },
    legend: TextStyle {
        weight: FontWeight::Regular,
        size: 14.0,
        color: Rgba::opaque(0x33, 0x33, 0x33),
    },
};

/// Parses `#rgb`, `#rgba`, `#rrggbb` and `#rrggbbaa`.
pub fn parse_hex_color(value: &str) -> Option<Rgba> {
    let hex = value.trim().strip_prefix('#')?;
    if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return None;
    }
    let nibble = |idx: usize| u8::from_str_radix(&hex[idx..idx + 1], 16).ok().map(|v| v * 17);
    let byte = |idx: usize| u8::from_str_radix(&hex[idx..idx + 2], 16).ok();
    match hex.len() {
        3 => Some(Rgba::opaque(nibble(0)?, nibble(1)?, nibble(2)?)),
        4 => Some(Rgba {
            r: nibble(0)?,
            g: nibble(1)?,
            b: nibble(2)?,
            a: nibble(3)?,
        }),
        6 => Some(Rgba::opaque(byte(0)?, byte(2)?, byte(4)?)),
        8 => Some(Rgba {
            r: byte(0)?,
            g: byte(2)?,
            b: byte(4)?,
            a: byte(6)?,
        }),
        _ => None,
    }
}

/// Accepts the color syntaxes the card's SVG scene can carry: hex values,
/// named colors and `rgb()`/`rgba()` functions.
pub fn is_color_token(value: &str) -> bool {
    let value = value.trim();
    if value.starts_with('#') {
        return parse_hex_color(value).is_some();
    }
    let lower = value.to_ascii_lowercase();
    if let Some(args) = lower
        .strip_prefix("rgba(")
        .or_else(|| lower.strip_prefix("rgb("))
        .and_then(|rest| rest.strip_suffix(')'))
    {
        let parts: Vec<&str> = args.split(',').map(str::trim).collect();
        return matches!(parts.len(), 3 | 4)
            && parts.iter().all(|part| {
                let number = part.strip_suffix('%').unwrap_or(part);
                !number.is_empty() && number.parse::<f64>().is_ok()
            });
    }
    !value.is_empty() && value.chars().all(|c| c.is_ascii_alphabetic())
}
