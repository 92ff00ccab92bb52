//! `#RRGGBB` color parsing and interpolation for the lighting nodes.

use std::fmt;

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const WHITE: Rgb = Rgb {
        r: 255,
        g: 255,
        b: 255,
    };

    pub fn lerp(a: Rgb, b: Rgb, t: f64) -> Rgb {
        let t = t.clamp(0.0, 1.0);
        let channel = |x: u8, y: u8| (f64::from(x) + (f64::from(y) - f64::from(x)) * t).round() as u8;
        Rgb {
            r: channel(a.r, b.r),
            g: channel(a.g, b.g),
            b: channel(a.b, b.b),
        }
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

/// Parses `#RRGGBB` (leading `#` optional). Returns `None` for anything
/// else; callers fall back to their documented default color.
pub fn parse_hex(text: &str) -> Option<Rgb> {
    let hex = text.strip_prefix('#').unwrap_or(text);
    if hex.len() != 6 {
        return None;
    }
    let value = u32::from_str_radix(hex, 16).ok()?;
    Some(Rgb {
        r: ((value >> 16) & 0xff) as u8,
        g: ((value >> 8) & 0xff) as u8,
        b: (value & 0xff) as u8,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_and_formats_hex() {
        let red = parse_hex("#ff0000").unwrap();
        assert_eq!(red, Rgb { r: 255, g: 0, b: 0 });
        assert_eq!(red.to_string(), "#ff0000");
        assert_eq!(parse_hex("20a0ff"), Some(Rgb { r: 32, g: 160, b: 255 }));
    }

    #[test]
    fn rejects_malformed_input() {
        assert_eq!(parse_hex(""), None);
        assert_eq!(parse_hex("#fff"), None);
        assert_eq!(parse_hex("#zzzzzz"), None);
    }

    #[test]
    fn lerp_blends_channels() {
        let black = parse_hex("#000000").unwrap();
        let white = Rgb::WHITE;
        assert_eq!(Rgb::lerp(black, white, 0.0), black);
        assert_eq!(Rgb::lerp(black, white, 1.0), white);
        let mid = Rgb::lerp(black, white, 0.5);
        assert_eq!(mid, Rgb { r: 128, g: 128, b: 128 });
    }
}
