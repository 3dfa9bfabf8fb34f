use serde::{Deserialize, Serialize};

/// Colours shared by both backends, as CSS hex strings.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Palette {
    pub alive: String,
    pub dead: String,
    pub grid: String,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            alive: "#000000".to_string(),
            dead: "#FFFFFF".to_string(),
            grid: "#CCCCCC".to_string(),
        }
    }
}

impl Palette {
    /// Normalised RGB for shader uniforms. Unparseable colours fall back
    /// to the default palette entry.
    pub fn alive_rgb(&self) -> [f32; 3] {
        parse_hex(&self.alive).unwrap_or([0.0, 0.0, 0.0])
    }

    pub fn dead_rgb(&self) -> [f32; 3] {
        parse_hex(&self.dead).unwrap_or([1.0, 1.0, 1.0])
    }

    pub fn grid_rgb(&self) -> [f32; 3] {
        parse_hex(&self.grid).unwrap_or([0.8, 0.8, 0.8])
    }
}

/// `#RGB` or `#RRGGBB` to normalised floats
pub fn parse_hex(color: &str) -> Option<[f32; 3]> {
    let hex = color.strip_prefix('#')?;
    let channel = |s: &str| u8::from_str_radix(s, 16).ok().map(|v| v as f32 / 255.0);
    match hex.len() {
        6 => Some([channel(&hex[0..2])?, channel(&hex[2..4])?, channel(&hex[4..6])?]),
        3 => {
            let short = |i: usize| channel(hex[i..i + 1].repeat(2).as_str());
            Some([short(0)?, short(1)?, short(2)?])
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_long_and_short_hex() {
        assert_eq!(parse_hex("#FFFFFF"), Some([1.0, 1.0, 1.0]));
        assert_eq!(parse_hex("#000"), Some([0.0, 0.0, 0.0]));
        let grid = parse_hex("#CCCCCC").unwrap();
        assert!((grid[0] - 0.8).abs() < 1e-6);
    }

    #[test]
    fn rejects_garbage() {
        assert_eq!(parse_hex("CCCCCC"), None);
        assert_eq!(parse_hex("#GG0000"), None);
        assert_eq!(parse_hex("#12345"), None);
    }

    #[test]
    fn bad_entries_fall_back_to_defaults() {
        let palette = Palette { alive: "red".into(), ..Palette::default() };
        assert_eq!(palette.alive_rgb(), [0.0, 0.0, 0.0]);
        assert_eq!(palette.dead_rgb(), [1.0, 1.0, 1.0]);
    }
}
