/// Shown wherever a palette key is missing or unparsable, so theme authors
/// spot the problem on screen.
pub const ERROR_SENTINEL: &str = "#ff00ff";

/// Multiplier used to derive `_hover` variants.
pub const HOVER_FACTOR: f64 = 1.15;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Accepts `#rrggbb`, `rrggbb` and the `#rgb` shorthand.
    pub fn parse_hex(value: &str) -> Option<Self> {
        let hex = value.trim();
        let hex = hex.strip_prefix('#').unwrap_or(hex);
        if !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
            return None;
        }

        match hex.len() {
            6 => {
                let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
                let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
                let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
                Some(Self::new(r, g, b))
            }
            3 => {
                let expand = |digit: &str| u8::from_str_radix(digit, 16).ok().map(|v| v * 17);
                Some(Self::new(
                    expand(&hex[0..1])?,
                    expand(&hex[1..2])?,
                    expand(&hex[2..3])?,
                ))
            }
            _ => None,
        }
    }

    pub fn from_unit(r: f32, g: f32, b: f32) -> Self {
        let channel = |value: f32| (value.clamp(0.0, 1.0) * 255.0).round() as u8;
        Self::new(channel(r), channel(g), channel(b))
    }

    /// Multiplies each channel, truncating and clamping to `0..=255`.
    pub fn scaled(self, intensity: f64) -> Self {
        Self::new(
            scale_channel(self.r, intensity),
            scale_channel(self.g, intensity),
            scale_channel(self.b, intensity),
        )
    }

    pub fn to_hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

fn scale_channel(channel: u8, intensity: f64) -> u8 {
    (f64::from(channel) * intensity).clamp(0.0, 255.0) as u8
}

pub fn apply_intensity(color: &str, intensity: f64) -> Option<String> {
    Rgb::parse_hex(color).map(|rgb| rgb.scaled(intensity).to_hex())
}

pub fn lighten(color: &str) -> Option<String> {
    apply_intensity(color, HOVER_FACTOR)
}
