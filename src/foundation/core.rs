use std::{fmt, str::FromStr, sync::Arc};

use crate::foundation::error::{QuickEditError, QuickEditResult};

/// Straight (non-premultiplied) RGBA8 color.
///
/// Serializes as a hex string: `#RRGGBB` when opaque, `#RRGGBBAA` otherwise.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Rgba8 {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba8 {
    pub const WHITE: Self = Self::opaque(255, 255, 255);
    pub const BLACK: Self = Self::opaque(0, 0, 0);

    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub const fn opaque(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    pub fn to_array(self) -> [u8; 4] {
        [self.r, self.g, self.b, self.a]
    }

    pub fn from_array([r, g, b, a]: [u8; 4]) -> Self {
        Self::new(r, g, b, a)
    }

    /// Parse `#RGB`, `#RRGGBB` or `#RRGGBBAA` (the leading `#` is optional).
    pub fn parse_hex(s: &str) -> QuickEditResult<Self> {
        let hex = s.trim();
        let hex = hex.strip_prefix('#').unwrap_or(hex);
        if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(QuickEditError::invalid_parameter(format!(
                "color '{s}' is not a hex color"
            )));
        }

        let byte = |i: usize| -> QuickEditResult<u8> {
            u8::from_str_radix(&hex[i..i + 2], 16).map_err(|_| {
                QuickEditError::invalid_parameter(format!("color '{s}' is not a hex color"))
            })
        };

        match hex.len() {
            3 => {
                let mut rgb = [0u8; 3];
                for (i, c) in hex.chars().enumerate() {
                    let v = c.to_digit(16).ok_or_else(|| {
                        QuickEditError::invalid_parameter(format!("color '{s}' is not a hex color"))
                    })? as u8;
                    rgb[i] = v * 17;
                }
                Ok(Self::opaque(rgb[0], rgb[1], rgb[2]))
            }
            6 => Ok(Self::opaque(byte(0)?, byte(2)?, byte(4)?)),
            8 => Ok(Self::new(byte(0)?, byte(2)?, byte(4)?, byte(6)?)),
            _ => Err(QuickEditError::invalid_parameter(format!(
                "color '{s}' must be #RGB, #RRGGBB or #RRGGBBAA"
            ))),
        }
    }
}

impl fmt::Display for Rgba8 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02X}{:02X}{:02X}", self.r, self.g, self.b)?;
        if self.a != 255 {
            write!(f, "{:02X}", self.a)?;
        }
        Ok(())
    }
}

impl FromStr for Rgba8 {
    type Err = QuickEditError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse_hex(s)
    }
}

impl TryFrom<String> for Rgba8 {
    type Error = QuickEditError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse_hex(&value)
    }
}

impl From<Rgba8> for String {
    fn from(value: Rgba8) -> Self {
        value.to_string()
    }
}

/// Byte length of a tightly packed RGBA8 buffer, or an error on overflow.
pub fn rgba_len(width: u32, height: u32) -> QuickEditResult<usize> {
    (width as usize)
        .checked_mul(height as usize)
        .and_then(|v| v.checked_mul(4))
        .ok_or_else(|| QuickEditError::precondition("rgba buffer size overflow"))
}

/// Decoded source raster. Immutable once built; replaced wholesale on a new upload.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SourceImage {
    width: u32,
    height: u32,
    /// Straight RGBA8, row-major, tightly packed.
    rgba8: Arc<Vec<u8>>,
}

impl SourceImage {
    pub fn new(width: u32, height: u32, rgba8: Vec<u8>) -> QuickEditResult<Self> {
        if width == 0 || height == 0 {
            return Err(QuickEditError::unsupported_input(
                "source image must have non-zero dimensions",
            ));
        }
        if rgba8.len() != rgba_len(width, height)? {
            return Err(QuickEditError::precondition(
                "source buffer length must equal width*height*4",
            ));
        }
        Ok(Self {
            width,
            height,
            rgba8: Arc::new(rgba8),
        })
    }

    /// Solid-color source, mostly useful in tests and demos.
    pub fn solid(width: u32, height: u32, color: Rgba8) -> QuickEditResult<Self> {
        let len = rgba_len(width, height)?;
        let data = color.to_array().repeat(len / 4);
        Self::new(width, height, data)
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn data(&self) -> &[u8] {
        &self.rgba8
    }

    pub fn pixel(&self, x: u32, y: u32) -> Option<Rgba8> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let idx = ((y as usize) * (self.width as usize) + x as usize) * 4;
        let px: [u8; 4] = self.rgba8.get(idx..idx + 4)?.try_into().ok()?;
        Some(Rgba8::from_array(px))
    }
}

/// Output raster produced by a render. Rebuilt from scratch on every render.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Canvas {
    pub width: u32,
    pub height: u32,
    /// Straight RGBA8, row-major, tightly packed.
    pub data: Vec<u8>,
}

impl Canvas {
    pub fn filled(width: u32, height: u32, color: Rgba8) -> QuickEditResult<Self> {
        let len = rgba_len(width, height)?;
        Ok(Self {
            width,
            height,
            data: color.to_array().repeat(len / 4),
        })
    }

    pub fn pixel(&self, x: u32, y: u32) -> Option<Rgba8> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let idx = ((y as usize) * (self.width as usize) + x as usize) * 4;
        let px: [u8; 4] = self.data.get(idx..idx + 4)?.try_into().ok()?;
        Some(Rgba8::from_array(px))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
