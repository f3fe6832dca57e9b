//! Render parameters: the single value that drives a render.
//!
//! Controls never poke at fields directly; each one produces a [`ParamUpdate`] that writes
//! exactly one field after validation. Aspect ratios are a closed type parsed once at the
//! boundary (`"original"`, `"16/9"`, `"4:5"`, `"1.5"`), never evaluated as an expression.

use std::{fmt, str::FromStr};

use crate::foundation::{
    core::Rgba8,
    error::{QuickEditError, QuickEditResult},
};

/// Target aspect ratio of the padded image.
#[derive(Clone, Copy, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum AspectRatio {
    /// Keep the source's own ratio.
    #[default]
    Original,
    /// `width_units / height_units`.
    Ratio { width_units: f64, height_units: f64 },
}

impl AspectRatio {
    pub const fn ratio(width_units: f64, height_units: f64) -> Self {
        Self::Ratio {
            width_units,
            height_units,
        }
    }

    /// Parse `original`, `W/H`, `W:H` or a bare positive number.
    pub fn parse(s: &str) -> QuickEditResult<Self> {
        let t = s.trim();
        if t.eq_ignore_ascii_case("original") {
            return Ok(Self::Original);
        }

        let (w, h) = match t.split_once(['/', ':']) {
            Some((w, h)) => (parse_units(w, s)?, parse_units(h, s)?),
            None => (parse_units(t, s)?, 1.0),
        };
        let parsed = Self::ratio(w, h);
        // Rejects things like "1e308/1e-308" whose quotient overflows.
        parsed.resolve(1, 1)?;
        Ok(parsed)
    }

    /// Resolve to a width/height ratio for a source of the given size.
    ///
    /// Errors with [`QuickEditError::InvalidParameter`] when the ratio is not finite and positive.
    pub fn resolve(self, source_width: u32, source_height: u32) -> QuickEditResult<f64> {
        let r = match self {
            Self::Original => f64::from(source_width) / f64::from(source_height),
            Self::Ratio {
                width_units,
                height_units,
            } => width_units / height_units,
        };
        if !r.is_finite() || r <= 0.0 {
            return Err(QuickEditError::invalid_parameter(format!(
                "aspect ratio '{self}' must resolve to a finite ratio > 0"
            )));
        }
        Ok(r)
    }
}

fn parse_units(part: &str, whole: &str) -> QuickEditResult<f64> {
    let v: f64 = part.trim().parse().map_err(|_| {
        QuickEditError::invalid_parameter(format!("aspect ratio '{whole}' is not W/H"))
    })?;
    if !v.is_finite() || v <= 0.0 {
        return Err(QuickEditError::invalid_parameter(format!(
            "aspect ratio '{whole}' must use finite positive units"
        )));
    }
    Ok(v)
}

impl fmt::Display for AspectRatio {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Original => f.write_str("original"),
            Self::Ratio {
                width_units,
                height_units,
            } => write!(f, "{width_units}/{height_units}"),
        }
    }
}

impl FromStr for AspectRatio {
    type Err = QuickEditError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for AspectRatio {
    type Error = QuickEditError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<AspectRatio> for String {
    fn from(value: AspectRatio) -> Self {
        value.to_string()
    }
}

/// Aspect-ratio buttons, in display order.
pub const ASPECT_RATIO_PRESETS: [(&str, AspectRatio); 6] = [
    ("Original", AspectRatio::Original),
    ("1:1", AspectRatio::ratio(1.0, 1.0)),
    ("4:5", AspectRatio::ratio(4.0, 5.0)),
    ("3:2", AspectRatio::ratio(3.0, 2.0)),
    ("16:9", AspectRatio::ratio(16.0, 9.0)),
    ("9:16", AspectRatio::ratio(9.0, 16.0)),
];

/// Sharpen-strength buttons, in display order.
pub const SHARPEN_PRESETS: [(&str, f64); 4] =
    [("Off", 0.0), ("Low", 0.3), ("Medium", 0.6), ("High", 1.0)];

/// Border-color swatches, in display order.
pub const BORDER_COLOR_PRESETS: [(&str, Rgba8); 4] = [
    ("White", Rgba8::WHITE),
    ("Black", Rgba8::BLACK),
    ("Gray", Rgba8::opaque(0x80, 0x80, 0x80)),
    ("Cream", Rgba8::opaque(0xF5, 0xF0, 0xE1)),
];

/// Every user-adjustable knob of a render.
///
/// JSON keys follow the editor's state object (`borderSize`, `quality`, `sharpen`, ...);
/// missing keys take their defaults.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RenderParameters {
    /// Border thickness as a percentage of the shortest padded side, `[0, 100]`.
    #[serde(rename = "borderSize")]
    pub border_size_percent: f64,
    pub border_color: Rgba8,
    pub aspect_ratio: AspectRatio,
    /// JPEG quality, `[1, 100]`.
    #[serde(rename = "quality")]
    pub export_quality: u8,
    /// Sharpen blend factor, `[0, 1]`; 0 disables the pass.
    #[serde(rename = "sharpen")]
    pub sharpen_strength: f64,
    /// Percent, 100 is identity.
    pub brightness: f64,
    /// Percent, 100 is identity.
    pub contrast: f64,
    /// Percent, 100 is identity.
    pub saturate: f64,
    /// Percent in `[0, 100]`, 0 is identity.
    pub grayscale: f64,
    /// Percent in `[0, 100]`, 0 is identity.
    pub sepia: f64,
    /// Export width cap in pixels.
    pub output_width: Option<u32>,
}

impl Default for RenderParameters {
    fn default() -> Self {
        Self {
            border_size_percent: 0.0,
            border_color: Rgba8::WHITE,
            aspect_ratio: AspectRatio::Original,
            export_quality: 92,
            sharpen_strength: 0.0,
            brightness: 100.0,
            contrast: 100.0,
            saturate: 100.0,
            grayscale: 0.0,
            sepia: 0.0,
            output_width: None,
        }
    }
}

impl RenderParameters {
    /// Restore every field to its default in one step.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Check every field against its domain.
    pub fn validate(&self) -> QuickEditResult<()> {
        check_range("borderSize", self.border_size_percent, 0.0, 100.0)?;
        check_range("sharpen", self.sharpen_strength, 0.0, 1.0)?;
        check_range("brightness", self.brightness, 0.0, f64::MAX)?;
        check_range("contrast", self.contrast, 0.0, f64::MAX)?;
        check_range("saturate", self.saturate, 0.0, f64::MAX)?;
        check_range("grayscale", self.grayscale, 0.0, 100.0)?;
        check_range("sepia", self.sepia, 0.0, 100.0)?;

        if !(1..=100).contains(&self.export_quality) {
            return Err(QuickEditError::invalid_parameter(format!(
                "quality must be in [1, 100], got {}",
                self.export_quality
            )));
        }
        if self.output_width == Some(0) {
            return Err(QuickEditError::invalid_parameter(
                "outputWidth must be a positive integer",
            ));
        }
        if let AspectRatio::Ratio { .. } = self.aspect_ratio {
            self.aspect_ratio.resolve(1, 1)?;
        }
        Ok(())
    }

    /// Copy with every numeric field clamped into its domain.
    ///
    /// Non-finite values fall back to the field default. The aspect ratio is left alone; the
    /// compositor rejects a bad one instead of guessing.
    pub fn sanitized(&self) -> Self {
        let d = Self::default();
        Self {
            border_size_percent: clamp_or(self.border_size_percent, 0.0, 100.0, d.border_size_percent),
            border_color: self.border_color,
            aspect_ratio: self.aspect_ratio,
            export_quality: self.export_quality.clamp(1, 100),
            sharpen_strength: clamp_or(self.sharpen_strength, 0.0, 1.0, d.sharpen_strength),
            brightness: clamp_or(self.brightness, 0.0, f64::MAX, d.brightness),
            contrast: clamp_or(self.contrast, 0.0, f64::MAX, d.contrast),
            saturate: clamp_or(self.saturate, 0.0, f64::MAX, d.saturate),
            grayscale: clamp_or(self.grayscale, 0.0, 100.0, d.grayscale),
            sepia: clamp_or(self.sepia, 0.0, 100.0, d.sepia),
            output_width: self.output_width.filter(|w| *w > 0),
        }
    }

    /// Apply one control update. The update is validated first; on error `self` is untouched.
    pub fn apply(&mut self, update: &ParamUpdate) -> QuickEditResult<()> {
        let mut next = self.clone();
        update.write(&mut next);
        next.validate()?;
        *self = next;
        Ok(())
    }
}

fn check_range(name: &str, v: f64, min: f64, max: f64) -> QuickEditResult<()> {
    if !v.is_finite() || v < min || v > max {
        return Err(QuickEditError::invalid_parameter(format!(
            "{name} must be finite and in [{min}, {max}], got {v}"
        )));
    }
    Ok(())
}

fn clamp_or(v: f64, min: f64, max: f64, fallback: f64) -> f64 {
    if v.is_finite() { v.clamp(min, max) } else { fallback }
}

/// One control writing one field.
#[derive(Clone, Debug, PartialEq)]
pub enum ParamUpdate {
    BorderSize(f64),
    BorderColor(Rgba8),
    AspectRatio(AspectRatio),
    ExportQuality(u8),
    Sharpen(f64),
    Brightness(f64),
    Contrast(f64),
    Saturate(f64),
    Grayscale(f64),
    Sepia(f64),
    OutputWidth(Option<u32>),
}

impl ParamUpdate {
    fn write(&self, p: &mut RenderParameters) {
        match *self {
            Self::BorderSize(v) => p.border_size_percent = v,
            Self::BorderColor(c) => p.border_color = c,
            Self::AspectRatio(r) => p.aspect_ratio = r,
            Self::ExportQuality(q) => p.export_quality = q,
            Self::Sharpen(v) => p.sharpen_strength = v,
            Self::Brightness(v) => p.brightness = v,
            Self::Contrast(v) => p.contrast = v,
            Self::Saturate(v) => p.saturate = v,
            Self::Grayscale(v) => p.grayscale = v,
            Self::Sepia(v) => p.sepia = v,
            Self::OutputWidth(w) => p.output_width = w,
        }
    }

    /// Whether the update can change canvas pixels. Export-only fields do not re-render.
    pub fn affects_canvas(&self) -> bool {
        !matches!(self, Self::ExportQuality(_) | Self::OutputWidth(_))
    }

    /// Percentage label shown next to a range control, `None` for discrete controls.
    pub fn label(&self) -> Option<String> {
        match *self {
            Self::BorderSize(v)
            | Self::Brightness(v)
            | Self::Contrast(v)
            | Self::Saturate(v)
            | Self::Grayscale(v)
            | Self::Sepia(v) => Some(format!("{v}%")),
            Self::ExportQuality(q) => Some(format!("{q}%")),
            Self::BorderColor(_) | Self::AspectRatio(_) | Self::Sharpen(_) | Self::OutputWidth(_) => {
                None
            }
        }
    }
}

#[cfg(test)]
#[path = "../tests/unit/params.rs"]
mod tests;
