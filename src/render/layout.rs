use crate::{
    foundation::error::{QuickEditError, QuickEditResult},
    params::AspectRatio,
};

/// Largest canvas area, in pixels, the compositor will allocate (the common 2D canvas limit).
pub const MAX_CANVAS_PIXELS: u64 = 268_435_456;

/// Resolved canvas geometry for one render.
///
/// Padded sizes and the border are kept unrounded; only the final canvas size is rounded
/// (half up), once.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CanvasLayout {
    pub target_ratio: f64,
    pub padded_width: f64,
    pub padded_height: f64,
    pub border_px: f64,
    pub width: u32,
    pub height: u32,
    /// Top-left corner of the source on the canvas.
    pub draw_x: u32,
    pub draw_y: u32,
}

impl CanvasLayout {
    /// Pad the source to `aspect` without scaling it, then add a border of
    /// `border_percent` of the shorter padded side on every edge.
    ///
    /// An exact ratio tie takes the "taller" branch, which needs no padding.
    pub fn compute(
        source_width: u32,
        source_height: u32,
        aspect: AspectRatio,
        border_percent: f64,
    ) -> QuickEditResult<Self> {
        if source_width == 0 || source_height == 0 {
            return Err(QuickEditError::precondition(
                "layout requires a non-empty source",
            ));
        }
        let target_ratio = aspect.resolve(source_width, source_height)?;

        let src_w = f64::from(source_width);
        let src_h = f64::from(source_height);
        let img_ratio = src_w / src_h;

        // Padding only ever grows a side; `max` absorbs float error on near ties.
        let (padded_width, padded_height) = if target_ratio > img_ratio {
            ((src_h * target_ratio).max(src_w), src_h)
        } else {
            (src_w, (src_w / target_ratio).max(src_h))
        };

        let border_percent = if border_percent.is_finite() {
            border_percent.clamp(0.0, 100.0)
        } else {
            0.0
        };
        let border_px = padded_width.min(padded_height) * (border_percent / 100.0);

        let (width, height) = canvas_size(
            padded_width + 2.0 * border_px,
            padded_height + 2.0 * border_px,
        )?;

        if width < source_width || height < source_height {
            return Err(QuickEditError::precondition(format!(
                "canvas {width}x{height} cannot contain source {source_width}x{source_height}"
            )));
        }

        Ok(Self {
            target_ratio,
            padded_width,
            padded_height,
            border_px,
            width,
            height,
            draw_x: (width - source_width) / 2,
            draw_y: (height - source_height) / 2,
        })
    }
}

/// Round both sides half up and enforce [`MAX_CANVAS_PIXELS`].
fn canvas_size(width: f64, height: f64) -> QuickEditResult<(u32, u32)> {
    let w = (width + 0.5).floor().max(1.0);
    let h = (height + 0.5).floor().max(1.0);
    let area = w * h;
    if !area.is_finite() || area > MAX_CANVAS_PIXELS as f64 {
        return Err(QuickEditError::precondition(format!(
            "canvas {w}x{h} exceeds the {MAX_CANVAS_PIXELS}-pixel limit"
        )));
    }
    Ok((w as u32, h as u32))
}

#[cfg(test)]
#[path = "../../tests/unit/render/layout.rs"]
mod tests;
