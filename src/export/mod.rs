//! Export: the only place an image is ever scaled.
//!
//! The finished canvas is optionally downscaled to an output width, encoded to JPEG at the
//! chosen quality, and handed to an [`ExportSink`] for delivery.

/// Delivery sinks (local save, in-memory, platform share).
pub mod sink;

use std::io::Cursor;

use image::{
    ExtendedColorType, Rgba, Rgba32FImage, codecs::jpeg::JpegEncoder, imageops::FilterType,
};

use crate::{
    foundation::{
        core::{Canvas, rgba_len},
        error::{QuickEditError, QuickEditResult},
    },
    params::RenderParameters,
};

pub use sink::{
    DirectorySink, ExportSink, InMemorySink, SHARE_FILE_NAME, SHARE_TITLE, ShareRequest,
    ShareSink, ShareTarget, unique_file_name,
};

/// MIME type of every exported file.
pub const EXPORT_MIME: &str = "image/jpeg";

/// Encoded output ready for delivery.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ExportedImage {
    pub width: u32,
    pub height: u32,
    pub mime: &'static str,
    pub bytes: Vec<u8>,
}

/// Output dimensions for a canvas under an optional width cap.
///
/// The canvas is only ever shrunk: a cap at or above the canvas width leaves it as is.
pub fn export_dimensions(width: u32, height: u32, output_width: Option<u32>) -> (u32, u32) {
    match output_width {
        Some(w) if w > 0 && w < width => {
            let h = (f64::from(height) * f64::from(w) / f64::from(width)).round();
            (w, (h as u32).max(1))
        }
        _ => (width, height),
    }
}

/// Copy of `canvas` downscaled to `output_width` when that is narrower than the canvas.
///
/// Resampling runs on premultiplied color, so fully transparent pixels contribute no color to
/// their neighbors.
#[tracing::instrument(skip(canvas), fields(width = canvas.width, height = canvas.height))]
pub fn export_canvas(canvas: &Canvas, output_width: Option<u32>) -> QuickEditResult<Canvas> {
    let (w, h) = export_dimensions(canvas.width, canvas.height, output_width);
    if (w, h) == (canvas.width, canvas.height) {
        return Ok(canvas.clone());
    }
    if canvas.data.len() != rgba_len(canvas.width, canvas.height)? {
        return Err(QuickEditError::precondition(
            "canvas buffer does not match its dimensions",
        ));
    }

    let mut premul = Rgba32FImage::new(canvas.width, canvas.height);
    for (dst, src) in premul.pixels_mut().zip(canvas.data.chunks_exact(4)) {
        let a = f32::from(src[3]) / 255.0;
        let c = |v: u8| f32::from(v) / 255.0 * a;
        *dst = Rgba([c(src[0]), c(src[1]), c(src[2]), a]);
    }
    let resized = image::imageops::resize(&premul, w, h, FilterType::Triangle);
    tracing::debug!(out_width = w, out_height = h, "downscaled canvas for export");

    let mut data = Vec::with_capacity(rgba_len(w, h)?);
    for px in resized.pixels() {
        let [r, g, b, a] = px.0;
        let a = a.clamp(0.0, 1.0);
        if a <= 0.0 {
            data.extend_from_slice(&[0, 0, 0, 0]);
            continue;
        }
        data.extend_from_slice(&[
            unit_to_u8(r / a),
            unit_to_u8(g / a),
            unit_to_u8(b / a),
            unit_to_u8(a),
        ]);
    }

    Ok(Canvas {
        width: w,
        height: h,
        data,
    })
}

fn unit_to_u8(v: f32) -> u8 {
    (v * 255.0).round().clamp(0.0, 255.0) as u8
}

/// Encode a canvas as JPEG. Alpha is flattened onto black.
pub fn encode_jpeg(canvas: &Canvas, quality: u8) -> QuickEditResult<Vec<u8>> {
    let mut rgb = Vec::with_capacity(canvas.data.len() / 4 * 3);
    for px in canvas.data.chunks_exact(4) {
        let a = u16::from(px[3]);
        for &c in &px[..3] {
            rgb.push(((u16::from(c) * a + 127) / 255) as u8);
        }
    }

    let mut buf = Cursor::new(Vec::new());
    {
        let mut encoder = JpegEncoder::new_with_quality(&mut buf, quality.clamp(1, 100));
        encoder
            .encode(&rgb, canvas.width, canvas.height, ExtendedColorType::Rgb8)
            .map_err(|e| QuickEditError::export(format!("failed to encode JPEG: {e}")))?;
    }
    Ok(buf.into_inner())
}

/// Downscale (if requested) and encode with the export fields of `params`.
pub fn export_jpeg(canvas: &Canvas, params: &RenderParameters) -> QuickEditResult<ExportedImage> {
    let params = params.sanitized();
    let out = export_canvas(canvas, params.output_width)?;
    let bytes = encode_jpeg(&out, params.export_quality)?;
    Ok(ExportedImage {
        width: out.width,
        height: out.height,
        mime: EXPORT_MIME,
        bytes,
    })
}

#[cfg(test)]
#[path = "../../tests/unit/export/mod.rs"]
mod tests;
