use std::path::Path;

use anyhow::Context;

use crate::foundation::{
    core::SourceImage,
    error::{QuickEditError, QuickEditResult},
};

/// Decode encoded image bytes into a straight RGBA8 [`SourceImage`].
///
/// Anything that is not a recognizable, decodable raster image is rejected as
/// [`QuickEditError::UnsupportedInput`] and never reaches the compositor.
#[tracing::instrument(skip(bytes), fields(len = bytes.len()))]
pub fn decode_source(bytes: &[u8]) -> QuickEditResult<SourceImage> {
    let format = image::guess_format(bytes)
        .map_err(|_| QuickEditError::unsupported_input("input is not a recognized image format"))?;

    let dyn_img = image::load_from_memory_with_format(bytes, format).map_err(|e| {
        QuickEditError::unsupported_input(format!("failed to decode {format:?} image: {e}"))
    })?;
    let rgba = dyn_img.to_rgba8();
    let (width, height) = rgba.dimensions();
    tracing::debug!(?format, width, height, "decoded source image");

    SourceImage::new(width, height, rgba.into_raw())
}

/// Read a file and decode it with [`decode_source`].
pub fn load_source_file(path: &Path) -> QuickEditResult<SourceImage> {
    let bytes =
        std::fs::read(path).with_context(|| format!("read image '{}'", path.display()))?;
    decode_source(&bytes)
}

#[cfg(test)]
#[path = "../../tests/unit/assets/decode.rs"]
mod tests;
