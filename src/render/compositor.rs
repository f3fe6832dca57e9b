use crate::{
    effects::{filters::FilterChain, sharpen::sharpen_rgba8},
    foundation::{
        core::{Canvas, SourceImage},
        error::{QuickEditError, QuickEditResult},
    },
    params::RenderParameters,
    render::layout::CanvasLayout,
};

/// Compose `source` onto a fresh canvas according to `params`.
///
/// Pipeline:
/// 1. [`CanvasLayout::compute`]: pad to the target ratio, add the border, round once
/// 2. fill the whole canvas with the border color
/// 3. draw the source, run through the [`FilterChain`], centered on the canvas
/// 4. [`sharpen_rgba8`] over the full canvas when the strength is non-zero
///
/// The source is never scaled. Numeric fields are clamped into their domains; an aspect ratio
/// that does not resolve to a finite positive number is an error. Identical inputs always
/// produce identical canvases.
#[tracing::instrument(skip(source, params), fields(src_w = source.width(), src_h = source.height()))]
pub fn render(source: &SourceImage, params: &RenderParameters) -> QuickEditResult<Canvas> {
    let params = params.sanitized();
    let layout = CanvasLayout::compute(
        source.width(),
        source.height(),
        params.aspect_ratio,
        params.border_size_percent,
    )?;
    let chain = FilterChain::from_params(&params);
    tracing::debug!(
        width = layout.width,
        height = layout.height,
        border_px = layout.border_px,
        draw_x = layout.draw_x,
        draw_y = layout.draw_y,
        filters = chain.stages().len(),
        "resolved canvas layout"
    );

    let mut canvas = Canvas::filled(layout.width, layout.height, params.border_color)?;
    draw_source(&mut canvas, source, &chain, layout.draw_x, layout.draw_y)?;

    if params.sharpen_strength > 0.0 {
        sharpen_rgba8(
            &mut canvas.data,
            canvas.width,
            canvas.height,
            params.sharpen_strength as f32,
        )?;
    }
    Ok(canvas)
}

fn draw_source(
    canvas: &mut Canvas,
    source: &SourceImage,
    chain: &FilterChain,
    draw_x: u32,
    draw_y: u32,
) -> QuickEditResult<()> {
    let fits_x = draw_x
        .checked_add(source.width())
        .is_some_and(|r| r <= canvas.width);
    let fits_y = draw_y
        .checked_add(source.height())
        .is_some_and(|b| b <= canvas.height);
    if !fits_x || !fits_y {
        return Err(QuickEditError::precondition(format!(
            "draw rect {}x{} at ({draw_x},{draw_y}) exceeds canvas {}x{}",
            source.width(),
            source.height(),
            canvas.width,
            canvas.height
        )));
    }

    let src_row_len = source.width() as usize * 4;
    let dst_stride = canvas.width as usize * 4;
    for (row, src_row) in source.data().chunks_exact(src_row_len).enumerate() {
        let start = (draw_y as usize + row) * dst_stride + draw_x as usize * 4;
        let dst_row = &mut canvas.data[start..start + src_row_len];
        for (d, s) in dst_row.chunks_exact_mut(4).zip(src_row.chunks_exact(4)) {
            let filtered = chain.apply_pixel([s[0], s[1], s[2], s[3]]);
            let out = over([d[0], d[1], d[2], d[3]], filtered);
            d.copy_from_slice(&out);
        }
    }
    Ok(())
}

/// Source-over for straight RGBA8. Opaque sources replace `dst` exactly.
pub(crate) fn over(dst: [u8; 4], src: [u8; 4]) -> [u8; 4] {
    match src[3] {
        255 => return src,
        0 => return dst,
        _ => {}
    }

    let sa = f32::from(src[3]) / 255.0;
    let da = f32::from(dst[3]) / 255.0 * (1.0 - sa);
    let oa = sa + da;

    let mut out = [0u8; 4];
    for i in 0..3 {
        let c = (f32::from(src[i]) * sa + f32::from(dst[i]) * da) / oa;
        out[i] = c.round().clamp(0.0, 255.0) as u8;
    }
    out[3] = (oa * 255.0).round().clamp(0.0, 255.0) as u8;
    out
}

#[cfg(test)]
#[path = "../../tests/unit/render/compositor.rs"]
mod tests;
