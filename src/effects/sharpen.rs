use crate::foundation::{
    core::rgba_len,
    error::{QuickEditError, QuickEditResult},
};

/// 3×3 unsharp kernel, row-major.
pub const SHARPEN_KERNEL: [[i32; 3]; 3] = [[0, -1, 0], [-1, 5, -1], [0, -1, 0]];

/// Sharpen a straight RGBA8 buffer in place.
///
/// Each interior pixel becomes `src + (convolved - src) * strength` per RGB channel, rounded
/// and clamped to 8 bits. The outermost 1-pixel ring and the alpha channel are left untouched.
/// Reads come from a snapshot of the input, never from pixels already written.
///
/// `strength` is clamped into `[0, 1]`; zero is a no-op.
#[tracing::instrument(skip(rgba))]
pub fn sharpen_rgba8(rgba: &mut [u8], width: u32, height: u32, strength: f32) -> QuickEditResult<()> {
    let expected_len = rgba_len(width, height)?;
    if rgba.len() != expected_len {
        return Err(QuickEditError::precondition(
            "sharpen_rgba8 expects a buffer matching width*height*4",
        ));
    }

    let strength = if strength.is_finite() {
        strength.clamp(0.0, 1.0)
    } else {
        0.0
    };
    if strength == 0.0 || width < 3 || height < 3 {
        return Ok(());
    }

    let src = rgba.to_vec();
    let w = width as usize;
    let h = height as usize;

    for y in 1..h - 1 {
        for x in 1..w - 1 {
            let mut acc = [0i32; 3];
            for (ky, row) in SHARPEN_KERNEL.iter().enumerate() {
                for (kx, &kw) in row.iter().enumerate() {
                    if kw == 0 {
                        continue;
                    }
                    let idx = ((y + ky - 1) * w + (x + kx - 1)) * 4;
                    for c in 0..3 {
                        acc[c] += kw * i32::from(src[idx + c]);
                    }
                }
            }

            let out_idx = (y * w + x) * 4;
            for c in 0..3 {
                let s = f32::from(src[out_idx + c]);
                let blended = s + (acc[c] as f32 - s) * strength;
                rgba[out_idx + c] = blended.round_ties_even().clamp(0.0, 255.0) as u8;
            }
        }
    }
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/effects/sharpen.rs"]
mod tests;
