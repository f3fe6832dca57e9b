use crate::params::RenderParameters;

/// One color-adjustment stage. Amounts are fractions (`percent / 100`).
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ColorFilter {
    Brightness(f32),
    Contrast(f32),
    Saturate(f32),
    Grayscale(f32),
    Sepia(f32),
}

impl ColorFilter {
    pub fn is_identity(self) -> bool {
        match self {
            Self::Brightness(a) | Self::Contrast(a) | Self::Saturate(a) => a == 1.0,
            Self::Grayscale(a) | Self::Sepia(a) => a == 0.0,
        }
    }

    /// Apply to straight RGB in `[0, 1]`. The result is clamped to `[0, 1]`.
    pub fn apply(self, c: [f32; 3]) -> [f32; 3] {
        let out = match self {
            Self::Brightness(a) => c.map(|v| v * a),
            Self::Contrast(a) => c.map(|v| (v - 0.5) * a + 0.5),
            Self::Saturate(s) => mat3(
                [
                    [0.213 + 0.787 * s, 0.715 - 0.715 * s, 0.072 - 0.072 * s],
                    [0.213 - 0.213 * s, 0.715 + 0.285 * s, 0.072 - 0.072 * s],
                    [0.213 - 0.213 * s, 0.715 - 0.715 * s, 0.072 + 0.928 * s],
                ],
                c,
            ),
            Self::Grayscale(g) => {
                let k = 1.0 - g.clamp(0.0, 1.0);
                mat3(
                    [
                        [0.2126 + 0.7874 * k, 0.7152 - 0.7152 * k, 0.0722 - 0.0722 * k],
                        [0.2126 - 0.2126 * k, 0.7152 + 0.2848 * k, 0.0722 - 0.0722 * k],
                        [0.2126 - 0.2126 * k, 0.7152 - 0.7152 * k, 0.0722 + 0.9278 * k],
                    ],
                    c,
                )
            }
            Self::Sepia(p) => {
                let k = 1.0 - p.clamp(0.0, 1.0);
                mat3(
                    [
                        [0.393 + 0.607 * k, 0.769 - 0.769 * k, 0.189 - 0.189 * k],
                        [0.349 - 0.349 * k, 0.686 + 0.314 * k, 0.168 - 0.168 * k],
                        [0.272 - 0.272 * k, 0.534 - 0.534 * k, 0.131 + 0.869 * k],
                    ],
                    c,
                )
            }
        };
        out.map(|v| v.clamp(0.0, 1.0))
    }
}

fn mat3(m: [[f32; 3]; 3], c: [f32; 3]) -> [f32; 3] {
    [0, 1, 2].map(|row| m[row][0] * c[0] + m[row][1] * c[1] + m[row][2] * c[2])
}

/// Ordered color adjustments for one render: brightness, contrast, saturate, grayscale, sepia.
///
/// Neutral stages are dropped when the chain is built, so the default parameters produce an
/// empty chain that leaves pixels bit-identical.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct FilterChain {
    stages: Vec<ColorFilter>,
}

impl FilterChain {
    pub fn from_params(params: &RenderParameters) -> Self {
        let pct = |v: f64| (v / 100.0) as f32;
        let stages = [
            ColorFilter::Brightness(pct(params.brightness)),
            ColorFilter::Contrast(pct(params.contrast)),
            ColorFilter::Saturate(pct(params.saturate)),
            ColorFilter::Grayscale(pct(params.grayscale)),
            ColorFilter::Sepia(pct(params.sepia)),
        ]
        .into_iter()
        .filter(|f| !f.is_identity())
        .collect();
        Self { stages }
    }

    pub fn stages(&self) -> &[ColorFilter] {
        &self.stages
    }

    pub fn is_identity(&self) -> bool {
        self.stages.is_empty()
    }

    /// Run every stage on one straight RGBA8 pixel. Alpha passes through.
    pub fn apply_pixel(&self, px: [u8; 4]) -> [u8; 4] {
        if self.is_identity() {
            return px;
        }
        let mut c = [px[0], px[1], px[2]].map(|v| f32::from(v) / 255.0);
        for stage in &self.stages {
            c = stage.apply(c);
        }
        let [r, g, b] = c.map(unit_to_u8);
        [r, g, b, px[3]]
    }
}

fn unit_to_u8(v: f32) -> u8 {
    (v * 255.0).round().clamp(0.0, 255.0) as u8
}

#[cfg(test)]
#[path = "../../tests/unit/effects/filters.rs"]
mod tests;
