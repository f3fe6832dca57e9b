//! QuickEdit frames and finishes a single photo.
//!
//! Given one source image and a [`RenderParameters`] value it produces a [`Canvas`]: the source
//! padded (never scaled) to a target aspect ratio, surrounded by a colored border, run through a
//! color filter chain and optionally sharpened. The canvas can then be downscaled and exported
//! as JPEG.
//!
//! # Pipeline overview
//!
//! 1. **Acquire**: `bytes -> SourceImage` ([`decode_source`]); non-images are rejected here
//! 2. **Compose**: `SourceImage + RenderParameters -> Canvas` ([`render`])
//! 3. **Sharpen** (optional): 3×3 unsharp pass over the whole canvas ([`sharpen_rgba8`])
//! 4. **Export**: optional downscale + JPEG encode ([`export_jpeg`]), delivered to an
//!    [`ExportSink`]
//!
//! [`EditorSession`] ties the steps together for interactive use: controls feed it
//! [`ParamUpdate`]s and every update re-renders the canvas from scratch.
//!
//! Design constraints:
//!
//! - **No unsafe**: `unsafe` is forbidden in this crate.
//! - **Deterministic**: identical inputs produce byte-identical canvases.
//! - **Straight RGBA8** end-to-end.
#![forbid(unsafe_code)]

mod assets;
mod effects;
mod export;
mod foundation;
mod params;
mod render;
mod session;

pub use assets::decode::{decode_source, load_source_file};
pub use effects::filters::{ColorFilter, FilterChain};
pub use effects::sharpen::{SHARPEN_KERNEL, sharpen_rgba8};
pub use export::{
    DirectorySink, EXPORT_MIME, ExportSink, ExportedImage, InMemorySink, SHARE_FILE_NAME,
    SHARE_TITLE, ShareRequest, ShareSink, ShareTarget, encode_jpeg, export_canvas,
    export_dimensions, export_jpeg, unique_file_name,
};
pub use foundation::core::{Canvas, Rgba8, SourceImage, rgba_len};
pub use foundation::error::{QuickEditError, QuickEditResult};
pub use params::{
    ASPECT_RATIO_PRESETS, AspectRatio, BORDER_COLOR_PRESETS, ParamUpdate, RenderParameters,
    SHARPEN_PRESETS,
};
pub use render::compositor::render;
pub use render::layout::{CanvasLayout, MAX_CANVAS_PIXELS};
pub use session::{CanvasSnapshot, EditorSession, UpdateOutcome};
