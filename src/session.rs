//! Editor session: owns the source, the parameters and the current canvas.
//!
//! All mutation funnels through `&mut self` methods, so renders on one session are serialized
//! by construction. Every successful render replaces the canvas wholesale and bumps the
//! generation counter. A failed render leaves both the parameters and the previous canvas as
//! they were.

use crate::{
    assets::decode::decode_source,
    export::{ExportSink, ExportedImage, export_jpeg},
    foundation::{
        core::{Canvas, SourceImage},
        error::QuickEditResult,
    },
    params::{ParamUpdate, RenderParameters},
    render::compositor::render,
};

/// Result of feeding one control update into a session.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct UpdateOutcome {
    /// `false` when no source is loaded and the update was dropped.
    pub applied: bool,
    /// Whether the canvas was rebuilt.
    pub rerendered: bool,
    /// Percentage label for range controls.
    pub label: Option<String>,
}

/// Copy of a finished canvas, detached from later renders.
#[derive(Clone, Debug, PartialEq)]
pub struct CanvasSnapshot {
    pub generation: u64,
    pub canvas: Canvas,
    pub params: RenderParameters,
}

impl CanvasSnapshot {
    /// Downscale and encode with the export fields captured at snapshot time.
    pub fn export(&self) -> QuickEditResult<ExportedImage> {
        export_jpeg(&self.canvas, &self.params)
    }
}

/// Interactive editing state for one source image.
#[derive(Debug, Default)]
pub struct EditorSession {
    source: Option<SourceImage>,
    params: RenderParameters,
    canvas: Option<Canvas>,
    generation: u64,
}

impl EditorSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn source(&self) -> Option<&SourceImage> {
        self.source.as_ref()
    }

    pub fn params(&self) -> &RenderParameters {
        &self.params
    }

    pub fn canvas(&self) -> Option<&Canvas> {
        self.canvas.as_ref()
    }

    /// Number of successful renders so far.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Replace the source, reset every parameter and render once.
    #[tracing::instrument(skip(self, source), fields(width = source.width(), height = source.height()))]
    pub fn load_source(&mut self, source: SourceImage) -> QuickEditResult<&Canvas> {
        let params = RenderParameters::default();
        let canvas = render(&source, &params)?;
        self.source = Some(source);
        self.params = params;
        Ok(self.commit(canvas))
    }

    /// Decode and load encoded image bytes. Undecodable input changes nothing.
    pub fn load_bytes(&mut self, bytes: &[u8]) -> QuickEditResult<&Canvas> {
        let source = decode_source(bytes)?;
        self.load_source(source)
    }

    /// Apply one control update and re-render when it can change pixels.
    ///
    /// Without a source the update is ignored. On error nothing changes.
    #[tracing::instrument(skip(self))]
    pub fn update(&mut self, update: ParamUpdate) -> QuickEditResult<UpdateOutcome> {
        let Some(source) = &self.source else {
            return Ok(UpdateOutcome::default());
        };

        let mut next = self.params.clone();
        next.apply(&update)?;

        let rerendered = update.affects_canvas();
        if rerendered {
            let canvas = render(source, &next)?;
            self.commit(canvas);
        }
        self.params = next;

        Ok(UpdateOutcome {
            applied: true,
            rerendered,
            label: update.label(),
        })
    }

    /// Restore every parameter to its default and render exactly once.
    ///
    /// Returns `None` without touching anything when no source is loaded.
    #[tracing::instrument(skip(self))]
    pub fn reset(&mut self) -> QuickEditResult<Option<&Canvas>> {
        let Some(source) = &self.source else {
            return Ok(None);
        };
        let mut params = self.params.clone();
        params.reset();
        let canvas = render(source, &params)?;
        self.params = params;
        Ok(Some(self.commit(canvas)))
    }

    /// Render again with the current parameters.
    pub fn rerender(&mut self) -> QuickEditResult<Option<&Canvas>> {
        let Some(source) = &self.source else {
            return Ok(None);
        };
        let canvas = render(source, &self.params)?;
        Ok(Some(self.commit(canvas)))
    }

    /// Detach a copy of the current canvas for export off the render path.
    pub fn snapshot(&self) -> Option<CanvasSnapshot> {
        self.canvas.as_ref().map(|canvas| CanvasSnapshot {
            generation: self.generation,
            canvas: canvas.clone(),
            params: self.params.clone(),
        })
    }

    /// Whether `snapshot` still reflects the latest render.
    pub fn is_current(&self, snapshot: &CanvasSnapshot) -> bool {
        snapshot.generation == self.generation
    }

    /// Export the current canvas, or `None` when nothing has been rendered yet.
    pub fn export(&self) -> QuickEditResult<Option<ExportedImage>> {
        match &self.canvas {
            Some(canvas) => export_jpeg(canvas, &self.params).map(Some),
            None => Ok(None),
        }
    }

    /// Export and hand the result to `sink`.
    ///
    /// Failures are logged and reported as `false`; the session is unaffected either way.
    pub fn deliver(&self, sink: &mut dyn ExportSink) -> bool {
        let result = self.export().and_then(|image| match image {
            Some(image) => sink.deliver(&image).map(|()| true),
            None => Ok(false),
        });
        match result {
            Ok(delivered) => delivered,
            Err(err) => {
                tracing::warn!(error = %err, "export failed");
                false
            }
        }
    }

    fn commit(&mut self, canvas: Canvas) -> &Canvas {
        self.generation += 1;
        self.canvas.insert(canvas)
    }
}

#[cfg(test)]
#[path = "../tests/unit/session.rs"]
mod tests;
