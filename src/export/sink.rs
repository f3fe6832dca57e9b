use std::{
    path::{Path, PathBuf},
    sync::atomic::{AtomicU64, Ordering},
    time::{SystemTime, UNIX_EPOCH},
};

use anyhow::Context as _;

use crate::{
    export::ExportedImage,
    foundation::error::{QuickEditError, QuickEditResult},
};

/// File name handed to share targets.
pub const SHARE_FILE_NAME: &str = "edited-image.jpg";
/// Title handed to share targets.
pub const SHARE_TITLE: &str = "Image edited with QuickEdit Studio";

/// Terminal consumer of an exported image.
pub trait ExportSink {
    /// Deliver one exported image.
    fn deliver(&mut self, image: &ExportedImage) -> QuickEditResult<()>;
}

static LAST_TOKEN: AtomicU64 = AtomicU64::new(0);

/// `<prefix>-<token>.jpg` where the token is the current Unix time in milliseconds, bumped
/// when needed so tokens strictly increase within the process.
pub fn unique_file_name(prefix: &str) -> String {
    let now = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0);
    let mut prev = LAST_TOKEN.load(Ordering::Relaxed);
    let token = loop {
        let next = now.max(prev + 1);
        match LAST_TOKEN.compare_exchange_weak(prev, next, Ordering::Relaxed, Ordering::Relaxed) {
            Ok(_) => break next,
            Err(actual) => prev = actual,
        }
    };
    format!("{prefix}-{token}.jpg")
}

/// Saves each image into a directory as `edited-<millis>.jpg`.
#[derive(Debug, Clone)]
pub struct DirectorySink {
    dir: PathBuf,
    prefix: String,
    saved: Vec<PathBuf>,
}

impl DirectorySink {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            prefix: "edited".to_string(),
            saved: Vec::new(),
        }
    }

    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = prefix.into();
        self
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Paths written so far, oldest first.
    pub fn saved(&self) -> &[PathBuf] {
        &self.saved
    }
}

impl ExportSink for DirectorySink {
    fn deliver(&mut self, image: &ExportedImage) -> QuickEditResult<()> {
        std::fs::create_dir_all(&self.dir).with_context(|| {
            format!("failed to create output directory '{}'", self.dir.display())
        })?;
        let path = self.dir.join(unique_file_name(&self.prefix));
        std::fs::write(&path, &image.bytes)
            .with_context(|| format!("write export '{}'", path.display()))?;
        tracing::info!(path = %path.display(), bytes = image.bytes.len(), "saved export");
        self.saved.push(path);
        Ok(())
    }
}

/// Keeps delivered images in memory. Useful for tests and previews.
#[derive(Debug, Default)]
pub struct InMemorySink {
    images: Vec<ExportedImage>,
}

impl InMemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn images(&self) -> &[ExportedImage] {
        &self.images
    }
}

impl ExportSink for InMemorySink {
    fn deliver(&mut self, image: &ExportedImage) -> QuickEditResult<()> {
        self.images.push(image.clone());
        Ok(())
    }
}

/// Payload offered to a platform share mechanism.
#[derive(Debug, Clone, Copy)]
pub struct ShareRequest<'a> {
    pub title: &'a str,
    pub file_name: &'a str,
    pub mime: &'a str,
    pub bytes: &'a [u8],
}

/// Platform share mechanism (share sheet, messaging intent, ...).
pub trait ShareTarget {
    fn share(&mut self, request: ShareRequest<'_>) -> anyhow::Result<()>;
}

/// Adapts a [`ShareTarget`] into an [`ExportSink`].
#[derive(Debug)]
pub struct ShareSink<T> {
    target: T,
}

impl<T: ShareTarget> ShareSink<T> {
    pub fn new(target: T) -> Self {
        Self { target }
    }

    pub fn into_inner(self) -> T {
        self.target
    }
}

impl<T: ShareTarget> ExportSink for ShareSink<T> {
    fn deliver(&mut self, image: &ExportedImage) -> QuickEditResult<()> {
        let request = ShareRequest {
            title: SHARE_TITLE,
            file_name: SHARE_FILE_NAME,
            mime: image.mime,
            bytes: &image.bytes,
        };
        self.target
            .share(request)
            .map_err(|e| QuickEditError::export(format!("share failed: {e:#}")))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/export/sink.rs"]
mod tests;
