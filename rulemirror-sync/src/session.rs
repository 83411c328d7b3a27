//! Caller-owned editing session.
//!
//! A session holds the root, the ordered path list and the [`Document`]
//! between a load and a save. Create one per logical editing session with
//! [`Session::open`] and end it with [`Session::close`]; nothing is global.

use std::path::{Path, PathBuf};

use rulemirror_core::{Document, RuleFilePath, SaveOutcome};

use crate::{
    resolver::{resolve, Resolution},
    synchronizer::{synchronize_with, SyncOptions},
    SyncError,
};

#[derive(Debug)]
pub struct Session {
    root: Option<PathBuf>,
    paths: Vec<RuleFilePath>,
    options: SyncOptions,
    document: Document,
    /// Text as last loaded from or saved to disk.
    baseline: Document,
    resolution: Resolution,
}

impl Session {
    pub fn open(root: Option<PathBuf>, paths: Vec<RuleFilePath>) -> Self {
        tracing::debug!(root = ?root, paths = paths.len(), "session opened");
        Self {
            root,
            paths,
            options: SyncOptions::default(),
            document: Document::default(),
            baseline: Document::default(),
            resolution: Resolution::empty(),
        }
    }

    pub fn with_options(mut self, options: SyncOptions) -> Self {
        self.options = options;
        self
    }

    pub fn root(&self) -> Option<&Path> {
        self.root.as_deref()
    }

    pub fn paths(&self) -> &[RuleFilePath] {
        &self.paths
    }

    /// Re-read the mirror set. Replaces the held document, discarding any
    /// unsaved edits.
    pub fn load(&mut self) -> &Resolution {
        self.resolution = resolve(self.root(), &self.paths);
        self.document = Document::from(self.resolution.content.clone());
        self.baseline = self.document.clone();
        &self.resolution
    }

    /// Result of the most recent [`Session::load`].
    pub fn resolution(&self) -> &Resolution {
        &self.resolution
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn set_document(&mut self, text: impl Into<String>) {
        self.document = Document::from(text.into());
    }

    pub fn is_dirty(&self) -> bool {
        self.document != self.baseline
    }

    /// Write the held document to every path. The document only counts as
    /// saved when every path succeeded.
    pub fn save(&mut self) -> Result<Vec<SaveOutcome>, SyncError> {
        let outcomes = synchronize_with(
            self.root(),
            &self.paths,
            self.document.as_str(),
            &self.options,
        )?;
        if outcomes.iter().all(|o| o.success) {
            self.baseline = self.document.clone();
        }
        Ok(outcomes)
    }

    /// End the session, handing back the document if it has unsaved edits.
    pub fn close(self) -> Option<Document> {
        tracing::debug!(dirty = self.is_dirty(), "session closed");
        if self.is_dirty() {
            Some(self.document)
        } else {
            None
        }
    }
}
