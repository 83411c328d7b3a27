//! # rulemirror-sync
//!
//! Reconciliation core for a set of mirrored rule files.
//!
//! Call [`resolve`] to find the authoritative content and the status of
//! every configured path, then [`synchronize`] to fan the (edited) content
//! out to all of them. [`Session`] wraps both for callers that hold a
//! document between the two calls.

pub mod diff;
pub mod digest;
pub mod drift;
pub mod error;
pub mod plan;
pub mod resolver;
pub mod session;
pub mod status;
pub mod summary;
pub mod synchronizer;

pub use diff::{diff_mirrors, FileDiff};
pub use drift::{drift, DriftEntry, DriftReport, MirrorState};
pub use error::SyncError;
pub use plan::{plan, PlannedAction, PlannedWrite};
pub use resolver::{resolve, Resolution};
pub use session::Session;
pub use summary::SyncSummary;
pub use synchronizer::{synchronize, synchronize_with, SyncOptions, WriteMode};
