/*!
 * # Editing Core
 *
 * The chapter being edited lives in a [`Document`]: an in-memory rich-text
 * tree ([`Doc`](crate::models::Doc)) plus the selection, a version counter and
 * the dirty/focus flags the surrounding application watches.
 *
 * ## Command-Based Editing
 * - The tree is never mutated directly; every change is a [`Cmd`]
 * - Commands address the tree with [`DocPos`](crate::models::DocPos) values
 *   that are only valid for the version they were computed from
 * - Applying a content-changing command bumps the version, marks the document
 *   dirty and leaves a caret right after the inserted text
 *
 * ## The `Editor` Seam
 *
 * Search/replace and proofreading only need read access to the tree and the
 * three commands (set selection, insert at selection, replace range). They go
 * through the [`Editor`] trait so any host surface can stand in for
 * [`Document`].
 *
 * ```rust
 * use quill_engine::editing::{Cmd, Document, Editor};
 * use quill_engine::models::{Doc, DocPos};
 *
 * let mut doc = Document::new(Doc::from_paragraphs(["Teh cat"]));
 * let patch = doc
 *     .apply(Cmd::replace(DocPos::new(1), DocPos::new(4), "The"))
 *     .unwrap();
 * assert_eq!(patch.new_selection, DocPos::new(4)..DocPos::new(4));
 * assert_eq!(doc.doc().plain_text(), "The cat");
 * ```
 */

pub mod commands;
pub mod document;
pub mod patch;

pub use commands::Cmd;
pub use document::Document;
pub use patch::Patch;

use crate::models::{Doc, DocPos};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EditError {
    #[error("position {0} is not inside inline content")]
    InvalidPosition(DocPos),
    #[error("range {from}..{to} is reversed")]
    InvalidRange { from: DocPos, to: DocPos },
    #[error("range {from}..{to} spans more than one block")]
    SpansBlocks { from: DocPos, to: DocPos },
}

/// Host editing surface: read access to the tree plus the command interface
pub trait Editor {
    fn doc(&self) -> &Doc;

    fn apply(&mut self, cmd: Cmd) -> Result<Patch, EditError>;

    /// Bumped by every content change; selection changes keep it
    fn version(&self) -> u64;

    /// Give keyboard focus back to the editing surface
    fn focus(&mut self);
}
