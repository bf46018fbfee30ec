//! Flat-text offsets ↔ document positions.
//!
//! Search and proofreading both work on a plain-text projection of the
//! chapter (blocks joined by `\n`), while edits must address the rich-text
//! tree. This module bridges the two:
//!
//! - [`extract`] builds the flat text and a [`PositionMap`] from a fresh walk
//!   of the document,
//! - [`find_pattern`] and [`resolve_offset`] turn flat spans into [`Match`]es,
//! - [`highlight`], [`replace_match`] and [`replace_all`] issue the edit
//!   commands for them.
//!
//! A map is never patched after an edit; callers extract again.

pub mod extract;
pub mod locate;
pub mod replace;

pub use extract::{BLOCK_SEPARATOR, Extraction, PositionMap, extract};
pub use locate::{Match, Unresolvable, find_pattern, resolve_offset};
pub use replace::{BulkReplace, highlight, replace_all, replace_match};
