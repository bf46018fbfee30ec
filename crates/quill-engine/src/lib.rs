pub mod editing;
pub mod io;
pub mod language;
pub mod models;
pub mod proofread;
pub mod reconcile;
pub mod search;
pub mod stats;
pub mod symbols;

#[cfg(test)]
pub mod tests;

// Re-export key types for easier usage
pub use editing::{Cmd, Document, EditError, Editor, Patch};
pub use io::*;
pub use language::{DEFAULT_LANGUAGE, LANGUAGES, Language};
pub use models::{Chapter, ChapterFile, Doc, DocPos, Node};
pub use proofread::{ExternalFinding, FixOutcome, ProofreadSession};
pub use reconcile::{Extraction, Match, extract, find_pattern, resolve_offset};
pub use search::{SearchSession, SearchStatus};
pub use stats::TextStats;
pub use symbols::{SYMBOLS, SymbolGroup, SymbolPicker};
