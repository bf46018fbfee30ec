use std::ops::Range;

use crate::editing::commands::splice_inline;
use crate::editing::{Cmd, EditError, Editor, Patch};
use crate::models::{Doc, DocPos};

/// In-memory editing surface for one chapter.
///
/// Owns the rich-text tree and applies [`Cmd`]s to it. `version` and the
/// dirty flag are the "document changed" signal for autosave: the
/// surrounding application saves when `is_dirty()` and calls
/// [`Document::mark_saved`] afterwards.
#[derive(Debug, Clone)]
pub struct Document {
    doc: Doc,
    selection: Range<DocPos>,
    version: u64,
    dirty: bool,
    focused: bool,
}

impl Document {
    /// Wrap a tree; the caret starts at the beginning of the first textblock
    pub fn new(doc: Doc) -> Self {
        let caret = first_inline_pos(&doc);
        Self {
            doc,
            selection: caret..caret,
            version: 0,
            dirty: false,
            focused: false,
        }
    }

    /// Parse a ProseMirror JSON document
    pub fn from_bytes(bytes: &[u8]) -> anyhow::Result<Self> {
        let doc: Doc = serde_json::from_slice(bytes)?;
        Ok(Self::new(doc))
    }

    pub fn to_json(&self) -> anyhow::Result<String> {
        Ok(serde_json::to_string_pretty(&self.doc)?)
    }

    pub fn selection(&self) -> Range<DocPos> {
        self.selection.clone()
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn mark_saved(&mut self) {
        self.dirty = false;
    }

    pub fn is_focused(&self) -> bool {
        self.focused
    }

    pub fn blur(&mut self) {
        self.focused = false;
    }

    pub fn into_doc(self) -> Doc {
        self.doc
    }

    fn replace_range(&mut self, from: DocPos, to: DocPos, text: &str) -> Result<Patch, EditError> {
        if from > to {
            return Err(EditError::InvalidRange { from, to });
        }
        let start = self
            .doc
            .resolve(from)
            .ok_or(EditError::InvalidPosition(from))?;
        let end = self.doc.resolve(to).ok_or(EditError::InvalidPosition(to))?;
        if start.block_path != end.block_path {
            return Err(EditError::SpansBlocks { from, to });
        }

        let content = self
            .doc
            .inline_content_mut(&start.block_path)
            .ok_or(EditError::InvalidPosition(from))?;
        let inserted = splice_inline(content, start.inline_offset, end.inline_offset, text);

        let caret = from.forward(inserted);
        self.selection = caret..caret;
        self.version += 1;
        self.dirty = true;

        Ok(Patch {
            changed: vec![from..caret],
            new_selection: caret..caret,
            version: self.version,
        })
    }
}

impl Editor for Document {
    fn doc(&self) -> &Doc {
        &self.doc
    }

    fn apply(&mut self, cmd: Cmd) -> Result<Patch, EditError> {
        match cmd {
            Cmd::SetSelection { from, to } => {
                if from > to {
                    return Err(EditError::InvalidRange { from, to });
                }
                for pos in [from, to] {
                    if self.doc.resolve(pos).is_none() {
                        return Err(EditError::InvalidPosition(pos));
                    }
                }
                self.selection = from..to;
                Ok(Patch {
                    changed: Vec::new(),
                    new_selection: from..to,
                    version: self.version,
                })
            }
            Cmd::InsertContent { text } => {
                let Range { start, end } = self.selection.clone();
                self.replace_range(start, end, &text)
            }
            Cmd::ReplaceRange { from, to, text } => self.replace_range(from, to, &text),
        }
    }

    fn version(&self) -> u64 {
        self.version
    }

    fn focus(&mut self) {
        self.focused = true;
    }
}

fn first_inline_pos(doc: &Doc) -> DocPos {
    (0..=doc.content_size())
        .map(DocPos::new)
        .find(|pos| doc.resolve(*pos).is_some())
        .unwrap_or_default()
}
