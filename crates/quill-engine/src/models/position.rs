use std::fmt;

use serde::{Deserialize, Serialize};

use crate::models::doc::{Doc, Node};

/// Address of a gap in the document tree.
///
/// Positions count opening/closing block tokens and inline chars, so they
/// are only meaningful for the document version they were computed from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
pub struct DocPos(usize);

impl DocPos {
    pub const fn new(pos: usize) -> Self {
        Self(pos)
    }

    pub const fn get(self) -> usize {
        self.0
    }

    /// Position `n` tokens further along
    pub const fn forward(self, n: usize) -> Self {
        Self(self.0 + n)
    }
}

impl fmt::Display for DocPos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A position resolved to a textblock and an offset inside its inline content
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedPos {
    /// Child indices from the document root down to the textblock
    pub block_path: Vec<usize>,
    /// Offset within the textblock's inline content (chars and hard breaks)
    pub inline_offset: usize,
    /// Position of the first inline token of the textblock
    pub content_start: DocPos,
}

impl Doc {
    /// Resolve `pos` to a textblock, or `None` when it is not inside inline content
    pub fn resolve(&self, pos: DocPos) -> Option<ResolvedPos> {
        let pos = pos.get();
        let mut nodes: &[Node] = &self.content;
        let mut start = 0;
        let mut block_path = Vec::new();

        'descend: loop {
            let mut offset = start;
            for (index, node) in nodes.iter().enumerate() {
                let end = offset + node.node_size();
                if node.is_textblock() {
                    if pos > offset && pos < end {
                        block_path.push(index);
                        return Some(ResolvedPos {
                            block_path,
                            inline_offset: pos - offset - 1,
                            content_start: DocPos::new(offset + 1),
                        });
                    }
                } else if let Some(children) = node.children()
                    && pos > offset
                    && pos < end
                {
                    block_path.push(index);
                    nodes = children;
                    start = offset + 1;
                    continue 'descend;
                }
                offset = end;
            }
            return None;
        }
    }

    /// Textblock at `path`, as produced by [`Doc::resolve`]
    pub fn block_at(&self, path: &[usize]) -> Option<&Node> {
        let (first, rest) = path.split_first()?;
        let mut node = self.content.get(*first)?;
        for index in rest {
            node = node.children()?.get(*index)?;
        }
        Some(node)
    }

    pub(crate) fn inline_content_mut(&mut self, path: &[usize]) -> Option<&mut Vec<Node>> {
        let (first, rest) = path.split_first()?;
        let mut node = self.content.get_mut(*first)?;
        for index in rest {
            node = node.children_mut()?.get_mut(*index)?;
        }
        if node.is_textblock() {
            node.children_mut()
        } else {
            None
        }
    }
}
