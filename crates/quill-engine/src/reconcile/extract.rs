use std::ops::Range;

use crate::models::{Doc, DocPos, Node};

/// Char emitted for block boundaries and hard breaks
pub const BLOCK_SEPARATOR: char = '\n';

/// Flat-text index to document position, `None` marking a block separator.
///
/// Always the same length as the flat text it was built with.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PositionMap(Vec<Option<DocPos>>);

impl PositionMap {
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Document position of the char at `flat`; `None` past the end or on a separator
    pub fn resolve(&self, flat: usize) -> Option<DocPos> {
        self.0.get(flat).copied().flatten()
    }

    pub fn is_sentinel(&self, flat: usize) -> bool {
        matches!(self.0.get(flat), Some(None))
    }

    pub fn iter(&self) -> impl Iterator<Item = Option<DocPos>> + '_ {
        self.0.iter().copied()
    }
}

/// Flat-text projection of a document together with its position map
#[derive(Debug, Clone, Default)]
pub struct Extraction {
    text: String,
    map: PositionMap,
    /// Byte offset of each char in `text`
    char_starts: Vec<usize>,
}

impl Extraction {
    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn map(&self) -> &PositionMap {
        &self.map
    }

    /// Length of the flat text in chars
    pub fn char_len(&self) -> usize {
        self.map.len()
    }

    /// Char index of the char starting at `byte`, or the char length at the end
    pub fn char_index(&self, byte: usize) -> usize {
        match self.char_starts.binary_search(&byte) {
            Ok(index) | Err(index) => index,
        }
    }

    /// Byte offset of char `index`, or the text length past the end
    pub fn byte_offset(&self, index: usize) -> usize {
        self.char_starts
            .get(index)
            .copied()
            .unwrap_or(self.text.len())
    }

    /// Substring for a flat char range, clamped to the text
    pub fn slice(&self, range: Range<usize>) -> &str {
        let start = self.byte_offset(range.start);
        let end = self.byte_offset(range.end).max(start);
        &self.text[start..end]
    }

    fn push(&mut self, ch: char, pos: Option<DocPos>) {
        self.char_starts.push(self.text.len());
        self.text.push(ch);
        self.map.0.push(pos);
    }
}

/// Walk `doc` depth-first and build its flat text and position map.
///
/// Every char of a text node maps to the position just before it, hard
/// breaks map to their own position, and each block entered after the
/// first one contributes a separator with a sentinel entry.
pub fn extract(doc: &Doc) -> Extraction {
    let mut out = Extraction::default();
    let mut seen_block = false;
    walk(&doc.content, 0, &mut seen_block, &mut out);
    out
}

fn walk(nodes: &[Node], mut pos: usize, seen_block: &mut bool, out: &mut Extraction) {
    for node in nodes {
        match node {
            Node::Text { text, .. } => {
                for (i, ch) in text.chars().enumerate() {
                    out.push(ch, Some(DocPos::new(pos + i)));
                }
            }
            Node::HardBreak => out.push(BLOCK_SEPARATOR, Some(DocPos::new(pos))),
            block => {
                if *seen_block {
                    out.push(BLOCK_SEPARATOR, None);
                }
                *seen_block = true;
                if let Some(children) = block.children() {
                    walk(children, pos + 1, seen_block, out);
                }
            }
        }
        pos += node.node_size();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Mark;
    use pretty_assertions::assert_eq;

    fn positions(ex: &Extraction) -> Vec<Option<usize>> {
        ex.map().iter().map(|p| p.map(DocPos::get)).collect()
    }

    #[test]
    fn single_paragraph_maps_each_char() {
        let ex = extract(&Doc::from_paragraphs(["Teh cat"]));
        assert_eq!(ex.text(), "Teh cat");
        assert_eq!(
            positions(&ex),
            (1..=7).map(Some).collect::<Vec<_>>()
        );
    }

    #[test]
    fn paragraphs_are_separated_by_sentinels() {
        let ex = extract(&Doc::from_paragraphs(["ab", "c"]));
        assert_eq!(ex.text(), "ab\nc");
        assert_eq!(positions(&ex), vec![Some(1), Some(2), None, Some(5)]);
    }

    #[test]
    fn marks_do_not_break_the_projection() {
        let doc = Doc::new(vec![Node::Paragraph {
            content: vec![
                Node::text("la "),
                Node::marked_text("gran", vec![Mark::Bold]),
                Node::text(" nave"),
            ],
        }]);
        let ex = extract(&doc);
        assert_eq!(ex.text(), "la gran nave");
        assert_eq!(ex.map().resolve(3), Some(DocPos::new(4)));
        assert_eq!(ex.map().resolve(7), Some(DocPos::new(8)));
    }

    #[test]
    fn nested_blocks_and_leaves() {
        // 0 <p> 1 a 2 </p> 3 <ul> 4 <li> 5 <p> 6 b 7 </p> 8 </li> 9 </ul> 10 <hr> 11 <p> 12 c<br>d
        let doc = Doc::new(vec![
            Node::paragraph("a"),
            Node::BulletList {
                content: vec![Node::ListItem {
                    content: vec![Node::paragraph("b")],
                }],
            },
            Node::HorizontalRule,
            Node::Paragraph {
                content: vec![Node::text("c"), Node::HardBreak, Node::text("d")],
            },
        ]);

        let ex = extract(&doc);
        assert_eq!(ex.text(), "a\n\n\nb\n\nc\nd");
        assert_eq!(
            positions(&ex),
            vec![
                Some(1),
                None,
                None,
                None,
                Some(6),
                None,
                None,
                Some(12),
                Some(13),
                Some(14),
            ]
        );
        assert!(ex.map().is_sentinel(1));
        assert!(!ex.map().is_sentinel(8));
    }

    #[test]
    fn leading_empty_paragraph_counts_as_first_block() {
        let ex = extract(&Doc::from_paragraphs(["", "x"]));
        assert_eq!(ex.text(), "\nx");
        assert_eq!(positions(&ex), vec![None, Some(3)]);
    }

    #[test]
    fn empty_document_extracts_nothing() {
        let ex = extract(&Doc::default());
        assert_eq!(ex.text(), "");
        assert!(ex.map().is_empty());
        assert_eq!(ex.map().resolve(0), None);
    }

    #[test]
    fn extraction_matches_newline_joined_text() {
        let doc = Doc::new(vec![
            Node::heading(1, "Despertar"),
            Node::Blockquote {
                content: vec![Node::paragraph("—Sistema, ¿cuánto tiempo?")],
            },
        ]);
        assert_eq!(extract(&doc).text(), doc.text_with_separator("\n"));
    }

    #[test]
    fn byte_and_char_offsets_agree_on_multibyte_text() {
        let ex = extract(&Doc::from_paragraphs(["año ñu"]));
        assert_eq!(ex.char_len(), 6);
        assert_eq!(ex.byte_offset(2), 3);
        assert_eq!(ex.char_index(3), 2);
        assert_eq!(ex.char_index(ex.text().len()), 6);
        assert_eq!(ex.slice(1..3), "ño");
        assert_eq!(ex.slice(4..99), "ñu");
    }
}
