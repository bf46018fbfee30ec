use serde::{Deserialize, Serialize};

use crate::models::position::DocPos;

/// Inline formatting attached to a text run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum Mark {
    Bold,
    Italic,
    Underline,
    Strike,
    Code,
    TextStyle {
        #[serde(default)]
        attrs: TextStyleAttrs,
    },
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextStyleAttrs {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub font_family: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeadingAttrs {
    pub level: u8,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderedListAttrs {
    #[serde(default = "default_list_start")]
    pub start: u32,
}

impl Default for OrderedListAttrs {
    fn default() -> Self {
        Self { start: 1 }
    }
}

fn default_list_start() -> u32 {
    1
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CodeBlockAttrs {
    #[serde(default)]
    pub language: Option<String>,
}

/// A node of the rich-text tree, in the ProseMirror JSON shape.
///
/// Textblocks (`Paragraph`, `Heading`, `CodeBlock`) hold inline nodes,
/// containers (`Blockquote`, lists, `ListItem`) hold blocks, and
/// `HorizontalRule`/`HardBreak` are leaves.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum Node {
    Text {
        text: String,
        #[serde(default, skip_serializing_if = "Vec::is_empty")]
        marks: Vec<Mark>,
    },
    HardBreak,
    Paragraph {
        #[serde(default, skip_serializing_if = "Vec::is_empty")]
        content: Vec<Node>,
    },
    Heading {
        attrs: HeadingAttrs,
        #[serde(default, skip_serializing_if = "Vec::is_empty")]
        content: Vec<Node>,
    },
    CodeBlock {
        #[serde(default)]
        attrs: CodeBlockAttrs,
        #[serde(default, skip_serializing_if = "Vec::is_empty")]
        content: Vec<Node>,
    },
    Blockquote {
        #[serde(default)]
        content: Vec<Node>,
    },
    BulletList {
        #[serde(default)]
        content: Vec<Node>,
    },
    OrderedList {
        #[serde(default)]
        attrs: OrderedListAttrs,
        #[serde(default)]
        content: Vec<Node>,
    },
    ListItem {
        #[serde(default)]
        content: Vec<Node>,
    },
    HorizontalRule,
}

impl Node {
    pub fn text(text: impl Into<String>) -> Self {
        Node::Text {
            text: text.into(),
            marks: Vec::new(),
        }
    }

    pub fn marked_text(text: impl Into<String>, marks: Vec<Mark>) -> Self {
        Node::Text {
            text: text.into(),
            marks,
        }
    }

    /// Paragraph holding a single unmarked run (or nothing for empty text)
    pub fn paragraph(text: &str) -> Self {
        let content = if text.is_empty() {
            Vec::new()
        } else {
            vec![Node::text(text)]
        };
        Node::Paragraph { content }
    }

    pub fn heading(level: u8, text: &str) -> Self {
        Node::Heading {
            attrs: HeadingAttrs { level },
            content: vec![Node::text(text)],
        }
    }

    pub fn is_inline(&self) -> bool {
        matches!(self, Node::Text { .. } | Node::HardBreak)
    }

    pub fn is_block(&self) -> bool {
        !self.is_inline()
    }

    /// Blocks whose children are inline content
    pub fn is_textblock(&self) -> bool {
        matches!(
            self,
            Node::Paragraph { .. } | Node::Heading { .. } | Node::CodeBlock { .. }
        )
    }

    pub fn children(&self) -> Option<&[Node]> {
        match self {
            Node::Paragraph { content }
            | Node::Heading { content, .. }
            | Node::CodeBlock { content, .. }
            | Node::Blockquote { content }
            | Node::BulletList { content }
            | Node::OrderedList { content, .. }
            | Node::ListItem { content } => Some(content),
            Node::Text { .. } | Node::HardBreak | Node::HorizontalRule => None,
        }
    }

    pub fn children_mut(&mut self) -> Option<&mut Vec<Node>> {
        match self {
            Node::Paragraph { content }
            | Node::Heading { content, .. }
            | Node::CodeBlock { content, .. }
            | Node::Blockquote { content }
            | Node::BulletList { content }
            | Node::OrderedList { content, .. }
            | Node::ListItem { content } => Some(content),
            Node::Text { .. } | Node::HardBreak | Node::HorizontalRule => None,
        }
    }

    /// Number of position tokens this node occupies.
    ///
    /// Text counts its chars, leaves count one, and other blocks add an
    /// opening and closing token around their content.
    pub fn node_size(&self) -> usize {
        match self {
            Node::Text { text, .. } => text.chars().count(),
            Node::HardBreak | Node::HorizontalRule => 1,
            _ => 2 + content_size(self.children().unwrap_or_default()),
        }
    }
}

pub(crate) fn content_size(nodes: &[Node]) -> usize {
    nodes.iter().map(Node::node_size).sum()
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
enum DocTag {
    #[default]
    Doc,
}

/// Root of a chapter's rich-text tree
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Doc {
    #[serde(rename = "type", default)]
    tag: DocTag,
    #[serde(default)]
    pub content: Vec<Node>,
}

impl Doc {
    pub fn new(content: Vec<Node>) -> Self {
        Self {
            tag: DocTag::Doc,
            content,
        }
    }

    /// One paragraph per entry, each a single unmarked run
    pub fn from_paragraphs<'a>(paragraphs: impl IntoIterator<Item = &'a str>) -> Self {
        Self::new(paragraphs.into_iter().map(Node::paragraph).collect())
    }

    pub fn content_size(&self) -> usize {
        content_size(&self.content)
    }

    /// Largest valid position in the document
    pub fn end(&self) -> DocPos {
        DocPos::new(self.content_size())
    }

    /// Text projection joining blocks with `separator`.
    ///
    /// Every block entered after the first one emits the separator, hard
    /// breaks become `\n`.
    pub fn text_with_separator(&self, separator: &str) -> String {
        fn walk(nodes: &[Node], separator: &str, seen_block: &mut bool, out: &mut String) {
            for node in nodes {
                match node {
                    Node::Text { text, .. } => out.push_str(text),
                    Node::HardBreak => out.push('\n'),
                    block => {
                        if *seen_block {
                            out.push_str(separator);
                        }
                        *seen_block = true;
                        if let Some(children) = block.children() {
                            walk(children, separator, seen_block, out);
                        }
                    }
                }
            }
        }

        let mut out = String::new();
        let mut seen_block = false;
        walk(&self.content, separator, &mut seen_block, &mut out);
        out
    }

    /// Plain-text export with a blank line between blocks
    pub fn plain_text(&self) -> String {
        self.text_with_separator("\n\n")
    }
}
