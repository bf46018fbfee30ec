use crate::models::{DocPos, Mark, Node};

/// Edit commands accepted by the editing surface
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Cmd {
    /// Select `[from, to)`; both ends must sit inside inline content
    SetSelection { from: DocPos, to: DocPos },
    /// Replace the current selection with `text`
    InsertContent { text: String },
    /// Replace `[from, to)` with `text`; both ends must be in the same textblock
    ReplaceRange {
        from: DocPos,
        to: DocPos,
        text: String,
    },
}

impl Cmd {
    pub fn set_selection(from: DocPos, to: DocPos) -> Self {
        Cmd::SetSelection { from, to }
    }

    pub fn insert(text: impl Into<String>) -> Self {
        Cmd::InsertContent { text: text.into() }
    }

    pub fn replace(from: DocPos, to: DocPos, text: impl Into<String>) -> Self {
        Cmd::ReplaceRange {
            from,
            to,
            text: text.into(),
        }
    }
}

/// Replace the inline units `[from, to)` of a textblock with a single run of `text`.
///
/// The new run takes the marks of the first replaced char, or of its
/// neighbour when the range is empty. Returns the number of inserted units.
pub(crate) fn splice_inline(content: &mut Vec<Node>, from: usize, to: usize, text: &str) -> usize {
    let marks = marks_for_insert(content, from, to);
    let (head, rest) = split_inline(std::mem::take(content), from);
    let (_, tail) = split_inline(rest, to - from);

    let inserted = text.chars().count();
    let mut spliced = head;
    if inserted > 0 {
        spliced.push(Node::marked_text(text, marks));
    }
    spliced.extend(tail);
    *content = normalize_inline(spliced);
    inserted
}

fn marks_for_insert(content: &[Node], from: usize, to: usize) -> Vec<Mark> {
    let candidates = if from < to {
        [Some(from), from.checked_sub(1)]
    } else {
        [from.checked_sub(1), Some(from)]
    };
    candidates
        .into_iter()
        .flatten()
        .find_map(|offset| text_marks_at(content, offset))
        .map(<[Mark]>::to_vec)
        .unwrap_or_default()
}

/// Marks of the char at inline `offset`, `None` for hard breaks or past the end
fn text_marks_at(content: &[Node], offset: usize) -> Option<&[Mark]> {
    let mut start = 0;
    for node in content {
        let size = node.node_size();
        if offset < start + size {
            return match node {
                Node::Text { marks, .. } => Some(marks),
                _ => None,
            };
        }
        start += size;
    }
    None
}

/// Split inline content at unit offset `at`, cutting a text run if needed
fn split_inline(content: Vec<Node>, at: usize) -> (Vec<Node>, Vec<Node>) {
    let mut head = Vec::new();
    let mut tail = Vec::new();
    let mut start = 0;

    for node in content {
        let size = node.node_size();
        if start + size <= at {
            head.push(node);
        } else if start >= at {
            tail.push(node);
        } else if let Node::Text { text, marks } = node {
            let cut = text
                .char_indices()
                .nth(at - start)
                .map_or(text.len(), |(byte, _)| byte);
            let (left, right) = text.split_at(cut);
            head.push(Node::marked_text(left, marks.clone()));
            tail.push(Node::marked_text(right, marks));
        } else {
            tail.push(node);
        }
        start += size;
    }

    (head, tail)
}

/// Drop empty runs and merge neighbouring runs that carry the same marks
fn normalize_inline(content: Vec<Node>) -> Vec<Node> {
    let mut out: Vec<Node> = Vec::with_capacity(content.len());
    for node in content {
        if let Node::Text { text, marks } = &node {
            if text.is_empty() {
                continue;
            }
            if let Some(Node::Text {
                text: prev_text,
                marks: prev_marks,
            }) = out.last_mut()
                && prev_marks == marks
            {
                prev_text.push_str(text);
                continue;
            }
        }
        out.push(node);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn runs() -> Vec<Node> {
        vec![
            Node::text("Las "),
            Node::marked_text("luces", vec![Mark::Italic]),
            Node::HardBreak,
            Node::text("fin"),
        ]
    }

    #[test]
    fn replace_inside_single_run() {
        let mut content = vec![Node::text("Teh cat")];
        let inserted = splice_inline(&mut content, 0, 3, "The");
        assert_eq!(inserted, 3);
        assert_eq!(content, vec![Node::text("The cat")]);
    }

    #[test]
    fn replacement_takes_marks_of_first_replaced_char() {
        let mut content = runs();
        splice_inline(&mut content, 4, 9, "sombras");
        assert_eq!(
            content,
            vec![
                Node::text("Las "),
                Node::marked_text("sombras", vec![Mark::Italic]),
                Node::HardBreak,
                Node::text("fin"),
            ]
        );
    }

    #[test]
    fn insertion_takes_marks_of_preceding_char() {
        let mut content = runs();
        splice_inline(&mut content, 9, 9, "!");
        assert_eq!(
            content[1],
            Node::marked_text("luces!", vec![Mark::Italic])
        );
    }

    #[test]
    fn insertion_at_start_takes_marks_of_following_char() {
        let mut content = vec![Node::marked_text("b", vec![Mark::Bold])];
        splice_inline(&mut content, 0, 0, "a");
        assert_eq!(content, vec![Node::marked_text("ab", vec![Mark::Bold])]);
    }

    #[test]
    fn replacement_across_runs_and_hard_break() {
        let mut content = runs();
        // "s luces<br>f" -> "-"
        splice_inline(&mut content, 2, 11, "-");
        assert_eq!(content, vec![Node::text("La-in")]);
    }

    #[test]
    fn empty_replacement_deletes() {
        let mut content = vec![Node::text("x-x")];
        let inserted = splice_inline(&mut content, 1, 2, "");
        assert_eq!(inserted, 0);
        assert_eq!(content, vec![Node::text("xx")]);
    }

    #[test]
    fn deleting_everything_leaves_empty_content() {
        let mut content = vec![Node::text("abc")];
        splice_inline(&mut content, 0, 3, "");
        assert!(content.is_empty());
    }

    #[test]
    fn multibyte_chars_are_split_on_char_boundaries() {
        let mut content = vec![Node::text("año ñu")];
        splice_inline(&mut content, 1, 2, "n");
        assert_eq!(content, vec![Node::text("ano ñu")]);
    }
}
