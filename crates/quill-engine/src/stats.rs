use crate::models::Doc;

/// Words read per minute for the reading-time estimate
pub const WORDS_PER_MINUTE: usize = 200;

/// Counters shown in the editor's status bar
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TextStats {
    pub words: usize,
    /// Non-whitespace characters
    pub chars: usize,
}

impl TextStats {
    pub fn of(doc: &Doc) -> Self {
        Self::of_text(&doc.text_with_separator(" "))
    }

    pub fn of_text(text: &str) -> Self {
        Self {
            words: text.split_whitespace().count(),
            chars: text.chars().filter(|c| !c.is_whitespace()).count(),
        }
    }

    /// Estimated minutes, never less than one
    pub fn reading_minutes(&self) -> usize {
        self.words.div_ceil(WORDS_PER_MINUTE).max(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Node;
    use rstest::rstest;

    #[test]
    fn counts_words_across_blocks() {
        let doc = Doc::new(vec![
            Node::heading(1, "Partida"),
            Node::paragraph("Las luces de la Tierra"),
            Node::Paragraph {
                content: vec![Node::text("se"), Node::HardBreak, Node::text("desvanecían")],
            },
        ]);

        let stats = TextStats::of(&doc);
        assert_eq!(stats.words, 8);
        assert_eq!(stats.chars, "PartidaLaslucesdelaTierrasedesvanecían".chars().count());
    }

    #[test]
    fn empty_document_has_zero_counts() {
        let stats = TextStats::of(&Doc::default());
        assert_eq!(stats, TextStats::default());
        assert_eq!(stats.reading_minutes(), 1);
    }

    #[rstest]
    #[case(0, 1)]
    #[case(1, 1)]
    #[case(200, 1)]
    #[case(201, 2)]
    #[case(1000, 5)]
    fn reading_minutes_round_up(#[case] words: usize, #[case] minutes: usize) {
        let stats = TextStats { words, chars: 0 };
        assert_eq!(stats.reading_minutes(), minutes);
    }
}
