//! Find and replace over the flat text of the open chapter.

use std::fmt;

use crate::editing::Editor;
use crate::reconcile::{BulkReplace, Match, extract, find_pattern, highlight, replace_match};

/// What the search bar shows next to the term
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchStatus {
    Idle,
    NoResults,
    /// 1-based index of the current match
    At { index: usize, total: usize },
}

impl fmt::Display for SearchStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SearchStatus::Idle => Ok(()),
            SearchStatus::NoResults => f.write_str("No results"),
            SearchStatus::At { index, total } => write!(f, "{index} / {total}"),
        }
    }
}

/// Search bar state: term, replacement, options and the live match list.
///
/// Matches are only valid against the document version they were found in.
/// Edits made elsewhere (a proofreading fix, typing) are picked up by
/// comparing [`Editor::version`] before the matches are used again.
#[derive(Debug, Clone, Default)]
pub struct SearchSession {
    term: String,
    replacement: String,
    case_sensitive: bool,
    matches: Vec<Match>,
    current: usize,
    /// Version of the document `matches` were computed from
    searched_version: Option<u64>,
}

impl SearchSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn term(&self) -> &str {
        &self.term
    }

    pub fn replacement(&self) -> &str {
        &self.replacement
    }

    pub fn is_case_sensitive(&self) -> bool {
        self.case_sensitive
    }

    pub fn matches(&self) -> &[Match] {
        &self.matches
    }

    pub fn current(&self) -> Option<&Match> {
        self.matches.get(self.current)
    }

    pub fn set_term(&mut self, term: impl Into<String>) {
        self.term = term.into();
    }

    pub fn set_replacement(&mut self, replacement: impl Into<String>) {
        self.replacement = replacement.into();
    }

    pub fn status(&self) -> SearchStatus {
        if self.term.is_empty() {
            SearchStatus::Idle
        } else if self.matches.is_empty() {
            SearchStatus::NoResults
        } else {
            SearchStatus::At {
                index: self.current + 1,
                total: self.matches.len(),
            }
        }
    }

    /// Find every occurrence of the term and highlight the first one
    pub fn search<E: Editor + ?Sized>(&mut self, editor: &mut E) {
        self.refresh(editor);
        self.current = 0;
        self.highlight_current(editor);
    }

    /// Flip case sensitivity and search again
    pub fn toggle_case<E: Editor + ?Sized>(&mut self, editor: &mut E) {
        self.case_sensitive = !self.case_sensitive;
        self.search(editor);
    }

    /// Move to the next match, wrapping to the first
    pub fn next<E: Editor + ?Sized>(&mut self, editor: &mut E) {
        self.sync(editor);
        if self.matches.is_empty() {
            self.search(editor);
            return;
        }
        self.current = (self.current + 1) % self.matches.len();
        self.highlight_current(editor);
    }

    /// Move to the previous match, wrapping to the last
    pub fn prev<E: Editor + ?Sized>(&mut self, editor: &mut E) {
        self.sync(editor);
        if self.matches.is_empty() {
            self.search(editor);
            return;
        }
        self.current = self
            .current
            .checked_sub(1)
            .unwrap_or(self.matches.len() - 1);
        self.highlight_current(editor);
    }

    /// Replace the current match, then search again from the first match
    pub fn replace_current<E: Editor + ?Sized>(&mut self, editor: &mut E) {
        self.sync(editor);
        let Some(target) = self.current().copied() else {
            return;
        };
        if let Err(err) = replace_match(editor, &target, &self.replacement) {
            log::debug!("Replace at flat offset {} failed: {err}", target.flat_offset);
            return;
        }
        self.search(editor);
    }

    /// Replace every match, then search again
    pub fn replace_all<E: Editor + ?Sized>(&mut self, editor: &mut E) -> BulkReplace {
        self.refresh(editor);
        let report = crate::reconcile::replace_all(editor, &self.matches, &self.replacement);
        log::debug!(
            "Replaced {} occurrences of {:?} ({} skipped)",
            report.replaced,
            self.term,
            report.skipped
        );
        self.search(editor);
        report
    }

    /// Forget matches; the term and options stay for the next open
    pub fn clear(&mut self) {
        self.matches.clear();
        self.current = 0;
        self.searched_version = None;
    }

    /// Recompute matches if the document changed since they were found
    fn sync<E: Editor + ?Sized>(&mut self, editor: &E) {
        if self.searched_version.is_some_and(|v| v != editor.version()) {
            log::debug!("Document changed since last search, refreshing matches");
            self.refresh(editor);
        }
    }

    fn refresh<E: Editor + ?Sized>(&mut self, editor: &E) {
        let extraction = extract(editor.doc());
        self.matches = find_pattern(&extraction, &self.term, self.case_sensitive);
        self.searched_version = Some(editor.version());
        if self.current >= self.matches.len() {
            self.current = 0;
        }
    }

    fn highlight_current<E: Editor + ?Sized>(&self, editor: &mut E) {
        if let Some(m) = self.current()
            && let Err(err) = highlight(editor, m)
        {
            log::debug!("Could not highlight match: {err}");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::editing::Cmd;
    use crate::models::DocPos;
    use crate::tests::document;
    use pretty_assertions::assert_eq;

    fn p(n: usize) -> DocPos {
        DocPos::new(n)
    }

    fn session(term: &str) -> SearchSession {
        let mut session = SearchSession::new();
        session.set_term(term);
        session
    }

    #[test]
    fn search_highlights_first_match() {
        let mut doc = document(&["Teh cat sat", "the cat"]);
        let mut search = session("cat");

        search.search(&mut doc);

        assert_eq!(search.status(), SearchStatus::At { index: 1, total: 2 });
        assert_eq!(doc.selection(), p(5)..p(8));
        assert!(doc.is_focused());
    }

    #[test]
    fn blank_term_clears_matches() {
        let mut doc = document(&["a b"]);
        let mut search = session("a");
        search.search(&mut doc);
        assert_eq!(search.matches().len(), 1);

        search.set_term("   ");
        search.search(&mut doc);

        assert!(search.matches().is_empty());
        assert_eq!(search.status(), SearchStatus::NoResults);

        search.set_term("");
        assert_eq!(search.status(), SearchStatus::Idle);
    }

    #[test]
    fn next_and_prev_wrap_around() {
        let mut doc = document(&["x-x-x"]);
        let mut search = session("x");
        search.search(&mut doc);

        search.next(&mut doc);
        search.next(&mut doc);
        assert_eq!(search.status(), SearchStatus::At { index: 3, total: 3 });
        assert_eq!(doc.selection(), p(5)..p(6));

        search.next(&mut doc);
        assert_eq!(search.status(), SearchStatus::At { index: 1, total: 3 });

        search.prev(&mut doc);
        assert_eq!(search.status(), SearchStatus::At { index: 3, total: 3 });
        assert_eq!(doc.selection(), p(5)..p(6));
    }

    #[test]
    fn next_without_matches_runs_search() {
        let mut doc = document(&["Elena Voss"]);
        let mut search = session("Voss");

        search.next(&mut doc);

        assert_eq!(search.status(), SearchStatus::At { index: 1, total: 1 });
        assert_eq!(doc.selection(), p(7)..p(11));
    }

    #[test]
    fn toggle_case_researches() {
        let mut doc = document(&["Luna luna LUNA"]);
        let mut search = session("luna");

        search.search(&mut doc);
        assert_eq!(search.matches().len(), 3);

        search.toggle_case(&mut doc);
        assert!(search.is_case_sensitive());
        assert_eq!(search.matches().len(), 1);
        assert_eq!(search.matches()[0].flat_offset, 5);
    }

    #[test]
    fn replace_current_researches_from_first_match() {
        let mut doc = document(&["cat, cat, cat"]);
        let mut search = session("cat");
        search.set_replacement("dog");
        search.search(&mut doc);
        search.next(&mut doc);

        search.replace_current(&mut doc);

        assert_eq!(doc.doc().plain_text(), "cat, dog, cat");
        assert_eq!(search.status(), SearchStatus::At { index: 1, total: 2 });
        assert_eq!(search.current().map(|m| m.flat_offset), Some(0));
        assert_eq!(doc.selection(), p(1)..p(4));
    }

    #[test]
    fn replacing_last_match_leaves_remaining_ones() {
        let mut doc = document(&["ab ab"]);
        let mut search = session("ab");
        search.set_replacement("c");
        search.search(&mut doc);
        search.prev(&mut doc);

        search.replace_current(&mut doc);

        assert_eq!(doc.doc().plain_text(), "ab c");
        assert_eq!(search.status(), SearchStatus::At { index: 1, total: 1 });
    }

    #[test]
    fn replace_current_after_outside_edit_targets_fresh_span() {
        let mut doc = document(&["Teh cat sat"]);
        let mut search = session("cat");
        search.set_replacement("dog");
        search.search(&mut doc);
        assert_eq!(search.current().map(|m| m.from), Some(p(5)));

        // a proofreading fix that grows the text ahead of the match
        doc.apply(Cmd::replace(p(1), p(4), "Thee")).unwrap();
        search.replace_current(&mut doc);

        assert_eq!(doc.doc().plain_text(), "Thee dog sat");
        assert_eq!(search.status(), SearchStatus::NoResults);
    }

    #[test]
    fn next_after_outside_edit_uses_current_matches() {
        let mut doc = document(&["a cat", "cat"]);
        let mut search = session("cat");
        search.search(&mut doc);

        doc.apply(Cmd::replace(p(1), p(2), "one")).unwrap();
        search.next(&mut doc);

        assert_eq!(search.status(), SearchStatus::At { index: 2, total: 2 });
        assert_eq!(doc.selection(), p(10)..p(13));
    }

    #[test]
    fn replace_all_reports_and_researches() {
        let mut doc = document(&["x-x-x", "x"]);
        let mut search = session("x");
        search.set_replacement("yy");
        search.search(&mut doc);

        let report = search.replace_all(&mut doc);

        assert_eq!(
            report,
            BulkReplace {
                replaced: 4,
                skipped: 0
            }
        );
        assert_eq!(doc.doc().text_with_separator("\n"), "yy-yy-yy\nyy");
        assert_eq!(search.status(), SearchStatus::NoResults);
    }

    #[test]
    fn replacement_containing_term_is_found_again() {
        let mut doc = document(&["a a"]);
        let mut search = session("a");
        search.set_replacement("aa");

        search.replace_all(&mut doc);

        assert_eq!(doc.doc().plain_text(), "aa aa");
        assert_eq!(search.matches().len(), 4);
    }

    #[test]
    fn status_display() {
        assert_eq!(SearchStatus::Idle.to_string(), "");
        assert_eq!(SearchStatus::NoResults.to_string(), "No results");
        assert_eq!(SearchStatus::At { index: 2, total: 7 }.to_string(), "2 / 7");
    }
}
