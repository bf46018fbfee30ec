use anyhow::{Context, Result};
use crossterm::event::{KeyCode, KeyEvent};
use quill_engine::editing::{Cmd, Document, Editor};
use quill_engine::io;
use quill_engine::language::Language;
use quill_engine::models::{Chapter, Doc};
use quill_engine::proofread::{FixOutcome, ProofreadSession, TextAnalyzer};
use quill_engine::reconcile::{BulkReplace, extract};
use quill_engine::search::SearchSession;
use quill_engine::stats::TextStats;
use quill_engine::symbols::SymbolPicker;
use ratatui::widgets::ListState;
use std::fs;
use std::path::{Path, PathBuf};

/// Directory under the manuscript that exports go to
pub const EXPORT_DIR: &str = "exports";

/// Which text field keystrokes go to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Normal,
    SearchTerm,
    Replacement,
    /// Picking a special character to insert at the caret
    Symbols,
}

pub struct App {
    manuscript_path: PathBuf,
    pub chapters: Vec<Chapter>,
    pub chapter_list: ListState,
    /// Editing surface for the selected chapter
    pub document: Option<Document>,
    pub search: SearchSession,
    pub search_open: bool,
    pub mode: Mode,
    pub proofread: ProofreadSession,
    pub finding_list: ListState,
    pub symbols: SymbolPicker,
    pub language: &'static Language,
    analyzer: Box<dyn TextAnalyzer>,
    /// One-line feedback for the last action
    pub message: Option<String>,
}

impl App {
    pub fn new(
        manuscript_path: PathBuf,
        language: &'static Language,
        analyzer: Box<dyn TextAnalyzer>,
    ) -> Result<Self> {
        let chapters = io::load_manuscript(&manuscript_path)?;
        log::info!(
            "Loaded {} chapters from {}",
            chapters.len(),
            manuscript_path.display()
        );

        let mut app = Self {
            manuscript_path,
            chapters,
            chapter_list: ListState::default(),
            document: None,
            search: SearchSession::new(),
            search_open: false,
            mode: Mode::Normal,
            proofread: ProofreadSession::new(),
            finding_list: ListState::default(),
            symbols: SymbolPicker::new(),
            language,
            analyzer,
            message: None,
        };

        // Select first chapter if available
        if !app.chapters.is_empty() {
            app.select_chapter(0);
        }

        Ok(app)
    }

    pub fn stats(&self) -> Option<TextStats> {
        self.document.as_ref().map(|doc| TextStats::of(doc.doc()))
    }

    /// Route a key press; returns `false` when the app should quit
    pub fn handle_key(&mut self, key: KeyEvent) -> bool {
        match self.mode {
            Mode::Normal => return self.handle_normal_key(key.code),
            Mode::SearchTerm | Mode::Replacement => self.handle_input_key(key.code),
            Mode::Symbols => self.handle_symbol_key(key.code),
        }
        true
    }

    fn handle_normal_key(&mut self, code: KeyCode) -> bool {
        match code {
            KeyCode::Char('q') => {
                self.save_if_dirty();
                return false;
            }
            KeyCode::Down | KeyCode::Char('j') => self.next_chapter(),
            KeyCode::Up | KeyCode::Char('k') => self.previous_chapter(),
            KeyCode::Char('/') => self.open_search(Mode::SearchTerm),
            KeyCode::Esc => self.close_search(),
            KeyCode::Char('n') => self.with_document(|app, doc| app.search.next(doc)),
            KeyCode::Char('N') => self.with_document(|app, doc| app.search.prev(doc)),
            KeyCode::Char('r') => self.replace_current(),
            KeyCode::Char('R') => self.replace_all(),
            KeyCode::Char('c') => self.with_document(|app, doc| app.search.toggle_case(doc)),
            KeyCode::Char('l') => self.cycle_language(),
            KeyCode::Char('g') => self.run_check(),
            KeyCode::Char('J') => self.next_finding(),
            KeyCode::Char('K') => self.previous_finding(),
            KeyCode::Char(digit @ '1'..='9') => {
                let choice = digit as usize - '1' as usize;
                self.apply_suggestion(choice);
            }
            KeyCode::Char('i') => self.ignore_finding(),
            KeyCode::Char('x') => self.close_findings(),
            KeyCode::Char('s') => {
                let saved = self.save();
                self.report(saved);
            }
            KeyCode::Char('S') if self.document.is_some() => self.mode = Mode::Symbols,
            KeyCode::Char('e') => {
                let exported = self.export_plain_text();
                self.report(exported.map(|path| format!("Exported to {}", path.display())));
            }
            KeyCode::Char('E') => {
                let exported = self.export_html();
                self.report(exported.map(|path| format!("Exported to {}", path.display())));
            }
            _ => {}
        }
        true
    }

    fn handle_input_key(&mut self, code: KeyCode) {
        let mut field = match self.mode {
            Mode::Replacement => self.search.replacement().to_string(),
            _ => self.search.term().to_string(),
        };

        match code {
            KeyCode::Char(ch) => field.push(ch),
            KeyCode::Backspace => {
                field.pop();
            }
            KeyCode::Tab => {
                self.mode = match self.mode {
                    Mode::SearchTerm => Mode::Replacement,
                    _ => Mode::SearchTerm,
                };
                return;
            }
            KeyCode::Enter => {
                self.mode = Mode::Normal;
                self.with_document(|app, doc| app.search.search(doc));
                return;
            }
            KeyCode::Esc => {
                self.mode = Mode::Normal;
                return;
            }
            _ => return,
        }

        match self.mode {
            Mode::Replacement => self.search.set_replacement(field),
            _ => self.search.set_term(field),
        }
    }

    fn handle_symbol_key(&mut self, code: KeyCode) {
        match code {
            KeyCode::Left | KeyCode::Char('h') => self.symbols.prev_item(),
            KeyCode::Right | KeyCode::Char('l') => self.symbols.next_item(),
            KeyCode::Up | KeyCode::Char('k') => self.symbols.prev_group(),
            KeyCode::Down | KeyCode::Char('j') => self.symbols.next_group(),
            KeyCode::Enter => {
                self.mode = Mode::Normal;
                self.insert_symbol();
            }
            KeyCode::Esc => self.mode = Mode::Normal,
            _ => {}
        }
    }

    /// Insert the picked symbol over the selection and hand focus back
    fn insert_symbol(&mut self) {
        let symbol = self.symbols.selected();
        let mut inserted = None;
        self.with_document(|_, doc| {
            inserted = Some(doc.apply(Cmd::insert(symbol)));
            doc.focus();
        });
        if let Some(Err(err)) = inserted {
            log::warn!("Could not insert {symbol}: {err}");
            self.message = Some(format!("Could not insert {symbol}: {err}"));
        }
    }

    fn with_document(&mut self, f: impl FnOnce(&mut Self, &mut Document)) {
        // Moved out so the sessions and the document can be borrowed together
        if let Some(mut doc) = self.document.take() {
            f(self, &mut doc);
            self.document = Some(doc);
        }
    }

    fn report(&mut self, result: Result<String>) {
        self.message = Some(match result {
            Ok(message) => message,
            Err(err) => {
                log::error!("{err:#}");
                format!("Error: {err:#}")
            }
        });
    }

    pub fn next_chapter(&mut self) {
        if self.chapters.is_empty() {
            return;
        }
        let i = match self.chapter_list.selected() {
            Some(i) => (i + 1) % self.chapters.len(),
            None => 0,
        };
        self.select_chapter(i);
    }

    pub fn previous_chapter(&mut self) {
        if self.chapters.is_empty() {
            return;
        }
        let i = match self.chapter_list.selected() {
            Some(0) | None => self.chapters.len() - 1,
            Some(i) => i - 1,
        };
        self.select_chapter(i);
    }

    fn select_chapter(&mut self, index: usize) {
        self.save_if_dirty();
        let Some(chapter) = self.chapters.get(index) else {
            return;
        };
        self.chapter_list.select(Some(index));
        self.document = Some(Document::new(chapter.file().content.clone()));
        self.search.clear();
        self.proofread.close_panel();
        self.finding_list.select(None);
    }

    fn open_search(&mut self, mode: Mode) {
        self.search_open = true;
        self.mode = mode;
    }

    fn close_search(&mut self) {
        self.search_open = false;
        self.mode = Mode::Normal;
        self.search.clear();
        if let Some(doc) = self.document.as_mut() {
            doc.focus();
        }
    }

    fn replace_current(&mut self) {
        self.with_document(|app, doc| app.search.replace_current(doc));
    }

    fn replace_all(&mut self) {
        let mut summary = None;
        self.with_document(|app, doc| {
            let report = app.search.replace_all(doc);
            summary = Some(replace_summary(report));
        });
        if let Some(summary) = summary {
            self.message = Some(summary);
        }
    }

    fn cycle_language(&mut self) {
        self.language = Language::cycle(self.language.code);
        self.message = Some(format!("Language: {}", self.language.label));
    }

    pub fn run_check(&mut self) {
        let Some(doc) = self.document.as_ref() else {
            return;
        };
        let text = extract(doc.doc()).text().to_string();
        if text.trim().is_empty() {
            self.message = Some("Nothing to check".to_string());
            return;
        }

        self.proofread
            .check(self.analyzer.as_ref(), &text, self.language.code);
        let first = (!self.proofread.findings().is_empty()).then_some(0);
        self.finding_list.select(first);
        self.message = match self.proofread.error_message() {
            Some(error) => Some(error.to_string()),
            None if self.proofread.findings().is_empty() => Some("No issues found".to_string()),
            None => None,
        };
    }

    fn next_finding(&mut self) {
        let count = self.proofread.findings().len();
        if count == 0 {
            return;
        }
        let i = self.finding_list.selected().map_or(0, |i| (i + 1) % count);
        self.finding_list.select(Some(i));
    }

    fn previous_finding(&mut self) {
        let count = self.proofread.findings().len();
        if count == 0 {
            return;
        }
        let i = match self.finding_list.selected() {
            Some(0) | None => count - 1,
            Some(i) => i - 1,
        };
        self.finding_list.select(Some(i));
    }

    /// Apply suggestion `choice` of the selected finding
    pub fn apply_suggestion(&mut self, choice: usize) {
        let Some(index) = self.finding_list.selected() else {
            return;
        };
        let Some(replacement) = self
            .proofread
            .findings()
            .get(index)
            .and_then(|finding| finding.replacements.get(choice))
            .cloned()
        else {
            return;
        };

        let mut outcome = FixOutcome::Skipped;
        self.with_document(|app, doc| {
            outcome = app.proofread.apply_fix(doc, index, &replacement);
        });
        if outcome == FixOutcome::Skipped {
            self.message = Some("Suggestion no longer applies to the text".to_string());
        }
        self.clamp_finding_selection();
    }

    fn ignore_finding(&mut self) {
        if let Some(index) = self.finding_list.selected() {
            self.proofread.ignore(index);
            self.clamp_finding_selection();
        }
    }

    fn close_findings(&mut self) {
        self.proofread.close_panel();
        self.finding_list.select(None);
    }

    fn clamp_finding_selection(&mut self) {
        let count = self.proofread.findings().len();
        let selected = match self.finding_list.selected() {
            _ if count == 0 => None,
            Some(i) => Some(i.min(count - 1)),
            None => Some(0),
        };
        self.finding_list.select(selected);
    }

    fn selected_chapter_mut(&mut self) -> Option<&mut Chapter> {
        let index = self.chapter_list.selected()?;
        self.chapters.get_mut(index)
    }

    /// Write the open chapter back to its file
    pub fn save(&mut self) -> Result<String> {
        let Some(doc) = self.document.as_ref() else {
            return Ok("No chapter open".to_string());
        };
        let content = doc.doc().clone();
        let root = self.manuscript_path.clone();
        let Some(chapter) = self.selected_chapter_mut() else {
            return Ok("No chapter open".to_string());
        };

        let relative_path = chapter.relative_path().to_relative_path_buf();
        let file = chapter.file_mut();
        file.content = content;
        io::write_chapter(&relative_path, &root, file)
            .with_context(|| format!("Failed to save {relative_path}"))?;
        let words = file.word_count;

        if let Some(doc) = self.document.as_mut() {
            doc.mark_saved();
        }
        log::info!("Saved {relative_path} ({words} words)");
        Ok(format!("Saved {relative_path} ({words} words)"))
    }

    fn save_if_dirty(&mut self) {
        if self.document.as_ref().is_some_and(Document::is_dirty) {
            let saved = self.save();
            self.report(saved);
        }
    }

    /// Write the open chapter as plain text under [`EXPORT_DIR`]
    pub fn export_plain_text(&self) -> Result<PathBuf> {
        self.export("txt", Doc::plain_text)
    }

    /// Write the open chapter as an HTML fragment under [`EXPORT_DIR`]
    pub fn export_html(&self) -> Result<PathBuf> {
        self.export("html", Doc::to_html)
    }

    fn export(&self, extension: &str, render: impl FnOnce(&Doc) -> String) -> Result<PathBuf> {
        let (Some(doc), Some(index)) = (self.document.as_ref(), self.chapter_list.selected())
        else {
            anyhow::bail!("No chapter open");
        };
        let title = self
            .chapters
            .get(index)
            .map_or("chapter", |chapter| chapter.display_name());

        let dir = self.manuscript_path.join(EXPORT_DIR);
        fs::create_dir_all(&dir)
            .with_context(|| format!("Failed to create {}", dir.display()))?;
        let path = dir.join(export_file_name(title, extension));
        fs::write(&path, render(doc.doc()))
            .with_context(|| format!("Failed to write {}", path.display()))?;
        log::info!("Exported {}", path.display());
        Ok(path)
    }

    pub fn manuscript_path(&self) -> &Path {
        &self.manuscript_path
    }
}

fn replace_summary(report: BulkReplace) -> String {
    match report.skipped {
        0 => format!("Replaced {}", report.replaced),
        skipped => format!("Replaced {} ({skipped} skipped)", report.replaced),
    }
}

fn export_file_name(title: &str, extension: &str) -> String {
    let stem: String = title
        .chars()
        .map(|c| if matches!(c, '/' | '\\' | ':') { '-' } else { c })
        .collect();
    format!("{}.{extension}", stem.trim())
}
