use std::ops::Range;

use quill_engine::editing::{Document, Editor};
use quill_engine::proofread::ErrorCategory;
use quill_engine::reconcile::{BLOCK_SEPARATOR, extract};
use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph, Wrap},
};

use crate::app::{App, Mode};

pub fn ui(f: &mut Frame, app: &mut App) {
    let bar_height = if app.search_open || app.mode == Mode::Symbols {
        3
    } else {
        0
    };
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints([
            Constraint::Min(0),
            Constraint::Length(bar_height),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .split(f.area());

    let columns = if app.proofread.is_panel_open() {
        vec![
            Constraint::Percentage(20),
            Constraint::Percentage(50),
            Constraint::Percentage(30),
        ]
    } else {
        vec![Constraint::Percentage(25), Constraint::Percentage(75)]
    };
    let main = Layout::default()
        .direction(Direction::Horizontal)
        .constraints(columns)
        .split(rows[0]);

    render_chapters(f, app, main[0]);
    render_editor(f, app, main[1]);
    if app.proofread.is_panel_open() {
        render_findings(f, app, main[2]);
    }
    if app.mode == Mode::Symbols {
        render_symbol_bar(f, app, rows[1]);
    } else if app.search_open {
        render_search_bar(f, app, rows[1]);
    }
    render_status(f, app, rows[2]);
    render_help(f, app, rows[3]);
}

fn render_chapters(f: &mut Frame, app: &mut App, area: Rect) {
    let items: Vec<ListItem> = app
        .chapters
        .iter()
        .map(|chapter| ListItem::new(Line::from(format!("📄 {}", chapter.display_name()))))
        .collect();

    let list = List::new(items)
        .block(Block::default().borders(Borders::ALL).title("Chapters"))
        .highlight_style(Style::default().bg(Color::Yellow).fg(Color::Black));

    f.render_stateful_widget(list, area, &mut app.chapter_list);
}

fn render_editor(f: &mut Frame, app: &App, area: Rect) {
    let title = app
        .chapter_list
        .selected()
        .and_then(|i| app.chapters.get(i))
        .map_or("Editor", |chapter| chapter.display_name());

    let lines = match app.document.as_ref() {
        Some(doc) => {
            let finding = app
                .finding_list
                .selected()
                .and_then(|i| app.proofread.findings().get(i))
                .map(|finding| finding.flat_offset..finding.flat_end());
            document_lines(doc, finding)
        }
        None => vec![Line::from(format!(
            "No chapters found in {}",
            app.manuscript_path().display()
        ))],
    };

    let editor = Paragraph::new(lines)
        .block(Block::default().borders(Borders::ALL).title(title))
        .wrap(Wrap { trim: false });
    f.render_widget(editor, area);
}

fn render_findings(f: &mut Frame, app: &mut App, area: Rect) {
    let block = Block::default().borders(Borders::ALL).title(format!(
        "Proofreading ({})",
        app.language.label
    ));

    if app.proofread.is_loading() {
        f.render_widget(Paragraph::new("Checking…").block(block), area);
        return;
    }
    if let Some(error) = app.proofread.error_message() {
        let text = Paragraph::new(error)
            .style(Style::default().fg(Color::Red))
            .wrap(Wrap { trim: true })
            .block(block);
        f.render_widget(text, area);
        return;
    }

    let items: Vec<ListItem> = app
        .proofread
        .findings()
        .iter()
        .map(|finding| {
            let suggestions = finding
                .replacements
                .iter()
                .take(9)
                .enumerate()
                .map(|(i, value)| format!("{}: {value}", i + 1))
                .collect::<Vec<_>>()
                .join("  ");
            ListItem::new(vec![
                Line::from(vec![
                    Span::styled(
                        format!("[{}] ", finding.category),
                        category_style(finding.category),
                    ),
                    Span::raw(finding.message.clone()),
                ]),
                Line::from(Span::styled(
                    suggestions,
                    Style::default().add_modifier(Modifier::DIM),
                )),
            ])
        })
        .collect();

    let list = List::new(items)
        .block(block)
        .highlight_style(Style::default().add_modifier(Modifier::REVERSED));
    f.render_stateful_widget(list, area, &mut app.finding_list);
}

fn category_style(category: ErrorCategory) -> Style {
    match category {
        ErrorCategory::Spelling => Style::default().fg(Color::Red),
        ErrorCategory::Grammar => Style::default().fg(Color::Yellow),
        ErrorCategory::Style => Style::default().fg(Color::Blue),
    }
}

fn render_search_bar(f: &mut Frame, app: &App, area: Rect) {
    let active = Style::default().add_modifier(Modifier::UNDERLINED);
    let field_style = |mode: Mode| {
        if app.mode == mode {
            active
        } else {
            Style::default()
        }
    };
    let case = if app.search.is_case_sensitive() {
        "[Aa]"
    } else {
        "[aa]"
    };

    let line = Line::from(vec![
        Span::raw("Find: "),
        Span::styled(app.search.term().to_string(), field_style(Mode::SearchTerm)),
        Span::raw("  Replace: "),
        Span::styled(
            app.search.replacement().to_string(),
            field_style(Mode::Replacement),
        ),
        Span::raw(format!("  {case}  {}", app.search.status())),
    ]);

    let bar = Paragraph::new(line).block(Block::default().borders(Borders::ALL).title("Search"));
    f.render_widget(bar, area);
}

fn render_symbol_bar(f: &mut Frame, app: &App, area: Rect) {
    let group = app.symbols.group();
    let spans: Vec<Span> = group
        .items
        .iter()
        .enumerate()
        .map(|(i, item)| {
            let style = if i == app.symbols.item_index() {
                Style::default().add_modifier(Modifier::REVERSED)
            } else {
                Style::default()
            };
            Span::styled(format!(" {item} "), style)
        })
        .collect();

    let bar = Paragraph::new(Line::from(spans)).block(
        Block::default()
            .borders(Borders::ALL)
            .title(format!("Symbols: {}", group.category)),
    );
    f.render_widget(bar, area);
}

fn render_status(f: &mut Frame, app: &App, area: Rect) {
    let mut spans = Vec::new();
    if let Some(stats) = app.stats() {
        let dirty = if app.document.as_ref().is_some_and(Document::is_dirty) {
            "● "
        } else {
            ""
        };
        spans.push(Span::raw(format!(
            "{dirty}{} words | {} chars | {} min read | {}",
            stats.words,
            stats.chars,
            stats.reading_minutes(),
            app.language.code
        )));
    }
    if let Some(message) = &app.message {
        spans.push(Span::styled(
            format!("  {message}"),
            Style::default().fg(Color::Cyan),
        ));
    }
    f.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn render_help(f: &mut Frame, app: &App, area: Rect) {
    let help = match app.mode {
        Mode::Normal => {
            "q: Quit | j/k: Chapter | /: Search | n/N: Next/Prev | r/R: Replace/All | c: Case | g: Check | J/K: Finding | 1-9: Fix | i: Ignore | x: Close | l: Language | S: Symbols | s: Save | e/E: Export text/HTML"
        }
        Mode::SearchTerm | Mode::Replacement => {
            "Enter: Search | Tab: Find/Replace field | Esc: Back"
        }
        Mode::Symbols => "h/l: Symbol | j/k: Group | Enter: Insert | Esc: Back",
    };
    f.render_widget(Paragraph::new(Line::from(help)), area);
}

/// Render the flat text of `doc`, one line per block or hard break.
///
/// The selection and the flat range of the current finding are styled.
pub fn document_lines(doc: &Document, finding: Option<Range<usize>>) -> Vec<Line<'static>> {
    let extraction = extract(doc.doc());
    let selection = doc.selection();

    let mut lines = Vec::new();
    let mut spans: Vec<Span<'static>> = Vec::new();
    let mut run = String::new();
    let mut run_style = Style::default();

    for (flat, (ch, pos)) in extraction
        .text()
        .chars()
        .zip(extraction.map().iter())
        .enumerate()
    {
        if ch == BLOCK_SEPARATOR {
            flush(&mut spans, &mut run, run_style);
            lines.push(Line::from(std::mem::take(&mut spans)));
            continue;
        }

        let mut style = Style::default();
        if finding.as_ref().is_some_and(|range| range.contains(&flat)) {
            style = style.fg(Color::Red).add_modifier(Modifier::UNDERLINED);
        }
        if pos.is_some_and(|pos| selection.contains(&pos)) {
            style = style.bg(Color::Yellow).fg(Color::Black);
        }
        if style != run_style {
            flush(&mut spans, &mut run, run_style);
            run_style = style;
        }
        run.push(ch);
    }
    flush(&mut spans, &mut run, run_style);
    lines.push(Line::from(spans));
    lines
}

fn flush(spans: &mut Vec<Span<'static>>, run: &mut String, style: Style) {
    if !run.is_empty() {
        spans.push(Span::styled(std::mem::take(run), style));
    }
}
