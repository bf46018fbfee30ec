use crate::editing::{Cmd, EditError, Editor, Patch};
use crate::reconcile::locate::Match;

/// Outcome of a bulk replace
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BulkReplace {
    pub replaced: usize,
    /// Matches the document refused, e.g. because they span blocks
    pub skipped: usize,
}

/// Select the matched chars and focus the editor
pub fn highlight<E: Editor + ?Sized>(editor: &mut E, m: &Match) -> Result<Patch, EditError> {
    let range = m.doc_range();
    let patch = editor.apply(Cmd::set_selection(range.start, range.end))?;
    editor.focus();
    Ok(patch)
}

/// Replace the matched chars; the caret ends up right after `replacement`.
///
/// Any extraction or match list taken before this call is stale afterwards.
pub fn replace_match<E: Editor + ?Sized>(
    editor: &mut E,
    m: &Match,
    replacement: &str,
) -> Result<Patch, EditError> {
    let range = m.doc_range();
    let patch = editor.apply(Cmd::replace(range.start, range.end, replacement))?;
    editor.focus();
    Ok(patch)
}

/// Replace every match, last one first.
///
/// Working backwards keeps the positions of the matches still to be
/// processed valid, since each edit only touches text after them.
pub fn replace_all<E: Editor + ?Sized>(
    editor: &mut E,
    matches: &[Match],
    replacement: &str,
) -> BulkReplace {
    let mut ordered: Vec<&Match> = matches.iter().collect();
    ordered.sort_by(|a, b| b.flat_offset.cmp(&a.flat_offset));

    let mut report = BulkReplace::default();
    for m in ordered {
        let range = m.doc_range();
        match editor.apply(Cmd::replace(range.start, range.end, replacement)) {
            Ok(_) => report.replaced += 1,
            Err(err) => {
                log::debug!("Skipping match at flat offset {}: {err}", m.flat_offset);
                report.skipped += 1;
            }
        }
    }

    if report.replaced > 0 {
        editor.focus();
    }
    report
}
