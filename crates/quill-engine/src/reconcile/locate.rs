use std::ops::Range;

use regex::RegexBuilder;

use crate::models::DocPos;
use crate::reconcile::extract::Extraction;

/// A flat-text span resolved onto the document it was extracted from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Match {
    pub flat_offset: usize,
    pub flat_length: usize,
    /// Position before the first matched char
    pub from: DocPos,
    /// Position before the last matched char
    pub to: DocPos,
}

impl Match {
    pub fn flat_range(&self) -> Range<usize> {
        self.flat_offset..self.flat_offset + self.flat_length
    }

    /// Document range covering every matched char
    pub fn doc_range(&self) -> Range<DocPos> {
        self.from..self.to.forward(1)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("flat span at {offset} (length {length}) has no document position")]
pub struct Unresolvable {
    pub offset: usize,
    pub length: usize,
}

/// Map an externally supplied `(offset, length)` onto document positions.
///
/// Fails when the span is empty, runs past the extraction, or starts or
/// ends on a block separator.
pub fn resolve_offset(
    extraction: &Extraction,
    flat_offset: usize,
    flat_length: usize,
) -> Result<Match, Unresolvable> {
    let unresolvable = Unresolvable {
        offset: flat_offset,
        length: flat_length,
    };
    let last = flat_length
        .checked_sub(1)
        .and_then(|n| flat_offset.checked_add(n))
        .ok_or(unresolvable)?;

    let map = extraction.map();
    let from = map.resolve(flat_offset).ok_or(unresolvable)?;
    let to = map.resolve(last).ok_or(unresolvable)?;

    Ok(Match {
        flat_offset,
        flat_length,
        from,
        to,
    })
}

/// All non-overlapping literal occurrences of `pattern`, in document order.
///
/// Blank patterns find nothing. Occurrences starting or ending on a block
/// separator cannot be addressed in the document and are dropped.
pub fn find_pattern(extraction: &Extraction, pattern: &str, case_sensitive: bool) -> Vec<Match> {
    if pattern.trim().is_empty() {
        return Vec::new();
    }

    let regex = match RegexBuilder::new(&regex::escape(pattern))
        .case_insensitive(!case_sensitive)
        .build()
    {
        Ok(regex) => regex,
        Err(err) => {
            log::warn!("Search pattern rejected: {err}");
            return Vec::new();
        }
    };

    regex
        .find_iter(extraction.text())
        .filter_map(|found| {
            let offset = extraction.char_index(found.start());
            let length = found.as_str().chars().count();
            resolve_offset(extraction, offset, length)
                .inspect_err(|err| log::debug!("Dropping search hit: {err}"))
                .ok()
        })
        .collect()
}
