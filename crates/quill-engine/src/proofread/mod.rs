//! Proofreading through an external text-analysis service.
//!
//! The flat text from [`extract`](crate::reconcile::extract) is submitted
//! as-is, so the offsets the service reports line up with it char for char.
//! Findings are kept purely as flat `(offset, length)` pairs: applying one
//! fix shifts the others instead of re-running the check.

pub mod adapter;
pub mod client;
pub mod wire;

pub use adapter::{ErrorCategory, ExternalFinding, Utf16Offsets, adapt};
pub use client::{CheckError, DEFAULT_API_URL, LanguageToolClient, TextAnalyzer};
pub use wire::CheckResponse;

use crate::editing::Editor;
use crate::reconcile::{extract, replace_match, resolve_offset};

/// Message shown when the service cannot be reached
pub const SERVICE_UNAVAILABLE: &str =
    "Could not reach the proofreading service. Check your internet connection.";

/// Identifies one issued check; only the latest one may complete
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct RequestToken(u64);

/// A check the host must send to the service
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckRequest {
    pub token: RequestToken,
    pub text: String,
    pub language: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FixOutcome {
    Applied,
    /// The finding no longer maps onto the document; nothing changed
    Skipped,
}

/// State of the proofreading panel
#[derive(Debug, Default)]
pub struct ProofreadSession {
    loading: bool,
    panel_open: bool,
    findings: Vec<ExternalFinding>,
    error: Option<CheckError>,
    last_token: u64,
    pending: Option<CheckRequest>,
}

impl ProofreadSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn is_panel_open(&self) -> bool {
        self.panel_open
    }

    pub fn findings(&self) -> &[ExternalFinding] {
        &self.findings
    }

    pub fn error(&self) -> Option<&CheckError> {
        self.error.as_ref()
    }

    /// User-facing error line, if the last check failed
    pub fn error_message(&self) -> Option<&'static str> {
        self.error.as_ref().map(|_| SERVICE_UNAVAILABLE)
    }

    /// Start a check of `text`; blank text issues nothing.
    ///
    /// Clears previous results and supersedes any check still in flight.
    pub fn begin_check(&mut self, text: &str, language: &str) -> Option<CheckRequest> {
        if text.trim().is_empty() {
            return None;
        }

        self.last_token += 1;
        let request = CheckRequest {
            token: RequestToken(self.last_token),
            text: text.to_string(),
            language: language.to_string(),
        };

        self.loading = true;
        self.panel_open = true;
        self.error = None;
        self.findings.clear();
        self.pending = Some(request.clone());
        Some(request)
    }

    /// Deliver the service result for `token`.
    ///
    /// Returns `false` when the token is stale and the result was discarded.
    pub fn complete(
        &mut self,
        token: RequestToken,
        result: Result<CheckResponse, CheckError>,
    ) -> bool {
        let Some(request) = self.pending.take_if(|pending| pending.token == token) else {
            log::debug!("Discarding stale check response {token:?}");
            return false;
        };

        self.loading = false;
        match result {
            Ok(response) => {
                self.findings = adapt(response, &request.text);
                log::debug!("Check returned {} findings", self.findings.len());
            }
            Err(err) => {
                log::warn!("Proofreading check failed: {err}");
                self.findings.clear();
                self.error = Some(err);
            }
        }
        true
    }

    /// Run a full check synchronously through `analyzer`
    pub fn check<A: TextAnalyzer + ?Sized>(&mut self, analyzer: &A, text: &str, language: &str) {
        if let Some(request) = self.begin_check(text, language) {
            let result = analyzer.check(&request.text, &request.language);
            self.complete(request.token, result);
        }
    }

    /// Apply `replacement` for the finding at `index`.
    ///
    /// The document is extracted afresh; a finding that no longer maps onto
    /// it is skipped without touching anything. On success the finding is
    /// removed and every later finding shifts by the length difference.
    pub fn apply_fix<E: Editor + ?Sized>(
        &mut self,
        editor: &mut E,
        index: usize,
        replacement: &str,
    ) -> FixOutcome {
        let Some(finding) = self.findings.get(index) else {
            return FixOutcome::Skipped;
        };
        let (offset, length) = (finding.flat_offset, finding.flat_length);

        let extraction = extract(editor.doc());
        let target = match resolve_offset(&extraction, offset, length) {
            Ok(target) => target,
            Err(err) => {
                log::debug!("Skipping finding: {err}");
                return FixOutcome::Skipped;
            }
        };
        if let Err(err) = replace_match(editor, &target, replacement) {
            log::debug!("Skipping finding at {offset}: {err}");
            return FixOutcome::Skipped;
        }

        let diff = replacement.chars().count() as isize - length as isize;
        self.findings
            .retain(|f| !(f.flat_offset == offset && f.flat_length == length));
        for f in &mut self.findings {
            if f.flat_offset > offset {
                f.flat_offset = f.flat_offset.saturating_add_signed(diff);
            }
        }
        FixOutcome::Applied
    }

    /// Drop the finding at `index` without changing the document
    pub fn ignore(&mut self, index: usize) {
        let Some(finding) = self.findings.get(index) else {
            return;
        };
        let (offset, length) = (finding.flat_offset, finding.flat_length);
        self.findings
            .retain(|f| !(f.flat_offset == offset && f.flat_length == length));
    }

    /// Close the panel and forget results and in-flight checks
    pub fn close_panel(&mut self) {
        self.panel_open = false;
        self.loading = false;
        self.findings.clear();
        self.error = None;
        self.pending = None;
    }
}
