//! Diagnostic sinks for validation output.
//!
//! Data errors are never exceptions: schemas report them through a
//! [`DiagnosticSink`] and signal failure with a boolean return. The sink
//! contract has a required core (`warn`, `error`) and an optional suggestion
//! extension that schemas must capability-check before using.

use serde::Serialize;

/// A single recorded diagnostic.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Diagnostic {
    Warning { message: String },
    Error { message: String },
    Suggestion { candidate: String, options: Vec<String> },
}

/// Receives validation diagnostics.
pub trait DiagnosticSink {
    fn warn(&mut self, message: String);

    fn error(&mut self, message: String);

    /// Whether this sink can surface "did you mean" suggestions. Schemas
    /// check this before building a suggestion list.
    fn supports_suggestions(&self) -> bool {
        false
    }

    /// Offer the full option set for a rejected candidate. Only called when
    /// [`DiagnosticSink::supports_suggestions`] returns true.
    fn did_you_mean(&mut self, candidate: &str, options: &[String]) {
        let _ = (candidate, options);
    }
}

/// Records diagnostics in order.
///
/// Used by callers that want to inspect or serialize validation output, and
/// by the union schema to buffer an alternative's diagnostics until it is
/// known whether they matter.
#[derive(Debug, Default)]
pub struct CollectingSink {
    entries: Vec<Diagnostic>,
}

impl CollectingSink {
    pub fn new() -> Self {
        CollectingSink::default()
    }

    pub fn entries(&self) -> &[Diagnostic] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Discard every entry recorded at or after `len`.
    pub fn truncate(&mut self, len: usize) {
        self.entries.truncate(len);
    }

    /// Replay the entries recorded at or after `from` into another sink,
    /// honoring its suggestion capability.
    pub fn replay_into(&self, from: usize, sink: &mut dyn DiagnosticSink) {
        for entry in &self.entries[from..] {
            match entry {
                Diagnostic::Warning { message } => sink.warn(message.clone()),
                Diagnostic::Error { message } => sink.error(message.clone()),
                Diagnostic::Suggestion { candidate, options } => {
                    if sink.supports_suggestions() {
                        sink.did_you_mean(candidate, options);
                    }
                }
            }
        }
    }
}

impl DiagnosticSink for CollectingSink {
    fn warn(&mut self, message: String) {
        self.entries.push(Diagnostic::Warning { message });
    }

    fn error(&mut self, message: String) {
        self.entries.push(Diagnostic::Error { message });
    }

    fn supports_suggestions(&self) -> bool {
        true
    }

    fn did_you_mean(&mut self, candidate: &str, options: &[String]) {
        self.entries.push(Diagnostic::Suggestion {
            candidate: candidate.to_string(),
            options: options.to_vec(),
        });
    }
}

/// Forwards diagnostics to `tracing` events.
#[derive(Debug, Default)]
pub struct TracingSink;

impl DiagnosticSink for TracingSink {
    fn warn(&mut self, message: String) {
        tracing::warn!("{}", message);
    }

    fn error(&mut self, message: String) {
        tracing::error!("{}", message);
    }

    fn supports_suggestions(&self) -> bool {
        true
    }

    fn did_you_mean(&mut self, candidate: &str, options: &[String]) {
        if let Some(best) = crate::util::closest_option(candidate, options) {
            tracing::warn!("did you mean {}?", best);
        }
    }
}
