//! Diagnostic infrastructure for specialization reporting
//!
//! Collaborators report problems into a [`DiagnosticSink`]. The sink renders
//! them into a caller-owned [`Blob`], either as plain terminal text or as
//! JSON for tooling. Reflection has no source text to point at, so these
//! diagnostics carry a code, a message, and notes but no labels.

use codespan_reporting::diagnostic::{Diagnostic as CsDiagnostic, Severity};
use codespan_reporting::files::SimpleFiles;
use codespan_reporting::term;
use serde::{Deserialize, Serialize};
use termcolor::NoColor;
use thiserror::Error;

use crate::config::DiagnosticsFormat;
use crate::error::ReflectError;

/// Error code for a diagnostic
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorCode(pub &'static str);

impl ErrorCode {
    /// The code as a string (e.g. "E4001")
    pub fn as_str(&self) -> &str {
        self.0
    }
}

/// A diagnostic message
#[derive(Debug, Clone)]
pub struct Diagnostic {
    inner: CsDiagnostic<usize>,
    code: Option<ErrorCode>,
}

impl Diagnostic {
    /// Create a new diagnostic
    pub fn new(severity: Severity, message: impl Into<String>) -> Self {
        Diagnostic {
            inner: CsDiagnostic::new(severity).with_message(message),
            code: None,
        }
    }

    /// Create an error diagnostic
    pub fn error(message: impl Into<String>) -> Self {
        Self::new(Severity::Error, message)
    }

    /// Create a warning diagnostic
    pub fn warning(message: impl Into<String>) -> Self {
        Self::new(Severity::Warning, message)
    }

    /// Set the error code
    pub fn with_code(mut self, code: ErrorCode) -> Self {
        self.inner = self.inner.with_code(code.0);
        self.code = Some(code);
        self
    }

    /// Add a note (additional context)
    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.inner.notes.push(note.into());
        self
    }

    /// Add a help suggestion
    pub fn with_help(mut self, help: impl Into<String>) -> Self {
        self.inner.notes.push(format!("help: {}", help.into()));
        self
    }

    /// Create a diagnostic from a ReflectError
    pub fn from_reflect_error(error: &ReflectError) -> Self {
        use ReflectError::*;

        let diag = Diagnostic::error(error.to_string()).with_code(error_code(error));
        match error {
            TypeNotFound { .. } => diag,

            NotSpecializable { .. } => diag
                .with_note("only types with interface-typed fields or parameters can be specialized"),

            ArgumentCountMismatch { expected, .. } => diag.with_help(format!(
                "supply exactly {} type argument{}, one per interface-typed slot",
                expected,
                if *expected == 1 { "" } else { "s" }
            )),

            DoesNotConform { interface, .. } => {
                diag.with_help(format!("declare a conformance to '{}'", interface))
            }

            Panicked { .. } => diag.with_note("the failure was contained; no type was produced"),
        }
    }

    /// Severity of the diagnostic
    pub fn severity(&self) -> Severity {
        self.inner.severity
    }

    /// Main message
    pub fn message(&self) -> &str {
        &self.inner.message
    }

    /// Error code, if any
    pub fn code(&self) -> Option<&ErrorCode> {
        self.code.as_ref()
    }

    /// Get the underlying codespan diagnostic (for testing/custom rendering)
    pub fn inner(&self) -> &CsDiagnostic<usize> {
        &self.inner
    }
}

/// Get the error code for a ReflectError
pub fn error_code(error: &ReflectError) -> ErrorCode {
    use ReflectError::*;

    match error {
        TypeNotFound { .. } => ErrorCode("E4001"),
        NotSpecializable { .. } => ErrorCode("E4002"),
        ArgumentCountMismatch { .. } => ErrorCode("E4003"),
        DoesNotConform { .. } => ErrorCode("E4004"),
        Panicked { .. } => ErrorCode("E4005"),
    }
}

/// JSON representation of a diagnostic for tooling
#[derive(Debug, Serialize, Deserialize)]
pub struct JsonDiagnostic {
    /// Error code (e.g., "E4002")
    pub code: Option<String>,
    /// Severity level
    pub severity: String,
    /// Main message
    pub message: String,
    /// Additional notes and help
    pub notes: Vec<String>,
}

impl JsonDiagnostic {
    /// Convert a Diagnostic to JSON representation
    pub fn from_diagnostic(diag: &Diagnostic) -> Self {
        let severity = match diag.inner.severity {
            Severity::Error => "error",
            Severity::Warning => "warning",
            Severity::Note => "note",
            Severity::Help => "help",
            Severity::Bug => "bug",
        };

        JsonDiagnostic {
            code: diag.code.as_ref().map(|c| c.0.to_string()),
            severity: severity.to_string(),
            message: diag.inner.message.clone(),
            notes: diag.inner.notes.clone(),
        }
    }
}

/// Errors rendering a sink's contents
#[derive(Debug, Error)]
pub enum RenderError {
    /// Terminal rendering failed
    #[error("Failed to render diagnostics: {0}")]
    Term(#[from] codespan_reporting::files::Error),

    /// JSON serialization failed
    #[error("Failed to serialize diagnostics: {0}")]
    Json(#[from] serde_json::Error),
}

/// Collects diagnostics reported during one collaborator call
#[derive(Debug, Clone, Default)]
pub struct DiagnosticSink {
    diagnostics: Vec<Diagnostic>,
}

impl DiagnosticSink {
    /// Create an empty sink
    pub fn new() -> Self {
        Self::default()
    }

    /// Report a diagnostic
    pub fn report(&mut self, diagnostic: Diagnostic) {
        self.diagnostics.push(diagnostic);
    }

    /// Report a ReflectError as an error diagnostic
    pub fn report_error(&mut self, error: &ReflectError) {
        self.report(Diagnostic::from_reflect_error(error));
    }

    /// Number of diagnostics reported
    pub fn len(&self) -> usize {
        self.diagnostics.len()
    }

    /// Whether nothing was reported
    pub fn is_empty(&self) -> bool {
        self.diagnostics.is_empty()
    }

    /// Whether any error-severity diagnostic was reported
    pub fn has_errors(&self) -> bool {
        self.diagnostics
            .iter()
            .any(|d| d.severity() >= Severity::Error)
    }

    /// Iterate diagnostics in report order
    pub fn iter(&self) -> impl Iterator<Item = &Diagnostic> {
        self.diagnostics.iter()
    }

    /// Render every diagnostic in `format`
    pub fn render(&self, format: DiagnosticsFormat) -> Result<String, RenderError> {
        match format {
            DiagnosticsFormat::Text => {
                let files: SimpleFiles<String, String> = SimpleFiles::new();
                let config = term::Config::default();
                let mut writer = NoColor::new(Vec::new());
                for diagnostic in &self.diagnostics {
                    term::emit(&mut writer, &config, &files, &diagnostic.inner)?;
                }
                Ok(String::from_utf8_lossy(&writer.into_inner()).into_owned())
            }
            DiagnosticsFormat::Json => {
                let json: Vec<JsonDiagnostic> = self
                    .diagnostics
                    .iter()
                    .map(JsonDiagnostic::from_diagnostic)
                    .collect();
                Ok(serde_json::to_string_pretty(&json)?)
            }
        }
    }

    /// Render into a blob, or `None` when nothing was reported
    ///
    /// A rendering failure degrades to one message per line rather than
    /// losing the diagnostics.
    pub fn into_blob(self, format: DiagnosticsFormat) -> Option<Blob> {
        if self.is_empty() {
            return None;
        }
        let text = match self.render(format) {
            Ok(text) => text,
            Err(err) => {
                tracing::warn!(error = %err, "falling back to plain diagnostic messages");
                self.diagnostics
                    .iter()
                    .map(|d| format!("{}\n", d.message()))
                    .collect()
            }
        };
        Some(Blob::from(text))
    }
}

/// An owned, immutable byte buffer handed to the host
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Blob {
    bytes: Vec<u8>,
}

impl Blob {
    /// The contents
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// The contents as text, when valid UTF-8
    pub fn as_str(&self) -> Option<&str> {
        std::str::from_utf8(&self.bytes).ok()
    }

    /// Size in bytes
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    /// Whether the blob is empty
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

impl From<String> for Blob {
    fn from(s: String) -> Self {
        Blob {
            bytes: s.into_bytes(),
        }
    }
}
