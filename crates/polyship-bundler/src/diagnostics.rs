//! Diagnostic extraction from Rolldown errors and warnings.
//!
//! Rolldown's diagnostic types change between releases, so they are read
//! through their `Debug` output rather than matched structurally.

/// Coarse classification of a Rolldown diagnostic.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DiagnosticKind {
    CircularDependency,
    UnresolvedEntry,
    UnresolvedImport,
    MissingExport,
    ParseError,
    Plugin,
    Other,
}

impl std::fmt::Display for DiagnosticKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DiagnosticKind::CircularDependency => write!(f, "CircularDependency"),
            DiagnosticKind::UnresolvedEntry => write!(f, "UnresolvedEntry"),
            DiagnosticKind::UnresolvedImport => write!(f, "UnresolvedImport"),
            DiagnosticKind::MissingExport => write!(f, "MissingExport"),
            DiagnosticKind::ParseError => write!(f, "ParseError"),
            DiagnosticKind::Plugin => write!(f, "Plugin"),
            DiagnosticKind::Other => write!(f, "Error"),
        }
    }
}

/// Classify a diagnostic from its debug text.
pub fn classify(diagnostic: &dyn std::fmt::Debug) -> DiagnosticKind {
    classify_text(&format!("{diagnostic:?}"))
}

fn classify_text(text: &str) -> DiagnosticKind {
    if text.contains("CircularDependency") || text.contains("Circular dependency") {
        DiagnosticKind::CircularDependency
    } else if text.contains("UnresolvedEntry") {
        DiagnosticKind::UnresolvedEntry
    } else if text.contains("UnresolvedImport") || text.contains("Could not resolve") {
        DiagnosticKind::UnresolvedImport
    } else if text.contains("MissingExport") {
        DiagnosticKind::MissingExport
    } else if text.contains("ParseError") || text.contains("Unexpected token") {
        DiagnosticKind::ParseError
    } else if text.contains("Plugin") {
        DiagnosticKind::Plugin
    } else {
        DiagnosticKind::Other
    }
}

/// Whether a warning only reports a circular import.
pub fn is_circular_dependency(warning: &dyn std::fmt::Debug) -> bool {
    classify(warning) == DiagnosticKind::CircularDependency
}

/// One-line message for a Rolldown error or error batch.
///
/// Every diagnostic of a batch is kept, as `Kind: message` joined with `; `.
pub fn summarize(error: &dyn std::fmt::Debug) -> String {
    let text = format!("{error:?}");
    let entries = extract_messages(&text);
    match entries.as_slice() {
        [] => format!("{}: {}", classify_text(&text), text.trim()),
        [(kind, message)] => format!("{kind}: {message}"),
        many => format!(
            "{} errors: {}",
            many.len(),
            many.iter()
                .map(|(kind, message)| format!("{kind}: {message}"))
                .collect::<Vec<_>>()
                .join("; ")
        ),
    }
}

const MESSAGE_FIELD: &str = "message: \"";

/// Every quoted `message` field of a debug dump, each classified by the text
/// leading up to it.
fn extract_messages(text: &str) -> Vec<(DiagnosticKind, String)> {
    let mut entries = Vec::new();
    let mut cursor = 0;
    while let Some(offset) = text[cursor..].find(MESSAGE_FIELD) {
        let start = cursor + offset + MESSAGE_FIELD.len();
        let Some(len) = quoted_len(&text[start..]) else {
            break;
        };
        let kind = classify_text(&text[cursor..start + len]);
        let message = text[start..start + len]
            .replace("\\\"", "\"")
            .replace("\\n", "\n");
        entries.push((kind, message));
        cursor = start + len + 1;
    }
    entries
}

/// Length of a debug-escaped string body up to its closing quote.
fn quoted_len(rest: &str) -> Option<usize> {
    let mut escaped = false;
    for (i, ch) in rest.char_indices() {
        match ch {
            '\\' if !escaped => escaped = true,
            '"' if !escaped => return Some(i),
            _ => escaped = false,
        }
    }
    None
}
