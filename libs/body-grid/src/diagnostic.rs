//! # Diagnostics
//!
//! Non-fatal findings recorded while a group is reconstructed. Every entry
//! is also emitted through `tracing` so callers that only install a
//! subscriber still see them.

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

/// Severity of a diagnostic message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Severity {
    Info,
    Warning,
}

/// What a diagnostic is about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DiagnosticCode {
    /// Group has no faces; stations come from the coordinate sort.
    NoAdjacency,
    /// Mesh has several connected components; the largest one was used.
    DisconnectedMesh,
    /// No unique nose/tail extremity; stations come from the coordinate sort.
    AmbiguousTopology,
    /// More stations than the grid holds; trailing stations were dropped.
    Truncated,
    /// Fewer stations than the grid holds; null rings fill the rest.
    Padded,
    /// Mid station without a positive half; the full loop was used.
    DegenerateRing,
    /// Padding repeats a vertex that is not on the centerline.
    OffCenterlinePadding,
    /// Mid station members spread along `z`; the station may mix two loops.
    MixedStation,
}

/// A diagnostic message with severity, code and optional station.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagnostic {
    pub severity: Severity,
    pub code: DiagnosticCode,
    pub station: Option<usize>,
    pub message: String,
}

impl Diagnostic {
    pub fn new(severity: Severity, code: DiagnosticCode, message: String) -> Self {
        Self {
            severity,
            code,
            station: None,
            message,
        }
    }

    pub fn info(code: DiagnosticCode, message: String) -> Self {
        Self::new(Severity::Info, code, message)
    }

    pub fn warning(code: DiagnosticCode, message: String) -> Self {
        Self::new(Severity::Warning, code, message)
    }

    pub fn at_station(mut self, station: usize) -> Self {
        self.station = Some(station);
        self
    }

    #[inline]
    pub fn is_warning(&self) -> bool {
        self.severity == Severity::Warning
    }
}

/// Diagnostics collected for one group.
#[derive(Debug, Clone, Default)]
pub struct Diagnostics {
    group: String,
    items: Vec<Diagnostic>,
}

impl Diagnostics {
    /// Creates an empty collection for the named group.
    pub fn new(group: impl Into<String>) -> Self {
        Self {
            group: group.into(),
            items: Vec::new(),
        }
    }

    /// Records a diagnostic and logs it at the matching level.
    pub fn push(&mut self, diagnostic: Diagnostic) {
        match diagnostic.severity {
            Severity::Info => info!(
                group = %self.group,
                code = ?diagnostic.code,
                station = ?diagnostic.station,
                "{}",
                diagnostic.message
            ),
            Severity::Warning => warn!(
                group = %self.group,
                code = ?diagnostic.code,
                station = ?diagnostic.station,
                "{}",
                diagnostic.message
            ),
        }
        self.items.push(diagnostic);
    }

    pub fn iter(&self) -> impl Iterator<Item = &Diagnostic> {
        self.items.iter()
    }

    /// True if any entry carries `code`.
    pub fn contains(&self, code: DiagnosticCode) -> bool {
        self.items.iter().any(|d| d.code == code)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn into_vec(self) -> Vec<Diagnostic> {
        self.items
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_keeps_order() {
        let mut diagnostics = Diagnostics::new("fuselage");
        diagnostics.push(Diagnostic::info(DiagnosticCode::Padded, "padded".to_string()));
        diagnostics.push(
            Diagnostic::warning(DiagnosticCode::DegenerateRing, "no half".to_string()).at_station(4),
        );

        let items: Vec<_> = diagnostics.iter().collect();
        assert_eq!(items.len(), 2);
        assert_eq!(items[0].code, DiagnosticCode::Padded);
        assert!(!items[0].is_warning());
        assert_eq!(items[1].station, Some(4));
        assert!(items[1].is_warning());
    }

    #[test]
    fn test_contains() {
        let mut diagnostics = Diagnostics::new("cowling");
        assert!(diagnostics.is_empty());
        diagnostics.push(Diagnostic::warning(DiagnosticCode::Truncated, "dropped".to_string()));
        assert!(diagnostics.contains(DiagnosticCode::Truncated));
        assert!(!diagnostics.contains(DiagnosticCode::Padded));
        assert_eq!(diagnostics.len(), 1);
    }
}
