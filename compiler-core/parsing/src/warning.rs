use std::fmt;
use std::sync::Arc;

use position::Position;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WarningKind {
    /// A rule whose regular expression matches the empty string.
    NullableRegex,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Warning {
    pub kind: WarningKind,
    pub position: Position,
    pub message: Arc<str>,
}

impl Warning {
    pub fn nullable_regex(position: Position, description: impl fmt::Display) -> Warning {
        let kind = WarningKind::NullableRegex;
        let message = format!("Regular expression {description} matches the empty string.");
        let message = Arc::from(message);
        Warning { kind, position, message }
    }

    /// Formats the warning as `file:line:column: warning: message`.
    pub fn render(&self, file: &str) -> String {
        format!("{file}:{}: warning: {}", self.position, self.message)
    }
}

/// Diagnostics accumulated over a parse, oldest first.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct WarningLog {
    warnings: Vec<Warning>,
}

impl WarningLog {
    pub fn record(&mut self, warning: Warning) {
        tracing::debug!(position = %warning.position, message = %warning.message, "warning");
        self.warnings.push(warning);
    }

    pub fn record_nullable(&mut self, position: Position, description: impl fmt::Display) {
        self.record(Warning::nullable_regex(position, description));
    }

    pub fn as_slice(&self) -> &[Warning] {
        &self.warnings
    }

    pub fn len(&self) -> usize {
        self.warnings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.warnings.is_empty()
    }

    pub fn drain(self) -> Vec<Warning> {
        self.warnings
    }
}
