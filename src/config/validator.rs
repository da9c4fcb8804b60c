//! Config validator
//!
//! Checks that every configured typewriter can be constructed and that the
//! UI settings refer to things that exist.

use crate::config::Config;
use crate::theme::{parse_hex_color, ThemePresets};
use crate::widgets::TypewriterError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationIssue {
    NoTypewriters,
    InvalidTypewriter { index: usize, error: TypewriterError },
    UnknownTheme { theme: String },
    InvalidCursorColor { value: String },
    ZeroFrameRate,
}

impl ValidationIssue {
    pub fn severity(&self) -> ValidationSeverity {
        match self {
            ValidationIssue::NoTypewriters => ValidationSeverity::Error,
            ValidationIssue::InvalidTypewriter { .. } => ValidationSeverity::Error,
            ValidationIssue::InvalidCursorColor { .. } => ValidationSeverity::Error,
            ValidationIssue::ZeroFrameRate => ValidationSeverity::Error,
            ValidationIssue::UnknownTheme { .. } => ValidationSeverity::Warning,
        }
    }

    pub fn message(&self) -> String {
        match self {
            ValidationIssue::NoTypewriters => "No [[typewriters]] entries defined".to_string(),
            ValidationIssue::InvalidTypewriter { index, error } => {
                format!("Typewriter #{}: {}", index + 1, error)
            }
            ValidationIssue::UnknownTheme { theme } => {
                format!("Unknown theme '{}', dark will be used", theme)
            }
            ValidationIssue::InvalidCursorColor { value } => {
                format!("cursor_color '{}' is not a #rrggbb color", value)
            }
            ValidationIssue::ZeroFrameRate => "ui.frame_ms must be longer than zero".to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationSeverity {
    Error,
    Warning,
}

pub struct ValidationResult {
    pub issues: Vec<ValidationIssue>,
}

impl ValidationResult {
    pub fn is_valid(&self) -> bool {
        !self.has_errors()
    }

    pub fn has_errors(&self) -> bool {
        self.issues
            .iter()
            .any(|i| matches!(i.severity(), ValidationSeverity::Error))
    }

    pub fn errors(&self) -> Vec<&ValidationIssue> {
        self.issues
            .iter()
            .filter(|i| matches!(i.severity(), ValidationSeverity::Error))
            .collect()
    }

    pub fn warnings(&self) -> Vec<&ValidationIssue> {
        self.issues
            .iter()
            .filter(|i| matches!(i.severity(), ValidationSeverity::Warning))
            .collect()
    }
}

/// Validate a loaded config
pub fn validate_config(config: &Config) -> ValidationResult {
    let mut issues = Vec::new();

    if config.typewriters.is_empty() {
        issues.push(ValidationIssue::NoTypewriters);
    }

    for (index, typewriter) in config.typewriters.iter().enumerate() {
        if let Err(error) = typewriter.build() {
            issues.push(ValidationIssue::InvalidTypewriter { index, error });
        }
    }

    if !ThemePresets::all().contains_key(&config.ui.theme) {
        issues.push(ValidationIssue::UnknownTheme {
            theme: config.ui.theme.clone(),
        });
    }

    if let Some(value) = &config.ui.cursor_color {
        if parse_hex_color(value).is_none() {
            issues.push(ValidationIssue::InvalidCursorColor {
                value: value.clone(),
            });
        }
    }

    if config.ui.frame_ms == 0 {
        issues.push(ValidationIssue::ZeroFrameRate);
    }

    ValidationResult { issues }
}
