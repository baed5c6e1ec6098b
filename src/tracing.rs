//! Debug tracing infrastructure for development diagnostics
//!
//! Provides structured logging with scoped filtering for debugging selection
//! tracking and floating surface transitions.
//!
//! # Usage
//!
//! Configure via RUST_LOG environment variable:
//! - `RUST_LOG=debug` - all debug logs
//! - `RUST_LOG=selection=debug,floating=trace` - scoped filtering
//! - `RUST_LOG=relay_compose::proxy=info` - module-level filtering
//!
//! # Log Files
//!
//! Logs are written to `~/.config/relay-compose/logs/relay-compose.log` with
//! daily rotation, at debug level.

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

use crate::model::{ComposerModel, FloatingId};

/// Initialize tracing subscriber with console and file logging
pub fn init() {
    let console_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    // Console layer - respects RUST_LOG; stdout carries command output
    let console_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_line_number(true)
        .with_filter(console_filter);

    // File layer - always debug level for troubleshooting
    let file_layer = match crate::config_paths::ensure_logs_dir() {
        Ok(logs_dir) => {
            let file_appender = tracing_appender::rolling::daily(logs_dir, "relay-compose.log");
            Some(
                fmt::layer()
                    .with_writer(file_appender)
                    .with_ansi(false)
                    .with_target(true)
                    .with_line_number(true)
                    .with_filter(EnvFilter::new("debug")),
            )
        }
        Err(e) => {
            eprintln!("Warning: Could not initialize file logging: {}", e);
            None
        }
    };

    tracing_subscriber::registry()
        .with(console_layer)
        .with(file_layer)
        .init();
}

/// Lightweight snapshot of selection / floating state for diffing
#[derive(Debug, Clone, PartialEq)]
pub struct FloatingSnapshot {
    pub visibility: FloatingId,
    pub selection: (usize, usize),
    pub tracked: Option<(usize, usize)>,
    pub len_chars: usize,
}

impl FloatingSnapshot {
    pub fn from_model(model: &ComposerModel) -> Self {
        use crate::editable::TextBuffer;

        Self {
            visibility: model.visibility(),
            selection: model.selection.into(),
            tracked: model.selection_details().map(|d| d.range().into()),
            len_chars: model.buffer.len_chars(),
        }
    }

    /// Generate a diff description between two snapshots
    pub fn diff(&self, other: &FloatingSnapshot) -> Option<String> {
        let mut changes = Vec::new();

        if self.visibility != other.visibility {
            changes.push(format!("{:?} → {:?}", self.visibility, other.visibility));
        }
        if self.selection != other.selection {
            changes.push(format!(
                "selection ({},{}) → ({},{})",
                self.selection.0, self.selection.1, other.selection.0, other.selection.1
            ));
        }
        if self.tracked != other.tracked {
            let status = match other.tracked {
                Some((s, e)) => format!("tracking ({},{})", s, e),
                None => "tracking cleared".to_string(),
            };
            changes.push(status);
        }
        if self.len_chars != other.len_chars {
            changes.push(format!("length {} → {}", self.len_chars, other.len_chars));
        }

        if changes.is_empty() {
            None
        } else {
            Some(changes.join("; "))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snapshot(visibility: FloatingId, tracked: Option<(usize, usize)>) -> FloatingSnapshot {
        FloatingSnapshot {
            visibility,
            selection: (0, 5),
            tracked,
            len_chars: 11,
        }
    }

    #[test]
    fn test_diff_identical_is_none() {
        let a = snapshot(FloatingId::Closed, None);
        assert_eq!(a.diff(&a.clone()), None);
    }

    #[test]
    fn test_diff_reports_transition() {
        let a = snapshot(FloatingId::Closed, None);
        let b = snapshot(FloatingId::Toolbar, Some((0, 5)));
        let diff = a.diff(&b).unwrap();
        assert!(diff.contains("Closed → Toolbar"));
        assert!(diff.contains("tracking (0,5)"));
    }
}
