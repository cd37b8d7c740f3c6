//! Warning reporting handed explicitly to operations that need it

/// Sink for non-fatal diagnostics
pub trait Reporter {
    fn warn(&self, message: &str);
}

/// Forwards warnings to the `log` facade
#[derive(Debug, Clone, Copy, Default)]
pub struct LogReporter;

impl Reporter for LogReporter {
    fn warn(&self, message: &str) {
        log::warn!("{message}");
    }
}
