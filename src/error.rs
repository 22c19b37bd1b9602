use thiserror::Error;

/// Hard failures the Executor reports to its caller instead of producing an
/// [`ExecutionOutcome`](crate::ExecutionOutcome)
///
/// Unsupported languages and nonsensical limits are caller-input-validation
/// failures and are rejected before any filesystem or process activity.
/// Workspace allocation is the one mid-pipeline condition severe enough to
/// propagate, since without a workspace no outcome can be constructed.
#[derive(Debug, Error)]
pub enum ExecuteError {
    #[error("unsupported language: {0}")]
    UnsupportedLanguage(String),

    #[error("time limit must be positive, got {0}")]
    InvalidTimeLimit(f64),

    #[error("failed to allocate scratch workspace")]
    Workspace(#[source] std::io::Error),
}
