use serde::Serialize;

/// Classification of one execution attempt against one test case
///
/// Exactly one status is produced per attempt. The serialized form keeps the
/// human-readable strings that collaborators persist and display verbatim.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Status {
    #[serde(rename = "Accepted")]
    Accepted,
    #[serde(rename = "Compilation Error")]
    CompilationError,
    #[serde(rename = "Runtime Error")]
    RuntimeError,
    #[serde(rename = "Time Limit Exceeded")]
    TimeLimitExceeded,
    #[serde(rename = "Evaluation Error")]
    EvaluationError,
}

impl std::fmt::Display for Status {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Status::Accepted => "Accepted",
            Status::CompilationError => "Compilation Error",
            Status::RuntimeError => "Runtime Error",
            Status::TimeLimitExceeded => "Time Limit Exceeded",
            Status::EvaluationError => "Evaluation Error",
        };
        f.write_str(s)
    }
}

/// Result value of one Executor call
///
/// `runtime` is wall-clock seconds and is always present: zero when the run
/// step never started (compilation failure, orchestration failure), the
/// configured limit on timeout, measured elapsed time otherwise. `stdout` and
/// `stderr` are populated only when the underlying step actually ran.
///
/// The core makes no correctness judgment; comparing `stdout` against an
/// expected answer is the caller's job.
#[derive(Debug, Clone, Serialize)]
pub struct ExecutionOutcome {
    pub status: Status,
    #[serde(rename = "output", skip_serializing_if = "Option::is_none")]
    pub stdout: Option<String>,
    #[serde(rename = "error", skip_serializing_if = "Option::is_none")]
    pub stderr: Option<String>,
    pub runtime: f64,
}

impl ExecutionOutcome {
    /// Run step exited zero within the limit; stdout is trimmed of
    /// surrounding whitespace before it is handed to the caller.
    pub fn accepted(stdout: &str, runtime: f64) -> Self {
        Self {
            status: Status::Accepted,
            stdout: Some(stdout.trim().to_string()),
            stderr: None,
            runtime,
        }
    }

    /// Compile step exited non-zero; the run step was never attempted.
    pub fn compilation_error(diagnostics: String) -> Self {
        Self {
            status: Status::CompilationError,
            stdout: None,
            stderr: Some(diagnostics),
            runtime: 0.0,
        }
    }

    /// Run step exited non-zero within the limit. Whatever the program wrote
    /// before dying is preserved untrimmed.
    pub fn runtime_error(stdout: String, stderr: String, runtime: f64) -> Self {
        Self {
            status: Status::RuntimeError,
            stdout: Some(stdout),
            stderr: Some(stderr),
            runtime,
        }
    }

    /// Run step was force-killed at the wall-clock limit. Elapsed time past
    /// the limit is not meaningful, so `runtime` reports the limit itself.
    pub fn time_limit_exceeded(limit_secs: f64) -> Self {
        Self {
            status: Status::TimeLimitExceeded,
            stdout: None,
            stderr: None,
            runtime: limit_secs,
        }
    }

    /// Unanticipated orchestration failure (workspace I/O, spawn error,
    /// compile-ceiling expiry) absorbed into an outcome instead of a fault.
    pub fn evaluation_error(diagnostic: impl std::fmt::Display) -> Self {
        Self {
            status: Status::EvaluationError,
            stdout: None,
            stderr: Some(diagnostic.to_string()),
            runtime: 0.0,
        }
    }
}
