mod compile;
mod run;
mod workspace;

pub use workspace::ScratchWorkspace;

use std::path::PathBuf;
use std::time::Duration;

use crate::error::ExecuteError;
use crate::language::{LanguageProfile, LanguageRegistry};
use crate::outcome::ExecutionOutcome;

/// Transient input of one execution attempt
///
/// Borrowed for the duration of a single call and never persisted by the
/// core. `source` and `stdin` are opaque text; `time_limit` overrides the
/// profile default when given.
#[derive(Debug, Clone, Copy)]
pub struct ExecutionRequest<'a> {
    pub source: &'a str,
    pub language: &'a str,
    pub stdin: &'a str,
    pub time_limit: Option<f64>,
}

/// Executes untrusted submissions and classifies the results
///
/// One call compiles (if the language requires it) and runs a single source
/// text against a single stdin payload under a hard wall-clock limit,
/// producing exactly one [`ExecutionOutcome`]. The Executor is stateless
/// between calls: each call gets its own [`ScratchWorkspace`] and concurrent
/// calls never share mutable state, so a caller may serialize or parallelize
/// them freely.
///
/// Only a wall-clock timeout is enforced. Memory limits, network isolation,
/// and filesystem sandboxing beyond the scratch directory are the
/// responsibility of whatever jail the host wraps around the run commands.
/// Default ceiling on the compile subprocess, independent of the submission's
/// run limit. Compilers that hang past this are an orchestration failure, not
/// a verdict on the submission.
const COMPILE_TIME_LIMIT: Duration = Duration::from_secs(30);

pub struct Executor {
    registry: LanguageRegistry,
    scratch_root: PathBuf,
    compile_time_limit: Duration,
}

impl Executor {
    /// Creates an Executor over the built-in language registry, with scratch
    /// workspaces allocated under the system temp directory.
    pub fn new() -> Self {
        Self::with_registry(LanguageRegistry::builtin())
    }

    pub fn with_registry(registry: LanguageRegistry) -> Self {
        Self {
            registry,
            scratch_root: std::env::temp_dir(),
            compile_time_limit: COMPILE_TIME_LIMIT,
        }
    }

    /// Overrides where scratch workspaces are created.
    pub fn scratch_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.scratch_root = root.into();
        self
    }

    /// Overrides the ceiling applied to compile subprocesses.
    pub fn compile_time_limit(mut self, limit: Duration) -> Self {
        self.compile_time_limit = limit;
        self
    }

    pub fn registry(&self) -> &LanguageRegistry {
        &self.registry
    }

    /// Runs one submission against one stdin payload
    ///
    /// Expected failure modes (compile errors, crashes, timeouts, internal
    /// orchestration errors) are absorbed into the outcome's status and never
    /// surface as an `Err`. The error path is reserved for pre-flight input
    /// validation and for failure to allocate the workspace at all.
    pub async fn execute(
        &self,
        request: ExecutionRequest<'_>,
    ) -> Result<ExecutionOutcome, ExecuteError> {
        let profile = self
            .registry
            .get(request.language)
            .ok_or_else(|| ExecuteError::UnsupportedLanguage(request.language.to_string()))?;

        let limit = effective_limit(profile, request.time_limit)?;

        let workspace = ScratchWorkspace::create(&self.scratch_root).map_err(|e| {
            log::error!("failed to allocate scratch workspace: {e}");
            ExecuteError::Workspace(e)
        })?;

        log::debug!(
            "executing {} submission in {} (limit {:.2}s)",
            profile.name,
            workspace.path().display(),
            limit.as_secs_f64(),
        );

        let outcome = match self.evaluate(profile, &workspace, &request, limit).await {
            Ok(outcome) => outcome,
            Err(e) => {
                log::warn!("evaluation failed for language {}: {e:#}", profile.name);
                ExecutionOutcome::evaluation_error(format!("{e:#}"))
            }
        };

        // Workspace removal happens on drop, best-effort, on every path.
        Ok(outcome)
    }

    /// Pipeline body: write source, compile, run. Any error returned here is
    /// mapped to an Evaluation Error outcome by `execute`.
    async fn evaluate(
        &self,
        profile: &LanguageProfile,
        workspace: &ScratchWorkspace,
        request: &ExecutionRequest<'_>,
        limit: Duration,
    ) -> anyhow::Result<ExecutionOutcome> {
        let source_path = workspace.path().join(&profile.file_name);
        tokio::fs::write(&source_path, request.source).await?;

        if let Some(outcome) = self.compile_step(profile, workspace).await? {
            return Ok(outcome);
        }

        self.run_step(profile, workspace, request.stdin, limit).await
    }
}

impl Default for Executor {
    fn default() -> Self {
        Self::new()
    }
}

/// Resolves the caller-supplied limit against the profile's default and
/// ceiling. A missing limit takes the default; an oversized one is clamped.
///
/// Profile limits come from config overlays and are as untrusted as caller
/// limits: the resolved value gets the same positive-and-finite check before
/// it becomes a `Duration`.
fn effective_limit(
    profile: &LanguageProfile,
    requested: Option<f64>,
) -> Result<Duration, ExecuteError> {
    let secs = match requested {
        Some(secs) if secs <= 0.0 || !secs.is_finite() => {
            return Err(ExecuteError::InvalidTimeLimit(secs));
        }
        Some(secs) => secs.min(profile.max_time_limit.0),
        None => profile.default_time_limit.0,
    };
    if secs <= 0.0 || !secs.is_finite() {
        return Err(ExecuteError::InvalidTimeLimit(secs));
    }
    Ok(Duration::from_secs_f64(secs))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::language::Seconds;

    fn profile() -> LanguageProfile {
        LanguageProfile {
            name: "python".to_string(),
            file_name: "main.py".to_string(),
            compile: None,
            run: vec!["python3".to_string(), "main.py".to_string()],
            default_time_limit: Seconds(2.0),
            max_time_limit: Seconds(10.0),
        }
    }

    #[test]
    fn test_effective_limit_defaults_when_absent() {
        let limit = effective_limit(&profile(), None).unwrap();
        assert_eq!(limit, Duration::from_secs(2));
    }

    #[test]
    fn test_effective_limit_clamps_to_ceiling() {
        let limit = effective_limit(&profile(), Some(60.0)).unwrap();
        assert_eq!(limit, Duration::from_secs(10));
    }

    #[test]
    fn test_effective_limit_rejects_nonpositive() {
        assert!(matches!(
            effective_limit(&profile(), Some(0.0)),
            Err(ExecuteError::InvalidTimeLimit(_))
        ));
        assert!(matches!(
            effective_limit(&profile(), Some(-1.5)),
            Err(ExecuteError::InvalidTimeLimit(_))
        ));
        assert!(matches!(
            effective_limit(&profile(), Some(f64::NAN)),
            Err(ExecuteError::InvalidTimeLimit(_))
        ));
    }

    #[test]
    fn test_effective_limit_rejects_bad_profile_default() {
        let mut bad = profile();
        bad.default_time_limit = Seconds(0.0);
        assert!(matches!(
            effective_limit(&bad, None),
            Err(ExecuteError::InvalidTimeLimit(_))
        ));

        bad.default_time_limit = Seconds(f64::NAN);
        assert!(matches!(
            effective_limit(&bad, None),
            Err(ExecuteError::InvalidTimeLimit(_))
        ));
    }

    #[test]
    fn test_effective_limit_rejects_bad_profile_ceiling() {
        let mut bad = profile();
        bad.max_time_limit = Seconds(-5.0);
        assert!(matches!(
            effective_limit(&bad, Some(2.0)),
            Err(ExecuteError::InvalidTimeLimit(_))
        ));
    }
}
