use std::process::Stdio;
use std::time::Instant;

use anyhow::{Context, bail};
use tokio::process::Command;
use tokio::time::timeout;

use super::{Executor, ScratchWorkspace};
use crate::language::LanguageProfile;
use crate::outcome::ExecutionOutcome;

impl Executor {
    /// Runs the profile's compile step, if it has one
    ///
    /// Returns `Some(outcome)` when compilation failed and the pipeline must
    /// stop without ever attempting the run step; `None` when there is
    /// nothing to compile or compilation succeeded.
    pub(super) async fn compile_step(
        &self,
        profile: &LanguageProfile,
        workspace: &ScratchWorkspace,
    ) -> anyhow::Result<Option<ExecutionOutcome>> {
        let Some(compile_argv) = &profile.compile else {
            return Ok(None);
        };
        let Some((program, args)) = compile_argv.split_first() else {
            bail!("empty compile command for language {}", profile.name);
        };

        // kill_on_drop so a compiler that hangs past the ceiling is
        // SIGKILLed when the timed-out future drops, same as the run step
        let start = Instant::now();
        let output = timeout(
            self.compile_time_limit,
            Command::new(program)
                .args(args)
                .current_dir(workspace.path())
                .stdin(Stdio::null())
                .stdout(Stdio::piped())
                .stderr(Stdio::piped())
                .kill_on_drop(true)
                .output(),
        )
        .await;

        let output = match output {
            Ok(result) => {
                result.with_context(|| format!("failed to spawn compiler {program:?}"))?
            }
            Err(_) => bail!(
                "compiler did not finish within {:.0}s",
                self.compile_time_limit.as_secs_f64()
            ),
        };

        if !output.status.success() {
            let diagnostics = String::from_utf8_lossy(&output.stderr).into_owned();
            log::debug!(
                "compilation of {} submission failed with {}",
                profile.name,
                output.status,
            );
            return Ok(Some(ExecutionOutcome::compilation_error(diagnostics)));
        }

        log::debug!(
            "compiled {} submission in {:.3}s",
            profile.name,
            start.elapsed().as_secs_f64(),
        );
        Ok(None)
    }
}
