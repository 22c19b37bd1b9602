use std::process::Stdio;
use std::time::{Duration, Instant};

use anyhow::Context;
use tokio::io::AsyncWriteExt;
use tokio::process::Command;
use tokio::time::timeout;

use super::{Executor, ScratchWorkspace};
use crate::language::LanguageProfile;
use crate::outcome::ExecutionOutcome;

impl Executor {
    /// Spawns the run command and classifies how it ends
    ///
    /// stdin is fed concurrently with the wait so a submission that never
    /// reads its input cannot deadlock the pipeline. The timeout is enforced,
    /// not advisory: the child carries `kill_on_drop`, so when the bounded
    /// wait expires the process is SIGKILLed rather than asked to stop.
    pub(super) async fn run_step(
        &self,
        profile: &LanguageProfile,
        workspace: &ScratchWorkspace,
        stdin_payload: &str,
        limit: Duration,
    ) -> anyhow::Result<ExecutionOutcome> {
        let Some((program, args)) = profile.run.split_first() else {
            anyhow::bail!("empty run command for language {}", profile.name);
        };

        let mut child = Command::new(program)
            .args(args)
            .current_dir(workspace.path())
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .with_context(|| format!("failed to spawn {program:?}"))?;

        let stdin_pipe = child.stdin.take();
        let feed_stdin = async move {
            if let Some(mut stdin) = stdin_pipe {
                // EPIPE here just means the program exited without reading
                let _ = stdin.write_all(stdin_payload.as_bytes()).await;
                let _ = stdin.shutdown().await;
                // Dropping the pipe delivers EOF to programs that read to end
            }
        };

        let start = Instant::now();
        let waited = timeout(limit, async {
            let (output, ()) = tokio::join!(child.wait_with_output(), feed_stdin);
            output
        })
        .await;

        let output = match waited {
            Ok(result) => result.context("failed waiting for submission process")?,
            Err(_) => {
                // Dropping the timed-out future killed the child.
                log::debug!(
                    "{} submission exceeded the {:.2}s wall-clock limit",
                    profile.name,
                    limit.as_secs_f64(),
                );
                return Ok(ExecutionOutcome::time_limit_exceeded(limit.as_secs_f64()));
            }
        };

        let runtime = start.elapsed().as_secs_f64();
        let stdout = String::from_utf8_lossy(&output.stdout).into_owned();

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr).into_owned();
            log::debug!(
                "{} submission exited with {} after {runtime:.3}s",
                profile.name,
                output.status,
            );
            return Ok(ExecutionOutcome::runtime_error(stdout, stderr, runtime));
        }

        Ok(ExecutionOutcome::accepted(&stdout, runtime))
    }
}
