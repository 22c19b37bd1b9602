use std::io;
use std::path::Path;

use chrono::Local;
use tempfile::TempDir;

/// Ephemeral directory holding one execution's source file and artifacts
///
/// The name combines a timestamp with a random suffix, so concurrent
/// executions never collide without any cross-call coordination. The
/// directory and everything in it is removed when the workspace is dropped;
/// removal failures are swallowed, since a leaked temp directory must never
/// crash or block the caller.
pub struct ScratchWorkspace {
    dir: TempDir,
}

impl ScratchWorkspace {
    pub fn create(root: &Path) -> io::Result<Self> {
        let prefix = Local::now().format("judge-%y%m%d-%H%M%S-").to_string();
        let dir = tempfile::Builder::new().prefix(&prefix).tempdir_in(root)?;
        log::debug!("scratch workspace created at {}", dir.path().display());
        Ok(Self { dir })
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }
}
