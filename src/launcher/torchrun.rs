use std::future::Future;
use std::pin::Pin;

use tokio::process::Command;

use super::{exit_code, Launcher};
use crate::config::LauncherConfig;
use crate::error::StokeError;

/// torchrun launcher pinned to standalone single-node mode.
pub struct Torchrun {
    program: String,
    nproc: usize,
}

impl Torchrun {
    pub fn new(program: String, nproc: usize) -> Self {
        Self { program, nproc }
    }

    pub fn from_config(config: &LauncherConfig) -> Self {
        Self::new(config.program.clone(), config.nproc)
    }

    /// Launcher argv: our flags, the script, then the script's own arguments.
    fn build_args(&self, script: &str, extra: &[String]) -> Vec<String> {
        let mut args = vec![
            "--standalone".to_string(),
            format!("--nproc_per_node={}", self.nproc),
            script.to_string(),
        ];
        args.extend(extra.iter().cloned());
        args
    }

    async fn launch_impl(&self, script: &str, extra: &[String]) -> Result<i32, StokeError> {
        // stdio stays inherited: the launcher's output is the run's output
        let status = Command::new(&self.program)
            .args(self.build_args(script, extra))
            .status()
            .await
            .map_err(|e| {
                StokeError::LaunchFailed(format!("failed to spawn {}: {e}", self.program))
            })?;
        Ok(exit_code(status))
    }
}

impl Launcher for Torchrun {
    fn launch(
        &self,
        script: &str,
        extra: &[String],
    ) -> Pin<Box<dyn Future<Output = Result<i32, StokeError>> + Send + '_>> {
        let script = script.to_string();
        let extra = extra.to_vec();
        Box::pin(async move { self.launch_impl(&script, &extra).await })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::os::unix::fs::PermissionsExt;

    fn stub_launcher(dir: &std::path::Path, body: &str) -> String {
        let path = dir.join("fakerun");
        std::fs::write(&path, format!("#!/bin/sh\n{body}\n")).unwrap();
        let mut perms = std::fs::metadata(&path).unwrap().permissions();
        perms.set_mode(0o755);
        std::fs::set_permissions(&path, perms).unwrap();
        path.to_string_lossy().into_owned()
    }

    #[test]
    fn args_order() {
        let launcher = Torchrun::new("torchrun".into(), 8);
        let args = launcher.build_args("train.py", &["--lr".into(), "3e-4".into()]);
        assert_eq!(
            args,
            ["--standalone", "--nproc_per_node=8", "train.py", "--lr", "3e-4"]
        );
    }

    #[tokio::test]
    async fn propagates_success() {
        let dir = tempfile::tempdir().unwrap();
        let launcher = Torchrun::new(stub_launcher(dir.path(), "exit 0"), 8);
        assert_eq!(launcher.launch("foo.py", &[]).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn propagates_failure_code() {
        let dir = tempfile::tempdir().unwrap();
        let launcher = Torchrun::new(stub_launcher(dir.path(), "exit 137"), 8);
        assert_eq!(launcher.launch("foo.py", &[]).await.unwrap(), 137);
    }

    #[tokio::test]
    async fn spawn_failure_is_an_error() {
        let launcher = Torchrun::new("/nonexistent/launcher".into(), 8);
        assert!(matches!(
            launcher.launch("foo.py", &[]).await,
            Err(StokeError::LaunchFailed(_))
        ));
    }

    #[tokio::test]
    async fn stub_sees_flags_and_script() {
        let dir = tempfile::tempdir().unwrap();
        let argv_file = dir.path().join("argv");
        let launcher = Torchrun::new(
            stub_launcher(
                dir.path(),
                &format!("echo \"$@\" > {}", argv_file.display()),
            ),
            8,
        );
        launcher.launch("train.py", &[]).await.unwrap();
        let argv = std::fs::read_to_string(&argv_file).unwrap();
        assert_eq!(argv.trim(), "--standalone --nproc_per_node=8 train.py");
    }
}
