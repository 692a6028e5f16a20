pub mod mock;
pub mod torchrun;

use std::future::Future;
use std::pin::Pin;
use std::time::Instant;

use crate::config::LauncherConfig;
use crate::error::StokeError;
use crate::ledger;
use crate::tui;

use self::torchrun::Torchrun;

/// Async trait for the external process launcher (torchrun or mock).
/// Uses boxed future for dyn compatibility.
pub trait Launcher: Send + Sync {
    /// Run the target script to completion and report the child's exit code.
    fn launch(
        &self,
        script: &str,
        extra: &[String],
    ) -> Pin<Box<dyn Future<Output = Result<i32, StokeError>> + Send + '_>>;
}

/// Launch `script` through torchrun and hand back the exit code to propagate.
pub async fn run(
    script: &str,
    extra: &[String],
    config: &LauncherConfig,
) -> Result<i32, StokeError> {
    tui::status_line(
        "⚡",
        tui::FLAME,
        &format!("{script} · {} workers", config.nproc),
    );

    let started = Instant::now();
    let launcher = Torchrun::from_config(config);
    let code = launcher.launch(script, extra).await?;

    // Ledger append is best effort; the exit code is the contract.
    let _ = ledger::append(&ledger::RunEntry {
        script,
        nproc: config.nproc,
        code,
        elapsed: started.elapsed(),
    });

    if code == 0 {
        tui::status_line(
            "█",
            tui::WHITE,
            &format!(
                "done in {}",
                tui::format_elapsed(started.elapsed().as_secs())
            ),
        );
    }

    Ok(code)
}

/// Exit code as the shell would report it: the child's own code, or 128 plus
/// the signal that killed it.
pub(crate) fn exit_code(status: std::process::ExitStatus) -> i32 {
    if let Some(code) = status.code() {
        return code;
    }
    #[cfg(unix)]
    {
        use std::os::unix::process::ExitStatusExt;
        if let Some(sig) = status.signal() {
            return 128 + sig;
        }
    }
    1
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::process::Command;

    #[test]
    fn exit_code_from_child() {
        let status = Command::new("sh").args(["-c", "exit 7"]).status().unwrap();
        assert_eq!(exit_code(status), 7);
    }

    #[test]
    fn exit_code_from_signal() {
        // SIGKILLed child reports as 128 + 9
        let status = Command::new("sh")
            .args(["-c", "kill -KILL $$"])
            .status()
            .unwrap();
        assert_eq!(exit_code(status), 137);
    }
}
