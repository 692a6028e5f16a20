use std::io::Write;
use std::path::Path;
use std::time::Duration;

use crate::config::RUN_LEDGER;
use crate::tui;

/// One launch, as recorded in runs.log
pub struct RunEntry<'a> {
    pub script: &'a str,
    pub nproc: usize,
    pub code: i32,
    pub elapsed: Duration,
}

/// Append a run record to runs.log
pub fn append(entry: &RunEntry) -> Result<(), std::io::Error> {
    append_to(Path::new(RUN_LEDGER), entry)
}

pub fn append_to(path: &Path, entry: &RunEntry) -> Result<(), std::io::Error> {
    let mut f = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)?;

    let ts = chrono::Local::now().format("%Y-%m-%d %H:%M");
    writeln!(
        f,
        "{ts} {script} nproc:{nproc} exit:{code} took:{took}",
        script = entry.script,
        nproc = entry.nproc,
        code = entry.code,
        took = tui::format_elapsed(entry.elapsed.as_secs()),
    )?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::NamedTempFile;

    #[test]
    fn appends_one_line_per_run() {
        let f = NamedTempFile::new().unwrap();
        let entry = RunEntry {
            script: "train.py",
            nproc: 8,
            code: 0,
            elapsed: Duration::from_secs(75),
        };
        append_to(f.path(), &entry).unwrap();
        append_to(f.path(), &entry).unwrap();

        let content = std::fs::read_to_string(f.path()).unwrap();
        assert_eq!(content.lines().count(), 2);
    }

    #[test]
    fn records_script_code_and_duration() {
        let f = NamedTempFile::new().unwrap();
        append_to(
            f.path(),
            &RunEntry {
                script: "train_gpt.py",
                nproc: 4,
                code: 137,
                elapsed: Duration::from_secs(61),
            },
        )
        .unwrap();

        let content = std::fs::read_to_string(f.path()).unwrap();
        assert!(content.contains("train_gpt.py"));
        assert!(content.contains("nproc:4"));
        assert!(content.contains("exit:137"));
        assert!(content.contains("took:1m01s"));
    }
}
