use tokio::process::Command;

use crate::error::StokeError;
use crate::tui;

/// One device row from `nvidia-smi --query-gpu`.
#[derive(Debug, PartialEq)]
pub struct GpuStat {
    pub index: u32,
    pub name: String,
    pub memory_used_mib: u64,
    pub memory_total_mib: u64,
    pub utilization_pct: u32,
}

const QUERY: &str = "index,name,memory.used,memory.total,utilization.gpu";

/// Probe the driver and print a per-device table.
pub async fn report() -> Result<(), StokeError> {
    tui::header("GPU · device status");

    let spinner = tui::spinner("probing devices...");
    let output = Command::new("nvidia-smi")
        .arg(format!("--query-gpu={QUERY}"))
        .arg("--format=csv,noheader,nounits")
        .output()
        .await;
    spinner.finish_and_clear();

    let output = match output {
        Ok(output) => output,
        Err(e) => {
            troubleshooting();
            return Err(StokeError::GpuUnavailable(format!(
                "nvidia-smi not found: {e}"
            )));
        }
    };

    if !output.status.success() {
        troubleshooting();
        return Err(StokeError::GpuUnavailable(
            "nvidia-smi failed, no working NVIDIA driver".into(),
        ));
    }

    let stdout = String::from_utf8_lossy(&output.stdout);
    let stats = parse_query_output(&stdout)?;

    if stats.is_empty() {
        tui::status_line("▫", tui::ASH, "driver is up, no devices reported");
        return Ok(());
    }

    for gpu in &stats {
        println!(
            "  \x1b[90m[{}]\x1b[0m {}  {} {}/{} MiB  \x1b[90mutil {}%\x1b[0m",
            gpu.index,
            gpu.name,
            tui::meter(gpu.memory_used_mib, gpu.memory_total_mib, 10),
            gpu.memory_used_mib,
            gpu.memory_total_mib,
            gpu.utilization_pct,
        );
    }
    println!();

    Ok(())
}

/// Parse `csv,noheader,nounits` rows.
fn parse_query_output(s: &str) -> Result<Vec<GpuStat>, StokeError> {
    s.lines()
        .filter(|l| !l.trim().is_empty())
        .map(parse_row)
        .collect()
}

fn parse_row(line: &str) -> Result<GpuStat, StokeError> {
    let fields: Vec<&str> = line.split(',').map(str::trim).collect();
    if fields.len() != 5 {
        return Err(StokeError::GpuParse(line.to_string()));
    }
    let bad = || StokeError::GpuParse(line.to_string());
    Ok(GpuStat {
        index: fields[0].parse().map_err(|_| bad())?,
        name: fields[1].to_string(),
        memory_used_mib: fields[2].parse().map_err(|_| bad())?,
        memory_total_mib: fields[3].parse().map_err(|_| bad())?,
        utilization_pct: fields[4].parse().map_err(|_| bad())?,
    })
}

fn troubleshooting() {
    println!("  Troubleshooting steps:");
    println!("  1. Verify NVIDIA drivers are installed: nvidia-smi");
    println!("  2. Check the CUDA toolkit: nvcc --version");
    println!(
        "  3. Check CUDA_VISIBLE_DEVICES: currently {}",
        std::env::var("CUDA_VISIBLE_DEVICES").unwrap_or_else(|_| "not set".into())
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_device_rows() {
        let out = "0, NVIDIA A100-SXM4-80GB, 1024, 81920, 93\n\
                   1, NVIDIA A100-SXM4-80GB, 0, 81920, 0\n";
        let stats = parse_query_output(out).unwrap();
        assert_eq!(stats.len(), 2);
        assert_eq!(
            stats[0],
            GpuStat {
                index: 0,
                name: "NVIDIA A100-SXM4-80GB".to_string(),
                memory_used_mib: 1024,
                memory_total_mib: 81920,
                utilization_pct: 93,
            }
        );
        assert_eq!(stats[1].memory_used_mib, 0);
    }

    #[test]
    fn empty_output_is_no_devices() {
        assert!(parse_query_output("\n").unwrap().is_empty());
    }

    #[test]
    fn malformed_row_is_an_error() {
        let err = parse_query_output("0, A100, not-a-number, 81920, 5").unwrap_err();
        assert!(matches!(err, StokeError::GpuParse(_)));

        let err = parse_query_output("0, A100, 1024").unwrap_err();
        assert!(matches!(err, StokeError::GpuParse(_)));
    }
}
