use crossterm::style::{Attribute, Color, ResetColor, SetAttribute, SetForegroundColor};
use indicatif::{ProgressBar, ProgressStyle};

// Palette (ash to white heat)
pub const ASH: Color = Color::DarkGrey;
pub const EMBER: Color = Color::Red;
pub const FLAME: Color = Color::AnsiValue(202); // orange
pub const FLARE: Color = Color::AnsiValue(226); // yellow
pub const WHITE: Color = Color::White;

pub fn hr() {
    println!(
        "{}━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━{}",
        fg(ASH),
        reset()
    );
}

pub fn header(title: &str) {
    println!();
    hr();
    println!(
        "{}{}  \u{26a1} {}{}{}",
        SetAttribute(Attribute::Bold),
        fg(WHITE),
        title,
        reset(),
        SetAttribute(Attribute::Reset),
    );
    hr();
}

pub fn status_line(icon: &str, color: Color, msg: &str) {
    println!("  {}{}{} {}", fg(color), icon, reset(), msg);
}

/// Create a spinner for long operations
pub fn spinner(msg: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .tick_chars("◐◓◑◒ ")
            .template(&format!("   {{spinner}} {msg}"))
            .unwrap(),
    );
    pb.enable_steady_tick(std::time::Duration::from_millis(150));
    pb
}

/// Create a counting bar for a known number of steps
pub fn bar(len: u64, msg: &str) -> ProgressBar {
    let pb = ProgressBar::new(len);
    pb.set_style(
        ProgressStyle::default_bar()
            .template(&format!("   {{bar:30}} {{pos}}/{{len}} {msg}"))
            .unwrap()
            .progress_chars("█▓░"),
    );
    pb
}

/// Fraction meter like [▓▓▓░░░░░░░] for memory readouts
pub fn meter(used: u64, total: u64, cells: usize) -> String {
    let filled = if total == 0 {
        0
    } else {
        (used as usize * cells) / total as usize
    };
    let filled = filled.min(cells);

    let mut out = String::from("[");
    for _ in 0..filled {
        out.push('▓');
    }
    for _ in filled..cells {
        out.push('░');
    }
    out.push(']');
    out
}

/// Format elapsed time as "Xm YYs" or "Xs"
pub fn format_elapsed(secs: u64) -> String {
    let mins = secs / 60;
    let remaining_secs = secs % 60;
    if mins > 0 {
        format!("{mins}m{remaining_secs:02}s")
    } else {
        format!("{secs}s")
    }
}

// Helper to create crossterm foreground color string
fn fg(color: Color) -> SetForegroundColor {
    SetForegroundColor(color)
}

fn reset() -> ResetColor {
    ResetColor
}
