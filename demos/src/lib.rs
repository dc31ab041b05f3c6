//! qvar demo suite
//!
//! Small end-to-end programs built on the qvar crates:
//!
//! - **MaxCut**: QAOA cost on a triangle graph at fixed parameters
//! - **Time evolution**: a Hamiltonian with a Hermitian factor, decomposed
//!   into Pauli words and Trotterised
//! - **QAOA + Adam**: MaxCut on a path graph optimised with Adam, with the
//!   final output distribution drawn as a bar chart
//!
//! Settings come from [`config::DemoConfig`]; the runners in [`runners`]
//! do the work and the binaries in `bin/` only print.

pub mod config;
pub mod runners;

use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use tracing_subscriber::EnvFilter;

/// Install a `tracing` subscriber whose level follows a `-v` count.
pub fn init_logging(verbose: u8) {
    let filter = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .with_target(false)
        .init();
}

/// Create a progress bar for demo operations.
pub fn create_progress_bar(len: u64, message: &str) -> ProgressBar {
    let pb = ProgressBar::new(len);
    let style = ProgressStyle::with_template(
        "{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {msg}",
    )
    .unwrap_or_else(|_| ProgressStyle::default_bar())
    .progress_chars("#>-");
    pb.set_style(style);
    pb.set_message(message.to_string());
    pb
}

/// Print a demo header.
pub fn print_header(title: &str) {
    println!();
    println!("{}", style("═".repeat(60)).cyan());
    println!("{}", style(format!("  {title}")).cyan().bold());
    println!("{}", style("═".repeat(60)).cyan());
    println!();
}

/// Print a demo section.
pub fn print_section(title: &str) {
    println!();
    println!("{}", style(format!("▶ {title}")).green().bold());
    println!("{}", style("─".repeat(40)).dim());
}

/// Print a result line.
pub fn print_result(label: &str, value: impl std::fmt::Display) {
    println!("  {} {}", style(format!("{label}:")).dim(), value);
}

/// Print a success message.
pub fn print_success(message: &str) {
    println!("{} {}", style("✓").green().bold(), message);
}

/// Render basis-state probabilities as a horizontal bar chart.
///
/// One row per basis state, labelled with its bitstring (first wire
/// leftmost); the longest bar is `width` cells.
pub fn bar_chart(probs: &[f64], n_wires: usize, width: usize) -> String {
    let max = probs.iter().copied().fold(0.0_f64, f64::max);
    probs
        .iter()
        .enumerate()
        .map(|(i, p)| {
            let len = if max > 0.0 {
                (p / max * width as f64).round() as usize
            } else {
                0
            };
            format!(
                "  |{i:0n_wires$b}⟩ {} {p:.4}",
                style(format!("{:<width$}", "█".repeat(len))).cyan()
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}
