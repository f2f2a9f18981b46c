// file: src/utils/logging.rs
// description: tracing subscriber setup and colored status banners for the CLI

use colored::*;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

pub fn init_logger(colored_output: bool, verbose: bool) {
    let level = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::new(level);

    let fmt_layer = fmt::layer()
        .with_target(false)
        .with_file(verbose)
        .with_line_number(verbose)
        .compact()
        .with_ansi(colored_output);

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .init();
}

pub fn format_success(msg: &str) -> String {
    format!("{} {}", "✓".green().bold(), msg.green())
}

pub fn format_error(msg: &str) -> String {
    format!("{} {}", "✗".red().bold(), msg.red())
}

pub fn format_warning(msg: &str) -> String {
    format!("{} {}", "⚠".yellow().bold(), msg.yellow())
}

pub fn format_info(msg: &str) -> String {
    format!("{} {}", "ℹ".blue().bold(), msg)
}

/// One-line backend banner for `status` output. "Not configured" is an
/// informational state, not an error.
pub fn format_backend_banner(backend: Option<&str>, reachable: Option<bool>) -> String {
    match (backend, reachable) {
        (None, _) => format_info("no backend configured; edits stay on this machine"),
        (Some(name), Some(true)) => format_success(&format!("{} backend connected", name)),
        (Some(name), Some(false)) => format_error(&format!("{} backend unreachable", name)),
        (Some(name), None) => format_warning(&format!("{} backend configured, not probed", name)),
    }
}
