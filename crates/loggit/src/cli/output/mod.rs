//! Terminal output for loggit commands
//!
//! The formatting helpers return strings so commands decide where they go
//! and tests can check them with ANSI codes stripped.

use std::fmt::Write;
use std::path::Path;

use clap_complete::Shell;
use console::style;

/// Print a failed command's error chain to stderr
pub fn error(message: &str) {
    eprintln!("{} {}", style("✗").red().bold(), message);
}

fn success_line(message: &str) -> String {
    format!("{} {}", style("✓").green().bold(), message)
}

fn path(path: &Path) -> String {
    style(path.display()).cyan().to_string()
}

/// Line reporting a written changelog
pub fn changelog_written(output: &Path, commits: usize) -> String {
    let noun = if commits == 1 { "commit" } else { "commits" };
    success_line(&format!(
        "Changelog with {} {} written to {}",
        commits,
        noun,
        path(output)
    ))
}

/// Lines reporting a new configuration file and what to run next
pub fn config_created(config: &Path) -> String {
    let mut out = success_line(&format!("Created configuration at {}", path(config)));
    out.push_str("\n\nNext steps:\n");
    let _ = writeln!(out, "  1. Edit {} to set filters and output", config.display());
    let _ = writeln!(out, "  2. Run {} to verify your setup", style("loggit validate").cyan());
    let _ = writeln!(out, "  3. Run {} to write the changelog", style("loggit changelog").cyan());
    out
}

/// Line reporting a written completion script
pub fn completions_written(shell: Shell, output: &Path) -> String {
    success_line(&format!("{} completions written to {}", shell, path(output)))
}

/// Validation report: config file, errors, warnings and the verdict
pub fn validation_report(config: Option<&Path>, errors: &[String], warnings: &[String]) -> String {
    let mut out = format!("{}\n\n", style("Validation Results").bold());

    match config {
        Some(config) => {
            let _ = writeln!(out, "  {}: {}\n", style("Config").dim(), path(config));
        }
        None => {
            let _ = writeln!(out, "  {}: {}\n", style("Config").dim(), style("defaults").dim());
        }
    }

    if !errors.is_empty() {
        let _ = writeln!(out, "{}", style("Errors:").red().bold());
        for error in errors {
            let _ = writeln!(out, "  {} {}", style("✗").red(), error);
        }
        out.push('\n');
    }

    if !warnings.is_empty() {
        let _ = writeln!(out, "{}", style("Warnings:").yellow().bold());
        for warning in warnings {
            let _ = writeln!(out, "  {} {}", style("!").yellow(), warning);
        }
        out.push('\n');
    }

    if !errors.is_empty() {
        let _ = write!(
            out,
            "{} with {} error(s)",
            style("✗ Validation failed").red().bold(),
            errors.len()
        );
    } else if warnings.is_empty() {
        out.push_str(&success_line("All checks passed"));
    } else {
        out.push_str(&success_line(&format!(
            "Validation passed with {} warning(s)",
            warnings.len()
        )));
    }

    out
}
