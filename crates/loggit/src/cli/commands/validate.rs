//! Validate command

use std::path::{Path, PathBuf};

use clap::Args;
use tracing::info;

use loggit_changelog::ChangelogGenerator;
use loggit_core::config::{find_config, load_config, Config};
use loggit_git::GitRepo;

use crate::cli::output;
use crate::cli::{Cli, OutputFormat};

/// Validate configuration and repository
#[derive(Debug, Args)]
pub struct ValidateCommand {
    /// Only validate configuration file
    #[arg(long)]
    pub config_only: bool,

    /// Strict mode - treat warnings as errors
    #[arg(long)]
    pub strict: bool,
}

/// Findings of a validation run
#[derive(Debug, Default)]
struct Report {
    config_path: Option<PathBuf>,
    errors: Vec<String>,
    warnings: Vec<String>,
}

impl ValidateCommand {
    /// Execute the validate command
    pub fn execute(&self, cli: &Cli) -> anyhow::Result<()> {
        info!(
            config_only = self.config_only,
            strict = self.strict,
            "executing validate command"
        );
        let cwd = std::env::current_dir()?;
        let mut report = self.check(&cwd);

        if self.strict {
            let mut warnings = std::mem::take(&mut report.warnings);
            report.errors.append(&mut warnings);
        }

        let passed = report.errors.is_empty();

        match cli.format {
            OutputFormat::Json => {
                let output = serde_json::json!({
                    "valid": passed,
                    "config_path": report.config_path.as_ref().map(|p| p.to_string_lossy().to_string()),
                    "errors": report.errors,
                    "warnings": report.warnings
                });
                println!("{}", serde_json::to_string_pretty(&output)?);
            }
            OutputFormat::Text => {
                if !cli.quiet {
                    println!(
                        "{}",
                        output::validation_report(
                            report.config_path.as_deref(),
                            &report.errors,
                            &report.warnings
                        )
                    );
                }
            }
        }

        if !passed {
            anyhow::bail!("validation failed with {} error(s)", report.errors.len());
        }

        Ok(())
    }

    fn check(&self, cwd: &Path) -> Report {
        let mut report = Report::default();

        let config = match find_config(cwd) {
            Some(path) => {
                let loaded = load_config(&path);
                report.config_path = Some(path);
                match loaded {
                    Ok(config) => Some(config),
                    Err(e) => {
                        report.errors.push(format!("Configuration: {}", e));
                        None
                    }
                }
            }
            None => {
                report
                    .warnings
                    .push("No configuration file found, using defaults".to_string());
                Some(Config::default())
            }
        };

        let Some(config) = config else {
            return report;
        };

        let base_dir = report
            .config_path
            .as_deref()
            .and_then(Path::parent)
            .map(Path::to_path_buf)
            .unwrap_or_else(|| cwd.to_path_buf());

        if let Err(e) = ChangelogGenerator::from_config(&config, &base_dir) {
            report.errors.push(format!("Configuration: {}", e));
        }

        if !self.config_only {
            check_repository(&config, &base_dir, &mut report);
        }

        report
    }
}

fn check_repository(config: &Config, base_dir: &Path, report: &mut Report) {
    let repo = match GitRepo::open(&base_dir.join(&config.repository.path)) {
        Ok(repo) => repo,
        Err(e) => {
            report.errors.push(format!("Git repository: {}", e));
            return;
        }
    };

    match repo.is_empty() {
        Ok(true) => report
            .warnings
            .push("Repository has no commits yet".to_string()),
        Ok(false) => {}
        Err(e) => report.errors.push(format!("Git repository: {}", e)),
    }

    if let Ok(None) = repo.current_branch() {
        report
            .warnings
            .push("HEAD is detached or unborn".to_string());
    }

    if let Err(e) = repo.resolve_ref(&config.repository.reference) {
        report.errors.push(format!("Reference: {}", e));
    }
}
