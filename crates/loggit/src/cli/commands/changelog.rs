//! Changelog command

use std::path::{Path, PathBuf};

use clap::Args;
use serde::Serialize;
use tracing::info;

use loggit_changelog::ChangelogGenerator;
use loggit_core::config::{load_config_or_default, validation::validate_config, Config};
use loggit_core::OutputFormat as RenderFormat;
use loggit_git::GitRepo;

use crate::cli::output;
use crate::cli::{Cli, OutputFormat};

/// Generate the changelog from commit history
#[derive(Debug, Args)]
pub struct ChangelogCommand {
    /// Reference to start from (default: HEAD)
    #[arg(long = "ref", value_name = "REF")]
    pub reference: Option<String>,

    /// Maximum number of commits
    #[arg(short = 'n', long, allow_hyphen_values = true)]
    pub limit: Option<i64>,

    /// Keep only commits newer than the commit with this tag
    #[arg(long, value_name = "TAG")]
    pub start_tag: Option<String>,

    /// Keep the commit with this tag and everything older
    #[arg(long, value_name = "TAG")]
    pub end_tag: Option<String>,

    /// Keep commits whose message matches this regex
    #[arg(long, value_name = "REGEX")]
    pub include: Option<String>,

    /// Flags for --include (i, m, s, x)
    #[arg(long, value_name = "FLAGS")]
    pub include_flags: Option<String>,

    /// Drop commits whose message matches this regex
    #[arg(long, value_name = "REGEX")]
    pub exclude: Option<String>,

    /// Flags for --exclude (i, m, s, x)
    #[arg(long, value_name = "FLAGS")]
    pub exclude_flags: Option<String>,

    /// Rendering: raw, digest or custom
    #[arg(long, value_name = "FORMAT")]
    pub render: Option<RenderFormat>,

    /// Template file for the custom rendering
    #[arg(long, value_name = "FILE")]
    pub template: Option<PathBuf>,

    /// Output file (defaults to the configured file)
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Print to stdout instead of writing a file
    #[arg(long, conflicts_with = "output")]
    pub stdout: bool,
}

/// Result of a changelog run
#[derive(Debug, Serialize)]
struct Summary {
    /// File written, `None` when printing to stdout
    output: Option<PathBuf>,
    /// Number of commits in the changelog
    commits: usize,
    #[serde(skip)]
    text: Option<String>,
}

impl ChangelogCommand {
    /// Execute the changelog command
    pub fn execute(&self, cli: &Cli) -> anyhow::Result<()> {
        info!(
            reference = ?self.reference,
            stdout = self.stdout,
            "executing changelog command"
        );
        let cwd = std::env::current_dir()?;
        let summary = self.run(&cwd)?;

        if let Some(text) = &summary.text {
            print!("{}", text);
            return Ok(());
        }

        match cli.format {
            OutputFormat::Json => {
                println!("{}", serde_json::to_string_pretty(&summary)?);
            }
            OutputFormat::Text => {
                if !cli.quiet {
                    if let Some(path) = &summary.output {
                        println!("{}", output::changelog_written(path, summary.commits));
                    }
                }
            }
        }

        Ok(())
    }

    fn run(&self, cwd: &Path) -> anyhow::Result<Summary> {
        let (mut config, config_path) = load_config_or_default(cwd)?;
        let base_dir = config_path
            .as_deref()
            .and_then(Path::parent)
            .map(Path::to_path_buf)
            .unwrap_or_else(|| cwd.to_path_buf());

        self.apply_overrides(&mut config, cwd);
        validate_config(&config)?;

        let repo = GitRepo::open(&base_dir.join(&config.repository.path))?;
        let generator = ChangelogGenerator::from_config(&config, &base_dir)?;
        let reference = config.repository.reference.as_str();

        if self.stdout {
            let (doc, text) = generator.generate_rendered(&repo, reference)?;
            return Ok(Summary {
                output: None,
                commits: doc.len(),
                text: Some(text),
            });
        }

        let output_path = base_dir.join(&config.output.file);
        let doc = generator.run(&repo, reference, &output_path)?;
        Ok(Summary {
            output: Some(output_path),
            commits: doc.len(),
            text: None,
        })
    }

    /// Layer command line values over the loaded configuration
    fn apply_overrides(&self, config: &mut Config, cwd: &Path) {
        if let Some(reference) = &self.reference {
            config.repository.reference = reference.clone();
        }

        let filter = &mut config.filter;
        if self.limit.is_some() {
            filter.limit = self.limit;
        }
        if self.start_tag.is_some() {
            filter.start_tag = self.start_tag.clone();
        }
        if self.end_tag.is_some() {
            filter.end_tag = self.end_tag.clone();
        }
        if let Some(include) = &self.include {
            filter.include = include.clone();
        }
        if let Some(flags) = &self.include_flags {
            filter.include_flags = flags.clone();
        }
        if self.exclude.is_some() {
            filter.exclude = self.exclude.clone();
        }
        if let Some(flags) = &self.exclude_flags {
            filter.exclude_flags = flags.clone();
        }

        if let Some(format) = self.render {
            config.output.format = format;
        }
        if let Some(template) = &self.template {
            config.output.template = Some(cwd.join(template));
            if self.render.is_none() {
                config.output.format = RenderFormat::Custom;
            }
        }
        if let Some(path) = &self.output {
            config.output.file = cwd.join(path);
        }
    }
}
