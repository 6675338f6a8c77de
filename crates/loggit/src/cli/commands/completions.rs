//! Completions command

use std::path::PathBuf;

use clap::{Args, CommandFactory};
use clap_complete::Shell;
use tracing::info;

use loggit_changelog::write_atomic;

use crate::cli::{output, Cli};

/// Generate shell completions
#[derive(Debug, Args)]
pub struct CompletionsCommand {
    /// Shell to generate completions for
    #[arg(value_enum)]
    pub shell: Shell,

    /// Write the script to this file instead of stdout
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,
}

impl CompletionsCommand {
    /// Execute the completions command
    pub fn execute(&self, cli: &Cli) -> anyhow::Result<()> {
        info!(shell = %self.shell, output = ?self.output, "executing completions command");
        let script = self.script()?;

        match &self.output {
            Some(path) => {
                write_atomic(path, &script)?;
                if !cli.quiet {
                    println!("{}", output::completions_written(self.shell, path));
                }
            }
            None => print!("{}", script),
        }

        Ok(())
    }

    /// Completion script for the `loggit` command tree
    fn script(&self) -> anyhow::Result<String> {
        let mut cmd = Cli::command();
        let name = cmd.get_name().to_string();
        let mut buf = Vec::new();
        clap_complete::generate(self.shell, &mut cmd, name, &mut buf);
        Ok(String::from_utf8(buf)?)
    }
}
