//! `mdnotion convert` command implementation.

use std::io::{self, Write};
use std::path::PathBuf;

use clap::Args;
use mdnotion_blocks::convert;
use mdnotion_config::Config;
use mdnotion_notion::SyncConfig;

use crate::error::CliError;
use crate::output::Output;

/// Arguments for the convert command.
#[derive(Args)]
pub(crate) struct ConvertArgs {
    /// Path to the markdown file.
    markdown_file: PathBuf,

    /// Pretty-print the JSON output.
    #[arg(long)]
    pretty: bool,

    /// Path to configuration file (default: auto-discover mdnotion.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,
}

impl ConvertArgs {
    /// Execute the convert command.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or the config is invalid.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();

        let config = Config::load(self.config.as_deref(), None)?;
        let options = SyncConfig::from_config(&config).convert;

        let markdown_text = std::fs::read_to_string(&self.markdown_file)?;
        let conversion = convert(&markdown_text, &options);

        for diagnostic in &conversion.diagnostics {
            output.warning(&format!("Warning: {diagnostic}"));
        }

        let blocks = conversion.document.blocks();
        let json = if self.pretty {
            serde_json::to_string_pretty(blocks)?
        } else {
            serde_json::to_string(blocks)?
        };
        writeln!(io::stdout(), "{json}")?;

        Ok(())
    }
}
