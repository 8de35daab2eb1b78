//! `mdnotion sync` command implementation.

use std::path::{Path, PathBuf};

use clap::Args;
use mdnotion_config::{CliSettings, Config};
use mdnotion_notion::{
    DocumentOutcome, DryRunResult, NotionClient, PageSyncer, SyncConfig, SyncResult,
    title_from_path,
};
use tracing::debug;

use crate::error::CliError;
use crate::output::{Output, error_chain};

/// Arguments for the sync command.
#[derive(Args)]
pub(crate) struct SyncArgs {
    /// Markdown files to upload.
    #[arg(required = true)]
    files: Vec<PathBuf>,

    /// Parent page ID (auto-searched from the file title if not provided).
    #[arg(short, long = "parent", visible_alias = "parent-id")]
    parent: Option<String>,

    /// Preview the upload plan without calling Notion.
    #[arg(long)]
    dry_run: bool,

    /// Notion integration token.
    #[arg(long, env = "NOTION_TOKEN", hide_env_values = true)]
    token: Option<String>,

    /// Notion API base URL (overrides config).
    #[arg(long)]
    endpoint: Option<String>,

    /// Blocks per append request, at most 100 (overrides config).
    #[arg(long)]
    batch_size: Option<usize>,

    /// Path to configuration file (default: auto-discover mdnotion.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,
}

impl SyncArgs {
    /// Execute the sync command.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration is invalid or any document failed.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();

        let cli_settings = CliSettings {
            token: self.token.clone(),
            endpoint: self.endpoint.clone(),
            parent_id: self.parent.clone(),
            batch_size: self.batch_size,
        };
        let config = Config::load(self.config.as_deref(), Some(&cli_settings))?;
        if let Some(path) = &config.config_path {
            debug!("Loaded configuration from {}", path.display());
        }
        let sync_config = SyncConfig::from_config(&config);

        output.info(&format!("Syncing {} file(s) to Notion...", self.files.len()));
        match &sync_config.parent_id {
            Some(parent_id) => output.info(&format!("Parent page ID: {parent_id}")),
            None => output.info("Parent page: auto-detect from file title"),
        }

        if self.dry_run {
            let client = NotionClient::from_config(&config.notion, &config.upload);
            let syncer = PageSyncer::new(&client, sync_config);
            return self.dry_run(&output, &syncer);
        }

        let notion = config.require_notion()?;
        let client = NotionClient::from_config(notion, &config.upload);
        let syncer = PageSyncer::new(&client, sync_config);

        let outcomes = syncer.sync_all(&self.files, None);
        let failed = outcomes.iter().filter(|o| o.result.is_err()).count();
        for outcome in &outcomes {
            print_outcome(&output, outcome);
        }

        if failed > 0 {
            return Err(CliError::Incomplete {
                failed,
                total: outcomes.len(),
            });
        }
        output.success(&format!("\nSynced {} file(s).", outcomes.len()));
        Ok(())
    }

    fn dry_run(&self, output: &Output, syncer: &PageSyncer<'_, NotionClient>) -> Result<(), CliError> {
        output.highlight("\n[DRY RUN] No changes made.");

        let mut failed = 0;
        for path in &self.files {
            match std::fs::read_to_string(path) {
                Ok(markdown_text) => {
                    let result = syncer.dry_run(&title_from_path(path), &markdown_text);
                    print_dry_run_result(output, path, &result);
                }
                Err(err) => {
                    failed += 1;
                    output.error(&format!("\n✗ {}: {err}", path.display()));
                }
            }
        }

        if failed > 0 {
            return Err(CliError::Incomplete {
                failed,
                total: self.files.len(),
            });
        }
        Ok(())
    }
}

fn print_outcome(output: &Output, outcome: &DocumentOutcome) {
    output.info(&format!("\nProcessing: {}", outcome.path.display()));
    match &outcome.result {
        Ok(result) => print_sync_result(output, result),
        Err(err) => output.error(&format!("  ✗ {}", error_chain(err))),
    }
}

fn print_sync_result(output: &Output, result: &SyncResult) {
    output.success(&format!(
        "  ✓ Uploaded {} block(s) in {} request(s)",
        result.block_count, result.chunk_count
    ));
    output.info(&format!("  Title: {}", result.title));
    output.info(&format!("  URL: {}", result.url));
    for diagnostic in &result.diagnostics {
        output.warning(&format!("  Warning: {diagnostic}"));
    }
}

fn print_dry_run_result(output: &Output, path: &Path, result: &DryRunResult) {
    output.info(&format!("\n{}", path.display()));
    output.info(&format!("  Title: {}", result.title));
    output.info(&format!("  Blocks: {}", result.block_count));
    for (index, chunk) in result.chunks.iter().enumerate() {
        output.info(&format!(
            "  Request {}: blocks {}-{}",
            index + 1,
            chunk.start + 1,
            chunk.end
        ));
    }
    for diagnostic in &result.diagnostics {
        output.warning(&format!("  Warning: {diagnostic}"));
    }
}
