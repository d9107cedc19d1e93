use anyhow::{Context, Result};
use std::time::Duration;
use tracing::info;

use crate::cli::Cli;
use crate::llm::LlmClient;
use crate::model;
use crate::paths;
use crate::store::SqlitePreferenceStore;

/// Opens the preference store and creates its schema. Runs once per process.
pub fn open_store(cli: &Cli) -> Result<SqlitePreferenceStore> {
    let path = paths::database_path(cli.db.as_deref());
    let store = SqlitePreferenceStore::open(&path)
        .with_context(|| format!("failed to initialize preference store {}", path.display()))?;
    info!(path = %path.display(), "preference store opened");
    Ok(store)
}

/// Builds the generation client. A missing credential stops startup here
/// rather than at the first submission.
pub fn prepare_client(cli: &Cli) -> Result<LlmClient> {
    let selection = model::resolve_selection(cli.model.as_deref())?;
    let api_key = model::resolve_key(selection.provider, cli.key.as_deref())?;
    let client = LlmClient::new(
        selection.provider,
        api_key,
        selection.model.clone(),
        Duration::from_secs(cli.timeout_secs.max(1)),
    )?;
    info!(
        provider = selection.provider.as_str(),
        model = client.model_name(),
        "generation client ready"
    );
    Ok(client)
}
