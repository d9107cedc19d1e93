use anyhow::Result;
use tracing::info;

use crate::bootstrap;
use crate::cli::Cli;
use crate::form;
use crate::interaction::InteractionController;
use crate::output;
use crate::store::PreferenceStore;

pub async fn run(cli: Cli) -> Result<()> {
    let store = bootstrap::open_store(&cli)?;

    if cli.list_preferences {
        output::print_preferences(&store.list_all()?)?;
        return Ok(());
    }

    let client = bootstrap::prepare_client(&cli)?;
    let controller = InteractionController::new(&client, &store);

    if let Some(input) = cli.once_input() {
        let outcome = controller.submit(&input).await;
        output::print_outcome(&outcome)?;
        return outcome.status.map(|_| ()).map_err(Into::into);
    }

    form::run_interactive(&controller).await?;
    info!(path = %store.path().display(), "session finished");
    Ok(())
}
