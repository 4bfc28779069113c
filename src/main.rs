use std::sync::Arc;

use anyhow::Result;
use teloxide::prelude::*;
use teloxide::utils::command::BotCommands;
use tracing::{error, info, warn};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use sourcing_bot::bot::{self, TelegramGateway};
use sourcing_bot::config::Config;
use sourcing_bot::events::Command;
use sourcing_bot::liveness;
use sourcing_bot::localization::MessageCatalog;
use sourcing_bot::news_store::NewsStore;
use sourcing_bot::session::SessionController;

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables from .env file
    dotenv::dotenv().ok();

    let filter = EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new("info"))?;
    tracing_subscriber::registry()
        .with(fmt::layer().with_target(true))
        .with(filter)
        .init();

    info!("Starting sourcing bot");

    let config = Config::from_env()?;
    info!(
        operator_group = %config.operator_group,
        news_file = %config.news_file.display(),
        port = config.port,
        "Configuration loaded"
    );

    let catalog = Arc::new(MessageCatalog::new()?);
    let news = Arc::new(NewsStore::new(&config.news_file));
    let bot = Bot::new(&config.bot_token);
    let gateway = Arc::new(TelegramGateway::new(bot.clone(), config.operator_group));
    let controller = Arc::new(SessionController::new(
        news,
        gateway,
        catalog,
        config.categories.clone(),
    ));

    if let Err(e) = bot.set_my_commands(Command::bot_commands()).await {
        warn!(error = %e, "Failed to register bot commands");
    }

    let port = config.port;
    let liveness_task = tokio::spawn(async move {
        if let Err(e) = liveness::serve(port).await {
            error!(error = %e, "Liveness endpoint stopped");
        }
    });

    info!("Bot initialized, starting dispatcher");

    Dispatcher::builder(bot, bot::schema())
        .dependencies(dptree::deps![controller])
        .enable_ctrlc_handler()
        .build()
        .dispatch()
        .await;

    liveness_task.abort();
    Ok(())
}
