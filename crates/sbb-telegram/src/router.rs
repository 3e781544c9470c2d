use std::sync::Arc;

use teloxide::{
    dispatching::Dispatcher, dptree, error_handlers::LoggingErrorHandler, prelude::*,
};

use tokio::sync::Mutex;

use sbb_core::{ban_store::BanStore, config::Config, messaging::port::MessagingPort};

use crate::handlers;
use crate::TelegramMessenger;

#[derive(Clone)]
pub struct AppState {
    /// Our `@username`, used to ignore commands addressed to other bots.
    pub bot_username: String,
    pub store: Arc<Mutex<BanStore>>,
    pub messenger: Arc<dyn MessagingPort>,
}

/// Validate the token, then dispatch updates until shutdown.
///
/// Only the token check can fail; errors while handling updates are logged
/// and never stop the dispatcher.
pub async fn run_polling(cfg: Arc<Config>, store: BanStore) -> anyhow::Result<()> {
    let bot = Bot::new(cfg.telegram_bot_token.clone());

    let me = bot
        .get_me()
        .await
        .map_err(|e| anyhow::anyhow!("telegram rejected the bot token: {e}"))?;
    tracing::info!(username = me.username(), "bot started");

    let messenger: Arc<dyn MessagingPort> = Arc::new(TelegramMessenger::new(bot.clone()));
    let state = Arc::new(AppState {
        bot_username: me.username().to_string(),
        store: Arc::new(Mutex::new(store)),
        messenger,
    });

    let handler =
        dptree::entry().branch(Update::filter_message().endpoint(handlers::handle_message));

    Dispatcher::builder(bot, handler)
        .dependencies(dptree::deps![state])
        .default_handler(|_| async {})
        .error_handler(LoggingErrorHandler::with_custom_text(
            "an error occurred while handling an update",
        ))
        .enable_ctrlc_handler()
        .build()
        .dispatch()
        .await;

    Ok(())
}
