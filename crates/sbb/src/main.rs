use std::{process::ExitCode, sync::Arc};

use sbb_core::{ban_store::BanStore, config::Config};

mod keepalive;

#[tokio::main]
async fn main() -> ExitCode {
    if let Err(e) = sbb_core::logging::init("sbb") {
        eprintln!("{e}");
        return ExitCode::FAILURE;
    }

    let cfg = match Config::load() {
        Ok(cfg) => Arc::new(cfg),
        Err(e) => {
            tracing::error!("failed to start the bot: {e}");
            return ExitCode::FAILURE;
        }
    };

    let store = BanStore::open(&cfg.banned_packs_file, &cfg.banned_gifs_file);

    if let Some(addr) = cfg.keepalive_addr {
        tokio::spawn(keepalive::serve(addr));
    }

    if let Err(e) = sbb_telegram::router::run_polling(cfg, store).await {
        tracing::error!("failed to start the bot: {e}");
        return ExitCode::FAILURE;
    }

    ExitCode::SUCCESS
}
