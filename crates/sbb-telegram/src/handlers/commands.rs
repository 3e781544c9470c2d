use std::sync::Arc;

use teloxide::prelude::*;

use sbb_core::commands::{execute, Command, Outcome};

use crate::router::AppState;

use super::{anchor_of, message_ref};

pub async fn handle_command(msg: Message, state: Arc<AppState>) -> ResponseResult<()> {
    let Some(cmd) = msg
        .text()
        .and_then(|text| Command::parse(text, &state.bot_username))
    else {
        return Ok(());
    };

    let anchor = anchor_of(&msg);
    let reply = {
        let mut store = state.store.lock().await;
        execute(cmd, anchor.as_ref(), &mut store)
    };

    if let Outcome::Rejected(p) = reply.outcome {
        tracing::debug!(command = cmd.name(), precondition = ?p, "command rejected");
    }

    let origin = message_ref(&msg);
    if let Err(e) = state
        .messenger
        .send_text(origin.chat_id, &reply.text, Some(origin.message_id))
        .await
    {
        tracing::error!(
            command = cmd.name(),
            chat_id = origin.chat_id.0,
            "failed to send command reply: {e}"
        );
    }

    Ok(())
}
