use std::sync::Arc;

use teloxide::prelude::*;

use sbb_core::{classifier::classify, filter::enforce};

use crate::router::AppState;

use super::{media_of, message_ref};

pub async fn handle_content(msg: Message, state: Arc<AppState>) -> ResponseResult<()> {
    let media = media_of(&msg);
    if media.is_empty() {
        return Ok(());
    }

    let verdict = {
        let store = state.store.lock().await;
        classify(&store, &media)
    };

    let target = message_ref(&msg);
    if let Err(e) = enforce(&verdict, target, state.messenger.as_ref()).await {
        // Usually missing "delete messages" admin rights.
        tracing::error!(
            chat_id = target.chat_id.0,
            message_id = target.message_id.0,
            "failed to delete banned message: {e}"
        );
    }

    Ok(())
}
