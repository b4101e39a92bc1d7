//! Message entry point: extracts the sender and text, the core does the rest.

use teloxide::prelude::*;

use ordering::Incoming;

use crate::ConfigParameters;

pub(crate) async fn handle_message(msg: Message, cfg: ConfigParameters) -> ResponseResult<()> {
    // Orders are a private-chat affair; group noise is ignored.
    if !msg.chat.is_private() {
        return Ok(());
    }
    let Some(from) = msg.from.as_ref() else {
        return Ok(());
    };
    let Some(text) = msg.text() else {
        return Ok(());
    };

    let incoming = Incoming {
        user_id: msg.chat.id.0,
        display_name: Some(from.first_name.clone()).filter(|name| !name.trim().is_empty()),
        text: text.to_string(),
    };

    if let Err(err) = cfg.desk.handle(incoming).await {
        tracing::error!("reply delivery failed for chat {}: {err}", msg.chat.id);
    }
    Ok(())
}
