//! Telegram update handlers.
//!
//! Commands are routed first; every other message goes through the ban
//! filter, so a command message is never classified as content.

use std::sync::Arc;

use teloxide::{prelude::*, types::Message};

use sbb_core::domain::{AnimationMedia, ChatId, MessageId, MessageMedia, MessageRef, StickerMedia};

use crate::router::AppState;
mod commands;
mod filter;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Route {
    Command,
    Content,
}

fn route_of(msg: &Message) -> Route {
    match msg.text() {
        Some(text) if text.starts_with('/') => Route::Command,
        _ => Route::Content,
    }
}

pub async fn handle_message(msg: Message, state: Arc<AppState>) -> ResponseResult<()> {
    match route_of(&msg) {
        Route::Command => commands::handle_command(msg, state).await,
        Route::Content => filter::handle_content(msg, state).await,
    }
}

/// Extract the moderation-relevant payload of a Telegram message.
pub fn media_of(msg: &Message) -> MessageMedia {
    MessageMedia {
        sticker: msg.sticker().map(|s| StickerMedia {
            pack: s.set_name.clone(),
        }),
        animation: msg.animation().map(|a| AnimationMedia {
            unique_id: a.file.unique_id.clone(),
        }),
    }
}

/// Payload of the message a command replies to; `None` when it is not a reply.
fn anchor_of(msg: &Message) -> Option<MessageMedia> {
    msg.reply_to_message().map(media_of)
}

fn message_ref(msg: &Message) -> MessageRef {
    MessageRef {
        chat_id: ChatId(msg.chat.id.0),
        message_id: MessageId(msg.id.0),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CHAT: &str = r#""chat": { "id": -1001, "type": "supergroup", "title": "group" }"#;

    fn message(id: i32, body: &str) -> Message {
        let json = format!(r#"{{ "message_id": {id}, "date": 1700000000, {CHAT}, {body} }}"#);
        serde_json::from_str(&json).unwrap()
    }

    fn sticker_body(set_name: Option<&str>) -> String {
        let set_name = set_name
            .map(|s| format!(r#", "set_name": "{s}""#))
            .unwrap_or_default();
        format!(
            r#""sticker": {{
                "file_id": "CAACAgIAAxkBAAIB",
                "file_unique_id": "AgADsticker",
                "file_size": 24000,
                "width": 512,
                "height": 512,
                "type": "regular",
                "is_animated": false,
                "is_video": false,
                "emoji": "😀"{set_name}
            }}"#
        )
    }

    const ANIMATION_BODY: &str = r#""animation": {
        "file_id": "CgACAgQAAxkBAAIC",
        "file_unique_id": "AgADgif123",
        "file_size": 120000,
        "width": 320,
        "height": 240,
        "duration": 3,
        "mime_type": "video/mp4",
        "file_name": "funny.mp4"
    }"#;

    #[test]
    fn text_messages_carry_no_media() {
        let msg = message(7, r#""text": "/banpack""#);

        assert!(media_of(&msg).is_empty());
        assert!(anchor_of(&msg).is_none());
        assert_eq!(
            message_ref(&msg),
            MessageRef {
                chat_id: ChatId(-1001),
                message_id: MessageId(7),
            }
        );
    }

    #[test]
    fn sticker_pack_name_is_extracted() {
        let msg = message(8, &sticker_body(Some("funpack")));
        assert_eq!(
            media_of(&msg),
            MessageMedia {
                sticker: Some(StickerMedia {
                    pack: Some("funpack".to_string()),
                }),
                animation: None,
            }
        );
    }

    #[test]
    fn sticker_without_pack_has_no_pack_name() {
        let media = media_of(&message(9, &sticker_body(None)));
        assert_eq!(media.sticker, Some(StickerMedia { pack: None }));
        assert_eq!(media.pack_name(), None);
        assert!(media.animation.is_none());
    }

    #[test]
    fn animation_unique_id_is_extracted() {
        let media = media_of(&message(10, ANIMATION_BODY));
        assert_eq!(
            media,
            MessageMedia {
                sticker: None,
                animation: Some(AnimationMedia {
                    unique_id: "AgADgif123".to_string(),
                }),
            }
        );
    }

    #[test]
    fn reply_anchor_comes_from_the_replied_message() {
        let body = format!(
            r#""text": "/banpack",
               "reply_to_message": {{ "message_id": 11, "date": 1700000000, {CHAT}, {} }}"#,
            sticker_body(Some("funpack"))
        );
        let msg = message(12, &body);
        let anchor = anchor_of(&msg).unwrap();
        assert_eq!(anchor.pack_name(), Some("funpack"));
        assert!(media_of(&msg).is_empty());
    }

    #[test]
    fn commands_route_before_the_filter() {
        assert_eq!(route_of(&message(13, r#""text": "/banpack""#)), Route::Command);
        assert_eq!(
            route_of(&message(14, r#""text": "/listgifs@other_bot""#)),
            Route::Command
        );
        assert_eq!(route_of(&message(15, r#""text": "hello""#)), Route::Content);
        assert_eq!(
            route_of(&message(16, &sticker_body(Some("funpack")))),
            Route::Content
        );
        assert_eq!(route_of(&message(17, ANIMATION_BODY)), Route::Content);
    }
}
