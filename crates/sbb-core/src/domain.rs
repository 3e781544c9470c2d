use std::fmt;

/// Telegram chat id (numeric).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ChatId(pub i64);

/// Telegram message id (numeric).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct MessageId(pub i32);

/// A stable reference to a Telegram message.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct MessageRef {
    pub chat_id: ChatId,
    pub message_id: MessageId,
}

/// Which of the two ban lists an entry belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum BanKind {
    /// Sticker pack names (`set_name`).
    Pack,
    /// Animation unique ids (`file_unique_id`), stable across re-sends.
    Gif,
}

impl fmt::Display for BanKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BanKind::Pack => f.write_str("pack"),
            BanKind::Gif => f.write_str("gif"),
        }
    }
}

/// Sticker payload of a message.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct StickerMedia {
    /// Pack name; stickers sent outside of a pack have none.
    pub pack: Option<String>,
}

/// Animation (GIF) payload of a message.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AnimationMedia {
    pub unique_id: String,
}

/// The moderation-relevant parts of a message, extracted once by the adapter.
///
/// Classifier and command code only ever see this, never transport types.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MessageMedia {
    pub sticker: Option<StickerMedia>,
    pub animation: Option<AnimationMedia>,
}

impl MessageMedia {
    pub fn is_empty(&self) -> bool {
        self.sticker.is_none() && self.animation.is_none()
    }

    /// Non-empty pack name of the sticker, if any.
    pub fn pack_name(&self) -> Option<&str> {
        self.sticker
            .as_ref()
            .and_then(|s| s.pack.as_deref())
            .filter(|p| !p.is_empty())
    }
}

#[cfg(test)]
impl MessageMedia {
    pub(crate) fn sticker(pack: Option<&str>) -> Self {
        Self {
            sticker: Some(StickerMedia {
                pack: pack.map(str::to_string),
            }),
            animation: None,
        }
    }

    pub(crate) fn animation(unique_id: &str) -> Self {
        Self {
            sticker: None,
            animation: Some(AnimationMedia {
                unique_id: unique_id.to_string(),
            }),
        }
    }
}
