use crate::{
    ban_store::BanStore,
    domain::{BanKind, MessageMedia},
};

/// Why a message has to go.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DeleteReason {
    BannedPack(String),
    BannedGif(String),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Verdict {
    Allow,
    Delete(DeleteReason),
}

/// Decide whether a message breaks a ban. Stickers are checked before
/// animations; the first match wins.
pub fn classify(store: &BanStore, media: &MessageMedia) -> Verdict {
    if media.is_empty() {
        return Verdict::Allow;
    }

    if let Some(pack) = media.pack_name() {
        if store.contains(BanKind::Pack, pack) {
            return Verdict::Delete(DeleteReason::BannedPack(pack.to_string()));
        }
    }

    if let Some(anim) = &media.animation {
        if store.contains(BanKind::Gif, &anim.unique_id) {
            return Verdict::Delete(DeleteReason::BannedGif(anim.unique_id.clone()));
        }
    }

    Verdict::Allow
}
