use crate::{
    classifier::{DeleteReason, Verdict},
    domain::MessageRef,
    messaging::port::MessagingPort,
    Result,
};

/// Act on a classifier verdict for a non-command message.
///
/// Returns whether a deletion was requested. Callers classify while holding
/// the store lock and call this after releasing it.
pub async fn enforce(
    verdict: &Verdict,
    msg: MessageRef,
    messenger: &dyn MessagingPort,
) -> Result<bool> {
    let Verdict::Delete(reason) = verdict else {
        return Ok(false);
    };

    match reason {
        DeleteReason::BannedPack(pack) => {
            tracing::info!(
                chat_id = msg.chat_id.0,
                message_id = msg.message_id.0,
                pack = pack.as_str(),
                "deleting message with banned sticker pack"
            );
        }
        DeleteReason::BannedGif(uid) => {
            tracing::info!(
                chat_id = msg.chat_id.0,
                message_id = msg.message_id.0,
                gif = uid.as_str(),
                "deleting message with banned gif"
            );
        }
    }

    messenger.delete_message(msg).await?;
    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ban_store::{test_support::tmp_dir, BanStore};
    use crate::classifier::classify;
    use crate::commands::{execute, Command};
    use crate::domain::{BanKind, ChatId, MessageId, MessageMedia};
    use crate::errors::Error;
    use async_trait::async_trait;
    use std::sync::Mutex;

    #[derive(Default)]
    struct FakeMessenger {
        deleted: Mutex<Vec<MessageRef>>,
        fail_deletes: bool,
    }

    impl FakeMessenger {
        fn deleted(&self) -> Vec<MessageRef> {
            self.deleted.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl MessagingPort for FakeMessenger {
        async fn send_text(
            &self,
            chat_id: ChatId,
            _text: &str,
            _reply_to: Option<MessageId>,
        ) -> Result<MessageRef> {
            Ok(MessageRef {
                chat_id,
                message_id: MessageId(1),
            })
        }

        async fn delete_message(&self, msg: MessageRef) -> Result<()> {
            if self.fail_deletes {
                return Err(Error::External("not enough rights".to_string()));
            }
            self.deleted.lock().unwrap().push(msg);
            Ok(())
        }
    }

    fn msg_ref(id: i32) -> MessageRef {
        MessageRef {
            chat_id: ChatId(-100),
            message_id: MessageId(id),
        }
    }

    #[tokio::test]
    async fn banned_pack_scenario_deletes_only_matching_stickers() {
        let dir = tmp_dir("sbb-filter-scenario");
        let mut store = BanStore::open(dir.join("packs.json"), dir.join("gifs.json"));
        let messenger = FakeMessenger::default();

        execute(
            Command::BanPack,
            Some(&MessageMedia::sticker(Some("funpack"))),
            &mut store,
        );
        assert!(store.contains(BanKind::Pack, "funpack"));

        let banned = classify(&store, &MessageMedia::sticker(Some("funpack")));
        assert!(enforce(&banned, msg_ref(10), &messenger).await.unwrap());

        let other = classify(&store, &MessageMedia::sticker(Some("otherpack")));
        assert!(!enforce(&other, msg_ref(11), &messenger).await.unwrap());

        assert_eq!(messenger.deleted(), vec![msg_ref(10)]);
        let _ = std::fs::remove_dir_all(&dir);
    }

    #[tokio::test]
    async fn allow_verdict_never_touches_messenger() {
        let messenger = FakeMessenger {
            fail_deletes: true,
            ..Default::default()
        };
        assert!(!enforce(&Verdict::Allow, msg_ref(1), &messenger)
            .await
            .unwrap());
    }

    #[tokio::test]
    async fn delete_failures_are_reported_to_caller() {
        let messenger = FakeMessenger {
            fail_deletes: true,
            ..Default::default()
        };
        let verdict = Verdict::Delete(DeleteReason::BannedGif("g".to_string()));
        let err = enforce(&verdict, msg_ref(2), &messenger).await.unwrap_err();
        assert!(matches!(err, Error::External(_)));
    }
}
