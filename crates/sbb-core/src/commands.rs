//! Administrative commands over the ban lists.
//!
//! Ban/unban commands take their subject from the anchor: the message the
//! command replies to. The adapter extracts it; nothing here talks to Telegram.

use crate::{
    ban_store::BanStore,
    domain::{BanKind, MessageMedia},
    Result,
};

const HELP_TEXT: &str = "Привет! Я бот для блокировки стикеров и гифок в групповых чатах.\n\n\
Доступные команды:\n\
/banpack - Заблокировать стикерпак (ответьте на стикер)\n\
/unbanpack - Разблокировать стикерпак (ответьте на стикер)\n\
/listpacks - Показать список заблокированных стикерпаков\n\
/bangif - Заблокировать гифку (ответьте на гифку)\n\
/unbangif - Разблокировать гифку (ответьте на гифку)\n\
/listgifs - Показать список заблокированных гифок\n\
/help - Показать эту справку";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Command {
    Start,
    Help,
    BanPack,
    UnbanPack,
    ListPacks,
    BanGif,
    UnbanGif,
    ListGifs,
}

impl Command {
    /// Parse `/cmd`, `/cmd@botname` and `/cmd args...`. Arguments are ignored.
    ///
    /// A command addressed to another bot (`@suffix` not matching
    /// `bot_username`, case-insensitive) is not ours and yields `None`.
    pub fn parse(text: &str, bot_username: &str) -> Option<Self> {
        let first = text.split_whitespace().next()?;
        let body = first.strip_prefix('/')?;
        let (name, target) = match body.split_once('@') {
            Some((name, target)) => (name, Some(target)),
            None => (body, None),
        };
        if let Some(target) = target {
            if !target.eq_ignore_ascii_case(bot_username.trim_start_matches('@')) {
                return None;
            }
        }
        let name = name.to_lowercase();

        let cmd = match name.as_str() {
            "start" => Command::Start,
            "help" => Command::Help,
            "banpack" => Command::BanPack,
            "unbanpack" => Command::UnbanPack,
            "listpacks" => Command::ListPacks,
            "bangif" => Command::BanGif,
            "unbangif" => Command::UnbanGif,
            "listgifs" => Command::ListGifs,
            _ => return None,
        };
        Some(cmd)
    }

    pub fn name(self) -> &'static str {
        match self {
            Command::Start => "start",
            Command::Help => "help",
            Command::BanPack => "banpack",
            Command::UnbanPack => "unbanpack",
            Command::ListPacks => "listpacks",
            Command::BanGif => "bangif",
            Command::UnbanGif => "unbangif",
            Command::ListGifs => "listgifs",
        }
    }

    /// Generic reply when a command fails internally.
    fn failure_text(self) -> &'static str {
        match self {
            Command::Start | Command::Help => "Произошла ошибка.",
            Command::BanPack => "Произошла ошибка при блокировке стикерпака.",
            Command::UnbanPack => "Произошла ошибка при разблокировке стикерпака.",
            Command::ListPacks => "Произошла ошибка при получении списка заблокированных паков.",
            Command::BanGif => "Произошла ошибка при блокировке гифки.",
            Command::UnbanGif => "Произошла ошибка при разблокировке гифки.",
            Command::ListGifs => "Произошла ошибка при получении списка заблокированных гифок.",
        }
    }
}

/// Anchor requirement that a ban/unban command did not meet.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Precondition {
    NotAReply,
    NotASticker,
    NoPackName,
    NotAGif,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Verb {
    Ban,
    Unban,
}

impl Verb {
    fn infinitive(self) -> &'static str {
        match self {
            Verb::Ban => "заблокировать",
            Verb::Unban => "разблокировать",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Outcome {
    /// Help text or a list.
    Info,
    Banned,
    Unbanned,
    NotBanned,
    Rejected(Precondition),
    Failed,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Reply {
    pub text: String,
    pub outcome: Outcome,
}

impl Reply {
    fn new(outcome: Outcome, text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            outcome,
        }
    }

    fn rejected(p: Precondition, kind: BanKind, verb: Verb) -> Self {
        Self::new(Outcome::Rejected(p), precondition_text(p, kind, verb))
    }
}

/// Run a command against the store. Never fails: internal errors are logged
/// and answered with the command's generic error text.
pub fn execute(cmd: Command, anchor: Option<&MessageMedia>, store: &mut BanStore) -> Reply {
    match run(cmd, anchor, store) {
        Ok(reply) => reply,
        Err(e) => {
            tracing::error!(command = cmd.name(), "command failed: {e}");
            Reply::new(Outcome::Failed, cmd.failure_text())
        }
    }
}

fn run(cmd: Command, anchor: Option<&MessageMedia>, store: &mut BanStore) -> Result<Reply> {
    match cmd {
        Command::Start | Command::Help => Ok(Reply::new(Outcome::Info, HELP_TEXT)),

        Command::BanPack => {
            let pack = match pack_of(anchor) {
                Ok(pack) => pack,
                Err(p) => return Ok(Reply::rejected(p, BanKind::Pack, Verb::Ban)),
            };
            store.add(BanKind::Pack, pack)?;
            tracing::info!(pack, "sticker pack banned");
            Ok(Reply::new(
                Outcome::Banned,
                format!("Стикерпак \"{pack}\" заблокирован."),
            ))
        }

        Command::UnbanPack => {
            let pack = match pack_of(anchor) {
                Ok(pack) => pack,
                Err(p) => return Ok(Reply::rejected(p, BanKind::Pack, Verb::Unban)),
            };
            if !store.remove(BanKind::Pack, pack) {
                return Ok(Reply::new(
                    Outcome::NotBanned,
                    "Этот пак не был заблокирован.",
                ));
            }
            tracing::info!(pack, "sticker pack unbanned");
            Ok(Reply::new(
                Outcome::Unbanned,
                format!("Стикерпак \"{pack}\" разблокирован."),
            ))
        }

        Command::ListPacks => Ok(Reply::new(
            Outcome::Info,
            format_list(
                &store.list(BanKind::Pack),
                "Заблокированные паки:",
                "Нет заблокированных стикерпаков.",
            ),
        )),

        Command::BanGif => {
            let uid = match gif_of(anchor) {
                Ok(uid) => uid,
                Err(p) => return Ok(Reply::rejected(p, BanKind::Gif, Verb::Ban)),
            };
            store.add(BanKind::Gif, uid)?;
            tracing::info!(gif = uid, "gif banned");
            Ok(Reply::new(Outcome::Banned, "Гифка заблокирована."))
        }

        Command::UnbanGif => {
            let uid = match gif_of(anchor) {
                Ok(uid) => uid,
                Err(p) => return Ok(Reply::rejected(p, BanKind::Gif, Verb::Unban)),
            };
            if !store.remove(BanKind::Gif, uid) {
                return Ok(Reply::new(
                    Outcome::NotBanned,
                    "Эта гифка не была заблокирована.",
                ));
            }
            tracing::info!(gif = uid, "gif unbanned");
            Ok(Reply::new(Outcome::Unbanned, "Гифка разблокирована."))
        }

        Command::ListGifs => Ok(Reply::new(
            Outcome::Info,
            format_list(
                &store.list(BanKind::Gif),
                "Заблокированные гифки (ID):",
                "Нет заблокированных гифок.",
            ),
        )),
    }
}

fn pack_of(anchor: Option<&MessageMedia>) -> std::result::Result<&str, Precondition> {
    let anchor = anchor.ok_or(Precondition::NotAReply)?;
    if anchor.sticker.is_none() {
        return Err(Precondition::NotASticker);
    }
    anchor.pack_name().ok_or(Precondition::NoPackName)
}

fn gif_of(anchor: Option<&MessageMedia>) -> std::result::Result<&str, Precondition> {
    let anchor = anchor.ok_or(Precondition::NotAReply)?;
    anchor
        .animation
        .as_ref()
        .map(|a| a.unique_id.as_str())
        .ok_or(Precondition::NotAGif)
}

fn precondition_text(p: Precondition, kind: BanKind, verb: Verb) -> String {
    let verb = verb.infinitive();
    match (p, kind) {
        (Precondition::NotAReply, BanKind::Pack) => {
            format!("Ответь на стикер, который хочешь {verb}.")
        }
        (Precondition::NotAReply, BanKind::Gif) => {
            format!("Ответь на гифку, которую хочешь {verb}.")
        }
        (Precondition::NotASticker, _) => {
            format!("Это не стикер. Ответь на стикер, который хочешь {verb}.")
        }
        (Precondition::NoPackName, _) => "У стикера нет названия пака.".to_string(),
        (Precondition::NotAGif, _) => {
            format!("Это не гифка. Ответь на гифку, которую хочешь {verb}.")
        }
    }
}

fn format_list(items: &[String], header: &str, empty: &str) -> String {
    if items.is_empty() {
        return empty.to_string();
    }
    let mut out = header.to_string();
    for item in items {
        out.push_str("\n• ");
        out.push_str(item);
    }
    out
}
