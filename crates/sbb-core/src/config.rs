use std::{
    env, fs,
    net::SocketAddr,
    path::{Path, PathBuf},
};

use crate::{errors::Error, Result};

const DEFAULT_PACKS_FILE: &str = "banned_packs.json";
const DEFAULT_GIFS_FILE: &str = "banned_gifs.json";
const DEFAULT_KEEPALIVE_ADDR: &str = "0.0.0.0:8080";

/// Typed configuration for the bot.
#[derive(Clone, Debug)]
pub struct Config {
    pub telegram_bot_token: String,

    // Ban list persistence
    pub banned_packs_file: PathBuf,
    pub banned_gifs_file: PathBuf,

    /// Keep-alive HTTP listener; `None` when disabled.
    pub keepalive_addr: Option<SocketAddr>,
}

impl Config {
    pub fn load() -> Result<Self> {
        load_dotenv_if_present(Path::new(".env"));

        // Required; there is no fallback token.
        let telegram_bot_token = env_str("TELEGRAM_BOT_TOKEN")
            .and_then(non_empty)
            .ok_or_else(|| {
                Error::Config("TELEGRAM_BOT_TOKEN environment variable is required".to_string())
            })?;

        let banned_packs_file = env_path("BANNED_PACKS_FILE")
            .unwrap_or_else(|| PathBuf::from(DEFAULT_PACKS_FILE));
        let banned_gifs_file =
            env_path("BANNED_GIFS_FILE").unwrap_or_else(|| PathBuf::from(DEFAULT_GIFS_FILE));

        let keepalive_addr = parse_keepalive_addr(env_str("KEEPALIVE_ADDR"))?;

        Ok(Self {
            telegram_bot_token,
            banned_packs_file,
            banned_gifs_file,
            keepalive_addr,
        })
    }
}

fn parse_keepalive_addr(v: Option<String>) -> Result<Option<SocketAddr>> {
    let raw = v
        .and_then(non_empty)
        .unwrap_or_else(|| DEFAULT_KEEPALIVE_ADDR.to_string());
    let raw = raw.trim();
    if raw.eq_ignore_ascii_case("off") {
        return Ok(None);
    }
    raw.parse::<SocketAddr>()
        .map(Some)
        .map_err(|e| Error::Config(format!("invalid KEEPALIVE_ADDR {raw:?}: {e}")))
}

fn env_str(key: &str) -> Option<String> {
    env::var(key).ok()
}

fn env_path(key: &str) -> Option<PathBuf> {
    env::var_os(key)
        .filter(|v| !v.is_empty())
        .map(PathBuf::from)
}

fn load_dotenv_if_present(path: &Path) {
    let Ok(contents) = fs::read_to_string(path) else {
        return;
    };

    for (key, val) in parse_dotenv(&contents) {
        if env::var_os(&key).is_some() {
            continue; // do not override existing env
        }
        env::set_var(key, val);
    }
}

fn parse_dotenv(contents: &str) -> Vec<(String, String)> {
    let mut out = Vec::new();
    for raw in contents.lines() {
        let line = raw.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let Some((k, v)) = line.split_once('=') else {
            continue;
        };

        let key = k.trim();
        if key.is_empty() {
            continue;
        }

        let mut val = v.trim().to_string();
        // Strip optional surrounding quotes.
        if val.len() >= 2
            && ((val.starts_with('"') && val.ends_with('"'))
                || (val.starts_with('\'') && val.ends_with('\'')))
        {
            val = val[1..val.len() - 1].to_string();
        }

        out.push((key.to_string(), val));
    }
    out
}

fn non_empty(s: String) -> Option<String> {
    if s.trim().is_empty() {
        None
    } else {
        Some(s)
    }
}
