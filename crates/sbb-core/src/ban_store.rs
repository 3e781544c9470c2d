//! Persisted ban lists.
//!
//! Each list is kept in memory and mirrored to its own JSON file (an array of
//! strings) after every mutation. The in-memory set is authoritative: a failed
//! write is logged and never rolled back.

use std::{
    collections::BTreeSet,
    fs,
    io::ErrorKind,
    path::{Path, PathBuf},
};

use crate::{domain::BanKind, errors::Error, Result};

/// Read a ban list from disk.
///
/// Missing file means an empty list. Unreadable or malformed files are logged
/// and also degrade to an empty list.
pub fn load(path: &Path) -> BTreeSet<String> {
    let txt = match fs::read_to_string(path) {
        Ok(txt) => txt,
        Err(e) if e.kind() == ErrorKind::NotFound => return BTreeSet::new(),
        Err(e) => {
            tracing::error!(path = %path.display(), "failed to read ban list: {e}");
            return BTreeSet::new();
        }
    };

    match serde_json::from_str::<Vec<String>>(&txt) {
        Ok(items) => items.into_iter().filter(|s| !s.is_empty()).collect(),
        Err(e) => {
            tracing::error!(path = %path.display(), "failed to parse ban list: {e}");
            BTreeSet::new()
        }
    }
}

/// Overwrite `path` with the full contents of `set` as a JSON array.
///
/// Writes a sibling temp file and renames it over the target, so a crash
/// mid-write leaves the previous list intact.
pub fn persist(path: &Path, set: &BTreeSet<String>) -> Result<()> {
    let items: Vec<&str> = set.iter().map(String::as_str).collect();
    let txt = serde_json::to_string(&items)?;

    let tmp = tmp_path(path);
    fs::write(&tmp, txt).map_err(|e| Error::Persist {
        path: tmp.clone(),
        reason: e.to_string(),
    })?;
    fs::rename(&tmp, path).map_err(|e| {
        let _ = fs::remove_file(&tmp);
        Error::Persist {
            path: path.to_path_buf(),
            reason: e.to_string(),
        }
    })?;
    Ok(())
}

fn tmp_path(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_default();
    name.push(".tmp");
    path.with_file_name(name)
}

#[derive(Debug)]
struct BanList {
    path: PathBuf,
    items: BTreeSet<String>,
}

impl BanList {
    fn open(path: PathBuf) -> Self {
        let items = load(&path);
        Self { path, items }
    }

    fn save(&self, kind: BanKind) {
        if let Err(e) = persist(&self.path, &self.items) {
            tracing::error!(%kind, "ban list not saved, keeping in-memory copy: {e}");
        }
    }
}

/// Both ban lists, owned by the bot for its whole lifetime.
#[derive(Debug)]
pub struct BanStore {
    packs: BanList,
    gifs: BanList,
}

impl BanStore {
    /// Load both lists from their files (absent files start empty).
    pub fn open(packs_path: impl Into<PathBuf>, gifs_path: impl Into<PathBuf>) -> Self {
        let store = Self {
            packs: BanList::open(packs_path.into()),
            gifs: BanList::open(gifs_path.into()),
        };
        tracing::info!(
            packs = store.packs.items.len(),
            gifs = store.gifs.items.len(),
            "ban lists loaded"
        );
        store
    }

    fn list_mut(&mut self, kind: BanKind) -> &mut BanList {
        match kind {
            BanKind::Pack => &mut self.packs,
            BanKind::Gif => &mut self.gifs,
        }
    }

    fn list_ref(&self, kind: BanKind) -> &BanList {
        match kind {
            BanKind::Pack => &self.packs,
            BanKind::Gif => &self.gifs,
        }
    }

    /// Ban `item`. Returns `true` when it was not banned before.
    ///
    /// Re-banning an existing entry is a no-op.
    pub fn add(&mut self, kind: BanKind, item: &str) -> Result<bool> {
        if item.is_empty() {
            return Err(Error::InvalidItem(format!("empty {kind} id")));
        }

        let list = self.list_mut(kind);
        if !list.items.insert(item.to_string()) {
            return Ok(false);
        }
        list.save(kind);
        Ok(true)
    }

    /// Unban `item`. Returns `true` when something was removed; the file is
    /// only rewritten in that case.
    pub fn remove(&mut self, kind: BanKind, item: &str) -> bool {
        let list = self.list_mut(kind);
        if !list.items.remove(item) {
            return false;
        }
        list.save(kind);
        true
    }

    pub fn contains(&self, kind: BanKind, item: &str) -> bool {
        self.list_ref(kind).items.contains(item)
    }

    /// Sorted snapshot of a list.
    pub fn list(&self, kind: BanKind) -> Vec<String> {
        self.list_ref(kind).items.iter().cloned().collect()
    }

    pub fn len(&self, kind: BanKind) -> usize {
        self.list_ref(kind).items.len()
    }

    pub fn is_empty(&self, kind: BanKind) -> bool {
        self.list_ref(kind).items.is_empty()
    }

    #[cfg(test)]
    pub(crate) fn path(&self, kind: BanKind) -> &Path {
        &self.list_ref(kind).path
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use std::path::PathBuf;
    use std::time::{Duration, SystemTime, UNIX_EPOCH};

    /// Unique scratch directory under /tmp for a single test.
    pub fn tmp_dir(prefix: &str) -> PathBuf {
        let ts = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or(Duration::from_secs(0))
            .as_nanos();
        let pid = std::process::id();
        let dir = PathBuf::from(format!("/tmp/{prefix}-{pid}-{ts}"));
        std::fs::create_dir_all(&dir).unwrap();
        dir
    }

    /// Ids that tend to break naive serialization.
    pub fn awkward_ids() -> Vec<String> {
        vec![
            "funpack".to_string(),
            "say \"cheese\"".to_string(),
            "back\\slash\\".to_string(),
            "котики_by_stickerbot".to_string(),
            "emoji 😀🎉 pack".to_string(),
            "  padded  ".to_string(),
            " ".to_string(),
            "line\nbreak\ttab".to_string(),
            "nul\u{0}inside".to_string(),
            "[\"not\", \"an array\"]".to_string(),
            "x".repeat(10_000),
        ]
    }

    /// Arbitrary non-empty strings, any unicode scalar values.
    pub fn non_empty_id() -> impl proptest::strategy::Strategy<Value = String> {
        use proptest::prelude::*;
        proptest::collection::vec(any::<char>(), 1..48)
            .prop_map(|chars| chars.into_iter().collect::<String>())
    }
}
