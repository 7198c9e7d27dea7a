use std::fs;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};

use tracing::{info, warn};

use super::codec::{self, SaveMode};
use crate::error::SaveError;
use crate::game::{Roster, SavedGame};

const EXTENSION: &str = ".txt";

/// Where saved games live. The game itself never touches the filesystem; the
/// front end hands it whichever store it was configured with.
pub trait SaveStore {
    /// Write (or overwrite) the save slot for `name`
    fn save(&self, name: &str, saved: &SavedGame, roster: &Roster) -> Result<(), SaveError>;

    /// Read back the save slot for `name`
    fn load(&self, name: &str, roster: &Roster) -> Result<SavedGame, SaveError>;

    /// Delete the save slot for `name`
    fn remove(&self, name: &str) -> Result<(), SaveError>;

    /// Names of all saved games, sorted
    fn list(&self) -> Result<Vec<String>, SaveError>;
}

/// Check that a game name survives a save and load unchanged. Named saves
/// keep the name on a trimmed line of its own, so it must be a non-empty
/// single line without surrounding whitespace.
pub fn validate_name(name: &str) -> Result<(), SaveError> {
    let reason = if name.is_empty() {
        "must not be empty"
    } else if name.contains(['\n', '\r']) {
        "must be a single line"
    } else if name.trim() != name {
        "must not start or end with whitespace"
    } else {
        return Ok(());
    };
    Err(SaveError::InvalidName {
        name: name.to_string(),
        reason,
    })
}

/// Save files in one directory, named `<prefix><escaped-name>.txt`.
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
    prefix: String,
    mode: SaveMode,
}

impl FileStore {
    pub fn new(dir: impl Into<PathBuf>, prefix: impl Into<String>, mode: SaveMode) -> Self {
        FileStore {
            dir: dir.into(),
            prefix: prefix.into(),
            mode,
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Path of the save file for a game name
    pub fn path_for(&self, name: &str) -> PathBuf {
        self.dir
            .join(format!("{}{}{}", self.prefix, escape(name), EXTENSION))
    }

    /// Game name stored in a file: its first line for named saves, otherwise
    /// recovered from the file name.
    fn name_of(&self, path: &Path, file_name: &str) -> Option<String> {
        match self.mode {
            SaveMode::Named => {
                let file = fs::File::open(path).ok()?;
                let mut first = String::new();
                BufReader::new(file).read_line(&mut first).ok()?;
                let first = first.trim();
                (!first.is_empty()).then(|| first.to_string())
            }
            SaveMode::Anonymous => file_name
                .strip_prefix(&self.prefix)?
                .strip_suffix(EXTENSION)
                .and_then(unescape),
        }
    }
}

impl SaveStore for FileStore {
    fn save(&self, name: &str, saved: &SavedGame, roster: &Roster) -> Result<(), SaveError> {
        validate_name(name)?;
        let mut saved = saved.clone();
        saved.name = Some(name.to_string());
        let text = codec::encode(&saved, roster, self.mode);

        fs::create_dir_all(&self.dir)?;
        let path = self.path_for(name);
        let tmp = path.with_extension("txt.tmp");
        fs::write(&tmp, text)?;
        fs::rename(&tmp, &path)?;

        info!(game = name, path = %path.display(), "game saved");
        Ok(())
    }

    fn load(&self, name: &str, roster: &Roster) -> Result<SavedGame, SaveError> {
        let path = self.path_for(name);
        let text = match fs::read_to_string(&path) {
            Ok(text) => text,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(SaveError::NotFound(name.to_string()))
            }
            Err(e) => return Err(e.into()),
        };

        let mut saved = codec::decode(&text, roster, self.mode).inspect_err(|e| {
            warn!(game = name, path = %path.display(), error = %e, "failed to load game");
        })?;
        saved.name.get_or_insert_with(|| name.to_string());

        info!(game = name, path = %path.display(), "game loaded");
        Ok(saved)
    }

    fn remove(&self, name: &str) -> Result<(), SaveError> {
        let path = self.path_for(name);
        match fs::remove_file(&path) {
            Ok(()) => {
                info!(game = name, path = %path.display(), "saved game removed");
                Ok(())
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                Err(SaveError::NotFound(name.to_string()))
            }
            Err(e) => Err(e.into()),
        }
    }

    fn list(&self) -> Result<Vec<String>, SaveError> {
        let entries = match fs::read_dir(&self.dir) {
            Ok(entries) => entries,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };

        let mut names = Vec::new();
        for entry in entries {
            let entry = entry?;
            let file_name = entry.file_name();
            let Some(file_name) = file_name.to_str() else {
                continue;
            };
            if !file_name.starts_with(&self.prefix) || !file_name.ends_with(EXTENSION) {
                continue;
            }
            match self.name_of(&entry.path(), file_name) {
                Some(name) => names.push(name),
                None => warn!(file = file_name, "skipping unreadable save file"),
            }
        }
        names.sort();
        Ok(names)
    }
}

/// Make a game name safe for use in a file name. ASCII letters, digits, `-`
/// and `_` pass through; every other byte becomes `%XX`.
fn escape(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    for byte in name.bytes() {
        if byte.is_ascii_alphanumeric() || byte == b'-' || byte == b'_' {
            out.push(byte as char);
        } else {
            out.push_str(&format!("%{byte:02X}"));
        }
    }
    out
}

fn unescape(escaped: &str) -> Option<String> {
    let mut bytes = Vec::with_capacity(escaped.len());
    let mut rest = escaped.as_bytes();
    while let Some((&byte, tail)) = rest.split_first() {
        if byte == b'%' {
            let hex = std::str::from_utf8(tail.get(..2)?).ok()?;
            bytes.push(u8::from_str_radix(hex, 16).ok()?);
            rest = &tail[2..];
        } else {
            bytes.push(byte);
            rest = tail;
        }
    }
    String::from_utf8(bytes).ok()
}
