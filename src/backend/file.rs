use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};

use crate::error::SnapshotError;

use super::store::KeyValueBackend;

/// Directory-backed key-value backend: one `<key>.json` file per key.
///
/// Writes go to a temp file in the same directory and are renamed into place,
/// so a reader never observes a half-written value.
#[derive(Clone, Debug)]
pub struct FileBackend {
    dir: PathBuf,
}

impl FileBackend {
    /// Open (creating if needed) a backend rooted at `dir`.
    pub fn open(dir: impl Into<PathBuf>) -> Result<Self, SnapshotError> {
        let dir = dir.into();
        fs::create_dir_all(&dir).map_err(|e| io_failure("create", &dir, e))?;
        Ok(Self { dir })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{}.json", file_stem(key)))
    }
}

/// Bytes kept verbatim in file names; everything else is percent-encoded.
const KEY_ESCAPES: &AsciiSet = &NON_ALPHANUMERIC.remove(b'-').remove(b'_');

/// Map a storage key to a file stem. Distinct keys always get distinct stems, and no
/// stem can contain a path separator.
fn file_stem(key: &str) -> String {
    utf8_percent_encode(key, KEY_ESCAPES).to_string()
}

fn io_failure(op: &str, path: &Path, err: io::Error) -> SnapshotError {
    SnapshotError::StorageFailure(format!("{} {}: {}", op, path.display(), err))
}

impl KeyValueBackend for FileBackend {
    fn get(&self, key: &str) -> Result<Option<String>, SnapshotError> {
        let path = self.path_for(key);
        match fs::read_to_string(&path) {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(io_failure("read", &path, e)),
        }
    }

    fn set(&self, key: &str, value: &str) -> Result<(), SnapshotError> {
        let final_path = self.path_for(key);
        let temp_path = self
            .dir
            .join(format!("{}.json.tmp.{}", file_stem(key), std::process::id()));

        let mut file =
            fs::File::create(&temp_path).map_err(|e| io_failure("create", &temp_path, e))?;
        file.write_all(value.as_bytes())
            .and_then(|_| file.sync_all())
            .map_err(|e| io_failure("write", &temp_path, e))?;
        drop(file);

        fs::rename(&temp_path, &final_path).map_err(|e| io_failure("rename", &final_path, e))
    }

    fn remove(&self, key: &str) -> Result<bool, SnapshotError> {
        let path = self.path_for(key);
        match fs::remove_file(&path) {
            Ok(()) => Ok(true),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(false),
            Err(e) => Err(io_failure("remove", &path, e)),
        }
    }
}
