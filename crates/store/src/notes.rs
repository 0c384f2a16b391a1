use std::fs;
use std::path::{Path, PathBuf};

use tracing::error;
use uuid::Uuid;

use satchel_core::Note;

use crate::json_file::{self, StoreError};

/// One JSON file per note under a dedicated directory. There is no shared
/// in-memory state: each operation touches exactly one file, and ids are
/// UUIDs we generated, so operations on distinct notes cannot collide.
///
/// Unlike the map-backed stores, write failures here propagate: the file
/// is the only copy of the note.
pub struct NoteStore {
    dir: PathBuf,
}

impl NoteStore {
    pub fn new(dir: PathBuf) -> Self {
        Self { dir }
    }

    /// Create the notes directory if it does not exist yet.
    pub fn ensure_dir(&self) -> Result<(), StoreError> {
        fs::create_dir_all(&self.dir)
            .map_err(|source| StoreError::Write { path: self.dir.clone(), source })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn create(&self, title: String, content: String) -> Result<Note, StoreError> {
        self.ensure_dir()?;
        let note = Note { id: Uuid::new_v4(), title, content };
        json_file::write_json_atomic(&self.note_path(note.id), &note)?;
        Ok(note)
    }

    /// Fetch a note. A missing file is `None`; a file that no longer
    /// parses is logged and also reported as absent.
    pub fn get(&self, id: Uuid) -> Option<Note> {
        match json_file::read_json(&self.note_path(id)) {
            Ok(found) => found,
            Err(err) => {
                error!(
                    event_name = "store.notes.unreadable",
                    note_id = %id,
                    error = %err,
                    "note file could not be read"
                );
                None
            }
        }
    }

    /// Rewrite an existing note. `None` when the note does not exist.
    pub fn update(
        &self,
        id: Uuid,
        title: String,
        content: String,
    ) -> Result<Option<Note>, StoreError> {
        if !self.note_path(id).exists() {
            return Ok(None);
        }
        let note = Note { id, title, content };
        json_file::write_json_atomic(&self.note_path(id), &note)?;
        Ok(Some(note))
    }

    /// Delete a note file. `false` when the note does not exist.
    pub fn delete(&self, id: Uuid) -> Result<bool, StoreError> {
        let path = self.note_path(id);
        match fs::remove_file(&path) {
            Ok(()) => Ok(true),
            Err(source) if source.kind() == std::io::ErrorKind::NotFound => Ok(false),
            Err(source) => Err(StoreError::Write { path, source }),
        }
    }

    /// Scan the directory for notes. Files that fail to read or parse are
    /// skipped with a logged error rather than failing the listing.
    pub fn list(&self) -> Vec<Note> {
        let entries = match fs::read_dir(&self.dir) {
            Ok(entries) => entries,
            Err(source) if source.kind() == std::io::ErrorKind::NotFound => return Vec::new(),
            Err(source) => {
                error!(
                    event_name = "store.notes.list_failed",
                    dir = %self.dir.display(),
                    error = %source,
                    "could not scan notes directory"
                );
                return Vec::new();
            }
        };

        let mut notes = Vec::new();
        for entry in entries.flatten() {
            let name = entry.file_name();
            let Some(id) = name
                .to_str()
                .and_then(|name| name.strip_suffix(".json"))
                .and_then(|stem| Uuid::parse_str(stem).ok())
            else {
                continue;
            };
            if let Some(note) = self.get(id) {
                notes.push(note);
            }
        }
        notes
    }

    fn note_path(&self, id: Uuid) -> PathBuf {
        self.dir.join(format!("{id}.json"))
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use tempfile::TempDir;
    use uuid::Uuid;

    use super::NoteStore;

    fn store(dir: &TempDir) -> NoteStore {
        NoteStore::new(dir.path().join("notes"))
    }

    #[test]
    fn create_writes_one_file_per_note() {
        let dir = TempDir::new().expect("tempdir");
        let store = store(&dir);

        let note = store.create("groceries".to_string(), "milk, eggs".to_string()).expect("create");

        let path = dir.path().join("notes").join(format!("{}.json", note.id));
        assert!(path.exists());
        assert_eq!(store.get(note.id), Some(note));
    }

    #[test]
    fn update_round_trips_and_missing_note_is_none() {
        let dir = TempDir::new().expect("tempdir");
        let store = store(&dir);

        let note = store.create("draft".to_string(), "v1".to_string()).expect("create");
        let updated = store
            .update(note.id, "draft".to_string(), "v2".to_string())
            .expect("update io")
            .expect("note exists");
        assert_eq!(updated.content, "v2");
        assert_eq!(store.get(note.id).map(|n| n.content), Some("v2".to_string()));

        let absent = store.update(Uuid::new_v4(), "x".to_string(), "y".to_string()).expect("io");
        assert!(absent.is_none());
    }

    #[test]
    fn delete_removes_the_file_and_reports_missing() {
        let dir = TempDir::new().expect("tempdir");
        let store = store(&dir);

        let note = store.create("t".to_string(), "c".to_string()).expect("create");
        assert!(store.delete(note.id).expect("delete"));
        assert!(store.get(note.id).is_none());
        assert!(!store.delete(note.id).expect("second delete"), "already gone");
    }

    #[test]
    fn list_skips_corrupt_and_foreign_files() {
        let dir = TempDir::new().expect("tempdir");
        let store = store(&dir);

        let kept = store.create("kept".to_string(), "c".to_string()).expect("create");
        let corrupt_id = Uuid::new_v4();
        fs::write(dir.path().join("notes").join(format!("{corrupt_id}.json")), "][")
            .expect("write corrupt");
        fs::write(dir.path().join("notes").join("README.txt"), "not a note").expect("write other");

        let notes = store.list();

        assert_eq!(notes.len(), 1);
        assert_eq!(notes[0].id, kept.id);
    }

    #[test]
    fn list_on_missing_directory_is_empty() {
        let dir = TempDir::new().expect("tempdir");
        let store = store(&dir);
        assert!(store.list().is_empty());
    }
}
