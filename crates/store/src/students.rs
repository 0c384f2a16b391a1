use std::collections::BTreeMap;
use std::path::PathBuf;
use std::sync::{Mutex, MutexGuard};

use tracing::warn;

use satchel_core::{DomainError, Student};

use crate::json_file;

/// Student records keyed by lower-cased name. Same persistence policy as
/// the cart: synchronous atomic writes, failures logged and swallowed.
pub struct StudentStore {
    path: PathBuf,
    students: Mutex<BTreeMap<String, Student>>,
}

impl StudentStore {
    pub fn open(path: PathBuf) -> Self {
        let students = json_file::read_json_or_empty(&path, "students");
        Self { path, students: Mutex::new(students) }
    }

    pub fn create(&self, student: Student) -> Result<Student, DomainError> {
        let mut students = self.lock();
        let key = student.key();
        if students.contains_key(&key) {
            return Err(DomainError::duplicate("student", key));
        }
        students.insert(key, student.clone());
        self.persist(&students);
        Ok(student)
    }

    pub fn get(&self, name: &str) -> Option<Student> {
        self.lock().get(&name.to_lowercase()).cloned()
    }

    pub fn list(&self) -> Vec<Student> {
        self.lock().values().cloned().collect()
    }

    /// Replace the record stored under `name`. The caller has already
    /// checked that the payload's name matches the path name.
    pub fn update(&self, name: &str, student: Student) -> Result<Student, DomainError> {
        let mut students = self.lock();
        let key = name.to_lowercase();
        if !students.contains_key(&key) {
            return Err(DomainError::not_found("student", key));
        }
        students.insert(key, student.clone());
        self.persist(&students);
        Ok(student)
    }

    pub fn delete(&self, name: &str) -> Result<(), DomainError> {
        let mut students = self.lock();
        let key = name.to_lowercase();
        if students.remove(&key).is_none() {
            return Err(DomainError::not_found("student", key));
        }
        self.persist(&students);
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    fn lock(&self) -> MutexGuard<'_, BTreeMap<String, Student>> {
        self.students.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn persist(&self, students: &BTreeMap<String, Student>) {
        if let Err(error) = json_file::write_json_atomic(&self.path, students) {
            warn!(
                event_name = "store.students.persist_failed",
                error = %error,
                "student state not persisted; disk is behind memory"
            );
        }
    }
}
