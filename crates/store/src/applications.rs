use std::path::PathBuf;
use std::sync::{Mutex, MutexGuard};

use chrono::Utc;
use tracing::warn;

use satchel_core::{ApplicationStatus, JobApplication};

use crate::json_file;

struct Inner {
    applications: Vec<JobApplication>,
    next_id: u32,
}

/// Job applications in an append-mostly list. Ids are assigned from a
/// counter seeded at open time as max(existing id) + 1, so ids stay unique
/// across restarts.
pub struct ApplicationStore {
    path: PathBuf,
    inner: Mutex<Inner>,
}

impl ApplicationStore {
    pub fn open(path: PathBuf) -> Self {
        let applications: Vec<JobApplication> =
            json_file::read_json_or_empty(&path, "applications");
        let next_id =
            applications.iter().map(|application| application.id).max().map_or(1, |id| id + 1);
        Self { path, inner: Mutex::new(Inner { applications, next_id }) }
    }

    pub fn create(
        &self,
        company: String,
        title: String,
        status: ApplicationStatus,
    ) -> JobApplication {
        let mut inner = self.lock();
        let application = JobApplication {
            id: inner.next_id,
            company,
            title,
            status,
            date_applied: Utc::now(),
        };
        inner.next_id += 1;
        inner.applications.push(application.clone());
        self.persist(&inner.applications);
        application
    }

    pub fn get(&self, id: u32) -> Option<JobApplication> {
        self.lock().applications.iter().find(|application| application.id == id).cloned()
    }

    pub fn list(&self) -> Vec<JobApplication> {
        self.lock().applications.clone()
    }

    pub fn len(&self) -> usize {
        self.lock().applications.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().applications.is_empty()
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn persist(&self, applications: &[JobApplication]) {
        if let Err(error) = json_file::write_json_atomic(&self.path, &applications) {
            warn!(
                event_name = "store.applications.persist_failed",
                error = %error,
                "application state not persisted; disk is behind memory"
            );
        }
    }
}
