use std::collections::BTreeMap;
use std::sync::{Mutex, MutexGuard};

use satchel_core::{Contact, DomainError};

struct Inner {
    contacts: BTreeMap<u32, Contact>,
    next_id: u32,
}

/// Contacts live in memory only; state is intentionally lost on shutdown.
pub struct ContactStore {
    inner: Mutex<Inner>,
}

impl Default for ContactStore {
    fn default() -> Self {
        Self::new()
    }
}

impl ContactStore {
    pub fn new() -> Self {
        Self { inner: Mutex::new(Inner { contacts: BTreeMap::new(), next_id: 1 }) }
    }

    pub fn create(&self, name: String, email: String) -> Contact {
        let mut inner = self.lock();
        let contact = Contact { id: inner.next_id, name, email };
        inner.next_id += 1;
        inner.contacts.insert(contact.id, contact.clone());
        contact
    }

    pub fn get(&self, id: u32) -> Option<Contact> {
        self.lock().contacts.get(&id).cloned()
    }

    pub fn update(&self, id: u32, name: String, email: String) -> Result<Contact, DomainError> {
        let mut inner = self.lock();
        match inner.contacts.get_mut(&id) {
            Some(contact) => {
                contact.name = name;
                contact.email = email;
                Ok(contact.clone())
            }
            None => Err(DomainError::not_found("contact", id.to_string())),
        }
    }

    pub fn delete(&self, id: u32) -> Result<(), DomainError> {
        let mut inner = self.lock();
        if inner.contacts.remove(&id).is_none() {
            return Err(DomainError::not_found("contact", id.to_string()));
        }
        Ok(())
    }

    /// Case-insensitive substring match over contact names.
    pub fn search(&self, query: &str) -> Vec<Contact> {
        let needle = query.to_lowercase();
        self.lock()
            .contacts
            .values()
            .filter(|contact| contact.name.to_lowercase().contains(&needle))
            .cloned()
            .collect()
    }

    pub fn len(&self) -> usize {
        self.lock().contacts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().contacts.is_empty()
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}
