//! In-memory fakes for the purge coordinator's store boundaries
//!
//! Both fakes support per-key failure injection so tests can exercise
//! partial-failure behavior without real backends.

use async_trait::async_trait;
use board_service::purge::{DocumentStore, DocumentStoreError};
use object_store::{ObjectStore, ObjectStoreError};
use std::collections::{BTreeMap, BTreeSet};
use std::sync::{Arc, Mutex};
use uuid::Uuid;

/// In-memory document store with failure injection
#[derive(Clone, Default)]
pub struct MemoryDocumentStore {
    docs: Arc<Mutex<BTreeSet<Uuid>>>,
    fail_delete: Arc<Mutex<BTreeSet<Uuid>>>,
}

impl MemoryDocumentStore {
    pub fn new(ids: impl IntoIterator<Item = Uuid>) -> Self {
        Self {
            docs: Arc::new(Mutex::new(ids.into_iter().collect())),
            fail_delete: Arc::default(),
        }
    }

    /// Make deletion of this document fail with an injected outage
    pub fn fail_delete_of(&self, id: Uuid) {
        self.fail_delete.lock().unwrap().insert(id);
    }

    pub fn contains(&self, id: Uuid) -> bool {
        self.docs.lock().unwrap().contains(&id)
    }

    pub fn len(&self) -> usize {
        self.docs.lock().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl DocumentStore for MemoryDocumentStore {
    async fn list_ids(&self) -> Result<Vec<Uuid>, DocumentStoreError> {
        Ok(self.docs.lock().unwrap().iter().copied().collect())
    }

    async fn delete(&self, id: Uuid) -> Result<(), DocumentStoreError> {
        if self.fail_delete.lock().unwrap().contains(&id) {
            return Err(DocumentStoreError::Unavailable(
                "injected document outage".to_string(),
            ));
        }

        if self.docs.lock().unwrap().remove(&id) {
            Ok(())
        } else {
            Err(DocumentStoreError::NotFound { id })
        }
    }
}

/// In-memory object store with failure injection
#[derive(Clone, Default)]
pub struct MemoryObjectStore {
    objects: Arc<Mutex<BTreeMap<String, Vec<u8>>>>,
    fail_delete: Arc<Mutex<BTreeSet<String>>>,
    fail_list: Arc<Mutex<BTreeSet<String>>>,
}

impl MemoryObjectStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&self, key: &str) {
        self.objects
            .lock()
            .unwrap()
            .insert(key.to_string(), b"blob".to_vec());
    }

    /// Make deletion of this key fail with an injected outage
    pub fn fail_delete_of(&self, key: &str) {
        self.fail_delete.lock().unwrap().insert(key.to_string());
    }

    /// Make listing of this exact prefix fail with an injected outage
    pub fn fail_list_of(&self, prefix: &str) {
        self.fail_list.lock().unwrap().insert(prefix.to_string());
    }

    pub fn contains(&self, key: &str) -> bool {
        self.objects.lock().unwrap().contains_key(key)
    }

    pub fn keys_under(&self, prefix: &str) -> Vec<String> {
        self.objects
            .lock()
            .unwrap()
            .keys()
            .filter(|k| k.starts_with(prefix))
            .cloned()
            .collect()
    }

    pub fn len(&self) -> usize {
        self.objects.lock().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl ObjectStore for MemoryObjectStore {
    async fn list(&self, prefix: &str) -> Result<Vec<String>, ObjectStoreError> {
        if self.fail_list.lock().unwrap().contains(prefix) {
            return Err(ObjectStoreError::Unavailable(
                "injected listing outage".to_string(),
            ));
        }

        Ok(self
            .objects
            .lock()
            .unwrap()
            .keys()
            .filter(|k| k.starts_with(prefix))
            .cloned()
            .collect())
    }

    async fn delete(&self, key: &str) -> Result<(), ObjectStoreError> {
        if self.fail_delete.lock().unwrap().contains(key) {
            return Err(ObjectStoreError::Unavailable(
                "injected delete outage".to_string(),
            ));
        }

        if self.objects.lock().unwrap().remove(key).is_some() {
            Ok(())
        } else {
            Err(ObjectStoreError::NotFound {
                key: key.to_string(),
            })
        }
    }

    async fn put(
        &self,
        key: &str,
        body: Vec<u8>,
        _content_type: &str,
    ) -> Result<String, ObjectStoreError> {
        self.objects.lock().unwrap().insert(key.to_string(), body);
        Ok(format!("https://cdn.test/{}", key))
    }

    async fn exists(&self, key: &str) -> Result<bool, ObjectStoreError> {
        Ok(self.objects.lock().unwrap().contains_key(key))
    }
}
