//! Shared test helpers

use arkup_cli::error::{CliError, Result};
use arkup_cli::manifest::Row;
use arkup_cli::store::ObjectStore;
use async_trait::async_trait;
use std::collections::{BTreeMap, HashMap, HashSet};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

/// In-memory object store for pipeline tests
#[derive(Default)]
pub struct MockStore {
    objects: Mutex<HashMap<String, BTreeMap<String, String>>>,
    fail_uploads: bool,
    pub exists_calls: AtomicUsize,
    pub upload_calls: AtomicUsize,
    pub delete_calls: AtomicUsize,
    /// Scratch paths handed to `upload`, for cleanup assertions
    pub uploaded_paths: Mutex<Vec<PathBuf>>,
}

impl MockStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// A store whose uploads always fail with a transport error
    pub fn failing_uploads() -> Self {
        Self {
            fail_uploads: true,
            ..Self::default()
        }
    }

    /// Pre-seed an existing remote object
    pub fn seed(&self, identifier: &str) {
        self.objects
            .lock()
            .unwrap()
            .insert(identifier.to_string(), BTreeMap::new());
    }

    pub fn contains(&self, identifier: &str) -> bool {
        self.objects.lock().unwrap().contains_key(identifier)
    }

    pub fn metadata_of(&self, identifier: &str) -> Option<BTreeMap<String, String>> {
        self.objects.lock().unwrap().get(identifier).cloned()
    }

    pub fn identifiers(&self) -> HashSet<String> {
        self.objects.lock().unwrap().keys().cloned().collect()
    }
}

#[async_trait]
impl ObjectStore for MockStore {
    async fn exists(&self, identifier: &str) -> Result<bool> {
        self.exists_calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.contains(identifier))
    }

    async fn upload(
        &self,
        identifier: &str,
        path: &Path,
        metadata: &BTreeMap<String, String>,
    ) -> Result<()> {
        self.upload_calls.fetch_add(1, Ordering::SeqCst);
        self.uploaded_paths.lock().unwrap().push(path.to_path_buf());
        if self.fail_uploads {
            return Err(CliError::transport("injected upload failure"));
        }
        // The scratch file must still exist when the sink reads it.
        assert!(path.exists(), "upload called with missing scratch file");
        self.objects
            .lock()
            .unwrap()
            .insert(identifier.to_string(), metadata.clone());
        Ok(())
    }

    async fn delete(&self, identifier: &str) -> Result<()> {
        self.delete_calls.fetch_add(1, Ordering::SeqCst);
        // Absent identifiers are a warn-and-continue, like the real store.
        self.objects.lock().unwrap().remove(identifier);
        Ok(())
    }
}

/// Build a row from (column, value) pairs
pub fn row(pairs: &[(&str, &str)]) -> Row {
    Row::new(
        pairs
            .iter()
            .map(|(c, v)| (c.to_string(), v.to_string()))
            .collect(),
    )
}
