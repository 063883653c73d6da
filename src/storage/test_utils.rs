use super::DataContext;
use std::path::PathBuf;
use tempfile::TempDir;

/// A file database living in a temporary directory.
///
/// Each call to [`TestStore::open`] returns a fresh context on the same file,
/// so tests can check what survives closing a session.
pub struct TestStore {
    temp_dir: TempDir,
}

impl TestStore {
    pub fn new() -> Self {
        let temp_dir = tempfile::Builder::new()
            .prefix("crud_sample_test")
            .tempdir()
            .expect("Failed to create temporary directory");
        Self { temp_dir }
    }

    pub fn path(&self) -> PathBuf {
        self.temp_dir.path().join("test.db")
    }

    pub fn open(&self) -> DataContext {
        let context = DataContext::open(self.path()).expect("Failed to open test store");
        context
            .ensure_created()
            .expect("Failed to create test schema");
        context
    }
}

/// An in-memory context with the schema in place.
pub fn in_memory_context() -> DataContext {
    let context = DataContext::open_in_memory().expect("Failed to open in-memory store");
    context
        .ensure_created()
        .expect("Failed to create test schema");
    context
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::table_names;

    #[test]
    fn test_store_initialization() {
        let store = TestStore::new();
        let context = store.open();

        assert!(store.path().exists());
        assert_eq!(
            table_names(context.connection()).unwrap(),
            vec!["categories", "todos"]
        );
    }

    #[test]
    fn test_in_memory_context_has_schema() {
        let context = in_memory_context();
        assert!(!context.ensure_created().unwrap());
    }
}
