use std::env;
use std::fs;
use std::path::PathBuf;

use tempfile::TempDir;

use facilitydb_backend::DatabaseHandle;

/// A throwaway database in its own directory. The directory is removed on drop.
pub struct TestDb {
    pub dir: TempDir,
    pub db: DatabaseHandle,
}

impl TestDb {
    /// Writes `content` next to the database and returns its path.
    pub fn write_file(&self, name: &str, content: &str) -> PathBuf {
        let path = self.dir.path().join(name);
        fs::write(&path, content).expect("Can't write test input");
        path
    }
}

pub fn test_db_setup() -> TestDb {
    // The logger reads these once, on first use.
    unsafe {
        env::set_var("DISABLE_LOG", "true");
        env::set_var("FACILITYDB_DIR", env::temp_dir().join("facilitydb-tests"));
    }

    let dir = tempfile::tempdir().expect("Can't create temp dir");
    let db = DatabaseHandle::open(&dir.path().join("test.sqlite3")).expect("Can't open test database");
    TestDb { dir, db }
}

#[allow(dead_code)]
pub fn fixture(name: &str) -> String {
    let path = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures").join(name);
    fs::read_to_string(&path).unwrap_or_else(|e| panic!("Can't read fixture {:?}: {}", path, e))
}
