pub mod logger;
pub mod error;
pub mod helpers;
pub mod db;
pub mod facility_xml;
pub mod employee_import;

use std::env;
use std::error::Error;
use std::fs::create_dir_all;
use std::path::PathBuf;

use app_dirs::{get_app_root, AppDataType, AppInfo};
use dotenvy::dotenv;

pub use db::DatabaseHandle;
pub use error::{ImportError, ParseError, RecordError};

pub const APP_INFO: AppInfo = AppInfo { name: "facilitydb", author: "facilitydb" };

pub const DB_FILE_NAME: &str = "facilities.sqlite3";

/// Data directory for the database and log files.
///
/// Precedence:
/// - FACILITYDB_DIR env var (also read from .env)
/// - the platform user data folder, e.g. ~/.local/share/facilitydb
pub fn get_create_facilitydb_dir() -> Result<PathBuf, Box<dyn Error>> {
    dotenv().ok();

    let p = match env::var("FACILITYDB_DIR") {
        Ok(s) if !s.is_empty() => PathBuf::from(s),
        _ => get_app_root(AppDataType::UserData, &APP_INFO)?,
    };

    if !p.exists() {
        create_dir_all(&p)?;
    }
    Ok(p)
}

pub fn get_default_db_path() -> Result<PathBuf, Box<dyn Error>> {
    Ok(get_create_facilitydb_dir()?.join(DB_FILE_NAME))
}
