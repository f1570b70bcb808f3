use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::database::Database;

/// Returns the default path of the CRM database
///
/// # Platform-specific paths
///
/// - **macOS**: `~/Library/Application Support/crm/crm.sqlite3`
/// - **Linux**: `~/.local/share/crm/crm.sqlite3`
/// - **Windows**: `%LOCALAPPDATA%\crm\crm.sqlite3`
pub fn get_db_path() -> anyhow::Result<PathBuf> {
    let data_dir = dirs::data_local_dir()
        .ok_or_else(|| anyhow::anyhow!("Could not determine local data directory"))?;

    Ok(data_dir.join("crm").join("crm.sqlite3"))
}

/// Opens the database at `path`, or at [`get_db_path`] when none is given
pub fn initialize_database(path: Option<&Path>) -> anyhow::Result<(Arc<Database>, PathBuf)> {
    let db_path = match path {
        Some(p) => p.to_path_buf(),
        None => get_db_path()?,
    };

    let db = Database::new(&db_path)?;
    Ok((Arc::new(db), db_path))
}
