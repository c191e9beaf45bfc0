use std::fs;
use std::path::Path;

use tracing::warn;

use crate::error::PadError;

/// List the database files discoverable in `dir`: regular files whose name
/// ends in `.db`, sorted by name. There is no registry beyond this listing.
pub fn list_databases(dir: &Path) -> Result<Vec<String>, PadError> {
    if !dir.exists() {
        return Ok(Vec::new());
    }

    let mut names: Vec<String> = fs::read_dir(dir)?
        .filter_map(|entry| match entry {
            Ok(entry) => Some(entry),
            Err(e) => {
                warn!(error = %e, "failed to read data dir entry");
                None
            }
        })
        .filter(|entry| {
            entry
                .file_type()
                .as_ref()
                .map(fs::FileType::is_file)
                .unwrap_or(false)
        })
        .filter_map(|entry| entry.file_name().into_string().ok())
        .filter(|name| name.ends_with(".db"))
        .collect();
    names.sort();
    Ok(names)
}

/// Resolve a user-selected database name against the discovered list. The
/// select box is the contract: anything not in the listing is rejected.
pub fn resolve_database(dir: &Path, name: &str) -> Result<std::path::PathBuf, PadError> {
    let known = list_databases(dir)?;
    if known.iter().any(|n| n == name) {
        Ok(dir.join(name))
    } else {
        Err(PadError::UnknownDatabase(name.to_string()))
    }
}

/// Suffix convention shared by the creation page and discovery.
pub fn has_db_suffix(filename: &str) -> bool {
    filename.ends_with(".db")
}
