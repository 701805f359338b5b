//! Line-oriented persistence for the catalog, stock, and journal stores.
//!
//! Every store treats its file as the sole source of truth: operations
//! re-read before validating or mutating, and mutations commit through an
//! atomic temp-file-and-rename so a failed write never corrupts the
//! original.

pub mod catalog_store;
pub mod journal_store;
pub mod stock_store;

pub use catalog_store::CatalogStore;
pub use journal_store::Journal;
pub use stock_store::StockStore;

use std::{
    fs::{self, File},
    io::Write,
    path::{Path, PathBuf},
};

use crate::errors::{Result, ShopError};

const TMP_SUFFIX: &str = "tmp";

pub fn ensure_dir(path: &Path) -> Result<()> {
    if !path.exists() {
        fs::create_dir_all(path)?;
    }
    Ok(())
}

fn tmp_path(path: &Path) -> PathBuf {
    let mut tmp = path.to_path_buf();
    let ext = match path.extension().and_then(|ext| ext.to_str()) {
        Some(existing) => format!("{existing}.{TMP_SUFFIX}"),
        None => String::from(TMP_SUFFIX),
    };
    tmp.set_extension(ext);
    tmp
}

/// Writes `data` next to `path` and renames it into place, so readers never
/// observe a half-written store.
pub fn write_atomic(path: &Path, data: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        ensure_dir(parent)?;
    }
    let tmp = tmp_path(path);
    let mut file = File::create(&tmp)?;
    file.write_all(data.as_bytes())?;
    file.flush()?;
    drop(file);
    fs::rename(&tmp, path)?;
    Ok(())
}

/// Reads a store file as lines, treating a missing file as an empty store.
/// Blank lines are ignored; each surviving line is handed to `decode`, and a
/// decode failure is a hard storage error naming the file and line number so
/// the caller never proceeds on ambiguous on-disk state.
pub fn read_records<T>(path: &Path, kind: &str, decode: impl Fn(&str) -> Option<T>) -> Result<Vec<T>> {
    if !path.exists() {
        return Ok(Vec::new());
    }
    let data = fs::read_to_string(path)?;
    let mut records = Vec::new();
    for (index, line) in data.lines().enumerate() {
        if line.trim().is_empty() {
            continue;
        }
        let record = decode(line).ok_or_else(|| {
            ShopError::Storage(format!(
                "malformed {kind} record at {}:{}: `{line}`",
                path.display(),
                index + 1
            ))
        })?;
        records.push(record);
    }
    Ok(records)
}
