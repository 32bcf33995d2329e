//! Listing of rotated log files.

use std::io;
use std::path::Path;

/// All `*.log` files in `dir`, sorted by name.
///
/// Names are `YYYY-MM-DD.log`, so name order is date order.
pub async fn list_logs(dir: &Path) -> io::Result<Vec<String>> {
    let mut entries = tokio::fs::read_dir(dir).await?;
    let mut files = Vec::new();

    while let Some(entry) = entries.next_entry().await? {
        if !entry.file_type().await?.is_file() {
            continue;
        }
        if let Some(name) = entry.file_name().to_str()
            && name.ends_with(".log")
        {
            files.push(name.to_string());
        }
    }

    files.sort();
    Ok(files)
}

/// Position of a file in the listing and its neighbours.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Located<'a> {
    pub name: &'a str,
    pub prev: Option<&'a str>,
    pub next: Option<&'a str>,
}

/// Find `name` in a sorted listing (exact match only).
pub fn locate<'a>(files: &'a [String], name: &str) -> Option<Located<'a>> {
    let index = files.binary_search_by(|f| f.as_str().cmp(name)).ok()?;

    Some(Located {
        name: &files[index],
        prev: index.checked_sub(1).map(|i| files[i].as_str()),
        next: files.get(index + 1).map(String::as_str),
    })
}
