use std::path::Path;

use log::{debug, warn};

use crate::check::read_map_index;
use crate::error::IndexError;
use crate::types::ProductEntry;

/// File name suffix the chart plotters use for map indexes.
pub const MAP_INDEX_SUFFIX: &str = ".index.json";

/// Build a product index from every map index found directly in `dir`.
///
/// Products are named after the file stem (`pmsl.index.json` becomes
/// `pmsl`) and sorted by name. `exclude` names a file to skip, usually the
/// product index being regenerated. Files that do not parse as map indexes
/// are skipped with a warning.
pub fn collect_products(dir: &Path, exclude: &str) -> Result<Vec<ProductEntry>, IndexError> {
    let read_dir = std::fs::read_dir(dir).map_err(|e| IndexError::io(dir, e))?;

    let mut products = Vec::new();
    for entry in read_dir {
        let entry = entry.map_err(|e| IndexError::io(dir, e))?;
        let file_name = entry.file_name();
        let Some(file_name) = file_name.to_str() else {
            continue;
        };
        if file_name == exclude {
            continue;
        }
        let Some(name) = file_name
            .strip_suffix(MAP_INDEX_SUFFIX)
            .filter(|stem| !stem.is_empty())
        else {
            continue;
        };

        match read_map_index(&entry.path()) {
            Ok(maps) => {
                debug!("{file_name}: {} maps", maps.len());
                products.push(ProductEntry::new(name, file_name));
            }
            Err(e) => warn!("skipping {e}"),
        }
    }

    products.sort_by(|a, b| a.name.cmp(&b.name));
    Ok(products)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_collect_products() {
        let dir = tempfile::tempdir().unwrap();
        let p = dir.path();
        fs::write(p.join("t850.index.json"), r#"[{"file": "t850+00.png"}]"#).unwrap();
        fs::write(p.join("skewt_berlin.index.json"), "[]").unwrap();
        fs::write(p.join("broken.index.json"), "{").unwrap();
        fs::write(p.join("index.json"), "[]").unwrap();
        fs::write(p.join("t850+00.png"), "png").unwrap();

        let products = collect_products(p, "index.json").unwrap();
        assert_eq!(
            products,
            vec![
                ProductEntry::new("skewt_berlin", "skewt_berlin.index.json"),
                ProductEntry::new("t850", "t850.index.json"),
            ]
        );
    }

    #[test]
    fn test_collect_skips_nameless_index() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join(".index.json"), "[]").unwrap();
        fs::write(dir.path().join("x.index.json"), "[]").unwrap();
        let products = collect_products(dir.path(), "index.json").unwrap();
        assert_eq!(products, vec![ProductEntry::new("x", "x.index.json")]);
    }

    #[test]
    fn test_collect_excludes_target() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("all.index.json"), "[]").unwrap();
        let products = collect_products(dir.path(), "all.index.json").unwrap();
        assert!(products.is_empty());
    }

    #[test]
    fn test_collect_missing_dir() {
        let dir = tempfile::tempdir().unwrap();
        let err = collect_products(&dir.path().join("nope"), "index.json").unwrap_err();
        assert!(matches!(err, IndexError::Io { .. }));
    }
}
