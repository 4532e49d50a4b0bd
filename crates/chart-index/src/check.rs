use std::path::{Path, PathBuf};

use log::{debug, warn};

use crate::error::IndexError;
use crate::source::DataSource;
use crate::types::{parse_map_index, parse_product_index, MapEntry, ProductEntry};

pub fn read_product_index(path: &Path) -> Result<Vec<ProductEntry>, IndexError> {
    let text = std::fs::read_to_string(path).map_err(|e| IndexError::io(path, e))?;
    parse_product_index(&text).map_err(|e| IndexError::json(path, e))
}

pub fn read_map_index(path: &Path) -> Result<Vec<MapEntry>, IndexError> {
    let text = std::fs::read_to_string(path).map_err(|e| IndexError::io(path, e))?;
    parse_map_index(&text).map_err(|e| IndexError::json(path, e))
}

/// Result of checking one product's map index against the data directory.
#[derive(Debug, Clone)]
pub struct ProductReport {
    pub product: ProductEntry,
    pub maps: Vec<MapEntry>,
    pub missing_images: Vec<String>,
    /// Set when the map index itself could not be read or parsed.
    pub error: Option<String>,
}

impl ProductReport {
    pub fn is_ok(&self) -> bool {
        self.error.is_none() && self.missing_images.is_empty()
    }
}

#[derive(Debug, Clone, Default)]
pub struct Report {
    pub products: Vec<ProductReport>,
}

impl Report {
    pub fn is_clean(&self) -> bool {
        self.products.iter().all(ProductReport::is_ok)
    }

    pub fn broken(&self) -> impl Iterator<Item = &ProductReport> {
        self.products.iter().filter(|p| !p.is_ok())
    }
}

fn data_dir(root: &Path, source: &DataSource) -> PathBuf {
    if source.data_dir.is_empty() {
        root.to_path_buf()
    } else {
        root.join(&source.data_dir)
    }
}

/// Walk a content root the way the viewer would: product index, then each
/// map index, then each referenced image.
///
/// An unreadable product index is an error; problems below it are recorded
/// in the report.
pub fn check(root: &Path, source: &DataSource) -> Result<Report, IndexError> {
    let dir = data_dir(root, source);
    let products = read_product_index(&dir.join(&source.index_file))?;
    debug!("checking {} products under {}", products.len(), dir.display());

    let mut report = Report::default();
    for product in products {
        let index_path = dir.join(&product.indexfile);
        let entry = match read_map_index(&index_path) {
            Ok(maps) => {
                let missing_images: Vec<String> = maps
                    .iter()
                    .filter(|m| !dir.join(&m.file).is_file())
                    .map(|m| m.file.clone())
                    .collect();
                if !missing_images.is_empty() {
                    warn!(
                        "{}: {} of {} images missing",
                        product.name,
                        missing_images.len(),
                        maps.len()
                    );
                }
                ProductReport {
                    product,
                    maps,
                    missing_images,
                    error: None,
                }
            }
            Err(e) => {
                warn!("{}: {e}", product.name);
                ProductReport {
                    product,
                    maps: Vec::new(),
                    missing_images: Vec::new(),
                    error: Some(e.to_string()),
                }
            }
        };
        report.products.push(entry);
    }

    Ok(report)
}
