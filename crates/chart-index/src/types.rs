use serde::{Deserialize, Serialize};

// ─── Product index ───────────────────────────────────────────────────

/// One selectable dataset in the product index.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductEntry {
    pub name: String,
    /// Map index path, relative to the data directory.
    pub indexfile: String,
    /// Heading shown above the map list once this product is selected.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub list_title: Option<String>,
}

impl ProductEntry {
    pub fn new(name: impl Into<String>, indexfile: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            indexfile: indexfile.into(),
            list_title: None,
        }
    }

    pub fn with_list_title(mut self, title: impl Into<String>) -> Self {
        self.list_title = Some(title.into());
        self
    }
}

/// Product index items as written by the chart generator: a plotter
/// contributes either one entry or a list of them.
#[derive(Deserialize)]
#[serde(untagged)]
enum ProductItem {
    Entry(ProductEntry),
    Group(Vec<ProductItem>),
}

fn flatten_into(items: Vec<ProductItem>, out: &mut Vec<ProductEntry>) {
    for item in items {
        match item {
            ProductItem::Entry(entry) => out.push(entry),
            ProductItem::Group(group) => flatten_into(group, out),
        }
    }
}

/// Parse a product index document, flattening nested groups in order.
pub fn parse_product_index(text: &str) -> Result<Vec<ProductEntry>, serde_json::Error> {
    let items: Vec<ProductItem> = serde_json::from_str(text)?;
    let mut entries = Vec::with_capacity(items.len());
    flatten_into(items, &mut entries);
    Ok(entries)
}

// ─── Map index ───────────────────────────────────────────────────────

/// One chart image listed in a product's map index.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MapEntry {
    /// Image path, relative to the data directory.
    pub file: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub valid_offset: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub init: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub valid: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
}

impl MapEntry {
    pub fn new(file: impl Into<String>) -> Self {
        Self {
            file: file.into(),
            display_name: None,
            valid_offset: None,
            init: None,
            valid: None,
            id: None,
        }
    }

    pub fn with_display_name(mut self, name: impl Into<String>) -> Self {
        self.display_name = Some(name.into());
        self
    }

    /// Text shown in the map list. Older indexes only carry `valid_offset`.
    pub fn label(&self) -> &str {
        self.display_name
            .as_deref()
            .or(self.valid_offset.as_deref())
            .unwrap_or(&self.file)
    }
}

pub fn parse_map_index(text: &str) -> Result<Vec<MapEntry>, serde_json::Error> {
    serde_json::from_str(text)
}
