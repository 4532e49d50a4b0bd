use percent_encoding::percent_decode_str;

/// Where index documents and chart images are served from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataSource {
    /// Directory prefix joined in front of every file name.
    pub data_dir: String,
    /// Product index file name inside `data_dir`.
    pub index_file: String,
}

pub const DEFAULT_DATA_DIR: &str = "data";
pub const DEFAULT_INDEX_FILE: &str = "index.json";

impl Default for DataSource {
    fn default() -> Self {
        Self {
            data_dir: DEFAULT_DATA_DIR.to_string(),
            index_file: DEFAULT_INDEX_FILE.to_string(),
        }
    }
}

impl DataSource {
    pub fn new(data_dir: impl Into<String>, index_file: impl Into<String>) -> Self {
        Self {
            data_dir: data_dir.into(),
            index_file: index_file.into(),
        }
    }

    /// Build from a page query string such as `?data=charts&index=pmsl_t850.index.json`.
    ///
    /// Values are form-decoded (`+` is a space, `%xx` escapes are expanded).
    /// Unknown keys and empty values leave the defaults in place.
    pub fn from_query(query: &str) -> Self {
        let mut source = Self::default();
        let query = query.strip_prefix('?').unwrap_or(query);
        for pair in query.split('&') {
            let (key, value) = pair.split_once('=').unwrap_or((pair, ""));
            let value = form_decode(value);
            if value.is_empty() {
                continue;
            }
            match form_decode(key).as_str() {
                "data" => source.data_dir = value,
                "index" => source.index_file = value,
                _ => {}
            }
        }
        source
    }

    /// `data_dir + '/' + file`. Names are trusted and not escaped.
    pub fn resolve(&self, file: &str) -> String {
        let dir = self.data_dir.trim_end_matches('/');
        if dir.is_empty() {
            file.to_string()
        } else {
            format!("{dir}/{file}")
        }
    }

    pub fn product_index_url(&self) -> String {
        self.resolve(&self.index_file)
    }
}

fn form_decode(s: &str) -> String {
    let s = s.replace('+', " ");
    percent_decode_str(&s).decode_utf8_lossy().into_owned()
}
