use chart_index::{
    parse_map_index, parse_product_index, DataSource, LoadError, MapEntry, ProductEntry,
};
use gloo::net::http::Request;
use log::debug;

/// GET `url` and return the body, or why it could not be read.
pub async fn fetch_text(url: &str) -> Result<String, LoadError> {
    let started = js_sys::Date::now();
    let resp = Request::get(url)
        .send()
        .await
        .map_err(|e| LoadError::Network(e.to_string()))?;

    if !resp.ok() {
        return Err(LoadError::Status {
            url: url.to_string(),
            status: resp.status(),
        });
    }

    let text = resp
        .text()
        .await
        .map_err(|e| LoadError::Network(e.to_string()))?;
    debug!(
        "fetched {url} ({} bytes) in {:.0} ms",
        text.len(),
        js_sys::Date::now() - started
    );
    Ok(text)
}

async fn fetch_parsed<T>(
    url: String,
    parse: fn(&str) -> Result<T, serde_json::Error>,
) -> Result<T, LoadError> {
    let text = fetch_text(&url).await?;
    parse(&text).map_err(|e| LoadError::parse(&url, &e))
}

pub async fn fetch_products(source: &DataSource) -> Result<Vec<ProductEntry>, LoadError> {
    fetch_parsed(source.product_index_url(), parse_product_index).await
}

pub async fn fetch_maps(source: &DataSource, indexfile: &str) -> Result<Vec<MapEntry>, LoadError> {
    fetch_parsed(source.resolve(indexfile), parse_map_index).await
}
