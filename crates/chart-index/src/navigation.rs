//! Navigation state for the chart browser.
//!
//! A session moves from `Empty` to `ProductListShown` once the product index
//! arrives, then to `MapListShown` each time a product's map index arrives.
//! Selecting a product detaches the current map view immediately; the new
//! one is mounted only when the response carrying the latest [`Ticket`]
//! comes back, so a slow response for an earlier click can never overwrite
//! a later one.

use log::debug;

use crate::error::LoadError;
use crate::source::DataSource;
use crate::types::{MapEntry, ProductEntry};

/// Identifies one product selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Ticket(u64);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Empty,
    ProductListShown,
    MapListShown,
}

/// Map index fetch the caller must perform after a product click.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MapRequest {
    pub ticket: Ticket,
    pub indexfile: String,
}

/// The single `<img>` whose source is swapped by map entry clicks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageSurface {
    id: u64,
    src: Option<String>,
}

impl ImageSurface {
    /// Distinct for every mounted surface; usable as a render key.
    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn src(&self) -> Option<&str> {
        self.src.as_deref()
    }
}

/// Mounted map list for one product.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MapView {
    pub product: usize,
    pub title: Option<String>,
    pub entries: Vec<MapEntry>,
    pub surface: ImageSurface,
}

#[derive(Debug, Default)]
pub struct Navigator {
    products: Option<Vec<ProductEntry>>,
    selected: Option<usize>,
    map_view: Option<MapView>,
    pending: Option<(Ticket, usize)>,
    last_ticket: u64,
    surfaces_created: u64,
    error: Option<LoadError>,
    products_failed: bool,
}

impl Navigator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phase(&self) -> Phase {
        if self.map_view.is_some() {
            Phase::MapListShown
        } else if self.products.is_some() {
            Phase::ProductListShown
        } else {
            Phase::Empty
        }
    }

    pub fn products(&self) -> Option<&[ProductEntry]> {
        self.products.as_deref()
    }

    pub fn selected_index(&self) -> Option<usize> {
        self.selected
    }

    pub fn selected_product(&self) -> Option<&ProductEntry> {
        self.products.as_ref()?.get(self.selected?)
    }

    pub fn map_view(&self) -> Option<&MapView> {
        self.map_view.as_ref()
    }

    /// Ticket of the map index fetch still awaited, if any.
    pub fn pending(&self) -> Option<Ticket> {
        self.pending.map(|(ticket, _)| ticket)
    }

    pub fn error(&self) -> Option<&LoadError> {
        self.error.as_ref()
    }

    /// True once the product index load has failed and no list is mounted.
    /// Stays set after the error is dismissed.
    pub fn products_unavailable(&self) -> bool {
        self.products_failed && self.products.is_none()
    }

    pub fn dismiss_error(&mut self) {
        self.error = None;
    }

    /// Mount the product list, or record why it could not be loaded.
    pub fn products_loaded(&mut self, result: Result<Vec<ProductEntry>, LoadError>) {
        match result {
            Ok(products) => {
                debug!("product index loaded with {} entries", products.len());
                self.products = Some(products);
                self.selected = None;
                self.map_view = None;
                self.pending = None;
                self.error = None;
                self.products_failed = false;
            }
            Err(e) => {
                self.products_failed = true;
                self.error = Some(e);
            }
        }
    }

    /// Handle a click on product `index`.
    ///
    /// The current map view and its image surface are detached before this
    /// returns. Returns `None` if no product list is mounted or the index is
    /// out of range.
    pub fn select_product(&mut self, index: usize) -> Option<MapRequest> {
        let product = self.products.as_ref()?.get(index)?;
        let indexfile = product.indexfile.clone();

        self.last_ticket += 1;
        let ticket = Ticket(self.last_ticket);

        self.map_view = None;
        self.error = None;
        self.selected = Some(index);
        self.pending = Some((ticket, index));

        Some(MapRequest { ticket, indexfile })
    }

    /// Apply a map index response. Returns `false` if the response belongs to
    /// a selection that has since been superseded and was dropped.
    pub fn maps_loaded(
        &mut self,
        ticket: Ticket,
        result: Result<Vec<MapEntry>, LoadError>,
    ) -> bool {
        let product = match self.pending {
            Some((latest, product)) if latest == ticket => product,
            _ => {
                debug!("dropping stale map index response {ticket:?}");
                return false;
            }
        };
        self.pending = None;

        match result {
            Ok(entries) => {
                let title = self
                    .products
                    .as_ref()
                    .and_then(|p| p.get(product))
                    .and_then(|p| p.list_title.clone());
                self.surfaces_created += 1;
                self.map_view = Some(MapView {
                    product,
                    title,
                    entries,
                    surface: ImageSurface {
                        id: self.surfaces_created,
                        src: None,
                    },
                });
            }
            Err(e) => {
                self.selected = None;
                self.error = Some(e);
            }
        }
        true
    }

    /// Point the image surface at map entry `index`. Nothing else changes.
    pub fn select_map(&mut self, index: usize, source: &DataSource) -> Option<&str> {
        let view = self.map_view.as_mut()?;
        let src = source.resolve(&view.entries.get(index)?.file);
        view.surface.src = Some(src);
        view.surface.src()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn products() -> Vec<ProductEntry> {
        vec![
            ProductEntry::new("A", "a.json").with_list_title("Maps A"),
            ProductEntry::new("B", "b.json"),
        ]
    }

    fn maps(files: &[&str]) -> Vec<MapEntry> {
        files
            .iter()
            .enumerate()
            .map(|(i, f)| MapEntry::new(*f).with_display_name(format!("t{i}")))
            .collect()
    }

    fn parse_error() -> LoadError {
        LoadError::Parse {
            url: "data/a.json".into(),
            message: "expected value at line 1 column 1".into(),
        }
    }

    #[test]
    fn test_initial_state() {
        let nav = Navigator::new();
        assert_eq!(nav.phase(), Phase::Empty);
        assert!(nav.products().is_none());
        assert!(nav.map_view().is_none());
    }

    #[test]
    fn test_product_list_carries_entries() {
        let mut nav = Navigator::new();
        nav.products_loaded(Ok(products()));
        assert_eq!(nav.phase(), Phase::ProductListShown);

        let shown = nav.products().unwrap();
        assert_eq!(shown.len(), 2);
        assert_eq!(shown[0].indexfile, "a.json");
        assert_eq!(shown[0].list_title.as_deref(), Some("Maps A"));
        assert_eq!(shown[1].list_title, None);
    }

    #[test]
    fn test_product_index_failure_stays_empty() {
        let mut nav = Navigator::new();
        nav.products_loaded(Err(LoadError::Network("offline".into())));
        assert_eq!(nav.phase(), Phase::Empty);
        assert_eq!(nav.error(), Some(&LoadError::Network("offline".into())));
    }

    #[test]
    fn test_product_index_failure_survives_dismiss() {
        let mut nav = Navigator::new();
        assert!(!nav.products_unavailable());

        nav.products_loaded(Err(LoadError::Status {
            url: "data/index.json".into(),
            status: 404,
        }));
        assert!(nav.products_unavailable());

        nav.dismiss_error();
        assert_eq!(nav.error(), None);
        assert!(nav.products_unavailable());

        nav.products_loaded(Ok(products()));
        assert!(!nav.products_unavailable());
    }

    #[test]
    fn test_scenario_click_product_then_map() {
        let source = DataSource::default();
        let mut nav = Navigator::new();
        nav.products_loaded(Ok(products()));

        let req = nav.select_product(0).unwrap();
        assert_eq!(req.indexfile, "a.json");
        assert_eq!(source.resolve(&req.indexfile), "data/a.json");
        assert_eq!(nav.pending(), Some(req.ticket));

        assert!(nav.maps_loaded(req.ticket, Ok(maps(&["img1.png"]))));
        assert_eq!(nav.phase(), Phase::MapListShown);
        assert_eq!(nav.pending(), None);

        let view = nav.map_view().unwrap();
        assert_eq!(view.entries.len(), 1);
        assert_eq!(view.entries[0].label(), "t0");
        assert_eq!(view.title.as_deref(), Some("Maps A"));
        assert_eq!(view.surface.src(), None);

        assert_eq!(nav.select_map(0, &source), Some("data/img1.png"));
        assert_eq!(nav.map_view().unwrap().surface.src(), Some("data/img1.png"));
    }

    #[test]
    fn test_map_click_only_touches_image_source() {
        let source = DataSource::default();
        let mut nav = Navigator::new();
        nav.products_loaded(Ok(products()));
        let req = nav.select_product(1).unwrap();
        nav.maps_loaded(req.ticket, Ok(maps(&["x.png", "y.png", "z.png"])));

        let before = nav.map_view().unwrap().clone();
        nav.select_map(2, &source);
        let after = nav.map_view().unwrap();

        assert_eq!(after.surface.src(), Some("data/z.png"));
        assert_eq!(after.surface.id(), before.surface.id());
        assert_eq!(after.entries, before.entries);
        assert_eq!(after.title, before.title);
        assert_eq!(nav.products().unwrap(), products().as_slice());
    }

    #[test]
    fn test_map_click_is_idempotent() {
        let source = DataSource::default();
        let mut nav = Navigator::new();
        nav.products_loaded(Ok(products()));
        let req = nav.select_product(0).unwrap();
        nav.maps_loaded(req.ticket, Ok(maps(&["a.png", "b.png"])));

        nav.select_map(1, &source);
        let first = nav.map_view().unwrap().clone();
        nav.select_map(1, &source);
        assert_eq!(nav.map_view().unwrap(), &first);
    }

    #[test]
    fn test_map_click_out_of_range() {
        let source = DataSource::default();
        let mut nav = Navigator::new();
        assert_eq!(nav.select_map(0, &source), None);

        nav.products_loaded(Ok(products()));
        let req = nav.select_product(0).unwrap();
        nav.maps_loaded(req.ticket, Ok(maps(&["a.png"])));
        nav.select_map(0, &source);
        assert_eq!(nav.select_map(5, &source), None);
        assert_eq!(nav.map_view().unwrap().surface.src(), Some("data/a.png"));
    }

    #[test]
    fn test_product_click_detaches_previous_view() {
        let mut nav = Navigator::new();
        nav.products_loaded(Ok(products()));
        let first = nav.select_product(0).unwrap();
        nav.maps_loaded(first.ticket, Ok(maps(&["a.png"])));
        let old_surface = nav.map_view().unwrap().surface.id();

        let second = nav.select_product(1).unwrap();
        assert!(nav.map_view().is_none());
        assert_eq!(nav.phase(), Phase::ProductListShown);
        assert_eq!(nav.selected_product().unwrap().name, "B");

        nav.maps_loaded(second.ticket, Ok(maps(&["b1.png", "b2.png"])));
        let view = nav.map_view().unwrap();
        assert_eq!(view.entries.len(), 2);
        assert_eq!(view.product, 1);
        assert_eq!(view.title, None);
        assert_ne!(view.surface.id(), old_surface);
        assert_eq!(view.surface.src(), None);
    }

    #[test]
    fn test_reselecting_same_product_mounts_fresh_surface() {
        let source = DataSource::default();
        let mut nav = Navigator::new();
        nav.products_loaded(Ok(products()));
        let req = nav.select_product(0).unwrap();
        nav.maps_loaded(req.ticket, Ok(maps(&["a.png"])));
        nav.select_map(0, &source);
        let old = nav.map_view().unwrap().surface.id();

        let req = nav.select_product(0).unwrap();
        nav.maps_loaded(req.ticket, Ok(maps(&["a.png"])));
        let surface = &nav.map_view().unwrap().surface;
        assert_ne!(surface.id(), old);
        assert_eq!(surface.src(), None);
    }

    #[test]
    fn test_stale_response_is_dropped() {
        let mut nav = Navigator::new();
        nav.products_loaded(Ok(products()));
        let slow = nav.select_product(0).unwrap();
        let fast = nav.select_product(1).unwrap();
        assert!(fast.ticket > slow.ticket);

        assert!(nav.maps_loaded(fast.ticket, Ok(maps(&["b.png"]))));
        assert!(!nav.maps_loaded(slow.ticket, Ok(maps(&["a.png"]))));

        let view = nav.map_view().unwrap();
        assert_eq!(view.product, 1);
        assert_eq!(view.entries[0].file, "b.png");
    }

    #[test]
    fn test_stale_response_before_latest_is_dropped() {
        let mut nav = Navigator::new();
        nav.products_loaded(Ok(products()));
        let slow = nav.select_product(0).unwrap();
        let latest = nav.select_product(1).unwrap();

        assert!(!nav.maps_loaded(slow.ticket, Ok(maps(&["a.png"]))));
        assert!(nav.map_view().is_none());
        assert_eq!(nav.pending(), Some(latest.ticket));

        assert!(nav.maps_loaded(latest.ticket, Ok(maps(&["b.png"]))));
        assert_eq!(nav.map_view().unwrap().product, 1);
    }

    #[test]
    fn test_malformed_map_index_keeps_product_list_usable() {
        let mut nav = Navigator::new();
        nav.products_loaded(Ok(products()));
        let req = nav.select_product(0).unwrap();

        assert!(nav.maps_loaded(req.ticket, Err(parse_error())));
        assert_eq!(nav.error(), Some(&parse_error()));
        assert_eq!(nav.phase(), Phase::ProductListShown);
        assert_eq!(nav.products().unwrap().len(), 2);
        assert_eq!(nav.pending(), None);
        assert_eq!(nav.selected_index(), None);
        assert!(nav.selected_product().is_none());

        let retry = nav.select_product(1).unwrap();
        assert_eq!(nav.error(), None);
        nav.maps_loaded(retry.ticket, Ok(maps(&["b.png"])));
        assert_eq!(nav.phase(), Phase::MapListShown);
    }

    #[test]
    fn test_select_product_out_of_range() {
        let mut nav = Navigator::new();
        assert_eq!(nav.select_product(0), None);
        nav.products_loaded(Ok(products()));
        assert_eq!(nav.select_product(7), None);
        assert_eq!(nav.pending(), None);
    }
}
