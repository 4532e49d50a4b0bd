pub mod check;
pub mod collect;
pub mod error;
pub mod navigation;
pub mod source;
pub mod types;

pub use error::{IndexError, LoadError};
pub use navigation::{ImageSurface, MapRequest, MapView, Navigator, Phase, Ticket};
pub use source::DataSource;
pub use types::{parse_map_index, parse_product_index, MapEntry, ProductEntry};
