// ABOUTME: Catalog module - the ordered list of songs being resolved and fetched.
// ABOUTME: Holds the entry model, merge-by-name logic, and JSON persistence.

mod entry;
mod store;

pub use entry::{Catalog, CatalogEntry};
pub use store::{from_json_str, read_catalog, strip_bom, to_json_string, write_catalog};
