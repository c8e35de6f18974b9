pub mod csv;
mod entries;
mod mapping;
mod store;

pub use entries::*;
pub use mapping::{Mapping, MAPPING_HEADER};
pub use store::EntryStore;
