//! Item set cores, item sets, the goto-cache record shape, and the
//! append-only parse chart that strings columns together (spec §3).

mod chart;
mod core;
mod distance;
mod goto_cache;
mod set;

pub use chart::Chart;
pub use core::{CoreEntry, ItemSetCore};
pub use distance::DistanceVec;
pub use goto_cache::GotoCacheEntry;
pub use set::ItemSet;
