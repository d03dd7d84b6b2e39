//! Parse statistics and chart-dump diagnostics (spec §7: "the engine
//! dumps the chart up to position when a debug flag is set").

use earley_chart::{Chart, ItemSet};
use earley_intern::Handle;
use earley_item::ItemStore;
use log::{debug, log_enabled, Level};

/// Counters a caller can read after (or during) a parse to judge how
/// much work the goto cache saved.
#[derive(Clone, Copy, Debug, Default)]
pub struct EngineStats {
    pub interned_cores: usize,
    pub interned_sets: usize,
    pub interned_distance_vectors: usize,
    pub goto_cache_hits: usize,
    pub goto_cache_misses: usize,
}

/// Logs every column up to and including `up_to` at debug level, one
/// line per item, if the `debug` log level is enabled for this crate.
pub fn dump_chart(chart: &Chart, items: &ItemStore, up_to: usize) {
    if !log_enabled!(Level::Debug) {
        return;
    }
    for column in 0..=up_to.min(chart.len().saturating_sub(1)) {
        dump_column(chart.get(column), items, column);
    }
}

pub fn dump_column(set: Handle<ItemSet>, items: &ItemStore, column: usize) {
    if !log_enabled!(Level::Debug) {
        return;
    }
    let set = set.get();
    for (item_id, distance) in set.start_items() {
        let item = items.item(item_id);
        debug!(
            "column {column}: start rule={} dot={} distance={distance}",
            item.rule_id, item.dot
        );
    }
    for (item_id, parent) in set.derived_items() {
        let item = items.item(item_id);
        debug!(
            "column {column}: derived rule={} dot={} parent={parent:?}",
            item.rule_id, item.dot
        );
    }
}
