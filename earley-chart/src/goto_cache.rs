//! The cache record the engine's goto-reuse lookup keys on, ported from
//! `fast.cpp`'s lookahead-set comparison in `Parser::parse`. The ring
//! buffer itself (bounded by `MAX_LOOKAHEAD_SETS`, FIFO eviction) is
//! engine state; this crate only defines the record shape.

use earley_intern::Handle;

use crate::set::ItemSet;

/// One entry of the goto-reuse cache: "expanding `prev_set` on `token`
/// with `lookahead` as the next token produced `result`, a column that
/// first appeared at chart index `origin`". `origin` lets a later hit at
/// a different position re-verify the cached result still applies there,
/// by comparing each start item's origin column at both positions.
#[derive(Clone, Copy, Debug)]
pub struct GotoCacheEntry {
    pub prev_set: Handle<ItemSet>,
    pub token: u32,
    pub lookahead: u32,
    pub origin: usize,
    pub result: Handle<ItemSet>,
}

impl GotoCacheEntry {
    pub fn matches(&self, prev_set: Handle<ItemSet>, token: u32, lookahead: u32) -> bool {
        self.prev_set == prev_set && self.token == token && self.lookahead == lookahead
    }
}
