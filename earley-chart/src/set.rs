//! `ItemSet`: an interned core plus the distance (origin column offset)
//! of each of its start items, ported from `ItemSet::hash`/`distance` in
//! `fast.hpp`.

use std::hash::{Hash, Hasher};

use earley_intern::Handle;
use earley_item::ItemId;

use crate::core::{CoreEntry, ItemSetCore};
use crate::distance::DistanceVec;

/// A column's full item set: which dotted items it contains (via its
/// interned [`ItemSetCore`]) and how far back each start item's origin
/// column lies (via its interned [`DistanceVec`]).
pub struct ItemSet {
    core: Handle<ItemSetCore>,
    distances: Handle<DistanceVec>,
}

impl ItemSet {
    pub fn new(core: Handle<ItemSetCore>, distances: Handle<DistanceVec>) -> Self {
        debug_assert_eq!(core.get().start_items().len(), distances.get().len());
        ItemSet { core, distances }
    }

    pub fn core(&self) -> Handle<ItemSetCore> {
        self.core
    }

    pub fn distances(&self) -> Handle<DistanceVec> {
        self.distances
    }

    /// Distance of the start item at `index` within the core's start-item
    /// list, i.e. how many tokens back its origin column lies.
    pub fn distance(&self, index: usize) -> u32 {
        self.distances.get().as_slice()[index]
    }

    /// Distance of the item at `index` within the core's full item list
    /// (start items followed by derived items). A derived item has no
    /// distance of its own: it inherits its parent start item's distance,
    /// or 0 if it carries no parent (predicted straight from the grammar,
    /// hence "born" in this column).
    pub fn distance_of(&self, index: usize) -> u32 {
        let core = self.core.get();
        let num_start_items = core.start_items().len();
        if index < num_start_items {
            self.distance(index)
        } else {
            match core.items()[index].parent {
                Some(start_index) => self.distance(start_index as usize),
                None => 0,
            }
        }
    }

    /// `(item, distance)` for every start item.
    pub fn start_items(&self) -> impl Iterator<Item = (ItemId, u32)> + '_ {
        self.core
            .get()
            .start_items()
            .iter()
            .zip(self.distances.get().as_slice().iter())
            .map(|(entry, &distance)| (entry.item, distance))
    }

    /// `(item, parent_index)` for every derived item, where `parent_index`
    /// indexes into [`ItemSet::start_items`] when present. A derived item
    /// predicted straight from the grammar (not via the nullable
    /// shortcut) carries no parent.
    pub fn derived_items(&self) -> impl Iterator<Item = (ItemId, Option<u32>)> + '_ {
        self.core
            .get()
            .derived_items()
            .iter()
            .map(|entry| (entry.item, entry.parent))
    }

    pub fn items(&self) -> &[CoreEntry] {
        self.core.get().items()
    }

    pub fn len(&self) -> usize {
        self.core.get().len()
    }
}

impl PartialEq for ItemSet {
    fn eq(&self, other: &Self) -> bool {
        self.core == other.core && self.distances == other.distances
    }
}

impl Eq for ItemSet {}

impl Hash for ItemSet {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.core.hash(state);
        self.distances.hash(state);
    }
}

impl std::fmt::Debug for ItemSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ItemSet")
            .field("start_items", &self.core.get().start_items().len())
            .field("derived_items", &self.core.get().derived_items().len())
            .field("distances", &self.distances.get().as_slice())
            .finish()
    }
}
