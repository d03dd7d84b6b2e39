//! The parse chart: one interned item set per token position, append-only
//! for the duration of a parse (spec §3/§4.5).

use earley_intern::Handle;

use crate::set::ItemSet;

pub struct Chart {
    columns: Vec<Handle<ItemSet>>,
}

impl Default for Chart {
    fn default() -> Self {
        Self::new()
    }
}

impl Chart {
    pub fn new() -> Self {
        Chart {
            columns: Vec::new(),
        }
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Chart {
            columns: Vec::with_capacity(capacity),
        }
    }

    pub fn push(&mut self, set: Handle<ItemSet>) -> usize {
        self.columns.push(set);
        self.columns.len() - 1
    }

    pub fn columns(&self) -> &[Handle<ItemSet>] {
        &self.columns
    }

    pub fn get(&self, position: usize) -> Handle<ItemSet> {
        self.columns[position]
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }
}
