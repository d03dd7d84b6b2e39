//! The recognition engine: chart construction, the nullable shortcut, the
//! goto-reuse cache, and the reduction-builder post-pass, ported from
//! `fast.hpp`'s `Parser::parse`/`expand_item_set`.

use std::collections::{HashMap, VecDeque};

use earley_chart::{Chart, CoreEntry, DistanceVec, GotoCacheEntry, ItemSet, ItemSetCore};
use earley_grammar::Grammar;
use earley_intern::{Handle, HashSet as InternSet, RegionStack};
use earley_item::{ItemId, ItemStore};
use earley_symbol::{Symbol, END_OF_INPUT};
use log::debug;

use crate::error::ParseError;
use crate::reduce::{ReductionEdge, ReductionGraph};
use crate::report::EngineStats;
use crate::transitions::TransitionIndex;

/// Bound on the goto cache's FIFO ring; a tuning constant left to the
/// host, not a structural property of the algorithm (spec §9).
pub const DEFAULT_MAX_LOOKAHEAD_SETS: usize = 16;

/// Owns one parse's chart, intern tables and scratch regions. A grammar
/// and its item store are shared read-only across parses; everything
/// else here is private to one run and is not thread-safe (spec §5).
pub struct Parser<'g> {
    grammar: &'g Grammar,
    items: &'g ItemStore,

    chart: Chart,
    core_intern: InternSet<ItemSetCore>,
    set_intern: InternSet<ItemSet>,
    distance_intern: InternSet<DistanceVec>,
    transitions: HashMap<Handle<ItemSetCore>, TransitionIndex>,

    core_regions: RegionStack<CoreEntry>,
    distance_regions: RegionStack<u32>,

    goto_cache: VecDeque<GotoCacheEntry>,
    max_lookahead_sets: usize,

    /// `(item, distance) -> last column at which this pair was added`,
    /// suppressing duplicate start-item inserts while a column is being
    /// built from scans and nullable-empty completions (spec §4.6).
    item_membership: HashMap<(ItemId, u32), usize>,

    stats: EngineStats,
}

impl<'g> Parser<'g> {
    pub fn new(grammar: &'g Grammar, items: &'g ItemStore) -> Self {
        Self::with_max_lookahead_sets(grammar, items, DEFAULT_MAX_LOOKAHEAD_SETS)
    }

    pub fn with_max_lookahead_sets(
        grammar: &'g Grammar,
        items: &'g ItemStore,
        max_lookahead_sets: usize,
    ) -> Self {
        let mut parser = Parser {
            grammar,
            items,
            chart: Chart::new(),
            core_intern: InternSet::new(),
            set_intern: InternSet::new(),
            distance_intern: InternSet::new(),
            transitions: HashMap::new(),
            core_regions: RegionStack::new(),
            distance_regions: RegionStack::new(),
            goto_cache: VecDeque::new(),
            max_lookahead_sets,
            item_membership: HashMap::new(),
            stats: EngineStats::default(),
        };
        let start_set = parser.create_start_set();
        parser.chart.push(start_set);
        parser
    }

    pub fn chart(&self) -> &Chart {
        &self.chart
    }

    pub fn stats(&self) -> &EngineStats {
        &self.stats
    }

    /// For every rule of the start symbol, seed `(item(rule, 0), distance
    /// 0)` as a start item of column 0 (spec §4.6 "Start column").
    fn create_start_set(&mut self) -> Handle<ItemSet> {
        let start = self.grammar.start();
        let seeds: Vec<(ItemId, u32)> = self
            .grammar
            .rules(start)
            .iter()
            .map(|rule| (self.items.get_item(rule.id, 0).index(), 0))
            .collect();
        self.build_column(&seeds)
    }

    /// Runs both phases of `expand_set` over the core currently open on
    /// `core_regions` (its first `num_start_items` entries already
    /// emplaced), returning the transition index built alongside it.
    fn expand_set(&mut self, num_start_items: usize) -> TransitionIndex {
        let mut transitions = TransitionIndex::default();

        // Phase 1: nullable shortcut. Each start item's postdot chain of
        // nullable nonterminals is walked once, materializing every
        // intermediate (rule, dot+k) directly rather than waiting for k
        // rounds of ordinary completion (spec §4.6 step 1).
        for start_index in 0..num_start_items {
            let start_item_id = self.core_regions.current()[start_index].item;
            let mut item = self.items.item(start_item_id);
            while let Some(postdot) = item.postdot {
                if postdot.is_terminal() || !self.grammar.nullable(postdot) {
                    break;
                }
                let next = self.items.get_item(item.rule_id, item.dot + 1);
                if !core_has_derived(self.core_regions.current(), num_start_items, next.index()) {
                    self.core_regions
                        .emplace(CoreEntry::derived(next.index(), start_index as u32));
                }
                item = next;
            }
        }

        // Phase 2: prediction and transition indexing, growing over the
        // whole core (start items, then whatever phase 1 and this phase
        // itself append) (spec §4.6 step 2).
        let mut i = 0;
        while i < self.core_regions.current().len() {
            let entry = self.core_regions.current()[i];
            let item = self.items.item(entry.item);
            if let Some(postdot) = item.postdot {
                if postdot.is_terminal() {
                    transitions.push_terminal(postdot, i);
                } else {
                    if !transitions.has_predicted(postdot) {
                        for rule in self.grammar.rules(postdot) {
                            let predicted = self.items.get_item(rule.id, 0);
                            if !core_has_derived(
                                self.core_regions.current(),
                                num_start_items,
                                predicted.index(),
                            ) {
                                self.core_regions
                                    .emplace(CoreEntry::predicted(predicted.index()));
                            }
                        }
                    }
                    transitions.push_nonterminal(postdot, i);
                    if self.grammar.nullable(postdot) {
                        let next = self.items.get_item(item.rule_id, item.dot + 1);
                        let traceable_start = if i < num_start_items {
                            Some(i as u32)
                        } else {
                            entry.parent
                        };
                        if !core_has_derived(
                            self.core_regions.current(),
                            num_start_items,
                            next.index(),
                        ) {
                            self.core_regions.emplace(CoreEntry {
                                item: next.index(),
                                parent: traceable_start,
                            });
                        }
                    }
                }
            }
            i += 1;
        }

        transitions
    }

    /// Builds (or reuses) the interned core, distance vector and item set
    /// for `seeds`, the start items of a new column, expanding a
    /// freshly-seen core but leaving a reused one untouched (spec §4.6
    /// step 2c/2d).
    fn build_column(&mut self, seeds: &[(ItemId, u32)]) -> Handle<ItemSet> {
        self.core_regions.start();
        for &(item, _) in seeds {
            self.core_regions.emplace(CoreEntry::start(item));
        }
        let num_start_items = seeds.len();

        let core_handle = match self.core_intern.find_by(self.core_regions.current()) {
            Some(handle) => {
                self.core_regions.destroy_top();
                handle
            }
            None => {
                let transition_index = self.expand_set(num_start_items);
                let run = self.core_regions.finalise();
                let core = ItemSetCore::new(run, num_start_items);
                let (handle, _) = self.core_intern.insert(core);
                self.transitions.insert(handle, transition_index);
                self.stats.interned_cores += 1;
                handle
            }
        };

        self.distance_regions.start();
        for &(_, distance) in seeds {
            self.distance_regions.emplace(distance);
        }
        let run = self.distance_regions.finalise();
        let (distances_handle, distances_new) = self.distance_intern.insert(DistanceVec::new(run));
        if distances_new {
            self.stats.interned_distance_vectors += 1;
        }

        let (set_handle, set_new) = self
            .set_intern
            .insert(ItemSet::new(core_handle, distances_handle));
        if set_new {
            self.stats.interned_sets += 1;
        }
        set_handle
    }

    fn push_seed(&mut self, column: usize, item: ItemId, distance: u32, seeds: &mut Vec<(ItemId, u32)>) {
        let key = (item, distance);
        if self.item_membership.get(&key) == Some(&column) {
            return;
        }
        self.item_membership.insert(key, column);
        seeds.push((item, distance));
    }

    /// Consumes `token` out of `chart[position]`, with `lookahead` (the
    /// token after it, or `END_OF_INPUT` past the end) filtering which
    /// scans and completions survive into the new column (spec §4.6
    /// `parse(position)`).
    pub fn step(&mut self, position: usize, token: u32, lookahead: u32) -> Result<Handle<ItemSet>, ParseError> {
        let prev_handle = self.chart.get(position);

        if let Some(result) = self.probe_goto_cache(prev_handle, token, lookahead, position) {
            self.chart.push(result);
            return Ok(result);
        }

        let prev = prev_handle.get();
        let prev_core = prev.core();
        let token_symbol = Symbol::terminal(token);
        // Copied out of the transition index so the borrow of
        // `self.transitions` doesn't outlive this statement: the scan
        // loop below needs `&mut self` to record seeds.
        let bucket: Vec<usize> = self
            .transitions
            .get(&prev_core)
            .expect("interned core missing a transition index")
            .terminal_bucket(token_symbol)
            .to_vec();
        if bucket.is_empty() {
            return Err(ParseError {
                position,
                expected: self.expected_terminals(prev_handle),
            });
        }

        let new_column = self.chart.len();
        let lookahead_symbol = Symbol::terminal(lookahead);
        let mut seeds: Vec<(ItemId, u32)> = Vec::new();

        // 2a. Scans.
        for &idx in &bucket {
            let item_id = prev.items()[idx].item;
            let item = self.items.item(item_id);
            let next = self.items.get_item(item.rule_id, item.dot + 1);
            if !next.in_lookahead(lookahead_symbol) {
                continue;
            }
            let distance = prev.distance_of(idx) + 1;
            self.push_seed(new_column, next.index(), distance, &mut seeds);
        }

        // 2b. Completion: nullable-empty start items reduce in place,
        // possibly seeding further nullable-empty start items that must
        // themselves be completed, so this grows until it runs dry.
        let mut processed = 0;
        while processed < seeds.len() {
            let (item_id, distance) = seeds[processed];
            processed += 1;
            let item = self.items.item(item_id);
            if !item.empty_rhs {
                continue;
            }

            let from = new_column - distance as usize;
            let from_handle = self.chart.get(from);
            let from_set = from_handle.get();
            let from_core = from_set.core();
            let origin_bucket: Vec<usize> = self
                .transitions
                .get(&from_core)
                .expect("interned core missing a transition index")
                .nonterminal_bucket(item.lhs)
                .to_vec();
            if origin_bucket.is_empty() {
                assert!(
                    item.lhs == self.grammar.start(),
                    "completed non-start-symbol item has no predicting item in its origin column"
                );
                continue;
            }

            for &t_idx in &origin_bucket {
                let t_item_id = from_set.items()[t_idx].item;
                let t_item = self.items.item(t_item_id);
                let next = self.items.get_item(t_item.rule_id, t_item.dot + 1);
                if !next.in_lookahead(lookahead_symbol) {
                    continue;
                }
                let new_distance = from_set.distance_of(t_idx) + distance;
                self.push_seed(new_column, next.index(), new_distance, &mut seeds);
            }
        }

        let set_handle = self.build_column(&seeds);
        self.record_goto_cache(prev_handle, token, lookahead, new_column, set_handle);
        self.chart.push(set_handle);
        Ok(set_handle)
    }

    fn probe_goto_cache(
        &mut self,
        prev: Handle<ItemSet>,
        token: u32,
        lookahead: u32,
        position: usize,
    ) -> Option<Handle<ItemSet>> {
        let mut hit = None;
        for entry in self.goto_cache.iter() {
            if entry.matches(prev, token, lookahead) && self.verify_goto_entry(entry, position) {
                hit = Some(entry.result);
                break;
            }
        }

        if hit.is_some() {
            self.stats.goto_cache_hits += 1;
        } else {
            self.stats.goto_cache_misses += 1;
        }
        hit
    }

    /// Re-verifies a cached successor by comparing, for every one of its
    /// start items, whether the set at its origin column still matches
    /// the set at the corresponding column for this request (spec §4.6
    /// step 1, structural reuse guard).
    fn verify_goto_entry(&self, entry: &GotoCacheEntry, position: usize) -> bool {
        let new_column = position + 1;
        let successor = entry.result.get();
        successor.start_items().all(|(_, distance)| {
            let distance = distance as usize;
            if distance > entry.origin || distance > new_column {
                return false;
            }
            self.chart.get(entry.origin - distance) == self.chart.get(new_column - distance)
        })
    }

    fn record_goto_cache(
        &mut self,
        prev: Handle<ItemSet>,
        token: u32,
        lookahead: u32,
        origin: usize,
        result: Handle<ItemSet>,
    ) {
        if self.max_lookahead_sets == 0 {
            return;
        }
        if self.goto_cache.len() >= self.max_lookahead_sets {
            self.goto_cache.pop_front();
        }
        self.goto_cache.push_back(GotoCacheEntry {
            prev_set: prev,
            token,
            lookahead,
            origin,
            result,
        });
    }

    /// The terminal symbol after the dot of every item in `set`, in
    /// first-seen order, for `ParseError::expected` (spec §4.6 "Failure").
    fn expected_terminals(&self, set: Handle<ItemSet>) -> Vec<Symbol> {
        let mut seen = std::collections::HashSet::new();
        let mut expected = Vec::new();
        for entry in set.get().items() {
            let item = self.items.item(entry.item);
            if let Some(postdot) = item.postdot {
                if postdot.is_terminal() && seen.insert(postdot) {
                    expected.push(postdot);
                }
            }
        }
        expected
    }

    fn is_accepting(&self, total_tokens: usize) -> bool {
        let start = self.grammar.start();
        let final_set = self.chart.get(total_tokens).get();
        final_set.start_items().any(|(item_id, distance)| {
            let item = self.items.item(item_id);
            item.lhs == start && item.is_complete() && distance as usize == total_tokens
        })
    }

    /// Consumes `tokens` left to right, returning whether the resulting
    /// chart accepts (spec §4.6 "Acceptance"). A `ParseError` is only
    /// returned for a dead scan bucket; running out of input without an
    /// accepting item is an ordinary rejection (`Ok(false)`).
    pub fn parse(&mut self, tokens: &[u32]) -> Result<bool, ParseError> {
        for position in 0..tokens.len() {
            let token = tokens[position];
            let lookahead = tokens.get(position + 1).copied().unwrap_or(END_OF_INPUT);
            self.step(position, token, lookahead)?;
        }
        debug!(
            "parse finished: {} columns, {} cache hits, {} cache misses",
            self.chart.len(),
            self.stats.goto_cache_hits,
            self.stats.goto_cache_misses
        );
        Ok(self.is_accepting(tokens.len()))
    }

    /// Walks the finished chart adding reduction edges for every
    /// nullable-empty completion that produced a start item of its column
    /// (spec §4.6 "Reduction builder").
    pub fn build_reductions(&self) -> ReductionGraph {
        let mut edges = Vec::new();
        let mut empty_rhs_cache: HashMap<Handle<ItemSetCore>, Vec<usize>> = HashMap::new();

        for column_index in 1..self.chart.len() {
            let set_handle = self.chart.get(column_index);
            let set = set_handle.get();
            let core_handle = set.core();

            let empty_rhs_indices = empty_rhs_cache.entry(core_handle).or_insert_with(|| {
                core_handle
                    .get()
                    .start_items()
                    .iter()
                    .enumerate()
                    .filter(|(_, entry)| self.items.item(entry.item).empty_rhs)
                    .map(|(index, _)| index)
                    .collect()
            });

            for &start_index in empty_rhs_indices.iter() {
                let item_id = core_handle.get().start_items()[start_index].item;
                let distance = set.distance(start_index);
                let item = self.items.item(item_id);

                let from = column_index - distance as usize;
                let from_handle = self.chart.get(from);
                let from_set = from_handle.get();
                let from_core = from_set.core();
                let from_transitions = self
                    .transitions
                    .get(&from_core)
                    .expect("interned core missing a transition index");

                for &t_idx in from_transitions.nonterminal_bucket(item.lhs) {
                    let t_entry = from_set.items()[t_idx];
                    let t_item = self.items.item(t_entry.item);
                    let next = self.items.get_item(t_item.rule_id, t_item.dot + 1);
                    if set.start_items().any(|(id, _)| id == next.index()) {
                        edges.push(ReductionEdge {
                            column: column_index,
                            into: next.index(),
                            completed: item_id,
                            predecessor: t_entry.item,
                        });
                    }
                }
            }
        }

        ReductionGraph::new(edges)
    }
}

fn core_has_derived(entries: &[CoreEntry], num_start_items: usize, item: ItemId) -> bool {
    entries[num_start_items..].iter().any(|entry| entry.item == item)
}
