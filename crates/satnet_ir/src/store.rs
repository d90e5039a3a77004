//! The indexed entity store.
//!
//! [`Store`] holds one table per entity kind, each keyed by the entity's
//! uniqueness key. Inserts are insert-if-absent: a row whose key is already
//! present is dropped and the insert reports `false`. Secondary indexes back
//! the join patterns the rewrite rules need:
//!
//! - binary gates by `(b, type)` (demux discovery),
//! - flip-flops by `(c, e)` (flip-flop grouping).
//!
//! All tables are ordered maps, so every scan is deterministic.

use crate::changeset::{ApplyOutcome, ChangeSet};
use crate::entity::{
    BinaryGate, BinaryKey, Concat, ConcatKey, Entity, FlipFlop, FlipFlopKey, Mux, Selector,
    SelectorKey, UnaryGate, UnaryKey, Wire,
};
use satnet_common::{ContentHash, ContentHasher, GateType, NodeId, UnaryType};
use std::collections::{BTreeMap, BTreeSet, HashMap};

/// Row counts per table.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub struct StoreCounts {
    /// Number of wires.
    pub wires: usize,
    /// Number of binary gates.
    pub binary_gates: usize,
    /// Number of unary gates.
    pub unary_gates: usize,
    /// Number of flip-flops.
    pub flip_flops: usize,
    /// Number of selectors.
    pub selectors: usize,
    /// Number of concats.
    pub concats: usize,
    /// Number of muxes.
    pub muxes: usize,
}

impl StoreCounts {
    /// Total number of rows across all tables.
    pub fn total(&self) -> usize {
        self.wires
            + self.binary_gates
            + self.unary_gates
            + self.flip_flops
            + self.selectors
            + self.concats
            + self.muxes
    }
}

/// In-memory relational store for a netlist.
#[derive(Debug, Clone, Default)]
pub struct Store {
    wires: BTreeMap<NodeId, Wire>,
    binary_gates: BTreeMap<BinaryKey, BinaryGate>,
    unary_gates: BTreeMap<UnaryKey, UnaryGate>,
    flip_flops: BTreeMap<FlipFlopKey, FlipFlop>,
    selectors: BTreeMap<SelectorKey, Selector>,
    concats: BTreeMap<ConcatKey, Concat>,
    muxes: BTreeSet<Mux>,

    binary_by_b: HashMap<(NodeId, GateType), BTreeSet<BinaryKey>>,
    flip_flops_by_ce: BTreeMap<(NodeId, NodeId), BTreeSet<FlipFlopKey>>,

    /// Largest wire ID ever referenced by an inserted row.
    max_id: Option<NodeId>,
}

impl Store {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    // --- Inserts ---

    /// Inserts a wire unless one with the same ID exists. Returns `true` if inserted.
    pub fn insert_wire(&mut self, wire: Wire) -> bool {
        if self.wires.contains_key(&wire.id) {
            return false;
        }
        self.note_ids(&[wire.id]);
        self.wires.insert(wire.id, wire);
        true
    }

    /// Inserts a binary gate unless its `(a, b, type)` key exists.
    pub fn insert_binary_gate(&mut self, gate: BinaryGate) -> bool {
        let key = gate.key();
        if self.binary_gates.contains_key(&key) {
            return false;
        }
        self.note_ids(&[gate.a, gate.b, gate.y]);
        self.binary_by_b
            .entry((gate.b, gate.ty))
            .or_default()
            .insert(key);
        self.binary_gates.insert(key, gate);
        true
    }

    /// Inserts a unary gate unless its `(a, type)` key exists.
    pub fn insert_unary_gate(&mut self, gate: UnaryGate) -> bool {
        let key = gate.key();
        if self.unary_gates.contains_key(&key) {
            return false;
        }
        self.note_ids(&[gate.a, gate.y]);
        self.unary_gates.insert(key, gate);
        true
    }

    /// Inserts a flip-flop unless its `(d, c, e)` key exists.
    pub fn insert_flip_flop(&mut self, ff: FlipFlop) -> bool {
        let key = ff.key();
        if self.flip_flops.contains_key(&key) {
            return false;
        }
        self.note_ids(&[ff.d, ff.c, ff.e, ff.q]);
        self.flip_flops_by_ce
            .entry((ff.c, ff.e))
            .or_default()
            .insert(key);
        self.flip_flops.insert(key, ff);
        true
    }

    /// Inserts a selector unless its `(input, left, right)` key exists.
    pub fn insert_selector(&mut self, sel: Selector) -> bool {
        let key = sel.key();
        if self.selectors.contains_key(&key) {
            return false;
        }
        self.note_ids(&[sel.input, sel.output]);
        self.selectors.insert(key, sel);
        true
    }

    /// Inserts a concat unless its `(output, left, right)` key exists.
    pub fn insert_concat(&mut self, concat: Concat) -> bool {
        let key = concat.key();
        if self.concats.contains_key(&key) {
            return false;
        }
        self.note_ids(&[concat.input, concat.output]);
        self.concats.insert(key, concat);
        true
    }

    /// Inserts a mux unless an identical row exists.
    pub fn insert_mux(&mut self, mux: Mux) -> bool {
        if self.muxes.contains(&mux) {
            return false;
        }
        self.note_ids(&[mux.a, mux.b, mux.s, mux.y]);
        self.muxes.insert(mux);
        true
    }

    /// Inserts a row of any kind. Returns `true` if inserted.
    pub fn insert(&mut self, entity: Entity) -> bool {
        match entity {
            Entity::Wire(w) => self.insert_wire(w),
            Entity::BinaryGate(g) => self.insert_binary_gate(g),
            Entity::UnaryGate(g) => self.insert_unary_gate(g),
            Entity::FlipFlop(f) => self.insert_flip_flop(f),
            Entity::Selector(s) => self.insert_selector(s),
            Entity::Concat(c) => self.insert_concat(c),
            Entity::Mux(m) => self.insert_mux(m),
        }
    }

    /// Bulk insert-if-absent. Returns how many rows were actually inserted.
    pub fn insert_all<I>(&mut self, rows: I) -> usize
    where
        I: IntoIterator,
        I::Item: Into<Entity>,
    {
        rows.into_iter()
            .map(|row| self.insert(row.into()))
            .filter(|inserted| *inserted)
            .count()
    }

    // --- Deletes ---

    /// Removes the flip-flop with the given key, if present.
    pub fn remove_flip_flop(&mut self, key: FlipFlopKey) -> Option<FlipFlop> {
        let ff = self.flip_flops.remove(&key)?;
        if let Some(group) = self.flip_flops_by_ce.get_mut(&(key.c, key.e)) {
            group.remove(&key);
            if group.is_empty() {
                self.flip_flops_by_ce.remove(&(key.c, key.e));
            }
        }
        Some(ff)
    }

    /// Removes every flip-flop clocked by `c` with enable `e`, returning them in key order.
    pub fn remove_flip_flops(&mut self, c: NodeId, e: NodeId) -> Vec<FlipFlop> {
        let keys = self.flip_flops_by_ce.remove(&(c, e)).unwrap_or_default();
        keys.into_iter()
            .filter_map(|key| self.flip_flops.remove(&key))
            .collect()
    }

    /// Applies every removal and insert of a change set in one step.
    ///
    /// Removals run first so a change set can replace rows that share a key
    /// with their replacement.
    pub fn apply(&mut self, changes: ChangeSet) -> ApplyOutcome {
        let mut outcome = ApplyOutcome::default();
        for key in changes.removals {
            if self.remove_flip_flop(key).is_some() {
                outcome.removed += 1;
            }
        }
        for row in changes.inserts {
            if self.insert(row) {
                outcome.inserted += 1;
            } else {
                outcome.duplicates += 1;
            }
        }
        outcome
    }

    // --- Point lookups ---

    /// Returns the wire with the given ID.
    pub fn wire(&self, id: NodeId) -> Option<&Wire> {
        self.wires.get(&id)
    }

    /// Returns the width of the wire with the given ID.
    pub fn wire_width(&self, id: NodeId) -> Option<u32> {
        self.wires.get(&id).map(|w| w.width)
    }

    /// Returns the binary gate with key `(a, b, ty)`.
    pub fn binary_gate(&self, a: NodeId, b: NodeId, ty: GateType) -> Option<&BinaryGate> {
        self.binary_gates.get(&BinaryKey { a, b, ty })
    }

    /// Returns the unary gate with key `(a, ty)`.
    pub fn unary_gate(&self, a: NodeId, ty: UnaryType) -> Option<&UnaryGate> {
        self.unary_gates.get(&UnaryKey { a, ty })
    }

    /// Returns the flip-flop with key `(d, c, e)`.
    pub fn flip_flop(&self, d: NodeId, c: NodeId, e: NodeId) -> Option<&FlipFlop> {
        self.flip_flops.get(&FlipFlopKey { d, c, e })
    }

    /// Returns the selector with key `(input, left, right)`.
    pub fn selector(&self, input: NodeId, left: u32, right: u32) -> Option<&Selector> {
        self.selectors.get(&SelectorKey { input, left, right })
    }

    /// Returns the concat with key `(output, left, right)`.
    pub fn concat(&self, output: NodeId, left: u32, right: u32) -> Option<&Concat> {
        self.concats.get(&ConcatKey {
            output,
            left,
            right,
        })
    }

    // --- Indexed lookups ---

    /// Binary gates of type `ty` whose second input is `b`, in key order.
    pub fn binary_gates_with_b(
        &self,
        b: NodeId,
        ty: GateType,
    ) -> impl Iterator<Item = &BinaryGate> + '_ {
        self.binary_by_b
            .get(&(b, ty))
            .into_iter()
            .flat_map(|keys| keys.iter())
            .filter_map(|key| self.binary_gates.get(key))
    }

    /// All binary gates of type `ty`, in key order.
    pub fn binary_gates_by_type(&self, ty: GateType) -> impl Iterator<Item = &BinaryGate> + '_ {
        self.binary_gates.values().filter(move |g| g.ty == ty)
    }

    /// All unary gates of type `ty`, in key order.
    pub fn unary_gates_by_type(&self, ty: UnaryType) -> impl Iterator<Item = &UnaryGate> + '_ {
        self.unary_gates.values().filter(move |g| g.ty == ty)
    }

    /// Flip-flops clocked by `c` with enable `e`, in key order.
    pub fn flip_flops_by_clock_enable(
        &self,
        c: NodeId,
        e: NodeId,
    ) -> impl Iterator<Item = &FlipFlop> + '_ {
        self.flip_flops_by_ce
            .get(&(c, e))
            .into_iter()
            .flat_map(|keys| keys.iter())
            .filter_map(|key| self.flip_flops.get(key))
    }

    /// `(c, e)` pairs shared by more than one flip-flop, in ascending order.
    ///
    /// Groups are disjoint by construction: every flip-flop has exactly one
    /// `(c, e)` pair.
    pub fn flip_flop_groups(&self) -> Vec<(NodeId, NodeId)> {
        self.flip_flops_by_ce
            .iter()
            .filter(|(_, keys)| keys.len() > 1)
            .map(|(ce, _)| *ce)
            .collect()
    }

    // --- Scans ---

    /// All wires, by ID.
    pub fn wires(&self) -> impl Iterator<Item = &Wire> + '_ {
        self.wires.values()
    }

    /// All binary gates, by key.
    pub fn binary_gates(&self) -> impl Iterator<Item = &BinaryGate> + '_ {
        self.binary_gates.values()
    }

    /// All unary gates, by key.
    pub fn unary_gates(&self) -> impl Iterator<Item = &UnaryGate> + '_ {
        self.unary_gates.values()
    }

    /// All flip-flops, by key.
    pub fn flip_flops(&self) -> impl Iterator<Item = &FlipFlop> + '_ {
        self.flip_flops.values()
    }

    /// All selectors, by key.
    pub fn selectors(&self) -> impl Iterator<Item = &Selector> + '_ {
        self.selectors.values()
    }

    /// All concats, by key.
    pub fn concats(&self) -> impl Iterator<Item = &Concat> + '_ {
        self.concats.values()
    }

    /// All muxes, in row order.
    pub fn muxes(&self) -> impl Iterator<Item = &Mux> + '_ {
        self.muxes.iter()
    }

    /// Every row of every table, tables in schema order.
    pub fn entities(&self) -> impl Iterator<Item = Entity> + '_ {
        self.wires
            .values()
            .map(|&w| Entity::Wire(w))
            .chain(self.binary_gates.values().map(|&g| Entity::BinaryGate(g)))
            .chain(self.unary_gates.values().map(|&g| Entity::UnaryGate(g)))
            .chain(self.flip_flops.values().map(|&f| Entity::FlipFlop(f)))
            .chain(self.selectors.values().map(|&s| Entity::Selector(s)))
            .chain(self.concats.values().map(|&c| Entity::Concat(c)))
            .chain(self.muxes.iter().map(|&m| Entity::Mux(m)))
    }

    // --- Summary ---

    /// Row counts per table.
    pub fn counts(&self) -> StoreCounts {
        StoreCounts {
            wires: self.wires.len(),
            binary_gates: self.binary_gates.len(),
            unary_gates: self.unary_gates.len(),
            flip_flops: self.flip_flops.len(),
            selectors: self.selectors.len(),
            concats: self.concats.len(),
            muxes: self.muxes.len(),
        }
    }

    /// Returns `true` if every table is empty.
    pub fn is_empty(&self) -> bool {
        self.counts().total() == 0
    }

    /// The largest wire ID referenced by any row ever inserted, if any.
    pub fn max_id(&self) -> Option<NodeId> {
        self.max_id
    }

    /// A hash over every row of every table in deterministic order.
    ///
    /// Equal fingerprints mean equal table contents.
    pub fn fingerprint(&self) -> ContentHash {
        let mut hasher = ContentHasher::new();
        for entity in self.entities() {
            hasher.tag(entity.table() as u8);
            match entity {
                Entity::Wire(w) => {
                    hasher.id(w.id).number(w.width);
                }
                Entity::BinaryGate(g) => {
                    hasher.id(g.a).id(g.b).id(g.y).tag(g.ty as u8);
                }
                Entity::UnaryGate(g) => {
                    hasher.id(g.a).id(g.y).tag(g.ty as u8);
                }
                Entity::FlipFlop(f) => {
                    hasher.id(f.d).id(f.c).id(f.e).id(f.q);
                }
                Entity::Selector(s) => {
                    hasher.id(s.input).id(s.output).number(s.left).number(s.right);
                }
                Entity::Concat(c) => {
                    hasher.id(c.input).id(c.output).number(c.left).number(c.right);
                }
                Entity::Mux(m) => {
                    hasher.id(m.a).id(m.b).id(m.s).id(m.y);
                }
            }
        }
        hasher.finish()
    }

    fn note_ids(&mut self, ids: &[NodeId]) {
        if let Some(&largest) = ids.iter().max() {
            self.max_id = Some(self.max_id.map_or(largest, |m| m.max(largest)));
        }
    }
}
