//! Fixed-capacity name table with double hashing.
//!
//! Slot `i` of the probe sequence for a name is `(h1 + i * h2) % capacity`.
//! The step `h2` is in `1..=capacity - 2`, so it is never zero; when the
//! capacity is prime every step is coprime with it and the sequence visits
//! every slot. Other capacities may leave slots unreachable for some names.
//!
//! Entries are never removed, so an empty slot on the sequence proves the
//! name is absent from the rest of it.

use tracing::{debug, trace, warn};

use crate::config::IndexConfig;
use crate::error::{IndexError, Result};
use crate::spell::{char_code_sum, SimpleSpell};

/// Smallest capacity for which `h2` is well defined.
pub const MIN_CAPACITY: usize = 3;

const H1_WEIGHT: u64 = 31;
const H2_WEIGHT: u64 = 13;

/// Outcome of [`DoubleHashTable::lookup`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Lookup<'a> {
    pub words: Option<&'a str>,
    /// Zero-based probe index at which the search stopped, or the capacity
    /// if the whole sequence was occupied by other names.
    pub probes: usize,
}

pub struct DoubleHashTable {
    slots: Vec<Option<SimpleSpell>>,
    len: usize,
}

impl DoubleHashTable {
    pub fn with_capacity(capacity: usize) -> Result<Self> {
        if capacity < MIN_CAPACITY {
            return Err(IndexError::InvalidCapacity {
                capacity,
                minimum: MIN_CAPACITY,
            });
        }
        Ok(Self {
            slots: (0..capacity).map(|_| None).collect(),
            len: 0,
        })
    }

    pub fn with_config(config: &IndexConfig) -> Result<Self> {
        Self::with_capacity(config.table_capacity)
    }

    #[inline]
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    #[inline]
    pub fn is_full(&self) -> bool {
        self.len == self.capacity()
    }

    pub fn load_factor(&self) -> f64 {
        self.len as f64 / self.capacity() as f64
    }

    pub fn memory_usage(&self) -> usize {
        self.slots.capacity() * std::mem::size_of::<Option<SimpleSpell>>()
            + self.iter().map(SimpleSpell::heap_bytes).sum::<usize>()
    }

    /// Store `spell` in the first free slot of its probe sequence.
    ///
    /// Names are not de-duplicated: putting a name twice stores two entries
    /// and [`lookup`](Self::lookup) finds whichever comes first on the sequence.
    /// Returns the zero-based probe index of the slot used.
    pub fn put(&mut self, spell: SimpleSpell) -> Result<usize> {
        let capacity = self.capacity();
        let (h1, h2) = self.hashes(spell.name());

        for i in 0..capacity {
            let slot = self.slot_for(h1, h2, i);
            if self.slots[slot].is_none() {
                debug!(name = spell.name(), slot, probes = i, "stored spell");
                self.slots[slot] = Some(spell);
                self.len += 1;
                return Ok(i);
            }
            trace!(name = spell.name(), slot, probe = i, "slot occupied");
        }

        warn!(name = spell.name(), capacity, len = self.len, "probe sequence exhausted");
        Err(IndexError::TableFull {
            name: spell.name().to_owned(),
            capacity,
            probes: capacity - 1,
        })
    }

    /// Find the casting words stored under `name`, with the probe count.
    pub fn lookup(&self, name: &str) -> Lookup<'_> {
        let capacity = self.capacity();
        let (h1, h2) = self.hashes(name);

        for i in 0..capacity {
            let slot = self.slot_for(h1, h2, i);
            match &self.slots[slot] {
                None => {
                    return Lookup {
                        words: None,
                        probes: i,
                    }
                }
                Some(spell) if spell.name() == name => {
                    return Lookup {
                        words: Some(spell.words()),
                        probes: i,
                    }
                }
                Some(_) => {}
            }
        }

        Lookup {
            words: None,
            probes: capacity,
        }
    }

    #[inline]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.lookup(name).words
    }

    #[inline]
    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Slot indices visited for `name`, in probe order.
    pub fn probe_sequence(&self, name: &str) -> impl Iterator<Item = usize> + '_ {
        let (h1, h2) = self.hashes(name);
        (0..self.capacity()).map(move |i| self.slot_for(h1, h2, i))
    }

    #[inline]
    pub(crate) fn slot(&self, idx: usize) -> Option<&SimpleSpell> {
        self.slots[idx].as_ref()
    }

    /// Stored spells in slot order.
    pub fn iter(&self) -> impl Iterator<Item = &SimpleSpell> {
        self.slots.iter().flatten()
    }

    #[inline]
    fn hash1(&self, name: &str) -> usize {
        (char_code_sum(name).wrapping_mul(H1_WEIGHT) % self.capacity() as u64) as usize
    }

    #[inline]
    fn hash2(&self, name: &str) -> usize {
        let modulus = (self.capacity() - 2) as u64;
        1 + (char_code_sum(name).wrapping_mul(H2_WEIGHT) % modulus) as usize
    }

    #[inline]
    fn hashes(&self, name: &str) -> (usize, usize) {
        (self.hash1(name), self.hash2(name))
    }

    #[inline]
    fn slot_for(&self, h1: usize, h2: usize, i: usize) -> usize {
        let capacity = self.capacity() as u64;
        ((h1 as u64 + (i as u64) * (h2 as u64)) % capacity) as usize
    }
}

impl std::fmt::Debug for DoubleHashTable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_map()
            .entries(self.iter().map(|s| (s.name(), s.words())))
            .finish()
    }
}
