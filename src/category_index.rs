//! Two-level spell index: category buckets, then one [`SpellTree`] per category.
//!
//! The bucket of a category is the sum of its character codes modulo the
//! bucket count. Categories that share a bucket are told apart by a linear
//! scan comparing category names, so each category has exactly one tree.

use tracing::{debug, trace};

use crate::avl::SpellTree;
use crate::config::IndexConfig;
use crate::error::{IndexError, Result};
use crate::spell::{char_code_sum, Spell};

/// What [`CategoryIndex::add_record`] did with a spell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddOutcome {
    /// First spell of its category; a new tree was created for it.
    Created,
    /// Stored in the existing tree of its category.
    Inserted,
    /// A spell with the same name and power level is already indexed.
    Duplicate,
    /// The power level is held by a differently named spell in the category.
    LevelTaken,
}

impl AddOutcome {
    #[inline]
    pub fn is_stored(self) -> bool {
        matches!(self, AddOutcome::Created | AddOutcome::Inserted)
    }
}

#[derive(Clone, Debug)]
pub struct CategoryIndex {
    buckets: Vec<Vec<SpellTree>>,
    total: usize,
}

impl CategoryIndex {
    pub fn new(bucket_count: usize) -> Result<Self> {
        if bucket_count == 0 {
            return Err(IndexError::InvalidBucketCount);
        }
        Ok(Self {
            buckets: (0..bucket_count).map(|_| Vec::new()).collect(),
            total: 0,
        })
    }

    pub fn with_config(config: &IndexConfig) -> Result<Self> {
        Self::new(config.bucket_count)
    }

    #[inline]
    pub fn bucket_count(&self) -> usize {
        self.buckets.len()
    }

    /// Total number of spells stored across all categories.
    #[inline]
    pub fn count_all(&self) -> usize {
        self.total
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.total == 0
    }

    /// Number of spells stored in `category`, 0 if the category is unknown.
    pub fn count_in_category(&self, category: &str) -> usize {
        self.category(category).map_or(0, SpellTree::len)
    }

    /// Route `spell` to its category's tree, creating the tree if needed.
    ///
    /// Spells already present by `(name, power_level)` are skipped, as are
    /// spells whose power level is held by another name in the category.
    /// Only stored spells count towards [`count_all`](Self::count_all).
    pub fn add_record(&mut self, spell: Spell) -> AddOutcome {
        let bucket = self.bucket_of(spell.category());
        let trees = &mut self.buckets[bucket];

        let outcome = match trees.iter_mut().find(|t| t.category() == spell.category()) {
            Some(tree) => {
                if tree.search(spell.name(), spell.power_level()).is_some() {
                    AddOutcome::Duplicate
                } else if tree.insert(spell) {
                    AddOutcome::Inserted
                } else {
                    AddOutcome::LevelTaken
                }
            }
            None => {
                debug!(category = spell.category(), bucket, "new category tree");
                trees.push(SpellTree::new(spell));
                AddOutcome::Created
            }
        };

        if outcome.is_stored() {
            self.total += 1;
        } else {
            trace!(?outcome, "spell not stored");
        }
        outcome
    }

    pub fn search(&self, category: &str, name: &str, power_level: i32) -> Option<&Spell> {
        self.category(category)?.search(name, power_level)
    }

    /// The `k` most powerful spells of `category`, highest first.
    ///
    /// `None` when the category has never been seen, as opposed to an empty
    /// list for `k == 0`.
    pub fn top_k(&self, category: &str, k: usize) -> Option<Vec<&Spell>> {
        self.category(category).map(|tree| tree.top_k(k))
    }

    /// The tree holding `category`, if any spell of that category was added.
    pub fn category(&self, category: &str) -> Option<&SpellTree> {
        self.buckets[self.bucket_of(category)]
            .iter()
            .find(|t| t.category() == category)
    }

    /// Every category tree, in bucket order.
    pub fn categories(&self) -> impl Iterator<Item = &SpellTree> {
        self.buckets.iter().flatten()
    }

    pub fn memory_usage(&self) -> usize {
        self.buckets.capacity() * std::mem::size_of::<Vec<SpellTree>>()
            + self
                .buckets
                .iter()
                .map(|b| b.capacity() * std::mem::size_of::<SpellTree>())
                .sum::<usize>()
            + self.categories().map(SpellTree::memory_usage).sum::<usize>()
    }

    #[inline]
    fn bucket_of(&self, category: &str) -> usize {
        (char_code_sum(category) % self.buckets.len() as u64) as usize
    }
}
