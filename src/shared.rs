//! Lock-guarded category index for use across threads.
//!
//! The index structures themselves are single-threaded. This wrapper puts one
//! [`CategoryIndex`] behind a `parking_lot::RwLock`: a writer excludes every
//! reader, and readers get owned copies so no reference outlives the lock.

use parking_lot::RwLock;

use crate::category_index::{AddOutcome, CategoryIndex};
use crate::config::IndexConfig;
use crate::error::Result;
use crate::spell::Spell;

pub struct SharedCategoryIndex {
    inner: RwLock<CategoryIndex>,
}

impl SharedCategoryIndex {
    pub fn new(bucket_count: usize) -> Result<Self> {
        Ok(Self::from_index(CategoryIndex::new(bucket_count)?))
    }

    pub fn with_config(config: &IndexConfig) -> Result<Self> {
        Ok(Self::from_index(CategoryIndex::with_config(config)?))
    }

    pub fn from_index(index: CategoryIndex) -> Self {
        Self {
            inner: RwLock::new(index),
        }
    }

    pub fn add_record(&self, spell: Spell) -> AddOutcome {
        self.inner.write().add_record(spell)
    }

    pub fn search(&self, category: &str, name: &str, power_level: i32) -> Option<Spell> {
        self.inner
            .read()
            .search(category, name, power_level)
            .cloned()
    }

    pub fn top_k(&self, category: &str, k: usize) -> Option<Vec<Spell>> {
        let inner = self.inner.read();
        inner
            .top_k(category, k)
            .map(|spells| spells.into_iter().cloned().collect())
    }

    pub fn count_all(&self) -> usize {
        self.inner.read().count_all()
    }

    pub fn count_in_category(&self, category: &str) -> usize {
        self.inner.read().count_in_category(category)
    }

    /// Copy of the whole index as of now.
    pub fn snapshot(&self) -> CategoryIndex {
        self.inner.read().clone()
    }

    pub fn into_inner(self) -> CategoryIndex {
        self.inner.into_inner()
    }
}
