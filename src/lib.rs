//! # spell-index
//!
//! In-memory indexes for categorized spells.
//!
//! - [`SpellTree`]: AVL tree of one category's spells ordered by power level,
//!   with exact search and top-k retrieval.
//! - [`DoubleHashTable`]: fixed-capacity open-addressing table from spell name
//!   to casting words, resolving collisions with double hashing.
//! - [`CategoryIndex`]: chained hash table of categories, each bucket holding
//!   the trees of the categories that hash to it.
//!
//! None of the structures resize or delete. Capacity exhaustion and bad
//! construction parameters surface as [`IndexError`]; missing entries as `None`.
//!
//! ## Example
//!
//! ```rust
//! use spell_index::{CategoryIndex, Spell};
//!
//! let mut index = CategoryIndex::new(5).unwrap();
//! index.add_record(Spell::new("Ember", "fire", 10, "ignis"));
//! index.add_record(Spell::new("Inferno", "fire", 90, "ignis maxima"));
//! index.add_record(Spell::new("Frost", "ice", 15, "gelu"));
//!
//! assert_eq!(index.count_all(), 3);
//! assert_eq!(index.count_in_category("fire"), 2);
//!
//! let top = index.top_k("fire", 1).unwrap();
//! assert_eq!(top[0].name(), "Inferno");
//! assert!(index.top_k("wind", 3).is_none());
//! ```

#![deny(unsafe_code)]
#![warn(clippy::all)]

pub mod avl;
pub mod category_index;
pub mod config;
pub mod double_hash;
pub mod error;
pub mod shared;
pub mod spell;

pub use avl::SpellTree;
pub use category_index::{AddOutcome, CategoryIndex};
pub use config::IndexConfig;
pub use double_hash::{DoubleHashTable, Lookup};
pub use error::{IndexError, Result};
pub use shared::SharedCategoryIndex;
pub use spell::{SimpleSpell, Spell};

#[cfg(test)]
mod proptests;
