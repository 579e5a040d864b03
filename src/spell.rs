//! Record types stored by the indexes.

use std::fmt;

/// Sum of the UTF-16 code units of `s`, the character codes every bucket and
/// slot hash in this crate is built from. Characters outside the Basic
/// Multilingual Plane contribute both halves of their surrogate pair.
#[inline]
pub(crate) fn char_code_sum(s: &str) -> u64 {
    s.encode_utf16()
        .fold(0u64, |acc, unit| acc.wrapping_add(u64::from(unit)))
}

/// A categorized spell, ordered by its power level.
///
/// Immutable once built; the indexes hand out shared references to it.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Spell {
    name: String,
    category: String,
    power_level: i32,
    words: String,
}

impl Spell {
    pub fn new(
        name: impl Into<String>,
        category: impl Into<String>,
        power_level: i32,
        words: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            category: category.into(),
            power_level,
            words: words.into(),
        }
    }

    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[inline]
    pub fn category(&self) -> &str {
        &self.category
    }

    #[inline]
    pub fn power_level(&self) -> i32 {
        self.power_level
    }

    /// The words spoken to cast the spell.
    #[inline]
    pub fn words(&self) -> &str {
        &self.words
    }

    /// Approximate heap bytes owned by this record.
    pub(crate) fn heap_bytes(&self) -> usize {
        self.name.capacity() + self.category.capacity() + self.words.capacity()
    }
}

impl fmt::Display for Spell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} ({}) - Power Level: {}, to cast say: {}",
            self.name, self.category, self.power_level, self.words
        )
    }
}

/// Name and casting words only, as stored by [`DoubleHashTable`](crate::DoubleHashTable).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SimpleSpell {
    name: String,
    words: String,
}

impl SimpleSpell {
    pub fn new(name: impl Into<String>, words: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            words: words.into(),
        }
    }

    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[inline]
    pub fn words(&self) -> &str {
        &self.words
    }

    /// Approximate heap bytes owned by this record.
    pub(crate) fn heap_bytes(&self) -> usize {
        self.name.capacity() + self.words.capacity()
    }
}
