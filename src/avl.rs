//! AVL tree of spells for a single category, ordered by power level.
//!
//! Nodes live in a `Vec` arena and link to each other by index, the same way
//! the trie arenas in this workspace address nodes by offset. Nothing is ever
//! removed, so a node's index is stable for the lifetime of the tree and the
//! arena length is the number of stored spells.

use tracing::trace;

use crate::spell::Spell;

// =============================================================================
// Node arena
// =============================================================================

/// Index into the node arena. `NULL` marks an absent child.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub(crate) struct NodeId(u32);

impl NodeId {
    pub(crate) const NULL: NodeId = NodeId(u32::MAX);

    /// Id for arena slot `idx`, `None` once the slot would collide with `NULL`.
    #[inline]
    fn from_index(idx: usize) -> Option<NodeId> {
        u32::try_from(idx)
            .ok()
            .filter(|&raw| raw != u32::MAX)
            .map(NodeId)
    }

    #[inline]
    pub(crate) fn is_null(self) -> bool {
        self == Self::NULL
    }

    #[inline]
    fn idx(self) -> usize {
        debug_assert!(!self.is_null());
        self.0 as usize
    }
}

#[derive(Clone, Debug)]
pub(crate) struct Node {
    pub(crate) spell: Spell,
    pub(crate) left: NodeId,
    pub(crate) right: NodeId,
    /// Leaf height is 0; an absent child counts as -1.
    pub(crate) height: i32,
}

// =============================================================================
// SpellTree
// =============================================================================

/// Height-balanced search tree holding at most one spell per power level.
///
/// The category is taken from the seed spell and never changes. Node ids are
/// 32-bit, so a tree holds at most `u32::MAX - 1` spells; inserting past that
/// panics.
#[derive(Clone, Debug)]
pub struct SpellTree {
    nodes: Vec<Node>,
    root: NodeId,
    category: String,
}

impl SpellTree {
    /// Create a tree for `seed`'s category with `seed` as its only spell.
    pub fn new(seed: Spell) -> Self {
        let category = seed.category().to_owned();
        let mut tree = Self {
            nodes: Vec::new(),
            root: NodeId::NULL,
            category,
        };
        tree.root = tree.alloc(seed);
        tree
    }

    #[inline]
    pub fn category(&self) -> &str {
        &self.category
    }

    /// Number of spells stored. Rejected duplicates are not counted.
    #[inline]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Height of the root, -1 for an empty tree.
    #[inline]
    pub fn height(&self) -> i32 {
        self.height_of(self.root)
    }

    pub fn memory_usage(&self) -> usize {
        self.nodes.capacity() * std::mem::size_of::<Node>()
            + self.nodes.iter().map(|n| n.spell.heap_bytes()).sum::<usize>()
            + self.category.capacity()
    }

    /// Insert `spell` keyed by its power level.
    ///
    /// Returns `false` and drops `spell` when a spell with the same power
    /// level is already stored, whatever its name.
    pub fn insert(&mut self, spell: Spell) -> bool {
        debug_assert_eq!(spell.category(), self.category, "spell routed to wrong tree");
        let level = spell.power_level();
        if self.find_level(level).is_some() {
            trace!(category = %self.category, level, "power level already taken");
            return false;
        }
        self.root = self.insert_at(self.root, spell);
        true
    }

    /// Find the spell at `power_level`, but only if it is named `name`.
    pub fn search(&self, name: &str, power_level: i32) -> Option<&Spell> {
        self.get_by_level(power_level)
            .filter(|spell| spell.name() == name)
    }

    pub fn get_by_level(&self, power_level: i32) -> Option<&Spell> {
        self.find_level(power_level)
            .map(|id| &self.nodes[id.idx()].spell)
    }

    pub fn contains_level(&self, power_level: i32) -> bool {
        self.find_level(power_level).is_some()
    }

    /// The `k` most powerful spells, highest power level first.
    ///
    /// Returns every spell when `k` exceeds [`len`](Self::len).
    pub fn top_k(&self, k: usize) -> Vec<&Spell> {
        let k = k.min(self.len());
        let mut out = Vec::with_capacity(k);
        out.extend(self.iter_desc().take(k));
        out
    }

    /// Spells in ascending power level order.
    pub fn iter(&self) -> Iter<'_> {
        Iter::new(self, false)
    }

    /// Spells in descending power level order.
    pub fn iter_desc(&self) -> Iter<'_> {
        Iter::new(self, true)
    }

    // === Internals ===

    pub(crate) fn root(&self) -> NodeId {
        self.root
    }

    pub(crate) fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.idx()]
    }

    fn alloc(&mut self, spell: Spell) -> NodeId {
        let Some(id) = NodeId::from_index(self.nodes.len()) else {
            panic!("spell tree is full: {} nodes", self.nodes.len());
        };
        self.nodes.push(Node {
            spell,
            left: NodeId::NULL,
            right: NodeId::NULL,
            height: 0,
        });
        id
    }

    fn find_level(&self, power_level: i32) -> Option<NodeId> {
        let mut cur = self.root;
        while !cur.is_null() {
            let node = &self.nodes[cur.idx()];
            let level = node.spell.power_level();
            if power_level < level {
                cur = node.left;
            } else if power_level > level {
                cur = node.right;
            } else {
                return Some(cur);
            }
        }
        None
    }

    #[inline]
    fn height_of(&self, id: NodeId) -> i32 {
        if id.is_null() {
            -1
        } else {
            self.nodes[id.idx()].height
        }
    }

    #[inline]
    fn level_of(&self, id: NodeId) -> i32 {
        self.nodes[id.idx()].spell.power_level()
    }

    fn update_height(&mut self, id: NodeId) {
        let node = &self.nodes[id.idx()];
        let h = self.height_of(node.left).max(self.height_of(node.right)) + 1;
        self.nodes[id.idx()].height = h;
    }

    fn balance_of(&self, id: NodeId) -> i32 {
        let node = &self.nodes[id.idx()];
        self.height_of(node.left) - self.height_of(node.right)
    }

    /// Insert below `id` and return the (possibly rotated) subtree root.
    ///
    /// The caller has already checked that the level is free.
    fn insert_at(&mut self, id: NodeId, spell: Spell) -> NodeId {
        if id.is_null() {
            return self.alloc(spell);
        }

        let level = spell.power_level();
        let current = self.level_of(id);
        if level < current {
            let left = self.nodes[id.idx()].left;
            let child = self.insert_at(left, spell);
            self.nodes[id.idx()].left = child;
        } else if level > current {
            let right = self.nodes[id.idx()].right;
            let child = self.insert_at(right, spell);
            self.nodes[id.idx()].right = child;
        } else {
            return id;
        }

        self.update_height(id);
        self.rebalance(id, level)
    }

    /// Restore the AVL invariant at `id` after inserting `level` below it.
    fn rebalance(&mut self, id: NodeId, level: i32) -> NodeId {
        let balance = self.balance_of(id);

        if balance > 1 {
            let left = self.nodes[id.idx()].left;
            if level < self.level_of(left) {
                return self.rotate_right(id);
            }
            if level > self.level_of(left) {
                let new_left = self.rotate_left(left);
                self.nodes[id.idx()].left = new_left;
                return self.rotate_right(id);
            }
        }

        if balance < -1 {
            let right = self.nodes[id.idx()].right;
            if level > self.level_of(right) {
                return self.rotate_left(id);
            }
            if level < self.level_of(right) {
                let new_right = self.rotate_right(right);
                self.nodes[id.idx()].right = new_right;
                return self.rotate_left(id);
            }
        }

        id
    }

    fn rotate_right(&mut self, id: NodeId) -> NodeId {
        let pivot = self.nodes[id.idx()].left;
        let moved = self.nodes[pivot.idx()].right;
        self.nodes[pivot.idx()].right = id;
        self.nodes[id.idx()].left = moved;
        self.update_height(id);
        self.update_height(pivot);
        trace!(
            root = self.nodes[pivot.idx()].spell.name(),
            height = self.nodes[pivot.idx()].height,
            "rotated right"
        );
        pivot
    }

    fn rotate_left(&mut self, id: NodeId) -> NodeId {
        let pivot = self.nodes[id.idx()].right;
        let moved = self.nodes[pivot.idx()].left;
        self.nodes[pivot.idx()].left = id;
        self.nodes[id.idx()].right = moved;
        self.update_height(id);
        self.update_height(pivot);
        trace!(
            root = self.nodes[pivot.idx()].spell.name(),
            height = self.nodes[pivot.idx()].height,
            "rotated left"
        );
        pivot
    }
}

// =============================================================================
// Iteration
// =============================================================================

/// In-order walk over a [`SpellTree`], in either direction.
pub struct Iter<'a> {
    tree: &'a SpellTree,
    stack: Vec<NodeId>,
    descending: bool,
}

impl<'a> Iter<'a> {
    fn new(tree: &'a SpellTree, descending: bool) -> Self {
        let mut it = Self {
            tree,
            stack: Vec::with_capacity((tree.height() + 1).max(0) as usize),
            descending,
        };
        it.push_spine(tree.root);
        it
    }

    fn push_spine(&mut self, mut id: NodeId) {
        while !id.is_null() {
            self.stack.push(id);
            let node = self.tree.node(id);
            id = if self.descending { node.right } else { node.left };
        }
    }
}

impl<'a> Iterator for Iter<'a> {
    type Item = &'a Spell;

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.stack.pop()?;
        let node = self.tree.node(id);
        self.push_spine(if self.descending { node.left } else { node.right });
        Some(&node.spell)
    }
}

impl<'a> IntoIterator for &'a SpellTree {
    type Item = &'a Spell;
    type IntoIter = Iter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
