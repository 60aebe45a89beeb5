//! Tree operations: insert, remove, reparent, walk.

use std::collections::VecDeque;

use slotmap::{SecondaryMap, SlotMap};

use super::node::{ElementData, ElementId};

/// Empty slice constant for returning when a node has no children.
const EMPTY_CHILDREN: &[ElementId] = &[];

/// A frame's element tree, backed by a slotmap arena.
///
/// All elements live in a single `SlotMap`. Parent/child relationships are
/// stored in secondary maps. Top-level elements are kept in an ordered root
/// list, so a frame may hold several sibling trees.
pub struct Tree {
    pub(crate) nodes: SlotMap<ElementId, ElementData>,
    children: SecondaryMap<ElementId, Vec<ElementId>>,
    parent: SecondaryMap<ElementId, ElementId>,
    roots: Vec<ElementId>,
}

impl Tree {
    /// Create an empty tree.
    pub fn new() -> Self {
        Self {
            nodes: SlotMap::with_key(),
            children: SecondaryMap::new(),
            parent: SecondaryMap::new(),
            roots: Vec::new(),
        }
    }

    /// Insert a top-level element, appended to the root list.
    pub fn insert_root(&mut self, data: ElementData) -> ElementId {
        let id = self.nodes.insert(data);
        self.children.insert(id, Vec::new());
        self.roots.push(id);
        id
    }

    /// Insert an element as the last child of `parent`.
    ///
    /// Falls back to a root insert if `parent` does not exist.
    pub fn insert_child(&mut self, parent: ElementId, data: ElementData) -> ElementId {
        if !self.nodes.contains_key(parent) {
            return self.insert_root(data);
        }
        let id = self.nodes.insert(data);
        self.children.insert(id, Vec::new());
        self.parent.insert(id, parent);
        if let Some(siblings) = self.children.get_mut(parent) {
            siblings.push(id);
        }
        id
    }

    /// Remove an element and all its descendants.
    ///
    /// Returns the `ElementData` for the removed element, or `None` if it
    /// didn't exist.
    pub fn remove(&mut self, id: ElementId) -> Option<ElementData> {
        if !self.nodes.contains_key(id) {
            return None;
        }
        self.detach(id);

        let mut to_remove = VecDeque::new();
        to_remove.push_back(id);
        let mut removed = None;

        while let Some(current) = to_remove.pop_front() {
            if let Some(kids) = self.children.remove(current) {
                to_remove.extend(kids);
            }
            self.parent.remove(current);
            let data = self.nodes.remove(current);
            if current == id {
                removed = data;
            }
        }

        removed
    }

    /// Move `node` (with its subtree) to the end of `new_parent`'s children.
    ///
    /// Returns `false` and leaves the tree untouched if either element is
    /// missing or if the move would make `node` its own ancestor.
    pub fn reparent(&mut self, node: ElementId, new_parent: ElementId) -> bool {
        if !self.nodes.contains_key(node) || !self.nodes.contains_key(new_parent) {
            return false;
        }
        if node == new_parent || self.ancestors(new_parent).contains(&node) {
            return false;
        }

        self.detach(node);
        self.parent.insert(node, new_parent);
        if let Some(siblings) = self.children.get_mut(new_parent) {
            siblings.push(node);
        }
        true
    }

    /// Unlink `node` from its parent's children or from the root list.
    fn detach(&mut self, node: ElementId) {
        match self.parent.remove(node) {
            Some(old_parent) => {
                if let Some(siblings) = self.children.get_mut(old_parent) {
                    siblings.retain(|&child| child != node);
                }
            }
            None => self.roots.retain(|&root| root != node),
        }
    }

    /// Get the parent of an element, if it has one.
    pub fn parent(&self, id: ElementId) -> Option<ElementId> {
        self.parent.get(id).copied()
    }

    /// Children in construction order. Empty if the element has none or
    /// does not exist.
    pub fn children(&self, id: ElementId) -> &[ElementId] {
        self.children
            .get(id)
            .map(Vec::as_slice)
            .unwrap_or(EMPTY_CHILDREN)
    }

    /// Walk from `id` up to its root, collecting ancestors.
    ///
    /// The returned vec does **not** include `id` itself.
    pub fn ancestors(&self, id: ElementId) -> Vec<ElementId> {
        let mut result = Vec::new();
        let mut current = id;
        while let Some(p) = self.parent.get(current).copied() {
            result.push(p);
            current = p;
        }
        result
    }

    pub fn get(&self, id: ElementId) -> Option<&ElementData> {
        self.nodes.get(id)
    }

    pub fn get_mut(&mut self, id: ElementId) -> Option<&mut ElementData> {
        self.nodes.get_mut(id)
    }

    /// Top-level elements in construction order.
    pub fn roots(&self) -> &[ElementId] {
        &self.roots
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn contains(&self, id: ElementId) -> bool {
        self.nodes.contains_key(id)
    }

    /// Drop every element.
    pub fn clear(&mut self) {
        self.nodes.clear();
        self.children.clear();
        self.parent.clear();
        self.roots.clear();
    }

    /// Pre-order depth-first traversal starting from `start`.
    pub fn walk_depth_first(&self, start: ElementId) -> Vec<ElementId> {
        let mut result = Vec::new();
        let mut stack = vec![start];
        while let Some(current) = stack.pop() {
            if !self.nodes.contains_key(current) {
                continue;
            }
            result.push(current);
            // Reverse so the first child is visited first.
            for &child in self.children(current).iter().rev() {
                stack.push(child);
            }
        }
        result
    }
}

impl Default for Tree {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::node::ElementKind;

    fn el(tag: &str) -> ElementData {
        ElementData::new(tag, ElementKind::Element)
    }

    /// Build a small test tree:
    /// ```text
    ///       root        other
    ///      /    \
    ///    a        b
    ///   / \
    ///  c   d
    /// ```
    fn build_tree() -> (Tree, ElementId, ElementId, ElementId, ElementId, ElementId, ElementId) {
        let mut tree = Tree::new();
        let root = tree.insert_root(el("main"));
        let a = tree.insert_child(root, el("section"));
        let b = tree.insert_child(root, el("aside"));
        let c = tree.insert_child(a, el("button"));
        let d = tree.insert_child(a, el("label"));
        let other = tree.insert_root(el("footer"));
        (tree, root, a, b, c, d, other)
    }

    #[test]
    fn roots_in_order() {
        let (tree, root, .., other) = build_tree();
        assert_eq!(tree.roots(), &[root, other]);
    }

    #[test]
    fn insert_child_parent_relationship() {
        let (tree, root, a, _b, c, ..) = build_tree();
        assert_eq!(tree.parent(a), Some(root));
        assert_eq!(tree.parent(c), Some(a));
        assert_eq!(tree.parent(root), None);
    }

    #[test]
    fn insert_child_of_missing_parent_becomes_root() {
        let (mut tree, _root, a, ..) = build_tree();
        tree.remove(a);
        let orphan = tree.insert_child(a, el("span"));
        assert!(tree.roots().contains(&orphan));
        assert_eq!(tree.parent(orphan), None);
    }

    #[test]
    fn children_list() {
        let (tree, root, a, b, c, d, _) = build_tree();
        assert_eq!(tree.children(root), &[a, b]);
        assert_eq!(tree.children(a), &[c, d]);
        assert!(tree.children(c).is_empty());
    }

    #[test]
    fn ancestors() {
        let (tree, root, a, _b, c, ..) = build_tree();
        assert_eq!(tree.ancestors(c), vec![a, root]);
        assert!(tree.ancestors(root).is_empty());
    }

    #[test]
    fn remove_subtree() {
        let (mut tree, root, a, b, c, d, _) = build_tree();
        let removed = tree.remove(a);
        assert_eq!(removed.map(|data| data.tag), Some("section".to_owned()));
        assert!(!tree.contains(a));
        assert!(!tree.contains(c));
        assert!(!tree.contains(d));
        assert_eq!(tree.children(root), &[b]);
        assert_eq!(tree.len(), 3);
    }

    #[test]
    fn remove_root_updates_root_list() {
        let (mut tree, root, .., other) = build_tree();
        tree.remove(root);
        assert_eq!(tree.roots(), &[other]);
        assert_eq!(tree.len(), 1);
    }

    #[test]
    fn remove_nonexistent() {
        let mut tree = Tree::new();
        let id = tree.insert_root(el("x"));
        tree.remove(id);
        assert!(tree.remove(id).is_none());
    }

    #[test]
    fn reparent_moves_subtree() {
        let (mut tree, root, a, b, c, _d, _) = build_tree();
        assert!(tree.reparent(c, b));
        assert_eq!(tree.parent(c), Some(b));
        assert!(!tree.children(a).contains(&c));
        assert_eq!(tree.children(b), &[c]);
        assert_eq!(tree.ancestors(c), vec![b, root]);
    }

    #[test]
    fn reparent_root_leaves_root_list() {
        let (mut tree, root, _a, b, .., other) = build_tree();
        assert!(tree.reparent(other, b));
        assert_eq!(tree.roots(), &[root]);
        assert_eq!(tree.children(b), &[other]);
    }

    #[test]
    fn reparent_rejects_cycles() {
        let (mut tree, root, a, _b, c, ..) = build_tree();
        assert!(!tree.reparent(a, c));
        assert!(!tree.reparent(root, root));
        assert_eq!(tree.parent(a), Some(root));
    }

    #[test]
    fn walk_depth_first() {
        let (tree, root, a, b, c, d, _) = build_tree();
        assert_eq!(tree.walk_depth_first(root), vec![root, a, c, d, b]);
        assert_eq!(tree.walk_depth_first(a), vec![a, c, d]);
    }

    #[test]
    fn clear_empties_everything() {
        let (mut tree, ..) = build_tree();
        tree.clear();
        assert!(tree.is_empty());
        assert!(tree.roots().is_empty());
    }
}
