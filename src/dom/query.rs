//! Tree queries: by DOM id, class, tag; generic predicate matching.

use super::node::{ElementData, ElementId};
use super::tree::Tree;

impl Tree {
    /// Find the element whose DOM `id` attribute equals `dom_id`.
    pub fn query_by_dom_id(&self, dom_id: &str) -> Option<ElementId> {
        self.nodes
            .iter()
            .find(|(_, data)| data.dom_id() == dom_id)
            .map(|(id, _)| id)
    }

    /// All elements whose class list contains `class` as a whole token.
    pub fn query_by_class(&self, class: &str) -> Vec<ElementId> {
        self.query_all(|data| {
            data.classes()
                .is_some_and(|classes| classes.split_whitespace().any(|c| c == class))
        })
    }

    /// All elements with the given tag.
    pub fn query_by_tag(&self, tag: &str) -> Vec<ElementId> {
        self.query_all(|data| data.tag.eq_ignore_ascii_case(tag))
    }

    /// All elements matching an arbitrary predicate, in arena order.
    pub fn query_all(&self, predicate: impl Fn(&ElementData) -> bool) -> Vec<ElementId> {
        self.nodes
            .iter()
            .filter(|(_, data)| predicate(data))
            .map(|(id, _)| id)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use crate::dom::node::{ElementData, ElementKind};
    use crate::dom::tree::Tree;

    fn el(tag: &str, id: &str, class: &str) -> ElementData {
        let mut data = ElementData::new(tag, ElementKind::Element);
        data.attributes.set("id", id);
        if !class.is_empty() {
            data.attributes.set("class", class);
        }
        data
    }

    fn build_query_tree() -> Tree {
        let mut tree = Tree::new();
        let root = tree.insert_root(el("div", "a-0", "card"));
        let _save = tree.insert_child(root, el("button", "a-1", "btn btn-primary"));
        let _cancel = tree.insert_child(root, el("button", "a-2", "btn"));
        let _note = tree.insert_child(root, el("p", "a-3", "btn-note"));
        tree
    }

    #[test]
    fn by_dom_id() {
        let tree = build_query_tree();
        let found = tree.query_by_dom_id("a-2").unwrap();
        assert_eq!(tree.get(found).unwrap().tag(), "button");
        assert!(tree.query_by_dom_id("missing").is_none());
    }

    #[test]
    fn by_class_matches_whole_tokens() {
        let tree = build_query_tree();
        assert_eq!(tree.query_by_class("btn").len(), 2);
        assert_eq!(tree.query_by_class("btn-primary").len(), 1);
        assert!(tree.query_by_class("bt").is_empty());
    }

    #[test]
    fn by_tag() {
        let tree = build_query_tree();
        assert_eq!(tree.query_by_tag("button").len(), 2);
        assert_eq!(tree.query_by_tag("P").len(), 1);
    }

    #[test]
    fn predicate() {
        let tree = build_query_tree();
        let with_class = tree.query_all(|data| data.classes().is_some());
        assert_eq!(with_class.len(), 4);
    }
}
