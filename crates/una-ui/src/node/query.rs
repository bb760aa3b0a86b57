use una_style::{parse_selector_list, SelectorList};

use super::{NodeId, NodeSubject, NodeTree, SelectorError};

impl NodeTree {
    /// First descendant of `root` (pre-order, children in sort order) that
    /// matches `selector`. `root` itself is never returned.
    ///
    /// Walks the whole subtree in the worst case; cache the result if you
    /// query the same node every frame.
    pub fn query_selector(&self, root: NodeId, selector: &str) -> Result<Option<NodeId>, SelectorError> {
        let list = parse_query(selector)?;
        let mut found = self.descendants(root).filter(|&n| self.matches(n, &list));
        let first = found.next();
        if first.is_some() && list.iter().any(|s| s.id.is_some()) && found.next().is_some() {
            log::debug!("selector {selector:?} matches more than one node; using the first");
        }
        Ok(first)
    }

    /// Every descendant of `root` matching `selector`, in document order.
    pub fn query_selector_all(&self, root: NodeId, selector: &str) -> Result<Vec<NodeId>, SelectorError> {
        let list = parse_query(selector)?;
        Ok(self.descendants(root).filter(|&n| self.matches(n, &list)).collect())
    }

    fn descendants(&self, root: NodeId) -> impl Iterator<Item = NodeId> {
        self.subtree(root).into_iter().skip(1)
    }

    fn matches(&self, node: NodeId, list: &SelectorList) -> bool {
        let Some(data) = self.nodes.get(node) else { return false };
        let tags = self.effective_tags(node);
        list.matches(&NodeSubject::new(data, &tags))
    }
}

fn parse_query(selector: &str) -> Result<SelectorList, SelectorError> {
    parse_selector_list(selector).map_err(|source| SelectorError { selector: selector.to_owned(), source })
}

#[cfg(test)]
mod tests {
    use super::*;

    /// root > [A.x, B.x.y]
    fn scene() -> (NodeTree, NodeId, NodeId, NodeId) {
        let mut tree = NodeTree::new();
        let a = tree.build().id("A").class("x").finish().unwrap();
        let b = tree.build().id("B").class("x").class("y").finish().unwrap();
        let root = tree.build().child(a).child(b).finish().unwrap();
        (tree, root, a, b)
    }

    #[test]
    fn class_query_returns_document_order() {
        let (tree, root, a, b) = scene();
        assert_eq!(tree.query_selector_all(root, ".x").unwrap(), vec![a, b]);
        assert_eq!(tree.query_selector(root, ".x").unwrap(), Some(a));
    }

    #[test]
    fn compound_query_needs_every_clause() {
        let (tree, root, _, b) = scene();
        assert_eq!(tree.query_selector(root, "#B.y").unwrap(), Some(b));
        assert_eq!(tree.query_selector(root, "#B.z").unwrap(), None);
        assert!(tree.query_selector_all(root, "#B.z").unwrap().is_empty());
    }

    #[test]
    fn root_is_excluded() {
        let (mut tree, root, a, _) = scene();
        tree.add_class(root, "x").unwrap();
        assert_eq!(tree.query_selector(root, ".x").unwrap(), Some(a));
    }

    #[test]
    fn order_follows_sort_index() {
        let (mut tree, root, a, b) = scene();
        tree.set_sort_index(a, 1).unwrap();
        assert_eq!(tree.query_selector_all(root, ".x").unwrap(), vec![b, a]);
    }

    #[test]
    fn nested_descendants_are_found() {
        let (mut tree, root, a, _) = scene();
        let deep = tree.build().class("deep").finish().unwrap();
        tree.append_child(a, deep).unwrap();
        assert_eq!(tree.query_selector(root, "node.deep").unwrap(), Some(deep));
    }

    #[test]
    fn pseudo_clauses_match_tags() {
        let (mut tree, root, _, b) = scene();
        tree.set_tag(b, "hover", true).unwrap();
        assert_eq!(tree.query_selector_all(root, ":hover").unwrap(), vec![b]);
    }

    #[test]
    fn invalid_selector_is_an_error() {
        let (tree, root, _, _) = scene();
        let err = tree.query_selector(root, ".").unwrap_err();
        assert_eq!(err.selector, ".");
        assert!(tree.query_selector_all(root, "#").is_err());
    }
}
