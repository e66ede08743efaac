//! Element tree of one page.
//!
//! Elements live in an arena indexed by [`ElementId`]. Removal tombstones the
//! slot instead of shifting it, so ids held elsewhere (for example an overflow
//! link) simply stop resolving.

use crate::element::{Element, ElementId};
use crate::errors::LayoutError;
use crate::geometry::Rect;

/// Plain-data copy of the solver-visible state of every element.
///
/// Two snapshots compare equal when no condition changed any geometry or
/// text content between them.
#[derive(Debug, Clone, PartialEq)]
pub struct Snapshot(Vec<Option<(Rect, Option<f64>)>>);

/// Arena-backed element tree with a single root.
#[derive(Debug, Clone)]
pub struct ElementTree {
    /// All slots; `None` marks a removed element
    slots: Vec<Option<Element>>,
    root: ElementId,
}

impl ElementTree {
    /// Create a tree holding only `root`.
    pub fn new(mut root: Element) -> Self {
        root.parent = None;
        root.children.clear();
        Self {
            slots: vec![Some(root)],
            root: ElementId(0),
        }
    }

    pub fn root(&self) -> ElementId {
        self.root
    }

    /// Store a detached element and return its id.
    pub fn insert(&mut self, mut element: Element) -> ElementId {
        let id = ElementId(self.slots.len() as u32);
        element.parent = None;
        element.children.clear();
        self.slots.push(Some(element));
        id
    }

    /// Append `child` to the children of `parent`.
    ///
    /// A child that already has a parent is moved. Fails without touching the
    /// tree when either id is unknown or when `child` is `parent` or one of
    /// its ancestors.
    pub fn add_child(&mut self, parent: ElementId, child: ElementId) -> Result<(), LayoutError> {
        self.require(parent)?;
        self.require(child)?;
        if child == parent || child == self.root || self.is_ancestor(child, parent) {
            return Err(LayoutError::Cycle { parent, child });
        }

        self.detach(child);
        if let Some(node) = self.slot_mut(child) {
            node.parent = Some(parent);
        }
        if let Some(node) = self.slot_mut(parent) {
            node.children.push(child);
        }
        Ok(())
    }

    /// Tombstone `id` and its whole subtree.
    pub fn remove(&mut self, id: ElementId) -> Result<(), LayoutError> {
        self.require(id)?;
        if id == self.root {
            return Err(LayoutError::RootRemoval);
        }
        self.detach(id);
        let mut stack = vec![id];
        while let Some(current) = stack.pop() {
            if let Some(element) = self.slots.get_mut(current.index()).and_then(Option::take) {
                stack.extend(element.children);
            }
        }
        Ok(())
    }

    /// Get an element by id.
    pub fn get(&self, id: ElementId) -> Option<&Element> {
        self.slots.get(id.index()).and_then(Option::as_ref)
    }

    /// Get a mutable element by id.
    pub fn get_mut(&mut self, id: ElementId) -> Option<&mut Element> {
        self.slot_mut(id)
    }

    /// Like [`get`](Self::get), but an unknown id is an error.
    pub fn require(&self, id: ElementId) -> Result<&Element, LayoutError> {
        self.get(id).ok_or(LayoutError::UnknownElement(id))
    }

    /// Like [`get_mut`](Self::get_mut), but an unknown id is an error.
    pub fn require_mut(&mut self, id: ElementId) -> Result<&mut Element, LayoutError> {
        self.slot_mut(id).ok_or(LayoutError::UnknownElement(id))
    }

    pub fn contains(&self, id: ElementId) -> bool {
        self.get(id).is_some()
    }

    /// Number of live elements.
    pub fn len(&self) -> usize {
        self.slots.iter().filter(|slot| slot.is_some()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn parent(&self, id: ElementId) -> Option<ElementId> {
        self.get(id).and_then(|e| e.parent)
    }

    /// Children of `id` in flow order.
    pub fn children(&self, id: ElementId) -> &[ElementId] {
        self.get(id).map(|e| e.children.as_slice()).unwrap_or(&[])
    }

    /// Siblings that come before `id` in its parent's flow order.
    pub fn previous_siblings(&self, id: ElementId) -> &[ElementId] {
        let Some(parent) = self.parent(id) else {
            return &[];
        };
        let siblings = self.children(parent);
        let position = siblings.iter().position(|&s| s == id).unwrap_or(0);
        &siblings[..position]
    }

    /// Ancestors of `id`, nearest first.
    pub fn ancestors(&self, id: ElementId) -> impl Iterator<Item = ElementId> + '_ {
        std::iter::successors(self.parent(id), move |&current| self.parent(current))
    }

    /// Whether `ancestor` is a strict ancestor of `id`.
    pub fn is_ancestor(&self, ancestor: ElementId, id: ElementId) -> bool {
        self.ancestors(id).any(|a| a == ancestor)
    }

    /// Ids in solving order: parent before children, children in flow order.
    pub fn pre_order(&self) -> Vec<ElementId> {
        let mut order = Vec::with_capacity(self.slots.len());
        let mut stack = vec![self.root];
        while let Some(id) = stack.pop() {
            order.push(id);
            stack.extend(self.children(id).iter().rev().copied());
        }
        order
    }

    /// Find the first element with the given name, in tree order.
    pub fn find(&self, name: &str) -> Option<ElementId> {
        self.pre_order()
            .into_iter()
            .find(|&id| self.get(id).and_then(|e| e.name.as_deref()) == Some(name))
    }

    /// Combined outer bounds of the children of `id`, in `id`'s frame.
    pub fn children_bounds(&self, id: ElementId) -> Option<Rect> {
        self.children(id)
            .iter()
            .filter_map(|&child| self.get(child))
            .map(Element::outer_rect)
            .reduce(|acc, rect| acc.union(&rect))
    }

    /// Bounds of `id` in top-left page coordinates.
    pub fn absolute_rect(&self, id: ElementId) -> Option<Rect> {
        let rect = self.get(id)?.rect;
        let offset = self
            .ancestors(id)
            .filter_map(|a| self.get(a))
            .fold(rect.position(), |acc, a| acc + a.rect.position());
        Some(Rect::from_vecs(offset, rect.size()))
    }

    /// Capture the layout state of the given elements only.
    pub fn snapshot_of(&self, ids: &[ElementId]) -> Snapshot {
        Snapshot(ids.iter().map(|&id| self.get(id).map(Element::layout_state)).collect())
    }

    /// Capture the layout state of every element.
    pub fn snapshot(&self) -> Snapshot {
        Snapshot(
            self.slots
                .iter()
                .map(|slot| slot.as_ref().map(Element::layout_state))
                .collect(),
        )
    }

    fn slot_mut(&mut self, id: ElementId) -> Option<&mut Element> {
        self.slots.get_mut(id.index()).and_then(Option::as_mut)
    }

    fn detach(&mut self, id: ElementId) {
        let Some(parent) = self.parent(id) else {
            return;
        };
        if let Some(node) = self.slot_mut(parent) {
            node.children.retain(|&c| c != id);
        }
        if let Some(node) = self.slot_mut(id) {
            node.parent = None;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tree_with_chain() -> (ElementTree, ElementId, ElementId, ElementId) {
        let mut tree = ElementTree::new(Element::group(800.0, 600.0).with_name("root"));
        let root = tree.root();
        let a = tree.insert(Element::group(400.0, 300.0).with_name("a").at(10.0, 20.0));
        let b = tree.insert(Element::rect(100.0, 50.0).with_name("b").at(5.0, 5.0));
        tree.add_child(root, a).unwrap();
        tree.add_child(a, b).unwrap();
        (tree, root, a, b)
    }

    #[test]
    fn test_parent_and_children() {
        let (tree, root, a, b) = tree_with_chain();
        assert_eq!(tree.parent(a), Some(root));
        assert_eq!(tree.parent(b), Some(a));
        assert_eq!(tree.parent(root), None);
        assert_eq!(tree.children(root), &[a]);
        assert!(tree.is_ancestor(root, b));
        assert!(!tree.is_ancestor(b, root));
    }

    #[test]
    fn test_cycle_is_rejected_without_mutation() {
        let (mut tree, root, a, b) = tree_with_chain();
        let before = tree.clone();

        assert_eq!(tree.add_child(b, a), Err(LayoutError::Cycle { parent: b, child: a }));
        assert_eq!(tree.add_child(a, a), Err(LayoutError::Cycle { parent: a, child: a }));
        assert!(tree.add_child(b, root).is_err());

        assert_eq!(tree.children(root), before.children(root));
        assert_eq!(tree.children(a), before.children(a));
        assert_eq!(tree.parent(a), Some(root));
        assert_eq!(tree.parent(b), Some(a));
    }

    #[test]
    fn test_add_child_moves_existing_child() {
        let (mut tree, root, a, b) = tree_with_chain();
        tree.add_child(root, b).unwrap();
        assert_eq!(tree.children(a), &[] as &[ElementId]);
        assert_eq!(tree.children(root), &[a, b]);
        assert_eq!(tree.parent(b), Some(root));
    }

    #[test]
    fn test_pre_order() {
        let (mut tree, root, a, b) = tree_with_chain();
        let c = tree.insert(Element::rect(1.0, 1.0));
        tree.add_child(root, c).unwrap();
        assert_eq!(tree.pre_order(), vec![root, a, b, c]);
    }

    #[test]
    fn test_previous_siblings() {
        let mut tree = ElementTree::new(Element::group(100.0, 100.0));
        let root = tree.root();
        let ids: Vec<_> = (0..3).map(|_| tree.insert(Element::rect(1.0, 1.0))).collect();
        for &id in &ids {
            tree.add_child(root, id).unwrap();
        }
        assert!(tree.previous_siblings(ids[0]).is_empty());
        assert_eq!(tree.previous_siblings(ids[2]), &ids[..2]);
        assert!(tree.previous_siblings(root).is_empty());
    }

    #[test]
    fn test_remove_tombstones_subtree() {
        let (mut tree, root, a, b) = tree_with_chain();
        tree.remove(a).unwrap();
        assert!(!tree.contains(a));
        assert!(!tree.contains(b));
        assert!(tree.children(root).is_empty());
        assert_eq!(tree.len(), 1);
        assert_eq!(tree.remove(root), Err(LayoutError::RootRemoval));
        assert_eq!(tree.remove(a), Err(LayoutError::UnknownElement(a)));

        // Ids are not reused.
        let c = tree.insert(Element::rect(1.0, 1.0));
        assert_ne!(c, a);
        assert_ne!(c, b);
    }

    #[test]
    fn test_absolute_rect_and_children_bounds() {
        let (mut tree, root, a, b) = tree_with_chain();
        let abs = tree.absolute_rect(b).unwrap();
        assert_eq!(abs, Rect::new(15.0, 25.0, 100.0, 50.0));

        let c = tree.insert(Element::rect(20.0, 20.0).at(200.0, 100.0));
        tree.add_child(a, c).unwrap();
        assert_eq!(tree.children_bounds(a), Some(Rect::new(5.0, 5.0, 215.0, 115.0)));
        assert_eq!(tree.children_bounds(b), None);
        assert_eq!(tree.find("b"), Some(b));
        assert_eq!(tree.find("missing"), None);
        let _ = root;
    }

    #[test]
    fn test_snapshot_detects_change() {
        let (mut tree, _, _, b) = tree_with_chain();
        let before = tree.snapshot();
        assert_eq!(before, tree.snapshot());
        tree.get_mut(b).unwrap().set_left(42.0);
        assert_ne!(before, tree.snapshot());
    }

    #[test]
    fn test_partial_snapshot_covers_only_given_ids() {
        let (mut tree, _, a, b) = tree_with_chain();
        let before = tree.snapshot_of(&[b]);
        tree.get_mut(a).unwrap().set_left(42.0);
        assert_eq!(tree.snapshot_of(&[b]), before);
        tree.get_mut(b).unwrap().set_width(1.0);
        assert_ne!(tree.snapshot_of(&[b]), before);

        // A removed element reads as a change too.
        let both = tree.snapshot_of(&[a, b]);
        tree.remove(b).unwrap();
        assert_ne!(tree.snapshot_of(&[a, b]), both);
    }
}
