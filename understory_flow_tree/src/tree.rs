// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Core tree implementation: slots, structure, attributes, and selector lookup.

use alloc::string::{String, ToString};
use alloc::vec::Vec;
use kurbo::Point;

use crate::events::Listener;
use crate::types::{BoxStyle, NodeFlags, NodeId, Tag};

/// Width the document body is laid out at when a tree is created.
pub const DEFAULT_BODY_WIDTH: f64 = 1024.0;

/// Horizontal advance of one character of text content.
pub const DEFAULT_TEXT_ADVANCE: f64 = 8.0;

/// Element tree with a body root.
///
/// Every mutation takes effect immediately; geometry queries lay out on demand.
pub struct Tree {
    nodes: Vec<Option<Node>>, // slots
    generations: Vec<u32>,    // last generation per slot (persists across frees)
    free_list: Vec<usize>,
    body: NodeId,
    pub(crate) text_advance: f64,
    pub(crate) listeners: Vec<Option<Listener>>,
    pub(crate) listener_generations: Vec<u32>,
    pub(crate) listener_free_list: Vec<usize>,
}

impl core::fmt::Debug for Tree {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let total = self.nodes.len();
        let alive = self.nodes.iter().filter(|n| n.is_some()).count();
        let listeners = self.listeners.iter().filter(|l| l.is_some()).count();
        f.debug_struct("Tree")
            .field("nodes_total", &total)
            .field("nodes_alive", &alive)
            .field("free_list", &self.free_list.len())
            .field("listeners", &listeners)
            .field("listener_slots", &self.listeners.len())
            .finish_non_exhaustive()
    }
}

impl Default for Tree {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Clone, Debug)]
pub(crate) struct Node {
    generation: u32,
    pub(crate) parent: Option<NodeId>,
    pub(crate) children: Vec<NodeId>,
    pub(crate) tag: Tag,
    pub(crate) id_attr: Option<String>,
    pub(crate) classes: Vec<String>,
    pub(crate) text: String,
    pub(crate) style_text: String,
    pub(crate) style: BoxStyle,
    pub(crate) flags: NodeFlags,
    /// Offset from the parent's padding box; only consulted when out of flow.
    pub(crate) offset: Point,
}

impl Node {
    fn new(generation: u32, tag: Tag, style: BoxStyle) -> Self {
        Self {
            generation,
            parent: None,
            children: Vec::new(),
            tag,
            id_attr: None,
            classes: Vec::new(),
            text: String::new(),
            style_text: String::new(),
            style,
            flags: NodeFlags::empty(),
            offset: Point::ZERO,
        }
    }
}

impl Tree {
    /// Create a tree holding only a body element of [`DEFAULT_BODY_WIDTH`].
    pub fn new() -> Self {
        let mut tree = Self {
            nodes: Vec::new(),
            generations: Vec::new(),
            free_list: Vec::new(),
            body: NodeId::new(0, 0),
            text_advance: DEFAULT_TEXT_ADVANCE,
            listeners: Vec::new(),
            listener_generations: Vec::new(),
            listener_free_list: Vec::new(),
        };
        tree.body = tree.create(
            Tag::Body,
            BoxStyle {
                width: Some(DEFAULT_BODY_WIDTH),
                ..Default::default()
            },
        );
        tree
    }

    /// The body element. It is the root of the tree and is never removed.
    pub fn body(&self) -> NodeId {
        self.body
    }

    /// Set the per-character advance used to size text content.
    ///
    /// An element without an explicit width grows by this much per character of its
    /// text, and a non-empty text is one line, twice the advance, tall.
    pub fn set_text_advance(&mut self, advance: f64) {
        self.text_advance = advance;
    }

    /// Allocate a detached element.
    pub fn create(&mut self, tag: Tag, style: BoxStyle) -> NodeId {
        let (idx, generation) = if let Some(idx) = self.free_list.pop() {
            let generation = self.generations[idx].saturating_add(1);
            self.generations[idx] = generation;
            self.nodes[idx] = Some(Node::new(generation, tag, style));
            (idx, generation)
        } else {
            let generation = 1_u32;
            self.nodes.push(Some(Node::new(generation, tag, style)));
            self.generations.push(generation);
            (self.nodes.len() - 1, generation)
        };
        #[allow(
            clippy::cast_possible_truncation,
            reason = "NodeId uses 32-bit indices by design."
        )]
        let idx = idx as u32;
        NodeId::new(idx, generation)
    }

    /// Allocate an element and append it to `parent`.
    pub fn insert(&mut self, parent: NodeId, tag: Tag, style: BoxStyle) -> NodeId {
        let id = self.create(tag, style);
        self.append_child(parent, id);
        id
    }

    /// Returns true if `id` refers to a live element.
    pub fn is_alive(&self, id: NodeId) -> bool {
        self.nodes
            .get(id.idx())
            .and_then(|n| n.as_ref())
            .is_some_and(|n| n.generation == id.1)
    }

    pub(crate) fn node_opt(&self, id: NodeId) -> Option<&Node> {
        self.nodes
            .get(id.idx())
            .and_then(|n| n.as_ref())
            .filter(|n| n.generation == id.1)
    }

    pub(crate) fn node_opt_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.nodes
            .get_mut(id.idx())
            .and_then(|n| n.as_mut())
            .filter(|n| n.generation == id.1)
    }

    /// Remove an element and its subtree, freeing their slots.
    ///
    /// Returns false when `id` is stale or is the body.
    pub fn remove(&mut self, id: NodeId) -> bool {
        if id == self.body || !self.is_alive(id) {
            return false;
        }
        self.detach(id);
        self.free_subtree(id);
        true
    }

    fn free_subtree(&mut self, id: NodeId) {
        let children = match self.node_opt(id) {
            Some(n) => n.children.clone(),
            None => return,
        };
        for child in children {
            self.free_subtree(child);
        }
        self.nodes[id.idx()] = None;
        self.free_list.push(id.idx());
        self.drop_listeners_on(id);
    }

    /// Unlink an element from its parent, keeping it alive.
    ///
    /// Returns false when `id` is stale or already detached.
    pub fn detach(&mut self, id: NodeId) -> bool {
        let Some(parent) = self.node_opt(id).and_then(|n| n.parent) else {
            return false;
        };
        if let Some(p) = self.node_opt_mut(parent) {
            p.children.retain(|&c| c != id);
        }
        if let Some(n) = self.node_opt_mut(id) {
            n.parent = None;
        }
        true
    }

    /// Move `child` to the end of `parent`'s children.
    ///
    /// Returns false when either handle is stale or the move would create a cycle.
    pub fn append_child(&mut self, parent: NodeId, child: NodeId) -> bool {
        if !self.can_adopt(parent, child) {
            return false;
        }
        self.detach(child);
        if let Some(p) = self.node_opt_mut(parent) {
            p.children.push(child);
        }
        if let Some(c) = self.node_opt_mut(child) {
            c.parent = Some(parent);
        }
        true
    }

    /// Move `child` into `parent` immediately before `reference`.
    ///
    /// Falls back to appending when `reference` is not a child of `parent`.
    pub fn insert_before(&mut self, parent: NodeId, child: NodeId, reference: NodeId) -> bool {
        if child == reference {
            return self.parent(child) == Some(parent);
        }
        if !self.can_adopt(parent, child) {
            return false;
        }
        self.detach(child);
        let Some(p) = self.node_opt_mut(parent) else {
            return false;
        };
        match p.children.iter().position(|&c| c == reference) {
            Some(at) => p.children.insert(at, child),
            None => p.children.push(child),
        }
        if let Some(c) = self.node_opt_mut(child) {
            c.parent = Some(parent);
        }
        true
    }

    fn can_adopt(&self, parent: NodeId, child: NodeId) -> bool {
        self.is_alive(parent)
            && self.is_alive(child)
            && child != self.body
            && !self.contains(child, parent)
    }

    /// Deep-copy an element and its subtree. The copy is detached and carries no listeners.
    pub fn clone_subtree(&mut self, id: NodeId) -> Option<NodeId> {
        let src = self.node_opt(id)?.clone();
        let copy = self.create(src.tag, src.style.clone());
        if let Some(n) = self.node_opt_mut(copy) {
            n.id_attr = src.id_attr;
            n.classes = src.classes;
            n.text = src.text;
            n.style_text = src.style_text;
            n.flags = src.flags;
            n.offset = src.offset;
        }
        for child in src.children {
            if let Some(c) = self.clone_subtree(child) {
                self.append_child(copy, c);
            }
        }
        Some(copy)
    }

    /// Remove and free every child of `id`.
    pub fn clear_children(&mut self, id: NodeId) {
        let children = self.children(id).to_vec();
        for child in children {
            self.remove(child);
        }
    }

    /// Children of `id` in document order. Empty for stale handles.
    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.node_opt(id)
            .map(|n| n.children.as_slice())
            .unwrap_or(&[])
    }

    /// Parent of `id`, if attached.
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.node_opt(id).and_then(|n| n.parent)
    }

    /// Returns true if `node` is `ancestor` or one of its descendants.
    pub fn contains(&self, ancestor: NodeId, node: NodeId) -> bool {
        if !self.is_alive(ancestor) {
            return false;
        }
        let mut cur = Some(node);
        while let Some(n) = cur {
            if n == ancestor {
                return true;
            }
            cur = self.parent(n);
        }
        false
    }

    /// Returns true if `id` is reachable from the body.
    pub fn is_connected(&self, id: NodeId) -> bool {
        self.is_alive(id) && self.contains(self.body, id)
    }

    /// Tag of `id`.
    pub fn tag(&self, id: NodeId) -> Option<Tag> {
        self.node_opt(id).map(|n| n.tag)
    }

    /// Set the element's `id` attribute used by `#id` selectors.
    pub fn set_id_attr(&mut self, id: NodeId, value: &str) {
        if let Some(n) = self.node_opt_mut(id) {
            n.id_attr = Some(value.to_string());
        }
    }

    /// Text content of `id`.
    pub fn text(&self, id: NodeId) -> &str {
        self.node_opt(id).map_or("", |n| n.text.as_str())
    }

    /// Replace the text content of `id`.
    pub fn set_text(&mut self, id: NodeId, text: &str) {
        if let Some(n) = self.node_opt_mut(id) {
            n.text = text.to_string();
        }
    }

    /// Replace the class list with the whitespace-separated classes in `class_name`.
    pub fn set_class_name(&mut self, id: NodeId, class_name: &str) {
        if let Some(n) = self.node_opt_mut(id) {
            n.classes = class_name.split_whitespace().map(ToString::to_string).collect();
        }
    }

    /// Add or remove a single class. Adding a present class is a no-op.
    pub fn set_class(&mut self, id: NodeId, class: &str, on: bool) {
        let Some(n) = self.node_opt_mut(id) else {
            return;
        };
        let present = n.classes.iter().any(|c| c == class);
        if on && !present {
            n.classes.push(class.to_string());
        } else if !on && present {
            n.classes.retain(|c| c != class);
        }
    }

    /// Returns true if `id` carries `class`.
    pub fn has_class(&self, id: NodeId, class: &str) -> bool {
        self.node_opt(id)
            .is_some_and(|n| n.classes.iter().any(|c| c == class))
    }

    /// Verbatim inline style text. The tree stores it but does not interpret it.
    pub fn style_text(&self, id: NodeId) -> &str {
        self.node_opt(id).map_or("", |n| n.style_text.as_str())
    }

    /// Replace the verbatim inline style text.
    pub fn set_style_text(&mut self, id: NodeId, text: &str) {
        if let Some(n) = self.node_opt_mut(id) {
            n.style_text = text.to_string();
        }
    }

    /// Box style of `id`.
    pub fn style(&self, id: NodeId) -> Option<&BoxStyle> {
        self.node_opt(id).map(|n| &n.style)
    }

    /// Replace the box style of `id`.
    pub fn set_style(&mut self, id: NodeId, style: BoxStyle) {
        if let Some(n) = self.node_opt_mut(id) {
            n.style = style;
        }
    }

    /// Set the explicit content width of `id`.
    pub fn set_width(&mut self, id: NodeId, width: f64) {
        if let Some(n) = self.node_opt_mut(id) {
            n.style.width = Some(width);
        }
    }

    /// Presentation flags of `id`. Empty for stale handles.
    pub fn flags(&self, id: NodeId) -> NodeFlags {
        self.node_opt(id).map_or(NodeFlags::empty(), |n| n.flags)
    }

    /// Replace the presentation flags of `id`.
    pub fn set_flags(&mut self, id: NodeId, flags: NodeFlags) {
        if let Some(n) = self.node_opt_mut(id) {
            n.flags = flags;
        }
    }

    /// Offset of an out-of-flow element from its parent's padding box.
    pub fn offset(&self, id: NodeId) -> Point {
        self.node_opt(id).map_or(Point::ZERO, |n| n.offset)
    }

    /// Place an out-of-flow element; `offset.x` is the left edge, `offset.y` the top edge.
    pub fn set_offset(&mut self, id: NodeId, offset: Point) {
        if let Some(n) = self.node_opt_mut(id) {
            n.offset = offset;
        }
    }

    /// First connected element in document order matching a simple selector.
    ///
    /// Supports `#id`, `.class` and bare tag names.
    pub fn query_selector(&self, selector: &str) -> Option<NodeId> {
        let selector = selector.trim();
        if selector.is_empty() {
            return None;
        }
        self.find(self.body, &|n: &Node| {
            if let Some(id) = selector.strip_prefix('#') {
                n.id_attr.as_deref() == Some(id)
            } else if let Some(class) = selector.strip_prefix('.') {
                n.classes.iter().any(|c| c == class)
            } else {
                n.tag.name() == selector
            }
        })
    }

    fn find(&self, id: NodeId, pred: &dyn Fn(&Node) -> bool) -> Option<NodeId> {
        let n = self.node_opt(id)?;
        if pred(n) {
            return Some(id);
        }
        n.children.iter().find_map(|&c| self.find(c, pred))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reparent_moves_between_parents() {
        let mut tree = Tree::new();
        let a = tree.insert(tree.body(), Tag::Div, BoxStyle::default());
        let b = tree.insert(tree.body(), Tag::Div, BoxStyle::default());
        let c = tree.insert(a, Tag::Span, BoxStyle::default());
        assert!(tree.append_child(b, c));
        assert!(tree.children(a).is_empty());
        assert_eq!(tree.children(b), &[c]);
        assert_eq!(tree.parent(c), Some(b));
    }

    #[test]
    fn insert_before_keeps_order() {
        let mut tree = Tree::new();
        let row = tree.insert(tree.body(), Tag::Div, BoxStyle::default());
        let x = tree.insert(row, Tag::Span, BoxStyle::default());
        let y = tree.insert(row, Tag::Span, BoxStyle::default());
        let z = tree.create(Tag::Span, BoxStyle::default());
        assert!(tree.insert_before(row, z, y));
        assert_eq!(tree.children(row), &[x, z, y]);
        // Moving an existing child before another one.
        assert!(tree.insert_before(row, y, x));
        assert_eq!(tree.children(row), &[y, x, z]);
    }

    #[test]
    fn cycles_are_rejected() {
        let mut tree = Tree::new();
        let a = tree.insert(tree.body(), Tag::Div, BoxStyle::default());
        let b = tree.insert(a, Tag::Div, BoxStyle::default());
        assert!(!tree.append_child(b, a));
        assert_eq!(tree.parent(a), Some(tree.body()));
    }

    #[test]
    fn removal_frees_subtree_and_bumps_generation() {
        let mut tree = Tree::new();
        let a = tree.insert(tree.body(), Tag::Div, BoxStyle::default());
        let b = tree.insert(a, Tag::Span, BoxStyle::default());
        assert!(tree.remove(a));
        assert!(!tree.is_alive(a));
        assert!(!tree.is_alive(b));
        assert!(!tree.remove(a));
        assert!(!tree.detach(a));
        let c = tree.create(Tag::Div, BoxStyle::default());
        assert_ne!(c, a);
        assert_ne!(c, b);
        assert!(!tree.remove(tree.body()));
    }

    #[test]
    fn clone_copies_attributes_and_children() {
        let mut tree = Tree::new();
        let a = tree.insert(tree.body(), Tag::Div, BoxStyle::fixed(40.0, 10.0));
        tree.set_class_name(a, "item  first");
        tree.set_text(a, "hello");
        tree.set_flags(a, NodeFlags::HIDDEN);
        let _ = tree.insert(a, Tag::Span, BoxStyle::default());
        let copy = tree.clone_subtree(a).unwrap();
        assert_ne!(copy, a);
        assert_eq!(tree.parent(copy), None);
        assert!(tree.has_class(copy, "first"));
        assert_eq!(tree.text(copy), "hello");
        assert_eq!(tree.flags(copy), NodeFlags::HIDDEN);
        assert_eq!(tree.children(copy).len(), 1);
        assert_ne!(tree.children(copy)[0], tree.children(a)[0]);
    }

    #[test]
    fn class_toggling_is_idempotent() {
        let mut tree = Tree::new();
        let a = tree.insert(tree.body(), Tag::Div, BoxStyle::default());
        tree.set_class(a, "x", true);
        tree.set_class(a, "x", true);
        assert!(tree.has_class(a, "x"));
        tree.set_class(a, "x", false);
        assert!(!tree.has_class(a, "x"));
    }

    #[test]
    fn selectors_resolve_connected_elements() {
        let mut tree = Tree::new();
        let nav = tree.insert(tree.body(), Tag::Div, BoxStyle::default());
        tree.set_id_attr(nav, "nav");
        let btn = tree.insert(nav, Tag::Button, BoxStyle::default());
        tree.set_class_name(btn, "cta");
        assert_eq!(tree.query_selector("#nav"), Some(nav));
        assert_eq!(tree.query_selector(".cta"), Some(btn));
        assert_eq!(tree.query_selector("button"), Some(btn));
        assert_eq!(tree.query_selector("#missing"), None);
        assert_eq!(tree.query_selector("  "), None);
        tree.detach(nav);
        assert_eq!(tree.query_selector("#nav"), None);
    }
}
