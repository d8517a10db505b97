// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Host implementation for [`understory_flow_tree::Tree`].
//!
//! Presentation maps one-to-one onto [`NodeFlags`], subscriptions are tree listeners,
//! and document pointer-down interest is a pointer-down listener on the body.
//!
//! The tree returns [`Notification`]s instead of calling back, so the embedder forwards
//! them with [`deliver`], or lets [`settle`] pump resize notifications until the layout
//! stops changing.

use alloc::vec::Vec;
use kurbo::{Point, Rect};
use understory_flow_tree::{
    BoxStyle, ListenerId, ListenerKind, NodeFlags, NodeId, Notification, Tag as FlowTag, Tree,
};

use crate::Overflow;
use crate::host::{Host, Interest, Presentation, Signal, Tag, WidthOracle};

/// Upper bound on resize rounds in [`settle`].
///
/// Layout passes can change the size of shrink-to-fit containers, which can in turn
/// trigger another pass; this stops a pathological oscillation.
pub const MAX_SETTLE_ROUNDS: usize = 8;

impl WidthOracle for Tree {
    type Node = NodeId;

    fn usable_width(&self, node: NodeId) -> f64 {
        Self::usable_width(self, node)
    }

    fn place_width(&self, node: NodeId) -> f64 {
        Self::place_width(self, node)
    }
}

fn to_flags(p: Presentation) -> NodeFlags {
    let mut flags = NodeFlags::empty();
    flags.set(NodeFlags::HIDDEN, p.contains(Presentation::HIDDEN));
    flags.set(NodeFlags::OUT_OF_FLOW, p.contains(Presentation::OUT_OF_FLOW));
    flags.set(NodeFlags::INVISIBLE, p.contains(Presentation::INVISIBLE));
    flags.set(NodeFlags::COLLAPSED, p.contains(Presentation::COLLAPSED));
    flags
}

fn from_flags(flags: NodeFlags) -> Presentation {
    let mut p = Presentation::empty();
    p.set(Presentation::HIDDEN, flags.contains(NodeFlags::HIDDEN));
    p.set(Presentation::OUT_OF_FLOW, flags.contains(NodeFlags::OUT_OF_FLOW));
    p.set(Presentation::INVISIBLE, flags.contains(NodeFlags::INVISIBLE));
    p.set(Presentation::COLLAPSED, flags.contains(NodeFlags::COLLAPSED));
    p
}

impl Host for Tree {
    type Subscription = ListenerId;

    fn query_selector(&self, selector: &str) -> Option<NodeId> {
        Self::query_selector(self, selector)
    }

    fn body(&self) -> NodeId {
        Self::body(self)
    }

    fn is_alive(&self, node: NodeId) -> bool {
        Self::is_alive(self, node)
    }

    fn create_element(&mut self, tag: Tag) -> Option<NodeId> {
        let tag = match tag {
            Tag::Button => FlowTag::Button,
            Tag::Div => FlowTag::Div,
        };
        Some(self.create(tag, BoxStyle::default()))
    }

    fn children(&self, node: NodeId) -> Vec<NodeId> {
        Self::children(self, node).to_vec()
    }

    fn parent(&self, node: NodeId) -> Option<NodeId> {
        Self::parent(self, node)
    }

    fn contains(&self, ancestor: NodeId, node: NodeId) -> bool {
        Self::contains(self, ancestor, node)
    }

    fn append_child(&mut self, parent: NodeId, child: NodeId) -> bool {
        Self::append_child(self, parent, child)
    }

    fn insert_before(&mut self, parent: NodeId, child: NodeId, reference: NodeId) -> bool {
        Self::insert_before(self, parent, child, reference)
    }

    fn remove(&mut self, node: NodeId) -> bool {
        Self::remove(self, node)
    }

    fn clone_subtree(&mut self, node: NodeId) -> Option<NodeId> {
        Self::clone_subtree(self, node)
    }

    fn clear_children(&mut self, node: NodeId) {
        Self::clear_children(self, node);
    }

    fn set_text(&mut self, node: NodeId, text: &str) {
        Self::set_text(self, node, text);
    }

    fn set_class_name(&mut self, node: NodeId, class_name: &str) {
        Self::set_class_name(self, node, class_name);
    }

    fn set_class(&mut self, node: NodeId, class: &str, on: bool) {
        Self::set_class(self, node, class, on);
    }

    fn set_style_text(&mut self, node: NodeId, style: &str) {
        Self::set_style_text(self, node, style);
    }

    fn presentation(&self, node: NodeId) -> Presentation {
        from_flags(self.flags(node))
    }

    fn set_presentation(&mut self, node: NodeId, presentation: Presentation) {
        self.set_flags(node, to_flags(presentation));
    }

    fn offset_width(&self, node: NodeId) -> f64 {
        Self::offset_width(self, node)
    }

    fn bounding_rect(&self, node: NodeId) -> Rect {
        Self::bounding_rect(self, node)
    }

    fn set_offset(&mut self, node: NodeId, offset: Point) {
        Self::set_offset(self, node, offset);
    }

    fn subscribe(&mut self, interest: Interest<NodeId>) -> Option<ListenerId> {
        match interest {
            Interest::Resize(node) => self.listen(ListenerKind::Resize, node),
            Interest::Click(node) => self.listen(ListenerKind::Click, node),
            Interest::DocumentPointerDown => {
                let body = Self::body(self);
                self.listen(ListenerKind::PointerDown, body)
            }
        }
    }

    fn unsubscribe(&mut self, subscription: ListenerId) -> bool {
        self.unlisten(subscription)
    }
}

/// The [`Signal`] carried by a tree notification.
pub fn signal_of(note: &Notification) -> Signal<NodeId> {
    match note.kind {
        ListenerKind::Resize => Signal::Resized,
        ListenerKind::Click => Signal::Click {
            target: note.target,
        },
        ListenerKind::PointerDown => Signal::PointerDown {
            target: note.target,
        },
    }
}

/// Forward `notes` to `overflow`, in order. Returns how many it handled.
pub fn deliver(tree: &mut Tree, overflow: &mut Overflow<Tree>, notes: &[Notification]) -> usize {
    notes
        .iter()
        .filter(|note| overflow.handle(tree, note.listener, signal_of(note)))
        .count()
}

/// Deliver pending resize notifications until none are left, or for at most
/// [`MAX_SETTLE_ROUNDS`] rounds. Returns the number of rounds that delivered anything.
pub fn settle(tree: &mut Tree, overflow: &mut Overflow<Tree>) -> usize {
    let mut rounds = 0;
    while rounds < MAX_SETTLE_ROUNDS {
        let notes = tree.take_resize_notifications();
        if notes.is_empty() {
            break;
        }
        deliver(tree, overflow, &notes);
        rounds += 1;
    }
    if rounds == MAX_SETTLE_ROUNDS {
        log::warn!("layout did not settle after {MAX_SETTLE_ROUNDS} resize rounds");
    }
    rounds
}
