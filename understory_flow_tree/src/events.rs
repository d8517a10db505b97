// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Listener registry: resize observers, click listeners, and document pointer-down listeners.
//!
//! ## Delivery model
//!
//! The tree never calls back into user code. Input methods ([`Tree::pointer_down`],
//! [`Tree::click`]) and [`Tree::take_resize_notifications`] return the list of
//! [`Notification`]s to deliver, snapshotted when the input happened. Receivers are
//! expected to ignore notifications for listeners they no longer hold.
//!
//! Resize observation is coalesced: however many mutations happen between two calls to
//! [`Tree::take_resize_notifications`], each observer is notified at most once, and
//! only if its content-box size differs from the size last reported.

use alloc::vec::Vec;
use kurbo::{Point, Size};

use crate::tree::Tree;
use crate::types::{ListenerId, ListenerKind, NodeId, Notification};

#[derive(Clone, Debug)]
pub(crate) struct Listener {
    generation: u32,
    kind: ListenerKind,
    node: NodeId,
    /// Last reported content size, for resize observers.
    last_size: Size,
}

impl Tree {
    /// Register a listener of `kind` on `node`.
    ///
    /// Pointer-down listeners are document-wide; pass [`Tree::body`]. Returns `None`
    /// when `node` is stale. Slots of removed listeners are reused under a new
    /// generation.
    pub fn listen(&mut self, kind: ListenerKind, node: NodeId) -> Option<ListenerId> {
        if !self.is_alive(node) {
            return None;
        }
        let last_size = self.content_size(node);
        let (idx, generation) = if let Some(idx) = self.listener_free_list.pop() {
            let generation = self.listener_generations[idx].saturating_add(1);
            self.listener_generations[idx] = generation;
            (idx, generation)
        } else {
            self.listeners.push(None);
            self.listener_generations.push(1);
            (self.listeners.len() - 1, 1)
        };
        self.listeners[idx] = Some(Listener {
            generation,
            kind,
            node,
            last_size,
        });
        #[allow(
            clippy::cast_possible_truncation,
            reason = "ListenerId uses 32-bit indices by design."
        )]
        let id = ListenerId(idx as u32, generation);
        Some(id)
    }

    fn listener_id(&self, idx: usize) -> Option<ListenerId> {
        let generation = self.listeners.get(idx)?.as_ref()?.generation;
        #[allow(
            clippy::cast_possible_truncation,
            reason = "ListenerId uses 32-bit indices by design."
        )]
        let idx = idx as u32;
        Some(ListenerId(idx, generation))
    }

    /// Remove a listener. Returns false if it was already removed.
    pub fn unlisten(&mut self, id: ListenerId) -> bool {
        if !self.is_listening(id) {
            return false;
        }
        self.listeners[id.idx()] = None;
        self.listener_free_list.push(id.idx());
        true
    }

    /// Returns true if `id` is still registered.
    pub fn is_listening(&self, id: ListenerId) -> bool {
        self.listeners
            .get(id.idx())
            .and_then(Option::as_ref)
            .is_some_and(|l| l.generation == id.1)
    }

    /// Number of registered listeners of `kind`.
    pub fn listener_count(&self, kind: ListenerKind) -> usize {
        self.listeners
            .iter()
            .flatten()
            .filter(|l| l.kind == kind)
            .count()
    }

    /// Number of listener slots allocated, live or free.
    pub fn listener_slots(&self) -> usize {
        self.listeners.len()
    }

    pub(crate) fn drop_listeners_on(&mut self, node: NodeId) {
        for (idx, slot) in self.listeners.iter_mut().enumerate() {
            if slot.as_ref().is_some_and(|l| l.node == node) {
                *slot = None;
                self.listener_free_list.push(idx);
            }
        }
    }

    fn notify(&self, kind: ListenerKind, target: NodeId) -> Vec<Notification> {
        self.listeners
            .iter()
            .enumerate()
            .filter_map(|(i, slot)| {
                let l = slot.as_ref()?;
                if l.kind != kind || !self.contains(l.node, target) {
                    return None;
                }
                Some(Notification {
                    listener: self.listener_id(i)?,
                    kind,
                    target,
                })
            })
            .collect()
    }

    /// Press the pointer at `pt`.
    ///
    /// Notifies every pointer-down listener whose element contains the hit target.
    pub fn pointer_down(&self, pt: Point) -> Vec<Notification> {
        self.notify(ListenerKind::PointerDown, self.hit_test_point(pt))
    }

    /// Press and release the pointer at `pt`.
    ///
    /// Returns the pointer-down notifications followed by the click notifications for
    /// every click listener whose element contains the hit target.
    pub fn click(&self, pt: Point) -> Vec<Notification> {
        let target = self.hit_test_point(pt);
        let mut out = self.notify(ListenerKind::PointerDown, target);
        out.extend(self.notify(ListenerKind::Click, target));
        out
    }

    /// Collect one notification per resize observer whose element changed size since the
    /// last report.
    pub fn take_resize_notifications(&mut self) -> Vec<Notification> {
        let mut out = Vec::new();
        for i in 0..self.listeners.len() {
            let Some((node, last)) = self.listeners[i]
                .as_ref()
                .filter(|l| l.kind == ListenerKind::Resize)
                .map(|l| (l.node, l.last_size))
            else {
                continue;
            };
            let size = self.content_size(node);
            if size == last {
                continue;
            }
            if let Some(l) = self.listeners[i].as_mut() {
                l.last_size = size;
            }
            let Some(listener) = self.listener_id(i) else {
                continue;
            };
            out.push(Notification {
                listener,
                kind: ListenerKind::Resize,
                target: node,
            });
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use crate::tree::Tree;
    use crate::types::{BoxStyle, ListenerKind, Tag};
    use alloc::vec;
    use alloc::vec::Vec;
    use kurbo::Point;

    #[test]
    fn resize_notifications_are_coalesced() {
        let mut tree = Tree::new();
        let body = tree.body();
        let row = tree.insert(body, Tag::Div, BoxStyle::fixed(300.0, 20.0));
        let id = tree.listen(ListenerKind::Resize, row).unwrap();
        assert!(tree.take_resize_notifications().is_empty());
        tree.set_width(row, 200.0);
        tree.set_width(row, 250.0);
        let notes = tree.take_resize_notifications();
        assert_eq!(notes.len(), 1);
        assert_eq!(notes[0].listener, id);
        assert_eq!(notes[0].target, row);
        assert!(tree.take_resize_notifications().is_empty());
        // Back and forth between reports is not a change.
        tree.set_width(row, 100.0);
        tree.set_width(row, 250.0);
        assert!(tree.take_resize_notifications().is_empty());
    }

    #[test]
    fn unlisten_stops_delivery() {
        let mut tree = Tree::new();
        let body = tree.body();
        let row = tree.insert(body, Tag::Div, BoxStyle::fixed(300.0, 20.0));
        let id = tree.listen(ListenerKind::Resize, row).unwrap();
        assert!(tree.unlisten(id));
        assert!(!tree.unlisten(id));
        tree.set_width(row, 10.0);
        assert!(tree.take_resize_notifications().is_empty());
    }

    #[test]
    fn click_notifies_down_then_click_listeners() {
        let mut tree = Tree::new();
        let body = tree.body();
        let row = tree.insert(body, Tag::Div, BoxStyle::fixed(300.0, 20.0));
        let button = tree.insert(row, Tag::Button, BoxStyle::fixed(40.0, 20.0));
        let down = tree.listen(ListenerKind::PointerDown, body).unwrap();
        let click = tree.listen(ListenerKind::Click, button).unwrap();
        let notes = tree.click(Point::new(10.0, 10.0));
        let ids: Vec<_> = notes.iter().map(|n| n.listener).collect();
        assert_eq!(ids, vec![down, click]);
        assert!(notes.iter().all(|n| n.target == button));
        // Outside the button only the document listener fires.
        let notes = tree.click(Point::new(100.0, 10.0));
        assert_eq!(notes.len(), 1);
        assert_eq!(notes[0].listener, down);
        assert_eq!(notes[0].target, row);
    }

    #[test]
    fn freed_slots_are_reused_under_a_new_generation() {
        let mut tree = Tree::new();
        let body = tree.body();
        let first = tree.listen(ListenerKind::PointerDown, body).unwrap();
        assert!(tree.unlisten(first));
        let second = tree.listen(ListenerKind::PointerDown, body).unwrap();
        assert_eq!(second.idx(), first.idx());
        assert_ne!(second, first);
        assert!(!tree.is_listening(first));
        assert!(!tree.unlisten(first));
        assert!(tree.is_listening(second));
        // Notifications carry the live id only.
        let notes = tree.pointer_down(Point::new(1.0, 1.0));
        assert_eq!(notes.len(), 1);
        assert_eq!(notes[0].listener, second);
        for _ in 0..100 {
            let id = tree.listen(ListenerKind::PointerDown, body).unwrap();
            tree.unlisten(id);
        }
        assert_eq!(tree.listener_slots(), 2);
    }

    #[test]
    fn removing_an_element_drops_its_listeners() {
        let mut tree = Tree::new();
        let body = tree.body();
        let button = tree.insert(body, Tag::Button, BoxStyle::fixed(40.0, 20.0));
        let id = tree.listen(ListenerKind::Click, button).unwrap();
        tree.remove(button);
        assert!(!tree.is_listening(id));
        assert_eq!(tree.listener_count(ListenerKind::Click), 0);
        assert!(tree.listen(ListenerKind::Click, button).is_none());
    }
}
