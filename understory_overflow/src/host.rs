// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Host capabilities: what the overflow behavior needs from the element tree it runs in.
//!
//! ## Overview
//!
//! The behavior never owns elements. It holds handles ([`WidthOracle::Node`]) and asks
//! the host to measure, restructure and restyle them. Every mutating call is tolerant:
//! a stale or detached handle makes the call a no-op (reported through a `false` or
//! `None` return), never a panic.
//!
//! Signals flow the other way. The behavior subscribes to the [`Interest`]s it needs
//! and the embedder forwards each delivery to
//! [`Overflow::handle`](crate::Overflow::handle) together with the subscription it was
//! delivered to.

use alloc::vec::Vec;
use kurbo::{Point, Rect};

/// Read-only measurement of rendered boxes.
pub trait WidthOracle {
    /// Element handle.
    type Node: Copy + Eq + core::fmt::Debug;

    /// Content-box width of `node`, excluding its padding and border.
    fn usable_width(&self, node: Self::Node) -> f64;

    /// Border-box width of `node` plus its horizontal margins: the room it takes in a row.
    ///
    /// Zero for elements that are not rendered.
    fn place_width(&self, node: Self::Node) -> f64;
}

bitflags::bitflags! {
    /// Presentation state the behavior toggles on elements.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct Presentation: u8 {
        /// Not rendered at all (`display: none`).
        const HIDDEN      = 0b0000_0001;
        /// Absolutely positioned; takes no room in the row.
        const OUT_OF_FLOW = 0b0000_0010;
        /// Keeps its box but is not painted or hit (`visibility: hidden`).
        const INVISIBLE   = 0b0000_0100;
        /// Zero content height.
        const COLLAPSED   = 0b0000_1000;
    }
}

impl Presentation {
    /// Measurable but without visual impact: the state the trigger is probed in.
    pub const PROBE: Self = Self::OUT_OF_FLOW.union(Self::INVISIBLE);
    /// A closed overlay wrap.
    pub const OVERLAY_CLOSED: Self = Self::OUT_OF_FLOW
        .union(Self::INVISIBLE)
        .union(Self::COLLAPSED);
    /// An open overlay wrap.
    pub const OVERLAY_OPEN: Self = Self::OUT_OF_FLOW;
}

/// Elements the behavior creates.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum Tag {
    /// The trigger control.
    Button,
    /// Overlay wrap and panel.
    Div,
}

/// What a subscription listens for.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum Interest<N> {
    /// Size changes of the element's content box.
    Resize(N),
    /// Clicks on the element or its descendants.
    Click(N),
    /// Pointer-down events anywhere in the document.
    DocumentPointerDown,
}

/// A signal delivered to a subscription.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum Signal<N> {
    /// The observed element changed size.
    Resized,
    /// The subscribed element, or something inside it, was clicked.
    Click {
        /// Element under the pointer.
        target: N,
    },
    /// The pointer went down somewhere in the document.
    PointerDown {
        /// Element under the pointer.
        target: N,
    },
}

/// Everything the overflow behavior asks of its host element tree.
pub trait Host: WidthOracle {
    /// Subscription token returned by [`Host::subscribe`].
    type Subscription: Copy + Eq + core::fmt::Debug;

    /// Resolve a selector to a connected element.
    fn query_selector(&self, selector: &str) -> Option<Self::Node>;

    /// The document body, the default overlay container.
    fn body(&self) -> Self::Node;

    /// Returns true if `node` still refers to a live element.
    fn is_alive(&self, node: Self::Node) -> bool;

    /// Create a detached element, or `None` if the host cannot.
    fn create_element(&mut self, tag: Tag) -> Option<Self::Node>;

    /// Children of `node` in document order.
    fn children(&self, node: Self::Node) -> Vec<Self::Node>;

    /// Parent of `node`, if attached.
    fn parent(&self, node: Self::Node) -> Option<Self::Node>;

    /// Returns true if `node` is `ancestor` or inside it.
    fn contains(&self, ancestor: Self::Node, node: Self::Node) -> bool;

    /// Move `child` to the end of `parent`.
    fn append_child(&mut self, parent: Self::Node, child: Self::Node) -> bool;

    /// Move `child` into `parent` immediately before `reference`.
    ///
    /// Appends when `reference` is not a child of `parent`.
    fn insert_before(
        &mut self,
        parent: Self::Node,
        child: Self::Node,
        reference: Self::Node,
    ) -> bool;

    /// Remove `node` from the tree. Returns false if it was already gone.
    fn remove(&mut self, node: Self::Node) -> bool;

    /// Detached deep copy of `node`.
    fn clone_subtree(&mut self, node: Self::Node) -> Option<Self::Node>;

    /// Remove and discard every child of `node`.
    fn clear_children(&mut self, node: Self::Node);

    /// Replace the text content of `node`.
    fn set_text(&mut self, node: Self::Node, text: &str);

    /// Replace the whole class list of `node`.
    fn set_class_name(&mut self, node: Self::Node, class_name: &str);

    /// Add or remove one class.
    fn set_class(&mut self, node: Self::Node, class: &str, on: bool);

    /// Apply an inline style block verbatim.
    fn set_style_text(&mut self, node: Self::Node, style: &str);

    /// Current presentation of `node`.
    fn presentation(&self, node: Self::Node) -> Presentation;

    /// Replace the presentation of `node`.
    fn set_presentation(&mut self, node: Self::Node, presentation: Presentation);

    /// Border-box width of `node`.
    fn offset_width(&self, node: Self::Node) -> f64;

    /// Document-space border box of `node`.
    fn bounding_rect(&self, node: Self::Node) -> Rect;

    /// Place an out-of-flow element relative to its parent; `x` is left, `y` is top.
    fn set_offset(&mut self, node: Self::Node, offset: Point);

    /// Start listening. `None` if the host cannot deliver this interest.
    fn subscribe(&mut self, interest: Interest<Self::Node>) -> Option<Self::Subscription>;

    /// Stop listening. Returns false if the subscription was already gone.
    fn unsubscribe(&mut self, subscription: Self::Subscription) -> bool;
}

/// Toggle `flags` on `node`, leaving its other presentation bits alone.
pub(crate) fn set_flags<H: Host + ?Sized>(
    host: &mut H,
    node: H::Node,
    flags: Presentation,
    on: bool,
) {
    let mut p = host.presentation(node);
    p.set(flags, on);
    host.set_presentation(node, p);
}
