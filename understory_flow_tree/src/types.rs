// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Public types for the flow tree: node identifiers, presentation flags, box styles, and listeners.

use kurbo::Insets;

/// Identifier for an element in the tree.
///
/// This is a small, copyable handle that stays stable across reparenting but becomes
/// invalid when the element is removed.
/// It consists of a slot index and a generation counter.
///
/// ## Semantics
///
/// - On insert, a fresh slot is allocated with generation `1`.
/// - On remove, the slot is freed; any existing `NodeId` that pointed to that slot is now stale.
/// - On reuse of a freed slot, its generation is incremented, producing a new, distinct `NodeId`.
///
/// Detaching an element (see [`Tree::detach`](crate::Tree::detach)) does not free it; the
/// handle stays live and the element can be attached again.
///
/// Use [`Tree::is_alive`](crate::Tree::is_alive) to check whether a `NodeId` still refers to a live element.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct NodeId(pub(crate) u32, pub(crate) u32);

impl NodeId {
    pub(crate) const fn new(idx: u32, generation: u32) -> Self {
        Self(idx, generation)
    }

    pub(crate) const fn idx(self) -> usize {
        self.0 as usize
    }
}

bitflags::bitflags! {
    /// Presentation flags that change how an element takes part in layout, paint and hit testing.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct NodeFlags: u8 {
        /// Element generates no box at all (`display: none`). Applies to the whole subtree.
        const HIDDEN      = 0b0000_0001;
        /// Element is absolutely positioned against its parent and takes no space in the row.
        const OUT_OF_FLOW = 0b0000_0010;
        /// Element keeps its box but is neither painted nor hit (`visibility: hidden`).
        /// Inherited by descendants.
        const INVISIBLE   = 0b0000_0100;
        /// Element's content height is forced to zero.
        const COLLAPSED   = 0b0000_1000;
    }
}

/// Element kinds understood by the tree.
///
/// Only used for selector matching and debugging; every kind lays out the same way.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum Tag {
    /// The document body (root).
    Body,
    /// A generic block.
    Div,
    /// A generic inline.
    Span,
    /// A push button.
    Button,
}

impl Tag {
    /// The lowercase name used by tag selectors.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Body => "body",
            Self::Div => "div",
            Self::Span => "span",
            Self::Button => "button",
        }
    }
}

/// Box styling that drives the flow layout.
///
/// Sizes are content-box sizes. When `width` (or `height`) is `None`, the element
/// shrinks to fit its text and in-flow children: the text advance and the children's
/// margin-box widths are summed along the row, and the tallest of the text line and the
/// children's margin boxes sets the height.
#[derive(Clone, Debug, PartialEq)]
pub struct BoxStyle {
    /// Explicit content width.
    pub width: Option<f64>,
    /// Explicit content height.
    pub height: Option<f64>,
    /// Outer spacing. Horizontal margins count toward the element's place in the row.
    pub margin: Insets,
    /// Inner spacing between border and content.
    pub padding: Insets,
    /// Border thickness.
    pub border: Insets,
}

impl Default for BoxStyle {
    fn default() -> Self {
        Self {
            width: None,
            height: None,
            margin: Insets::ZERO,
            padding: Insets::ZERO,
            border: Insets::ZERO,
        }
    }
}

impl BoxStyle {
    /// A box with a fixed content size and no spacing.
    pub fn fixed(width: f64, height: f64) -> Self {
        Self {
            width: Some(width),
            height: Some(height),
            ..Default::default()
        }
    }
}

/// Identifier for a registered listener.
///
/// Like [`NodeId`], a slot index plus a generation. Freed slots are reused with a bumped
/// generation, so an id of a removed listener never matches a later one and a
/// notification carrying it can always be recognized as stale by the receiver.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, PartialOrd, Ord)]
pub struct ListenerId(pub(crate) u32, pub(crate) u32);

impl ListenerId {
    pub(crate) const fn idx(self) -> usize {
        self.0 as usize
    }
}

/// What a listener is interested in.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum ListenerKind {
    /// Content-box size changes of the observed element.
    Resize,
    /// Clicks whose target is the element or one of its descendants.
    Click,
    /// Pointer-down events anywhere in the document.
    PointerDown,
}

/// A notification produced by the tree for one listener.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct Notification {
    /// The listener being notified.
    pub listener: ListenerId,
    /// Kind of the listener.
    pub kind: ListenerKind,
    /// For pointer events, the element under the pointer; for resizes, the observed element.
    pub target: NodeId,
}
