// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Understory Overflow: keep a row of children on one line and disclose the rest.
//!
//! ## Overview
//!
//! Given a container laid out as a single row, this crate decides how many leading
//! children fit next to a trigger control and what to do with the others. The visible
//! prefix stays in the row; the overflowed suffix is either hidden and revealed inline
//! by the trigger, or shown in a floating popover anchored under it.
//!
//! The behavior is host-agnostic. It depends only on the [`Host`] trait for measuring,
//! restructuring and restyling elements and for subscribing to resize, click and
//! pointer-down signals. The host delivers signals back through [`Overflow::handle`].
//!
//! ## Disclosure modes
//!
//! - Inline (default): overflowed children are hidden, the container gets
//!   [`Options::collapsed_class`], and the trigger toggles between
//!   [`Options::button_text_more`] and [`Options::button_text_less`].
//! - Popover, clone: overflowed children stay hidden in the row and copies are shown
//!   in the overlay panel.
//! - Popover, move: overflowed children are moved into the overlay panel, in order, and
//!   moved back before the trigger once they fit again.
//!
//! An open popover closes on a pointer-down outside both the overlay and the trigger.
//!
//! ## Fitting
//!
//! [`fit()`] is the pure rule behind every layout pass. Children are admitted left to
//! right while the running width stays within the container; before each child, if the
//! running width plus the trigger would exceed the container, the last admitted child
//! is evicted to make room for the trigger and fitting stops.
//!
//! ## Minimal usage
//!
//! ```
//! use understory_flow_tree::{BoxStyle, Tag, Tree};
//! use understory_overflow::{Options, Overflow, adapters::flow_tree};
//!
//! let mut tree = Tree::new();
//! let body = tree.body();
//! let nav = tree.insert(body, Tag::Div, BoxStyle::fixed(550.0, 30.0));
//! let items: Vec<_> = (0..5)
//!     .map(|_| tree.insert(nav, Tag::Span, BoxStyle::fixed(100.0, 30.0)))
//!     .collect();
//!
//! let mut overflow = Overflow::new(&mut tree, nav, Options::default());
//! assert_eq!(overflow.visible_count(), 5);
//!
//! // Narrow the row and let the resize observer drive the next pass.
//! tree.set_width(nav, 300.0);
//! flow_tree::settle(&mut tree, &mut overflow);
//! assert_eq!(overflow.visible_count(), 2);
//! assert_eq!(overflow.overflow(), &items[2..]);
//!
//! overflow.destroy(&mut tree);
//! assert!(!overflow.is_live());
//! ```
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

pub mod adapters;
pub mod disclosure;
pub mod fit;
pub mod host;
pub mod overlay;

mod controller;
mod error;
mod options;

pub use controller::Overflow;
pub use disclosure::{Disclosure, InlineState, Label, PopoverState};
pub use error::Error;
pub use fit::{Fit, fit};
pub use host::{Host, Interest, Presentation, Signal, Tag, WidthOracle};
pub use options::{
    ContainerRef, DEFAULT_POPOVER_STYLE, DEFAULT_POPOVER_WRAP_STYLE, Options,
};
pub use overlay::Overlay;
