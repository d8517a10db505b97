// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Understory Flow Tree: a Kurbo-native element tree with a single-row flow layout.
//!
//! This crate is a small, self-contained stand-in for a document: elements with
//! classes, text, inline style text and box styles, laid out left to right in one row
//! per parent. It is the host environment the Understory overflow behavior runs
//! against in tests, demos and benchmarks, and a reference for adapting a real toolkit.
//!
//! - Structure: generational [`NodeId`] handles, append / insert-before / detach /
//!   remove, deep clone, and simple `#id` / `.class` / tag selectors.
//! - Presentation: [`NodeFlags`] for `display: none`, absolute positioning,
//!   `visibility: hidden` and zero height.
//! - Geometry: content, border-box and margin-box widths, document-space bounding
//!   rectangles, and topmost-element hit testing.
//! - Signals: resize observers, click listeners and document pointer-down listeners
//!   that yield [`Notification`]s instead of invoking callbacks.
//!
//! ## Not a browser
//!
//! Rows never wrap, text is measured with a fixed per-character advance, and inline
//! style text is stored verbatim without being interpreted. Elements are sized by their
//! [`BoxStyle`].
//!
//! ## Minimal usage
//!
//! ```
//! use understory_flow_tree::{BoxStyle, ListenerKind, Tag, Tree};
//! use kurbo::Point;
//!
//! let mut tree = Tree::new();
//! let body = tree.body();
//!
//! let row = tree.insert(body, Tag::Div, BoxStyle::fixed(300.0, 20.0));
//! let a = tree.insert(row, Tag::Span, BoxStyle::fixed(100.0, 20.0));
//! let b = tree.insert(row, Tag::Span, BoxStyle::fixed(100.0, 20.0));
//!
//! assert_eq!(tree.bounding_rect(b).x0, 100.0);
//! assert_eq!(tree.hit_test_point(Point::new(50.0, 10.0)), a);
//!
//! // Observe the row, then resize it.
//! let observer = tree.listen(ListenerKind::Resize, row).unwrap();
//! tree.set_width(row, 150.0);
//! let notes = tree.take_resize_notifications();
//! assert_eq!(notes.len(), 1);
//! assert_eq!(notes[0].listener, observer);
//! ```
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod events;
mod layout;
mod tree;
mod types;

pub use tree::{DEFAULT_BODY_WIDTH, DEFAULT_TEXT_ADVANCE, Tree};
pub use types::{BoxStyle, ListenerId, ListenerKind, NodeFlags, NodeId, Notification, Tag};
