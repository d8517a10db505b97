// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Overlay manager: the floating wrap and panel that hold overflowed children in popover mode.
//!
//! ## Contents
//!
//! - Clone mode: the panel is emptied and refilled with copies of the overflow set on
//!   every refresh. Copies are forced visible; the originals stay hidden in the row.
//! - Move mode: the overflow set itself is moved into the panel, in order. Children that
//!   no longer overflow go back into the container just before the trigger.
//!
//! ## Placement
//!
//! The wrap is right-aligned under the trigger: its top is the trigger's bottom edge
//! plus the configured offset, its right edge is the trigger's right edge, both relative
//! to the overlay container.

use alloc::vec::Vec;
use kurbo::Point;

use crate::host::{Host, Presentation, Tag, set_flags};
use crate::options::Options;

/// Handles to the overlay elements.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct Overlay<N> {
    /// Positioned wrap attached to the overlay container.
    pub wrap: N,
    /// Panel inside the wrap holding the overflowed children.
    pub panel: N,
}

impl<N: Copy + Eq> Overlay<N> {
    /// Build the wrap and panel and attach them, closed, to `attach_to`.
    ///
    /// Returns `None` if the host cannot create either element.
    pub fn create<H>(host: &mut H, options: &Options<N>, attach_to: N) -> Option<Self>
    where
        H: Host<Node = N> + ?Sized,
    {
        let wrap = host.create_element(Tag::Div)?;
        let Some(panel) = host.create_element(Tag::Div) else {
            host.remove(wrap);
            return None;
        };
        host.set_class_name(wrap, &options.popover_wrap_class);
        host.set_style_text(wrap, &options.popover_wrap_style);
        host.set_class(wrap, &options.hidden_class, true);
        host.set_presentation(wrap, Presentation::OVERLAY_CLOSED);

        host.set_class_name(panel, &options.popover_class);
        host.set_style_text(panel, &options.popover_style);
        host.append_child(wrap, panel);

        host.append_child(attach_to, wrap);
        Some(Self { wrap, panel })
    }

    /// Bring the panel in line with `overflow`, then re-place the wrap under `trigger`.
    pub fn refresh<H>(
        &self,
        host: &mut H,
        options: &Options<N>,
        container: N,
        trigger: N,
        overflow: &[N],
    ) where
        H: Host<Node = N> + ?Sized,
    {
        if options.clone {
            self.fill_with_copies(host, overflow);
        } else {
            self.park(host, container, trigger, overflow);
        }
        self.place(host, options, trigger);
    }

    fn fill_with_copies<H>(&self, host: &mut H, overflow: &[N])
    where
        H: Host<Node = N> + ?Sized,
    {
        host.clear_children(self.panel);
        for &child in overflow {
            if let Some(copy) = host.clone_subtree(child) {
                set_flags(host, copy, Presentation::HIDDEN, false);
                host.append_child(self.panel, copy);
            }
        }
    }

    fn park<H>(&self, host: &mut H, container: N, trigger: N, overflow: &[N])
    where
        H: Host<Node = N> + ?Sized,
    {
        for child in host.children(self.panel) {
            if !overflow.contains(&child) {
                host.insert_before(container, child, trigger);
            }
        }
        // Re-appending in order is only needed when the panel differs.
        if host.children(self.panel).as_slice() != overflow {
            for &child in overflow {
                host.append_child(self.panel, child);
            }
        }
    }

    /// Return every parked child to `container`, before `trigger`, in order.
    pub fn unpark<H>(&self, host: &mut H, container: N, trigger: N)
    where
        H: Host<Node = N> + ?Sized,
    {
        let parked: Vec<N> = host.children(self.panel);
        for child in parked {
            host.insert_before(container, child, trigger);
        }
    }

    /// Right-align the wrap under `trigger`.
    pub fn place<H>(&self, host: &mut H, options: &Options<N>, trigger: N)
    where
        H: Host<Node = N> + ?Sized,
    {
        let anchor = host.bounding_rect(trigger);
        let frame = match host.parent(self.wrap) {
            Some(parent) => host.bounding_rect(parent),
            None => return,
        };
        let width = host.offset_width(self.wrap);
        let offset = Point::new(
            anchor.x1 - frame.x0 - width,
            anchor.y1 - frame.y0 + options.popover_offset,
        );
        host.set_offset(self.wrap, offset);
    }

    /// Show or hide the wrap.
    pub fn set_visible<H>(&self, host: &mut H, options: &Options<N>, visible: bool)
    where
        H: Host<Node = N> + ?Sized,
    {
        let presentation = if visible {
            Presentation::OVERLAY_OPEN
        } else {
            Presentation::OVERLAY_CLOSED
        };
        host.set_presentation(self.wrap, presentation);
        host.set_class(self.wrap, &options.hidden_class, !visible);
    }

    /// Detach the wrap. Returns false if it was already gone.
    pub fn remove<H>(&self, host: &mut H) -> bool
    where
        H: Host<Node = N> + ?Sized,
    {
        host.remove(self.wrap)
    }
}
