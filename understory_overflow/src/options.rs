// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Configuration record and container reference.

use alloc::string::String;

/// Inline style of the overlay wrap.
pub const DEFAULT_POPOVER_WRAP_STYLE: &str = "
  position: absolute;
  visibility: hidden;
  height: 0;
  z-index: 1000;
  background: #fff;
  box-shadow: 0 2px 5px rgba(0,0,0,0.2);";

/// Inline style of the overlay panel.
pub const DEFAULT_POPOVER_STYLE: &str = "
  padding: 10px;
  width: auto;
  width: fit-content;";

/// Options recognized by [`Overflow`](crate::Overflow).
///
/// Resolved once at construction; an instance never observes later changes.
///
/// ```
/// use understory_overflow::Options;
///
/// let options: Options<u32> = Options {
///     popover: true,
///     button_text_more: "+".into(),
///     ..Default::default()
/// };
/// assert_eq!(options.button_text_less, "Less");
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct Options<N> {
    /// Trigger label while children are hidden.
    pub button_text_more: String,
    /// Trigger label while inline children are expanded.
    pub button_text_less: String,
    /// Class name of the trigger.
    pub button_class: String,
    /// Class put on the container while inline children are collapsed.
    pub collapsed_class: String,
    /// Class put on the trigger when nothing overflows and on the overlay wrap while closed.
    pub hidden_class: String,
    /// Disclose through a floating overlay instead of inline.
    pub popover: bool,
    /// Fill the overlay with copies of the overflowed children instead of moving them.
    pub clone: bool,
    /// Class name of the overlay wrap.
    pub popover_wrap_class: String,
    /// Inline style applied verbatim to the overlay wrap.
    pub popover_wrap_style: String,
    /// Class name of the overlay panel.
    pub popover_class: String,
    /// Inline style applied verbatim to the overlay panel.
    pub popover_style: String,
    /// Element the overlay attaches to. `None` means the document body.
    pub popover_container: Option<N>,
    /// Vertical gap between the trigger's bottom edge and the overlay.
    pub popover_offset: f64,
}

impl<N> Default for Options<N> {
    fn default() -> Self {
        Self {
            button_text_more: "More".into(),
            button_text_less: "Less".into(),
            button_class: "responsive-button".into(),
            collapsed_class: "collapsed".into(),
            hidden_class: "responsive-hide".into(),
            popover: false,
            clone: false,
            popover_wrap_class: "responsive-popover-wrap".into(),
            popover_wrap_style: DEFAULT_POPOVER_WRAP_STYLE.into(),
            popover_class: "responsive-popover".into(),
            popover_style: DEFAULT_POPOVER_STYLE.into(),
            popover_container: None,
            popover_offset: 5.0,
        }
    }
}

impl<N> Options<N> {
    /// Whether overflowed children are taken out of the row with `display: none`.
    ///
    /// False only when they are moved into the overlay instead.
    pub fn hides_children(&self) -> bool {
        !self.popover || self.clone
    }
}

/// How the container is given to [`Overflow::new`](crate::Overflow::new).
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum ContainerRef<'a, N> {
    /// An element handle.
    Node(N),
    /// A selector resolved through [`Host::query_selector`](crate::Host::query_selector).
    Selector(&'a str),
}

impl<N> From<N> for ContainerRef<'_, N> {
    fn from(node: N) -> Self {
        Self::Node(node)
    }
}

impl<'a, N> ContainerRef<'a, N> {
    /// Shorthand for [`ContainerRef::Selector`].
    pub fn selector(selector: &'a str) -> Self {
        Self::Selector(selector)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_move_mode_keeps_children_displayed() {
        let inline: Options<u32> = Options::default();
        assert!(inline.hides_children());
        let moved = Options::<u32> {
            popover: true,
            ..Default::default()
        };
        assert!(!moved.hides_children());
        let cloned = Options::<u32> {
            clone: true,
            ..moved
        };
        assert!(cloned.hides_children());
    }

    #[test]
    fn container_refs() {
        assert_eq!(ContainerRef::from(7_u32), ContainerRef::Node(7));
        assert_eq!(
            ContainerRef::<u32>::selector(".nav"),
            ContainerRef::Selector(".nav")
        );
    }
}
