// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Disclosure state machine: inline expand/collapse or a popover with outside-click dismissal.
//!
//! ## Modes
//!
//! The mode is chosen once from [`Options::popover`](crate::Options::popover) and never
//! changes for an instance.
//!
//! - Inline: [`InlineState::Collapsed`] ⇄ [`InlineState::Expanded`] on every trigger click.
//! - Popover: [`PopoverState::Closed`] ⇄ [`PopoverState::Open`] on every trigger click, and
//!   Open → Closed on a pointer-down outside both the overlay and the trigger.
//!
//! ## Outside-click listener
//!
//! While a popover is open it holds exactly one document pointer-down subscription.
//! The subscription is acquired on the Closed → Open transition and released on
//! Open → Closed or teardown, so repeated toggling never stacks listeners.

use crate::host::{Host, Interest};

/// Inline disclosure state.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub enum InlineState {
    /// Overflowed children are hidden.
    #[default]
    Collapsed,
    /// Overflowed children are shown in the row.
    Expanded,
}

impl InlineState {
    /// The other state.
    #[must_use]
    pub fn toggled(self) -> Self {
        match self {
            Self::Collapsed => Self::Expanded,
            Self::Expanded => Self::Collapsed,
        }
    }
}

/// Popover disclosure state.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub enum PopoverState {
    /// The overlay is hidden.
    #[default]
    Closed,
    /// The overlay is shown and outside clicks are watched.
    Open,
}

/// Which trigger label to show.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum Label {
    /// [`Options::button_text_more`](crate::Options::button_text_more).
    More,
    /// [`Options::button_text_less`](crate::Options::button_text_less).
    Less,
}

/// Mode and state of an instance's disclosure.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum Disclosure<S> {
    /// Inline mode.
    Inline(InlineState),
    /// Popover mode, with the outside-click subscription held while open.
    Popover {
        /// Current state.
        state: PopoverState,
        /// Document pointer-down subscription; `Some` exactly while open.
        outside: Option<S>,
    },
}

impl<S: Copy + Eq> Disclosure<S> {
    /// Initial state for the given mode: collapsed or closed.
    pub fn new(popover: bool) -> Self {
        if popover {
            Self::Popover {
                state: PopoverState::Closed,
                outside: None,
            }
        } else {
            Self::Inline(InlineState::Collapsed)
        }
    }

    /// Returns true in popover mode.
    pub fn is_popover(&self) -> bool {
        matches!(self, Self::Popover { .. })
    }

    /// Returns true if the popover is open. Always false inline.
    pub fn is_open(&self) -> bool {
        matches!(
            self,
            Self::Popover {
                state: PopoverState::Open,
                ..
            }
        )
    }

    /// Returns true if inline children are collapsed. Always false for a popover.
    pub fn is_collapsed(&self) -> bool {
        matches!(self, Self::Inline(InlineState::Collapsed))
    }

    /// Trigger label for the current state. A popover trigger always reads "more".
    pub fn label(&self) -> Label {
        match self {
            Self::Inline(InlineState::Expanded) => Label::Less,
            _ => Label::More,
        }
    }

    /// Returns true if `subscription` is the held outside-click subscription.
    pub fn owns(&self, subscription: S) -> bool {
        matches!(self, Self::Popover { outside: Some(s), .. } if *s == subscription)
    }

    /// Flip the inline state. Returns the new state, or `None` in popover mode.
    pub fn toggle_inline(&mut self) -> Option<InlineState> {
        match self {
            Self::Inline(state) => {
                *state = state.toggled();
                Some(*state)
            }
            Self::Popover { .. } => None,
        }
    }

    /// Move a popover to `open`, acquiring or releasing the outside-click subscription.
    ///
    /// Returns true if the state changed. Inline mode is left untouched.
    pub fn set_open<H>(&mut self, host: &mut H, open: bool) -> bool
    where
        H: Host<Subscription = S> + ?Sized,
    {
        let Self::Popover { state, outside } = self else {
            return false;
        };
        let was_open = *state == PopoverState::Open;
        if open {
            if outside.is_none() {
                *outside = host.subscribe(Interest::DocumentPointerDown);
                if outside.is_none() {
                    log::warn!("outside-click listener unavailable; popover closes only from its trigger");
                }
            }
            *state = PopoverState::Open;
        } else {
            if let Some(s) = outside.take() {
                host.unsubscribe(s);
            }
            *state = PopoverState::Closed;
        }
        was_open != open
    }

    /// Release the outside-click subscription, if held, and close.
    pub fn release<H>(&mut self, host: &mut H)
    where
        H: Host<Subscription = S> + ?Sized,
    {
        self.set_open(host, false);
    }
}

/// Returns true if a pointer-down on `target` should dismiss an open popover.
///
/// That is the case when `target` is in neither the overlay nor the trigger.
pub fn is_outside<H: Host + ?Sized>(
    host: &H,
    target: H::Node,
    overlay: Option<H::Node>,
    trigger: H::Node,
) -> bool {
    let in_overlay = overlay.is_some_and(|o| host.contains(o, target));
    !in_overlay && !host.contains(trigger, target)
}
