// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Layout controller and lifecycle: the [`Overflow`] instance.

use alloc::vec::Vec;
use core::fmt;

use crate::disclosure::{Disclosure, Label, is_outside};
use crate::error::Error;
use crate::fit::fit;
use crate::host::{Host, Interest, Presentation, Signal, Tag, set_flags};
use crate::options::{ContainerRef, Options};
use crate::overlay::Overlay;

/// Elements and subscriptions owned by a live instance.
#[derive(Copy, Clone, Debug)]
struct Parts<N, S> {
    container: N,
    trigger: N,
    overlay: Option<Overlay<N>>,
    resize: Option<S>,
    click: Option<S>,
}

/// Keeps as many children of a container in its row as fit, and discloses the rest.
///
/// ## Lifecycle
///
/// - [`Overflow::new`] creates the trigger (and the overlay in popover mode), starts
///   observing the container's size, and runs the first layout pass. If the container
///   cannot be resolved the instance is inert: it owns nothing and every call is a no-op.
/// - [`Overflow::handle`] consumes host signals: container resizes re-run the layout pass,
///   trigger clicks toggle the disclosure, and pointer-downs outside an open popover close it.
/// - [`Overflow::destroy`] releases every subscription, puts children back, and removes
///   the trigger and overlay. It is safe to call repeatedly.
///
/// ## Layout pass
///
/// [`Overflow::recompute`] measures in two phases. The trigger is first put in a
/// measurable but out-of-flow, invisible state and measured, then the fit is decided,
/// and only then is the trigger's final visibility committed. Running the pass again
/// with unchanged geometry yields the same end state.
pub struct Overflow<H: Host> {
    options: Options<H::Node>,
    parts: Option<Parts<H::Node, H::Subscription>>,
    overflow: Vec<H::Node>,
    visible: usize,
    disclosure: Disclosure<H::Subscription>,
}

impl<H: Host> fmt::Debug for Overflow<H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Overflow")
            .field("live", &self.parts.is_some())
            .field("visible", &self.visible)
            .field("overflow", &self.overflow)
            .field("disclosure", &self.disclosure)
            .finish_non_exhaustive()
    }
}

impl<H: Host> Overflow<H> {
    /// Attach to `container`, logging and returning an inert instance on failure.
    pub fn new<'a>(
        host: &mut H,
        container: impl Into<ContainerRef<'a, H::Node>>,
        options: Options<H::Node>,
    ) -> Self {
        let popover = options.popover;
        Self::try_new(host, container, options).unwrap_or_else(|err| {
            log::error!("overflow disabled: {err}");
            Self::inert(popover)
        })
    }

    /// Attach to `container`, reporting why it could not.
    pub fn try_new<'a>(
        host: &mut H,
        container: impl Into<ContainerRef<'a, H::Node>>,
        options: Options<H::Node>,
    ) -> Result<Self, Error> {
        let container = match container.into() {
            ContainerRef::Node(node) if host.is_alive(node) => node,
            ContainerRef::Node(_) => return Err(Error::StaleContainer),
            ContainerRef::Selector(selector) => {
                host.query_selector(selector)
                    .ok_or_else(|| Error::ContainerNotFound {
                        selector: selector.into(),
                    })?
            }
        };
        let attach_to = options.popover_container.unwrap_or_else(|| host.body());
        let options = Options {
            popover_container: Some(attach_to),
            ..options
        };

        let trigger = host
            .create_element(Tag::Button)
            .ok_or(Error::ElementCreation { part: "trigger" })?;
        host.set_text(trigger, &options.button_text_more);
        host.set_class_name(trigger, &options.button_class);
        host.set_class(trigger, &options.hidden_class, true);
        host.set_presentation(trigger, Presentation::HIDDEN);
        host.append_child(container, trigger);

        let overlay = if options.popover {
            let overlay = Overlay::create(host, &options, attach_to);
            if overlay.is_none() {
                log::warn!("host could not create the overlay; popover disclosure is disabled");
            }
            overlay
        } else {
            None
        };

        let click = host.subscribe(Interest::Click(trigger));
        let resize = host.subscribe(Interest::Resize(container));
        if resize.is_none() {
            log::warn!("size observation unavailable; call `recompute` after resizing");
        }

        let mut this = Self {
            disclosure: Disclosure::new(options.popover),
            options,
            parts: Some(Parts {
                container,
                trigger,
                overlay,
                resize,
                click,
            }),
            overflow: Vec::new(),
            visible: 0,
        };
        this.recompute(host);
        Ok(this)
    }

    fn inert(popover: bool) -> Self {
        Self {
            options: Options {
                popover,
                ..Default::default()
            },
            parts: None,
            overflow: Vec::new(),
            visible: 0,
            disclosure: Disclosure::new(popover),
        }
    }

    /// Resolved options.
    pub fn options(&self) -> &Options<H::Node> {
        &self.options
    }

    /// Returns true until [`Overflow::destroy`]; false for inert instances.
    pub fn is_live(&self) -> bool {
        self.parts.is_some()
    }

    /// The container, while live.
    pub fn container(&self) -> Option<H::Node> {
        self.parts.map(|p| p.container)
    }

    /// The trigger control, while live.
    pub fn trigger(&self) -> Option<H::Node> {
        self.parts.map(|p| p.trigger)
    }

    /// The overlay, while live in popover mode.
    pub fn overlay(&self) -> Option<Overlay<H::Node>> {
        self.parts.and_then(|p| p.overlay)
    }

    /// Number of leading children kept in the row by the last committed pass.
    pub fn visible_count(&self) -> usize {
        self.visible
    }

    /// Children that did not fit in the last committed pass, in document order.
    pub fn overflow(&self) -> &[H::Node] {
        &self.overflow
    }

    /// Current disclosure mode and state.
    pub fn disclosure(&self) -> &Disclosure<H::Subscription> {
        &self.disclosure
    }

    /// Returns true if the popover is open.
    pub fn is_open(&self) -> bool {
        self.disclosure.is_open()
    }

    /// Returns true if inline overflow is collapsed.
    pub fn is_collapsed(&self) -> bool {
        self.disclosure.is_collapsed()
    }

    fn hides_children(&self, overlay: Option<Overlay<H::Node>>) -> bool {
        // Without an overlay, move mode has nowhere to put children.
        self.options.hides_children() || overlay.is_none()
    }

    /// Re-measure and re-split the container's children.
    ///
    /// Does nothing when the container's usable width is not positive; the previous
    /// split stays in place until a later pass succeeds.
    pub fn recompute(&mut self, host: &mut H) {
        let Some(Parts {
            container,
            trigger,
            overlay,
            ..
        }) = self.parts
        else {
            return;
        };
        let width = host.usable_width(container);
        if !(width > 0.0) {
            log::trace!("overflow pass skipped: usable width {width}");
            return;
        }

        // Probe: measure the trigger without letting it take room in the row.
        host.set_presentation(trigger, Presentation::PROBE);
        let trigger_width = host.place_width(trigger);

        let hides = self.hides_children(overlay);
        let wrap = overlay.map(|o| o.wrap);
        let mut candidates: Vec<H::Node> = host
            .children(container)
            .into_iter()
            .filter(|&c| c != trigger && Some(c) != wrap)
            .collect();
        if hides {
            for &child in &candidates {
                set_flags(host, child, Presentation::HIDDEN, false);
            }
        } else if let Some(overlay) = overlay {
            // Parked children compete at their natural width, after the row's own.
            candidates.extend(host.children(overlay.panel));
        }

        let Some(split) = fit(
            width,
            trigger_width,
            candidates.iter().map(|&c| host.place_width(c)),
        ) else {
            return;
        };

        self.visible = split.visible;
        self.overflow = candidates.split_off(split.visible);
        if hides {
            for &child in &self.overflow {
                set_flags(host, child, Presentation::HIDDEN, true);
            }
        }

        // Commit the trigger's final state.
        let has_overflow = split.has_overflow();
        let presentation = if has_overflow {
            Presentation::empty()
        } else {
            Presentation::HIDDEN
        };
        host.set_presentation(trigger, presentation);
        host.set_class(trigger, &self.options.hidden_class, !has_overflow);

        log::debug!(
            "overflow pass: width={width} trigger={trigger_width} visible={} overflow={}",
            split.visible,
            split.overflow_len()
        );

        if self.disclosure.is_popover() {
            if let Some(overlay) = overlay {
                overlay.refresh(host, &self.options, container, trigger, &self.overflow);
            }
        } else {
            self.apply_inline(host);
        }
    }

    fn apply_inline(&self, host: &mut H) {
        let Some(Parts {
            container, trigger, ..
        }) = self.parts
        else {
            return;
        };
        let collapsed = self.disclosure.is_collapsed();
        for &child in &self.overflow {
            set_flags(host, child, Presentation::HIDDEN, collapsed);
        }
        host.set_class(container, &self.options.collapsed_class, collapsed);
        let label = match self.disclosure.label() {
            Label::More => &self.options.button_text_more,
            Label::Less => &self.options.button_text_less,
        };
        host.set_text(trigger, label);
    }

    /// Act on a trigger click: flip the inline state, or open/close the popover.
    pub fn toggle(&mut self, host: &mut H) {
        if self.parts.is_none() {
            return;
        }
        if let Some(state) = self.disclosure.toggle_inline() {
            log::debug!("inline disclosure: {state:?}");
            self.apply_inline(host);
        } else {
            let open = !self.disclosure.is_open();
            self.set_open(host, open);
        }
    }

    /// Open or close the popover. Does nothing inline or without an overlay.
    pub fn set_open(&mut self, host: &mut H, open: bool) {
        let Some(Parts {
            trigger,
            overlay: Some(overlay),
            ..
        }) = self.parts
        else {
            return;
        };
        if self.disclosure.set_open(host, open) {
            log::debug!("popover {}", if open { "opened" } else { "closed" });
        }
        overlay.set_visible(host, &self.options, open);
        if open {
            overlay.place(host, &self.options, trigger);
        }
    }

    /// Deliver a host signal received on `subscription`.
    ///
    /// Returns true if the signal was meant for this instance. Signals for subscriptions
    /// it does not currently hold, including any that arrive after teardown, are ignored.
    pub fn handle(
        &mut self,
        host: &mut H,
        subscription: H::Subscription,
        signal: Signal<H::Node>,
    ) -> bool {
        let Some(parts) = self.parts else {
            log::trace!("signal {signal:?} ignored: instance is not live");
            return false;
        };
        match signal {
            Signal::Resized if parts.resize == Some(subscription) => {
                self.recompute(host);
                true
            }
            Signal::Click { .. } if parts.click == Some(subscription) => {
                self.toggle(host);
                true
            }
            Signal::PointerDown { target } if self.disclosure.owns(subscription) => {
                let wrap = parts.overlay.map(|o| o.wrap);
                if is_outside(&*host, target, wrap, parts.trigger) {
                    self.set_open(host, false);
                }
                true
            }
            _ => false,
        }
    }

    /// Tear down: stop observing, restore children, and remove the trigger and overlay.
    ///
    /// Every step tolerates elements that were already removed. Calling this again, or
    /// on an inert instance, does nothing.
    pub fn destroy(&mut self, host: &mut H) {
        let Some(parts) = self.parts else {
            return;
        };
        if let Some(s) = parts.resize {
            host.unsubscribe(s);
        }
        if let Some(s) = parts.click {
            host.unsubscribe(s);
        }
        self.disclosure.release(host);

        let hides = self.hides_children(parts.overlay);
        if !hides && let Some(overlay) = parts.overlay {
            overlay.unpark(host, parts.container, parts.trigger);
        }
        if hides {
            for &child in &self.overflow {
                set_flags(host, child, Presentation::HIDDEN, false);
            }
        }
        if !self.disclosure.is_popover() {
            host.set_class(parts.container, &self.options.collapsed_class, false);
        }

        host.remove(parts.trigger);
        if let Some(overlay) = parts.overlay {
            overlay.remove(host);
        }

        self.parts = None;
        self.overflow.clear();
        self.visible = 0;
        log::debug!("overflow destroyed");
    }
}
