// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Popover disclosure in move mode, with outside-click dismissal.
//!
//! Overflowed items are moved into a floating panel anchored under the trigger.
//! The demo opens the popover, clicks inside it (it stays open), then clicks
//! elsewhere in the document (it closes).
//!
//! Run:
//! - `RUST_LOG=debug cargo run -p understory_demos --example overflow_popover`
//! - `cargo run -p understory_demos --example overflow_popover -- clone` for clone mode

use kurbo::Point;
use understory_flow_tree::{BoxStyle, ListenerKind, NodeId, Tag, Tree};
use understory_overflow::adapters::flow_tree::{deliver, settle};
use understory_overflow::{Options, Overflow};

fn describe(tree: &Tree, overflow: &Overflow<Tree>) {
    let Some(overlay) = overflow.overlay() else {
        println!("  no overlay");
        return;
    };
    let panel: Vec<NodeId> = tree.children(overlay.panel).to_vec();
    println!(
        "  open={} panel={:?} wrap={:?} outside-listeners={}",
        overflow.is_open(),
        panel,
        tree.bounding_rect(overlay.wrap),
        tree.listener_count(ListenerKind::PointerDown),
    );
}

fn main() {
    env_logger::init();
    let clone = std::env::args().any(|a| a == "clone");

    let mut tree = Tree::new();
    let body = tree.body();
    let toolbar = tree.insert(body, Tag::Div, BoxStyle::fixed(500.0, 40.0));
    for _ in 0..8 {
        tree.insert(toolbar, Tag::Button, BoxStyle::fixed(80.0, 40.0));
    }

    let mut overflow = Overflow::new(
        &mut tree,
        toolbar,
        Options {
            popover: true,
            clone,
            ..Default::default()
        },
    );
    println!(
        "== {} mode, {} of 8 visible ==",
        if clone { "clone" } else { "move" },
        overflow.visible_count()
    );

    let Some(trigger) = overflow.trigger() else {
        return;
    };
    let notes = tree.click(tree.bounding_rect(trigger).center());
    deliver(&mut tree, &mut overflow, &notes);
    println!("== Opened ==");
    describe(&tree, &overflow);

    if let Some(overlay) = overflow.overlay() {
        let inside = tree.bounding_rect(overlay.panel).center();
        let notes = tree.pointer_down(inside);
        deliver(&mut tree, &mut overflow, &notes);
        println!("== Pointer down inside the panel ==");
        describe(&tree, &overflow);
    }

    let notes = tree.pointer_down(Point::new(900.0, 600.0));
    deliver(&mut tree, &mut overflow, &notes);
    println!("== Pointer down elsewhere ==");
    describe(&tree, &overflow);

    tree.set_width(toolbar, 800.0);
    settle(&mut tree, &mut overflow);
    println!("== Widened to 800: {} visible ==", overflow.visible_count());
    describe(&tree, &overflow);

    overflow.destroy(&mut tree);
    overflow.destroy(&mut tree);
    println!(
        "== Destroyed twice: {} children back in the toolbar ==",
        tree.children(toolbar).len()
    );
}
