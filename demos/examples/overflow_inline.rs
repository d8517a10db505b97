// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Inline disclosure on a shrinking navigation row.
//!
//! The row is narrowed step by step; after each step the resize observer drives a
//! layout pass and the split is printed. Clicking the trigger then expands the row.
//!
//! Run:
//! - `RUST_LOG=debug cargo run -p understory_demos --example overflow_inline`

use kurbo::Insets;
use understory_flow_tree::{BoxStyle, NodeFlags, NodeId, Tag, Tree};
use understory_overflow::adapters::flow_tree::{deliver, settle};
use understory_overflow::{ContainerRef, Options, Overflow};

const LABELS: [&str; 6] = ["Home", "Products", "Pricing", "Docs", "Blog", "Contact"];

fn print_row(tree: &Tree, nav: NodeId, overflow: &Overflow<Tree>) {
    let shown: Vec<&str> = tree
        .children(nav)
        .iter()
        .filter(|&&c| !tree.flags(c).contains(NodeFlags::HIDDEN))
        .map(|&c| tree.text(c))
        .collect();
    println!(
        "  width {:>5}: [{}]  visible={} overflow={} collapsed={}",
        tree.usable_width(nav),
        shown.join(" | "),
        overflow.visible_count(),
        overflow.overflow().len(),
        overflow.is_collapsed(),
    );
}

fn main() {
    env_logger::init();

    let mut tree = Tree::new();
    let body = tree.body();
    let nav = tree.insert(
        body,
        Tag::Div,
        BoxStyle {
            width: Some(640.0),
            height: Some(32.0),
            padding: Insets::uniform_xy(12.0, 0.0),
            ..Default::default()
        },
    );
    tree.set_id_attr(nav, "main-nav");
    for label in LABELS {
        let item = tree.insert(
            nav,
            Tag::Span,
            BoxStyle {
                margin: Insets::uniform_xy(6.0, 0.0),
                ..Default::default()
            },
        );
        tree.set_text(item, label);
    }

    let mut overflow = Overflow::new(
        &mut tree,
        ContainerRef::selector("#main-nav"),
        Options {
            button_text_more: "More...".into(),
            ..Default::default()
        },
    );

    println!("== Shrinking ==");
    print_row(&tree, nav, &overflow);
    for width in [420.0, 300.0, 180.0] {
        tree.set_width(nav, width);
        settle(&mut tree, &mut overflow);
        print_row(&tree, nav, &overflow);
    }

    println!("== Trigger clicked ==");
    if let Some(trigger) = overflow.trigger() {
        let notes = tree.click(tree.bounding_rect(trigger).center());
        deliver(&mut tree, &mut overflow, &notes);
        println!("  trigger label: {}", tree.text(trigger));
    }
    print_row(&tree, nav, &overflow);

    overflow.destroy(&mut tree);
    println!("== Destroyed ==");
    print_row(&tree, nav, &overflow);
}
