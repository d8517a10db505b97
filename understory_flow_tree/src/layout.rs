// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Single-row flow layout: measurement, placement, and hit testing.
//!
//! In-flow children of an element are placed left to right starting at its content
//! origin, each advancing the pen by its margin-box width. Rows never wrap; children
//! past the content edge overflow it. Out-of-flow children are placed at their
//! [`offset`](crate::Tree::offset) from the parent's padding box and take no space.
//!
//! Nothing is cached: every query walks the tree as it is at the time of the call.

use kurbo::{Point, Rect, Size, Vec2};

use crate::tree::Tree;
use crate::types::{NodeFlags, NodeId};

impl Tree {
    /// Returns true if neither `id` nor any ancestor is [`NodeFlags::HIDDEN`].
    pub fn is_displayed(&self, id: NodeId) -> bool {
        if !self.is_alive(id) {
            return false;
        }
        let mut cur = Some(id);
        while let Some(n) = cur {
            if self.flags(n).contains(NodeFlags::HIDDEN) {
                return false;
            }
            cur = self.parent(n);
        }
        true
    }

    fn in_flow(&self, id: NodeId) -> bool {
        let flags = self.flags(id);
        !flags.intersects(NodeFlags::HIDDEN | NodeFlags::OUT_OF_FLOW)
    }

    /// Content-box size of `id`. Zero when not displayed.
    pub fn content_size(&self, id: NodeId) -> Size {
        if !self.is_displayed(id) {
            return Size::ZERO;
        }
        self.content_size_unchecked(id)
    }

    fn content_size_unchecked(&self, id: NodeId) -> Size {
        let Some(style) = self.style(id) else {
            return Size::ZERO;
        };
        let (width, height) = match (style.width, style.height) {
            (Some(w), Some(h)) => (w, h),
            (w, h) => {
                let text = self.text(id);
                #[allow(
                    clippy::cast_precision_loss,
                    reason = "Text runs are far shorter than 2^52 characters."
                )]
                let mut sum = text.chars().count() as f64 * self.text_advance;
                let mut tallest = if text.is_empty() {
                    0.0_f64
                } else {
                    self.text_advance * 2.0
                };
                for &c in self.children(id) {
                    if self.in_flow(c) {
                        let margin_box = self.margin_box_unchecked(c);
                        sum += margin_box.width;
                        tallest = tallest.max(margin_box.height);
                    }
                }
                (w.unwrap_or(sum), h.unwrap_or(tallest))
            }
        };
        let height = if self.flags(id).contains(NodeFlags::COLLAPSED) {
            0.0
        } else {
            height
        };
        Size::new(width, height)
    }

    fn border_box_unchecked(&self, id: NodeId) -> Size {
        let content = self.content_size_unchecked(id);
        let Some(style) = self.style(id) else {
            return Size::ZERO;
        };
        Size::new(
            content.width + style.padding.x_value() + style.border.x_value(),
            content.height + style.padding.y_value() + style.border.y_value(),
        )
    }

    fn margin_box_unchecked(&self, id: NodeId) -> Size {
        let border_box = self.border_box_unchecked(id);
        let Some(style) = self.style(id) else {
            return Size::ZERO;
        };
        Size::new(
            border_box.width + style.margin.x_value(),
            border_box.height + style.margin.y_value(),
        )
    }

    /// Border-box width of `id`. Zero when not displayed.
    pub fn offset_width(&self, id: NodeId) -> f64 {
        if !self.is_displayed(id) {
            return 0.0;
        }
        self.border_box_unchecked(id).width
    }

    /// Border-box width plus horizontal margins: the room `id` takes in a row.
    ///
    /// Zero when not displayed.
    pub fn place_width(&self, id: NodeId) -> f64 {
        if !self.is_displayed(id) {
            return 0.0;
        }
        self.margin_box_unchecked(id).width
    }

    /// Content-box width of `id`, excluding padding and border. Zero when not displayed.
    pub fn usable_width(&self, id: NodeId) -> f64 {
        self.content_size(id).width
    }

    /// Document-space origin of the border box of `id`.
    fn border_origin(&self, id: NodeId) -> Point {
        let Some(style) = self.style(id) else {
            return Point::ZERO;
        };
        let margin = Vec2::new(style.margin.x0, style.margin.y0);
        let Some(parent) = self.parent(id) else {
            return Point::ZERO + margin;
        };
        let Some(parent_style) = self.style(parent) else {
            return Point::ZERO + margin;
        };
        let parent_origin = self.border_origin(parent);
        let padding_origin =
            parent_origin + Vec2::new(parent_style.border.x0, parent_style.border.y0);
        if self.flags(id).contains(NodeFlags::OUT_OF_FLOW) {
            return padding_origin + self.offset(id).to_vec2() + margin;
        }
        let content_origin =
            padding_origin + Vec2::new(parent_style.padding.x0, parent_style.padding.y0);
        let mut pen = 0.0;
        for &sibling in self.children(parent) {
            if sibling == id {
                break;
            }
            if self.in_flow(sibling) {
                pen += self.margin_box_unchecked(sibling).width;
            }
        }
        content_origin + Vec2::new(pen, 0.0) + margin
    }

    /// Document-space border box of `id`. [`Rect::ZERO`] when not displayed or detached.
    pub fn bounding_rect(&self, id: NodeId) -> Rect {
        if !self.is_displayed(id) || !self.is_connected(id) {
            return Rect::ZERO;
        }
        Rect::from_origin_size(self.border_origin(id), self.border_box_unchecked(id))
    }

    /// Topmost element under `pt`, or the body when nothing else is hit.
    ///
    /// Out-of-flow children are considered above in-flow ones and later siblings above
    /// earlier ones. Invisible subtrees are skipped, and children are tested even when
    /// they overflow their parent.
    pub fn hit_test_point(&self, pt: Point) -> NodeId {
        self.hit(self.body(), pt, false).unwrap_or(self.body())
    }

    fn hit(&self, id: NodeId, pt: Point, invisible: bool) -> Option<NodeId> {
        let flags = self.flags(id);
        if flags.contains(NodeFlags::HIDDEN) {
            return None;
        }
        let invisible = invisible || flags.contains(NodeFlags::INVISIBLE);
        let children = self.children(id);
        let layered = children
            .iter()
            .rev()
            .filter(|&&c| self.flags(c).contains(NodeFlags::OUT_OF_FLOW))
            .chain(
                children
                    .iter()
                    .rev()
                    .filter(|&&c| !self.flags(c).contains(NodeFlags::OUT_OF_FLOW)),
            );
        for &child in layered {
            if let Some(hit) = self.hit(child, pt, invisible) {
                return Some(hit);
            }
        }
        (!invisible && self.bounding_rect(id).contains(pt)).then_some(id)
    }
}

#[cfg(test)]
mod tests {
    use crate::tree::Tree;
    use crate::types::{BoxStyle, NodeFlags, Tag};
    use kurbo::{Insets, Point, Rect};

    fn row(tree: &mut Tree, width: f64) -> crate::NodeId {
        let body = tree.body();
        tree.insert(
            body,
            Tag::Div,
            BoxStyle {
                width: Some(width),
                height: Some(20.0),
                padding: Insets::uniform_xy(4.0, 0.0),
                border: Insets::uniform(1.0),
                ..Default::default()
            },
        )
    }

    #[test]
    fn widths_follow_box_model() {
        let mut tree = Tree::new();
        let r = row(&mut tree, 200.0);
        assert_eq!(tree.usable_width(r), 200.0);
        assert_eq!(tree.offset_width(r), 210.0);
        let item = tree.insert(
            r,
            Tag::Span,
            BoxStyle {
                margin: Insets::uniform_xy(3.0, 0.0),
                ..BoxStyle::fixed(50.0, 10.0)
            },
        );
        assert_eq!(tree.offset_width(item), 50.0);
        assert_eq!(tree.place_width(item), 56.0);
        tree.set_flags(item, NodeFlags::HIDDEN);
        assert_eq!(tree.place_width(item), 0.0);
        assert_eq!(tree.bounding_rect(item), Rect::ZERO);
    }

    #[test]
    fn shrink_to_fit_sums_in_flow_children() {
        let mut tree = Tree::new();
        let body = tree.body();
        let wrap = tree.insert(body, Tag::Div, BoxStyle::default());
        let a = tree.insert(wrap, Tag::Span, BoxStyle::fixed(30.0, 10.0));
        let _b = tree.insert(wrap, Tag::Span, BoxStyle::fixed(20.0, 15.0));
        let abs = tree.insert(wrap, Tag::Span, BoxStyle::fixed(500.0, 50.0));
        tree.set_flags(abs, NodeFlags::OUT_OF_FLOW);
        assert_eq!(tree.offset_width(wrap), 50.0);
        assert_eq!(tree.bounding_rect(wrap).height(), 15.0);
        tree.set_flags(a, NodeFlags::HIDDEN);
        assert_eq!(tree.offset_width(wrap), 20.0);
        tree.set_flags(wrap, NodeFlags::COLLAPSED);
        assert_eq!(tree.bounding_rect(wrap).height(), 0.0);
    }

    #[test]
    fn text_sizes_elements_without_explicit_width() {
        let mut tree = Tree::new();
        let body = tree.body();
        let label = tree.insert(body, Tag::Button, BoxStyle::default());
        tree.set_text(label, "More");
        assert_eq!(tree.offset_width(label), 32.0);
        assert_eq!(tree.bounding_rect(label).height(), 16.0);
        tree.set_text_advance(5.0);
        assert_eq!(tree.offset_width(label), 20.0);
        tree.set_width(label, 70.0);
        assert_eq!(tree.offset_width(label), 70.0);
    }

    #[test]
    fn children_are_placed_along_the_row() {
        let mut tree = Tree::new();
        let r = row(&mut tree, 200.0);
        let a = tree.insert(r, Tag::Span, BoxStyle::fixed(50.0, 10.0));
        let b = tree.insert(r, Tag::Span, BoxStyle::fixed(60.0, 10.0));
        // Content origin is border (1) + padding (4) from the row's origin.
        assert_eq!(tree.bounding_rect(a), Rect::new(5.0, 1.0, 55.0, 11.0));
        assert_eq!(tree.bounding_rect(b), Rect::new(55.0, 1.0, 115.0, 11.0));
        tree.set_flags(a, NodeFlags::OUT_OF_FLOW | NodeFlags::INVISIBLE);
        assert_eq!(tree.bounding_rect(b).x0, 5.0);
    }

    #[test]
    fn out_of_flow_uses_offset_from_padding_box() {
        let mut tree = Tree::new();
        let body = tree.body();
        let float = tree.insert(body, Tag::Div, BoxStyle::fixed(40.0, 40.0));
        tree.set_flags(float, NodeFlags::OUT_OF_FLOW);
        tree.set_offset(float, Point::new(100.0, 30.0));
        assert_eq!(tree.bounding_rect(float), Rect::new(100.0, 30.0, 140.0, 70.0));
    }

    #[test]
    fn hit_testing_prefers_floating_and_skips_invisible() {
        let mut tree = Tree::new();
        let body = tree.body();
        let r = row(&mut tree, 200.0);
        let a = tree.insert(r, Tag::Span, BoxStyle::fixed(50.0, 10.0));
        let float = tree.insert(body, Tag::Div, BoxStyle::fixed(40.0, 40.0));
        tree.set_flags(float, NodeFlags::OUT_OF_FLOW);
        tree.set_offset(float, Point::new(0.0, 0.0));
        assert_eq!(tree.hit_test_point(Point::new(10.0, 5.0)), float);
        tree.set_flags(float, NodeFlags::OUT_OF_FLOW | NodeFlags::INVISIBLE);
        assert_eq!(tree.hit_test_point(Point::new(10.0, 5.0)), a);
        assert_eq!(tree.hit_test_point(Point::new(150.0, 5.0)), r);
        assert_eq!(tree.hit_test_point(Point::new(900.0, 900.0)), body);
    }
}
