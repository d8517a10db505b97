// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Fit calculator: how many leading children fit in a row next to the trigger.
//!
//! ## Rule
//!
//! Children are accumulated left to right. Before each child is considered, the
//! trigger is tried against the running total: if the children taken so far plus the
//! trigger would not fit, the last child taken is evicted and the pass stops. Otherwise
//! the child is taken if it fits on its own, and the pass stops at the first one that
//! does not.
//!
//! The trigger is only reserved for once a further child is known to exist, so a row
//! whose children all fit never pays for it.
//!
//! Widths are pulled lazily, so callers can measure as the pass advances and children
//! past the stopping point are never measured.

use core::ops::Range;

/// Result of one fit pass over `total` children.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Fit {
    /// Number of leading children that stay in the row.
    pub visible: usize,
    /// Number of children considered.
    pub total: usize,
}

impl Fit {
    /// Indices of the overflowed children, in their original order.
    pub fn overflow(&self) -> Range<usize> {
        self.visible..self.total
    }

    /// Number of overflowed children.
    pub fn overflow_len(&self) -> usize {
        self.total - self.visible
    }

    /// Returns true if any child overflowed, meaning the trigger must be shown.
    pub fn has_overflow(&self) -> bool {
        self.visible < self.total
    }
}

/// Split `widths` into a visible prefix and an overflowed suffix.
///
/// Returns `None` when `container_width` is not positive; callers keep their previous
/// split in that case. When even the trigger does not fit, nothing is visible.
///
/// ```
/// use understory_overflow::fit::fit;
///
/// // Five 100-wide children, a 50-wide trigger.
/// let widths = [100.0; 5];
/// assert_eq!(fit(550.0, 50.0, widths).unwrap().visible, 5);
/// assert_eq!(fit(300.0, 50.0, widths).unwrap().visible, 2);
/// assert!(fit(0.0, 50.0, widths).is_none());
/// ```
pub fn fit<I>(container_width: f64, trigger_width: f64, widths: I) -> Option<Fit>
where
    I: IntoIterator<Item = f64>,
    I::IntoIter: ExactSizeIterator,
{
    // `!(x > 0)` also rejects NaN.
    if !(container_width > 0.0) {
        return None;
    }
    let widths = widths.into_iter();
    let total = widths.len();
    let mut visible = 0_usize;
    let mut used = 0.0;
    for width in widths {
        if used + trigger_width > container_width {
            visible = visible.saturating_sub(1);
            break;
        }
        if used + width > container_width {
            break;
        }
        used += width;
        visible += 1;
    }
    Some(Fit { visible, total })
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec::Vec;

    fn visible(container: f64, trigger: f64, widths: &[f64]) -> usize {
        fit(container, trigger, widths.iter().copied()).unwrap().visible
    }

    #[test]
    fn everything_fits_without_trigger() {
        // 500 of 500 used: the trigger would not fit, but nothing overflows.
        assert_eq!(visible(500.0, 50.0, &[100.0; 5]), 5);
        let f = fit(550.0, 50.0, [100.0; 5]).unwrap();
        assert!(!f.has_overflow());
        assert!(f.overflow().is_empty());
    }

    #[test]
    fn stops_at_first_child_that_does_not_fit() {
        // 100 + 150 fit in 260 with room for a 10-wide trigger; 200 does not.
        let f = fit(260.0, 10.0, [100.0, 150.0, 200.0, 10.0]).unwrap();
        assert_eq!(f.visible, 2);
        assert_eq!(f.overflow(), 2..4);
        assert_eq!(f.overflow_len(), 2);
    }

    #[test]
    fn evicts_exactly_one_child_for_the_trigger() {
        // Three children exactly fill 300; a fourth exists, so one makes room.
        assert_eq!(visible(300.0, 50.0, &[100.0; 4]), 2);
        // A wide trigger stops the pass earlier: two taken, the second evicted.
        assert_eq!(visible(300.0, 150.0, &[100.0; 4]), 1);
        // Room left over for the trigger: nobody is evicted.
        assert_eq!(visible(350.0, 50.0, &[100.0; 4]), 3);
    }

    #[test]
    fn shrink_round_trip() {
        let widths = [100.0; 5];
        assert_eq!(visible(550.0, 40.0, &widths), 5);
        // 200 + 40 <= 300 and 300 + 40 > 300.
        assert_eq!(visible(300.0, 40.0, &widths), 2);
        assert_eq!(visible(550.0, 40.0, &widths), 5);
    }

    #[test]
    fn trigger_wider_than_container_shows_nothing() {
        assert_eq!(visible(80.0, 120.0, &[10.0, 10.0]), 0);
        assert_eq!(visible(80.0, 120.0, &[]), 0);
    }

    #[test]
    fn non_positive_width_is_skipped() {
        assert!(fit(0.0, 10.0, [1.0]).is_none());
        assert!(fit(-5.0, 10.0, [1.0]).is_none());
        assert!(fit(f64::NAN, 10.0, [1.0]).is_none());
    }

    #[test]
    fn empty_children() {
        let f = fit(100.0, 10.0, core::iter::empty::<f64>()).unwrap();
        assert_eq!(f, Fit { visible: 0, total: 0 });
        assert!(!f.has_overflow());
    }

    #[test]
    fn visible_count_is_monotonic_in_container_width() {
        let widths = [35.0, 80.0, 12.5, 60.0, 47.0, 90.0, 5.0];
        let mut last = 0;
        let mut w = 1.0;
        while w < 400.0 {
            let v = visible(w, 30.0, &widths);
            assert!(v >= last, "visible count dropped at width {w}");
            last = v;
            w += 0.5;
        }
        assert_eq!(last, widths.len());
    }

    #[test]
    fn partitions_preserve_order_and_cover_all() {
        let widths: Vec<f64> = (1..=12_u32).map(|i| f64::from(i) * 7.0).collect();
        for container in [3.0, 50.0, 120.0, 200.0, 600.0] {
            let f = fit(container, 20.0, widths.iter().copied()).unwrap();
            let visible: Vec<usize> = (0..f.visible).collect();
            let overflow: Vec<usize> = f.overflow().collect();
            assert_eq!(visible.len() + overflow.len(), widths.len());
            assert!(visible.iter().all(|i| !overflow.contains(i)));
            assert!(overflow.windows(2).all(|w| w[0] < w[1]));
        }
    }
}
