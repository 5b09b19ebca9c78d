//! Kernels returning the first element strictly greater than the query.

use crate::{find::is_sorted, NOT_FOUND};

pub fn find_gt_naive(vals: &[i32], q: i32) -> isize {
    for (i, &x) in vals.iter().enumerate() {
        if x > q {
            return i as isize;
        }
    }
    NOT_FOUND
}

/// Full scan that never exits early, overwriting the running index on every `x > q`.
///
/// On a sorted buffer this returns the *last* greater element (`len - 1`), not
/// the first one like [`find_gt_naive`], mirroring
/// [`find_equal_no_break`](crate::find_equal_no_break).
pub fn find_gt_no_break(vals: &[i32], q: i32) -> isize {
    let mut index = NOT_FOUND;
    for (i, &x) in vals.iter().enumerate() {
        if x > q {
            index = i as isize;
        }
    }
    index
}

/// Branchless count of the elements `<= q`, i.e. the upper bound of `q`.
///
/// Returns `vals.len()` when no element is greater. Only meaningful on a sorted buffer.
pub fn find_gt_compare(vals: &[i32], q: i32) -> isize {
    debug_assert!(is_sorted(vals), "find_gt_compare on unsorted buffer");
    let mut count = 0;
    for &x in vals {
        count += (x <= q) as usize;
    }
    count as isize
}

pub fn find_gt_std_find(vals: &[i32], q: i32) -> isize {
    vals.iter()
        .position(|&x| x > q)
        .map_or(NOT_FOUND, |i| i as isize)
}

/// Lower bound with the comparator reversed: first position with `vals[i] > q`
/// (bisect-right), or `vals.len()` if there is none.
pub fn find_gt_lower_bound(vals: &[i32], q: i32) -> isize {
    debug_assert!(is_sorted(vals), "find_gt_lower_bound on unsorted buffer");
    vals.partition_point(|&x| x <= q) as isize
}
