//! Equality search kernels over a sorted `i32` buffer.
//!
//! Every kernel has the signature [`FindFn`](crate::FindFn) and returns either an
//! index into `vals` or [`NOT_FOUND`]. The linear kernels work on any buffer;
//! the compare and lower-bound kernels rely on `vals` being sorted.

use itertools::Itertools;

use crate::{error::Precondition, Result, NOT_FOUND};

/// Index of the first element that is smaller than its predecessor.
pub fn first_unsorted(vals: &[i32]) -> Option<usize> {
    vals.iter()
        .tuple_windows()
        .position(|(a, b)| a > b)
        .map(|i| i + 1)
}

pub fn is_sorted(vals: &[i32]) -> bool {
    first_unsorted(vals).is_none()
}

/// Return the first index holding `q`, stopping at the first match.
pub fn find_equal_naive(vals: &[i32], q: i32) -> isize {
    for (i, &x) in vals.iter().enumerate() {
        if x == q {
            return i as isize;
        }
    }
    NOT_FOUND
}

/// Scan the full buffer without ever leaving the loop early.
///
/// Every match overwrites the running index, so with duplicates this returns
/// the *last* occurrence of `q`, not the first one like [`find_equal_naive`].
pub fn find_equal_no_break(vals: &[i32], q: i32) -> isize {
    let mut index = NOT_FOUND;
    for (i, &x) in vals.iter().enumerate() {
        if x == q {
            index = i as isize;
        }
    }
    index
}

/// Branchless scan counting the elements `< q`.
///
/// On a sorted buffer the count is the lower bound of `q`, which is the first
/// occurrence when `q` is present. Nothing is checked in release builds: an
/// unsorted buffer or an absent `q` gives a meaningless index. Use
/// [`find_equal_compare_checked`] when the input is not trusted.
pub fn find_equal_compare(vals: &[i32], q: i32) -> isize {
    debug_assert!(is_sorted(vals), "find_equal_compare on unsorted buffer");
    let mut count = 0;
    for &x in vals {
        count += (x < q) as usize;
    }
    debug_assert!(
        vals.get(count) == Some(&q),
        "find_equal_compare: {q} is not present"
    );
    count as isize
}

/// [`find_equal_compare`] with both preconditions validated up front.
pub fn find_equal_compare_checked(vals: &[i32], q: i32) -> Result<usize> {
    if let Some(index) = first_unsorted(vals) {
        return Err(Precondition::Unsorted { index }.into());
    }
    let count = vals.iter().map(|&x| (x < q) as usize).sum::<usize>();
    if vals.get(count) != Some(&q) {
        return Err(Precondition::TargetAbsent { target: q }.into());
    }
    Ok(count)
}

pub fn find_equal_std_find(vals: &[i32], q: i32) -> isize {
    vals.iter()
        .position(|&x| x == q)
        .map_or(NOT_FOUND, |i| i as isize)
}

/// First position with `vals[i] >= q`, or `vals.len()` if there is none.
///
/// This is the raw lower bound: the caller checks `vals[i] == q` if presence matters.
pub fn find_equal_lower_bound(vals: &[i32], q: i32) -> isize {
    debug_assert!(is_sorted(vals), "find_equal_lower_bound on unsorted buffer");
    vals.partition_point(|&x| x < q) as isize
}
