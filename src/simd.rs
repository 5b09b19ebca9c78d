//! Chunked linear search, 16 lanes at a time.
//!
//! The AVX2 path loads two 8-lane vectors per step, compares them against the
//! splatted query and takes the first set bit of the movemask. It is only used
//! when the CPU supports it; otherwise the scalar path runs the same chunked
//! loop with a bitmask built in registers.

use std::sync::LazyLock;

use log::debug;

use crate::NOT_FOUND;

/// Number of `i32` lanes processed per step: two 256-bit vectors.
pub const CHUNK: usize = 16;

/// Buffer length the harness allocates for a chunked kernel of logical size `n`.
pub fn padded_len(n: usize) -> usize {
    n.next_multiple_of(CHUNK).max(CHUNK)
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Isa {
    Scalar,
    Avx2,
}

static DETECTED: LazyLock<Isa> = LazyLock::new(|| {
    let isa = Isa::detect();
    debug!("Chunked search uses {isa:?}");
    isa
});

impl Isa {
    /// The widest instruction set available on this CPU.
    pub fn detect() -> Isa {
        if Isa::Avx2.is_available() {
            Isa::Avx2
        } else {
            Isa::Scalar
        }
    }

    /// Cached result of [`Isa::detect`].
    pub fn detected() -> Isa {
        *DETECTED
    }

    pub fn is_available(self) -> bool {
        match self {
            Isa::Scalar => true,
            #[cfg(target_arch = "x86_64")]
            Isa::Avx2 => is_x86_feature_detected!("avx2"),
            #[cfg(not(target_arch = "x86_64"))]
            Isa::Avx2 => false,
        }
    }

    /// First index with `vals[i] == q`, or [`NOT_FOUND`].
    ///
    /// An unavailable `self` runs the scalar path.
    pub fn find_equal(self, vals: &[i32], q: i32) -> isize {
        unsafe { self.or_scalar().find_equal_unchecked(vals, q) }
    }

    /// First index with `vals[i] > q`, or [`NOT_FOUND`].
    pub fn find_gt(self, vals: &[i32], q: i32) -> isize {
        unsafe { self.or_scalar().find_gt_unchecked(vals, q) }
    }

    fn or_scalar(self) -> Isa {
        if self.is_available() {
            self
        } else {
            Isa::Scalar
        }
    }

    /// # Safety
    /// `self.is_available()` must hold.
    unsafe fn find_equal_unchecked(self, vals: &[i32], q: i32) -> isize {
        let (body, tail) = split_chunks(vals);
        let hit = match self {
            #[cfg(target_arch = "x86_64")]
            Isa::Avx2 => avx2::find_equal(body, q),
            _ => scalar::find_first(body, |x| x == q),
        };
        finish(hit, body.len(), tail, |x| x == q)
    }

    /// # Safety
    /// `self.is_available()` must hold.
    unsafe fn find_gt_unchecked(self, vals: &[i32], q: i32) -> isize {
        let (body, tail) = split_chunks(vals);
        let hit = match self {
            #[cfg(target_arch = "x86_64")]
            Isa::Avx2 => avx2::find_gt(body, q),
            _ => scalar::find_first(body, |x| x > q),
        };
        finish(hit, body.len(), tail, |x| x > q)
    }
}

/// Split off the elements past the last full chunk.
fn split_chunks(vals: &[i32]) -> (&[i32], &[i32]) {
    vals.split_at(vals.len() - vals.len() % CHUNK)
}

/// Fall back to a plain scan of the tail when no chunk matched.
fn finish(hit: Option<usize>, offset: usize, tail: &[i32], pred: impl Fn(i32) -> bool) -> isize {
    hit.or_else(|| tail.iter().position(|&x| pred(x)).map(|i| offset + i))
        .map_or(NOT_FOUND, |i| i as isize)
}

// `detected()` is available by construction, so the hot path skips the feature check.
pub fn find_equal_intrinsic(vals: &[i32], q: i32) -> isize {
    unsafe { Isa::detected().find_equal_unchecked(vals, q) }
}

pub fn find_gt_intrinsic(vals: &[i32], q: i32) -> isize {
    unsafe { Isa::detected().find_gt_unchecked(vals, q) }
}

mod scalar {
    use super::CHUNK;

    /// `body.len()` must be a multiple of `CHUNK`.
    pub(super) fn find_first(body: &[i32], pred: impl Fn(i32) -> bool) -> Option<usize> {
        body.chunks_exact(CHUNK).enumerate().find_map(|(c, chunk)| {
            let mask = chunk
                .iter()
                .enumerate()
                .fold(0u32, |m, (j, &x)| m | (pred(x) as u32) << j);
            (mask != 0).then(|| c * CHUNK + mask.trailing_zeros() as usize)
        })
    }
}

#[cfg(target_arch = "x86_64")]
mod avx2 {
    use super::CHUNK;
    use std::arch::x86_64::*;

    // movemask_epi8 sets 4 bits per i32 lane.
    fn lane(mask: i32) -> usize {
        mask.trailing_zeros() as usize / 4
    }

    /// `body.len()` must be a multiple of `CHUNK`, and the CPU must support AVX2.
    #[target_feature(enable = "avx2")]
    pub(super) unsafe fn find_equal(body: &[i32], q: i32) -> Option<usize> {
        let target = _mm256_set1_epi32(q);
        let ptr = body.as_ptr();
        for i in (0..body.len()).step_by(CHUNK) {
            let low = _mm256_loadu_si256(ptr.add(i) as *const __m256i);
            let high = _mm256_loadu_si256(ptr.add(i + 8) as *const __m256i);
            let mask_low = _mm256_movemask_epi8(_mm256_cmpeq_epi32(low, target));
            let mask_high = _mm256_movemask_epi8(_mm256_cmpeq_epi32(high, target));
            if mask_low != 0 {
                return Some(i + lane(mask_low));
            }
            if mask_high != 0 {
                return Some(i + 8 + lane(mask_high));
            }
        }
        None
    }

    /// Same as [`find_equal`], with a signed `>` lane comparison.
    #[target_feature(enable = "avx2")]
    pub(super) unsafe fn find_gt(body: &[i32], q: i32) -> Option<usize> {
        let target = _mm256_set1_epi32(q);
        let ptr = body.as_ptr();
        for i in (0..body.len()).step_by(CHUNK) {
            let low = _mm256_loadu_si256(ptr.add(i) as *const __m256i);
            let high = _mm256_loadu_si256(ptr.add(i + 8) as *const __m256i);
            let mask_low = _mm256_movemask_epi8(_mm256_cmpgt_epi32(low, target));
            let mask_high = _mm256_movemask_epi8(_mm256_cmpgt_epi32(high, target));
            if mask_low != 0 {
                return Some(i + lane(mask_low));
            }
            if mask_high != 0 {
                return Some(i + 8 + lane(mask_high));
            }
        }
        None
    }
}
