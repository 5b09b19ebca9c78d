use std::sync::LazyLock;

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use rdst::RadixSort;

/// Generated values lie in `LOWEST_GENERATED..HIGHEST_GENERATED`, so larger
/// buffers contain many duplicates.
pub const LOWEST_GENERATED: i32 = 0;
pub const HIGHEST_GENERATED: i32 = 10_000;

pub fn seeded_rng(seed: u64) -> ChaCha8Rng {
    ChaCha8Rng::seed_from_u64(seed)
}

/// Generate a sorted buffer of `len` random values.
pub fn gen_vals(len: usize, rng: &mut impl Rng) -> Vec<i32> {
    let mut vals: Vec<i32> = (0..len)
        .map(|_| rng.gen_range(LOWEST_GENERATED..HIGHEST_GENERATED))
        .collect();
    vals.radix_sort_unstable();
    vals
}

/// The element at the middle of the buffer, so a linear scan covers about half of it.
pub fn mid_target(vals: &[i32]) -> Option<i32> {
    vals.get(vals.len() / 2).copied()
}

fn init_trace() {
    stderrlog::new()
        .color(stderrlog::ColorChoice::Auto)
        .verbosity(3)
        .show_level(true)
        .init()
        .unwrap();
}

pub static INIT_TRACE: LazyLock<()> = LazyLock::new(init_trace);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::find::is_sorted;

    #[test]
    fn generated_vals_are_sorted_and_in_range() {
        let rng = &mut seeded_rng(1);
        for len in [0, 1, 2, 100, 5000] {
            let vals = gen_vals(len, rng);
            assert_eq!(vals.len(), len);
            assert!(is_sorted(&vals));
            assert!(vals
                .iter()
                .all(|x| (LOWEST_GENERATED..HIGHEST_GENERATED).contains(x)));
        }
    }

    #[test]
    fn same_seed_same_vals() {
        assert_eq!(
            gen_vals(64, &mut seeded_rng(7)),
            gen_vals(64, &mut seeded_rng(7))
        );
    }

    #[test]
    fn midpoint() {
        assert_eq!(mid_target(&[]), None);
        assert_eq!(mid_target(&[4]), Some(4));
        assert_eq!(mid_target(&[1, 2]), Some(2));
        assert_eq!(mid_target(&[1, 2, 3, 4, 5]), Some(3));
    }
}
