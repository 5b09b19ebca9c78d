pub mod error;
pub mod find;
pub mod find_gt;
pub mod range;
pub mod simd;
pub mod util;

pub use error::{FindError, Precondition, Result};
pub use find::*;
pub use find_gt::*;
pub use range::{generate_range_arguments, RangeConfig};
pub use simd::{find_equal_intrinsic, find_gt_intrinsic, padded_len, Isa, CHUNK};
pub use util::*;

#[ctor::ctor]
fn init_color_backtrace() {
    color_backtrace::install();
}

/// Sentinel returned by the linear kernels when no element matches.
pub const NOT_FOUND: isize = -1;

/// Common signature of every search kernel.
pub type FindFn = fn(&[i32], i32) -> isize;

/// A named kernel, as registered with the benchmark harness.
#[derive(Clone, Copy)]
pub struct Kernel {
    pub name: &'static str,
    pub find: FindFn,
    /// The harness rounds the buffer length up to `padded_len` for this kernel.
    pub padded: bool,
}

impl Kernel {
    const fn new(name: &'static str, find: FindFn) -> Self {
        Kernel {
            name,
            find,
            padded: false,
        }
    }

    const fn chunked(name: &'static str, find: FindFn) -> Self {
        Kernel {
            name,
            find,
            padded: true,
        }
    }

    pub fn find(&self, vals: &[i32], q: i32) -> isize {
        (self.find)(vals, q)
    }
}

impl std::fmt::Debug for Kernel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Kernel")
            .field("name", &self.name)
            .field("padded", &self.padded)
            .finish()
    }
}

pub const EQUAL_KERNELS: &[Kernel] = &[
    Kernel::new("find_equal_naive", find_equal_naive),
    Kernel::new("find_equal_no_break", find_equal_no_break),
    Kernel::new("find_equal_compare", find_equal_compare),
    Kernel::new("find_equal_std_find", find_equal_std_find),
    Kernel::new("find_equal_lower_bound", find_equal_lower_bound),
    Kernel::chunked("find_equal_intrinsic", find_equal_intrinsic),
];

pub const GT_KERNELS: &[Kernel] = &[
    Kernel::new("find_gt_naive", find_gt_naive),
    Kernel::new("find_gt_no_break", find_gt_no_break),
    Kernel::new("find_gt_compare", find_gt_compare),
    Kernel::new("find_gt_std_find", find_gt_std_find),
    Kernel::new("find_gt_lower_bound", find_gt_lower_bound),
    Kernel::chunked("find_gt_intrinsic", find_gt_intrinsic),
];
