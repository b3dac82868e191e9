// This file is part of random_2d.
// Copyright (C) 2024-2025 The random_2d contributors.
// Licensed under the MIT license, see LICENSE.md for details.
// SPDX-License-Identifier: MIT

use log::*;
use rand::Rng;

#[cfg(feature = "python")]
use pyo3::{exceptions::PyRuntimeError, prelude::*};

#[cfg(feature = "fuse-parallel")]
use rayon::iter::PanicFuse;
use rayon::iter::ParallelIterator;
#[cfg(feature = "python")]
use rayon::{current_num_threads, ThreadPoolBuilder};

#[cfg(feature = "python")]
#[pyfunction]
pub fn init_accel_pool(n_threads: usize) -> PyResult<()> {
    debug!(
        "initializing accelerator thread pool with {} threads",
        n_threads
    );
    ThreadPoolBuilder::new()
        .num_threads(n_threads)
        .build_global()
        .map_err(|_| PyErr::new::<PyRuntimeError, _>("Rayon initialization error"))
}

#[cfg(feature = "python")]
#[pyfunction]
pub fn thread_count() -> PyResult<usize> {
    Ok(current_num_threads())
}

/// Draw one generator seed per row from the caller's generator.
///
/// Seeds are tied to rows rather than workers, so parallel results depend
/// only on the caller's generator and not on how rows are scheduled.
pub(crate) fn row_seeds<R: Rng + ?Sized>(rng: &mut R, n_rows: usize) -> Vec<u64> {
    trace!("drawing {} row seeds", n_rows);
    (0..n_rows).map(|_| rng.random::<u64>()).collect()
}

#[cfg(not(feature = "fuse-parallel"))]
pub fn maybe_fuse<I: ParallelIterator>(iter: I) -> I {
    iter
}

#[cfg(feature = "fuse-parallel")]
pub fn maybe_fuse<I: ParallelIterator>(iter: I) -> PanicFuse<I> {
    iter.panic_fuse()
}

#[test]
fn test_row_seeds_follow_rng() {
    use rand::SeedableRng;
    use rand_pcg::Pcg64;

    let a = row_seeds(&mut Pcg64::seed_from_u64(3), 10);
    let b = row_seeds(&mut Pcg64::seed_from_u64(3), 10);
    let c = row_seeds(&mut Pcg64::seed_from_u64(4), 10);
    assert_eq!(a.len(), 10);
    assert_eq!(a, b);
    assert_ne!(a, c);
}
