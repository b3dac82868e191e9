// This file is part of random_2d.
// Copyright (C) 2024-2025 The random_2d contributors.
// Licensed under the MIT license, see LICENSE.md for details.
// SPDX-License-Identifier: MIT

//! numpy bindings for the sampling routines.
use log::*;
use numpy::{
    Element, PyArray2, PyArrayDyn, PyArrayMethods, PyUntypedArray, PyUntypedArrayMethods,
};
use pyo3::{exceptions::PyTypeError, prelude::*};
use rand::SeedableRng;
use rand_pcg::Pcg64;

use crate::{
    ok_or_pyerr, parallel,
    request::count_arg,
    sampling::{self, SampleOptions},
    source::Source,
};

/// Register the sampling functions with the module.
pub fn register_sampling(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_function(wrap_pyfunction!(randint_2d, m)?)?;
    m.add_function(wrap_pyfunction!(choice_2d, m)?)?;
    m.add_function(wrap_pyfunction!(parallel::init_accel_pool, m)?)?;
    m.add_function(wrap_pyfunction!(parallel::thread_count, m)?)?;
    Ok(())
}

/// Create the generator for one call.
///
/// Without a seed, every call gets a freshly-seeded generator, so calls
/// from different Python threads never share generator state.
fn call_rng(seed: Option<u64>) -> Pcg64 {
    let seed = seed.unwrap_or_else(rand::random);
    trace!("seeding call generator with {}", seed);
    Pcg64::seed_from_u64(seed)
}

fn call_options(strategy: &str, parallel: bool) -> PyResult<SampleOptions> {
    Ok(SampleOptions {
        strategy: strategy.parse()?,
        parallel,
    })
}

/// Sample unique integers from `[low, high)` for each row.
#[pyfunction]
#[pyo3(signature=(low, high, rows, cols, *, seed=None, strategy="shuffle", parallel=false))]
pub fn randint_2d<'py>(
    py: Python<'py>,
    low: i64,
    high: i64,
    rows: i64,
    cols: i64,
    seed: Option<u64>,
    strategy: &str,
    parallel: bool,
) -> PyResult<Bound<'py, PyArray2<i64>>> {
    let rows = count_arg("randint_2d: rows", rows)?;
    let cols = count_arg("randint_2d: cols", cols)?;
    let options = call_options(strategy, parallel)?;
    let mut rng = call_rng(seed);

    let result =
        py.allow_threads(|| sampling::randint_2d_with(low, high, rows, cols, &options, &mut rng))?;

    Ok(PyArray2::from_owned_array(py, result))
}

/// Sample unique elements per row from a 1D or 2D array.
#[pyfunction]
#[pyo3(signature=(a, cols, rows=None, *, seed=None, strategy="shuffle", parallel=false))]
pub fn choice_2d<'py>(
    py: Python<'py>,
    a: &Bound<'py, PyAny>,
    cols: i64,
    rows: Option<i64>,
    seed: Option<u64>,
    strategy: &str,
    parallel: bool,
) -> PyResult<Bound<'py, PyAny>> {
    let cols = count_arg("choice_2d: cols", cols)?;
    let rows = rows.map(|r| count_arg("choice_2d: rows", r)).transpose()?;
    let options = call_options(strategy, parallel)?;

    macro_rules! try_dtypes {
        ($($t:ty),+) => {
            $(
                if let Ok(arr) = a.downcast::<PyArrayDyn<$t>>() {
                    let res = choice_typed(py, arr, cols, rows, seed, &options)?;
                    return Ok(res.into_any());
                }
            )+
        };
    }
    try_dtypes!(i64, i32, i16, i8, u64, u32, u16, u8, f64, f32);

    let arr = ok_or_pyerr!(
        a.downcast::<PyUntypedArray>().ok(),
        PyTypeError,
        "choice_2d: expected a numpy array, got {}",
        a.get_type()
    )?;
    Err(PyTypeError::new_err(format!(
        "choice_2d: unsupported array type {}",
        arr.dtype()
    )))
}

fn choice_typed<'py, T>(
    py: Python<'py>,
    arr: &Bound<'py, PyArrayDyn<T>>,
    cols: usize,
    rows: Option<usize>,
    seed: Option<u64>,
    options: &SampleOptions,
) -> PyResult<Bound<'py, PyArray2<T>>>
where
    T: Element + Copy + Send + Sync,
{
    let arr_py = arr.readonly();
    let view = arr_py.as_array();
    let mut rng = call_rng(seed);

    let result = py.allow_threads(|| {
        let source = Source::from_dyn(view)?;
        sampling::choice_2d_with(source, cols, rows, options, &mut rng)
    })?;

    Ok(PyArray2::from_owned_array(py, result))
}
