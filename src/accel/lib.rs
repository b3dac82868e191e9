// This file is part of random_2d.
// Copyright (C) 2024-2025 The random_2d contributors.
// Licensed under the MIT license, see LICENSE.md for details.
// SPDX-License-Identifier: MIT

//! Row-wise random sampling without replacement.
//!
//! [randint_2d] draws unique integers per row from a range, and [choice_2d]
//! draws unique elements per row from a 1D or 2D array. With the `python`
//! feature, the crate builds the `random_2d` extension module.

mod draw;
mod errors;
mod parallel;
#[cfg(feature = "python")]
mod python;
mod request;
mod sampling;
mod source;

pub use draw::{DrawStrategy, RowDrawer};
pub use errors::SampleError;
pub use request::{count_arg, SamplePlan, SampleRequest};
pub use sampling::{choice_2d, choice_2d_with, randint_2d, randint_2d_with, SampleOptions};
pub use source::{IntRange, Population, Source, SourceKind};

#[cfg(feature = "python")]
use pyo3::prelude::*;

/// Entry point for the random_2d accelerator module.
#[cfg(feature = "python")]
#[pymodule]
fn random_2d(m: &Bound<'_, PyModule>) -> PyResult<()> {
    pyo3_log::init();
    python::register_sampling(m)?;

    Ok(())
}
