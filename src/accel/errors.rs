// This file is part of random_2d.
// Copyright (C) 2024-2025 The random_2d contributors.
// Licensed under the MIT license, see LICENSE.md for details.
// SPDX-License-Identifier: MIT

//! Error types for the sampling routines.
use thiserror::Error;

/// Errors raised while validating a sampling call.
///
/// Validation happens before any allocation or random draws, so a failed
/// call has no side effects and fails the same way every time.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SampleError {
    #[error("{0}")]
    InvalidArgument(String),
}

impl SampleError {
    pub(crate) fn invalid(msg: impl Into<String>) -> SampleError {
        SampleError::InvalidArgument(msg.into())
    }
}

#[cfg(feature = "python")]
impl From<SampleError> for pyo3::PyErr {
    fn from(err: SampleError) -> pyo3::PyErr {
        pyo3::exceptions::PyValueError::new_err(err.to_string())
    }
}

#[cfg(feature = "python")]
#[macro_export]
macro_rules! ok_or_pyerr {
    ($err:expr, $ety:ty, $($arg:expr),*) => {
        $err.ok_or_else(|| <$ety>::new_err(format!($($arg),*)))
    };
}
