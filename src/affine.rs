#![allow(clippy::module_name_repetitions)]
//! Representation of affine transformations
use crate::GSFloat;
use ndarray::{Array1, Array2, ArrayView1, ArrayView2};
use serde::{Deserialize, Serialize};
use std::fmt::{Debug, Display};
use std::ops::Mul;

/// Affine map data structure, f(x) = Ax + b
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct Affine2 {
    basis: Array2<GSFloat>,
    shift: Array1<GSFloat>,
}

impl Display for Affine2 {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::result::Result<(), std::fmt::Error> {
        write!(
            f,
            "Basis {:?} Shift {:?}",
            self.basis.shape(),
            self.shift.shape()
        )
    }
}

impl Affine2 {
    /// # Panics
    /// If improper shapes are passed in
    pub fn new(basis: Array2<GSFloat>, shift: Array1<GSFloat>) -> Self {
        debug_assert_eq!(basis.shape()[0], shift.len());
        Self { basis, shift }
    }

    pub fn identity(ndim: usize) -> Self {
        Self {
            basis: Array2::eye(ndim),
            shift: Array1::zeros(ndim),
        }
    }

    pub fn input_dim(&self) -> usize {
        self.basis.shape()[1]
    }

    pub fn output_dim(&self) -> usize {
        self.shift.len()
    }

    pub fn apply(&self, x: &ArrayView1<GSFloat>) -> Array1<GSFloat> {
        self.basis.dot(x) + &self.shift
    }

    /// Apply to a batch with one input per row.
    pub fn apply_rows(&self, xs: &ArrayView2<GSFloat>) -> Array2<GSFloat> {
        xs.dot(&self.basis.t()) + &self.shift
    }
}

/// Scale by scalar
impl Mul<GSFloat> for Affine2 {
    type Output = Self;

    fn mul(self, rhs: GSFloat) -> Self {
        Self {
            basis: self.basis * rhs,
            shift: self.shift * rhs,
        }
    }
}
