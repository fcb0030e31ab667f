use crate::dnn::layer::Layer;
use crate::GSFloat;
use ndarray::Array1;
use ndarray::Array2;
use num::Zero;
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter, Result};

#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
pub struct ReLU {
    ndims: usize,
}

impl ReLU {
    pub const fn new(ndims: usize) -> Self {
        Self { ndims }
    }
}

impl Display for ReLU {
    fn fmt(&self, f: &mut Formatter) -> Result {
        write!(f, "ReLU")
    }
}

#[typetag::serde]
impl Layer for ReLU {
    fn input_dims(&self) -> usize {
        self.ndims
    }

    fn output_dims(&self) -> usize {
        self.ndims
    }

    fn forward1(&self, input: &Array1<GSFloat>) -> Array1<GSFloat> {
        input.mapv(|x| x.max(GSFloat::zero()))
    }

    fn forward2(&self, input: &Array2<GSFloat>) -> Array2<GSFloat> {
        input.mapv(|x| x.max(GSFloat::zero()))
    }
}
