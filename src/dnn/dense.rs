use crate::affine::Affine2;
use crate::dnn::layer::Layer;
use crate::GSFloat;
use ndarray::Array1;
use ndarray::Array2;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
pub struct Dense {
    aff: Affine2,
}

impl Dense {
    pub const fn new(aff: Affine2) -> Self {
        Self { aff }
    }

    pub fn from_parts(mul: Array2<GSFloat>, add: Array1<GSFloat>) -> Self {
        Self {
            aff: Affine2::new(mul, add),
        }
    }
}

#[typetag::serde]
impl Layer for Dense {
    fn input_dims(&self) -> usize {
        self.aff.input_dim()
    }

    fn output_dims(&self) -> usize {
        self.aff.output_dim()
    }

    fn forward1(&self, input: &Array1<GSFloat>) -> Array1<GSFloat> {
        debug_assert_eq!(input.len(), self.input_dims());
        self.aff.apply(&input.view())
    }

    fn forward2(&self, input: &Array2<GSFloat>) -> Array2<GSFloat> {
        self.aff.apply_rows(&input.view())
    }
}

impl fmt::Display for Dense {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Dense {}", self.aff.output_dim())
    }
}
