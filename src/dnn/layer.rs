use crate::GSFloat;
use dyn_clone::DynClone;
use ndarray::{Array1, Array2};
use std::fmt::{Debug, Display};

#[typetag::serde(tag = "type")]
pub trait Layer: DynClone + Display + Debug + Send + Sync {
    fn input_dims(&self) -> usize;

    fn output_dims(&self) -> usize;

    fn forward1(&self, input: &Array1<GSFloat>) -> Array1<GSFloat>;

    /// Batched forward pass, one input per row.
    fn forward2(&self, input: &Array2<GSFloat>) -> Array2<GSFloat>;
}

// This implements `Clone` for the trait
dyn_clone::clone_trait_object!(Layer);
