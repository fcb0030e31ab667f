#![allow(clippy::must_use_candidate, clippy::module_name_repetitions)]
//! Counterfactual explanations for opaque classifiers.
//!
//! Given an observation and a black-box [`Classifier`], the growing-spheres
//! search samples concentric shells around the observation until it finds
//! points the classifier assigns to another class ("enemies"), tightens the
//! radius band around the closest of them, and optionally sparsifies the
//! result so that as few features as possible differ from the observation.
extern crate ndarray;
extern crate ndarray_rand;
extern crate num;
extern crate rand;

pub mod affine;
pub mod caps;
pub mod classifier;
pub mod distances;
pub mod dnn;
pub mod error;
pub mod explanation;
pub mod logging;
pub mod sampler;
pub mod search;
pub mod sparsify;
#[cfg(test)]
mod test_util;
pub mod util;

pub use caps::Caps;
pub use classifier::{BatchFn, Classifier};
pub use error::{ConfigError, ExplanationError, SearchError};
pub use explanation::CounterfactualExplanation;
pub use sampler::LayerShape;
pub use search::{GrowingSpheres, SearchConfig, SearchOutcome, SearchStatus};

pub type GSFloat = f64;
pub type Class = usize;
