//! A small feed-forward network usable as a black-box [`Classifier`](crate::Classifier)
pub mod dense;
pub mod dnn;
pub mod layer;
pub mod relu;

pub use dense::Dense;
pub use dnn::DNN;
pub use layer::Layer;
pub use relu::ReLU;
