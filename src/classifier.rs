//! The black-box prediction interface the search runs against
use crate::{Class, GSFloat};
use ndarray::{Array1, ArrayView1, ArrayView2, Axis};

/// Anything that maps a feature vector to a class label.
///
/// The search only ever calls `predict` and `predict_batch`; models are never
/// inspected. `predict_batch` receives one candidate per row and is called once
/// per layer, so batch-native models should override it.
pub trait Classifier {
    fn predict(&self, x: ArrayView1<GSFloat>) -> Class;

    fn predict_batch(&self, xs: ArrayView2<GSFloat>) -> Array1<Class> {
        xs.axis_iter(Axis(0)).map(|x| self.predict(x)).collect()
    }
}

impl<F> Classifier for F
where
    F: Fn(ArrayView1<GSFloat>) -> Class,
{
    fn predict(&self, x: ArrayView1<GSFloat>) -> Class {
        self(x)
    }
}

/// Adapter for prediction functions that natively work on whole batches.
pub struct BatchFn<F>(pub F);

impl<F> Classifier for BatchFn<F>
where
    F: Fn(ArrayView2<GSFloat>) -> Array1<Class>,
{
    fn predict(&self, x: ArrayView1<GSFloat>) -> Class {
        (self.0)(x.insert_axis(Axis(0)))[0]
    }

    fn predict_batch(&self, xs: ArrayView2<GSFloat>) -> Array1<Class> {
        (self.0)(xs)
    }
}
