use crate::classifier::Classifier;
use crate::dnn::layer::Layer;
use crate::{Class, GSFloat};
use itertools::Itertools;
use ndarray::{Array1, ArrayView1, ArrayView2, Axis};
use ordered_float::OrderedFloat;
use serde::{Deserialize, Serialize};
use std::cmp::Reverse;
use std::fmt;

/// Sequential network whose predicted class is the argmax of its outputs.
#[derive(Clone, Default, Debug, Serialize, Deserialize)]
pub struct DNN {
    layers: Vec<Box<dyn Layer>>,
}

impl DNN {
    pub fn new(layers: Vec<Box<dyn Layer>>) -> Self {
        Self { layers }
    }

    pub fn add_layer(&mut self, layer: Box<dyn Layer>) {
        debug_assert!(self
            .layers
            .last()
            .map_or(true, |prev| prev.output_dims() == layer.input_dims()));
        self.layers.push(layer);
    }

    pub fn num_layers(&self) -> usize {
        self.layers.len()
    }

    pub fn input_dims(&self) -> Option<usize> {
        self.layers.first().map(|l| l.input_dims())
    }

    pub fn output_dims(&self) -> Option<usize> {
        self.layers.last().map(|l| l.output_dims())
    }

    pub fn forward1(&self, input: Array1<GSFloat>) -> Array1<GSFloat> {
        self.layers.iter().fold(input, |x, layer| layer.forward1(&x))
    }

    pub fn forward2(&self, input: ArrayView2<GSFloat>) -> ndarray::Array2<GSFloat> {
        self.layers
            .iter()
            .fold(input.to_owned(), |x, layer| layer.forward2(&x))
    }

    /// # Errors
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }

    /// # Errors
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }
}

/// Index of the first largest logit.
fn argmax(logits: ArrayView1<GSFloat>) -> Class {
    logits
        .iter()
        .position_min_by_key(|&&v| Reverse(OrderedFloat(v)))
        .unwrap_or(0)
}

impl Classifier for DNN {
    fn predict(&self, x: ArrayView1<GSFloat>) -> Class {
        argmax(self.forward1(x.to_owned()).view())
    }

    fn predict_batch(&self, xs: ArrayView2<GSFloat>) -> Array1<Class> {
        self.forward2(xs)
            .axis_iter(Axis(0))
            .map(argmax)
            .collect()
    }
}

impl fmt::Display for DNN {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let layers: Vec<String> = self.layers.iter().map(|x| format!("{}", x)).collect();
        write!(f, "Input {:?} => {}", self.input_dims(), layers.join(" => "))
    }
}
