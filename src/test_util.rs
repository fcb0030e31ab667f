#![cfg(test)]
use crate::affine::Affine2;
use crate::caps::Caps;
use crate::dnn::{Dense, ReLU, DNN};
use crate::{Class, GSFloat};
use ndarray::{Array1, Array2, ArrayView1, Axis, Zip};
use proptest::arbitrary::functor::ArbitraryF1;
use proptest::prelude::*;
use proptest::sample::SizeRange;
use std::mem;

prop_compose! {
    pub fn array1(len: usize)(v in Vec::lift1_with(-10. .. 10., SizeRange::new(len..=len))) -> Array1<GSFloat> {
        Array1::from_vec(v)
    }
}

prop_compose! {
    pub fn array2(rows: usize, cols: usize)(v in Vec::lift1_with(array1(cols), SizeRange::new(rows..=rows))) -> Array2<GSFloat> {
        assert!(rows > 0);
        ndarray::stack(Axis(0), &v.iter().map(|x| x.view()).collect::<Vec<ArrayView1<GSFloat>>>()).unwrap()
    }
}

prop_compose! {
    pub fn caps(len: usize)(mut lower in array1(len), mut upper in array1(len)) -> Caps {
        Zip::from(&mut lower).and(&mut upper).for_each(|l, u| if *l > *u {mem::swap(l, u)});
        assert!(Zip::from(&lower).and(&upper).all(|l, u| l <= u));
        Caps::new(lower.view(), upper.view())
    }
}

prop_compose! {
    /// Radius bands `(r_inner, r_outer)` with a gap wide enough to sample.
    pub fn radii()(r_inner in 0. .. 5., gap in 0.05 .. 5.) -> (GSFloat, GSFloat) {
        (r_inner, r_inner + gap)
    }
}

prop_compose! {
    pub fn affine2(in_dim: usize, out_dim: usize)(basis in array2(out_dim, in_dim), shift in array1(out_dim)) -> Affine2 {
        Affine2::new(basis, shift)
    }
}

prop_compose! {
    /// Dense/ReLU network with `nclasses` outputs.
    pub fn fc_dnn(input_size: usize, nclasses: usize, hidden: usize)(
        first in affine2(input_size, hidden),
        last in affine2(hidden, nclasses),
    ) -> DNN {
        let mut dnn = DNN::default();
        dnn.add_layer(Box::new(Dense::new(first)));
        dnn.add_layer(Box::new(ReLU::new(hidden)));
        dnn.add_layer(Box::new(Dense::new(last)));
        dnn
    }
}

/// Class 1 exactly when the first feature exceeds 1.
pub fn first_feature_above_one(x: ArrayView1<GSFloat>) -> Class {
    usize::from(x[0] > 1.)
}
