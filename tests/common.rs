use growing_spheres::affine::Affine2;
use growing_spheres::dnn::{Dense, ReLU, DNN};
use growing_spheres::{Class, GSFloat};
use ndarray::{array, ArrayView1};

/// Class 1 exactly when the first feature exceeds 1.
#[allow(dead_code)]
pub fn first_feature_above_one(x: ArrayView1<GSFloat>) -> Class {
    usize::from(x[0] > 1.)
}

/// Class 1 when the first two features sum past 1.2.
#[allow(dead_code)]
pub fn sum_above(x: ArrayView1<GSFloat>) -> Class {
    usize::from(x[0] + x[1] > 1.2)
}

#[allow(dead_code)]
pub fn always_zero(_x: ArrayView1<GSFloat>) -> Class {
    0
}

/// Two-class network whose class-1 region is `x0 + x1 > 2` or `x0 - x1 > 3`.
#[allow(dead_code)]
pub fn two_cut_dnn() -> DNN {
    let mut dnn = DNN::default();
    dnn.add_layer(Box::new(Dense::new(Affine2::new(
        array![[1., 1.], [1., -1.]],
        array![-2., -3.],
    ))));
    dnn.add_layer(Box::new(ReLU::new(2)));
    dnn.add_layer(Box::new(Dense::new(Affine2::new(
        array![[0., 0.], [1., 1.]],
        array![1e-9, 0.],
    ))));
    dnn
}
