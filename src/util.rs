//! Utility functions
use crate::GSFloat;
use itertools::Itertools;
use ndarray::{ArrayView1, ArrayView2, Axis};
use ordered_float::OrderedFloat;

pub fn l2_norm(x: ArrayView1<GSFloat>) -> GSFloat {
    x.dot(&x).sqrt()
}

pub fn l2_distance(x: &ArrayView1<GSFloat>, y: &ArrayView1<GSFloat>) -> GSFloat {
    l2_norm((x - y).view())
}

/// Row indices of `points` ordered by ascending distance to `center`.
///
/// The sort is stable, so equidistant rows keep their sampling order.
pub fn argsort_by_distance(center: &ArrayView1<GSFloat>, points: &ArrayView2<GSFloat>) -> Vec<usize> {
    points
        .axis_iter(Axis(0))
        .map(|row| OrderedFloat(l2_distance(center, &row)))
        .enumerate()
        .sorted_by_key(|&(_, dist)| dist)
        .map(|(idx, _)| idx)
        .collect()
}
