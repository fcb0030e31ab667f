//! Reporting metrics between an observation and a counterfactual
use crate::sparsify::changed_dims;
use crate::util::l2_distance;
use crate::GSFloat;
use itertools::Itertools;
use ndarray::ArrayView1;
use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Deserialize, Serialize)]
pub struct Distances {
    pub euclidean: GSFloat,
    /// Number of features that differ.
    pub sparsity: usize,
    /// Share of feature pairs ordered differently in the two points.
    pub kendall_tau: GSFloat,
}

pub fn get_distances(x1: &ArrayView1<GSFloat>, x2: &ArrayView1<GSFloat>) -> Distances {
    Distances {
        euclidean: l2_distance(x1, x2),
        sparsity: changed_dims(x1, x2),
        kendall_tau: kendall_tau_distance(x1, x2),
    }
}

/// Normalised count of discordant feature pairs, in `[0, 1]`.
pub fn kendall_tau_distance(x1: &ArrayView1<GSFloat>, x2: &ArrayView1<GSFloat>) -> GSFloat {
    debug_assert_eq!(x1.len(), x2.len());
    let n = x1.len();
    if n < 2 {
        return 0.;
    }
    let discordant = (0..n)
        .tuple_combinations()
        .filter(|&(i, j)| (x1[i] - x1[j]) * (x2[i] - x2[j]) < 0.)
        .count();
    discordant as GSFloat / (n * (n - 1) / 2) as GSFloat
}
