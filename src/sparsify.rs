//! Greedy feature reset that keeps a counterfactual an enemy while changing
//! as few features as possible.
use crate::classifier::Classifier;
use crate::{Class, GSFloat};
use itertools::Itertools;
use log::trace;
use ndarray::{Array1, ArrayView1, Zip};
use ordered_float::OrderedFloat;

/// Number of features where `x` differs from `observation`.
pub fn changed_dims(observation: &ArrayView1<GSFloat>, x: &ArrayView1<GSFloat>) -> usize {
    Zip::from(observation)
        .and(x)
        .fold(0, |acc, o, v| if o == v { acc } else { acc + 1 })
}

/// Reset features of `enemy` to the observation's values one at a time.
///
/// Each pass tries the changed features in ascending order of how far they
/// moved (ties by index) and keeps a reset only if `is_enemy` still holds for
/// the prediction. Passes repeat until one resets nothing, so the result is
/// local-minimal with respect to single-feature resets and sparsifying it again
/// returns it unchanged. The input is expected to already be an enemy.
pub fn sparsify<C, F>(
    observation: &ArrayView1<GSFloat>,
    enemy: &Array1<GSFloat>,
    classifier: &C,
    is_enemy: F,
) -> Array1<GSFloat>
where
    C: Classifier + ?Sized,
    F: Fn(Class) -> bool,
{
    debug_assert_eq!(observation.len(), enemy.len());
    let mut out = enemy.clone();
    let mut passes = 0;
    loop {
        let order: Vec<usize> = observation
            .iter()
            .zip(out.iter())
            .map(|(o, v)| (v - o).abs())
            .enumerate()
            .filter(|&(_, moved)| moved > 0.)
            .sorted_by_key(|&(_, moved)| OrderedFloat(moved))
            .map(|(idx, _)| idx)
            .collect();
        let mut reduced = 0;
        for k in order {
            let moved_value = out[k];
            out[k] = observation[k];
            if is_enemy(classifier.predict(out.view())) {
                reduced += 1;
            } else {
                out[k] = moved_value;
            }
        }
        passes += 1;
        trace!("Sparsification pass {} reset {} features", passes, reduced);
        if reduced == 0 {
            break;
        }
    }
    out
}
