//! Shell sampling: candidate layers distributed within `[r_inner, r_outer)`
//! around a center point.
use crate::caps::Caps;
use crate::error::SearchError;
use crate::util::l2_norm;
use crate::GSFloat;
use more_asserts::{assert_lt, debug_assert_lt};
use ndarray::{Array1, Array2, ArrayView1, Axis};
use ndarray_rand::rand_distr::{StandardNormal, Uniform};
use ndarray_rand::RandomExt;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// How the points of a layer are spread across the radius band.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default, Deserialize, Serialize)]
#[cfg_attr(test, derive(proptest_derive::Arbitrary))]
#[serde(rename_all = "lowercase")]
pub enum LayerShape {
    /// Uniform over the volume of the shell.
    #[default]
    #[serde(alias = "ring")]
    Ball,
    /// Uniform direction with the radius drawn uniformly in the band, so every
    /// concentric surface of the band receives the same share of points.
    Sphere,
}

impl LayerShape {
    /// Map a uniform draw `u` in `[0, 1)` to a radius in `[r_inner, r_outer)`.
    fn radius(self, u: GSFloat, r_inner: GSFloat, r_outer: GSFloat, dim: usize) -> GSFloat {
        match self {
            LayerShape::Ball => {
                // Inverse CDF of the shell volume, scaled by r_outer to avoid
                // overflowing r^d in high dimension.
                let d = dim as GSFloat;
                let rho = (r_inner / r_outer).powf(d);
                r_outer * u.mul_add(1. - rho, rho).powf(d.recip())
            }
            LayerShape::Sphere => u.mul_add(r_outer - r_inner, r_inner),
        }
    }
}

/// One layer request: the band and how many points to put in it.
#[derive(Clone, Copy, Debug)]
pub struct Shell {
    pub r_inner: GSFloat,
    pub r_outer: GSFloat,
    pub n_points: usize,
    pub shape: LayerShape,
}

impl Shell {
    pub fn contains(&self, dist: GSFloat) -> bool {
        self.r_inner <= dist && dist < self.r_outer
    }
}

/// Sample a candidate layer with one point per row.
///
/// Every row lies at Euclidean distance `[r_inner, r_outer)` from `center` and,
/// when `caps` are given, inside the caps box. Candidates are clipped into the
/// box first and kept only if the clipped point is still in the band; the rest
/// are redrawn, a full layer's worth per round, for at most
/// `max_resample_rounds` rounds.
///
/// # Errors
/// `SearchError::SamplingExhausted` when the redraw budget runs out before the
/// layer is full.
pub fn generate_layer<R: Rng>(
    center: &ArrayView1<GSFloat>,
    shell: &Shell,
    caps: Option<&Caps>,
    max_resample_rounds: usize,
    rng: &mut R,
) -> Result<Array2<GSFloat>, SearchError> {
    debug_assert!(shell.r_inner >= 0.);
    debug_assert_lt!(shell.r_inner, shell.r_outer);
    let dim = center.len();
    let mut layer = Array2::zeros((shell.n_points, dim));
    let mut n_accepted = 0;
    let mut rounds = 0;
    while n_accepted < shell.n_points {
        if rounds == max_resample_rounds {
            return Err(SearchError::SamplingExhausted {
                accepted: n_accepted,
                requested: shell.n_points,
                r_inner: shell.r_inner,
                r_outer: shell.r_outer,
            });
        }
        rounds += 1;
        let directions = Array2::random_using((shell.n_points, dim), StandardNormal, rng);
        let draws: Array1<GSFloat> =
            Array1::random_using(shell.n_points, Uniform::new(0., 1.), rng);
        for (direction, &u) in directions.axis_iter(Axis(0)).zip(draws.iter()) {
            if n_accepted == shell.n_points {
                break;
            }
            let norm = l2_norm(direction);
            if norm == 0. || !norm.is_finite() {
                continue;
            }
            let radius = shell.shape.radius(u, shell.r_inner, shell.r_outer, dim);
            let mut point = &direction * (radius / norm) + center;
            if let Some(caps) = caps {
                caps.clip(point.view_mut());
            }
            // Rounding and clipping can both move a point out of the band.
            if shell.contains(l2_norm((&point - center).view())) {
                layer.row_mut(n_accepted).assign(&point);
                n_accepted += 1;
            }
        }
    }
    Ok(layer)
}
