//! Per-dimension bounding box that sampled candidates must stay inside
use crate::error::ConfigError;
use crate::GSFloat;
use ndarray::iter::Lanes;
use ndarray::{stack, Array1, Array2, ArrayView1, ArrayViewMut1, Axis, Ix1, Zip};
use rand::distributions::{Distribution, Uniform};
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// Row 0 holds the lower caps and row 1 the upper caps, one column per feature.
///
/// Serialized as a list of `[min, max]` pairs, one per feature.
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
#[serde(from = "Vec<[GSFloat; 2]>", into = "Vec<[GSFloat; 2]>")]
pub struct Caps {
    data: Array2<GSFloat>,
}

impl Caps {
    /// # Panics
    /// If `lower` and `upper` have different lengths
    pub fn new<'a>(lower: ArrayView1<'a, GSFloat>, upper: ArrayView1<'a, GSFloat>) -> Self {
        let data = stack(Axis(0), &[lower, upper]).unwrap();
        Self { data }
    }

    /// Same cap pair on every dimension.
    pub fn uniform(dim: usize, lower: GSFloat, upper: GSFloat) -> Self {
        Self::new(
            Array1::from_elem(dim, lower).view(),
            Array1::from_elem(dim, upper).view(),
        )
    }

    /// Builds caps from `[min, max]` pairs, one per dimension.
    pub fn from_pairs(pairs: &[[GSFloat; 2]]) -> Self {
        let lower: Array1<GSFloat> = pairs.iter().map(|p| p[0]).collect();
        let upper: Array1<GSFloat> = pairs.iter().map(|p| p[1]).collect();
        Self::new(lower.view(), upper.view())
    }

    pub fn lower(&self) -> ArrayView1<GSFloat> {
        self.data.index_axis(Axis(0), 0)
    }

    pub fn upper(&self) -> ArrayView1<GSFloat> {
        self.data.index_axis(Axis(0), 1)
    }

    pub fn ndim(&self) -> usize {
        self.data.ncols()
    }

    pub fn bounds_iter(&self) -> Lanes<GSFloat, Ix1> {
        self.data.columns()
    }

    /// # Errors
    /// The first dimension whose bounds are non-finite or inverted.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.bounds_iter()
            .into_iter()
            .enumerate()
            .find(|(_, b)| !(b[0].is_finite() && b[1].is_finite() && b[0] <= b[1]))
            .map_or(Ok(()), |(dim, b)| {
                Err(ConfigError::InvalidCaps {
                    dim,
                    lower: b[0],
                    upper: b[1],
                })
            })
    }

    pub fn is_member(&self, x: &ArrayView1<GSFloat>) -> bool {
        Zip::from(x)
            .and(self.bounds_iter())
            .all(|&x, bounds| bounds[0] <= x && x <= bounds[1])
    }

    /// Clamp every coordinate into its cap in place.
    pub fn clip(&self, mut x: ArrayViewMut1<GSFloat>) {
        Zip::from(&mut x)
            .and(self.bounds_iter())
            .for_each(|x, bounds| *x = x.max(bounds[0]).min(bounds[1]));
    }

    /// Euclidean distance from `center` to the farthest point of the box.
    ///
    /// Clipped candidates never lie farther than this from `center`.
    pub fn max_distance_from(&self, center: &ArrayView1<GSFloat>) -> GSFloat {
        Zip::from(center)
            .and(self.bounds_iter())
            .fold(0., |acc, &c, bounds| {
                let far = (c - bounds[0]).abs().max((bounds[1] - c).abs());
                far.mul_add(far, acc)
            })
            .sqrt()
    }

    pub fn sample_uniform<R: Rng>(&self, rng: &mut R) -> Array1<GSFloat> {
        Zip::from(self.bounds_iter())
            .map_collect(|x| Uniform::new_inclusive(x[0], x[1]).sample(rng))
    }
}

impl From<Vec<[GSFloat; 2]>> for Caps {
    fn from(pairs: Vec<[GSFloat; 2]>) -> Self {
        Self::from_pairs(&pairs)
    }
}

impl From<Caps> for Vec<[GSFloat; 2]> {
    fn from(caps: Caps) -> Self {
        caps.bounds_iter().into_iter().map(|b| [b[0], b[1]]).collect()
    }
}

impl Display for Caps {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::result::Result<(), std::fmt::Error> {
        write!(f, "Lower: {}\nUpper: {}", self.lower(), self.upper())
    }
}
