use crate::{Class, GSFloat};
use thiserror::Error;

/// Problems with the search parameters, reported before any sampling happens.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("n_in_layer must be positive")]
    EmptyLayer,
    #[error("num_enemies must be positive")]
    NoEnemiesRequested,
    #[error("first_radius must be finite and positive, got {radius}")]
    InvalidRadius { radius: GSFloat },
    #[error("dicrease_radius must be finite and greater than 1, got {factor}")]
    InvalidRadiusFactor { factor: GSFloat },
    #[error("max_radius {max_radius} must exceed first_radius {first_radius}")]
    MaxRadiusTooSmall {
        max_radius: GSFloat,
        first_radius: GSFloat,
    },
    #[error("{name} must be positive")]
    ZeroIterationBound { name: &'static str },
    #[error("caps cover {caps_dim} dimensions but the observation has {obs_dim}")]
    CapsDimensionMismatch { caps_dim: usize, obs_dim: usize },
    #[error("caps for dimension {dim} are invalid: [{lower}, {upper}]")]
    InvalidCaps {
        dim: usize,
        lower: GSFloat,
        upper: GSFloat,
    },
    #[error("observation is empty")]
    EmptyObservation,
    #[error("observation has a non-finite value at dimension {dim}")]
    NonFiniteObservation { dim: usize },
    #[error("target class {class} is already the observation's class")]
    UnreachableTarget { class: Class },
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum SearchError {
    #[error("invalid configuration: {0}")]
    Config(#[from] ConfigError),
    /// Resampling could not fill a layer within the attempt budget.
    #[error(
        "sampling exhausted: {accepted} of {requested} candidates accepted in band [{r_inner}, {r_outer})"
    )]
    SamplingExhausted {
        accepted: usize,
        requested: usize,
        r_inner: GSFloat,
        r_outer: GSFloat,
    },
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ExplanationError {
    #[error("CounterfactualExplanation has to be fitted first")]
    NotFitted,
    #[error("insufficient enemies found: {found} of {requested}")]
    InsufficientEnemies { found: usize, requested: usize },
    #[error(transparent)]
    Search(#[from] SearchError),
}

impl From<ConfigError> for ExplanationError {
    fn from(err: ConfigError) -> Self {
        Self::Search(SearchError::Config(err))
    }
}
