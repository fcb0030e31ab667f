//! Repeated growing-spheres attempts accumulated into one explanation
use crate::classifier::Classifier;
use crate::distances::{get_distances, Distances};
use crate::error::ExplanationError;
use crate::search::{GrowingSpheres, SearchConfig, SearchStatus};
use crate::{Class, GSFloat};
use log::{debug, warn};
use ndarray::Array1;
use rand::Rng;

/// Everything a successful `fit` collected, aligned by discovery order.
#[derive(Clone, Debug, Default, PartialEq)]
struct Fitted {
    enemies: Vec<Array1<GSFloat>>,
    e_stars: Vec<Array1<GSFloat>>,
    moves: Vec<Array1<GSFloat>>,
}

/// Counterfactual explanation of one observation under one classifier.
///
/// `fit` runs the core search until `num_enemies` enemies have been collected
/// and owns the accumulation; each attempt only returns its own outcome.
pub struct CounterfactualExplanation<'a, C: ?Sized> {
    observation: Array1<GSFloat>,
    classifier: &'a C,
    target_class: Option<Class>,
    max_attempts: usize,
    fitted: Option<Fitted>,
}

impl<'a, C: Classifier + ?Sized> CounterfactualExplanation<'a, C> {
    pub fn new(observation: Array1<GSFloat>, classifier: &'a C, target_class: Option<Class>) -> Self {
        Self {
            observation,
            classifier,
            target_class,
            max_attempts: 10,
            fitted: None,
        }
    }

    /// Bound on search attempts per `fit`.
    pub fn with_max_attempts(mut self, max_attempts: usize) -> Self {
        self.max_attempts = max_attempts;
        self
    }

    pub fn observation(&self) -> &Array1<GSFloat> {
        &self.observation
    }

    pub fn is_fitted(&self) -> bool {
        self.fitted.is_some()
    }

    /// Search until at least `config.num_enemies` enemies are found.
    ///
    /// Results of a previous `fit` are discarded first.
    ///
    /// # Errors
    /// `InsufficientEnemies` when an attempt exhausts its caps or the attempt
    /// budget runs out; configuration and sampling errors from the search.
    pub fn fit<R: Rng>(&mut self, config: &SearchConfig, rng: &mut R) -> Result<(), ExplanationError> {
        self.fitted = None;
        let search = GrowingSpheres::new(
            self.observation.view(),
            self.classifier,
            self.target_class,
            config,
        )?;
        let requested = config.num_enemies;
        let mut fitted = Fitted::default();
        let mut attempts = 0;
        while fitted.enemies.len() < requested {
            if attempts == self.max_attempts {
                warn!(
                    "Gave up after {} attempts with {} of {} enemies",
                    attempts,
                    fitted.enemies.len(),
                    requested
                );
                return Err(ExplanationError::InsufficientEnemies {
                    found: fitted.enemies.len(),
                    requested,
                });
            }
            attempts += 1;
            let outcome = search.find_counterfactual(rng)?;
            debug!("Attempt {} ended with {:?}", attempts, outcome.status);
            if outcome.status == SearchStatus::Exhausted {
                return Err(ExplanationError::InsufficientEnemies {
                    found: fitted.enemies.len(),
                    requested,
                });
            }
            fitted.moves.extend(outcome.moves(&self.observation.view()));
            fitted.enemies.extend(outcome.enemies);
            fitted.e_stars.extend(outcome.e_star);
        }
        self.fitted = Some(fitted);
        Ok(())
    }

    fn fitted(&self) -> Result<&Fitted, ExplanationError> {
        self.fitted.as_ref().ok_or(ExplanationError::NotFitted)
    }

    /// # Errors
    /// `NotFitted` before a successful `fit`.
    pub fn enemies(&self) -> Result<&[Array1<GSFloat>], ExplanationError> {
        Ok(&self.fitted()?.enemies)
    }

    /// # Errors
    /// `NotFitted` before a successful `fit`.
    pub fn e_stars(&self) -> Result<&[Array1<GSFloat>], ExplanationError> {
        Ok(&self.fitted()?.e_stars)
    }

    /// # Errors
    /// `NotFitted` before a successful `fit`.
    pub fn moves(&self) -> Result<&[Array1<GSFloat>], ExplanationError> {
        Ok(&self.fitted()?.moves)
    }

    /// First enemy only.
    ///
    /// # Errors
    /// `NotFitted` before a successful `fit`.
    pub fn enemy(&self) -> Result<Option<&Array1<GSFloat>>, ExplanationError> {
        Ok(self.enemies()?.first())
    }

    /// First e_star only.
    ///
    /// # Errors
    /// `NotFitted` before a successful `fit`.
    pub fn e_star(&self) -> Result<Option<&Array1<GSFloat>>, ExplanationError> {
        Ok(self.e_stars()?.first())
    }

    /// First move only.
    ///
    /// # Errors
    /// `NotFitted` before a successful `fit`.
    pub fn first_move(&self) -> Result<Option<&Array1<GSFloat>>, ExplanationError> {
        Ok(self.moves()?.first())
    }

    /// Distances between the observation and the first enemy.
    ///
    /// # Errors
    /// `NotFitted` before a successful `fit`.
    pub fn distances(&self) -> Result<Option<Distances>, ExplanationError> {
        Ok(self
            .enemy()?
            .map(|enemy| get_distances(&self.observation.view(), &enemy.view())))
    }
}
