//! The growing-spheres search for the closest enemy of an observation
use crate::caps::Caps;
use crate::classifier::Classifier;
use crate::error::{ConfigError, SearchError};
use crate::sampler::{generate_layer, LayerShape, Shell};
use crate::sparsify::sparsify;
use crate::util::argsort_by_distance;
use crate::{Class, GSFloat};
use log::{debug, log, trace, Level};
use ndarray::{Array1, Array2, ArrayView1, Axis};
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Parameters of one search attempt.
///
/// `dicrease_radius` drives both radius phases: the zoom-in divides the initial
/// radius by it, and the expansion step is `(dicrease_radius - 1) * first_radius / 5`.
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct SearchConfig {
    /// Feature-wise `[min, max]` box sampled candidates are clipped into.
    pub caps: Option<Caps>,
    pub n_in_layer: usize,
    pub layer_shape: LayerShape,
    pub first_radius: GSFloat,
    pub dicrease_radius: GSFloat,
    pub sparse: bool,
    pub verbose: bool,
    pub num_enemies: usize,
    /// Bound on how many times the initial ball may be shrunk.
    pub max_zoom_iterations: usize,
    /// Bound on the number of layers evaluated while expanding.
    pub max_iterations: usize,
    /// Expansion stops once the inner radius reaches this.
    pub max_radius: Option<GSFloat>,
    /// Bisections of the enemy bracket after it is found.
    pub refine_rounds: usize,
    /// Redraw rounds allowed per layer when candidates fall outside the band.
    pub max_resample_rounds: usize,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            caps: None,
            n_in_layer: 2000,
            layer_shape: LayerShape::Ball,
            first_radius: 0.1,
            dicrease_radius: 10.,
            sparse: true,
            verbose: false,
            num_enemies: 1,
            max_zoom_iterations: 30,
            max_iterations: 1000,
            max_radius: None,
            refine_rounds: 4,
            max_resample_rounds: 100,
        }
    }
}

impl SearchConfig {
    pub fn with_caps(mut self, caps: Caps) -> Self {
        self.caps = Some(caps);
        self
    }

    pub fn with_n_in_layer(mut self, n_in_layer: usize) -> Self {
        self.n_in_layer = n_in_layer;
        self
    }

    pub fn with_layer_shape(mut self, layer_shape: LayerShape) -> Self {
        self.layer_shape = layer_shape;
        self
    }

    pub fn with_first_radius(mut self, first_radius: GSFloat) -> Self {
        self.first_radius = first_radius;
        self
    }

    pub fn with_dicrease_radius(mut self, dicrease_radius: GSFloat) -> Self {
        self.dicrease_radius = dicrease_radius;
        self
    }

    pub fn with_sparse(mut self, sparse: bool) -> Self {
        self.sparse = sparse;
        self
    }

    pub fn with_verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    pub fn with_num_enemies(mut self, num_enemies: usize) -> Self {
        self.num_enemies = num_enemies;
        self
    }

    pub fn with_max_iterations(mut self, max_iterations: usize) -> Self {
        self.max_iterations = max_iterations;
        self
    }

    pub fn with_max_radius(mut self, max_radius: GSFloat) -> Self {
        self.max_radius = Some(max_radius);
        self
    }

    pub fn with_refine_rounds(mut self, refine_rounds: usize) -> Self {
        self.refine_rounds = refine_rounds;
        self
    }

    pub fn with_max_resample_rounds(mut self, max_resample_rounds: usize) -> Self {
        self.max_resample_rounds = max_resample_rounds;
        self
    }

    /// # Errors
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }

    /// # Errors
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    /// Check the parameters against an observation of dimension `dim`.
    ///
    /// # Errors
    /// The first invalid parameter found.
    pub fn validate(&self, dim: usize) -> Result<(), ConfigError> {
        if self.n_in_layer == 0 {
            return Err(ConfigError::EmptyLayer);
        }
        if self.num_enemies == 0 {
            return Err(ConfigError::NoEnemiesRequested);
        }
        if !(self.first_radius.is_finite() && self.first_radius > 0.) {
            return Err(ConfigError::InvalidRadius {
                radius: self.first_radius,
            });
        }
        if !(self.dicrease_radius.is_finite() && self.dicrease_radius > 1.) {
            return Err(ConfigError::InvalidRadiusFactor {
                factor: self.dicrease_radius,
            });
        }
        if let Some(max_radius) = self.max_radius {
            if !(max_radius > self.first_radius) {
                return Err(ConfigError::MaxRadiusTooSmall {
                    max_radius,
                    first_radius: self.first_radius,
                });
            }
        }
        if self.max_iterations == 0 {
            return Err(ConfigError::ZeroIterationBound {
                name: "max_iterations",
            });
        }
        if self.max_resample_rounds == 0 {
            return Err(ConfigError::ZeroIterationBound {
                name: "max_resample_rounds",
            });
        }
        if let Some(caps) = &self.caps {
            if caps.ndim() != dim {
                return Err(ConfigError::CapsDimensionMismatch {
                    caps_dim: caps.ndim(),
                    obs_dim: dim,
                });
            }
            caps.validate()?;
        }
        Ok(())
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub enum SearchStatus {
    /// `num_enemies` enemies were selected.
    Found,
    /// The terminal layer held fewer enemies than requested.
    Partial { found: usize, requested: usize },
    /// No enemy was found before the iteration or radius caps.
    Exhausted,
}

/// Result of a single search attempt.
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct SearchOutcome {
    /// Closest enemies of the terminal layer, by ascending distance.
    pub e_star: Vec<Array1<GSFloat>>,
    /// `e_star` after sparsification, aligned with it.
    pub enemies: Vec<Array1<GSFloat>>,
    pub status: SearchStatus,
    /// Final `[r_inner, r_outer)` band.
    pub radius: (GSFloat, GSFloat),
    /// Layers evaluated while expanding.
    pub iterations: usize,
}

impl SearchOutcome {
    pub fn is_complete(&self) -> bool {
        self.status == SearchStatus::Found
    }

    /// `enemy - observation` for every enemy.
    pub fn moves(&self, observation: &ArrayView1<GSFloat>) -> Vec<Array1<GSFloat>> {
        self.enemies.iter().map(|e| e - observation).collect()
    }
}

/// Where the radius phases ended.
enum Exploration {
    /// Enemies of the terminal layer together with the band they came from.
    Bracketed {
        enemies: Array2<GSFloat>,
        r_inner: GSFloat,
        r_outer: GSFloat,
        iterations: usize,
    },
    /// Expansion hit an iteration or radius cap without any enemy.
    Exhausted {
        r_inner: GSFloat,
        r_outer: GSFloat,
        iterations: usize,
    },
}

/// One growing-spheres search around a fixed observation.
///
/// The search owns no randomness: every sampling call draws from the `Rng`
/// handed to [`GrowingSpheres::find_counterfactual`].
pub struct GrowingSpheres<'a, C: ?Sized> {
    observation: ArrayView1<'a, GSFloat>,
    classifier: &'a C,
    obs_class: Class,
    target_class: Option<Class>,
    config: &'a SearchConfig,
}

impl<'a, C: Classifier + ?Sized> GrowingSpheres<'a, C> {
    /// # Errors
    /// `ConfigError` when the observation or parameters cannot yield a search,
    /// including a `target_class` equal to the observation's predicted class.
    pub fn new(
        observation: ArrayView1<'a, GSFloat>,
        classifier: &'a C,
        target_class: Option<Class>,
        config: &'a SearchConfig,
    ) -> Result<Self, ConfigError> {
        if observation.is_empty() {
            return Err(ConfigError::EmptyObservation);
        }
        if let Some(dim) = observation.iter().position(|x| !x.is_finite()) {
            return Err(ConfigError::NonFiniteObservation { dim });
        }
        config.validate(observation.len())?;
        let obs_class = classifier.predict(observation);
        if target_class == Some(obs_class) {
            return Err(ConfigError::UnreachableTarget { class: obs_class });
        }
        Ok(Self {
            observation,
            classifier,
            obs_class,
            target_class,
            config,
        })
    }

    pub fn observation_class(&self) -> Class {
        self.obs_class
    }

    pub fn is_enemy(&self, class: Class) -> bool {
        match self.target_class {
            Some(target) => class == target,
            None => class != self.obs_class,
        }
    }

    fn progress_level(&self) -> Level {
        if self.config.verbose {
            Level::Info
        } else {
            Level::Debug
        }
    }

    /// Run the search and return the closest enemies, sparsified if configured.
    ///
    /// # Errors
    /// `SearchError::SamplingExhausted` if a ball around the observation cannot
    /// be filled. Running out of iterations, radius or room inside the caps is
    /// reported through [`SearchStatus::Exhausted`] instead.
    pub fn find_counterfactual<R: Rng>(&self, rng: &mut R) -> Result<SearchOutcome, SearchError> {
        let level = self.progress_level();
        let requested = self.config.num_enemies;
        let (enemies, r_inner, r_outer, iterations) = match self.exploration(rng)? {
            Exploration::Bracketed {
                enemies,
                r_inner,
                r_outer,
                iterations,
            } => (enemies, r_inner, r_outer, iterations),
            Exploration::Exhausted {
                r_inner,
                r_outer,
                iterations,
            } => {
                log!(
                    level,
                    "No enemy found after {} iterations, final radius ({}, {})",
                    iterations,
                    r_inner,
                    r_outer
                );
                return Ok(SearchOutcome {
                    e_star: vec![],
                    enemies: vec![],
                    status: SearchStatus::Exhausted,
                    radius: (r_inner, r_outer),
                    iterations,
                });
            }
        };
        log!(
            level,
            "Final radius ({}, {}) with {} enemies after {} iterations",
            r_inner,
            r_outer,
            enemies.nrows(),
            iterations
        );

        let e_star: Vec<Array1<GSFloat>> = argsort_by_distance(&self.observation, &enemies.view())
            .into_iter()
            .take(requested)
            .map(|idx| enemies.row(idx).to_owned())
            .collect();
        let enemies = if self.config.sparse {
            e_star
                .iter()
                .map(|e| {
                    sparsify(&self.observation, e, self.classifier, |class| {
                        self.is_enemy(class)
                    })
                })
                .collect()
        } else {
            e_star.clone()
        };
        let status = if e_star.len() < requested {
            SearchStatus::Partial {
                found: e_star.len(),
                requested,
            }
        } else {
            SearchStatus::Found
        };
        Ok(SearchOutcome {
            e_star,
            enemies,
            status,
            radius: (r_inner, r_outer),
            iterations,
        })
    }

    /// Bracket the decision boundary, then narrow the bracket.
    ///
    /// A narrower layer replaces the current one only while it still holds as
    /// many enemies as will be selected, so refinement never turns a complete
    /// bracket into a partial one.
    fn exploration<R: Rng>(&self, rng: &mut R) -> Result<Exploration, SearchError> {
        let level = self.progress_level();
        let config = self.config;
        let mut hi = config.first_radius;
        let mut lo = 0.;
        let mut iterations = 0;
        let mut enemies = self.enemies_in_layer(lo, hi, LayerShape::Ball, rng)?;
        log!(
            level,
            "{} enemies found in initial hyperball of radius {}",
            enemies.nrows(),
            hi
        );

        if enemies.nrows() > 0 {
            log!(level, "Zooming in...");
            for _ in 0..config.max_zoom_iterations {
                let smaller = hi / config.dicrease_radius;
                let layer = self.enemies_in_layer(0., smaller, LayerShape::Ball, rng)?;
                trace!("{} enemies in hyperball of radius {}", layer.nrows(), smaller);
                if layer.nrows() == 0 {
                    lo = smaller;
                    break;
                }
                if layer.nrows() < self.enough_enemies(&enemies) {
                    break;
                }
                hi = smaller;
                enemies = layer;
            }
        } else {
            log!(level, "Expanding hypersphere...");
            let step = (config.dicrease_radius - 1.) * config.first_radius / 5.;
            let max_radius = self.reachable_radius();
            lo = hi;
            loop {
                if iterations == config.max_iterations || lo >= max_radius {
                    return Ok(Exploration::Exhausted {
                        r_inner: lo,
                        r_outer: hi,
                        iterations,
                    });
                }
                hi = (lo + step).min(max_radius);
                let layer = match self.fillable_layer(lo, hi, config.layer_shape, rng)? {
                    Some(layer) => layer,
                    None => {
                        log!(
                            level,
                            "Caps leave no room for a layer in [{}, {}), stopping",
                            lo,
                            hi
                        );
                        return Ok(Exploration::Exhausted {
                            r_inner: lo,
                            r_outer: hi,
                            iterations: iterations + 1,
                        });
                    }
                };
                iterations += 1;
                trace!(
                    "Iteration {}: {} enemies in [{}, {})",
                    iterations,
                    layer.nrows(),
                    lo,
                    hi
                );
                if layer.nrows() > 0 {
                    enemies = layer;
                    break;
                }
                lo = hi;
            }
            log!(level, "Final number of iterations: {}", iterations);
        }

        for round in 0..config.refine_rounds {
            let mid = (lo + hi) / 2.;
            if !(lo < mid && mid < hi) {
                break;
            }
            let layer = match self.fillable_layer(lo, mid, config.layer_shape, rng)? {
                Some(layer) => layer,
                None => break,
            };
            debug!(
                "Refinement round {}: {} enemies in [{}, {})",
                round,
                layer.nrows(),
                lo,
                mid
            );
            if layer.nrows() == 0 {
                lo = mid;
            } else if layer.nrows() >= self.enough_enemies(&enemies) {
                hi = mid;
                enemies = layer;
            } else {
                break;
            }
        }

        Ok(Exploration::Bracketed {
            enemies,
            r_inner: lo,
            r_outer: hi,
            iterations,
        })
    }

    /// Enemies a narrower layer must hold to replace `current`.
    fn enough_enemies(&self, current: &Array2<GSFloat>) -> usize {
        self.config.num_enemies.min(current.nrows())
    }

    /// Like `enemies_in_layer`, but `None` when the caps leave too little of the
    /// band to fill a layer.
    fn fillable_layer<R: Rng>(
        &self,
        r_inner: GSFloat,
        r_outer: GSFloat,
        shape: LayerShape,
        rng: &mut R,
    ) -> Result<Option<Array2<GSFloat>>, SearchError> {
        match self.enemies_in_layer(r_inner, r_outer, shape, rng) {
            Ok(layer) => Ok(Some(layer)),
            Err(SearchError::SamplingExhausted { accepted, .. }) => {
                debug!(
                    "Only {} points of [{}, {}) survived the caps",
                    accepted, r_inner, r_outer
                );
                Ok(None)
            }
            Err(err) => Err(err),
        }
    }

    /// Largest inner radius the expansion may reach: the configured
    /// `max_radius` and, under caps, the farthest point of the caps box.
    fn reachable_radius(&self) -> GSFloat {
        let caps_radius = self
            .config
            .caps
            .as_ref()
            .map_or(GSFloat::INFINITY, |caps| {
                caps.max_distance_from(&self.observation)
            });
        self.config
            .max_radius
            .map_or(caps_radius, |max_radius| max_radius.min(caps_radius))
    }

    /// Sample the band `[r_inner, r_outer)` and keep the enemies, in sampling order.
    fn enemies_in_layer<R: Rng>(
        &self,
        r_inner: GSFloat,
        r_outer: GSFloat,
        shape: LayerShape,
        rng: &mut R,
    ) -> Result<Array2<GSFloat>, SearchError> {
        let shell = Shell {
            r_inner,
            r_outer,
            n_points: self.config.n_in_layer,
            shape,
        };
        let layer = generate_layer(
            &self.observation,
            &shell,
            self.config.caps.as_ref(),
            self.config.max_resample_rounds,
            rng,
        )?;
        let preds = self.classifier.predict_batch(layer.view());
        let enemy_idxs: Vec<usize> = preds
            .iter()
            .enumerate()
            .filter(|(_, class)| self.is_enemy(**class))
            .map(|(idx, _)| idx)
            .collect();
        Ok(layer.select(Axis(0), &enemy_idxs))
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::test_util::*;
    use ndarray::array;
    use rand::SeedableRng;
    use rand_pcg::Pcg64;
    use std::cell::RefCell;

    fn always_zero(_x: ArrayView1<GSFloat>) -> Class {
        0
    }

    fn first_feature_positive(x: ArrayView1<GSFloat>) -> Class {
        usize::from(x[0] > 0.)
    }

    fn first_feature_above_half(x: ArrayView1<GSFloat>) -> Class {
        usize::from(x[0] > 0.5)
    }

    fn sum_above(x: ArrayView1<GSFloat>) -> Class {
        usize::from(x[0] + x[1] > 1.2)
    }

    /// Records every point the search asks about.
    struct Recorder<F> {
        inner: F,
        seen: RefCell<Vec<Array1<GSFloat>>>,
    }

    impl<F: Fn(ArrayView1<GSFloat>) -> Class> Classifier for Recorder<F> {
        fn predict(&self, x: ArrayView1<GSFloat>) -> Class {
            self.seen.borrow_mut().push(x.to_owned());
            (self.inner)(x)
        }
    }

    fn small_config() -> SearchConfig {
        SearchConfig::default().with_n_in_layer(200)
    }

    #[test]
    fn test_boundary_scenario_sparsifies_second_feature() {
        let obs = array![0., 0.];
        let config = small_config();
        let gs = GrowingSpheres::new(obs.view(), &first_feature_above_one, Some(1), &config).unwrap();
        let outcome = gs.find_counterfactual(&mut Pcg64::seed_from_u64(0)).unwrap();
        assert_eq!(outcome.status, SearchStatus::Found);
        assert_eq!(outcome.e_star.len(), 1);
        assert!(outcome.e_star[0][0] > 1.);
        let enemy = &outcome.enemies[0];
        assert!(enemy[0] > 1.);
        assert_eq!(enemy[1], 0.);
        assert_eq!(first_feature_above_one(enemy.view()), 1);
        assert!(outcome.iterations > 0);
    }

    #[test]
    fn test_no_sparse_returns_e_star() {
        let obs = array![0., 0.];
        let config = small_config().with_sparse(false);
        let gs = GrowingSpheres::new(obs.view(), &first_feature_above_one, None, &config).unwrap();
        let outcome = gs.find_counterfactual(&mut Pcg64::seed_from_u64(1)).unwrap();
        assert_eq!(outcome.enemies, outcome.e_star);
        assert_eq!(outcome.moves(&obs.view())[0], &outcome.enemies[0] - &obs);
    }

    #[test]
    fn test_constant_classifier_exhausts() {
        let obs = array![0.5, -0.5, 1.];
        let config = small_config().with_n_in_layer(20).with_max_iterations(25);
        let gs = GrowingSpheres::new(obs.view(), &always_zero, None, &config).unwrap();
        let outcome = gs.find_counterfactual(&mut Pcg64::seed_from_u64(2)).unwrap();
        assert_eq!(outcome.status, SearchStatus::Exhausted);
        assert!(outcome.e_star.is_empty());
        assert!(outcome.enemies.is_empty());
        assert_eq!(outcome.iterations, 25);
    }

    #[test]
    fn test_max_radius_stops_expansion() {
        let obs = array![0., 0.];
        let config = small_config().with_max_radius(0.5);
        let gs = GrowingSpheres::new(obs.view(), &always_zero, None, &config).unwrap();
        let outcome = gs.find_counterfactual(&mut Pcg64::seed_from_u64(3)).unwrap();
        assert_eq!(outcome.status, SearchStatus::Exhausted);
        assert!(outcome.radius.0 >= 0.5);
        assert!(outcome.iterations < 5);
    }

    #[test]
    fn test_caps_stop_expansion_past_the_box() {
        let obs = array![0., 0.];
        let config = small_config()
            .with_n_in_layer(50)
            .with_max_resample_rounds(500)
            .with_caps(Caps::uniform(2, -1., 1.));
        let gs = GrowingSpheres::new(obs.view(), &always_zero, None, &config).unwrap();
        let outcome = gs.find_counterfactual(&mut Pcg64::seed_from_u64(4)).unwrap();
        assert_eq!(outcome.status, SearchStatus::Exhausted);
        assert!(outcome.radius.0 >= 2_f64.sqrt());
    }

    #[test]
    fn test_caps_respected_for_every_query() {
        let obs = array![0., 0.];
        let caps = Caps::from_pairs(&[[-1., 1.], [-1., 1.]]);
        let config = small_config().with_caps(caps.clone());
        let clf = Recorder {
            inner: first_feature_above_half,
            seen: RefCell::new(vec![]),
        };
        let gs = GrowingSpheres::new(obs.view(), &clf, Some(1), &config).unwrap();
        let outcome = gs.find_counterfactual(&mut Pcg64::seed_from_u64(5)).unwrap();
        assert!(outcome.is_complete());
        let seen = clf.seen.borrow();
        assert!(seen.len() > config.n_in_layer);
        // The observation itself is queried first and lies inside the box too.
        assert!(seen.iter().all(|x| caps.is_member(&x.view())));
        assert!(outcome.enemies[0][0] > 0.5);
    }

    #[test]
    fn test_caps_exhaustion_in_higher_dimensions() {
        for dim in [4, 6] {
            let obs = Array1::zeros(dim);
            let config = small_config().with_caps(Caps::uniform(dim, -1., 1.));
            let gs = GrowingSpheres::new(obs.view(), &always_zero, None, &config).unwrap();
            let outcome = gs.find_counterfactual(&mut Pcg64::seed_from_u64(10)).unwrap();
            assert_eq!(outcome.status, SearchStatus::Exhausted);
            assert!(outcome.enemies.is_empty());
            assert!(outcome.radius.1 <= (dim as GSFloat).sqrt() + 1e-9);
        }
    }

    #[test]
    fn test_refinement_keeps_enough_enemies() {
        // Refinement runs after the same expansion draws, so it may only
        // narrow the band, never lose selected enemies.
        let obs = array![0., 0.];
        let refined = small_config().with_num_enemies(5).with_sparse(false);
        let unrefined = refined.clone().with_refine_rounds(0);
        for seed in 0..20 {
            let run = |config: &SearchConfig| {
                GrowingSpheres::new(obs.view(), &sum_above, Some(1), config)
                    .unwrap()
                    .find_counterfactual(&mut Pcg64::seed_from_u64(seed))
                    .unwrap()
            };
            let (a, b) = (run(&refined), run(&unrefined));
            assert_eq!(a.status, b.status);
            assert_eq!(a.e_star.len(), b.e_star.len());
            assert_eq!(a.iterations, b.iterations);
            assert!(a.radius.0 >= b.radius.0);
            assert!(a.radius.1 <= b.radius.1);
        }
    }

    #[test]
    fn test_zoom_in_when_observation_sits_on_boundary() {
        let obs = array![0., 0., 0.];
        let config = small_config();
        let gs =
            GrowingSpheres::new(obs.view(), &first_feature_positive, None, &config).unwrap();
        assert_eq!(gs.observation_class(), 0);
        let outcome = gs.find_counterfactual(&mut Pcg64::seed_from_u64(6)).unwrap();
        assert!(outcome.is_complete());
        assert_eq!(outcome.iterations, 0);
        assert!(outcome.radius.1 < config.first_radius);
        assert!(crate::util::l2_norm(outcome.e_star[0].view()) < config.first_radius);
    }

    #[test]
    fn test_e_star_sorted_by_distance() {
        let obs = array![0., 0.];
        let config = small_config().with_num_enemies(5).with_sparse(false);
        let gs = GrowingSpheres::new(obs.view(), &first_feature_above_one, Some(1), &config).unwrap();
        let outcome = gs.find_counterfactual(&mut Pcg64::seed_from_u64(7)).unwrap();
        assert_eq!(outcome.e_star.len(), 5);
        let dists: Vec<GSFloat> = outcome
            .e_star
            .iter()
            .map(|e| crate::util::l2_norm(e.view()))
            .collect();
        assert!(dists.windows(2).all(|w| w[0] <= w[1]));
        assert!(outcome.e_star.iter().all(|e| e[0] > 1.));
    }

    #[test]
    fn test_partial_when_layer_has_too_few_enemies() {
        let obs = array![0., 0.];
        let config = small_config()
            .with_n_in_layer(10)
            .with_num_enemies(10)
            .with_refine_rounds(0);
        let gs = GrowingSpheres::new(obs.view(), &first_feature_above_one, Some(1), &config).unwrap();
        let outcome = gs.find_counterfactual(&mut Pcg64::seed_from_u64(8)).unwrap();
        match outcome.status {
            SearchStatus::Partial { found, requested } => {
                assert_eq!(requested, 10);
                assert_eq!(found, outcome.e_star.len());
                assert!(found > 0 && found < 10);
            }
            other => panic!("expected a partial outcome, got {:?}", other),
        }
    }

    #[test]
    fn test_same_seed_same_outcome() {
        let obs = array![0.3, -0.2];
        let config = small_config().with_layer_shape(LayerShape::Sphere);
        let gs = GrowingSpheres::new(obs.view(), &first_feature_above_one, None, &config).unwrap();
        let a = gs.find_counterfactual(&mut Pcg64::seed_from_u64(9)).unwrap();
        let b = gs.find_counterfactual(&mut Pcg64::seed_from_u64(9)).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_invalid_configurations() {
        let obs = array![0., 0.];
        let check = |config: SearchConfig, target: Option<Class>, expected: ConfigError| {
            let res = GrowingSpheres::new(obs.view(), &first_feature_above_one, target, &config);
            assert_eq!(res.err(), Some(expected));
        };
        check(small_config().with_n_in_layer(0), None, ConfigError::EmptyLayer);
        check(
            small_config().with_first_radius(-1.),
            None,
            ConfigError::InvalidRadius { radius: -1. },
        );
        check(
            small_config().with_dicrease_radius(1.),
            None,
            ConfigError::InvalidRadiusFactor { factor: 1. },
        );
        check(
            small_config().with_caps(Caps::uniform(3, 0., 1.)),
            None,
            ConfigError::CapsDimensionMismatch {
                caps_dim: 3,
                obs_dim: 2,
            },
        );
        check(
            small_config(),
            Some(0),
            ConfigError::UnreachableTarget { class: 0 },
        );
        check(
            small_config().with_num_enemies(0),
            None,
            ConfigError::NoEnemiesRequested,
        );
    }

    #[test]
    fn test_non_finite_observation_rejected() {
        let obs = array![0., GSFloat::NAN];
        let config = small_config();
        let res = GrowingSpheres::new(obs.view(), &first_feature_above_one, None, &config);
        assert_eq!(res.err(), Some(ConfigError::NonFiniteObservation { dim: 1 }));
    }

    #[test]
    fn test_config_json_roundtrip() {
        let config = small_config()
            .with_caps(Caps::uniform(2, -3., 3.))
            .with_layer_shape(LayerShape::Sphere);
        let restored = SearchConfig::from_json(&config.to_json().unwrap()).unwrap();
        assert_eq!(restored, config);

        let partial = SearchConfig::from_json(r#"{"layer_shape": "ring", "n_in_layer": 7}"#).unwrap();
        assert_eq!(partial.layer_shape, LayerShape::Ball);
        assert_eq!(partial.n_in_layer, 7);
        assert_eq!(partial.first_radius, 0.1);
    }
}
