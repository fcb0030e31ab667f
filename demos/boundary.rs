//! Explain a point on the wrong side of a two-cut ReLU network.
//!
//! Usage: `cargo run --example boundary [demos/boundary_config.json]`
use growing_spheres::affine::Affine2;
use growing_spheres::dnn::{Dense, ReLU, DNN};
use growing_spheres::logging::init_console;
use growing_spheres::{Caps, CounterfactualExplanation, GrowingSpheres, SearchConfig};
use log::{info, LevelFilter};
use ndarray::array;
use rand::SeedableRng;
use rand_pcg::Pcg64;
use std::error::Error;
use std::fs;

fn two_cut_dnn() -> DNN {
    DNN::new(vec![
        Box::new(Dense::new(Affine2::new(
            array![[1., 1.], [1., -1.]],
            array![-2., -3.],
        ))),
        Box::new(ReLU::new(2)),
        Box::new(Dense::new(Affine2::new(
            array![[0., 0.], [1., 1.]],
            array![1e-9, 0.],
        ))),
    ])
}

fn main() -> Result<(), Box<dyn Error>> {
    init_console(LevelFilter::Info)?;

    let config = match std::env::args().nth(1) {
        Some(path) => SearchConfig::from_json(&fs::read_to_string(path)?)?,
        None => SearchConfig::default()
            .with_caps(Caps::uniform(2, -5., 5.))
            .with_num_enemies(3)
            .with_verbose(true),
    };
    let dnn = DNN::from_json(&two_cut_dnn().to_json()?)?;
    info!("Model: {}", dnn);

    let mut rng = Pcg64::seed_from_u64(2024);
    let observation = array![0.5, 0.25];
    let search = GrowingSpheres::new(observation.view(), &dnn, Some(1), &config)?;
    info!("Observation {} is class {}", observation, search.observation_class());
    let mut cf = CounterfactualExplanation::new(observation.clone(), &dnn, Some(1));
    cf.fit(&config, &mut rng)?;

    for (enemy, e_star) in cf.enemies()?.iter().zip(cf.e_stars()?) {
        info!("e* {} -> enemy {}", e_star, enemy);
    }
    if let Some(distances) = cf.distances()? {
        println!("{}", serde_json::to_string_pretty(&distances)?);
    }
    Ok(())
}
