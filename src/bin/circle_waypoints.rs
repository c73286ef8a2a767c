use anyhow::{Context, Result};
use cartesian_circle::{config, generate, logger};
use log::info;

/// Generate the waypoints of a circle job and print them, one pose per line,
/// as `x y z qx qy qz qw`.
///
/// Usage: circle_waypoints [params.toml]
fn main() -> Result<()> {
    logger::logger_init(logger::LevelFilter::Info)?;

    let config = match std::env::args().nth(1) {
        Some(path) => {
            info!("Loading circle parameters from {}", path);
            config::load(&path).with_context(|| format!("Failed to load {}", path))?
        }
        None => {
            info!("No parameter file given, using defaults");
            config::CircleConfig::default()
        }
    };

    let start = config.start_pose()?;
    let spec = config.circle_spec();
    let discretization = config.discretization()?;
    let policy = config.orientation.policy();

    info!("Using orientation policy: {}", policy.name());

    let waypoints = generate(&start, &spec, &discretization, policy.as_ref())
        .context("Failed to generate circle waypoints")?;

    info!("Generated {} waypoints", waypoints.len());

    for pose in &waypoints {
        let p = pose.position;
        let q = pose.orientation.coords;
        println!(
            "{:.6} {:.6} {:.6} {:.6} {:.6} {:.6} {:.6}",
            p.x, p.y, p.z, q.x, q.y, q.z, q.w
        );
    }

    Ok(())
}
