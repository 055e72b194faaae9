#[macro_use]
extern crate log;

use components::*;
use optics_core::app::*;
use optics_core::geometry::*;
use optics_core::raytrace::*;
use optics_core::stats::StatsAccumulator;
use std::fs::File;
use std::io::BufWriter;
use std::sync::Arc;
use tracers::*;

fn main() {
    // Initialize `env_logger`.
    env_logger::init();

    if let Err(e) = run(&OPTIONS) {
        error!("{e}");
        std::process::exit(1);
    }
}

fn run(options: &Options) -> Result<(), String> {
    let config = TraceConfig::from(options);
    config.validate().map_err(|e| e.to_string())?;

    let model = build_scene(options.scene, options.rays, config);
    let outcome = model.trace_all().map_err(|e| e.to_string())?;

    for traced in outcome.traced.iter() {
        info!(
            "Source '{}': {} generations, {} rays{}",
            traced.source,
            traced.len(),
            traced.total_rays(),
            if traced.truncated { ", truncated" } else { "" }
        );
    }

    if !options.quiet {
        let mut accum = StatsAccumulator::new();
        outcome.face_stats.report(&mut accum);
        for traced in outcome.traced.iter() {
            accum.report_counter("Trace/Rays", traced.total_rays() as i64);
            accum.report_sample("Trace/Generations per source", traced.len() as Float);
        }
        for (name, value) in outcome.results.iter() {
            accum.report_value(&format!("Results/{name}"), *value);
        }
        accum.print();
    }

    if let Some(path) = &options.out_file {
        let file = File::create(path).map_err(|e| format!("Unable to create '{path}': {e}"))?;
        serde_json::to_writer(BufWriter::new(file), outcome.as_ref())
            .map_err(|e| format!("Unable to write '{path}': {e}"))?;
        info!("Wrote trace to '{path}'");
    }

    Ok(())
}

/// Build one of the demonstration scenes.
///
/// * `scene`  - The scene.
/// * `rays`   - Rays per side of the source grid.
/// * `config` - Trace parameters.
fn build_scene(scene: Scene, rays: usize, config: TraceConfig) -> RayTraceModel {
    match scene {
        Scene::Lens => {
            let lens = PlanoConvexLens::new("lens", 5.0, 15.0, 12.0, real(1.5));
            debug!("Lens focal length {}", lens.focal_length());
            let screen = RectTarget::new("screen", 30.0, 30.0).with_placement(Placement::new(
                Point3f::new(0.0, 0.0, 40.0),
                Vector3f::Z,
                Vector3f::X,
            ));
            let source = ConfocalRaySource {
                focus: Point3f::new(0.0, 0.0, -30.0),
                theta: 10.0,
                rays_per_side: rays,
                ..ConfocalRaySource::default()
            };
            let efficiency = Measurement::TotalEfficiency(TotalEfficiency {
                aperture: FaceId::new("lens", "base"),
                target: FaceId::new("screen", "target"),
            });
            RayTraceModel::new(
                vec![Arc::new(lens), Arc::new(screen)],
                vec![Arc::new(source)],
                vec![efficiency],
                config,
            )
        }

        Scene::Rhomboid => {
            let rhomboid = Extrusion::rhomboid("rhomboid", 7.07, 14.0, 45.0, 10.0, real(1.764));
            let stop = BeamStop::new("beamstop", 10.0, 10.0).with_placement(Placement::new(
                Point3f::new(7.0, -10.0, 5.0),
                Vector3f::Y,
                Vector3f::X,
            ));
            let source = ParallelRaySource {
                origin: Point3f::new(-7.42, 15.0, 5.0),
                direction: -Vector3f::Y,
                radius: 1.0,
                rays_per_side: rays,
                ..ParallelRaySource::default()
            };
            let ratio = Measurement::Ratio(Ratio {
                numerator: FaceId::new("beamstop", "stop"),
                denominator: FaceId::new("rhomboid", "side 3"),
            });
            RayTraceModel::new(
                vec![Arc::new(rhomboid), Arc::new(stop)],
                vec![Arc::new(source)],
                vec![ratio],
                config,
            )
        }

        Scene::Mirrors => {
            let m1 = RectMirror::new("m1", 10.0, 10.0);
            let m2 = RectMirror::new("m2", 10.0, 10.0).with_placement(Placement::new(
                Point3f::new(0.0, 0.0, 10.0),
                -Vector3f::Z,
                Vector3f::X,
            ));
            let source = ParallelRaySource {
                origin: Point3f::new(0.0, 0.0, 5.0),
                radius: 2.0,
                rays_per_side: rays,
                ..ParallelRaySource::default()
            };
            let ratio = Measurement::Ratio(Ratio {
                numerator: FaceId::new("m1", "mirror"),
                denominator: FaceId::new("m2", "mirror"),
            });
            RayTraceModel::new(
                vec![Arc::new(m1), Arc::new(m2)],
                vec![Arc::new(source)],
                vec![ratio],
                config,
            )
        }
    }
}
