use std::process;
use std::time::Instant;

use clap::Parser;
use log::{ error, info, LevelFilter };

use sphere_tracer::consts::{ CANVAS_WIDTH, CANVAS_HEIGHT, FIELD_OF_VIEW };
use sphere_tracer::scene::Scene;
use sphere_tracer::parallel;
use sphere_tracer::Result;

mod cli;

use cli::Args;

fn init_logger(level: LevelFilter) {
    env_logger::Builder::from_default_env()
        .filter_level(level)
        .init();
}

fn run(args: Args) -> Result<()> {
    let scene = match &args.scene {
        Some(path) => Scene::load(path)?,
        None => {
            info!("no scene given, rendering the default world");
            Scene::with_default_world(CANVAS_WIDTH, CANVAS_HEIGHT, FIELD_OF_VIEW)?
        },
    };

    let Scene { world, mut camera } = scene;
    if args.width.is_some() || args.height.is_some() {
        camera = camera.resized(
            args.width.unwrap_or(camera.hsize),
            args.height.unwrap_or(camera.vsize),
        );
    }

    info!("rendering {}x{} with {} spheres, {} lights", camera.hsize,
        camera.vsize, world.objects.len(), world.light_sources.len());

    let start = Instant::now();
    let canvas = if args.threads <= 1 {
        camera.render(&world)
    } else {
        info!("using {} threads", args.threads);
        parallel::render(world, camera, args.threads)
    };
    info!("rendered in {:.2?}", start.elapsed());

    canvas.save(&args.out)?;
    info!("saved render to {}", args.out.display());

    Ok(())
}

fn main() {
    let args = Args::parse();
    init_logger(args.log_level.clone().into());

    if let Err(e) = run(args) {
        error!("{}", e);
        process::exit(1);
    }
}
