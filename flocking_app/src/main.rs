use std::{fs::File, io::BufReader};

use clap_serde_derive::{clap::Parser, ClapSerde};
use log::{info, warn};
use nannou::prelude::*;

use flocking_lib::flock::Flock;
use flocking_lib::options::{self, RunOptions, SaveOptions};
use flocking_lib::watcher::FlockWatcher;

mod cliargs;
use cliargs::{Args, Config};

const AGENT_RADIUS: f32 = 3.;

fn main() {
    env_logger::init();

    nannou::app(model).update(update).run();
}

struct Model {
    flock: Flock,
    run_options: RunOptions,
    watcher: FlockWatcher,
    fps: u8,
    last_update_micros: u128,
}

fn model(app: &App) -> Model {
    // Parse whole args with clap
    let mut args = Args::parse();

    // Get config file
    let config = if let Ok(f) = File::open(&args.config_path) {
        // Parse config with serde
        match serde_yaml::from_reader::<_, <Config as ClapSerde>::Opt>(BufReader::new(f)) {
            // merge config already parsed from clap
            Ok(config) => Config::from(config).merge(&mut args.config),
            Err(err) => panic!("Error in configuration file:\n{}", err),
        }
    } else {
        // If there is not config file return only config parsed from clap
        Config::from(&mut args.config)
    };

    let mut run_options = RunOptions::default();

    run_options.init_agents = config.no_agents;
    run_options.plane = options::get_plane_size(config.init_width, config.init_height);
    run_options.max_speed = config.max_speed;
    run_options.perception_radius = config.perception_radius;
    run_options.separation_distance = config.separation_distance;
    run_options.alignment_coefficient = config.alignment_coefficient;
    run_options.cohesion_coefficient = config.cohesion_coefficient;
    run_options.separation_coefficient = config.separation_coefficient;
    run_options.seed = match config.seed {
        0 => None,
        seed => Some(seed),
    };
    run_options.sample_rate = config.sample_rate;
    run_options.save_options = SaveOptions {
        save_samples: config.save,
        timestamp_files: config.save_timestamp,

        // default
        save_path: run_options.save_options.save_path.clone(),
    };

    info!(
        "flock of {} agents on a {}x{} plane, seed {:?}, capped at {} fps",
        run_options.init_agents,
        run_options.plane.width,
        run_options.plane.height,
        run_options.seed,
        config.fps
    );

    app.new_window()
        .closed(window_closed)
        .size(config.init_width, config.init_height)
        .title("flocking")
        .view(view)
        .build()
        .unwrap();

    Model {
        flock: Flock::new(&run_options),
        watcher: FlockWatcher::new(run_options.sample_rate),
        run_options,
        fps: config.fps.max(1),
        last_update_micros: 0,
    }
}

fn update(app: &App, model: &mut Model, _update: Update) {
    // nannou calls in at display refresh rate; only advance the simulation
    // when a full frame interval has passed
    if !should_advance_frame(app, model) {
        return;
    }

    model.flock.update(&model.run_options);
    model.watcher.watch(&model.flock);
}

fn should_advance_frame(app: &App, model: &mut Model) -> bool {
    let micros_now = app.duration.since_start.as_micros();
    let should_advance =
        micros_now - model.last_update_micros >= 1_000_000 / model.fps as u128;

    if should_advance {
        model.last_update_micros = micros_now;
    }

    should_advance
}

fn view(app: &App, model: &Model, frame: Frame) {
    let draw = app.draw();
    draw.background().color(BLACK);

    let plane = &model.run_options.plane;

    for agent in model.flock.view() {
        // the plane is y-down with the origin in the top-left corner;
        // nannou windows are centred with y growing upward
        let x = agent.position.x.round() - plane.width / 2.;
        let y = plane.height / 2. - agent.position.y.round();

        draw.ellipse().x_y(x, y).radius(AGENT_RADIUS).color(WHITE);
    }

    draw.to_frame(app, &frame).unwrap();
}

fn window_closed(_app: &App, model: &mut Model) {
    match model.watcher.pop_data_save(&model.run_options.save_options) {
        Ok(_) => (),
        Err(err) => warn!("could not save flock samples: {err}"),
    }
}
