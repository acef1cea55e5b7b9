use std::f32::consts::TAU;

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_xoshiro::Xoshiro256PlusPlus;

use crate::agent::Agent;
use crate::math_helpers::scale_to_length;
use crate::options::RunOptions;

/// The flock engine: a fixed set of agents plus the RNG that placed them.
///
/// The RNG is owned rather than global so that a run started from
/// `RunOptions::seed` replays bit-for-bit, including the rare random
/// fallback heading drawn during an update.
pub struct Flock {
    agents: Vec<Agent>,
    rng: Xoshiro256PlusPlus,
}

impl Flock {
    pub fn new(run_options: &RunOptions) -> Self {
        let mut rng = match run_options.seed {
            Some(seed) => Xoshiro256PlusPlus::seed_from_u64(seed),
            None => Xoshiro256PlusPlus::from_entropy(),
        };

        let agents = (0..run_options.init_agents)
            .map(|id| get_agent(&mut rng, run_options, id))
            .collect();

        log::debug!(
            "spawned {} agents on a {}x{} plane",
            run_options.init_agents,
            run_options.plane.width,
            run_options.plane.height
        );

        Flock { agents, rng }
    }

    /// Builds a flock from explicitly placed agents. Ids must be unique;
    /// neighbour queries tell agents apart by id.
    pub fn from_agents(agents: Vec<Agent>, run_options: &RunOptions) -> Self {
        let rng = match run_options.seed {
            Some(seed) => Xoshiro256PlusPlus::seed_from_u64(seed),
            None => Xoshiro256PlusPlus::from_entropy(),
        };

        Flock { agents, rng }
    }

    /// Advances the whole flock one frame.
    ///
    /// Sequential and in-place, not double-buffered: each agent integrates,
    /// wraps, scans and steers to completion before the next one starts, so
    /// later agents observe the already-updated state of earlier ones within
    /// the same frame. Swapping this for a snapshot-then-update scheme would
    /// change the simulation dynamics.
    pub fn update(&mut self, run_options: &RunOptions) {
        for i_cur in 0..self.agents.len() {
            let mut agent = self.agents[i_cur];

            agent.integrate();
            agent.wrap_edges(&run_options.plane);

            let steering = agent.run_rules(&self.agents, run_options);
            agent.apply_steering(steering);

            agent.velocity = match scale_to_length(agent.velocity, run_options.max_speed) {
                Some(velocity) => velocity,
                // steering cancelled the velocity outright; no heading is
                // left to rescale, so draw a fresh one
                None => random_heading(&mut self.rng, run_options.max_speed),
            };

            self.agents[i_cur] = agent;
        }
    }

    pub fn view(&self) -> &[Agent] {
        &self.agents
    }
}

fn get_agent(rng: &mut Xoshiro256PlusPlus, run_options: &RunOptions, id: usize) -> Agent {
    // position uniform over the plane
    let x = rng.gen::<f32>() * run_options.plane.width;
    let y = rng.gen::<f32>() * run_options.plane.height;

    Agent::new(x, y, random_heading(rng, run_options.max_speed), id)
}

/// A velocity of magnitude `speed` with a heading uniform over `[0, 2π)`.
fn random_heading(rng: &mut impl Rng, speed: f32) -> Vec2 {
    let angle = rng.gen::<f32>() * TAU;

    Vec2::new(angle.cos(), angle.sin()) * speed
}
