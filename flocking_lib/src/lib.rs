use flock::Flock;
use options::RunOptions;
use watcher::{AgentSample, FlockWatcher, WatchError};

pub mod agent;
pub mod flock;

pub mod math_helpers;
pub mod options;
pub mod watcher;

/// Drives a flock for `no_iter` frames with no display attached and returns
/// the watcher's samples (saving them first if the options ask for it).
///
/// This is the whole simulation loop minus rendering; benchmarks and tests
/// run the engine through here.
pub fn flock_run(no_iter: u64, run_options: &RunOptions) -> Result<Vec<AgentSample>, WatchError> {
    let mut flock = Flock::new(run_options);
    let mut watcher = FlockWatcher::new(run_options.sample_rate);

    (0..no_iter).for_each(|_| {
        flock.update(run_options);
        watcher.watch(&flock);
    });

    watcher.pop_data_save(&run_options.save_options)
}

#[cfg(test)]
mod tests {
    use itertools::zip_eq;

    use crate::flock_run;
    use crate::options::RunOptions;

    #[test]
    fn headless_run_samples_every_agent_every_frame() {
        let run_options = RunOptions {
            seed: Some(21),
            ..Default::default()
        };

        let data = flock_run(10, &run_options).unwrap();

        assert_eq!(data.len(), 10 * run_options.init_agents);
    }

    #[test]
    fn headless_runs_with_one_seed_match() {
        let run_options = RunOptions {
            seed: Some(0xF10C),
            ..Default::default()
        };

        let first = flock_run(25, &run_options).unwrap();
        let second = flock_run(25, &run_options).unwrap();

        for (a, b) in zip_eq(first, second) {
            assert_eq!(a, b);
        }
    }
}
