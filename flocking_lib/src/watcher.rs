use std::{fs::OpenOptions, mem};

use chrono::{DateTime, Utc};
use itertools::Itertools;
use serde::Serialize;
use thiserror::Error;

use crate::{flock::Flock, options::SaveOptions};

/// One recorded agent observation.
#[derive(Serialize, Debug, Clone, Copy, PartialEq)]
pub struct AgentSample {
    pub id: usize,
    pub x: f32,
    pub y: f32,
    pub tick: u64,
}

#[derive(Error, Debug)]
pub enum WatchError {
    #[error("could not open sample output: {0}")]
    Io(#[from] std::io::Error),
    #[error("could not write sample row: {0}")]
    Csv(#[from] csv::Error),
}

/// Accumulates agent positions as the simulation runs, every
/// `sample_rate`-th frame, for offline analysis of a run.
pub struct FlockWatcher {
    samples: Vec<AgentSample>,
    frame_ticker: u64,
    sample_rate: u64,
}

const PREFIX: &str = "flock-data";

impl FlockWatcher {
    pub fn new(sample_rate: u64) -> Self {
        FlockWatcher {
            samples: Vec::new(),
            frame_ticker: 0,
            sample_rate: sample_rate.max(1),
        }
    }

    /// Triggers data collection for the current frame.
    pub fn watch(&mut self, flock: &Flock) {
        if !self.should_sample() {
            return;
        }

        let tick = self.frame_ticker / self.sample_rate;

        self.samples.extend(flock.view().iter().map(|agent| AgentSample {
            id: agent.id,
            x: agent.position.x,
            y: agent.position.y,
            tick,
        }));
    }

    pub fn restart(&mut self) {
        self.samples.clear();
        self.frame_ticker = 0;
    }

    /// Empties the watcher, returning the samples ordered by (tick, id).
    pub fn pop_data(&mut self) -> Vec<AgentSample> {
        mem::take(&mut self.samples)
            .into_iter()
            .sorted_by_key(|sample| (sample.tick, sample.id))
            .collect()
    }

    /// Saves the collected data as CSV, then returns it while emptying the
    /// watcher's memory.
    ///
    /// Depending on save options, either overwrites the fixed-name file or
    /// writes a new timestamped one.
    pub fn pop_data_save(&mut self, save_options: &SaveOptions) -> Result<Vec<AgentSample>, WatchError> {
        let data = self.pop_data();

        if !save_options.save_samples {
            return Ok(data);
        }

        if let Some(path) = &save_options.save_path {
            let file_path = format!(
                "{path}{file_name}",
                file_name = FlockWatcher::get_dataset_name(save_options, Utc::now())
            );

            let file = OpenOptions::new()
                .write(true)
                .create(true)
                .truncate(true)
                .open(&file_path)?;
            let mut wtr = csv::Writer::from_writer(file);

            for sample in &data {
                wtr.serialize(sample)?;
            }
            wtr.flush()?;

            log::info!("saved {} samples to {}", data.len(), file_path);
        }

        Ok(data)
    }

    fn get_dataset_name(save_options: &SaveOptions, now: DateTime<Utc>) -> String {
        match save_options.timestamp_files {
            true => format!(
                "{prefix}_{datetime}.csv",
                prefix = PREFIX,
                datetime = now.timestamp_millis()
            ),
            false => format!("{prefix}.csv", prefix = PREFIX),
        }
    }

    fn should_sample(&mut self) -> bool {
        self.frame_ticker += 1;

        self.frame_ticker % self.sample_rate == 0
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;
    use chrono::Utc;
    use glam::Vec2;

    use super::FlockWatcher;
    use crate::agent::Agent;
    use crate::flock::Flock;
    use crate::options::{RunOptions, SaveOptions};

    fn two_agent_flock() -> (Flock, RunOptions) {
        let run_options = RunOptions {
            seed: Some(99),
            ..Default::default()
        };
        let agents = vec![
            Agent::new(100., 100., Vec2::new(2., 0.), 0),
            Agent::new(500., 500., Vec2::new(0., 2.), 1),
        ];

        (Flock::from_agents(agents, &run_options), run_options)
    }

    #[test]
    fn name_is_timestamped() {
        let expected = "flock-data_1668038059490.csv";
        let save_options = SaveOptions {
            save_samples: true,
            save_path: Some("".to_owned()),
            timestamp_files: true,
        };
        let dt = Utc.timestamp_millis_opt(1668038059490).unwrap();

        let actual = FlockWatcher::get_dataset_name(&save_options, dt);

        assert_eq!(actual, expected)
    }

    #[test]
    fn name_without_timestamp_overwrites() {
        let expected = "flock-data.csv";
        let save_options = SaveOptions {
            save_samples: true,
            save_path: Some("".to_owned()),
            timestamp_files: false,
        };
        let dt = Utc.timestamp_millis_opt(1668038059490).unwrap();

        let actual = FlockWatcher::get_dataset_name(&save_options, dt);

        assert_eq!(actual, expected)
    }

    #[test]
    fn sample_rate_skips_frames() {
        let (mut flock, run_options) = two_agent_flock();
        let mut watcher = FlockWatcher::new(2);

        for _ in 0..4 {
            flock.update(&run_options);
            watcher.watch(&flock);
        }

        // 4 frames, every 2nd sampled, 2 agents each
        let data = watcher.pop_data();
        assert_eq!(data.len(), 4);
        assert_eq!(data.iter().filter(|s| s.tick == 1).count(), 2);
        assert_eq!(data.iter().filter(|s| s.tick == 2).count(), 2);
    }

    #[test]
    fn pop_data_orders_and_drains() {
        let (mut flock, run_options) = two_agent_flock();
        let mut watcher = FlockWatcher::new(1);

        for _ in 0..3 {
            flock.update(&run_options);
            watcher.watch(&flock);
        }

        let data = watcher.pop_data();
        assert_eq!(data.len(), 6);
        let keys: Vec<_> = data.iter().map(|s| (s.tick, s.id)).collect();
        let mut sorted = keys.clone();
        sorted.sort();
        assert_eq!(keys, sorted);

        // drained: a second pop has nothing left
        assert!(watcher.pop_data().is_empty());
    }

    #[test]
    fn restart_forgets_samples_and_ticks() {
        let (mut flock, run_options) = two_agent_flock();
        let mut watcher = FlockWatcher::new(2);

        flock.update(&run_options);
        watcher.watch(&flock);
        watcher.watch(&flock);
        watcher.restart();

        // the frame ticker starts over: one post-restart watch is frame 1
        // of 2 again and records nothing
        watcher.watch(&flock);
        assert!(watcher.pop_data().is_empty());
    }
}
