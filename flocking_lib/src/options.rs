use serde::{Deserialize, Serialize};

#[derive(Debug, Clone)]
pub struct RunOptions {
    pub init_agents: usize,

    /// every agent travels at exactly this speed after each update
    pub max_speed: f32,

    /// neighbours within this distance feed alignment and cohesion
    pub perception_radius: f32,
    /// neighbours within this stricter distance additionally repel
    pub separation_distance: f32,

    pub alignment_coefficient: f32,
    pub cohesion_coefficient: f32,
    pub separation_coefficient: f32,

    pub plane: PlaneSize,

    /// fixed RNG seed; `None` seeds from entropy
    pub seed: Option<u64>,

    pub sample_rate: u64,
    pub save_options: SaveOptions,
}

impl Default for RunOptions {
    fn default() -> Self {
        RunOptions {
            init_agents: 100,
            max_speed: 2.0,
            perception_radius: 50.0,
            separation_distance: 25.0,
            alignment_coefficient: 0.02,
            cohesion_coefficient: 0.01,
            separation_coefficient: 0.03,
            plane: get_plane_size(800, 600),
            seed: None,
            sample_rate: 1,
            save_options: SaveOptions {
                save_samples: false,
                save_path: Some("./".to_owned()),
                timestamp_files: true,
            },
        }
    }
}

pub fn get_plane_size(init_width: u32, init_height: u32) -> PlaneSize {
    PlaneSize {
        width: init_width as f32,
        height: init_height as f32,
    }
}

/// The simulation plane `[0, width] x [0, height]`, y growing downward as on
/// screen. An agent's position may momentarily equal `width`/`height`: the
/// wrap rule only fires strictly beyond the edge.
#[derive(Debug, PartialEq, Clone, Copy, Serialize, Deserialize)]
pub struct PlaneSize {
    pub width: f32,
    pub height: f32,
}

#[derive(Debug, Clone)]
pub struct SaveOptions {
    pub save_samples: bool,
    pub save_path: Option<String>,
    pub timestamp_files: bool,
}
