use clap_serde_derive::{
    clap::{self, Parser},
    serde::Serialize,
    ClapSerde,
};

#[derive(Parser)]
#[derive(ClapSerde)]
#[command(version, about, long_about = None)]
/// Flocking simulation: cohesion, alignment and separation over a wrapping plane.
pub struct Args {
    /// Config file
    #[arg(short, long = "config", default_value = "config.yaml")]
    pub config_path: std::path::PathBuf,

    /// Rest of arguments
    #[command(flatten)]
    pub config: <Config as ClapSerde>::Opt,
}

#[derive(ClapSerde, Serialize)]
/// Programatic configuration
///
/// Uses defaults, which can be overwritten by specifying a filepath for the
/// `-c` or `--config` arg option
pub struct Config {
    #[default(100)]
    #[arg(short = 'n', long)]
    /// number of agents in the flock
    pub no_agents: usize,

    #[default(800)]
    #[arg(short = 'x', long)]
    pub init_width: u32,

    #[default(600)]
    #[arg(short = 'y', long)]
    pub init_height: u32,

    #[default(2.0)]
    #[arg(long)]
    /// plane units travelled per frame
    pub max_speed: f32,

    #[default(50.0)]
    #[arg(long = "perception")]
    pub perception_radius: f32,

    #[default(25.0)]
    #[arg(long = "separation")]
    pub separation_distance: f32,

    #[default(0.02)]
    #[arg(long = "ali_coef")]
    pub alignment_coefficient: f32,
    #[default(0.01)]
    #[arg(long = "coh_coef")]
    pub cohesion_coefficient: f32,
    #[default(0.03)]
    #[arg(long = "sep_coef")]
    pub separation_coefficient: f32,

    #[default(0)]
    #[arg(long)]
    /// fixed RNG seed for reproducible runs; 0 seeds from entropy
    pub seed: u64,

    #[default(60)]
    #[arg(long)]
    /// frame-rate cap
    pub fps: u8,

    #[default(1)]
    #[arg(short = 'r', long)]
    /// ratio of frames/samples, e.g. 4 = sample every 4th frame
    pub sample_rate: u64,

    #[default(false)]
    #[arg(short = 's', long)]
    /// write sampled agent positions to CSV on exit
    pub save: bool,

    #[default(false)]
    #[arg(short = 't', long)]
    pub save_timestamp: bool,
}
