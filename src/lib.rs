pub mod cards;
pub mod config;
pub mod error;
pub mod oracle;
pub mod resolver;
pub mod tree;
pub mod valuenet;

pub use config::GameConfig;
pub use error::ResolverError;

/// dimensional analysis types
pub type Chips = i32;
pub type Probability = f32;
pub type Utility = f32;

/// trait for random generation, mainly (strictly?) for testing
pub trait Arbitrary {
    fn random() -> Self;
}

/// progress bar for long-running CLI operations (data generation, training)
#[cfg(feature = "cli")]
pub fn progress(n: usize) -> indicatif::ProgressBar {
    let tick = std::time::Duration::from_secs(1);
    let style = "{spinner:.cyan} {elapsed} ~ {percent:>3}% {wide_bar:.cyan}";
    let style = indicatif::ProgressStyle::with_template(style).unwrap();
    let progress = indicatif::ProgressBar::new(n as u64);
    progress.set_style(style);
    progress.enable_steady_tick(tick);
    progress
}

/// initialize terminal logging for binaries
#[cfg(feature = "cli")]
pub fn init() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
}
