pub mod args;
pub mod config;
mod execute;

use config::Config;

pub struct Papyrus {
    config: Config,
    colors: bool,
}

impl Papyrus {
    #[must_use]
    pub fn new(config: Config) -> Self {
        Self {
            config,
            colors: false,
        }
    }
}
