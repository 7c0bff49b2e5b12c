use std::path::PathBuf;

use crate::args::ConfigCommand;
use crate::config::Config;
use crate::Papyrus;

impl Papyrus {
    pub fn execute_config(&self, cmd: ConfigCommand) -> Result<(), anyhow::Error> {
        match cmd {
            ConfigCommand::Schema => {
                let schema = schemars::schema_for!(Config);
                println!("{}", serde_json::to_string_pretty(&schema)?);
            }
            ConfigCommand::Init { output } => {
                let path = PathBuf::from(output);

                if path.exists() {
                    tracing::info!(path = %path.display(), "already initialized");
                    return Ok(());
                }

                std::fs::write(&path, toml::to_string_pretty(&Config::default())?)?;
            }
        }

        Ok(())
    }
}
