//! Project configuration discovered from a `papyrus.toml` file, layered
//! over built-in defaults the same way the formatter layers its own
//! options.

use figment::providers::{Format, Serialized, Toml};
use figment::Figment;
use papyrus_fmt::OutputOptions;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
pub struct Config {
    #[serde(default)]
    pub format: OutputOptionsConfig,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct OutputOptionsConfig {
    pub use_tabs: Option<bool>,
    pub unix_line_endings: Option<bool>,
    pub indent_width: Option<u64>,
}

impl Config {
    /// Loads configuration from `path` if it exists, layered over the
    /// built-in defaults; returns the defaults unchanged if `path` is
    /// absent.
    pub fn discover(path: &Path) -> Result<Self, figment::Error> {
        let mut figment = Figment::new().merge(Serialized::defaults(Config::default()));
        if path.exists() {
            figment = figment.merge(Toml::file(path));
        }
        figment.extract()
    }

    pub fn output_options(&self) -> OutputOptions {
        let mut options = OutputOptions::default();
        options.update(papyrus_fmt::OutputOptionsIncomplete {
            use_tabs: self.format.use_tabs,
            unix_line_endings: self.format.unix_line_endings,
            indent_width: self.format.indent_width,
        });
        options
    }
}
