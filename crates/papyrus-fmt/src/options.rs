//! Formatter configuration. Mirrors the teacher's layered-options idiom
//! (a full struct plus an "incomplete" overlay that can be merged on top
//! of defaults), simplified from its macro-generated form since this
//! formatter only has a handful of knobs.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(schemars::JsonSchema))]
#[serde(rename_all = "camelCase")]
pub struct OutputOptions {
    /// Use tabs for indentation instead of spaces. Mutually exclusive
    /// with `indent_width` at the CLI level.
    pub use_tabs: bool,
    /// Emit `\n` line endings instead of the default `\r\n`.
    pub unix_line_endings: bool,
    /// Spaces per indentation level, ignored when `use_tabs` is set.
    pub indent_width: u64,
}

impl Default for OutputOptions {
    fn default() -> Self {
        Self {
            use_tabs: false,
            unix_line_endings: false,
            indent_width: 2,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OutputOptionsIncomplete {
    pub use_tabs: Option<bool>,
    pub unix_line_endings: Option<bool>,
    pub indent_width: Option<u64>,
}

impl OutputOptions {
    pub fn update(&mut self, incomplete: OutputOptionsIncomplete) {
        if let Some(v) = incomplete.use_tabs {
            self.use_tabs = v;
        }
        if let Some(v) = incomplete.unix_line_endings {
            self.unix_line_endings = v;
        }
        if let Some(v) = incomplete.indent_width {
            self.indent_width = v;
        }
    }

    /// Parses `key=value` pairs such as those accepted on the CLI, e.g.
    /// `indent_width=4`.
    pub fn update_from_str(&mut self, key: &str, value: &str) -> Result<(), OptionParseError> {
        match key {
            "use_tabs" => {
                self.use_tabs = parse_bool(value)?;
            }
            "unix_line_endings" => {
                self.unix_line_endings = parse_bool(value)?;
            }
            "indent_width" => {
                self.indent_width = value
                    .parse()
                    .map_err(|_| OptionParseError::InvalidValue(key.into(), value.into()))?;
            }
            other => return Err(OptionParseError::UnknownKey(other.into())),
        }
        Ok(())
    }
}

fn parse_bool(value: &str) -> Result<bool, OptionParseError> {
    value
        .parse()
        .map_err(|_| OptionParseError::InvalidValue("bool".into(), value.into()))
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OptionParseError {
    UnknownKey(String),
    InvalidValue(String, String),
}

impl fmt::Display for OptionParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OptionParseError::UnknownKey(key) => write!(f, "unknown option {key:?}"),
            OptionParseError::InvalidValue(key, value) => {
                write!(f, "invalid value {value:?} for option {key:?}")
            }
        }
    }
}

impl std::error::Error for OptionParseError {}

impl FromStr for OutputOptionsIncomplete {
    type Err = OptionParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut incomplete = Self::default();
        for pair in s.split(',').filter(|p| !p.is_empty()) {
            let (key, value) = pair
                .split_once('=')
                .ok_or_else(|| OptionParseError::InvalidValue(pair.into(), String::new()))?;
            match key {
                "use_tabs" => incomplete.use_tabs = Some(parse_bool(value)?),
                "unix_line_endings" => incomplete.unix_line_endings = Some(parse_bool(value)?),
                "indent_width" => {
                    incomplete.indent_width = Some(
                        value
                            .parse()
                            .map_err(|_| OptionParseError::InvalidValue(key.into(), value.into()))?,
                    );
                }
                other => return Err(OptionParseError::UnknownKey(other.into())),
            }
        }
        Ok(incomplete)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn update_overlays_only_present_fields() {
        let mut opts = OutputOptions::default();
        opts.update(OutputOptionsIncomplete {
            indent_width: Some(4),
            ..Default::default()
        });
        assert_eq!(opts.indent_width, 4);
        assert!(!opts.use_tabs);
    }

    #[test]
    fn parses_from_str() {
        let incomplete: OutputOptionsIncomplete = "use_tabs=true,indent_width=4".parse().unwrap();
        assert_eq!(incomplete.use_tabs, Some(true));
        assert_eq!(incomplete.indent_width, Some(4));
    }
}
