//! Output formatting for different formats.

use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Available output formats.
#[derive(Debug, Clone, Copy, Default, ValueEnum, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Pretty-printed tables with colors
    #[default]
    #[value(alias = "table")]
    #[serde(alias = "table")]
    Pretty,
    /// JSON output
    Json,
    /// YAML output
    #[value(alias = "yml")]
    #[serde(alias = "yml")]
    Yaml,
}

impl OutputFormat {
    /// Returns true for machine-readable formats
    pub const fn is_structured(self) -> bool {
        !matches!(self, Self::Pretty)
    }

    /// Print `value` as JSON or YAML. Does nothing for [`OutputFormat::Pretty`].
    pub fn print<T: Serialize>(self, value: &T) -> anyhow::Result<()> {
        match self {
            Self::Json => println!("{}", serde_json::to_string_pretty(value)?),
            Self::Yaml => print!("{}", serde_yaml::to_string(value)?),
            Self::Pretty => {}
        }
        Ok(())
    }
}

impl FromStr for OutputFormat {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        <Self as ValueEnum>::from_str(s, true).map_err(|_| {
            let valid: Vec<String> = Self::value_variants()
                .iter()
                .map(ToString::to_string)
                .collect();
            anyhow::anyhow!(
                "Unknown output format: {s}\nValid formats: {}",
                valid.join(", ")
            )
        })
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.to_possible_value()
            .map_or(Ok(()), |value| f.write_str(value.get_name()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_format() {
        assert_eq!("YML".parse::<OutputFormat>().unwrap(), OutputFormat::Yaml);
        assert_eq!("table".parse::<OutputFormat>().unwrap(), OutputFormat::Pretty);
        assert!("csv".parse::<OutputFormat>().is_err());
    }

    #[test]
    fn test_display_round_trips_through_parse() {
        for format in OutputFormat::value_variants() {
            assert_eq!(format.to_string().parse::<OutputFormat>().unwrap(), *format);
        }
        assert_eq!(OutputFormat::Yaml.to_string(), "yaml");

        let err = "csv".parse::<OutputFormat>().unwrap_err().to_string();
        assert!(err.ends_with("Valid formats: pretty, json, yaml"), "{err}");
    }
}
