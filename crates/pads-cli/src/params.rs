use clap::{Args, Parser};
use pads_params::{ParamFile, ParamFileContents, ParamOverrides};

use crate::error::CliError;

/// Pad parameter flags, shared by the command line and argument files.
#[derive(Args, Debug, Clone, Default)]
pub struct ParamArgs {
    /// Connector hole diameter [default: 38]
    #[arg(short = 'd', long, value_name = "d", allow_negative_numbers = true)]
    pub diameter: Option<f64>,

    /// Narrowest dimension of a pad, must be larger than the diameter [default: 45]
    #[arg(short = 'w', long = "minimum", value_name = "w", allow_negative_numbers = true)]
    pub pad_minimum: Option<f64>,

    /// Longest dimension of a pad, must be larger than the minimum [default: 90]
    #[arg(short = 'l', long = "maximum", value_name = "l", allow_negative_numbers = true)]
    pub pad_maximum: Option<f64>,

    /// Position of the pad relative to the hole: top, bottom, left, right, horizontal or
    /// vertical [default: horizontal]
    #[arg(short = 'P', long, value_name = "pos")]
    pub position: Option<String>,

    /// For top, bottom, left and right: extra room to leave beyond that provided by the
    /// difference between diameter and width [default: 0]
    #[arg(short = 'p', long, value_name = "p", allow_negative_numbers = true)]
    pub padding: Option<f64>,

    /// Id of the first (lowest) connector pad to generate [default: 0]
    #[arg(short = 'f', long, value_name = "n", allow_negative_numbers = true)]
    pub first_connector: Option<i64>,

    /// Number of pins in a single row [default: 1]
    #[arg(short = 'r', long, value_name = "n", allow_negative_numbers = true)]
    pub row_pins: Option<i64>,

    /// Centre to centre distance between adjacent connector pads in a row [default: 100]
    #[arg(short = 's', long = "pad-spacing", value_name = "d", allow_negative_numbers = true)]
    pub spacing: Option<f64>,

    /// Minimum separation between neighbouring pads to satisfy design rules [default: 10]
    #[arg(short = 'k', long, value_name = "d", allow_negative_numbers = true)]
    pub keepout: Option<f64>,
}

impl ParamArgs {
    pub fn to_overrides(&self) -> ParamOverrides {
        ParamOverrides {
            diameter: self.diameter,
            pad_minimum: self.pad_minimum,
            pad_maximum: self.pad_maximum,
            position: self.position.clone(),
            padding: self.padding,
            spacing: self.spacing,
            keepout: self.keepout,
            first_connector: self.first_connector,
            row_pins: self.row_pins,
        }
    }
}

/// Flags accepted inside an argument file: parameters only.
#[derive(Parser, Debug)]
#[command(no_binary_name = true, args_override_self = true)]
struct ParamFileArgs {
    #[command(flatten)]
    params: ParamArgs,
}

/// Turns loaded parameter files into override layers, in reference order.
pub fn file_layers(files: &[ParamFile]) -> Result<Vec<ParamOverrides>, CliError> {
    files
        .iter()
        .map(|file| {
            let overrides = match &file.contents {
                ParamFileContents::Overrides(overrides) => overrides.clone(),
                ParamFileContents::Args(tokens) => ParamFileArgs::try_parse_from(tokens)
                    .map_err(|e| {
                        let text = e.to_string();
                        let first = text.lines().next().unwrap_or_default();
                        CliError::input(format!(
                            "parameter file {}: {}",
                            file.path.display(),
                            first.strip_prefix("error: ").unwrap_or(first)
                        ))
                    })?
                    .params
                    .to_overrides(),
            };
            tracing::debug!(path = %file.path.display(), ?overrides, "parameter file layer");
            Ok::<_, CliError>(overrides)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::*;

    fn args_file(tokens: &[&str]) -> ParamFile {
        ParamFile {
            path: PathBuf::from("test.args"),
            contents: ParamFileContents::Args(tokens.iter().map(|t| t.to_string()).collect()),
        }
    }

    #[test]
    fn argument_file_tokens_become_overrides() {
        let layers = file_layers(&[args_file(&["-d", "40", "--position=top", "-r", "3"])]).unwrap();
        assert_eq!(layers[0].diameter, Some(40.0));
        assert_eq!(layers[0].position.as_deref(), Some("top"));
        assert_eq!(layers[0].row_pins, Some(3));
        assert_eq!(layers[0].spacing, None);
    }

    #[test]
    fn repeated_flag_in_one_file_keeps_last() {
        let layers = file_layers(&[args_file(&["-d", "40", "-d", "42"])]).unwrap();
        assert_eq!(layers[0].diameter, Some(42.0));
    }

    #[test]
    fn negative_values_reach_the_validator() {
        let layers = file_layers(&[args_file(&["--padding", "-3", "-f", "-1"])]).unwrap();
        assert_eq!(layers[0].padding, Some(-3.0));
        assert_eq!(layers[0].first_connector, Some(-1));
    }

    #[test]
    fn unknown_flag_in_file_is_input_error() {
        let err = file_layers(&[args_file(&["--colour", "red"])]).unwrap_err();
        assert_eq!(err.code, crate::error::ErrorCode::Input);
        let text = err.to_string();
        assert!(text.starts_with("error: parameter file test.args: "), "{text}");
        assert!(text.contains("--colour"), "{text}");
        assert_eq!(text.lines().count(), 1);
    }
}
