use std::fmt;
use std::process::ExitCode;

use pads_core::ValidationErrors;
use pads_export::svg::SvgError;
use pads_params::ParamsError;

/// Process exit status for each way a run can fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    /// Bad flags or a missing output file name.
    Usage = 1,
    /// A parameter file could not be used or the merged parameters are invalid.
    Input = 2,
    /// Rendering or writing the SVG failed.
    Processing = 3,
}

impl From<ErrorCode> for ExitCode {
    fn from(code: ErrorCode) -> Self {
        ExitCode::from(code as u8)
    }
}

/// A failed run: the exit code plus the problems to print, one `error:` line each.
///
/// Usage errors carry no problems of their own; clap has already printed them.
#[derive(Debug)]
pub struct CliError {
    pub code: ErrorCode,
    problems: Vec<String>,
}

impl CliError {
    pub fn already_reported(code: ErrorCode) -> Self {
        Self {
            code,
            problems: Vec::new(),
        }
    }

    pub fn input(problem: impl Into<String>) -> Self {
        Self {
            code: ErrorCode::Input,
            problems: vec![problem.into()],
        }
    }

    pub fn processing(problem: impl Into<String>) -> Self {
        Self {
            code: ErrorCode::Processing,
            problems: vec![problem.into()],
        }
    }

    pub fn problems(&self) -> &[String] {
        &self.problems
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, problem) in self.problems.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "error: {problem}")?;
        }
        Ok(())
    }
}

impl From<ParamsError> for CliError {
    fn from(err: ParamsError) -> Self {
        Self::input(err.to_string())
    }
}

/// Every violation becomes its own line, so collect-all runs list them all.
impl From<ValidationErrors> for CliError {
    fn from(errors: ValidationErrors) -> Self {
        Self {
            code: ErrorCode::Input,
            problems: errors.iter().map(ToString::to_string).collect(),
        }
    }
}

impl From<SvgError> for CliError {
    fn from(err: SvgError) -> Self {
        Self::processing(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use pads_core::{validate, ValidationMode, ValidationOptions};
    use pads_params::PadParams;

    use super::*;

    #[test]
    fn each_violation_gets_its_own_line() {
        let params = PadParams {
            diameter: -1.0,
            row_pins: 0,
            keepout: -2.0,
            ..PadParams::default()
        };
        let options = ValidationOptions {
            mode: ValidationMode::CollectAll,
            ..ValidationOptions::default()
        };
        let err = CliError::from(validate(&params, &options).unwrap_err());
        assert_eq!(err.code, ErrorCode::Input);
        assert_eq!(err.problems().len(), 3);

        let text = err.to_string();
        let lines: Vec<_> = text.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines.iter().all(|l| l.starts_with("error: ")), "{text}");
        assert!(lines[0].contains("hole diameter (-1)"));
        assert!(lines[2].contains("keepout (-2)"));
    }

    #[test]
    fn already_reported_prints_nothing() {
        let err = CliError::already_reported(ErrorCode::Usage);
        assert!(err.problems().is_empty());
        assert_eq!(err.to_string(), "");
    }

    #[test]
    fn render_failures_are_processing_errors() {
        let err = CliError::from(SvgError::Empty);
        assert_eq!(err.code, ErrorCode::Processing);
        assert!(err.to_string().starts_with("error: SVG export"));
    }
}
