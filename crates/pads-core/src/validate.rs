//! Cross-field checks on a merged [`PadParams`] snapshot.
//!
//! Rules run in a fixed order so error lists are reproducible:
//!
//! 1. diameter is positive
//! 2. pad minimum is larger than the diameter
//! 3. pad maximum is larger than the pad minimum
//! 4. padding is not negative
//! 5. position names one of the six modes
//! 6. for offset modes, padding stays short of the centred offset `(max - min) / 2`
//! 7. row pins is between one and [`MAX_ROW_PINS`] and first connector is not negative
//! 8. spacing leaves the keepout on both sides of the gap between neighbouring pads
//!
//! A rule whose inputs already failed an earlier rule is skipped rather than reported twice, so a
//! non-finite value is reported once, by the first rule that compares it.

use std::fmt;
use std::ops::ControlFlow;

use pads_params::PadParams;

use crate::position::PositionMode;

/// Largest row the validator accepts; every pin becomes one outline in memory.
pub const MAX_ROW_PINS: u32 = 10_000;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ValidationMode {
    /// Stop at the first violation.
    #[default]
    FailFast,
    /// Report every violation that can be evaluated.
    CollectAll,
}

/// What to do with a padding that would reach the centred offset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PaddingPolicy {
    #[default]
    Reject,
    /// Clamp to the centred offset and log a warning.
    Clamp,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ValidationOptions {
    pub mode: ValidationMode,
    pub padding: PaddingPolicy,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Diameter, pad minimum, pad maximum or padding out of range.
    Range,
    /// Padding would reach or pass the centred offset.
    PaddingOverflow,
    /// Unrecognised position mode.
    UnknownPosition,
    /// Spacing, keepout and pad minimum leave no room between pads.
    Clearance,
    /// Row pins or first connector out of domain.
    Count,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    Diameter,
    PadMinimum,
    PadMaximum,
    Padding,
    Position,
    RowPins,
    FirstConnector,
    Spacing,
    Keepout,
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Field::Diameter => "diameter",
            Field::PadMinimum => "pad minimum",
            Field::PadMaximum => "pad maximum",
            Field::Padding => "padding",
            Field::Position => "position",
            Field::RowPins => "row pins",
            Field::FirstConnector => "first connector",
            Field::Spacing => "pad spacing",
            Field::Keepout => "keepout",
        })
    }
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("{message}")]
pub struct ValidationError {
    pub kind: ErrorKind,
    pub field: Field,
    pub message: String,
}

impl ValidationError {
    fn new(kind: ErrorKind, field: Field, message: String) -> Self {
        Self {
            kind,
            field,
            message,
        }
    }
}

/// The violations found by one validation run, in rule order. Never empty.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationErrors(Vec<ValidationError>);

impl ValidationErrors {
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ValidationError> {
        self.0.iter()
    }

    #[must_use]
    pub fn kinds(&self) -> Vec<ErrorKind> {
        self.0.iter().map(|e| e.kind).collect()
    }

    #[must_use]
    pub fn into_vec(self) -> Vec<ValidationError> {
        self.0
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, error) in self.0.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "{error}")?;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationErrors {}

impl<'a> IntoIterator for &'a ValidationErrors {
    type Item = &'a ValidationError;
    type IntoIter = std::slice::Iter<'a, ValidationError>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// A parameter set that passed every rule. Only [`validate`] constructs one.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PadConfig {
    diameter: f64,
    pad_minimum: f64,
    pad_maximum: f64,
    position: PositionMode,
    padding: f64,
    spacing: f64,
    keepout: f64,
    first_connector: u32,
    row_pins: u32,
}

impl PadConfig {
    #[must_use]
    pub fn diameter(&self) -> f64 {
        self.diameter
    }

    #[must_use]
    pub fn pad_minimum(&self) -> f64 {
        self.pad_minimum
    }

    #[must_use]
    pub fn pad_maximum(&self) -> f64 {
        self.pad_maximum
    }

    #[must_use]
    pub fn position(&self) -> PositionMode {
        self.position
    }

    /// Effective padding: zero for centred modes, possibly clamped for offset modes.
    #[must_use]
    pub fn padding(&self) -> f64 {
        self.padding
    }

    #[must_use]
    pub fn spacing(&self) -> f64 {
        self.spacing
    }

    #[must_use]
    pub fn keepout(&self) -> f64 {
        self.keepout
    }

    #[must_use]
    pub fn first_connector(&self) -> u32 {
        self.first_connector
    }

    #[must_use]
    pub fn row_pins(&self) -> u32 {
        self.row_pins
    }

    /// Largest offset of the near cap from the hole: the centred layout.
    #[must_use]
    pub fn centered_offset(&self) -> f64 {
        (self.pad_maximum - self.pad_minimum) / 2.0
    }
}

struct Collector {
    mode: ValidationMode,
    errors: Vec<ValidationError>,
}

impl Collector {
    fn report(&mut self, kind: ErrorKind, field: Field, message: String) -> ControlFlow<()> {
        tracing::debug!(?kind, %field, %message, "validation rule failed");
        self.errors.push(ValidationError::new(kind, field, message));
        match self.mode {
            ValidationMode::FailFast => ControlFlow::Break(()),
            ValidationMode::CollectAll => ControlFlow::Continue(()),
        }
    }
}

#[derive(Default)]
struct Checked {
    position: Option<PositionMode>,
    padding: f64,
    first_connector: Option<u32>,
    row_pins: Option<u32>,
}

/// Checks `params` against every rule and returns the typed configuration.
pub fn validate(
    params: &PadParams,
    options: &ValidationOptions,
) -> Result<PadConfig, ValidationErrors> {
    let mut collector = Collector {
        mode: options.mode,
        errors: Vec::new(),
    };

    let checked = match check_rules(params, options, &mut collector) {
        ControlFlow::Continue(checked) => checked,
        ControlFlow::Break(()) => return Err(ValidationErrors(collector.errors)),
    };

    match checked {
        Checked {
            position: Some(position),
            padding,
            first_connector: Some(first_connector),
            row_pins: Some(row_pins),
        } if collector.errors.is_empty() => Ok(PadConfig {
            diameter: params.diameter,
            pad_minimum: params.pad_minimum,
            pad_maximum: params.pad_maximum,
            position,
            padding,
            spacing: params.spacing,
            keepout: params.keepout,
            first_connector,
            row_pins,
        }),
        _ => Err(ValidationErrors(collector.errors)),
    }
}

fn check_rules(
    p: &PadParams,
    options: &ValidationOptions,
    out: &mut Collector,
) -> ControlFlow<(), Checked> {
    use ErrorKind::{Clearance, Count, PaddingOverflow, Range, UnknownPosition};

    let mut checked = Checked {
        padding: p.padding,
        ..Checked::default()
    };

    // 1
    let diameter_usable = p.diameter > 0.0 && p.diameter.is_finite();
    if !diameter_usable {
        out.report(
            Range,
            Field::Diameter,
            format!("hole diameter ({}) must be greater than 0", p.diameter),
        )?;
    }

    // 2
    let minimum_usable = p.pad_minimum > 0.0 && p.pad_minimum.is_finite();
    if diameter_usable && !(p.pad_minimum > p.diameter && p.pad_minimum.is_finite()) {
        out.report(
            Range,
            Field::PadMinimum,
            format!(
                "pad minimum ({}) must be larger than the hole diameter ({})",
                p.pad_minimum, p.diameter
            ),
        )?;
    }

    // 3
    let minimum_finite = p.pad_minimum.is_finite();
    let maximum_ok = minimum_finite && p.pad_maximum > p.pad_minimum && p.pad_maximum.is_finite();
    if minimum_finite && !maximum_ok {
        out.report(
            Range,
            Field::PadMaximum,
            format!(
                "pad maximum ({}) must be larger than the pad minimum ({})",
                p.pad_maximum, p.pad_minimum
            ),
        )?;
    }

    // 4
    let padding_ok = p.padding >= 0.0 && p.padding.is_finite();
    if !padding_ok {
        out.report(
            Range,
            Field::Padding,
            format!("hole padding ({}) can not be negative", p.padding),
        )?;
    }

    // 5
    match p.position.parse::<PositionMode>() {
        Ok(mode) => checked.position = Some(mode),
        Err(e) => out.report(UnknownPosition, Field::Position, e.to_string())?,
    }

    // 6
    match checked.position {
        Some(mode) if mode.is_centered() => {
            if p.padding != 0.0 {
                tracing::warn!(
                    padding = p.padding,
                    position = %mode,
                    "hole padding is ignored for a centred pad"
                );
            }
            checked.padding = 0.0;
        }
        Some(mode) if maximum_ok && minimum_usable && padding_ok => {
            let limit = (p.pad_maximum - p.pad_minimum) / 2.0;
            if p.padding >= limit {
                match options.padding {
                    PaddingPolicy::Reject => out.report(
                        PaddingOverflow,
                        Field::Padding,
                        format!(
                            "with the specified minimum ({}) and maximum ({}), the hole padding \
                             ({}) must be less than {limit}",
                            p.pad_minimum, p.pad_maximum, p.padding
                        ),
                    )?,
                    PaddingPolicy::Clamp => {
                        tracing::warn!(
                            padding = p.padding,
                            limit,
                            position = %mode,
                            "hole padding clamped to the centred offset"
                        );
                        checked.padding = limit;
                    }
                }
            }
        }
        _ => {}
    }

    // 7
    match u32::try_from(p.row_pins) {
        Ok(n) if (1..=MAX_ROW_PINS).contains(&n) => checked.row_pins = Some(n),
        _ => out.report(
            Count,
            Field::RowPins,
            format!(
                "row pins ({}) must be between 1 and {MAX_ROW_PINS}",
                p.row_pins
            ),
        )?,
    }
    match u32::try_from(p.first_connector) {
        Ok(n) => checked.first_connector = Some(n),
        Err(_) => out.report(
            Count,
            Field::FirstConnector,
            format!(
                "first connector ({}) must be between 0 and {}",
                p.first_connector,
                u32::MAX
            ),
        )?,
    }

    // 8
    if !(p.keepout >= 0.0 && p.keepout.is_finite()) {
        out.report(
            Clearance,
            Field::Keepout,
            format!("keepout ({}) can not be negative", p.keepout),
        )?;
    } else if minimum_usable {
        let required = p.pad_minimum + 2.0 * p.keepout;
        if !(p.spacing >= required && p.spacing.is_finite()) {
            out.report(
                Clearance,
                Field::Spacing,
                format!(
                    "pad spacing ({}) must be at least pad minimum ({}) plus twice the keepout \
                     ({}) to prevent design rules check conflicts",
                    p.spacing, p.pad_minimum, p.keepout
                ),
            )?;
        }
    }

    ControlFlow::Continue(checked)
}
