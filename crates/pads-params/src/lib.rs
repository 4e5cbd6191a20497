//! Parameter snapshot for the pad generator: defaults, override layers and parameter files.
//!
//! Every source of parameter values (built-in defaults, `@file` parameter files, explicit
//! command-line flags) is turned into a [`ParamOverrides`] layer first. [`merge`] then folds the
//! layers over [`PadParams::default`] in order, later layers winning, so validation only ever sees
//! one complete snapshot.

mod error;
mod files;

use serde::{Deserialize, Serialize};

pub use error::ParamsError;
pub use files::{split_param_files, ParamFile, ParamFileContents, MAX_NESTING};

/// The merged, final set of pad parameters. All lengths are in mils.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PadParams {
    /// Drilled hole diameter.
    pub diameter: f64,
    /// Narrowest cross-section of the pad.
    pub pad_minimum: f64,
    /// Longest cross-section of the pad.
    pub pad_maximum: f64,
    /// Position mode name, one of `horizontal`, `vertical`, `top`, `bottom`, `left`, `right`.
    pub position: String,
    /// Extra offset of a non-centred pad back toward the centred layout.
    pub padding: f64,
    /// Centre to centre distance between neighbouring pads in a row.
    pub spacing: f64,
    /// Minimum copper to copper clearance between neighbouring pads.
    pub keepout: f64,
    /// Id of the first connector in the row.
    pub first_connector: i64,
    /// Number of pads in the row.
    pub row_pins: i64,
}

impl Default for PadParams {
    fn default() -> Self {
        Self {
            diameter: 38.0,
            pad_minimum: 45.0,
            pad_maximum: 90.0,
            position: "horizontal".to_string(),
            padding: 0.0,
            spacing: 100.0,
            keepout: 10.0,
            first_connector: 0,
            row_pins: 1,
        }
    }
}

impl PadParams {
    /// Overwrites every field that is present in `overrides`.
    pub fn apply(&mut self, overrides: &ParamOverrides) {
        fn set<T: Clone>(target: &mut T, value: &Option<T>) {
            if let Some(v) = value {
                *target = v.clone();
            }
        }

        set(&mut self.diameter, &overrides.diameter);
        set(&mut self.pad_minimum, &overrides.pad_minimum);
        set(&mut self.pad_maximum, &overrides.pad_maximum);
        set(&mut self.position, &overrides.position);
        set(&mut self.padding, &overrides.padding);
        set(&mut self.spacing, &overrides.spacing);
        set(&mut self.keepout, &overrides.keepout);
        set(&mut self.first_connector, &overrides.first_connector);
        set(&mut self.row_pins, &overrides.row_pins);
    }
}

/// One layer of parameter values. Absent fields leave earlier values untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ParamOverrides {
    pub diameter: Option<f64>,
    pub pad_minimum: Option<f64>,
    pub pad_maximum: Option<f64>,
    pub position: Option<String>,
    pub padding: Option<f64>,
    pub spacing: Option<f64>,
    pub keepout: Option<f64>,
    pub first_connector: Option<i64>,
    pub row_pins: Option<i64>,
}

impl ParamOverrides {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// Folds `layers` over the defaults in order; the last layer to set a field wins.
pub fn merge<'a>(layers: impl IntoIterator<Item = &'a ParamOverrides>) -> PadParams {
    let mut params = PadParams::default();
    for (index, layer) in layers.into_iter().enumerate() {
        tracing::trace!(layer = index, ?layer, "applying parameter layer");
        params.apply(layer);
    }
    params
}
