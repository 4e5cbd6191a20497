use pads_core::{DerivedGeometry, PadConfig};
use pads_export::svg::{Drawing, SvgOptions};
use pads_params::PadParams;

/// Bit set given with `--debug`. Unknown bits are ignored.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DebugFlags(u32);

impl DebugFlags {
    pub const SHOW_PARAMS: u32 = 0x1;
    pub const SHOW_PAD: u32 = 0x2;
    pub const SHOW_DRAWING: u32 = 0x4;
    pub const SCALE_100_TIMES: u32 = 0x8;
    pub const SHOW_ALL_ERRORS: u32 = 0x1000;

    const REPORTS: u32 = Self::SHOW_PARAMS | Self::SHOW_PAD | Self::SHOW_DRAWING;

    pub fn new(bits: u32) -> Self {
        Self(bits)
    }

    pub fn contains(self, bit: u32) -> bool {
        self.0 & bit != 0
    }

    /// Whether any report needs info level output to be visible.
    pub fn wants_reports(self) -> bool {
        self.0 & Self::REPORTS != 0
    }
}

/// Accepts decimal or `0x` prefixed hexadecimal.
pub fn parse_bits(s: &str) -> Result<u32, String> {
    let parsed = match s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")) {
        Some(hex) => u32::from_str_radix(hex, 16),
        None => s.parse(),
    };
    parsed.map_err(|e| format!("invalid debug bits '{s}': {e}"))
}

pub fn report_params(params: &PadParams) {
    tracing::info!(
        diameter = params.diameter,
        pad_minimum = params.pad_minimum,
        pad_maximum = params.pad_maximum,
        position = %params.position,
        padding = params.padding,
        spacing = params.spacing,
        keepout = params.keepout,
        first_connector = params.first_connector,
        row_pins = params.row_pins,
        "parameters"
    );
}

pub fn report_pad(config: &PadConfig, geometry: &DerivedGeometry, options: &SvgOptions) {
    let g = geometry.normalized();
    tracing::info!(
        position = %g.position,
        first_connector = config.first_connector(),
        row_pins = config.row_pins(),
        spacing = config.spacing(),
        hole_radius = g.hole_radius,
        stroke_width = g.stroke_width,
        circle_radius = g.circle_radius,
        cap_radius = g.cap_radius,
        straight_length = g.straight_length(),
        near_cap = g.near_cap_v(),
        far_cap = g.far_cap_v(),
        prefix = %options.connector_prefix,
        suffix = %options.connector_suffix,
        "pad"
    );
}

pub fn report_drawing(drawing: &Drawing, options: &SvgOptions) {
    tracing::info!(
        width_in = drawing.unit_width,
        height_in = drawing.unit_height,
        view_width = drawing.px_width,
        view_height = drawing.px_height,
        translate_x = drawing.translate_x,
        translate_y = drawing.translate_y,
        units_per_inch = options.units_per_inch,
        "drawing"
    );
}
