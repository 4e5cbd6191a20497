use pads_core::{row_extent, ConnectorInstance, Contour, DerivedGeometry, Segment};

#[derive(Debug, thiserror::Error)]
pub enum SvgError {
    #[error("SVG export requires at least one connector instance")]
    Empty,
    #[error("SVG export requires a positive drawing size (got {width} x {height})")]
    Degenerate { width: f64, height: f64 },
}

/// Colour Fritzing uses for copper in the PCB view.
const COPPER: &str = "rgb(255, 191, 0)";

/// Mils per inch.
pub const MIL_FACTOR: f64 = 1000.0;

#[derive(Debug, Clone, PartialEq)]
pub struct SvgOptions {
    pub connector_prefix: String,
    pub connector_suffix: String,
    /// Drawing units per inch; [`MIL_FACTOR`] gives true size.
    pub units_per_inch: f64,
}

impl Default for SvgOptions {
    fn default() -> Self {
        Self {
            connector_prefix: "connector".to_string(),
            connector_suffix: "pad".to_string(),
            units_per_inch: MIL_FACTOR,
        }
    }
}

impl SvgOptions {
    /// Draws everything 100 times larger, for inspecting small pads.
    #[must_use]
    pub fn scaled_100_times(mut self) -> Self {
        self.units_per_inch = MIL_FACTOR / 100.0;
        self
    }
}

/// Drawing level values derived from a row, reported by the CLI in debug mode.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Drawing {
    /// viewBox width in mils.
    pub px_width: f64,
    /// viewBox height in mils.
    pub px_height: f64,
    /// Document width in inches.
    pub unit_width: f64,
    /// Document height in inches.
    pub unit_height: f64,
    /// Added to every core coordinate so the row starts at the viewBox origin.
    pub translate_x: f64,
    pub translate_y: f64,
}

pub fn drawing(
    instances: &[ConnectorInstance<'_>],
    options: &SvgOptions,
) -> Result<Drawing, SvgError> {
    let extent = row_extent(instances).ok_or(SvgError::Empty)?;
    let (width, height) = (extent.width(), extent.height());
    if !(width > 0.0 && height > 0.0) {
        return Err(SvgError::Degenerate { width, height });
    }
    Ok(Drawing {
        px_width: width,
        px_height: height,
        unit_width: pads_core::normalize(width / options.units_per_inch),
        unit_height: pads_core::normalize(height / options.units_per_inch),
        translate_x: -extent.min_x,
        translate_y: -extent.min_y,
    })
}

/// Renders a Fritzing PCB view SVG with one hole circle and one pad path per instance.
pub fn render_svg(
    geometry: &DerivedGeometry,
    instances: &[ConnectorInstance<'_>],
    options: &SvgOptions,
) -> Result<String, SvgError> {
    let drawing = drawing(instances, options)?;
    let g = geometry.normalized();

    let mut out = String::new();
    out.push_str("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n");
    out.push_str(&format!(
        "<svg xmlns=\"http://www.w3.org/2000/svg\" version=\"1.2\" baseProfile=\"tiny\" width=\"{}in\" height=\"{}in\" viewBox=\"0 0 {} {}\">\n",
        fmt_num(drawing.unit_width),
        fmt_num(drawing.unit_height),
        fmt_num(drawing.px_width),
        fmt_num(drawing.px_height),
    ));
    out.push_str("  <g id=\"copper1\">\n");
    out.push_str("    <g id=\"copper0\">\n");

    for instance in instances {
        let origin = (
            instance.origin_x + drawing.translate_x,
            instance.origin_y + drawing.translate_y,
        );
        let name = format!("{}{}", options.connector_prefix, instance.id);

        out.push_str(&format!(
            "      <circle id=\"{name}pin\" cx=\"{}\" cy=\"{}\" r=\"{}\" fill=\"none\" stroke=\"{COPPER}\" stroke-width=\"{}\"/>\n",
            fmt_num(origin.0),
            fmt_num(origin.1),
            fmt_num(g.circle_radius),
            fmt_num(g.stroke_width),
        ));

        let outline = pads_core::outline(geometry, origin);
        let mut d = contour_path(&outline.outer);
        d.push(' ');
        d.push_str(&contour_path(&outline.cutout));
        out.push_str(&format!(
            "      <path id=\"{name}{}\" d=\"{d}\" fill=\"{COPPER}\" fill-rule=\"evenodd\" stroke=\"none\"/>\n",
            options.connector_suffix,
        ));
    }

    out.push_str("    </g>\n");
    out.push_str("  </g>\n");
    out.push_str("</svg>\n");
    Ok(out)
}

fn contour_path(contour: &Contour) -> String {
    let mut path = format!("M {} {}", fmt_num(contour.start.0), fmt_num(contour.start.1));
    for segment in &contour.segments {
        match *segment {
            Segment::Line { to } => {
                path.push_str(&format!(" L {} {}", fmt_num(to.0), fmt_num(to.1)));
            }
            Segment::Arc { radius, sweep, to } => {
                let r = fmt_num(radius);
                path.push_str(&format!(
                    " A {r} {r} 0 0 {} {} {}",
                    u8::from(sweep),
                    fmt_num(to.0),
                    fmt_num(to.1)
                ));
            }
        }
    }
    path.push_str(" Z");
    path
}

/// Shortest representation of `v`, without a trailing `.0` on integral values.
pub fn fmt_num(v: f64) -> String {
    let v = pads_core::normalize(v);
    let mut buf = ryu::Buffer::new();
    let s = buf.format(v);
    s.strip_suffix(".0").unwrap_or(s).to_string()
}
