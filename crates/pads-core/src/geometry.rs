use crate::number::normalize;
use crate::position::{map, Orientation, PositionMode};
use crate::validate::PadConfig;

/// Shape of one pad and its hole circle, shared by every instance in a row.
///
/// Cap offsets are measured along the pad-frame `v` axis, which points from the near cap (the
/// one wrapping the hole when padding is zero) toward the far cap, so
/// `far_cap_offset_v - near_cap_offset_v == pad_maximum - pad_minimum` in every mode. The
/// difference is exact for whole-mil inputs; a fractional padding can leave it one rounding step
/// off, which [`normalize`] removes before anything leaves the core. Use
/// [`DerivedGeometry::near_cap_v`] and [`DerivedGeometry::far_cap_v`] for positions with the
/// side sign applied.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DerivedGeometry {
    pub position: PositionMode,
    /// Stroke of the hole circle, filling the ring between hole and pad edge.
    pub stroke_width: f64,
    /// Radius of the hole circle's stroke centre line.
    pub circle_radius: f64,
    /// Radius of the drilled hole, and of the cutout caps.
    pub hole_radius: f64,
    /// Radius of the outer caps.
    pub cap_radius: f64,
    /// Half width of the straight edges across the row direction.
    pub cap_half_span_u: f64,
    pub near_cap_offset_v: f64,
    pub far_cap_offset_v: f64,
}

/// Computes the pad shape for a validated configuration.
///
/// The hole circle always gets the largest stroke that fits, so the circle overlaps the pad
/// outline as much as possible; Fritzing decides connectivity from that overlap.
#[must_use]
pub fn resolve(config: &PadConfig) -> DerivedGeometry {
    let d = config.diameter();
    let w = config.pad_minimum();
    let l = config.pad_maximum();
    let stretch = l - w;
    let centered = stretch / 2.0;

    let near_cap_offset_v = if config.position().is_centered() {
        -centered
    } else {
        -config.padding().min(centered)
    };

    let geometry = DerivedGeometry {
        position: config.position(),
        stroke_width: (w - d) / 2.0,
        circle_radius: (w + d) / 4.0,
        hole_radius: d / 2.0,
        cap_radius: w / 2.0,
        cap_half_span_u: w / 2.0,
        near_cap_offset_v,
        far_cap_offset_v: near_cap_offset_v + stretch,
    };
    tracing::debug!(?geometry, "resolved pad geometry");
    geometry
}

impl DerivedGeometry {
    #[must_use]
    pub fn orientation(&self) -> Orientation {
        self.position.orientation()
    }

    /// Signed `v` position of the near cap centre relative to the hole centre.
    #[must_use]
    pub fn near_cap_v(&self) -> f64 {
        self.position.v_sign() * self.near_cap_offset_v
    }

    /// Signed `v` position of the far cap centre relative to the hole centre.
    #[must_use]
    pub fn far_cap_v(&self) -> f64 {
        self.position.v_sign() * self.far_cap_offset_v
    }

    /// Straight edge length between the two caps.
    #[must_use]
    pub fn straight_length(&self) -> f64 {
        self.far_cap_offset_v - self.near_cap_offset_v
    }

    /// Bounding box of one pad around a hole at `(0, 0)`, in output coordinates.
    #[must_use]
    pub fn pad_extent(&self) -> Extent {
        let (lo, hi) = ordered(self.near_cap_v(), self.far_cap_v());
        Extent::from_corners(
            map(
                -self.cap_half_span_u,
                lo - self.cap_radius,
                self.orientation(),
            ),
            map(self.cap_half_span_u, hi + self.cap_radius, self.orientation()),
        )
    }

    /// Copy with every length passed through [`normalize`], for serialization.
    #[must_use]
    pub fn normalized(&self) -> Self {
        Self {
            position: self.position,
            stroke_width: normalize(self.stroke_width),
            circle_radius: normalize(self.circle_radius),
            hole_radius: normalize(self.hole_radius),
            cap_radius: normalize(self.cap_radius),
            cap_half_span_u: normalize(self.cap_half_span_u),
            near_cap_offset_v: normalize(self.near_cap_offset_v),
            far_cap_offset_v: normalize(self.far_cap_offset_v),
        }
    }
}

fn ordered(a: f64, b: f64) -> (f64, f64) {
    if a <= b {
        (a, b)
    } else {
        (b, a)
    }
}

/// Axis aligned bounding box in output coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Extent {
    pub min_x: f64,
    pub min_y: f64,
    pub max_x: f64,
    pub max_y: f64,
}

impl Extent {
    #[must_use]
    pub fn from_corners(a: (f64, f64), b: (f64, f64)) -> Self {
        let (min_x, max_x) = ordered(a.0, b.0);
        let (min_y, max_y) = ordered(a.1, b.1);
        Self {
            min_x,
            min_y,
            max_x,
            max_y,
        }
    }

    #[must_use]
    pub fn translate(&self, dx: f64, dy: f64) -> Self {
        Self {
            min_x: self.min_x + dx,
            min_y: self.min_y + dy,
            max_x: self.max_x + dx,
            max_y: self.max_y + dy,
        }
    }

    #[must_use]
    pub fn union(&self, other: &Self) -> Self {
        Self {
            min_x: self.min_x.min(other.min_x),
            min_y: self.min_y.min(other.min_y),
            max_x: self.max_x.max(other.max_x),
            max_y: self.max_y.max(other.max_y),
        }
    }

    #[must_use]
    pub fn width(&self) -> f64 {
        normalize(self.max_x - self.min_x)
    }

    #[must_use]
    pub fn height(&self) -> f64 {
        normalize(self.max_y - self.min_y)
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;
    use pads_params::PadParams;

    use super::*;
    use crate::validate::{validate, ValidationOptions};

    fn config(p: PadParams) -> PadConfig {
        validate(&p, &ValidationOptions::default()).unwrap()
    }

    #[test]
    fn circle_radius_forms_agree() {
        let g = resolve(&config(PadParams::default()));
        let (d, w) = (38.0, 45.0);
        assert_eq!(g.stroke_width, 3.5);
        assert_eq!(g.circle_radius, 20.75);
        assert_abs_diff_eq!(w / 2.0 - g.stroke_width / 2.0, g.circle_radius);
        assert_abs_diff_eq!(d / 2.0 + g.stroke_width / 2.0, g.circle_radius);
        assert_abs_diff_eq!(g.hole_radius, g.circle_radius - g.stroke_width / 2.0);
    }

    #[test]
    fn cap_separation_survives_fractional_padding() {
        for padding in [7.0, 0.1, 7.3, 22.4999] {
            let g = resolve(&config(PadParams {
                position: "top".to_string(),
                padding,
                ..PadParams::default()
            }));
            assert_eq!(normalize(g.far_cap_offset_v - g.near_cap_offset_v), 45.0);
            let n = g.normalized();
            assert_eq!(normalize(n.far_cap_offset_v - n.near_cap_offset_v), 45.0);
        }

        let whole = resolve(&config(PadParams {
            position: "left".to_string(),
            padding: 7.0,
            ..PadParams::default()
        }));
        assert_eq!(whole.far_cap_offset_v - whole.near_cap_offset_v, 45.0);
    }

    #[test]
    fn wide_pad_scenario() {
        let g = resolve(&config(PadParams {
            diameter: 40.0,
            pad_minimum: 56.0,
            pad_maximum: 90.0,
            spacing: 100.0,
            keepout: 8.0,
            ..PadParams::default()
        }));
        assert_eq!(g.stroke_width, 8.0);
        assert_eq!(g.circle_radius, 24.0);
        assert_eq!(g.cap_radius, 28.0);
        assert_eq!(g.cap_half_span_u, 28.0);
        assert_eq!(g.near_cap_offset_v, -17.0);
        assert_eq!(g.far_cap_offset_v, 17.0);
    }

    #[test]
    fn offset_modes_wrap_the_hole_without_padding() {
        for position in ["top", "bottom", "left", "right"] {
            let g = resolve(&config(PadParams {
                position: position.to_string(),
                ..PadParams::default()
            }));
            assert_eq!(g.near_cap_offset_v, 0.0, "{position}");
            assert_eq!(g.far_cap_offset_v, 45.0, "{position}");
        }
    }

    #[test]
    fn side_sign_places_far_cap() {
        let top = resolve(&config(PadParams {
            position: "top".to_string(),
            padding: 5.0,
            ..PadParams::default()
        }));
        assert_eq!(top.near_cap_v(), 5.0);
        assert_eq!(top.far_cap_v(), -40.0);

        let right = resolve(&config(PadParams {
            position: "right".to_string(),
            padding: 5.0,
            ..PadParams::default()
        }));
        assert_eq!(right.near_cap_v(), -5.0);
        assert_eq!(right.far_cap_v(), 40.0);
    }

    #[test]
    fn pad_extent_covers_both_caps() {
        let g = resolve(&config(PadParams {
            position: "bottom".to_string(),
            ..PadParams::default()
        }));
        let e = g.pad_extent();
        assert_eq!((e.min_x, e.max_x), (-22.5, 22.5));
        assert_eq!((e.min_y, e.max_y), (-22.5, 67.5));
        assert_eq!(e.height(), 90.0);

        let g = resolve(&config(PadParams {
            position: "left".to_string(),
            ..PadParams::default()
        }));
        let e = g.pad_extent();
        assert_eq!((e.min_x, e.max_x), (-67.5, 22.5));
        assert_eq!((e.min_y, e.max_y), (-22.5, 22.5));
    }

    #[test]
    fn resolving_twice_is_bit_identical() {
        let c = config(PadParams {
            diameter: 37.3,
            pad_minimum: 51.7,
            pad_maximum: 93.1,
            position: "left".to_string(),
            padding: 3.3,
            ..PadParams::default()
        });
        let a = resolve(&c);
        let b = resolve(&c);
        assert_eq!(a.stroke_width.to_bits(), b.stroke_width.to_bits());
        assert_eq!(a.circle_radius.to_bits(), b.circle_radius.to_bits());
        assert_eq!(a.near_cap_offset_v.to_bits(), b.near_cap_offset_v.to_bits());
        assert_eq!(a.far_cap_offset_v.to_bits(), b.far_cap_offset_v.to_bits());
        assert_eq!(a, b);
    }
}
