use crate::geometry::DerivedGeometry;
use crate::number::normalize;
use crate::position::{map, Orientation};

/// One segment of a closed contour, ending at `to`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Segment {
    Line {
        to: (f64, f64),
    },
    /// Half circle of `radius`; `sweep` is the SVG sweep flag in a y-down frame.
    Arc {
        radius: f64,
        sweep: bool,
        to: (f64, f64),
    },
}

impl Segment {
    #[must_use]
    pub fn end(&self) -> (f64, f64) {
        match *self {
            Segment::Line { to } | Segment::Arc { to, .. } => to,
        }
    }
}

/// A closed path: `start` followed by segments, the last of which returns to `start`.
#[derive(Debug, Clone, PartialEq)]
pub struct Contour {
    pub start: (f64, f64),
    pub segments: Vec<Segment>,
}

/// Copper outline of one pad: the oblong and the cutout exposing the hole.
#[derive(Debug, Clone, PartialEq)]
pub struct Outline {
    pub outer: Contour,
    pub cutout: Contour,
}

/// Builds the pad outline for a hole centred at `origin`.
///
/// Both contours share the cap centres; the outer caps have radius `pad_minimum / 2`, the
/// cutout caps have the hole radius, so the ring left around the hole is exactly one circle
/// stroke wide.
#[must_use]
pub fn outline(geometry: &DerivedGeometry, origin: (f64, f64)) -> Outline {
    Outline {
        outer: oblong(geometry, geometry.cap_radius, origin),
        cutout: oblong(geometry, geometry.hole_radius, origin),
    }
}

fn oblong(geometry: &DerivedGeometry, radius: f64, origin: (f64, f64)) -> Contour {
    let orientation = geometry.orientation();
    let (near, far) = (geometry.near_cap_v(), geometry.far_cap_v());
    let (lo, hi) = if near <= far { (near, far) } else { (far, near) };

    // Swapping x and y mirrors the path, which flips the arc direction.
    let sweep = orientation == Orientation::Vertical;
    let point = |u: f64, v: f64| {
        let (x, y) = map(u, v, orientation);
        (normalize(origin.0 + x), normalize(origin.1 + y))
    };

    Contour {
        start: point(-radius, lo),
        segments: vec![
            Segment::Line {
                to: point(-radius, hi),
            },
            Segment::Arc {
                radius: normalize(radius),
                sweep,
                to: point(radius, hi),
            },
            Segment::Line {
                to: point(radius, lo),
            },
            Segment::Arc {
                radius: normalize(radius),
                sweep,
                to: point(-radius, lo),
            },
        ],
    }
}
