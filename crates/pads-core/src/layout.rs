use crate::geometry::{DerivedGeometry, Extent};
use crate::number::normalize;
use crate::outline::{outline, Outline};
use crate::position::map;
use crate::validate::PadConfig;

/// One hole/pad pair in a row. All instances share the same geometry, only translated.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ConnectorInstance<'a> {
    pub id: u64,
    /// Hole centre in output coordinates.
    pub origin_x: f64,
    pub origin_y: f64,
    pub geometry: &'a DerivedGeometry,
}

impl ConnectorInstance<'_> {
    /// Pad outline around this instance's hole.
    #[must_use]
    pub fn outline(&self) -> Outline {
        outline(self.geometry, (self.origin_x, self.origin_y))
    }

    /// Bounding box of this instance's pad.
    #[must_use]
    pub fn extent(&self) -> Extent {
        self.geometry
            .pad_extent()
            .translate(self.origin_x, self.origin_y)
    }
}

/// Places `row_pins` copies of `geometry` along the row axis, `spacing` apart, starting with the
/// first hole at the origin.
///
/// Pads can not overlap: validation already required room for the keepout between neighbours.
#[must_use]
pub fn layout<'a>(geometry: &'a DerivedGeometry, config: &PadConfig) -> Vec<ConnectorInstance<'a>> {
    let orientation = geometry.orientation();
    (0..config.row_pins())
        .map(|index| {
            let (x, y) = map(f64::from(index) * config.spacing(), 0.0, orientation);
            ConnectorInstance {
                id: u64::from(config.first_connector()) + u64::from(index),
                origin_x: normalize(x),
                origin_y: normalize(y),
                geometry,
            }
        })
        .collect()
}

/// Bounding box of a whole row, `None` when there are no instances.
#[must_use]
pub fn row_extent(instances: &[ConnectorInstance<'_>]) -> Option<Extent> {
    instances
        .iter()
        .map(ConnectorInstance::extent)
        .reduce(|a, b| a.union(&b))
}
