//! Validation and geometry resolution for stretched (oblong) through-hole pads.
//!
//! The pipeline is [`validate`] → [`resolve`] → [`layout`]. Geometry is computed in a pad frame
//! where `u` runs across the pad (along the row) and `v` runs from cap to cap; [`map`] is the only
//! place that knows how that frame lands on output `x`/`y`.

pub mod geometry;
pub mod layout;
pub mod number;
pub mod outline;
pub mod position;
pub mod validate;

pub use geometry::{resolve, DerivedGeometry, Extent};
pub use layout::{layout, row_extent, ConnectorInstance};
pub use number::normalize;
pub use outline::{outline, Contour, Outline, Segment};
pub use position::{map, Orientation, PositionMode, Side, UnknownPosition};
pub use validate::{
    validate, ErrorKind, Field, PadConfig, PaddingPolicy, ValidationError, ValidationErrors,
    ValidationMode, ValidationOptions, MAX_ROW_PINS,
};
