use std::fmt;
use std::str::FromStr;

/// Which output axis the row advances along.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Orientation {
    /// Row along `x`, caps along `y`.
    Horizontal,
    /// Row along `y`, caps along `x`.
    Vertical,
}

/// Which end of the hole a non-centred pad extends toward, in output coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Side {
    /// `top` or `left`: the pad grows toward negative `y`/`x`.
    Negative,
    /// `bottom` or `right`: the pad grows toward positive `y`/`x`.
    Positive,
}

impl Side {
    #[must_use]
    pub fn factor(self) -> f64 {
        match self {
            Side::Negative => -1.0,
            Side::Positive => 1.0,
        }
    }
}

/// Placement of the pad relative to its hole.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PositionMode {
    /// Pad centred over the hole (`horizontal`, `vertical`).
    Centered(Orientation),
    /// Pad wraps the hole with one cap and extends toward `side` (`top`, `bottom`, `left`,
    /// `right`).
    Offset { orientation: Orientation, side: Side },
}

impl PositionMode {
    pub const HORIZONTAL: Self = Self::Centered(Orientation::Horizontal);
    pub const VERTICAL: Self = Self::Centered(Orientation::Vertical);
    pub const TOP: Self = Self::Offset {
        orientation: Orientation::Horizontal,
        side: Side::Negative,
    };
    pub const BOTTOM: Self = Self::Offset {
        orientation: Orientation::Horizontal,
        side: Side::Positive,
    };
    pub const LEFT: Self = Self::Offset {
        orientation: Orientation::Vertical,
        side: Side::Negative,
    };
    pub const RIGHT: Self = Self::Offset {
        orientation: Orientation::Vertical,
        side: Side::Positive,
    };

    /// All modes, in the order they are listed to users.
    pub const ALL: [Self; 6] = [
        Self::TOP,
        Self::BOTTOM,
        Self::LEFT,
        Self::RIGHT,
        Self::HORIZONTAL,
        Self::VERTICAL,
    ];

    #[must_use]
    pub fn orientation(self) -> Orientation {
        match self {
            Self::Centered(orientation) | Self::Offset { orientation, .. } => orientation,
        }
    }

    /// Sign applied to pad-frame `v` offsets when placing caps; centred pads are symmetric.
    #[must_use]
    pub fn v_sign(self) -> f64 {
        match self {
            Self::Centered(_) => 1.0,
            Self::Offset { side, .. } => side.factor(),
        }
    }

    #[must_use]
    pub fn is_centered(self) -> bool {
        matches!(self, Self::Centered(_))
    }

    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Centered(Orientation::Horizontal) => "horizontal",
            Self::Centered(Orientation::Vertical) => "vertical",
            Self::Offset {
                orientation: Orientation::Horizontal,
                side: Side::Negative,
            } => "top",
            Self::Offset {
                orientation: Orientation::Horizontal,
                side: Side::Positive,
            } => "bottom",
            Self::Offset {
                orientation: Orientation::Vertical,
                side: Side::Negative,
            } => "left",
            Self::Offset {
                orientation: Orientation::Vertical,
                side: Side::Positive,
            } => "right",
        }
    }
}

impl fmt::Display for PositionMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown pad position \"{0}\" (expected one of top, bottom, left, right, horizontal, vertical)")]
pub struct UnknownPosition(pub String);

impl FromStr for PositionMode {
    type Err = UnknownPosition;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|mode| mode.name() == s)
            .ok_or_else(|| UnknownPosition(s.to_string()))
    }
}

/// Maps a pad-frame point onto output coordinates.
///
/// Horizontal rows keep `x = u, y = v`; vertical rows swap the two.
#[must_use]
pub fn map(u: f64, v: f64, orientation: Orientation) -> (f64, f64) {
    match orientation {
        Orientation::Horizontal => (u, v),
        Orientation::Vertical => (v, u),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_round_trip() {
        for mode in PositionMode::ALL {
            assert_eq!(mode.name().parse::<PositionMode>(), Ok(mode));
        }
    }

    #[test]
    fn unknown_name_is_rejected() {
        let err = "diagonal".parse::<PositionMode>().unwrap_err();
        assert_eq!(err, UnknownPosition("diagonal".to_string()));
        assert!("Top".parse::<PositionMode>().is_err());
    }

    #[test]
    fn families() {
        for mode in [PositionMode::HORIZONTAL, PositionMode::TOP, PositionMode::BOTTOM] {
            assert_eq!(mode.orientation(), Orientation::Horizontal);
        }
        for mode in [PositionMode::VERTICAL, PositionMode::LEFT, PositionMode::RIGHT] {
            assert_eq!(mode.orientation(), Orientation::Vertical);
        }
    }

    #[test]
    fn map_swaps_only_for_vertical() {
        assert_eq!(map(3.0, 7.0, Orientation::Horizontal), (3.0, 7.0));
        assert_eq!(map(3.0, 7.0, Orientation::Vertical), (7.0, 3.0));
    }

    #[test]
    fn side_signs() {
        assert_eq!(PositionMode::TOP.v_sign(), -1.0);
        assert_eq!(PositionMode::LEFT.v_sign(), -1.0);
        assert_eq!(PositionMode::BOTTOM.v_sign(), 1.0);
        assert_eq!(PositionMode::RIGHT.v_sign(), 1.0);
        assert_eq!(PositionMode::HORIZONTAL.v_sign(), 1.0);
    }
}
