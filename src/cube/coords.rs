// gridfill/src/cube/coords.rs

use derive_builder::Builder;
use std::fmt;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CoordAxis {
    X,
    Y,
    Z,
    T,
}

impl CoordAxis {
    /// Guesses the axis a coordinate describes from its name.
    pub fn guess(name: &str) -> Option<Self> {
        let name = name.to_lowercase();
        if name == "x" || name.contains("longitude") || name.contains("projection_x") {
            Some(CoordAxis::X)
        } else if name == "y" || name.contains("latitude") || name.contains("projection_y") {
            Some(CoordAxis::Y)
        } else if name == "z"
            || ["height", "depth", "altitude", "pressure", "level"]
                .iter()
                .any(|key| name.contains(key))
        {
            Some(CoordAxis::Z)
        } else if name == "t" || name.contains("time") {
            Some(CoordAxis::T)
        } else {
            None
        }
    }
}

impl fmt::Display for CoordAxis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            CoordAxis::X => "X",
            CoordAxis::Y => "Y",
            CoordAxis::Z => "Z",
            CoordAxis::T => "T",
        };
        write!(f, "{}", label)
    }
}

/// Coordinate describing one dimension of a [`super::Cube`].
#[derive(Builder, Clone, Debug, PartialEq)]
pub struct DimCoord {
    #[builder(setter(into))]
    name: String,
    /// Explicit axis; guessed from the name when unset.
    #[builder(setter(strip_option), default)]
    axis: Option<CoordAxis>,
    /// Whether the first and last points are adjacent (e.g. full longitude).
    #[builder(default)]
    circular: bool,
}

impl DimCoord {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn axis(&self) -> Option<CoordAxis> {
        self.axis.or_else(|| CoordAxis::guess(&self.name))
    }

    pub fn circular(&self) -> bool {
        self.circular
    }
}
