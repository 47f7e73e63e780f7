//! Column type tags for schema validation.

use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Type tag carried by every column descriptor.
///
/// Checked at both `add_column` and `set` time so that a mistyped write is
/// caught at the storage boundary rather than corrupting the table. The
/// match is exact: there is no numeric promotion, because the renderer
/// decodes each column by its declared tag.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum ValueKind {
    /// 64-bit signed integer.
    Int,
    /// 64-bit floating point.
    Double,
    /// Boolean.
    Bool,
    /// Text string.
    Str,
    /// Three-component vector of doubles.
    Vec3,
}

impl ValueKind {
    /// Checks whether a value of kind `actual` may be stored in a column
    /// declared with this kind.
    #[must_use]
    pub fn accepts(self, actual: ValueKind) -> bool {
        self == actual
    }
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Int => write!(f, "int"),
            Self::Double => write!(f, "double"),
            Self::Bool => write!(f, "bool"),
            Self::Str => write!(f, "string"),
            Self::Vec3 => write!(f, "vec3"),
        }
    }
}
