use crate::TextgridError;
use std::fmt;
use std::str::FromStr;

/// How partially overlapping intervals are treated when cropping.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CropMode {
    /// Drop entries that cross a crop boundary.
    Strict,
    /// Keep entries that cross a crop boundary whole.
    Lax,
    /// Clip entries that cross a crop boundary to the boundary.
    Truncated,
}

impl CropMode {
    pub const NAMES: &'static [&'static str] = &["strict", "lax", "truncated"];
}

impl FromStr for CropMode {
    type Err = TextgridError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "strict" => Ok(CropMode::Strict),
            "lax" => Ok(CropMode::Lax),
            "truncated" => Ok(CropMode::Truncated),
            _ => Err(TextgridError::InvalidArgument {
                value: s.to_string(),
                expected: Self::NAMES,
            }),
        }
    }
}

impl fmt::Display for CropMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CropMode::Strict => write!(f, "strict"),
            CropMode::Lax => write!(f, "lax"),
            CropMode::Truncated => write!(f, "truncated"),
        }
    }
}

/// Resolution applied when an inserted entry collides with existing ones.
/// Inserting without a policy turns a collision into an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollisionPolicy {
    Replace,
    Merge,
}

impl CollisionPolicy {
    pub const NAMES: &'static [&'static str] = &["replace", "merge"];
}

impl FromStr for CollisionPolicy {
    type Err = TextgridError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "replace" => Ok(CollisionPolicy::Replace),
            "merge" => Ok(CollisionPolicy::Merge),
            _ => Err(TextgridError::InvalidArgument {
                value: s.to_string(),
                expected: Self::NAMES,
            }),
        }
    }
}

/// What happens to an interval that straddles the point where space is inserted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InsertSpacePolicy {
    Stretch,
    Split,
    NoChange,
}

impl InsertSpacePolicy {
    pub const NAMES: &'static [&'static str] = &["stretch", "split", "no change"];
}

impl FromStr for InsertSpacePolicy {
    type Err = TextgridError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "stretch" => Ok(InsertSpacePolicy::Stretch),
            "split" => Ok(InsertSpacePolicy::Split),
            "no change" => Ok(InsertSpacePolicy::NoChange),
            _ => Err(TextgridError::InvalidArgument {
                value: s.to_string(),
                expected: Self::NAMES,
            }),
        }
    }
}

/// Label matching used by [`Tier::find`](crate::Tier::find).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FindMode {
    #[default]
    Exact,
    Substring,
    Regex,
}

impl FindMode {
    pub const NAMES: &'static [&'static str] = &["exact", "substr", "re"];
}

impl FromStr for FindMode {
    type Err = TextgridError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "exact" => Ok(FindMode::Exact),
            "substr" => Ok(FindMode::Substring),
            "re" => Ok(FindMode::Regex),
            _ => Err(TextgridError::InvalidArgument {
                value: s.to_string(),
                expected: Self::NAMES,
            }),
        }
    }
}
