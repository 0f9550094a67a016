//! Caster identity.

use std::fmt;

/// Identity of the entity that initiated a traversal.
///
/// UUID-equivalent 128-bit value passed in explicitly at discovery time and
/// carried through persistence; never looked up from ambient state. A
/// traversal with no caster carries `None` rather than a sentinel value.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CasterId(pub u128);

impl fmt::Display for CasterId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:032x}", self.0)
    }
}

impl From<u128> for CasterId {
    fn from(v: u128) -> Self {
        Self(v)
    }
}
