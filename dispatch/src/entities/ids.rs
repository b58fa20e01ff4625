use serde::{Deserialize, Serialize};
use std::fmt;

use super::error::InvalidField;

/// An opaque, non-empty, globally-unique-within-its-collection identifier.
///
/// Every entity kind (`Submarket`, `Bus`, `ThermalPlant`, ...) uses `Id` for its own identifier
/// and for any cross-reference to another entity kind. `Id` is cheap to clone (it wraps a
/// `String`) and orders lexically, which is what gives the `System` its stable, reproducible
/// sorted-id iteration order.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Id(String);

impl Id {
    pub fn new(entity: &'static str, value: impl Into<String>) -> Result<Self, InvalidField> {
        let value = value.into();
        if value.trim().is_empty() {
            return Err(InvalidField::new(entity, "id", "\"\"", "id must not be empty"));
        }
        Ok(Id(value))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Id {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for Id {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<Id> for String {
    fn from(id: Id) -> Self {
        id.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_empty_id() {
        assert!(Id::new("Bus", "").is_err());
        assert!(Id::new("Bus", "   ").is_err());
    }

    #[test]
    fn orders_lexically() {
        let a = Id::new("Bus", "A1").unwrap();
        let b = Id::new("Bus", "B1").unwrap();
        assert!(a < b);
    }
}
