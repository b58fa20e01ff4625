use serde::{Deserialize, Serialize};

use super::error::InvalidField;
use super::ids::Id;

/// A logical price zone. Brazil's SIN has four: SE/CO, S, NE, N.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Submarket {
    pub id: Id,
    pub name: String,
    pub code: String,
    pub country: String,
}

impl Submarket {
    pub fn new(id: impl Into<String>, name: impl Into<String>, code: impl Into<String>, country: impl Into<String>) -> Result<Self, InvalidField> {
        let id = Id::new("Submarket", id)?;
        let code = code.into();
        if code.trim().is_empty() {
            return Err(InvalidField::new("Submarket", "code", &code, "code must not be empty"));
        }
        Ok(Self {
            id,
            name: name.into(),
            code,
            country: country.into(),
        })
    }
}
