use std::fmt;

/// A single field-level validation failure raised by an entity constructor.
///
/// Carries structured data (entity kind, field name, the offending value rendered as a string,
/// and the rule that was broken) rather than a pre-formatted message, so callers can match on it
/// instead of parsing text.
#[derive(Debug, Clone, PartialEq)]
pub struct InvalidField {
    pub entity: &'static str,
    pub field: &'static str,
    pub value: String,
    pub rule: String,
}

impl InvalidField {
    pub fn new(entity: &'static str, field: &'static str, value: impl fmt::Display, rule: impl Into<String>) -> Self {
        Self {
            entity,
            field,
            value: value.to_string(),
            rule: rule.into(),
        }
    }
}

impl fmt::Display for InvalidField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "invalid {}.{} = {}: {}",
            self.entity, self.field, self.value, self.rule
        )
    }
}

impl std::error::Error for InvalidField {}

/// Aggregate system-construction failure. A `System` is never partially built; every
/// cross-reference and invariant check from the container's build step funnels into this type.
#[derive(Debug, Clone, PartialEq)]
pub struct InvalidSystem {
    pub reason: String,
}

impl InvalidSystem {
    pub fn new(reason: impl Into<String>) -> Self {
        Self { reason: reason.into() }
    }
}

impl fmt::Display for InvalidSystem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid system: {}", self.reason)
    }
}

impl std::error::Error for InvalidSystem {}

impl From<InvalidField> for InvalidSystem {
    fn from(err: InvalidField) -> Self {
        InvalidSystem::new(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_field_display_carries_rule() {
        let err = InvalidField::new("ThermalPlant", "max_generation_MW", -5.0, "must be >= min_generation_MW");
        assert!(err.to_string().contains("max_generation_MW"));
        assert!(err.to_string().contains("must be >= min_generation_MW"));
    }
}
