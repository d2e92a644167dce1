// src/models/edit.rs
use std::fmt;
use std::str::FromStr;

/// A value typed into one form field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Edit {
    pub field: String,
    pub value: String,
}

impl Edit {
    #[must_use]
    pub fn new(field: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            value: value.into(),
        }
    }
}

impl FromStr for Edit {
    type Err = String;

    /// Parses `NAME=VALUE`. The value may be empty and may contain `=`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (field, value) = s
            .split_once('=')
            .ok_or_else(|| format!("expected NAME=VALUE, got `{s}`"))?;
        let field = field.trim();
        if field.is_empty() {
            return Err(format!("missing field name in `{s}`"));
        }
        Ok(Self::new(field, value.trim()))
    }
}

impl fmt::Display for Edit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}={}", self.field, self.value)
    }
}
