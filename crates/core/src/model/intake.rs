use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::model::RoleKey;

/// Details collected by the intake form before a quiz starts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Intake {
    full_name: String,
    email: String,
    role: String,
    difficulty: String,
}

impl Intake {
    /// Validate the form fields.
    ///
    /// Values are trimmed; every field is required.
    ///
    /// # Errors
    ///
    /// Returns `IntakeError::Missing` naming the first empty field.
    pub fn new(
        full_name: impl Into<String>,
        email: impl Into<String>,
        role: impl Into<String>,
        difficulty: impl Into<String>,
    ) -> Result<Self, IntakeError> {
        Ok(Self {
            full_name: required(full_name.into(), "full name")?,
            email: required(email.into(), "email")?,
            role: required(role.into(), "role")?,
            difficulty: required(difficulty.into(), "difficulty")?,
        })
    }

    #[must_use]
    pub fn full_name(&self) -> &str {
        &self.full_name
    }

    #[must_use]
    pub fn email(&self) -> &str {
        &self.email
    }

    /// Role as the user entered it.
    #[must_use]
    pub fn role(&self) -> &str {
        &self.role
    }

    #[must_use]
    pub fn role_key(&self) -> RoleKey {
        RoleKey::normalize(&self.role)
    }

    #[must_use]
    pub fn difficulty(&self) -> &str {
        &self.difficulty
    }
}

fn required(value: String, field: &'static str) -> Result<String, IntakeError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(IntakeError::Missing { field });
    }
    Ok(trimmed.to_string())
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum IntakeError {
    #[error("{field} is required")]
    Missing { field: &'static str },
}
