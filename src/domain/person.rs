use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::Entity;
use crate::utils::validation;

/// A person record, keyed by an externally-assigned identifier.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Person {
    pub id: String,
    pub name: String,
    pub email: String,
    pub program: String,
}

/// Partial update for a person; the id is not patchable.
#[derive(Debug, Clone, Default)]
pub struct PersonPatch {
    pub name: Option<String>,
    pub email: Option<String>,
    pub program: Option<String>,
}

/// Search criteria: name is a case-insensitive substring match, program is an
/// exact match. Criteria are ANDed; unset criteria match everything.
#[derive(Debug, Clone, Default)]
pub struct PersonQuery {
    pub name: Option<String>,
    pub program: Option<String>,
}

impl Person {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        email: impl Into<String>,
        program: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            email: email.into(),
            program: program.into(),
        }
    }
}

impl Entity for Person {
    type Patch = PersonPatch;
    type Query = PersonQuery;

    fn kind() -> &'static str {
        "person"
    }

    fn key(&self) -> &str {
        &self.id
    }

    fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();

        validation::require_non_blank(&mut errors, "Person ID", &self.id);
        validation::require_non_blank(&mut errors, "Name", &self.name);

        if self.email.trim().is_empty() {
            errors.push("Email is required and cannot be empty".to_string());
        } else if !validation::is_valid_email(&self.email) {
            errors.push("Email format is invalid".to_string());
        }

        validation::require_non_blank(&mut errors, "Program", &self.program);

        errors
    }

    fn apply(&mut self, patch: PersonPatch) {
        if let Some(name) = patch.name {
            self.name = name;
        }
        if let Some(email) = patch.email {
            self.email = email;
        }
        if let Some(program) = patch.program {
            self.program = program;
        }
    }

    fn matches(&self, query: &PersonQuery) -> bool {
        if let Some(name) = &query.name {
            if !self.name.to_lowercase().contains(&name.to_lowercase()) {
                return false;
            }
        }
        if let Some(program) = &query.program {
            if self.program != *program {
                return false;
            }
        }
        true
    }
}

impl fmt::Display for Person {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: {} <{}> [{}]",
            self.id, self.name, self.email, self.program
        )
    }
}
