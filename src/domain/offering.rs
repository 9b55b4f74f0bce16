use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::Entity;
use crate::utils::validation;

/// An offering record, keyed by a code of the form ABC1234.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Offering {
    pub code: String,
    pub title: String,
    pub credits: i64,
    pub instructor: String,
}

/// Partial update for an offering; the code is not patchable.
#[derive(Debug, Clone, Default)]
pub struct OfferingPatch {
    pub title: Option<String>,
    pub credits: Option<i64>,
    pub instructor: Option<String>,
}

/// Search criteria, all case-insensitive substring matches, ANDed.
#[derive(Debug, Clone, Default)]
pub struct OfferingQuery {
    pub code: Option<String>,
    pub title: Option<String>,
    pub instructor: Option<String>,
}

impl Offering {
    pub fn new(
        code: impl Into<String>,
        title: impl Into<String>,
        credits: i64,
        instructor: impl Into<String>,
    ) -> Self {
        Self {
            code: code.into(),
            title: title.into(),
            credits,
            instructor: instructor.into(),
        }
    }
}

impl Entity for Offering {
    type Patch = OfferingPatch;
    type Query = OfferingQuery;

    fn kind() -> &'static str {
        "offering"
    }

    fn key(&self) -> &str {
        &self.code
    }

    fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();

        if self.code.trim().is_empty() {
            errors.push("Offering code is required and cannot be empty".to_string());
        } else if !validation::is_valid_offering_code(&self.code) {
            errors.push(
                "Offering code must be three uppercase letters followed by four digits"
                    .to_string(),
            );
        }

        validation::require_non_blank(&mut errors, "Title", &self.title);
        validation::require_range(&mut errors, "Credits", self.credits, 1, 6);
        validation::require_non_blank(&mut errors, "Instructor", &self.instructor);

        errors
    }

    fn apply(&mut self, patch: OfferingPatch) {
        if let Some(title) = patch.title {
            self.title = title;
        }
        if let Some(credits) = patch.credits {
            self.credits = credits;
        }
        if let Some(instructor) = patch.instructor {
            self.instructor = instructor;
        }
    }

    fn matches(&self, query: &OfferingQuery) -> bool {
        let contains = |haystack: &str, needle: &str| {
            haystack.to_lowercase().contains(&needle.to_lowercase())
        };

        if let Some(code) = &query.code {
            if !contains(&self.code, code) {
                return false;
            }
        }
        if let Some(title) = &query.title {
            if !contains(&self.title, title) {
                return false;
            }
        }
        if let Some(instructor) = &query.instructor {
            if !contains(&self.instructor, instructor) {
                return false;
            }
        }
        true
    }
}

impl fmt::Display for Offering {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: {} ({} credits, {})",
            self.code, self.title, self.credits, self.instructor
        )
    }
}
