use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::utils::validation;

/// Links a person to an offering, with an optional score. The (person,
/// offering) pair is kept unique by the link store, not enforced here.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LinkRecord {
    pub person_id: String,
    pub offering_code: String,
    pub score: Option<f64>,
    linked_at: DateTime<Utc>,
}

impl LinkRecord {
    /// Creates an unscored link stamped with the current time.
    pub fn new(person_id: impl Into<String>, offering_code: impl Into<String>) -> Self {
        Self {
            person_id: person_id.into(),
            offering_code: offering_code.into(),
            score: None,
            linked_at: Utc::now(),
        }
    }

    pub fn linked_at(&self) -> DateTime<Utc> {
        self.linked_at
    }

    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();

        validation::require_non_blank(&mut errors, "Person ID", &self.person_id);
        validation::require_non_blank(&mut errors, "Offering code", &self.offering_code);

        if let Some(score) = self.score {
            validation::require_range(&mut errors, "Score", score, 0.0, 100.0);
        }

        errors
    }

    /// Maps the numeric score onto letter bands; highest matching band wins.
    pub fn letter_grade(&self) -> &'static str {
        let score = match self.score {
            Some(score) => score,
            None => return "N/A",
        };

        if score >= 90.0 {
            "A+"
        } else if score >= 85.0 {
            "A"
        } else if score >= 80.0 {
            "B+"
        } else if score >= 75.0 {
            "B"
        } else if score >= 70.0 {
            "C+"
        } else if score >= 65.0 {
            "C"
        } else if score >= 60.0 {
            "D+"
        } else if score >= 55.0 {
            "D"
        } else {
            "F"
        }
    }
}

impl fmt::Display for LinkRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.score {
            Some(score) => write!(
                f,
                "{} -> {}: {} ({})",
                self.person_id,
                self.offering_code,
                score,
                self.letter_grade()
            ),
            None => write!(
                f,
                "{} -> {}: not scored",
                self.person_id, self.offering_code
            ),
        }
    }
}
