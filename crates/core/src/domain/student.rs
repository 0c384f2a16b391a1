use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::errors::DomainError;

/// A student record with the derived fields the API always reports.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Student {
    pub name: String,
    pub subject_scores: BTreeMap<String, f64>,
    pub average: f64,
    pub grade: String,
}

impl Student {
    /// Build a record from raw inputs, deriving average and grade.
    pub fn from_scores(
        name: String,
        subject_scores: BTreeMap<String, f64>,
    ) -> Result<Self, DomainError> {
        validate_scores(&name, &subject_scores)?;
        let (average, grade) = average_and_grade(&subject_scores);
        Ok(Self { name, subject_scores, average, grade: grade.to_string() })
    }

    /// Case-insensitive store key.
    pub fn key(&self) -> String {
        self.name.to_lowercase()
    }
}

fn validate_scores(name: &str, scores: &BTreeMap<String, f64>) -> Result<(), DomainError> {
    if name.trim().is_empty() {
        return Err(DomainError::validation("student name must be non-empty"));
    }
    for (subject, score) in scores {
        if !score.is_finite() || !(0.0..=100.0).contains(score) {
            return Err(DomainError::validation(format!(
                "score for {subject} must be between 0 and 100"
            )));
        }
    }
    Ok(())
}

/// Mean of all scores rounded to 2 decimals, plus the banded letter grade.
/// An empty score map reports 0.0 and "N/A".
pub fn average_and_grade(scores: &BTreeMap<String, f64>) -> (f64, &'static str) {
    if scores.is_empty() {
        return (0.0, "N/A");
    }

    let average = scores.values().sum::<f64>() / scores.len() as f64;
    let rounded = (average * 100.0).round() / 100.0;
    let grade = match rounded {
        avg if avg >= 90.0 => "A",
        avg if avg >= 80.0 => "B",
        avg if avg >= 70.0 => "C",
        avg if avg >= 60.0 => "D",
        _ => "F",
    };
    (rounded, grade)
}
