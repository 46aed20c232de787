//! Patient models.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A patient record.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Patient {
    /// Store-assigned identifier, never reused
    pub id: String,
    pub name: String,
    pub email: String,
    pub phone: String,
    /// Date of birth
    pub birth_date: NaiveDate,
}

/// Patient fields supplied on registration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct NewPatient {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub birth_date: NaiveDate,
}

impl NewPatient {
    /// Attach an identifier, producing the stored record.
    pub fn with_id(self, id: String) -> Patient {
        Patient {
            id,
            name: self.name,
            email: self.email,
            phone: self.phone,
            birth_date: self.birth_date,
        }
    }
}

impl Patient {
    /// Age in whole years on the given day.
    pub fn age_on(&self, day: NaiveDate) -> u32 {
        day.years_since(self.birth_date).unwrap_or(0)
    }
}
