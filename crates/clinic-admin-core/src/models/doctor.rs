//! Doctor models.

use serde::{Deserialize, Serialize};

/// A doctor registered at the clinic.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Doctor {
    /// Store-assigned identifier, never reused
    pub id: String,
    /// Clinic-assigned code (e.g., "DR001"), not enforced unique
    pub code: String,
    /// Display name
    pub name: String,
    /// Specialty (free text, usually one of the suggestion list)
    pub specialty: String,
    /// Contact email
    pub email: String,
    /// Contact phone
    pub phone: String,
}

/// Doctor fields supplied on registration (everything but the id).
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct NewDoctor {
    pub code: String,
    pub name: String,
    pub specialty: String,
    pub email: String,
    pub phone: String,
}

impl NewDoctor {
    /// Attach an identifier, producing the stored record.
    pub fn with_id(self, id: String) -> Doctor {
        Doctor {
            id,
            code: self.code,
            name: self.name,
            specialty: self.specialty,
            email: self.email,
            phone: self.phone,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_with_id_keeps_fields() {
        let new = NewDoctor {
            code: "DR010".into(),
            name: "Dr. Paula Reis".into(),
            specialty: "Tricologia".into(),
            email: "paula@clinica.com".into(),
            phone: "(11) 99999-0010".into(),
        };

        let doctor = new.clone().with_id("42".into());
        assert_eq!(doctor.id, "42");
        assert_eq!(doctor.code, new.code);
        assert_eq!(doctor.specialty, "Tricologia");
    }
}
