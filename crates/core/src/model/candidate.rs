use serde::{Deserialize, Serialize};
use std::fmt;

/// Contact fields every candidate must provide before an assessment.
///
/// Declaration order is the order in which missing fields are asked for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CandidateField {
    Name,
    Email,
    Phone,
}

impl CandidateField {
    pub const REQUIRED: [CandidateField; 3] =
        [CandidateField::Name, CandidateField::Email, CandidateField::Phone];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            CandidateField::Name => "name",
            CandidateField::Email => "email",
            CandidateField::Phone => "phone",
        }
    }
}

impl fmt::Display for CandidateField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Contact details of the person taking the assessment.
///
/// Values are kept exactly as extracted or typed; display formatting happens
/// at the edges.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Candidate {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
}

impl Candidate {
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        email: impl Into<String>,
        phone: impl Into<String>,
    ) -> Self {
        Self {
            name: Some(name.into()),
            email: Some(email.into()),
            phone: Some(phone.into()),
        }
    }

    #[must_use]
    pub fn field(&self, field: CandidateField) -> Option<&str> {
        let value = match field {
            CandidateField::Name => &self.name,
            CandidateField::Email => &self.email,
            CandidateField::Phone => &self.phone,
        };
        value.as_deref()
    }

    pub fn set_field(&mut self, field: CandidateField, value: impl Into<String>) {
        let slot = match field {
            CandidateField::Name => &mut self.name,
            CandidateField::Email => &mut self.email,
            CandidateField::Phone => &mut self.phone,
        };
        *slot = Some(value.into());
    }

    /// A field is missing when absent or blank after trimming.
    #[must_use]
    pub fn is_missing(&self, field: CandidateField) -> bool {
        self.field(field).is_none_or(|v| v.trim().is_empty())
    }

    /// Missing required fields, in asking order.
    #[must_use]
    pub fn missing_fields(&self) -> Vec<CandidateField> {
        CandidateField::REQUIRED
            .into_iter()
            .filter(|field| self.is_missing(*field))
            .collect()
    }

    /// Trimmed, lowercased email used to match earlier attempts.
    #[must_use]
    pub fn email_key(&self) -> Option<String> {
        self.email
            .as_deref()
            .map(|e| e.trim().to_lowercase())
            .filter(|e| !e.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_values_count_as_missing() {
        let candidate = Candidate {
            name: Some("   ".into()),
            email: Some("a@b.com".into()),
            phone: None,
        };
        assert_eq!(
            candidate.missing_fields(),
            vec![CandidateField::Name, CandidateField::Phone]
        );
    }

    #[test]
    fn complete_candidate_has_no_missing_fields() {
        let candidate = Candidate::new("Ann", "ann@example.com", "9876543210");
        assert!(candidate.missing_fields().is_empty());
    }

    #[test]
    fn email_key_normalizes_case_and_whitespace() {
        let candidate = Candidate {
            email: Some("  Ann@Example.COM ".into()),
            ..Candidate::default()
        };
        assert_eq!(candidate.email_key().as_deref(), Some("ann@example.com"));
        assert_eq!(Candidate::default().email_key(), None);
    }

    #[test]
    fn set_field_overwrites_value() {
        let mut candidate = Candidate::default();
        candidate.set_field(CandidateField::Phone, "9123456789");
        assert_eq!(candidate.field(CandidateField::Phone), Some("9123456789"));
    }
}
