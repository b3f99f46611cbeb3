use interview_core::model::{Candidate, CandidateField};

/// Trimmed, first letter upper-cased, the rest lower-cased.
#[must_use]
pub fn display_name(raw: &str) -> String {
    let trimmed = raw.trim();
    let mut chars = trimmed.chars();
    match chars.next() {
        Some(first) => {
            let rest = chars.as_str().to_lowercase();
            first.to_uppercase().chain(rest.chars()).collect()
        }
        None => String::new(),
    }
}

/// Bot line asking for a field the resume did not provide.
#[must_use]
pub fn field_prompt(field: CandidateField) -> &'static str {
    match field {
        CandidateField::Name => "I couldn't find your Name. Please enter it:",
        CandidateField::Email => "I couldn't find your Email. Please enter it:",
        CandidateField::Phone => "I couldn't find your Phone number. Please enter it:",
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CandidateVm {
    pub name: String,
    pub email: String,
    pub phone: String,
}

impl From<&Candidate> for CandidateVm {
    fn from(candidate: &Candidate) -> Self {
        Self {
            name: display_name(candidate.name.as_deref().unwrap_or_default()),
            email: candidate.email.clone().unwrap_or_default(),
            phone: candidate.phone.clone().unwrap_or_default(),
        }
    }
}
