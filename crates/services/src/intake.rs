//! Contact-field extraction from plain-text resumes.

use std::path::Path;

use regex::Regex;
use tracing::{debug, info};

use interview_core::model::{Candidate, CandidateField};

use crate::error::IntakeError;

const PHONE_PATTERN: &str = r"\b(?:91)?[6-9]\d{9}\b";
const EMAIL_PATTERN: &str = r"\b[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}\b";

/// Extensions of binary document formats that are not ingested.
const BINARY_FORMATS: [&str; 3] = ["pdf", "docx", "doc"];

/// Compiled patterns for pulling a candidate out of resume text.
#[derive(Debug, Clone)]
pub struct ResumeParser {
    phone: Regex,
    email: Regex,
}

impl ResumeParser {
    /// # Errors
    ///
    /// Returns `IntakeError::Pattern` if a built-in pattern fails to compile.
    pub fn new() -> Result<Self, IntakeError> {
        Ok(Self {
            phone: Regex::new(PHONE_PATTERN)?,
            email: Regex::new(EMAIL_PATTERN)?,
        })
    }

    /// Scan `text` line by line for the first phone number and email.
    ///
    /// When no name is found but an email is, the name is guessed from the
    /// email's local part. Fields that cannot be found stay `None`.
    #[must_use]
    pub fn parse(&self, text: &str) -> Candidate {
        let mut phone = None;
        let mut email = None;

        for line in text.lines().map(str::trim).filter(|l| !l.is_empty()) {
            if phone.is_none() {
                phone = self.phone.find(line).map(|m| m.as_str().to_owned());
            }
            if email.is_none() {
                email = self.email.find(line).map(|m| m.as_str().to_owned());
            }
        }

        let name = email.as_deref().and_then(name_from_email);
        let candidate = Candidate { name, email, phone };
        debug!(
            missing = ?candidate.missing_fields(),
            "parsed resume text"
        );
        candidate
    }
}

/// `john.doe_92@x.com` → `john doe`. Blank results count as no name.
fn name_from_email(email: &str) -> Option<String> {
    let local = email.split('@').next().unwrap_or_default();
    let name: String = local
        .chars()
        .map(|c| {
            if c.is_ascii_digit() || matches!(c, '.' | '_' | '-') {
                ' '
            } else {
                c
            }
        })
        .collect();
    let name = name.trim();
    (!name.is_empty()).then(|| name.to_owned())
}

/// Read a plain-text resume and extract the candidate from it.
///
/// # Errors
///
/// Returns `IntakeError::UnsupportedFormat` for PDF/Word files,
/// `IntakeError::NotText` for non UTF-8 content and `IntakeError::Io` when the
/// file cannot be read.
pub async fn read_resume(path: impl AsRef<Path>) -> Result<Candidate, IntakeError> {
    let path = path.as_ref();
    if let Some(extension) = path.extension().and_then(|e| e.to_str()) {
        let extension = extension.to_ascii_lowercase();
        if BINARY_FORMATS.contains(&extension.as_str()) {
            return Err(IntakeError::UnsupportedFormat { extension });
        }
    }

    let bytes = tokio::fs::read(path).await?;
    let text = String::from_utf8(bytes).map_err(|_| IntakeError::NotText)?;
    let candidate = ResumeParser::new()?.parse(&text);

    let found: Vec<CandidateField> = CandidateField::REQUIRED
        .into_iter()
        .filter(|field| !candidate.is_missing(*field))
        .collect();
    info!(path = %path.display(), ?found, "resume ingested");
    Ok(candidate)
}
