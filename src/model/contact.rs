use chrono::{DateTime, Utc};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;

use super::ids::{ContactId, MunicipalityId, ProfileId};

// Accepted formats: (DD) 99999-9999 or (DD) 3333-3333
static PHONE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\(\d{2}\) \d{4,5}-\d{4}$").unwrap());
static EMAIL_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").unwrap());
// CEP, with or without the dash
static POSTAL_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\d{5}-?\d{3}$").unwrap());
static CPF_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\d{3}\.\d{3}\.\d{3}-\d{2}$").unwrap());

pub fn valid_phone(s: &str) -> bool { PHONE_RE.is_match(s) }
pub fn valid_email(s: &str) -> bool { EMAIL_RE.is_match(s) }
pub fn valid_postal_code(s: &str) -> bool { POSTAL_RE.is_match(s) }
pub fn valid_cpf(s: &str) -> bool { CPF_RE.is_match(s) }

#[derive(Debug, Clone, Serialize)]
pub struct Address {
    pub id: ContactId,
    pub profile: ProfileId,
    /// At most one primary address per profile.
    pub is_primary: bool,
    pub street: String,
    pub number: String,
    pub district: String,
    pub complement: Option<String>,
    pub municipality: MunicipalityId,
    pub postal_code: String,
    pub created_at: DateTime<Utc>,
    pub modified_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize)]
pub struct Phone {
    pub id: ContactId,
    pub profile: ProfileId,
    pub number: String,
    pub created_at: DateTime<Utc>,
    pub modified_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ExtraEmail {
    pub id: ContactId,
    pub profile: ProfileId,
    pub email: String,
    pub created_at: DateTime<Utc>,
    pub modified_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn phone_formats() {
        assert!(valid_phone("(88) 88888-8888"));
        assert!(valid_phone("(11) 3333-3333"));
        assert!(!valid_phone("88888-8888"));
        assert!(!valid_phone("(8) 88888-8888"));
    }

    #[test]
    fn postal_code_formats() {
        assert!(valid_postal_code("60000-000"));
        assert!(valid_postal_code("60000000"));
        assert!(!valid_postal_code("600-00000"));
    }
}
