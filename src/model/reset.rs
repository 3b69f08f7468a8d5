use chrono::{DateTime, Utc};
use serde::Serialize;

use super::ids::{AccountId, TokenId};

/// Opaque single-use password-reset token. Consuming it flips `active` off;
/// inactive tokens never validate again.
#[derive(Debug, Clone, Serialize)]
pub struct PasswordResetToken {
    pub id: TokenId,
    pub account: AccountId,
    pub token: String,
    pub active: bool,
    pub created_at: DateTime<Utc>,
}
