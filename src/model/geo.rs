use chrono::{DateTime, Utc};
use serde::Serialize;

use super::ids::{MunicipalityId, StateId};

/// Brazilian federal state. Read-only reference data.
#[derive(Debug, Clone, Serialize)]
pub struct FederalState {
    pub id: StateId,
    pub name: String,
    pub abbreviation: String,
    pub ibge_code: String,
    pub latitude: String,
    pub longitude: String,
    pub capital: Option<MunicipalityId>,
    pub created_at: DateTime<Utc>,
    pub modified_at: DateTime<Utc>,
}

/// Brazilian municipality. Read-only reference data.
#[derive(Debug, Clone, Serialize)]
pub struct Municipality {
    pub id: MunicipalityId,
    pub name: String,
    pub ibge_code: String,
    pub state: StateId,
    pub latitude: String,
    pub longitude: String,
    pub ddd: u16,
    pub timezone: String,
    pub siafi_code: String,
    pub created_at: DateTime<Utc>,
    pub modified_at: DateTime<Utc>,
}
