//! First-run provisioning: a default administrator account and a small set
//! of Brazilian reference records. Mirrors the original deployment's
//! provisioning commands; bulk CSV import is intentionally not part of this
//! service.

use anyhow::Result;
use chrono::Utc;
use tracing::info;

use crate::identity::hash_password;
use crate::model::{
    Account, AccountId, FederalState, Municipality, MunicipalityId, StateId, ADMINISTRATORS,
};

use super::SharedRegistry;

pub const DEFAULT_ADMIN_EMAIL: &str = "admin@staffbase.local";

/// Create the bootstrap administrator unless an account with its email
/// already exists. The password comes from STAFFBASE_ADMIN_PASSWORD, with a
/// development fallback.
pub fn ensure_default_admin(reg: &SharedRegistry) -> Result<AccountId> {
    if let Some(existing) = reg.find_account_by_email(DEFAULT_ADMIN_EMAIL) {
        return Ok(existing.id);
    }
    let password =
        std::env::var("STAFFBASE_ADMIN_PASSWORD").unwrap_or_else(|_| "staffbase".to_string());
    let now = Utc::now();
    let account = Account {
        id: AccountId::generate(),
        email: DEFAULT_ADMIN_EMAIL.to_string(),
        password_hash: hash_password(&password)?,
        is_superuser: true,
        active: true,
        groups: vec![ADMINISTRATORS.to_string()],
        last_login: None,
        created_at: now,
        modified_at: now,
        modified_by: None,
    };
    let id = account.id;
    reg.insert_account(account)?;
    info!(email = DEFAULT_ADMIN_EMAIL, "default administrator created");
    Ok(id)
}

/// Seed a handful of states and their capitals so the reference endpoints
/// answer something useful on a fresh install.
pub fn seed_reference_data(reg: &SharedRegistry) -> Result<()> {
    if !reg.list_states().is_empty() {
        return Ok(());
    }
    let now = Utc::now();
    let states: &[(&str, &str, &str, &str, &str)] = &[
        ("Ceará", "CE", "23", "-5.20", "-39.53"),
        ("Pernambuco", "PE", "26", "-8.38", "-37.86"),
        ("São Paulo", "SP", "35", "-22.19", "-48.79"),
        ("Rio de Janeiro", "RJ", "33", "-22.25", "-42.66"),
    ];
    // (name, ibge, state abbr, lat, lon, ddd, tz, siafi)
    let municipalities: &[(&str, &str, &str, &str, &str, u16, &str, &str)] = &[
        ("Fortaleza", "2304400", "CE", "-3.71664", "-38.5423", 85, "America/Fortaleza", "1389"),
        ("Recife", "2611606", "PE", "-8.04666", "-34.8771", 81, "America/Recife", "2531"),
        ("São Paulo", "3550308", "SP", "-23.5329", "-46.6395", 11, "America/Sao_Paulo", "7107"),
        ("Rio de Janeiro", "3304557", "RJ", "-22.9129", "-43.2003", 21, "America/Sao_Paulo", "6001"),
    ];

    let mut ids: Vec<(String, StateId)> = Vec::new();
    for (name, abbr, ibge, lat, lon) in states {
        let state = FederalState {
            id: StateId::generate(),
            name: name.to_string(),
            abbreviation: abbr.to_string(),
            ibge_code: ibge.to_string(),
            latitude: lat.to_string(),
            longitude: lon.to_string(),
            capital: None,
            created_at: now,
            modified_at: now,
        };
        ids.push((abbr.to_string(), state.id));
        reg.insert_state(state)?;
    }
    for (name, ibge, abbr, lat, lon, ddd, tz, siafi) in municipalities {
        let state = ids
            .iter()
            .find(|(a, _)| a == abbr)
            .map(|(_, id)| *id)
            .ok_or_else(|| anyhow::anyhow!("no seed state with abbreviation {abbr}"))?;
        reg.insert_municipality(Municipality {
            id: MunicipalityId::generate(),
            name: name.to_string(),
            ibge_code: ibge.to_string(),
            state,
            latitude: lat.to_string(),
            longitude: lon.to_string(),
            ddd: *ddd,
            timezone: tz.to_string(),
            siafi_code: siafi.to_string(),
            created_at: now,
            modified_at: now,
        })?;
    }
    info!("reference data seeded");
    Ok(())
}
