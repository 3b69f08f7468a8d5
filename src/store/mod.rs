//! In-process entity registry. One `RwLock` over typed maps; list and
//! detail reads apply the caller's `ScopeFilter` inside a single read guard,
//! and every mutation runs its full check-then-write sequence under one
//! write guard. Data invariants (unique email, one primary address per
//! profile, unique role name/grade, department director rules and an acyclic
//! parent chain) are enforced here; who may call what is decided in `policy`
//! and the services.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::Utc;
use parking_lot::RwLock;
use thiserror::Error;
use tracing::debug;

use crate::error::AppError;
use crate::model::{
    Account, AccountId, Address, ContactId, Department, DepartmentId, ExtraEmail, FederalState,
    JobRole, Municipality, MunicipalityId, PasswordResetToken, Phone, Profile, ProfileId, RoleId,
    StateId, TokenId,
};
use crate::policy::ScopeFilter;

pub mod seed;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("{0} not found")]
    NotFound(&'static str),
    #[error("{0}")]
    Duplicate(String),
    #[error("{0}")]
    MissingReference(String),
    #[error("{0}")]
    Constraint(String),
}

impl From<StoreError> for AppError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound(what) => {
                AppError::not_found("not_found".into(), format!("{what} not found"))
            }
            StoreError::Duplicate(msg) => AppError::conflict("duplicate".into(), msg),
            StoreError::MissingReference(msg) => AppError::user("unknown_reference".into(), msg),
            StoreError::Constraint(msg) => AppError::user("constraint_violation".into(), msg),
        }
    }
}

#[derive(Default)]
struct Registry {
    accounts: HashMap<AccountId, Account>,
    profiles: HashMap<ProfileId, Profile>,
    addresses: HashMap<ContactId, Address>,
    phones: HashMap<ContactId, Phone>,
    extra_emails: HashMap<ContactId, ExtraEmail>,
    job_roles: HashMap<RoleId, JobRole>,
    departments: HashMap<DepartmentId, Department>,
    states: HashMap<StateId, FederalState>,
    municipalities: HashMap<MunicipalityId, Municipality>,
    reset_tokens: HashMap<TokenId, PasswordResetToken>,
}

impl Registry {
    fn email_taken(&self, email: &str, except: Option<AccountId>) -> bool {
        self.accounts
            .values()
            .any(|a| Some(a.id) != except && a.email.eq_ignore_ascii_case(email))
    }

    fn profile_owner(&self, profile: ProfileId) -> Option<AccountId> {
        self.profiles.get(&profile).map(|p| p.account)
    }

    fn profile_in_scope(&self, p: &Profile, filter: ScopeFilter) -> bool {
        match filter {
            ScopeFilter::All => true,
            ScopeFilter::OwnedBy(pid) => p.id == pid,
            ScopeFilter::Nothing => false,
        }
    }

    fn contact_in_scope(owner: ProfileId, filter: ScopeFilter) -> bool {
        match filter {
            ScopeFilter::All => true,
            ScopeFilter::OwnedBy(pid) => owner == pid,
            ScopeFilter::Nothing => false,
        }
    }

    fn role_in_scope(&self, r: &JobRole, filter: ScopeFilter) -> bool {
        match filter {
            ScopeFilter::All => true,
            // Held-and-active: an inactive role drops out of a collaborator's
            // view even while the link is still recorded on the profile.
            ScopeFilter::OwnedBy(pid) => {
                r.active && self.profiles.get(&pid).map(|p| p.holds_role(r.id)).unwrap_or(false)
            }
            ScopeFilter::Nothing => false,
        }
    }

    fn department_in_scope(&self, d: &Department, filter: ScopeFilter) -> bool {
        match filter {
            ScopeFilter::All => true,
            ScopeFilter::OwnedBy(pid) => {
                d.active
                    && self.profiles.get(&pid).map(|p| p.in_department(d.id)).unwrap_or(false)
            }
            ScopeFilter::Nothing => false,
        }
    }

    fn validate_profile_refs(&self, p: &Profile) -> Result<(), StoreError> {
        if !self.accounts.contains_key(&p.account) {
            return Err(StoreError::MissingReference("unknown account".into()));
        }
        for r in &p.roles {
            if !self.job_roles.contains_key(r) {
                return Err(StoreError::MissingReference("unknown job role".into()));
            }
        }
        for d in &p.departments {
            if !self.departments.contains_key(d) {
                return Err(StoreError::MissingReference("unknown department".into()));
            }
        }
        for m in &p.workplace_municipalities {
            if !self.municipalities.contains_key(m) {
                return Err(StoreError::MissingReference("unknown municipality".into()));
            }
        }
        Ok(())
    }

    fn validate_job_role(&self, r: &JobRole) -> Result<(), StoreError> {
        if r.name.trim().is_empty() {
            return Err(StoreError::Constraint("role name must not be empty".into()));
        }
        if r.salary <= 0.0 {
            return Err(StoreError::Constraint("salary must be positive".into()));
        }
        let taken = self.job_roles.values().any(|other| {
            other.id != r.id
                && other.name.eq_ignore_ascii_case(&r.name)
                && other.grade.eq_ignore_ascii_case(&r.grade)
        });
        if taken {
            return Err(StoreError::Duplicate(format!(
                "job role '{}' grade '{}' already exists",
                r.name, r.grade
            )));
        }
        Ok(())
    }

    fn validate_department(&self, d: &Department) -> Result<(), StoreError> {
        if d.name.trim().is_empty() {
            return Err(StoreError::Constraint("department name must not be empty".into()));
        }
        if !self.profiles.contains_key(&d.director) {
            return Err(StoreError::MissingReference("unknown director profile".into()));
        }
        if let Some(deputy) = d.deputy_director {
            if deputy == d.director {
                return Err(StoreError::Constraint(
                    "deputy director must differ from director".into(),
                ));
            }
            if !self.profiles.contains_key(&deputy) {
                return Err(StoreError::MissingReference("unknown deputy director profile".into()));
            }
        }
        if let Some(parent) = d.parent {
            if parent == d.id {
                return Err(StoreError::Constraint("department cannot be its own parent".into()));
            }
            if !self.departments.contains_key(&parent) {
                return Err(StoreError::MissingReference("unknown parent department".into()));
            }
            // Walk the whole ancestor chain so A->B->A cannot be formed either.
            let mut cursor = Some(parent);
            let mut hops = 0usize;
            while let Some(cur) = cursor {
                if cur == d.id || hops > self.departments.len() {
                    return Err(StoreError::Constraint(
                        "department parent chain must stay acyclic".into(),
                    ));
                }
                cursor = self.departments.get(&cur).and_then(|p| p.parent);
                hops += 1;
            }
        }
        Ok(())
    }
}

/// Thread-safe handle to the registry, cloned into every handler.
#[derive(Clone)]
pub struct SharedRegistry(Arc<RwLock<Registry>>);

impl Default for SharedRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl SharedRegistry {
    pub fn new() -> Self {
        SharedRegistry(Arc::new(RwLock::new(Registry::default())))
    }

    // ----- accounts -----

    pub fn insert_account(&self, account: Account) -> Result<(), StoreError> {
        let mut reg = self.0.write();
        if reg.email_taken(&account.email, None) {
            return Err(StoreError::Duplicate(format!("email '{}' already in use", account.email)));
        }
        debug!(email = %account.email, "account created");
        reg.accounts.insert(account.id, account);
        Ok(())
    }

    pub fn get_account(&self, id: AccountId) -> Option<Account> {
        self.0.read().accounts.get(&id).cloned()
    }

    pub fn find_account_by_email(&self, email: &str) -> Option<Account> {
        self.0
            .read()
            .accounts
            .values()
            .find(|a| a.email.eq_ignore_ascii_case(email))
            .cloned()
    }

    pub fn list_accounts(&self) -> Vec<Account> {
        let reg = self.0.read();
        let mut out: Vec<Account> = reg.accounts.values().cloned().collect();
        out.sort_by_key(|a| (a.created_at, a.id));
        out
    }

    pub fn set_account_email(
        &self,
        id: AccountId,
        email: String,
        actor: AccountId,
    ) -> Result<Account, StoreError> {
        let mut reg = self.0.write();
        if reg.email_taken(&email, Some(id)) {
            return Err(StoreError::Duplicate(format!("email '{email}' already in use")));
        }
        let account = reg.accounts.get_mut(&id).ok_or(StoreError::NotFound("account"))?;
        account.email = email;
        account.modified_at = Utc::now();
        account.modified_by = Some(actor);
        Ok(account.clone())
    }

    pub fn set_account_password(
        &self,
        id: AccountId,
        password_hash: String,
        actor: AccountId,
    ) -> Result<(), StoreError> {
        let mut reg = self.0.write();
        let account = reg.accounts.get_mut(&id).ok_or(StoreError::NotFound("account"))?;
        account.password_hash = password_hash;
        account.modified_at = Utc::now();
        account.modified_by = Some(actor);
        Ok(())
    }

    pub fn set_account_groups(
        &self,
        id: AccountId,
        groups: Vec<String>,
        actor: AccountId,
    ) -> Result<Account, StoreError> {
        let mut reg = self.0.write();
        let account = reg.accounts.get_mut(&id).ok_or(StoreError::NotFound("account"))?;
        account.groups = groups;
        account.modified_at = Utc::now();
        account.modified_by = Some(actor);
        Ok(account.clone())
    }

    /// Idempotent: re-applying the current state is a plain no-op write.
    pub fn set_account_active(
        &self,
        id: AccountId,
        active: bool,
        actor: AccountId,
    ) -> Result<Account, StoreError> {
        let mut reg = self.0.write();
        let account = reg.accounts.get_mut(&id).ok_or(StoreError::NotFound("account"))?;
        account.active = active;
        account.modified_at = Utc::now();
        account.modified_by = Some(actor);
        Ok(account.clone())
    }

    pub fn touch_last_login(&self, id: AccountId) {
        if let Some(account) = self.0.write().accounts.get_mut(&id) {
            account.last_login = Some(Utc::now());
        }
    }

    // ----- profiles -----

    pub fn insert_profile(&self, profile: Profile) -> Result<(), StoreError> {
        let mut reg = self.0.write();
        reg.validate_profile_refs(&profile)?;
        let exists = reg.profiles.values().any(|p| p.account == profile.account);
        if exists {
            return Err(StoreError::Duplicate("account already has a profile".into()));
        }
        reg.profiles.insert(profile.id, profile);
        Ok(())
    }

    pub fn get_profile(&self, id: ProfileId, filter: ScopeFilter) -> Option<Profile> {
        let reg = self.0.read();
        reg.profiles.get(&id).filter(|p| reg.profile_in_scope(p, filter)).cloned()
    }

    pub fn list_profiles(&self, filter: ScopeFilter) -> Vec<Profile> {
        let reg = self.0.read();
        let mut out: Vec<Profile> = reg
            .profiles
            .values()
            .filter(|p| reg.profile_in_scope(p, filter))
            .cloned()
            .collect();
        out.sort_by_key(|p| (p.created_at, p.id));
        out
    }

    pub fn find_profile_by_account(&self, account: AccountId) -> Option<ProfileId> {
        self.0
            .read()
            .profiles
            .values()
            .find(|p| p.account == account)
            .map(|p| p.id)
    }

    pub fn update_profile(
        &self,
        id: ProfileId,
        actor: AccountId,
        apply: impl FnOnce(&mut Profile),
    ) -> Result<Profile, StoreError> {
        let mut reg = self.0.write();
        let mut updated = reg.profiles.get(&id).ok_or(StoreError::NotFound("profile"))?.clone();
        apply(&mut updated);
        updated.id = id;
        reg.validate_profile_refs(&updated)?;
        updated.modified_at = Utc::now();
        updated.modified_by = actor;
        reg.profiles.insert(id, updated.clone());
        Ok(updated)
    }

    // ----- contact records -----

    pub fn insert_address(&self, address: Address) -> Result<(), StoreError> {
        let mut reg = self.0.write();
        if reg.profile_owner(address.profile).is_none() {
            return Err(StoreError::MissingReference("unknown profile".into()));
        }
        if !reg.municipalities.contains_key(&address.municipality) {
            return Err(StoreError::MissingReference("unknown municipality".into()));
        }
        // At most one primary address per profile; checked and written under
        // the same guard.
        if address.is_primary {
            let clash = reg
                .addresses
                .values()
                .any(|a| a.profile == address.profile && a.is_primary);
            if clash {
                return Err(StoreError::Duplicate(
                    "profile already has a primary address".into(),
                ));
            }
        }
        reg.addresses.insert(address.id, address);
        Ok(())
    }

    pub fn get_address(&self, id: ContactId, filter: ScopeFilter) -> Option<(Address, AccountId)> {
        let reg = self.0.read();
        let a = reg.addresses.get(&id)?;
        if !Registry::contact_in_scope(a.profile, filter) {
            return None;
        }
        let owner = reg.profile_owner(a.profile)?;
        Some((a.clone(), owner))
    }

    pub fn list_addresses(&self, filter: ScopeFilter) -> Vec<Address> {
        let reg = self.0.read();
        let mut out: Vec<Address> = reg
            .addresses
            .values()
            .filter(|a| Registry::contact_in_scope(a.profile, filter))
            .cloned()
            .collect();
        out.sort_by_key(|a| (a.created_at, a.id));
        out
    }

    pub fn remove_address(&self, id: ContactId) -> Option<Address> {
        self.0.write().addresses.remove(&id)
    }

    pub fn insert_phone(&self, phone: Phone) -> Result<(), StoreError> {
        let mut reg = self.0.write();
        if reg.profile_owner(phone.profile).is_none() {
            return Err(StoreError::MissingReference("unknown profile".into()));
        }
        reg.phones.insert(phone.id, phone);
        Ok(())
    }

    pub fn get_phone(&self, id: ContactId, filter: ScopeFilter) -> Option<(Phone, AccountId)> {
        let reg = self.0.read();
        let p = reg.phones.get(&id)?;
        if !Registry::contact_in_scope(p.profile, filter) {
            return None;
        }
        let owner = reg.profile_owner(p.profile)?;
        Some((p.clone(), owner))
    }

    pub fn list_phones(&self, filter: ScopeFilter) -> Vec<Phone> {
        let reg = self.0.read();
        let mut out: Vec<Phone> = reg
            .phones
            .values()
            .filter(|p| Registry::contact_in_scope(p.profile, filter))
            .cloned()
            .collect();
        out.sort_by_key(|p| (p.created_at, p.id));
        out
    }

    pub fn remove_phone(&self, id: ContactId) -> Option<Phone> {
        self.0.write().phones.remove(&id)
    }

    pub fn insert_extra_email(&self, email: ExtraEmail) -> Result<(), StoreError> {
        let mut reg = self.0.write();
        if reg.profile_owner(email.profile).is_none() {
            return Err(StoreError::MissingReference("unknown profile".into()));
        }
        reg.extra_emails.insert(email.id, email);
        Ok(())
    }

    pub fn get_extra_email(
        &self,
        id: ContactId,
        filter: ScopeFilter,
    ) -> Option<(ExtraEmail, AccountId)> {
        let reg = self.0.read();
        let e = reg.extra_emails.get(&id)?;
        if !Registry::contact_in_scope(e.profile, filter) {
            return None;
        }
        let owner = reg.profile_owner(e.profile)?;
        Some((e.clone(), owner))
    }

    pub fn list_extra_emails(&self, filter: ScopeFilter) -> Vec<ExtraEmail> {
        let reg = self.0.read();
        let mut out: Vec<ExtraEmail> = reg
            .extra_emails
            .values()
            .filter(|e| Registry::contact_in_scope(e.profile, filter))
            .cloned()
            .collect();
        out.sort_by_key(|e| (e.created_at, e.id));
        out
    }

    pub fn remove_extra_email(&self, id: ContactId) -> Option<ExtraEmail> {
        self.0.write().extra_emails.remove(&id)
    }

    // ----- job roles -----

    pub fn insert_job_role(&self, role: JobRole) -> Result<(), StoreError> {
        let mut reg = self.0.write();
        reg.validate_job_role(&role)?;
        reg.job_roles.insert(role.id, role);
        Ok(())
    }

    pub fn get_job_role(&self, id: RoleId, filter: ScopeFilter) -> Option<JobRole> {
        let reg = self.0.read();
        reg.job_roles.get(&id).filter(|r| reg.role_in_scope(r, filter)).cloned()
    }

    pub fn list_job_roles(&self, filter: ScopeFilter) -> Vec<JobRole> {
        let reg = self.0.read();
        let mut out: Vec<JobRole> = reg
            .job_roles
            .values()
            .filter(|r| reg.role_in_scope(r, filter))
            .cloned()
            .collect();
        out.sort_by_key(|r| (r.created_at, r.id));
        out
    }

    pub fn update_job_role(
        &self,
        id: RoleId,
        actor: AccountId,
        apply: impl FnOnce(&mut JobRole),
    ) -> Result<JobRole, StoreError> {
        let mut reg = self.0.write();
        let mut updated = reg.job_roles.get(&id).ok_or(StoreError::NotFound("job role"))?.clone();
        apply(&mut updated);
        updated.id = id;
        reg.validate_job_role(&updated)?;
        updated.modified_at = Utc::now();
        updated.modified_by = actor;
        reg.job_roles.insert(id, updated.clone());
        Ok(updated)
    }

    pub fn set_job_role_active(
        &self,
        id: RoleId,
        active: bool,
        actor: AccountId,
    ) -> Result<JobRole, StoreError> {
        let mut reg = self.0.write();
        let role = reg.job_roles.get_mut(&id).ok_or(StoreError::NotFound("job role"))?;
        role.active = active;
        role.modified_at = Utc::now();
        role.modified_by = actor;
        Ok(role.clone())
    }

    // ----- departments -----

    pub fn insert_department(&self, department: Department) -> Result<(), StoreError> {
        let mut reg = self.0.write();
        reg.validate_department(&department)?;
        reg.departments.insert(department.id, department);
        Ok(())
    }

    pub fn get_department(&self, id: DepartmentId, filter: ScopeFilter) -> Option<Department> {
        let reg = self.0.read();
        reg.departments
            .get(&id)
            .filter(|d| reg.department_in_scope(d, filter))
            .cloned()
    }

    pub fn list_departments(&self, filter: ScopeFilter) -> Vec<Department> {
        let reg = self.0.read();
        let mut out: Vec<Department> = reg
            .departments
            .values()
            .filter(|d| reg.department_in_scope(d, filter))
            .cloned()
            .collect();
        out.sort_by_key(|d| (d.created_at, d.id));
        out
    }

    pub fn update_department(
        &self,
        id: DepartmentId,
        actor: AccountId,
        apply: impl FnOnce(&mut Department),
    ) -> Result<Department, StoreError> {
        let mut reg = self.0.write();
        let mut updated = reg
            .departments
            .get(&id)
            .ok_or(StoreError::NotFound("department"))?
            .clone();
        apply(&mut updated);
        updated.id = id;
        reg.validate_department(&updated)?;
        updated.modified_at = Utc::now();
        updated.modified_by = actor;
        reg.departments.insert(id, updated.clone());
        Ok(updated)
    }

    pub fn set_department_active(
        &self,
        id: DepartmentId,
        active: bool,
        actor: AccountId,
    ) -> Result<Department, StoreError> {
        let mut reg = self.0.write();
        let dep = reg.departments.get_mut(&id).ok_or(StoreError::NotFound("department"))?;
        dep.active = active;
        dep.modified_at = Utc::now();
        dep.modified_by = actor;
        Ok(dep.clone())
    }

    // ----- reference data -----

    pub fn insert_state(&self, state: FederalState) -> Result<(), StoreError> {
        let mut reg = self.0.write();
        let taken = reg.states.values().any(|s| s.ibge_code == state.ibge_code);
        if taken {
            return Err(StoreError::Duplicate(format!(
                "state with IBGE code '{}' already exists",
                state.ibge_code
            )));
        }
        reg.states.insert(state.id, state);
        Ok(())
    }

    pub fn get_state(&self, id: StateId) -> Option<FederalState> {
        self.0.read().states.get(&id).cloned()
    }

    pub fn list_states(&self) -> Vec<FederalState> {
        let mut out: Vec<FederalState> = self.0.read().states.values().cloned().collect();
        out.sort_by(|a, b| a.name.cmp(&b.name));
        out
    }

    pub fn insert_municipality(&self, municipality: Municipality) -> Result<(), StoreError> {
        let mut reg = self.0.write();
        if !reg.states.contains_key(&municipality.state) {
            return Err(StoreError::MissingReference("unknown state".into()));
        }
        let taken = reg
            .municipalities
            .values()
            .any(|m| m.ibge_code == municipality.ibge_code);
        if taken {
            return Err(StoreError::Duplicate(format!(
                "municipality with IBGE code '{}' already exists",
                municipality.ibge_code
            )));
        }
        reg.municipalities.insert(municipality.id, municipality);
        Ok(())
    }

    pub fn get_municipality(&self, id: MunicipalityId) -> Option<Municipality> {
        self.0.read().municipalities.get(&id).cloned()
    }

    pub fn list_municipalities(&self) -> Vec<Municipality> {
        let mut out: Vec<Municipality> = self.0.read().municipalities.values().cloned().collect();
        out.sort_by(|a, b| a.name.cmp(&b.name));
        out
    }

    // ----- password reset tokens -----

    pub fn insert_reset_token(&self, token: PasswordResetToken) -> Result<(), StoreError> {
        let mut reg = self.0.write();
        if !reg.accounts.contains_key(&token.account) {
            return Err(StoreError::MissingReference("unknown account".into()));
        }
        reg.reset_tokens.insert(token.id, token);
        Ok(())
    }

    pub fn list_reset_tokens(&self) -> Vec<PasswordResetToken> {
        let mut out: Vec<PasswordResetToken> =
            self.0.read().reset_tokens.values().cloned().collect();
        out.sort_by_key(|t| (t.created_at, t.id));
        out
    }

    /// Single-use consumption: match an active token for the account, flip it
    /// inactive and store the new password hash in the same write guard, so a
    /// token can never be spent twice.
    pub fn consume_reset_token(
        &self,
        account: AccountId,
        token: &str,
        new_password_hash: String,
    ) -> Result<(), StoreError> {
        let mut reg = self.0.write();
        let entry = reg
            .reset_tokens
            .values_mut()
            .find(|t| t.account == account && t.active && t.token == token)
            .ok_or_else(|| StoreError::Constraint("invalid or expired reset token".into()))?;
        entry.active = false;
        let acc = reg.accounts.get_mut(&account).ok_or(StoreError::NotFound("account"))?;
        acc.password_hash = new_password_hash;
        acc.modified_at = Utc::now();
        acc.modified_by = Some(account);
        Ok(())
    }
}
