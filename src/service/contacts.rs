//! Contact-record operations (addresses, phones, extra e-mails). The three
//! kinds share one statement set: collaborators may create and list, but
//! only reach their own records for retrieve and destroy, and the list scope
//! keeps other profiles' records invisible rather than forbidden.

use chrono::Utc;
use serde::Deserialize;
use tracing::info;

use crate::error::{AppError, AppResult};
use crate::identity::RequestContext;
use crate::model::{
    valid_email, valid_phone, valid_postal_code, Address, ContactId, ExtraEmail, MunicipalityId,
    Phone, ProfileId,
};
use crate::policy::{Action, ResourceKind, TargetRef};
use crate::store::SharedRegistry;

use super::gate;

#[derive(Debug, Deserialize)]
pub struct NewAddress {
    pub profile: ProfileId,
    #[serde(default)]
    pub is_primary: bool,
    pub street: String,
    pub number: String,
    pub district: String,
    #[serde(default)]
    pub complement: Option<String>,
    pub municipality: MunicipalityId,
    pub postal_code: String,
}

#[derive(Debug, Deserialize)]
pub struct NewPhone {
    pub profile: ProfileId,
    pub number: String,
}

#[derive(Debug, Deserialize)]
pub struct NewExtraEmail {
    pub profile: ProfileId,
    pub email: String,
}

// ----- addresses -----

pub fn list_addresses(reg: &SharedRegistry, ctx: &RequestContext) -> AppResult<Vec<Address>> {
    gate::require_collection(ctx, ResourceKind::Address, Action::List)?;
    Ok(reg.list_addresses(gate::scope(ctx, ResourceKind::Address)))
}

pub fn create_address(
    reg: &SharedRegistry,
    ctx: &RequestContext,
    input: NewAddress,
) -> AppResult<Address> {
    gate::require_collection(ctx, ResourceKind::Address, Action::Create)?;
    if !valid_postal_code(&input.postal_code) {
        return Err(AppError::user("invalid_postal_code", "postal code must be a valid CEP"));
    }
    ctx.actor()?;
    let now = Utc::now();
    let address = Address {
        id: ContactId::generate(),
        profile: input.profile,
        is_primary: input.is_primary,
        street: input.street,
        number: input.number,
        district: input.district,
        complement: input.complement,
        municipality: input.municipality,
        postal_code: input.postal_code,
        created_at: now,
        modified_at: now,
    };
    reg.insert_address(address.clone())?;
    Ok(address)
}

pub fn retrieve_address(
    reg: &SharedRegistry,
    ctx: &RequestContext,
    id: ContactId,
) -> AppResult<Address> {
    gate::require_eligible(ctx, ResourceKind::Address, Action::Retrieve)?;
    let (address, owner) = reg
        .get_address(id, gate::scope(ctx, ResourceKind::Address))
        .ok_or_else(gate::not_found)?;
    gate::require_object(ctx, ResourceKind::Address, Action::Retrieve, &TargetRef::owned_by(owner))?;
    Ok(address)
}

pub fn destroy_address(reg: &SharedRegistry, ctx: &RequestContext, id: ContactId) -> AppResult<()> {
    gate::require_eligible(ctx, ResourceKind::Address, Action::Destroy)?;
    let (_, owner) = reg
        .get_address(id, gate::scope(ctx, ResourceKind::Address))
        .ok_or_else(gate::not_found)?;
    gate::require_object(ctx, ResourceKind::Address, Action::Destroy, &TargetRef::owned_by(owner))?;
    reg.remove_address(id);
    info!(address = ?id, "address deleted");
    Ok(())
}

// ----- phones -----

pub fn list_phones(reg: &SharedRegistry, ctx: &RequestContext) -> AppResult<Vec<Phone>> {
    gate::require_collection(ctx, ResourceKind::Phone, Action::List)?;
    Ok(reg.list_phones(gate::scope(ctx, ResourceKind::Phone)))
}

pub fn create_phone(reg: &SharedRegistry, ctx: &RequestContext, input: NewPhone) -> AppResult<Phone> {
    gate::require_collection(ctx, ResourceKind::Phone, Action::Create)?;
    if !valid_phone(&input.number) {
        return Err(AppError::user(
            "invalid_phone",
            "phone must use the (DD) 99999-9999 or (DD) 3333-3333 format",
        ));
    }
    ctx.actor()?;
    let now = Utc::now();
    let phone = Phone {
        id: ContactId::generate(),
        profile: input.profile,
        number: input.number,
        created_at: now,
        modified_at: now,
    };
    reg.insert_phone(phone.clone())?;
    Ok(phone)
}

pub fn retrieve_phone(reg: &SharedRegistry, ctx: &RequestContext, id: ContactId) -> AppResult<Phone> {
    gate::require_eligible(ctx, ResourceKind::Phone, Action::Retrieve)?;
    let (phone, owner) = reg
        .get_phone(id, gate::scope(ctx, ResourceKind::Phone))
        .ok_or_else(gate::not_found)?;
    gate::require_object(ctx, ResourceKind::Phone, Action::Retrieve, &TargetRef::owned_by(owner))?;
    Ok(phone)
}

pub fn destroy_phone(reg: &SharedRegistry, ctx: &RequestContext, id: ContactId) -> AppResult<()> {
    gate::require_eligible(ctx, ResourceKind::Phone, Action::Destroy)?;
    let (_, owner) = reg
        .get_phone(id, gate::scope(ctx, ResourceKind::Phone))
        .ok_or_else(gate::not_found)?;
    gate::require_object(ctx, ResourceKind::Phone, Action::Destroy, &TargetRef::owned_by(owner))?;
    reg.remove_phone(id);
    info!(phone = ?id, "phone deleted");
    Ok(())
}

// ----- extra e-mails -----

pub fn list_extra_emails(reg: &SharedRegistry, ctx: &RequestContext) -> AppResult<Vec<ExtraEmail>> {
    gate::require_collection(ctx, ResourceKind::ExtraEmail, Action::List)?;
    Ok(reg.list_extra_emails(gate::scope(ctx, ResourceKind::ExtraEmail)))
}

pub fn create_extra_email(
    reg: &SharedRegistry,
    ctx: &RequestContext,
    input: NewExtraEmail,
) -> AppResult<ExtraEmail> {
    gate::require_collection(ctx, ResourceKind::ExtraEmail, Action::Create)?;
    if !valid_email(&input.email) {
        return Err(AppError::user("invalid_email", "malformed e-mail address"));
    }
    ctx.actor()?;
    let now = Utc::now();
    let email = ExtraEmail {
        id: ContactId::generate(),
        profile: input.profile,
        email: input.email,
        created_at: now,
        modified_at: now,
    };
    reg.insert_extra_email(email.clone())?;
    Ok(email)
}

pub fn retrieve_extra_email(
    reg: &SharedRegistry,
    ctx: &RequestContext,
    id: ContactId,
) -> AppResult<ExtraEmail> {
    gate::require_eligible(ctx, ResourceKind::ExtraEmail, Action::Retrieve)?;
    let (email, owner) = reg
        .get_extra_email(id, gate::scope(ctx, ResourceKind::ExtraEmail))
        .ok_or_else(gate::not_found)?;
    gate::require_object(
        ctx,
        ResourceKind::ExtraEmail,
        Action::Retrieve,
        &TargetRef::owned_by(owner),
    )?;
    Ok(email)
}

pub fn destroy_extra_email(
    reg: &SharedRegistry,
    ctx: &RequestContext,
    id: ContactId,
) -> AppResult<()> {
    gate::require_eligible(ctx, ResourceKind::ExtraEmail, Action::Destroy)?;
    let (_, owner) = reg
        .get_extra_email(id, gate::scope(ctx, ResourceKind::ExtraEmail))
        .ok_or_else(gate::not_found)?;
    gate::require_object(
        ctx,
        ResourceKind::ExtraEmail,
        Action::Destroy,
        &TargetRef::owned_by(owner),
    )?;
    reg.remove_extra_email(id);
    info!(extra_email = ?id, "extra e-mail deleted");
    Ok(())
}
