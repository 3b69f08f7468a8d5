//! Domain entities for the employee registry. Plain serde structs; all
//! decision logic lives in `policy` and the services.

mod ids;
mod account;
mod profile;
mod contact;
mod org;
mod geo;
mod reset;

pub use ids::{AccountId, ProfileId, RoleId, DepartmentId, ContactId, StateId, MunicipalityId, TokenId};
pub use account::{Account, AccountView, ADMINISTRATORS, COLLABORATORS, PROJECT_GROUPS};
pub use profile::Profile;
pub use contact::{Address, Phone, ExtraEmail, valid_phone, valid_email, valid_postal_code, valid_cpf};
pub use org::{JobRole, Department};
pub use geo::{FederalState, Municipality};
pub use reset::PasswordResetToken;
