use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct AccountId(pub Uuid);

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ProfileId(pub Uuid);

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RoleId(pub Uuid);

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DepartmentId(pub Uuid);

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ContactId(pub Uuid);

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct StateId(pub Uuid);

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MunicipalityId(pub Uuid);

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TokenId(pub Uuid);

impl AccountId { pub fn generate() -> Self { Self(Uuid::new_v4()) } }
impl ProfileId { pub fn generate() -> Self { Self(Uuid::new_v4()) } }
impl RoleId { pub fn generate() -> Self { Self(Uuid::new_v4()) } }
impl DepartmentId { pub fn generate() -> Self { Self(Uuid::new_v4()) } }
impl ContactId { pub fn generate() -> Self { Self(Uuid::new_v4()) } }
impl StateId { pub fn generate() -> Self { Self(Uuid::new_v4()) } }
impl MunicipalityId { pub fn generate() -> Self { Self(Uuid::new_v4()) } }
impl TokenId { pub fn generate() -> Self { Self(Uuid::new_v4()) } }
