mod action;
mod permission;
mod principal;
mod resource;

pub use action::Action;
pub use permission::{Access, PermissionEntry};
pub use principal::{Identity, Principal, PrincipalKind};
pub use resource::CellResource;
