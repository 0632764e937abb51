//! Core domain types for azlab

mod metrics;
mod rbac;
mod resource;
mod user;

pub use metrics::VmUtilization;
pub use rbac::{
    Principal, PrincipalKind, Principals, RoleAssignment, RoleDefinition, RoleType, ScopeLevel,
};
pub use resource::{
    ContainerGroup, GenericResource, ResourceGroup, StorageAccount, Tags, VirtualMachine,
};
pub use user::{DirectoryUser, NewUserRow};
