//! azlab - certification-lab operations for Azure
//!
//! azlab provisions, inventories, audits, right-sizes and tears down the
//! resources used by certification-practice environments: resource groups,
//! storage accounts, virtual machines, container instances, custom RBAC
//! roles and directory users.
//!
//! Each subcommand is an independent linear script: check state, confirm
//! with the operator, call the management or directory API, print the
//! result. The shared pieces are the typed API clients ([`arm`], [`graph`]),
//! the RBAC audit aggregation ([`audit`]), the right-sizing heuristic
//! ([`rightsize`]) and the report output layer ([`report`]).

pub mod arm;
pub mod audit;
pub mod config;
pub mod domain;
pub mod graph;
pub mod prompt;
pub mod report;
pub mod rightsize;

pub use domain::*;
