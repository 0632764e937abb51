//! Directory user types.

use serde::{Deserialize, Serialize};

/// A directory user as returned by the directory API
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DirectoryUser {
    pub id: String,
    pub display_name: String,
    pub user_principal_name: String,
    pub mail_nickname: Option<String>,
    pub account_enabled: bool,
}

/// One row of the bulk-import CSV (`display_name,mail_nickname[,job_title]`)
#[derive(Debug, Clone, Deserialize)]
pub struct NewUserRow {
    pub display_name: String,
    pub mail_nickname: String,
    #[serde(default)]
    pub job_title: Option<String>,
}

impl NewUserRow {
    /// The UPN this row will be created under.
    pub fn user_principal_name(&self, domain: &str) -> String {
        format!("{}@{}", self.mail_nickname, domain)
    }
}
