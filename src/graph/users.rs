//! Directory user operations.

use serde::Deserialize;

use super::GraphClient;
use crate::arm::{ApiError, send, send_json};
use crate::domain::{DirectoryUser, NewUserRow};

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct UserWire {
    id: String,
    #[serde(default)]
    display_name: String,
    #[serde(default)]
    user_principal_name: String,
    #[serde(default)]
    mail_nickname: Option<String>,
    #[serde(default)]
    account_enabled: bool,
}

impl From<UserWire> for DirectoryUser {
    fn from(wire: UserWire) -> Self {
        DirectoryUser {
            id: wire.id,
            display_name: wire.display_name,
            user_principal_name: wire.user_principal_name,
            mail_nickname: wire.mail_nickname,
            account_enabled: wire.account_enabled,
        }
    }
}

impl GraphClient {
    /// Create one directory user with password sign-in.
    pub fn create_user(
        &self,
        row: &NewUserRow,
        domain: &str,
        password: &str,
        force_password_change: bool,
    ) -> Result<DirectoryUser, ApiError> {
        let mut body = serde_json::json!({
            "accountEnabled": true,
            "displayName": row.display_name,
            "mailNickname": row.mail_nickname,
            "userPrincipalName": row.user_principal_name(domain),
            "passwordProfile": {
                "password": password,
                "forceChangePasswordNextSignIn": force_password_change,
            },
        });
        if let Some(title) = &row.job_title {
            body["jobTitle"] = serde_json::json!(title);
        }

        let wire: UserWire = send_json(self.request("POST", "/users"), body)?.into_json()?;
        Ok(wire.into())
    }

    /// List users whose UPN starts with a prefix.
    pub fn list_users_by_prefix(&self, prefix: &str) -> Result<Vec<DirectoryUser>, ApiError> {
        #[derive(Deserialize)]
        struct ListResponse {
            #[serde(default)]
            value: Vec<UserWire>,
            #[serde(rename = "@odata.nextLink")]
            next_link: Option<String>,
        }

        let filter = format!(
            "startswith(userPrincipalName,'{}')",
            prefix.replace('\'', "''")
        );
        let mut users = Vec::new();
        let mut page: ListResponse = send(
            self.request("GET", "/users")
                .query("$filter", &filter)
                .query(
                    "$select",
                    "id,displayName,userPrincipalName,mailNickname,accountEnabled",
                ),
        )?
        .into_json()?;

        loop {
            users.extend(page.value.into_iter().map(DirectoryUser::from));
            match page.next_link {
                Some(url) => page = send(self.request_absolute("GET", &url))?.into_json()?,
                None => break,
            }
        }

        Ok(users)
    }

    /// Delete one directory user.
    pub fn delete_user(&self, user_id: &str) -> Result<(), ApiError> {
        send(self.request("DELETE", &format!("/users/{user_id}")))?;
        Ok(())
    }
}
