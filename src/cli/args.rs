//! Shared argument parsing helpers.

use anyhow::{Result, bail};

use azlab::domain::Tags;
use uuid::Uuid;

/// Parse repeated `--tag key=value` arguments into a tag map.
pub fn parse_tags(args: &[String]) -> Result<Tags> {
    let mut tags = Tags::new();
    for arg in args {
        let Some((key, value)) = arg.split_once('=') else {
            bail!("Invalid tag '{arg}', expected key=value");
        };
        let key = key.trim();
        if key.is_empty() {
            bail!("Invalid tag '{arg}', empty key");
        }
        tags.insert(key.to_string(), value.trim().to_string());
    }
    Ok(tags)
}

/// Generate a throwaway lab password: long, mixed classes, unique per call.
pub fn generate_password() -> String {
    let id = Uuid::new_v4().simple().to_string();
    format!("Lab!{}aZ9", &id[..16])
}
