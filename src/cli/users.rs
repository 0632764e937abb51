//! Directory user commands

use std::path::Path;

use anyhow::{Context, Result, bail};
use once_cell::sync::Lazy;
use regex::Regex;
use tracing::warn;

use azlab::domain::NewUserRow;
use azlab::prompt;
use azlab::report;

use super::{CommandContext, args};

/// Mail nicknames become the local part of the UPN
static MAIL_NICKNAME: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z0-9._-]{1,64}$").expect("valid regex"));

pub fn valid_mail_nickname(nickname: &str) -> bool {
    MAIL_NICKNAME.is_match(nickname)
}

/// Read the bulk-import CSV. Header row is required.
pub fn read_user_rows(path: &Path) -> Result<Vec<NewUserRow>> {
    let mut reader = csv::Reader::from_path(path)
        .with_context(|| format!("Failed to open {}", path.display()))?;

    let mut rows = Vec::new();
    for (index, record) in reader.deserialize::<NewUserRow>().enumerate() {
        let row: NewUserRow =
            record.with_context(|| format!("Invalid CSV row {}", index + 2))?;
        if !valid_mail_nickname(&row.mail_nickname) {
            bail!(
                "Invalid mail_nickname '{}' on CSV row {}",
                row.mail_nickname,
                index + 2
            );
        }
        rows.push(row);
    }
    Ok(rows)
}

/// Bulk-create directory users from a CSV file.
pub async fn import_command(
    ctx: &CommandContext,
    file: &Path,
    domain: Option<&str>,
    password: Option<&str>,
    no_password_change: bool,
) -> Result<()> {
    let domain = match domain {
        Some(d) => d.to_string(),
        None if !ctx.config.defaults.user_domain.is_empty() => {
            ctx.config.defaults.user_domain.clone()
        }
        None => bail!("No domain given. Pass --domain or set defaults.user_domain."),
    };

    let rows = read_user_rows(file)?;
    if rows.is_empty() {
        println!("No user rows in {}.", file.display());
        return Ok(());
    }

    println!("Creating {} user(s) under @{domain}...", rows.len());
    let client = ctx.graph()?;

    let mut created = Vec::new();
    let mut failed = 0usize;
    for row in &rows {
        let user_password = password
            .map(str::to_string)
            .unwrap_or_else(args::generate_password);

        match client.create_user(row, &domain, &user_password, !no_password_change) {
            Ok(user) => {
                created.push(vec![
                    user.display_name.clone(),
                    user.user_principal_name.clone(),
                    if password.is_some() {
                        "(shared)".to_string()
                    } else {
                        user_password
                    },
                ]);
            }
            Err(err) => {
                failed += 1;
                warn!(user = %row.mail_nickname, error = %err, "user creation failed");
                eprintln!("Warning: {} failed: {err}", row.mail_nickname);
            }
        }
    }

    if !created.is_empty() {
        print!(
            "{}",
            report::render_table(&["display name", "upn", "initial password"], &created)
        );
    }
    println!("\n{} created, {failed} failed", created.len());

    Ok(())
}

/// Delete all users whose UPN starts with a prefix.
pub async fn remove_command(ctx: &CommandContext, prefix: &str, yes: bool) -> Result<()> {
    if prefix.is_empty() {
        bail!("Refusing to match every user: --prefix must not be empty");
    }

    let client = ctx.graph()?;
    let users = client.list_users_by_prefix(prefix)?;

    if users.is_empty() {
        println!("No users match prefix '{prefix}'.");
        return Ok(());
    }

    println!("Users matching '{prefix}' ({}):", users.len());
    for user in &users {
        println!("  {}  {}", user.user_principal_name, user.display_name);
    }

    if !yes && !prompt::confirm(&format!("Delete {} user(s)?", users.len()))? {
        println!("Cancelled.");
        return Ok(());
    }

    let mut deleted = 0usize;
    for user in &users {
        match client.delete_user(&user.id) {
            Ok(()) => deleted += 1,
            Err(err) => {
                warn!(user = %user.user_principal_name, error = %err, "deletion failed");
                eprintln!("Warning: {} failed: {err}", user.user_principal_name);
            }
        }
    }

    println!("Deleted {deleted} of {} user(s).", users.len());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn nickname_validation() {
        assert!(valid_mail_nickname("labuser1"));
        assert!(valid_mail_nickname("lab.user-1_x"));
        assert!(!valid_mail_nickname("lab user"));
        assert!(!valid_mail_nickname("lab@user"));
        assert!(!valid_mail_nickname(""));
    }

    #[test]
    fn read_user_rows_parses_optional_job_title() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "display_name,mail_nickname,job_title").unwrap();
        writeln!(file, "Lab User One,labuser1,Student").unwrap();
        writeln!(file, "Lab User Two,labuser2,").unwrap();

        let rows = read_user_rows(file.path()).unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].job_title.as_deref(), Some("Student"));
        assert_eq!(rows[1].display_name, "Lab User Two");
    }

    #[test]
    fn read_user_rows_rejects_bad_nickname() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "display_name,mail_nickname").unwrap();
        writeln!(file, "Bad User,has space").unwrap();

        assert!(read_user_rows(file.path()).is_err());
    }
}
