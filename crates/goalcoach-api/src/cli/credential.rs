//! Per-user credential CLI commands: set, delete, list.

use anyhow::Result;
use comfy_table::{Cell, Color, ContentArrangement, Table, presets};
use console::style;
use dialoguer::Password;

use goalcoach_core::credential::CredentialResolver;
use goalcoach_types::error::RepositoryError;

use crate::state::AppState;

/// Store a credential, prompting with hidden input when `value` is omitted.
///
/// ```bash
/// gcoach credential set stu-42
/// gcoach credential set stu-42 --value AIza...
/// ```
pub async fn set_credential(
    state: &AppState,
    user: &str,
    value: Option<&str>,
    json: bool,
) -> Result<()> {
    let credential = match value {
        Some(v) => v.to_string(),
        None => Password::new()
            .with_prompt(format!("Enter API key for {}", style(user).bold()))
            .interact()?,
    };
    let credential = credential.trim();
    if credential.is_empty() {
        anyhow::bail!("credential must not be blank");
    }

    state.credential_store.set_boxed(user, credential).await?;
    let masked = CredentialResolver::mask(credential);

    if json {
        println!(
            "{}",
            serde_json::json!({"set": true, "user": user, "masked": masked})
        );
    } else {
        println!(
            "  {} Credential for '{}' set ({})",
            style("✓").green().bold(),
            style(user).bold(),
            masked
        );
    }

    Ok(())
}

pub async fn delete_credential(state: &AppState, user: &str, json: bool) -> Result<()> {
    match state.credential_store.delete_boxed(user).await {
        Ok(()) => {}
        Err(RepositoryError::NotFound) => {
            anyhow::bail!("no credential stored for '{user}'");
        }
        Err(e) => return Err(e.into()),
    }

    if json {
        println!("{}", serde_json::json!({"deleted": true, "user": user}));
    } else {
        println!(
            "  {} Credential for '{}' deleted",
            style("✓").green().bold(),
            style(user).bold()
        );
    }

    Ok(())
}

/// List users with stored credentials, values masked.
pub async fn list_credentials(state: &AppState, json: bool) -> Result<()> {
    let entries = state.credential_store.list_boxed().await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&entries)?);
        return Ok(());
    }

    if entries.is_empty() {
        println!();
        println!(
            "  {} No credentials stored. Add one with: {}",
            style("i").blue().bold(),
            style("gcoach credential set <USER>").yellow()
        );
        println!();
        return Ok(());
    }

    let mut table = Table::new();
    table.load_preset(presets::UTF8_FULL_CONDENSED);
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec![
        Cell::new("User").fg(Color::White),
        Cell::new("Key").fg(Color::White),
        Cell::new("Updated").fg(Color::White),
    ]);

    for entry in &entries {
        let masked = match state.credential_store.get_boxed(&entry.user_id).await {
            Ok(Some(value)) => CredentialResolver::mask(&value),
            _ => "****".to_string(),
        };

        table.add_row(vec![
            Cell::new(&entry.user_id).fg(Color::Cyan),
            Cell::new(masked),
            Cell::new(entry.updated_at.format("%Y-%m-%d").to_string()).fg(Color::DarkGrey),
        ]);
    }

    println!();
    println!("{table}");
    println!();
    println!(
        "  {} credential{}",
        style(entries.len()).bold(),
        if entries.len() == 1 { "" } else { "s" }
    );
    println!();

    Ok(())
}
