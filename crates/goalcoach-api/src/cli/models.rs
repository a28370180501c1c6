//! `gcoach models`: show the model chain and how requests will be served.

use anyhow::Result;
use comfy_table::{Cell, Color, ContentArrangement, Table, presets};
use console::style;

use crate::state::AppState;

pub fn show_models(state: &AppState, json: bool) -> Result<()> {
    let chain = state.resolver.chain();
    let config = &state.config;
    let has_default = state.resolver.credentials().has_default();

    if json {
        let info = serde_json::json!({
            "client": chain.client_name(),
            "models": chain.models(),
            "baseUrl": config.base_url,
            "authStyle": config.auth_style.to_string(),
            "timeoutSecs": chain.per_call_timeout().as_secs(),
            "temperature": state.resolver.generation().temperature,
            "maxOutputTokens": state.resolver.generation().max_output_tokens,
            "defaultCredential": has_default,
            "strictUserCredentials": config.strict_user_credentials,
            "dataDir": state.data_dir.display().to_string(),
        });
        println!("{}", serde_json::to_string_pretty(&info)?);
        return Ok(());
    }

    let mut table = Table::new();
    table.load_preset(presets::UTF8_FULL_CONDENSED);
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec![
        Cell::new("#").fg(Color::White),
        Cell::new("Model").fg(Color::White),
    ]);
    for (i, model) in chain.models().iter().enumerate() {
        table.add_row(vec![
            Cell::new(i + 1).fg(Color::DarkGrey),
            Cell::new(model).fg(Color::Cyan),
        ]);
    }

    let credential_line = if has_default {
        style(format!("set (from {})", config.api_key_env)).green()
    } else {
        style(format!("not set ({} is empty)", config.api_key_env)).yellow()
    };

    println!();
    println!("{table}");
    println!();
    println!("  Endpoint:            {}", style(&config.base_url).dim());
    println!("  Auth:                {}", config.auth_style);
    println!("  Per-call timeout:    {}s", chain.per_call_timeout().as_secs());
    println!("  Default credential:  {credential_line}");
    println!("  Data dir:            {}", style(state.data_dir.display()).dim());
    if config.strict_user_credentials {
        println!("  Strict user credentials: {}", style("on").bold());
    }
    println!();

    Ok(())
}
