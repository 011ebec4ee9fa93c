//! Configuration commands.

use super::Context;
use crate::output::{self, OutputFormat};
use anyhow::Result;

/// Show the effective configuration.
pub fn config_show(ctx: &Context) -> Result<()> {
    match ctx.format {
        OutputFormat::Text => {
            output::print_row("Config file", &ctx.paths.config_file().display().to_string());
            output::print_row("API URL", &ctx.config.api_url);
            output::print_row("Log level", &ctx.config.log_level);
            output::print_row(
                "Timeout",
                &format!("{}s", ctx.config.request_timeout_secs),
            );
        }
        OutputFormat::Json => output::print_json(&ctx.config)?,
    }
    Ok(())
}

/// Persist a new API base URL.
pub fn config_set_api_url(ctx: &Context, url: &str) -> Result<()> {
    let mut config = ctx.config.clone();
    config.api_url = url.trim().to_string();
    config.validate()?;
    config.save(&ctx.paths)?;
    output::print_success(&format!("API URL set to {}", config.api_url), &ctx.format);
    Ok(())
}
