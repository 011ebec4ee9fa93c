//! Authentication commands.

use super::{display_name, prompt_password, value_or_prompt, Context};
use crate::output::{self, OutputFormat};
use anyhow::Result;

/// Sign in with email and password.
pub async fn sign_in(ctx: &Context, email: Option<String>) -> Result<()> {
    if let Some(user) = ctx.session.current_user() {
        output::print_success(
            &format!("Already signed in as {}", display_name(&user)),
            &ctx.format,
        );
        return Ok(());
    }

    let email = value_or_prompt(email, "Email: ")?;
    let password = prompt_password()?;

    if ctx.format == OutputFormat::Text {
        println!("Signing in...");
    }

    let user = ctx
        .session
        .sign_in(&email, &password)
        .await
        .map_err(|e| anyhow::anyhow!("Sign-in failed: {}", e))?;

    output::print_success(&format!("Signed in as {}", display_name(&user)), &ctx.format);
    Ok(())
}

/// Create an account and sign in to it.
pub async fn sign_up(ctx: &Context, email: Option<String>, name: Option<String>) -> Result<()> {
    if let Some(user) = ctx.session.current_user() {
        output::print_success(
            &format!(
                "Already signed in as {}. Sign out first to create another account",
                display_name(&user)
            ),
            &ctx.format,
        );
        return Ok(());
    }

    let name = value_or_prompt(name, "Name: ")?;
    let email = value_or_prompt(email, "Email: ")?;
    let password = prompt_password()?;

    let user = ctx
        .session
        .sign_up(&email, &password, &name)
        .await
        .map_err(|e| anyhow::anyhow!("Sign-up failed: {}", e))?;

    output::print_success(
        &format!("Account created. Signed in as {}", display_name(&user)),
        &ctx.format,
    );
    Ok(())
}

/// Sign out and clear the stored session.
pub async fn sign_out(ctx: &Context) -> Result<()> {
    ctx.session.sign_out().await?;
    output::print_success("Signed out", &ctx.format);
    Ok(())
}

/// Show the session status.
pub async fn status(ctx: &Context) -> Result<()> {
    let state = ctx.session.state();
    let user = ctx.session.current_user();

    match ctx.format {
        OutputFormat::Text => {
            println!("API:      {}", ctx.api.base_url());
            println!("Session:  {}", state);
            if let Some(user) = &user {
                println!("User ID:  {}", user.id);
                println!("Name:     {}", user.name);
                if let Some(email) = &user.email {
                    println!("Email:    {}", email);
                }
            }
        }
        OutputFormat::Json => {
            let json = serde_json::json!({
                "api_url": ctx.api.base_url().as_str(),
                "state": state,
                "signed_in": ctx.session.is_authenticated(),
                "user": user,
            });
            output::print_json(&json)?;
        }
    }
    Ok(())
}
