//! Collection commands.

use super::Context;
use crate::output::{self, OutputFormat};
use anyhow::Result;
use flashmemo_api::NewCollection;

/// List the user's collections.
pub async fn collections_list(ctx: &Context) -> Result<()> {
    ctx.require_user()?;
    let collections = ctx.api.list_collections().await?;

    match ctx.format {
        OutputFormat::Text => {
            if collections.is_empty() {
                println!("No collections yet. Create one with 'flashmemo collections create'.");
                return Ok(());
            }
            output::print_heading("Collections");
            for collection in &collections {
                output::print_row(&collection.id, &collection.name);
            }
        }
        OutputFormat::Json => output::print_json(&collections)?,
    }
    Ok(())
}

/// Create a collection.
pub async fn collections_create(
    ctx: &Context,
    name: &str,
    description: &str,
    category: Option<String>,
    privacy: Option<String>,
) -> Result<()> {
    ctx.require_user()?;

    let mut collection = NewCollection::new(name, description);
    if let Some(category) = category {
        collection.category_id = category;
    }
    if let Some(privacy) = privacy {
        collection.privacy_status = privacy;
    }

    ctx.api.create_collection(&collection).await?;
    output::print_success(&format!("Collection '{}' created", name), &ctx.format);
    Ok(())
}
