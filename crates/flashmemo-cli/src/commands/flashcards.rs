//! Flashcard commands.

use super::Context;
use crate::output::{self, OutputFormat};
use anyhow::Result;
use flashmemo_api::NewFlashcard;

/// List flashcards in a collection.
pub async fn flashcards_list(ctx: &Context, collection_id: &str) -> Result<()> {
    ctx.require_user()?;
    let flashcards = ctx.api.list_flashcards(collection_id).await?;

    match ctx.format {
        OutputFormat::Text => {
            if flashcards.is_empty() {
                println!("No flashcards in this collection.");
                return Ok(());
            }
            output::print_heading("Flashcards");
            for card in &flashcards {
                let responses: Vec<&str> =
                    card.responses.iter().map(|r| r.text.as_str()).collect();
                output::print_row(&card.front, &responses.join(" | "));
            }
        }
        OutputFormat::Json => output::print_json(&flashcards)?,
    }
    Ok(())
}

/// Add a flashcard with one correct and one or more wrong responses.
pub async fn flashcards_create(
    ctx: &Context,
    collection_id: &str,
    front: &str,
    correct: &str,
    wrong: Vec<String>,
) -> Result<()> {
    ctx.require_user()?;
    let flashcard = NewFlashcard::new(front, correct, wrong);
    ctx.api.create_flashcard(collection_id, &flashcard).await?;
    output::print_success("Flashcard created", &ctx.format);
    Ok(())
}

/// Ask the backend to build a deck from a collection.
pub async fn flashcards_build(ctx: &Context, collection_id: &str) -> Result<()> {
    ctx.require_user()?;
    ctx.api.build_deck(collection_id).await?;
    output::print_success(
        "Deck built. Run 'flashmemo decks list' to start answering",
        &ctx.format,
    );
    Ok(())
}
