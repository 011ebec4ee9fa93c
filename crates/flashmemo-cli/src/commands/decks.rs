//! Deck commands.

use super::{prompt_line, Context};
use crate::output::{self, OutputFormat};
use anyhow::{Context as _, Result};
use flashmemo_api::{DeckAnswer, DeckDetail, Flashcard};

/// List decks waiting to be answered.
pub async fn decks_list(ctx: &Context) -> Result<()> {
    ctx.require_user()?;
    let decks = ctx.api.list_decks().await?;

    match ctx.format {
        OutputFormat::Text => {
            if decks.is_empty() {
                println!("No decks to answer.");
                return Ok(());
            }
            output::print_heading("Decks to answer");
            for deck in &decks {
                let collection = deck
                    .collection
                    .name
                    .as_deref()
                    .unwrap_or(&deck.collection.id);
                output::print_row(&deck.id, collection);
            }
        }
        OutputFormat::Json => output::print_json(&decks)?,
    }
    Ok(())
}

/// Show a deck and its flashcards.
pub async fn decks_show(ctx: &Context, deck_id: &str) -> Result<()> {
    ctx.require_user()?;
    let deck = ctx.api.find_deck(deck_id).await?;

    match ctx.format {
        OutputFormat::Text => {
            output::print_heading(&format!("Deck {}", deck.id));
            for (index, card) in deck.flashcards.iter().enumerate() {
                print_card(index, deck.flashcards.len(), card);
            }
        }
        OutputFormat::Json => output::print_json(&deck)?,
    }
    Ok(())
}

/// Answer every flashcard of a deck, then submit.
///
/// `choices` holds one 1-based response number per flashcard. When empty the
/// user is prompted card by card.
pub async fn decks_answer(ctx: &Context, deck_id: &str, choices: &[usize]) -> Result<()> {
    ctx.require_user()?;
    let deck = ctx.api.find_deck(deck_id).await?;
    if deck.flashcards.is_empty() {
        anyhow::bail!("Deck {} has no flashcards", deck.id);
    }

    let choices = if choices.is_empty() {
        prompt_choices(&deck)?
    } else {
        choices.to_vec()
    };
    let answers = pick_answers(&deck, &choices)?;

    let summary = ctx.api.answer_deck(&deck.id, &answers).await?;

    match ctx.format {
        OutputFormat::Text => {
            output::print_heading("Result");
            output::print_row("Correct", &summary.winners.to_string());
            output::print_row("Wrong", &summary.losers.to_string());
        }
        OutputFormat::Json => output::print_json(&summary)?,
    }
    Ok(())
}

fn print_card(index: usize, total: usize, card: &Flashcard) {
    println!("\n[{}/{}] {}", index + 1, total, card.front);
    for (number, response) in card.responses.iter().enumerate() {
        println!("  {}. {}", number + 1, response.text);
    }
}

fn prompt_choices(deck: &DeckDetail) -> Result<Vec<usize>> {
    let mut choices = Vec::with_capacity(deck.flashcards.len());
    for (index, card) in deck.flashcards.iter().enumerate() {
        print_card(index, deck.flashcards.len(), card);
        let raw = prompt_line("Your answer: ")?;
        let choice = raw
            .parse::<usize>()
            .with_context(|| format!("'{}' is not a response number", raw))?;
        choices.push(choice);
    }
    Ok(choices)
}

/// One answer per flashcard, in deck order, from 1-based response numbers.
fn pick_answers(deck: &DeckDetail, choices: &[usize]) -> Result<Vec<DeckAnswer>> {
    if choices.len() != deck.flashcards.len() {
        anyhow::bail!(
            "Deck has {} flashcards but {} answers were given",
            deck.flashcards.len(),
            choices.len()
        );
    }

    deck.flashcards
        .iter()
        .zip(choices)
        .map(|(card, &choice)| -> Result<DeckAnswer> {
            let response = choice
                .checked_sub(1)
                .and_then(|i| card.responses.get(i))
                .with_context(|| {
                    format!("Flashcard {} has no response number {}", card.id, choice)
                })?;
            let response_id = response
                .id
                .clone()
                .with_context(|| format!("Response '{}' has no id", response.text))?;
            Ok(DeckAnswer::new(card.id.clone(), response_id))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn deck() -> DeckDetail {
        serde_json::from_value(serde_json::json!({
            "id": "d1",
            "collection": {"id": "c1"},
            "flashcards": [
                {"id": "f1", "front": "hola", "responses": [
                    {"id": "r1", "text": "hello"}, {"id": "r2", "text": "bye"}
                ]},
                {"id": "f2", "front": "adios", "responses": [
                    {"id": "r3", "text": "hello"}, {"id": "r4", "text": "bye"}
                ]}
            ]
        }))
        .unwrap()
    }

    #[test]
    fn test_pick_answers_covers_every_card() {
        let answers = pick_answers(&deck(), &[1, 2]).unwrap();
        assert_eq!(
            answers,
            vec![DeckAnswer::new("f1", "r1"), DeckAnswer::new("f2", "r4")]
        );
    }

    #[test]
    fn test_pick_answers_rejects_bad_input() {
        assert!(pick_answers(&deck(), &[1]).is_err());
        assert!(pick_answers(&deck(), &[0, 1]).is_err());
        assert!(pick_answers(&deck(), &[1, 3]).is_err());
    }
}
