//! Deck endpoints: pending decks, deck contents, and answer submission.

use crate::client::ApiClient;
use crate::error::ApiResult;
use crate::models::{AnswerSummary, Deck, DeckAnswer, DeckDetail};
use reqwest::Method;
use serde::{Deserialize, Serialize};
use tracing::debug;

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct DeckListResponse {
    #[serde(default)]
    decks_unanswered: Vec<Deck>,
}

#[derive(Deserialize)]
struct DeckFindResponse {
    deck: DeckDetail,
}

#[derive(Serialize)]
struct AnswerRequest<'a> {
    deck: AnsweredDeck<'a>,
}

#[derive(Serialize)]
struct AnsweredDeck<'a> {
    id: &'a str,
    flashcards: &'a [DeckAnswer],
}

#[derive(Deserialize)]
struct AnswerResponse {
    deck: GradedDeck,
}

#[derive(Deserialize)]
struct GradedDeck {
    #[serde(default)]
    flashcards: Vec<GradedFlashcard>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct GradedFlashcard {
    #[serde(default)]
    is_winner: bool,
}

impl ApiClient {
    /// `GET /decks/list`: decks the user has not answered yet.
    pub async fn list_decks(&self) -> ApiResult<Vec<Deck>> {
        let builder = self.request(Method::GET, "/decks/list")?;
        let response: DeckListResponse = self.send_json(builder).await?;
        debug!(count = response.decks_unanswered.len(), "Fetched unanswered decks");
        Ok(response.decks_unanswered)
    }

    /// `GET /decks/find` with the deck id in the `deck_id` header.
    pub async fn find_deck(&self, deck_id: &str) -> ApiResult<DeckDetail> {
        let builder = self
            .request(Method::GET, "/decks/find")?
            .header("deck_id", deck_id);
        let response: DeckFindResponse = self.send_json(builder).await?;
        debug!(deck_id = %deck_id, flashcards = response.deck.flashcards.len(), "Fetched deck");
        Ok(response.deck)
    }

    /// `POST /decks/answer`: submit one response per flashcard and tally the grading.
    pub async fn answer_deck(&self, deck_id: &str, answers: &[DeckAnswer]) -> ApiResult<AnswerSummary> {
        let builder = self
            .request(Method::POST, "/decks/answer")?
            .json(&AnswerRequest {
                deck: AnsweredDeck {
                    id: deck_id,
                    flashcards: answers,
                },
            });
        let response: AnswerResponse = self.send_json(builder).await?;

        let winners = response
            .deck
            .flashcards
            .iter()
            .filter(|card| card.is_winner)
            .count();
        let summary = AnswerSummary {
            winners,
            losers: response.deck.flashcards.len() - winners,
        };
        debug!(
            deck_id = %deck_id,
            winners = summary.winners,
            losers = summary.losers,
            "Deck answered"
        );
        Ok(summary)
    }
}
