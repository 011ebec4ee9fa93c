//! Flashcard endpoints, including deck building for a collection.

use crate::client::ApiClient;
use crate::error::ApiResult;
use crate::models::{Flashcard, FlashcardResponse, NewFlashcard};
use reqwest::Method;
use serde::{Deserialize, Serialize};
use tracing::debug;

#[derive(Deserialize)]
struct FlashcardListResponse {
    #[serde(default)]
    flashcards: Vec<Flashcard>,
}

#[derive(Serialize)]
struct IdRef<'a> {
    id: &'a str,
}

#[derive(Serialize)]
struct CreateFlashcardRequest<'a> {
    collection: IdRef<'a>,
    flashcard: FlashcardBody<'a>,
}

#[derive(Serialize)]
struct FlashcardBody<'a> {
    front: &'a str,
    responses: Vec<FlashcardResponse>,
}

#[derive(Serialize)]
struct BuildDeckRequest<'a> {
    collection: IdRef<'a>,
}

impl ApiClient {
    /// `GET /flashcards/list` with the collection id in the `collection_id` header.
    pub async fn list_flashcards(&self, collection_id: &str) -> ApiResult<Vec<Flashcard>> {
        let builder = self
            .request(Method::GET, "/flashcards/list")?
            .header("collection_id", collection_id);
        let response: FlashcardListResponse = self.send_json(builder).await?;
        debug!(collection_id = %collection_id, count = response.flashcards.len(), "Fetched flashcards");
        Ok(response.flashcards)
    }

    /// `POST /flashcards/create`
    pub async fn create_flashcard(&self, collection_id: &str, flashcard: &NewFlashcard) -> ApiResult<()> {
        flashcard.validate()?;
        let builder = self
            .request(Method::POST, "/flashcards/create")?
            .json(&CreateFlashcardRequest {
                collection: IdRef { id: collection_id },
                flashcard: FlashcardBody {
                    front: &flashcard.front,
                    responses: flashcard.responses(),
                },
            });
        self.send_unit(builder).await?;
        debug!(collection_id = %collection_id, "Flashcard created");
        Ok(())
    }

    /// `POST /flashcards/build`: ask the backend to assemble a deck from a collection.
    pub async fn build_deck(&self, collection_id: &str) -> ApiResult<()> {
        let builder = self
            .request(Method::POST, "/flashcards/build")?
            .json(&BuildDeckRequest {
                collection: IdRef { id: collection_id },
            });
        self.send_unit(builder).await?;
        debug!(collection_id = %collection_id, "Deck build requested");
        Ok(())
    }
}
