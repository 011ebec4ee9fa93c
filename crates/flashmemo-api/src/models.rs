//! Wire models for the Flashmemo REST API.
//!
//! Field names follow the backend's JSON (`camelCase` for resources,
//! `access_token` for the auth payload).

use crate::error::{ApiError, ApiResult};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Category assigned to new collections unless the caller picks one.
pub const DEFAULT_CATEGORY_ID: &str = "11898c4e-f133-49df-9ca9-974da46e5310";

/// Privacy status assigned to new collections unless the caller picks one.
pub const DEFAULT_PRIVACY_STATUS: &str = "public";

/// A signed-in user as returned by the backend.
///
/// Fields the client does not model are kept in `extra` so the stored record
/// round-trips unchanged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl User {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            email: None,
            extra: Map::new(),
        }
    }

    /// A user record is usable only with a non-empty id.
    pub fn is_valid(&self) -> bool {
        !self.id.trim().is_empty()
    }
}

/// Body of a sign-in or sign-up response, before validation.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AuthPayload {
    #[serde(default)]
    pub user: Option<User>,
    #[serde(default)]
    pub access_token: Option<String>,
}

impl AuthPayload {
    /// Require both halves of the session.
    pub fn into_session(self) -> ApiResult<AuthSession> {
        let user = self
            .user
            .filter(User::is_valid)
            .ok_or(ApiError::MissingField("user"))?;
        let access_token = self
            .access_token
            .filter(|token| !token.is_empty())
            .ok_or(ApiError::MissingField("access_token"))?;
        Ok(AuthSession { user, access_token })
    }
}

/// A validated sign-in result.
#[derive(Clone, PartialEq)]
pub struct AuthSession {
    pub user: User,
    pub access_token: String,
}

impl std::fmt::Debug for AuthSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthSession")
            .field("user", &self.user)
            .field("access_token", &"<redacted>")
            .finish()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CollectionRef {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Collection {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// A deck waiting to be answered.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Deck {
    pub id: String,
    pub collection: CollectionRef,
}

/// A deck with its flashcards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeckDetail {
    pub id: String,
    pub collection: CollectionRef,
    #[serde(default)]
    pub flashcards: Vec<Flashcard>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Flashcard {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub collection: Option<CollectionRef>,
    pub front: String,
    #[serde(default)]
    pub responses: Vec<FlashcardResponse>,
}

/// One possible answer on a flashcard.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FlashcardResponse {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_correct: Option<bool>,
}

/// The response picked for one flashcard of a deck.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeckAnswer {
    /// Flashcard id
    pub id: String,
    pub response_id: String,
}

impl DeckAnswer {
    pub fn new(flashcard_id: impl Into<String>, response_id: impl Into<String>) -> Self {
        Self {
            id: flashcard_id.into(),
            response_id: response_id.into(),
        }
    }
}

/// Outcome of a submitted deck.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnswerSummary {
    pub winners: usize,
    pub losers: usize,
}

impl AnswerSummary {
    pub fn total(&self) -> usize {
        self.winners + self.losers
    }
}

/// Input for creating a collection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewCollection {
    pub name: String,
    pub description: String,
    pub category_id: String,
    pub privacy_status: String,
}

impl NewCollection {
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            category_id: DEFAULT_CATEGORY_ID.to_string(),
            privacy_status: DEFAULT_PRIVACY_STATUS.to_string(),
        }
    }

    pub fn validate(&self) -> ApiResult<()> {
        if self.name.trim().is_empty() {
            return Err(ApiError::InvalidRequest(
                "collection name must not be empty".into(),
            ));
        }
        Ok(())
    }
}

/// Input for creating a flashcard: one correct response, one or more wrong ones.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewFlashcard {
    pub front: String,
    pub correct: String,
    pub wrong: Vec<String>,
}

impl NewFlashcard {
    pub fn new(front: impl Into<String>, correct: impl Into<String>, wrong: Vec<String>) -> Self {
        Self {
            front: front.into(),
            correct: correct.into(),
            wrong,
        }
    }

    pub fn validate(&self) -> ApiResult<()> {
        if self.front.trim().is_empty() {
            return Err(ApiError::InvalidRequest("flashcard front must not be empty".into()));
        }
        if self.correct.trim().is_empty() {
            return Err(ApiError::InvalidRequest("correct response must not be empty".into()));
        }
        if self.wrong.is_empty() || self.wrong.iter().any(|w| w.trim().is_empty()) {
            return Err(ApiError::InvalidRequest(
                "at least one non-empty wrong response is required".into(),
            ));
        }
        Ok(())
    }

    /// Responses in submission order: the correct one first.
    pub fn responses(&self) -> Vec<FlashcardResponse> {
        std::iter::once((self.correct.clone(), true))
            .chain(self.wrong.iter().map(|w| (w.clone(), false)))
            .map(|(text, is_correct)| FlashcardResponse {
                id: None,
                text,
                is_correct: Some(is_correct),
            })
            .collect()
    }
}
