//! REST client for the Flashmemo backend.
//!
//! One [`ApiClient`] is shared by the whole process. The session layer
//! attaches and detaches the bearer credential on it; every endpoint method
//! then carries `Authorization: Bearer <token>` while a user is signed in.
//!
//! Endpoints:
//!
//! ```text
//! POST /sign-in, /sign-up          -> AuthSession
//! GET  /decks/list, /decks/find    -> Deck, DeckDetail
//! POST /decks/answer               -> AnswerSummary
//! GET  /collections/list           -> Collection
//! POST /collections/create
//! GET  /flashcards/list            -> Flashcard
//! POST /flashcards/create, /flashcards/build
//! ```

mod auth;
mod client;
mod collections;
mod decks;
mod error;
mod flashcards;
pub mod models;

pub use client::ApiClient;
pub use error::{ApiError, ApiResult};
pub use models::{
    AnswerSummary, AuthPayload, AuthSession, Collection, CollectionRef, Deck, DeckAnswer,
    DeckDetail, Flashcard, FlashcardResponse, NewCollection, NewFlashcard, User,
    DEFAULT_CATEGORY_ID, DEFAULT_PRIVACY_STATUS,
};
