//! Conversation core for PixelSeeker.
//!
//! Routes each user utterance either to the game-catalog search service or
//! to the generative dialogue service, formats the outcome, and keeps the
//! chat transcript and the pending indicator consistent on every path.

pub mod catalog;
pub mod controller;
pub mod dialogue;
pub mod error;
pub mod reply;
pub mod router;
pub mod transcript;
pub mod types;

pub use catalog::{CatalogLookup, CatalogSource, RawgCatalogClient};
pub use controller::ConversationController;
pub use dialogue::{DialogueSource, OpenAiDialogueClient};
pub use error::{CatalogError, ChatError, DialogueError, FailureKind};
pub use router::{Intent, IntentClassifier, KeywordClassifier};
pub use transcript::TranscriptStore;
pub use types::{
    CatalogEntry, ControllerPhase, Direction, Message, Role, RoleTaggedMessage, USER_SENDER,
};
