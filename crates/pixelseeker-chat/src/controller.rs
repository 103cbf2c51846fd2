//! Conversation controller: the Idle/Pending state machine.
//!
//! Accepts user text, routes it through the intent classifier to the
//! catalog or dialogue collaborator, appends exactly one assistant reply,
//! and returns to Idle on every exit path.

use std::sync::{Arc, Mutex, MutexGuard};

use pixelseeker_core::PixelSeekerConfig;
use tokio::sync::watch;

use crate::catalog::{CatalogLookup, CatalogSource, RawgCatalogClient};
use crate::dialogue::{DialogueSource, OpenAiDialogueClient};
use crate::error::ChatError;
use crate::reply;
use crate::router::{Intent, IntentClassifier, KeywordClassifier};
use crate::transcript::TranscriptStore;
use crate::types::{ControllerPhase, Message, RoleTaggedMessage};

struct ConversationState {
    transcript: TranscriptStore,
    phase: ControllerPhase,
}

/// Owns the transcript and the pending indicator for one conversation.
///
/// Share it behind an `Arc`; at most one submission is in flight at a time
/// and any other submission made meanwhile is refused with
/// [`ChatError::RequestPending`].
pub struct ConversationController {
    state: Mutex<ConversationState>,
    pending_tx: watch::Sender<bool>,
    assistant: String,
    classifier: Box<dyn IntentClassifier>,
    catalog: Arc<dyn CatalogSource>,
    dialogue: Arc<dyn DialogueSource>,
}

impl ConversationController {
    /// Create an Idle controller whose transcript holds only `welcome`.
    pub fn new(
        assistant: impl Into<String>,
        welcome: impl Into<String>,
        catalog: Arc<dyn CatalogSource>,
        dialogue: Arc<dyn DialogueSource>,
    ) -> Self {
        let assistant = assistant.into();
        let (pending_tx, _) = watch::channel(false);
        Self {
            state: Mutex::new(ConversationState {
                transcript: TranscriptStore::seeded(assistant.clone(), welcome),
                phase: ControllerPhase::Idle,
            }),
            pending_tx,
            assistant,
            classifier: Box::new(KeywordClassifier::default()),
            catalog,
            dialogue,
        }
    }

    /// Build a controller wired to the real HTTP services.
    pub fn from_config(config: &PixelSeekerConfig) -> Self {
        let catalog = Arc::new(RawgCatalogClient::from_config(&config.catalog));
        let dialogue = Arc::new(OpenAiDialogueClient::from_config(&config.dialogue));
        Self::new(
            &config.assistant.name,
            &config.assistant.welcome_message,
            catalog,
            dialogue,
        )
        .with_classifier(Box::new(KeywordClassifier::new(&config.catalog.trigger)))
    }

    /// Replace the intent classifier.
    pub fn with_classifier(mut self, classifier: Box<dyn IntentClassifier>) -> Self {
        self.classifier = classifier;
        self
    }

    /// Submit one user utterance and wait for the assistant's reply.
    ///
    /// On success the transcript has grown by exactly two messages: the
    /// outgoing utterance and one incoming reply. Upstream failures are
    /// answered with a fixed reply and still count as success here.
    pub async fn submit_user_message(&self, text: &str) -> Result<(), ChatError> {
        if text.trim().is_empty() {
            return Err(ChatError::EmptyMessage);
        }

        let intent = self.classifier.classify(text);

        let history = {
            let mut state = self.lock_state();
            if state.phase.is_pending() {
                tracing::debug!("Submission refused while a request is pending");
                return Err(ChatError::RequestPending);
            }
            state.transcript.append(Message::outgoing(text));
            state.phase = ControllerPhase::Pending;
            // Sent under the lock so the watch value never disagrees with `phase`.
            self.pending_tx.send_replace(true);
            match &intent {
                Intent::OpenDialogue => state.transcript.as_role_tagged_sequence(),
                Intent::CatalogLookup { .. } => Vec::new(),
            }
        };

        let in_flight = InFlight::new(self);
        let reply = self.resolve(intent, &history).await;
        in_flight.resolve(reply);
        Ok(())
    }

    async fn resolve(&self, intent: Intent, history: &[RoleTaggedMessage]) -> String {
        match intent {
            Intent::CatalogLookup { phrase } => {
                tracing::info!(phrase = %phrase, "Routing to catalog lookup");
                match self.catalog.lookup(&phrase).await {
                    CatalogLookup::Matches(entries) => reply::recommendations(&phrase, &entries),
                    CatalogLookup::NoMatches => reply::no_matches(&phrase),
                    CatalogLookup::Failed(_) => reply::CATALOG_UNAVAILABLE.to_string(),
                }
            }
            Intent::OpenDialogue => {
                tracing::info!(context_len = history.len(), "Routing to dialogue");
                match self.dialogue.complete(history).await {
                    Ok(text) => text,
                    Err(_) => reply::DIALOGUE_APOLOGY.to_string(),
                }
            }
        }
    }

    /// Append the assistant reply and return to Idle.
    fn finish(&self, text: String) {
        let mut state = self.lock_state();
        state
            .transcript
            .append(Message::incoming(text, self.assistant.clone()));
        state.phase = ControllerPhase::Idle;
        self.pending_tx.send_replace(false);
    }

    fn lock_state(&self) -> MutexGuard<'_, ConversationState> {
        self.state.lock().unwrap_or_else(|poisoned| {
            tracing::error!("Conversation state lock poisoned; recovering");
            poisoned.into_inner()
        })
    }

    // -- Read accessors --

    /// Snapshot of the transcript in chronological order.
    pub fn transcript(&self) -> Vec<Message> {
        self.lock_state().transcript.messages().to_vec()
    }

    pub fn transcript_len(&self) -> usize {
        self.lock_state().transcript.messages().len()
    }

    pub fn last_message(&self) -> Option<Message> {
        self.lock_state().transcript.last().cloned()
    }

    pub fn phase(&self) -> ControllerPhase {
        self.lock_state().phase
    }

    pub fn is_pending(&self) -> bool {
        self.phase().is_pending()
    }

    /// Watch the pending indicator; the value flips on every transition.
    pub fn subscribe_pending(&self) -> watch::Receiver<bool> {
        self.pending_tx.subscribe()
    }

    pub fn assistant(&self) -> &str {
        &self.assistant
    }
}

// =============================================================================
// InFlight
// =============================================================================

/// Completes a Pending submission exactly once.
///
/// If the submission future is dropped or a collaborator panics before a
/// reply is produced, the apology reply is appended on drop so the
/// controller never stays Pending.
struct InFlight<'a> {
    controller: &'a ConversationController,
    reply: Option<String>,
}

impl<'a> InFlight<'a> {
    fn new(controller: &'a ConversationController) -> Self {
        Self {
            controller,
            reply: None,
        }
    }

    fn resolve(mut self, reply: String) {
        self.reply = Some(reply);
    }
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        let text = self.reply.take().unwrap_or_else(|| {
            tracing::warn!("Request abandoned before a reply was produced");
            reply::DIALOGUE_APOLOGY.to_string()
        });
        self.controller.finish(text);
    }
}

// =============================================================================
// Tests
// =============================================================================
