//! Domain types for the conversation core.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Sender identity recorded on every user-produced message.
pub const USER_SENDER: &str = "user";

// =============================================================================
// Message
// =============================================================================

/// Which side of the conversation produced a message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    /// Produced by the assistant.
    Incoming,
    /// Produced by the user.
    Outgoing,
}

/// A single chat transcript entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    pub id: Uuid,
    pub text: String,
    pub direction: Direction,
    pub sender: String,
    pub timestamp: DateTime<Utc>,
}

impl Message {
    /// A message written by the user.
    pub fn outgoing(text: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            text: text.into(),
            direction: Direction::Outgoing,
            sender: USER_SENDER.to_string(),
            timestamp: Utc::now(),
        }
    }

    /// A message written by the assistant identified by `sender`.
    pub fn incoming(text: impl Into<String>, sender: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            text: text.into(),
            direction: Direction::Incoming,
            sender: sender.into(),
            timestamp: Utc::now(),
        }
    }
}

// =============================================================================
// Dialogue context
// =============================================================================

/// Role of an entry in a dialogue-service request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    Assistant,
    User,
}

/// One `{role, content}` record sent to the dialogue service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoleTaggedMessage {
    pub role: Role,
    pub content: String,
}

impl RoleTaggedMessage {
    pub fn new(role: Role, content: impl Into<String>) -> Self {
        Self {
            role,
            content: content.into(),
        }
    }
}

// =============================================================================
// Catalog
// =============================================================================

/// A normalized game returned by the catalog service.
///
/// Every field is populated; upstream gaps are replaced with fixed
/// placeholders by the catalog client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogEntry {
    pub name: String,
    pub release_date: String,
    pub rating: String,
    pub platforms: String,
}

// =============================================================================
// Controller phase
// =============================================================================

/// Whether a request is outstanding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ControllerPhase {
    Idle,
    Pending,
}

impl ControllerPhase {
    pub fn is_pending(self) -> bool {
        self == ControllerPhase::Pending
    }
}
