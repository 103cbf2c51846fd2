//! Intent routing for user utterances.
//!
//! Decides whether an utterance is a catalog lookup or open dialogue and,
//! for lookups, derives the search phrase.

/// The closed set of things a user utterance can ask for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Intent {
    /// Search the game catalog for `phrase` (may be empty).
    CatalogLookup { phrase: String },
    /// Hand the conversation to the dialogue service.
    OpenDialogue,
}

/// Classifies the latest user utterance into an [`Intent`].
pub trait IntentClassifier: Send + Sync {
    fn classify(&self, utterance: &str) -> Intent;
}

// =============================================================================
// KeywordClassifier
// =============================================================================

/// Literal, case-insensitive substring trigger.
///
/// Any utterance containing the trigger is a catalog lookup; the phrase is
/// the case-folded utterance with the first occurrence of the trigger
/// removed and surrounding whitespace trimmed.
#[derive(Debug, Clone)]
pub struct KeywordClassifier {
    trigger: String,
}

impl KeywordClassifier {
    pub const DEFAULT_TRIGGER: &'static str = "recommend";

    pub fn new(trigger: impl Into<String>) -> Self {
        Self {
            trigger: trigger.into().to_lowercase(),
        }
    }

    pub fn trigger(&self) -> &str {
        &self.trigger
    }
}

impl Default for KeywordClassifier {
    fn default() -> Self {
        Self::new(Self::DEFAULT_TRIGGER)
    }
}

impl IntentClassifier for KeywordClassifier {
    fn classify(&self, utterance: &str) -> Intent {
        let folded = utterance.to_lowercase();
        if self.trigger.is_empty() || !folded.contains(&self.trigger) {
            return Intent::OpenDialogue;
        }
        // Only the ends are trimmed; the gap left by the trigger stays as-is.
        let phrase = folded.replacen(&self.trigger, "", 1).trim().to_string();
        Intent::CatalogLookup { phrase }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn classify(text: &str) -> Intent {
        KeywordClassifier::default().classify(text)
    }

    fn lookup(phrase: &str) -> Intent {
        Intent::CatalogLookup {
            phrase: phrase.to_string(),
        }
    }

    // ---- Catalog branch ----

    #[test]
    fn test_recommend_rpg() {
        assert_eq!(classify("recommend rpg"), lookup("rpg"));
    }

    #[test]
    fn test_case_folded() {
        assert_eq!(classify("Recommend Platformers"), lookup("platformers"));
        assert_eq!(classify("RECOMMEND RPG"), lookup("rpg"));
    }

    #[test]
    fn test_trigger_in_middle() {
        assert_eq!(
            classify("can you recommend open world games"),
            lookup("can you  open world games")
        );
    }

    #[test]
    fn test_trigger_inside_longer_word() {
        assert_eq!(classify("any recommendations?"), lookup("any ations?"));
    }

    #[test]
    fn test_only_first_occurrence_removed() {
        assert_eq!(classify("recommend recommend"), lookup("recommend"));
    }

    #[test]
    fn test_bare_trigger_gives_empty_phrase() {
        assert_eq!(classify("recommend"), lookup(""));
        assert_eq!(classify("  recommend  "), lookup(""));
    }

    // ---- Dialogue branch ----

    #[test]
    fn test_plain_question_is_dialogue() {
        assert_eq!(classify("what is a roguelike"), Intent::OpenDialogue);
    }

    #[test]
    fn test_near_miss_is_dialogue() {
        assert_eq!(classify("recomend rpg"), Intent::OpenDialogue);
        assert_eq!(classify("suggest a shooter"), Intent::OpenDialogue);
    }

    #[test]
    fn test_empty_is_dialogue() {
        assert_eq!(classify(""), Intent::OpenDialogue);
    }

    // ---- Custom trigger ----

    #[test]
    fn test_custom_trigger_is_case_folded() {
        let classifier = KeywordClassifier::new("Suggest");
        assert_eq!(classifier.trigger(), "suggest");
        assert_eq!(classifier.classify("suggest puzzle"), lookup("puzzle"));
        assert_eq!(classifier.classify("recommend puzzle"), Intent::OpenDialogue);
    }

    #[test]
    fn test_empty_trigger_never_matches() {
        let classifier = KeywordClassifier::new("");
        assert_eq!(classifier.classify("recommend rpg"), Intent::OpenDialogue);
    }

    #[test]
    fn test_every_trigger_utterance_routes_to_catalog() {
        let utterances = [
            "recommend",
            "please recommend something",
            "I'd like a recommendation",
            "RECOMMENDED games",
        ];
        for u in utterances {
            assert!(
                matches!(classify(u), Intent::CatalogLookup { .. }),
                "expected catalog lookup for {u:?}"
            );
        }
    }
}
