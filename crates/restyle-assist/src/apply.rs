//! Applying a completed assist outcome to the store.

use restyle_core::sanitize::sanitize_classes;
use restyle_store::{Storage, StoreError, StyleStore, Update};

use crate::response::AssistOutcome;

/// What [`apply_outcome`] did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Applied {
    /// The suggestion was applied as one undoable step.
    Updated { fields: Vec<&'static str> },
    /// Nothing usable survived sanitization; state is unchanged.
    Nothing,
    /// The response was not a suggestion. Show it, never apply it.
    Informational(String),
}

/// Applies a suggestion through the store's normal update path.
///
/// Suggested classes are filtered through the class sanitizer first; a class
/// list that sanitizes to nothing is dropped rather than clearing the user's
/// classes. Both fields land in a single history entry.
pub fn apply_outcome<S: Storage>(
    store: &mut StyleStore<S>,
    outcome: AssistOutcome,
) -> Result<Applied, StoreError> {
    let suggestion = match outcome {
        AssistOutcome::Suggestion(suggestion) => suggestion,
        AssistOutcome::Informational(text) => return Ok(Applied::Informational(text)),
    };

    let mut updates = Vec::new();
    if let Some(classes) = suggestion.tailwind_classes {
        let clean = sanitize_classes(&classes);
        if clean.is_empty() && !classes.trim().is_empty() {
            tracing::warn!(suggested = %classes, "dropping suggested classes with no valid tokens");
        } else {
            updates.push(Update::TailwindClasses(clean));
        }
    }
    if let Some(text) = suggestion.text_content {
        updates.push(Update::TextContent(text));
    }

    if updates.is_empty() {
        return Ok(Applied::Nothing);
    }
    let fields = updates.iter().map(Update::key).collect();
    store.update_many(updates)?;
    Ok(Applied::Updated { fields })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::response::Suggestion;
    use restyle_store::{MemoryStorage, StoreOptions};

    fn store() -> StyleStore<MemoryStorage> {
        StyleStore::open(MemoryStorage::new(), StoreOptions::default())
    }

    #[test]
    fn test_suggestion_is_one_history_entry() {
        let mut store = store();
        let outcome = AssistOutcome::Suggestion(Suggestion {
            tailwind_classes: Some("p-4  onclick=x rounded-lg".into()),
            text_content: Some("Welcome".into()),
        });
        let applied = apply_outcome(&mut store, outcome).unwrap();
        assert_eq!(
            applied,
            Applied::Updated {
                fields: vec!["tailwindClasses", "textContent"]
            }
        );
        assert_eq!(store.get().tailwind_classes, "p-4 rounded-lg");
        assert_eq!(store.get().text_content, "Welcome");
        assert_eq!(store.history_len(), 1);
    }

    #[test]
    fn test_informational_is_never_applied() {
        let mut store = store();
        let applied =
            apply_outcome(&mut store, AssistOutcome::Informational("Try blue".into())).unwrap();
        assert_eq!(applied, Applied::Informational("Try blue".into()));
        assert!(!store.can_undo());
    }

    #[test]
    fn test_fully_invalid_classes_are_dropped() {
        let mut store = store();
        let outcome = AssistOutcome::Suggestion(Suggestion {
            tailwind_classes: Some("<script>alert(1)</script>".into()),
            text_content: None,
        });
        assert_eq!(apply_outcome(&mut store, outcome).unwrap(), Applied::Nothing);
        assert!(!store.can_undo());
    }

    #[test]
    fn test_empty_class_suggestion_clears() {
        let mut store = store();
        store.update(Update::TailwindClasses("flex".into())).unwrap();
        let outcome = AssistOutcome::Suggestion(Suggestion {
            tailwind_classes: Some(String::new()),
            text_content: None,
        });
        apply_outcome(&mut store, outcome).unwrap();
        assert_eq!(store.get().tailwind_classes, "");
    }
}
