//! Outbound assist request.

use restyle_core::StyleState;
use serde::{Deserialize, Serialize};

/// Context sent to the assist relay alongside the user's prompt.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssistRequest {
    pub prompt: String,
    pub current_classes: String,
    pub element_tag: String,
    pub text_content: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
}

impl AssistRequest {
    /// Builds a request describing the element held in `state`.
    pub fn for_state(prompt: impl Into<String>, state: &StyleState) -> Self {
        Self {
            prompt: prompt.into(),
            current_classes: state.tailwind_classes.clone(),
            element_tag: state.tag.as_str().to_string(),
            text_content: state.text_content.clone(),
            model: None,
        }
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = Some(model.into());
        self
    }
}
