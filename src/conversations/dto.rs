use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One chat bubble as the frontend ships it; only the text matters here,
/// presentation fields (sender, direction, avatar) are ignored.
#[derive(Debug, Deserialize)]
pub struct SavedMessage {
    #[serde(default)]
    pub message: String,
}

#[derive(Debug, Deserialize)]
pub struct SaveConversationRequest {
    #[serde(default)]
    pub messages: Vec<SavedMessage>,
}

/// Listing entry: summary only, the full transcript stays server-side.
#[derive(Debug, Serialize)]
pub struct ConversationListItem {
    pub id: Uuid,
    pub created_at: String,
    pub summary_text: String,
}

#[derive(Debug, Serialize)]
pub struct ConversationListResponse {
    pub conversations: Vec<ConversationListItem>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extra_presentation_fields_are_ignored() {
        let req: SaveConversationRequest = serde_json::from_str(
            r#"{"messages": [{"message": "hi", "sender": "user", "direction": "outgoing"}]}"#,
        )
        .unwrap();
        assert_eq!(req.messages.len(), 1);
        assert_eq!(req.messages[0].message, "hi");
    }
}
