//! Text extraction from heterogeneous message payloads.

use crate::MessagePayload;

/// Pull the first non-empty text field out of a payload.
///
/// Shapes are tried in a fixed order: plain conversation text first, then
/// extended/quoted text. An empty result is the pipeline's signal that the
/// message carries nothing actionable; this never fails.
pub fn extract_text(payload: &MessagePayload) -> &str {
    if let Some(conversation) = payload.conversation.as_deref()
        && !conversation.is_empty()
    {
        return conversation;
    }
    if let Some(extended) = &payload.extended_text
        && !extended.text.is_empty()
    {
        return &extended.text;
    }
    ""
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ExtendedText;

    #[test]
    fn plain_conversation_text_wins_over_extended() {
        let payload = MessagePayload {
            conversation: Some("oi".into()),
            extended_text: Some(ExtendedText {
                text: "quoted reply".into(),
            }),
        };
        assert_eq!(extract_text(&payload), "oi");
    }

    #[test]
    fn falls_back_to_extended_text() {
        let payload = MessagePayload {
            conversation: None,
            extended_text: Some(ExtendedText {
                text: "quoted reply".into(),
            }),
        };
        assert_eq!(extract_text(&payload), "quoted reply");
    }

    #[test]
    fn empty_conversation_does_not_shadow_extended_text() {
        let payload = MessagePayload {
            conversation: Some(String::new()),
            extended_text: Some(ExtendedText { text: "hello".into() }),
        };
        assert_eq!(extract_text(&payload), "hello");
    }

    #[test]
    fn no_recognized_field_yields_empty_string() {
        assert_eq!(extract_text(&MessagePayload::default()), "");
    }
}
