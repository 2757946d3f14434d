//! Prompts for grounded answers

use crate::llm::ChatMessage;

/// Keeps the model inside the retrieved context
pub const SYSTEM_PROMPT: &str = "You are a helpful assistant for the Physical AI & Humanoid Robotics book. \
Answer questions based strictly on the provided context. \
Do not make up information that is not in the context.";

/// Build the user turn carrying context and question
pub fn build_grounded_prompt(question: &str, context: &str) -> String {
    format!("Context: {context}\n\nQuestion: {question}\n\nAnswer:")
}

/// System instruction followed by the grounded user turn
pub fn grounded_messages(question: &str, context: &str) -> Vec<ChatMessage> {
    vec![
        ChatMessage::system(SYSTEM_PROMPT),
        ChatMessage::user(build_grounded_prompt(question, context)),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm::ChatRole;

    #[test]
    fn test_grounded_prompt_layout() {
        let prompt = build_grounded_prompt("What is ZMP?", "ZMP is the zero moment point.");
        assert_eq!(
            prompt,
            "Context: ZMP is the zero moment point.\n\nQuestion: What is ZMP?\n\nAnswer:"
        );
    }

    #[test]
    fn test_messages_start_with_system_instruction() {
        let messages = grounded_messages("q", "c");
        assert_eq!(messages.len(), 2);
        assert_eq!(messages[0].role, ChatRole::System);
        assert!(messages[0].content.contains("strictly on the provided context"));
        assert_eq!(messages[1].role, ChatRole::User);
    }
}
