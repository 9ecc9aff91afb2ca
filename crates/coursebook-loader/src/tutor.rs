//! Tutor prompt context.
//!
//! Turns the lesson on screen plus the chat so far into a single prompt for
//! a chat model. The model itself sits behind [`TutorBackend`].

use async_trait::async_trait;
use coursebook_core::Lesson;
use serde::{Deserialize, Serialize};

use crate::Result;

/// Question used when neither the caller nor the history supplies one.
pub const DEFAULT_QUESTION: &str = "How can I get started with this lesson?";

/// Reply used when the backend answers with nothing.
pub const EMPTY_REPLY: &str = "I couldn't generate a response.";

/// Who sent a chat message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// The learner.
    User,
    /// The tutor.
    Model,
}

/// One chat message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    /// Sender.
    pub role: Role,
    /// Message text.
    pub text: String,
}

impl ChatMessage {
    /// A learner message.
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            text: text.into(),
        }
    }

    /// A tutor message.
    pub fn model(text: impl Into<String>) -> Self {
        Self {
            role: Role::Model,
            text: text.into(),
        }
    }
}

/// Opening tutor message for a lesson.
pub fn greeting(lesson: &Lesson) -> ChatMessage {
    ChatMessage::model(format!(
        "Hi! I'm your tutor. I see you're working on \"{}\". How can I help you with this lesson?",
        lesson.title
    ))
}

/// Tutor message shown when the learner moves to another lesson.
pub fn lesson_changed(lesson: &Lesson) -> ChatMessage {
    ChatMessage::model(format!(
        "We've moved to **{}**. Let me know if you have questions about this topic!",
        lesson.title
    ))
}

/// Build the tutor prompt for `lesson`.
///
/// The question is `question`, else the most recent user message in
/// `history`, else [`DEFAULT_QUESTION`].
pub fn lesson_context_prompt(lesson: &Lesson, history: &[ChatMessage], question: Option<&str>) -> String {
    let question = question
        .or_else(|| {
            history
                .iter()
                .rev()
                .find(|m| m.role == Role::User)
                .map(|m| m.text.as_str())
        })
        .unwrap_or(DEFAULT_QUESTION);

    let mut prompt = String::from("You are an enthusiastic and helpful Coding Tutor for a coding bootcamp.\n\n");

    prompt.push_str("**Current Lesson Context:**\n");
    prompt.push_str(&format!("- **Title:** {}\n", lesson.title));
    prompt.push_str(&format!("- **Type:** {}\n", lesson.lesson_type.as_str()));
    prompt.push_str(&format!("- **Description:** {}\n\n", lesson.description));

    prompt.push_str("**Lesson Content:**\n");
    prompt.push_str(&lesson.content);
    prompt.push_str("\n\n");

    if let Some(challenges) = lesson.challenges.as_deref().filter(|c| !c.is_empty()) {
        prompt.push_str("**Challenges:**\n");
        for (i, challenge) in challenges.iter().enumerate() {
            prompt.push_str(&format!("{}. {challenge}\n", i + 1));
        }
        prompt.push('\n');
    }

    if !lesson.snippets().is_empty() {
        prompt.push_str("**Code Examples:**\n");
        for (i, snippet) in lesson.snippets().iter().enumerate() {
            let label = snippet.description.as_deref().unwrap_or("Example");
            prompt.push_str(&format!(
                "{}. {label}\n```{}\n{}\n```\n",
                i + 1,
                snippet.language,
                snippet.code
            ));
        }
        prompt.push('\n');
    }

    prompt.push_str(
        "**Your goals as a tutor:**\n\
         1. Help the student understand and apply the concepts from this lesson\n\
         2. Debug their code and explain any errors\n\
         3. If they ask for the answer to a challenge, guide them with hints first\n\
         4. Keep responses concise and formatted with Markdown\n\
         5. Reference the lesson content and examples when explaining concepts\n",
    );

    if !history.is_empty() {
        prompt.push_str("\n**Previous Conversation:**\n");
        let turns: Vec<String> = history
            .iter()
            .map(|m| {
                let speaker = match m.role {
                    Role::User => "Student",
                    Role::Model => "Tutor",
                };
                format!("{speaker}: {}", m.text)
            })
            .collect();
        prompt.push_str(&turns.join("\n\n"));
        prompt.push('\n');
    }

    prompt.push_str("\n**Student's Current Question:**\n");
    prompt.push_str(question);
    prompt
}

/// A chat model that answers tutor prompts.
#[async_trait]
pub trait TutorBackend: Send + Sync {
    /// Answer `prompt`.
    async fn reply(&self, prompt: &str) -> Result<String>;
}

/// Ask the tutor about `lesson`.
///
/// Always yields display text: backend errors become `"Error: ..."`.
pub async fn ask_tutor<B: TutorBackend + ?Sized>(
    backend: &B,
    lesson: &Lesson,
    history: &[ChatMessage],
    question: Option<&str>,
) -> String {
    let prompt = lesson_context_prompt(lesson, history, question);
    match backend.reply(&prompt).await {
        Ok(reply) if reply.trim().is_empty() => EMPTY_REPLY.to_string(),
        Ok(reply) => reply,
        Err(e) => {
            log::error!("Tutor backend failed: {e}");
            format!("Error: {e}")
        }
    }
}
