//! Prompt templates for question generation.

use quiz_core::model::Difficulty;

/// Appended to every prompt; mirrors what `ai::parse` accepts.
pub const OUTPUT_FORMAT_INSTRUCTIONS: &str = r#"
The response should be in JSON format.
Return ONLY a JSON object of this shape, with no commentary and no markdown:
{"questions": [{"question": "<question text>", "options": ["<option 1>", "<option 2>", "<option 3>", "<option 4>"], "answer": "<the correct option, copied exactly>", "explanation": "<why the answer is correct>"}]}
Generate exactly 1 question. "answer" must be identical to one of the four "options".
"#;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PromptKind {
    Initial,
    Adaptive,
}

/// Fields needed to render one question prompt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PromptRequest {
    Initial {
        topic: String,
        learning_objective: String,
        difficulty: Difficulty,
    },
    Adaptive {
        topic: String,
        previous_question: String,
        user_response: String,
        response_correct: bool,
        difficulty: Difficulty,
    },
}

impl PromptRequest {
    /// Opening question of a quiz on `topic`, at medium difficulty.
    #[must_use]
    pub fn initial(topic: &str) -> Self {
        Self::Initial {
            topic: topic.to_string(),
            learning_objective: learning_objective(topic),
            difficulty: Difficulty::Medium,
        }
    }

    /// Follow-up question, harder after a correct answer and easier otherwise.
    #[must_use]
    pub fn adaptive(
        topic: &str,
        previous_question: &str,
        user_response: &str,
        response_correct: bool,
    ) -> Self {
        Self::Adaptive {
            topic: topic.to_string(),
            previous_question: previous_question.to_string(),
            user_response: user_response.to_string(),
            response_correct,
            difficulty: Difficulty::after_answer(response_correct),
        }
    }

    #[must_use]
    pub fn kind(&self) -> PromptKind {
        match self {
            PromptRequest::Initial { .. } => PromptKind::Initial,
            PromptRequest::Adaptive { .. } => PromptKind::Adaptive,
        }
    }

    #[must_use]
    pub fn difficulty(&self) -> Difficulty {
        match self {
            PromptRequest::Initial { difficulty, .. }
            | PromptRequest::Adaptive { difficulty, .. } => *difficulty,
        }
    }

    /// Render the full prompt text sent to the model.
    #[must_use]
    pub fn render(&self) -> String {
        let mut prompt = match self {
            PromptRequest::Initial {
                topic,
                learning_objective,
                difficulty,
            } => initial_prompt(topic, learning_objective, *difficulty),
            PromptRequest::Adaptive {
                topic,
                previous_question,
                user_response,
                response_correct,
                difficulty,
            } => adaptive_prompt(
                topic,
                previous_question,
                user_response,
                *response_correct,
                *difficulty,
            ),
        };
        prompt.push_str(OUTPUT_FORMAT_INSTRUCTIONS);
        prompt
    }
}

fn initial_prompt(topic: &str, learning_objective: &str, difficulty: Difficulty) -> String {
    format!(
        "
Generate a unique and high-quality multiple-choice question (MCQ) based on the given topic and level.
The question should be clear, relevant, and aligned with the topic. Provide four answer options and the correct answer.

Topic: {topic}
Learning Objective: {learning_objective}
Difficulty Level: {difficulty}

{GUIDELINES}"
    )
}

fn adaptive_prompt(
    topic: &str,
    previous_question: &str,
    user_response: &str,
    response_correct: bool,
    difficulty: Difficulty,
) -> String {
    let response_correct = if response_correct { "True" } else { "False" };
    format!(
        "
Based on the user's response to the previous question on {topic}, generate a new unique and high-quality multiple-choice question (MCQ).
If the user's response is correct, output a harder question. Otherwise, output an easier question.
The question should be clear, relevant, and aligned with the topic. Provide four answer options and the correct answer.

Previous Question: {previous_question}
User's Response: {user_response}
Was the response correct?: {response_correct}
Difficulty Level: {difficulty}

{GUIDELINES}"
    )
}

const GUIDELINES: &str = "\
Guidelines:
1. Avoid repeating questions.
2. Ensure the question is specific and tests knowledge effectively.
3. Provide plausible distractors (incorrect options).
4. Include a brief explanation for the correct answer.
";

fn learning_objective(topic: &str) -> String {
    format!("General knowledge of {topic}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn initial_prompt_fills_every_field() {
        let request = PromptRequest::initial("Algebra");
        let prompt = request.render();

        assert_eq!(request.kind(), PromptKind::Initial);
        assert!(prompt.contains("Topic: Algebra\n"));
        assert!(prompt.contains("Learning Objective: General knowledge of Algebra\n"));
        assert!(prompt.contains("Difficulty Level: Medium\n"));
        assert!(!prompt.contains("{topic}"));
        assert!(prompt.ends_with(OUTPUT_FORMAT_INSTRUCTIONS));
    }

    #[test]
    fn adaptive_prompt_goes_harder_after_correct_answer() {
        let request = PromptRequest::adaptive("Algebra", "What is x if 2x = 4?", "2", true);
        let prompt = request.render();

        assert_eq!(request.kind(), PromptKind::Adaptive);
        assert_eq!(request.difficulty(), Difficulty::Harder);
        assert!(prompt.contains("previous question on Algebra,"));
        assert!(prompt.contains("Previous Question: What is x if 2x = 4?\n"));
        assert!(prompt.contains("User's Response: 2\n"));
        assert!(prompt.contains("Was the response correct?: True\n"));
        assert!(prompt.contains("Difficulty Level: Harder\n"));
    }

    #[test]
    fn adaptive_prompt_goes_easier_after_wrong_answer() {
        let request = PromptRequest::adaptive("Rust", "Q", "A", false);
        let prompt = request.render();

        assert_eq!(request.difficulty(), Difficulty::Easier);
        assert!(prompt.contains("Was the response correct?: False\n"));
    }

    #[test]
    fn braces_in_values_are_kept_verbatim() {
        let request = PromptRequest::initial("{learning_objective}");
        let prompt = request.render();

        assert!(prompt.contains("Topic: {learning_objective}\n"));
        assert!(prompt.contains("General knowledge of {learning_objective}\n"));
    }
}
