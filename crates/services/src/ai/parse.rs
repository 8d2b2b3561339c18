//! Maps model output onto `Question`.
//!
//! Expected content: `{"questions": [{"question", "options", "answer", "explanation"}]}`.
//! Code fences or prose around the object are ignored, and a bare question
//! object without the `questions` wrapper is accepted too.

use serde::Deserialize;

use quiz_core::model::Question;

use crate::error::GenerationError;

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum Payload {
    List { questions: Vec<RawQuestion> },
    Single(RawQuestion),
}

#[derive(Debug, Deserialize)]
struct RawQuestion {
    question: String,
    options: Vec<String>,
    answer: String,
    #[serde(default)]
    explanation: Option<String>,
}

/// Parse the first question out of a chat completion's message content.
///
/// # Errors
///
/// Returns `GenerationError::MissingJson` if the content has no `{`,
/// `GenerationError::Parse` if no object in it is question JSON,
/// `GenerationError::NoQuestions` for an empty list, and
/// `GenerationError::InvalidQuestion` if the first question fails validation.
pub fn parse_question(content: &str) -> Result<Question, GenerationError> {
    let raw = match first_payload(content)? {
        Payload::List { questions } => questions
            .into_iter()
            .next()
            .ok_or(GenerationError::NoQuestions)?,
        Payload::Single(raw) => raw,
    };

    Ok(Question::new(
        raw.question,
        raw.options,
        raw.answer,
        raw.explanation,
    )?)
}

/// Decode the first `{` position that starts a payload; anything after it is ignored.
fn first_payload(content: &str) -> Result<Payload, GenerationError> {
    let mut first_err = None;
    for (start, _) in content.match_indices('{') {
        let mut stream =
            serde_json::Deserializer::from_str(&content[start..]).into_iter::<Payload>();
        match stream.next() {
            Some(Ok(payload)) => return Ok(payload),
            Some(Err(err)) => {
                first_err.get_or_insert(err);
            }
            None => {}
        }
    }
    Err(first_err.map_or(GenerationError::MissingJson, GenerationError::Parse))
}

#[cfg(test)]
mod tests {
    use super::*;
    use quiz_core::model::QuestionError;

    const WRAPPED: &str = r#"{"questions": [{
        "question": "What is the derivative of x^2?",
        "options": ["x", "2x", "x^2", "2"],
        "answer": "2x",
        "explanation": "Power rule."
    }]}"#;

    #[test]
    fn parses_wrapped_question_list() {
        let q = parse_question(WRAPPED).unwrap();
        assert_eq!(q.text(), "What is the derivative of x^2?");
        assert_eq!(q.options(), ["x", "2x", "x^2", "2"]);
        assert_eq!(q.answer(), "2x");
        assert_eq!(q.explanation(), Some("Power rule."));
    }

    #[test]
    fn tolerates_code_fences_and_prose() {
        let content = format!("Sure! Here it is:\n```json\n{WRAPPED}\n```\nGood luck.");
        let q = parse_question(&content).unwrap();
        assert_eq!(q.answer(), "2x");
    }

    #[test]
    fn braces_in_surrounding_prose_are_skipped() {
        let before = format!("Here is your question {{as requested}}:\n{WRAPPED}");
        assert_eq!(parse_question(&before).unwrap().answer(), "2x");

        let after = format!("{WRAPPED}\nNote: answers use the {{option}} text.");
        assert_eq!(parse_question(&after).unwrap().answer(), "2x");
    }

    #[test]
    fn accepts_single_question_without_wrapper() {
        let content = r#"{"question": "Capital of France?", "options": ["Paris", "Rome", "Lyon", "Nice"], "answer": "Paris"}"#;
        let q = parse_question(content).unwrap();
        assert_eq!(q.text(), "Capital of France?");
        assert_eq!(q.explanation(), None);
    }

    #[test]
    fn uses_first_question_only() {
        let content = r#"{"questions": [
            {"question": "First", "options": ["a", "b", "c", "d"], "answer": "a"},
            {"question": "Second", "options": ["a", "b", "c", "d"], "answer": "b"}
        ]}"#;
        assert_eq!(parse_question(content).unwrap().text(), "First");
    }

    #[test]
    fn empty_list_is_no_questions() {
        let err = parse_question(r#"{"questions": []}"#).unwrap_err();
        assert!(matches!(err, GenerationError::NoQuestions));
    }

    #[test]
    fn plain_text_is_missing_json() {
        let err = parse_question("I cannot help with that.").unwrap_err();
        assert!(matches!(err, GenerationError::MissingJson));
    }

    #[test]
    fn wrong_shape_is_parse_error() {
        let err = parse_question(r#"{"quiz": "nope"}"#).unwrap_err();
        assert!(matches!(err, GenerationError::Parse(_)));

        let err = parse_question("see {this} and {that}").unwrap_err();
        assert!(matches!(err, GenerationError::Parse(_)));
    }

    #[test]
    fn invalid_question_is_rejected() {
        let content = r#"{"question": "Q", "options": ["a", "b", "c"], "answer": "a"}"#;
        let err = parse_question(content).unwrap_err();
        assert!(matches!(
            err,
            GenerationError::InvalidQuestion(QuestionError::OptionCount { actual: 3, .. })
        ));
    }
}
