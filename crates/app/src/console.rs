//! Terminal presentation: renders quiz state and reads the user's actions.

use std::io::{self, BufRead, Write};

use quiz_core::model::{Question, QuizSummary};
use quiz_core::time::as_secs_f64;
use services::{QuizError, QuizLoopService, QuizPhase, QuizSession};

const WELCOME: &str = "\
## Welcome to the Fast Adaptive Quiz!

This quiz uses AI to generate questions on a topic of your choice and adapts to your performance.

To get started:
1. Enter your GROQ API key below.
2. Choose a topic you want to study.
3. Answer 5 questions and see how you do!
";

const INSTRUCTIONS: &str = "\
## Instructions
1. Enter a topic you want to be quizzed on. It can be any subject or area of interest.
2. The quiz consists of 5 multiple-choice questions.
3. The difficulty of each question adapts based on your previous answer.
4. Your total time is tracked, so try to be both accurate and quick!
";

pub struct Console<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Console<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    #[cfg(test)]
    pub fn into_output(self) -> W {
        self.output
    }

    /// Print `label` and read one trimmed line. `None` at end of input.
    pub fn prompt(&mut self, label: &str) -> io::Result<Option<String>> {
        write!(self.output, "{label}")?;
        self.output.flush()?;
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }

    pub fn say(&mut self, text: &str) -> io::Result<()> {
        writeln!(self.output, "{text}")
    }

    pub fn welcome(&mut self) -> io::Result<()> {
        self.say(WELCOME)
    }

    /// Ask until a non-blank key is typed. `None` at end of input.
    pub fn read_api_key(&mut self) -> io::Result<Option<String>> {
        loop {
            match self.prompt("GROQ API Key: ")? {
                None => return Ok(None),
                Some(key) if key.is_empty() => {
                    self.say(&format!("Please {}.", QuizError::MissingApiKey))?;
                }
                Some(key) => return Ok(Some(key)),
            }
        }
    }

    fn render_question(
        &mut self,
        session: &QuizSession,
        question: &Question,
        elapsed_secs: f64,
    ) -> io::Result<()> {
        let progress = session.progress();
        writeln!(self.output)?;
        writeln!(self.output, "Question {}", progress.question_number)?;
        writeln!(self.output, "{}", question.text())?;
        for (i, option) in question.options().iter().enumerate() {
            writeln!(self.output, "  {}. {option}", i + 1)?;
        }
        writeln!(
            self.output,
            "Score: {}/{}  Progress: {:.0}%  Time: {elapsed_secs:.2} seconds",
            progress.score,
            progress.answered,
            progress.fraction() * 100.0,
        )
    }

    /// Read a choice as an option number or the option's exact text.
    fn read_choice(&mut self, question: &Question) -> io::Result<Option<String>> {
        let count = question.options().len();
        loop {
            let Some(raw) = self.prompt(&format!("Choose your answer (1-{count}): "))? else {
                return Ok(None);
            };
            if let Some(answer) = resolve_choice(question, &raw) {
                return Ok(Some(answer));
            }
            self.say(&format!("Please enter a number from 1 to {count}."))?;
        }
    }

    fn render_feedback(
        &mut self,
        correct: bool,
        correct_answer: &str,
        explanation: Option<&str>,
    ) -> io::Result<()> {
        if correct {
            self.say("Correct!")?;
        } else {
            self.say(&format!("Incorrect. The correct answer was {correct_answer}."))?;
        }
        if let Some(explanation) = explanation {
            self.say(&format!("Explanation: {explanation}"))?;
        }
        Ok(())
    }

    pub fn render_summary(&mut self, summary: &QuizSummary, json: bool) -> io::Result<()> {
        writeln!(self.output)?;
        writeln!(self.output, "Quiz completed!")?;
        writeln!(
            self.output,
            "Final Score: {}/{}",
            summary.score(),
            summary.total_questions()
        )?;
        writeln!(self.output, "Total Time: {:.2} seconds", summary.total_seconds())?;
        writeln!(self.output)?;
        writeln!(self.output, "Quiz Summary")?;
        for (i, response) in summary.responses().iter().enumerate() {
            writeln!(self.output, "Question {}: {}", i + 1, response.question)?;
            writeln!(self.output, "Your Answer: {}", response.user_answer)?;
            writeln!(self.output, "Correct Answer: {}", response.correct_answer)?;
            writeln!(self.output, "---")?;
        }
        if json {
            let report = serde_json::to_string_pretty(summary).map_err(io::Error::other)?;
            writeln!(self.output, "{report}")?;
        }
        Ok(())
    }

    /// Run quizzes until the user declines a restart or input ends.
    pub async fn play(
        &mut self,
        service: &QuizLoopService,
        session: &mut QuizSession,
        json: bool,
    ) -> io::Result<()> {
        loop {
            match session.phase() {
                QuizPhase::NotStarted => {
                    self.say(INSTRUCTIONS)?;
                    let Some(topic) = self.prompt("Enter the topic you want to study: ")? else {
                        return Ok(());
                    };
                    if let Err(err) = service.start(session, &topic).await {
                        self.say(&format!("Could not start the quiz: {err}"))?;
                    }
                }
                QuizPhase::InProgress => {
                    let Some(question) = session.current_question().cloned() else {
                        return Ok(());
                    };
                    let elapsed = as_secs_f64(session.elapsed(service.clock().now()));
                    self.render_question(session, &question, elapsed)?;
                    let Some(answer) = self.read_choice(&question)? else {
                        return Ok(());
                    };

                    let answered_before = session.responses().len();
                    match service.submit(session, &answer).await {
                        Ok(outcome) => self.render_feedback(
                            outcome.answer.is_correct,
                            &outcome.answer.response.correct_answer,
                            outcome.answer.explanation.as_deref(),
                        )?,
                        Err(err) => {
                            if session.responses().len() > answered_before {
                                self.render_feedback(
                                    question.is_correct(&answer),
                                    question.answer(),
                                    question.explanation(),
                                )?;
                            }
                            self.say(&format!("Failed to generate a new question: {err}"))?;
                        }
                    }
                }
                QuizPhase::Completed => {
                    match session.summary() {
                        Ok(summary) => self.render_summary(&summary, json)?,
                        Err(err) => self.say(&format!("No summary available: {err}"))?,
                    }
                    let restart = self.prompt("Restart quiz? [y/N]: ")?;
                    if !matches!(restart.as_deref(), Some("y" | "Y" | "yes")) {
                        return Ok(());
                    }
                    session.reset();
                }
            }
        }
    }
}

fn resolve_choice(question: &Question, raw: &str) -> Option<String> {
    let raw = raw.trim();
    if let Ok(n) = raw.parse::<usize>() {
        return n
            .checked_sub(1)
            .and_then(|i| question.options().get(i))
            .cloned();
    }
    question
        .options()
        .iter()
        .find(|option| option.as_str() == raw)
        .cloned()
}
