use crate::quiz::fallback::FallbackGenerator;
use crate::quiz::question::{Difficulty, MathQuestion};
use anyhow::{bail, Context, Result};
use log::{info, warn};
use std::fs;
use std::path::PathBuf;

/// A source of quiz questions.
pub trait QuestionProvider {
    /// Human readable name, used in log messages.
    fn name(&self) -> &str;

    /// Produces a question set for the given difficulty.
    fn generate(&mut self, difficulty: Difficulty) -> Result<Vec<MathQuestion>>;
}

/// Parses a JSON array of questions and checks that every question is playable.
///
/// # Examples
///
/// ```
/// use math_toolkit::quiz::parse_questions;
///
/// let json = r#"[{"question": "What is 1 + 1?", "options": [1, 2, 3, 4], "answer": 2, "explanation": "One and one."}]"#;
/// let questions = parse_questions(json).unwrap();
/// assert_eq!(questions[0].answer, 2.0);
///
/// assert!(parse_questions("[]").is_err());
/// ```
pub fn parse_questions(json: &str) -> Result<Vec<MathQuestion>> {
    let questions: Vec<MathQuestion> =
        serde_json::from_str(json).context("Question set is not a JSON array of questions")?;
    if questions.is_empty() {
        bail!("Question set is empty");
    }
    for (index, question) in questions.iter().enumerate() {
        question
            .validate()
            .with_context(|| format!("Question {} is invalid", index + 1))?;
    }
    Ok(questions)
}

/// Reads question sets from a JSON file, ignoring the requested difficulty.
pub struct JsonFileProvider {
    path: PathBuf,
    name: String,
}

impl JsonFileProvider {
    pub fn new(path: impl Into<PathBuf>) -> JsonFileProvider {
        let path = path.into();
        let name = format!("question file {}", path.display());
        JsonFileProvider { path, name }
    }
}

impl QuestionProvider for JsonFileProvider {
    fn name(&self) -> &str {
        &self.name
    }

    fn generate(&mut self, _difficulty: Difficulty) -> Result<Vec<MathQuestion>> {
        let json = fs::read_to_string(&self.path)
            .with_context(|| format!("Failed to read {}", self.path.display()))?;
        parse_questions(&json).with_context(|| format!("Failed to load {}", self.path.display()))
    }
}

/// Asks `provider` for questions, and falls back to the offline generator when
/// there is no provider or it fails.
pub fn questions_or_fallback(
    provider: Option<&mut dyn QuestionProvider>,
    fallback: &mut FallbackGenerator,
    difficulty: Difficulty,
) -> Vec<MathQuestion> {
    if let Some(provider) = provider {
        match provider.generate(difficulty) {
            Ok(questions) => {
                info!("Loaded {} questions from {}", questions.len(), provider.name());
                return questions;
            }
            Err(error) => warn!(
                "{} failed, using offline questions instead: {:#}",
                provider.name(),
                error
            ),
        }
    }
    fallback.questions(difficulty)
}
