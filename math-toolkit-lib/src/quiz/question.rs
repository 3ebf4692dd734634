use anyhow::{bail, Result};
use itertools::Itertools;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fmt::Formatter;
use std::str;

/// A multiple choice question with exactly one correct option.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MathQuestion {
    pub question: String,
    pub options: Vec<f64>,
    pub answer: f64,
    pub explanation: String,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Difficulty {
    #[default]
    Easy,
    Medium,
    Hard,
}

impl MathQuestion {
    /// Checks that the question can be played: it has text, at least two finite
    /// options and the answer is one of them.
    pub fn validate(&self) -> Result<()> {
        if self.question.trim().is_empty() {
            bail!("Question has no text");
        }
        if self.options.len() < 2 {
            bail!(
                "Question '{}' needs at least two options, found {}",
                self.question,
                self.options.len()
            );
        }
        if let Some(option) = self.options.iter().find(|option| !option.is_finite()) {
            bail!("Question '{}' has a non-finite option {}", self.question, option);
        }
        if !self.is_correct(self.answer) {
            bail!(
                "Answer {} of question '{}' is not among its options [{}]",
                self.answer,
                self.question,
                self.options.iter().join(", ")
            );
        }
        Ok(())
    }

    pub fn is_correct(&self, option: f64) -> bool {
        option == self.answer && self.options.contains(&option)
    }
}

impl Difficulty {
    pub const ALL: [Difficulty; 3] = [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard];

    /// The largest operand the offline generator uses at this difficulty.
    pub fn ceiling(&self) -> u32 {
        match self {
            Difficulty::Easy => 10,
            Difficulty::Medium => 50,
            Difficulty::Hard => 100,
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Difficulty::Easy => write!(f, "Easy"),
            Difficulty::Medium => write!(f, "Medium"),
            Difficulty::Hard => write!(f, "Hard"),
        }
    }
}

impl str::FromStr for Difficulty {
    type Err = String;

    fn from_str(input: &str) -> Result<Difficulty, Self::Err> {
        Difficulty::ALL
            .into_iter()
            .find(|difficulty| difficulty.to_string().eq_ignore_ascii_case(input))
            .ok_or_else(|| format!("unknown difficulty '{}', expected easy, medium or hard", input))
    }
}
