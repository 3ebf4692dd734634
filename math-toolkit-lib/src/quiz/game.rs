use crate::quiz::question::{Difficulty, MathQuestion};
use log::debug;
use std::fmt;
use std::fmt::Formatter;

/// Points awarded for every correct answer.
pub const POINTS_PER_QUESTION: u32 = 10;

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum GameState {
    Start,
    Playing,
    End,
}

impl fmt::Display for GameState {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            GameState::Start => write!(f, "start"),
            GameState::Playing => write!(f, "playing"),
            GameState::End => write!(f, "end"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum QuizError {
    #[error("cannot {action} while the quiz is at the {state} screen")]
    InvalidTransition { action: &'static str, state: GameState },

    #[error("a quiz needs at least one question")]
    EmptyQuestionSet,

    #[error("the current question has already been answered")]
    AlreadyAnswered,

    #[error("the current question has not been answered yet")]
    NotAnswered,

    #[error("{0} is not one of the options")]
    UnknownOption(f64),
}

/// Feedback for a submitted answer.
#[derive(Debug, Clone, PartialEq)]
pub struct AnswerOutcome {
    pub correct: bool,
    pub answer: f64,
    pub explanation: String,
}

/// A quiz session moving through start, playing and end screens.
#[derive(Debug, Clone)]
pub struct QuizGame {
    state: GameState,
    difficulty: Difficulty,
    questions: Vec<MathQuestion>,
    current: usize,
    score: u32,
    answered: bool,
}

impl QuizGame {
    pub fn new(difficulty: Difficulty) -> QuizGame {
        QuizGame {
            state: GameState::Start,
            difficulty,
            questions: Vec::new(),
            current: 0,
            score: 0,
            answered: false,
        }
    }

    pub fn state(&self) -> GameState {
        self.state
    }

    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    /// The difficulty can only be chosen on the start screen.
    pub fn set_difficulty(&mut self, difficulty: Difficulty) -> Result<(), QuizError> {
        self.expect_state(GameState::Start, "change the difficulty")?;
        self.difficulty = difficulty;
        Ok(())
    }

    /// Begins a round with the given questions, resetting the score.
    pub fn start(&mut self, questions: Vec<MathQuestion>) -> Result<(), QuizError> {
        if self.state == GameState::Playing {
            return Err(QuizError::InvalidTransition {
                action: "start a new round",
                state: self.state,
            });
        }
        if questions.is_empty() {
            return Err(QuizError::EmptyQuestionSet);
        }
        debug!(
            "starting {} quiz with {} questions",
            self.difficulty,
            questions.len()
        );
        self.questions = questions;
        self.current = 0;
        self.score = 0;
        self.answered = false;
        self.state = GameState::Playing;
        Ok(())
    }

    pub fn current_question(&self) -> Option<&MathQuestion> {
        match self.state {
            GameState::Playing => self.questions.get(self.current),
            _ => None,
        }
    }

    /// One-based number of the current question and the total number of questions.
    pub fn progress(&self) -> (usize, usize) {
        (self.current + 1, self.questions.len())
    }

    /// Submits an answer to the current question. Each question accepts one answer.
    pub fn answer(&mut self, option: f64) -> Result<AnswerOutcome, QuizError> {
        self.expect_state(GameState::Playing, "answer")?;
        if self.answered {
            return Err(QuizError::AlreadyAnswered);
        }
        let question = &self.questions[self.current];
        if !question.options.contains(&option) {
            return Err(QuizError::UnknownOption(option));
        }

        let correct = question.is_correct(option);
        let outcome = AnswerOutcome {
            correct,
            answer: question.answer,
            explanation: question.explanation.clone(),
        };
        if correct {
            self.score += POINTS_PER_QUESTION;
        }
        self.answered = true;
        Ok(outcome)
    }

    /// Moves on after an answer, ending the round after the last question.
    pub fn next_question(&mut self) -> Result<(), QuizError> {
        self.expect_state(GameState::Playing, "move to the next question")?;
        if !self.answered {
            return Err(QuizError::NotAnswered);
        }
        self.answered = false;
        if self.current + 1 < self.questions.len() {
            self.current += 1;
        } else {
            debug!("quiz finished with score {}", self.score);
            self.state = GameState::End;
        }
        Ok(())
    }

    /// Returns from the end screen to the start screen.
    pub fn restart(&mut self) -> Result<(), QuizError> {
        self.expect_state(GameState::End, "restart")?;
        self.state = GameState::Start;
        self.questions.clear();
        self.current = 0;
        self.score = 0;
        self.answered = false;
        Ok(())
    }

    pub fn max_score(&self) -> u32 {
        self.questions.len() as u32 * POINTS_PER_QUESTION
    }

    pub fn is_perfect_score(&self) -> bool {
        !self.questions.is_empty() && self.score == self.max_score()
    }

    pub fn summary(&self) -> &'static str {
        if self.is_perfect_score() {
            "Perfect Score! You're a math wizard!"
        } else {
            "Great effort! Keep practicing."
        }
    }

    fn expect_state(&self, expected: GameState, action: &'static str) -> Result<(), QuizError> {
        if self.state == expected {
            Ok(())
        } else {
            Err(QuizError::InvalidTransition {
                action,
                state: self.state,
            })
        }
    }
}
