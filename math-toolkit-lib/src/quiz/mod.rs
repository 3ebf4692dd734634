//! Multiple choice math quiz.
//!
//! Questions come from a [`provider::QuestionProvider`], typically backed by a
//! generative AI service. When it is missing or fails, the offline
//! [`fallback::FallbackGenerator`] keeps the game playable.

pub mod fallback;
pub mod game;
pub mod provider;
pub mod question;

pub use fallback::FallbackGenerator;
pub use game::{AnswerOutcome, GameState, QuizError, QuizGame};
pub use provider::{parse_questions, questions_or_fallback, JsonFileProvider, QuestionProvider};
pub use question::{Difficulty, MathQuestion};
