use crate::quiz::provider::QuestionProvider;
use crate::quiz::question::{Difficulty, MathQuestion};
use anyhow::Result;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

/// Number of options offered for every generated question.
pub const OPTION_COUNT: usize = 4;

/// Generates simple arithmetic questions without any network access.
pub struct FallbackGenerator {
    rng: StdRng,
}

impl Default for FallbackGenerator {
    fn default() -> Self {
        FallbackGenerator::new()
    }
}

impl FallbackGenerator {
    pub fn new() -> FallbackGenerator {
        FallbackGenerator {
            rng: StdRng::from_entropy(),
        }
    }

    /// A generator that produces the same questions for the same seed.
    pub fn with_seed(seed: u64) -> FallbackGenerator {
        FallbackGenerator {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Generates an addition, a halving and a subtraction question, with operands
    /// between 1 and the difficulty's ceiling.
    ///
    /// # Examples
    ///
    /// ```
    /// use math_toolkit::quiz::{Difficulty, FallbackGenerator};
    ///
    /// let questions = FallbackGenerator::with_seed(7).questions(Difficulty::Medium);
    /// assert_eq!(questions.len(), 3);
    /// assert!(questions.iter().all(|question| question.validate().is_ok()));
    /// ```
    pub fn questions(&mut self, difficulty: Difficulty) -> Vec<MathQuestion> {
        vec![
            self.addition(difficulty),
            self.halving(difficulty),
            self.subtraction(difficulty),
        ]
    }

    fn addition(&mut self, difficulty: Difficulty) -> MathQuestion {
        let a = self.operand(difficulty);
        let b = self.operand(difficulty);
        let sum = a + b;
        MathQuestion {
            question: format!("What is {} + {}?", a, b),
            options: self.options(sum, &[sum + 1, sum - 1, sum + 2]),
            answer: sum as f64,
            explanation: format!("Basic addition: {} + {} = {}.", a, b, sum),
        }
    }

    fn halving(&mut self, difficulty: Difficulty) -> MathQuestion {
        let a = self.operand(difficulty);
        MathQuestion {
            question: format!("What is {} divided by 2?", a * 2),
            options: self.options(a, &[a * 2, a + 2, a - 2]),
            answer: a as f64,
            explanation: format!(
                "Division is the inverse of multiplication: {} * 2 = {}.",
                a,
                a * 2
            ),
        }
    }

    fn subtraction(&mut self, difficulty: Difficulty) -> MathQuestion {
        let first = self.operand(difficulty);
        let second = self.operand(difficulty);
        let (larger, smaller) = (first.max(second), first.min(second));
        let difference = larger - smaller;
        MathQuestion {
            question: format!("What is {} - {}?", larger, smaller),
            options: self.options(difference, &[larger + smaller, difference + 1, difference - 1]),
            answer: difference as f64,
            explanation: format!(
                "Subtract the smaller number from the larger one: {} - {} = {}.",
                larger, smaller, difference
            ),
        }
    }

    fn operand(&mut self, difficulty: Difficulty) -> i64 {
        self.rng.gen_range(1..=i64::from(difficulty.ceiling()))
    }

    /// The answer plus distinct distractors, shuffled. Duplicate distractors are
    /// replaced by the next free numbers above the answer.
    fn options(&mut self, answer: i64, distractors: &[i64]) -> Vec<f64> {
        let mut options = vec![answer];
        let candidates = distractors
            .iter()
            .copied()
            .chain((1..).map(|step| answer + step));
        for candidate in candidates {
            if options.len() == OPTION_COUNT {
                break;
            }
            if !options.contains(&candidate) {
                options.push(candidate);
            }
        }
        options.shuffle(&mut self.rng);
        options.into_iter().map(|option| option as f64).collect()
    }
}

impl QuestionProvider for FallbackGenerator {
    fn name(&self) -> &str {
        "offline generator"
    }

    fn generate(&mut self, difficulty: Difficulty) -> Result<Vec<MathQuestion>> {
        Ok(self.questions(difficulty))
    }
}
