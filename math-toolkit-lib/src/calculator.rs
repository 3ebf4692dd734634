//! The keypad calculator: builds an expression from key presses and hands it
//! to the evaluator.

use crate::interpreter::error::EvalError;
use crate::interpreter::scientific::{evaluate_scientific, AngleMode, ScientificFunction};
use crate::interpreter::{evaluate, format_number};
use log::debug;
use std::str;

/// What the calculator display shows.
#[derive(Debug, Clone, PartialEq)]
enum Entry {
    Number(String),
    Error(EvalError),
}

/// A single key on the calculator keypad.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Key {
    Digit(char),
    Operator(char),
    Equals,
    Clear,
    Backspace,
    Negate,
    Percent,
    Function(ScientificFunction),
    ToggleAngleMode,
}

impl str::FromStr for Key {
    type Err = String;

    /// Parses keyboard-style key names, e.g. `7`, `.`, `x`, `enter`, `esc` or `sqrt`.
    fn from_str(input: &str) -> Result<Key, Self::Err> {
        let lowercase = input.to_ascii_lowercase();
        match lowercase.as_str() {
            digit if digit.len() == 1 && digit.chars().all(|c| c.is_ascii_digit() || c == '.') => {
                Ok(Key::Digit(digit.chars().next().unwrap_or('0')))
            }
            "+" | "-" | "/" | "*" => Ok(Key::Operator(lowercase.chars().next().unwrap_or('+'))),
            "x" | "×" => Ok(Key::Operator('*')),
            "÷" => Ok(Key::Operator('/')),
            "=" | "enter" => Ok(Key::Equals),
            "c" | "esc" | "escape" => Ok(Key::Clear),
            "backspace" | "bs" => Ok(Key::Backspace),
            "neg" | "±" => Ok(Key::Negate),
            "%" => Ok(Key::Percent),
            "mode" | "deg/rad" => Ok(Key::ToggleAngleMode),
            name => name
                .parse::<ScientificFunction>()
                .map(Key::Function)
                .map_err(|_| format!("unknown key '{}'", input)),
        }
    }
}

/// Calculator state as driven by a keypad.
#[derive(Debug, Clone)]
pub struct Calculator {
    entry: Entry,
    pending: String,
    caption: String,
    angle_mode: AngleMode,
}

impl Default for Calculator {
    fn default() -> Self {
        Calculator::new()
    }
}

impl Calculator {
    pub fn new() -> Calculator {
        Calculator {
            entry: Entry::Number("0".to_string()),
            pending: String::new(),
            caption: String::new(),
            angle_mode: AngleMode::default(),
        }
    }

    /// The main display line.
    pub fn display(&self) -> &str {
        match &self.entry {
            Entry::Number(text) => text,
            Entry::Error(_) => "Error",
        }
    }

    /// The smaller line above the display: the pending expression, or what was last computed.
    pub fn expression_line(&self) -> &str {
        if self.pending.is_empty() {
            &self.caption
        } else {
            &self.pending
        }
    }

    pub fn angle_mode(&self) -> AngleMode {
        self.angle_mode
    }

    /// Why the display shows `Error`, if it does.
    pub fn last_error(&self) -> Option<&EvalError> {
        match &self.entry {
            Entry::Number(_) => None,
            Entry::Error(error) => Some(error),
        }
    }

    pub fn press(&mut self, key: Key) {
        match key {
            Key::Digit(digit) => self.input_digit(digit),
            Key::Operator(operator) => self.input_operator(operator),
            Key::Equals => self.calculate(),
            Key::Clear => self.clear(),
            Key::Backspace => self.backspace(),
            Key::Negate => self.negate(),
            Key::Percent => self.percent(),
            Key::Function(function) => self.apply_scientific(function),
            Key::ToggleAngleMode => self.toggle_angle_mode(),
        }
    }

    /// Appends a digit or the decimal point to the entry.
    pub fn input_digit(&mut self, digit: char) {
        if !digit.is_ascii_digit() && digit != '.' {
            return;
        }
        match &mut self.entry {
            Entry::Number(text) if text.as_str() != "0" => {
                if digit == '.' && text.contains('.') {
                    return;
                }
                text.push(digit);
            }
            entry => {
                *entry = Entry::Number(if digit == '.' {
                    "0.".to_string()
                } else {
                    digit.to_string()
                });
            }
        }
    }

    /// Moves the entry and `operator` to the pending expression.
    pub fn input_operator(&mut self, operator: char) {
        if !matches!(operator, '+' | '-' | '*' | '/') {
            return;
        }
        if let Entry::Number(text) = &self.entry {
            self.pending
                .push_str(&format!("{} {} ", without_trailing_point(text), operator));
            self.entry = Entry::Number("0".to_string());
        }
    }

    /// Evaluates the pending expression followed by the entry.
    pub fn calculate(&mut self) {
        let Some(expression) = self.full_expression() else {
            return;
        };
        match evaluate(&expression) {
            Ok(value) => {
                self.caption = format!("{} =", expression);
                self.pending.clear();
                self.entry = Entry::Number(format_number(value));
            }
            Err(error) => self.fail(error),
        }
    }

    /// Evaluates the pending expression followed by the entry, then applies `function`.
    pub fn apply_scientific(&mut self, function: ScientificFunction) {
        let Some(expression) = self.full_expression() else {
            return;
        };
        let outcome = evaluate(&expression).and_then(|value| {
            let result = evaluate_scientific(&expression, function, self.angle_mode)?;
            Ok((value, result))
        });
        match outcome {
            Ok((value, result)) => {
                self.caption = format!("{}({}) =", function, format_number(value));
                self.pending.clear();
                self.entry = Entry::Number(format_number(result));
            }
            Err(error) => self.fail(error),
        }
    }

    pub fn clear(&mut self) {
        self.entry = Entry::Number("0".to_string());
        self.pending.clear();
        self.caption.clear();
    }

    /// Removes the last character of the entry.
    pub fn backspace(&mut self) {
        match &mut self.entry {
            Entry::Number(text) if text.len() > 1 => {
                text.pop();
                if text.as_str() == "-" {
                    *text = "0".to_string();
                }
            }
            entry => *entry = Entry::Number("0".to_string()),
        }
    }

    pub fn negate(&mut self) {
        self.map_entry(|value| -value);
    }

    pub fn percent(&mut self) {
        self.map_entry(|value| value / 100.0);
    }

    pub fn toggle_angle_mode(&mut self) {
        self.angle_mode = self.angle_mode.toggled();
    }

    fn full_expression(&self) -> Option<String> {
        match &self.entry {
            Entry::Number(text) => Some(format!("{}{}", self.pending, without_trailing_point(text))),
            Entry::Error(_) => None,
        }
    }

    fn map_entry(&mut self, operation: impl Fn(f64) -> f64) {
        let Entry::Number(text) = &self.entry else {
            return;
        };
        self.entry = match text.parse::<f64>() {
            Ok(value) => Entry::Number(format_number(operation(value))),
            Err(_) => Entry::Error(EvalError::syntax(format!("malformed number '{}'", text))),
        };
    }

    fn fail(&mut self, error: EvalError) {
        debug!("calculator error: {}", error);
        self.entry = Entry::Error(error);
    }
}

/// An entry such as `5.` is still being typed; it counts as `5`.
fn without_trailing_point(text: &str) -> &str {
    text.strip_suffix('.').unwrap_or(text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use parameterized_macro::parameterized;
    use pretty_assertions::assert_eq;

    fn press_all(calculator: &mut Calculator, keys: &str) {
        for key in keys.split_whitespace() {
            calculator.press(key.parse().unwrap());
        }
    }

    fn calculator_after(keys: &str) -> Calculator {
        let mut calculator = Calculator::new();
        press_all(&mut calculator, keys);
        calculator
    }

    #[test]
    fn new_calculator_shows_zero_in_radians() {
        let calculator = Calculator::new();
        assert_eq!(calculator.display(), "0");
        assert_eq!(calculator.expression_line(), "");
        assert_eq!(calculator.angle_mode(), AngleMode::Radians);
    }

    #[parameterized(
        keys = {
            "1 2 . 5",
            ". 5",
            "0 0 7",
            "1 . . 2",
            "2 + 3 * 4 =",
            "1 0 / 4 =",
            "0 . 1 + 0 . 2 =",
            "9 backspace",
            "1 2 3 backspace",
            "5 neg",
            "5 neg backspace",
            "5 0 %",
            "7 + 8 esc",
            "4 sqrt",
            "2 + 1 x^2",
            "5 . + 1 =",
        },
        expected = {
            "12.5",
            "0.5",
            "7",
            "1.2",
            "14",
            "2.5",
            "0.3",
            "0",
            "12",
            "-5",
            "0",
            "0.5",
            "0",
            "2",
            "9",
            "6",
        }
    )]
    fn key_sequences_produce_display(keys: &str, expected: &str) {
        pretty_assertions::assert_eq!(calculator_after(keys).display(), expected);
    }

    #[test]
    fn operator_moves_entry_into_pending_expression() {
        let calculator = calculator_after("1 2 + 3");
        assert_eq!(calculator.expression_line(), "12 + ");
        assert_eq!(calculator.display(), "3");
    }

    #[test]
    fn result_can_be_used_in_next_calculation() {
        let calculator = calculator_after("2 * 3 = + 1 =");
        assert_eq!(calculator.display(), "7");
        assert_eq!(calculator.expression_line(), "6 + 1 =");
    }

    #[test]
    fn division_by_zero_shows_error_until_new_input() {
        let mut calculator = calculator_after("1 / 0 =");
        assert_eq!(calculator.display(), "Error");
        assert_eq!(calculator.last_error(), Some(&EvalError::DivisionByZero));

        calculator.press(Key::Operator('+'));
        assert_eq!(calculator.display(), "Error");

        calculator.press(Key::Digit('4'));
        assert_eq!(calculator.display(), "4");
        assert_eq!(calculator.last_error(), None);
    }

    #[test]
    fn scientific_function_records_caption() {
        let calculator = calculator_after("3 x^2");
        assert_eq!(calculator.display(), "9");
        assert_eq!(calculator.expression_line(), "square(3) =");
    }

    #[test]
    fn scientific_domain_error_shows_error() {
        let calculator = calculator_after("4 neg sqrt");
        assert_eq!(calculator.display(), "Error");
        assert!(matches!(
            calculator.last_error(),
            Some(EvalError::DomainError { .. })
        ));
    }

    #[test]
    fn degree_mode_is_used_for_trigonometry() {
        let mut calculator = calculator_after("mode 9 0 sin");
        assert_eq!(calculator.angle_mode(), AngleMode::Degrees);
        assert_eq!(calculator.display(), "1");

        calculator.press(Key::ToggleAngleMode);
        assert_eq!(calculator.angle_mode(), AngleMode::Radians);
    }

    #[test]
    fn backspace_clears_error() {
        let calculator = calculator_after("1 / 0 = backspace");
        assert_eq!(calculator.display(), "0");
    }

    #[parameterized(name = { "k", "sinh", "==" })]
    fn unknown_keys_are_rejected(name: &str) {
        assert!(name.parse::<Key>().is_err());
    }

    #[test]
    fn keyboard_aliases_map_to_keys() {
        assert_eq!("x".parse::<Key>(), Ok(Key::Operator('*')));
        assert_eq!("Enter".parse::<Key>(), Ok(Key::Equals));
        assert_eq!("Escape".parse::<Key>(), Ok(Key::Clear));
        assert_eq!(
            "ln".parse::<Key>(),
            Ok(Key::Function(ScientificFunction::Ln))
        );
    }
}
