pub mod error;
pub mod evaluator;
pub mod lexer;
pub mod operator;
pub mod parser;
pub mod scientific;
pub mod syntax;
pub mod token;

use crate::interpreter::error::EvalError;
use crate::interpreter::evaluator::evaluate_tree;
use crate::interpreter::token::Token;
use anyhow::{Context, Result};
use log::{debug, trace};
use string_builder::Builder;
use syntax::expression_tree::Node;

/// Results are rounded to this many decimal places.
pub const DECIMAL_PLACES: i32 = 8;

/// Calculates the value of the given arithmetic expression.
///
/// # Arguments
///
/// * `expression`: A text expression in infix format, using only digits, `.`,
///   `+ - * /`, parentheses and whitespace.
///
/// returns: The value of the expression, rounded to 8 decimal places.
///
/// # Examples
///
/// ```
/// use math_toolkit::interpreter::evaluate;
/// use math_toolkit::interpreter::error::EvalError;
///
/// assert_eq!(evaluate("2 + 3 * 4"), Ok(14.0));
/// assert_eq!(evaluate("0.1 + 0.2"), Ok(0.3));
/// assert_eq!(evaluate("10 / 0"), Err(EvalError::DivisionByZero));
/// ```
pub fn evaluate(expression: &str) -> Result<f64, EvalError> {
    let value = evaluate_unrounded(expression)?;
    Ok(round_result(value))
}

pub(crate) fn evaluate_unrounded(expression: &str) -> Result<f64, EvalError> {
    let tree = convert(expression)?;
    trace!("expression tree of {:?}: {:?}", expression, tree);
    let value = evaluate_tree(&tree)?;
    debug!("{:?} = {}", expression, value);
    Ok(value)
}

/// Converts the given input string into an equivalent expression tree,
/// which is easier to evaluate than the original string.
///
/// # Arguments
///
/// * `expression`: The text-representation of the infix expression.
///
/// returns: The equivalent expression tree.
///
/// # Examples
///
/// ```
/// use math_toolkit::interpreter::convert;
/// # use math_toolkit::interpreter::error::EvalError;
///
/// # fn main() -> Result<(), EvalError> {
/// let tree = convert("(1 + 2) * 3")?;
/// assert_eq!(tree.node_count(), 5);
/// # Ok(()) }
/// ```
pub fn convert(expression: &str) -> Result<Node, EvalError> {
    let tokens = lexer::tokenize(expression)?;
    let expression_tree = parser::parse(tokens)?;
    Ok(expression_tree)
}

/// Rounds a value to [`DECIMAL_PLACES`] to hide binary floating point noise,
/// so that `0.1 + 0.2` reads as `0.3`.
///
/// Halves round towards positive infinity, so `-0.000000025` becomes
/// `-0.00000002`. Values too large to be scaled are returned unchanged, and a
/// rounded zero is always positive.
pub fn round_result(value: f64) -> f64 {
    let scale = 10f64.powi(DECIMAL_PLACES);
    let scaled = value * scale;
    if !scaled.is_finite() {
        return value;
    }
    let mut whole = scaled.round();
    if scaled - whole == 0.5 {
        // f64::round took a negative half away from zero
        whole += 1.0;
    }
    let rounded = whole / scale;
    if rounded == 0.0 {
        0.0
    } else {
        rounded
    }
}

/// Formats a result for display, without a trailing `.0` for whole numbers.
///
/// # Examples
///
/// ```
/// use math_toolkit::interpreter::format_number;
///
/// assert_eq!(format_number(14.0), "14");
/// assert_eq!(format_number(-0.0), "0");
/// assert_eq!(format_number(0.125), "0.125");
/// ```
pub fn format_number(value: f64) -> String {
    if value == 0.0 {
        return "0".to_string();
    }
    format!("{}", value)
}

/// Pretty-prints the given vector of tokens with added whitespace.
///
/// A dash that starts the expression or follows an operator or `(` is a unary
/// minus and is printed against its operand.
///
/// # Arguments
///
/// * `tokens`: The tokens to print.
///
/// returns: A pretty-printed text-version of the given tokens.
///
/// # Examples
///
/// ```
/// use math_toolkit::interpreter::tokens_to_string;
/// use math_toolkit::interpreter::token::Token;
/// # use anyhow::Result;
///
/// # fn main() -> Result<()> {
/// let tokens = vec![
///     Token::LiteralNumber(2.0),
///     Token::Asterisk,
///     Token::Dash,
///     Token::LiteralNumber(3.0),
/// ];
/// let pretty_printed_tokens = tokens_to_string(tokens)?;
/// assert_eq!(pretty_printed_tokens, "2 * -3");
/// # Ok::<(), anyhow::Error>(()) }
/// ```
pub fn tokens_to_string(tokens: Vec<Token>) -> Result<String> {
    let mut builder = Builder::new(tokens.len());
    let mut previous: Option<Token> = None;

    for token in tokens {
        match token {
            Token::Dash if is_unary_position(previous) => builder.append(token.to_string()),
            Token::Plus | Token::Dash | Token::Asterisk | Token::ForwardSlash => {
                builder.append(" ");
                builder.append(token.to_string());
                builder.append(" ");
            }
            _ => builder.append(token.to_string()),
        }
        previous = Some(token);
    }

    builder.string().context("Failed to build token string")
}

fn is_unary_position(previous: Option<Token>) -> bool {
    match previous {
        None | Some(Token::LeftParentheses) => true,
        Some(token) => token.is_operator(),
    }
}

/// Parses an expression and prints it back in its normalised form.
///
/// # Examples
///
/// ```
/// use math_toolkit::interpreter::normalize;
///
/// assert_eq!(normalize("1+((2)*((3-4))/(5))").unwrap(), "1 + 2 * (3 - 4) / 5");
/// ```
pub fn normalize(expression: &str) -> Result<String> {
    let tree = convert(expression)?;
    tokens_to_string(tree.to_infix())
}
