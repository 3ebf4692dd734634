mod recursive_descent;

use crate::interpreter::error::EvalError;
use crate::interpreter::parser::recursive_descent::RecursiveDescentParser;
use crate::interpreter::syntax::expression_tree::Node;
use crate::interpreter::token::Token;

/// Parentheses may nest at most this deep.
pub const MAX_NESTING_DEPTH: usize = 256;

/// An expression may contain at most this many operators, unary minus included.
/// This also bounds the depth of the expression tree.
pub const MAX_OPERATIONS: usize = 1000;

/// Parses the given infix tokens into an equivalent expression tree,
/// which is easier to evaluate than the original tokens.
///
/// # Arguments
///
/// * `infix_tokens`: The tokens to parse, in infix format.
///
/// returns: The equivalent expression tree.
///
/// # Examples
///
/// ```
/// use math_toolkit::interpreter::parser::parse;
/// use math_toolkit::interpreter::token::Token;
/// # use math_toolkit::interpreter::error::EvalError;
///
/// # fn main() -> Result<(), EvalError> {
/// let infix_tokens = vec![
///     Token::LiteralNumber(2.0),
///     Token::Asterisk,
///     Token::Dash,
///     Token::LiteralNumber(3.0),
/// ];
/// let tree = parse(infix_tokens)?;
/// let regenerated_tokens = tree.to_infix();
/// # Ok(()) }
/// ```
pub fn parse(infix_tokens: Vec<Token>) -> Result<Node, EvalError> {
    RecursiveDescentParser::new(infix_tokens).parse()
}
