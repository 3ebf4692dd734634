use crate::interpreter::error::EvalError;
use crate::interpreter::token::{Token, SYMBOLS};
use log::trace;
use std::iter::Peekable;
use std::str::CharIndices;

/// Splits an expression into tokens.
///
/// The whole expression is checked against the character whitelist before any
/// token is produced, so an illegal character is always reported as such even
/// when the expression is also malformed.
///
/// # Arguments
///
/// * `expression`: A text expression in infix format.
///
/// returns: The tokens of the expression, in the order they appear.
///
/// # Examples
///
/// ```
/// use math_toolkit::interpreter::lexer::tokenize;
/// use math_toolkit::interpreter::token::Token;
///
/// let tokens = tokenize("2 * (1.5 - 3)").unwrap();
/// assert_eq!(tokens[0], Token::LiteralNumber(2.0));
/// assert_eq!(tokens.len(), 7);
/// ```
pub fn tokenize(expression: &str) -> Result<Vec<Token>, EvalError> {
    if let Some(invalid) = expression.chars().find(|c| !is_whitelisted(*c)) {
        return Err(EvalError::InvalidCharacter(invalid));
    }
    if expression.trim().is_empty() {
        return Err(EvalError::syntax("empty expression"));
    }

    let mut tokens = Vec::new();
    let mut characters = expression.char_indices().peekable();

    while let Some(&(start, character)) = characters.peek() {
        match character {
            c if c.is_whitespace() => {
                characters.next();
            }
            c if c.is_ascii_digit() => {
                let end = consume_number(&mut characters, expression)?;
                tokens.push(expression[start..end].parse()?);
            }
            '.' => {
                return Err(EvalError::syntax(format!(
                    "number expected before '.' at position {}",
                    start
                )))
            }
            _ => {
                tokens.push(expression[start..start + 1].parse()?);
                characters.next();
            }
        }
    }

    trace!("tokenized {:?} into {:?}", expression, tokens);
    Ok(tokens)
}

fn is_whitelisted(character: char) -> bool {
    character.is_ascii_digit() || character.is_whitespace() || SYMBOLS.contains(&character)
}

/// Consumes `digit+ ('.' digit+)?` and returns the byte offset just past it.
fn consume_number(
    characters: &mut Peekable<CharIndices>,
    expression: &str,
) -> Result<usize, EvalError> {
    let mut end = consume_digits(characters, expression.len());

    if let Some(&(dot, '.')) = characters.peek() {
        characters.next();
        end = consume_digits(characters, expression.len());
        if end == dot + 1 {
            return Err(EvalError::syntax(format!(
                "digit expected after '.' at position {}",
                dot
            )));
        }
    }

    Ok(end)
}

fn consume_digits(characters: &mut Peekable<CharIndices>, length: usize) -> usize {
    while let Some(&(_, character)) = characters.peek() {
        if !character.is_ascii_digit() {
            break;
        }
        characters.next();
    }
    characters.peek().map_or(length, |&(index, _)| index)
}

#[cfg(test)]
mod tests {
    use super::*;
    use parameterized_macro::parameterized;
    use pretty_assertions::assert_eq;

    #[test]
    fn simple_expression_returns_tokens() {
        let tokens = tokenize("2+3.25").unwrap();
        assert_eq!(
            tokens,
            vec![
                Token::LiteralNumber(2.0),
                Token::Plus,
                Token::LiteralNumber(3.25)
            ]
        )
    }

    #[test]
    fn whitespace_separates_tokens() {
        let tokens = tokenize(" ( 10 /\t2 ) ").unwrap();
        assert_eq!(
            tokens,
            vec![
                Token::LeftParentheses,
                Token::LiteralNumber(10.0),
                Token::ForwardSlash,
                Token::LiteralNumber(2.0),
                Token::RightParentheses,
            ]
        )
    }

    #[test]
    fn minus_is_always_lexed_as_dash() {
        let tokens = tokenize("-4--2").unwrap();
        assert_eq!(
            tokens,
            vec![
                Token::Dash,
                Token::LiteralNumber(4.0),
                Token::Dash,
                Token::Dash,
                Token::LiteralNumber(2.0),
            ]
        )
    }

    #[parameterized(
        expression = { "2 $ 3", "sqrt(4)", "1,5", "2^3", "x" },
        invalid = { '$', 's', ',', '^', 'x' }
    )]
    fn characters_outside_whitelist_are_rejected(expression: &str, invalid: char) {
        pretty_assertions::assert_eq!(
            tokenize(expression).unwrap_err(),
            EvalError::InvalidCharacter(invalid)
        );
    }

    #[test]
    fn invalid_character_wins_over_syntax_error() {
        assert_eq!(
            tokenize("(( 1.. a").unwrap_err(),
            EvalError::InvalidCharacter('a')
        );
    }

    #[parameterized(expression = { "1.", ".5", "1.2.3", "3 + .", "", "   " })]
    fn malformed_input_is_a_syntax_error(expression: &str) {
        assert!(matches!(
            tokenize(expression),
            Err(EvalError::SyntaxError(_))
        ));
    }

    #[test]
    fn huge_literal_overflows() {
        let expression = "9".repeat(400);
        assert_eq!(
            tokenize(&expression).unwrap_err(),
            EvalError::NumericOverflow
        );
    }
}
