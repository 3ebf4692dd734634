use crate::interpreter::error::EvalError;
use std::fmt;
use std::fmt::Formatter;
use std::str;

/// A discrete part of an expression
#[derive(Clone, Copy, PartialEq)]
pub enum Token {
    LiteralNumber(f64),
    Plus,
    Dash,
    Asterisk,
    ForwardSlash,
    LeftParentheses,
    RightParentheses,
}

/// Every character an expression is allowed to contain, apart from digits and whitespace.
pub static SYMBOLS: [char; 7] = ['+', '-', '*', '/', '(', ')', '.'];

impl Token {
    pub fn is_operator(&self) -> bool {
        matches!(
            self,
            Token::Plus | Token::Dash | Token::Asterisk | Token::ForwardSlash
        )
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Token::LiteralNumber(value) => write!(f, "{}", value),
            Token::Plus => write!(f, "+"),
            Token::Dash => write!(f, "-"),
            Token::Asterisk => write!(f, "*"),
            Token::ForwardSlash => write!(f, "/"),
            Token::LeftParentheses => write!(f, "("),
            Token::RightParentheses => write!(f, ")"),
        }
    }
}

impl fmt::Debug for Token {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self)
    }
}

impl str::FromStr for Token {
    type Err = EvalError;

    fn from_str(input: &str) -> Result<Token, Self::Err> {
        match input {
            "+" => Ok(Token::Plus),
            "-" => Ok(Token::Dash),
            "*" => Ok(Token::Asterisk),
            "/" => Ok(Token::ForwardSlash),
            "(" => Ok(Token::LeftParentheses),
            ")" => Ok(Token::RightParentheses),
            input => parse_literal(input),
        }
    }
}

/// Parses `digit+ ('.' digit+)?`. Signs belong to the parser, not to literals.
fn parse_literal(text: &str) -> Result<Token, EvalError> {
    if let Some(invalid) = text
        .chars()
        .find(|c| !c.is_ascii_digit() && !SYMBOLS.contains(c))
    {
        return Err(EvalError::InvalidCharacter(invalid));
    }
    let (whole, fraction) = match text.split_once('.') {
        Some((whole, fraction)) => (whole, Some(fraction)),
        None => (text, None),
    };
    if !is_digits(whole) || !fraction.map_or(true, is_digits) {
        return Err(EvalError::syntax(format!("malformed number '{}'", text)));
    }
    let value = text
        .parse::<f64>()
        .map_err(|_| EvalError::syntax(format!("malformed number '{}'", text)))?;
    if !value.is_finite() {
        return Err(EvalError::NumericOverflow);
    }
    Ok(Token::LiteralNumber(value))
}

fn is_digits(text: &str) -> bool {
    !text.is_empty() && text.chars().all(|c| c.is_ascii_digit())
}

#[cfg(test)]
mod tests {
    use super::*;
    use parameterized_macro::parameterized;

    #[test]
    fn symbols_parse_into_their_tokens() {
        let tokens: Vec<Token> = ["+", "-", "*", "/", "(", ")"]
            .iter()
            .map(|symbol| symbol.parse().unwrap())
            .collect();

        assert_eq!(
            tokens,
            vec![
                Token::Plus,
                Token::Dash,
                Token::Asterisk,
                Token::ForwardSlash,
                Token::LeftParentheses,
                Token::RightParentheses,
            ]
        )
    }

    #[test]
    fn decimal_text_parses_into_literal() {
        let token: Token = "12.5".parse().unwrap();
        assert_eq!(token, Token::LiteralNumber(12.5))
    }

    #[test]
    fn letters_are_rejected_as_invalid_characters() {
        let error = "12a".parse::<Token>().unwrap_err();
        assert_eq!(error, EvalError::InvalidCharacter('a'))
    }

    #[test]
    fn only_arithmetic_symbols_are_operators() {
        assert!(Token::Dash.is_operator());
        assert!(!Token::LeftParentheses.is_operator());
    }

    #[parameterized(text = { "-5", ".5", "5.", "1.2.3", "+1", "." })]
    fn literal_must_be_digits_with_optional_fraction(text: &str) {
        assert_eq!(
            text.parse::<Token>(),
            Err(EvalError::syntax(format!("malformed number '{}'", text)))
        );
    }

    #[test]
    fn literal_too_large_for_f64_overflows() {
        assert_eq!(
            "9".repeat(400).parse::<Token>(),
            Err(EvalError::NumericOverflow)
        );
    }
}
