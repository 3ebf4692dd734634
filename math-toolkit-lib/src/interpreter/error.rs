use crate::interpreter::scientific::ScientificFunction;

/// Why an expression could not be turned into a number.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum EvalError {
    #[error("invalid character in expression: {0:?}")]
    InvalidCharacter(char),

    #[error("syntax error: {0}")]
    SyntaxError(String),

    #[error("division by zero")]
    DivisionByZero,

    #[error("{function} is undefined for {value}")]
    DomainError {
        function: ScientificFunction,
        value: f64,
    },

    #[error("result is too large to represent")]
    NumericOverflow,
}

impl EvalError {
    pub(crate) fn syntax(message: impl Into<String>) -> EvalError {
        EvalError::SyntaxError(message.into())
    }
}
