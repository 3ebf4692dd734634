use crate::interpreter::error::EvalError;
use crate::interpreter::operator::BinaryOperator;
use crate::interpreter::parser::{MAX_NESTING_DEPTH, MAX_OPERATIONS};
use crate::interpreter::syntax::expression_tree::Node;
use crate::interpreter::token::Token;
use std::collections::VecDeque;

/// Builds an expression tree from infix tokens following
///
/// ```text
/// expr   := term (('+' | '-') term)*
/// term   := factor (('*' | '/') factor)*
/// factor := '-'? (number | '(' expr ')')
/// ```
pub(super) struct RecursiveDescentParser {
    tokens: VecDeque<Token>,
    depth: usize,
    operations: usize,
}

impl RecursiveDescentParser {
    pub(super) fn new(tokens: Vec<Token>) -> RecursiveDescentParser {
        RecursiveDescentParser {
            tokens: VecDeque::from(tokens),
            depth: 0,
            operations: 0,
        }
    }

    pub(super) fn parse(mut self) -> Result<Node, EvalError> {
        if self.tokens.is_empty() {
            return Err(EvalError::syntax("empty expression"));
        }

        let root = self.parse_expression()?;

        match self.tokens.pop_front() {
            None => Ok(root),
            Some(Token::RightParentheses) => Err(EvalError::syntax("unmatched ')'")),
            Some(token) => Err(EvalError::syntax(format!("unexpected '{}'", token))),
        }
    }

    fn parse_expression(&mut self) -> Result<Node, EvalError> {
        let mut left_operand = self.parse_term()?;

        while let Some(operator) = self.next_operator_of(&[Token::Plus, Token::Dash]) {
            self.count_operation()?;
            let right_operand = self.parse_term()?;
            left_operand = Node::new_binary_operation(operator, left_operand, right_operand);
        }

        Ok(left_operand)
    }

    fn parse_term(&mut self) -> Result<Node, EvalError> {
        let mut left_operand = self.parse_factor()?;

        while let Some(operator) = self.next_operator_of(&[Token::Asterisk, Token::ForwardSlash])
        {
            self.count_operation()?;
            let right_operand = self.parse_factor()?;
            left_operand = Node::new_binary_operation(operator, left_operand, right_operand);
        }

        Ok(left_operand)
    }

    fn parse_factor(&mut self) -> Result<Node, EvalError> {
        if self.tokens.front() == Some(&Token::Dash) {
            self.tokens.pop_front();
            self.count_operation()?;
            let operand = self.parse_primary()?;
            return Ok(Node::new_negation(operand));
        }
        self.parse_primary()
    }

    fn parse_primary(&mut self) -> Result<Node, EvalError> {
        match self.tokens.pop_front() {
            Some(Token::LiteralNumber(value)) => Ok(Node::new_literal_number(value)),
            Some(Token::LeftParentheses) => {
                self.depth += 1;
                if self.depth > MAX_NESTING_DEPTH {
                    return Err(EvalError::syntax(format!(
                        "expression nested deeper than {} levels",
                        MAX_NESTING_DEPTH
                    )));
                }

                let inner = self.parse_expression()?;

                match self.tokens.pop_front() {
                    Some(Token::RightParentheses) => {
                        self.depth -= 1;
                        Ok(inner)
                    }
                    Some(token) => Err(EvalError::syntax(format!(
                        "expected ')' but found '{}'",
                        token
                    ))),
                    None => Err(EvalError::syntax("unmatched '('")),
                }
            }
            Some(token) => Err(EvalError::syntax(format!("unexpected '{}'", token))),
            None => Err(EvalError::syntax("unexpected end of expression")),
        }
    }

    fn count_operation(&mut self) -> Result<(), EvalError> {
        self.operations += 1;
        if self.operations > MAX_OPERATIONS {
            return Err(EvalError::syntax(format!(
                "expression has more than {} operations",
                MAX_OPERATIONS
            )));
        }
        Ok(())
    }

    /// Pops the front token if it is one of `accepted`, as the operator it stands for.
    fn next_operator_of(&mut self, accepted: &[Token]) -> Option<BinaryOperator> {
        let front = self.tokens.front()?;
        if !accepted.contains(front) {
            return None;
        }
        let operator = BinaryOperator::from_token(front)?;
        self.tokens.pop_front();
        Some(operator)
    }
}
