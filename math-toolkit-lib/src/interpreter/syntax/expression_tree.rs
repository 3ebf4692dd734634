use crate::interpreter::operator::{BinaryOperator, UnaryOperator};
use crate::interpreter::syntax::syntax_visitor::{
    walk_binary_operation, walk_unary_operation, SyntaxVisitor,
};
use crate::interpreter::token::Token;
use ptree::{write_tree, TreeBuilder};
use std::fmt;
use std::fmt::{Debug, Display, Formatter};

#[derive(Clone, PartialEq)]
pub enum Node {
    // Terminal symbols (leaves)
    LiteralNumber(f64),
    // Non-terminal symbols (non-leaves)
    BinaryOperation {
        operator: BinaryOperator,
        left_operand: Box<Node>,
        right_operand: Box<Node>,
    },
    UnaryOperation {
        operator: UnaryOperator,
        operand: Box<Node>,
    },
}

/// Where a node sits relative to its parent, which decides whether it needs parentheses.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
enum Position {
    Left,
    Right,
    Operand,
}

impl Node {
    pub fn new_literal_number(value: f64) -> Node {
        Node::LiteralNumber(value)
    }

    pub fn new_binary_operation(
        operator: BinaryOperator,
        left_operand: Node,
        right_operand: Node,
    ) -> Node {
        Node::BinaryOperation {
            operator,
            left_operand: Box::new(left_operand),
            right_operand: Box::new(right_operand),
        }
    }

    pub fn new_binary_addition(left_operand: Node, right_operand: Node) -> Node {
        Self::new_binary_operation(BinaryOperator::Add, left_operand, right_operand)
    }

    pub fn new_binary_subtraction(left_operand: Node, right_operand: Node) -> Node {
        Self::new_binary_operation(BinaryOperator::Subtract, left_operand, right_operand)
    }

    pub fn new_binary_multiplication(left_operand: Node, right_operand: Node) -> Node {
        Self::new_binary_operation(BinaryOperator::Multiply, left_operand, right_operand)
    }

    pub fn new_binary_division(left_operand: Node, right_operand: Node) -> Node {
        Self::new_binary_operation(BinaryOperator::Divide, left_operand, right_operand)
    }

    pub fn new_negation(operand: Node) -> Node {
        Node::UnaryOperation {
            operator: UnaryOperator::Negate,
            operand: Box::new(operand),
        }
    }

    pub fn as_binary_operator(&self) -> Option<BinaryOperator> {
        match self {
            Node::LiteralNumber(_) | Node::UnaryOperation { .. } => None,
            Node::BinaryOperation { operator, .. } => Some(*operator),
        }
    }

    /// Calls the correct visitor method for the node variant on the given visitor.
    pub(crate) fn accept(&self, visitor: &mut impl SyntaxVisitor) {
        match self {
            Node::LiteralNumber(value) => visitor.visit_literal_number(*value),
            Node::BinaryOperation {
                operator,
                left_operand,
                right_operand,
            } => visitor.visit_binary_operation(operator, left_operand, right_operand),
            Node::UnaryOperation { operator, operand } => {
                visitor.visit_unary_operation(operator, operand)
            }
        }
    }

    /// The number of nodes in the tree rooted at this node.
    pub fn node_count(&self) -> usize {
        let mut counter = NodeCounter { count: 0 };
        self.accept(&mut counter);
        counter.count
    }

    /// Regenerates the infix tokens of the tree, with only the parentheses needed to
    /// parse back into the same tree.
    pub fn to_infix(&self) -> Vec<Token> {
        self.build_expression(None)
    }

    fn build_expression(&self, parent: Option<(&Node, Position)>) -> Vec<Token> {
        match self {
            Node::LiteralNumber(value) => vec![Token::LiteralNumber(*value)],
            Node::BinaryOperation {
                operator,
                left_operand,
                right_operand,
            } => {
                let mut tokens = Vec::new();
                let mut left_tokens = left_operand.build_expression(Some((self, Position::Left)));
                let mut right_tokens =
                    right_operand.build_expression(Some((self, Position::Right)));

                parenthesize_if(
                    &mut tokens,
                    || needs_parentheses(parent, *operator),
                    |tokens| {
                        tokens.append(&mut left_tokens);
                        tokens.push(operator.token());
                        tokens.append(&mut right_tokens);
                    },
                );

                tokens
            }
            Node::UnaryOperation { operator, operand } => {
                let mut tokens = vec![operator.token()];
                let mut operand_tokens = operand.build_expression(Some((self, Position::Operand)));

                parenthesize_if(
                    &mut tokens,
                    || !matches!(**operand, Node::LiteralNumber(value) if value.is_sign_positive()),
                    |tokens| tokens.append(&mut operand_tokens),
                );

                tokens
            }
        }
    }

    fn format_tree(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let mut visitor = TreeBuilderVisitor {
            builder: TreeBuilder::new("expression".into()),
        };
        self.accept(&mut visitor);

        let mut buffer: Vec<u8> = Vec::new();
        match write_tree(&visitor.builder.build(), &mut buffer) {
            Ok(_) => {}
            Err(_) => return Err(fmt::Error),
        }
        let text = match std::str::from_utf8(&buffer) {
            Ok(text) => text,
            Err(_) => return Err(fmt::Error),
        };
        f.write_str(text)
    }
}

impl Display for Node {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        self.format_tree(f)
    }
}

impl Debug for Node {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Node::LiteralNumber(value) => write!(f, "{:?}", value),
            Node::BinaryOperation {
                operator,
                left_operand,
                right_operand,
            } => write!(f, "{:?}({:?}, {:?})", operator, left_operand, right_operand),
            Node::UnaryOperation { operator, operand } => {
                write!(f, "{:?}({:?})", operator, operand)
            }
        }
    }
}

/// Operators bind left to right, so a right operand of equal precedence keeps its
/// parentheses: `1 - (2 - 3)` must not regenerate as `1 - 2 - 3`.
fn needs_parentheses(parent: Option<(&Node, Position)>, operator: BinaryOperator) -> bool {
    match parent {
        None => false,
        Some((parent_node, position)) => match parent_node.as_binary_operator() {
            Some(parent_operator) => {
                parent_operator.precedence_gt(&operator)
                    || (position == Position::Right && parent_operator.precedence_eq(&operator))
            }
            None => false,
        },
    }
}

fn parenthesize_if(
    tokens: &mut Vec<Token>,
    predicate: impl Fn() -> bool,
    mut build_interior: impl FnMut(&mut Vec<Token>),
) {
    let mut close_parentheses = false;

    if predicate() {
        tokens.push(Token::LeftParentheses);
        close_parentheses = true;
    }

    build_interior(tokens);

    if close_parentheses {
        tokens.push(Token::RightParentheses);
    }
}

struct NodeCounter {
    count: usize,
}

impl SyntaxVisitor for NodeCounter {
    fn visit_literal_number(&mut self, _value: f64) {
        self.count += 1;
    }
    fn visit_binary_operation(
        &mut self,
        _operator: &BinaryOperator,
        left_operand: &Node,
        right_operand: &Node,
    ) {
        self.count += 1;
        walk_binary_operation(self, left_operand, right_operand);
    }
    fn visit_unary_operation(&mut self, _operator: &UnaryOperator, operand: &Node) {
        self.count += 1;
        walk_unary_operation(self, operand);
    }
}

struct TreeBuilderVisitor {
    builder: TreeBuilder,
}

impl SyntaxVisitor for TreeBuilderVisitor {
    fn visit_literal_number(&mut self, value: f64) {
        self.builder.add_empty_child(format!("{}", value));
    }
    fn visit_binary_operation(
        &mut self,
        operator: &BinaryOperator,
        left_operand: &Node,
        right_operand: &Node,
    ) {
        self.builder.begin_child(format!("{}", operator));
        walk_binary_operation(self, left_operand, right_operand);
        self.builder.end_child();
    }
    fn visit_unary_operation(&mut self, operator: &UnaryOperator, operand: &Node) {
        self.builder.begin_child(format!("{} (negate)", operator));
        walk_unary_operation(self, operand);
        self.builder.end_child();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn number(value: f64) -> Node {
        Node::new_literal_number(value)
    }

    #[test]
    fn node_count_includes_operators_and_leaves() {
        // -(1 + 2) * 3
        let tree = Node::new_binary_multiplication(
            Node::new_negation(Node::new_binary_addition(number(1.0), number(2.0))),
            number(3.0),
        );
        assert_eq!(tree.node_count(), 6)
    }

    #[test]
    fn lower_precedence_child_is_parenthesized() {
        // (1 + 2) * 3
        let tree = Node::new_binary_multiplication(
            Node::new_binary_addition(number(1.0), number(2.0)),
            number(3.0),
        );
        assert_eq!(
            tree.to_infix(),
            vec![
                Token::LeftParentheses,
                Token::LiteralNumber(1.0),
                Token::Plus,
                Token::LiteralNumber(2.0),
                Token::RightParentheses,
                Token::Asterisk,
                Token::LiteralNumber(3.0),
            ]
        )
    }

    #[test]
    fn equal_precedence_right_child_keeps_parentheses() {
        // 8 / (4 / 2)
        let tree = Node::new_binary_division(
            number(8.0),
            Node::new_binary_division(number(4.0), number(2.0)),
        );
        assert_eq!(
            tree.to_infix(),
            vec![
                Token::LiteralNumber(8.0),
                Token::ForwardSlash,
                Token::LeftParentheses,
                Token::LiteralNumber(4.0),
                Token::ForwardSlash,
                Token::LiteralNumber(2.0),
                Token::RightParentheses,
            ]
        )
    }

    #[test]
    fn negated_literal_needs_no_parentheses() {
        let tree = Node::new_negation(number(5.0));
        assert_eq!(tree.to_infix(), vec![Token::Dash, Token::LiteralNumber(5.0)])
    }

    #[test]
    fn double_negation_is_parenthesized() {
        let tree = Node::new_negation(Node::new_negation(number(5.0)));
        assert_eq!(
            tree.to_infix(),
            vec![
                Token::Dash,
                Token::LeftParentheses,
                Token::Dash,
                Token::LiteralNumber(5.0),
                Token::RightParentheses,
            ]
        )
    }

    #[test]
    fn tree_display_lists_every_node() {
        let tree = Node::new_binary_subtraction(number(7.0), Node::new_negation(number(2.0)));
        let text = tree.to_string();

        assert!(text.starts_with("expression"));
        for label in ["-", "7", "2", "(negate)"] {
            assert!(text.contains(label), "missing {} in {}", label, text);
        }
    }
}
