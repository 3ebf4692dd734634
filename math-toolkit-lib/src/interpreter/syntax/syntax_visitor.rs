use crate::interpreter::operator::{BinaryOperator, UnaryOperator};
use crate::interpreter::syntax::expression_tree::Node;

/// If a method is not implemented, the default implementation will continue in a pre-order
/// traversal of the tree.
pub(crate) trait SyntaxVisitor: Sized {
    fn visit_literal_number(&mut self, _value: f64) {}
    fn visit_binary_operation(
        &mut self,
        _operation: &BinaryOperator,
        left_operand: &Node,
        right_operand: &Node,
    ) {
        walk_binary_operation(self, left_operand, right_operand)
    }
    fn visit_unary_operation(&mut self, _operation: &UnaryOperator, operand: &Node) {
        walk_unary_operation(self, operand)
    }
}

pub(crate) fn walk_binary_operation(
    visitor: &mut impl SyntaxVisitor,
    left_operand: &Node,
    right_operand: &Node,
) {
    left_operand.accept(visitor);
    right_operand.accept(visitor);
}

pub(crate) fn walk_unary_operation(visitor: &mut impl SyntaxVisitor, operand: &Node) {
    operand.accept(visitor);
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn create_complex_tree() -> Node {
        // 1 + -(2 - 3) * 4
        let one = Node::new_literal_number(1.0);
        let two = Node::new_literal_number(2.0);
        let three = Node::new_literal_number(3.0);
        let four = Node::new_literal_number(4.0);
        let minus = Node::new_negation(Node::new_binary_subtraction(two, three));
        let star = Node::new_binary_multiplication(minus, four);
        Node::new_binary_addition(one, star)
    }

    struct PrePostPrintVisitor {
        prints: Vec<String>,
    }

    impl SyntaxVisitor for PrePostPrintVisitor {
        fn visit_literal_number(&mut self, value: f64) {
            self.prints.push(format!("{}", value))
        }
        fn visit_binary_operation(
            &mut self,
            operation: &BinaryOperator,
            left_operand: &Node,
            right_operand: &Node,
        ) {
            self.prints.push(format!("{:?}", operation));
            walk_binary_operation(self, left_operand, right_operand);
            self.prints.push(format!("exit {:?}", operation));
        }
        fn visit_unary_operation(&mut self, operation: &UnaryOperator, operand: &Node) {
            self.prints.push(format!("{:?}", operation));
            walk_unary_operation(self, operand);
            self.prints.push(format!("exit {:?}", operation));
        }
    }

    struct LiteralCollector {
        literals: Vec<f64>,
    }

    impl SyntaxVisitor for LiteralCollector {
        fn visit_literal_number(&mut self, value: f64) {
            self.literals.push(value)
        }
    }

    #[test]
    fn walk_tree_prints_all_nodes_in_tree_in_pre_and_post_orders() {
        let root = create_complex_tree();
        println!("{}", root);
        let mut visitor = PrePostPrintVisitor { prints: vec![] };
        root.accept(&mut visitor);
        assert_eq!(
            visitor.prints,
            [
                "Add",
                "1",
                "Multiply",
                "Negate",
                "Subtract",
                "2",
                "3",
                "exit Subtract",
                "exit Negate",
                "4",
                "exit Multiply",
                "exit Add",
            ]
        )
    }

    #[test]
    fn default_walk_reaches_every_leaf_left_to_right() {
        let root = create_complex_tree();
        let mut visitor = LiteralCollector { literals: vec![] };
        root.accept(&mut visitor);
        assert_eq!(visitor.literals, vec![1.0, 2.0, 3.0, 4.0])
    }
}
