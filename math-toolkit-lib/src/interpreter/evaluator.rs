use crate::interpreter::error::EvalError;
use crate::interpreter::syntax::expression_tree::Node;

/// Computes the numeric value of an expression tree.
///
/// The result is not rounded; see [`crate::interpreter::evaluate`] for the
/// rounded value that is shown to users.
///
/// # Arguments
///
/// * `node`: The root of the tree to evaluate.
///
/// returns: The value of the tree, or the first error met in a depth-first walk.
///
/// # Examples
///
/// ```
/// # use math_toolkit::interpreter::error::EvalError;
/// # fn main() -> Result<(), EvalError> {
/// use math_toolkit::interpreter::convert;
/// use math_toolkit::interpreter::evaluator::evaluate_tree;
///
/// let tree = convert("1 / 3")?;
/// let value = evaluate_tree(&tree)?;
/// assert!((value - 0.333333).abs() < 1e-6);
/// # Ok(()) }
/// ```
pub fn evaluate_tree(node: &Node) -> Result<f64, EvalError> {
    match node {
        Node::LiteralNumber(value) => Ok(*value),
        Node::BinaryOperation {
            operator,
            left_operand,
            right_operand,
        } => {
            let left = evaluate_tree(left_operand)?;
            let right = evaluate_tree(right_operand)?;
            operator.evaluate(left, right)
        }
        Node::UnaryOperation { operator, operand } => {
            let value = evaluate_tree(operand)?;
            Ok(operator.evaluate(value))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn number(value: f64) -> Node {
        Node::new_literal_number(value)
    }

    #[test]
    fn literal_evaluates_to_itself() {
        assert_eq!(evaluate_tree(&number(4.5)).unwrap(), 4.5)
    }

    #[test]
    fn nested_operations_evaluate_bottom_up() {
        // (2 + 3) * -4
        let tree = Node::new_binary_multiplication(
            Node::new_binary_addition(number(2.0), number(3.0)),
            Node::new_negation(number(4.0)),
        );
        assert_eq!(evaluate_tree(&tree).unwrap(), -20.0)
    }

    #[test]
    fn zero_valued_subtree_as_divisor_is_division_by_zero() {
        // 1 / (2 - 2)
        let tree = Node::new_binary_division(
            number(1.0),
            Node::new_binary_subtraction(number(2.0), number(2.0)),
        );
        assert_eq!(evaluate_tree(&tree), Err(EvalError::DivisionByZero))
    }

    #[test]
    fn left_error_is_reported_before_right_side_is_evaluated() {
        // (1 / 0) * (1e200 * 1e200)
        let tree = Node::new_binary_multiplication(
            Node::new_binary_division(number(1.0), number(0.0)),
            Node::new_binary_multiplication(number(1e200), number(1e200)),
        );
        assert_eq!(evaluate_tree(&tree), Err(EvalError::DivisionByZero))
    }
}
