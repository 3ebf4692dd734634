use crate::interpreter::error::EvalError;
use crate::interpreter::{evaluate_unrounded, round_result};
use log::debug;
use std::f64::consts::PI;
use std::fmt;
use std::fmt::Formatter;
use std::str;

/// An unary function applied to an already evaluated number.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum ScientificFunction {
    Sin,
    Cos,
    Tan,
    Sqrt,
    Log,
    Ln,
    Square,
}

/// How trigonometric functions interpret their input.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub enum AngleMode {
    #[default]
    Radians,
    Degrees,
}

impl AngleMode {
    pub fn toggled(self) -> AngleMode {
        match self {
            AngleMode::Radians => AngleMode::Degrees,
            AngleMode::Degrees => AngleMode::Radians,
        }
    }

    fn to_radians(self, angle: f64) -> f64 {
        match self {
            AngleMode::Radians => angle,
            AngleMode::Degrees => angle * PI / 180.0,
        }
    }
}

impl fmt::Display for AngleMode {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            AngleMode::Radians => write!(f, "RAD"),
            AngleMode::Degrees => write!(f, "DEG"),
        }
    }
}

impl ScientificFunction {
    pub const ALL: [ScientificFunction; 7] = [
        ScientificFunction::Sin,
        ScientificFunction::Cos,
        ScientificFunction::Tan,
        ScientificFunction::Sqrt,
        ScientificFunction::Log,
        ScientificFunction::Ln,
        ScientificFunction::Square,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            ScientificFunction::Sin => "sin",
            ScientificFunction::Cos => "cos",
            ScientificFunction::Tan => "tan",
            ScientificFunction::Sqrt => "sqrt",
            ScientificFunction::Log => "log",
            ScientificFunction::Ln => "ln",
            ScientificFunction::Square => "square",
        }
    }

    /// Applies the function to `value`. Trigonometric functions read `value` in `mode`.
    pub fn apply(&self, value: f64, mode: AngleMode) -> Result<f64, EvalError> {
        let domain_error = || EvalError::DomainError {
            function: *self,
            value,
        };
        let result = match self {
            ScientificFunction::Sin => mode.to_radians(value).sin(),
            ScientificFunction::Cos => mode.to_radians(value).cos(),
            ScientificFunction::Tan => mode.to_radians(value).tan(),
            ScientificFunction::Sqrt if value < 0.0 => return Err(domain_error()),
            ScientificFunction::Sqrt => value.sqrt(),
            ScientificFunction::Log | ScientificFunction::Ln if value <= 0.0 => {
                return Err(domain_error())
            }
            ScientificFunction::Log => value.log10(),
            ScientificFunction::Ln => value.ln(),
            ScientificFunction::Square => value * value,
        };
        if result.is_finite() {
            Ok(result)
        } else {
            Err(EvalError::NumericOverflow)
        }
    }
}

impl fmt::Display for ScientificFunction {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl str::FromStr for ScientificFunction {
    type Err = String;

    fn from_str(input: &str) -> Result<ScientificFunction, Self::Err> {
        match input.to_ascii_lowercase().as_str() {
            "sin" => Ok(ScientificFunction::Sin),
            "cos" => Ok(ScientificFunction::Cos),
            "tan" => Ok(ScientificFunction::Tan),
            "sqrt" | "√" => Ok(ScientificFunction::Sqrt),
            "log" => Ok(ScientificFunction::Log),
            "ln" => Ok(ScientificFunction::Ln),
            "square" | "pow2" | "x^2" | "x²" => Ok(ScientificFunction::Square),
            other => Err(format!("unknown scientific function '{}'", other)),
        }
    }
}

/// Evaluates an expression and applies a scientific function to its value.
///
/// # Arguments
///
/// * `expression`: A completed arithmetic expression.
/// * `function`: The function to apply to the value of the expression.
/// * `mode`: How trigonometric functions read their input.
///
/// returns: The function value, rounded to 8 decimal places.
///
/// # Examples
///
/// ```
/// use math_toolkit::interpreter::scientific::{evaluate_scientific, AngleMode, ScientificFunction};
///
/// let value = evaluate_scientific("45 * 2", ScientificFunction::Sin, AngleMode::Degrees);
/// assert_eq!(value, Ok(1.0));
/// ```
pub fn evaluate_scientific(
    expression: &str,
    function: ScientificFunction,
    mode: AngleMode,
) -> Result<f64, EvalError> {
    let value = evaluate_unrounded(expression)?;
    let result = function.apply(value, mode)?;
    debug!("{}({}) in {} = {}", function, value, mode, result);
    Ok(round_result(result))
}
