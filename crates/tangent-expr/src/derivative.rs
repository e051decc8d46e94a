//! Derivatives of compiled expressions
//!
//! Symbolic differentiation is tried first. When it cannot handle the
//! expression (rounding functions, unknown names) the derivative falls back
//! to a central difference on the compiled function, and stays that way
//! for the lifetime of the [`Derivative`].

use crate::error::{DiffError, ExprError};
use crate::function::{compile, Function, VARIABLE};
use crate::simplify::simplify;
use tangent_parser::{BinaryOp, Constant, Expr, MathFunction, UnaryOp};

/// Step size for the central-difference fallback.
pub const NUMERICAL_STEP: f64 = 1e-8;

/// Display string used when no closed form is available.
pub const NUMERICAL_DISPLAY: &str = "f'(x)";

/// Which strategy a [`Derivative`] evaluates with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strategy {
    Symbolic,
    Numerical,
}

impl std::fmt::Display for Strategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Strategy::Symbolic => write!(f, "symbolic"),
            Strategy::Numerical => write!(f, "numerical"),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Derivative {
    /// Closed-form derivative, compiled like any other expression
    Symbolic { expr: Expr, function: Function },
    /// Central difference over the original function
    Numerical { base: Function },
}

impl Derivative {
    /// Differentiate an already parsed expression. Never fails.
    pub fn of(expr: &Expr) -> Self {
        match symbolic_derivative(expr, VARIABLE) {
            Ok(derivative) => {
                let function = Function::from_expr(derivative.clone());
                Derivative::Symbolic {
                    expr: derivative,
                    function,
                }
            }
            Err(reason) => {
                tracing::debug!(
                    expression = %expr,
                    %reason,
                    "symbolic differentiation failed, using central difference"
                );
                Derivative::Numerical {
                    base: Function::from_expr(expr.clone()),
                }
            }
        }
    }

    /// Evaluate `f'(x)`. Like [`Function::call`], faults come back as `NaN`.
    pub fn call(&self, x: f64) -> f64 {
        match self {
            Derivative::Symbolic { function, .. } => function.call(x),
            Derivative::Numerical { base } => central_difference(base, x, NUMERICAL_STEP),
        }
    }

    pub fn strategy(&self) -> Strategy {
        match self {
            Derivative::Symbolic { .. } => Strategy::Symbolic,
            Derivative::Numerical { .. } => Strategy::Numerical,
        }
    }

    pub fn is_symbolic(&self) -> bool {
        self.strategy() == Strategy::Symbolic
    }

    /// Text of the derivative for display only.
    pub fn display(&self) -> String {
        match self {
            Derivative::Symbolic { expr, .. } => expr.to_string(),
            Derivative::Numerical { .. } => NUMERICAL_DISPLAY.to_string(),
        }
    }
}

/// `f'(x) ≈ (f(x+h) - f(x-h)) / (2h)`
pub fn central_difference(f: &Function, x: f64, h: f64) -> f64 {
    (f.call(x + h) - f.call(x - h)) / (2.0 * h)
}

/// Parse and differentiate an expression string.
///
/// Only fails if the text cannot be parsed at all; any trouble on the
/// symbolic path falls back to the numerical derivative.
pub fn differentiate(expression: &str) -> Result<Derivative, ExprError> {
    let expr = compile(expression)?.expr().clone();
    Ok(Derivative::of(&expr))
}

/// Closed-form derivative of `expr` with respect to `var`, simplified.
pub fn symbolic_derivative(expr: &Expr, var: &str) -> Result<Expr, DiffError> {
    let raw = diff(expr, var)?;
    Ok(simplify(&raw))
}

fn diff(expr: &Expr, var: &str) -> Result<Expr, DiffError> {
    match expr {
        Expr::Number(_) => Ok(Expr::number(0.0)),
        Expr::Symbol(name) if name == var => Ok(Expr::number(1.0)),
        Expr::Symbol(name) => match Constant::from_name(name) {
            Some(_) => Ok(Expr::number(0.0)),
            None => Err(DiffError::UnknownSymbol(name.clone())),
        },
        Expr::Unary {
            op: UnaryOp::Neg,
            operand,
        } => Ok(Expr::neg(diff(operand, var)?)),
        Expr::Binary { op, left, right } => diff_binary(*op, left, right, var),
        Expr::Call { name, args } => {
            let function = MathFunction::from_name(name)
                .ok_or_else(|| DiffError::UnknownFunction(name.clone()))?;
            if args.len() != 1 {
                return Err(DiffError::Arity {
                    function: name.clone(),
                    got: args.len(),
                });
            }
            let u = &args[0];
            let outer = diff_function(function, u)?;
            // Chain rule
            Ok(Expr::mul(outer, diff(u, var)?))
        }
    }
}

fn diff_binary(op: BinaryOp, u: &Expr, v: &Expr, var: &str) -> Result<Expr, DiffError> {
    let du = diff(u, var)?;
    let dv = diff(v, var)?;
    let (u, v) = (u.clone(), v.clone());

    let result = match op {
        BinaryOp::Add => Expr::add(du, dv),
        BinaryOp::Sub => Expr::sub(du, dv),
        // (uv)' = u'v + uv'
        BinaryOp::Mul => Expr::add(Expr::mul(du, v), Expr::mul(u, dv)),
        // (u/v)' = (u'v - uv') / v^2
        BinaryOp::Div => Expr::div(
            Expr::sub(Expr::mul(du, v.clone()), Expr::mul(u, dv)),
            Expr::pow(v, Expr::number(2.0)),
        ),
        BinaryOp::Pow => {
            if !v.mentions(var) {
                // (u^c)' = c u^(c-1) u'
                Expr::mul(
                    Expr::mul(
                        v.clone(),
                        Expr::pow(u, Expr::sub(v, Expr::number(1.0))),
                    ),
                    du,
                )
            } else if !u.mentions(var) {
                // (c^v)' = c^v ln(c) v'
                Expr::mul(
                    Expr::mul(Expr::pow(u.clone(), v), Expr::call("log", u)),
                    dv,
                )
            } else {
                // (u^v)' = u^v (v' ln(u) + v u' / u)
                Expr::mul(
                    Expr::pow(u.clone(), v.clone()),
                    Expr::add(
                        Expr::mul(dv, Expr::call("log", u.clone())),
                        Expr::div(Expr::mul(v, du), u),
                    ),
                )
            }
        }
    };

    Ok(result)
}

/// Derivative of `function` at `u`, before the chain rule factor.
fn diff_function(function: MathFunction, u: &Expr) -> Result<Expr, DiffError> {
    let u = u.clone();
    let one = || Expr::number(1.0);
    let square = |e: Expr| Expr::pow(e, Expr::number(2.0));

    let result = match function {
        MathFunction::Sin => Expr::call("cos", u),
        MathFunction::Cos => Expr::neg(Expr::call("sin", u)),
        MathFunction::Tan => Expr::div(one(), square(Expr::call("cos", u))),
        MathFunction::Asin => Expr::div(
            one(),
            Expr::call("sqrt", Expr::sub(one(), square(u))),
        ),
        MathFunction::Acos => Expr::neg(Expr::div(
            one(),
            Expr::call("sqrt", Expr::sub(one(), square(u))),
        )),
        MathFunction::Atan => Expr::div(one(), Expr::add(one(), square(u))),
        MathFunction::Sinh => Expr::call("cosh", u),
        MathFunction::Cosh => Expr::call("sinh", u),
        MathFunction::Tanh => Expr::div(one(), square(Expr::call("cosh", u))),
        MathFunction::Log | MathFunction::Ln => Expr::div(one(), u),
        MathFunction::Log10 => Expr::div(
            one(),
            Expr::mul(u, Expr::call("log", Expr::number(10.0))),
        ),
        MathFunction::Exp => Expr::call("exp", u),
        MathFunction::Sqrt => Expr::div(one(), Expr::mul(Expr::number(2.0), Expr::call("sqrt", u))),
        // |u|' = |u| / u, undefined at 0
        MathFunction::Abs => Expr::div(Expr::call("abs", u.clone()), u),
        MathFunction::Ceil | MathFunction::Floor | MathFunction::Round | MathFunction::Sign => {
            return Err(DiffError::Unsupported(function.name().to_string()))
        }
    };

    Ok(result)
}
