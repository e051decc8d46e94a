//! Compiled functions of one variable
//!
//! An [`Expr`] is lowered once into a resolved node tree: the bound
//! variable, the constants and the built-in functions are looked up at
//! compile time. Names that resolve to nothing are kept as fault nodes so
//! that compiling never fails on them; they fault when evaluated instead.

use crate::error::{EvalFault, ExprError};
use tangent_parser::{BinaryOp, Constant, Expr, MathFunction, UnaryOp};

/// Name of the bound variable.
pub const VARIABLE: &str = "x";

#[derive(Debug, Clone, PartialEq)]
enum Node {
    Const(f64),
    Variable,
    Neg(Box<Node>),
    Binary(BinaryOp, Box<Node>, Box<Node>),
    Call(MathFunction, Box<Node>),
    Fault(EvalFault),
}

impl Node {
    fn lower(expr: &Expr) -> Node {
        match expr {
            Expr::Number(n) => Node::Const(*n),
            Expr::Symbol(name) if name == VARIABLE => Node::Variable,
            Expr::Symbol(name) => match Constant::from_name(name) {
                Some(c) => Node::Const(c.value()),
                None => Node::Fault(EvalFault::UnknownSymbol(name.clone())),
            },
            Expr::Unary {
                op: UnaryOp::Neg,
                operand,
            } => Node::Neg(Box::new(Node::lower(operand))),
            Expr::Binary { op, left, right } => Node::Binary(
                *op,
                Box::new(Node::lower(left)),
                Box::new(Node::lower(right)),
            ),
            Expr::Call { name, args } => match MathFunction::from_name(name) {
                Some(function) if args.len() == 1 => {
                    Node::Call(function, Box::new(Node::lower(&args[0])))
                }
                Some(_) => Node::Fault(EvalFault::Arity {
                    function: name.clone(),
                    expected: 1,
                    got: args.len(),
                }),
                None => Node::Fault(EvalFault::UnknownFunction(name.clone())),
            },
        }
    }

    fn eval(&self, x: f64) -> Result<f64, EvalFault> {
        match self {
            Node::Const(c) => Ok(*c),
            Node::Variable => Ok(x),
            Node::Neg(operand) => Ok(-operand.eval(x)?),
            Node::Binary(op, left, right) => {
                let l = left.eval(x)?;
                let r = right.eval(x)?;
                apply_binary(*op, l, r)
            }
            Node::Call(function, arg) => apply_function(*function, arg.eval(x)?),
            Node::Fault(fault) => Err(fault.clone()),
        }
    }

    /// Leftmost fault that no value of `x` can avoid.
    fn unresolved(&self) -> Option<&EvalFault> {
        match self {
            Node::Const(_) | Node::Variable => None,
            Node::Neg(operand) | Node::Call(_, operand) => operand.unresolved(),
            Node::Binary(_, left, right) => left.unresolved().or_else(|| right.unresolved()),
            Node::Fault(fault) => fault.is_unresolved().then_some(fault),
        }
    }
}

fn apply_binary(op: BinaryOp, l: f64, r: f64) -> Result<f64, EvalFault> {
    match op {
        BinaryOp::Add => Ok(l + r),
        BinaryOp::Sub => Ok(l - r),
        BinaryOp::Mul => Ok(l * r),
        BinaryOp::Div => {
            if r == 0.0 {
                return Err(EvalFault::DivisionByZero);
            }
            Ok(l / r)
        }
        BinaryOp::Pow => {
            let result = l.powf(r);
            // Negative base with a fractional exponent has no real value
            if result.is_nan() && !l.is_nan() && !r.is_nan() {
                return Err(EvalFault::Domain {
                    function: "pow",
                    arg: l,
                });
            }
            Ok(result)
        }
    }
}

fn apply_function(function: MathFunction, x: f64) -> Result<f64, EvalFault> {
    let domain = |ok: bool| {
        if ok || x.is_nan() {
            Ok(())
        } else {
            Err(EvalFault::Domain {
                function: function.name(),
                arg: x,
            })
        }
    };

    let value = match function {
        MathFunction::Sin => x.sin(),
        MathFunction::Cos => x.cos(),
        MathFunction::Tan => x.tan(),
        MathFunction::Asin => {
            domain((-1.0..=1.0).contains(&x))?;
            x.asin()
        }
        MathFunction::Acos => {
            domain((-1.0..=1.0).contains(&x))?;
            x.acos()
        }
        MathFunction::Atan => x.atan(),
        MathFunction::Sinh => x.sinh(),
        MathFunction::Cosh => x.cosh(),
        MathFunction::Tanh => x.tanh(),
        MathFunction::Log | MathFunction::Ln => {
            domain(x >= 0.0)?;
            x.ln()
        }
        MathFunction::Log10 => {
            domain(x >= 0.0)?;
            x.log10()
        }
        MathFunction::Exp => x.exp(),
        MathFunction::Sqrt => {
            domain(x >= 0.0)?;
            x.sqrt()
        }
        MathFunction::Abs => x.abs(),
        MathFunction::Ceil => x.ceil(),
        MathFunction::Floor => x.floor(),
        MathFunction::Round => x.round(),
        MathFunction::Sign => {
            if x > 0.0 {
                1.0
            } else if x < 0.0 {
                -1.0
            } else {
                // sign(0) == 0, NaN stays NaN
                x
            }
        }
    };

    Ok(value)
}

/// A real function of `x` compiled from an expression.
///
/// [`Function::call`] never fails: any evaluation fault is reported as
/// `NaN`, which is how "undefined at this point" is represented.
#[derive(Debug, Clone, PartialEq)]
pub struct Function {
    expr: Expr,
    root: Node,
}

impl Function {
    pub fn from_expr(expr: Expr) -> Self {
        let root = Node::lower(&expr);
        Function { expr, root }
    }

    /// Evaluate at `x`, folding faults into `NaN`.
    pub fn call(&self, x: f64) -> f64 {
        self.try_call(x).unwrap_or(f64::NAN)
    }

    /// Evaluate at `x`, reporting the fault if there is one.
    pub fn try_call(&self, x: f64) -> Result<f64, EvalFault> {
        self.root.eval(x)
    }

    pub fn expr(&self) -> &Expr {
        &self.expr
    }

    /// An unknown name or bad call anywhere in the expression, even where
    /// evaluation would stop earlier on a domain fault.
    pub fn unresolved(&self) -> Option<&EvalFault> {
        self.root.unresolved()
    }
}

/// Compile an expression string into a [`Function`].
///
/// Fails only when the text cannot be parsed.
pub fn compile(expression: &str) -> Result<Function, ExprError> {
    let expr = tangent_parser::parse(expression)?;
    Ok(Function::from_expr(expr))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_compile_polynomial() {
        let f = compile("x^2 - 2").unwrap();
        assert_eq!(f.call(3.0), 7.0);
        assert_eq!(f.call(0.0), -2.0);
    }

    #[test]
    fn test_constants_and_functions() {
        let f = compile("sin(pi / 2) + ln(e) + sqrt(x)").unwrap();
        assert_relative_eq!(f.call(4.0), 4.0, epsilon = 1e-12);

        let g = compile("log10(x) + log(x)").unwrap();
        assert_relative_eq!(g.call(10.0), 1.0 + 10f64.ln(), epsilon = 1e-12);
    }

    #[test]
    fn test_faults_become_nan() {
        assert!(compile("1/x").unwrap().call(0.0).is_nan());
        assert!(compile("sqrt(x)").unwrap().call(-1.0).is_nan());
        assert!(compile("asin(x)").unwrap().call(2.0).is_nan());
        assert!(compile("ln(x)").unwrap().call(-3.0).is_nan());
        assert!(compile("x^0.5").unwrap().call(-4.0).is_nan());
        assert!(compile("y + x").unwrap().call(1.0).is_nan());
        assert!(compile("foo(x)").unwrap().call(1.0).is_nan());
    }

    #[test]
    fn test_try_call_reports_fault() {
        let f = compile("qwerty").unwrap();
        assert_eq!(
            f.try_call(1.0),
            Err(EvalFault::UnknownSymbol("qwerty".to_string()))
        );

        let g = compile("sin(x, 2)").unwrap();
        assert!(matches!(g.try_call(1.0), Err(EvalFault::Arity { got: 2, .. })));

        let h = compile("sqrt(x)").unwrap();
        assert!(matches!(
            h.try_call(-1.0),
            Err(EvalFault::Domain { function: "sqrt", .. })
        ));
    }

    #[test]
    fn test_log_of_zero_is_infinite_not_fault() {
        let f = compile("ln(x)").unwrap();
        assert_eq!(f.try_call(0.0), Ok(f64::NEG_INFINITY));
    }

    #[test]
    fn test_rounding_and_sign() {
        let f = compile("sign(x)").unwrap();
        assert_eq!(f.call(-3.0), -1.0);
        assert_eq!(f.call(0.0), 0.0);
        assert_eq!(f.call(2.0), 1.0);
        assert_eq!(compile("round(x)").unwrap().call(2.5), 3.0);
        assert_eq!(compile("floor(x)").unwrap().call(-0.5), -1.0);
        assert_eq!(compile("ceil(x)").unwrap().call(0.1), 1.0);
    }

    #[test]
    fn test_unresolved_found_past_domain_fault() {
        let f = compile("sqrt(-x) + y").unwrap();
        assert!(matches!(f.try_call(1.0), Err(EvalFault::Domain { .. })));
        assert_eq!(f.unresolved(), Some(&EvalFault::UnknownSymbol("y".to_string())));
        assert_eq!(compile("sqrt(-x) / 0").unwrap().unresolved(), None);
    }

    #[test]
    fn test_compile_rejects_unparsable() {
        assert!(matches!(
            compile("x +"),
            Err(ExprError::InvalidExpression(_))
        ));
    }
}
