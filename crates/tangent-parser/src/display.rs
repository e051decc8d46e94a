//! Infix printing with the fewest parentheses that keep the tree intact.

use crate::ast::{BinaryOp, Expr, UnaryOp};
use std::fmt;

const PREC_SUM: u8 = 1;
const PREC_PRODUCT: u8 = 2;
const PREC_UNARY: u8 = 3;
const PREC_POWER: u8 = 4;
const PREC_ATOM: u8 = 5;

fn precedence(expr: &Expr) -> u8 {
    match expr {
        Expr::Number(n) if *n < 0.0 => PREC_UNARY,
        Expr::Number(_) | Expr::Symbol(_) | Expr::Call { .. } => PREC_ATOM,
        Expr::Unary { .. } => PREC_UNARY,
        Expr::Binary { op, .. } => match op {
            BinaryOp::Add | BinaryOp::Sub => PREC_SUM,
            BinaryOp::Mul | BinaryOp::Div => PREC_PRODUCT,
            BinaryOp::Pow => PREC_POWER,
        },
    }
}

fn write_operand(f: &mut fmt::Formatter<'_>, expr: &Expr, min_prec: u8) -> fmt::Result {
    if precedence(expr) < min_prec {
        write!(f, "({})", expr)
    } else {
        write!(f, "{}", expr)
    }
}

fn format_number(n: f64) -> String {
    if n.is_nan() {
        "NaN".to_string()
    } else if n == f64::INFINITY {
        "Infinity".to_string()
    } else if n == f64::NEG_INFINITY {
        "-Infinity".to_string()
    } else if n.fract() == 0.0 && n.abs() < 1e15 {
        format!("{}", n as i64)
    } else {
        format!("{}", n)
    }
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expr::Number(n) => write!(f, "{}", format_number(*n)),
            Expr::Symbol(name) => write!(f, "{}", name),
            Expr::Unary {
                op: UnaryOp::Neg,
                operand,
            } => {
                write!(f, "-")?;
                // `-(-x)` rather than `--x`
                write_operand(f, operand, PREC_POWER)
            }
            Expr::Binary { op, left, right } => match op {
                BinaryOp::Add | BinaryOp::Sub => {
                    write_operand(f, left, PREC_SUM)?;
                    write!(f, " {} ", op.symbol())?;
                    write_operand(f, right, PREC_SUM + 1)
                }
                BinaryOp::Mul | BinaryOp::Div => {
                    write_operand(f, left, PREC_PRODUCT)?;
                    write!(f, " {} ", op.symbol())?;
                    write_operand(f, right, PREC_PRODUCT + 1)
                }
                BinaryOp::Pow => {
                    write_operand(f, left, PREC_ATOM)?;
                    write!(f, "^")?;
                    write_operand(f, right, PREC_UNARY)
                }
            },
            Expr::Call { name, args } => {
                write!(f, "{}(", name)?;
                for (i, arg) in args.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", arg)?;
                }
                write!(f, ")")
            }
        }
    }
}
