//! Algebraic clean-up of generated expressions
//!
//! Differentiation rules produce trees full of `0 * u` and `u * 1`. A single
//! bottom-up pass applies constant folding and the identity rules below,
//! which is enough to print `x^2 - 2` as having derivative `2 * x`.
//!
//! - `0 + a`, `a + 0`, `a - 0` → `a`; `0 - a` → `-a`
//! - `a + -b` → `a - b`; `a - -b` → `a + b`
//! - `0 * a`, `a * 0`, `0 / a` → `0`
//! - `1 * a`, `a * 1`, `a / 1`, `a^1` → `a`; `a^0` → `1`
//! - `-1 * a` → `-a`; `a * c` → `c * a` for a number `c`
//! - `c1 * (c2 * a)` → `(c1 * c2) * a`
//! - `-(-a)` → `a`; `-c` → literal
//! - Function calls are never folded, so `log(10)` stays readable.

use tangent_parser::{BinaryOp, Expr, UnaryOp};

pub fn simplify(expr: &Expr) -> Expr {
    match expr {
        Expr::Number(_) | Expr::Symbol(_) => expr.clone(),
        Expr::Unary {
            op: UnaryOp::Neg,
            operand,
        } => simplify_neg(simplify(operand)),
        Expr::Binary { op, left, right } => {
            let left = simplify(left);
            let right = simplify(right);
            match op {
                BinaryOp::Add => simplify_add(left, right),
                BinaryOp::Sub => simplify_sub(left, right),
                BinaryOp::Mul => simplify_mul(left, right),
                BinaryOp::Div => simplify_div(left, right),
                BinaryOp::Pow => simplify_pow(left, right),
            }
        }
        Expr::Call { name, args } => Expr::Call {
            name: name.clone(),
            args: args.iter().map(simplify).collect(),
        },
    }
}

/// Fold `l op r` when both sides are literals and the result is a real number.
fn fold(op: BinaryOp, left: &Expr, right: &Expr) -> Option<Expr> {
    let (l, r) = (left.as_number()?, right.as_number()?);
    let value = match op {
        BinaryOp::Add => l + r,
        BinaryOp::Sub => l - r,
        BinaryOp::Mul => l * r,
        BinaryOp::Div if r != 0.0 => l / r,
        BinaryOp::Div => return None,
        BinaryOp::Pow => l.powf(r),
    };
    value.is_finite().then(|| Expr::Number(value))
}

fn simplify_neg(operand: Expr) -> Expr {
    match operand {
        Expr::Number(n) => Expr::Number(-n),
        Expr::Unary {
            op: UnaryOp::Neg,
            operand,
        } => *operand,
        other => Expr::neg(other),
    }
}

fn negated(expr: &Expr) -> Option<Expr> {
    match expr {
        Expr::Unary {
            op: UnaryOp::Neg,
            operand,
        } => Some((**operand).clone()),
        Expr::Number(n) if *n < 0.0 => Some(Expr::Number(-n)),
        _ => None,
    }
}

fn simplify_add(left: Expr, right: Expr) -> Expr {
    if let Some(folded) = fold(BinaryOp::Add, &left, &right) {
        return folded;
    }
    if left.is_number(0.0) {
        return right;
    }
    if right.is_number(0.0) {
        return left;
    }
    if let Some(inner) = negated(&right) {
        return Expr::sub(left, inner);
    }
    Expr::add(left, right)
}

fn simplify_sub(left: Expr, right: Expr) -> Expr {
    if let Some(folded) = fold(BinaryOp::Sub, &left, &right) {
        return folded;
    }
    if right.is_number(0.0) {
        return left;
    }
    if left.is_number(0.0) {
        return simplify_neg(right);
    }
    if let Some(inner) = negated(&right) {
        return Expr::add(left, inner);
    }
    Expr::sub(left, right)
}

fn simplify_mul(left: Expr, right: Expr) -> Expr {
    if let Some(folded) = fold(BinaryOp::Mul, &left, &right) {
        return folded;
    }
    if left.is_number(0.0) || right.is_number(0.0) {
        return Expr::Number(0.0);
    }
    if left.is_number(1.0) {
        return right;
    }
    if right.is_number(1.0) {
        return left;
    }
    if left.is_number(-1.0) {
        return simplify_neg(right);
    }
    if right.is_number(-1.0) {
        return simplify_neg(left);
    }

    // Keep literal coefficients on the left
    if right.as_number().is_some() && left.as_number().is_none() {
        return simplify_mul(right, left);
    }

    if let Some(c1) = left.as_number() {
        if let Expr::Binary {
            op: BinaryOp::Mul,
            left: inner_left,
            right: inner_right,
        } = &right
        {
            if let Some(c2) = inner_left.as_number() {
                return simplify_mul(Expr::Number(c1 * c2), (**inner_right).clone());
            }
        }
    }

    Expr::mul(left, right)
}

fn simplify_div(left: Expr, right: Expr) -> Expr {
    if let Some(folded) = fold(BinaryOp::Div, &left, &right) {
        return folded;
    }
    if left.is_number(0.0) && !right.is_number(0.0) {
        return Expr::Number(0.0);
    }
    if right.is_number(1.0) {
        return left;
    }
    if let Some(inner) = negated(&left) {
        if left.as_number().is_none() {
            return simplify_neg(Expr::div(inner, right));
        }
    }
    Expr::div(left, right)
}

fn simplify_pow(base: Expr, exponent: Expr) -> Expr {
    if let Some(folded) = fold(BinaryOp::Pow, &base, &exponent) {
        return folded;
    }
    if exponent.is_number(1.0) {
        return base;
    }
    if exponent.is_number(0.0) {
        return Expr::Number(1.0);
    }
    Expr::pow(base, exponent)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tangent_parser::parse;

    fn simplified(source: &str) -> String {
        simplify(&parse(source).unwrap()).to_string()
    }

    #[test]
    fn test_identities() {
        assert_eq!(simplified("0 + x"), "x");
        assert_eq!(simplified("x * 1"), "x");
        assert_eq!(simplified("1 * x"), "x");
        assert_eq!(simplified("0 * sin(x)"), "0");
        assert_eq!(simplified("x^1"), "x");
        assert_eq!(simplified("x^0"), "1");
        assert_eq!(simplified("x / 1"), "x");
        assert_eq!(simplified("0 - x"), "-x");
        assert_eq!(simplified("--x"), "x");
    }

    #[test]
    fn test_constant_folding() {
        assert_eq!(simplified("2 * 3 + x"), "6 + x");
        assert_eq!(simplified("x^(3 - 1)"), "x^2");
        assert_eq!(simplified("1 / 0"), "1 / 0");
    }

    #[test]
    fn test_coefficients_move_left() {
        assert_eq!(simplified("x * 2"), "2 * x");
        assert_eq!(simplified("3 * (2 * x)"), "6 * x");
        assert_eq!(simplified("x * -1"), "-x");
    }

    #[test]
    fn test_negation_absorbed_by_sum() {
        assert_eq!(simplified("x + -sin(x)"), "x - sin(x)");
        assert_eq!(simplified("x - -2"), "x + 2");
    }

    #[test]
    fn test_calls_are_not_folded() {
        assert_eq!(simplified("log(10)"), "log(10)");
    }
}
