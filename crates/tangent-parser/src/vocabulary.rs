//! Built-in function and constant names
//!
//! The grammar accepts any identifier; this is the fixed set the engine
//! knows how to evaluate:
//! - Trigonometric: sin, cos, tan, asin, acos, atan
//! - Hyperbolic: sinh, cosh, tanh
//! - Exponential/Logarithmic: exp, log, ln, log10
//! - Rounding: ceil, floor, round
//! - Other: sqrt, abs, sign
//! - Constants: pi, e

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MathFunction {
    Sin,
    Cos,
    Tan,
    Asin,
    Acos,
    Atan,
    Sinh,
    Cosh,
    Tanh,
    Log,
    Log10,
    Ln,
    Exp,
    Sqrt,
    Abs,
    Ceil,
    Floor,
    Round,
    Sign,
}

impl MathFunction {
    pub const ALL: [MathFunction; 19] = [
        MathFunction::Sin,
        MathFunction::Cos,
        MathFunction::Tan,
        MathFunction::Asin,
        MathFunction::Acos,
        MathFunction::Atan,
        MathFunction::Sinh,
        MathFunction::Cosh,
        MathFunction::Tanh,
        MathFunction::Log,
        MathFunction::Log10,
        MathFunction::Ln,
        MathFunction::Exp,
        MathFunction::Sqrt,
        MathFunction::Abs,
        MathFunction::Ceil,
        MathFunction::Floor,
        MathFunction::Round,
        MathFunction::Sign,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            MathFunction::Sin => "sin",
            MathFunction::Cos => "cos",
            MathFunction::Tan => "tan",
            MathFunction::Asin => "asin",
            MathFunction::Acos => "acos",
            MathFunction::Atan => "atan",
            MathFunction::Sinh => "sinh",
            MathFunction::Cosh => "cosh",
            MathFunction::Tanh => "tanh",
            MathFunction::Log => "log",
            MathFunction::Log10 => "log10",
            MathFunction::Ln => "ln",
            MathFunction::Exp => "exp",
            MathFunction::Sqrt => "sqrt",
            MathFunction::Abs => "abs",
            MathFunction::Ceil => "ceil",
            MathFunction::Floor => "floor",
            MathFunction::Round => "round",
            MathFunction::Sign => "sign",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|f| f.name() == name)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Constant {
    Pi,
    E,
}

impl Constant {
    pub const ALL: [Constant; 2] = [Constant::Pi, Constant::E];

    pub fn name(&self) -> &'static str {
        match self {
            Constant::Pi => "pi",
            Constant::E => "e",
        }
    }

    pub fn value(&self) -> f64 {
        match self {
            Constant::Pi => std::f64::consts::PI,
            Constant::E => std::f64::consts::E,
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|c| c.name() == name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_function_names_round_trip() {
        for f in MathFunction::ALL {
            assert_eq!(MathFunction::from_name(f.name()), Some(f));
        }
        assert_eq!(MathFunction::from_name("sec"), None);
        assert_eq!(MathFunction::from_name("SIN"), None);
    }

    #[test]
    fn test_constants() {
        assert_eq!(Constant::from_name("pi"), Some(Constant::Pi));
        assert_eq!(Constant::from_name("e").map(|c| c.value()), Some(std::f64::consts::E));
        assert_eq!(Constant::from_name("x"), None);
    }
}
