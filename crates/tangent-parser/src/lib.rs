pub mod ast;
pub mod display;
pub mod parser;
pub mod pest_parser;
pub mod vocabulary;

// Re-export commonly used items
pub use ast::{BinaryOp, Expr, UnaryOp};
pub use pest_parser::{parse, ParseError};
pub use vocabulary::{Constant, MathFunction};
