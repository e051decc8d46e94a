use crate::ast::Expr;
use crate::parser::AstParser;
use pest::error::LineColLocation;
use pest::Parser;
use pest_derive::Parser;
use thiserror::Error;

#[derive(Parser)]
#[grammar = "grammar.pest"]
pub struct ExpressionParser;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ParseError {
    /// Input rejected by the grammar
    #[error("{message} at line {line}, column {column}")]
    Syntax {
        line: usize,
        column: usize,
        message: String,
    },

    /// Parse tree accepted but could not be turned into an expression
    #[error("{0}")]
    Build(String),
}

impl ParseError {
    fn from_pest(err: pest::error::Error<Rule>) -> Self {
        let err = err.renamed_rules(rule_label);
        let (line, column) = match err.line_col {
            LineColLocation::Pos(pos) => pos,
            LineColLocation::Span(start, _) => start,
        };
        ParseError::Syntax {
            line,
            column,
            message: err.variant.message().into_owned(),
        }
    }
}

/// Human-readable names for grammar rules in error messages
fn rule_label(rule: &Rule) -> String {
    match rule {
        Rule::EOI => "end of input",
        Rule::number => "number",
        Rule::identifier | Rule::symbol | Rule::call => "name",
        Rule::group => "\"(\"",
        Rule::add_op | Rule::sign => "\"+\" or \"-\"",
        Rule::mul_op => "\"*\" or \"/\"",
        Rule::sum | Rule::product | Rule::unary | Rule::power | Rule::implicit => "expression",
        Rule::arguments => "argument",
        _ => "input",
    }
    .to_string()
}

/// Parse a single expression such as `x^2 - 2` or `sin(x) / x`.
pub fn parse(source: &str) -> Result<Expr, ParseError> {
    let mut pairs =
        ExpressionParser::parse(Rule::expression, source).map_err(ParseError::from_pest)?;

    let expression = pairs
        .next()
        .ok_or_else(|| ParseError::Build("Empty parse result".to_string()))?;

    let mut parser = AstParser::new();
    parser.build_expression(expression).map_err(ParseError::Build)
}
