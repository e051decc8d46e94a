mod operators;
mod primary;

use crate::ast::Expr;
use crate::pest_parser::Rule;
use pest::iterators::Pair;

/// Walks a pest parse tree and builds the [`Expr`] it describes.
pub struct AstParser;

impl AstParser {
    pub fn new() -> Self {
        AstParser
    }

    pub fn build_expression(&mut self, pair: Pair<Rule>) -> Result<Expr, String> {
        // Grammar: SOI ~ sum ~ EOI
        let sum = pair
            .into_inner()
            .find(|p| p.as_rule() == Rule::sum)
            .ok_or("Empty expression")?;

        self.build_sum(sum)
    }
}

impl Default for AstParser {
    fn default() -> Self {
        Self::new()
    }
}
