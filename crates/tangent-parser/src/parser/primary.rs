use crate::ast::Expr;
use crate::parser::AstParser;
use crate::pest_parser::Rule;
use pest::iterators::Pair;

impl AstParser {
    pub(super) fn build_operand(&mut self, pair: Pair<Rule>) -> Result<Expr, String> {
        match pair.as_rule() {
            Rule::number => {
                let num = pair
                    .as_str()
                    .parse::<f64>()
                    .map_err(|e| format!("Failed to parse number: {}", e))?;
                Ok(Expr::Number(num))
            }
            Rule::symbol => {
                let name = pair.into_inner().next().ok_or("Empty symbol")?;
                Ok(Expr::Symbol(name.as_str().to_string()))
            }
            Rule::call => self.build_call(pair),
            Rule::group => {
                let sum = pair.into_inner().next().ok_or("Empty parentheses")?;
                self.build_sum(sum)
            }
            _ => Err(format!("Unexpected operand rule: {:?}", pair.as_rule())),
        }
    }

    pub(super) fn build_call(&mut self, pair: Pair<Rule>) -> Result<Expr, String> {
        let mut inner = pair.into_inner();

        // Grammar: identifier ~ "(" ~ arguments? ~ ")"
        let name = inner
            .next()
            .ok_or("Missing function name in call")?
            .as_str()
            .to_string();

        let mut args = Vec::new();
        if let Some(arguments) = inner.next() {
            for arg in arguments.into_inner() {
                args.push(self.build_sum(arg)?);
            }
        }

        Ok(Expr::Call { name, args })
    }
}
