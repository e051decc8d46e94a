use crate::ast::Expr;
use crate::parser::AstParser;
use crate::pest_parser::Rule;
use pest::iterators::Pair;

impl AstParser {
    pub(super) fn build_sum(&mut self, pair: Pair<Rule>) -> Result<Expr, String> {
        let mut inner = pair.into_inner();

        // Grammar: product ~ (add_op ~ product)*
        let first = inner.next().ok_or("Empty sum")?;
        let mut left = self.build_product(first)?;

        while let Some(op) = inner.next() {
            let right_pair = inner
                .next()
                .ok_or_else(|| format!("Missing operand after '{}'", op.as_str()))?;
            let right = self.build_product(right_pair)?;

            left = match op.as_str() {
                "+" => Expr::add(left, right),
                "-" => Expr::sub(left, right),
                other => return Err(format!("Unknown additive operator: {}", other)),
            };
        }

        Ok(left)
    }

    pub(super) fn build_product(&mut self, pair: Pair<Rule>) -> Result<Expr, String> {
        let mut inner = pair.into_inner();

        // Grammar: unary ~ ((mul_op ~ unary) | implicit)*
        let first = inner.next().ok_or("Empty product")?;
        let mut left = self.build_unary(first)?;

        while let Some(next) = inner.next() {
            match next.as_rule() {
                Rule::mul_op => {
                    let right_pair = inner
                        .next()
                        .ok_or_else(|| format!("Missing operand after '{}'", next.as_str()))?;
                    let right = self.build_unary(right_pair)?;

                    left = match next.as_str() {
                        "*" => Expr::mul(left, right),
                        "/" => Expr::div(left, right),
                        other => {
                            return Err(format!("Unknown multiplicative operator: {}", other))
                        }
                    };
                }
                Rule::implicit => {
                    // `2x`, `3(x + 1)`, `(x - 1)(x + 1)`
                    let power = next.into_inner().next().ok_or("Empty implicit factor")?;
                    let right = self.build_power(power)?;
                    left = Expr::mul(left, right);
                }
                _ => return Err(format!("Unexpected rule in product: {:?}", next.as_rule())),
            }
        }

        Ok(left)
    }

    pub(super) fn build_unary(&mut self, pair: Pair<Rule>) -> Result<Expr, String> {
        let mut negations = 0usize;
        let mut operand = None;

        // Grammar: sign* ~ power
        for part in pair.into_inner() {
            match part.as_rule() {
                Rule::sign => {
                    if part.as_str() == "-" {
                        negations += 1;
                    }
                }
                Rule::power => operand = Some(self.build_power(part)?),
                _ => return Err(format!("Unexpected rule in unary: {:?}", part.as_rule())),
            }
        }

        let operand = operand.ok_or("Missing operand after sign")?;
        if negations % 2 == 1 {
            Ok(Expr::neg(operand))
        } else {
            Ok(operand)
        }
    }

    pub(super) fn build_power(&mut self, pair: Pair<Rule>) -> Result<Expr, String> {
        let mut inner = pair.into_inner();

        // Grammar: operand ~ ("^" ~ unary)?
        let base_pair = inner.next().ok_or("Empty power expression")?;
        let base = self.build_operand(base_pair)?;

        match inner.next() {
            Some(exponent) => {
                // Right associative: the exponent is itself a full unary/power chain
                let exponent = self.build_unary(exponent)?;
                Ok(Expr::pow(base, exponent))
            }
            None => Ok(base),
        }
    }
}
