//! Constant folding over literal values (spec §4.6).
//!
//! [`LiteralReducer`] is the one concrete [`Transformer`] this crate
//! ships: it folds a leading `Sign` into the literal it applies to,
//! producing a synthesized literal with no source lexeme when the sign
//! is `-`. Every other node passes through unchanged via the trait's
//! defaults.

use crate::ast::{Expr, SignOp};
use crate::literal::{FloatLiteral, IntegerLiteral};
use crate::visit::Transformer;

/// Folds `Sign(-, IntegerLiteral)` and `Sign(-, FloatLiteral)` into a
/// single literal node carrying the negated value. `Sign(+, _)` folds
/// away to its operand unchanged. Any other operand (a name reference,
/// a call, ...) is left as an unfolded `Sign` node — negation only
/// folds through literals.
#[derive(Debug, Default)]
pub struct LiteralReducer;

impl<'src> Transformer<'src> for LiteralReducer {
    fn sign(&mut self, node: Expr<'src>) -> Expr<'src> {
        let Expr::Sign(op, inner) = node else {
            unreachable!("accept_expr only calls sign() with a Sign node")
        };

        if op == SignOp::Plus {
            return *inner;
        }

        match *inner {
            Expr::IntegerLiteral(lit) => {
                let value = match lit.value() {
                    Ok(value) => -value,
                    Err(_) => return Expr::Sign(op, Box::new(Expr::IntegerLiteral(lit))),
                };
                let lexeme = format!("-{}", lit.lexeme);
                Expr::IntegerLiteral(IntegerLiteral::with_value(lexeme, value))
            }
            Expr::FloatLiteral(lit) => {
                let value = match lit.value() {
                    Ok(value) => -value,
                    Err(_) => return Expr::Sign(op, Box::new(Expr::FloatLiteral(lit))),
                };
                let lexeme = format!("-{}", lit.lexeme);
                Expr::FloatLiteral(FloatLiteral::with_value(lexeme, value))
            }
            other => Expr::Sign(op, Box::new(other)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::literal::IntegerLiteral as AstIntegerLiteral;
    use crate::visit::accept_expr;
    use rulelang_lex::token;

    fn int_literal(lexeme: &'static str) -> Expr<'static> {
        Expr::IntegerLiteral(AstIntegerLiteral::from_token(token::IntegerLiteral::new(
            lexeme,
        )))
    }

    #[test]
    fn negative_integer_literal_folds_into_a_single_node() {
        let expr = Expr::Sign(SignOp::Minus, Box::new(int_literal("5")));
        let folded = accept_expr(expr, &mut LiteralReducer);
        assert_eq!(folded.to_string(), "DecimalIntegerLiteral(-5)");
    }

    #[test]
    fn positive_sign_folds_away_without_changing_the_literal() {
        let expr = Expr::Sign(SignOp::Plus, Box::new(int_literal("5")));
        let folded = accept_expr(expr, &mut LiteralReducer);
        assert_eq!(folded.to_string(), "DecimalIntegerLiteral(5)");
    }

    #[test]
    fn sign_over_a_non_literal_operand_does_not_fold() {
        let expr = Expr::Sign(
            SignOp::Minus,
            Box::new(Expr::NameReference(vec![rulelang_util::Symbol::intern("x")])),
        );
        let folded = accept_expr(expr, &mut LiteralReducer);
        assert_eq!(folded.to_string(), "Sign(-x)");
    }
}
