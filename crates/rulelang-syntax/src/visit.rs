//! The visitor/transformer framework (spec §4.6).
//!
//! A [`Transformer`] is a record of per-variant rewrite callbacks, one
//! per `Expr`/`Stmt` variant plus one for `NamedType` — a defaulted
//! trait rather than the source's ~30-method visitor interface, per
//! the design note in spec §9. `accept_expr`/`accept_type`/`accept_stmt`
//! do the actual bottom-up walk: destructure the node, recursively
//! transform every child field into a fresh value, reassemble, and
//! only then hand the reassembled node to the matching callback. A
//! transformer that doesn't override a method gets the identity
//! behavior for that variant for free.

use crate::ast::{Expr, NamedType, Stmt};

/// Per-variant rewrite callbacks for one bottom-up tree walk.
///
/// Every method receives the node with its children already
/// transformed, and returns a (possibly different) node of the same
/// sort — callers splice the return value back into the parent.
pub trait Transformer<'src> {
    fn boolean_literal(&mut self, node: Expr<'src>) -> Expr<'src> {
        node
    }
    fn string_literal(&mut self, node: Expr<'src>) -> Expr<'src> {
        node
    }
    fn integer_literal(&mut self, node: Expr<'src>) -> Expr<'src> {
        node
    }
    fn float_literal(&mut self, node: Expr<'src>) -> Expr<'src> {
        node
    }
    fn name_reference(&mut self, node: Expr<'src>) -> Expr<'src> {
        node
    }
    fn context_field_access(&mut self, node: Expr<'src>) -> Expr<'src> {
        node
    }
    fn field_access(&mut self, node: Expr<'src>) -> Expr<'src> {
        node
    }
    fn array_access(&mut self, node: Expr<'src>) -> Expr<'src> {
        node
    }
    fn function_call(&mut self, node: Expr<'src>) -> Expr<'src> {
        node
    }
    fn labeled_expression(&mut self, node: Expr<'src>) -> Expr<'src> {
        node
    }
    fn composite_literal(&mut self, node: Expr<'src>) -> Expr<'src> {
        node
    }
    fn initializer(&mut self, node: Expr<'src>) -> Expr<'src> {
        node
    }
    fn sign(&mut self, node: Expr<'src>) -> Expr<'src> {
        node
    }
    fn logical_not(&mut self, node: Expr<'src>) -> Expr<'src> {
        node
    }
    fn bitwise_not(&mut self, node: Expr<'src>) -> Expr<'src> {
        node
    }
    fn exponent(&mut self, node: Expr<'src>) -> Expr<'src> {
        node
    }
    fn infix(&mut self, node: Expr<'src>) -> Expr<'src> {
        node
    }
    fn binary(&mut self, node: Expr<'src>) -> Expr<'src> {
        node
    }
    fn compare(&mut self, node: Expr<'src>) -> Expr<'src> {
        node
    }
    fn conditional(&mut self, node: Expr<'src>) -> Expr<'src> {
        node
    }

    fn named_type(&mut self, node: NamedType<'src>) -> NamedType<'src> {
        node
    }

    fn assignment(&mut self, node: Stmt<'src>) -> Stmt<'src> {
        node
    }
    fn initializer_assignment(&mut self, node: Stmt<'src>) -> Stmt<'src> {
        node
    }
    fn function_call_statement(&mut self, node: Stmt<'src>) -> Stmt<'src> {
        node
    }
}

/// Rewrite `ty`'s children bottom-up, then invoke `t.named_type`.
pub fn accept_type<'src>(ty: NamedType<'src>, t: &mut impl Transformer<'src>) -> NamedType<'src> {
    let dimensions = ty
        .dimensions
        .into_iter()
        .map(|dim| dim.map(|expr| accept_expr(expr, t)))
        .collect();
    t.named_type(NamedType {
        path: ty.path,
        dimensions,
    })
}

/// Rewrite `expr`'s children bottom-up, then invoke the callback
/// matching `expr`'s own variant.
pub fn accept_expr<'src>(expr: Expr<'src>, t: &mut impl Transformer<'src>) -> Expr<'src> {
    match expr {
        Expr::BooleanLiteral(..) => t.boolean_literal(expr),
        Expr::StringLiteral(_) => t.string_literal(expr),
        Expr::IntegerLiteral(_) => t.integer_literal(expr),
        Expr::FloatLiteral(_) => t.float_literal(expr),
        Expr::NameReference(_) => t.name_reference(expr),
        Expr::ContextFieldAccess(_) => t.context_field_access(expr),
        Expr::FieldAccess(value, name) => {
            let value = Box::new(accept_expr(*value, t));
            t.field_access(Expr::FieldAccess(value, name))
        }
        Expr::ArrayAccess(value, index) => {
            let value = Box::new(accept_expr(*value, t));
            let index = Box::new(accept_expr(*index, t));
            t.array_access(Expr::ArrayAccess(value, index))
        }
        Expr::FunctionCall(callee, args) => {
            let callee = Box::new(accept_expr(*callee, t));
            let args = args.into_iter().map(|arg| accept_expr(arg, t)).collect();
            t.function_call(Expr::FunctionCall(callee, args))
        }
        Expr::LabeledExpression(label, value) => {
            let value = Box::new(accept_expr(*value, t));
            t.labeled_expression(Expr::LabeledExpression(label, value))
        }
        Expr::CompositeLiteral(fields) => {
            let fields = fields.into_iter().map(|f| accept_expr(f, t)).collect();
            t.composite_literal(Expr::CompositeLiteral(fields))
        }
        Expr::Initializer(ty, fields) => {
            let ty = accept_type(ty, t);
            let fields = fields.into_iter().map(|f| accept_expr(f, t)).collect();
            t.initializer(Expr::Initializer(ty, fields))
        }
        Expr::Sign(op, inner) => {
            let inner = Box::new(accept_expr(*inner, t));
            t.sign(Expr::Sign(op, inner))
        }
        Expr::LogicalNot(inner) => {
            let inner = Box::new(accept_expr(*inner, t));
            t.logical_not(Expr::LogicalNot(inner))
        }
        Expr::BitwiseNot(inner) => {
            let inner = Box::new(accept_expr(*inner, t));
            t.bitwise_not(Expr::BitwiseNot(inner))
        }
        Expr::Exponent(base, exp) => {
            let base = Box::new(accept_expr(*base, t));
            let exp = Box::new(accept_expr(*exp, t));
            t.exponent(Expr::Exponent(base, exp))
        }
        Expr::Infix(lhs, name, rhs) => {
            let lhs = Box::new(accept_expr(*lhs, t));
            let rhs = Box::new(accept_expr(*rhs, t));
            t.infix(Expr::Infix(lhs, name, rhs))
        }
        Expr::Binary(op, lhs, lexeme, rhs) => {
            let lhs = Box::new(accept_expr(*lhs, t));
            let rhs = Box::new(accept_expr(*rhs, t));
            t.binary(Expr::Binary(op, lhs, lexeme, rhs))
        }
        Expr::Compare {
            values,
            value_ops,
            type_suffix,
        } => {
            let values = values.into_iter().map(|v| accept_expr(v, t)).collect();
            let type_suffix = type_suffix.map(|(op, ty)| (op, accept_type(ty, t)));
            t.compare(Expr::Compare {
                values,
                value_ops,
                type_suffix,
            })
        }
        Expr::Conditional(true_value, condition, false_value) => {
            let true_value = Box::new(accept_expr(*true_value, t));
            let condition = Box::new(accept_expr(*condition, t));
            let false_value = Box::new(accept_expr(*false_value, t));
            t.conditional(Expr::Conditional(true_value, condition, false_value))
        }
    }
}

/// Rewrite `stmt`'s children bottom-up, then invoke the callback
/// matching `stmt`'s own variant.
pub fn accept_stmt<'src>(stmt: Stmt<'src>, t: &mut impl Transformer<'src>) -> Stmt<'src> {
    match stmt {
        Stmt::Assignment { target, op, value } => {
            let target = accept_expr(target, t);
            let value = accept_expr(value, t);
            t.assignment(Stmt::Assignment { target, op, value })
        }
        Stmt::InitializerAssignment { target, composite } => {
            let target = accept_expr(target, t);
            let composite = accept_expr(composite, t);
            t.initializer_assignment(Stmt::InitializerAssignment { target, composite })
        }
        Stmt::FunctionCallStatement(call) => {
            let call = accept_expr(call, t);
            t.function_call_statement(Stmt::FunctionCallStatement(call))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rulelang_util::Symbol;

    struct CountNameReferences(usize);

    impl<'src> Transformer<'src> for CountNameReferences {
        fn name_reference(&mut self, node: Expr<'src>) -> Expr<'src> {
            self.0 += 1;
            node
        }
    }

    #[test]
    fn walk_visits_every_name_reference_bottom_up() {
        let expr = Expr::FieldAccess(
            Box::new(Expr::NameReference(vec![Symbol::intern("a")])),
            Symbol::intern("b"),
        );
        let mut counter = CountNameReferences(0);
        let rewritten = accept_expr(expr, &mut counter);
        assert_eq!(counter.0, 1);
        assert_eq!(rewritten.to_string(), "FieldAccess(a.b)");
    }

    struct NoOp;
    impl<'src> Transformer<'src> for NoOp {}

    #[test]
    fn default_transformer_is_the_identity() {
        let expr = Expr::Conditional(
            Box::new(Expr::NameReference(vec![Symbol::intern("a")])),
            Box::new(Expr::NameReference(vec![Symbol::intern("b")])),
            Box::new(Expr::NameReference(vec![Symbol::intern("c")])),
        );
        let before = expr.to_string();
        let after = accept_expr(expr, &mut NoOp).to_string();
        assert_eq!(before, after);
    }
}
