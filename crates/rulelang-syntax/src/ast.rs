//! The three AST sorts — [`NamedType`] (the Type sort), [`Expr`], and
//! [`Stmt`] — modeled as sum types per variant, per the design note in
//! spec §9: no base "Node" class, no runtime type assertions, and the
//! visitor in [`crate::visit`] dispatches over these enums directly
//! rather than through a double-dispatch `accept` method on each node.
//!
//! Every node's [`fmt::Display`] impl produces the canonical textual
//! form from spec §6.4, which the parser's test suite (and this
//! crate's own) asserts on directly.

use crate::literal::{FloatLiteral, IntegerLiteral, StringLiteral};
use rulelang_util::Symbol;
use std::fmt;

/// The Type sort. The grammar has exactly one type production — a
/// dotted name plus zero or more array dimensions — so there is no
/// enum here, just the one struct spec §3's table calls `NamedType`.
#[derive(Debug, Clone)]
pub struct NamedType<'src> {
    pub path: Vec<Symbol>,
    /// `None` is an unsized dimension (`[]`); `Some(expr)` is a sized
    /// one (`[expr]`). Multiple entries stack, outermost first.
    pub dimensions: Vec<Option<Expr<'src>>>,
}

impl fmt::Display for NamedType<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, segment) in self.path.iter().enumerate() {
            if i > 0 {
                f.write_str(".")?;
            }
            f.write_str(segment.as_str())?;
        }
        for dim in &self.dimensions {
            match dim {
                Some(expr) => write!(f, "[{expr}]")?,
                None => f.write_str("[]")?,
            }
        }
        Ok(())
    }
}

/// Prefix sign on a numeric expression (`+x`, `-x`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SignOp {
    Plus,
    Minus,
}

impl SignOp {
    pub fn text(self) -> &'static str {
        match self {
            SignOp::Plus => "+",
            SignOp::Minus => "-",
        }
    }
}

/// The left-associative binary operator families from spec §4.4's
/// precedence table (excluding `compare`, which is its own non-folding
/// [`Expr::Compare`] node, and `exponent`/`infix`, which are their own
/// variants since they have no sibling operators at their level).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOp {
    Multiply,
    Add,
    Shift,
    BitwiseAnd,
    BitwiseXor,
    BitwiseOr,
    LogicalAnd,
    LogicalXor,
    LogicalOr,
    Concatenate,
    Range,
}

impl BinaryOp {
    /// The name used as this node's wrapper in the canonical textual
    /// form, e.g. `Add(u + v)`.
    pub fn variant_name(self) -> &'static str {
        match self {
            BinaryOp::Multiply => "Multiply",
            BinaryOp::Add => "Add",
            BinaryOp::Shift => "Shift",
            BinaryOp::BitwiseAnd => "BitwiseAnd",
            BinaryOp::BitwiseXor => "BitwiseXor",
            BinaryOp::BitwiseOr => "BitwiseOr",
            BinaryOp::LogicalAnd => "LogicalAnd",
            BinaryOp::LogicalXor => "LogicalXor",
            BinaryOp::LogicalOr => "LogicalOr",
            BinaryOp::Concatenate => "Concatenate",
            BinaryOp::Range => "Range",
        }
    }
}

/// The Expression sort.
///
/// `'src` ties every borrowed lexeme back to the source text; literal
/// variants additionally carry an owned-or-borrowed form (see
/// [`crate::literal`]) so the literal reducer can synthesize new
/// literals that have no source lexeme at all.
#[derive(Debug, Clone)]
pub enum Expr<'src> {
    BooleanLiteral(bool, &'src str),
    StringLiteral(StringLiteral<'src>),
    IntegerLiteral(IntegerLiteral<'src>),
    FloatLiteral(FloatLiteral<'src>),
    /// `Ident(.Ident)*` — at least one segment (the ≥1 invariant from
    /// spec §3), never rendered with a wrapper name: `a`, `a.b`, ...
    NameReference(Vec<Symbol>),
    /// `.name` — a field of the implicit context receiver.
    ContextFieldAccess(Symbol),
    FieldAccess(Box<Expr<'src>>, Symbol),
    ArrayAccess(Box<Expr<'src>>, Box<Expr<'src>>),
    FunctionCall(Box<Expr<'src>>, Vec<Expr<'src>>),
    /// `(label:)? value` inside a composite literal. Never wrapped in
    /// its own name in the textual form — it's transparent, rendering
    /// as either `value` or `label: value`.
    LabeledExpression(Option<Symbol>, Box<Expr<'src>>),
    /// Fields are always [`Expr::LabeledExpression`] nodes.
    CompositeLiteral(Vec<Expr<'src>>),
    /// A [`NamedType`] prefix plus composite-literal fields.
    Initializer(NamedType<'src>, Vec<Expr<'src>>),
    Sign(SignOp, Box<Expr<'src>>),
    LogicalNot(Box<Expr<'src>>),
    BitwiseNot(Box<Expr<'src>>),
    Exponent(Box<Expr<'src>>, Box<Expr<'src>>),
    /// An identifier used as an infix binary operator (`a log b`).
    Infix(Box<Expr<'src>>, Symbol, Box<Expr<'src>>),
    Binary(BinaryOp, Box<Expr<'src>>, &'src str, Box<Expr<'src>>),
    /// A chained comparison: `values.len() == value_ops.len() + 1`,
    /// never folded into nested binary nodes (spec §4.4's "chained
    /// comparison" paragraph — `a<b<c` is one node, not two).
    Compare {
        values: Vec<Expr<'src>>,
        value_ops: Vec<&'src str>,
        type_suffix: Option<(&'src str, NamedType<'src>)>,
    },
    /// `(true_value, condition, false_value)` — `X if C else Y`.
    Conditional(Box<Expr<'src>>, Box<Expr<'src>>, Box<Expr<'src>>),
}

impl fmt::Display for Expr<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expr::BooleanLiteral(_, lexeme) => write!(f, "BooleanLiteral({lexeme})"),
            Expr::StringLiteral(lit) => write!(f, "StringLiteral({lit})"),
            Expr::IntegerLiteral(lit) => write!(f, "{lit}"),
            Expr::FloatLiteral(lit) => write!(f, "{lit}"),
            Expr::NameReference(path) => {
                for (i, segment) in path.iter().enumerate() {
                    if i > 0 {
                        f.write_str(".")?;
                    }
                    f.write_str(segment.as_str())?;
                }
                Ok(())
            }
            Expr::ContextFieldAccess(name) => write!(f, ".{name}"),
            Expr::FieldAccess(value, name) => write!(f, "FieldAccess({value}.{name})"),
            Expr::ArrayAccess(value, index) => write!(f, "ArrayAccess({value}[{index}])"),
            Expr::FunctionCall(callee, args) => {
                write!(f, "FunctionCall({callee}(")?;
                write_comma_separated(f, args)?;
                write!(f, "))")
            }
            Expr::LabeledExpression(Some(label), value) => write!(f, "{label}: {value}"),
            Expr::LabeledExpression(None, value) => write!(f, "{value}"),
            Expr::CompositeLiteral(fields) => {
                f.write_str("CompositeLiteral({")?;
                write_comma_separated(f, fields)?;
                f.write_str("})")
            }
            Expr::Initializer(ty, fields) => {
                write!(f, "Initializer({ty}{{")?;
                write_comma_separated(f, fields)?;
                f.write_str("})")
            }
            Expr::Sign(op, inner) => write!(f, "Sign({}{inner})", op.text()),
            Expr::LogicalNot(inner) => write!(f, "LogicalNot(!{inner})"),
            Expr::BitwiseNot(inner) => write!(f, "BitwiseNot(~{inner})"),
            Expr::Exponent(base, exp) => write!(f, "Exponent({base} ** {exp})"),
            Expr::Infix(lhs, name, rhs) => write!(f, "Infix({lhs} {name} {rhs})"),
            Expr::Binary(op, lhs, lexeme, rhs) => {
                write!(f, "{}({lhs} {lexeme} {rhs})", op.variant_name())
            }
            Expr::Compare {
                values,
                value_ops,
                type_suffix,
            } => {
                f.write_str("Compare(")?;
                write!(f, "{}", values[0])?;
                for (op, value) in value_ops.iter().zip(values.iter().skip(1)) {
                    write!(f, " {op} {value}")?;
                }
                if let Some((op, ty)) = type_suffix {
                    write!(f, " {op} {ty}")?;
                }
                f.write_str(")")
            }
            Expr::Conditional(true_value, condition, false_value) => {
                write!(f, "Conditional({true_value} if {condition} else {false_value})")
            }
        }
    }
}

fn write_comma_separated(f: &mut fmt::Formatter<'_>, items: &[Expr<'_>]) -> fmt::Result {
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            f.write_str(", ")?;
        }
        write!(f, "{item}")?;
    }
    Ok(())
}

/// The Statement sort. `target`/`callee` are always one of the
/// "lvalue" expression variants (spec §3's invariant): `NameReference`,
/// `ContextFieldAccess`, `FieldAccess`, `ArrayAccess` for assignment
/// targets, plus `FunctionCall` itself for a bare call statement.
#[derive(Debug, Clone)]
pub enum Stmt<'src> {
    Assignment {
        target: Expr<'src>,
        op: &'src str,
        value: Expr<'src>,
    },
    /// `target = CompositeLiteral`, distinguished from a plain
    /// [`Stmt::Assignment`] only by the RHS shape (spec §4.5).
    InitializerAssignment {
        target: Expr<'src>,
        composite: Expr<'src>,
    },
    FunctionCallStatement(Expr<'src>),
}

impl fmt::Display for Stmt<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Stmt::Assignment { target, op, value } => {
                write!(f, "Assignment({target} {op} {value})")
            }
            Stmt::InitializerAssignment { target, composite } => {
                write!(f, "InitializerAssignment({target} = {composite})")
            }
            Stmt::FunctionCallStatement(call) => write!(f, "{call}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn name(parts: &[&str]) -> Expr<'static> {
        Expr::NameReference(parts.iter().map(|s| Symbol::intern(s)).collect())
    }

    #[test]
    fn name_reference_has_no_wrapper() {
        assert_eq!(name(&["a", "b"]).to_string(), "a.b");
    }

    #[test]
    fn field_access_wraps_its_base_and_name() {
        let expr = Expr::FieldAccess(Box::new(name(&["a"])), Symbol::intern("field"));
        assert_eq!(expr.to_string(), "FieldAccess(a.field)");
    }

    #[test]
    fn function_call_renders_callee_and_args() {
        let expr = Expr::FunctionCall(Box::new(name(&["a", "b"])), vec![]);
        assert_eq!(expr.to_string(), "FunctionCall(a.b())");
    }

    #[test]
    fn composite_literal_flattens_unlabeled_fields() {
        let inner = Expr::CompositeLiteral(vec![Expr::LabeledExpression(None, Box::new(name(&["v"])))]);
        let outer = Expr::CompositeLiteral(vec![
            Expr::LabeledExpression(None, Box::new(name(&["a"]))),
            Expr::LabeledExpression(None, Box::new(name(&["b"]))),
            Expr::LabeledExpression(None, Box::new(inner)),
        ]);
        assert_eq!(outer.to_string(), "CompositeLiteral({a, b, CompositeLiteral({v})})");
    }

    #[test]
    fn conditional_matches_the_canonical_form() {
        let expr = Expr::Conditional(
            Box::new(name(&["a"])),
            Box::new(name(&["b"])),
            Box::new(name(&["c"])),
        );
        assert_eq!(expr.to_string(), "Conditional(a if b else c)");
    }
}
