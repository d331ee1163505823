//! Expression parsing: a precedence-climbing cascade over the thirteen
//! levels from spec §4.4, tightest (`atom`) to loosest (`conditional`).
//!
//! Each level is one function that calls the next-tighter level for its
//! operands; `parse_expr` is the public entry point at the loosest
//! level. The two genuinely tricky spots are [`parse_atom`]'s
//! backtracking between a plain name reference and an `Initializer`,
//! and the float/field-access rewrite immediately after a `FloatLiteral`
//! atom — both are called out where they happen.

use crate::ast::{BinaryOp, Expr, SignOp};
use crate::literal;
use crate::types::{parse_dotted_path, parse_named_type, parse_type_dimensions};
use crate::Parser;
use rulelang_lex::token;
use rulelang_lex::{SymbolKind, Token};
use rulelang_util::{Error, Result, Symbol};

/// The loosest level — the public entry point for expression parsing.
pub(crate) fn parse_expr<'src>(parser: &mut Parser<'src>) -> Result<Expr<'src>> {
    parse_conditional(parser)
}

/// `X if C else Y`, right-associative.
fn parse_conditional<'src>(parser: &mut Parser<'src>) -> Result<Expr<'src>> {
    let true_value = parse_range(parser)?;
    if parser.at_keyword("if")? {
        parser.advance()?;
        let condition = parse_range(parser)?;
        parser.expect_keyword("else")?;
        let false_value = parse_conditional(parser)?;
        Ok(Expr::Conditional(
            Box::new(true_value),
            Box::new(condition),
            Box::new(false_value),
        ))
    } else {
        Ok(true_value)
    }
}

macro_rules! left_assoc_binary_level {
    ($name:ident, $next:ident, $matches:expr, $to_op:expr) => {
        fn $name<'src>(parser: &mut Parser<'src>) -> Result<Expr<'src>> {
            let mut lhs = $next(parser)?;
            loop {
                let lexeme = match parser.head()? {
                    Token::Symbol(lexeme, kind) if $matches(lexeme, kind) => lexeme,
                    _ => break,
                };
                parser.advance()?;
                let rhs = $next(parser)?;
                lhs = Expr::Binary($to_op, Box::new(lhs), lexeme, Box::new(rhs));
            }
            Ok(lhs)
        }
    };
}

left_assoc_binary_level!(
    parse_range,
    parse_concatenate,
    |_lexeme: &str, kind: SymbolKind| kind == SymbolKind::Range,
    BinaryOp::Range
);
left_assoc_binary_level!(
    parse_concatenate,
    parse_logical_or,
    |lexeme: &str, _kind: SymbolKind| lexeme == "~",
    BinaryOp::Concatenate
);
left_assoc_binary_level!(
    parse_logical_or,
    parse_logical_xor,
    |_lexeme: &str, kind: SymbolKind| kind == SymbolKind::LogicalOr,
    BinaryOp::LogicalOr
);
left_assoc_binary_level!(
    parse_logical_xor,
    parse_logical_and,
    |_lexeme: &str, kind: SymbolKind| kind == SymbolKind::LogicalXor,
    BinaryOp::LogicalXor
);
left_assoc_binary_level!(
    parse_logical_and,
    parse_bitwise_or,
    |_lexeme: &str, kind: SymbolKind| kind == SymbolKind::LogicalAnd,
    BinaryOp::LogicalAnd
);
left_assoc_binary_level!(
    parse_bitwise_or,
    parse_bitwise_xor,
    |lexeme: &str, _kind: SymbolKind| lexeme == "|",
    BinaryOp::BitwiseOr
);
left_assoc_binary_level!(
    parse_bitwise_xor,
    parse_bitwise_and,
    |lexeme: &str, _kind: SymbolKind| lexeme == "^",
    BinaryOp::BitwiseXor
);
left_assoc_binary_level!(
    parse_bitwise_and,
    parse_compare,
    |lexeme: &str, _kind: SymbolKind| lexeme == "&",
    BinaryOp::BitwiseAnd
);

/// Chained comparison: `a op1 b op2 c … (type-op type)?`, never folded
/// into nested binary nodes (spec §4.4's "chained comparison").
fn parse_compare<'src>(parser: &mut Parser<'src>) -> Result<Expr<'src>> {
    let mut values = vec![parse_shift(parser)?];
    let mut value_ops = Vec::new();

    loop {
        match parser.head()? {
            Token::Symbol(lexeme, SymbolKind::ValueCompare) => {
                parser.advance()?;
                value_ops.push(lexeme);
                values.push(parse_shift(parser)?);
            }
            _ => break,
        }
    }

    let type_suffix = match parser.head()? {
        Token::Symbol(lexeme, SymbolKind::TypeCompare) => {
            parser.advance()?;
            Some((lexeme, parse_named_type(parser)?))
        }
        _ => None,
    };

    if value_ops.is_empty() && type_suffix.is_none() {
        Ok(values.pop().expect("parse_shift always produces one value"))
    } else {
        Ok(Expr::Compare {
            values,
            value_ops,
            type_suffix,
        })
    }
}

left_assoc_binary_level!(
    parse_shift,
    parse_add,
    |_lexeme: &str, kind: SymbolKind| kind == SymbolKind::Shift,
    BinaryOp::Shift
);
left_assoc_binary_level!(
    parse_add,
    parse_multiply,
    |_lexeme: &str, kind: SymbolKind| kind == SymbolKind::Add,
    BinaryOp::Add
);
left_assoc_binary_level!(
    parse_multiply,
    parse_infix,
    |_lexeme: &str, kind: SymbolKind| kind == SymbolKind::Multiply,
    BinaryOp::Multiply
);

/// An identifier used as an infix binary operator: `a log b`.
fn parse_infix<'src>(parser: &mut Parser<'src>) -> Result<Expr<'src>> {
    let mut lhs = parse_exponent(parser)?;
    while let Token::Identifier(name) = parser.head()? {
        let name = Symbol::intern(name);
        parser.advance()?;
        let rhs = parse_exponent(parser)?;
        lhs = Expr::Infix(Box::new(lhs), name, Box::new(rhs));
    }
    Ok(lhs)
}

/// `a ** b`, left-folded: `a ** b ** c` is `Exponent(Exponent(a, b), c)`.
fn parse_exponent<'src>(parser: &mut Parser<'src>) -> Result<Expr<'src>> {
    let mut base = parse_unary(parser)?;
    while parser.eat_symbol("**")? {
        let exponent = parse_unary(parser)?;
        base = Expr::Exponent(Box::new(base), Box::new(exponent));
    }
    Ok(base)
}

/// `+x`, `-x`, `!x`, `~x` — right-associative prefix operators.
fn parse_unary<'src>(parser: &mut Parser<'src>) -> Result<Expr<'src>> {
    match parser.head()? {
        Token::Symbol("+", _) => {
            parser.advance()?;
            Ok(Expr::Sign(SignOp::Plus, Box::new(parse_unary(parser)?)))
        }
        Token::Symbol("-", _) => {
            parser.advance()?;
            Ok(Expr::Sign(SignOp::Minus, Box::new(parse_unary(parser)?)))
        }
        Token::Symbol("!", _) => {
            parser.advance()?;
            Ok(Expr::LogicalNot(Box::new(parse_unary(parser)?)))
        }
        Token::Symbol("~", _) => {
            parser.advance()?;
            Ok(Expr::BitwiseNot(Box::new(parse_unary(parser)?)))
        }
        _ => parse_access(parser),
    }
}

/// An atom followed by any chain of `.field`, `[index]`, `(args)`.
pub(crate) fn parse_access<'src>(parser: &mut Parser<'src>) -> Result<Expr<'src>> {
    let mut base = parse_atom(parser)?;
    loop {
        match parser.head()? {
            Token::Symbol(".", _) => {
                parser.advance()?;
                let name = parser.expect_identifier()?;
                base = Expr::FieldAccess(Box::new(base), name);
            }
            Token::Symbol("[", _) => {
                parser.advance()?;
                let index = parse_expr(parser)?;
                parser.expect_symbol("]")?;
                base = Expr::ArrayAccess(Box::new(base), Box::new(index));
            }
            Token::Symbol("(", _) => {
                parser.advance()?;
                let args = parse_call_args(parser)?;
                base = Expr::FunctionCall(Box::new(base), args);
            }
            _ => break,
        }
    }
    Ok(base)
}

fn parse_call_args<'src>(parser: &mut Parser<'src>) -> Result<Vec<Expr<'src>>> {
    let mut args = Vec::new();
    if parser.eat_symbol(")")? {
        return Ok(args);
    }
    loop {
        args.push(parse_expr(parser)?);
        if !parser.eat_symbol(",")? {
            break;
        }
    }
    parser.expect_symbol(")")?;
    Ok(args)
}

/// literal / `.Ident` / `Ident(.Ident)*` / `Ident(.Ident)*[dims]{…}` /
/// `(expr)`.
fn parse_atom<'src>(parser: &mut Parser<'src>) -> Result<Expr<'src>> {
    match parser.head()? {
        Token::BooleanLiteral(lexeme) => {
            parser.advance()?;
            Ok(Expr::BooleanLiteral(lexeme == "true", lexeme))
        }
        Token::StringLiteral(tok) => {
            parser.advance()?;
            Ok(Expr::StringLiteral(literal::StringLiteral::from_token(tok)))
        }
        Token::IntegerLiteral(tok) => {
            parser.advance()?;
            Ok(Expr::IntegerLiteral(literal::IntegerLiteral::from_token(
                tok,
            )))
        }
        Token::FloatLiteral(tok) => {
            parser.advance()?;
            parse_float_atom(parser, tok)
        }
        Token::Symbol(".", _) => {
            parser.advance()?;
            let name = parser.expect_identifier()?;
            Ok(Expr::ContextFieldAccess(name))
        }
        Token::Symbol("(", _) => {
            parser.advance()?;
            let inner = parse_expr(parser)?;
            parser.expect_symbol(")")?;
            Ok(inner)
        }
        Token::Identifier(_) => {
            if let Some(initializer) = try_parse_initializer(parser)? {
                Ok(initializer)
            } else {
                Ok(Expr::NameReference(parse_dotted_path(parser)?))
            }
        }
        _ => Err(Error::Syntax {
            expected: "expression".into(),
            count: parser.rune_count(),
        }),
    }
}

/// Resolve the float/field-access ambiguity (spec §4.2/§4.4): a float
/// lexeme ending in `.` immediately followed by an identifier is really
/// an integer literal plus the start of an access chain.
fn parse_float_atom<'src>(
    parser: &mut Parser<'src>,
    tok: token::FloatLiteral<'src>,
) -> Result<Expr<'src>> {
    if tok.lexeme.ends_with('.') {
        if let Token::Identifier(_) = parser.head()? {
            let int_part = &tok.lexeme[..tok.lexeme.len() - 1];
            let base = Expr::IntegerLiteral(literal::IntegerLiteral::from_token(
                token::IntegerLiteral::new(int_part),
            ));
            let name = parser.expect_identifier()?;
            return Ok(Expr::FieldAccess(Box::new(base), name));
        }
    }
    Ok(Expr::FloatLiteral(literal::FloatLiteral::from_token(tok)))
}

/// Speculatively parse a `NamedType` and check for a following `{`;
/// restores the tokenizer position and returns `None` if there isn't
/// one, so the caller can fall back to a plain name reference. This is
/// the backtracking spec §4.4 and §9 call for: the `Ident{…}` vs.
/// `Ident` ambiguity needs unbounded lookahead across an arbitrary
/// dotted path and any number of array dimensions.
fn try_parse_initializer<'src>(parser: &mut Parser<'src>) -> Result<Option<Expr<'src>>> {
    parser.save_position();
    let attempt = (|| -> Result<Option<Expr<'src>>> {
        let path = parse_dotted_path(parser)?;
        let dimensions = parse_type_dimensions(parser)?;
        if parser.eat_symbol("{")? {
            let ty = crate::ast::NamedType { path, dimensions };
            let fields = parse_composite_fields(parser)?;
            Ok(Some(Expr::Initializer(ty, fields)))
        } else {
            Ok(None)
        }
    })();

    match attempt {
        Ok(Some(expr)) => {
            parser.discard_position();
            Ok(Some(expr))
        }
        Ok(None) => {
            parser.restore_position();
            Ok(None)
        }
        Err(err) => {
            parser.restore_position();
            Err(err)
        }
    }
}

/// `'{' labeled-expr (',' labeled-expr)* '}'`, called with the opening
/// `{` already consumed.
pub(crate) fn parse_composite_fields<'src>(parser: &mut Parser<'src>) -> Result<Vec<Expr<'src>>> {
    let mut fields = Vec::new();
    if parser.eat_symbol("}")? {
        return Ok(fields);
    }
    loop {
        fields.push(parse_labeled_expr(parser)?);
        if !parser.eat_symbol(",")? {
            break;
        }
    }
    parser.expect_symbol("}")?;
    Ok(fields)
}

/// `(IDENT ':')? (expr | composite-literal)`.
fn parse_labeled_expr<'src>(parser: &mut Parser<'src>) -> Result<Expr<'src>> {
    let label = if peek_is_label(parser)? {
        let name = parser.expect_identifier()?;
        parser.expect_symbol(":")?;
        Some(name)
    } else {
        None
    };

    let value = if matches!(parser.head()?, Token::Symbol("{", _)) {
        parse_composite_literal(parser)?
    } else {
        parse_expr(parser)?
    };

    Ok(Expr::LabeledExpression(label, Box::new(value)))
}

pub(crate) fn parse_composite_literal<'src>(parser: &mut Parser<'src>) -> Result<Expr<'src>> {
    parser.expect_symbol("{")?;
    Ok(Expr::CompositeLiteral(parse_composite_fields(parser)?))
}

/// Two-token lookahead for `IDENT ':'` using the same save/restore
/// stack the initializer disambiguation uses.
fn peek_is_label(parser: &mut Parser) -> Result<bool> {
    if !matches!(parser.head()?, Token::Identifier(_)) {
        return Ok(false);
    }
    parser.save_position();
    parser.advance()?;
    let is_colon = matches!(parser.head()?, Token::Symbol(":", _));
    parser.restore_position();
    Ok(is_colon)
}

#[cfg(test)]
mod tests {
    use crate::parse_expression;

    #[test]
    fn field_access_chain_on_a_float_literal() {
        let expr = parse_expression("5.ucc.test").unwrap();
        assert_eq!(
            expr.to_string(),
            "FieldAccess(FieldAccess(DecimalIntegerLiteral(5).ucc).test)"
        );
    }

    #[test]
    fn chained_comparison_is_not_folded() {
        let expr = parse_expression("u + v <= j - l < a log b").unwrap();
        assert_eq!(
            expr.to_string(),
            "Compare(Add(u + v) <= Add(j - l) < Infix(a log b))"
        );
    }

    #[test]
    fn conditional_expression() {
        let expr = parse_expression("a if b else c").unwrap();
        assert_eq!(expr.to_string(), "Conditional(a if b else c)");
    }

    #[test]
    fn initializer_disambiguates_from_name_reference() {
        let expr = parse_expression("Point{x, y}").unwrap();
        assert_eq!(expr.to_string(), "Initializer(Point{x, y})");
    }

    #[test]
    fn name_reference_backtracks_cleanly_when_no_brace_follows() {
        let expr = parse_expression("a.b.c").unwrap();
        assert_eq!(expr.to_string(), "a.b.c");
    }

    #[test]
    fn array_access_is_not_mistaken_for_a_sized_initializer() {
        let expr = parse_expression("a[0]").unwrap();
        assert_eq!(expr.to_string(), "ArrayAccess(a[DecimalIntegerLiteral(0)])");
    }

    #[test]
    fn array_initializer_with_unsized_dimension() {
        let expr = parse_expression("int[]{1, 2, 3}").unwrap();
        assert_eq!(
            expr.to_string(),
            "Initializer(int[]{DecimalIntegerLiteral(1), DecimalIntegerLiteral(2), DecimalIntegerLiteral(3)})"
        );
    }

    #[test]
    fn nested_composite_literal() {
        let expr = parse_expression("{a, b, {v}}").unwrap();
        assert_eq!(expr.to_string(), "CompositeLiteral({a, b, CompositeLiteral({v})})");
    }

    #[test]
    fn labeled_fields_render_with_their_label() {
        let expr = parse_expression("Point{x: 1, y: 2}").unwrap();
        assert_eq!(
            expr.to_string(),
            "Initializer(Point{x: DecimalIntegerLiteral(1), y: DecimalIntegerLiteral(2)})"
        );
    }

    #[test]
    fn context_field_access() {
        let expr = parse_expression(".amount").unwrap();
        assert_eq!(expr.to_string(), ".amount");
    }

    #[test]
    fn exponent_is_left_folded() {
        let expr = parse_expression("a ** b ** c").unwrap();
        assert_eq!(expr.to_string(), "Exponent(Exponent(a ** b) ** c)");
    }

    #[test]
    fn range_is_looser_than_concatenate() {
        let expr = parse_expression("a ~ b .. c ~ d").unwrap();
        assert_eq!(
            expr.to_string(),
            "Range(Concatenate(a ~ b) .. Concatenate(c ~ d))"
        );
    }

    #[test]
    fn unary_minus_is_right_associative() {
        let expr = parse_expression("--a").unwrap();
        assert_eq!(expr.to_string(), "Sign(-Sign(-a))");
    }

    #[test]
    fn multiply_binds_tighter_than_add() {
        let expr = parse_expression("a + b * c").unwrap();
        assert_eq!(expr.to_string(), "Add(a + Multiply(b * c))");
    }

    #[test]
    fn function_call_with_args() {
        let expr = parse_expression("f(a, b)").unwrap();
        assert_eq!(expr.to_string(), "FunctionCall(f(a, b))");
    }

    #[test]
    fn compare_with_a_trailing_type_suffix() {
        let expr = parse_expression("a :: int").unwrap();
        assert_eq!(expr.to_string(), "Compare(a :: int)");
    }

    #[test]
    fn compare_with_value_ops_and_a_trailing_type_suffix() {
        let expr = parse_expression("a < b <: Point[]").unwrap();
        assert_eq!(expr.to_string(), "Compare(a < b <: Point[])");
    }
}
