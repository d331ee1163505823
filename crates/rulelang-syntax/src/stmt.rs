//! Statement parsing: indentation discipline plus the three statement
//! forms (spec §4.5). There's no statement-kind dispatch token the way
//! there is for expressions — every statement starts with an `access`
//! expression, and which form it becomes is decided entirely by what
//! follows that expression.

use crate::ast::Stmt;
use crate::expr::{parse_access, parse_composite_literal, parse_expr};
use crate::Parser;
use rulelang_lex::{SymbolKind, Token};
use rulelang_util::{Error, Result};

/// The active indentation rule at the top of the statement loop.
///
/// `next_ignored` is set for one iteration after a `Terminator` lets a
/// second statement share its line — that statement's own indentation
/// (there isn't any) is not checked against `count`/`char`.
struct IndentSpec {
    char: char,
    count: usize,
    next_ignored: bool,
}

impl IndentSpec {
    fn top_level() -> Self {
        Self {
            char: ' ',
            count: 0,
            next_ignored: false,
        }
    }

    /// Validate one `Indentation` lexeme against this spec.
    fn matches(&self, text: &str) -> bool {
        text.chars().count() == self.count && text.chars().all(|c| c == self.char)
    }
}

/// Parse a statement stream to end of input (spec §4.5's "stream
/// termination"): stop at `Eof`, error on anything that isn't a
/// statement, `Terminator`, or `Indentation`.
pub(crate) fn parse_program<'src>(parser: &mut Parser<'src>) -> Result<Vec<Stmt<'src>>> {
    let mut statements = Vec::new();
    let mut spec = IndentSpec::top_level();

    while parser.has()? {
        consume_indentation(parser, &mut spec)?;
        if !parser.has()? {
            break;
        }
        statements.push(parse_statement(parser)?);
        spec.next_ignored = eat_statement_separator(parser)?;
    }

    Ok(statements)
}

/// Consume every consecutive `Indentation` token, validating only the
/// last one seen (spec §4.5 rule 1) — unless the previous statement's
/// trailing `Terminator` suppressed validation for this one.
fn consume_indentation(parser: &mut Parser, spec: &mut IndentSpec) -> Result<()> {
    let mut last_indentation: Option<&'_ str> = None;
    loop {
        match parser.head()? {
            Token::Indentation(text) => {
                last_indentation = Some(text);
                parser.advance()?;
            }
            _ => break,
        }
    }

    if spec.next_ignored {
        spec.next_ignored = false;
        return Ok(());
    }

    if let Some(text) = last_indentation {
        if !spec.matches(text) {
            return Err(Error::Indentation {
                message: format!(
                    "expected {} of {:?} but found {text:?}",
                    spec.count, spec.char
                ),
                count: parser.rune_count(),
            });
        }
    }
    Ok(())
}

/// Consume the separator ending a statement, returning whether the
/// next statement's indentation check should be skipped.
fn eat_statement_separator(parser: &mut Parser) -> Result<bool> {
    match parser.head()? {
        Token::Terminator => {
            parser.advance()?;
            Ok(true)
        }
        Token::Indentation(_) | Token::Eof => Ok(false),
        _ => Err(Error::Syntax {
            expected: "end of statement".into(),
            count: parser.rune_count(),
        }),
    }
}

/// One statement: an `access` expression followed by either an
/// assignment operator or nothing (a bare call).
fn parse_statement<'src>(parser: &mut Parser<'src>) -> Result<Stmt<'src>> {
    let target = parse_access(parser)?;

    match parser.head()? {
        Token::Symbol(op, SymbolKind::Assignment) => {
            if !is_lvalue(&target) {
                return Err(Error::Syntax {
                    expected: "reference expression on the left of an assignment".into(),
                    count: parser.rune_count(),
                });
            }
            parser.advance()?;
            if op == "=" && matches!(parser.head()?, Token::Symbol("{", _)) {
                let composite = parse_composite_literal(parser)?;
                Ok(Stmt::InitializerAssignment { target, composite })
            } else {
                let value = parse_expr(parser)?;
                Ok(Stmt::Assignment { target, op, value })
            }
        }
        _ if is_call(&target) => Ok(Stmt::FunctionCallStatement(target)),
        _ => Err(Error::Syntax {
            expected: "assignment operator or end of statement".into(),
            count: parser.rune_count(),
        }),
    }
}

/// Whether `expr` is a valid assignment target (spec §3's lvalue
/// invariant): a name, a context-field access, or any access chain
/// that ends in a field or array index.
fn is_lvalue(expr: &crate::ast::Expr) -> bool {
    matches!(
        expr,
        crate::ast::Expr::NameReference(_)
            | crate::ast::Expr::ContextFieldAccess(_)
            | crate::ast::Expr::FieldAccess(_, _)
            | crate::ast::Expr::ArrayAccess(_, _)
    )
}

fn is_call(expr: &crate::ast::Expr) -> bool {
    matches!(expr, crate::ast::Expr::FunctionCall(_, _))
}

#[cfg(test)]
mod tests {
    use crate::parse_program;

    #[test]
    fn assignment_statement() {
        let stmts = parse_program("a = 1").unwrap();
        assert_eq!(stmts[0].to_string(), "Assignment(a = DecimalIntegerLiteral(1))");
    }

    #[test]
    fn compound_assignment_operator_is_preserved() {
        let stmts = parse_program("a += 1").unwrap();
        assert_eq!(stmts[0].to_string(), "Assignment(a += DecimalIntegerLiteral(1))");
    }

    #[test]
    fn initializer_assignment_is_distinguished_from_a_plain_assignment() {
        let stmts = parse_program("a = {a, b, {v}}").unwrap();
        assert_eq!(
            stmts[0].to_string(),
            "InitializerAssignment(a = CompositeLiteral({a, b, CompositeLiteral({v})}))"
        );
    }

    #[test]
    fn bare_function_call_statement() {
        let stmts = parse_program("f(a, b)").unwrap();
        assert_eq!(stmts[0].to_string(), "FunctionCall(f(a, b))");
    }

    #[test]
    fn assignment_to_a_non_reference_expression_is_an_error() {
        assert!(parse_program("1 = 2").is_err());
    }

    #[test]
    fn multiple_statements_separated_by_newlines() {
        let stmts = parse_program("a = 1\nb = 2\n").unwrap();
        assert_eq!(stmts.len(), 2);
    }

    #[test]
    fn terminator_allows_a_second_statement_on_the_same_line() {
        let stmts = parse_program("a = 1; b = 2").unwrap();
        assert_eq!(stmts.len(), 2);
    }

    #[test]
    fn field_access_target_is_a_valid_lvalue() {
        let stmts = parse_program("a.b = 1").unwrap();
        assert_eq!(stmts[0].to_string(), "Assignment(FieldAccess(a.b) = DecimalIntegerLiteral(1))");
    }

    #[test]
    fn array_access_target_is_a_valid_lvalue() {
        let stmts = parse_program("a[0] = 1").unwrap();
        assert_eq!(
            stmts[0].to_string(),
            "Assignment(ArrayAccess(a[DecimalIntegerLiteral(0)]) = DecimalIntegerLiteral(1))"
        );
    }

    #[test]
    fn mismatched_indentation_is_an_error() {
        assert!(parse_program("a = 1\n    b = 2").is_err());
    }
}
