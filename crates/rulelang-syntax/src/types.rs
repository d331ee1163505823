//! Parsing for the Type sort — a dotted identifier path plus zero or
//! more array dimensions (spec §3/§4.4). The grammar has exactly one
//! type production, so unlike `expr`/`stmt` there's no dispatch here:
//! [`parse_named_type`] is the whole story, plus the dotted-path helper
//! it shares with [`crate::expr`]'s name-reference/initializer
//! disambiguation.

use crate::ast::NamedType;
use crate::expr::parse_expr;
use crate::Parser;
use rulelang_util::{Result, Symbol};

/// `Ident(.Ident)*` — the path shared by a bare name reference and the
/// leading name of a named type. Consumed identically in both places;
/// the caller decides which sort to wrap it in.
pub(crate) fn parse_dotted_path(parser: &mut Parser) -> Result<Vec<Symbol>> {
    let mut path = vec![parser.expect_identifier()?];
    while parser.eat_symbol(".")? {
        path.push(parser.expect_identifier()?);
    }
    Ok(path)
}

/// Zero or more `[]`/`[expr]` dimension suffixes.
pub(crate) fn parse_type_dimensions<'src>(
    parser: &mut Parser<'src>,
) -> Result<Vec<Option<crate::ast::Expr<'src>>>> {
    let mut dimensions = Vec::new();
    while parser.eat_symbol("[")? {
        if parser.eat_symbol("]")? {
            dimensions.push(None);
        } else {
            let size = parse_expr(parser)?;
            parser.expect_symbol("]")?;
            dimensions.push(Some(size));
        }
    }
    Ok(dimensions)
}

/// Parse a named type directly — used where the grammar guarantees a
/// type follows (the `Compare` type-suffix) and no `Ident{…}` vs.
/// `Ident` backtracking is needed.
pub(crate) fn parse_named_type<'src>(parser: &mut Parser<'src>) -> Result<NamedType<'src>> {
    let path = parse_dotted_path(parser)?;
    let dimensions = parse_type_dimensions(parser)?;
    Ok(NamedType { path, dimensions })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Parser;

    fn parse_type_str(source: &str) -> NamedType<'_> {
        let mut parser = Parser::new(source);
        parse_named_type(&mut parser).unwrap()
    }

    #[test]
    fn plain_name_has_no_dimensions() {
        let ty = parse_type_str("Point");
        assert_eq!(ty.to_string(), "Point");
    }

    #[test]
    fn dotted_path_with_unsized_dimension() {
        let ty = parse_type_str("a.b.Point[]");
        assert_eq!(ty.to_string(), "a.b.Point[]");
    }

    #[test]
    fn sized_dimension_renders_its_expression() {
        let ty = parse_type_str("int[5]");
        assert_eq!(ty.to_string(), "int[5]");
    }
}
