use super::super::{combinators::span_between, core::*, prelude::*};
use super::common::*;
use super::expression::parse_expression;
use crate::ast;
use crate::tokenizer::{
    symbol::Delimiter,
    token::{Span, Token, TokenSpan},
};

/// Parses attributes and blocks until `}` or the end of input.
///
/// Blank lines between items are skipped. The closing brace is left for the
/// caller so the same parser serves the file root and nested block bodies.
pub fn parse_body(input: &[TokenSpan], pos: usize) -> ParseResult<ast::Body> {
    let mut structures = Vec::new();
    let mut pos = pos;

    loop {
        pos = skip_newlines(input, pos);
        if pos >= input.len() || peek_is(input, pos, &Token::Delimiter(Delimiter::CloseBrace)) {
            return Ok((pos, ast::Body::new(structures)));
        }

        let (next, structure) = parse_structure(input, pos)?;
        structures.push(structure);
        pos = next;
    }
}

fn parse_structure(input: &[TokenSpan], pos: usize) -> ParseResult<ast::Structure> {
    if peek_is(input, pos + 1, &Token::Delimiter(Delimiter::Equal)) {
        with_context(map(parse_attribute, ast::Structure::Attribute), "attribute")
            .parse(input, pos)
    } else {
        with_context(
            map(parse_block, ast::Structure::Block),
            "argument or block definition",
        )
        .parse(input, pos)
    }
}

pub fn parse_attribute(input: &[TokenSpan], pos: usize) -> ParseResult<ast::Attribute> {
    let (next, ((name, name_span), expr)) = tuple2(
        spanned(parse_name()),
        preceded(parse_equal(), parse_expression()),
    )
    .parse(input, pos)?;
    let next = end_of_item(input, next, "newline after argument")?;

    let span = name_span.to(&expr.span);
    Ok((
        next,
        ast::Attribute {
            name,
            name_span,
            expr,
            span,
        },
    ))
}

pub fn parse_block(input: &[TokenSpan], pos: usize) -> ParseResult<ast::Block> {
    let (next, ((ident, ident_span), labels, body)) = tuple3(
        spanned(parse_name()),
        many(map(
            spanned(parse_label()),
            |(value, span): (String, Span)| ast::BlockLabel { value, span },
        )),
        delimited(parse_open_brace(), parse_nested_body, parse_close_brace()),
    )
    .parse(input, pos)?;

    let span = span_between(input, pos, next);
    let next = end_of_item(input, next, "newline after block definition")?;
    Ok((
        next,
        ast::Block {
            ident,
            ident_span,
            labels,
            body,
            span,
        },
    ))
}

fn parse_nested_body(input: &[TokenSpan], pos: usize) -> ParseResult<ast::Body> {
    nested(input, pos, parse_body)
}

/// An item ends at a newline, which is consumed, or right before `}` or the
/// end of input.
fn end_of_item(input: &[TokenSpan], pos: usize, expected: &str) -> Result<usize, ParseError> {
    match input.get(pos).map(|t| &t.token) {
        None | Some(Token::Delimiter(Delimiter::CloseBrace)) => Ok(pos),
        Some(Token::Newline) => Ok(pos + 1),
        Some(_) => Err(unexpected(input, pos, expected)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::{ExpressionKind, LiteralValue};
    use crate::preprocessor::{Preprocessor, TokenPreprocessor};
    use crate::tokenizer::token::Tokenizer;

    fn parse(input: &str) -> ast::Body {
        let tokens = TokenPreprocessor.process(Tokenizer::new().tokenize(input).unwrap());
        let (pos, body) = parse_body(&tokens, 0).unwrap();
        assert_eq!(pos, tokens.len());
        body
    }

    fn parse_err(input: &str) -> ParseError {
        let tokens = TokenPreprocessor.process(Tokenizer::new().tokenize(input).unwrap());
        parse_body(&tokens, 0).unwrap_err()
    }

    #[test]
    fn test_module_blocks() {
        let input = r#"
module "foo" {
  source = "foo/bar/baz"
  id     = data.external.something.result.id
  unused = 2
}

module "bar" {
  source = "./child"
  unused = 1
}
"#;
        let body = parse(input);
        let blocks: Vec<_> = body.blocks().collect();
        assert_eq!(blocks.len(), 2);

        let foo = blocks[0];
        assert_eq!(foo.ident, "module");
        assert_eq!(foo.labels[0].value, "foo");
        assert_eq!(foo.ident_span.line, 2);
        assert!(input[foo.span.start..foo.span.end].ends_with('}'));

        let attrs: Vec<_> = foo.body.attributes().collect();
        assert_eq!(attrs.len(), 3);
        let id = &attrs[1];
        assert_eq!(id.name, "id");
        assert_eq!(
            &input[id.expr.span.start..id.expr.span.end],
            "data.external.something.result.id"
        );
        assert_eq!(id.span.line, 4);
        assert_eq!(id.span.column, 3);
        assert_eq!(
            foo.body.attribute("unused").map(|a| a.expr.kind.clone()),
            Some(ExpressionKind::Literal(LiteralValue::Number("2".to_string())))
        );
    }

    #[test]
    fn test_root_attributes_and_nested_blocks() {
        let body = parse("a = 1\nouter {\n  inner \"x\" \"y\" {\n    b = true\n  }\n}\n");
        assert_eq!(body.attributes().count(), 1);
        let outer = body.blocks().next().unwrap();
        let inner = outer.body.blocks().next().unwrap();
        let labels: Vec<_> = inner.labels.iter().map(|l| l.value.as_str()).collect();
        assert_eq!(labels, vec!["x", "y"]);
        assert!(inner.body.attribute("b").is_some());
    }

    #[test]
    fn test_single_line_block_and_missing_final_newline() {
        let body = parse("locals { a = 1 }\nb = 2");
        assert_eq!(body.structures.len(), 2);
        let block = body.blocks().next().unwrap();
        assert!(block.body.attribute("a").is_some());
    }

    #[test]
    fn test_keyword_as_attribute_name() {
        let body = parse("for = 1\nin = 2\n");
        assert!(body.attribute("for").is_some());
        assert!(body.attribute("in").is_some());
    }

    #[test]
    fn test_two_attributes_on_one_line() {
        let err = parse_err("a = 1 b = 2\n");
        assert_eq!(err.context(), Some("attribute"));
        assert_eq!(
            err.root_cause().to_string(),
            "Unexpected identifier `b`, expected newline after argument"
        );
    }

    #[test]
    fn test_unclosed_block() {
        let err = parse_err("module \"a\" {\n  source = \"x\"\n");
        assert!(matches!(
            err.root_cause(),
            ParseError::UnexpectedEOF { .. }
        ));
    }

    #[test]
    fn test_stray_token() {
        let err = parse_err("= 1\n");
        assert_eq!(err.context(), Some("argument or block definition"));
        assert_eq!(err.span().map(|s| (s.line, s.column)), Some((1, 1)));
    }
}
