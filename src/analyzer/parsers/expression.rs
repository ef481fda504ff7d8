use super::super::{combinators::span_between, core::*, prelude::*};
use super::common::*;
use crate::ast::{
    self, BinaryOperator, Expression, ExpressionKind, LiteralValue, TraversalOperator,
    UnaryOperator,
};
use crate::tokenizer::{
    keyword::Keyword,
    literal::Literal,
    symbol::{Delimiter, Operator},
    token::{Span, Token, TokenSpan},
};

type ExprFn = fn(&[TokenSpan], usize) -> ParseResult<Expression>;

pub fn parse_expression() -> impl Parser<TokenSpan, Expression> {
    with_context(parse_nested_expression as ExprFn, "expression")
}

fn parse_nested_expression(input: &[TokenSpan], pos: usize) -> ParseResult<Expression> {
    nested(input, pos, parse_conditional)
}

fn parse_conditional(input: &[TokenSpan], pos: usize) -> ParseResult<Expression> {
    let (pos, condition) = parse_or(input, pos)?;
    if !peek_is(input, pos, &Token::Operator(Operator::Question)) {
        return Ok((pos, condition));
    }

    let (pos, (true_expr, false_expr)) = tuple2(
        preceded(operator(Operator::Question), lazy(parse_expression)),
        preceded(parse_colon(), lazy(parse_expression)),
    )
    .parse(input, pos)?;

    let span = condition.span.to(&false_expr.span);
    Ok((
        pos,
        Expression::new(
            ExpressionKind::Conditional {
                condition: Box::new(condition),
                true_expr: Box::new(true_expr),
                false_expr: Box::new(false_expr),
            },
            span,
        ),
    ))
}

// Binary operators, lowest precedence first
const OR: &[(Operator, BinaryOperator)] = &[(Operator::Or, BinaryOperator::Or)];
const AND: &[(Operator, BinaryOperator)] = &[(Operator::And, BinaryOperator::And)];
const EQUALITY: &[(Operator, BinaryOperator)] = &[
    (Operator::EqualEqual, BinaryOperator::Equal),
    (Operator::NotEqual, BinaryOperator::NotEqual),
];
const COMPARISON: &[(Operator, BinaryOperator)] = &[
    (Operator::Greater, BinaryOperator::GreaterThan),
    (Operator::GreaterEqual, BinaryOperator::GreaterThanEqual),
    (Operator::Less, BinaryOperator::LessThan),
    (Operator::LessEqual, BinaryOperator::LessThanEqual),
];
const ADDITIVE: &[(Operator, BinaryOperator)] = &[
    (Operator::Plus, BinaryOperator::Add),
    (Operator::Minus, BinaryOperator::Subtract),
];
const MULTIPLICATIVE: &[(Operator, BinaryOperator)] = &[
    (Operator::Star, BinaryOperator::Multiply),
    (Operator::Slash, BinaryOperator::Divide),
    (Operator::Percent, BinaryOperator::Modulo),
];

fn parse_or(input: &[TokenSpan], pos: usize) -> ParseResult<Expression> {
    binary_level(parse_and, OR).parse(input, pos)
}

fn parse_and(input: &[TokenSpan], pos: usize) -> ParseResult<Expression> {
    binary_level(parse_equality, AND).parse(input, pos)
}

fn parse_equality(input: &[TokenSpan], pos: usize) -> ParseResult<Expression> {
    binary_level(parse_comparison, EQUALITY).parse(input, pos)
}

fn parse_comparison(input: &[TokenSpan], pos: usize) -> ParseResult<Expression> {
    binary_level(parse_additive, COMPARISON).parse(input, pos)
}

fn parse_additive(input: &[TokenSpan], pos: usize) -> ParseResult<Expression> {
    binary_level(parse_multiplicative, ADDITIVE).parse(input, pos)
}

fn parse_multiplicative(input: &[TokenSpan], pos: usize) -> ParseResult<Expression> {
    binary_level(parse_unary, MULTIPLICATIVE).parse(input, pos)
}

/// `operand (op operand)*`, folded left. Once an operator matched, a missing
/// right operand is an error rather than the end of the expression.
fn binary_level(
    operand: ExprFn,
    ops: &'static [(Operator, BinaryOperator)],
) -> impl Parser<TokenSpan, Expression> {
    move |input: &[TokenSpan], pos: usize| -> ParseResult<Expression> {
        let (mut next, mut left) = operand(input, pos)?;
        while let Ok((after_op, op)) = binary_operator(ops).parse(input, next) {
            let (after, right) = operand(input, after_op)?;
            let span = left.span.to(&right.span);
            left = Expression::new(
                ExpressionKind::Binary {
                    op,
                    left: Box::new(left),
                    right: Box::new(right),
                },
                span,
            );
            next = after;
        }
        Ok((next, left))
    }
}

fn binary_operator(
    ops: &'static [(Operator, BinaryOperator)],
) -> impl Parser<TokenSpan, BinaryOperator> {
    satisfy("operator", move |t: &TokenSpan| match &t.token {
        Token::Operator(op) => ops
            .iter()
            .find(|(candidate, _)| candidate == op)
            .map(|(_, binary)| *binary),
        _ => None,
    })
}

fn parse_unary(input: &[TokenSpan], pos: usize) -> ParseResult<Expression> {
    let op = match input.get(pos).map(|t| &t.token) {
        Some(Token::Operator(Operator::Not)) => UnaryOperator::Not,
        Some(Token::Operator(Operator::Minus)) => UnaryOperator::Negate,
        _ => return parse_postfix(input, pos),
    };

    let (next, operand) = nested(input, pos + 1, parse_unary)?;
    let span = input[pos].span().to(&operand.span);
    Ok((
        next,
        Expression::new(
            ExpressionKind::Unary {
                op,
                operand: Box::new(operand),
            },
            span,
        ),
    ))
}

fn parse_postfix(input: &[TokenSpan], pos: usize) -> ParseResult<Expression> {
    map(
        spanned(tuple2(parse_primary, many(parse_traversal_operator))),
        |((root, steps), span): ((Expression, Vec<Vec<TraversalOperator>>), Span)| {
            let operators: Vec<_> = steps.into_iter().flatten().collect();
            if operators.is_empty() {
                root
            } else {
                Expression::new(
                    ExpressionKind::Traversal {
                        root: Box::new(root),
                        operators,
                    },
                    span,
                )
            }
        },
    )
    .parse(input, pos)
}

/// One `.name`, `.0`, `.*`, `[expr]` or `[*]` step. `.0.1` arrives as a single
/// number token and yields two steps.
fn parse_traversal_operator(
    input: &[TokenSpan],
    pos: usize,
) -> ParseResult<Vec<TraversalOperator>> {
    match input.get(pos).map(|t| &t.token) {
        Some(Token::Operator(Operator::Dot)) => parse_attr_step(input, pos + 1),
        Some(Token::Delimiter(Delimiter::OpenBracket)) => parse_index_step().parse(input, pos),
        _ => Err(unexpected(input, pos, "`.` or `[`")),
    }
}

fn parse_attr_step(input: &[TokenSpan], pos: usize) -> ParseResult<Vec<TraversalOperator>> {
    let Some(token) = input.get(pos) else {
        return Err(unexpected(input, pos, "attribute name"));
    };
    match &token.token {
        Token::Operator(Operator::Star) => Ok((pos + 1, vec![TraversalOperator::AttrSplat])),
        Token::Literal(Literal::Number(text)) => legacy_index(text)
            .map(|steps| (pos + 1, steps))
            .ok_or_else(|| ParseError::Fail {
                message: format!("Invalid legacy index `{}`", text),
                span: token.span(),
            }),
        other => other
            .as_name()
            .map(|name| (pos + 1, vec![TraversalOperator::GetAttr(name.to_string())]))
            .ok_or_else(|| unexpected(input, pos, "attribute name")),
    }
}

fn legacy_index(text: &str) -> Option<Vec<TraversalOperator>> {
    text.split('.')
        .map(|part| part.parse::<u64>().ok().map(TraversalOperator::LegacyIndex))
        .collect()
}

fn parse_index_step() -> impl Parser<TokenSpan, Vec<TraversalOperator>> {
    choice(vec![
        Box::new(map(
            tuple3(
                parse_open_bracket(),
                operator(Operator::Star),
                parse_close_bracket(),
            ),
            |_: ((), (), ())| vec![TraversalOperator::FullSplat],
        )),
        Box::new(map(
            delimited(
                parse_open_bracket(),
                lazy(parse_expression),
                parse_close_bracket(),
            ),
            |index: Expression| vec![TraversalOperator::Index(index)],
        )),
    ])
}

fn parse_primary(input: &[TokenSpan], pos: usize) -> ParseResult<Expression> {
    let Some(token) = input.get(pos) else {
        return Err(unexpected(input, pos, "expression"));
    };

    match &token.token {
        Token::Literal(Literal::Number(_))
        | Token::Keyword(Keyword::True | Keyword::False | Keyword::Null) => {
            parse_literal_value().parse(input, pos)
        }
        Token::Literal(Literal::Template(parts)) => Ok((
            pos + 1,
            Expression::new(ExpressionKind::Template(parts.clone()), token.span()),
        )),
        Token::Literal(Literal::Heredoc {
            strip_indent,
            content,
            ..
        }) => Ok((
            pos + 1,
            Expression::new(
                ExpressionKind::Heredoc {
                    strip_indent: *strip_indent,
                    content: content.clone(),
                },
                token.span(),
            ),
        )),
        Token::Identifier(_)
            if peek_is(input, pos + 1, &Token::Delimiter(Delimiter::OpenParen)) =>
        {
            parse_function_call().parse(input, pos)
        }
        Token::Identifier(name) => Ok((
            pos + 1,
            Expression::new(ExpressionKind::Variable(name.clone()), token.span()),
        )),
        Token::Delimiter(Delimiter::OpenParen) => parse_parenthesis().parse(input, pos),
        Token::Delimiter(Delimiter::OpenBracket)
            if peek_is(input, pos + 1, &Token::Keyword(Keyword::For)) =>
        {
            parse_for_expression(input, pos)
        }
        Token::Delimiter(Delimiter::OpenBracket) => parse_tuple().parse(input, pos),
        Token::Delimiter(Delimiter::OpenBrace)
            if peek_is(
                input,
                skip_newlines(input, pos + 1),
                &Token::Keyword(Keyword::For),
            ) =>
        {
            parse_for_expression(input, pos)
        }
        Token::Delimiter(Delimiter::OpenBrace) => parse_object(input, pos),
        _ => Err(unexpected(input, pos, "expression")),
    }
}

fn parse_literal_value() -> impl Parser<TokenSpan, Expression> {
    with_context(
        map(
            spanned(satisfy("literal value", |t: &TokenSpan| match &t.token {
                Token::Literal(Literal::Number(n)) => Some(LiteralValue::Number(n.clone())),
                Token::Keyword(Keyword::True) => Some(LiteralValue::Bool(true)),
                Token::Keyword(Keyword::False) => Some(LiteralValue::Bool(false)),
                Token::Keyword(Keyword::Null) => Some(LiteralValue::Null),
                _ => None,
            })),
            |(value, span): (LiteralValue, Span)| {
                Expression::new(ExpressionKind::Literal(value), span)
            },
        ),
        "literal value",
    )
}

fn parse_function_call() -> impl Parser<TokenSpan, Expression> {
    with_context(
        map(
            spanned(tuple2(
                parse_identifier(),
                delimited(
                    parse_open_paren(),
                    tuple2(
                        separated_list(lazy(parse_expression), parse_comma()),
                        optional(operator(Operator::Ellipsis)),
                    ),
                    tuple2(optional(parse_comma()), parse_close_paren()),
                ),
            )),
            |((name, (args, ellipsis)), span): (
                (String, (Vec<Expression>, Option<()>)),
                Span,
            )| {
                Expression::new(
                    ExpressionKind::FunctionCall {
                        name,
                        args,
                        expand_final: ellipsis.is_some(),
                    },
                    span,
                )
            },
        ),
        "function call",
    )
}

fn parse_parenthesis() -> impl Parser<TokenSpan, Expression> {
    map(
        spanned(delimited(
            parse_open_paren(),
            lazy(parse_expression),
            parse_close_paren(),
        )),
        |(inner, span): (Expression, Span)| {
            Expression::new(ExpressionKind::Parenthesis(Box::new(inner)), span)
        },
    )
}

fn parse_tuple() -> impl Parser<TokenSpan, Expression> {
    with_context(
        map(
            spanned(delimited(
                parse_open_bracket(),
                separated_list(lazy(parse_expression), parse_comma()),
                parse_close_bracket(),
            )),
            |(items, span): (Vec<Expression>, Span)| {
                Expression::new(ExpressionKind::Tuple(items), span)
            },
        ),
        "tuple",
    )
}

/// Items are separated by commas, newlines, or both.
fn parse_object(input: &[TokenSpan], pos: usize) -> ParseResult<Expression> {
    let (mut next, _) = parse_open_brace().parse(input, pos)?;
    let mut items = Vec::new();

    loop {
        next = skip_newlines(input, next);
        if peek_is(input, next, &Token::Delimiter(Delimiter::CloseBrace)) {
            break;
        }

        let (after, item) = with_context(parse_object_item, "object").parse(input, next)?;
        items.push(item);
        next = after;

        match input.get(next).map(|t| &t.token) {
            Some(Token::Delimiter(Delimiter::Comma)) => next += 1,
            Some(Token::Newline) | Some(Token::Delimiter(Delimiter::CloseBrace)) => {}
            _ => {
                return Err(ParseError::WithContext {
                    message: "object".to_string(),
                    inner: Box::new(unexpected(input, next, "`,`, newline or `}`")),
                })
            }
        }
    }

    let end = next + 1;
    Ok((
        end,
        Expression::new(ExpressionKind::Object(items), span_between(input, pos, end)),
    ))
}

fn parse_object_item(input: &[TokenSpan], pos: usize) -> ParseResult<ast::ObjectItem> {
    map(
        tuple3(
            lazy(parse_expression),
            choice(vec![Box::new(parse_equal()), Box::new(parse_colon())]),
            lazy(parse_expression),
        ),
        |(key, _, value): (Expression, (), Expression)| ast::ObjectItem { key, value },
    )
    .parse(input, pos)
}

fn parse_for_expression(input: &[TokenSpan], pos: usize) -> ParseResult<Expression> {
    with_context(parse_for_clauses, "for expression").parse(input, pos)
}

fn parse_for_clauses(input: &[TokenSpan], pos: usize) -> ParseResult<Expression> {
    let object = peek_is(input, pos, &Token::Delimiter(Delimiter::OpenBrace));
    let close = if object {
        Delimiter::CloseBrace
    } else {
        Delimiter::CloseBracket
    };

    let (next, (first, second)) = preceded(
        keyword(Keyword::For),
        tuple2(
            parse_identifier(),
            optional(preceded(parse_comma(), parse_identifier())),
        ),
    )
    .parse(input, skip_newlines(input, pos + 1))?;
    let (key_var, value_var) = match second {
        Some(value) => (Some(first), value),
        None => (None, first),
    };

    let (next, collection) = delimited(
        keyword(Keyword::In),
        lazy(parse_expression),
        parse_colon(),
    )
    .parse(input, next)?;

    let next = skip_newlines(input, next);
    let (next, key_expr) = if object {
        let (next, key) = parse_expression().parse(input, next)?;
        let (next, _) = operator(Operator::FatArrow).parse(input, next)?;
        (skip_newlines(input, next), Some(key))
    } else {
        (next, None)
    };

    let (next, value_expr) = parse_expression().parse(input, next)?;
    let (next, grouping) = if object {
        optional(operator(Operator::Ellipsis)).parse(input, next)?
    } else {
        (next, None)
    };

    let next = skip_newlines(input, next);
    let (next, condition) =
        optional(preceded(keyword(Keyword::If), lazy(parse_expression))).parse(input, next)?;

    let next = skip_newlines(input, next);
    let (next, _) = delimiter(close).parse(input, next)?;

    Ok((
        next,
        Expression::new(
            ExpressionKind::For(Box::new(ast::ForExpr {
                key_var,
                value_var,
                collection,
                key_expr,
                value_expr,
                condition,
                grouping: grouping.is_some(),
            })),
            span_between(input, pos, next),
        ),
    ))
}
