use super::core::ParseError;
use super::core::ParseResult;
use super::core::Parser;
use crate::tokenizer::token::{Span, TokenSpan};
use std::marker::PhantomData;

// Satisfy: consumes one token when `f` maps it to a value
#[derive(Clone)]
pub struct Satisfy<O, F> {
    expected: String,
    f: F,
    _phantom: PhantomData<O>,
}

impl<O, F> Satisfy<O, F> {
    pub fn new(expected: &str, f: F) -> Self {
        Self {
            expected: expected.to_string(),
            f,
            _phantom: PhantomData,
        }
    }
}

impl<O, F> Parser<TokenSpan, O> for Satisfy<O, F>
where
    F: Fn(&TokenSpan) -> Option<O>,
{
    fn parse(&self, input: &[TokenSpan], pos: usize) -> ParseResult<O> {
        match input.get(pos) {
            Some(token) => match (self.f)(token) {
                Some(result) => Ok((pos + 1, result)),
                None => Err(ParseError::Unexpected {
                    expected: self.expected.clone(),
                    found: token.token.to_string(),
                    span: token.span(),
                }),
            },
            None => Err(ParseError::UnexpectedEOF {
                expected: self.expected.clone(),
            }),
        }
    }
}

// Choice: first success wins; on failure reports the alternative that got furthest
pub struct Choice<I, O> {
    parsers: Vec<Box<dyn Parser<I, O>>>,
}

impl<I, O> Choice<I, O> {
    pub fn new(parsers: Vec<Box<dyn Parser<I, O>>>) -> Self {
        Self { parsers }
    }
}

impl<I, O> Parser<I, O> for Choice<I, O> {
    fn parse(&self, input: &[I], pos: usize) -> ParseResult<O> {
        let mut furthest: Option<ParseError> = None;
        for parser in &self.parsers {
            match parser.parse(input, pos) {
                Ok(result) => return Ok(result),
                Err(e) if e.is_fatal() => return Err(e),
                Err(e) => {
                    if furthest
                        .as_ref()
                        .map_or(true, |best| e.progress() > best.progress())
                    {
                        furthest = Some(e);
                    }
                }
            }
        }
        Err(furthest.unwrap_or(ParseError::NoAlternative))
    }
}

#[derive(Clone)]
pub struct Preceded<P1, P2, I, O1> {
    parser1: P1,
    parser2: P2,
    _phantom: PhantomData<(I, O1)>,
}

impl<P1, P2, I, O1> Preceded<P1, P2, I, O1> {
    pub fn new(parser1: P1, parser2: P2) -> Self {
        Self {
            parser1,
            parser2,
            _phantom: PhantomData,
        }
    }
}

impl<P1, P2, I, O1, O2> Parser<I, O2> for Preceded<P1, P2, I, O1>
where
    P1: Parser<I, O1>,
    P2: Parser<I, O2>,
{
    fn parse(&self, input: &[I], pos: usize) -> ParseResult<O2> {
        let (pos, _) = self.parser1.parse(input, pos)?;
        self.parser2.parse(input, pos)
    }
}

#[derive(Clone)]
pub struct Map<P, F, A, B> {
    parser: P,
    f: F,
    _phantom: PhantomData<(A, B)>,
}

impl<P, F, A, B> Map<P, F, A, B> {
    pub fn new(parser: P, f: F) -> Self {
        Self {
            parser,
            f,
            _phantom: PhantomData,
        }
    }
}

impl<I, A, B, P, F> Parser<I, B> for Map<P, F, A, B>
where
    P: Parser<I, A>,
    F: Fn(A) -> B,
{
    fn parse(&self, input: &[I], pos: usize) -> ParseResult<B> {
        self.parser
            .parse(input, pos)
            .map(|(pos, value)| (pos, (self.f)(value)))
    }
}

#[derive(Clone)]
pub struct Many<P, I, O> {
    parser: P,
    _phantom: PhantomData<(I, O)>,
}

impl<P, I, O> Many<P, I, O> {
    pub fn new(parser: P) -> Self {
        Self {
            parser,
            _phantom: PhantomData,
        }
    }
}

impl<I, O, P> Parser<I, Vec<O>> for Many<P, I, O>
where
    P: Parser<I, O>,
{
    fn parse(&self, input: &[I], pos: usize) -> ParseResult<Vec<O>> {
        let mut results = Vec::new();
        let mut current_pos = pos;

        loop {
            match self.parser.parse(input, current_pos) {
                Ok((new_pos, value)) => {
                    results.push(value);
                    current_pos = new_pos;
                }
                Err(e) if e.is_fatal() => return Err(e),
                Err(_) => break,
            }
        }

        Ok((current_pos, results))
    }
}

pub struct SeparatedList<P, S, I, O, OS> {
    item_parser: P,
    separator_parser: S,
    _phantom: PhantomData<(I, O, OS)>,
}

impl<P, S, I, O, OS> SeparatedList<P, S, I, O, OS> {
    pub fn new(item_parser: P, separator_parser: S) -> Self {
        Self {
            item_parser,
            separator_parser,
            _phantom: PhantomData,
        }
    }
}

impl<I, O, OS, P, S> Parser<I, Vec<O>> for SeparatedList<P, S, I, O, OS>
where
    P: Parser<I, O>,
    S: Parser<I, OS>,
{
    fn parse(&self, input: &[I], pos: usize) -> ParseResult<Vec<O>> {
        let mut results = Vec::new();
        let mut current_pos = pos;

        // an empty list is fine
        match self.item_parser.parse(input, current_pos) {
            Ok((new_pos, value)) => {
                results.push(value);
                current_pos = new_pos;
            }
            Err(e) if e.is_fatal() => return Err(e),
            Err(_) => return Ok((current_pos, results)),
        }

        // a separator without an item after it is a trailing separator
        while let Ok((sep_pos, _)) = self.separator_parser.parse(input, current_pos) {
            match self.item_parser.parse(input, sep_pos) {
                Ok((new_pos, value)) => {
                    results.push(value);
                    current_pos = new_pos;
                }
                Err(e) if e.is_fatal() => return Err(e),
                Err(_) => {
                    current_pos = sep_pos;
                    break;
                }
            }
        }

        Ok((current_pos, results))
    }
}

#[derive(Clone)]
pub struct Optional<P, I, O> {
    parser: P,
    _phantom: PhantomData<(I, O)>,
}

impl<P, I, O> Optional<P, I, O> {
    pub fn new(parser: P) -> Self {
        Self {
            parser,
            _phantom: PhantomData,
        }
    }
}

impl<I, O, P> Parser<I, Option<O>> for Optional<P, I, O>
where
    P: Parser<I, O>,
{
    fn parse(&self, input: &[I], pos: usize) -> ParseResult<Option<O>> {
        match self.parser.parse(input, pos) {
            Ok((new_pos, value)) => Ok((new_pos, Some(value))),
            Err(e) if e.is_fatal() => Err(e),
            Err(_) => Ok((pos, None)),
        }
    }
}

#[derive(Clone)]
pub struct Tuple2<P1, P2, I, O1, O2> {
    parser1: P1,
    parser2: P2,
    _phantom: PhantomData<(I, O1, O2)>,
}

impl<P1, P2, I, O1, O2> Tuple2<P1, P2, I, O1, O2> {
    pub fn new(parser1: P1, parser2: P2) -> Self {
        Self {
            parser1,
            parser2,
            _phantom: PhantomData,
        }
    }
}

impl<P1, P2, I, O1, O2> Parser<I, (O1, O2)> for Tuple2<P1, P2, I, O1, O2>
where
    P1: Parser<I, O1>,
    P2: Parser<I, O2>,
{
    fn parse(&self, input: &[I], pos: usize) -> ParseResult<(O1, O2)> {
        let (pos, result1) = self.parser1.parse(input, pos)?;
        let (pos, result2) = self.parser2.parse(input, pos)?;
        Ok((pos, (result1, result2)))
    }
}

#[derive(Clone)]
pub struct Tuple3<P1, P2, P3, I, O1, O2, O3> {
    parser1: P1,
    parser2: P2,
    parser3: P3,
    _phantom: PhantomData<(I, O1, O2, O3)>,
}

impl<P1, P2, P3, I, O1, O2, O3> Tuple3<P1, P2, P3, I, O1, O2, O3> {
    pub fn new(parser1: P1, parser2: P2, parser3: P3) -> Self {
        Self {
            parser1,
            parser2,
            parser3,
            _phantom: PhantomData,
        }
    }
}

impl<P1, P2, P3, I, O1, O2, O3> Parser<I, (O1, O2, O3)> for Tuple3<P1, P2, P3, I, O1, O2, O3>
where
    P1: Parser<I, O1>,
    P2: Parser<I, O2>,
    P3: Parser<I, O3>,
{
    fn parse(&self, input: &[I], pos: usize) -> ParseResult<(O1, O2, O3)> {
        let (pos, result1) = self.parser1.parse(input, pos)?;
        let (pos, result2) = self.parser2.parse(input, pos)?;
        let (pos, result3) = self.parser3.parse(input, pos)?;
        Ok((pos, (result1, result2, result3)))
    }
}

#[derive(Clone)]
pub struct Delimited<L, P, R, I, OL, OR> {
    left: L,
    parser: P,
    right: R,
    _phantom: PhantomData<(I, OL, OR)>,
}

impl<L, P, R, I, OL, OR> Delimited<L, P, R, I, OL, OR> {
    pub fn new(left: L, parser: P, right: R) -> Self {
        Self {
            left,
            parser,
            right,
            _phantom: PhantomData,
        }
    }
}

impl<I, O, OL, OR, L, P, R> Parser<I, O> for Delimited<L, P, R, I, OL, OR>
where
    L: Parser<I, OL>,
    P: Parser<I, O>,
    R: Parser<I, OR>,
{
    fn parse(&self, input: &[I], pos: usize) -> ParseResult<O> {
        let (pos, _) = self.left.parse(input, pos)?;
        let (pos, value) = self.parser.parse(input, pos)?;
        let (pos, _) = self.right.parse(input, pos)?;
        Ok((pos, value))
    }
}

#[derive(Clone)]
pub struct WithContext<P, C> {
    parser: P,
    context: C,
}

impl<P, C> WithContext<P, C> {
    pub fn new(parser: P, context: C) -> Self {
        Self { parser, context }
    }
}

impl<I, O, P, C: ToString> Parser<I, O> for WithContext<P, C>
where
    P: Parser<I, O>,
{
    fn parse(&self, input: &[I], pos: usize) -> ParseResult<O> {
        self.parser
            .parse(input, pos)
            .map_err(|e| ParseError::WithContext {
                message: self.context.to_string(),
                inner: Box::new(e),
            })
    }
}

#[derive(Clone)]
pub struct Lazy<F> {
    f: F,
}

impl<F> Lazy<F> {
    pub fn new(f: F) -> Self {
        Self { f }
    }
}

impl<I, O, F, P> Parser<I, O> for Lazy<F>
where
    F: Fn() -> P,
    P: Parser<I, O>,
{
    fn parse(&self, input: &[I], pos: usize) -> ParseResult<O> {
        (self.f)().parse(input, pos)
    }
}

// Spanned: pairs the result with the source span of the consumed tokens
#[derive(Clone)]
pub struct Spanned<P, O> {
    parser: P,
    _phantom: PhantomData<O>,
}

impl<P, O> Spanned<P, O> {
    pub fn new(parser: P) -> Self {
        Self {
            parser,
            _phantom: PhantomData,
        }
    }
}

impl<P, O> Parser<TokenSpan, (O, Span)> for Spanned<P, O>
where
    P: Parser<TokenSpan, O>,
{
    fn parse(&self, input: &[TokenSpan], pos: usize) -> ParseResult<(O, Span)> {
        let (new_pos, value) = self.parser.parse(input, pos)?;
        Ok((new_pos, (value, span_between(input, pos, new_pos))))
    }
}

/// Span covering `input[start..end]`.
pub fn span_between(input: &[TokenSpan], start: usize, end: usize) -> Span {
    match (input.get(start), end.checked_sub(1).and_then(|last| input.get(last))) {
        (Some(first), Some(last)) if end > start => first.span().to(&last.span()),
        (Some(first), _) => Span {
            end: first.start,
            ..first.span()
        },
        _ => input.last().map_or_else(Span::default, |last| Span {
            start: last.end,
            ..last.span()
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tokenizer::token::{Token, Tokenizer};

    fn tokens(input: &str) -> Vec<TokenSpan> {
        Tokenizer::new()
            .tokenize(input)
            .unwrap()
            .into_iter()
            .filter(|t| !t.token.is_whitespace())
            .collect()
    }

    fn ident() -> Satisfy<String, impl Fn(&TokenSpan) -> Option<String>> {
        Satisfy::new("identifier", |t: &TokenSpan| match &t.token {
            Token::Identifier(name) => Some(name.clone()),
            _ => None,
        })
    }

    fn comma() -> Satisfy<(), impl Fn(&TokenSpan) -> Option<()>> {
        Satisfy::new("`,`", |t: &TokenSpan| {
            matches!(
                t.token,
                Token::Delimiter(crate::tokenizer::symbol::Delimiter::Comma)
            )
            .then_some(())
        })
    }

    #[test]
    fn test_satisfy() {
        let input = tokens("abc 1");
        assert_eq!(ident().parse(&input, 0), Ok((1, "abc".to_string())));

        let err = ident().parse(&input, 1).unwrap_err();
        assert_eq!(err.span().map(|s| s.start), Some(4));
        assert_eq!(err.to_string(), "Unexpected number `1`, expected identifier");

        assert!(matches!(
            ident().parse(&input, 2),
            Err(ParseError::UnexpectedEOF { .. })
        ));
    }

    #[test]
    fn test_choice_reports_furthest_error() {
        let input = tokens("a , 1");
        let parser = Choice::new(vec![
            Box::new(Map::new(ident(), |_: String| 0)),
            Box::new(Map::new(
                Tuple3::new(ident(), comma(), ident()),
                |_: (String, (), String)| 1,
            )),
        ]);
        // the first alternative succeeds
        assert_eq!(parser.parse(&input, 0), Ok((1, 0)));

        let parser = Choice::new(vec![
            Box::new(Map::new(comma(), |_: ()| 0)),
            Box::new(Map::new(
                Tuple3::new(ident(), comma(), ident()),
                |_: (String, (), String)| 1,
            )),
        ]);
        let err = parser.parse(&input, 0).unwrap_err();
        assert_eq!(err.span().map(|s| s.start), Some(4));
    }

    #[test]
    fn test_many_and_optional() {
        let input = tokens("a b c 1");
        assert_eq!(
            Many::new(ident()).parse(&input, 0),
            Ok((3, vec!["a".to_string(), "b".to_string(), "c".to_string()]))
        );
        assert_eq!(Optional::new(ident()).parse(&input, 3), Ok((3, None)));
        assert_eq!(
            Optional::new(ident()).parse(&input, 2),
            Ok((3, Some("c".to_string())))
        );
    }

    #[test]
    fn test_separated_list() {
        let input = tokens("a, b, c");
        let parser = SeparatedList::new(ident(), comma());
        assert_eq!(parser.parse(&input, 0).unwrap().1.len(), 3);

        // trailing separator is consumed
        let input = tokens("a, b,");
        assert_eq!(parser.parse(&input, 0).unwrap().0, 4);

        // empty list
        let input = tokens("1");
        assert_eq!(parser.parse(&input, 0), Ok((0, vec![])));
    }

    #[test]
    fn test_fail_is_not_retried() {
        let input = tokens("a b 1");
        // identifiers, but `b` is rejected outright
        let strict = |input: &[TokenSpan], pos: usize| -> ParseResult<String> {
            let (next, name) = ident().parse(input, pos)?;
            if name == "b" {
                return Err(ParseError::Fail {
                    message: "no b".to_string(),
                    span: input[pos].span(),
                });
            }
            Ok((next, name))
        };

        let err = Many::new(strict).parse(&input, 0).unwrap_err();
        assert!(err.is_fatal());
        assert_eq!(err.span().map(|s| s.start), Some(2));

        assert!(Optional::new(strict).parse(&input, 1).is_err());
        assert_eq!(Optional::new(strict).parse(&input, 2), Ok((2, None)));
        assert!(SeparatedList::new(strict, comma()).parse(&input, 1).is_err());

        let parser = Choice::new(vec![
            Box::new(strict),
            Box::new(Map::new(ident(), |_: String| "fallback".to_string())),
        ]);
        assert!(parser.parse(&input, 1).unwrap_err().is_fatal());
    }

    #[test]
    fn test_delimited_and_preceded() {
        let input = tokens(", a ,");
        let parser = Delimited::new(comma(), ident(), comma());
        assert_eq!(parser.parse(&input, 0), Ok((3, "a".to_string())));

        let parser = Preceded::new(comma(), ident());
        assert_eq!(parser.parse(&input, 0), Ok((2, "a".to_string())));
    }

    #[test]
    fn test_with_context_wraps_error() {
        let input = tokens("1");
        let err = WithContext::new(ident(), "attribute name")
            .parse(&input, 0)
            .unwrap_err();
        assert!(matches!(err, ParseError::WithContext { ref message, .. } if message == "attribute name"));
    }

    #[test]
    fn test_spanned() {
        let input = tokens("a, bc");
        let parser = Spanned::new(SeparatedList::new(ident(), comma()));
        let (_, (_, span)) = parser.parse(&input, 0).unwrap();
        assert_eq!((span.start, span.end), (0, 5));
    }
}
