use core::fmt;

use crate::tokenizer::{literal::TemplatePart, token::Span};

// Configuration file body
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Body {
    pub structures: Vec<Structure>,
}

impl Body {
    pub fn new(structures: Vec<Structure>) -> Self {
        Self { structures }
    }

    pub fn attributes(&self) -> impl Iterator<Item = &Attribute> {
        self.structures.iter().filter_map(|s| match s {
            Structure::Attribute(attr) => Some(attr),
            Structure::Block(_) => None,
        })
    }

    pub fn blocks(&self) -> impl Iterator<Item = &Block> {
        self.structures.iter().filter_map(|s| match s {
            Structure::Block(block) => Some(block),
            Structure::Attribute(_) => None,
        })
    }

    pub fn attribute(&self, name: &str) -> Option<&Attribute> {
        self.attributes().find(|attr| attr.name == name)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Structure {
    Attribute(Attribute),
    Block(Block),
}

// name = expression
#[derive(Debug, Clone, PartialEq)]
pub struct Attribute {
    pub name: String,
    pub name_span: Span,
    pub expr: Expression,
    /// From the name to the end of the expression
    pub span: Span,
}

// type "label" ... { body }
#[derive(Debug, Clone, PartialEq)]
pub struct Block {
    pub ident: String,
    pub ident_span: Span,
    pub labels: Vec<BlockLabel>,
    pub body: Body,
    /// From the block type to the closing brace
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BlockLabel {
    pub value: String,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Expression {
    pub kind: ExpressionKind,
    pub span: Span,
}

impl Expression {
    pub fn new(kind: ExpressionKind, span: Span) -> Self {
        Self { kind, span }
    }

    /// A bare constant: number, `true`, `false` or `null`.
    ///
    /// Quoted strings are templates and never count as literals, even without
    /// interpolations.
    pub fn as_literal(&self) -> Option<&LiteralValue> {
        match &self.kind {
            ExpressionKind::Literal(value) => Some(value),
            _ => None,
        }
    }

    /// Text of a template or heredoc that needs no evaluation.
    pub fn static_string(&self) -> Option<String> {
        match &self.kind {
            ExpressionKind::Template(parts) => parts
                .iter()
                .map(|part| match part {
                    TemplatePart::Literal(text) => Some(text.as_str()),
                    _ => None,
                })
                .collect::<Option<Vec<_>>>()
                .map(|texts| texts.concat()),
            ExpressionKind::Heredoc { content, .. }
                if !content.contains("${") && !content.contains("%{") =>
            {
                Some(content.clone())
            }
            ExpressionKind::Parenthesis(inner) => inner.static_string(),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ExpressionKind {
    Literal(LiteralValue),
    Template(Vec<TemplatePart>),
    Heredoc {
        strip_indent: bool,
        content: String,
    },
    Variable(String),
    Traversal {
        root: Box<Expression>,
        operators: Vec<TraversalOperator>,
    },
    FunctionCall {
        name: String,
        args: Vec<Expression>,
        /// The last argument is followed by `...`
        expand_final: bool,
    },
    Tuple(Vec<Expression>),
    Object(Vec<ObjectItem>),
    Parenthesis(Box<Expression>),
    Unary {
        op: UnaryOperator,
        operand: Box<Expression>,
    },
    Binary {
        op: BinaryOperator,
        left: Box<Expression>,
        right: Box<Expression>,
    },
    Conditional {
        condition: Box<Expression>,
        true_expr: Box<Expression>,
        false_expr: Box<Expression>,
    },
    For(Box<ForExpr>),
}

#[derive(Debug, Clone, PartialEq)]
pub enum LiteralValue {
    Null,
    Bool(bool),
    /// Number as written in the source
    Number(String),
}

impl fmt::Display for LiteralValue {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            LiteralValue::Null => write!(f, "null"),
            LiteralValue::Bool(b) => write!(f, "{}", b),
            LiteralValue::Number(n) => write!(f, "{}", n),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum TraversalOperator {
    /// `.name`
    GetAttr(String),
    /// `.0`
    LegacyIndex(u64),
    /// `[expr]`
    Index(Expression),
    /// `.*`
    AttrSplat,
    /// `[*]`
    FullSplat,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ObjectItem {
    pub key: Expression,
    pub value: Expression,
}

// [for k, v in coll : value if cond] / {for k, v in coll : key => value... if cond}
#[derive(Debug, Clone, PartialEq)]
pub struct ForExpr {
    pub key_var: Option<String>,
    pub value_var: String,
    pub collection: Expression,
    pub key_expr: Option<Expression>,
    pub value_expr: Expression,
    pub condition: Option<Expression>,
    pub grouping: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnaryOperator {
    Negate,
    Not,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOperator {
    Multiply,
    Divide,
    Modulo,
    Add,
    Subtract,
    Equal,
    NotEqual,
    LessThan,
    GreaterThan,
    LessThanEqual,
    GreaterThanEqual,
    And,
    Or,
}
