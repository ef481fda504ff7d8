//! Resolution of one attribute expression to a [`Value`].
//!
//! Literal values (numbers, `true`, `false`, `null`) are evaluated directly.
//! Everything else is never evaluated: the raw source text of the expression is
//! read back from the file, unquoted when it is a quoted string, and its type is
//! sniffed with [`SNIFFERS`].

use thiserror::Error;

use crate::{
    ast::{self, Expression, LiteralValue},
    diagnostics::{Diagnostic, Diagnostics},
    source::SourceFile,
    value::{Number, Value},
};

use super::unquote::unquote;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ResolveError {
    #[error("Failed to read raw attribute source for {name:?}: {reason}")]
    RawSource { name: String, reason: String },
    #[error("Invalid literal value for {name:?}: {text}")]
    Literal { name: String, text: String },
    #[error("Failed to convert attribute value for {name:?}: {reason}")]
    Conversion { name: String, reason: String },
}

impl ResolveError {
    pub fn name(&self) -> &str {
        match self {
            ResolveError::RawSource { name, .. }
            | ResolveError::Literal { name, .. }
            | ResolveError::Conversion { name, .. } => name,
        }
    }

    pub fn summary(&self) -> &'static str {
        match self {
            ResolveError::RawSource { .. } => "Failed to read raw attribute source",
            ResolveError::Literal { .. } => "Invalid literal value",
            ResolveError::Conversion { .. } => "Failed to convert attribute value",
        }
    }

    pub fn detail(&self) -> String {
        match self {
            ResolveError::RawSource { name, reason } => format!(
                "An error was encountered reading the raw source of attribute {:?}: {}.",
                name, reason
            ),
            ResolveError::Literal { name, text } => format!(
                "The number {} given for attribute {:?} cannot be represented.",
                text, name
            ),
            ResolveError::Conversion { name, reason } => format!(
                "An error was encountered converting the value of attribute {:?}: {}.",
                name, reason
            ),
        }
    }
}

/// Result of one typed parser in the sniffing chain.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Sniffed {
    Bool(bool),
    Integer(i64),
    Float(f64),
}

pub type Sniffer = fn(&str) -> Option<Sniffed>;

/// Typed parsers tried in order on unquoted source text; the first match wins.
/// Text no parser accepts is an opaque string.
pub const SNIFFERS: &[(&str, Sniffer)] = &[
    ("bool", sniff_bool),
    ("integer", sniff_integer),
    ("float", sniff_float),
];

/// `1`, `t` and `true` in its common casings, and their negations. `"1"` and
/// `"0"` are therefore booleans, not integers.
fn sniff_bool(text: &str) -> Option<Sniffed> {
    match text {
        "1" | "t" | "T" | "true" | "TRUE" | "True" => Some(Sniffed::Bool(true)),
        "0" | "f" | "F" | "false" | "FALSE" | "False" => Some(Sniffed::Bool(false)),
        _ => None,
    }
}

fn sniff_integer(text: &str) -> Option<Sniffed> {
    text.parse::<i64>().ok().map(Sniffed::Integer)
}

fn sniff_float(text: &str) -> Option<Sniffed> {
    text.parse::<f64>().ok().map(Sniffed::Float)
}

/// Runs the sniffing chain and converts the native result.
pub fn sniff(name: &str, text: &str) -> Result<Value, ResolveError> {
    let sniffed = SNIFFERS
        .iter()
        .find_map(|(kind, sniffer)| sniffer(text).map(|value| (*kind, value)));

    match sniffed {
        Some((kind, value)) => {
            tracing::trace!("{:?} sniffed as {}", text, kind);
            convert(name, value)
        }
        None => Ok(Value::String(text.to_string())),
    }
}

fn convert(name: &str, sniffed: Sniffed) -> Result<Value, ResolveError> {
    match sniffed {
        Sniffed::Bool(b) => Ok(Value::Bool(b)),
        Sniffed::Integer(i) => Ok(Value::Number(Number::Integer(i))),
        Sniffed::Float(f) if f.is_nan() => Err(ResolveError::Conversion {
            name: name.to_string(),
            reason: "NaN is not a number value".to_string(),
        }),
        Sniffed::Float(f) => Ok(Value::Number(Number::Float(f))),
    }
}

fn literal(name: &str, value: &LiteralValue) -> Result<Value, ResolveError> {
    match value {
        LiteralValue::Null => Ok(Value::Unknown),
        LiteralValue::Bool(b) => Ok(Value::Bool(*b)),
        LiteralValue::Number(text) => Number::parse(text)
            .filter(Number::is_finite)
            .map(Value::Number)
            .ok_or_else(|| ResolveError::Literal {
                name: name.to_string(),
                text: text.clone(),
            }),
    }
}

fn raw_text<'a>(name: &str, expr: &Expression, file: &'a SourceFile) -> Result<&'a str, ResolveError> {
    let bytes = file
        .read_at(&expr.span)
        .ok_or_else(|| ResolveError::RawSource {
            name: name.to_string(),
            reason: format!(
                "byte range {}..{} is outside {} ({} bytes)",
                expr.span.start,
                expr.span.end,
                file.filename(),
                file.bytes().len()
            ),
        })?;
    std::str::from_utf8(bytes).map_err(|e| ResolveError::RawSource {
        name: name.to_string(),
        reason: e.to_string(),
    })
}

/// Classifies the expression bound to `name`.
pub fn classify(name: &str, expr: &Expression, file: &SourceFile) -> Result<Value, ResolveError> {
    if let Some(value) = expr.as_literal() {
        return literal(name, value);
    }

    let raw = raw_text(name, expr, file)?;
    match unquote(raw) {
        Some(text) => sniff(name, &text),
        None => sniff(name, raw),
    }
}

/// Resolves one attribute, reporting a failure as an error diagnostic on the
/// attribute's range.
#[tracing::instrument(level = "debug", skip_all, fields(name = %attr.name))]
pub fn resolve(attr: &ast::Attribute, file: &SourceFile) -> (Option<Value>, Diagnostics) {
    match classify(&attr.name, &attr.expr, file) {
        Ok(value) => {
            tracing::debug!("resolved to {} {}", value.type_name(), value);
            (Some(value), Diagnostics::new())
        }
        Err(e) => {
            let diagnostic = Diagnostic::error(e.summary(), e.detail())
                .with_subject(file.range(&attr.span));
            (None, diagnostic.into())
        }
    }
}
