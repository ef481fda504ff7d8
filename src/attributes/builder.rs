use crate::{
    ast,
    diagnostics::Diagnostics,
    source::SourceFile,
};

use super::{classifier::resolve, Attribute, AttributeTable};

/// Resolves every attribute into a fresh table.
///
/// Attributes that fail to resolve are left out of the table; each one adds
/// an error diagnostic. Diagnostics keep the order of `attributes`.
#[tracing::instrument(level = "debug", skip_all, fields(filename = file.filename()))]
pub fn build_table<'a, I>(attributes: I, file: &SourceFile) -> (AttributeTable, Diagnostics)
where
    I: IntoIterator<Item = &'a ast::Attribute>,
{
    let mut table = AttributeTable::new();
    let mut diags = Diagnostics::new();

    for attr in attributes {
        let (value, attr_diags) = resolve(attr, file);
        diags.extend(attr_diags);

        let Some(value) = value else {
            tracing::warn!("dropping attribute {:?} in {}", attr.name, file.filename());
            continue;
        };

        let added = table.insert(Attribute {
            name: attr.name.clone(),
            range: file.range(&attr.span),
            expr_span: attr.expr.span,
            value,
        });
        if !added {
            tracing::warn!("attribute {:?} already resolved, keeping the first", attr.name);
        }
    }

    tracing::debug!("{} attributes, {} diagnostics", table.len(), diags.len());
    (table, diags)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyzer::parse_file;
    use crate::tokenizer::token::Span;
    use crate::value::Value;

    fn attributes(file: &SourceFile) -> Vec<ast::Attribute> {
        let (body, diags) = parse_file(file);
        assert!(diags.is_empty(), "{:?}", diags);
        body.unwrap().attributes().cloned().collect()
    }

    #[test]
    fn test_empty_input() {
        let file = SourceFile::new("main.tf", "");
        let (table, diags) = build_table(&Vec::<ast::Attribute>::new(), &file);
        assert!(table.is_empty());
        assert!(diags.is_empty());
    }

    #[test]
    fn test_module_call_arguments() {
        let file = SourceFile::new(
            "main.tf",
            "unused = 2\nid = data.external.something.result.id\nflag = \"true\"\n",
        );
        let (table, diags) = build_table(&attributes(&file), &file);
        assert!(diags.is_empty());
        assert_eq!(table.value("unused"), Some(&Value::from(2)));
        assert_eq!(
            table.value("id"),
            Some(&Value::from("data.external.something.result.id"))
        );
        assert_eq!(table.value("flag"), Some(&Value::from(true)));
    }

    #[test]
    fn test_partial_success() {
        let file = SourceFile::new("main.tf", "a = 1\nb = var.b\n");
        let mut attrs = attributes(&file);
        attrs[1].expr.span = Span {
            start: 100,
            end: 105,
            line: 2,
            column: 5,
        };

        let (table, diags) = build_table(&attrs, &file);
        assert_eq!(table.names().collect::<Vec<_>>(), vec!["a"]);
        assert_eq!(diags.len(), 1);
        let diag = diags.iter().next().unwrap();
        assert!(diag.is_error());
        assert!(diag.detail.contains("\"b\""));
    }

    #[test]
    fn test_all_failed() {
        let file = SourceFile::new("main.tf", "a = 1e999\nb = \"NaN\"\n");
        let (table, diags) = build_table(&attributes(&file), &file);
        assert!(table.is_empty());
        let summaries: Vec<_> = diags.iter().map(|d| d.summary.as_str()).collect();
        assert_eq!(
            summaries,
            vec!["Invalid literal value", "Failed to convert attribute value"]
        );
    }

    #[test]
    fn test_expression_span_is_kept() {
        let source = "a = \"${x}\"\n";
        let file = SourceFile::new("main.tf", source);
        let (table, _) = build_table(&attributes(&file), &file);
        let attr = table.get("a").unwrap();
        assert_eq!(&source[attr.expr_span.start..attr.expr_span.end], "\"${x}\"");
        assert_eq!(attr.range.column, 1);
    }
}
