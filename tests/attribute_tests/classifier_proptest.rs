//! Property-based tests for attribute classification and encoding.

use hclmeta::{analyzer::parse_file, attributes::resolve, SourceFile, Value};
use proptest::prelude::*;

use super::table_of;

/// Lowercase words that none of the typed parsers accept.
fn word_strategy() -> impl Strategy<Value = String> {
    "[a-z][a-z0-9_]{0,12}".prop_filter("must not sniff as bool or number", |s| {
        !matches!(
            s.as_str(),
            "t" | "f" | "true" | "false" | "inf" | "infinity" | "nan"
        )
    })
}

proptest! {
    #[test]
    fn test_quoted_integers_sniff_as_integers(
        n in any::<i64>().prop_filter("0 and 1 sniff as bools", |n| !(0..=1).contains(n))
    ) {
        let (table, diags) = table_of(&format!("a = \"{}\"\n", n));
        prop_assert!(diags.is_empty());
        prop_assert_eq!(table.value("a"), Some(&Value::from(n)));
    }

    #[test]
    fn test_bare_integers_stay_integers(n in any::<i64>()) {
        let (table, diags) = table_of(&format!("a = {}\n", n));
        prop_assert!(diags.is_empty());
        prop_assert_eq!(table.value("a"), Some(&Value::from(n)));

        let json = serde_json::to_value(&table).unwrap();
        prop_assert_eq!(json["a"].as_i64(), Some(n));
    }

    #[test]
    fn test_quoted_words_stay_strings(word in word_strategy()) {
        let (table, _) = table_of(&format!("a = \"{}\"\n", word));
        prop_assert_eq!(table.value("a"), Some(&Value::String(word.clone())));
    }

    #[test]
    fn test_references_keep_source_text(root in word_strategy(), attr in word_strategy()) {
        let reference = format!("var.{}.{}", root, attr);
        let (table, diags) = table_of(&format!("a = {}\n", reference));
        prop_assert!(diags.is_empty());
        prop_assert_eq!(table.value("a"), Some(&Value::String(reference)));
    }

    #[test]
    fn test_finite_floats_encode_with_decimal_point(f in -1.0e12f64..1.0e12f64) {
        let (table, _) = table_of(&format!("a = {:?}\n", f));
        let text = serde_json::to_string(&table).unwrap();
        let number = text
            .strip_prefix("{\"a\":")
            .and_then(|rest| rest.strip_suffix('}'))
            .unwrap();
        let mantissa = number.split(['e', 'E']).next().unwrap();
        prop_assert!(mantissa.contains('.'), "{} has no decimal point", text);
        prop_assert_eq!(number.parse::<f64>().unwrap(), f);
    }

    #[test]
    fn test_classification_is_idempotent(text in "[ -~]{0,20}") {
        let source = format!("a = {:?}\n", text);
        let file = SourceFile::new("main.tf", source.as_str());
        let (body, _) = parse_file(&file);
        if let Some(body) = body {
            for attr in body.attributes() {
                prop_assert_eq!(resolve(attr, &file), resolve(attr, &file));
            }
        }
    }
}
