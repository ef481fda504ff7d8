/// Reserved words of the expression language.
///
/// HCL has no reserved attribute names, so the analyzer still accepts keywords
/// wherever a plain name is expected (attribute keys, block types, `.attr` steps).
#[derive(
    Debug, Clone, PartialEq, Eq, strum::EnumString, strum::Display, strum::EnumIter, strum::AsRefStr,
)]
#[strum(serialize_all = "lowercase")]
pub enum Keyword {
    True,
    False,
    Null,
    For,
    In,
    If,
}
