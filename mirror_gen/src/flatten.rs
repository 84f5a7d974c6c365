use mirror_types::TypeRef;

/// Flattens a qualified name into a single identifier.
///
/// Underscores are doubled before separators become underscores, so a lone
/// `_` in the result always marks a separator: `a_A` and `a.A` flatten to
/// `a__A` and `a_A` respectively.
pub fn flatten(qualified: &str) -> String {
    qualified.replace('_', "__").replace(['.', '/'], "_")
}

pub fn flatten_ref(type_ref: &TypeRef) -> String {
    flatten(&type_ref.qualified_name())
}
