//! Turns query templates into executable SPARQL text for a given subject.

/// The variable name templates use to refer to the projected subject.
pub const SUBJECT_PLACEHOLDER: &str = "?subject";

/// Binds `subject` into `template` and prepends the shared `prologue`.
///
/// Every `?subject` token is replaced by the IRI reference `<subject>`. Longer variable names that
/// merely start with the placeholder (e.g. `?subjectType`) are left untouched. The prologue is
/// prepended verbatim, without any separator.
///
/// The query syntax is not checked here, a malformed result is only reported when the query is
/// evaluated.
///
/// ```
/// use rdf_projection::binder::bind;
///
/// assert_eq!(
///     bind("PREFIX ex: <http://ex.org/> ", "SELECT ?l WHERE { ?subject ex:label ?l }", "http://ex.org/s1"),
///     "PREFIX ex: <http://ex.org/> SELECT ?l WHERE { <http://ex.org/s1> ex:label ?l }"
/// );
/// ```
pub fn bind(prologue: &str, template: &str, subject: &str) -> String {
    let reference = format!("<{subject}>");
    let mut query = String::with_capacity(prologue.len() + template.len() + reference.len());
    query.push_str(prologue);

    let mut rest = template;
    while let Some(position) = rest.find(SUBJECT_PLACEHOLDER) {
        let end = position + SUBJECT_PLACEHOLDER.len();
        query.push_str(&rest[..position]);
        if rest[end..].chars().next().is_some_and(is_variable_char) {
            query.push_str(SUBJECT_PLACEHOLDER);
        } else {
            query.push_str(&reference);
        }
        rest = &rest[end..];
    }
    query.push_str(rest);
    query
}

/// Characters allowed after the first one of a SPARQL `VARNAME`.
fn is_variable_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_' || c == '\u{B7}'
}
