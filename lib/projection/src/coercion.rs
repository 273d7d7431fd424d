//! Conversion of SPARQL result values into document strings.

use crate::error::CoercionError;
use oxigraph::model::vocab::xsd;
use oxigraph::model::{LiteralRef, NamedNodeRef, Term};
use oxsdatatypes::{Boolean, Date, DateTime, Decimal, Double, Float, Integer, Time};
use std::fmt::Display;
use std::str::FromStr;

const INTEGER_TYPES: [NamedNodeRef<'static>; 13] = [
    xsd::INTEGER,
    xsd::LONG,
    xsd::INT,
    xsd::SHORT,
    xsd::BYTE,
    xsd::NON_NEGATIVE_INTEGER,
    xsd::NON_POSITIVE_INTEGER,
    xsd::NEGATIVE_INTEGER,
    xsd::POSITIVE_INTEGER,
    xsd::UNSIGNED_LONG,
    xsd::UNSIGNED_INT,
    xsd::UNSIGNED_SHORT,
    xsd::UNSIGNED_BYTE,
];

/// Converts a result value into its document representation.
///
/// Literals map to the string form of their value and IRIs to the IRI itself. Blank nodes have no
/// stable identifier outside of the query that produced them and map to `None`, the caller
/// treats them as unbound.
///
/// ```
/// use rdf_projection::coercion::coerce;
/// use rdf_projection::model::vocab::xsd;
/// use rdf_projection::model::{Literal, NamedNode, Term};
///
/// let iri = Term::from(NamedNode::new("http://example.com/s")?);
/// assert_eq!(coerce(&iri)?.as_deref(), Some("http://example.com/s"));
///
/// let number = Term::from(Literal::new_typed_literal("042", xsd::INTEGER));
/// assert_eq!(coerce(&number)?.as_deref(), Some("42"));
/// # Result::<_, Box<dyn std::error::Error>>::Ok(())
/// ```
pub fn coerce(term: &Term) -> Result<Option<String>, CoercionError> {
    match term {
        Term::NamedNode(node) => Ok(Some(node.as_str().to_owned())),
        Term::Literal(literal) => Ok(Some(literal_value(literal.as_ref()))),
        Term::BlankNode(_) => Ok(None),
        #[allow(unreachable_patterns, reason = "triple terms only exist with RDF-star")]
        other => Err(CoercionError::UnexpectedTerm(other.clone())),
    }
}

/// Returns the natural string form of a literal value.
///
/// Ill-typed literals and datatypes without a dedicated value space fall back to the lexical form.
pub fn literal_value(literal: LiteralRef<'_>) -> String {
    let lexical = literal.value();
    let datatype = literal.datatype();
    let natural = if INTEGER_TYPES.contains(&datatype) {
        canonical::<Integer>(lexical)
    } else if datatype == xsd::DECIMAL {
        canonical::<Decimal>(lexical)
    } else if datatype == xsd::DOUBLE {
        canonical::<Double>(lexical)
    } else if datatype == xsd::FLOAT {
        canonical::<Float>(lexical)
    } else if datatype == xsd::BOOLEAN {
        canonical::<Boolean>(lexical)
    } else if datatype == xsd::DATE_TIME {
        canonical::<DateTime>(lexical)
    } else if datatype == xsd::DATE {
        canonical::<Date>(lexical)
    } else if datatype == xsd::TIME {
        canonical::<Time>(lexical)
    } else {
        None
    };
    natural.unwrap_or_else(|| lexical.to_owned())
}

fn canonical<T: FromStr + Display>(lexical: &str) -> Option<String> {
    lexical.parse::<T>().ok().map(|value| value.to_string())
}
