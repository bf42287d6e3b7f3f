//! Scalar comparison with optional type coercion.

use std::cmp::Ordering;

use signifier_core::models::{ComparisonOperator, ScalarValue};

/// Outcome of applying one operator to an observed value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Comparison {
    Holds,
    Fails,
    /// The two values have no meaningful common type.
    Incomparable,
}

impl Comparison {
    fn from_bool(holds: bool) -> Self {
        if holds {
            Self::Holds
        } else {
            Self::Fails
        }
    }
}

/// Compare `actual` against `threshold`.
///
/// With coercion, numeric strings compare as numbers; equality operators
/// fall back to canonical strings; ordering operators on non-numeric pairs
/// need two strings. Without coercion only same-kind values compare.
pub fn compare(
    operator: &ComparisonOperator,
    actual: &ScalarValue,
    threshold: &ScalarValue,
    coercion: bool,
) -> Comparison {
    if coercion {
        if let (Some(a), Some(t)) = (actual.coerce_number(), threshold.coerce_number()) {
            return ordered(operator, a.partial_cmp(&t));
        }
        if operator.is_equality() {
            let equal = actual.canonical_string() == threshold.canonical_string();
            return equality(operator, equal);
        }
        return match (actual, threshold) {
            (ScalarValue::Text(a), ScalarValue::Text(t)) => ordered(operator, Some(a.cmp(t))),
            _ => Comparison::Incomparable,
        };
    }

    match (actual, threshold) {
        (ScalarValue::Number(a), ScalarValue::Number(t)) => ordered(operator, a.partial_cmp(t)),
        (ScalarValue::Text(a), ScalarValue::Text(t)) => ordered(operator, Some(a.cmp(t))),
        (ScalarValue::Boolean(a), ScalarValue::Boolean(t)) if operator.is_equality() => {
            equality(operator, a == t)
        }
        _ => Comparison::Incomparable,
    }
}

fn equality(operator: &ComparisonOperator, equal: bool) -> Comparison {
    match operator {
        ComparisonOperator::Equals => Comparison::from_bool(equal),
        ComparisonOperator::NotEquals => Comparison::from_bool(!equal),
        _ => Comparison::Incomparable,
    }
}

fn ordered(operator: &ComparisonOperator, ordering: Option<Ordering>) -> Comparison {
    let Some(ord) = ordering else {
        return Comparison::Incomparable;
    };
    let holds = match operator {
        ComparisonOperator::GreaterThan => ord == Ordering::Greater,
        ComparisonOperator::LessThan => ord == Ordering::Less,
        ComparisonOperator::GreaterEqual => ord != Ordering::Less,
        ComparisonOperator::LessEqual => ord != Ordering::Greater,
        ComparisonOperator::Equals => ord == Ordering::Equal,
        ComparisonOperator::NotEquals => ord != Ordering::Equal,
        ComparisonOperator::Unrecognized(_) => return Comparison::Incomparable,
    };
    Comparison::from_bool(holds)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn op(name: &str) -> ComparisonOperator {
        ComparisonOperator::from(name)
    }

    #[test]
    fn numeric_string_coerces_when_enabled() {
        let actual = ScalarValue::from("18");
        let threshold = ScalarValue::from(20);
        assert_eq!(compare(&op("lessThan"), &actual, &threshold, true), Comparison::Holds);
        assert_eq!(
            compare(&op("lessThan"), &actual, &threshold, false),
            Comparison::Incomparable
        );
    }

    #[test]
    fn equality_falls_back_to_strings() {
        let actual = ScalarValue::from("on");
        assert_eq!(compare(&op("equals"), &actual, &"on".into(), true), Comparison::Holds);
        assert_eq!(compare(&op("notEquals"), &actual, &"off".into(), true), Comparison::Holds);
        assert_eq!(compare(&op("equals"), &true.into(), &"true".into(), true), Comparison::Holds);
    }

    #[test]
    fn ordering_on_mixed_non_numeric_is_incomparable() {
        assert_eq!(
            compare(&op("greaterThan"), &true.into(), &"a".into(), true),
            Comparison::Incomparable
        );
        assert_eq!(
            compare(&op("greaterThan"), &"b".into(), &"a".into(), true),
            Comparison::Holds
        );
    }

    #[test]
    fn booleans_only_support_equality_without_coercion() {
        assert_eq!(compare(&op("equals"), &true.into(), &true.into(), false), Comparison::Holds);
        assert_eq!(
            compare(&op("lessThan"), &false.into(), &true.into(), false),
            Comparison::Incomparable
        );
    }

    #[test]
    fn inclusive_bounds() {
        let v = ScalarValue::from(20);
        assert_eq!(compare(&op("greaterEqual"), &v, &20.into(), false), Comparison::Holds);
        assert_eq!(compare(&op("lessEqual"), &v, &20.into(), false), Comparison::Holds);
        assert_eq!(compare(&op("lessThan"), &v, &20.into(), false), Comparison::Fails);
    }

    #[test]
    fn nan_is_incomparable() {
        let v = ScalarValue::Number(f64::NAN);
        assert_eq!(compare(&op("lessThan"), &v, &1.into(), false), Comparison::Incomparable);
    }
}
