//! Segment case transforms for the naming convention
//!
//! These operate on single path/namespace segments (ASCII identifiers).
//! No inflection is applied: `invoices` stays plural in both directions,
//! which keeps the path/identifier conversion a true round trip.

/// Converts a snake_case segment to PascalCase.
///
/// `billing_cycles` becomes `BillingCycles`; digits pass through unchanged
/// (`v2_widgets` becomes `V2Widgets`).
pub(crate) fn pascal_case(segment: &str) -> String {
    segment
        .split('_')
        .filter(|word| !word.is_empty())
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_ascii_uppercase().to_string() + chars.as_str(),
                None => String::new(),
            }
        })
        .collect()
}

/// Converts a PascalCase segment back to snake_case.
///
/// `BillingCycles` becomes `billing_cycles`. Each uppercase letter after the
/// first character starts a new word, so an acronym like `ID` round-trips
/// through `i_d` rather than collapsing.
pub(crate) fn snake_case(segment: &str) -> String {
    let mut out = String::with_capacity(segment.len() + 4);
    for (index, ch) in segment.chars().enumerate() {
        if ch.is_ascii_uppercase() {
            if index > 0 {
                out.push('_');
            }
            out.push(ch.to_ascii_lowercase());
        } else {
            out.push(ch);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_pascal_case_single_word() {
        assert_eq!(pascal_case("invoices"), "Invoices");
    }

    #[test]
    fn test_pascal_case_multi_word() {
        assert_eq!(pascal_case("billing_cycles"), "BillingCycles");
        assert_eq!(pascal_case("unit_holding_ledger"), "UnitHoldingLedger");
    }

    #[test]
    fn test_pascal_case_with_digits() {
        assert_eq!(pascal_case("v2_widgets"), "V2Widgets");
        assert_eq!(pascal_case("area51"), "Area51");
    }

    #[test]
    fn test_pascal_case_ignores_stray_underscores() {
        assert_eq!(pascal_case("_billing"), "Billing");
        assert_eq!(pascal_case("billing_"), "Billing");
    }

    #[test]
    fn test_snake_case_single_word() {
        assert_eq!(snake_case("Invoices"), "invoices");
    }

    #[test]
    fn test_snake_case_multi_word() {
        assert_eq!(snake_case("BillingCycles"), "billing_cycles");
    }

    #[test]
    fn test_snake_case_with_digits() {
        assert_eq!(snake_case("V2Widgets"), "v2_widgets");
    }

    #[test]
    fn test_snake_case_consecutive_uppercase() {
        assert_eq!(snake_case("ID"), "i_d");
        assert_eq!(pascal_case("i_d"), "ID");
    }

    proptest! {
        /// Any well-formed snake_case segment survives the round trip.
        #[test]
        fn test_snake_pascal_round_trip(
            segment in "[a-z][a-z0-9]{0,6}(_[a-z][a-z0-9]{0,6}){0,3}"
        ) {
            prop_assert_eq!(snake_case(&pascal_case(&segment)), segment);
        }
    }
}
