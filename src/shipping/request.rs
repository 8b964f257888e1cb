//! Build the outbound pricing payload from loosely-typed inbound parameters,
//! and gate address queries before they reach the network.
//!
//! The upstream API wants every pricing field as a string: district ids and
//! weights arrive from callers as strings or numbers and are coerced here,
//! absent dimensions become empty strings, and the fixed captcha bypass
//! token is attached. Everything in this module is pure.

use super::types::{ParamValue, PricingParams, PricingPayload};
use crate::error::{ProxyError, Result};

/// Fixed token the upstream accepts in place of a solved captcha.
pub const CAPTCHA_BYPASS: &str = "captcha-disabled";

/// Trimmed queries shorter than this never reach the upstream.
pub const MIN_QUERY_LEN: usize = 2;

/// Canned message for short-circuited address searches.
pub const SHORT_QUERY_MESSAGE: &str = "Query too short";

/// Validation message for missing required pricing fields. Indonesian, to
/// match the upstream's own error strings.
pub const REQUIRED_FIELDS_MESSAGE: &str = "Parameter from, thru, dan weight wajib diisi";

/// Returns the trimmed query when it is long enough to forward, `None` when
/// the caller should short-circuit to an empty success envelope. Length is
/// counted in UTF-16 code units, the accounting the upstream applies to its
/// own query strings.
pub fn forwardable_query(query: Option<&str>) -> Option<&str> {
    let trimmed = query.unwrap_or("").trim();
    if trimmed.encode_utf16().count() < MIN_QUERY_LEN {
        None
    } else {
        Some(trimmed)
    }
}

/// Validate and coerce pricing parameters into the upstream wire format.
/// `from`, `thru` and `weight` must be present and truthy (non-empty string,
/// non-zero number); the three dimensions default to empty strings.
pub fn build_pricing_payload(params: &PricingParams) -> Result<PricingPayload> {
    if !is_present(params.from.as_ref())
        || !is_present(params.thru.as_ref())
        || !is_present(params.weight.as_ref())
    {
        return Err(ProxyError::invalid_argument(REQUIRED_FIELDS_MESSAGE));
    }

    Ok(PricingPayload {
        from: coerce(params.from.as_ref()),
        thru: coerce(params.thru.as_ref()),
        weight: coerce(params.weight.as_ref()),
        width: coerce(params.width.as_ref()),
        height: coerce(params.height.as_ref()),
        length: coerce(params.length.as_ref()),
        captcha: CAPTCHA_BYPASS.to_string(),
    })
}

fn is_present(field: Option<&ParamValue>) -> bool {
    field.map_or(false, ParamValue::is_present)
}

fn coerce(field: Option<&ParamValue>) -> String {
    field.map_or_else(String::new, ParamValue::to_field_string)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shipping::types::ParamValue;
    use serde_json::json;

    fn minimal_params() -> PricingParams {
        PricingParams {
            from: Some(ParamValue::from("1")),
            thru: Some(ParamValue::from("2")),
            weight: Some(ParamValue::from("1000")),
            width: None,
            height: None,
            length: None,
        }
    }

    #[test]
    fn test_minimal_params_produce_full_payload() {
        let payload = build_pricing_payload(&minimal_params()).unwrap();

        assert_eq!(
            serde_json::to_value(&payload).unwrap(),
            json!({
                "from": "1",
                "thru": "2",
                "weight": "1000",
                "width": "",
                "height": "",
                "length": "",
                "captcha": "captcha-disabled"
            })
        );
    }

    #[test]
    fn test_missing_required_field_is_rejected() {
        for field in ["from", "thru", "weight"] {
            let mut params = minimal_params();
            match field {
                "from" => params.from = None,
                "thru" => params.thru = None,
                _ => params.weight = None,
            }

            let err = build_pricing_payload(&params).unwrap_err();
            assert_eq!(err.to_string(), REQUIRED_FIELDS_MESSAGE, "field: {field}");
        }
    }

    #[test]
    fn test_empty_string_and_zero_are_rejected() {
        let mut params = minimal_params();
        params.weight = Some(ParamValue::from(""));
        assert!(build_pricing_payload(&params).is_err());

        params.weight = Some(ParamValue::from(0i64));
        assert!(build_pricing_payload(&params).is_err());
    }

    #[test]
    fn test_string_zero_is_accepted() {
        // "0" is a non-empty string, unlike the number 0.
        let mut params = minimal_params();
        params.from = Some(ParamValue::from("0"));

        let payload = build_pricing_payload(&params).unwrap();
        assert_eq!(payload.from, "0");
    }

    #[test]
    fn test_numbers_are_stringified() {
        let mut params = minimal_params();
        params.from = Some(ParamValue::from(66268i64));
        params.weight = Some(serde_json::from_value(json!(2.5)).unwrap());
        params.width = Some(ParamValue::from(15i64));

        let payload = build_pricing_payload(&params).unwrap();
        assert_eq!(payload.from, "66268");
        assert_eq!(payload.weight, "2.5");
        assert_eq!(payload.width, "15");
        assert_eq!(payload.height, "");
    }

    #[test]
    fn test_zero_dimension_is_kept() {
        // Only from/thru/weight have the truthiness check; a zero width is
        // forwarded as "0", not blanked.
        let mut params = minimal_params();
        params.width = Some(ParamValue::from(0i64));

        let payload = build_pricing_payload(&params).unwrap();
        assert_eq!(payload.width, "0");
    }

    #[test]
    fn test_forwardable_query_gates_short_input() {
        assert_eq!(forwardable_query(None), None);
        assert_eq!(forwardable_query(Some("")), None);
        assert_eq!(forwardable_query(Some("   ")), None);
        assert_eq!(forwardable_query(Some("a")), None);
        assert_eq!(forwardable_query(Some(" a ")), None);
        // One UTF-16 unit even though multi-byte in UTF-8
        assert_eq!(forwardable_query(Some("é")), None);

        assert_eq!(forwardable_query(Some("ab")), Some("ab"));
        assert_eq!(forwardable_query(Some("  bandung  ")), Some("bandung"));
        // Astral-plane characters weigh two UTF-16 units on their own
        assert_eq!(forwardable_query(Some("🙂")), Some("🙂"));
    }
}
