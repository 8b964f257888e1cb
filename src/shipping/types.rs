use serde::{Deserialize, Serialize};

pub const STATUS_SUCCESS: &str = "SUCCESS";
pub const STATUS_ERROR: &str = "ERROR";

// ---------------------------------------------------------------------------
// Response envelope (ours and the upstream's: both speak this shape)
// ---------------------------------------------------------------------------

/// Uniform response wrapper used for every API response, success or failure.
/// Upstream bodies are deserialized into this (validating their shape) and
/// re-serialized to the caller unchanged.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Envelope<T> {
    pub name: String, // "SUCCESS" or "ERROR"
    pub message: String,
    // A bare #[serde(default)] would put a `T: Default` bound on the derived
    // Deserialize impl; the result records deliberately have none.
    #[serde(default = "Vec::new")]
    pub data: Vec<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub meta: Option<serde_json::Value>,
}

impl<T> Envelope<T> {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            name: STATUS_SUCCESS.to_string(),
            message: message.into(),
            data: Vec::new(),
            meta: None,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            name: STATUS_ERROR.to_string(),
            message: message.into(),
            data: Vec::new(),
            meta: None,
        }
    }

    pub fn is_success(&self) -> bool {
        self.name == STATUS_SUCCESS
    }
}

// ---------------------------------------------------------------------------
// Upstream records
// ---------------------------------------------------------------------------

/// One sub-district row from the address search endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AddressResult {
    pub id: i64,
    pub sub_district_name: String,
    pub district_id: i64,
    pub district_name: String,
    pub region_id: i64,
    pub region_name: String,
    pub province_id: i64,
    pub province_name: String,
    pub district_postal_code: String,
    pub sub_district_postal_code: String,
}

/// One courier service quote from the pricing endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PricingResult {
    pub service: String,
    pub service_name: String,
    pub service_type: String,
    pub cost: String,
    pub etd: String,
    pub cod: bool,
    pub group: String,
    pub drop: bool,
}

// ---------------------------------------------------------------------------
// Inbound pricing parameters
// ---------------------------------------------------------------------------

/// A pricing parameter as it arrives on the wire: callers send district ids
/// and weights as either JSON strings or numbers.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ParamValue {
    Text(String),
    Number(serde_json::Number),
}

impl ParamValue {
    /// Empty strings and numeric zero count as not provided.
    pub fn is_present(&self) -> bool {
        match self {
            ParamValue::Text(s) => !s.is_empty(),
            ParamValue::Number(n) => n.as_f64().map_or(true, |v| v != 0.0),
        }
    }

    /// The string form the upstream API expects. Numbers keep their JSON
    /// notation ("1000", "2.5").
    pub fn to_field_string(&self) -> String {
        match self {
            ParamValue::Text(s) => s.clone(),
            ParamValue::Number(n) => n.to_string(),
        }
    }
}

impl From<&str> for ParamValue {
    fn from(s: &str) -> Self {
        ParamValue::Text(s.to_string())
    }
}

impl From<String> for ParamValue {
    fn from(s: String) -> Self {
        ParamValue::Text(s)
    }
}

impl From<i64> for ParamValue {
    fn from(n: i64) -> Self {
        ParamValue::Number(serde_json::Number::from(n))
    }
}

impl From<u64> for ParamValue {
    fn from(n: u64) -> Self {
        ParamValue::Number(serde_json::Number::from(n))
    }
}

/// Inbound body of a pricing request. Everything is optional at the parse
/// boundary; `from`/`thru`/`weight` are enforced by the payload builder.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PricingParams {
    #[serde(default)]
    pub from: Option<ParamValue>,
    #[serde(default)]
    pub thru: Option<ParamValue>,
    #[serde(default)]
    pub weight: Option<ParamValue>,
    #[serde(default)]
    pub width: Option<ParamValue>,
    #[serde(default)]
    pub height: Option<ParamValue>,
    #[serde(default)]
    pub length: Option<ParamValue>,
}

// ---------------------------------------------------------------------------
// Outbound pricing payload
// ---------------------------------------------------------------------------

/// What actually goes to the upstream pricing endpoint: every field coerced
/// to a string, absent dimensions as "", plus the captcha bypass token.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PricingPayload {
    pub from: String,
    pub thru: String,
    pub weight: String,
    pub width: String,
    pub height: String,
    pub length: String,
    pub captcha: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_envelope_data_defaults_to_empty() {
        let envelope: Envelope<AddressResult> =
            serde_json::from_value(json!({"name": "SUCCESS", "message": "ok"})).unwrap();
        assert!(envelope.is_success());
        assert!(envelope.data.is_empty());
        assert!(envelope.meta.is_none());
    }

    #[test]
    fn test_envelope_meta_is_omitted_when_absent() {
        let envelope = Envelope::<PricingResult>::error("boom");
        let value = serde_json::to_value(&envelope).unwrap();
        assert_eq!(
            value,
            json!({"name": "ERROR", "message": "boom", "data": []})
        );
    }

    #[test]
    fn test_envelope_meta_passes_through() {
        let envelope: Envelope<PricingResult> = serde_json::from_value(json!({
            "name": "SUCCESS",
            "message": "ok",
            "data": [],
            "meta": {"total": 3}
        }))
        .unwrap();
        assert_eq!(envelope.meta, Some(json!({"total": 3})));
    }

    #[test]
    fn test_address_result_requires_all_fields() {
        let full = json!({
            "id": 66268,
            "sub_district_name": "Ngadirejo",
            "district_id": 1130,
            "district_name": "Kepanjenkidul",
            "region_id": 81,
            "region_name": "Kota Blitar",
            "province_id": 11,
            "province_name": "Jawa Timur",
            "district_postal_code": "66117",
            "sub_district_postal_code": "66117"
        });
        let record: AddressResult = serde_json::from_value(full.clone()).unwrap();
        assert_eq!(record.sub_district_name, "Ngadirejo");
        assert_eq!(record.province_id, 11);

        let mut partial = full;
        partial.as_object_mut().unwrap().remove("province_name");
        assert!(serde_json::from_value::<AddressResult>(partial).is_err());
    }

    #[test]
    fn test_param_value_accepts_strings_and_numbers() {
        let p: PricingParams = serde_json::from_value(json!({
            "from": "66268",
            "thru": 66225,
            "weight": 2.5
        }))
        .unwrap();

        assert_eq!(p.from.unwrap().to_field_string(), "66268");
        assert_eq!(p.thru.unwrap().to_field_string(), "66225");
        assert_eq!(p.weight.unwrap().to_field_string(), "2.5");
        assert!(p.width.is_none());
    }

    #[test]
    fn test_param_value_null_reads_as_absent() {
        let p: PricingParams =
            serde_json::from_value(json!({"from": null, "weight": "1000"})).unwrap();
        assert!(p.from.is_none());
        assert!(p.weight.is_some());
    }

    #[test]
    fn test_param_value_presence() {
        assert!(ParamValue::from("0").is_present());
        assert!(ParamValue::from(1000u64).is_present());
        assert!(!ParamValue::from("").is_present());
        assert!(!ParamValue::from(0i64).is_present());

        let float_zero: ParamValue = serde_json::from_value(json!(0.0)).unwrap();
        assert!(!float_zero.is_present());
    }
}
