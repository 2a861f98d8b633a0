//! Request field extraction and validation.
//!
//! Everything here is pure: it reads a JSON object and either returns typed
//! values or the first validation error it hits.

use serde_json::{Map, Number, Value};

use crate::entity::{fields, NoteParams};
use crate::error::{NotesError, Result};

/// A request body: field name to raw JSON value.
pub type Fields = Map<String, Value>;

/// Address length bounds, both exclusive.
pub const ADDR_MIN_EXCLUSIVE: usize = 25;
pub const ADDR_MAX_EXCLUSIVE: usize = 36;

/// Per-field extraction rules.
#[derive(Debug, Clone, Copy, Default)]
pub struct FieldOptions<'a> {
    /// Name used in error messages; the field name when `None`.
    pub display_name: Option<&'a str>,
    pub mandatory: bool,
    pub disallow_null: bool,
}

impl<'a> FieldOptions<'a> {
    pub const fn optional() -> Self {
        Self {
            display_name: None,
            mandatory: false,
            disallow_null: false,
        }
    }

    pub fn display(mut self, name: &'a str) -> Self {
        self.display_name = Some(name);
        self
    }

    pub fn mandatory(mut self, mandatory: bool) -> Self {
        self.mandatory = mandatory;
        self
    }

    pub fn not_null(mut self) -> Self {
        self.disallow_null = true;
        self
    }

    fn display_for(&self, field: &str) -> String {
        self.display_name.unwrap_or(field).to_string()
    }
}

/// True if `c` is in the Base58 alphabet (no 0, O, I or l).
pub fn is_base58(c: char) -> bool {
    c.is_ascii_alphanumeric() && !matches!(c, '0' | 'O' | 'I' | 'l')
}

/// Fetch a raw field value.
///
/// Returns `Ok(None)` when the field is absent (and optional) or null (and
/// null is allowed).
pub fn extract_field<'f>(
    body: &'f Fields,
    field: &str,
    options: FieldOptions<'_>,
) -> Result<Option<&'f Value>> {
    match body.get(field) {
        None => {
            if options.mandatory {
                return Err(NotesError::MissingField {
                    field: field.to_string(),
                    display: options.display_for(field),
                });
            }
            Ok(None)
        }
        Some(Value::Null) => {
            if options.disallow_null {
                return Err(NotesError::NullField {
                    field: field.to_string(),
                    display: options.display_for(field),
                });
            }
            Ok(None)
        }
        Some(value) => Ok(Some(value)),
    }
}

/// Fetch a field that must be a JSON string.
pub fn extract_string_field(
    body: &Fields,
    field: &str,
    options: FieldOptions<'_>,
) -> Result<Option<String>> {
    match extract_field(body, field, options)? {
        None => Ok(None),
        Some(Value::String(s)) => Ok(Some(s.clone())),
        Some(_) => Err(NotesError::NotAString {
            field: field.to_string(),
            display: options.display_for(field),
        }),
    }
}

/// Fetch a field whose trimmed string form is exactly an integer.
///
/// `42`, `"42"`, `" 42 "` and whole-valued numbers like `5.0` or `1e2` parse;
/// `"12.5"`, `"12abc"`, `"007"`, `"+5"` and `"5.0"` do not.
pub fn extract_integer_field(
    body: &Fields,
    field: &str,
    options: FieldOptions<'_>,
) -> Result<Option<i64>> {
    let value = match extract_field(body, field, options)? {
        Some(v) => v,
        None => return Ok(None),
    };

    let text = match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => number_text(n),
        other => other.to_string(),
    };
    let trimmed = text.trim();

    match trimmed.parse::<i64>() {
        Ok(n) if n.to_string() == trimmed => Ok(Some(n)),
        _ => Err(NotesError::NotAnInteger {
            field: field.to_string(),
            display: options.display_for(field),
            raw: trimmed.to_string(),
        }),
    }
}

/// Shortest decimal form of a number. Whole floats print without a fraction
/// and `-0` prints as `0`.
fn number_text(n: &Number) -> String {
    if n.as_i64().is_none() {
        if let Some(f) = n.as_f64() {
            if f.is_finite() && f.fract() == 0.0 && f >= i64::MIN as f64 && f < i64::MAX as f64 {
                return (f as i64).to_string();
            }
        }
    }
    n.to_string()
}

/// Fetch and check the mandatory `addr` field.
pub fn extract_address(body: &Fields) -> Result<String> {
    let options = FieldOptions::optional()
        .display("address")
        .mandatory(true)
        .not_null();

    // Mandatory and non-null, so `None` cannot come back here.
    let addr = extract_string_field(body, fields::ADDR, options)?.unwrap_or_default();

    let length = addr.chars().count();
    if length <= ADDR_MIN_EXCLUSIVE || length >= ADDR_MAX_EXCLUSIVE {
        return Err(NotesError::InvalidAddressLength { length });
    }

    if let Some(invalid) = addr.chars().find(|c| !is_base58(*c)) {
        return Err(NotesError::InvalidAddressChars { invalid });
    }

    Ok(addr)
}

fn extract_non_negative(body: &Fields, field: &str) -> Result<Option<i64>> {
    let options = FieldOptions::optional().not_null();
    let n = extract_integer_field(body, field, options)?;
    if let Some(n) = n {
        if n < 0 {
            return Err(NotesError::NegativeValue {
                field: field.to_string(),
                display: field.to_string(),
            });
        }
    }
    Ok(n)
}

pub fn extract_cost(body: &Fields) -> Result<Option<i64>> {
    extract_non_negative(body, fields::COST)
}

pub fn extract_value(body: &Fields) -> Result<Option<i64>> {
    extract_non_negative(body, fields::VALUE)
}

impl NoteParams {
    /// Validate a create-or-update body. The first failing field wins.
    pub fn from_fields(body: &Fields) -> Result<Self> {
        let cost = extract_cost(body)?;
        let value = extract_value(body)?;

        let cost_unit = extract_string_field(
            body,
            fields::COST_UNIT,
            FieldOptions::optional()
                .display("cost unit")
                .mandatory(cost.is_some())
                .not_null(),
        )?;
        let status = extract_string_field(
            body,
            fields::STATUS,
            FieldOptions::optional().not_null(),
        )?;
        let value_unit = extract_string_field(
            body,
            fields::VALUE_UNIT,
            FieldOptions::optional()
                .display("value unit")
                .mandatory(value.is_some())
                .not_null(),
        )?;

        let addr = extract_address(body)?;

        Ok(Self {
            addr,
            cost,
            cost_unit,
            value,
            value_unit,
            status,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    const ADDR: &str = "1BoatSLRHtKNngkdXEeobR76b53LETtpyT";

    fn body(value: Value) -> Fields {
        match value {
            Value::Object(map) => map,
            _ => panic!("test body must be an object"),
        }
    }

    #[test]
    fn test_extract_field_missing_mandatory() {
        let b = body(json!({}));
        let result = extract_field(&b, "cost", FieldOptions::optional().mandatory(true));
        assert!(matches!(result, Err(NotesError::MissingField { field, .. }) if field == "cost"));
    }

    #[test]
    fn test_extract_field_absent_optional() {
        let b = body(json!({}));
        let result = extract_field(&b, "cost", FieldOptions::optional()).unwrap();
        assert!(result.is_none());
    }

    #[test]
    fn test_extract_field_null_disallowed() {
        let b = body(json!({"status": null}));
        let result = extract_field(&b, "status", FieldOptions::optional().not_null());
        assert!(matches!(result, Err(NotesError::NullField { .. })));
    }

    #[test]
    fn test_extract_field_null_allowed_is_absent() {
        let b = body(json!({"status": null}));
        let result = extract_field(&b, "status", FieldOptions::optional()).unwrap();
        assert!(result.is_none());
    }

    #[test]
    fn test_display_name_used_in_message() {
        let b = body(json!({}));
        let err = extract_field(
            &b,
            "addr",
            FieldOptions::optional().display("address").mandatory(true),
        )
        .unwrap_err();
        assert!(err.to_string().starts_with("The address is not provided."));
    }

    #[test]
    fn test_integer_accepts_round_tripping_forms() {
        let cases = [
            (json!(42), 42),
            (json!("42"), 42),
            (json!(" 42 "), 42),
            (json!("0"), 0),
            (json!("-3"), -3),
            (json!(-3), -3),
            (json!(5.0), 5),
            (json!(1e2), 100),
            (json!(-0.0), 0),
        ];
        for (raw, expected) in cases {
            let b = body(json!({ "n": raw }));
            let n = extract_integer_field(&b, "n", FieldOptions::optional()).unwrap();
            assert_eq!(n, Some(expected), "input {:?}", b.get("n"));
        }
    }

    #[test]
    fn test_integer_rejects_non_integers() {
        let cases = [
            json!("12.5"),
            json!("12abc"),
            json!("007"),
            json!("+5"),
            json!(""),
            json!(12.5),
            json!("5.0"),
            json!(1e300),
            json!(true),
            json!([1]),
        ];
        for raw in cases {
            let b = body(json!({ "n": raw }));
            let result = extract_integer_field(&b, "n", FieldOptions::optional());
            assert!(
                matches!(result, Err(NotesError::NotAnInteger { .. })),
                "input {:?} should be rejected",
                b.get("n")
            );
        }
    }

    #[test]
    fn test_address_accepts_valid_lengths() {
        let alphabet: Vec<char> = "123456789ABCDEFGHJKLMNPQRSTUVWXYZabcdefghijkmnopqrstuvwxyz"
            .chars()
            .collect();
        for len in 26..=35 {
            let addr: String = (0..len).map(|i| alphabet[i % alphabet.len()]).collect();
            let b = body(json!({ "addr": addr.clone() }));
            assert_eq!(extract_address(&b).unwrap(), addr);
        }
    }

    #[test]
    fn test_address_rejects_bad_lengths() {
        for len in [0usize, 1, 24, 25, 36, 37, 60] {
            let b = body(json!({ "addr": "a".repeat(len) }));
            let result = extract_address(&b);
            assert!(
                matches!(result, Err(NotesError::InvalidAddressLength { length }) if length == len),
                "length {} should be rejected",
                len
            );
        }
    }

    #[test]
    fn test_address_rejects_ambiguous_chars() {
        for bad in ['0', 'O', 'I', 'l', '-', ' ', 'é'] {
            let mut addr = "a".repeat(29);
            addr.push(bad);
            let b = body(json!({ "addr": addr }));
            let result = extract_address(&b);
            assert!(
                matches!(result, Err(NotesError::InvalidAddressChars { invalid }) if invalid == bad),
                "char {:?} should be rejected",
                bad
            );
        }
    }

    #[test]
    fn test_address_missing_null_and_non_string() {
        assert!(matches!(
            extract_address(&body(json!({}))),
            Err(NotesError::MissingField { .. })
        ));
        assert!(matches!(
            extract_address(&body(json!({"addr": null}))),
            Err(NotesError::NullField { .. })
        ));
        assert!(matches!(
            extract_address(&body(json!({"addr": 12345}))),
            Err(NotesError::NotAString { .. })
        ));
    }

    #[test]
    fn test_cost_and_value_must_be_non_negative() {
        let b = body(json!({"cost": -1}));
        assert!(matches!(
            extract_cost(&b),
            Err(NotesError::NegativeValue { field, .. }) if field == "cost"
        ));

        let b = body(json!({"value": "-7"}));
        assert!(matches!(
            extract_value(&b),
            Err(NotesError::NegativeValue { field, .. }) if field == "value"
        ));

        let b = body(json!({"cost": 0, "value": "9"}));
        assert_eq!(extract_cost(&b).unwrap(), Some(0));
        assert_eq!(extract_value(&b).unwrap(), Some(9));
    }

    #[test]
    fn test_cost_accepts_whole_float_literals() {
        for (text, expected) in [
            (r#"{"cost": 5.0}"#, 5),
            (r#"{"cost": 1e2}"#, 100),
            (r#"{"cost": -0}"#, 0),
        ] {
            let b: Fields = serde_json::from_str(text).unwrap();
            assert_eq!(extract_cost(&b).unwrap(), Some(expected), "body {}", text);
        }

        let b: Fields = serde_json::from_str(r#"{"cost": 5.5}"#).unwrap();
        assert!(matches!(
            extract_cost(&b),
            Err(NotesError::NotAnInteger { raw, .. }) if raw == "5.5"
        ));
    }

    #[test]
    fn test_cost_may_not_be_null() {
        let b = body(json!({"cost": null}));
        assert!(matches!(extract_cost(&b), Err(NotesError::NullField { .. })));
    }

    #[test]
    fn test_params_full_body() {
        let b = body(json!({
            "addr": ADDR,
            "cost": 5,
            "costUnit": "USD",
            "value": "10",
            "valueUnit": "BTC",
            "status": "paid",
        }));
        let params = NoteParams::from_fields(&b).unwrap();
        assert_eq!(params.addr, ADDR);
        assert_eq!(params.cost, Some(5));
        assert_eq!(params.cost_unit.as_deref(), Some("USD"));
        assert_eq!(params.value, Some(10));
        assert_eq!(params.value_unit.as_deref(), Some("BTC"));
        assert_eq!(params.status.as_deref(), Some("paid"));
    }

    #[test]
    fn test_params_unit_mandatory_with_amount() {
        let b = body(json!({"addr": ADDR, "cost": 5}));
        assert!(matches!(
            NoteParams::from_fields(&b),
            Err(NotesError::MissingField { field, .. }) if field == "costUnit"
        ));

        let b = body(json!({"addr": ADDR, "value": 5}));
        assert!(matches!(
            NoteParams::from_fields(&b),
            Err(NotesError::MissingField { field, .. }) if field == "valueUnit"
        ));
    }

    #[test]
    fn test_params_unit_alone_is_allowed() {
        let b = body(json!({"addr": ADDR, "costUnit": "USD"}));
        let params = NoteParams::from_fields(&b).unwrap();
        assert_eq!(params.cost, None);
        assert_eq!(params.cost_unit.as_deref(), Some("USD"));
    }

    #[test]
    fn test_params_fields_checked_before_address() {
        let b = body(json!({"addr": "short", "cost": "abc"}));
        assert!(matches!(
            NoteParams::from_fields(&b),
            Err(NotesError::NotAnInteger { .. })
        ));
    }

    #[test]
    fn test_params_status_only() {
        let b = body(json!({"addr": ADDR, "status": "paid"}));
        let params = NoteParams::from_fields(&b).unwrap();
        assert_eq!(params.status.as_deref(), Some("paid"));
        assert_eq!(params.cost, None);
        assert_eq!(params.value, None);
    }
}
