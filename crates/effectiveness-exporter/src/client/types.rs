//! Explorer response shapes
//!
//! Every endpoint wraps its payload in `{"data": ...}`. When the query matches
//! one item `data` is an object, otherwise an array. When the request is
//! refused (rate limit) `data` is missing and `message` explains why.

use crate::validators::ValidatorId;
use serde::{Deserialize, Deserializer, Serialize};

/// Response envelope
#[derive(Debug, Clone, Deserialize)]
pub struct ApiResponse<T> {
    pub status: Option<String>,

    pub data: Option<OneOrMany<T>>,

    pub message: Option<String>,
}

/// Payload that is either a single record or a list of records
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum OneOrMany<T> {
    Many(Vec<T>),
    One(T),
}

impl<T> OneOrMany<T> {
    pub fn into_vec(self) -> Vec<T> {
        match self {
            OneOrMany::Many(items) => items,
            OneOrMany::One(item) => vec![item],
        }
    }
}

/// Validator created from a deposit address
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct DepositedValidator {
    #[serde(rename = "publickey")]
    pub public_key: ValidatorId,
}

/// Attestation effectiveness of one validator
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EffectivenessRecord {
    pub pubkey: ValidatorId,

    #[serde(rename = "validatorindex", deserialize_with = "string_or_number")]
    pub validator_index: String,

    pub attestation_effectiveness: f64,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum StringOrNumber {
    String(String),
    Number(serde_json::Number),
}

/// The live API sends indices as numbers; labels want strings
fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match StringOrNumber::deserialize(deserializer)? {
        StringOrNumber::String(s) => s,
        StringOrNumber::Number(n) => n.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn records(body: &str) -> Vec<EffectivenessRecord> {
        let response: ApiResponse<EffectivenessRecord> = serde_json::from_str(body).unwrap();
        response.data.map(OneOrMany::into_vec).unwrap_or_default()
    }

    #[test]
    fn test_single_object_and_list_of_one_normalize_identically() {
        let single = records(
            r#"{"data":{"pubkey":"0xAA","validatorindex":"5","attestation_effectiveness":0.97}}"#,
        );
        let list = records(
            r#"{"data":[{"pubkey":"0xAA","validatorindex":"5","attestation_effectiveness":0.97}]}"#,
        );

        assert_eq!(single, list);
        assert_eq!(single.len(), 1);
        assert_eq!(single[0].pubkey.as_str(), "0xAA");
        assert_eq!(single[0].validator_index, "5");
        assert_eq!(single[0].attestation_effectiveness, 0.97);
    }

    #[test]
    fn test_numeric_validator_index() {
        let parsed = records(
            r#"{"status":"OK","data":[
                {"pubkey":"0xAA","validatorindex":5,"attestation_effectiveness":0.5},
                {"pubkey":"0xBB","validatorindex":"17","attestation_effectiveness":1.0}
            ]}"#,
        );

        assert_eq!(parsed[0].validator_index, "5");
        assert_eq!(parsed[1].validator_index, "17");
    }

    #[test]
    fn test_rate_limit_message_has_no_data() {
        let response: ApiResponse<EffectivenessRecord> =
            serde_json::from_str(r#"{"message":"API rate limit exceeded"}"#).unwrap();

        assert!(response.data.is_none());
        assert_eq!(response.message.as_deref(), Some("API rate limit exceeded"));
    }

    #[test]
    fn test_deposit_lookup_shapes() {
        let single: ApiResponse<DepositedValidator> =
            serde_json::from_str(r#"{"status":"OK","data":{"publickey":"0xAA","validatorindex":3}}"#)
                .unwrap();
        let many: ApiResponse<DepositedValidator> = serde_json::from_str(
            r#"{"status":"OK","data":[{"publickey":"0xAA"},{"publickey":"0xBB"}]}"#,
        )
        .unwrap();

        assert_eq!(single.data.unwrap().into_vec().len(), 1);
        let keys: Vec<_> = many
            .data
            .unwrap()
            .into_vec()
            .into_iter()
            .map(|v| v.public_key.into_string())
            .collect();
        assert_eq!(keys, vec!["0xAA", "0xBB"]);
    }

    #[test]
    fn test_empty_list_payload() {
        assert!(records(r#"{"data":[]}"#).is_empty());
    }
}
