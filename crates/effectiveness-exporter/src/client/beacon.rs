//! reqwest implementation of the explorer API

use super::{ApiResponse, BeaconApi, DepositedValidator, EffectivenessRecord, OneOrMany};
use crate::config::ApiConfig;
use crate::error::{Error, Result};
use crate::validators::{DepositAddress, ValidatorId};
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use tracing::debug;

/// HTTP client for a beaconcha.in-compatible explorer
#[derive(Debug, Clone)]
pub struct BeaconChainClient {
    client: reqwest::Client,
    base_url: String,
}

impl BeaconChainClient {
    pub fn new(config: &ApiConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(config.request_timeout())
            .user_agent(format!("effectiveness-exporter/{}", crate::VERSION))
            .build()?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    /// GET `url` and unwrap the `data` envelope into a list
    ///
    /// The body is read as text first so it can be reported verbatim when it
    /// is not what we expect.
    async fn get_data<T: DeserializeOwned>(&self, url: &str) -> Result<Vec<T>> {
        debug!("GET {}", url);

        let response = self.client.get(url).send().await?;
        let status = response.status();
        let body = response.text().await?;

        let envelope: ApiResponse<T> = match serde_json::from_str(&body) {
            Ok(envelope) => envelope,
            Err(_) if !status.is_success() => {
                return Err(Error::UnexpectedStatus {
                    status: status.as_u16(),
                    body,
                })
            }
            Err(e) => return Err(e.into()),
        };

        envelope
            .data
            .map(OneOrMany::into_vec)
            .ok_or(Error::MissingPayload { body })
    }
}

#[async_trait]
impl BeaconApi for BeaconChainClient {
    async fn validators_by_deposit_address(
        &self,
        address: &DepositAddress,
    ) -> Result<Vec<DepositedValidator>> {
        let url = format!("{}/api/v1/validator/eth1/{}", self.base_url, address);
        self.get_data(&url).await
    }

    async fn attestation_effectiveness(
        &self,
        validators: &[ValidatorId],
    ) -> Result<Vec<EffectivenessRecord>> {
        let serialized = validators
            .iter()
            .map(ValidatorId::as_str)
            .collect::<Vec<_>>()
            .join(",");
        let url = format!(
            "{}/api/v1/validator/{}/attestationeffectiveness",
            self.base_url, serialized
        );
        self.get_data(&url).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::time::Duration;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn client_for(server: &MockServer) -> BeaconChainClient {
        BeaconChainClient::new(&ApiConfig {
            base_url: format!("{}/", server.uri()),
            request_timeout_secs: 1,
            chunk_size: 100,
        })
        .unwrap()
    }

    #[tokio::test]
    async fn test_effectiveness_request_joins_identifiers() {
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/v1/validator/0xAA,0xBB,7/attestationeffectiveness"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "status": "OK",
                "data": [
                    {"pubkey": "0xAA", "validatorindex": 1, "attestation_effectiveness": 0.9},
                    {"pubkey": "0xBB", "validatorindex": 2, "attestation_effectiveness": 0.8}
                ]
            })))
            .expect(1)
            .mount(&mock_server)
            .await;

        let client = client_for(&mock_server);
        let ids = [
            ValidatorId::from("0xAA"),
            ValidatorId::from("0xBB"),
            ValidatorId::from("7"),
        ];
        let records = client.attestation_effectiveness(&ids).await.unwrap();

        assert_eq!(records.len(), 2);
        assert_eq!(records[1].validator_index, "2");
    }

    #[tokio::test]
    async fn test_deposit_lookup_single_object() {
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/v1/validator/eth1/0xdeposit"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "status": "OK",
                "data": {"publickey": "0xAA", "validatorindex": 4}
            })))
            .mount(&mock_server)
            .await;

        let client = client_for(&mock_server);
        let validators = client
            .validators_by_deposit_address(&DepositAddress::new("0xdeposit"))
            .await
            .unwrap();

        assert_eq!(
            validators,
            vec![DepositedValidator {
                public_key: ValidatorId::from("0xAA")
            }]
        );
    }

    #[tokio::test]
    async fn test_missing_data_keeps_raw_body() {
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(
                ResponseTemplate::new(429)
                    .set_body_json(json!({"message": "API rate limit exceeded"})),
            )
            .mount(&mock_server)
            .await;

        let client = client_for(&mock_server);
        let err = client
            .attestation_effectiveness(&[ValidatorId::from("0xAA")])
            .await
            .unwrap_err();

        match err {
            Error::MissingPayload { body } => assert!(body.contains("rate limit")),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[tokio::test]
    async fn test_non_json_error_status() {
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(502).set_body_string("bad gateway"))
            .mount(&mock_server)
            .await;

        let client = client_for(&mock_server);
        let err = client
            .attestation_effectiveness(&[ValidatorId::from("0xAA")])
            .await
            .unwrap_err();

        assert!(matches!(err, Error::UnexpectedStatus { status: 502, .. }));
    }

    #[tokio::test]
    async fn test_malformed_success_body() {
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>"))
            .mount(&mock_server)
            .await;

        let client = client_for(&mock_server);
        let err = client
            .attestation_effectiveness(&[ValidatorId::from("0xAA")])
            .await
            .unwrap_err();

        assert!(matches!(err, Error::Serialization(_)));
    }

    #[tokio::test]
    async fn test_request_timeout() {
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!({"data": []}))
                    .set_delay(Duration::from_secs(3)),
            )
            .mount(&mock_server)
            .await;

        let client = client_for(&mock_server);
        let err = client
            .attestation_effectiveness(&[ValidatorId::from("0xAA")])
            .await
            .unwrap_err();

        assert_eq!(err.error_code(), "EXPORTER_TIMEOUT");
    }
}
