/*
SPDX-License-Identifier: MPL-2.0
SPDX-FileCopyrightText: © 2023-2026 Bruce D'Arcus
*/

//! Citation counts from the ADS metrics API.

use reqwest::blocking::Client;
use serde_json::{json, Value};
use std::time::Duration;
use worklog_processor::{AdsToken, CiteCountError, CiteCountSource};

pub const METRICS_URL: &str = "https://api.adsabs.harvard.edu/v1/metrics";

/// Default timeout for metrics requests (30 seconds)
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

pub const USER_AGENT: &str = "worklog";

/// A blocking ADS metrics client.
#[derive(Debug)]
pub struct AdsClient {
    client: Client,
    token: AdsToken,
}

impl AdsClient {
    pub fn new(token: AdsToken) -> Result<Self, CiteCountError> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(DEFAULT_TIMEOUT)
            .build()
            .map_err(|e| CiteCountError::new(e.to_string()))?;
        Ok(Self { client, token })
    }
}

/// Pull the total citation count out of a metrics response.
fn total_citations(body: &Value) -> Result<u64, CiteCountError> {
    body.get("citation stats")
        .and_then(|stats| stats.get("total number of citations"))
        .and_then(Value::as_u64)
        .ok_or_else(|| CiteCountError::new(format!("unexpected metrics response: {}", body)))
}

impl CiteCountSource for AdsClient {
    fn cite_count(&self, bibcode: &str) -> Result<u64, CiteCountError> {
        let response = self
            .client
            .post(METRICS_URL)
            .bearer_auth(self.token.secret())
            .json(&json!({ "bibcodes": [bibcode] }))
            .send()
            .and_then(|r| r.error_for_status())
            .map_err(|e| CiteCountError::new(format!("{}: {}", bibcode, e)))?;
        let body: Value = response
            .json()
            .map_err(|e| CiteCountError::new(format!("{}: {}", bibcode, e)))?;
        total_citations(&body)
    }
}
