//! ipwho.is adapter.
//!
//! `GET {base}/{target}`; the bare base URL resolves the caller. Failures are
//! reported in-band with `"success": false`.

use std::sync::Arc;

use serde::Deserialize;
use url::Url;

use super::provider::{endpoint, fetch_json, GeoProvider};
use super::types::LocationRecord;
use crate::error_handling::LookupError;

#[derive(Debug, Clone)]
pub struct IpWhoisProvider {
    client: Arc<reqwest::Client>,
    base: Url,
}

#[derive(Debug, Default, Deserialize)]
struct Connection {
    isp: Option<String>,
}

#[derive(Debug, Deserialize)]
struct IpWhoisResponse {
    success: Option<bool>,
    message: Option<String>,
    ip: Option<String>,
    country: Option<String>,
    city: Option<String>,
    postal: Option<String>,
    region_code: Option<String>,
    #[serde(default)]
    connection: Connection,
    latitude: Option<f64>,
    longitude: Option<f64>,
}

impl IpWhoisResponse {
    fn into_record(self) -> Result<LocationRecord, LookupError> {
        if self.success == Some(false) {
            return Err(LookupError::NotFound(
                self.message.unwrap_or_else(|| "no match".to_string()),
            ));
        }
        let region_or_zip = self
            .postal
            .filter(|p| !p.trim().is_empty())
            .or(self.region_code);
        Ok(LocationRecord::from_parts(
            self.ip,
            self.city,
            self.country,
            region_or_zip,
            self.connection.isp,
            self.latitude,
            self.longitude,
        ))
    }
}

impl IpWhoisProvider {
    pub fn new(client: Arc<reqwest::Client>, base: Url) -> Self {
        Self { client, base }
    }

    fn endpoint_for(&self, target: Option<&str>) -> Result<Url, LookupError> {
        match target {
            Some(t) if !t.is_empty() => endpoint(&self.base, &[t]),
            _ => endpoint(&self.base, &[]),
        }
    }
}

impl GeoProvider for IpWhoisProvider {
    fn name(&self) -> &'static str {
        "ipwho.is"
    }

    async fn lookup(&self, target: Option<&str>) -> Result<LocationRecord, LookupError> {
        let url = self.endpoint_for(target)?;
        let body: IpWhoisResponse = fetch_json(&self.client, url).await?;
        body.into_record()
    }
}
