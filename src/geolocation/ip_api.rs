//! ip-api.com adapter.
//!
//! `GET {base}/json/{target}`; an empty target resolves the caller. The service
//! answers 200 with `"status": "fail"` for private ranges, reserved ranges and
//! unresolvable domains, which maps to `LookupError::NotFound`.

use std::sync::Arc;

use serde::Deserialize;
use url::Url;

use super::provider::{endpoint, fetch_json, GeoProvider};
use super::types::LocationRecord;
use crate::error_handling::LookupError;

#[derive(Debug, Clone)]
pub struct IpApiProvider {
    client: Arc<reqwest::Client>,
    base: Url,
}

#[derive(Debug, Deserialize)]
struct IpApiResponse {
    status: Option<String>,
    message: Option<String>,
    query: Option<String>,
    country: Option<String>,
    city: Option<String>,
    zip: Option<String>,
    isp: Option<String>,
    lat: Option<f64>,
    lon: Option<f64>,
}

impl IpApiResponse {
    fn into_record(self) -> Result<LocationRecord, LookupError> {
        if self.status.as_deref() == Some("fail") {
            return Err(LookupError::NotFound(
                self.message.unwrap_or_else(|| "no match".to_string()),
            ));
        }
        Ok(LocationRecord::from_parts(
            self.query,
            self.city,
            self.country,
            self.zip,
            self.isp,
            self.lat,
            self.lon,
        ))
    }
}

impl IpApiProvider {
    pub fn new(client: Arc<reqwest::Client>, base: Url) -> Self {
        Self { client, base }
    }

    fn endpoint_for(&self, target: Option<&str>) -> Result<Url, LookupError> {
        match target {
            Some(t) if !t.is_empty() => endpoint(&self.base, &["json", t]),
            _ => endpoint(&self.base, &["json"]),
        }
    }
}

impl GeoProvider for IpApiProvider {
    fn name(&self) -> &'static str {
        "ip-api.com"
    }

    async fn lookup(&self, target: Option<&str>) -> Result<LocationRecord, LookupError> {
        let url = self.endpoint_for(target)?;
        let body: IpApiResponse = fetch_json(&self.client, url).await?;
        body.into_record()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geolocation::UNKNOWN;

    fn provider() -> IpApiProvider {
        IpApiProvider::new(
            Arc::new(reqwest::Client::new()),
            Url::parse("http://ip-api.com").unwrap(),
        )
    }

    #[test]
    fn test_endpoint_for_target_and_self() {
        let p = provider();
        assert_eq!(
            p.endpoint_for(Some("8.8.8.8")).unwrap().as_str(),
            "http://ip-api.com/json/8.8.8.8"
        );
        assert_eq!(p.endpoint_for(None).unwrap().as_str(), "http://ip-api.com/json");
        assert_eq!(p.endpoint_for(Some("")).unwrap().as_str(), "http://ip-api.com/json");
    }

    #[test]
    fn test_success_body() {
        let body: IpApiResponse = serde_json::from_str(
            r#"{"status":"success","country":"United States","countryCode":"US",
                "region":"VA","regionName":"Virginia","city":"Ashburn","zip":"20149",
                "lat":39.03,"lon":-77.5,"timezone":"America/New_York",
                "isp":"Google LLC","org":"Google Public DNS","as":"AS15169 Google LLC",
                "query":"8.8.8.8"}"#,
        )
        .unwrap();
        let record = body.into_record().unwrap();
        assert_eq!(record.ip, "8.8.8.8");
        assert_eq!(record.city, "Ashburn");
        assert_eq!(record.country, "United States");
        assert_eq!(record.region_or_zip, "20149");
        assert_eq!(record.isp, "Google LLC");
        assert_eq!(record.latitude, 39.03);
        assert_eq!(record.longitude, -77.5);
    }

    #[test]
    fn test_fail_body_is_not_found() {
        let body: IpApiResponse = serde_json::from_str(
            r#"{"status":"fail","message":"private range","query":"192.168.1.1"}"#,
        )
        .unwrap();
        assert_eq!(
            body.into_record(),
            Err(LookupError::NotFound("private range".to_string()))
        );
    }

    #[test]
    fn test_missing_fields_default() {
        let body: IpApiResponse =
            serde_json::from_str(r#"{"status":"success","query":"1.2.3.4","zip":""}"#).unwrap();
        let record = body.into_record().unwrap();
        assert_eq!(record.ip, "1.2.3.4");
        assert_eq!(record.city, UNKNOWN);
        assert_eq!(record.region_or_zip, UNKNOWN);
        assert!(!record.has_coordinates());
    }
}
