//! Provider abstraction and selection.

use std::future::Future;
use std::sync::Arc;

use serde::de::DeserializeOwned;
use url::Url;

use super::ip_api::IpApiProvider;
use super::ipwhois::IpWhoisProvider;
use super::types::LocationRecord;
use crate::config::{Config, ProviderKind, IPWHOIS_BASE, IP_API_BASE};
use crate::error_handling::{InitializationError, LookupError, TransportErrorKind};

/// A geolocation service.
///
/// `lookup(None)` resolves the caller's own public address. Implementations
/// issue exactly one request per call and never retry.
pub trait GeoProvider: Send + Sync + 'static {
    /// Short service name used in logs.
    fn name(&self) -> &'static str;

    /// Resolves `target` to a location.
    fn lookup(
        &self,
        target: Option<&str>,
    ) -> impl Future<Output = Result<LocationRecord, LookupError>> + Send;
}

/// Runtime-selected provider.
#[derive(Debug, Clone)]
pub enum Provider {
    IpApi(IpApiProvider),
    IpWhois(IpWhoisProvider),
}

impl GeoProvider for Provider {
    fn name(&self) -> &'static str {
        match self {
            Provider::IpApi(p) => p.name(),
            Provider::IpWhois(p) => p.name(),
        }
    }

    async fn lookup(&self, target: Option<&str>) -> Result<LocationRecord, LookupError> {
        match self {
            Provider::IpApi(p) => p.lookup(target).await,
            Provider::IpWhois(p) => p.lookup(target).await,
        }
    }
}

/// Builds the provider named in the configuration.
///
/// `config.api_base` overrides the service's public endpoint.
///
/// # Errors
///
/// Returns `InitializationError::BaseUrlError` if the base URL cannot be
/// parsed or cannot carry a path.
pub fn init_provider(
    config: &Config,
    client: Arc<reqwest::Client>,
) -> Result<Provider, InitializationError> {
    let default_base = match config.provider {
        ProviderKind::IpApi => IP_API_BASE,
        ProviderKind::IpWhois => IPWHOIS_BASE,
    };
    let base = parse_base_url(config.api_base.as_deref().unwrap_or(default_base))?;
    log::debug!("Using {:?} provider at {}", config.provider, base);

    Ok(match config.provider {
        ProviderKind::IpApi => Provider::IpApi(IpApiProvider::new(client, base)),
        ProviderKind::IpWhois => Provider::IpWhois(IpWhoisProvider::new(client, base)),
    })
}

pub(crate) fn parse_base_url(raw: &str) -> Result<Url, InitializationError> {
    let url = Url::parse(raw).map_err(|_| InitializationError::BaseUrlError(raw.to_string()))?;
    if url.cannot_be_a_base() || !matches!(url.scheme(), "http" | "https") {
        return Err(InitializationError::BaseUrlError(raw.to_string()));
    }
    Ok(url)
}

/// Appends path segments to `base`. Segments are percent-encoded as needed.
pub(crate) fn endpoint(base: &Url, segments: &[&str]) -> Result<Url, LookupError> {
    let mut url = base.clone();
    url.path_segments_mut()
        .map_err(|_| LookupError::Transport {
            kind: TransportErrorKind::Builder,
            message: format!("cannot append a path to {base}"),
        })?
        .pop_if_empty()
        .extend(segments);
    Ok(url)
}

/// One GET, non-success statuses become transport errors, body decoded as JSON.
pub(crate) async fn fetch_json<T>(client: &reqwest::Client, url: Url) -> Result<T, LookupError>
where
    T: DeserializeOwned + Send,
{
    log::debug!("GET {url}");
    let response = client.get(url).send().await?.error_for_status()?;
    Ok(response.json::<T>().await?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_base_url() {
        assert!(parse_base_url("http://ip-api.com").is_ok());
        assert!(parse_base_url("https://ipwho.is/").is_ok());
        assert!(matches!(
            parse_base_url("mailto:someone@example.com"),
            Err(InitializationError::BaseUrlError(_))
        ));
        assert!(parse_base_url("not a url").is_err());
        assert!(parse_base_url("ftp://example.com").is_err());
    }

    #[test]
    fn test_endpoint_appends_segments() {
        let base = parse_base_url("http://ip-api.com").unwrap();
        let url = endpoint(&base, &["json", "8.8.8.8"]).unwrap();
        assert_eq!(url.as_str(), "http://ip-api.com/json/8.8.8.8");
    }

    #[test]
    fn test_endpoint_keeps_base_path() {
        let base = parse_base_url("http://127.0.0.1:8080/geo/").unwrap();
        let url = endpoint(&base, &["json"]).unwrap();
        assert_eq!(url.path(), "/geo/json");
    }

    #[test]
    fn test_endpoint_ipv6_segment() {
        let base = parse_base_url("https://ipwho.is").unwrap();
        let url = endpoint(&base, &["2001:db8::1"]).unwrap();
        assert_eq!(url.path(), "/2001:db8::1");
    }

    #[test]
    fn test_init_provider_selects_kind() {
        let client = Arc::new(reqwest::Client::new());
        let config = Config {
            provider: ProviderKind::IpWhois,
            ..Default::default()
        };
        let provider = init_provider(&config, Arc::clone(&client)).unwrap();
        assert_eq!(provider.name(), "ipwho.is");

        let provider = init_provider(&Config::default(), client).unwrap();
        assert_eq!(provider.name(), "ip-api.com");
    }

    #[test]
    fn test_init_provider_rejects_bad_override() {
        let config = Config {
            api_base: Some("::not-a-url".to_string()),
            ..Default::default()
        };
        let result = init_provider(&config, Arc::new(reqwest::Client::new()));
        assert!(matches!(result, Err(InitializationError::BaseUrlError(_))));
    }
}
