use std::time::Duration;

use log::debug;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, CONTENT_TYPE};
use reqwest::Client;
use thiserror::Error;
use tokio::runtime::Runtime;
use url::Url;

use crate::config::{ConfigError, SiteDbConfig};

#[derive(Error, Debug)]
pub enum FetchError {
    #[error(transparent)]
    IOError(#[from] std::io::Error),
    #[error(transparent)]
    HttpError(#[from] reqwest::Error),
    #[error("{url} answered {status}")]
    StatusError { url: String, status: u16 },
    #[error("bad header value: {0}")]
    HeaderError(#[from] reqwest::header::InvalidHeaderValue),
    #[error(transparent)]
    UrlError(#[from] url::ParseError),
    #[error(transparent)]
    ConfigError(#[from] ConfigError),
}

// Pulls the raw reply of one directory call
pub trait Fetch {
    fn fetch(&self, call: &str, args: &[(&str, &str)]) -> Result<String, FetchError>;
}

/// `{endpoint}{call}?{args}`
pub fn call_url(endpoint: &Url, call: &str, args: &[(&str, &str)]) -> Result<Url, FetchError> {
    let mut url = endpoint.join(call)?;
    if !args.is_empty() {
        url.query_pairs_mut().extend_pairs(args);
    }
    Ok(url)
}

/// Blocking client over reqwest, runs its own single threaded reactor.
pub struct HttpFetcher {
    client: Client,
    endpoint: Url,

    // Runtime for the tokio reactor
    rt: Runtime,
}

impl HttpFetcher {
    pub fn new(config: &SiteDbConfig) -> Result<Self, FetchError> {
        let rt = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()?;

        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_str(&config.accept_type)?);
        headers.insert(CONTENT_TYPE, HeaderValue::from_str(&config.content_type)?);

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .default_headers(headers)
            .build()?;

        Ok(HttpFetcher {
            client,
            endpoint: config.endpoint_url()?,
            rt,
        })
    }
}

impl Fetch for HttpFetcher {
    fn fetch(&self, call: &str, args: &[(&str, &str)]) -> Result<String, FetchError> {
        let url = call_url(&self.endpoint, call, args)?;
        debug!("GET {}", url);

        self.rt.block_on(async {
            let res = self.client.get(url.clone()).send().await?;
            let status = res.status();
            if !status.is_success() {
                return Err(FetchError::StatusError {
                    url: url.to_string(),
                    status: status.as_u16(),
                });
            }
            Ok(res.text().await?)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DEFAULT_ENDPOINT;

    #[test]
    fn call_url_without_args() {
        let endpoint = Url::parse(DEFAULT_ENDPOINT).unwrap();
        let url = call_url(&endpoint, "site-names", &[]).unwrap();
        assert_eq!(url.as_str(), "https://cmsweb.cern.ch/sitedb/data/prod/site-names");
    }

    #[test]
    fn call_url_with_args() {
        let endpoint = Url::parse(DEFAULT_ENDPOINT).unwrap();
        let url = call_url(&endpoint, "people", &[("match", "some user")]).unwrap();
        assert_eq!(
            url.as_str(),
            "https://cmsweb.cern.ch/sitedb/data/prod/people?match=some+user"
        );
    }

    #[test]
    fn bad_accept_header() {
        let config = SiteDbConfig {
            accept_type: "bad\nvalue".to_string(),
            ..SiteDbConfig::default()
        };
        assert!(matches!(HttpFetcher::new(&config), Err(FetchError::HeaderError(_))));
    }
}
