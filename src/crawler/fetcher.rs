//! HTTP fetcher with status validation and Cyrillic encoding support
//!
//! This module provides the single HTTP entry point of the crawler:
//! - Listing and JSON requests that fail the run on any non-200 status
//! - Article requests with a redirect hop limit and soft transfer failures
//! - UTF-8 decoding with a Windows-1251 fallback for legacy pages
//! - Browser-like default headers

use crate::config::CrawlerConfig;
use crate::utils::error::FetchError;
use encoding_rs::{UTF_8, WINDOWS_1251};
use reqwest::{
    header::{HeaderMap, HeaderValue, ACCEPT, ACCEPT_LANGUAGE, USER_AGENT},
    redirect, Client, Response, StatusCode,
};
use serde::de::DeserializeOwned;
use std::time::Duration;

/// Result of an article page request
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ArticleFetch {
    /// Decoded page body
    Body(String),
    /// The page redirected more often than allowed
    TooManyRedirects,
    /// The connection broke while the body was being read
    TransferFailed,
}

/// Build the error message for a non-200 listing response
pub fn status_message(code: u16) -> String {
    let mut message = format!("Your request returned {code} status code.");
    match code {
        404 => message.push_str(" The requested resource wasn't found."),
        500 => message.push_str(" The server encountered an internal error."),
        _ => {}
    }
    message
}

/// News site fetcher
///
/// Listing requests follow redirects freely; article requests stop after
/// `max_redirects` hops so that moved or paywalled stories are skipped.
pub struct NewsFetcher {
    /// Client for listing pages and JSON endpoints
    client: Client,

    /// Client for article pages, with the redirect hop limit applied
    article_client: Client,
}

impl NewsFetcher {
    /// Create a fetcher from crawler settings
    ///
    /// # Errors
    ///
    /// Returns `FetchError::Http` if the HTTP client cannot be created
    pub fn new(config: &CrawlerConfig) -> Result<Self, FetchError> {
        Self::with_timeout(
            config,
            Duration::from_secs(config.request_timeout_secs.max(1)),
        )
    }

    /// Create a fetcher with an explicit request timeout
    ///
    /// # Errors
    ///
    /// Returns `FetchError::Http` if the HTTP client cannot be created
    pub fn with_timeout(config: &CrawlerConfig, timeout: Duration) -> Result<Self, FetchError> {
        let headers = build_headers(config);

        let client = Client::builder()
            .timeout(timeout)
            .gzip(true)
            .cookie_store(true)
            .default_headers(headers.clone())
            .build()?;

        let max_redirects = config.max_redirects;
        let article_client = Client::builder()
            .timeout(timeout)
            .gzip(true)
            .cookie_store(true)
            .default_headers(headers)
            .redirect(redirect::Policy::custom(move |attempt| {
                // previous() holds the original URL plus every hop taken so far
                if attempt.previous().len() > max_redirects {
                    attempt.stop()
                } else {
                    attempt.follow()
                }
            }))
            .build()?;

        Ok(Self {
            client,
            article_client,
        })
    }

    /// Fetch a listing page; any status other than 200 is fatal
    ///
    /// # Errors
    ///
    /// Returns `FetchError::Status` for non-200 responses and
    /// `FetchError::Http`/`FetchError::Timeout` for network failures
    pub async fn fetch_listing(&self, url: &str) -> Result<String, FetchError> {
        tracing::debug!(url, "Fetching listing page");

        let response = send(&self.client, url).await?;
        let status = response.status();

        if status != StatusCode::OK {
            let code = status.as_u16();
            let message = status_message(code);
            tracing::error!(url, status = code, "Exception occured with status code: {message}");
            return Err(FetchError::Status { code, message });
        }

        decode_response(response).await
    }

    /// Fetch and decode a JSON listing endpoint
    ///
    /// # Errors
    ///
    /// Same status policy as [`Self::fetch_listing`], plus `FetchError::Json`
    /// when the body is not the expected document
    pub async fn fetch_json<T: DeserializeOwned>(&self, url: &str) -> Result<T, FetchError> {
        let body = self.fetch_listing(url).await?;
        Ok(serde_json::from_str(&body)?)
    }

    /// Fetch an article page
    ///
    /// Redirect overflow and a broken body transfer are soft outcomes; only
    /// failures to send the request at all are returned as errors.
    ///
    /// # Errors
    ///
    /// Returns `FetchError::Http`/`FetchError::Timeout` if the request cannot be sent
    pub async fn fetch_article(&self, url: &str) -> Result<ArticleFetch, FetchError> {
        tracing::debug!(url, "Fetching article");

        let response = send(&self.article_client, url).await?;
        let status = response.status();

        if status.is_redirection() {
            tracing::info!(url, status = status.as_u16(), "Too many redirects, skipping article");
            return Ok(ArticleFetch::TooManyRedirects);
        }

        if !status.is_success() {
            tracing::warn!(url, status = status.as_u16(), "Article returned non-success status");
        }

        let content_type = content_type(&response);
        let bytes = match response.bytes().await {
            Ok(bytes) => bytes,
            Err(e) => {
                tracing::warn!(url, error = %e, "Article body transfer failed, skipping");
                return Ok(ArticleFetch::TransferFailed);
            }
        };

        Ok(ArticleFetch::Body(decode_bytes(&bytes, &content_type)?))
    }
}

async fn send(client: &Client, url: &str) -> Result<Response, FetchError> {
    client.get(url).send().await.map_err(|e| {
        if e.is_timeout() {
            FetchError::Timeout
        } else {
            FetchError::Http(e)
        }
    })
}

fn content_type(response: &Response) -> String {
    response
        .headers()
        .get(reqwest::header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .map(|s| s.to_string())
        .unwrap_or_default()
}

async fn decode_response(response: Response) -> Result<String, FetchError> {
    let content_type = content_type(&response);
    let bytes = response.bytes().await?;
    decode_bytes(&bytes, &content_type)
}

/// Decode bytes to a string with encoding detection
///
/// 1. Charset from the Content-Type header
/// 2. UTF-8
/// 3. Windows-1251 fallback
///
/// # Errors
///
/// Returns `FetchError::Decode` if no strategy produces clean text
pub fn decode_bytes(bytes: &[u8], content_type: &str) -> Result<String, FetchError> {
    let content_type = content_type.to_lowercase();

    if content_type.contains("charset=windows-1251") || content_type.contains("charset=cp1251") {
        return decode_with(bytes, WINDOWS_1251);
    }

    if let Ok(text) = decode_with(bytes, UTF_8) {
        return Ok(text);
    }

    decode_with(bytes, WINDOWS_1251)
}

fn decode_with(bytes: &[u8], encoding: &'static encoding_rs::Encoding) -> Result<String, FetchError> {
    let (cow, _encoding, had_errors) = encoding.decode(bytes);

    if had_errors {
        return Err(FetchError::Decode(format!(
            "{} decoding errors",
            encoding.name()
        )));
    }

    Ok(cow.into_owned())
}

/// Build default HTTP headers from crawler settings
///
/// Values that are not valid header text are left out with a warning.
pub fn build_headers(config: &CrawlerConfig) -> HeaderMap {
    let mut headers = HeaderMap::new();

    match HeaderValue::from_str(&config.user_agent) {
        Ok(value) => {
            headers.insert(USER_AGENT, value);
        }
        Err(_) => tracing::warn!("Ignoring invalid user agent header value"),
    }

    match HeaderValue::from_str(&config.accept_language) {
        Ok(value) => {
            headers.insert(ACCEPT_LANGUAGE, value);
        }
        Err(_) => tracing::warn!("Ignoring invalid accept-language header value"),
    }

    headers.insert(
        ACCEPT,
        HeaderValue::from_static(
            "text/html,application/xhtml+xml,application/json;q=0.9,*/*;q=0.8",
        ),
    );

    headers
}
