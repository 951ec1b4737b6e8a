use std::fmt::Display;
use std::thread;

use serde::de::DeserializeOwned;

use crate::error::ApiError;
use crate::retry::RetryPolicy;
use crate::transport::{HttpResponse, Transport};
use crate::types::{ListPage, NamedResource};

pub const DEFAULT_BASE_URL: &str = "https://pokeapi.co/api/v2";

/// Catalog endpoints the pipelines read from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResourceKind {
    Ability,
    Move,
    Nature,
    Type,
    Pokemon,
    PokemonSpecies,
    PokemonForm,
}

impl ResourceKind {
    pub fn path(&self) -> &'static str {
        match self {
            Self::Ability => "ability",
            Self::Move => "move",
            Self::Nature => "nature",
            Self::Type => "type",
            Self::Pokemon => "pokemon",
            Self::PokemonSpecies => "pokemon-species",
            Self::PokemonForm => "pokemon-form",
        }
    }
}

impl Display for ResourceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.path())
    }
}

/// Blocking catalog client: paginated listings and detail lookups, both
/// wrapped in the retry policy.
pub struct PokeApiClient<T> {
    transport: T,
    base_url: String,
    page_size: Option<u32>,
    retry: RetryPolicy,
}

impl<T: Transport> PokeApiClient<T> {
    pub fn new(transport: T, base_url: impl Into<String>) -> Self {
        Self {
            transport,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            page_size: None,
            retry: RetryPolicy::default(),
        }
    }

    pub fn with_page_size(mut self, page_size: Option<u32>) -> Self {
        self.page_size = page_size;
        self
    }

    pub fn with_retry(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// First page of the listing for `kind`.
    pub fn listing_url(&self, kind: ResourceKind) -> String {
        match self.page_size {
            Some(limit) => format!("{}/{}/?limit={limit}", self.base_url, kind.path()),
            None => format!("{}/{}/", self.base_url, kind.path()),
        }
    }

    pub fn detail_url(&self, kind: ResourceKind, key: impl Display) -> String {
        format!("{}/{}/{key}/", self.base_url, kind.path())
    }

    /// GET `url`, retrying transient faults per the policy.
    ///
    /// Any status is returned as-is; only transport faults are errors.
    pub fn get(&self, url: &str) -> Result<HttpResponse, ApiError> {
        let mut attempts = 0u32;
        loop {
            attempts += 1;
            let fault = match self.transport.get(url) {
                Ok(response) => return Ok(response),
                Err(fault) => fault,
            };

            let Some(transient) = self.retry.classify(&fault) else {
                return Err(ApiError::transport(url, fault.message));
            };
            if !self.retry.allows_retry(attempts) {
                return Err(ApiError::RetriesExhausted {
                    url: url.to_string(),
                    attempts,
                    last: fault.message,
                });
            }

            let delay = self.retry.delay_for(attempts);
            log::warn!(
                "{transient} on {url} (attempt {attempts}), retrying in {}s",
                delay.as_secs()
            );
            log::debug!("  cause: {}", fault.message);
            thread::sleep(delay);
        }
    }

    /// Fetch and decode one resource.
    ///
    /// A non-success status is logged and yields `Ok(None)`; a success body
    /// that does not decode is an error.
    pub fn fetch<D: DeserializeOwned>(&self, url: &str) -> Result<Option<D>, ApiError> {
        let response = self.get(url)?;
        if !response.is_success() {
            log::warn!("HTTP {} for {url}, skipping", response.status);
            return Ok(None);
        }
        decode(url, &response.body).map(Some)
    }

    /// Every listing entry for `kind`, following `next` cursors.
    pub fn list_all(&self, kind: ResourceKind) -> Result<Vec<NamedResource>, ApiError> {
        self.list_from(&self.listing_url(kind))
    }

    /// Every listing entry starting at `url`.
    ///
    /// A non-success page ends pagination; the entries gathered so far are
    /// returned.
    pub fn list_from(&self, url: &str) -> Result<Vec<NamedResource>, ApiError> {
        let mut entries = Vec::new();
        let mut next = Some(url.to_string());

        while let Some(url) = next.take() {
            let response = self.get(&url)?;
            if !response.is_success() {
                log::warn!(
                    "HTTP {} for listing page {url}, keeping {} entries fetched so far",
                    response.status,
                    entries.len()
                );
                break;
            }
            let page: ListPage = decode(&url, &response.body)?;
            log::debug!(
                "Listing page {url}: {} entries (total {})",
                page.results.len(),
                page.count
            );
            entries.extend(page.results);
            next = page.next.filter(|n| !n.is_empty());
        }

        Ok(entries)
    }
}

fn decode<D: DeserializeOwned>(url: &str, body: &str) -> Result<D, ApiError> {
    serde_json::from_str(body).map_err(|e| ApiError::json(url, e))
}

#[cfg(test)]
#[path = "tests/client_tests.rs"]
mod tests;
