// # HTTP Carrier Source
//
// Fetches a carrier's published gateway page over HTTP and extracts every
// `a.b.c.d/nn` token it contains.
//
// ## Scope
//
// Extraction is generic: it does not understand any carrier's page layout,
// it only recognises dotted-quad CIDR tokens anywhere in the document.
// A page that changes layout keeps working as long as the tokens survive.
//
// ## Retry
//
// One call to `scrape()` is one GET. Retrying on empty or failed answers is
// owned by the update pipeline.

use carrier_cidr_core::traits::CarrierSource;
use carrier_cidr_core::{CarrierId, CidrEntry, Error, Result};

use regex::Regex;
use std::collections::HashSet;
use std::time::Duration;

/// Request timeout for a single page fetch
const REQUEST_TIMEOUT_SECS: u64 = 30;

/// `a.b.c.d/nn`, tolerating whitespace around the slash
const CIDR_PATTERN: &str = r"(\d{1,3}(?:\.\d{1,3}){3})\s*/\s*(\d{1,2})";

/// Where each carrier publishes its gateway ranges
pub fn default_url(carrier: CarrierId) -> &'static str {
    match carrier {
        CarrierId::DoCoMo => "http://www.nttdocomo.co.jp/service/imode/make/content/ip/",
        CarrierId::EZWeb => "http://www.au.kddi.com/ezfactory/tec/spec/ezsava_ip.html",
        CarrierId::AirHPhone => {
            "http://www.willcom-inc.com/ja/service/contents_service/club_air_edge/for_phone/ip/"
        }
        CarrierId::ThirdForce => "http://creation.mb.softbank.jp/web/web_ip.html",
    }
}

/// HTTP-based carrier source
pub struct HttpCarrierSource {
    /// Carrier whose page this is
    carrier: CarrierId,

    /// Page to fetch
    url: String,

    /// Compiled token pattern
    pattern: Regex,

    /// HTTP client
    client: reqwest::Client,
}

impl HttpCarrierSource {
    /// Create a source for `carrier` fetching `url`
    pub fn new(carrier: CarrierId, url: impl Into<String>) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .user_agent(concat!("carrier-cidr/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| Error::http(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            carrier,
            url: url.into(),
            pattern: cidr_pattern()?,
            client,
        })
    }

    /// Create a source for `carrier` using its published page
    pub fn for_carrier(carrier: CarrierId) -> Result<Self> {
        Self::new(carrier, default_url(carrier))
    }

    async fn fetch_page(&self) -> Result<String> {
        let response = self
            .client
            .get(&self.url)
            .send()
            .await
            .map_err(|e| Error::http(format!("Request to {} failed: {}", self.url, e)))?;

        if !response.status().is_success() {
            return Err(Error::http(format!(
                "HTTP error from {}: {}",
                self.url,
                response.status()
            )));
        }

        response
            .text()
            .await
            .map_err(|e| Error::http(format!("Failed to read response: {}", e)))
    }
}

#[async_trait::async_trait]
impl CarrierSource for HttpCarrierSource {
    fn carrier(&self) -> CarrierId {
        self.carrier
    }

    fn source_url(&self) -> &str {
        &self.url
    }

    async fn scrape(&self) -> Result<Vec<CidrEntry>> {
        let page = self.fetch_page().await?;
        let entries = extract_cidrs(&self.pattern, &page);

        tracing::debug!(
            "Extracted {} entries for {} from {}",
            entries.len(),
            self.carrier,
            self.url
        );

        Ok(entries)
    }
}

/// Sources for `carriers`, each pointed at its published page
pub fn default_sources(carriers: &[CarrierId]) -> Result<Vec<Box<dyn CarrierSource>>> {
    carriers
        .iter()
        .map(|&carrier| {
            HttpCarrierSource::for_carrier(carrier)
                .map(|source| Box::new(source) as Box<dyn CarrierSource>)
        })
        .collect()
}

fn cidr_pattern() -> Result<Regex> {
    Regex::new(CIDR_PATTERN).map_err(|e| Error::http(format!("Invalid CIDR pattern: {}", e)))
}

/// Every CIDR token in `document`, in page order, first occurrence only
pub fn extract_cidrs(pattern: &Regex, document: &str) -> Vec<CidrEntry> {
    let mut seen = HashSet::new();

    pattern
        .captures_iter(document)
        .map(|caps| CidrEntry::from_parts(&caps[1], &caps[2]))
        .filter(|entry| seen.insert(entry.clone()))
        .collect()
}
