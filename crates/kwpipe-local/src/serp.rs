//! Search-results-page document source.
//!
//! Fetches one SERP for the query, mines it for query-adjacent text
//! ("people also ask" questions, related-search terms -> important tier),
//! then follows the organic result links and extracts readable body text
//! (-> normal tier). All markup-structure assumptions live here; the engine
//! only ever sees plain text plus a tier tag.

use futures_util::stream::{self, StreamExt};
use kwpipe_core::{DocumentSource, Error, RawDocument, ResearchOptions, Result};
use std::time::Duration;
use tracing::{debug, warn};
use url::Url;

/// Concurrent page fetches per query. Pages land in completion order;
/// aggregation downstream is order-independent, so no re-sequencing.
const PAGE_FETCH_CONCURRENCY: usize = 4;

const DEFAULT_ENDPOINT: &str = "https://www.google.com/search";

fn endpoint_from_env() -> Option<String> {
    crate::env("KWPIPE_SERP_ENDPOINT")
}

#[derive(Debug, Clone)]
pub struct SerpSource {
    client: reqwest::Client,
    endpoint: String,
}

impl SerpSource {
    /// Endpoint from `KWPIPE_SERP_ENDPOINT` (fixtures, self-hosted
    /// meta-search) or the default SERP.
    pub fn from_env(client: reqwest::Client) -> Self {
        Self {
            endpoint: endpoint_from_env().unwrap_or_else(|| DEFAULT_ENDPOINT.to_string()),
            client,
        }
    }

    pub fn with_endpoint(client: reqwest::Client, endpoint: impl Into<String>) -> Self {
        Self {
            client,
            endpoint: endpoint.into(),
        }
    }
}

/// Everything mined from one SERP: organic result URLs to follow, and
/// important-tier documents lifted straight off the page.
#[derive(Debug, Default)]
pub struct SerpPage {
    pub result_urls: Vec<String>,
    pub documents: Vec<RawDocument>,
}

/// True for absolute http(s) URLs that leave the SERP host's own properties.
fn is_followable_result_url(href: &str) -> bool {
    let Ok(url) = Url::parse(href) else {
        return false;
    };
    if url.scheme() != "http" && url.scheme() != "https" {
        return false;
    }
    match url.host_str() {
        Some(host) => !host.contains("google."),
        None => false,
    }
}

/// Parse a SERP body. Selector misses yield an empty page, never an error:
/// SERP markup is volatile and a layout change must degrade, not fail.
pub fn parse_serp(html: &str) -> SerpPage {
    let doc = html_scraper::Html::parse_document(html);
    let mut page = SerpPage::default();

    // Organic results: the classic result container with its first link.
    if let Ok(sel) = html_scraper::Selector::parse("div.g a[href]") {
        for a in doc.select(&sel) {
            if let Some(href) = a.value().attr("href") {
                if is_followable_result_url(href) && !page.result_urls.iter().any(|u| u == href) {
                    page.result_urls.push(href.to_string());
                }
            }
        }
    }

    // "People also ask" questions.
    if let Ok(sel) = html_scraper::Selector::parse("div.related-question-pair") {
        for el in doc.select(&sel) {
            let question = el.text().collect::<Vec<_>>().join(" ");
            let question = question.trim();
            if !question.is_empty() {
                page.documents.push(RawDocument::important(question));
            }
        }
    }

    // Related searches at the bottom of the page.
    if let Ok(sel) = html_scraper::Selector::parse("div.BNeawe.s3v9rd.AP7Wnd") {
        for el in doc.select(&sel) {
            let term = el.text().collect::<Vec<_>>().join(" ");
            let term = term.trim();
            if !term.is_empty() && !term.starts_with("Related") {
                page.documents.push(RawDocument::important(term));
            }
        }
    }

    page
}

/// Fetch one result page and extract its readable text. Failures are logged
/// and swallowed: a dead link must not sink the query.
async fn fetch_page_text(
    client: reqwest::Client,
    url: String,
    timeout: Duration,
    max_bytes: u64,
) -> Option<String> {
    let resp = match client.get(&url).timeout(timeout).send().await {
        Ok(r) => r,
        Err(err) => {
            warn!(%url, %err, "page fetch failed");
            return None;
        }
    };
    if !resp.status().is_success() {
        warn!(%url, status = %resp.status(), "page fetch non-success");
        return None;
    }
    let content_type = resp
        .headers()
        .get(reqwest::header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .map(|s| s.to_string());
    if !crate::extract::is_html_content_type(content_type.as_deref()) {
        debug!(%url, ?content_type, "skipping non-html body");
        return None;
    }
    let bytes = match resp.bytes().await {
        Ok(b) => b,
        Err(err) => {
            warn!(%url, %err, "page body read failed");
            return None;
        }
    };
    let capped = &bytes[..bytes.len().min(max_bytes as usize)];
    let html = String::from_utf8_lossy(capped);
    let text = crate::extract::readable_text(&html, crate::extract::DEFAULT_WIDTH);
    if text.is_empty() {
        debug!(%url, "no readable text extracted");
        return None;
    }
    Some(text)
}

#[async_trait::async_trait]
impl DocumentSource for SerpSource {
    fn name(&self) -> &'static str {
        "serp"
    }

    async fn fetch_documents(
        &self,
        query: &str,
        opts: &ResearchOptions,
    ) -> Result<Vec<RawDocument>> {
        // SERP requests can hang indefinitely without an explicit timeout.
        // Keep a conservative cap even if callers pass something huge.
        let timeout = Duration::from_millis(opts.timeout_ms.clamp(1_000, 60_000));

        let resp = self
            .client
            .get(&self.endpoint)
            .query(&[("q", query), ("num", "30"), ("hl", "en"), ("lr", "lang_en")])
            .timeout(timeout)
            .send()
            .await
            .map_err(|e| Error::Fetch(e.to_string()))?;
        let status = resp.status();
        if !status.is_success() {
            return Err(Error::Fetch(format!("serp HTTP {status}")));
        }
        let html = resp.text().await.map_err(|e| Error::Fetch(e.to_string()))?;

        let page = parse_serp(&html);
        debug!(
            urls = page.result_urls.len(),
            serp_documents = page.documents.len(),
            "parsed serp"
        );

        let mut documents = page.documents;
        let bodies: Vec<Option<String>> = stream::iter(
            page.result_urls
                .into_iter()
                .take(opts.max_sites)
                .map(|url| fetch_page_text(self.client.clone(), url, timeout, opts.max_bytes)),
        )
        .buffer_unordered(PAGE_FETCH_CONCURRENCY)
        .collect()
        .await;
        for text in bodies.into_iter().flatten() {
            documents.push(RawDocument::normal(text));
        }

        Ok(documents)
    }
}
