//! Web search tool for the news specialist
//!
//! Scrapes DuckDuckGo's HTML endpoint through the system `curl`, which
//! passes its bot detection where a rustls client fingerprint does not.

use crate::error::{Error, Result};
use crate::registry::{Tool, ToolCategory, ToolDefinition, ToolResult};
use regex::Regex;
use std::sync::LazyLock;
use std::time::Instant;
use tracing::{debug, warn};

const MAX_RESULTS_CAP: usize = 10;

const DEFAULT_MAX_RESULTS: usize = 5;

const DEFAULT_REGION: &str = "us-en";

const SEARCH_TIMEOUT_SECS: u64 = 15;

const SEARCH_URL: &str = "https://html.duckduckgo.com/html/";

const USER_AGENT: &str = "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) \
    AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

static TITLE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"<a[^>]+class="result__a"[^>]+href="([^"]*)"[^>]*>(.*?)</a>"#)
        .expect("title regex")
});

static SNIPPET_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"<a[^>]+class="result__snippet"[^>]*>(.*?)</a>"#)
        .expect("snippet regex")
});

static TAG_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"<[^>]+>").expect("tag regex"));

#[derive(Debug, Clone, PartialEq, serde::Serialize)]
struct SearchResult {
    title: String,
    url: String,
    snippet: String,
}

/// Query-only web search
pub struct WebSearchTool {
    definition: ToolDefinition,
}

impl WebSearchTool {
    /// Create a new web search tool
    #[must_use]
    pub fn new() -> Self {
        let definition = ToolDefinition::new(
            "web_search",
            "Search the web for recent news and developments. Returns titles, URLs and \
             snippets. Use for anything that needs up-to-date information.",
            ToolCategory::Search,
        )
        .with_parameters(serde_json::json!({
            "type": "object",
            "properties": {
                "query": {
                    "type": "string",
                    "description": "Search query"
                },
                "max_results": {
                    "type": "integer",
                    "description": "Maximum number of results (1-10, default 5)"
                },
                "region": {
                    "type": "string",
                    "description": "DuckDuckGo region code, e.g. 'us-en'"
                }
            },
            "required": ["query"]
        }));

        Self { definition }
    }
}

impl Default for WebSearchTool {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl Tool for WebSearchTool {
    fn definition(&self) -> &ToolDefinition {
        &self.definition
    }

    async fn execute(&self, input: serde_json::Value) -> Result<ToolResult> {
        let start = Instant::now();

        let query = input
            .get("query")
            .and_then(|v| v.as_str())
            .ok_or_else(|| Error::InvalidInput("Missing 'query' parameter".to_string()))?;

        if query.trim().is_empty() {
            return Err(Error::InvalidInput("Query must not be empty".to_string()));
        }

        let max_results = input
            .get("max_results")
            .and_then(|v| v.as_u64())
            .map_or(DEFAULT_MAX_RESULTS, |n| (n as usize).clamp(1, MAX_RESULTS_CAP));

        let region = input
            .get("region")
            .and_then(|v| v.as_str())
            .unwrap_or(DEFAULT_REGION);

        let html = fetch_html(query, region).await?;
        let results = parse_search_results(&html, max_results);

        Ok(ToolResult::success(
            serde_json::json!({
                "status": "success",
                "query": query,
                "results": results,
                "total": results.len(),
            }),
            start.elapsed().as_millis() as u64,
        ))
    }
}

/// POST the query form; GET with non-ASCII queries tends to hit a CAPTCHA.
async fn fetch_html(query: &str, region: &str) -> Result<String> {
    let form_data = format!(
        "q={}&kl={}",
        urlencoding::encode(query),
        urlencoding::encode(region),
    );

    debug!(query = %query, region = %region, "Fetching search results");

    let output = tokio::process::Command::new("curl")
        .args([
            "-s",
            "-X",
            "POST",
            SEARCH_URL,
            "-d",
            &form_data,
            "-H",
            &format!("User-Agent: {USER_AGENT}"),
            "-H",
            "Referer: https://html.duckduckgo.com/",
            "--max-time",
            &SEARCH_TIMEOUT_SECS.to_string(),
        ])
        .output()
        .await
        .map_err(|e| Error::Network(format!("Failed to execute curl: {e}")))?;

    if !output.status.success() {
        return Err(Error::Network(format!(
            "curl exited with {}: {}",
            output.status,
            String::from_utf8_lossy(&output.stderr)
        )));
    }

    let html = String::from_utf8_lossy(&output.stdout).into_owned();
    if html.contains("anomaly-modal") {
        warn!("Search provider returned a CAPTCHA page");
        return Err(Error::Network(
            "search temporarily blocked by CAPTCHA".to_string(),
        ));
    }

    Ok(html)
}

fn parse_search_results(html: &str, max_results: usize) -> Vec<SearchResult> {
    let snippets: Vec<String> = SNIPPET_RE
        .captures_iter(html)
        .map(|cap| strip_html_tags(cap.get(1).map_or("", |m| m.as_str())))
        .collect();

    TITLE_RE
        .captures_iter(html)
        .enumerate()
        .take(max_results)
        .map(|(i, cap)| SearchResult {
            title: strip_html_tags(cap.get(2).map_or("", |m| m.as_str())),
            url: extract_real_url(cap.get(1).map_or("", |m| m.as_str())),
            snippet: snippets.get(i).cloned().unwrap_or_default(),
        })
        .filter(|r| !r.url.is_empty() && !r.title.is_empty())
        .collect()
}

/// Result links are redirects of the form `//duckduckgo.com/l/?uddg=REAL_URL&...`
fn extract_real_url(raw: &str) -> String {
    let Some(pos) = raw.find("uddg=") else {
        return raw.to_string();
    };
    let rest = &raw[pos + 5..];
    let encoded = &rest[..rest.find('&').unwrap_or(rest.len())];
    urlencoding::decode(encoded).map_or_else(|_| encoded.to_string(), |s| s.into_owned())
}

fn strip_html_tags(s: &str) -> String {
    TAG_RE
        .replace_all(s, "")
        .replace("&amp;", "&")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#x27;", "'")
        .replace("&nbsp;", " ")
        .trim()
        .to_string()
}
