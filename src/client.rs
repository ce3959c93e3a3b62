use anyhow::{anyhow, Context, Result};
use reqwest::Client;
use serde_json::json;
use tracing::{debug, info};
use xxhash_rust::xxh3::xxh3_64;

use crate::api_types::{
    Content, GenerateContentRequest, GenerateContentResponse, GenerationConfig, Part, Tool,
};
use crate::config::ApiConfig;
use crate::models::{GroundingSource, ProductMention};
use crate::payload::TrendPayload;
use crate::sanitize::parse_payload;
use crate::schema::response_schema;

/// One scan's worth of normalized results plus the citations the grounding
/// layer attached.
#[derive(Debug, Clone)]
pub struct ScanBundle {
    pub payload: TrendPayload,
    pub sources: Vec<GroundingSource>,
}

fn mint_product_id(p: &ProductMention) -> String {
    format!("{:016x}", xxh3_64(format!("{}|{}", p.name, p.category).as_bytes()))
}

/// Ids the service omitted are backfilled from name|category so every row
/// stays addressable.
fn normalize_payload(mut payload: TrendPayload) -> TrendPayload {
    for p in payload.products.iter_mut() {
        if p.id.trim().is_empty() {
            p.id = mint_product_id(p);
        }
    }
    payload
}

/// Extract text + citations from a raw response body. Pure; the network half
/// lives in `scan_brand_trends`.
pub fn bundle_from_response(resp: GenerateContentResponse) -> Result<ScanBundle> {
    let candidate = resp
        .candidates
        .into_iter()
        .next()
        .ok_or_else(|| anyhow!("response carried no candidates"))?;

    let text = candidate
        .content
        .as_ref()
        .map(|c: &Content| {
            c.parts
                .iter()
                .map(|p: &Part| p.text.as_str())
                .collect::<String>()
        })
        .unwrap_or_default();

    let payload = normalize_payload(parse_payload(&text)?);

    // Citations pass through as asserted; no dedup.
    let sources = candidate
        .grounding_metadata
        .unwrap_or_default()
        .grounding_chunks
        .into_iter()
        .filter_map(|chunk| chunk.web)
        .map(|web| GroundingSource {
            title: web.title,
            uri: web.uri,
        })
        .collect();

    Ok(ScanBundle { payload, sources })
}

/// Exactly one outbound call per scan. Every failure re-raises; falling back
/// to cached data is the orchestrator's business.
pub async fn scan_brand_trends(
    client: &Client,
    cfg: &ApiConfig,
    prompt: &str,
) -> Result<ScanBundle> {
    let url = format!(
        "{}/v1beta/models/{}:generateContent",
        cfg.api_base.trim_end_matches('/'),
        cfg.model
    );
    let request = GenerateContentRequest {
        contents: vec![Content {
            parts: vec![Part {
                text: prompt.to_string(),
            }],
        }],
        tools: vec![Tool {
            google_search: json!({}),
        }],
        generation_config: GenerationConfig {
            response_mime_type: "application/json".to_string(),
            response_schema: response_schema(),
        },
    };

    let start = std::time::Instant::now();
    debug!("Scan call starting - model={}, prompt_length={} chars", cfg.model, prompt.len());

    let resp = client
        .post(&url)
        .header("x-goog-api-key", &cfg.api_key)
        .json(&request)
        .send()
        .await
        .with_context(|| format!("Request failed for {}", url))?
        .error_for_status()
        .with_context(|| format!("HTTP error for {}", url))?;

    let body: GenerateContentResponse = resp
        .json()
        .await
        .with_context(|| format!("Decoding JSON for {}", url))?;

    let bundle = bundle_from_response(body)?;

    let elapsed = start.elapsed();
    info!(
        "Scan API call completed - duration={:.2}s, products={}, citations={}",
        elapsed.as_secs_f32(),
        bundle.payload.products.len(),
        bundle.sources.len()
    );

    Ok(bundle)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn response_with_text(text: &str) -> GenerateContentResponse {
        serde_json::from_value(json!({
            "candidates": [{
                "content": { "parts": [{ "text": text }] },
                "groundingMetadata": {
                    "groundingChunks": [
                        { "web": { "title": "r/HEB haul thread", "uri": "https://reddit.com/r/HEB/abc" } },
                        { "web": { "title": "r/HEB haul thread", "uri": "https://reddit.com/r/HEB/abc" } }
                    ]
                }
            }]
        }))
        .unwrap()
    }

    #[test]
    fn null_products_normalize_to_empty_not_error() {
        let bundle = bundle_from_response(response_with_text(r#"{"products": null}"#)).unwrap();
        assert!(bundle.payload.products.is_empty());
        assert_eq!(bundle.payload.scan_confidence, 0);
    }

    #[test]
    fn citations_are_kept_without_dedup() {
        let bundle = bundle_from_response(response_with_text(r#"{"products": []}"#)).unwrap();
        assert_eq!(bundle.sources.len(), 2);
    }

    #[test]
    fn fenced_reply_parses_and_missing_ids_are_minted() {
        let body = r#"```json
{"products": [{"name": "Butter Tortillas", "category": "Pantry",
  "isLimitedRelease": false, "whyTrending": "restock wave",
  "mentionsThisWeek": 420, "average120Day": 210.0, "trendingScore": 2.0,
  "sentiment": "positive", "topPlatform": "Reddit", "sources": []}],
 "historicalTop5": [], "globalTrends": [], "scanConfidence": 88}
```"#;
        let bundle = bundle_from_response(response_with_text(body)).unwrap();
        assert_eq!(bundle.payload.products.len(), 1);
        assert_eq!(bundle.payload.scan_confidence, 88);
        let id = &bundle.payload.products[0].id;
        assert_eq!(id.len(), 16);
        assert!(id.chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn empty_candidate_list_is_an_error() {
        let resp: GenerateContentResponse = serde_json::from_value(json!({})).unwrap();
        assert!(bundle_from_response(resp).is_err());
    }

    #[test]
    fn malformed_candidate_text_re_raises() {
        assert!(bundle_from_response(response_with_text("sorry, no data")).is_err());
    }
}
