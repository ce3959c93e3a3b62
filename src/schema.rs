//! The declared output contract sent with every scan request. Modeled as an
//! explicit value so the shape the service is held to is inspectable and
//! testable, not an inline blob.

use serde_json::{json, Value};

fn source_items() -> Value {
    json!({
        "type": "ARRAY",
        "items": {
            "type": "OBJECT",
            "properties": {
                "title": { "type": "STRING" },
                "uri": { "type": "STRING" }
            },
            "required": ["title", "uri"]
        }
    })
}

pub fn response_schema() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "products": {
                "type": "ARRAY",
                "items": {
                    "type": "OBJECT",
                    "properties": {
                        "id": { "type": "STRING" },
                        "name": { "type": "STRING" },
                        "category": { "type": "STRING" },
                        "description": { "type": "STRING" },
                        "flavorVariant": { "type": "STRING" },
                        "isLimitedRelease": { "type": "BOOLEAN" },
                        "whyTrending": { "type": "STRING" },
                        "mentionsThisWeek": { "type": "NUMBER" },
                        "average120Day": { "type": "NUMBER" },
                        "trendingScore": { "type": "NUMBER" },
                        "sentiment": { "type": "STRING" },
                        "topPlatform": { "type": "STRING" },
                        "lastMentioned": { "type": "STRING" },
                        "confidenceScore": { "type": "NUMBER" },
                        "evidenceCount": { "type": "NUMBER" },
                        "evidenceSummary": { "type": "STRING" },
                        "sources": source_items()
                    },
                    "required": [
                        "name", "category", "isLimitedRelease", "whyTrending",
                        "mentionsThisWeek", "average120Day", "trendingScore",
                        "sentiment", "topPlatform", "sources"
                    ]
                }
            },
            "historicalTop5": {
                "type": "ARRAY",
                "items": {
                    "type": "OBJECT",
                    "properties": {
                        "name": { "type": "STRING" },
                        "totalMentionVolume": { "type": "NUMBER" },
                        "category": { "type": "STRING" },
                        "rankReason": { "type": "STRING" },
                        "sources": source_items()
                    },
                    "required": ["name", "totalMentionVolume", "category", "rankReason"]
                }
            },
            "globalTrends": {
                "type": "ARRAY",
                "items": {
                    "type": "OBJECT",
                    "properties": {
                        "name": { "type": "STRING" },
                        "platform": { "type": "STRING" },
                        "description": { "type": "STRING" },
                        "volumeLabel": { "type": "STRING" },
                        "trendType": { "type": "STRING" },
                        "momentum": { "type": "STRING" },
                        "sources": source_items()
                    },
                    "required": ["name", "platform", "description", "volumeLabel"]
                }
            },
            "scanConfidence": { "type": "NUMBER" }
        },
        "required": ["products", "historicalTop5", "globalTrends"]
    })
}
