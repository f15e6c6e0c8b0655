use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

pub const ENRICHMENT_SOURCE: &str = "Exa Websets";

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CompanyEnrichment {
    pub domain: String,
    pub name: String,
    pub description: String,
    pub logo_url: Option<String>,
    pub financial: FinancialData,
    pub products: ProductData,
    pub linkedin: LinkedInData,
    pub metadata: EnrichmentMetadata,
}

/// Every field is serialized, absent answers as `null`.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FinancialData {
    pub revenue: Option<String>,
    pub revenue_growth: Option<String>,
    pub funding_total: Option<String>,
    pub last_funding_round: Option<String>,
    pub last_funding_date: Option<String>,
    pub employees: Option<String>,
    pub employee_growth: Option<String>,
    pub annual_report_url: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductData {
    pub main_products: Vec<String>,
    pub product_categories: Vec<String>,
    pub recent_launches: Vec<String>,
    pub pricing_model: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LinkedInData {
    pub company_url: Option<String>,
    pub follower_count: Option<String>,
    pub recent_posts: Vec<LinkedInPost>,
    pub employee_insights: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LinkedInPost {
    pub title: String,
    pub engagement: String,
    pub date: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EnrichmentMetadata {
    pub enriched_at: String,
    pub source: String,
    pub webset_id: String,
}

impl EnrichmentMetadata {
    pub fn new(webset_id: &str, enriched_at: DateTime<Utc>) -> Self {
        EnrichmentMetadata {
            enriched_at: enriched_at.to_rfc3339_opts(SecondsFormat::Millis, true),
            source: ENRICHMENT_SOURCE.to_string(),
            webset_id: webset_id.to_string(),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct EnrichmentRequest {
    #[serde(default)]
    pub domain: Option<Value>,
}

#[derive(Debug, PartialEq)]
pub enum RequestedDomain<'a> {
    Missing,
    Domain(&'a str),
    NotAString,
}

impl EnrichmentRequest {
    /// `null`, `false`, `0` and `""` count as missing, like an absent key.
    pub fn requested_domain(&self) -> RequestedDomain<'_> {
        match &self.domain {
            None | Some(Value::Null) | Some(Value::Bool(false)) => RequestedDomain::Missing,
            Some(Value::String(s)) if s.is_empty() => RequestedDomain::Missing,
            Some(Value::String(s)) => RequestedDomain::Domain(s),
            Some(Value::Number(n)) if n.as_f64() == Some(0.0) => RequestedDomain::Missing,
            Some(_) => RequestedDomain::NotAString,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EnrichmentResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<CompanyEnrichment>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub processing_time: Option<u64>,
}

impl EnrichmentResponse {
    pub fn found(data: CompanyEnrichment, processing_time: u64) -> Self {
        EnrichmentResponse {
            success: true,
            data: Some(data),
            error: None,
            processing_time: Some(processing_time),
        }
    }

    /// Validation and not-found failures carry no timing.
    pub fn rejected(error: &str) -> Self {
        EnrichmentResponse {
            success: false,
            data: None,
            error: Some(error.to_string()),
            processing_time: None,
        }
    }

    pub fn failed(error: String, processing_time: u64) -> Self {
        EnrichmentResponse {
            success: false,
            data: None,
            error: Some(error),
            processing_time: Some(processing_time),
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};
    use serde_json::json;

    use super::{
        CompanyEnrichment, EnrichmentMetadata, EnrichmentRequest, EnrichmentResponse,
        FinancialData, LinkedInData, ProductData, RequestedDomain,
    };

    fn request(body: serde_json::Value) -> EnrichmentRequest {
        serde_json::from_value(body).unwrap()
    }

    #[test]
    fn requested_domain_falsy_values_are_missing() {
        for body in [
            json!({}),
            json!({ "domain": null }),
            json!({ "domain": "" }),
            json!({ "domain": false }),
            json!({ "domain": 0 }),
            json!({ "other": "example.com" }),
        ] {
            assert_eq!(request(body).requested_domain(), RequestedDomain::Missing);
        }
    }

    #[test]
    fn requested_domain_string_and_other_types() {
        assert_eq!(
            request(json!({ "domain": "example.com" })).requested_domain(),
            RequestedDomain::Domain("example.com")
        );
        assert_eq!(
            request(json!({ "domain": 42 })).requested_domain(),
            RequestedDomain::NotAString
        );
        assert_eq!(
            request(json!({ "domain": ["example.com"] })).requested_domain(),
            RequestedDomain::NotAString
        );
    }

    fn empty_company() -> CompanyEnrichment {
        CompanyEnrichment {
            domain: "example.com".to_string(),
            name: "example.com".to_string(),
            description: "".to_string(),
            logo_url: None,
            financial: FinancialData::default(),
            products: ProductData::default(),
            linkedin: LinkedInData::default(),
            metadata: EnrichmentMetadata::new(
                "webset_1",
                Utc.with_ymd_and_hms(2025, 1, 2, 3, 4, 5).unwrap(),
            ),
        }
    }

    #[test]
    fn absent_fields_serialize_as_null_or_empty() {
        let value = serde_json::to_value(empty_company()).unwrap();

        assert_eq!(value["logoUrl"], json!(null));
        assert_eq!(value["financial"]["revenueGrowth"], json!(null));
        assert_eq!(value["financial"]["annualReportUrl"], json!(null));
        assert_eq!(value["products"]["mainProducts"], json!([]));
        assert_eq!(value["products"]["recentLaunches"], json!([]));
        assert_eq!(value["linkedin"]["recentPosts"], json!([]));
        assert_eq!(value["linkedin"]["employeeInsights"], json!(null));
        assert_eq!(value["financial"].as_object().unwrap().len(), 8);
    }

    #[test]
    fn metadata_uses_rfc3339_utc() {
        let value = serde_json::to_value(empty_company()).unwrap();

        assert_eq!(
            value["metadata"],
            json!({
                "enrichedAt": "2025-01-02T03:04:05.000Z",
                "source": "Exa Websets",
                "websetId": "webset_1",
            })
        );
    }

    #[test]
    fn rejected_response_omits_data_and_timing() {
        let value = serde_json::to_value(EnrichmentResponse::rejected("Domain is required")).unwrap();

        assert_eq!(
            value,
            json!({ "success": false, "error": "Domain is required" })
        );
    }

    #[test]
    fn found_response_carries_timing() {
        let value = serde_json::to_value(EnrichmentResponse::found(empty_company(), 42)).unwrap();

        assert_eq!(value["success"], json!(true));
        assert_eq!(value["processingTime"], json!(42));
        assert!(value.get("error").is_none());
    }
}
