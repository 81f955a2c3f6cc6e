//! Naver DataLab search-trend client.

use async_trait::async_trait;
use serde::Serialize;
use serde_json::Value;
use time::{macros::format_description, Duration, OffsetDateTime};

use super::{TrendClient, TrendQuery, VendorError};
use crate::config::TrendConfig;

const TREND_URL: &str = "https://openapi.naver.com/v1/datalab/search";

#[derive(Debug)]
pub struct NaverTrend {
    client_id: String,
    client_secret: String,
    client: reqwest::Client,
}

impl NaverTrend {
    pub fn new(config: &TrendConfig) -> Self {
        Self {
            client_id: config.client_id.clone(),
            client_secret: config.client_secret.clone(),
            client: reqwest::Client::new(),
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct TrendRequest {
    start_date: String,
    end_date: String,
    time_unit: &'static str,
    keyword_groups: Vec<KeywordGroup>,
    #[serde(skip_serializing_if = "String::is_empty")]
    gender: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    ages: Vec<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct KeywordGroup {
    group_name: String,
    keywords: Vec<String>,
}

/// One group per comma-separated keyword; the trailing-12-months window
/// at month granularity is fixed request shaping, not caller input.
fn build_request(query: &TrendQuery, today: OffsetDateTime) -> TrendRequest {
    let fmt = format_description!("[year]-[month]-[day]");
    let end = today.date();
    let start = end - Duration::days(365);

    let keyword_groups = query
        .keywords
        .split(',')
        .map(str::trim)
        .filter(|k| !k.is_empty())
        .map(|k| KeywordGroup {
            group_name: k.to_string(),
            keywords: vec![k.to_string()],
        })
        .collect();

    TrendRequest {
        start_date: start.format(&fmt).unwrap_or_default(),
        end_date: end.format(&fmt).unwrap_or_default(),
        time_unit: "month",
        keyword_groups,
        gender: query.gender.clone(),
        ages: query.ages.clone(),
    }
}

#[async_trait]
impl TrendClient for NaverTrend {
    async fn search(&self, query: &TrendQuery) -> Result<Value, VendorError> {
        let request = build_request(query, OffsetDateTime::now_utc());

        let response = self
            .client
            .post(TREND_URL)
            .header("X-Naver-Client-Id", &self.client_id)
            .header("X-Naver-Client-Secret", &self.client_secret)
            .json(&request)
            .send()
            .await
            .map_err(|e| VendorError::Request(e.to_string()))?;

        let status = response.status().as_u16();
        let body = response
            .text()
            .await
            .map_err(|e| VendorError::Request(e.to_string()))?;

        if status != 200 {
            return Err(VendorError::Status { status, body });
        }

        serde_json::from_str(&body).map_err(|e| VendorError::Decode(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::datetime;

    #[test]
    fn splits_keywords_into_groups() {
        let query = TrendQuery {
            keywords: "pork, cutlet , kimchi stew".into(),
            gender: String::new(),
            ages: vec![],
        };
        let req = build_request(&query, datetime!(2025-03-15 12:00 UTC));
        let names: Vec<_> = req.keyword_groups.iter().map(|g| g.group_name.as_str()).collect();
        assert_eq!(names, vec!["pork", "cutlet", "kimchi stew"]);
        assert_eq!(req.keyword_groups[0].keywords, vec!["pork"]);
    }

    #[test]
    fn trailing_year_window_month_unit() {
        let query = TrendQuery {
            keywords: "ramen".into(),
            gender: "f".into(),
            ages: vec!["20".into(), "30".into()],
        };
        let req = build_request(&query, datetime!(2025-03-15 12:00 UTC));
        assert_eq!(req.end_date, "2025-03-15");
        assert_eq!(req.start_date, "2024-03-15");
        assert_eq!(req.time_unit, "month");
    }

    #[test]
    fn empty_gender_and_ages_are_omitted() {
        let query = TrendQuery {
            keywords: "ramen".into(),
            gender: String::new(),
            ages: vec![],
        };
        let req = build_request(&query, datetime!(2025-03-15 12:00 UTC));
        let json = serde_json::to_string(&req).unwrap();
        assert!(!json.contains("gender"));
        assert!(!json.contains("ages"));
    }
}
