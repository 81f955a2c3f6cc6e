use serde::{Deserialize, Serialize};

/// Query string for the paginated listing.
#[derive(Debug, Deserialize)]
pub struct ListQuery {
    #[serde(default = "default_page")]
    pub page: i64,
    #[serde(default = "default_limit")]
    pub limit: i64,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default, rename = "subCategory")]
    pub sub_category: Option<String>,
}

fn default_page() -> i64 {
    1
}

fn default_limit() -> i64 {
    12
}

#[derive(Debug, Serialize)]
pub struct RecipeListItem {
    pub id: i64,
    pub name: String,
    pub main_image: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct RecipeListResponse {
    pub recipes: Vec<RecipeListItem>,
    pub total_pages: i64,
}

/// One reconstructed instruction unit. `step` is the source column
/// index, not a position in the output sequence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StepRecord {
    pub step: usize,
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct RecipeDetailResponse {
    pub id: i64,
    pub name: String,
    pub main_image: Option<String>,
    pub ingredients: Option<String>,
    pub tip: Option<String>,
    pub steps: Vec<StepRecord>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn list_query_defaults() {
        let q: ListQuery = serde_json::from_str("{}").unwrap();
        assert_eq!(q.page, 1);
        assert_eq!(q.limit, 12);
        assert!(q.category.is_none());
        assert!(q.sub_category.is_none());
    }

    #[test]
    fn step_without_image_omits_the_field() {
        let step = StepRecord {
            step: 3,
            description: "Stir".into(),
            image: None,
        };
        let json = serde_json::to_string(&step).unwrap();
        assert!(!json.contains("image"));
        assert!(json.contains("\"step\":3"));
    }
}
