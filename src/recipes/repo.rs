use sqlx::{FromRow, PgPool};

use super::dto::StepRecord;

/// Projection for the paginated listing; the full row is never shipped
/// to the browser.
#[derive(Debug, Clone, FromRow)]
pub struct RecipeSummary {
    pub id: i64,
    pub name: String,
    pub main_image: Option<String>,
}

/// Detail row carrying the 20 flattened instruction/image column pairs
/// exactly as the external dataset stores them.
#[derive(Debug, Clone, FromRow)]
pub struct RecipeDetailRow {
    pub id: i64,
    pub name: String,
    pub main_image: Option<String>,
    pub ingredients: Option<String>,
    pub tip: Option<String>,
    pub manual01: Option<String>,
    pub manual_img01: Option<String>,
    pub manual02: Option<String>,
    pub manual_img02: Option<String>,
    pub manual03: Option<String>,
    pub manual_img03: Option<String>,
    pub manual04: Option<String>,
    pub manual_img04: Option<String>,
    pub manual05: Option<String>,
    pub manual_img05: Option<String>,
    pub manual06: Option<String>,
    pub manual_img06: Option<String>,
    pub manual07: Option<String>,
    pub manual_img07: Option<String>,
    pub manual08: Option<String>,
    pub manual_img08: Option<String>,
    pub manual09: Option<String>,
    pub manual_img09: Option<String>,
    pub manual10: Option<String>,
    pub manual_img10: Option<String>,
    pub manual11: Option<String>,
    pub manual_img11: Option<String>,
    pub manual12: Option<String>,
    pub manual_img12: Option<String>,
    pub manual13: Option<String>,
    pub manual_img13: Option<String>,
    pub manual14: Option<String>,
    pub manual_img14: Option<String>,
    pub manual15: Option<String>,
    pub manual_img15: Option<String>,
    pub manual16: Option<String>,
    pub manual_img16: Option<String>,
    pub manual17: Option<String>,
    pub manual_img17: Option<String>,
    pub manual18: Option<String>,
    pub manual_img18: Option<String>,
    pub manual19: Option<String>,
    pub manual_img19: Option<String>,
    pub manual20: Option<String>,
    pub manual_img20: Option<String>,
}

impl RecipeDetailRow {
    fn step_pairs(&self) -> [(&Option<String>, &Option<String>); 20] {
        [
            (&self.manual01, &self.manual_img01),
            (&self.manual02, &self.manual_img02),
            (&self.manual03, &self.manual_img03),
            (&self.manual04, &self.manual_img04),
            (&self.manual05, &self.manual_img05),
            (&self.manual06, &self.manual_img06),
            (&self.manual07, &self.manual_img07),
            (&self.manual08, &self.manual_img08),
            (&self.manual09, &self.manual_img09),
            (&self.manual10, &self.manual_img10),
            (&self.manual11, &self.manual_img11),
            (&self.manual12, &self.manual_img12),
            (&self.manual13, &self.manual_img13),
            (&self.manual14, &self.manual_img14),
            (&self.manual15, &self.manual_img15),
            (&self.manual16, &self.manual_img16),
            (&self.manual17, &self.manual_img17),
            (&self.manual18, &self.manual_img18),
            (&self.manual19, &self.manual_img19),
            (&self.manual20, &self.manual_img20),
        ]
    }

    /// Reconstructs the ordered step sequence from the flattened pairs.
    /// A step exists only if its trimmed instruction is non-empty; the
    /// reported number is the source column index, so gaps survive.
    pub fn steps(&self) -> Vec<StepRecord> {
        self.step_pairs()
            .into_iter()
            .enumerate()
            .filter_map(|(i, (text, image))| {
                let description = text
                    .as_deref()
                    .map(str::trim)
                    .filter(|t| !t.is_empty())?
                    .to_string();
                let image = image
                    .as_deref()
                    .map(str::trim)
                    .filter(|t| !t.is_empty())
                    .map(str::to_string);
                Some(StepRecord {
                    step: i + 1,
                    description,
                    image,
                })
            })
            .collect()
    }
}

/// Pages are 1-based. Rows come back in id order, which is the order the
/// ingestion job assigned, so pagination is stable across requests.
pub async fn list_page(
    db: &PgPool,
    page: i64,
    limit: i64,
    category: Option<&str>,
    sub_category: Option<&str>,
) -> anyhow::Result<(Vec<RecipeSummary>, i64)> {
    let total: i64 = sqlx::query_scalar(
        r#"
        SELECT COUNT(*)
        FROM recipes
        WHERE ($1::text IS NULL OR category = $1)
          AND ($2::text IS NULL OR method = $2)
        "#,
    )
    .bind(category)
    .bind(sub_category)
    .fetch_one(db)
    .await?;

    let rows = sqlx::query_as::<_, RecipeSummary>(
        r#"
        SELECT id, name, main_image
        FROM recipes
        WHERE ($1::text IS NULL OR category = $1)
          AND ($2::text IS NULL OR method = $2)
        ORDER BY id
        LIMIT $3 OFFSET $4
        "#,
    )
    .bind(category)
    .bind(sub_category)
    .bind(limit)
    .bind((page - 1) * limit)
    .fetch_all(db)
    .await?;

    Ok((rows, total))
}

pub async fn find_by_id(db: &PgPool, id: i64) -> anyhow::Result<Option<RecipeDetailRow>> {
    let row = sqlx::query_as::<_, RecipeDetailRow>(
        r#"
        SELECT id, name, main_image, ingredients, tip,
               manual01, manual_img01, manual02, manual_img02,
               manual03, manual_img03, manual04, manual_img04,
               manual05, manual_img05, manual06, manual_img06,
               manual07, manual_img07, manual08, manual_img08,
               manual09, manual_img09, manual10, manual_img10,
               manual11, manual_img11, manual12, manual_img12,
               manual13, manual_img13, manual14, manual_img14,
               manual15, manual_img15, manual16, manual_img16,
               manual17, manual_img17, manual18, manual_img18,
               manual19, manual_img19, manual20, manual_img20
        FROM recipes
        WHERE id = $1
        "#,
    )
    .bind(id)
    .fetch_optional(db)
    .await?;
    Ok(row)
}

/// ceil(total / limit); an empty result set has zero pages.
pub fn total_pages(total: i64, limit: i64) -> i64 {
    if limit <= 0 {
        return 0;
    }
    (total + limit - 1) / limit
}

#[cfg(test)]
mod tests {
    use super::*;

    fn empty_row() -> RecipeDetailRow {
        RecipeDetailRow {
            id: 1,
            name: "test dish".into(),
            main_image: None,
            ingredients: None,
            tip: None,
            manual01: None,
            manual_img01: None,
            manual02: None,
            manual_img02: None,
            manual03: None,
            manual_img03: None,
            manual04: None,
            manual_img04: None,
            manual05: None,
            manual_img05: None,
            manual06: None,
            manual_img06: None,
            manual07: None,
            manual_img07: None,
            manual08: None,
            manual_img08: None,
            manual09: None,
            manual_img09: None,
            manual10: None,
            manual_img10: None,
            manual11: None,
            manual_img11: None,
            manual12: None,
            manual_img12: None,
            manual13: None,
            manual_img13: None,
            manual14: None,
            manual_img14: None,
            manual15: None,
            manual_img15: None,
            manual16: None,
            manual_img16: None,
            manual17: None,
            manual_img17: None,
            manual18: None,
            manual_img18: None,
            manual19: None,
            manual_img19: None,
            manual20: None,
            manual_img20: None,
        }
    }

    #[test]
    fn steps_preserve_source_indices_with_gaps() {
        let mut row = empty_row();
        row.manual01 = Some("Chop the onions".into());
        row.manual_img01 = Some("http://img/1.jpg".into());
        row.manual03 = Some("Simmer for ten minutes".into());
        row.manual_img03 = Some("   ".into());
        row.manual05 = Some("  Serve hot  ".into());

        let steps = row.steps();
        assert_eq!(steps.len(), 3);
        assert_eq!(
            steps.iter().map(|s| s.step).collect::<Vec<_>>(),
            vec![1, 3, 5]
        );
        assert_eq!(steps[0].image.as_deref(), Some("http://img/1.jpg"));
        // Whitespace-only image is dropped, instruction text is trimmed.
        assert_eq!(steps[1].image, None);
        assert_eq!(steps[2].description, "Serve hot");
    }

    #[test]
    fn whitespace_only_instruction_is_not_a_step() {
        let mut row = empty_row();
        row.manual01 = Some("  \t ".into());
        row.manual_img01 = Some("http://img/ignored.jpg".into());
        assert!(row.steps().is_empty());
    }

    #[test]
    fn twentieth_column_is_reachable() {
        let mut row = empty_row();
        row.manual20 = Some("Plate and garnish".into());
        let steps = row.steps();
        assert_eq!(steps.len(), 1);
        assert_eq!(steps[0].step, 20);
    }

    // A page past the last one comes back as an empty list with a 200:
    // `list_page` always runs, and an OFFSET beyond the row count simply
    // yields zero rows. That path needs a live database to exercise, so
    // only the page math is checked here.
    #[test]
    fn page_count_rounds_up() {
        assert_eq!(total_pages(25, 12), 3);
        assert_eq!(total_pages(24, 12), 2);
        assert_eq!(total_pages(1, 12), 1);
        assert_eq!(total_pages(0, 12), 0);
    }
}
