use axum::{
    extract::{Path, Query, State},
    Json,
};
use tracing::{error, instrument};

use super::dto::{ListQuery, RecipeDetailResponse, RecipeListItem, RecipeListResponse};
use super::repo;
use crate::{error::ApiError, state::AppState};

#[instrument(skip(state))]
pub async fn list_recipes(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> Result<Json<RecipeListResponse>, ApiError> {
    let page = query.page.max(1);
    let limit = query.limit.max(1);

    let (rows, total) = repo::list_page(
        &state.db,
        page,
        limit,
        query.category.as_deref(),
        query.sub_category.as_deref(),
    )
    .await
    .map_err(|e| {
        error!(error = %e, "recipe listing failed");
        ApiError::Persistence(e)
    })?;

    // A page past the end is an empty list, not an error.
    Ok(Json(RecipeListResponse {
        recipes: rows
            .into_iter()
            .map(|r| RecipeListItem {
                id: r.id,
                name: r.name,
                main_image: r.main_image,
            })
            .collect(),
        total_pages: repo::total_pages(total, limit),
    }))
}

#[instrument(skip(state))]
pub async fn get_recipe(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<RecipeDetailResponse>, ApiError> {
    let row = repo::find_by_id(&state.db, id)
        .await
        .map_err(|e| {
            error!(error = %e, %id, "recipe lookup failed");
            ApiError::Persistence(e)
        })?
        .ok_or_else(|| ApiError::NotFound("Recipe not found".into()))?;

    let steps = row.steps();
    Ok(Json(RecipeDetailResponse {
        id: row.id,
        name: row.name,
        main_image: row.main_image,
        ingredients: row.ingredients,
        tip: row.tip,
        steps,
    }))
}
