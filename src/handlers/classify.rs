use crate::error::{AppError, Result};
use crate::state::AppState;
use crate::taxonomy::{classify, infer_category, Category};
use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

#[derive(Debug, Deserialize)]
pub struct ClassifyRequest {
    /// Free-text category label to map onto the closed set
    pub category: Option<String>,
    /// Used for keyword inference when no label is given
    pub name: Option<String>,
    pub description: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ClassifyResponse {
    pub category: Category,
}

#[derive(Debug, Serialize)]
pub struct CategoryCount {
    pub category: Category,
    pub count: usize,
}

/// POST /classify - Map a free-text label (or a name/description) to a category.
pub async fn classify_handler(Json(request): Json<ClassifyRequest>) -> Result<Json<ClassifyResponse>> {
    let category = match (&request.category, &request.name, &request.description) {
        (Some(label), _, _) => classify(label),
        (None, None, None) => {
            return Err(AppError::ValidationError(
                "Provide a category label or a name/description".to_string(),
            ))
        }
        (None, name, description) => infer_category(
            name.as_deref().unwrap_or(""),
            description.as_deref().unwrap_or(""),
        ),
    };

    metrics::counter!("classify_requests_total").increment(1);

    Ok(Json(ClassifyResponse { category }))
}

/// GET /categories - Tool counts for every category of the loaded catalog.
pub async fn categories_handler(State(state): State<Arc<AppState>>) -> Json<Vec<CategoryCount>> {
    Json(
        state
            .catalog
            .category_counts()
            .into_iter()
            .map(|(category, count)| CategoryCount { category, count })
            .collect(),
    )
}
