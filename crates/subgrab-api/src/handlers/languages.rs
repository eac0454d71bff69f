//! Language list handler.

use axum::Json;
use subgrab_models::{Language, COMMON_LANGUAGES};

/// Languages offered in the UI selector.
pub async fn list_languages() -> Json<Vec<Language>> {
    Json(COMMON_LANGUAGES.to_vec())
}
