//! Category pick-list handler.

use crate::{
    db::DbPool, error::AppError, models::category::Category, response::Envelope,
};
use axum::extract::State;

/// List every category.
///
/// Read-only; clients use this to pick a `categoryId` when recording a
/// transaction.
pub async fn list_categories(
    State(pool): State<DbPool>,
) -> Result<Envelope<Vec<Category>>, AppError> {
    let categories =
        sqlx::query_as::<_, Category>("SELECT * FROM categories ORDER BY name")
            .fetch_all(&pool)
            .await?;

    Ok(Envelope::ok("Categories successfully fetched", categories))
}
