use serde::{Deserialize, Serialize};
use sqlx::{FromRow, SqlitePool};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct ActivityType {
    pub id: i64,
    pub name: String,
    pub description: String,
}

pub async fn all(db: &SqlitePool) -> Result<Vec<ActivityType>, sqlx::Error> {
    sqlx::query_as::<_, ActivityType>("select id, name, description from activity_types order by id")
        .fetch_all(db)
        .await
}
