use crate::database::database::Database;
use crate::database::error::DbError;
use crate::database::execute_query::ExecuteQuery;

pub async fn run_migrations(db: &Database) -> Result<(), DbError> {
    db.batch_execute(
        r#"
        -- Create rules table
        CREATE TABLE IF NOT EXISTS rules (
            id BIGSERIAL PRIMARY KEY,
            data JSONB NOT NULL,
            created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
            updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
        );

        -- Create indexes
        CREATE INDEX IF NOT EXISTS idx_rules_updated_at ON rules (updated_at DESC);
        "#,
    )
    .await
}
