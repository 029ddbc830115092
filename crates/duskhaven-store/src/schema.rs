//! World record table schema.

/// SQL to create the records table. Mirrors `migrations/0001_world_records.sql`.
pub const CREATE_WORLD_RECORDS_TABLE: &str = r"
CREATE TABLE IF NOT EXISTS world_records (
    kind       VARCHAR(64)  NOT NULL,
    id         VARCHAR(255) NOT NULL,
    data       JSONB        NOT NULL,
    updated_at TIMESTAMPTZ  NOT NULL DEFAULT NOW(),
    PRIMARY KEY (kind, id)
);

CREATE INDEX IF NOT EXISTS idx_world_records_kind
    ON world_records (kind);
";
