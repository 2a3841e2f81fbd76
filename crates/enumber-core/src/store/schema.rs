/// Schema version recorded in the metadata table.
pub const SCHEMA_VERSION: &str = "1.0";

pub const ADDITIVES_TABLE: &str = "additives";
pub const METADATA_TABLE: &str = "metadata";

pub const META_VERSION: &str = "version";
pub const META_CREATED_DATE: &str = "created_date";
pub const META_TOTAL: &str = "total_additives";
pub const META_DATA_SOURCES: &str = "data_sources";
pub const META_LAST_UPDATED: &str = "last_updated";
pub const META_REVISION: &str = "revision";

/// Idempotent: safe to run against an existing store.
pub const SCHEMA_SQL: &str = "
CREATE TABLE IF NOT EXISTS additives (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    external_id TEXT NOT NULL UNIQUE CHECK (external_id <> ''),
    code TEXT NOT NULL CHECK (code <> ''),
    display_name TEXT NOT NULL,
    risk_level TEXT NOT NULL
        CHECK (risk_level IN ('GREEN', 'YELLOW', 'ORANGE', 'RED')),
    risk_color TEXT NOT NULL,
    category TEXT NOT NULL DEFAULT 'Other',
    description TEXT,
    vegetarian TEXT,
    vegan TEXT,
    evaluation_text TEXT,
    evaluation_url TEXT,
    evaluation_date TEXT,
    classes TEXT,
    source_provenance TEXT NOT NULL,
    last_updated TEXT NOT NULL,
    created_at TIMESTAMP DEFAULT CURRENT_TIMESTAMP
);

CREATE INDEX IF NOT EXISTS idx_additives_code ON additives(code);
CREATE INDEX IF NOT EXISTS idx_additives_risk_level ON additives(risk_level);
CREATE INDEX IF NOT EXISTS idx_additives_category ON additives(category);
CREATE INDEX IF NOT EXISTS idx_additives_display_name ON additives(display_name);

CREATE TABLE IF NOT EXISTS metadata (
    key TEXT PRIMARY KEY,
    value TEXT,
    updated_at TIMESTAMP DEFAULT CURRENT_TIMESTAMP
);
";

/// `created_at` is not in the update list, so it keeps the
/// first-insert time.
pub const UPSERT_SQL: &str = "
INSERT INTO additives (
    external_id, code, display_name, risk_level, risk_color,
    category, description, vegetarian, vegan,
    evaluation_text, evaluation_url, evaluation_date, classes,
    source_provenance, last_updated
) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14, ?15)
ON CONFLICT(external_id) DO UPDATE SET
    code = excluded.code,
    display_name = excluded.display_name,
    risk_level = excluded.risk_level,
    risk_color = excluded.risk_color,
    category = excluded.category,
    description = excluded.description,
    vegetarian = excluded.vegetarian,
    vegan = excluded.vegan,
    evaluation_text = excluded.evaluation_text,
    evaluation_url = excluded.evaluation_url,
    evaluation_date = excluded.evaluation_date,
    classes = excluded.classes,
    source_provenance = excluded.source_provenance,
    last_updated = excluded.last_updated
";

pub const SELECT_COLUMNS: &str = "
    id, external_id, code, display_name, risk_level, risk_color, category,
    description, vegetarian, vegan, evaluation_text, evaluation_url,
    evaluation_date, classes, source_provenance, last_updated, created_at
";

/// Sample consumer queries, printed by `enumber queries`.
pub const SAMPLE_QUERIES: &str = "\
-- High-risk additives
SELECT code, display_name, risk_level FROM additives
WHERE risk_level = 'RED' ORDER BY code;

-- Case-insensitive name search
SELECT code, display_name, risk_level FROM additives
WHERE LOWER(display_name) LIKE LOWER('%curcumin%');

-- Vegetarian-friendly additives
SELECT code, display_name, risk_level FROM additives
WHERE vegetarian = 'yes' ORDER BY risk_color, code;

-- Additives per category
SELECT category, COUNT(*) AS count FROM additives
GROUP BY category ORDER BY count DESC;

-- Additives with a regulatory evaluation
SELECT code, display_name, evaluation_text, risk_level FROM additives
WHERE evaluation_text IS NOT NULL AND evaluation_text <> '' ORDER BY code;

-- Risk level summary
SELECT risk_level, risk_color, COUNT(*) AS count,
       ROUND(COUNT(*) * 100.0 / (SELECT COUNT(*) FROM additives), 2) AS percentage
FROM additives GROUP BY risk_level, risk_color ORDER BY count DESC;

-- Lookup by code (ingredient scanning); codes are stored as E102, E160a, ...
SELECT code, display_name, risk_level, risk_color FROM additives WHERE code = ?;

-- Dataset version
SELECT key, value, updated_at FROM metadata ORDER BY key;
";
