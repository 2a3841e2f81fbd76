use crate::error::EnumberError;
use rusqlite::Connection;
use serde::Serialize;

/// Summary counts over the stored dataset.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DatasetStatistics {
    pub total: u64,
    pub vegetarian: u64,
    pub vegan: u64,
    /// (risk level, count), most frequent first.
    pub by_risk: Vec<(String, u64)>,
    /// (category, count), most frequent first.
    pub by_category: Vec<(String, u64)>,
}

pub fn collect_statistics(conn: &Connection) -> Result<DatasetStatistics, EnumberError> {
    let count = |sql: &str| -> Result<u64, rusqlite::Error> {
        conn.query_row(sql, [], |row| row.get::<_, i64>(0))
            .map(|n| n.max(0) as u64)
    };

    Ok(DatasetStatistics {
        total: count("SELECT COUNT(*) FROM additives")?,
        vegetarian: count("SELECT COUNT(*) FROM additives WHERE vegetarian = 'yes'")?,
        vegan: count("SELECT COUNT(*) FROM additives WHERE vegan = 'yes'")?,
        by_risk: grouped(conn, "risk_level")?,
        by_category: grouped(conn, "category")?,
    })
}

fn grouped(conn: &Connection, column: &str) -> Result<Vec<(String, u64)>, rusqlite::Error> {
    let sql = format!(
        "SELECT {column}, COUNT(*) AS n FROM additives GROUP BY {column} ORDER BY n DESC, {column}"
    );
    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt.query_map([], |row| {
        Ok((
            row.get::<_, Option<String>>(0)?.unwrap_or_default(),
            row.get::<_, i64>(1)?.max(0) as u64,
        ))
    })?;
    rows.collect()
}
