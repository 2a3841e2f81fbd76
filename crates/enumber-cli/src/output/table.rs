use enumber_core::store::{DatasetStatistics, StoredAdditive};
use enumber_core::BuildReport;
use std::collections::BTreeMap;
use std::path::Path;

pub fn print_build(report: &BuildReport, db_path: &Path) {
    println!("=== Build {} ({}) ===\n", report.run_id, report.backend);

    println!("  Source entries:   {}", report.source_entries);
    println!("  Normalized:       {}", report.normalized);
    println!("  Curated:          {}", report.curated);
    println!("  Skipped:          {}", report.skipped.len());
    println!("  Stored:           {}", report.upsert.inserted);
    println!("  Failed:           {}", report.upsert.error_count());
    println!("  Rows in store:    {}", report.upsert.total_rows);
    println!("  Database:         {}", db_path.display());

    if !report.upsert.failures.is_empty() {
        println!("\n  Failed records:");
        for failure in &report.upsert.failures {
            println!(
                "    {} ({}): {}",
                failure.code, failure.external_id, failure.reason
            );
        }
    }

    if !report.validation.findings.is_empty() {
        println!("\n  Validation warnings:");
        for finding in &report.validation.findings {
            println!("    {finding}");
        }
    }

    println!();
    print_distribution(&report.statistics);
}

pub fn print_stats(stats: &DatasetStatistics, metadata: &BTreeMap<String, String>) {
    println!("=== Dataset ===\n");
    for (key, value) in metadata {
        println!("  {:<16} {}", key, value);
    }
    println!();
    println!("  Total:            {}", stats.total);
    println!("  Vegetarian:       {}", stats.vegetarian);
    println!("  Vegan:            {}", stats.vegan);
    println!();
    print_distribution(stats);
}

fn print_distribution(stats: &DatasetStatistics) {
    if stats.total == 0 {
        println!("  (no additives stored)");
        return;
    }

    println!("  Risk levels:");
    for (level, count) in &stats.by_risk {
        println!(
            "    {:<8} {:>5}  {:>5.1}%",
            level,
            count,
            percent(*count, stats.total)
        );
    }

    println!("\n  Categories:");
    let width = stats
        .by_category
        .iter()
        .map(|(c, _)| c.len())
        .max()
        .unwrap_or(10);
    for (category, count) in &stats.by_category {
        println!("    {:<width$} {:>5}", category, count, width = width);
    }
}

pub fn print_lookup(query: &str, rows: &[StoredAdditive]) {
    if rows.is_empty() {
        println!("No additive found for '{query}'");
        return;
    }

    for (i, row) in rows.iter().enumerate() {
        if i > 0 {
            println!();
        }
        let name = if row.display_name.is_empty() {
            "(unnamed)"
        } else {
            row.display_name.as_str()
        };
        println!("=== {} {} ===\n", row.code, name);
        println!("  Risk:        {} ({})", row.risk_level, row.risk_color);
        println!("  Category:    {}", row.category);
        if let Some(classes) = row.classes.as_deref().filter(|c| !c.is_empty()) {
            println!("  Classes:     {classes}");
        }
        println!(
            "  Vegetarian:  {}",
            display_flag(row.vegetarian.as_deref())
        );
        println!("  Vegan:       {}", display_flag(row.vegan.as_deref()));
        if let Some(url) = row.evaluation_url.as_deref().filter(|u| !u.is_empty()) {
            println!("  EFSA:        {url}");
        }
        println!("  Source:      {} ({})", row.source_provenance, row.external_id);
        if let Some(description) = &row.description {
            println!("\n  {description}");
        }
    }
}

fn display_flag(flag: Option<&str>) -> &str {
    match flag {
        None | Some("") => "unknown",
        Some(value) => value,
    }
}

fn percent(count: u64, total: u64) -> f64 {
    if total == 0 {
        0.0
    } else {
        count as f64 * 100.0 / total as f64
    }
}
