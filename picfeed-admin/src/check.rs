use anyhow::{Context, Result};

use picfeed_store::db::schema::TABLES;
use picfeed_store::Database;

/// Summary of a database's state
#[derive(Debug)]
pub struct CheckReport {
    /// Row count per table, parents first
    pub table_counts: Vec<(&'static str, i64)>,
    /// Rows whose foreign key points at a missing parent
    pub foreign_key_violations: i64,
}

/// Validate that every table exists, then count rows and dangling
/// references.
pub fn check_database(db: &Database) -> Result<CheckReport> {
    let conn = db.connection()?;

    for table in TABLES {
        let exists: bool = conn
            .query_row(
                "SELECT COUNT(*) FROM sqlite_master WHERE type='table' AND name = ?",
                [table],
                |row| row.get::<_, i64>(0).map(|count| count > 0),
            )
            .with_context(|| format!("Failed to check for {} table", table))?;

        if !exists {
            anyhow::bail!("Database schema is invalid - {} table not found", table);
        }
    }

    let foreign_key_violations: i64 = conn
        .query_row("SELECT COUNT(*) FROM pragma_foreign_key_check", [], |row| row.get(0))
        .context("Failed to run foreign key check")?;
    drop(conn);

    let table_counts = db.table_counts()?;
    Ok(CheckReport {
        table_counts,
        foreign_key_violations,
    })
}

/// Display the report in a formatted way
pub fn display_report(report: &CheckReport) {
    println!("=== Database Diagnostic ===");
    println!();
    for (table, count) in &report.table_counts {
        println!("  {:<12} {}", table, count);
    }
    println!();
    if report.foreign_key_violations > 0 {
        println!("Dangling foreign keys: {}", report.foreign_key_violations);
    } else {
        println!("No dangling foreign keys");
    }
}
