//! Data source connectors producing table snapshots.
//!
//! Sources read external data through DataFusion and hand back an immutable
//! [`Table`]. Loading is async; everything downstream of the snapshot is not.

use std::fmt::Debug;
use std::path::Path;

use async_trait::async_trait;
use datafusion::prelude::SessionContext;
use tracing::{info, instrument};

use crate::error::BriefResult;
use crate::table::Table;

mod csv;

pub use csv::{CsvOptions, CsvSource};

/// A data source that can be materialized as a [`Table`].
///
/// # Examples
///
/// ```rust,no_run
/// use datafusion::prelude::SessionContext;
/// use sql_brief::sources::{CsvSource, TableSource};
///
/// # async fn example() -> sql_brief::error::BriefResult<()> {
/// let source: Box<dyn TableSource> = Box::new(CsvSource::new("data/users.csv")?);
/// let table = source.load_table(&SessionContext::new()).await?;
/// println!("{} has {} rows", source.description(), table.row_count());
/// # Ok(())
/// # }
/// ```
#[async_trait]
pub trait TableSource: Debug + Send + Sync {
    /// Reads the source into a snapshot.
    async fn load_table(&self, ctx: &SessionContext) -> BriefResult<Table>;

    /// Returns a human-readable description of this data source.
    fn description(&self) -> String;
}

/// Normalizes a column name: lowercase, spaces replaced by underscores.
///
/// ```rust
/// assert_eq!(sql_brief::sources::snake_case("Unit Price"), "unit_price");
/// ```
pub fn snake_case(name: &str) -> String {
    name.to_lowercase().replace(' ', "_")
}

/// Loads every `*.csv` file of `dir`, in file-name order, and registers each
/// with `ctx` under its file stem.
#[instrument(skip_all, fields(dir = %dir.as_ref().display()))]
pub async fn load_csv_dir(ctx: &SessionContext, dir: impl AsRef<Path>) -> BriefResult<Vec<Table>> {
    let mut paths = Vec::new();
    for entry in std::fs::read_dir(dir.as_ref())? {
        let path = entry?.path();
        let is_csv = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case("csv"));
        if path.is_file() && is_csv {
            paths.push(path);
        }
    }
    paths.sort();

    let mut tables = Vec::with_capacity(paths.len());
    for path in paths {
        tables.push(CsvSource::new(&path)?.register(ctx).await?);
    }

    info!(tables = tables.len(), "Loaded CSV directory");
    Ok(tables)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_snake_case() {
        assert_eq!(snake_case("Order Date"), "order_date");
        assert_eq!(snake_case("already_snake"), "already_snake");
        assert_eq!(snake_case("Two  Spaces"), "two__spaces");
    }

    #[tokio::test]
    async fn test_load_csv_dir_sorted_and_filtered() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("zeta.csv"), "v\n1\n").unwrap();
        std::fs::write(dir.path().join("alpha.csv"), "Name\nx\ny\n").unwrap();
        std::fs::write(dir.path().join("notes.txt"), "ignored").unwrap();

        let ctx = SessionContext::new();
        let tables = load_csv_dir(&ctx, dir.path()).await.unwrap();
        let names: Vec<&str> = tables.iter().map(|t| t.name()).collect();
        assert_eq!(names, vec!["alpha", "zeta"]);
        assert_eq!(tables[0].column_names(), vec!["name"]);
        assert!(ctx.table_exist("zeta").unwrap());
    }
}
