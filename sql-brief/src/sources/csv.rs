//! CSV file source implementation.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use async_trait::async_trait;
use datafusion::datasource::MemTable;
use datafusion::prelude::*;
use tracing::{debug, info, instrument};

use super::{snake_case, TableSource};
use crate::error::{BriefError, BriefResult};
use crate::table::Table;

/// Options for configuring CSV file reading.
#[derive(Debug, Clone)]
pub struct CsvOptions {
    /// Whether the CSV file has a header row
    pub has_header: bool,
    /// Field delimiter (default: ',')
    pub delimiter: u8,
    /// Maximum records to read for schema inference
    pub schema_infer_max_records: usize,
}

impl Default for CsvOptions {
    fn default() -> Self {
        Self {
            has_header: true,
            delimiter: b',',
            schema_infer_max_records: 1000,
        }
    }
}

/// A CSV file loaded into a [`Table`] snapshot.
///
/// The table is named after the file stem and its column names are normalized
/// with [`snake_case`].
///
/// # Examples
///
/// ```rust,no_run
/// use datafusion::prelude::SessionContext;
/// use sql_brief::sources::{CsvOptions, CsvSource};
///
/// # async fn example() -> sql_brief::error::BriefResult<()> {
/// let ctx = SessionContext::new();
///
/// // Simple CSV file
/// let table = CsvSource::new("data/users.csv")?.load(&ctx).await?;
///
/// // Tab-separated, registered for SQL queries as well
/// let options = CsvOptions {
///     delimiter: b'\t',
///     ..Default::default()
/// };
/// let table = CsvSource::with_options("data/users.tsv", options)?
///     .register(&ctx)
///     .await?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct CsvSource {
    path: PathBuf,
    table_name: String,
    options: CsvOptions,
}

impl CsvSource {
    /// Creates a new CSV source from a single file path.
    pub fn new(path: impl AsRef<Path>) -> BriefResult<Self> {
        Self::with_options(path, CsvOptions::default())
    }

    /// Creates a new CSV source with custom options.
    pub fn with_options(path: impl AsRef<Path>, options: CsvOptions) -> BriefResult<Self> {
        let path = path.as_ref().to_path_buf();
        let table_name = path
            .file_stem()
            .and_then(|stem| stem.to_str())
            .map(|stem| stem.split('.').next().unwrap_or(stem).to_string())
            .filter(|stem| !stem.is_empty())
            .ok_or_else(|| {
                BriefError::configuration(format!(
                    "Cannot derive a table name from '{}'",
                    path.display()
                ))
            })?;
        Ok(Self {
            path,
            table_name,
            options,
        })
    }

    /// Overrides the table name derived from the file stem.
    pub fn with_table_name(mut self, name: impl Into<String>) -> Self {
        self.table_name = name.into();
        self
    }

    /// Name the loaded table will carry.
    pub fn table_name(&self) -> &str {
        &self.table_name
    }

    /// Path of the CSV file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads the file into a table snapshot.
    #[instrument(skip(self, ctx), fields(table = %self.table_name, path = %self.path.display()))]
    pub async fn load(&self, ctx: &SessionContext) -> BriefResult<Table> {
        let path = self.path.to_str().ok_or_else(|| {
            BriefError::configuration(format!(
                "Path contains invalid UTF-8: {}",
                self.path.display()
            ))
        })?;
        let extension = self
            .path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| format!(".{ext}"))
            .unwrap_or_default();

        let csv_options = CsvReadOptions::new()
            .has_header(self.options.has_header)
            .delimiter(self.options.delimiter)
            .schema_infer_max_records(self.options.schema_infer_max_records)
            .file_extension(&extension);

        let df = ctx.read_csv(path, csv_options).await?;
        let schema = df.schema().inner().clone();
        let batches = df.collect().await?;

        let table = Table::from_batches(&self.table_name, schema, &batches)?
            .rename_columns(snake_case)?;

        info!(
            rows = table.row_count(),
            columns = table.num_columns(),
            "Loaded CSV file"
        );
        Ok(table)
    }

    /// Loads the file and registers the snapshot with `ctx` under
    /// [`CsvSource::table_name`].
    pub async fn register(&self, ctx: &SessionContext) -> BriefResult<Table> {
        let table = self.load(ctx).await?;
        let provider = MemTable::try_new(table.schema(), vec![vec![table.batch().clone()]])?;
        ctx.register_table(table.name(), Arc::new(provider))?;
        debug!(table = table.name(), "Registered table");
        Ok(table)
    }
}

#[async_trait]
impl TableSource for CsvSource {
    async fn load_table(&self, ctx: &SessionContext) -> BriefResult<Table> {
        self.load(ctx).await
    }

    fn description(&self) -> String {
        format!("CSV file: {}", self.path.display())
    }
}
