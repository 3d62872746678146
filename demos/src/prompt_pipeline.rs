//! Walks a question through the text-to-SQL and visualization models.
//!
//! This example shows how to:
//! - Annotate a schema with sample values for the SQL model
//! - Route requests through a `ModelRegistry`
//! - Run the generated SQL and hand a data sample to the chart model
//!
//! The models are replaced by a scripted generator so the example runs
//! offline. Plug a real `TextGenerator` in to talk to hosted models.
//!
//! Run with:
//! ```bash
//! cargo run --example prompt_pipeline
//! ```

use async_trait::async_trait;
use datafusion::prelude::SessionContext;
use sql_brief::inference::{
    data_sample, InferenceOutput, InferenceRequest, ModelKind, ModelRegistry, PromptedBackend,
    TextGenerator,
};
use sql_brief::logging::setup::{init_logging, LoggingConfig};
use sql_brief::logging::LogConfig;
use sql_brief::prelude::*;
use tracing::info;

/// Answers every prompt with a fixed completion.
struct ScriptedGenerator {
    name: &'static str,
    completion: &'static str,
}

#[async_trait]
impl TextGenerator for ScriptedGenerator {
    fn name(&self) -> &str {
        self.name
    }

    async fn load(&self) -> BriefResult<()> {
        info!(generator = self.name, "Loading scripted generator");
        Ok(())
    }

    async fn complete(&self, _prompt: &str) -> BriefResult<String> {
        Ok(self.completion.to_string())
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_logging(LoggingConfig::development())?;

    let dir = tempfile::tempdir()?;
    let path = dir.path().join("sales.csv");
    std::fs::write(
        &path,
        "Region,Product,Revenue\nnorth,lamp,120\nsouth,chair,340\nnorth,chair,90\neast,desk,410\n",
    )?;

    let ctx = SessionContext::new();
    let table = CsvSource::new(&path)?.register(&ctx).await?;

    let mut registry = ModelRegistry::new();
    registry
        .register(
            ModelKind::SqlCoder,
            PromptedBackend::new(
                ModelKind::SqlCoder,
                ScriptedGenerator {
                    name: "scripted-sql",
                    completion: "SELECT region, SUM(revenue) AS revenue FROM sales \
                                 WHERE product ILIKE 'ch%' GROUP BY region ORDER BY region;\n```",
                },
            )
            .with_log_config(LogConfig::verbose()),
        )
        .register(
            ModelKind::Data2Viz,
            PromptedBackend::new(
                ModelKind::Data2Viz,
                ScriptedGenerator {
                    name: "scripted-viz",
                    completion: r#"Vega-Lite Json: {"mark": "bar", "encoding": {"x": {"field": "region"}, "y": {"field": "revenue", "type": "quantitative"}}}"#,
                },
            ),
        );

    let question = "What is the chair revenue per region?";
    let schema = annotate_schema(&render_create_table(&table), &table, true)?;
    println!("Annotated schema:\n{schema}\n");

    let sql = match registry
        .dispatch(&InferenceRequest::sql(question, schema))
        .await?
    {
        InferenceOutput::Sql(sql) => sql,
        other => return Err(format!("unexpected SQL model output: {other:?}").into()),
    };
    println!("Generated SQL:\n{sql}\n");

    let df = ctx.sql(&sql).await?;
    let result_schema = df.schema().inner().clone();
    let batches = df.collect().await?;
    let result = Table::from_batches("result", result_schema, &batches)?;
    let sample = data_sample(&result, 20)?;
    println!("Query result sample:\n{sample}\n");

    let chart = registry
        .dispatch(&InferenceRequest::visualization(question, sample))
        .await?;
    println!("Chart specification:\n{}", serde_json::to_string_pretty(&chart)?);

    Ok(())
}
