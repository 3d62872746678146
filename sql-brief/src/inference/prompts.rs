//! Prompt templates for the model collaborators.

use serde_json::{Map, Value as JsonValue};

use crate::error::BriefResult;
use crate::table::Table;

/// Text-to-SQL prompt. The schema is expected to be annotated with sample
/// values already.
pub fn sql_prompt(question: &str, schema: &str) -> String {
    format!(
        "### Task\n\
         Generate a SQL query to answer the following question:\n\
         `{question}`\n\
         \n\
         ### Database Schema\n\
         This query will run on a database whose schema is represented in this string:\n\
         {schema}\n\
         ### SQL\n\
         Given the database schema, here is the SQL query that answers `{question}`:\n\
         ```sql\n"
    )
}

/// Vega-Lite generation prompt over a data sample or summary.
pub fn visualization_prompt(question: &str, data_sample: &str) -> String {
    format!(
        "Generate an insightful Vega-Lite visualization (Bar Chart, Pie Chart, Line Chart, etc.) \
         that effectively illustrates the data and addresses the user's query.\n\
         Ensure the Vega-Lite specification accurately represents the provided data and makes the \
         visualization intuitive and informative.\n\
         Pay meticulous attention to the specification's structure, including encoding, mark type, \
         and any data transformations.\n\
         Add a clear \"title\" to the visualization based on the data insights and the question.\n\
         Generate only ONE proper json string, no text. Do NOT involve multiple charts such as \
         \"hconcat\", \"vconcat\", \"layer\", \"facet\", \"repeat\", \"concat\", or \"resolve\".\n\
         \n\
         Consider the following guidelines for selecting the appropriate chart type:\n\
         - For categorical data with distinct categories and proportions (Percentages), consider \
         using a Pie Chart for better representation.\n\
         - For numerical data with comparisons or trends over time, a Line Chart or Bar Chart might \
         be more suitable.\n\
         - If the data involves showing proportions or percentages of a whole, a Pie Chart could be \
         effective.\n\
         - For showing distributions or comparisons across categories, a Bar Chart might provide \
         clearer insights.\n\
         \n\
         Question: {question}\n\
         \n\
         Data Sample: {data_sample}\n\
         \n\
         Vega-Lite Json:\n"
    )
}

/// Prompt asking for three follow-up questions in the style of `question`.
pub fn followup_prompt(question: &str) -> String {
    format!(
        "System: Use the given question to generate three questions you recommend to explore a \
         database. Use the provided question style to generate questions in the same style. Try \
         to generate questions that can be plotted to be visually explored. Number each question \
         and separate them with a blank line.\n\
         The provided question is {question}\n\
         Assistant:\n"
    )
}

/// The first `rows` rows of `table` as a JSON array of records.
///
/// ```rust
/// use std::sync::Arc;
/// use arrow::array::{ArrayRef, Int64Array, StringArray};
/// use sql_brief::inference::data_sample;
/// use sql_brief::table::Table;
///
/// let table = Table::from_columns(
///     "t",
///     vec![
///         ("n", Arc::new(Int64Array::from(vec![1, 2, 3])) as ArrayRef),
///         ("s", Arc::new(StringArray::from(vec![Some("a"), None, Some("c")])) as ArrayRef),
///     ],
/// )
/// .unwrap();
/// assert_eq!(data_sample(&table, 2).unwrap(), r#"[{"n":1,"s":"a"},{"n":2,"s":null}]"#);
/// ```
pub fn data_sample(table: &Table, rows: usize) -> BriefResult<String> {
    let columns: Vec<_> = table.columns().collect();
    let mut records = Vec::with_capacity(rows.min(table.row_count()));
    for row in 0..rows.min(table.row_count()) {
        let mut record = Map::with_capacity(columns.len());
        for column in &columns {
            record.insert(
                column.name().to_string(),
                serde_json::to_value(column.value(row))?,
            );
        }
        records.push(JsonValue::Object(record));
    }
    Ok(serde_json::to_string(&records)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sql_prompt_ends_in_open_fence() {
        let prompt = sql_prompt("How many users?", "CREATE TABLE u (\nid INTEGER\n)");
        assert!(prompt.starts_with("### Task\nGenerate a SQL query"));
        assert!(prompt.contains("`How many users?`\n\n### Database Schema\n"));
        assert!(prompt.contains("CREATE TABLE u (\nid INTEGER\n)\n### SQL\n"));
        assert!(prompt.ends_with("answers `How many users?`:\n```sql\n"));
    }

    #[test]
    fn test_visualization_prompt_embeds_inputs() {
        let prompt = visualization_prompt("revenue by month", r#"[{"m":1}]"#);
        assert!(prompt.contains("\nQuestion: revenue by month\n\nData Sample: [{\"m\":1}]\n"));
        assert!(prompt.ends_with("Vega-Lite Json:\n"));
        assert!(!prompt.contains("         "));
    }

    #[test]
    fn test_followup_prompt() {
        let prompt = followup_prompt("Which region sells most?");
        assert!(prompt.contains("The provided question is Which region sells most?\n"));
    }
}
