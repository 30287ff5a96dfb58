use serde::Serialize;
use serde_json::Value;

use crate::cli::OutputFormat;
use crate::ui;

pub mod table;

/// Render a command result: the full value for json/raw, `rows` for table.
pub fn render<T: Serialize, R: Serialize>(
    value: &T,
    rows: &[R],
    format: OutputFormat,
) -> anyhow::Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(value)?),
        OutputFormat::Table => render_rows(rows),
        OutputFormat::Raw => Ok(serde_json::to_string(value)?),
    }
}

/// Print a command result to stdout in the requested format.
pub fn output<T: Serialize, R: Serialize>(
    value: &T,
    rows: &[R],
    format: OutputFormat,
) -> anyhow::Result<()> {
    let rendered = render(value, rows, format)?;
    println!("{rendered}");
    Ok(())
}

fn render_rows<R: Serialize>(rows: &[R]) -> anyhow::Result<String> {
    let prefs = ui::prefs();
    let options = table::TableOptions {
        max_width: prefs.term_width,
        color: prefs.table_color,
    };

    if rows.is_empty() {
        return Ok(String::from("(no rows)"));
    }

    let values = rows
        .iter()
        .map(serde_json::to_value)
        .collect::<Result<Vec<_>, _>>()?;

    // serde_json maps are sorted, so columns come out alphabetically.
    let headers: Vec<String> = match values.first().and_then(Value::as_object) {
        Some(map) => map.keys().cloned().collect(),
        None => vec![String::from("value")],
    };
    let header_refs = headers.iter().map(String::as_str).collect::<Vec<_>>();

    let cells = values
        .iter()
        .map(|value| match value.as_object() {
            Some(map) => headers
                .iter()
                .map(|h| map.get(h).map_or_else(|| String::from("-"), value_to_cell))
                .collect::<Vec<_>>(),
            None => vec![value_to_cell(value)],
        })
        .collect::<Vec<_>>();

    Ok(table::render_entity_table(&header_refs, &cells, options))
}

fn value_to_cell(value: &Value) -> String {
    match value {
        Value::Null => String::from("-"),
        Value::Bool(v) => v.to_string(),
        Value::Number(v) => v.to_string(),
        Value::String(v) => v.clone(),
        Value::Array(items) => items
            .iter()
            .map(value_to_cell)
            .collect::<Vec<_>>()
            .join(","),
        other @ Value::Object(_) => {
            serde_json::to_string(other).unwrap_or_else(|_| String::from("<invalid-json>"))
        }
    }
}

#[cfg(test)]
mod tests {
    use serde::Serialize;

    use super::render;
    use crate::cli::OutputFormat;

    #[derive(Serialize)]
    struct Summary {
        course: &'static str,
        compliant: u32,
    }

    #[derive(Serialize)]
    struct Row {
        day: u32,
        status: &'static str,
        codes: Vec<&'static str>,
    }

    fn rows() -> Vec<Row> {
        vec![
            Row {
                day: 1,
                status: "compliant",
                codes: vec![],
            },
            Row {
                day: 2,
                status: "non_compliant",
                codes: vec!["RECALL_PRESENT", "TOO_FEW_VALID_QUESTIONS"],
            },
        ]
    }

    #[test]
    fn json_render_is_the_full_value() {
        let value = Summary {
            course: "c",
            compliant: 1,
        };
        let out = render(&value, &rows(), OutputFormat::Json).expect("json render should work");
        let parsed: serde_json::Value = serde_json::from_str(&out).expect("json should parse");
        assert_eq!(parsed["course"], "c");
        assert_eq!(parsed["compliant"], 1);
    }

    #[test]
    fn raw_render_is_single_line_json() {
        let value = Summary {
            course: "c",
            compliant: 1,
        };
        let out = render(&value, &rows(), OutputFormat::Raw).expect("raw render should work");
        assert!(!out.contains('\n'));
    }

    #[test]
    fn table_render_uses_rows() {
        let value = Summary {
            course: "c",
            compliant: 1,
        };
        let out = render(&value, &rows(), OutputFormat::Table).expect("table render should work");
        let lines: Vec<&str> = out.lines().collect();
        assert!(lines[0].starts_with("codes"));
        assert!(lines[0].find("day") < lines[0].find("status"));
        assert!(lines[3].contains("RECALL_PRESENT,TOO_FEW_VALID_QUESTIONS"));
    }

    #[test]
    fn empty_table_says_so() {
        let out = render(&(), &Vec::<Row>::new(), OutputFormat::Table).unwrap();
        assert_eq!(out, "(no rows)");
    }
}
