use serde::Deserialize;
use serde_json::Value;

use crate::sitedb::Row;

// Columnar reply: column names once, then one value array per row
#[derive(Deserialize, Debug)]
struct Flat {
    desc: Desc,
    result: Vec<Vec<Value>>,
}

#[derive(Deserialize, Debug)]
struct Desc {
    columns: Vec<String>,
}

/// Turns `{"desc": {"columns": [...]}, "result": [[...], ...]}` into one
/// [`Row`] per result entry.
pub fn unflatten(text: &str) -> Result<Vec<Row>, serde_json::Error> {
    let flat: Flat = serde_json::from_str(text)?;
    Ok(flat
        .result
        .into_iter()
        .map(|values| to_row(&flat.desc.columns, values))
        .collect())
}

// Zip stops at the shorter side, a repeated column keeps its first value
fn to_row(columns: &[String], values: Vec<Value>) -> Row {
    let mut row = Row::new();
    for (column, value) in columns.iter().zip(values) {
        row.entry(column.as_str()).or_insert(value);
    }
    row
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn rows_from_columns() {
        let rows = unflatten(
            r#"{"desc": {"columns": ["type", "site_name", "alias"]},
                "result": [["cms", "RWTH", "T2_DE_RWTH"], ["phedex", "RWTH", "T2_DE_RWTH"]]}"#,
        )
        .unwrap();

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0]["type"], json!("cms"));
        assert_eq!(rows[1]["alias"], json!("T2_DE_RWTH"));
    }

    #[test]
    fn short_rows_and_repeated_columns() {
        let rows = unflatten(r#"{"desc": {"columns": ["a", "b", "a"]}, "result": [[1, 2, 3], [4]]}"#).unwrap();

        assert_eq!(rows[0]["a"], json!(1));
        assert_eq!(rows[0]["b"], json!(2));
        assert_eq!(rows[1].len(), 1);
        assert_eq!(rows[1]["a"], json!(4));
    }

    #[test]
    fn wrong_shape() {
        assert!(unflatten(r#"{"result": []}"#).is_err());
        assert!(unflatten("<html>").is_err());
    }
}
