use super::model::{CellValue, Column, Dataset};

/// Names of the numeric columns of `dataset`, in column order.
///
/// A column is numeric when every non-null cell is an integer or a float.
/// Columns without any rows carry no type information and are not numeric;
/// a column holding only nulls is (it reads as an all-NaN float column).
pub fn numeric_columns(dataset: &Dataset) -> Vec<String> {
    dataset
        .columns
        .iter()
        .filter(|c| is_numeric(c))
        .map(|c| c.name.clone())
        .collect()
}

pub fn is_numeric(column: &Column) -> bool {
    !column.cells.is_empty() && column.cells.iter().all(CellValue::is_numeric_or_null)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn column(name: &str, cells: Vec<CellValue>) -> Column {
        Column {
            name: name.to_string(),
            cells,
        }
    }

    fn dataset(columns: Vec<Column>) -> Dataset {
        Dataset {
            name: "t.csv".to_string(),
            columns,
        }
    }

    #[test]
    fn mixed_int_and_float_is_numeric() {
        let ds = dataset(vec![column(
            "v",
            vec![CellValue::Integer(1), CellValue::Float(2.5), CellValue::Null],
        )]);
        assert_eq!(numeric_columns(&ds), vec!["v"]);
    }

    #[test]
    fn single_text_cell_excludes_column() {
        let ds = dataset(vec![
            column("a", vec![CellValue::Integer(1), CellValue::Integer(2)]),
            column(
                "b",
                vec![CellValue::Integer(1), CellValue::Text("x".to_string())],
            ),
        ]);
        assert_eq!(numeric_columns(&ds), vec!["a"]);
    }

    #[test]
    fn all_null_column_is_numeric_but_empty_column_is_not() {
        let ds = dataset(vec![
            column("nulls", vec![CellValue::Null, CellValue::Null]),
            column("a", vec![CellValue::Integer(1), CellValue::Integer(2)]),
        ]);
        assert_eq!(numeric_columns(&ds), vec!["nulls", "a"]);

        let header_only = dataset(vec![column("a", Vec::new())]);
        assert!(numeric_columns(&header_only).is_empty());
    }

    #[test]
    fn result_is_subset_of_columns_in_order() {
        let ds = dataset(vec![
            column("z", vec![CellValue::Float(1.0)]),
            column("name", vec![CellValue::Text("n".to_string())]),
            column("a", vec![CellValue::Integer(3)]),
        ]);
        let numeric = numeric_columns(&ds);
        let all = ds.column_names();
        assert!(numeric.iter().all(|n| all.contains(n)));
        assert_eq!(numeric, vec!["z", "a"]);
    }
}
