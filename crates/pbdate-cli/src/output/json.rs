use pbdate_core::error::PbDateError;
use pbdate_core::table::{Cell, Table};
use serde_json::{Map, Value};

pub fn print(table: &Table) -> Result<(), PbDateError> {
    let json = serde_json::to_string_pretty(&to_json(table))?;
    println!("{json}");
    Ok(())
}

/// One JSON object per row, keyed by column name. Empty cells are null.
fn to_json(table: &Table) -> Value {
    let rows = table
        .rows()
        .iter()
        .map(|row| {
            let object: Map<String, Value> = table
                .columns()
                .iter()
                .zip(row)
                .map(|(name, cell)| (name.clone(), cell_value(cell)))
                .collect();
            Value::Object(object)
        })
        .collect();
    Value::Array(rows)
}

fn cell_value(cell: &Cell) -> Value {
    match cell {
        Cell::Number(v) => serde_json::Number::from_f64(*v)
            .map(Value::Number)
            .unwrap_or_else(|| Value::String(cell.render())),
        Cell::Text(s) => Value::String(s.clone()),
        Cell::Empty => Value::Null,
    }
}
