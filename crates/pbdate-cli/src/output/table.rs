use pbdate_core::table::Table;

/// Print the whole table with aligned columns.
pub fn print(table: &Table) {
    let columns: Vec<&str> = table.columns().iter().map(|c| c.as_str()).collect();
    print_columns(table, &columns);
}

/// Print the named columns (those present) with aligned widths.
pub fn print_columns(table: &Table, names: &[&str]) {
    let selected: Vec<(usize, &str)> = names
        .iter()
        .filter_map(|name| table.column_index(name).map(|idx| (idx, *name)))
        .collect();

    if table.is_empty() {
        println!("  (no rows)");
        return;
    }

    let cells: Vec<Vec<String>> = table
        .rows()
        .iter()
        .map(|row| selected.iter().map(|(idx, _)| row[*idx].render()).collect())
        .collect();

    let widths: Vec<usize> = selected
        .iter()
        .enumerate()
        .map(|(i, (_, name))| {
            cells
                .iter()
                .map(|row| row[i].len())
                .chain(std::iter::once(name.len()))
                .max()
                .unwrap_or(0)
        })
        .collect();

    let header: Vec<String> = selected
        .iter()
        .zip(&widths)
        .map(|((_, name), w)| format!("{:<width$}", name, width = w))
        .collect();
    println!("  {}", header.join("  "));

    for row in &cells {
        let line: Vec<String> = row
            .iter()
            .zip(&widths)
            .map(|(cell, w)| format!("{:<width$}", cell, width = w))
            .collect();
        println!("  {}", line.join("  ").trim_end());
    }
}
