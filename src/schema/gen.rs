use crate::schema::{ColumnType, TableSchema};

/// Generate CREATE TABLE SQL for a table schema
pub fn generate_create_table(schema: &TableSchema) -> String {
    let mut parts = Vec::new();

    for col in schema.columns {
        let sql_type = match col.col_type {
            ColumnType::Integer | ColumnType::Boolean => "INTEGER",
            ColumnType::Real => "REAL",
            ColumnType::Text => "TEXT",
        };

        let null_constraint = if !col.nullable { " NOT NULL" } else { "" };
        parts.push(format!("    {} {}{}", col.name, sql_type, null_constraint));
    }

    parts.push(format!(
        "    PRIMARY KEY ({})",
        schema.primary_key.join(", ")
    ));

    for fk in schema.foreign_keys {
        parts.push(format!(
            "    FOREIGN KEY ({}) REFERENCES {}({})",
            fk.column, fk.references_table, fk.references_column
        ));
    }

    format!(
        "CREATE TABLE IF NOT EXISTS {} (\n{}\n)",
        schema.name,
        parts.join(",\n")
    )
}

/// Generate CREATE INDEX statements for foreign key columns
pub fn generate_indexes(schema: &TableSchema) -> Vec<String> {
    schema
        .foreign_keys
        .iter()
        .map(|fk| {
            format!(
                "CREATE INDEX IF NOT EXISTS idx_{}_{} ON {}({})",
                schema.name, fk.column, schema.name, fk.column
            )
        })
        .collect()
}
