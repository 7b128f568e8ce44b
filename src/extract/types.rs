//! Elemental types, their pairwise efficacies and their localized names.

use std::collections::HashSet;
use std::path::Path;

use crate::db::{Record, SqlValue};
use crate::error::{Error, Result};
use crate::extract::is_placeholder;
use crate::registry::Registry;
use crate::schema::{tables, TableSchema};
use crate::source::{field, int_field, open_table};

const TYPES_CSV: &str = "types.csv";
const TYPE_EFFICACY_CSV: &str = "type_efficacy.csv";
const TYPE_NAMES_CSV: &str = "type_names.csv";

#[derive(Debug, PartialEq)]
pub struct Type {
    pub id: i64,
    pub generation: i64,
}

impl Record for Type {
    fn schema() -> &'static TableSchema {
        &tables::TYPES
    }

    fn values(&self) -> Vec<SqlValue> {
        vec![
            SqlValue::Integer(self.id),
            SqlValue::Integer(self.generation),
        ]
    }
}

#[derive(Debug, PartialEq)]
pub struct TypeEfficacy {
    pub damage_type_id: i64,
    pub target_type_id: i64,
    pub damage_factor: i64,
}

impl Record for TypeEfficacy {
    fn schema() -> &'static TableSchema {
        &tables::TYPE_EFFICACIES
    }

    fn values(&self) -> Vec<SqlValue> {
        vec![
            SqlValue::Integer(self.damage_type_id),
            SqlValue::Integer(self.target_type_id),
            SqlValue::Integer(self.damage_factor),
        ]
    }
}

#[derive(Debug, PartialEq)]
pub struct TypeTranslation {
    pub type_id: i64,
    pub lang_id: i64,
    pub name: String,
}

impl Record for TypeTranslation {
    fn schema() -> &'static TableSchema {
        &tables::TYPE_TRANSLATIONS
    }

    fn values(&self) -> Vec<SqlValue> {
        vec![
            SqlValue::Integer(self.type_id),
            SqlValue::Integer(self.lang_id),
            SqlValue::Text(self.name.clone()),
        ]
    }
}

pub fn extract(
    csv_dir: &Path,
    registry: &Registry,
) -> Result<(Vec<Type>, Vec<TypeEfficacy>, Vec<TypeTranslation>)> {
    let types = read_types(csv_dir)?;
    let known: HashSet<i64> = types.iter().map(|t| t.id).collect();
    let efficacies = read_efficacies(csv_dir, &known)?;
    let translations = read_type_names(csv_dir, &known, registry)?;
    Ok((types, efficacies, translations))
}

fn read_types(csv_dir: &Path) -> Result<Vec<Type>> {
    // types.csv: id, identifier, generation_id
    let mut types = Vec::new();
    let mut reader = open_table(csv_dir, TYPES_CSV)?;
    for row in reader.records() {
        let row = row?;
        let id = int_field(TYPES_CSV, &row, 0)?;
        if is_placeholder(id) {
            continue;
        }

        types.push(Type {
            id,
            generation: int_field(TYPES_CSV, &row, 2)?,
        });
    }

    Ok(types)
}

fn read_efficacies(csv_dir: &Path, known: &HashSet<i64>) -> Result<Vec<TypeEfficacy>> {
    // type_efficacy.csv: damage_type_id, target_type_id, damage_factor
    let mut efficacies = Vec::new();
    let mut reader = open_table(csv_dir, TYPE_EFFICACY_CSV)?;
    for row in reader.records() {
        let row = row?;
        let damage_type_id = int_field(TYPE_EFFICACY_CSV, &row, 0)?;
        let target_type_id = int_field(TYPE_EFFICACY_CSV, &row, 1)?;

        for type_id in [damage_type_id, target_type_id] {
            if !known.contains(&type_id) {
                return Err(Error::Unresolved {
                    table: TYPE_EFFICACY_CSV,
                    id: type_id,
                });
            }
        }

        efficacies.push(TypeEfficacy {
            damage_type_id,
            target_type_id,
            damage_factor: int_field(TYPE_EFFICACY_CSV, &row, 2)?,
        });
    }

    Ok(efficacies)
}

fn read_type_names(
    csv_dir: &Path,
    known: &HashSet<i64>,
    registry: &Registry,
) -> Result<Vec<TypeTranslation>> {
    // type_names.csv: type_id, local_language_id, name
    let mut translations = Vec::new();
    let mut reader = open_table(csv_dir, TYPE_NAMES_CSV)?;
    for row in reader.records() {
        let row = row?;
        let type_id = int_field(TYPE_NAMES_CSV, &row, 0)?;
        if is_placeholder(type_id) {
            continue;
        }

        let Some(lang_id) = registry.lang(int_field(TYPE_NAMES_CSV, &row, 1)?) else {
            continue;
        };
        if !known.contains(&type_id) {
            return Err(Error::Unresolved {
                table: TYPE_NAMES_CSV,
                id: type_id,
            });
        }

        translations.push(TypeTranslation {
            type_id,
            lang_id,
            name: field(TYPE_NAMES_CSV, &row, 2)?.to_string(),
        });
    }

    Ok(translations)
}
