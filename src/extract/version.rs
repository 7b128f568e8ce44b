//! Game versions. The generation comes from a second table joined on the
//! version group id, which is discarded after the join.

use std::collections::{BTreeMap, HashSet};
use std::path::Path;

use crate::db::{Record, SqlValue};
use crate::error::{Error, Result};
use crate::registry::Registry;
use crate::schema::{tables, TableSchema};
use crate::source::{field, int_field, open_table};

const VERSIONS_CSV: &str = "versions.csv";
const VERSION_GROUPS_CSV: &str = "version_groups.csv";
const VERSION_NAMES_CSV: &str = "version_names.csv";

#[derive(Debug, PartialEq)]
pub struct Version {
    pub id: i64,
    pub generation: i64,
}

impl Record for Version {
    fn schema() -> &'static TableSchema {
        &tables::VERSIONS
    }

    fn values(&self) -> Vec<SqlValue> {
        vec![
            SqlValue::Integer(self.id),
            SqlValue::Integer(self.generation),
        ]
    }
}

#[derive(Debug, PartialEq)]
pub struct VersionTranslation {
    pub version_id: i64,
    pub lang_id: i64,
    pub name: String,
}

impl Record for VersionTranslation {
    fn schema() -> &'static TableSchema {
        &tables::VERSION_TRANSLATIONS
    }

    fn values(&self) -> Vec<SqlValue> {
        vec![
            SqlValue::Integer(self.version_id),
            SqlValue::Integer(self.lang_id),
            SqlValue::Text(self.name.clone()),
        ]
    }
}

pub fn extract(
    csv_dir: &Path,
    registry: &Registry,
) -> Result<(Vec<Version>, Vec<VersionTranslation>)> {
    let versions = read_versions(csv_dir)?;
    let translations = read_version_names(csv_dir, &versions, registry)?;
    Ok((versions, translations))
}

fn read_versions(csv_dir: &Path) -> Result<Vec<Version>> {
    // versions.csv: id, version_group_id
    let mut version_groups: Vec<(i64, i64)> = Vec::new();
    let mut reader = open_table(csv_dir, VERSIONS_CSV)?;
    for row in reader.records() {
        let row = row?;
        version_groups.push((
            int_field(VERSIONS_CSV, &row, 0)?,
            int_field(VERSIONS_CSV, &row, 1)?,
        ));
    }

    // version_groups.csv: id, identifier, generation_id
    let mut generations: BTreeMap<i64, i64> = BTreeMap::new();
    let mut reader = open_table(csv_dir, VERSION_GROUPS_CSV)?;
    for row in reader.records() {
        let row = row?;
        generations.insert(
            int_field(VERSION_GROUPS_CSV, &row, 0)?,
            int_field(VERSION_GROUPS_CSV, &row, 2)?,
        );
    }

    version_groups
        .into_iter()
        .map(|(id, group)| {
            let generation = generations.get(&group).copied().ok_or(Error::Unresolved {
                table: VERSION_GROUPS_CSV,
                id: group,
            })?;
            Ok(Version { id, generation })
        })
        .collect()
}

fn read_version_names(
    csv_dir: &Path,
    versions: &[Version],
    registry: &Registry,
) -> Result<Vec<VersionTranslation>> {
    let known: HashSet<i64> = versions.iter().map(|v| v.id).collect();

    // version_names.csv: version_id, local_language_id, name
    let mut translations = Vec::new();
    let mut reader = open_table(csv_dir, VERSION_NAMES_CSV)?;
    for row in reader.records() {
        let row = row?;
        let version_id = int_field(VERSION_NAMES_CSV, &row, 0)?;
        let external_lang = int_field(VERSION_NAMES_CSV, &row, 1)?;

        let Some(lang_id) = registry.lang(external_lang) else {
            continue;
        };
        if !known.contains(&version_id) {
            return Err(Error::Unresolved {
                table: VERSIONS_CSV,
                id: version_id,
            });
        }

        translations.push(VersionTranslation {
            version_id,
            lang_id,
            name: field(VERSION_NAMES_CSV, &row, 2)?.to_string(),
        });
    }

    Ok(translations)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fixture_dir() -> tempfile::TempDir {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join("versions.csv"),
            "id,version_group_id,identifier\n1,1,red\n2,1,blue\n21,14,x\n",
        )
        .unwrap();
        std::fs::write(
            dir.path().join("version_groups.csv"),
            "id,identifier,generation_id,order\n1,red-blue,1,1\n14,x-y,6,15\n",
        )
        .unwrap();
        std::fs::write(
            dir.path().join("version_names.csv"),
            "version_id,local_language_id,name\n\
             1,5,Rouge\n1,9,Red\n2,5,Bleue\n2,9,Blue\n21,9,X\n1,1,あか\n",
        )
        .unwrap();
        dir
    }

    #[test]
    fn test_generation_resolved_through_version_groups() {
        let dir = fixture_dir();
        let (versions, _) = extract(dir.path(), &Registry::new()).unwrap();
        assert_eq!(
            versions,
            vec![
                Version { id: 1, generation: 1 },
                Version { id: 2, generation: 1 },
                Version { id: 21, generation: 6 },
            ]
        );
    }

    #[test]
    fn test_unsupported_languages_are_dropped() {
        let dir = fixture_dir();
        let (_, translations) = extract(dir.path(), &Registry::new()).unwrap();
        // 5 rows survive; the japanese (lang 1) row does not
        assert_eq!(translations.len(), 5);
        assert!(translations
            .iter()
            .all(|t| t.lang_id == 1 || t.lang_id == 2));
    }

    #[test]
    fn test_unknown_version_group_is_fatal() {
        let dir = fixture_dir();
        std::fs::write(
            dir.path().join("versions.csv"),
            "id,version_group_id,identifier\n1,99,red\n",
        )
        .unwrap();

        let err = extract(dir.path(), &Registry::new()).unwrap_err();
        match err {
            Error::Unresolved { table, id } => {
                assert_eq!(table, "version_groups.csv");
                assert_eq!(id, 99);
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_missing_names_table_is_fatal() {
        let dir = fixture_dir();
        std::fs::remove_file(dir.path().join("version_names.csv")).unwrap();

        let err = extract(dir.path(), &Registry::new()).unwrap_err();
        assert!(matches!(
            err,
            Error::MissingInput { table: "version_names.csv" }
        ));
    }
}
