//! The build pipeline: five entity-family stages run strictly in dependency
//! order, each stage creating its tables, extracting records and loading
//! them in one transaction. A failing stage halts the pipeline; earlier
//! stages' commits stand.

use std::path::Path;

use log::info;

use crate::db::{insert_many, Database};
use crate::error::Result;
use crate::extract;
use crate::registry::Registry;
use crate::schema::tables;

/// Row counts per entity family after a completed build.
#[derive(Debug)]
pub struct BuildSummary {
    pub versions: usize,
    pub types: usize,
    pub abilities: usize,
    pub moves: usize,
    pub pokemons: usize,
}

impl BuildSummary {
    pub fn total(&self) -> usize {
        self.versions + self.types + self.abilities + self.moves + self.pokemons
    }
}

/// Convert the csv directory into a new sqlite database at `output_db`.
///
/// The destination must not exist; nothing is created before that check
/// passes.
pub fn build(csv_dir: &Path, output_db: &Path) -> Result<BuildSummary> {
    let mut db = Database::create(output_db)?;
    let registry = Registry::seed(&mut db)?;

    let summary = BuildSummary {
        versions: build_versions(&mut db, &registry, csv_dir)?,
        types: build_types(&mut db, &registry, csv_dir)?,
        abilities: build_abilities(&mut db, &registry, csv_dir)?,
        moves: build_moves(&mut db, &registry, csv_dir)?,
        pokemons: build_pokemons(&mut db, &registry, csv_dir)?,
    };

    info!("build complete, {} rows written", summary.total());
    Ok(summary)
}

fn build_versions(db: &mut Database, registry: &Registry, csv_dir: &Path) -> Result<usize> {
    db.create_tables(&[&tables::VERSIONS, &tables::VERSION_TRANSLATIONS])?;
    let (versions, translations) = extract::version::extract(csv_dir, registry)?;

    let capacity = db.capacity();
    let tx = db.transaction()?;
    let mut written = insert_many(&tx, capacity, &versions)?;
    written += insert_many(&tx, capacity, &translations)?;
    tx.commit()?;

    info!("versions: {} rows", written);
    Ok(written)
}

fn build_types(db: &mut Database, registry: &Registry, csv_dir: &Path) -> Result<usize> {
    db.create_tables(&[
        &tables::TYPES,
        &tables::TYPE_EFFICACIES,
        &tables::TYPE_TRANSLATIONS,
    ])?;
    let (types, efficacies, translations) = extract::types::extract(csv_dir, registry)?;

    let capacity = db.capacity();
    let tx = db.transaction()?;
    let mut written = insert_many(&tx, capacity, &types)?;
    written += insert_many(&tx, capacity, &efficacies)?;
    written += insert_many(&tx, capacity, &translations)?;
    tx.commit()?;

    info!("types: {} rows", written);
    Ok(written)
}

fn build_abilities(db: &mut Database, registry: &Registry, csv_dir: &Path) -> Result<usize> {
    db.create_tables(&[&tables::ABILITIES, &tables::ABILITY_TRANSLATIONS])?;
    let (abilities, translations) = extract::ability::extract(csv_dir, registry)?;

    let capacity = db.capacity();
    let tx = db.transaction()?;
    let mut written = insert_many(&tx, capacity, &abilities)?;
    written += insert_many(&tx, capacity, &translations)?;
    tx.commit()?;

    info!("abilities: {} rows", written);
    Ok(written)
}

fn build_moves(db: &mut Database, registry: &Registry, csv_dir: &Path) -> Result<usize> {
    db.create_tables(&[&tables::MOVES, &tables::MOVE_TRANSLATIONS])?;
    // Type references resolve against the committed types stage.
    let (moves, translations) = extract::moves::extract(csv_dir, registry, db)?;

    let capacity = db.capacity();
    let tx = db.transaction()?;
    let mut written = insert_many(&tx, capacity, &moves)?;
    written += insert_many(&tx, capacity, &translations)?;
    tx.commit()?;

    info!("moves: {} rows", written);
    Ok(written)
}

fn build_pokemons(db: &mut Database, registry: &Registry, csv_dir: &Path) -> Result<usize> {
    db.create_tables(&[
        &tables::POKEMONS,
        &tables::POKEMON_ABILITIES,
        &tables::POKEMON_TRANSLATIONS,
    ])?;
    // Ability references resolve against the committed abilities stage.
    let (pokemons, abilities, translations) =
        extract::pokemon::extract(csv_dir, registry, db)?;

    let capacity = db.capacity();
    let tx = db.transaction()?;
    let mut written = insert_many(&tx, capacity, &pokemons)?;
    written += insert_many(&tx, capacity, &abilities)?;
    written += insert_many(&tx, capacity, &translations)?;
    tx.commit()?;

    info!("pokemons: {} rows", written);
    Ok(written)
}
