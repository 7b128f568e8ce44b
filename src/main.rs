use anyhow::Result;
use pokeapi_to_sqlite::{
    cli::{Cli, Commands},
    pipeline::build,
    schema::table_names,
};
use std::time::Instant;

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse_args();

    match cli.command {
        Commands::Convert { csv_dir, output_db } => {
            let start = Instant::now();

            println!("Converting to SQLite...");
            let summary = build(&csv_dir, &output_db)?;

            let elapsed = start.elapsed();
            println!(
                "\nCreated {:?} ({} rows) in {:.1}s",
                output_db,
                summary.total(),
                elapsed.as_secs_f64()
            );
        }

        Commands::ListTables => {
            println!("Output tables:\n");
            for name in table_names() {
                println!("  {}", name);
            }
        }
    }

    Ok(())
}
