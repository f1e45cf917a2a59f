//! Avro schema generation tool.
//!
//! Reads a column metadata snapshot and writes the Avro record schema
//! (`.avsc`) for one table or for the snapshot's free-form query.

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use dbavro_core::adapters::create_type_mapping;
use dbavro_core::config::parse_column_assignments;
use dbavro_core::{
    DatabaseType, GeneratorConfig, SchemaGenerator, SnapshotMetadataSource, SqlType, init_logging,
    initialize_schema_validator, validate_avro_schema_output,
};
use std::path::PathBuf;
use tracing::{debug, info};

#[derive(Parser)]
#[command(name = "dbavro")]
#[command(about = "Avro schema generator for relational tables")]
#[command(version)]
#[command(long_about = "
dbavro - Avro record schemas from SQL column metadata

Every column becomes a nullable field ([\"null\", T], default null) in
column order. Column types follow the JDBC type code reported for the
column, adjusted for the selected database vendor.

TYPE OVERRIDES:
  --map-column-java ID=Long,PRICE=Double
  Supported types: Integer, Long, Boolean, Float, Double, String, Bytes

EXAMPLES:
  dbavro generate --metadata snapshot.json --table ORDERS
  dbavro generate --metadata snapshot.json --config config.json -o orders.avsc --table ORDERS
  dbavro generate --metadata snapshot.json --decimal-logical-types --schema-name Result
  dbavro types --database-type oracle
")]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalArgs,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Generate an Avro schema from a metadata snapshot
    Generate(GenerateArgs),
    /// Show the default SQL to Avro type mapping
    Types(TypesArgs),
}

#[derive(Args)]
pub struct GenerateArgs {
    /// Column metadata snapshot (JSON)
    #[arg(long, help = "Column metadata snapshot file")]
    pub metadata: PathBuf,

    /// Table to import; omit for the snapshot's free-form query
    #[arg(long, help = "Table name (omit for a free-form query import)")]
    pub table: Option<String>,

    /// Record name override
    #[arg(long, help = "Name of the generated record")]
    pub schema_name: Option<String>,

    /// Generator configuration file
    #[arg(long, env = "DBAVRO_CONFIG", help = "Generator configuration file (JSON)")]
    pub config: Option<PathBuf>,

    /// Column type overrides
    #[arg(
        long,
        value_delimiter = ',',
        help = "Column type overrides (column=Type, comma-separated)"
    )]
    pub map_column_java: Vec<String>,

    /// Enable the decimal logical type
    #[arg(long, help = "Map DECIMAL/NUMERIC columns to the Avro decimal logical type")]
    pub decimal_logical_types: bool,

    /// Default decimal precision
    #[arg(long, help = "Precision for decimal columns that report none (1-38)")]
    pub decimal_default_precision: Option<u32>,

    /// Default decimal scale
    #[arg(long, help = "Scale for decimal columns that report none")]
    pub decimal_default_scale: Option<u32>,

    /// Record class name
    #[arg(long, help = "Fully qualified record name (e.g. com.acme.Order)")]
    pub class_name: Option<String>,

    /// Record namespace
    #[arg(long, help = "Namespace for the generated record")]
    pub package_name: Option<String>,

    /// Database vendor
    #[arg(long, help = "Database vendor (generic, postgresql, mysql, oracle, sqlserver)")]
    pub database_type: Option<DatabaseType>,

    /// Output file path
    #[arg(short, long, help = "Output file path (defaults to stdout)")]
    pub output: Option<PathBuf>,
}

#[derive(Args)]
pub struct TypesArgs {
    /// Database vendor
    #[arg(long, default_value = "generic", help = "Database vendor")]
    pub database_type: DatabaseType,
}

#[derive(Args)]
pub struct GlobalArgs {
    /// Increase verbosity
    #[arg(
        short,
        long,
        global = true,
        action = clap::ArgAction::Count,
        help = "Increase verbosity (-v, -vv)"
    )]
    pub verbose: u8,

    /// Suppress output
    #[arg(short, long, global = true, help = "Suppress all logging except errors")]
    pub quiet: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.global.verbose, cli.global.quiet)?;

    initialize_schema_validator().context("Failed to initialize schema validator")?;

    match &cli.command {
        Command::Generate(args) => generate(args),
        Command::Types(args) => {
            list_type_mapping(args.database_type);
            Ok(())
        }
    }
}

/// Builds the generator configuration from the config file and flags.
///
/// Flags take precedence over the file, and only the merged result is
/// validated.
fn build_config(args: &GenerateArgs) -> Result<GeneratorConfig> {
    let mut config = match &args.config {
        Some(path) => GeneratorConfig::read_path(path)
            .with_context(|| format!("Invalid configuration in {}", path.display()))?,
        None => GeneratorConfig::new(),
    };

    config
        .map_column_java
        .extend(parse_column_assignments(&args.map_column_java)?);
    if args.decimal_logical_types {
        config.enable_decimal_logical_type = true;
    }
    if args.decimal_default_precision.is_some() {
        config.decimal_default_precision = args.decimal_default_precision;
    }
    if args.decimal_default_scale.is_some() {
        config.decimal_default_scale = args.decimal_default_scale;
    }
    if let Some(class_name) = &args.class_name {
        config.class_name = Some(class_name.clone());
    }
    if let Some(package_name) = &args.package_name {
        config.package_name = Some(package_name.clone());
    }
    if let Some(database_type) = args.database_type {
        config.database_type = database_type;
    }

    config.validate().context("Invalid configuration")?;
    debug!("Generator configuration: {:?}", config);
    Ok(config)
}

/// Generates the schema and writes it to the output
fn generate(args: &GenerateArgs) -> Result<()> {
    let config = build_config(args)?;

    info!("Reading column metadata from {}", args.metadata.display());
    let metadata = SnapshotMetadataSource::from_path(&args.metadata)
        .with_context(|| format!("Invalid metadata snapshot {}", args.metadata.display()))?;

    let mapping = create_type_mapping(config.database_type, &config, metadata.type_name_hints());
    info!("Using {} type mapping", mapping.database_type());

    let generator = SchemaGenerator::new(&config, &metadata, mapping.as_ref())?;
    let schema = generator.generate(args.table.as_deref(), args.schema_name.as_deref())?;

    validate_avro_schema_output(&schema.to_json_value()?)
        .context("Generated schema failed validation")?;
    debug!("Output validation passed");

    let mut rendered = schema.to_json_pretty()?;
    rendered.push('\n');

    match &args.output {
        Some(path) => {
            std::fs::write(path, rendered)
                .with_context(|| format!("Failed to write to {}", path.display()))?;
            info!("Schema {} written to {}", schema.full_name(), path.display());
        }
        None => print!("{}", rendered),
    }

    Ok(())
}

/// Prints the default Avro type of every standard JDBC type
fn list_type_mapping(database_type: DatabaseType) {
    let config = GeneratorConfig::new().with_database_type(database_type);
    let mapping = create_type_mapping(database_type, &config, Default::default());

    println!("Default Avro types for {} columns:", database_type);
    for sql_type in SqlType::STANDARD {
        let avro = mapping.default_primitive(None, None, sql_type);
        println!(
            "  {:<24} {:>5}  {}",
            sql_type.name().unwrap_or("UNKNOWN"),
            sql_type.code(),
            avro.type_name()
        );
    }
    println!();
    println!("DECIMAL and NUMERIC map to bytes/decimal with --decimal-logical-types.");
    println!("Codes not listed map to string.");
}
