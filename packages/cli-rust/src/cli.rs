use std::path::PathBuf;

use catalog_criteria::{EntityType, WireFormat};
use clap::{Parser, Subcommand};

pub const ENV_ENTITY: &str = "CRITERIA_ENTITY";
pub const ENV_FORMAT: &str = "CRITERIA_FORMAT";
pub const ENV_LOG: &str = "CRITERIA_LOG";
pub const ENV_LOG_JSON: &str = "CRITERIA_LOG_JSON";

#[derive(Parser, Debug)]
#[command(name = "criteria")]
#[command(version, about = "Inspect catalog filter fields and normalize saved filters", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Entity whose filter fields are used (scene, image, gallery, performer, studio, movie, tag)
    #[arg(long, short = 'e', global = true, env = ENV_ENTITY, default_value = "scene", value_parser = parse_entity)]
    pub entity: EntityType,

    /// Write logs as JSON lines
    #[arg(long, global = true, env = ENV_LOG_JSON)]
    pub log_json: bool,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// List the filter fields offered for the entity
    Fields {
        /// Print a JSON array instead of a table
        #[arg(long)]
        json: bool,
    },
    /// Decode a saved filter, drop unusable terms and print it re-serialized
    Normalize {
        /// Encoding of the input (json or msgpack)
        #[arg(long, env = ENV_FORMAT, default_value = "json", value_parser = parse_format)]
        from: WireFormat,

        /// Encoding of the output; defaults to the input encoding
        #[arg(long, value_parser = parse_format)]
        to: Option<WireFormat>,

        /// Read the filter from this file instead of stdin
        #[arg(long, short = 'i')]
        input: Option<PathBuf>,
    },
}

fn parse_entity(s: &str) -> Result<EntityType, String> {
    EntityType::from_name(s).ok_or_else(|| {
        let valid: Vec<&str> = EntityType::ALL.iter().map(|e| e.name()).collect();
        format!("Invalid entity '{s}'. Valid options: {}", valid.join(", "))
    })
}

fn parse_format(s: &str) -> Result<WireFormat, String> {
    WireFormat::from_name(s)
        .ok_or_else(|| format!("Invalid format '{s}'. Valid options: json, msgpack"))
}
