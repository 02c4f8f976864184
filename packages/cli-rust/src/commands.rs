use std::io::{self, Read, Write};
use std::path::Path;

use anyhow::{Context, Result};
use catalog_criteria::{
    catalog, CriterionModifier, EntityType, FilterSerializer, ModifierSet, SerializerConfig,
    WireFormat,
};
use serde::Serialize;
use tracing::info;

use crate::cli::{Cli, Commands};

/// Runs the parsed command, writing its output to stdout.
pub fn run(cli: Cli) -> Result<()> {
    let stdout = io::stdout();
    let mut out = stdout.lock();
    match cli.command {
        Commands::Fields { json } => fields(cli.entity, json, &mut out),
        Commands::Normalize { from, to, input } => {
            let bytes = read_input(input.as_deref())?;
            let config = SerializerConfig {
                entity: cli.entity,
                format: from,
            };
            normalize(config, to.unwrap_or(from), &bytes, &mut out)
        }
    }
}

// ---------------------------------------------------------------------------
// fields
// ---------------------------------------------------------------------------

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct FieldRow {
    field_id: &'static str,
    label: &'static str,
    parameter_name: &'static str,
    shape: &'static str,
    modifiers: Vec<&'static str>,
}

fn field_rows(entity: EntityType) -> Result<Vec<FieldRow>> {
    catalog::criterion_options(entity)
        .into_iter()
        .map(|option| {
            let field = catalog::field(option.field_id)?;
            Ok(FieldRow {
                field_id: field.id,
                label: option.label,
                parameter_name: field.parameter_name,
                shape: field.shape.name(),
                modifiers: ModifierSet::legal_for(field.shape)
                    .iter()
                    .map(CriterionModifier::as_str)
                    .collect(),
            })
        })
        .collect()
}

fn fields(entity: EntityType, json: bool, out: &mut impl Write) -> Result<()> {
    let rows = field_rows(entity)?;
    if json {
        serde_json::to_writer_pretty(&mut *out, &rows).context("writing field list")?;
        writeln!(out)?;
        return Ok(());
    }
    for row in &rows {
        writeln!(
            out,
            "{:<20} {:<18} {:<16} {:<16} {}",
            row.field_id,
            row.label,
            row.parameter_name,
            row.shape,
            row.modifiers.join(",")
        )?;
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// normalize
// ---------------------------------------------------------------------------

fn read_input(path: Option<&Path>) -> Result<Vec<u8>> {
    match path {
        Some(path) => {
            std::fs::read(path).with_context(|| format!("reading {}", path.display()))
        }
        None => {
            let mut bytes = Vec::new();
            io::stdin()
                .read_to_end(&mut bytes)
                .context("reading filter from stdin")?;
            Ok(bytes)
        }
    }
}

fn normalize(
    config: SerializerConfig,
    to: WireFormat,
    bytes: &[u8],
    out: &mut impl Write,
) -> Result<()> {
    let hydration = FilterSerializer::new(config)
        .decode(bytes)
        .with_context(|| format!("decoding {} filter", config.format))?;
    info!(
        entity = %config.entity,
        kept = hydration.criteria.len(),
        dropped = hydration.dropped.len(),
        "normalized filter"
    );

    let output = FilterSerializer::new(SerializerConfig { format: to, ..config })
        .encode(&hydration.criteria)
        .with_context(|| format!("encoding {to} filter"))?;
    out.write_all(&output)?;
    if to == WireFormat::Json {
        writeln!(out)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use catalog_criteria::wire;

    use super::*;

    #[test]
    fn fields_table_lists_picker_entries() {
        let mut out = Vec::new();
        fields(EntityType::Tag, false, &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), EntityType::Tag.field_ids().len());
        assert!(lines[0].starts_with("name"));
        assert!(text.contains("is_missing"));
    }

    #[test]
    fn fields_json_carries_modifiers() {
        let mut out = Vec::new();
        fields(EntityType::Scene, true, &mut out).unwrap();
        let rows: serde_json::Value = serde_json::from_slice(&out).unwrap();
        let duration = rows
            .as_array()
            .unwrap()
            .iter()
            .find(|row| row["fieldId"] == "duration")
            .unwrap();
        assert_eq!(duration["shape"], "duration");
        assert_eq!(duration["modifiers"][0], "EQUALS");
    }

    #[test]
    fn normalize_drops_unusable_terms() {
        let input = br#"{
            "rating": {"modifier": "Equals", "value": "4"},
            "sound_quality": {"modifier": "EQUALS", "value": "good"},
            "duration": {"modifier": "LESS_THAN", "value": "2:00"}
        }"#;
        let mut out = Vec::new();
        normalize(SerializerConfig::default(), WireFormat::Json, input, &mut out).unwrap();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "{\"rating\":{\"modifier\":\"EQUALS\",\"value\":{\"exact\":4}},\
             \"duration\":{\"modifier\":\"LESS_THAN\",\"value\":{\"upper\":120}}}\n"
        );
    }

    #[test]
    fn normalize_converts_between_formats() {
        let input = br#"{"tags": {"modifier": "EXCLUDES", "value": ["3", "3", "9"]}}"#;
        let config = SerializerConfig {
            entity: EntityType::Performer,
            format: WireFormat::Json,
        };
        let mut out = Vec::new();
        normalize(config, WireFormat::MsgPack, input, &mut out).unwrap();
        let filter = wire::decode(&out, WireFormat::MsgPack).unwrap();
        assert_eq!(
            serde_json::to_string(&filter).unwrap(),
            r#"{"tags":{"modifier":"EXCLUDES","value":["3","9"]}}"#
        );
    }

    #[test]
    fn normalize_reports_undecodable_input() {
        let mut out = Vec::new();
        let err = normalize(
            SerializerConfig::default(),
            WireFormat::Json,
            b"rating=4",
            &mut out,
        )
        .unwrap_err();
        assert_eq!(err.to_string(), "decoding json filter");
        assert!(out.is_empty());
    }

    #[test]
    fn reads_filter_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(br#"{"organized": {"modifier": "EQUALS", "value": true}}"#)
            .unwrap();
        let bytes = read_input(Some(file.path())).unwrap();
        let mut out = Vec::new();
        normalize(SerializerConfig::default(), WireFormat::Json, &bytes, &mut out).unwrap();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "{\"organized\":{\"modifier\":\"EQUALS\",\"value\":true}}\n"
        );
    }

    #[test]
    fn missing_input_file_names_the_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.json");
        let err = read_input(Some(&path)).unwrap_err();
        assert!(err.to_string().contains("absent.json"));
    }
}
