use crate::error::{PackforgeError, Result};
use chrono::Utc;
use clap::ValueEnum;
use serde::Serialize;

/// Machine-readable output formats for query commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Json,
    Yaml,
}

#[derive(Debug, Serialize)]
pub struct MachineEnvelope<T>
where
    T: Serialize,
{
    pub version: String,
    pub command: String,
    pub ok: bool,
    pub data: T,
    pub warnings: Vec<String>,
    pub errors: Vec<String>,
    pub meta: MachineMeta,
}

#[derive(Debug, Serialize)]
pub struct MachineMeta {
    pub generated_at: String,
}

pub fn envelope_v1<T>(
    command: &str,
    data: T,
    warnings: Vec<String>,
    errors: Vec<String>,
) -> MachineEnvelope<T>
where
    T: Serialize,
{
    MachineEnvelope {
        version: "v1".to_string(),
        command: command.to_string(),
        ok: errors.is_empty(),
        data,
        warnings,
        errors,
        meta: MachineMeta {
            generated_at: Utc::now().to_rfc3339(),
        },
    }
}

pub fn render<T>(envelope: &MachineEnvelope<T>, format: OutputFormat) -> Result<String>
where
    T: Serialize,
{
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(envelope)?),
        OutputFormat::Yaml => serde_yml::to_string(envelope).map_err(PackforgeError::from),
    }
}

pub fn emit_v1<T>(
    command: &str,
    data: T,
    warnings: Vec<String>,
    errors: Vec<String>,
    format: OutputFormat,
) -> Result<()>
where
    T: Serialize,
{
    let envelope = envelope_v1(command, data, warnings, errors);
    println!("{}", render(&envelope, format)?);
    Ok(())
}
