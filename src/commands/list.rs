use crate::error::Result;
use crate::forge::PackageForge;
use crate::ui as output;
use crate::utils::machine_output::{self, OutputFormat};
use serde::Serialize;

pub struct ListOptions {
    pub filter: Option<String>,
    pub format: Option<OutputFormat>,
}

#[derive(Debug, Serialize)]
struct ListData<'a> {
    backend: String,
    refreshed_at: String,
    count: usize,
    lines: Vec<&'a String>,
}

pub fn run(forge: &mut PackageForge, options: ListOptions) -> Result<()> {
    let snapshot = forge.list_installed()?;
    let pattern = options.filter.as_deref().unwrap_or("");
    let lines: Vec<&String> = snapshot.filter(pattern).collect();

    if let Some(format) = options.format {
        let data = ListData {
            backend: forge.backend().to_string(),
            refreshed_at: snapshot.refreshed_at().to_rfc3339(),
            count: lines.len(),
            lines,
        };
        return machine_output::emit_v1("list", data, vec![], vec![], format);
    }

    for line in &lines {
        println!("{}", line);
    }

    if options.filter.is_some() {
        output::info(&format!(
            "{} of {} lines match '{}'",
            lines.len(),
            snapshot.len(),
            pattern
        ));
    }

    Ok(())
}
