use anyhow::Result;
use serde::Serialize;

use libseek_core::seekers::{default_seeker_registry, SeekerRegistry};

#[derive(Debug, Serialize)]
pub struct SeekerInfo {
    pub name: String,
}

/// Names of the seekers known to this binary, sorted.
pub fn seeker_infos(registry: &SeekerRegistry) -> Vec<SeekerInfo> {
    registry.names().into_iter().map(|name| SeekerInfo { name }).collect()
}

/// List the library seekers compiled into this binary.
pub fn list_seekers_command(json: bool) -> Result<()> {
    let entries = seeker_infos(&default_seeker_registry());

    if json {
        println!("{}", serde_json::to_string_pretty(&entries)?);
        return Ok(());
    }

    if entries.is_empty() {
        println!("Seekers: (none)");
        return Ok(());
    }

    println!("Seekers:");
    for entry in entries {
        println!("- {}", entry.name);
    }

    Ok(())
}
