//! ISO 10303-21 serialization
//!
//! Renders the header section and every arena record, in identifier order,
//! as one `#id=ENTITY(...);` line each.

use crate::arena::EntityArena;
use crate::entity::step_string;
use std::fmt::Write;

/// File header contents.
#[derive(Debug, Clone, PartialEq)]
pub struct StepHeader {
    /// Human-readable description lines
    pub description: Vec<String>,
    pub file_name: String,
    /// ISO 8601 timestamp
    pub timestamp: String,
    pub originating_system: String,
}

impl StepHeader {
    pub fn new(file_name: impl Into<String>) -> Self {
        Self {
            description: Vec::new(),
            file_name: file_name.into(),
            timestamp: chrono::Utc::now().format("%Y-%m-%dT%H:%M:%S").to_string(),
            originating_system: format!("foamkit-brep {}", env!("CARGO_PKG_VERSION")),
        }
    }

    pub fn describe(mut self, line: impl Into<String>) -> Self {
        self.description.push(line.into());
        self
    }
}

/// Serialize the header and all records into one document.
pub fn write_document(header: &StepHeader, arena: &EntityArena) -> String {
    let mut out = String::with_capacity(64 * (arena.len() + 16));

    let description = if header.description.is_empty() {
        step_string("")
    } else {
        header
            .description
            .iter()
            .map(|line| step_string(line))
            .collect::<Vec<_>>()
            .join(",")
    };

    out.push_str("ISO-10303-21;\n");
    out.push_str("HEADER;\n");
    let _ = writeln!(out, "FILE_DESCRIPTION(({}),'2;1');", description);
    let _ = writeln!(
        out,
        "FILE_NAME({},{},(''),(''),{},{},'');",
        step_string(&header.file_name),
        step_string(&header.timestamp),
        step_string(&header.originating_system),
        step_string(&header.originating_system)
    );
    out.push_str("FILE_SCHEMA(('AUTOMOTIVE_DESIGN { 1 0 10303 214 1 1 1 1 }'));\n");
    out.push_str("ENDSEC;\n");
    out.push_str("DATA;\n");
    for (id, entity) in arena.iter() {
        let _ = writeln!(out, "{}={};", id, entity.render());
    }
    out.push_str("ENDSEC;\n");
    out.push_str("END-ISO-10303-21;\n");
    out
}
