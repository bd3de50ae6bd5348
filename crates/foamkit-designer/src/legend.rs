//! Legend overlay
//!
//! The legend (quote, block size, material, cavity count) lives in its own
//! `<g id="foamkit-legend">` group on top of the geometry. Applying a legend
//! first removes every overlay group already present, so regenerating a
//! drawing never accumulates stale legends.

use crate::drawing::{escape, n};
use foamkit_core::{format_length, LengthUnit};
use foamkit_layout::CanonicalLayout;
use std::fmt::Write;

/// Id of the legend group
pub const LEGEND_ID: &str = "foamkit-legend";

/// Group ids treated as removable overlays
pub const OVERLAY_IDS: &[&str] = &[LEGEND_ID, "foamkit-annotations"];

const LINE_HEIGHT: f64 = 13.0;
const CHAR_WIDTH: f64 = 6.5;

/// Legend contents.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Legend {
    pub quote_id: String,
    pub material: Option<String>,
    /// Length, width, thickness in inches
    pub block: Option<(f64, f64, f64)>,
    pub cavity_count: Option<usize>,
}

impl Legend {
    pub fn new(quote_id: impl Into<String>) -> Self {
        Self {
            quote_id: quote_id.into(),
            ..Self::default()
        }
    }

    /// Legend describing `layout`
    pub fn for_layout(quote_id: impl Into<String>, layout: &CanonicalLayout) -> Self {
        Self {
            quote_id: quote_id.into(),
            material: None,
            block: Some((layout.block.length, layout.block.width, layout.block.thickness)),
            cavity_count: Some(layout.cavity_count()),
        }
    }

    pub fn with_material(mut self, material: impl Into<String>) -> Self {
        let material = material.into();
        self.material = (!material.trim().is_empty()).then_some(material);
        self
    }

    pub fn lines(&self) -> Vec<String> {
        let mut lines = vec![format!("Quote: {}", self.quote_id)];
        if let Some((l, w, t)) = self.block {
            let fmt = |v| format_length(v, LengthUnit::Inch);
            lines.push(format!("Block: {} × {} × {} in", fmt(l), fmt(w), fmt(t)));
        }
        if let Some(material) = &self.material {
            lines.push(format!("Material: {}", material));
        }
        if let Some(count) = self.cavity_count {
            lines.push(format!("Cavities: {}", count));
        }
        lines
    }

    /// Overlay group markup, one line per element
    pub fn render(&self) -> String {
        let lines = self.lines();
        let widest = lines.iter().map(|l| l.chars().count()).max().unwrap_or(0) as f64;

        let mut out = String::new();
        let _ = writeln!(
            out,
            "  <g id=\"{}\" font-family=\"sans-serif\" font-size=\"11\">",
            LEGEND_ID
        );
        let _ = writeln!(
            out,
            "    <rect x=\"2\" y=\"2\" width=\"{}\" height=\"{}\" fill=\"#ffffff\" fill-opacity=\"0.85\" stroke=\"none\"/>",
            n(widest * CHAR_WIDTH + 8.0),
            n(lines.len() as f64 * LINE_HEIGHT + 6.0)
        );
        for (i, line) in lines.iter().enumerate() {
            let _ = writeln!(
                out,
                "    <text x=\"6\" y=\"{}\">{}</text>",
                n(2.0 + LINE_HEIGHT * (i as f64 + 1.0)),
                escape(line)
            );
        }
        out.push_str("  </g>\n");
        out
    }
}

/// Replace any overlay groups in `svg` with a fresh legend.
pub fn apply_legend(svg: &str, legend: &Legend) -> String {
    let mut out = strip_annotations(svg);
    let group = legend.render();
    match out.rfind("</svg>") {
        Some(pos) => out.insert_str(pos, &group),
        None => out.push_str(&group),
    }
    out
}

/// Remove every overlay group, nested groups included.
pub fn strip_annotations(svg: &str) -> String {
    let mut out = svg.to_string();
    while let Some((start, end)) = find_overlay(&out) {
        out.replace_range(start..end, "");
    }
    out
}

/// Byte range of the first overlay group, widened to whole lines when the
/// group sits on its own lines.
fn find_overlay(svg: &str) -> Option<(usize, usize)> {
    let start = OVERLAY_IDS
        .iter()
        .filter_map(|id| find_group_open(svg, id))
        .min()?;
    let end = matching_close(svg, start)?;

    let line_start = svg[..start].rfind('\n').map_or(0, |p| p + 1);
    let start = if svg[line_start..start].trim().is_empty() {
        line_start
    } else {
        start
    };
    let end = if svg[end..].starts_with('\n') { end + 1 } else { end };
    Some((start, end))
}

fn find_group_open(svg: &str, id: &str) -> Option<usize> {
    let needle = format!("id=\"{}\"", id);
    let mut search = 0;
    while let Some(offset) = svg[search..].find("<g") {
        let tag_start = search + offset;
        let tag_end = tag_start + svg[tag_start..].find('>')?;
        let tag = &svg[tag_start..tag_end];
        let is_group = tag[2..].starts_with(|c: char| c.is_whitespace());
        if is_group && tag.contains(&needle) {
            return Some(tag_start);
        }
        search = tag_end;
    }
    None
}

/// End (exclusive) of the `</g>` closing the group opened at `open`.
fn matching_close(svg: &str, open: usize) -> Option<usize> {
    let mut depth = 0usize;
    let mut pos = open;
    loop {
        let next_open = svg[pos..].find("<g").map(|p| pos + p);
        let next_close = svg[pos..].find("</g>").map(|p| pos + p)?;
        match next_open {
            Some(o) if o < next_close => {
                let tag_end = o + svg[o..].find('>')?;
                let is_group = svg[o + 2..].starts_with(|c: char| c.is_whitespace() || c == '>');
                if is_group && !svg[o..tag_end].ends_with('/') {
                    depth += 1;
                }
                pos = tag_end + 1;
            }
            _ => {
                depth = depth.checked_sub(1)?;
                pos = next_close + "</g>".len();
                if depth == 0 {
                    return Some(pos);
                }
            }
        }
    }
}
