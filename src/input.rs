//! Input file parsing
//!
//! The format is an adjacency matrix followed by optional `#`-headed
//! sections. The matrix comes first: a node count N, then N*N
//! whitespace-separated 0/1 entries. Section entries are `LABEL:value`
//! pairs, one per line, where labels are the letters A, B, C, ... in
//! junction order.

use std::fs;
use std::path::Path;

use anyhow::{bail, Context, Result};
use log::debug;

use crate::simulation::{JunctionId, NetworkSpec};

const SECTION_CAPACITIES: &str = "Node Capacities";
const SECTION_CONTROLLERS: &str = "Traffic Controller Nodes";
const SECTION_REGULAR: &str = "Initial Traffic Allocation";
const SECTION_AMBULANCES: &str = "Ambulances";
const SECTION_FIRE_TRUCKS: &str = "Fire Trucks";
const SECTION_DESTINATIONS: &str = "Destination Nodes";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Section {
    Capacities,
    Controllers,
    Regular,
    Ambulances,
    FireTrucks,
    Destinations,
}

/// Load and parse a network description file.
pub fn load_network_spec(path: &Path) -> Result<NetworkSpec> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("failed to read network file {}", path.display()))?;
    parse_network_spec(&text)
        .with_context(|| format!("failed to parse network file {}", path.display()))
}

/// Parse a network description from text.
pub fn parse_network_spec(text: &str) -> Result<NetworkSpec> {
    let mut lines = text.lines();

    let mut tokens: Vec<&str> = Vec::new();
    let mut matrix_lines = 0;
    for line in lines.by_ref() {
        matrix_lines += 1;
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        if line.starts_with('#') {
            bail!("section header before the adjacency matrix was complete");
        }
        tokens.extend(line.split_whitespace());

        if let Some(&first) = tokens.first() {
            let n: usize = first
                .parse()
                .with_context(|| format!("invalid node count {:?}", first))?;
            if tokens.len() >= 1 + n * n {
                break;
            }
        }
        // Guard against files that never supply enough entries.
        if matrix_lines > 4096 {
            bail!("adjacency matrix is incomplete");
        }
    }

    let Some(&first) = tokens.first() else {
        bail!("empty network file");
    };
    let n: usize = first.parse()?;
    if n == 0 {
        bail!("node count must be positive");
    }
    if tokens.len() < 1 + n * n {
        bail!(
            "adjacency matrix needs {} entries, found {}",
            n * n,
            tokens.len() - 1
        );
    }

    let mut matrix = vec![vec![0u32; n]; n];
    for row in 0..n {
        for col in 0..n {
            let token = tokens[1 + row * n + col];
            matrix[row][col] = token
                .parse()
                .with_context(|| format!("invalid matrix entry {:?} at ({}, {})", token, row, col))?;
        }
    }

    let mut spec = NetworkSpec::new(matrix);
    let mut section = None;

    for line in lines {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        if let Some(header) = line.strip_prefix('#') {
            let header = header.trim();
            section = Some(match header {
                SECTION_CAPACITIES => Section::Capacities,
                SECTION_CONTROLLERS => Section::Controllers,
                SECTION_REGULAR => Section::Regular,
                SECTION_AMBULANCES => Section::Ambulances,
                SECTION_FIRE_TRUCKS => Section::FireTrucks,
                SECTION_DESTINATIONS => Section::Destinations,
                other => bail!("unknown section header {:?}", other),
            });
            continue;
        }

        let Some(section) = section else {
            bail!("entry {:?} appears outside any section", line);
        };

        match section {
            Section::Controllers => {
                for label in line.split(',') {
                    spec.controllers.insert(parse_junction(label.trim(), n)?);
                }
            }
            Section::Capacities => {
                let (junction, value) = parse_entry(line, n)?;
                let capacity: usize = value
                    .parse()
                    .with_context(|| format!("invalid capacity {:?}", value))?;
                spec.capacities.insert(junction, capacity);
            }
            Section::Regular => {
                let (junction, value) = parse_entry(line, n)?;
                let count: usize = value
                    .parse()
                    .with_context(|| format!("invalid vehicle count {:?}", value))?;
                spec.regular.insert(junction, count);
            }
            Section::Ambulances => {
                let (junction, value) = parse_entry(line, n)?;
                let count: usize = value
                    .parse()
                    .with_context(|| format!("invalid ambulance count {:?}", value))?;
                spec.ambulances.insert(junction, count);
            }
            Section::FireTrucks => {
                let (junction, value) = parse_entry(line, n)?;
                let count: usize = value
                    .parse()
                    .with_context(|| format!("invalid fire truck count {:?}", value))?;
                spec.fire_trucks.insert(junction, count);
            }
            Section::Destinations => {
                let (junction, value) = parse_entry(line, n)?;
                let destination = parse_junction(value, n)?;
                spec.destinations.insert(junction, destination);
            }
        }
    }

    debug!(
        "parsed network of {} nodes, {} controller(s), {} destination(s)",
        n,
        spec.controllers.len(),
        spec.destinations.len()
    );
    Ok(spec)
}

fn parse_entry(line: &str, node_count: usize) -> Result<(JunctionId, &str)> {
    let Some((label, value)) = line.split_once(':') else {
        bail!("entry {:?} is not a LABEL:value pair", line);
    };
    Ok((parse_junction(label.trim(), node_count)?, value.trim()))
}

fn parse_junction(label: &str, node_count: usize) -> Result<JunctionId> {
    let mut chars = label.chars();
    let (Some(letter), None) = (chars.next(), chars.next()) else {
        bail!("invalid junction label {:?}", label);
    };
    let Some(junction) = JunctionId::from_label(letter) else {
        bail!("invalid junction label {:?}", label);
    };
    if junction.0 >= node_count {
        bail!(
            "junction label {:?} is out of range for {} nodes",
            label,
            node_count
        );
    }
    Ok(junction)
}
