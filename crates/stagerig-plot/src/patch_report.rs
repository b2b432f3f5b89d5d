//! Patch sheet export: one CSV row per fixture.
//!
//! The sheet uses `;` as separator and opens with a UTF-8 BOM so
//! spreadsheet tools that sniff encodings import it cleanly. Rows are
//! sorted by display number; positions are rounded to whole pixels.

use std::fmt::Write as _;

use stagerig_core::error::ImportError;

use crate::item::Item;

const HEADER: &str = "No;UID;Type;Mode;Universe;Address;Channels;Power(W);X;Y;Rot";

/// One parsed row of a patch sheet.
#[derive(Debug, Clone, PartialEq)]
pub struct PatchRow {
    pub seq: String,
    pub uid: String,
    pub name: String,
    pub mode: String,
    pub universe: Option<u16>,
    pub address: Option<u16>,
    pub channels: Option<u16>,
    pub power_w: Option<f64>,
    pub x: i64,
    pub y: i64,
    pub rotation: i64,
}

/// Renders the patch sheet for every fixture, in display-number order.
///
/// The first column shows the fixture's marker when one is set, otherwise
/// its display number. Bars never appear.
pub fn to_csv(items: &[Item]) -> String {
    let mut fixtures: Vec<&Item> = items.iter().filter(|i| i.is_fixture()).collect();
    fixtures.sort_by_key(|i| i.number.map_or(u32::MAX, |n| n));

    let mut out = String::new();
    out.push('\u{feff}');
    out.push_str(HEADER);
    out.push('\n');

    for item in fixtures {
        let seq = item
            .marker
            .or(item.number)
            .map_or_else(String::new, |n| n.to_string());
        let _ = writeln!(
            out,
            "{seq};{uid};{name};{mode};{universe};{address};{channels};{power};{x};{y};{rot}",
            uid = item.uid,
            name = item.name,
            mode = item.mode.as_deref().unwrap_or(""),
            universe = opt(item.universe),
            address = opt(item.address),
            channels = opt(item.channels),
            power = item.power_w.map_or_else(String::new, |p| p.to_string()),
            x = item.x.round() as i64,
            y = item.y.round() as i64,
            rot = item.rotation.round() as i64,
        );
    }
    out
}

fn opt(v: Option<u16>) -> String {
    v.map_or_else(String::new, |n| n.to_string())
}

/// Parses a patch sheet back into rows. Tolerates a missing BOM.
pub fn from_csv(csv: &str) -> Result<Vec<PatchRow>, ImportError> {
    let csv = csv.strip_prefix('\u{feff}').unwrap_or(csv);
    let mut lines = csv.lines();

    match lines.next() {
        Some(h) if h == HEADER => {}
        other => {
            return Err(ImportError::Malformed {
                context: "parsing patch sheet".to_string(),
                reason: format!("unexpected header: {:?}", other.unwrap_or("")),
            })
        }
    }

    let mut rows = Vec::new();
    for (n, line) in lines.enumerate() {
        if line.is_empty() {
            continue;
        }
        let fields: Vec<&str> = line.split(';').collect();
        if fields.len() != 11 {
            return Err(ImportError::Malformed {
                context: "parsing patch sheet".to_string(),
                reason: format!("row {}: expected 11 fields, got {}", n + 2, fields.len()),
            });
        }
        rows.push(PatchRow {
            seq: fields[0].to_string(),
            uid: fields[1].to_string(),
            name: fields[2].to_string(),
            mode: fields[3].to_string(),
            universe: parse_opt(fields[4], n)?,
            address: parse_opt(fields[5], n)?,
            channels: parse_opt(fields[6], n)?,
            power_w: parse_opt(fields[7], n)?,
            x: parse_num(fields[8], n)?,
            y: parse_num(fields[9], n)?,
            rotation: parse_num(fields[10], n)?,
        });
    }
    Ok(rows)
}

fn parse_opt<T: std::str::FromStr>(field: &str, row: usize) -> Result<Option<T>, ImportError> {
    if field.is_empty() {
        return Ok(None);
    }
    field.parse().map(Some).map_err(|_| ImportError::Malformed {
        context: "parsing patch sheet".to_string(),
        reason: format!("row {}: invalid number '{}'", row + 2, field),
    })
}

fn parse_num(field: &str, row: usize) -> Result<i64, ImportError> {
    field.parse().map_err(|_| ImportError::Malformed {
        context: "parsing patch sheet".to_string(),
        reason: format!("row {}: invalid coordinate '{}'", row + 2, field),
    })
}
