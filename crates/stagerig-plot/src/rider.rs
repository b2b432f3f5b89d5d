//! Printable technical rider.
//!
//! A self-contained HTML page: equipment count, rigging and power
//! figures, the full patch table, and an optional reference to the
//! exported stage image. The page carries its own stylesheet so it
//! prints cleanly without external assets.

use chrono::Local;

use crate::plot_state::PlotState;

const STYLE: &str = "\
body{font-family:sans-serif;margin:2em;color:#0f172a}\
h1{font-size:1.6em;border-bottom:2px solid #0f172a;padding-bottom:.3em}\
h2{font-size:1.1em;margin-top:1.6em}\
table{border-collapse:collapse;width:100%;margin-top:.5em}\
th,td{border:1px solid #cbd5e1;padding:.35em .6em;text-align:left;font-size:.9em}\
th{background:#f1f5f9}\
.meta{color:#64748b;font-size:.85em}\
img{max-width:100%;margin-top:1em;border:1px solid #cbd5e1}\
@media print{body{margin:0}}";

/// Renders the rider as a standalone HTML document.
///
/// `image_href` is an optional relative path to the exported stage image,
/// typically written next to the rider file.
pub fn render_rider(state: &PlotState, image_href: Option<&str>) -> String {
    let mut html = String::with_capacity(4096);
    html.push_str("<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n");
    html.push_str(&format!("<title>{}</title>\n", escape(&state.title)));
    html.push_str(&format!("<style>{STYLE}</style>\n</head>\n<body>\n"));

    html.push_str(&format!("<h1>{}</h1>\n", escape(&state.title)));
    html.push_str(&format!(
        "<p class=\"meta\">Generated {}</p>\n",
        Local::now().format("%Y-%m-%d %H:%M")
    ));

    if let Some(href) = image_href {
        html.push_str(&format!(
            "<img src=\"{}\" alt=\"Stage plot\">\n",
            escape(href)
        ));
    }

    html.push_str("<h2>Equipment</h2>\n<table>\n");
    html.push_str("<tr><th>Qty</th><th>Fixture</th><th>Mode</th><th>Power</th></tr>\n");
    for line in state.equipment_summary() {
        html.push_str(&format!(
            "<tr><td>{}</td><td>{}</td><td>{}</td><td>{:.0} W</td></tr>\n",
            line.count,
            escape(&line.name),
            escape(line.mode.as_deref().unwrap_or("—")),
            line.total_power_w,
        ));
    }
    html.push_str("</table>\n");

    let universes = state.universes_in_use();
    let universe_list = if universes.is_empty() {
        "—".to_string()
    } else {
        universes
            .iter()
            .map(u16::to_string)
            .collect::<Vec<_>>()
            .join(", ")
    };
    html.push_str("<h2>Rigging and power</h2>\n<table>\n");
    html.push_str(&format!(
        "<tr><th>Hanging bars</th><td>{}</td></tr>\n",
        state.bar_count()
    ));
    html.push_str(&format!(
        "<tr><th>Total connected load</th><td>{:.1} kW</td></tr>\n",
        state.total_power_w() / 1000.0
    ));
    html.push_str(&format!(
        "<tr><th>DMX universes</th><td>{universe_list}</td></tr>\n"
    ));
    html.push_str("</table>\n");

    html.push_str("<h2>Patch</h2>\n<table>\n");
    html.push_str(
        "<tr><th>No</th><th>Fixture</th><th>Mode</th><th>Universe</th>\
         <th>Address</th><th>Channels</th></tr>\n",
    );
    let mut fixtures: Vec<_> = state.items.iter().filter(|i| i.is_fixture()).collect();
    fixtures.sort_by_key(|i| i.number.map_or(u32::MAX, |n| n));
    for item in fixtures {
        html.push_str(&format!(
            "<tr><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td></tr>\n",
            item.number.map_or_else(|| "—".to_string(), |n| n.to_string()),
            escape(&item.name),
            escape(item.mode.as_deref().unwrap_or("—")),
            item.universe.map_or_else(|| "—".to_string(), |u| u.to_string()),
            item.address.map_or_else(|| "—".to_string(), |a| a.to_string()),
            item.channel_count(),
        ));
    }
    html.push_str("</table>\n</body>\n</html>\n");
    html
}

fn escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}
