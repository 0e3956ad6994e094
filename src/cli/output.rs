//! Rendering query results: aligned tables and machine-readable JSON.

use anyhow::Result;

use crate::index::PackageRecord;
use crate::utils::file_url_to_path;

/// Location column for one record: the stored URL, or its local path when
/// the caller asked for paths. Non-file URLs render empty in path mode.
pub fn render_location(record: &PackageRecord, as_path: bool) -> String {
    if as_path {
        file_url_to_path(&record.url).map(|p| p.display().to_string()).unwrap_or_default()
    } else {
        record.url.clone()
    }
}

/// Print records as `Name Format Url` rows, or as a JSON array of the full
/// record fields.
pub fn print_packages(packages: &[PackageRecord], json: bool, as_path: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string(packages)?);
        return Ok(());
    }

    let rows: Vec<[String; 3]> = packages
        .iter()
        .map(|p| [p.name.clone(), p.format.to_string(), render_location(p, as_path)])
        .collect();
    print_table(["Name", "Format", "Url"], &rows);

    Ok(())
}

/// Fixed-width table: header, dashed rule, then rows, columns padded to the
/// widest cell.
pub fn print_table<const N: usize>(headers: [&str; N], rows: &[[String; N]]) {
    let mut widths = headers.map(str::len);
    for row in rows {
        for (width, cell) in widths.iter_mut().zip(row.iter()) {
            *width = (*width).max(cell.len());
        }
    }

    let line = |cells: [&str; N]| {
        let mut out = String::new();
        for (i, (cell, width)) in cells.iter().zip(widths.iter()).enumerate() {
            if i > 0 {
                out.push_str("  ");
            }
            out.push_str(&format!("{cell:<width$}"));
        }
        out.trim_end().to_string()
    };

    println!("{}", line(headers));
    let rule = widths.map(|w| "-".repeat(w));
    println!("{}", line(rule.each_ref().map(String::as_str)));
    for row in rows {
        println!("{}", line(row.each_ref().map(String::as_str)));
    }
}
