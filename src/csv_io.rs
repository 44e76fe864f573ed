//! CSV I/O - Load and save data from/to delimited files
//!
//! This module handles the two flat files the desk works with:
//! the flight-delay reference export and the append-only order record.

use std::borrow::Cow;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use std::time::Duration;

use anyhow::{Context, Result, bail};

use crate::config::ReferenceColumns;
use crate::core_types::{MealCode, normalize_flight_number};
use crate::models::{FlightDelayRecord, Order};

// ============================================================
// Line Splitting
// ============================================================

/// Split one CSV line into trimmed fields.
///
/// Handles double-quoted fields with `""` as an escaped quote, which is what
/// spreadsheet exports produce for cells containing commas.
pub fn split_csv_line(line: &str) -> Vec<String> {
    let mut fields = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;
    let mut chars = line.trim_end_matches(['\r', '\n']).chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '"' if in_quotes => {
                if chars.peek() == Some(&'"') {
                    current.push('"');
                    chars.next();
                } else {
                    in_quotes = false;
                }
            }
            '"' => in_quotes = true,
            ',' if !in_quotes => {
                fields.push(current.trim().to_string());
                current.clear();
            }
            _ => current.push(c),
        }
    }
    fields.push(current.trim().to_string());
    fields
}

/// Parse a delay in `HH:MM:SS` form. Hours may exceed 23.
pub fn parse_delay(raw: &str) -> Result<Duration> {
    let parts: Vec<&str> = raw.trim().split(':').collect();
    if parts.len() != 3 {
        bail!("expected HH:MM:SS, got {:?}", raw);
    }
    let hours: u64 = parts[0]
        .parse()
        .with_context(|| format!("Invalid hours in {:?}", raw))?;
    let minutes: u64 = parts[1]
        .parse()
        .with_context(|| format!("Invalid minutes in {:?}", raw))?;
    let seconds: u64 = parts[2]
        .parse()
        .with_context(|| format!("Invalid seconds in {:?}", raw))?;
    if minutes > 59 || seconds > 59 {
        bail!("minutes/seconds out of range in {:?}", raw);
    }
    Ok(Duration::from_secs(hours * 3600 + minutes * 60 + seconds))
}

// ============================================================
// Reference Table Loading
// ============================================================

/// Result of reading the reference export
#[derive(Debug, Default)]
pub struct ReferenceLoad {
    pub records: Vec<FlightDelayRecord>,
    /// Data rows that were dropped (bad delay, missing cells)
    pub skipped: usize,
}

fn column_index(header: &[String], name: &str) -> Result<usize> {
    header
        .iter()
        .position(|h| h.eq_ignore_ascii_case(name.trim()))
        .with_context(|| format!("Missing column {:?} in reference header", name))
}

/// Load flight-delay rows from a CSV export with a header row.
///
/// Columns are located by header name, so extra columns and any column order
/// are fine. Rows with a bad delay are skipped and counted.
pub fn load_flight_records(path: &Path, columns: &ReferenceColumns) -> Result<ReferenceLoad> {
    let file = File::open(path).with_context(|| format!("Failed to open {}", path.display()))?;
    let mut lines = BufReader::new(file).lines();

    let header_line = lines
        .next()
        .transpose()?
        .with_context(|| format!("{} is empty", path.display()))?;
    // Sheets exports may lead with a UTF-8 BOM
    let header = split_csv_line(header_line.trim_start_matches('\u{feff}'));

    let flight_idx = column_index(&header, &columns.flight_number)?;
    let origin_idx = column_index(&header, &columns.origin)?;
    let destination_idx = column_index(&header, &columns.destination)?;
    let delay_idx = column_index(&header, &columns.delay)?;
    let needed = flight_idx.max(origin_idx).max(destination_idx).max(delay_idx) + 1;

    let mut load = ReferenceLoad::default();
    for (line_num, line) in lines.enumerate() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        let fields = split_csv_line(&line);
        if fields.len() < needed {
            tracing::warn!(
                "[REFERENCE] line {}: expected at least {} fields, got {}",
                line_num + 2,
                needed,
                fields.len()
            );
            load.skipped += 1;
            continue;
        }

        let delay_duration = match parse_delay(&fields[delay_idx]) {
            Ok(d) => d,
            Err(e) => {
                tracing::warn!("[REFERENCE] line {}: {:#}", line_num + 2, e);
                load.skipped += 1;
                continue;
            }
        };

        load.records.push(FlightDelayRecord {
            flight_number: normalize_flight_number(&fields[flight_idx]),
            origin: fields[origin_idx].to_ascii_uppercase(),
            destination: fields[destination_idx].to_ascii_uppercase(),
            delay_duration,
        });
    }

    Ok(load)
}

// ============================================================
// Order Record
// ============================================================

/// Quote a field holding a delimiter, a quote or a line break.
///
/// Inner quotes are doubled, which is what [`split_csv_line`] reads back.
fn quote_field(field: &str) -> Cow<'_, str> {
    if field.contains([',', '"', '\n', '\r']) {
        Cow::Owned(format!("\"{}\"", field.replace('"', "\"\"")))
    } else {
        Cow::Borrowed(field)
    }
}

/// Serialize an order to its record line (with trailing newline).
pub fn order_to_csv_line(order: &Order) -> String {
    format!(
        "{},{},{},{},{},{}\n",
        quote_field(&order.passenger_id),
        quote_field(&order.flight_number),
        quote_field(&order.departure_datetime),
        quote_field(&order.origin),
        quote_field(&order.destination),
        order.meal_code,
    )
}

/// Parse one record line back into an order
pub fn parse_order_line(line: &str) -> Result<Order> {
    let fields = split_csv_line(line);
    if fields.len() < 6 {
        bail!("expected 6 fields, got {}", fields.len());
    }
    let meal_code: MealCode = fields[5]
        .parse()
        .map_err(|_| anyhow::anyhow!("unknown meal code {:?}", fields[5]))?;

    Ok(Order {
        passenger_id: fields[0].clone(),
        flight_number: normalize_flight_number(&fields[1]),
        departure_datetime: fields[2].clone(),
        origin: fields[3].to_ascii_uppercase(),
        destination: fields[4].to_ascii_uppercase(),
        meal_code,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn scratch_path(name: &str) -> String {
        format!("target/test_csv_io_{}_{}.csv", name, std::process::id())
    }

    #[test]
    fn test_split_plain_and_quoted() {
        assert_eq!(split_csv_line("a, b ,c"), vec!["a", "b", "c"]);
        assert_eq!(
            split_csv_line(r#"LA800,"Santiago, CL","say ""hi""",""#),
            vec!["LA800", "Santiago, CL", r#"say "hi""#, ""]
        );
        assert_eq!(split_csv_line("x,y\r\n"), vec!["x", "y"]);
    }

    #[test]
    fn test_parse_delay() {
        assert_eq!(parse_delay("03:30:00").unwrap(), Duration::from_secs(12_600));
        assert_eq!(parse_delay(" 5:05:07 ").unwrap(), Duration::from_secs(18_307));
        assert_eq!(parse_delay("26:00:00").unwrap(), Duration::from_secs(93_600));
        assert!(parse_delay("03:30").is_err());
        assert!(parse_delay("aa:00:00").is_err());
        assert!(parse_delay("01:75:00").is_err());
        assert!(parse_delay("").is_err());
    }

    #[test]
    fn test_load_flight_records_by_header_name() {
        let path = scratch_path("reference");
        fs::create_dir_all("target").unwrap();
        fs::write(
            &path,
            "\u{feff}Fecha,Flt Desg,Arvl Arp,Dept Arp,demora\n\
             2024-01-01,la800,ipc,scl,05:20:00\n\
             2024-01-01,LA601,LIM,SCL,bad\n\
             2024-01-01,LA602\n\
             \n\
             2024-01-01,LA33,JFK,SCL,10:45:00\n",
        )
        .unwrap();

        let load = load_flight_records(Path::new(&path), &ReferenceColumns::default()).unwrap();

        assert_eq!(load.records.len(), 2);
        assert_eq!(load.skipped, 2);
        assert_eq!(load.records[0].flight_number, "LA800");
        assert_eq!(load.records[0].origin, "SCL");
        assert_eq!(load.records[0].destination, "IPC");
        assert_eq!(load.records[0].delay_duration, Duration::from_secs(5 * 3600 + 20 * 60));

        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_load_flight_records_missing_column() {
        let path = scratch_path("bad_header");
        fs::create_dir_all("target").unwrap();
        fs::write(&path, "Flt Desg,Dept Arp,demora\nLA800,SCL,05:00:00\n").unwrap();

        let err = load_flight_records(Path::new(&path), &ReferenceColumns::default()).unwrap_err();
        assert!(err.to_string().contains("Arvl Arp"));

        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_load_flight_records_missing_file() {
        let result = load_flight_records(
            Path::new("target/definitely_not_here.csv"),
            &ReferenceColumns::default(),
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_order_line_format() {
        let order = Order {
            passenger_id: "12.345.678-5".to_string(),
            flight_number: "LA800".to_string(),
            departure_datetime: "2026-10-21T10:30".to_string(),
            origin: "SCL".to_string(),
            destination: "IPC".to_string(),
            meal_code: MealCode::Dbml,
        };
        let line = order_to_csv_line(&order);
        assert_eq!(line, "12.345.678-5,LA800,2026-10-21T10:30,SCL,IPC,DBML\n");
        assert_eq!(parse_order_line(&line).unwrap(), order);
    }

    #[test]
    fn test_order_line_quotes_delimiters() {
        let order = Order {
            passenger_id: "AB 123,456".to_string(),
            flight_number: "LA800".to_string(),
            departure_datetime: "2026-10-21T10:30".to_string(),
            origin: "SCL".to_string(),
            destination: "IPC".to_string(),
            meal_code: MealCode::Vgml,
        };
        let line = order_to_csv_line(&order);
        assert_eq!(line, "\"AB 123,456\",LA800,2026-10-21T10:30,SCL,IPC,VGML\n");
        assert_eq!(parse_order_line(&line).unwrap(), order);

        let quoted = Order {
            passenger_id: "Núñez \"ID\"#42".to_string(),
            ..order
        };
        let line = order_to_csv_line(&quoted);
        assert!(line.starts_with("\"Núñez \"\"ID\"\"#42\","));
        assert_eq!(parse_order_line(&line).unwrap(), quoted);
    }

    #[test]
    fn test_parse_order_line_rejects_garbage() {
        assert!(parse_order_line("1-9,LA800").is_err());
        assert!(parse_order_line("1-9,LA800,2026-10-21T10:30,SCL,IPC,PIZZA").is_err());
    }
}
