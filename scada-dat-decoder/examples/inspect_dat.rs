//! Inspect a SCADA .dat file: record count, time span and status histogram

use scada_dat_decoder::{DecoderConfig, RecordDecoder, RecordFormatter};
use std::collections::BTreeMap;
use std::path::PathBuf;

fn main() {
    env_logger::init();

    let Some(path) = std::env::args().nth(1).map(PathBuf::from) else {
        eprintln!("usage: inspect_dat <file.dat>");
        std::process::exit(1);
    };

    println!("\n═══════════════════════════════════════");
    println!("Inspecting: {:?}", path);
    println!("═══════════════════════════════════════");

    let decoder = match RecordDecoder::open(&path, DecoderConfig::new()) {
        Ok(d) => d,
        Err(e) => {
            println!("✗ Error: {}", e);
            std::process::exit(1);
        }
    };

    let formatter = RecordFormatter::new();
    let mut status_counts: BTreeMap<u16, usize> = BTreeMap::new();
    let mut first = None;
    let mut last = None;
    let mut total = 0;

    for item in decoder {
        match item {
            Ok(record) => {
                *status_counts.entry(record.status).or_insert(0) += 1;
                first.get_or_insert(record.timestamp);
                last = Some(record.timestamp);
                total += 1;
            }
            Err(e) => {
                println!("⚠ {}", e);
                break;
            }
        }
    }

    println!("Records: {}", total);
    if let (Some(first), Some(last)) = (first, last) {
        let show = |ts| formatter.timestamp_text(ts).unwrap_or_else(|e| e.to_string());
        println!("First:   {}", show(first));
        println!("Last:    {}", show(last));
    }

    println!("\nStatus Word Statistics:");
    println!("─────────────────────────");
    for (status, count) in status_counts {
        println!("  {:04X}: {:6} records", status, count);
    }
}
