#![allow(dead_code)]

use flightlog::{Event, EventRegistry};
use std::fs::OpenOptions;
use std::io::Write;
use std::path::Path;

pub const HEADER: &str = concat!(
    r#"{"timestamp":"2024-03-01T10:00:00Z","event":"Fileheader","part":1,"#,
    r#""language":"English/UK","gameversion":"4.0.1.100","build":"r293676/r0"}"#
);

pub fn journal_name(part: u32) -> String {
    format!("Journal.240301100000.{part:02}.log")
}

pub fn write_lines(path: &Path, lines: &[&str]) {
    let mut contents = lines.join("\n");
    contents.push('\n');
    std::fs::write(path, contents).unwrap();
}

pub fn append_line(path: &Path, line: &str) {
    let mut file = OpenOptions::new().append(true).open(path).unwrap();
    writeln!(file, "{line}").unwrap();
}

pub fn music_line(timestamp: &str) -> String {
    format!(r#"{{"timestamp":"{timestamp}","event":"Music","MusicTrack":"NoTrack"}}"#)
}

pub fn status_line(timestamp: &str) -> String {
    format!(
        r#"{{"timestamp":"{timestamp}","event":"Status","Flags":16842765,"Pips":[4,4,4],"FireGroup":0,"GuiFocus":0,"Fuel":{{"FuelMain":32.0,"FuelReservoir":0.63}},"Cargo":4.0,"LegalState":"Clean"}}"#
    )
}

pub fn decode(line: &str) -> Event {
    EventRegistry::global().decode_line(line).unwrap()
}
