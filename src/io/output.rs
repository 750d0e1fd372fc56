use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};
use serde::Serialize;

use crate::models::DisfluencyEvent;

/// Column layout of the event table, kept stable for downstream analysis
const HEADER: [&str; 14] = [
    "word",
    "start_time",
    "end_time",
    "vowel_start",
    "vowel_end",
    "nasal_start",
    "nasal_end",
    "next_seg",
    "next_seg_start",
    "next_seg_end",
    "chunk_start",
    "chunk_end",
    "nwords",
    "idstring",
];

/// Marker written for absent optional fields
const ABSENT: &str = "NA";

/// Tab-separated rendering of a batch of event records
pub struct EventTable<'a> {
    events: &'a [DisfluencyEvent],
}

impl<'a> EventTable<'a> {
    pub fn new(events: &'a [DisfluencyEvent]) -> Self {
        Self { events }
    }

    /// Format the whole table, header row included
    pub fn format(&self) -> String {
        let mut output = String::new();
        output.push_str(&HEADER.join("\t"));
        output.push('\n');
        for event in self.events {
            output.push_str(&format_row(event));
            output.push('\n');
        }
        output
    }

    /// Write the table to a file
    pub fn write_file(&self, path: &Path) -> Result<()> {
        let mut file = std::fs::File::create(path)
            .with_context(|| format!("Failed to create file: {:?}", path))?;
        write!(file, "{}", self.format())?;
        Ok(())
    }
}

fn format_row(event: &DisfluencyEvent) -> String {
    let columns: Vec<String> = vec![
        event.word.clone(),
        event.start_time.to_string(),
        event.end_time.to_string(),
        event.vowel.start.to_string(),
        event.vowel.end.to_string(),
        opt_time(event.nasal.map(|span| span.start)),
        opt_time(event.nasal.map(|span| span.end)),
        event
            .next_seg
            .as_ref()
            .map(|seg| seg.label.clone())
            .unwrap_or_else(|| ABSENT.to_string()),
        opt_time(event.next_seg.as_ref().map(|seg| seg.start)),
        opt_time(event.next_seg.as_ref().map(|seg| seg.end)),
        event.chunk_start.to_string(),
        event.chunk_end.to_string(),
        event.n_words.to_string(),
        event.doc_id.clone(),
    ];
    columns.join("\t")
}

fn opt_time(value: Option<f64>) -> String {
    value.map(|t| t.to_string()).unwrap_or_else(|| ABSENT.to_string())
}

/// JSON rendering of a batch, with processing metadata
#[derive(Debug, Serialize)]
pub struct BatchOutput<'a> {
    pub events: &'a [DisfluencyEvent],
    pub metadata: BatchMetadata,
}

#[derive(Debug, Clone, Serialize)]
pub struct BatchMetadata {
    pub total_events: usize,
    pub documents_scanned: usize,
    pub documents_skipped: usize,
}

impl<'a> BatchOutput<'a> {
    pub fn new(events: &'a [DisfluencyEvent], metadata: BatchMetadata) -> Self {
        Self { events, metadata }
    }

    /// Write to a JSON file
    pub fn write_json(&self, path: &Path) -> Result<()> {
        let file = std::fs::File::create(path)
            .with_context(|| format!("Failed to create file: {:?}", path))?;
        serde_json::to_writer_pretty(file, self).context("Failed to write JSON")?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{NextSegment, TimeSpan};

    fn event(word: &str, nasal: Option<TimeSpan>, next_seg: Option<NextSegment>) -> DisfluencyEvent {
        DisfluencyEvent {
            word: word.to_string(),
            start_time: 1.0,
            end_time: 1.25,
            vowel: TimeSpan {
                start: 1.0,
                end: 1.1,
            },
            nasal,
            next_seg,
            chunk_start: 0.5,
            chunk_end: 2.5,
            n_words: 3,
            doc_id: "PH1-2-3-".to_string(),
        }
    }

    #[test]
    fn test_header_and_row_layout() {
        let events = vec![event(
            "UM",
            Some(TimeSpan {
                start: 1.1,
                end: 1.25,
            }),
            Some(NextSegment {
                label: "T".to_string(),
                start: 1.25,
                end: 1.4,
            }),
        )];
        let table = EventTable::new(&events).format();
        let lines: Vec<&str> = table.lines().collect();

        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0].split('\t').count(), 14);
        assert!(lines[0].starts_with("word\tstart_time"));
        assert!(lines[0].ends_with("nwords\tidstring"));

        let fields: Vec<&str> = lines[1].split('\t').collect();
        assert_eq!(fields[0], "UM");
        assert_eq!(fields[5], "1.1");
        assert_eq!(fields[7], "T");
        assert_eq!(fields[12], "3");
        assert_eq!(fields[13], "PH1-2-3-");
    }

    #[test]
    fn test_absent_fields_serialize_as_marker() {
        let events = vec![event("UH", None, None)];
        let table = EventTable::new(&events).format();
        let row = table.lines().nth(1).unwrap();
        let fields: Vec<&str> = row.split('\t').collect();

        assert_eq!(fields[5], "NA");
        assert_eq!(fields[6], "NA");
        assert_eq!(fields[7], "NA");
        assert_eq!(fields[8], "NA");
        assert_eq!(fields[9], "NA");
    }

    #[test]
    fn test_write_files() {
        let dir = tempfile::tempdir().unwrap();
        let tsv_path = dir.path().join("events.txt");
        let json_path = dir.path().join("events.json");

        let events = vec![event("UM_UH", None, None)];
        EventTable::new(&events).write_file(&tsv_path).unwrap();
        BatchOutput::new(
            &events,
            BatchMetadata {
                total_events: 1,
                documents_scanned: 1,
                documents_skipped: 0,
            },
        )
        .write_json(&json_path)
        .unwrap();

        let tsv = std::fs::read_to_string(&tsv_path).unwrap();
        assert!(tsv.starts_with("word\t"));
        assert!(tsv.contains("UM_UH"));

        let json: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&json_path).unwrap()).unwrap();
        assert_eq!(json["metadata"]["total_events"], 1);
        assert_eq!(json["events"][0]["word"], "UM_UH");
        assert!(json["events"][0]["nasal"].is_null());
    }
}
