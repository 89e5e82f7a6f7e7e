use crate::{Result, SourceError};
use contactsift_core::{LineRecord, Point};
use serde::Deserialize;

/// Accepts both object lines and `[box, text, confidence]` tuples.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum WireLine {
    Object {
        #[serde(alias = "bounding_box")]
        bbox: [[f64; 2]; 4],
        text: String,
        #[serde(alias = "prob")]
        confidence: f64,
    },
    Tuple([[f64; 2]; 4], String, f64),
}

impl From<WireLine> for LineRecord {
    fn from(line: WireLine) -> Self {
        let (bbox, text, confidence) = match line {
            WireLine::Object {
                bbox,
                text,
                confidence,
            } => (bbox, text, confidence),
            WireLine::Tuple(bbox, text, confidence) => (bbox, text, confidence),
        };
        LineRecord::new(bbox.map(Point::from), text, confidence)
    }
}

/// Parses recognizer output: a JSON array of line records.
pub fn parse_line_records(data: &str) -> Result<Vec<LineRecord>> {
    let trimmed = data.trim();
    if trimmed.is_empty() {
        return Ok(Vec::new());
    }
    let lines: Vec<WireLine> = serde_json::from_str(trimmed)
        .map_err(|err| SourceError::Parse(format!("line records: {err}")))?;
    Ok(lines.into_iter().map(LineRecord::from).collect())
}

#[cfg(test)]
mod tests {
    use super::parse_line_records;

    #[test]
    fn parses_object_lines() {
        let data = r#"[{"bbox": [[0,30],[100,30],[100,50],[0,50]], "text": "212-555-1234", "confidence": 0.87}]"#;
        let lines = parse_line_records(data).expect("parse");
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].text, "212-555-1234");
        assert_eq!(lines[0].top(), 30.0);
        assert_eq!(lines[0].confidence, 0.87);
    }

    #[test]
    fn parses_tuple_lines() {
        let data = r#"[[[[0,0],[100,0],[100,20],[0,20]], "Ada Lovelace", 0.9]]"#;
        let lines = parse_line_records(data).expect("parse");
        assert_eq!(lines[0].text, "Ada Lovelace");
        assert_eq!(lines[0].bounding_box[2].x, 100.0);
    }

    #[test]
    fn blank_output_means_no_lines() {
        assert!(parse_line_records("  \n").expect("parse").is_empty());
    }

    #[test]
    fn rejects_malformed_output() {
        let err = parse_line_records("{\"text\": 1}").unwrap_err();
        assert!(err.to_string().contains("line records"));
    }
}
