use contactsift_core::{
    default_strategies, normalize_table, process_batch, CellValue, ContactRow, LineRecord,
    NanpTrunkPolicy, PhoneNormalizer, RecognizeError, Recognizer, ResultRow, StrategyName, Table,
    Upload, DEFAULT_PHONE_KEYWORDS,
};
use std::cell::RefCell;
use std::collections::HashSet;

/// Serves line records keyed by the upload bytes, recording every call.
#[derive(Default)]
struct FixtureRecognizer {
    pages: Vec<(&'static [u8], Vec<&'static str>)>,
    calls: RefCell<Vec<(Vec<u8>, String)>>,
}

impl FixtureRecognizer {
    fn page(mut self, key: &'static [u8], texts: Vec<&'static str>) -> Self {
        self.pages.push((key, texts));
        self
    }

    fn calls_for(&self, key: &[u8]) -> Vec<String> {
        self.calls
            .borrow()
            .iter()
            .filter(|(image, _)| image.as_slice() == key)
            .map(|(_, strategy)| strategy.clone())
            .collect()
    }
}

impl Recognizer for FixtureRecognizer {
    fn recognizer_name(&self) -> &str {
        "fixture"
    }

    fn recognize(
        &self,
        image: &[u8],
        strategy: &StrategyName,
    ) -> Result<Vec<LineRecord>, RecognizeError> {
        self.calls
            .borrow_mut()
            .push((image.to_vec(), strategy.to_string()));
        if image == b"crash" {
            return Err(RecognizeError::Failed("engine crashed".to_string()));
        }
        let texts = self
            .pages
            .iter()
            .find(|(key, _)| *key == image)
            .map(|(_, texts)| texts.clone())
            .unwrap_or_default();
        Ok(texts
            .into_iter()
            .enumerate()
            // Reverse the reported order so the extractor has to sort by position.
            .rev()
            .map(|(i, text)| LineRecord::at(0.0, i as f64 * 30.0, 120.0, 20.0, text, 0.9))
            .collect())
    }
}

fn contact(row: &ResultRow) -> &ContactRow {
    match row {
        ResultRow::Contact(row) => row,
        ResultRow::Error(err) => panic!("unexpected error row: {err:?}"),
    }
}

fn assert_unique_phones(rows: &[ResultRow]) {
    let mut seen = HashSet::new();
    for phone in rows.iter().filter_map(ResultRow::phone) {
        assert!(seen.insert(phone.to_string()), "duplicate phone {phone}");
    }
}

#[test]
fn repeated_phone_in_one_image_keeps_the_top_entry() {
    let recognizer = FixtureRecognizer::default().page(
        b"sheet",
        vec!["User One", "212-555-0001", "User Two", "212-555-0001"],
    );
    let rows = process_batch(
        &recognizer,
        vec![Upload::new("sheet.png", b"sheet".to_vec())],
        &default_strategies(),
        &PhoneNormalizer::default(),
    );
    assert_eq!(rows.len(), 1);
    let row = contact(&rows[0]);
    assert_eq!(row.name, "User One");
    assert_eq!(row.phone, "12125550001");
    assert_eq!(row.strategy, "original");
}

#[test]
fn same_number_in_different_formats_is_attributed_to_first_upload() {
    let recognizer = FixtureRecognizer::default()
        .page(b"one", vec!["User One", "(212) 555-1234"])
        .page(b"two", vec!["User One", "212-555-1234"])
        .page(b"three", vec!["User One Diff Format", "+1 212 555 1234"])
        .page(b"four", vec!["User Two", "4155559999"])
        .page(b"five", vec!["User Intl", "+91 99999 88888"]);
    let uploads = vec![
        Upload::new("file1.png", b"one".to_vec()),
        Upload::new("file2.png", b"two".to_vec()),
        Upload::new("file3.png", b"three".to_vec()),
        Upload::new("file4.png", b"four".to_vec()),
        Upload::new("file5.png", b"five".to_vec()),
    ];
    let rows = process_batch(
        &recognizer,
        uploads,
        &default_strategies(),
        &PhoneNormalizer::default(),
    );

    let summary: Vec<(&str, &str)> = rows
        .iter()
        .map(|row| (row.filename(), contact(row).phone.as_str()))
        .collect();
    assert_eq!(
        summary,
        vec![
            ("file1.png", "12125551234"),
            ("file4.png", "14155559999"),
            ("file5.png", "919999988888"),
        ]
    );
    assert_unique_phones(&rows);
}

#[test]
fn valid_strategy_short_circuits_later_strategies() {
    let recognizer = FixtureRecognizer::default()
        .page(b"good", vec!["Ada Lovelace", "212-555-1234"])
        .page(b"weak", vec!["212-555-9876"]);
    let rows = process_batch(
        &recognizer,
        vec![
            Upload::new("good.png", b"good".to_vec()),
            Upload::new("weak.png", b"weak".to_vec()),
        ],
        &default_strategies(),
        &PhoneNormalizer::default(),
    );

    assert_eq!(recognizer.calls_for(b"good"), vec!["original"]);
    assert_eq!(recognizer.calls_for(b"weak").len(), 5);
    let weak = contact(&rows[1]);
    assert_eq!(weak.name, "Unknown");
    assert_eq!(weak.strategy, "original");
}

#[test]
fn image_without_candidates_yields_all_failed_placeholder() {
    let recognizer = FixtureRecognizer::default().page(b"blank", vec!["nothing to see"]);
    let rows = process_batch(
        &recognizer,
        vec![
            Upload::new("blank.png", b"blank".to_vec()),
            Upload::new("crash.png", b"crash".to_vec()),
        ],
        &default_strategies(),
        &PhoneNormalizer::default(),
    );

    assert_eq!(rows.len(), 2);
    for row in &rows {
        let row = contact(row);
        assert_eq!(row.name, "No contact found");
        assert_eq!(row.phone, "");
        assert_eq!(row.confidence, 0.0);
        assert_eq!(row.strategy, "all_failed");
    }
}

#[test]
fn unreadable_uploads_become_error_rows_without_stopping_the_batch() {
    let recognizer =
        FixtureRecognizer::default().page(b"ok", vec!["Ada Lovelace", "212-555-1234"]);
    let rows = process_batch(
        &recognizer,
        vec![
            Upload::failed("missing.png", "file not found"),
            Upload::new("empty.png", Vec::new()),
            Upload::new("ok.png", b"ok".to_vec()),
        ],
        &default_strategies(),
        &PhoneNormalizer::default(),
    );

    assert_eq!(rows.len(), 3);
    assert!(rows[0].is_error());
    assert!(rows[1].is_error());
    assert_eq!(contact(&rows[2]).phone, "12125551234");
    assert_eq!(
        serde_json::to_value(&rows[0]).expect("json"),
        serde_json::json!({"filename": "missing.png", "error": "file not found"})
    );
}

#[test]
fn strip_implicit_policy_applies_to_batch_rows() {
    let recognizer = FixtureRecognizer::default()
        .page(b"a", vec!["Ada Lovelace", "212-555-1234"])
        .page(b"b", vec!["Ada Lovelace", "+1 212 555 1234"]);
    let rows = process_batch(
        &recognizer,
        vec![
            Upload::new("a.png", b"a".to_vec()),
            Upload::new("b.png", b"b".to_vec()),
        ],
        &default_strategies(),
        &PhoneNormalizer::new(NanpTrunkPolicy::StripImplicit),
    );
    let phones: Vec<&str> = rows.iter().filter_map(ResultRow::phone).collect();
    assert_eq!(phones, vec!["2125551234", "12125551234"]);
}

#[test]
fn dataset_without_keyword_headers_uses_first_column() {
    let table = Table::new(
        vec!["Digits".to_string(), "Who".to_string()],
        vec![
            vec![CellValue::text("212 555 1234"), CellValue::text("Ada")],
            vec![CellValue::text("2125551234"), CellValue::text("Ada again")],
        ],
    );
    let out = normalize_table(table, &DEFAULT_PHONE_KEYWORDS, &PhoneNormalizer::default())
        .expect("normalize");
    assert_eq!(out.phone_column, "Digits");
    assert_eq!(out.rows.len(), 1);
    assert_eq!(out.rows[0].cells[1], CellValue::text("Ada"));
}
