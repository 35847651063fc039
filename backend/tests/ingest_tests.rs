//! End-to-end ingestion tests: workbook bytes through the synchronous pipeline.

mod common;

use common::{candidate_workbook, simple_workbook, text_row, workbook};
use intake::{
    normalize_candidate, process_candidate, read_workbook, select_row, CandidateStore, CellValue,
    Identity, IngestError, MemoryStore, PipelineError, SelectionMode, Seniority, SqliteStore,
};

fn ada() -> Identity {
    Identity::new("Ada", "Lovelace")
}

#[test]
fn test_typed_cells() {
    let bytes = candidate_workbook("Senior", 7.5, false);
    let draft = normalize_candidate(ada(), Some(bytes.as_slice())).unwrap();

    assert_eq!(draft.name, "Ada");
    assert_eq!(draft.surname, "Lovelace");
    assert_eq!(draft.seniority, Seniority::Senior);
    assert_eq!(draft.years, 7.5);
    assert!(!draft.availability);
}

#[test]
fn test_every_alias_spelling() {
    let cases: &[[&str; 3]] = &[
        ["seniority", "years", "availability"],
        ["Seniority", "Years of experience", "Availability"],
        ["SENIORITY", "years_of_experience", "AVAILABILITY"],
        ["Nivel", "Años", "Disponible"],
        ["categoria", "años de experiencia", "disponibilidad"],
        ["Categoria", "anios-de-experiencia", "Disponibilidad"],
        ["nivel", "Experience Years", "disponible"],
        [" seniority ", "years.of.experience", " availability"],
    ];

    for headers in cases {
        let bytes = simple_workbook(headers, &["junior", "3", "yes"]);
        let draft = normalize_candidate(ada(), Some(bytes.as_slice()))
            .unwrap_or_else(|e| panic!("{:?} failed: {}", headers, e));
        assert_eq!(draft.seniority, Seniority::Junior, "{:?}", headers);
        assert_eq!(draft.years, 3.0, "{:?}", headers);
        assert!(draft.availability, "{:?}", headers);
    }
}

#[test]
fn test_text_values_are_coerced() {
    let bytes = simple_workbook(
        &["Seniority", "Years", "Availability"],
        &["  SENIOR ", "4,5", "Sí"],
    );
    let draft = normalize_candidate(ada(), Some(bytes.as_slice())).unwrap();

    assert_eq!(draft.seniority, Seniority::Senior);
    assert_eq!(draft.years, 4.5);
    assert!(draft.availability);
}

#[test]
fn test_blank_rows_and_extra_columns_are_ignored() {
    let bytes = workbook(vec![
        text_row(&["Notes", "Seniority", "Years", "Availability"]),
        vec![CellValue::Empty, CellValue::Empty, CellValue::Empty, CellValue::Empty],
        text_row(&["ignored", "junior", "0", "no"]),
    ]);
    let draft = normalize_candidate(ada(), Some(bytes.as_slice())).unwrap();

    assert_eq!(draft.seniority, Seniority::Junior);
    assert_eq!(draft.years, 0.0);
    assert!(!draft.availability);
}

#[test]
fn test_first_labelled_row_is_used() {
    let bytes = workbook(vec![
        text_row(&["Seniority", "Years", "Availability"]),
        text_row(&["junior", "1", "true"]),
        text_row(&["senior", "20", "false"]),
    ]);
    let draft = normalize_candidate(ada(), Some(bytes.as_slice())).unwrap();
    assert_eq!(draft.seniority, Seniority::Junior);
    assert_eq!(draft.years, 1.0);
}

#[test]
fn test_missing_file() {
    assert_eq!(normalize_candidate(ada(), None), Err(IngestError::MissingFile));
}

#[test]
fn test_not_a_workbook() {
    let result = normalize_candidate(ada(), Some(&b"name,surname\nAda,Lovelace"[..]));
    assert!(matches!(result, Err(IngestError::MalformedInput(_))));
}

#[test]
fn test_missing_columns_lists_fields() {
    let bytes = simple_workbook(&["Seniority", "Level"], &["junior", "x"]);
    let err = normalize_candidate(ada(), Some(bytes.as_slice())).unwrap_err();

    assert_eq!(
        err,
        IngestError::MissingColumns {
            missing: vec!["years", "availability"]
        }
    );
    assert_eq!(err.to_string(), "Missing required columns: years, availability");
}

#[test]
fn test_unknown_labels_fall_back_then_fail() {
    let bytes = simple_workbook(&["Level", "Experience", "Free"], &["junior", "2", "yes"]);

    let rows = read_workbook(&bytes).unwrap();
    assert_eq!(select_row(&rows).unwrap().mode, SelectionMode::FirstRowFallback);

    let err = normalize_candidate(ada(), Some(bytes.as_slice())).unwrap_err();
    assert!(matches!(err, IngestError::MissingColumns { ref missing } if missing.len() == 3));
}

#[test]
fn test_header_only_sheet_has_no_data_rows() {
    let bytes = workbook(vec![text_row(&["senior", "5", "yes"])]);
    assert_eq!(
        normalize_candidate(ada(), Some(bytes.as_slice())),
        Err(IngestError::NoDataRows)
    );
}

#[test]
fn test_blank_years_cell_reads_as_zero() {
    let bytes = workbook(vec![
        text_row(&["Seniority", "Years", "Availability"]),
        vec![CellValue::from("senior"), CellValue::Empty, CellValue::from("no")],
    ]);
    let draft = normalize_candidate(ada(), Some(bytes.as_slice())).unwrap();
    assert_eq!(draft.years, 0.0);
    assert!(!draft.availability);
}

#[test]
fn test_whitespace_row_reaches_coercion() {
    let bytes = workbook(vec![
        text_row(&["Seniority", "Years", "Availability"]),
        vec![CellValue::from("  "), CellValue::Empty, CellValue::Empty],
    ]);

    let rows = read_workbook(&bytes).unwrap();
    assert_eq!(rows.keyed.len(), 1);

    let err = normalize_candidate(ada(), Some(bytes.as_slice())).unwrap_err();
    assert!(matches!(err, IngestError::InvalidSeniority { .. }));
}

#[test]
fn test_invalid_seniority() {
    let bytes = simple_workbook(&["Seniority", "Years", "Availability"], &["mid", "2", "yes"]);
    let err = normalize_candidate(ada(), Some(bytes.as_slice())).unwrap_err();
    assert_eq!(err, IngestError::InvalidSeniority { value: "mid".into() });
}

#[test]
fn test_negative_years() {
    let bytes = workbook(vec![
        text_row(&["Seniority", "Years", "Availability"]),
        vec![CellValue::from("junior"), CellValue::Number(-1.0), CellValue::Bool(true)],
    ]);
    let err = normalize_candidate(ada(), Some(bytes.as_slice())).unwrap_err();
    assert_eq!(err, IngestError::NegativeYears { value: -1.0 });
    assert_eq!(err.kind(), "negative_years");
}

#[test]
fn test_non_numeric_years() {
    let bytes = simple_workbook(&["Seniority", "Years", "Availability"], &["junior", "ten", "yes"]);
    let err = normalize_candidate(ada(), Some(bytes.as_slice())).unwrap_err();
    assert_eq!(err, IngestError::InvalidYears { value: "ten".into() });
}

#[test]
fn test_maybe_availability() {
    let bytes = simple_workbook(&["Seniority", "Years", "Availability"], &["junior", "1", "maybe"]);
    let err = normalize_candidate(ada(), Some(bytes.as_slice())).unwrap_err();

    assert_eq!(err, IngestError::InvalidAvailability { value: "maybe".into() });
    assert!(err.to_string().contains("Received: \"maybe\""));
}

#[test]
fn test_fields_fail_in_order() {
    // every field is bad; seniority is reported first
    let bytes = simple_workbook(&["Seniority", "Years", "Availability"], &["mid", "-3", "maybe"]);
    let err = normalize_candidate(ada(), Some(bytes.as_slice())).unwrap_err();
    assert!(matches!(err, IngestError::InvalidSeniority { .. }));
}

#[tokio::test]
async fn test_process_candidate_saves_to_memory() {
    let store = MemoryStore::new();
    let record = process_candidate(&store, ada(), Some(candidate_workbook("junior", 2.0, true)))
        .await
        .unwrap();

    assert_eq!(record.id, 1);
    assert_eq!(record.seniority, Seniority::Junior);
    assert_eq!(store.find_all().await.unwrap(), vec![record]);
}

#[tokio::test]
async fn test_rejected_upload_is_not_saved() {
    let store = MemoryStore::new();
    let bad = simple_workbook(&["Seniority", "Years", "Availability"], &["junior", "1", "maybe"]);

    let result = process_candidate(&store, ada(), Some(bad)).await;
    assert!(matches!(
        result,
        Err(PipelineError::Ingest(IngestError::InvalidAvailability { .. }))
    ));
    assert!(store.find_all().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_sqlite_store_on_disk() {
    let dir = tempfile::tempdir().unwrap();
    let url = format!("sqlite://{}", dir.path().join("candidates.db").display());

    let store = SqliteStore::connect(&url).await.unwrap();
    let saved = process_candidate(&store, ada(), Some(candidate_workbook("senior", 12.0, false)))
        .await
        .unwrap();
    drop(store);

    // reopen: the record survived
    let reopened = SqliteStore::connect(&url).await.unwrap();
    let all = reopened.find_all().await.unwrap();
    assert_eq!(all.len(), 1);
    assert_eq!(all[0].id, saved.id);
    assert_eq!(all[0].seniority, Seniority::Senior);
    assert_eq!(all[0].years, 12.0);
    assert!(!all[0].availability);
}
