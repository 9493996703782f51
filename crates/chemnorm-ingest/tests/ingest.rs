use std::fs;
use std::path::{Path, PathBuf};

use chemnorm_ingest::{
    IngestError, load_variant_table, parse_name_lines, read_input_names, read_property_records,
    read_property_table, write_mapping_csv, write_properties_csv, write_ranked_csv,
    write_ranked_csv_to_path, write_scores_csv,
};
use chemnorm_model::{CanonicalForm, InputMapping, PropertyRecord, RankedRecord};
use tempfile::TempDir;

fn write(dir: &TempDir, name: &str, contents: &str) -> PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, contents).expect("write fixture");
    path
}

fn form(value: &str) -> CanonicalForm {
    CanonicalForm::new(value).unwrap()
}

fn to_string<F>(write: F) -> String
where
    F: FnOnce(&mut Vec<u8>) -> Result<(), csv::Error>,
{
    let mut buffer = Vec::new();
    write(&mut buffer).expect("write csv");
    String::from_utf8(buffer).unwrap()
}

#[test]
fn loads_variant_table_in_file_order() {
    let dir = TempDir::new().unwrap();
    let path = write(
        &dir,
        "variants_mapping.json",
        r#"{"IBRUTINIB": ["ibrutinib", "PC-32765"], "ADENOSINE": ["Adenosine", "Adenocard"]}"#,
    );
    let table = load_variant_table(&path).expect("load table");
    let forms: Vec<&str> = table.canonical_forms().map(CanonicalForm::as_str).collect();
    assert_eq!(forms, vec!["IBRUTINIB", "ADENOSINE"]);
}

#[test]
fn variant_table_errors_name_the_file() {
    let dir = TempDir::new().unwrap();
    let path = write(&dir, "broken.json", r#"{"A": "not a list"}"#);
    let err = load_variant_table(&path).unwrap_err();
    assert!(matches!(err, IngestError::Json { .. }));
    assert!(err.to_string().contains("broken.json"));

    let missing = dir.path().join("absent.json");
    assert!(matches!(
        load_variant_table(&missing),
        Err(IngestError::Io { .. })
    ));
}

#[test]
fn name_lines_skip_blanks_and_comments() {
    let names = parse_name_lines("# sample batch\nAdenosine\n\n  \nPC-32765\r\n diflucan\n");
    assert_eq!(names, vec!["Adenosine", "PC-32765", " diflucan"]);
}

#[test]
fn reads_names_from_csv_column() {
    let dir = TempDir::new().unwrap();
    let path = write(&dir, "inputs.csv", "id,org_form\n1,Adenocard\n2,\n3,BG8967\n");
    let names = read_input_names(&path).unwrap();
    assert_eq!(names, vec!["Adenocard", "BG8967"]);

    let path = write(&dir, "plain.csv", "name\nibrutinib\n");
    assert_eq!(read_input_names(&path).unwrap(), vec!["ibrutinib"]);
}

#[test]
fn property_table_keeps_missing_values_null() {
    let dir = TempDir::new().unwrap();
    let path = write(
        &dir,
        "compound_data.csv",
        "normed_form,molecular_weight,xlogp,notes\nADENOSINE,267.24,,x\nIBRUTINIB,,3.6,\n",
    );
    let records = read_property_table(&path).unwrap();
    assert_eq!(records.len(), 2);
    assert_eq!(records[0].molecular_weight, Some(267.24));
    assert_eq!(records[0].hydrophobicity, None);
    assert_eq!(records[0].structural_descriptor, None);
    assert_eq!(records[1].molecular_weight, None);
    assert_eq!(records[1].hydrophobicity, Some(3.6));
}

#[test]
fn property_table_rejects_bad_numbers_and_missing_key() {
    let path = Path::new("inline.csv");
    let err = read_property_records("normed_form,molecular_weight\nA,heavy\n".as_bytes(), path)
        .unwrap_err();
    match err {
        IngestError::InvalidNumber { row, column, value, .. } => {
            assert_eq!(row, 2);
            assert_eq!(column, "molecular_weight");
            assert_eq!(value, "heavy");
        }
        other => panic!("unexpected error: {other}"),
    }

    let err = read_property_records("molecular_weight\n1.0\n".as_bytes(), path).unwrap_err();
    assert!(matches!(err, IngestError::MissingColumn { .. }));

    let err = read_property_records("normed_form\n \n".as_bytes(), path).unwrap_err();
    assert!(matches!(err, IngestError::BlankCanonicalForm { row: 2, .. }));
}

#[test]
fn mapping_csv_output() {
    let mut mapping = InputMapping::new();
    mapping.push("Adenocard", form("ADENOSINE"));
    mapping.push("unknownX", CanonicalForm::passthrough("unknownX"));
    let output = to_string(|buffer| write_mapping_csv(buffer, &mapping));
    insta::assert_snapshot!(output, @r"
    org_form,normed_form
    Adenocard,ADENOSINE
    unknownX,unknownX
    ");
}

#[test]
fn properties_csv_output() {
    let records = vec![
        PropertyRecord::missing(form("ADENOSINE"))
            .with_molecular_weight(267.24)
            .with_structural_descriptor("C1=NC(=C2C(=N1)N(C=N2)C3C(C(C(O3)CO)O)O)N")
            .with_hydrophobicity(-1.1),
        PropertyRecord::missing(form("UNKNOWNX")),
    ];
    let output = to_string(|buffer| write_properties_csv(buffer, &records));
    insta::assert_snapshot!(output, @r"
    normed_form,molecular_weight,isomeric_smiles,xlogp
    ADENOSINE,267.24,C1=NC(=C2C(=N1)N(C=N2)C3C(C(C(O3)CO)O)O)N,-1.1
    UNKNOWNX,,,
    ");
}

#[test]
fn ranked_and_score_csv_output() {
    let ranked = vec![
        RankedRecord {
            record: PropertyRecord::missing(form("B")).with_molecular_weight(267.2),
            score: Some(267.2),
            rank: 0,
        },
        RankedRecord {
            record: PropertyRecord::missing(form("A")),
            score: None,
            rank: 1,
        },
    ];
    let output = to_string(|buffer| write_ranked_csv(buffer, &ranked));
    insta::assert_snapshot!(output, @r"
    rank,normed_form,molecular_weight,isomeric_smiles,xlogp,score
    0,B,267.2,,,267.2
    1,A,,,,
    ");

    let output = to_string(|buffer| write_scores_csv(buffer, &ranked));
    insta::assert_snapshot!(output, @r"
    normed_form,score
    B,267.2
    A,
    ");
}

#[test]
fn writes_into_new_directories() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("out/nested/ranked.csv");
    write_ranked_csv_to_path(&path, &[]).expect("write ranked");
    let contents = fs::read_to_string(&path).unwrap();
    assert_eq!(
        contents,
        "rank,normed_form,molecular_weight,isomeric_smiles,xlogp,score\n"
    );
}

#[test]
fn written_properties_read_back_unchanged() {
    let records = vec![
        PropertyRecord::missing(CanonicalForm::passthrough(" diflucan")),
        PropertyRecord::missing(form("IBRUTINIB "))
            .with_molecular_weight(440.5)
            .with_structural_descriptor("C=CC(=O)N1CCCC(C1)N2C3=NC=NC(=C3C(=N2)C4=CC=C(C=C4)OC5=CC=CC=C5)N")
            .with_hydrophobicity(3.6),
        PropertyRecord::missing(form("ADENOSINE")).with_molecular_weight(267.24),
    ];
    let mut buffer = Vec::new();
    write_properties_csv(&mut buffer, &records).expect("write csv");
    let read = read_property_records(buffer.as_slice(), Path::new("properties.csv")).unwrap();
    assert_eq!(read, records);
    assert_eq!(read[0].canonical_form.as_str(), " diflucan");
}
