use ferrum_models::common::{ExtensionValue, HasExtensions, Patient};
use serde_json::Value;
use std::{fs::File, path::PathBuf};

fn fixtures_root() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("data")
}

fn load_fixture(relative: &str) -> Value {
    let path = fixtures_root().join(relative);
    assert!(path.exists(), "fixture missing at {:?}", path);

    let file = File::open(&path).expect("failed to open fixture");
    serde_json::from_reader(file).expect("failed to deserialize fixture")
}

#[test]
fn parse_patient_with_extensions() {
    let json = load_fixture("patient-extensions.json");
    let patient = Patient::from_value(&json).expect("patient should parse");

    let extensions = patient.extension().expect("extensions should be present");
    assert_eq!(extensions.len(), 8);

    let shapes: Vec<_> = extensions
        .iter()
        .map(|e| e.value.as_ref().map(ExtensionValue::type_name))
        .collect();
    assert_eq!(
        shapes,
        vec![
            Some("string"),
            Some("CodeableConcept"),
            Some("Quantity"),
            Some("code"),
            Some("code"),
            None,
            Some("Reference"),
            Some("Expression"),
        ]
    );

    let nationality = &extensions[5];
    assert!(nationality.is_complex());
    assert_eq!(nationality.extension().map(<[_]>::len), Some(2));

    let birth_time = patient
        .birth_date_element
        .extension()
        .and_then(|e| e.first())
        .and_then(|e| e.value.as_ref())
        .and_then(ExtensionValue::as_date_time);
    assert_eq!(birth_time, Some("1974-12-25T14:35:45-05:00"));

    assert!(patient.other.contains_key("gender"));
}

#[test]
fn patient_round_trips_unchanged() {
    let json = load_fixture("patient-extensions.json");
    let patient = Patient::from_value(&json).expect("patient should parse");

    assert_eq!(patient.to_value().expect("patient should serialize"), json);
}
