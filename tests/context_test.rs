use cutter::config::load_config;
use cutter::context::{build_context, coerce, collect_answers, CoercionPolicy};
use cutter::error::Error;
use cutter::prompt::{DefaultsPrompter, PreloadedPrompter, Prompter};
use serde_json::json;
use std::cell::RefCell;
use std::fs;
use tempfile::TempDir;

fn template_with_config(config: &str) -> TempDir {
    let temp_dir = TempDir::new().unwrap();
    fs::write(temp_dir.path().join("cookiecutter.json"), config).unwrap();
    temp_dir
}

#[test]
fn test_empty_input_keeps_default_and_type() {
    let policy = CoercionPolicy::ZeroValue;
    assert_eq!(coerce("flag", &json!(false), "", policy).unwrap(), json!(false));
    assert_eq!(coerce("count", &json!(5), "", policy).unwrap(), json!(5));
    assert_eq!(coerce("name", &json!("demo"), "", policy).unwrap(), json!("demo"));
    assert_eq!(coerce("list", &json!([1, 2]), "", policy).unwrap(), json!([1, 2]));
}

#[test]
fn test_input_is_parsed_as_default_type() {
    let policy = CoercionPolicy::ZeroValue;
    assert_eq!(coerce("count", &json!(5), "7", policy).unwrap(), json!(7));
    assert_eq!(coerce("ratio", &json!(0.5), "2.25", policy).unwrap(), json!(2.25));
    assert_eq!(coerce("flag", &json!(false), "true", policy).unwrap(), json!(true));
    assert_eq!(coerce("flag", &json!(true), "no", policy).unwrap(), json!(false));
    assert_eq!(coerce("name", &json!("demo"), " spaced ", policy).unwrap(), json!(" spaced "));
}

#[test]
fn test_untyped_defaults_store_raw_string() {
    let policy = CoercionPolicy::ZeroValue;
    assert_eq!(coerce("nothing", &json!(null), "x", policy).unwrap(), json!("x"));
    assert_eq!(coerce("nested", &json!({"a": 1}), "{}", policy).unwrap(), json!("{}"));
}

#[test_log::test]
fn test_malformed_input_becomes_zero_value() {
    let policy = CoercionPolicy::ZeroValue;
    assert_eq!(coerce("count", &json!(5), "seven", policy).unwrap(), json!(0));
    assert_eq!(coerce("ratio", &json!(0.5), "half", policy).unwrap(), json!(0.0));
    assert_eq!(coerce("flag", &json!(true), "maybe", policy).unwrap(), json!(false));
}

#[test]
fn test_malformed_input_is_rejected_when_strict() {
    let err = coerce("count", &json!(5), "seven", CoercionPolicy::Reject).unwrap_err();
    match err {
        Error::InvalidAnswer { key, value, expected } => {
            assert_eq!(key, "count");
            assert_eq!(value, "seven");
            assert_eq!(expected, "integer");
        }
        other => panic!("Expected InvalidAnswer, got {other:?}"),
    }
}

#[test]
fn test_build_context_with_defaults() {
    let template = template_with_config(r#"{"project_name": "Demo", "use_ci": false, "port": 8080}"#);

    let context = build_context(
        template.path().join("cookiecutter.json"),
        &DefaultsPrompter,
        CoercionPolicy::ZeroValue,
    )
    .unwrap();

    assert_eq!(
        context.as_value(),
        &json!({"cookiecutter": {"project_name": "Demo", "use_ci": false, "port": 8080}})
    );
}

#[test]
fn test_build_context_with_answers() {
    let template = template_with_config(r#"{"project_name": "Demo", "use_ci": false, "port": 8080}"#);
    let prompter = PreloadedPrompter::from_pairs([("use_ci", "yes"), ("port", "9000")]);

    let context = build_context(
        template.path().join("cookiecutter.json"),
        &prompter,
        CoercionPolicy::ZeroValue,
    )
    .unwrap();

    assert_eq!(
        context.variables(),
        &json!({"project_name": "Demo", "use_ci": true, "port": 9000})
    );
}

#[test]
fn test_non_object_root_is_stored_verbatim() {
    let template = template_with_config(r#"["a", "b"]"#);
    let document = load_config(template.path()).unwrap();

    let context = collect_answers(document, &DefaultsPrompter, CoercionPolicy::Reject).unwrap();

    assert_eq!(context.variables(), &json!(["a", "b"]));
}

#[test]
fn test_missing_config_is_read_error() {
    let temp_dir = TempDir::new().unwrap();

    let err = build_context(
        temp_dir.path().join("cookiecutter.json"),
        &DefaultsPrompter,
        CoercionPolicy::ZeroValue,
    )
    .unwrap_err();

    assert!(matches!(err, Error::ConfigReadError { .. }));
}

#[test]
fn test_malformed_config_is_parse_error() {
    let template = template_with_config(r#"{"project_name": "#);

    let err = build_context(
        template.path().join("cookiecutter.json"),
        &DefaultsPrompter,
        CoercionPolicy::ZeroValue,
    )
    .unwrap_err();

    assert!(matches!(err, Error::ConfigParseError { .. }));
}

struct RecordingPrompter {
    asked: RefCell<Vec<String>>,
}

impl Prompter for RecordingPrompter {
    fn answer(&self, key: &str, _default: &serde_json::Value) -> cutter::error::Result<String> {
        self.asked.borrow_mut().push(key.to_string());
        Ok(String::new())
    }
}

#[test]
fn test_variables_are_asked_in_document_order() {
    let template = template_with_config(r#"{"zeta": "z", "alpha": 1, "mid": true}"#);
    let prompter = RecordingPrompter { asked: RefCell::new(Vec::new()) };

    let document = load_config(template.path()).unwrap();
    let context = collect_answers(document, &prompter, CoercionPolicy::ZeroValue).unwrap();

    assert_eq!(*prompter.asked.borrow(), vec!["zeta", "alpha", "mid"]);
    let keys: Vec<_> = context.variables().as_object().unwrap().keys().cloned().collect();
    assert_eq!(keys, vec!["zeta", "alpha", "mid"]);
}
