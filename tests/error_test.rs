use std::io;

use cutter::config::ConfigDocument;
use cutter::error::Error;

#[test]
fn test_error_conversion() {
    let io_err = io::Error::new(io::ErrorKind::NotFound, "file not found");
    let err: Error = io_err.into();

    match err {
        Error::IoError(_) => (),
        _ => panic!("Expected IoError variant"),
    }
}

#[test]
fn test_error_display() {
    let err = Error::InvalidAnswer {
        key: "count".to_string(),
        value: "many".to_string(),
        expected: "integer",
    };
    assert_eq!(err.to_string(), "Invalid answer for 'count': 'many' is not a valid integer.");

    let err = Error::HookExecutionError {
        script: "post_gen/a.go".to_string(),
        reason: "exited with exit status: 1".to_string(),
    };
    assert_eq!(err.to_string(), "Hook 'post_gen/a.go' failed: exited with exit status: 1.");
}

#[test]
fn test_parse_error_names_the_file() {
    let err = ConfigDocument::parse("tmpl/cookiecutter.json", "{\"a\": ").unwrap_err();

    assert!(matches!(err, Error::ConfigParseError { .. }));
    assert!(err.to_string().starts_with("Cannot parse configuration file 'tmpl/cookiecutter.json'"));
}
