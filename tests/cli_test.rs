use clap::Parser;
use cutter::cli::Args;
use std::ffi::OsString;
use std::path::PathBuf;

fn make_args(args: &[&str]) -> Vec<OsString> {
    let mut res = vec![OsString::from("cutter")];
    res.extend(args.iter().map(OsString::from));
    res
}

#[test]
fn test_basic_args() {
    let args = make_args(&["./template", "./output"]);
    let parsed = Args::try_parse_from(args).unwrap();

    assert_eq!(parsed.template.as_deref(), Some("./template"));
    assert_eq!(parsed.output_dir, Some(PathBuf::from("./output")));
    assert!(!parsed.verbose);
    assert!(!parsed.no_input);
    assert!(!parsed.skip_hooks);
    assert!(!parsed.skip_hooks_check);
    assert_eq!(parsed.hook_pattern, "*.go");
    assert_eq!(parsed.hook_runner, "go run");
}

#[test]
fn test_no_args_prompts_later() {
    let parsed = Args::try_parse_from(make_args(&[])).unwrap();

    assert!(parsed.template.is_none());
    assert!(parsed.output_dir.is_none());
}

#[test]
fn test_all_flags() {
    let args = make_args(&[
        "--verbose",
        "--no-input",
        "--strict-answers",
        "--skip-hooks",
        "--hook-pattern",
        "*.sh",
        "--hook-runner",
        "sh",
        "./template",
    ]);
    let parsed = Args::try_parse_from(args).unwrap();

    assert!(parsed.verbose);
    assert!(parsed.no_input);
    assert!(parsed.strict_answers);
    assert!(parsed.skip_hooks);
    assert_eq!(parsed.hook_pattern, "*.sh");
    assert_eq!(parsed.hook_runner, "sh");
    assert!(parsed.output_dir.is_none());
}

#[test]
fn test_short_flags() {
    let args = make_args(&["-v", "-s", "./template", "./output"]);
    let parsed = Args::try_parse_from(args).unwrap();

    assert!(parsed.verbose);
    assert!(parsed.stdin);
}

#[test]
fn test_no_input_conflicts_with_stdin() {
    let args = make_args(&["--no-input", "--stdin", "./template"]);
    assert!(Args::try_parse_from(args).is_err());
}

#[test]
fn test_git_url_template() {
    let args = make_args(&["https://github.com/user/template.git", "./output"]);
    let parsed = Args::try_parse_from(args).unwrap();

    assert_eq!(parsed.template.as_deref(), Some("https://github.com/user/template.git"));
}

#[test]
fn test_too_many_args() {
    let args = make_args(&["./template", "./output", "extra"]);
    assert!(Args::try_parse_from(args).is_err());
}

#[test]
fn test_skip_hooks_check() {
    let parsed = Args::try_parse_from(make_args(&["--skip-hooks-check", "./template"])).unwrap();
    assert!(parsed.skip_hooks_check);

    let args = make_args(&["--skip-hooks", "--skip-hooks-check", "./template"]);
    assert!(Args::try_parse_from(args).is_err());
}
