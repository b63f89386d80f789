//! Converts the docstring fixtures shared with docsig-parser and checks the
//! rendered comments, idempotence and file output.

use std::fs;
use std::path::PathBuf;

use docsig_fixer::{
    ConvertOptions, OutputPlan, backup_path, convert_source, process_file, process_source,
};
use pretty_assertions::assert_eq;
use rstest::rstest;

const NUMPY: &str = include_str!("../../docsig-parser/tests/fixtures/numpydoc.py");
const GOOGLE: &str = include_str!("../../docsig-parser/tests/fixtures/googledoc.py");
const REST: &str = include_str!("../../docsig-parser/tests/fixtures/restdoc.py");

fn convert(source: &str) -> String {
    convert_source(source, &ConvertOptions::default())
        .expect("fixture should convert")
        .output
}

/// The trimmed line following the `def <name>(` header.
fn line_after(source: &str, name: &str) -> String {
    let header = format!("def {name}(");
    let mut lines = source.lines().skip_while(|line| !line.trim_start().starts_with(&header));
    lines.next().unwrap_or_else(|| panic!("no function named '{name}'"));
    lines.next().map(|line| line.trim().to_string()).unwrap_or_default()
}

#[rstest]
#[case::numpy(NUMPY)]
#[case::google(GOOGLE)]
#[case::rest(REST)]
fn shared_functions_get_the_same_comment(#[case] source: &str) {
    let output = convert(source);
    assert_eq!(
        line_after(&output, "star_args"),
        "# type: (Union[str, int], *str, **Any) -> bool"
    );
    assert_eq!(
        line_after(&output, "foo"),
        "# type: (Union[str, int], str, Any) -> bool"
    );
    assert_eq!(
        line_after(&output, "function_self"),
        "# type: (Any, Union[str, int], str, Any) -> bool"
    );
    assert_eq!(line_after(&output, "yields"), "# type: () -> Iterator[str]");
    assert_eq!(
        line_after(&output, "__init__"),
        "# type: (Union[str, int], str, Any) -> None"
    );
}

#[rstest]
#[case::numpy(NUMPY)]
#[case::google(GOOGLE)]
#[case::rest(REST)]
fn comments_are_refreshed_not_duplicated(#[case] source: &str) {
    let output = convert(source);
    assert_eq!(line_after(&output, "skiptype"), "# notype");
    assert_eq!(
        line_after(&output, "existing_type_comment"),
        "# type: (Union[str, int], str, Any) -> bool"
    );
    assert_eq!(output.matches("# type: (Union[str, int], Any, Any) -> bool").count(), 0);
    assert_eq!(
        line_after(&output, "existing_comment"),
        "# type: (Union[str, int], str, Any) -> bool"
    );
    assert!(output.contains("# this comment should be preserved"));
    assert_eq!(line_after(&output, "default_return_type"), "# type: (str) -> None");
}

#[rstest]
#[case::numpy(NUMPY)]
#[case::google(GOOGLE)]
#[case::rest(REST)]
fn second_pass_changes_nothing(#[case] source: &str) {
    let once = convert(source);
    let twice = convert_source(&once, &ConvertOptions::default()).expect("convert");
    assert_eq!(twice.output, once);
    assert_eq!(twice.changed_functions, 0);
}

#[test]
fn google_specific_functions() {
    let output = convert(GOOGLE);
    assert_eq!(
        line_after(&output, "basic"),
        "# type: (Union[str, int], str, Any, Any, bool, int) -> bool"
    );
    assert_eq!(line_after(&output, "any_doc_types"), "# type: (Any, *Any, **Any) -> Any");
    assert!(!line_after(&output, "no_valid_doc_types").starts_with("# type:"));
    assert!(!line_after(&output, "omitted_return_description").starts_with("# type:"));
}

#[test]
fn class_level_docs_indent_like_the_body() {
    let output = convert(GOOGLE);
    assert!(output.contains(
        "    def __init__(self, one, two, three):\n        # type: (Union[str, int], str, Any) -> None\n        pass\n"
    ));
}

#[test]
fn undocumented_function_is_left_alone() {
    let output = convert(NUMPY);
    assert!(!line_after(&output, "no_docs").starts_with("# type:"));
}

#[test]
fn stdin_outcome_diffs_against_its_label() {
    let outcome = process_source(
        "<stdin>",
        "def f(x):\n    \"\"\":type x: int\"\"\"\n".to_string(),
        &ConvertOptions::default(),
    )
    .expect("convert");
    assert!(outcome.changed());
    assert!(outcome.diff().starts_with("--- a/<stdin>\n+++ b/<stdin>\n"));
}

const SOURCE: &str = "def f(x):\n    \"\"\":type x: int\"\"\"\n";
const CONVERTED: &str = "def f(x):\n    # type: (int) -> None\n    \"\"\":type x: int\"\"\"\n";

#[test]
fn writes_in_place_with_backup() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("mod.py");
    fs::write(&path, SOURCE).expect("write fixture");

    let outcome = process_file(&path, &ConvertOptions::default()).expect("process");
    let plan = OutputPlan {
        backup: true,
        ..OutputPlan::default()
    };
    let written = plan.write(&outcome).expect("write");

    assert_eq!(written, Some(path.clone()));
    assert_eq!(fs::read_to_string(&path).expect("read"), CONVERTED);
    assert_eq!(fs::read_to_string(backup_path(&path)).expect("read backup"), SOURCE);
}

#[test]
fn mirrors_into_output_dir_without_touching_input() {
    let dir = tempfile::tempdir().expect("tempdir");
    let src = dir.path().join("src");
    fs::create_dir_all(src.join("pkg")).expect("mkdir");
    let path = src.join("pkg").join("mod.py");
    fs::write(&path, SOURCE).expect("write fixture");
    let out = dir.path().join("out");

    let outcome = process_file(&path, &ConvertOptions::default()).expect("process");
    let plan = OutputPlan {
        output_dir: Some(out.clone()),
        input_base: src,
        add_suffix: ".typed".to_string(),
        backup: true,
        write_unchanged_files: false,
    };
    let written = plan.write(&outcome).expect("write");

    let expected: PathBuf = out.join("pkg").join("mod.py.typed");
    assert_eq!(written, Some(expected.clone()));
    assert_eq!(fs::read_to_string(expected).expect("read"), CONVERTED);
    assert_eq!(fs::read_to_string(&path).expect("read input"), SOURCE);
    assert!(!backup_path(&path).exists());
}

#[test]
fn unchanged_files_are_skipped_unless_requested() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("plain.py");
    fs::write(&path, "x = 1\n").expect("write fixture");
    let out = dir.path().join("out");

    let outcome = process_file(&path, &ConvertOptions::default()).expect("process");
    assert!(!outcome.changed());

    let mut plan = OutputPlan {
        output_dir: Some(out.clone()),
        input_base: dir.path().to_path_buf(),
        ..OutputPlan::default()
    };
    assert_eq!(plan.write(&outcome).expect("write"), None);

    plan.write_unchanged_files = true;
    assert_eq!(plan.write(&outcome).expect("write"), Some(out.join("plain.py")));
}

#[test]
fn non_utf8_input_is_reported() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("latin1.py");
    fs::write(&path, b"x = '\xe9'\n").expect("write fixture");
    let err = process_file(&path, &ConvertOptions::default()).unwrap_err();
    assert!(matches!(err, docsig_fixer::FixerError::NotUtf8 { .. }), "{err}");
}
