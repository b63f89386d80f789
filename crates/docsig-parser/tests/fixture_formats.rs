//! The numpy, google and rest fixtures document the same signatures; each
//! convention must recover the same types.

use docsig_core::DocFormat;
use docsig_parser::{FunctionSite, ParseOptions, analyze_source, guess_format, parse_docstring};
use pretty_assertions::assert_eq;
use rstest::rstest;

const NUMPY: &str = include_str!("fixtures/numpydoc.py");
const GOOGLE: &str = include_str!("fixtures/googledoc.py");
const REST: &str = include_str!("fixtures/restdoc.py");

struct Summary {
    params: Vec<(String, String)>,
    returns: Option<String>,
}

fn summarize(source: &str, function: &str) -> Summary {
    let sites = analyze_source(source).expect("fixture should parse");
    let site = find(&sites, function);
    let doc = site.docstring.as_ref().expect("function should have a docstring");
    let (parsed, diagnostics) = parse_docstring(&doc.text, doc.line, None, &ParseOptions::default());
    assert!(diagnostics.is_empty(), "{function}: {diagnostics:?}");
    Summary {
        params: parsed
            .params
            .iter()
            .filter_map(|(name, field)| Some((name.clone(), field.ty.clone()?)))
            .collect(),
        returns: parsed.return_type().map(str::to_string),
    }
}

fn find<'a>(sites: &'a [FunctionSite], name: &str) -> &'a FunctionSite {
    sites
        .iter()
        .find(|s| s.name == name)
        .unwrap_or_else(|| panic!("no function named '{name}' found"))
}

fn pairs(items: &[(&str, &str)]) -> Vec<(String, String)> {
    items
        .iter()
        .map(|(n, t)| ((*n).to_string(), (*t).to_string()))
        .collect()
}

#[rstest]
#[case::numpy(NUMPY)]
#[case::google(GOOGLE)]
#[case::rest(REST)]
fn basic_types_agree(#[case] source: &str) {
    let summary = summarize(source, "basic");
    assert_eq!(
        summary.params,
        pairs(&[
            ("one", "Union[str, int]"),
            ("two", "str"),
            ("_five", "bool"),
            ("six_", "int"),
        ])
    );
    assert_eq!(summary.returns.as_deref(), Some("bool"));
}

#[rstest]
#[case::numpy(NUMPY)]
#[case::google(GOOGLE)]
#[case::rest(REST)]
fn shared_signatures_agree(
    #[case] source: &str,
    #[values("star_args", "foo", "function_self", "__init__")] function: &str,
) {
    let summary = summarize(source, function);
    assert_eq!(
        summary.params,
        pairs(&[("one", "Union[str, int]"), ("two", "str")])
    );
    let expected = if function == "__init__" { None } else { Some("bool") };
    assert_eq!(summary.returns.as_deref(), expected);
}

#[rstest]
#[case::numpy(NUMPY)]
#[case::google(GOOGLE)]
#[case::rest(REST)]
fn yields_become_iterators(#[case] source: &str) {
    assert_eq!(summarize(source, "yields").returns.as_deref(), Some("Iterator[str]"));
}

#[test]
fn numpy_named_results() {
    assert_eq!(
        summarize(NUMPY, "returns_tuple").returns.as_deref(),
        Some("Tuple[Union[str, int], str, four, int]")
    );
}

#[test]
fn google_return_without_colon_has_no_type() {
    assert_eq!(summarize(GOOGLE, "omitted_return_description").returns, None);
}

#[test]
fn rest_escaped_names_resolve() {
    let summary = summarize(REST, "star_args2");
    assert_eq!(
        summary.params,
        pairs(&[("one", "Union[str, int]"), ("two", "\\*str")])
    );
}

#[test]
fn fixtures_are_detected_by_convention() {
    let cases = [(NUMPY, DocFormat::Numpy), (GOOGLE, DocFormat::Google), (REST, DocFormat::Rest)];
    for (source, expected) in cases {
        let sites = analyze_source(source).expect("fixture should parse");
        let doc = find(&sites, "star_args").docstring.as_ref().expect("docstring");
        assert_eq!(guess_format(&doc.text), Some(expected));
    }
}

#[test]
fn docstring_lines_are_absolute() {
    let sites = analyze_source(NUMPY).expect("fixture should parse");
    let site = find(&sites, "star_args");
    let doc = site.docstring.as_ref().expect("docstring");
    let (parsed, _) = parse_docstring(&doc.text, doc.line, None, &ParseOptions::default());
    let one = parsed.param("one").expect("one is documented");
    let source_line = NUMPY.lines().nth(one.line - 1).expect("line exists");
    assert_eq!(source_line.trim(), "one : Union[str, int]");
}
