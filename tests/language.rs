use std::fs::{self};

use kinexpr::{Options, get_result};
use walkdir::WalkDir;

#[test]
fn fixture_expressions_work() {
    let mut count = 0;

    for entry in
        WalkDir::new("tests/fixtures").into_iter()
                                      .filter_map(Result::ok)
                                      .filter(|e| e.path().extension().is_some_and(|ext| ext == "expr"))
    {
        let path = entry.path();
        let content =
            fs::read_to_string(path).unwrap_or_else(|e| panic!("Failed to read {path:?}: {e}"));
        let options = Options { simplify: path.components().any(|c| c.as_os_str() == "simplify"),
                                ..Options::default() };

        for (line, input, expected) in extract_cases(&content) {
            count += 1;
            let result = get_result(input, &options);
            match (expected, result) {
                ("!error", Ok(output)) => panic!("{path:?}:{line}: '{input}' succeeded with \
                                                  '{output}' but was expected to fail"),
                ("!error", Err(_)) => {},
                (expected, Ok(output)) => assert_eq!(output, expected, "{path:?}:{line}: '{input}'"),
                (_, Err(e)) => panic!("{path:?}:{line}: '{input}' failed:\n{e}"),
            }
        }
    }

    assert!(count > 0, "No fixture expressions found in tests/fixtures");
}

/// Yields `(line number, input, expected)` for every `input => expected` line.
fn extract_cases(content: &str) -> Vec<(usize, &str, &str)> {
    content.lines()
           .enumerate()
           .filter(|(_, line)| !line.trim().is_empty() && !line.trim_start().starts_with('#'))
           .filter_map(|(i, line)| {
               line.split_once(" => ")
                   .map(|(input, expected)| (i + 1, input, expected.trim()))
           })
           .collect()
}

fn assert_output(src: &str, options: &Options, expected: &str) {
    match get_result(src, options) {
        Ok(output) => assert_eq!(output, expected, "unexpected output for '{src}'"),
        Err(e) => panic!("Input failed: {e}"),
    }
}

fn assert_failure(src: &str, options: &Options) {
    if get_result(src, options).is_ok() {
        panic!("Input '{src}' succeeded but was expected to fail")
    }
}

#[test]
fn one_output_line_per_expression() {
    let options = Options::default();
    assert_output("a + b\n\n  sin(t)*2  \n", &options, "(a + b)\n(sin(t) * 2)");
}

#[test]
fn bindings_feed_evaluation() {
    let options = Options { evaluate: true,
                            bindings: vec![("a".to_string(), 2.0), ("b".to_string(), 0.5)],
                            ..Options::default() };
    assert_output("a * b\na ^ 2 + b", &options, "1\n4.5");
    assert_output("atan2(0, a) * b", &options, "0");
}

#[test]
fn bindings_to_unknown_names_fail() {
    let options = Options { bindings: vec![("z".to_string(), 1.0)],
                            ..Options::default() };
    assert_failure("a + b", &options);
}

#[test]
fn evaluation_requires_every_value() {
    let options = Options { evaluate: true,
                            ..Options::default() };
    assert_failure("a + 1", &options);
    assert_output("2 ^ 10", &options, "1024");
}

#[test]
fn bound_values_are_substituted_when_simplifying() {
    let options = Options { simplify: true,
                            bindings: vec![("d1".to_string(), 0.0)],
                            ..Options::default() };
    assert_output("d1 * cos(t) + d2", &options, "d2");
}

#[test]
fn matrix_mode_prints_and_evaluates() {
    let options = Options { matrix: true,
                            ..Options::default() };
    assert_output("1, 2; 3, a", &options, "[ 1, 2 ; 3, a ]");
    assert_failure("1, 2; 3", &options);

    let options = Options { matrix: true,
                            evaluate: true,
                            bindings: vec![("a".to_string(), 4.0)],
                            ..options };
    assert_output("1, 2;\n3, a", &options, "[ 1, 2 ; 3, 4 ]");
}

#[test]
fn matrix_mode_simplifies_cells() {
    let options = Options { matrix: true,
                            simplify: true,
                            ..Options::default() };
    assert_output("0 * x, 1 * y; 2 + 3, -(-z)", &options, "[ 0, y ; 5, z ]");
}
