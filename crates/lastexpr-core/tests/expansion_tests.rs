mod common;

use lastexpr_core::diagnostics::Severity;
use lastexpr_core::pipeline::{Pipeline, PipelineError};

/// Macro to generate individual test functions for each fixture
///
/// `expand` fixtures come in pairs: `expand/<name>.swift` is the input and
/// `expand/<name>.expected.swift` the exact printed output.
macro_rules! fixture_tests {
    (
        expand: [ $( $expand_name:ident ),* ],
        parse_errors: [ $( $parse_error_name:ident ),* ],
        expansion_errors: [ $( $expansion_error_name:ident => $code:literal ),* ]
    ) => {
        $(
            #[test]
            fn $expand_name() {
                let fixture_name = stringify!($expand_name);
                let source = common::load_fixture(&format!("expand/{}", fixture_name));
                let expected = common::load_fixture(&format!("expand/{}.expected", fixture_name));

                let pipeline = Pipeline::new(source, format!("{}.swift", fixture_name));
                let output = match pipeline.run_all() {
                    Ok(output) => output,
                    Err(e) => panic!(
                        "Fixture '{}' should expand:\n{}",
                        fixture_name,
                        e.format_with_source(pipeline.source())
                    ),
                };

                assert_eq!(output.text, expected, "Fixture '{}' output differs", fixture_name);
                assert!(output.warnings.is_empty());

                // The printed result is itself valid input
                common::parse_ok(&output.text);
            }
        )*

        $(
            #[test]
            fn $parse_error_name() {
                let fixture_name = stringify!($parse_error_name);
                let source = common::load_fixture(&format!("parse_errors/{}", fixture_name));
                let result = Pipeline::new(source, format!("{}.swift", fixture_name)).run_all();

                match result {
                    Err(PipelineError::Parse(diagnostics)) => assert!(!diagnostics.is_empty()),
                    other => panic!(
                        "Fixture '{}' should produce a parse error, got: {:?}",
                        fixture_name, other
                    ),
                }
            }
        )*

        $(
            #[test]
            fn $expansion_error_name() {
                let fixture_name = stringify!($expansion_error_name);
                let source = common::load_fixture(&format!("expansion_errors/{}", fixture_name));
                let result = Pipeline::new(source, format!("{}.swift", fixture_name)).run_all();

                match result {
                    Err(PipelineError::Expansion(diagnostics)) => {
                        assert_eq!(diagnostics.len(), 1);
                        assert_eq!(diagnostics[0].severity, Severity::Error);
                        assert_eq!(
                            diagnostics[0].code.as_ref().map(|c| c.code.as_str()),
                            Some($code)
                        );
                    }
                    other => panic!(
                        "Fixture '{}' should fail expansion, got: {:?}",
                        fixture_name, other
                    ),
                }
            }
        )*
    };
}

fixture_tests! {
    expand: [
        add_direct,
        clamped_add_direct,
        fortune_switch_direct,
        if_let_direct,
        closure_let_direct,
        void_unchanged,
        add_wrap,
        clamped_add_wrap,
        fortune_switch_wrap,
        switch_let_wrap,
        switch_assign_wrap,
        if_let_wrap,
        if_assign_wrap,
        closure_let_wrap,
        loop_value_if_wrap,
        statement_branches_wrap
    ],
    parse_errors: [
        unclosed_body,
        keyword_binding,
        stray_paren
    ],
    expansion_errors: [
        missing_body => "E0001",
        computed_property => "E0002",
        stored_property => "E0001"
    ]
}

#[test]
fn test_direct_expansion_is_idempotent() {
    for name in [
        "add_direct",
        "clamped_add_direct",
        "fortune_switch_direct",
        "if_let_direct",
        "closure_let_direct",
    ] {
        let expected = common::load_fixture(&format!("expand/{}.expected", name));
        let again = Pipeline::new(format!("@ImplicitReturn\n{expected}"), name.to_string())
            .run_all()
            .unwrap();
        assert_eq!(again.text, expected, "Expanding '{}' twice changed it", name);
    }
}

#[test]
fn test_error_diagnostic_points_at_attribute() {
    let source = common::load_fixture("expansion_errors/missing_body");
    let pipeline = Pipeline::new(source, "missing_body.swift".to_string());
    let err = pipeline.run_all().unwrap_err();

    let rendered = err.format_with_source(pipeline.source());
    assert!(rendered.contains("error[E0001]: missing function body"));
    assert!(rendered.contains("--> missing_body.swift:1:1"));
    assert!(rendered.contains("@ImplicitReturn applied here"));
}

#[test]
fn test_nested_function_expanded_independently() {
    let source = "@ImplicitReturn
func outer() -> Int {
    func inner() -> Int {
        1
    }
    func log() {
        print(2)
    }
    inner()
}
";
    let output = Pipeline::new(source.to_string(), "nested.swift".to_string())
        .run_all()
        .unwrap();
    assert_eq!(
        output.text,
        "func outer() -> Int {
    func inner() -> Int {
        return 1
    }
    func log() {
        print(2)
    }
    return inner()
}
"
    );
}

#[test]
fn test_loop_body_untouched_by_closure_wrap() {
    let source = "@BareLastExprs
func count(_ limit: Int) -> Int {
    var total = 0
    for i in 0..<limit {
        if i == 3 {
            continue
        }
        total += i
    }
    total
}
";
    let output = Pipeline::new(source.to_string(), "loop.swift".to_string())
        .run_all()
        .unwrap();
    assert_eq!(
        output.text,
        "func count(_ limit: Int) -> Int {
    return {
        var total = 0
        for i in 0..<limit {
            if i == 3 {
                continue
            }
            total += i
        }
        return total
    }()
}
"
    );
}

#[test]
fn test_sequence_without_assignment_untouched() {
    let source = "@ImplicitReturn
func pick(_ a: Int?, _ b: Int) -> Int {
    a ?? b
}
";
    let output = Pipeline::new(source.to_string(), "pick.swift".to_string())
        .run_all()
        .unwrap();
    assert_eq!(
        output.text,
        "func pick(_ a: Int?, _ b: Int) -> Int {\n    return a ?? b\n}\n"
    );
}
