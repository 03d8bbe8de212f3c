//! Fatal error behavior across the pipeline
//!
//! Every lexical, syntax, semantic and runtime failure aborts the run and
//! comes back as a single `Error`.

use corelang::{Error, ErrorCategory, Interpreter, RunOptions};
use std::io::Cursor;

fn quiet() -> Interpreter {
    Interpreter::new(RunOptions {
        echo_program: false,
        prompt: false,
    })
}

fn run(source: &str, input: &str) -> (corelang::Result<()>, String, Interpreter) {
    let mut interpreter = quiet();
    let mut output = Vec::new();
    let result = interpreter.run_str(source, Cursor::new(input.to_string()), &mut output);
    (result, String::from_utf8(output).unwrap(), interpreter)
}

#[test]
fn test_duplicate_declaration_is_fatal() {
    let (result, output, _) = run("program int X; int Y, X; begin write X; end", "");
    let err = result.unwrap_err();
    assert_eq!(
        err,
        Error::AlreadyDeclared {
            name: "X".to_string()
        }
    );
    assert_eq!(err.category(), ErrorCategory::Semantic);
    assert!(output.is_empty());
}

#[test]
fn test_duplicate_within_one_list_is_fatal() {
    let (result, _, _) = run("program int X, X; begin X = 1; end", "");
    assert!(matches!(result, Err(Error::AlreadyDeclared { .. })));
}

#[test]
fn test_read_undeclared_is_fatal() {
    let (result, _, _) = run("program int X; begin read Y; end", "5\n");
    assert_eq!(
        result,
        Err(Error::NotDeclared {
            name: "Y".to_string()
        })
    );
}

#[test]
fn test_read_declared_consumes_one_line() {
    let (result, output, interpreter) =
        run("program int X, Y; begin read X; read Y; write Y, X; end", "4\n8\n15\n");
    result.unwrap();
    assert_eq!(output, "Y = 8\nX = 4\n");

    let x = interpreter.symbols().lookup("X").unwrap();
    assert!(interpreter.symbols().get(x).is_initialized());
}

#[test]
fn test_write_uninitialized_is_fatal() {
    let (result, _, _) = run("program int X; begin write X; end", "");
    assert_eq!(
        result,
        Err(Error::NotInitialized {
            name: "X".to_string()
        })
    );
}

#[test]
fn test_write_undeclared_is_fatal() {
    let (result, _, _) = run("program int X; begin X = 1; write Z; end", "");
    assert_eq!(
        result,
        Err(Error::NotDeclared {
            name: "Z".to_string()
        })
    );
}

#[test]
fn test_assign_undeclared_is_silent_noop() {
    let (result, output, interpreter) =
        run("program int X; begin Q = 5; X = 2; write X; end", "");
    result.unwrap();
    assert_eq!(output, "X = 2\n");

    let q = interpreter.symbols().lookup("Q").unwrap();
    let symbol = interpreter.symbols().get(q);
    assert!(!symbol.is_declared());
    assert!(!symbol.is_initialized());
    assert_eq!(symbol.value(), None);
}

#[test]
fn test_assign_undeclared_skips_rhs() {
    // The right-hand side would fail if it were evaluated
    let (result, _, _) = run("program int X; begin Q = X + 1; end", "");
    assert!(result.is_ok());
}

#[test]
fn test_uninitialized_in_condition_is_fatal() {
    let (result, _, _) = run(
        "program int X; begin while (X < 3) loop X = 1; end; end",
        "",
    );
    assert!(matches!(result, Err(Error::NotInitialized { .. })));
}

#[test]
fn test_invalid_token_is_lexical() {
    let (result, _, _) = run("program int lower; begin lower = 1; end", "");
    let err = result.unwrap_err();
    assert_eq!(err.category(), ErrorCategory::Lexical);
    assert!(err.to_string().contains("`lower`"));
}

#[test]
fn test_identifier_too_long_is_lexical() {
    let (result, _, _) = run("program int ABCDEFGH; begin ABCDEFGH = 1; end", "");
    assert!(matches!(result, Err(Error::InvalidToken { .. })));
}

#[test]
fn test_missing_end_is_syntax_error() {
    let (result, _, _) = run("program int X; begin X = 1;", "");
    let err = result.unwrap_err();
    assert_eq!(err.category(), ErrorCategory::Syntax);
    assert!(err.to_string().contains("end of input"));
}

#[test]
fn test_missing_program_keyword() {
    let (result, _, _) = run("int X; begin X = 1; end", "");
    assert!(matches!(
        result,
        Err(Error::UnexpectedToken { ref expected, .. }) if expected == "`program`"
    ));
}

#[test]
fn test_bad_read_input_is_runtime_error() {
    let (result, _, _) = run("program int X; begin read X; end", "4.5\n");
    let err = result.unwrap_err();
    assert_eq!(err.category(), ErrorCategory::Runtime);

    let (result, _, _) = run("program int X; begin read X; end", "");
    assert!(matches!(result, Err(Error::InputExhausted { .. })));
}

#[test]
fn test_syntax_error_reports_position() {
    let (result, _, _) = run("program\n  int X;\nbegin\n  X = 1\nend", "");
    match result {
        Err(Error::UnexpectedToken { line, col, .. }) => {
            assert_eq!((line, col), (5, 1));
        }
        other => panic!("Expected syntax error, got {:?}", other),
    }
}

#[test]
fn test_deep_nesting_is_reported_not_crashed() {
    let terms = vec!["1"; 3000].join(" + ");
    let source = format!("program int X; begin X = {}; write X; end", terms);
    let (result, output, _) = run(&source, "");
    let err = result.unwrap_err();
    assert_eq!(err.category(), ErrorCategory::Syntax);
    assert!(err.to_string().starts_with("Nesting deeper than"));
    assert!(output.is_empty());
}
