//! Integration Test: Panic-Free Production Code
//!
//! A panic inside a bind would take down the host's render thread. Errors are
//! propagated with `?` and stop at the hook boundary as a log line.
//!
//! **Policy**: no `.unwrap()`, `.expect(` or `panic!` in production code of the
//! core. The preview binary propagates with `anyhow` and is held to the same rule.

use architectural_enforcement::{assert_no_violations, find_violations, workspace_root};

fn panicky(code: &str) -> bool {
    code.contains(".unwrap()")
        || code.contains(".expect(")
        || code.contains("panic!(")
        || code.contains("unreachable!(")
        || code.contains("todo!(")
}

#[test]
fn test_no_panics_in_core() {
    let violations = find_violations("presence/core/src", |line| panicky(&line.code));
    assert_no_violations("panicking calls in core production code", &violations);
}

#[test]
fn test_no_panics_in_preview() {
    let violations = find_violations("presence/preview/src", |line| panicky(&line.code));
    assert_no_violations("panicking calls in preview production code", &violations);
}

#[test]
fn test_core_has_no_ui_or_runtime_dependencies() {
    let manifest = std::fs::read_to_string(workspace_root().join("presence/core/Cargo.toml"))
        .expect("core manifest readable");
    for forbidden in ["tokio", "ratatui", "crossterm", "async-trait", "futures"] {
        assert!(
            !manifest.contains(forbidden),
            "presence-core must not depend on {forbidden}"
        );
    }
}
