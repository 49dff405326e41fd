//! Integration Test: Render Thread Rules
//!
//! Every bind runs synchronously on the host's UI render thread. Production
//! code in the core MUST NOT sleep, spawn threads, or use async.
//!
//! **Exceptions**: test code

use architectural_enforcement::{assert_no_violations, find_violations, rust_files};

const CORE_SRC: &str = "presence/core/src";

#[test]
fn test_core_sources_found() {
    assert!(
        !rust_files(CORE_SRC).is_empty(),
        "no sources under {CORE_SRC}; is the workspace layout intact?"
    );
}

#[test]
fn test_no_sleep_in_core() {
    let violations = find_violations(CORE_SRC, |line| line.code.contains("sleep("));
    assert_no_violations("sleep() on the render thread", &violations);
}

#[test]
fn test_no_thread_spawn_in_core() {
    let violations = find_violations(CORE_SRC, |line| {
        line.code.contains("thread::spawn") || line.code.contains("std::thread")
    });
    assert_no_violations("background threads in the core", &violations);
}

#[test]
fn test_no_async_in_core() {
    let violations = find_violations(CORE_SRC, |line| {
        line.code.contains("async fn")
            || line.code.contains(".await")
            || line.code.contains("tokio::")
    });
    assert_no_violations("async code in the core", &violations);
}

#[test]
fn test_file_io_only_in_settings_file_module() {
    let violations = find_violations(CORE_SRC, |line| {
        line.code.contains("std::fs") && !line.path.ends_with("config.rs")
    });
    assert_no_violations("file I/O outside config.rs", &violations);
}
