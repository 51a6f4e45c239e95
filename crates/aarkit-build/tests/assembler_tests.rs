//! Integration tests for the module assembly pipeline
//!
//! Runs the real assembler and steps over scratch project trees, with fake
//! aapt2/javac implementations standing in for the SDK tools.

mod common;

use aarkit_build::{
    Aapt2Process, BuildError, DiagnosticLevel, ModuleAssembler, ModuleStatus, SkipReason,
};
use common::*;
use pretty_assertions::assert_eq;
use std::fs;
use std::path::Path;
use std::sync::Arc;

fn assembler(root: &Path, include: &str, aapt2: &Arc<FakeAapt2>, javac: &Arc<FakeJavac>) -> ModuleAssembler {
    ModuleAssembler::new(root, settings(include), aapt2.clone(), javac.clone())
}

// ============================================================================
// Inclusion
// ============================================================================

#[test]
fn test_module_without_manifest_is_untouched() {
    let project = temp_project();
    let root = project.path();
    write_file(root, "nomanifest/src/main/res/values/strings.xml", STRINGS);
    write_file(root, "nomanifest/build/keep.txt", "stale");
    let (aapt2, javac) = fakes();

    let report = assembler(root, "[nomanifest]", &aapt2, &javac).run().unwrap();

    assert!(aapt2.calls().is_empty());
    assert!(javac.invocations().is_empty());
    assert!(root.join("nomanifest/build/keep.txt").exists());
    assert_eq!(
        report.modules[0].status,
        ModuleStatus::Skipped(SkipReason::MissingManifest)
    );
}

#[test]
fn test_module_without_resources_is_untouched() {
    let project = temp_project();
    let root = project.path();
    write_file(root, "nores/src/main/AndroidManifest.xml", MANIFEST);
    add_java(root, "nores", "A.java", "class A {}");
    write_file(root, "nores/build/keep.txt", "stale");
    let (aapt2, javac) = fakes();

    let report = assembler(root, "[nores]", &aapt2, &javac).run().unwrap();

    assert!(aapt2.calls().is_empty());
    assert!(javac.invocations().is_empty());
    assert!(root.join("nores/build/keep.txt").exists());
    assert_eq!(report.stats.skipped_modules, 1);
    assert_eq!(report.stats.assembled_modules, 0);
}

#[test]
fn test_unknown_names_and_empty_list_succeed() {
    let project = temp_project();
    let (aapt2, javac) = fakes();

    let report = assembler(project.path(), "not a list", &aapt2, &javac).run().unwrap();
    assert_eq!(report.stats.total_modules, 3);
    assert_eq!(report.stats.skipped_modules, 3);

    let report = assembler(project.path(), "[]", &aapt2, &javac).run().unwrap();
    assert!(report.modules.is_empty());
    assert!(aapt2.calls().is_empty());
}

// ============================================================================
// Pipeline
// ============================================================================

#[test]
fn test_two_modules_assembled_in_order() {
    let project = temp_project();
    let root = project.path();
    add_module(root, "a");
    add_java(root, "a", "com/example/a/Widget.java", "package com.example.a;\nclass Widget {}\n");
    add_module(root, "b");
    let (aapt2, javac) = fakes();

    let report = assembler(root, "[a, b]", &aapt2, &javac).run().unwrap();

    assert_eq!(report.assembled().collect::<Vec<_>>(), vec!["a", "b"]);
    assert_eq!(
        aapt2.compiled_dirs(),
        vec![root.join("a/src/main/res"), root.join("b/src/main/res")]
    );

    for module in ["a", "b"] {
        let bin = root.join(module).join("build/bin");
        assert!(bin.join("generated.aar.res").is_file(), "{module} archive");
        assert_eq!(fs::read_to_string(bin.join("res/R.txt")).unwrap(), SYMBOLS);
        assert!(root.join(module).join("build/gen/com/example/lib/R.java").is_file());
    }

    assert!(root.join("a/build/bin/java/classes/Widget.class").is_file());
    assert!(!root.join("b/build/bin/java").exists());
    assert_eq!(javac.invocations().len(), 1);
    assert_eq!(report.modules[0].steps, vec!["compileResources", "linkResources", "compileJava"]);
    assert_eq!(report.modules[1].steps, vec!["compileResources", "linkResources"]);
}

#[test]
fn test_existing_build_dir_removed_before_compile() {
    let project = temp_project();
    let root = project.path();
    add_module(root, "a");
    write_file(root, "a/build/stale/Old.class", "old");
    write_file(root, "a/build/bin/res/R.txt", "int string removed 0x7f010001\n");
    let (aapt2, javac) = fakes();

    assembler(root, "[a]", &aapt2, &javac).run().unwrap();

    assert!(!root.join("a/build/stale").exists());
    assert_eq!(aapt2.symbols_at_link(), vec![String::new()]);
}

#[test]
fn test_rerun_produces_identical_outputs() {
    let project = temp_project();
    let root = project.path();
    add_module(root, "a");
    add_java(root, "a", "A.java", "class A {}");
    let (aapt2, javac) = fakes();
    let assembler = assembler(root, "[a]", &aapt2, &javac);

    assembler.run().unwrap();
    let first = fs::read(root.join("a/build/bin/generated.aar.res")).unwrap();
    let first_symbols = fs::read(root.join("a/build/bin/res/R.txt")).unwrap();

    assembler.run().unwrap();
    let second = fs::read(root.join("a/build/bin/generated.aar.res")).unwrap();
    let second_symbols = fs::read(root.join("a/build/bin/res/R.txt")).unwrap();

    assert_eq!(first, second);
    assert_eq!(first_symbols, second_symbols);
}

#[test]
fn test_assets_passed_only_when_present() {
    let project = temp_project();
    let root = project.path();
    add_module(root, "with");
    write_file(root, "with/src/main/assets/data.json", "{}");
    add_module(root, "without");
    let (aapt2, javac) = fakes();

    assembler(root, "[with, without]", &aapt2, &javac).run().unwrap();

    let links: Vec<_> = aapt2
        .calls()
        .into_iter()
        .filter(|c| matches!(c, ResourceCall::Link(_)))
        .collect();
    assert_eq!(links.len(), 2);
    assert_eq!(
        flag_value(links[0].args(), "-A").map(Path::new),
        Some(root.join("with/src/main/assets").as_path())
    );
    assert_eq!(flag_value(links[1].args(), "-A"), None);
}

#[test]
fn test_warnings_recorded_without_failing() {
    let project = temp_project();
    let root = project.path();
    add_module(root, "a");
    add_java(root, "a", "A.java", "class A {}");
    let aapt2 = Arc::new(FakeAapt2::new());
    let javac = Arc::new(FakeJavac {
        warn_each_file: true,
        ..FakeJavac::default()
    });

    let report = assembler(root, "[a]", &aapt2, &javac).run().unwrap();

    assert_eq!(report.modules[0].warning_count(), 1);
    assert_eq!(report.diagnostics().count(), 1);
}

// ============================================================================
// Failure handling
// ============================================================================

#[test]
fn test_syntax_error_stops_the_run() {
    let project = temp_project();
    let root = project.path();
    add_module(root, "foo");
    add_java(root, "foo", "com/example/Ok.java", "class Ok {}\n");
    add_java(root, "foo", "com/example/Broken.java", "class Broken {\n    int x = }\n");
    add_module(root, "bar");
    let (aapt2, javac) = fakes();

    let err = assembler(root, "[foo, bar]", &aapt2, &javac).run().unwrap_err();

    match &err {
        BuildError::StepFailed { module, step, .. } => {
            assert_eq!(module, "foo");
            assert_eq!(step, "compileJava");
        }
        other => panic!("unexpected error: {other:?}"),
    }
    let errors: Vec<_> = err
        .diagnostics()
        .iter()
        .filter(|d| d.level == DiagnosticLevel::Error)
        .collect();
    assert_eq!(errors.len(), 1);
    let location = errors[0].location.as_ref().unwrap();
    assert!(location.file.ends_with("Broken.java"));
    assert_eq!(location.line, Some(2));

    assert!(!root.join("bar/build").exists());
    assert!(aapt2
        .compiled_dirs()
        .iter()
        .all(|dir| !dir.starts_with(root.join("bar"))));
}

#[test]
fn test_resource_compile_failure_stops_before_link() {
    let project = temp_project();
    let root = project.path();
    add_module(root, "a");
    add_module(root, "b");
    let aapt2 = Arc::new(FakeAapt2 {
        fail_compile: vec!["a".to_string()],
        ..FakeAapt2::default()
    });
    let javac = Arc::new(FakeJavac::new());

    let err = assembler(root, "[a, b]", &aapt2, &javac).run().unwrap_err();

    assert!(matches!(err, BuildError::StepFailed { ref step, .. } if step == "compileResources"));
    assert_eq!(aapt2.calls().len(), 1);
    assert!(!root.join("b/build").exists());
}

#[test]
fn test_link_failure_stops_the_run() {
    let project = temp_project();
    let root = project.path();
    add_module(root, "a");
    add_java(root, "a", "A.java", "class A {}");
    let aapt2 = Arc::new(FakeAapt2 {
        fail_link: true,
        ..FakeAapt2::default()
    });
    let javac = Arc::new(FakeJavac::new());

    let err = assembler(root, "[a]", &aapt2, &javac).run().unwrap_err();

    assert!(matches!(err, BuildError::StepFailed { ref step, .. } if step == "linkResources"));
    assert!(javac.invocations().is_empty());
    assert_eq!(fs::read_to_string(root.join("a/build/bin/res/R.txt")).unwrap(), "");
}

#[test]
fn test_error_state_does_not_leak_between_runs() {
    let project = temp_project();
    let root = project.path();
    add_module(root, "a");
    add_java(root, "a", "A.java", "class A {\n int x = }\n");
    let (aapt2, javac) = fakes();
    let assembler = assembler(root, "[a]", &aapt2, &javac);

    assert!(assembler.run().is_err());

    add_java(root, "a", "A.java", "class A {\n int x = 1; }\n");
    let report = assembler.run().unwrap();
    assert_eq!(report.stats.assembled_modules, 1);
    assert!(root.join("a/build/bin/java/classes/A.class").is_file());
}

#[test]
fn test_undeletable_build_dir_stops_the_run() {
    let project = temp_project();
    let root = project.path();
    add_module(root, "a");
    add_module(root, "b");
    write_file(root, "a/build", "not a directory");
    let (aapt2, javac) = fakes();

    let err = assembler(root, "[a, b]", &aapt2, &javac).run().unwrap_err();

    match err {
        BuildError::IoError { path, .. } => assert_eq!(path, root.join("a/build")),
        other => panic!("unexpected error: {other:?}"),
    }
    assert!(aapt2.calls().is_empty());
    assert!(javac.invocations().is_empty());
    assert!(!root.join("b/build").exists());
}

#[test]
fn test_missing_resource_tool_is_reported() {
    let project = temp_project();
    let root = project.path();
    add_module(root, "a");
    let javac = Arc::new(FakeJavac::new());

    let assembler = ModuleAssembler::new(
        root,
        settings("[a]"),
        Arc::new(Aapt2Process::new("/nonexistent/aarkit-test/aapt2")),
        javac,
    );

    let err = assembler.run().unwrap_err();
    assert!(matches!(err, BuildError::ToolUnavailable { .. }));
}

#[test]
fn test_duplicate_names_build_twice() {
    let project = temp_project();
    let root = project.path();
    add_module(root, "a");
    let (aapt2, javac) = fakes();

    let report = assembler(root, "[a, a]", &aapt2, &javac).run().unwrap();

    assert_eq!(report.stats.assembled_modules, 2);
    assert_eq!(aapt2.compiled_dirs().len(), 2);
}
