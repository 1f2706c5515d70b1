//! Integration tests for the `stencil init` command.

use assert_cmd::Command;
use httpmock::prelude::*;
use predicates::prelude::*;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

fn stencil(config_dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("stencil").unwrap();
    cmd.env("STENCIL_CONFIG_DIR", config_dir.path());
    cmd
}

/// Write a local catalog with a multi-file `name` template, jbang-style:
/// a primary mapped by pattern, a content-templated companion, and a
/// verbatim companion.
fn write_multifile_catalog(dir: &Path, target_pattern: &str) -> String {
    fs::write(dir.join("file1.java"), "public class {basename} {}").unwrap();
    fs::write(dir.join("file2.java.tmpl"), "// {basename} with {scriptref}").unwrap();
    fs::write(dir.join("file3.md"), "# notes").unwrap();
    fs::write(
        dir.join("catalog.json"),
        format!(
            r#"{{"templates": {{"name": {{"files": ["{target_pattern}=file1.java", "file2.java.tmpl", "file3.md"]}}}}}}"#
        ),
    )
    .unwrap();
    dir.join("catalog.json").display().to_string()
}

#[test]
fn init_builtin_hello() {
    let config = TempDir::new().unwrap();
    let work = TempDir::new().unwrap();
    let out = work.path().join("Greet.java");

    stencil(&config)
        .args(["init", out.to_str().unwrap()])
        .assert()
        .success();

    let content = fs::read_to_string(&out).unwrap();
    assert!(content.contains("class Greet"));
}

#[test]
fn init_builtin_cli_writes_companion() {
    let config = TempDir::new().unwrap();
    let work = TempDir::new().unwrap();
    let out = work.path().join("App.java");

    stencil(&config)
        .args(["init", "--template=cli", out.to_str().unwrap()])
        .assert()
        .success();

    assert!(fs::read_to_string(&out).unwrap().contains("class App"));
    assert!(work.path().join("README.md").exists());
}

#[test]
fn init_extensionless_target() {
    let config = TempDir::new().unwrap();
    let work = TempDir::new().unwrap();
    let out = work.path().join("xyzplug");

    stencil(&config)
        .args(["init", out.to_str().unwrap()])
        .assert()
        .success();

    assert!(fs::read_to_string(&out).unwrap().contains("class xyzplug"));
}

#[test]
fn init_extensionless_kebab_target() {
    let config = TempDir::new().unwrap();
    let work = TempDir::new().unwrap();
    let out = work.path().join("xyz-plug");

    stencil(&config)
        .args(["init", out.to_str().unwrap()])
        .assert()
        .success();

    assert!(fs::read_to_string(&out).unwrap().contains("class XyzPlug"));
}

#[test]
fn init_missing_template_produces_no_file() {
    let config = TempDir::new().unwrap();
    let work = TempDir::new().unwrap();
    let out = work.path().join("edit.java");

    stencil(&config)
        .args(["init", "--template=bogus", out.to_str().unwrap()])
        .assert()
        .failure()
        .code(3)
        .stderr(predicate::str::contains("bogus"));

    assert!(!out.exists());
}

#[test]
fn init_invalid_class_name_produces_no_file() {
    let config = TempDir::new().unwrap();
    let work = TempDir::new().unwrap();
    let out = work.path().join("bad.name.java");

    stencil(&config)
        .args(["init", out.to_str().unwrap()])
        .assert()
        .failure()
        .code(2)
        .stderr(predicate::str::contains("not a valid class name"));

    assert!(!out.exists());
}

#[test]
fn init_existing_target_requires_force() {
    let config = TempDir::new().unwrap();
    let work = TempDir::new().unwrap();
    let out = work.path().join("Greet.java");
    fs::write(&out, "precious").unwrap();

    stencil(&config)
        .args(["init", out.to_str().unwrap()])
        .assert()
        .failure()
        .code(7)
        .stderr(predicate::str::contains("already exists"));
    assert_eq!(fs::read_to_string(&out).unwrap(), "precious");

    stencil(&config)
        .args(["init", "--force", out.to_str().unwrap()])
        .assert()
        .success();
    assert!(fs::read_to_string(&out).unwrap().contains("class Greet"));
}

#[test]
fn init_multifile_renders_companions_with_scriptref() {
    let config = TempDir::new().unwrap();
    let work = TempDir::new().unwrap();
    let catalog_ref = write_multifile_catalog(work.path(), "{filename}");

    stencil(&config)
        .args(["catalog", "add", "local", &catalog_ref])
        .assert()
        .success();

    let app_dir = work.path().join("app");
    fs::create_dir_all(&app_dir).unwrap();
    let out = app_dir.join("edit.java");

    stencil(&config)
        .args(["init", "-t", "name", out.to_str().unwrap()])
        .assert()
        .success();

    assert_eq!(
        fs::read_to_string(&out).unwrap(),
        "public class {basename} {}",
        "non-.tmpl sources are copied verbatim"
    );
    let f2 = fs::read_to_string(app_dir.join("file2.java")).unwrap();
    assert_eq!(f2, format!("// edit with {}", out.display()));
    assert!(app_dir.join("file3.md").exists());
}

#[test]
fn init_multifile_with_basename_pattern() {
    let config = TempDir::new().unwrap();
    let work = TempDir::new().unwrap();
    let catalog_ref = write_multifile_catalog(work.path(), "{basename}.java");

    stencil(&config)
        .args(["catalog", "add", "local", &catalog_ref])
        .assert()
        .success();

    let out = work.path().join("app").join("edit.java");
    stencil(&config)
        .args(["init", "-t", "name", out.to_str().unwrap()])
        .assert()
        .success();
    assert!(out.exists());
}

#[test]
fn init_extensionless_request_gets_implicit_extension() {
    let config = TempDir::new().unwrap();
    let work = TempDir::new().unwrap();
    let catalog_ref = write_multifile_catalog(work.path(), "{basename}.java");

    stencil(&config)
        .args(["catalog", "add", "local", &catalog_ref])
        .assert()
        .success();

    let app_dir = work.path().join("app");
    fs::create_dir_all(&app_dir).unwrap();
    let out = app_dir.join("edit");

    stencil(&config)
        .args(["init", "-t", "name", out.to_str().unwrap()])
        .assert()
        .success();

    // The primary gains the mapping's extension, sibling to the request.
    assert!(app_dir.join("edit.java").exists());
    assert!(!out.exists());
    let f2 = fs::read_to_string(app_dir.join("file2.java")).unwrap();
    assert_eq!(f2, format!("// edit with {}", out.display()));
}

#[test]
fn init_extensionless_request_in_subdirectory() {
    let config = TempDir::new().unwrap();
    let work = TempDir::new().unwrap();
    let catalog_ref = write_multifile_catalog(work.path(), "{basename}.java");

    stencil(&config)
        .args(["catalog", "add", "local", &catalog_ref])
        .assert()
        .success();

    let sub = work.path().join("app").join("sub");
    fs::create_dir_all(&sub).unwrap();
    let out = sub.join("edit");

    stencil(&config)
        .args(["init", "-t", "name", out.to_str().unwrap()])
        .assert()
        .success();

    assert!(sub.join("edit.java").exists());
    assert!(sub.join("file2.java").exists());
}

#[test]
fn init_fails_when_no_mapping_matches_requested_name() {
    let config = TempDir::new().unwrap();
    let work = TempDir::new().unwrap();
    let catalog_ref = write_multifile_catalog(work.path(), "{basename}.java");

    stencil(&config)
        .args(["catalog", "add", "local", &catalog_ref])
        .assert()
        .success();

    let out = work.path().join("app").join("edit.md");
    stencil(&config)
        .args(["init", "-t", "name", out.to_str().unwrap()])
        .assert()
        .failure()
        .code(2);
    assert!(!out.exists());
}

#[test]
fn init_properties_substitute_into_content() {
    let config = TempDir::new().unwrap();
    let work = TempDir::new().unwrap();
    fs::write(work.path().join("file1.java.tmpl"), "{prop1}{prop2}").unwrap();
    fs::write(
        work.path().join("catalog.json"),
        r#"{"templates": {"name": {"files": ["{filename}=file1.java.tmpl"]}}}"#,
    )
    .unwrap();

    stencil(&config)
        .args([
            "catalog",
            "add",
            "local",
            work.path().join("catalog.json").to_str().unwrap(),
        ])
        .assert()
        .success();

    let out = work.path().join("result.java");
    stencil(&config)
        .args([
            "init",
            "--template=name",
            "-Dprop1=propvalue",
            "-Dprop2=rocks",
            out.to_str().unwrap(),
        ])
        .assert()
        .success();

    assert_eq!(fs::read_to_string(&out).unwrap(), "propvaluerocks");
}

#[test]
fn init_from_remote_catalog() {
    let config = TempDir::new().unwrap();
    let work = TempDir::new().unwrap();
    let server = MockServer::start();

    server.mock(|when, then| {
        when.method(GET).path("/cat.json");
        then.status(200)
            .body(r#"{"templates": {"cli": {"files": ["{filename}=main.java.tmpl"]}}}"#);
    });
    server.mock(|when, then| {
        when.method(GET).path("/main.java.tmpl");
        then.status(200).body("public class {basename} { /* cli */ }");
    });

    stencil(&config)
        .args(["catalog", "add", "team", &server.url("/cat.json")])
        .assert()
        .success();

    let out = work.path().join("App.java");
    stencil(&config)
        .args(["init", "--template=cli", out.to_str().unwrap()])
        .assert()
        .success();

    assert_eq!(
        fs::read_to_string(&out).unwrap(),
        "public class App { /* cli */ }"
    );
}

#[test]
fn cyclic_catalog_reference_is_rejected() {
    let config = TempDir::new().unwrap();
    let work = TempDir::new().unwrap();
    fs::write(
        work.path().join("a.json"),
        r#"{"catalogs": {"self": {"catalog-ref": "a.json"}}}"#,
    )
    .unwrap();

    stencil(&config)
        .args([
            "catalog",
            "add",
            "a",
            work.path().join("a.json").to_str().unwrap(),
        ])
        .assert()
        .success();

    stencil(&config)
        .args(["catalog", "list", "a@self"])
        .assert()
        .failure()
        .code(6)
        .stderr(predicate::str::contains("Cyclic catalog reference"));
}
