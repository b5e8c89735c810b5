//! CLI integration tests for the jsonapi-resource binary.

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

fn cmd() -> Command {
    Command::new(assert_cmd::cargo::cargo_bin!("jsonapi-resource"))
}

// Helper to create a temp source file
fn write_temp_file(dir: &TempDir, name: &str, content: &str) -> std::path::PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, content).unwrap();
    path
}

const USER: &str = r#"{
    "id": 7,
    "email": "a@b.com",
    "department": { "id": 3 },
    "roles": [{ "id": 1 }, { "id": 2 }]
}"#;

mod serialize_command {
    use super::*;

    #[test]
    fn basic_serialize() {
        let dir = TempDir::new().unwrap();
        let source = write_temp_file(&dir, "user.json", USER);

        cmd()
            .args([
                "serialize",
                source.to_str().unwrap(),
                "--type",
                "users",
                "--attribute",
                "email",
            ])
            .assert()
            .success()
            .stdout(predicate::str::contains(
                r#"{"id":7,"type":"users","attributes":{"email":"a@b.com"}}"#,
            ));
    }

    #[test]
    fn type_derived_from_name() {
        let dir = TempDir::new().unwrap();
        let source = write_temp_file(&dir, "user.json", USER);

        cmd()
            .args([
                "serialize",
                source.to_str().unwrap(),
                "--name",
                "UserSerializer",
            ])
            .assert()
            .success()
            .stdout(predicate::str::contains(r#"{"id":7,"type":"user"}"#));
    }

    #[test]
    fn serialize_relations() {
        let dir = TempDir::new().unwrap();
        let source = write_temp_file(&dir, "user.json", USER);

        cmd()
            .args([
                "serialize",
                source.to_str().unwrap(),
                "--type",
                "users",
                "-r",
                "department:one:departments:dept",
                "-r",
                "roles:many:roles",
            ])
            .assert()
            .success()
            .stdout(predicate::str::contains(
                r#""dept":{"data":{"id":3,"type":"departments"}}"#,
            ))
            .stdout(predicate::str::contains(
                r#""roles":[{"data":{"id":1,"type":"roles"}},{"data":{"id":2,"type":"roles"}}]"#,
            ))
            .stdout(predicate::str::contains("attributes").not());
    }

    #[test]
    fn attribute_key_rename() {
        let dir = TempDir::new().unwrap();
        let source = write_temp_file(&dir, "user.json", USER);

        cmd()
            .args([
                "serialize",
                source.to_str().unwrap(),
                "-a",
                "email:contact",
            ])
            .assert()
            .success()
            .stdout(predicate::str::contains(r#""attributes":{"contact":"a@b.com"}"#));
    }

    #[test]
    fn custom_id_field() {
        let dir = TempDir::new().unwrap();
        let source = write_temp_file(&dir, "user.json", r#"{"uuid":"u-1"}"#);

        cmd()
            .args([
                "serialize",
                source.to_str().unwrap(),
                "--id-field",
                "uuid",
            ])
            .assert()
            .success()
            .stdout(predicate::str::contains(r#""id":"u-1""#));
    }

    #[test]
    fn serialize_from_stdin() {
        cmd()
            .args(["serialize", "-", "--type", "users"])
            .write_stdin(r#"{"id":5}"#)
            .assert()
            .success()
            .stdout(predicate::str::contains(r#"{"id":5,"type":"users"}"#));
    }

    #[test]
    fn serialize_with_pretty() {
        let dir = TempDir::new().unwrap();
        let source = write_temp_file(&dir, "user.json", USER);

        cmd()
            .args(["serialize", source.to_str().unwrap(), "--pretty"])
            .assert()
            .success()
            // Pretty output has newlines and indentation
            .stdout(predicate::str::contains("{\n"));
    }

    #[test]
    fn serialize_with_output_file() {
        let dir = TempDir::new().unwrap();
        let source = write_temp_file(&dir, "user.json", USER);
        let output = dir.path().join("out.json");

        cmd()
            .args([
                "serialize",
                source.to_str().unwrap(),
                "-a",
                "email",
                "--output",
                output.to_str().unwrap(),
            ])
            .assert()
            .success()
            .stdout(predicate::str::is_empty());

        let content = fs::read_to_string(&output).unwrap();
        let doc: serde_json::Value = serde_json::from_str(&content).unwrap();
        assert_eq!(doc["attributes"]["email"], "a@b.com");
    }
}

mod error_handling {
    use super::*;

    #[test]
    fn file_not_found() {
        cmd()
            .args(["serialize", "/nonexistent/user.json"])
            .assert()
            .code(3)
            .stderr(predicate::str::contains("file not found"));
    }

    #[test]
    fn invalid_json_source() {
        let dir = TempDir::new().unwrap();
        let source = write_temp_file(&dir, "bad.json", "{ not json");

        cmd()
            .args(["serialize", source.to_str().unwrap()])
            .assert()
            .code(2)
            .stderr(predicate::str::contains("invalid JSON"));
    }

    #[test]
    fn source_not_an_object() {
        let dir = TempDir::new().unwrap();
        let source = write_temp_file(&dir, "list.json", "[1, 2]");

        cmd()
            .args(["serialize", source.to_str().unwrap()])
            .assert()
            .code(2)
            .stderr(predicate::str::contains("must be a JSON object"));
    }

    #[test]
    fn attribute_named_id() {
        let dir = TempDir::new().unwrap();
        let source = write_temp_file(&dir, "user.json", USER);

        cmd()
            .args(["serialize", source.to_str().unwrap(), "-a", "id"])
            .assert()
            .code(2)
            .stderr(predicate::str::contains("reserved"));
    }

    #[test]
    fn unknown_relationship() {
        let dir = TempDir::new().unwrap();
        let source = write_temp_file(&dir, "user.json", USER);

        cmd()
            .args([
                "serialize",
                source.to_str().unwrap(),
                "-r",
                "roles:several:roles",
            ])
            .assert()
            .code(2)
            .stderr(predicate::str::contains("unknown relationship"));
    }

    #[test]
    fn malformed_relation_flag() {
        let dir = TempDir::new().unwrap();
        let source = write_temp_file(&dir, "user.json", USER);

        cmd()
            .args(["serialize", source.to_str().unwrap(), "-r", "roles:many"])
            .assert()
            .code(2)
            .stderr(predicate::str::contains("expected NAME:TO:TYPE"));
    }

    #[test]
    fn missing_property() {
        let dir = TempDir::new().unwrap();
        let source = write_temp_file(&dir, "user.json", USER);

        cmd()
            .args(["serialize", source.to_str().unwrap(), "-a", "phone"])
            .assert()
            .code(1)
            .stderr(predicate::str::contains("missing property at phone"));
    }

    #[test]
    fn null_association() {
        let dir = TempDir::new().unwrap();
        let source = write_temp_file(&dir, "user.json", r#"{"id":1,"department":null}"#);

        cmd()
            .args([
                "serialize",
                source.to_str().unwrap(),
                "-r",
                "department:one:departments",
            ])
            .assert()
            .code(1)
            .stderr(predicate::str::contains("is null"));
    }
}

mod required_args {
    use super::*;

    #[test]
    fn missing_source() {
        cmd()
            .args(["serialize"])
            .assert()
            .failure()
            .stderr(predicate::str::contains("required"));
    }

    #[test]
    fn missing_subcommand() {
        cmd().assert().failure();
    }
}

mod help_and_version {
    use super::*;

    #[test]
    fn help_lists_serialize() {
        cmd()
            .arg("--help")
            .assert()
            .success()
            .stdout(predicate::str::contains("serialize"));
    }

    #[test]
    fn version() {
        cmd()
            .arg("--version")
            .assert()
            .success()
            .stdout(predicate::str::contains("jsonapi-resource"));
    }
}
