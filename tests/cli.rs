use std::fs;
use std::process::Command;

fn bin() -> Command {
    Command::new(env!("CARGO_BIN_EXE_jsdoc-type-render"))
}

#[test]
fn renders_ndjson_in_input_order() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("trees.ndjson");
    fs::write(
        &input,
        concat!(
            r#"{"type": "NameExpression", "name": "goog.ui.Menu", "nullable": false}"#, "\n",
            r#"{"type": "TypeApplication", "expression": {"type": "NameExpression", "name": "Array"}, "applications": [{"type": "NameExpression", "name": "string"}]}"#, "\n",
            "\n",
            r#"{"type": "UnknownLiteral"}"#, "\n",
        ),
    )
    .unwrap();
    let links = dir.path().join("links.json");
    fs::write(&links, r#"{"goog.ui.Menu": "MyClass.html"}"#).unwrap();
    let out = dir.path().join("nested/out.txt");

    let status = bin()
        .args(["render", "--ndjson", "--html-safe", "--link-class", "k", "-i"])
        .arg(&input)
        .arg("--links")
        .arg(&links)
        .arg("-o")
        .arg(&out)
        .status()
        .unwrap();
    assert!(status.success());
    assert_eq!(
        fs::read_to_string(&out).unwrap(),
        "!<a href=\"MyClass.html\" class=\"k\">goog.ui.Menu</a>\nArray&lt;string&gt;\n?\n"
    );
}

#[test]
fn json_pointer_and_options_file() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("doc.json");
    fs::write(
        &input,
        r#"{"doclet": {"type": {"type": "NameExpression", "name": "x", "optional": true, "repeatable": true}}}"#,
    )
    .unwrap();
    let options = dir.path().join("options.json");
    fs::write(&options, r#"{"suppressModifiers": true}"#).unwrap();

    let output = bin()
        .args(["render", "--json-pointer", "/doclet/type", "--options"])
        .arg(&options)
        .arg("-i")
        .arg(&input)
        .output()
        .unwrap();
    assert!(output.status.success());
    assert_eq!(String::from_utf8(output.stdout).unwrap(), "x\n");
}

#[test]
fn malformed_tree_fails_with_path() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("bad.json");
    fs::write(&input, r#"{"type": "TypeUnion", "elements": [{"nullable": "maybe"}]}"#).unwrap();

    let output = bin().args(["render", "-i"]).arg(&input).output().unwrap();
    assert!(!output.status.success());
    let stderr = String::from_utf8(output.stderr).unwrap();
    assert!(stderr.contains("elements[0].nullable"), "{stderr}");
}

#[test]
fn empty_input_prints_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("empty.ndjson");
    fs::write(&input, "\n\n").unwrap();

    let output = bin().args(["render", "--ndjson", "-i"]).arg(&input).output().unwrap();
    assert!(output.status.success());
    assert!(output.stdout.is_empty());
}
