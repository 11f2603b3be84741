use bindsmith::pipeline::{self, GenerateOptions};
use bindsmith::{GeneratorConfig, Model};
use indoc::indoc;
use pretty_assertions::assert_eq;

const TREE: &str = indoc! {"
    - kind: namespace
      name: cv
      children:
        - kind: class
          name: Mat
          location: { file: include/cv/mat.hpp, line: 10 }
          children:
            - kind: function
              name: Mat
            - kind: function
              name: rows
              type: int
        - kind: function
          name: abs
          type: double
          children:
            - { kind: parameter, name: x, type: double }
        - kind: function
          name: abs
          type: bool
          children:
            - { kind: parameter, name: x, type: bool }
        - kind: class
          name: Broken
          directive: 'colour: red'
"};

fn write_tree(dir: &tempfile::TempDir) -> std::path::PathBuf {
    let path = dir.path().join("cv.yml");
    std::fs::write(&path, TREE).unwrap();
    path
}

#[test]
fn test_generate_writes_fragments() {
    let dir = tempfile::tempdir().unwrap();
    let tree = write_tree(&dir);
    let out = dir.path().join("cv.json");
    pipeline::run_generate(&GenerateOptions {
        tree,
        namespaces: vec!["cv".to_string()],
        out: Some(out.clone()),
        ..GenerateOptions::default()
    })
    .unwrap();

    let json: serde_json::Value = serde_json::from_str(&std::fs::read_to_string(out).unwrap()).unwrap();
    let namespace = &json["namespaces"][0];
    assert_eq!(namespace["id"], "cv");
    assert_eq!(namespace["classes"][0]["name"], "Mat");
    assert_eq!(namespace["function_table"]["entries"][0]["symbol"], "cv_abs");
    assert_eq!(namespace["functions"][0]["kind"], "group");

    let diagnostics = json["diagnostics"].as_array().unwrap();
    assert!(diagnostics.iter().any(|d| d["entity"] == "cv.Broken"));
}

#[test]
fn test_generate_skips_empty_namespaces() {
    let dir = tempfile::tempdir().unwrap();
    let roots = pipeline::load_tree(&write_tree(&dir)).unwrap();
    let model = Model::build(&roots, GeneratorConfig::default());
    let output = pipeline::generate(&model, &[]).unwrap();
    let ids: Vec<&str> = output.namespaces.iter().map(|ns| ns.id.as_str()).collect();
    assert_eq!(ids, ["cv"]);
}

#[test]
fn test_unknown_namespace_is_an_error() {
    let model = Model::build(&[], GeneratorConfig::default());
    let err = pipeline::generate(&model, &["gl".to_string()]).unwrap_err();
    assert!(err.to_string().contains("gl"), "{err}");
}

#[test]
fn test_json_tree() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("tree.json");
    std::fs::write(
        &path,
        r#"[{"kind": "namespace", "name": "gl", "children": [{"kind": "function", "name": "flush"}]}]"#,
    )
    .unwrap();
    let roots = pipeline::load_tree(&path).unwrap();
    let model = Model::build(&roots, GeneratorConfig::default());
    let output = pipeline::generate(&model, &["gl".to_string()]).unwrap();
    assert_eq!(output.namespaces[0].function_table.symbol_for("flush"), Some("gl_flush"));
}

#[test]
fn test_inspect_shows_dispatch_plan() {
    let dir = tempfile::tempdir().unwrap();
    let roots = pipeline::load_tree(&write_tree(&dir)).unwrap();
    let model = Model::build(&roots, GeneratorConfig::default());
    let summary = pipeline::inspect(&model, "cv").unwrap();
    assert!(summary.starts_with("namespace cv\n  class cv.Mat (Mat)\n"), "{summary}");
    assert!(summary.contains("    rows: int rows()\n"), "{summary}");
    assert!(summary.contains("  abs [2 overloads]\n"), "{summary}");
    assert!(summary.contains("    number -> #1\n"), "{summary}");
    assert!(summary.contains("    boolean -> #2\n"), "{summary}");
    assert!(summary.contains("    skipped: "), "{summary}");
}

#[test]
fn test_missing_tree_has_context() {
    let err = pipeline::load_tree(std::path::Path::new("/nonexistent/tree.yml")).unwrap_err();
    assert!(err.to_string().contains("failed to read declaration tree"));
}
