use super::*;
use pretty_assertions::assert_eq;

fn parse(sketch: &str) -> ParseResult {
    TreeParser::new().parse(sketch)
}

fn names(nodes: &[Node]) -> Vec<&str> {
    nodes.iter().map(|n| n.name.as_str()).collect()
}

#[test]
fn parses_glyph_tree() {
    let result = parse(
        "project/\n\
         ├── src/\n\
         │   ├── app.js\n\
         │   └── index.css\n\
         └── README.md\n",
    );

    assert!(result.warnings.is_empty());
    assert_eq!(names(&result.roots), vec!["project"]);

    let project = &result.roots[0];
    assert_eq!(project.kind, NodeKind::Folder);
    assert_eq!(names(&project.children), vec!["src", "README.md"]);

    let src = &project.children[0];
    assert_eq!(src.kind, NodeKind::Folder);
    assert_eq!(names(&src.children), vec!["app.js", "index.css"]);
    assert_eq!(src.children[0].kind, NodeKind::File);

    assert_eq!(project.children[1].kind, NodeKind::File);
}

#[test]
fn parses_space_indented_tree() {
    let result = parse(
        "src/\n\
         \x20 components/\n\
         \x20   Button.jsx\n\
         \x20 app.js\n",
    );

    let src = &result.roots[0];
    assert_eq!(names(&src.children), vec!["components", "app.js"]);
    assert_eq!(names(&src.children[0].children), vec!["Button.jsx"]);
}

#[test]
fn glyph_and_space_trees_produce_the_same_shape() {
    let glyphs = parse(
        "src/\n\
         ├── components/\n\
         │   └── Button.jsx\n\
         └── app.js\n",
    );
    let spaces = parse(
        "src/\n\
         \x20 components/\n\
         \x20   Button.jsx\n\
         \x20 app.js\n",
    );

    assert_eq!(glyphs.roots, spaces.roots);
}

#[test]
fn supports_multiple_roots() {
    let result = parse("src/\npublic/\nREADME.md\n");
    assert_eq!(names(&result.roots), vec!["src", "public", "README.md"]);
}

#[test]
fn strips_decorative_emoji() {
    let result = parse("📁 src/\n├── 📄 app.js\n");
    let src = &result.roots[0];
    assert_eq!(src.name, "src");
    assert_eq!(names(&src.children), vec!["app.js"]);
}

#[test]
fn strips_inline_annotations() {
    let result = parse(
        "src/\n\
         ├── app.js # main entry\n\
         ├── utils/ // helpers live here\n\
         ├── config.json (optional)\n\
         └── notes.md -- scratch\n",
    );

    let src = &result.roots[0];
    assert_eq!(
        names(&src.children),
        vec!["app.js", "utils", "config.json", "notes.md"]
    );
    assert_eq!(src.children[1].kind, NodeKind::Folder);
}

#[test]
fn annotation_markers_inside_names_are_kept() {
    let result = parse("my--file.txt\n");
    assert_eq!(result.roots[0].name, "my--file.txt");
}

#[test]
fn drops_children_of_files_with_a_warning() {
    let result = parse(
        "app.js\n\
         ├── impossible.js\n",
    );

    assert_eq!(names(&result.roots), vec!["app.js"]);
    assert!(result.roots[0].children.is_empty());
    assert_eq!(result.warnings.len(), 1);
    assert_eq!(result.warnings[0].reason, WarningReason::ChildOfFile);
    assert_eq!(result.warnings[0].line_number, 2);
}

#[test]
fn warns_on_lines_with_no_usable_name() {
    let result = parse("src/\n├── # just a comment\n");
    assert_eq!(result.warnings.len(), 1);
    assert_eq!(result.warnings[0].reason, WarningReason::EmptyName);
}

#[test]
fn bare_connector_lines_are_silently_discarded() {
    let result = parse("src/\n│\n└── app.js\n");
    assert!(result.warnings.is_empty());
    assert_eq!(names(&result.roots[0].children), vec!["app.js"]);
}

#[test]
fn classifies_kinds() {
    let result = parse(
        "src\n\
         bin\n\
         Dockerfile\n\
         .gitignore\n\
         styles.css\n\
         dist/\n",
    );

    let kinds: Vec<NodeKind> = result.roots.iter().map(|n| n.kind).collect();
    assert_eq!(
        kinds,
        vec![
            NodeKind::Folder, // well-known folder name
            NodeKind::Folder, // no dot
            NodeKind::File,   // well-known extensionless file
            NodeKind::File,
            NodeKind::File,
            NodeKind::Folder, // trailing slash
        ]
    );
}

#[test]
fn dedent_past_several_levels() {
    let result = parse(
        "a/\n\
         \x20   b/\n\
         \x20 c/\n",
    );

    let a = &result.roots[0];
    assert_eq!(names(&a.children), vec!["b", "c"]);
}

#[test]
fn over_indented_first_line_becomes_a_root() {
    let result = parse("    deep.js\n");
    assert_eq!(names(&result.roots), vec!["deep.js"]);
}

#[test]
fn duplicate_siblings_survive_parsing() {
    let result = parse("src/\n├── app.js\n├── app.js\n");
    assert_eq!(names(&result.roots[0].children), vec!["app.js", "app.js"]);
    assert!(result.warnings.is_empty());
}

#[test]
fn validate_reports_duplicates_and_illegal_names() {
    let result = parse("src/\n├── app.js\n├── app.js\n├── bad|name.js\n");
    let issues = validate(&result.roots);

    assert_eq!(issues.len(), 2);
    assert_eq!(issues[0].kind, IssueKind::DuplicateSibling);
    assert_eq!(issues[0].path, "src/app.js");
    assert_eq!(issues[1].kind, IssueKind::IllegalCharacter);
}

#[test]
fn validate_reports_traversal_names() {
    let roots = vec![Node::folder("..")];
    let issues = validate(&roots);
    assert_eq!(issues.len(), 1);
    assert_eq!(issues[0].kind, IssueKind::PathTraversal);
}

#[test]
fn validate_passes_a_clean_tree() {
    let result = parse("src/\n├── app.js\n└── index.css\n");
    assert!(validate(&result.roots).is_empty());
}
