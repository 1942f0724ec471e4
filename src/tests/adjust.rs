use super::TestUtils;
use crate::adjust::{conventions_are_wellformed, StructureAdjuster};
use crate::context::Framework;
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

#[test]
fn convention_tables_are_wellformed() {
    assert!(conventions_are_wellformed());
}

#[test]
fn existing_meaningful_files_are_dropped_from_the_tree() {
    let temp_dir = TempDir::new().unwrap();
    fs::create_dir(temp_dir.path().join("src")).unwrap();
    fs::write(temp_dir.path().join("src/app.js"), "console.log(\"x\")").unwrap();

    let roots = TestUtils::parse("src/\n├── app.js\n└── index.js\n");
    let adjuster = StructureAdjuster::new(TestUtils::plain_context(temp_dir.path()));
    let adjusted = adjuster.adjust(roots);

    // the folder is always retained; only the populated file is dropped
    assert_eq!(adjusted.len(), 1);
    let src = &adjusted[0];
    assert_eq!(src.children.len(), 1);
    assert_eq!(src.children[0].name, "index.js");
}

#[test]
fn empty_files_stay_in_the_tree_for_repopulation() {
    let temp_dir = TempDir::new().unwrap();
    fs::create_dir(temp_dir.path().join("src")).unwrap();
    fs::write(temp_dir.path().join("src/app.js"), "").unwrap();

    let roots = TestUtils::parse("src/\n└── app.js\n");
    let adjuster = StructureAdjuster::new(TestUtils::plain_context(temp_dir.path()));
    let adjusted = adjuster.adjust(roots);

    assert_eq!(adjusted[0].children.len(), 1);
}

#[test]
fn existing_critical_files_are_dropped_even_when_empty() {
    let temp_dir = TempDir::new().unwrap();
    fs::write(temp_dir.path().join("package.json"), "").unwrap();

    let roots = TestUtils::parse("package.json\nnew.js\n");
    let adjuster = StructureAdjuster::new(TestUtils::plain_context(temp_dir.path()));
    let adjusted = adjuster.adjust(roots);

    let names: Vec<&str> = adjusted.iter().map(|n| n.name.as_str()).collect();
    assert_eq!(names, vec!["new.js"]);
}

#[test]
fn remaps_component_folders_under_an_existing_src() {
    let temp_dir = TempDir::new().unwrap();
    fs::create_dir(temp_dir.path().join("src")).unwrap();

    let mut context = TestUtils::plain_context(temp_dir.path());
    context.framework = Some(Framework::React);

    let roots = TestUtils::parse("components/\n└── Button.jsx\n");
    let adjusted = StructureAdjuster::new(context).adjust(roots);

    assert_eq!(
        adjusted[0].target_path,
        Some(PathBuf::from("src/components"))
    );
}

#[test]
fn never_invents_a_convention_without_the_parent_on_disk() {
    let temp_dir = TempDir::new().unwrap();

    let mut context = TestUtils::plain_context(temp_dir.path());
    context.framework = Some(Framework::React);

    let roots = TestUtils::parse("components/\n");
    let adjusted = StructureAdjuster::new(context).adjust(roots);

    assert_eq!(adjusted[0].target_path, None);
}

#[test]
fn only_top_level_folders_are_remapped() {
    let temp_dir = TempDir::new().unwrap();
    fs::create_dir(temp_dir.path().join("src")).unwrap();

    let mut context = TestUtils::plain_context(temp_dir.path());
    context.framework = Some(Framework::React);

    let roots = TestUtils::parse("packages/\n└── components/\n");
    let adjusted = StructureAdjuster::new(context).adjust(roots);

    assert_eq!(adjusted[0].target_path, None);
    assert_eq!(adjusted[0].children[0].target_path, None);
}

#[test]
fn children_of_a_collapsed_root_count_as_top_level() {
    let temp_dir = TempDir::new().unwrap();
    let project = temp_dir.path().join("myapp");
    fs::create_dir_all(project.join("src")).unwrap();

    let mut context = TestUtils::plain_context(&project);
    context.framework = Some(Framework::React);

    let roots = TestUtils::parse("myapp/\n└── hooks/\n");
    let adjusted = StructureAdjuster::new(context).adjust(roots);

    assert_eq!(
        adjusted[0].children[0].target_path,
        Some(PathBuf::from("src/hooks"))
    );
}

#[test]
fn architecture_tag_selects_the_layered_table() {
    let temp_dir = TempDir::new().unwrap();
    fs::create_dir(temp_dir.path().join("src")).unwrap();

    let mut context = TestUtils::plain_context(temp_dir.path());
    context.architecture = Some("mvc".to_string());

    let roots = TestUtils::parse("controllers/\nstatic/\n");
    let adjusted = StructureAdjuster::new(context).adjust(roots);

    assert_eq!(
        adjusted[0].target_path,
        Some(PathBuf::from("src/controllers"))
    );
    assert_eq!(adjusted[1].target_path, None);
}

#[test]
fn conflict_probe_respects_the_root_collapse_rule() {
    let temp_dir = TempDir::new().unwrap();
    let project = temp_dir.path().join("myapp");
    fs::create_dir_all(project.join("src")).unwrap();
    fs::write(project.join("src/app.js"), "console.log(\"real\")").unwrap();

    // the sketch repeats the project folder itself; the probe must look at
    // myapp/src/app.js, not myapp/myapp/src/app.js
    let roots = TestUtils::parse("myapp/\n└── src/\n    └── app.js\n");
    let adjuster = StructureAdjuster::new(TestUtils::plain_context(&project));
    let adjusted = adjuster.adjust(roots);

    let src = &adjusted[0].children[0];
    assert!(src.children.is_empty());
}
