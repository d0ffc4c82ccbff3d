mod common;

use common::{answers, generated_project, write, RecordingRunner};
use repo_config::answers::RepositoryType;
use repo_config::hook::PostGenHook;
use repo_config::report::{Level, Outcome, Step};
use std::fs;
use tempfile::TempDir;

#[test_log::test]
fn test_lib_non_default_license_removes_license() {
    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path();
    generated_project(root, RepositoryType::Lib, "foo");
    let answers = answers(RepositoryType::Lib, "foo", "Proprietary");
    let runner = RecordingRunner::new().dirty();

    let steps = PostGenHook::new(root, &answers, &runner).finish_setup();

    assert!(!root.join("LICENSE").exists());
    assert!(!root.join("proto").exists());
    assert!(root.join("src/frequenz/foo/__init__.py").is_file());
    assert!(!root.join("src/frequenz/lib").exists());
    assert!(steps.iter().all(|step| step.outcome() != Outcome::Warned));
}

#[test]
fn test_license_kept_only_for_default() {
    for repo_type in RepositoryType::ALL {
        for (license, kept) in [("MIT", true), ("Proprietary", false)] {
            let temp_dir = TempDir::new().unwrap();
            let root = temp_dir.path();
            generated_project(root, repo_type, "foo");
            let answers = answers(repo_type, "foo", license);
            let runner = RecordingRunner::new();

            PostGenHook::new(root, &answers, &runner).remove_unneeded_files();

            assert_eq!(root.join("LICENSE").exists(), kept, "{repo_type} with {license}");
        }
    }
}

#[test]
fn test_lib_layout() {
    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path();
    generated_project(root, RepositoryType::Lib, "foo");
    let answers = answers(RepositoryType::Lib, "foo", "MIT");
    let runner = RecordingRunner::new();

    PostGenHook::new(root, &answers, &runner).finish_setup();

    let expected = TempDir::new().unwrap();
    write(expected.path(), "LICENSE", "MIT License\n");
    write(expected.path(), "README.md", "# TODO(cookiecutter): Write a description\n");
    write(expected.path(), "src/frequenz/foo/__init__.py", "\"\"\"Package.\"\"\"\n");
    write(
        expected.path(),
        "tests/test_main.py",
        "def test_main() -> None:\n    pass\n",
    );

    assert!(!dir_diff::is_different(root, expected.path()).unwrap());
}

#[test]
fn test_api_renames_and_keeps_proto() {
    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path();
    generated_project(root, RepositoryType::Api, "foo");
    let answers = answers(RepositoryType::Api, "foo", "MIT");
    let runner = RecordingRunner::new();

    let hook = PostGenHook::new(root, &answers, &runner);
    hook.remove_unneeded_files();
    let report = hook.finish_type_setup();

    assert_eq!(report.outcome(), Outcome::Done);
    assert!(root.join("proto").is_dir());
    assert!(root.join("py/frequenz/api/foo/__init__.py").is_file());
    assert!(root.join("pytests/test_main.py").is_file());
    assert!(!root.join("src").exists());
    assert!(!root.join("tests").exists());
}

#[test]
fn test_other_types_have_no_fixup() {
    for repo_type in [RepositoryType::Actor, RepositoryType::App, RepositoryType::Model] {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();
        generated_project(root, repo_type, "foo");
        let answers = answers(repo_type, "foo", "MIT");
        let runner = RecordingRunner::new();

        let report = PostGenHook::new(root, &answers, &runner).finish_type_setup();

        assert_eq!(report.outcome(), Outcome::Skipped);
        assert!(root
            .join(format!("src/frequenz/{repo_type}/foo/__init__.py"))
            .is_file());
    }
}

#[test]
fn test_failed_rename_warns() {
    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path();
    let answers = answers(RepositoryType::Lib, "missing", "MIT");
    let runner = RecordingRunner::new();

    let report = PostGenHook::new(root, &answers, &runner).finish_type_setup();

    assert_eq!(report.outcome(), Outcome::Warned);
    let warnings: Vec<&str> = report.warnings().collect();
    assert_eq!(warnings.len(), 1);
    assert!(warnings[0].starts_with("Failed to rename `src/frequenz/lib/missing`"));
    assert!(report
        .messages
        .iter()
        .any(|m| m.level == Level::Note && m.text.contains("manually")));
}

#[test]
fn test_first_run_initializes_and_commits() {
    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path();
    generated_project(root, RepositoryType::App, "foo");
    let answers = answers(RepositoryType::App, "foo", "MIT");
    let runner = RecordingRunner::new().dirty();

    PostGenHook::new(root, &answers, &runner).finish_setup();

    assert_eq!(
        runner.calls(),
        [
            "git init",
            "git status --porcelain",
            "git add .",
            "git commit -s -m Initial commit",
        ]
    );
}

#[test]
fn test_rerun_never_reinitializes() {
    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path();
    generated_project(root, RepositoryType::Actor, "foo");
    fs::create_dir(root.join(".git")).unwrap();
    let answers = answers(RepositoryType::Actor, "foo", "MIT");

    // Clean tree: nothing happens
    let runner = RecordingRunner::new();
    let steps = PostGenHook::new(root, &answers, &runner).finish_setup();
    assert_eq!(runner.calls(), ["git status --porcelain"]);
    assert_eq!(steps[0].step, Step::InitRepository);
    assert_eq!(steps[0].outcome(), Outcome::Skipped);
    assert_eq!(steps[4].step, Step::Commit);
    assert_eq!(steps[4].outcome(), Outcome::Skipped);

    // Dirty tree: commit, but as a regeneration
    let runner = RecordingRunner::new().dirty();
    PostGenHook::new(root, &answers, &runner).finish_setup();
    assert!(runner.calls_starting_with("git init").is_empty());
    assert_eq!(
        runner.calls_starting_with("git commit"),
        ["git commit -s -m Regenerate repository using repo-config"]
    );
}

#[test]
fn test_status_failure_skips_commit() {
    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path();
    let answers = answers(RepositoryType::App, "foo", "MIT");
    let runner = RecordingRunner::new().dirty().failing("git status");

    let report = PostGenHook::new(root, &answers, &runner).commit_git_changes(true);

    assert_eq!(report.outcome(), Outcome::Skipped);
    assert!(runner.calls_starting_with("git commit").is_empty());
}

#[test]
fn test_commit_failure_warns_with_status() {
    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path();
    let answers = answers(RepositoryType::App, "foo", "MIT");
    let runner = RecordingRunner::new().dirty().failing("git commit");

    let report = PostGenHook::new(root, &answers, &runner).commit_git_changes(true);

    assert_eq!(
        report.warnings().collect::<Vec<_>>(),
        ["Failed to commit all changes to the git repository! (status code: 1)"]
    );
}

#[test]
fn test_zero_valid_submodules() {
    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path();
    write(root, ".gitmodules", "[core]\n\tbare = false\n");
    let answers = answers(RepositoryType::Api, "foo", "MIT");
    let runner = RecordingRunner::new();

    let (report, added) = PostGenHook::new(root, &answers, &runner).initialize_git_submodules();

    assert!(!added);
    assert!(runner.calls().is_empty());
    assert!(report
        .warnings()
        .any(|w| w == "`.gitmodules` does not contain any valid submodules! Ignoring..."));
}

#[test]
fn test_one_valid_one_without_path() {
    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path();
    write(
        root,
        ".gitmodules",
        r#"[submodule "api-common-protos"]
	path = submodules/api-common-protos
	url = https://github.com/googleapis/api-common-protos.git
[submodule "broken"]
	url = https://example.com/broken.git
"#,
    );
    let answers = answers(RepositoryType::Api, "foo", "MIT");
    let runner = RecordingRunner::new();

    let (report, added) = PostGenHook::new(root, &answers, &runner).initialize_git_submodules();

    assert!(added);
    assert_eq!(
        runner.calls_starting_with("git submodule add"),
        ["git submodule add --name api-common-protos \
          https://github.com/googleapis/api-common-protos.git submodules/api-common-protos"]
    );
    assert_eq!(runner.calls_starting_with("git submodule update"), ["git submodule update --init"]);
    assert_eq!(
        report.warnings().collect::<Vec<_>>(),
        ["`.gitmodules` contains section `submodule \"broken\"` without `path`! Ignoring..."]
    );
}

#[test]
fn test_empty_gitmodules_is_removed() {
    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path();
    write(root, ".gitmodules", "  \n\n\t\n");
    let answers = answers(RepositoryType::Api, "foo", "MIT");
    let runner = RecordingRunner::new();

    let (report, added) = PostGenHook::new(root, &answers, &runner).initialize_git_submodules();

    assert!(!added);
    assert_eq!(report.outcome(), Outcome::Skipped);
    assert!(!root.join(".gitmodules").exists());
}

#[test]
fn test_gitmodules_directory_warns() {
    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path();
    fs::create_dir(root.join(".gitmodules")).unwrap();
    let answers = answers(RepositoryType::Api, "foo", "MIT");
    let runner = RecordingRunner::new();

    let (report, added) = PostGenHook::new(root, &answers, &runner).initialize_git_submodules();

    assert!(!added);
    assert_eq!(report.outcome(), Outcome::Warned);
}

#[test_log::test]
fn test_missing_tools_never_abort() {
    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path();
    generated_project(root, RepositoryType::Lib, "foo");
    write(
        root,
        ".gitmodules",
        "[submodule \"x\"]\npath = submodules/x\nurl = https://example.com/x.git\n",
    );
    let answers = answers(RepositoryType::Lib, "foo", "MIT");
    let runner = RecordingRunner::new().missing("git").missing("tree").missing("grep");

    let summary = PostGenHook::new(root, &answers, &runner).run();

    assert_eq!(summary.steps.len(), 5);
    assert!(root.join("src/frequenz/foo").is_dir());
    assert_eq!(summary.tree.outcome(), Outcome::Skipped);
    assert_eq!(summary.todos.outcome(), Outcome::Warned);
    assert_eq!(summary.step(Step::InitRepository).unwrap().outcome(), Outcome::Warned);
    assert!(summary
        .warnings()
        .any(|w| w.starts_with("Failed to run `git submodule add")));
    // status couldn't run either, so nothing was committed
    assert!(runner.calls_starting_with("git add").is_empty());
}

#[test]
fn test_todos_and_tree_output() {
    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path();
    let answers = answers(RepositoryType::Model, "foo", "MIT");
    let runner = RecordingRunner::new()
        .output("tree", ".\n└── README.md\n")
        .output("grep", "./README.md:# TODO(cookiecutter): Write a description\n");

    let hook = PostGenHook::new(root, &answers, &runner);
    let tree = hook.generated_tree();
    let todos = hook.todos();

    assert_eq!(tree.messages[0].text, ".\n└── README.md");
    assert_eq!(
        todos.messages[0].text,
        "./README.md:# TODO(cookiecutter): Write a description"
    );
    assert_eq!(todos.outcome(), Outcome::Done);
}

#[test]
fn test_tree_output_kept_on_error_status() {
    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path();
    let answers = answers(RepositoryType::Model, "foo", "MIT");
    let runner = RecordingRunner::new()
        .failing("tree")
        .output("tree", ".\n└── README.md\n");

    let tree = PostGenHook::new(root, &answers, &runner).generated_tree();

    assert_eq!(tree.outcome(), Outcome::Done);
    assert_eq!(tree.messages.len(), 1);
    assert_eq!(tree.messages[0].text, ".\n└── README.md");
}

#[test]
fn test_tree_without_output_is_skipped() {
    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path();
    let answers = answers(RepositoryType::Model, "foo", "MIT");
    let runner = RecordingRunner::new().failing("tree");

    let tree = PostGenHook::new(root, &answers, &runner).generated_tree();

    assert_eq!(tree.outcome(), Outcome::Skipped);
    assert!(tree.messages.is_empty());
}

#[test]
fn test_no_todos_found() {
    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path();
    let answers = answers(RepositoryType::Model, "foo", "MIT");
    let runner = RecordingRunner::new().failing("grep");

    let todos = PostGenHook::new(root, &answers, &runner).todos();

    let warnings: Vec<&str> = todos.warnings().collect();
    assert_eq!(warnings.len(), 1);
    assert!(warnings[0].starts_with("No `TODO(cookiecutter):` found using `grep -r"));
    assert!(warnings[0].ends_with("(status code: 1)"));
    assert!(todos
        .messages
        .iter()
        .any(|m| m.text == "Please search for `TODO(cookiecutter):` in `frequenz-model-foo/` manually."));
}

#[test]
fn test_sanity_checks() {
    let temp_dir = TempDir::new().unwrap();
    let runner = RecordingRunner::new();

    let floss_proprietary = answers(RepositoryType::Lib, "foo", "Proprietary");
    let hook = PostGenHook::new(temp_dir.path(), &floss_proprietary, &runner);
    assert_eq!(
        hook.sanity_checks(),
        ["Using a non-MIT license with a frequenz-floss project is not recommended."]
    );

    let mut other_org = floss_proprietary.clone();
    other_org.github_org = "frequenz-io".to_string();
    let hook = PostGenHook::new(temp_dir.path(), &other_org, &runner);
    assert!(hook.sanity_checks().is_empty());

    let floss_mit = answers(RepositoryType::Lib, "foo", "MIT");
    let hook = PostGenHook::new(temp_dir.path(), &floss_mit, &runner);
    assert!(hook.sanity_checks().is_empty());
}

#[test]
fn test_summary_collects_sanity_warnings() {
    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path();
    generated_project(root, RepositoryType::Actor, "foo");
    let answers = answers(RepositoryType::Actor, "foo", "Proprietary").with_repo_name("actor-foo");
    let runner = RecordingRunner::new().dirty();

    let summary = PostGenHook::new(root, &answers, &runner).run();

    assert_eq!(summary.repo_name, "actor-foo");
    assert_eq!(summary.sanity_warnings.len(), 1);
    assert_eq!(summary.warnings().count(), 1);
    assert_eq!(summary.step(Step::Commit).unwrap().outcome(), Outcome::Done);
}
