use pretty_assertions::assert_eq;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

use renamer::{execute, plan, ExecuteStatus, PlanRequest, RenameOperation, UNLIMITED};

fn folder_with(names: &[&str]) -> TempDir {
    let temp_dir = TempDir::new().unwrap();
    for name in names {
        fs::write(temp_dir.path().join(name), format!("content of {}", name)).unwrap();
    }
    temp_dir
}

fn request(dir: &TempDir, pattern: &str, replacement: &str) -> PlanRequest {
    PlanRequest::new(dir.path().to_string_lossy(), pattern, replacement)
}

/// Sorted names and contents of the folder's direct children
fn snapshot(dir: &Path) -> Vec<(String, String)> {
    let mut entries: Vec<(String, String)> = fs::read_dir(dir)
        .unwrap()
        .map(|entry| {
            let entry = entry.unwrap();
            let name = entry.file_name().to_string_lossy().into_owned();
            let content = if entry.file_type().unwrap().is_dir() {
                "<dir>".to_string()
            } else {
                fs::read_to_string(entry.path()).unwrap()
            };
            (name, content)
        })
        .collect();
    entries.sort();
    entries
}

#[test]
fn test_total_count_never_below_returned_operations() {
    let names: Vec<String> = (0..30).map(|i| format!("item{:02}.txt", i)).collect();
    let refs: Vec<&str> = names.iter().map(String::as_str).collect();
    let temp_dir = folder_with(&refs);

    for cap in [UNLIMITED, 1, 7, 30, 100] {
        let result = plan(&request(&temp_dir, "item", "entry").preview_cap(cap));
        assert!(result.total_count >= result.operations.len());
        if cap == UNLIMITED || result.total_count <= cap {
            assert_eq!(result.total_count, result.operations.len());
        } else {
            assert_eq!(result.operations.len(), cap);
        }
    }
}

#[test]
fn test_literal_pattern_is_fully_removed() {
    let temp_dir = folder_with(&["copy of copy.txt", "Copy notes.md", "plain.txt"]);

    let result = plan(&request(&temp_dir, "copy", "dup"));
    assert_eq!(result.total_count, 1);
    for op in &result.operations {
        assert!(!op.new_name.contains("copy"));
    }

    let result = plan(&request(&temp_dir, "copy", "dup").ignore_case(true));
    assert_eq!(result.total_count, 2);
    for op in &result.operations {
        assert!(!op.new_name.to_lowercase().contains("copy"));
    }
}

#[test]
fn test_passthrough_lists_every_child_unchanged() {
    let temp_dir = folder_with(&["a.txt", "b.txt"]);
    fs::create_dir(temp_dir.path().join("photos")).unwrap();

    let result = plan(&request(&temp_dir, "", ""));
    assert_eq!(result.operations.len(), 3);
    for op in &result.operations {
        assert_eq!(op.old_name, op.new_name);
        assert_eq!(op.old_path, op.new_path);
    }
}

#[test]
fn test_identity_plan_executes_as_no_changes() {
    let temp_dir = folder_with(&["a.txt", "b.txt"]);
    let before = snapshot(temp_dir.path());

    let result = plan(&request(&temp_dir, "", ""));
    let outcome = execute(&result.operations);

    assert_eq!(outcome.status, ExecuteStatus::NoChanges);
    assert_eq!(outcome.renamed_count, 0);
    assert_eq!(snapshot(temp_dir.path()), before);
}

#[test]
fn test_duplicate_targets_leave_folder_untouched() {
    let temp_dir = folder_with(&["a.txt", "b.txt"]);
    let before = snapshot(temp_dir.path());

    let result = plan(&request(&temp_dir, r"^[ab]", "c").regex(true));
    assert_eq!(result.total_count, 2);
    let outcome = execute(&result.operations);

    assert_eq!(outcome.status, ExecuteStatus::Error);
    assert!(outcome.message.contains("Duplicate"));
    assert_eq!(outcome.renamed_count, 0);
    assert_eq!(snapshot(temp_dir.path()), before);
}

#[test]
fn test_existing_target_outside_batch_is_a_conflict() {
    let temp_dir = folder_with(&["a.txt", "b.txt"]);
    let before = snapshot(temp_dir.path());

    let result = plan(&request(&temp_dir, "a", "b"));
    assert_eq!(result.total_count, 1);
    assert_eq!(result.operations[0].old_name, "a.txt");
    assert_eq!(result.operations[0].new_name, "b.txt");

    let outcome = execute(&result.operations);
    assert_eq!(outcome.status, ExecuteStatus::Error);
    assert!(outcome.message.lines().any(|line| line == "b.txt"));
    assert_eq!(snapshot(temp_dir.path()), before);
}

#[test]
fn test_swap_exchanges_contents() {
    let temp_dir = folder_with(&["x.txt", "y.txt"]);

    let result = plan(&request(&temp_dir, r"^([xy])", "$1").regex(true));
    // Build the swap explicitly from the planned entries
    let swapped: Vec<RenameOperation> = result
        .operations
        .iter()
        .map(|op| {
            let new_name = if op.old_name == "x.txt" { "y.txt" } else { "x.txt" };
            RenameOperation {
                new_path: op.old_path.with_file_name(new_name),
                new_name: new_name.to_string(),
                ..op.clone()
            }
        })
        .collect();

    let outcome = execute(&swapped);
    assert_eq!(outcome.status, ExecuteStatus::Success);
    assert_eq!(outcome.renamed_count, 2);
    assert_eq!(
        snapshot(temp_dir.path()),
        vec![
            ("x.txt".to_string(), "content of y.txt".to_string()),
            ("y.txt".to_string(), "content of x.txt".to_string()),
        ]
    );
}

#[test]
fn test_invalid_regex_is_reported_in_status() {
    let temp_dir = folder_with(&["a.txt"]);
    let result = plan(&request(&temp_dir, "(unbalanced", "x").regex(true));
    assert!(result.operations.is_empty());
    assert_eq!(result.total_count, 0);
    assert!(result.status.starts_with("Invalid regex pattern"));
}

#[test]
fn test_regex_rename_end_to_end() {
    let temp_dir = folder_with(&["IMG_0001.jpg", "IMG_0002.jpg", "notes.txt"]);

    let result = plan(&request(&temp_dir, r"^img_(\d+)", "photo-$1").regex(true).ignore_case(true));
    assert_eq!(result.status, "Matches found: 2");

    let outcome = execute(&result.operations);
    assert_eq!(outcome.status, ExecuteStatus::Success);
    assert_eq!(outcome.renamed_count, 2);

    let names: Vec<String> = snapshot(temp_dir.path()).into_iter().map(|(name, _)| name).collect();
    assert_eq!(names, vec!["notes.txt", "photo-0001.jpg", "photo-0002.jpg"]);
}

#[test]
fn test_suffix_mode_renames_files_and_directories() {
    let temp_dir = folder_with(&["report.pdf"]);
    fs::create_dir(temp_dir.path().join("drafts")).unwrap();

    let result = plan(&request(&temp_dir, "", ">_2024"));
    let outcome = execute(&result.operations);
    assert_eq!(outcome.renamed_count, 2);

    let names: Vec<String> = snapshot(temp_dir.path()).into_iter().map(|(name, _)| name).collect();
    assert_eq!(names, vec!["drafts_2024", "report_2024.pdf"]);
}

#[test]
fn test_capped_preview_then_uncapped_execute_renames_everything() {
    let temp_dir = folder_with(&["a1", "a2", "a3", "a4"]);

    let preview_request = request(&temp_dir, "a", "b").preview_cap(2);
    let preview = plan(&preview_request);
    assert_eq!(preview.operations.len(), 2);

    let outcome = execute(&plan(&preview_request.uncapped()).operations);
    assert_eq!(outcome.renamed_count, 4);
    let names: Vec<String> = snapshot(temp_dir.path()).into_iter().map(|(name, _)| name).collect();
    assert_eq!(names, vec!["b1", "b2", "b3", "b4"]);
}

#[test]
fn test_no_staging_names_left_behind() {
    let temp_dir = folder_with(&["a.txt", "b.txt", "c.txt"]);
    let result = plan(&request(&temp_dir, ".txt", ".md"));
    assert!(execute(&result.operations).is_success());

    for (name, _) in snapshot(temp_dir.path()) {
        assert!(!name.contains(".renamer_tmp_"), "leftover staging entry {}", name);
    }
}
