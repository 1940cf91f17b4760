//! Integration tests for the release pipeline.

use std::fs;
use std::path::{Path, PathBuf};

use drpt_cli::pipeline::{OutputPaths, ReleaseRequest, run_release};
use drpt_model::{ActionKind, ReleaseOptions, ScalingMode};
use tempfile::TempDir;

const RECIPE: &str = r#"{
    "version": "1.0",
    "actions": {
        "drop": ["test2", "test[8-9]"],
        "rename": [
            {"test1": "test1_renamed"},
            {"test([3-4])": "test\\1_regex_renamed"}
        ],
        "obfuscate": ["test3"],
        "no-scaling": ["test4"]
    }
}"#;

const DATA: &str = "\
test1,test2,test3,test4,test5,test6,test7,test8,test9
1.1,1,one,10,a,x,u,0,p
2.2,2,two,20,b,y,v,0,q
3.3,3,three,30,c,z,w,0,r
";

fn write(dir: &TempDir, name: &str, contents: &str) -> PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, contents).expect("write file");
    path
}

fn setup() -> (TempDir, ReleaseRequest) {
    let dir = TempDir::new().expect("temp dir");
    let recipe = write(&dir, "recipe.json", RECIPE);
    let input = write(&dir, "data.csv", DATA);
    let request = ReleaseRequest::new(recipe, input);
    (dir, request)
}

fn read(path: &Path) -> String {
    fs::read_to_string(path).expect("read output")
}

#[test]
fn release_writes_dataset_and_report_next_to_input() {
    let (dir, request) = setup();
    let result = run_release(&request).expect("release");

    assert_eq!(result.output, dir.path().join("data_release_1.0.csv"));
    assert_eq!(
        result.report_path,
        dir.path().join("data_release_1.0_report.csv")
    );
    assert!(result.dataset_written);

    let dataset = read(&result.output);
    let header = dataset.lines().next().unwrap();
    assert_eq!(
        header,
        "test1_renamed,test3_regex_renamed,test4_regex_renamed,test5,test6,test7"
    );
    let first_row: Vec<&str> = dataset.lines().nth(1).unwrap().split(',').collect();
    assert_eq!(first_row[1], "0");
    assert_eq!(first_row[2], "10");

    let report = read(&result.report_path);
    let drpt_version = format!("1,drpt_version,,{}", env!("CARGO_PKG_VERSION"));
    let expected = [
        "index,action_kind,column,details",
        "0,recipe_version,,1.0",
        drpt_version.as_str(),
        "2,DROP,test2,",
        "3,DROP,test8,",
        "4,DROP,test9,",
        "5,OBFUSCATE,test3,",
        "6,SCALE_DEFAULT,test1,\"[1.1,3.3]\"",
        "7,RENAME,test1,test1_renamed",
        "8,RENAME,test3,test3_regex_renamed",
        "9,RENAME,test4,test4_regex_renamed",
    ];
    assert_eq!(report.lines().collect::<Vec<_>>(), expected);
    assert_eq!(result.report.count(ActionKind::Rename), 3);
}

#[test]
fn dry_run_writes_only_the_report() {
    let (_dir, mut request) = setup();
    request.options = ReleaseOptions::new().with_dry_run(true);
    let result = run_release(&request).expect("release");
    assert!(!result.dataset_written);
    assert!(!result.output.exists());
    assert!(result.report_path.exists());
}

#[test]
fn explicit_output_path_and_row_limit() {
    let (dir, mut request) = setup();
    request.output = Some(dir.path().join("out").join("public.csv"));
    request.options = ReleaseOptions::new()
        .with_row_limit(Some(2))
        .with_scaling(ScalingMode::Disabled);
    let result = run_release(&request).expect("release");
    assert_eq!(result.row_count, 2);
    assert_eq!(result.report_path, dir.path().join("out").join("public_report.csv"));
    assert_eq!(result.report.count(ActionKind::ScaleDefault), 0);
    assert_eq!(read(&result.output).lines().count(), 3);
}

#[test]
fn saved_limits_reproduce_scaling_on_a_later_release() {
    let (dir, mut request) = setup();
    let limits_path = dir.path().join("limits.csv");
    request.save_limits = Some(limits_path.clone());
    run_release(&request).expect("first release");
    assert_eq!(read(&limits_path), "column,min,max\ntest1,1.1,3.3\n");

    let later = write(&dir, "later.csv", "test1,test4\n2.2,1\n");
    let mut second = ReleaseRequest::new(&request.recipe, later);
    second.limits = Some(limits_path);
    let result = run_release(&second).expect("second release");
    assert_eq!(
        result.report.details_for(ActionKind::ScaleDefault, "test1"),
        Some("[1.1,3.3]")
    );
    assert!(result.unused_limits.is_empty());
}

#[test]
fn rename_conflict_writes_nothing() {
    let dir = TempDir::new().expect("temp dir");
    let recipe = write(
        &dir,
        "recipe.json",
        r#"{"version": "2", "actions": {"rename": [{"col_.*": "merged"}]}}"#,
    );
    let input = write(&dir, "data.csv", "col_a,col_b\n1,2\n");
    let request = ReleaseRequest::new(recipe, input);
    let error = run_release(&request).unwrap_err();
    assert!(format!("{error:#}").contains("merged"));

    let paths = OutputPaths::for_request(&request, "2");
    assert!(!paths.dataset.exists());
    assert!(!paths.report.exists());
}

#[test]
fn invalid_recipe_fails_before_reading_data() {
    let dir = TempDir::new().expect("temp dir");
    let recipe = write(&dir, "recipe.json", r#"{"actions": {"drop": ["a"]}}"#);
    let request = ReleaseRequest::new(recipe, dir.path().join("absent.csv"));
    let error = run_release(&request).unwrap_err();
    assert!(format!("{error:#}").contains("load recipe"));
}

#[test]
fn releases_are_byte_identical() {
    let (dir, request) = setup();
    let first = run_release(&request).expect("first release");
    let dataset = read(&first.output);
    let report = read(&first.report_path);

    let again = run_release(&request).expect("second release");
    assert_eq!(read(&again.output), dataset);
    assert_eq!(read(&again.report_path), report);
    drop(dir);
}

#[test]
fn nan_column_is_released_unscaled() {
    let dir = TempDir::new().expect("temp dir");
    let recipe = write(&dir, "recipe.json", r#"{"version": "1"}"#);
    let input = write(&dir, "data.csv", "a,b\n1,NaN\n2,NaN\n");
    let result = run_release(&ReleaseRequest::new(recipe, input)).expect("release");
    assert!(result.dataset_written);
    assert_eq!(result.report.count(ActionKind::ScaleDefault), 1);
    assert_eq!(
        result.report.details_for(ActionKind::ScaleDefault, "a"),
        Some("[1,2]")
    );
    assert!(result.report_path.exists());
}

#[test]
fn output_resolving_to_the_input_is_refused() {
    let (dir, mut request) = setup();
    fs::create_dir(dir.path().join("sub")).expect("create dir");
    request.output = Some(dir.path().join("sub").join("..").join("data.csv"));
    let error = run_release(&request).unwrap_err();
    assert!(format!("{error:#}").contains("overwrite the input"));
    assert_eq!(read(&request.input), DATA);
}

#[test]
fn saving_limits_over_the_input_is_refused() {
    let (_dir, mut request) = setup();
    request.save_limits = Some(request.input.clone());
    let error = run_release(&request).unwrap_err();
    assert!(format!("{error:#}").contains("overwrite the input"));
    assert_eq!(read(&request.input), DATA);
}
