//! Checks the publish workflow and container recipe that drive the binary.

use std::fs;
use std::path::PathBuf;

use serde_yaml::Value;

fn repo_root() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../..")
}

fn workflow() -> Value {
    let path = repo_root().join(".github/workflows/publish.yml");
    let content = fs::read_to_string(&path).unwrap();
    serde_yaml::from_str(&content).unwrap()
}

fn steps<'a>(workflow: &'a Value, job: &str) -> &'a Vec<Value> {
    workflow["jobs"][job]["steps"].as_sequence().unwrap()
}

fn uses(step: &Value) -> &str {
    step["uses"].as_str().unwrap_or("")
}

fn run(step: &Value) -> &str {
    step["run"].as_str().unwrap_or("")
}

#[test]
fn triggers_on_prs_main_tags_schedule_and_dispatch() {
    let wf = workflow();
    let on = &wf["on"];

    assert!(on.get("pull_request").is_some());
    assert!(on.get("workflow_dispatch").is_some());

    let branches = on["push"]["branches"].as_sequence().unwrap();
    assert!(branches.contains(&Value::from("main")));

    let tags = on["push"]["tags"].as_sequence().unwrap();
    assert!(tags.contains(&Value::from("v*.*.*")));

    assert_eq!(on["schedule"][0]["cron"].as_str(), Some("0 0 * * 0"));
}

#[test]
fn jobs_run_lint_build_publish_in_order() {
    let wf = workflow();
    let jobs = &wf["jobs"];

    assert!(jobs["lint"].get("needs").is_none());
    assert_eq!(jobs["build"]["needs"].as_str(), Some("lint"));
    assert_eq!(jobs["publish"]["needs"].as_str(), Some("build"));
}

#[test]
fn one_run_per_ref_at_a_time() {
    let wf = workflow();
    let group = wf["concurrency"]["group"].as_str().unwrap();

    assert!(group.contains("github.ref"));
    assert!(group.contains("github.workflow"));
}

#[test]
fn renders_in_container_as_invoking_user_with_token() {
    let wf = workflow();
    let render = steps(&wf, "publish")
        .iter()
        .find(|s| run(s).contains("docker run"))
        .unwrap();

    let cmd = run(render);
    assert!(cmd.contains("-u \"$(id -u):$(id -g)\""));
    assert!(cmd.contains("-e GITHUB_TOKEN"));
    assert!(cmd.contains("-v \"$PWD\":/work"));
    assert!(render["env"]["GITHUB_TOKEN"].as_str().is_some());

    // no arguments after the image name
    assert!(cmd.trim_end().ends_with("fontsize:ci"));
}

#[test]
fn upload_fails_without_html() {
    let wf = workflow();
    let publish = steps(&wf, "publish");

    let copy = publish
        .iter()
        .position(|s| run(s).contains("./*.html") && run(s).contains("public/"))
        .unwrap();
    let upload = publish
        .iter()
        .position(|s| uses(s).starts_with("actions/upload-artifact"))
        .unwrap();
    let deploy = publish
        .iter()
        .position(|s| uses(s).starts_with("peaceiris/actions-gh-pages"))
        .unwrap();

    assert!(copy < upload && upload < deploy);

    // A missing page must not fail the copy, only the upload
    let copy_cmd = run(&publish[copy]);
    assert!(copy_cmd.contains("shopt -s nullglob"));
    assert!(!copy_cmd.contains("fontsize.json"));

    assert_eq!(publish[upload]["with"]["path"].as_str(), Some("public/*.html"));
    assert_eq!(
        publish[upload]["with"]["if-no-files-found"].as_str(),
        Some("error")
    );

    // Nothing else lands in public/ before the upload
    for (i, step) in publish[..upload].iter().enumerate() {
        if i != copy {
            assert!(!run(step).contains("public/"), "{:?}", step["name"]);
        }
    }

    let dataset = publish
        .iter()
        .position(|s| run(s).contains("cp fontsize.json public/"))
        .unwrap();
    assert!(upload < dataset && dataset < deploy);

    assert_eq!(
        publish[deploy]["with"]["publish_branch"].as_str(),
        Some("gh-pages")
    );
}

#[test]
fn container_entrypoint_takes_no_arguments() {
    let dockerfile = fs::read_to_string(repo_root().join("Dockerfile")).unwrap();

    let entrypoints: Vec<&str> = dockerfile
        .lines()
        .filter(|l| l.trim_start().starts_with("ENTRYPOINT"))
        .collect();

    assert_eq!(entrypoints, vec![r#"ENTRYPOINT ["fontsize"]"#]);
    assert!(!dockerfile.lines().any(|l| l.trim_start().starts_with("CMD")));
}
