//! Bazel path.

use predicates::prelude::*;

use super::common::TestEnv;

#[test]
fn bazel_build_copies_outputs() {
  let env = TestEnv::new();

  env
    .boot_cmd()
    .args(["build", "executables", "--bazel"])
    .assert()
    .success()
    .stdout(predicate::str::contains("bin/manager"));

  assert_eq!(env.tool_log(), vec!["bazel build cmd/apiserver cmd/manager"]);
  assert_eq!(env.list_dir("bin"), vec!["apiserver", "manager"]);
}

#[test]
fn gazelle_without_go_mod_only_regenerates_build_files() {
  let env = TestEnv::new();

  env
    .boot_cmd()
    .args(["build", "executables", "--bazel", "--gazelle", "--targets", "controller"])
    .assert()
    .success();

  assert_eq!(
    env.tool_log(),
    vec!["bazel run //:gazelle", "bazel build cmd/manager"]
  );
  assert_eq!(env.list_dir("bin"), vec!["manager"]);
}

#[test]
fn gazelle_with_go_mod_updates_repos() {
  let env = TestEnv::new();
  env.write_file("go.mod", "module example.com/demo\n");

  env
    .boot_cmd()
    .args(["build", "executables", "--bazel", "--gazelle"])
    .assert()
    .success();

  let log = env.tool_log();
  assert_eq!(log.len(), 3);
  assert!(log[0].starts_with("bazel run //:gazelle -- update-repos --from_file=go.mod"));
  assert!(log[0].ends_with("--prune"));
  assert_eq!(log[1], "bazel run //:gazelle");
}

#[test]
fn gazelle_alone_warns_and_uses_go() {
  let env = TestEnv::new();

  env
    .boot_cmd()
    .args(["build", "executables", "--gazelle", "--targets", "apiserver"])
    .assert()
    .success()
    .stderr(predicate::str::contains("--gazelle has no effect without --bazel"));

  assert_eq!(env.tool_log().len(), 1);
  assert!(env.tool_log()[0].starts_with("go build"));
}
