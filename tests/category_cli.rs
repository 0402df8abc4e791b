mod support;

use support::{json_output, TestRoot};

#[test]
fn list_and_get_are_shared_across_users() {
    let root = TestRoot::new();
    let output = root
        .cmd(2)
        .args(["--json", "category", "list"])
        .output()
        .expect("run");
    assert!(output.status.success());
    let categories = json_output(&output)["data"].as_array().expect("array").len();
    assert_eq!(categories, 3);

    let output = root
        .cmd(1)
        .args(["--json", "category", "get", "2"])
        .output()
        .expect("run");
    assert_eq!(json_output(&output)["data"]["name"], "Personal");
}

#[test]
fn create_trims_and_validates_the_name() {
    let root = TestRoot::new();
    let output = root
        .cmd(1)
        .args(["--json", "category", "new", "  Errands  "])
        .output()
        .expect("run");
    assert!(output.status.success());
    let category = &json_output(&output)["data"];
    assert_eq!(category["id"], 4);
    assert_eq!(category["name"], "Errands");

    root.cmd(1)
        .args(["category", "new", "x"])
        .assert()
        .failure()
        .code(2);
}

#[test]
fn delete_is_blocked_while_tasks_reference_it() {
    let root = TestRoot::new();

    // Category 1 backs tasks 1 and 3.
    let output = root
        .cmd(1)
        .args(["--json", "category", "delete", "1"])
        .output()
        .expect("run");
    assert_eq!(output.status.code(), Some(5));
    assert_eq!(json_output(&output)["error"]["kind"], "conflict");

    // Unreferenced category deletes fine.
    root.cmd(1)
        .args(["category", "delete", "3"])
        .assert()
        .success();

    // Once the last referencing task moves away, the delete goes through.
    root.cmd(1)
        .args(["task", "patch", "1", "--set", "category_id=2"])
        .assert()
        .success();
    root.cmd(2)
        .args(["task", "patch", "3", "--set", "category_id=2"])
        .assert()
        .success();
    root.cmd(1)
        .args(["category", "delete", "1"])
        .assert()
        .success();

    root.cmd(1)
        .args(["category", "get", "1"])
        .assert()
        .failure()
        .code(3);
}

#[test]
fn category_ids_are_not_reused() {
    let root = TestRoot::new();
    root.cmd(1)
        .args(["category", "delete", "3"])
        .assert()
        .success();

    let output = root
        .cmd(1)
        .args(["--json", "category", "new", "Replacement"])
        .output()
        .expect("run");
    // Even with category 3 gone, the counter moves forward.
    assert_eq!(json_output(&output)["data"]["id"], 4);
}
