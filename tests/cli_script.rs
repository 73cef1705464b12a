mod common;

use predicates::prelude::*;
use predicates::str::contains;

use common::{setup_test_env, MARCH_BILL};

#[test]
fn script_mode_creates_edits_and_saves_a_month() {
    let env = setup_test_env();
    let input = "new 2024 03\n\
                 add 0301 午饭 25 食堂\n\
                 add 0302 工资 +5000\n\
                 add 0303 咖啡 18 latte\n\
                 save\n\
                 list\n\
                 exit\n";

    env.cli()
        .write_stdin(input)
        .assert()
        .success()
        .stdout(contains("Created 202403.md"))
        .stdout(contains("Added entry #3"))
        .stdout(contains("Saved"))
        .stdout(contains("Total: +4957.00"));

    assert_eq!(env.read_bill("202403.md"), MARCH_BILL);
}

#[test]
fn commands_without_an_open_file_report_it() {
    let env = setup_test_env();

    env.cli()
        .write_stdin("add 0301 午饭 25\nsave\nupdate 1 0301 午饭 30\ndelete 1\nup 1\n")
        .assert()
        .success()
        .stdout(contains("No bill file is open"))
        .stdout(contains("out of range").not());
}

#[test]
fn unknown_commands_get_a_suggestion() {
    let env = setup_test_env();

    env.cli()
        .write_stdin("lst\n")
        .assert()
        .success()
        .stdout(contains("Unknown command `lst`"))
        .stdout(contains("Suggestion:"));
}

#[test]
fn existing_files_need_force_to_overwrite() {
    let env = setup_test_env();
    env.write_bill("202403.md", MARCH_BILL);

    env.cli()
        .write_stdin("new 2024 03\n")
        .assert()
        .success()
        .stdout(contains("--force"));
    assert_eq!(env.read_bill("202403.md"), MARCH_BILL);

    env.cli()
        .write_stdin("new 2024 03 --force\n")
        .assert()
        .success()
        .stdout(contains("Overwrote 202403.md"));
    assert!(!env.read_bill("202403.md").contains("午饭"));
}

#[test]
fn delete_and_undo_round_trip_through_the_file() {
    let env = setup_test_env();
    env.write_bill("202403.md", MARCH_BILL);

    env.cli()
        .write_stdin("open 202403\ndelete 2\nundo\ndelete 1\nsave\n")
        .assert()
        .success()
        .stdout(contains("Opened 202403.md (3 entries)"))
        .stdout(contains("Undid last change"));

    let saved = env.read_bill("202403.md");
    assert!(!saved.contains("午饭"));
    assert!(saved.contains("| 0302 | 工资 | +5000 |  |"));
    assert!(saved.contains("| 0303 | 咖啡 | 18 | latte |"));
}

#[test]
fn unsaved_changes_are_discarded_on_exit() {
    let env = setup_test_env();
    env.write_bill("202403.md", MARCH_BILL);

    env.cli()
        .write_stdin("open 202403\ndelete 1\nexit\n")
        .assert()
        .success()
        .stdout(contains("Discarding unsaved changes"));

    assert_eq!(env.read_bill("202403.md"), MARCH_BILL);
}

#[test]
fn list_json_reflects_the_sorted_view() {
    let env = setup_test_env();
    env.write_bill("202403.md", MARCH_BILL);

    let output = env
        .cli()
        .write_stdin("open 202403\nsort amount\nsort amount\nlist --json\n")
        .output()
        .expect("run cli");
    assert!(output.status.success());

    let stdout = String::from_utf8(output.stdout).expect("utf-8 stdout");
    let start = stdout.find("[\n").expect("json array in output");
    let end = stdout.rfind(']').expect("json array end");
    let rows: serde_json::Value = serde_json::from_str(&stdout[start..=end]).expect("parse json");
    let names: Vec<&str> = rows
        .as_array()
        .expect("array")
        .iter()
        .filter_map(|row| row["name"].as_str())
        .collect();
    assert_eq!(names, ["工资", "午饭", "咖啡"]);
}

#[test]
fn stats_reports_income_and_expense() {
    let env = setup_test_env();
    env.write_bill("202403.md", MARCH_BILL);

    env.cli()
        .write_stdin("open 202403\nstats --type 支出\nstats --from 0301 --to 0302\n")
        .assert()
        .success()
        .stdout(contains("Statistics (支出)"))
        .stdout(contains("-43.00"))
        .stdout(contains("+4975.00"));
}

#[test]
fn config_changes_are_persisted() {
    let env = setup_test_env();

    env.cli()
        .write_stdin("config undo_limit 5\nconfig colour on\n")
        .assert()
        .success()
        .stdout(contains("Set undo_limit = 5"))
        .stdout(contains("colour"));

    let json = std::fs::read_to_string(env.config_path()).expect("config written");
    let config: serde_json::Value = serde_json::from_str(&json).expect("parse config");
    assert_eq!(config["undo_limit"], 5);
}

#[test]
fn files_lists_only_bill_files() {
    let env = setup_test_env();
    env.write_bill("202403.md", MARCH_BILL);
    env.write_bill("202401.md", MARCH_BILL);
    env.write_bill("notes.md", "not a bill");

    env.cli()
        .write_stdin("files\n")
        .assert()
        .success()
        .stdout(contains("202401.md").and(contains("202403.md")))
        .stdout(contains("notes.md").not());
}
