mod common;

use billy_core::{CoreError, CreateOutcome};
use billy_domain::{EntryFields, MoveDirection, Period, SortField};

use common::{setup_test_env, MARCH_BILL};

#[test]
fn session_round_trips_a_bill_file() {
    let env = setup_test_env();
    env.write_bill("202403.md", MARCH_BILL);
    let mut session = env.session();

    assert_eq!(session.open("202403").unwrap(), 3);
    assert_eq!(session.current_file(), Some("202403.md"));
    assert!(!session.has_unsaved_changes());

    session.select(&[2]).unwrap();
    assert!(session.move_selection(MoveDirection::Up).unwrap());
    assert_eq!(session.selection(), &[1]);
    assert!(session.has_unsaved_changes());

    let path = session.save().unwrap();
    assert_eq!(path, env.bill_path("202403.md"));
    assert!(!session.has_unsaved_changes());

    let saved = env.read_bill("202403.md");
    let coffee = saved.find("咖啡").unwrap();
    let salary = saved.find("工资").unwrap();
    assert!(coffee < salary);
}

#[test]
fn sorting_does_not_change_the_saved_order() {
    let env = setup_test_env();
    env.write_bill("202403.md", MARCH_BILL);
    let mut session = env.session();
    session.open("202403.md").unwrap();

    session.sort_by(SortField::Name);
    session.add(&EntryFields::new("0304", "房租", "3000", "")).unwrap();
    session.save().unwrap();

    let saved = env.read_bill("202403.md");
    assert!(saved.starts_with(MARCH_BILL));
    assert!(saved.ends_with("| 0304 | 房租 | 3000 |  |\n"));
}

#[test]
fn create_refuses_to_clobber_without_overwrite() {
    let env = setup_test_env();
    let mut session = env.session();
    let period = Period::new(2024, 4).unwrap();

    assert_eq!(session.create(period, false).unwrap(), CreateOutcome::Created);
    assert!(session.ledger().is_empty());
    assert!(matches!(
        session.create(period, false),
        Err(CoreError::AlreadyExists(_))
    ));
    assert_eq!(session.create(period, true).unwrap(), CreateOutcome::Overwritten);
    assert_eq!(session.available_files().unwrap(), vec!["202404.md".to_string()]);
}

#[test]
fn failed_open_leaves_no_file_open() {
    let env = setup_test_env();
    env.write_bill("202403.md", MARCH_BILL);
    let mut session = env.session();
    session.open("202403").unwrap();

    assert!(session.open("202405").is_err());
    assert_eq!(session.current_file(), None);
    assert!(session.ledger().is_empty());
    assert!(matches!(session.save(), Err(CoreError::NoFileOpen)));
}

#[test]
fn malformed_rows_are_skipped_on_open() {
    let env = setup_test_env();
    let content = MARCH_BILL.replace("| 0303 | 咖啡 | 18 | latte |", "| 0303 | 咖啡 | abc | latte |");
    env.write_bill("202403.md", &content);
    let mut session = env.session();

    assert_eq!(session.open("202403").unwrap(), 2);
}
