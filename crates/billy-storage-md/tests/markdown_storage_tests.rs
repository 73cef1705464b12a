use std::fs;

use billy_core::{CoreError, CreateOutcome, Ledger, LedgerStorage};
use billy_domain::{EntryFields, SortField};
use billy_storage_md::MarkdownStorage;
use tempfile::tempdir;

const MARCH: &str = "# 2024年03月账单

| 日期 | 名称 | 流水 | 备注 |
| ---- | ---- | ---- | ---- |
| 0301 | 工资 | +8000 | 三月 |
| 0302 | 午饭 | 25.5 |  |
| 0303 | 房租 | 2000 | 押一付三 |
";

#[test]
fn load_then_save_reproduces_rows() {
    let dir = tempdir().expect("tempdir");
    let path = dir.path().join("202403.md");
    fs::write(&path, MARCH).expect("seed file");
    let storage = MarkdownStorage::new();

    let ledger = storage.load(&path).expect("load");
    assert_eq!(ledger.len(), 3);
    assert!(!ledger.is_dirty());

    storage.save(&path, &ledger).expect("save");
    assert_eq!(fs::read_to_string(&path).expect("read back"), MARCH);
    assert!(!dir.path().join("202403.md.tmp").exists());
}

#[test]
fn save_writes_backing_order_not_display_order() {
    let dir = tempdir().expect("tempdir");
    let path = dir.path().join("202403.md");
    fs::write(&path, MARCH).expect("seed file");
    let storage = MarkdownStorage::new();

    let mut ledger = storage.load(&path).expect("load");
    ledger.sort_by(SortField::Amount);
    ledger
        .add(&EntryFields::new("0304", "咖啡", "18", ""), None)
        .expect("add");
    storage.save(&path, &ledger).expect("save");

    let reloaded = storage.load(&path).expect("reload");
    let names: Vec<_> = reloaded.entries().iter().map(|e| e.name.as_str()).collect();
    assert_eq!(names, ["工资", "午饭", "房租", "咖啡"]);
}

#[test]
fn malformed_rows_are_skipped_on_load() {
    let dir = tempdir().expect("tempdir");
    let path = dir.path().join("202404.md");
    fs::write(
        &path,
        "# 2024年04月账单\n\n| 日期 | 名称 | 流水 | 备注 |\n| ---- | ---- | ---- | ---- |\n| 0401 | 书 | twelve | |\n| 0402 | 书 | 12 | |\n",
    )
    .expect("seed file");

    let ledger = MarkdownStorage::new().load(&path).expect("load");

    assert_eq!(ledger.len(), 1);
    assert_eq!(ledger.entries()[0].amount.as_str(), "12");
}

#[test]
fn load_reports_missing_and_non_utf8_files() {
    let dir = tempdir().expect("tempdir");
    let storage = MarkdownStorage::new();

    let missing = storage.load(&dir.path().join("209901.md"));
    assert!(matches!(missing, Err(CoreError::Io(_))));

    let binary = dir.path().join("202405.md");
    fs::write(&binary, [0xff, 0xfe, 0x00, 0x7c]).expect("seed file");
    assert!(matches!(storage.load(&binary), Err(CoreError::Format(_))));
}

#[test]
fn list_available_filters_and_sorts_bill_files() {
    let dir = tempdir().expect("tempdir");
    for name in [
        "202403.md",
        "202312.md",
        "notes.md",
        "2024031.md",
        "202401.txt",
        "２０２４０３.md",
    ] {
        fs::write(dir.path().join(name), "").expect("seed file");
    }
    fs::create_dir(dir.path().join("202402.md")).expect("seed dir");
    let storage = MarkdownStorage::new();

    let names = storage.list_available(dir.path()).expect("list");

    assert_eq!(names, ["202312.md", "202403.md"]);
    assert!(storage
        .list_available(&dir.path().join("absent"))
        .expect("list missing dir")
        .is_empty());
}

#[test]
fn create_refuses_to_overwrite_without_permission() {
    let dir = tempdir().expect("tempdir");
    let path = dir.path().join("202406.md");
    let storage = MarkdownStorage::new();

    assert_eq!(storage.create(&path, false).expect("create"), CreateOutcome::Created);
    let empty = fs::read_to_string(&path).expect("read");
    assert!(empty.starts_with("# 2024年06月账单\n\n| 日期 | 名称 | 流水 | 备注 |"));

    let mut ledger = Ledger::new();
    ledger
        .add(&EntryFields::new("0601", "水费", "80", ""), None)
        .expect("add");
    storage.save(&path, &ledger).expect("save");

    assert!(matches!(
        storage.create(&path, false),
        Err(CoreError::AlreadyExists(_))
    ));
    assert_eq!(storage.load(&path).expect("load").len(), 1);

    assert_eq!(
        storage.create(&path, true).expect("overwrite"),
        CreateOutcome::Overwritten
    );
    assert!(storage.load(&path).expect("load").is_empty());
}

#[test]
fn save_requires_a_bill_file_name() {
    let dir = tempdir().expect("tempdir");
    let path = dir.path().join("march.md");

    let err = MarkdownStorage::new()
        .save(&path, &Ledger::new())
        .unwrap_err();

    assert!(matches!(err, CoreError::Format(_)));
    assert!(!path.exists());
}

#[test]
fn bill_file_name_pattern() {
    assert!(MarkdownStorage::is_bill_file_name("202501.md"));
    assert!(!MarkdownStorage::is_bill_file_name("20251.md"));
    assert!(!MarkdownStorage::is_bill_file_name("202501.md.tmp"));
    assert!(!MarkdownStorage::is_bill_file_name("２０２５０１.md"));
    assert!(!MarkdownStorage::is_bill_file_name("٢٠٢٥٠١.md"));
}
