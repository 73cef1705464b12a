#![allow(dead_code)]

use std::{
    fs,
    path::{Path, PathBuf},
    sync::Mutex,
};

use assert_cmd::Command;
use billy_core::{NoopRenderer, Session};
use billy_storage_md::MarkdownStorage;
use once_cell::sync::Lazy;
use tempfile::TempDir;

/// Holds TempDir guards so temporary folders live for the duration of the test run.
static TEST_DIRS: Lazy<Mutex<Vec<TempDir>>> = Lazy::new(|| Mutex::new(Vec::new()));

/// Isolated config home and bill directory for one test.
pub struct TestEnv {
    pub home: PathBuf,
    pub data: PathBuf,
}

impl TestEnv {
    pub fn bill_path(&self, name: &str) -> PathBuf {
        self.data.join(name)
    }

    pub fn write_bill(&self, name: &str, content: &str) -> PathBuf {
        let path = self.bill_path(name);
        fs::write(&path, content).expect("write bill fixture");
        path
    }

    pub fn read_bill(&self, name: &str) -> String {
        fs::read_to_string(self.bill_path(name)).expect("read bill file")
    }

    pub fn config_path(&self) -> PathBuf {
        self.home.join("config").join("config.json")
    }

    /// Script-mode CLI running inside the bill directory.
    pub fn cli(&self) -> Command {
        let mut cmd = Command::cargo_bin("bill_core_cli").expect("locate bill_core_cli");
        cmd.env("BILL_CORE_CLI_SCRIPT", "1")
            .env("BILL_CORE_HOME", &self.home)
            .env_remove("RUST_LOG")
            .current_dir(&self.data);
        cmd
    }

    /// Library session over the bill directory that renders nothing.
    pub fn session(&self) -> Session {
        Session::new(
            Box::new(MarkdownStorage::new()),
            &self.data,
            Box::new(NoopRenderer),
        )
    }
}

pub fn setup_test_env() -> TestEnv {
    let temp = TempDir::new().expect("create temp dir");
    let base = temp.path().to_path_buf();
    TEST_DIRS.lock().expect("lock temp dir registry").push(temp);

    let home = base.join("home");
    let data = base.join("bills");
    fs::create_dir_all(&home).expect("create home dir");
    fs::create_dir_all(&data).expect("create bill dir");
    TestEnv { home, data }
}

pub const MARCH_BILL: &str = "# 2024年03月账单\n\n| 日期 | 名称 | 流水 | 备注 |\n| ---- | ---- | ---- | ---- |\n| 0301 | 午饭 | 25 | 食堂 |\n| 0302 | 工资 | +5000 |  |\n| 0303 | 咖啡 | 18 | latte |\n";

pub fn exists(path: &Path) -> bool {
    path.is_file()
}
