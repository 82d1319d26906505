//! Common test utilities and helpers

#![allow(dead_code)]

use assert_cmd::Command;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

pub const STORES_CSV: &str = "store_id,store_name,region\n\
                              1,Store_001,North\n\
                              2,Store_002,South\n\
                              3,Store_003,East\n";

pub const SALES_CSV: &str = "date,store_id,total_sales,transaction_count\n\
                             2024-01-01,1,1520.75,48\n\
                             2024-01-01,2,980.10,33\n\
                             2024-01-02,1,1310.00,41\n\
                             2024-01-02,2,1105.55,37\n";

pub const INVENTORY_CSV: &str = "date,store_id,sku,on_hand\n\
                                 2024-01-02,1,SKU_0001,14\n\
                                 2024-01-02,2,SKU_0001,3\n";

pub const PROMOTIONS_CSV: &str =
    "promotion_id,store_id,start_date,end_date,discount_pct,promotion_type\n\
     PROMO_000,1,2024-01-01,2024-01-07,0.25,Seasonal\n\
     PROMO_001,3,2024-02-10,2024-02-12,0.15,Clearance\n";

pub const DRIFTED_PROMOTIONS_CSV: &str =
    "promotion_id,store_id,start_date,end_date,discount_percent,promotion_type\n\
     PROMO_070,2,2024-03-01,2024-03-04,0.3,Holiday\n";

/// A scratch working directory with a `data/` folder
pub struct Workspace {
    dir: TempDir,
}

impl Workspace {
    pub fn new() -> Self {
        let dir = TempDir::new().expect("create temp dir");
        fs::create_dir_all(dir.path().join("data")).expect("create data dir");
        Self { dir }
    }

    /// Workspace holding a clean copy of every input file
    pub fn with_retail_feed() -> Self {
        let ws = Self::new();
        ws.write_data("stores.csv", STORES_CSV);
        ws.write_data("daily_sales.csv", SALES_CSV);
        ws.write_data("inventory_snapshots.csv", INVENTORY_CSV);
        ws.write_data("promotions.csv", PROMOTIONS_CSV);
        ws
    }

    pub fn root(&self) -> &Path {
        self.dir.path()
    }

    pub fn data_dir(&self) -> PathBuf {
        self.root().join("data")
    }

    pub fn data(&self, name: &str) -> PathBuf {
        self.data_dir().join(name)
    }

    pub fn write_data(&self, name: &str, contents: &str) -> PathBuf {
        let path = self.data(name);
        fs::write(&path, contents).expect("write data file");
        path
    }

    pub fn summary_path(&self) -> PathBuf {
        self.root().join("logs").join("pipeline_summary.json")
    }

    pub fn summary_json(&self) -> serde_json::Value {
        let text = fs::read_to_string(self.summary_path()).expect("read summary");
        serde_json::from_str(&text).expect("parse summary")
    }

    /// Names of everything in the default quarantine directory, sorted
    pub fn quarantined(&self) -> Vec<String> {
        let dir = self.data_dir().join("quarantine");
        let Ok(entries) = fs::read_dir(dir) else {
            return Vec::new();
        };
        let mut names: Vec<String> = entries
            .map(|e| e.expect("dir entry").file_name().to_string_lossy().into_owned())
            .collect();
        names.sort();
        names
    }

    /// The binary, run from the workspace root with no `INGEST_*` leakage
    pub fn command(&self) -> Command {
        let mut cmd = Command::cargo_bin("retail-ingest").expect("binary built");
        cmd.current_dir(self.root())
            .env_remove("INGEST_DATA_DIR")
            .env_remove("INGEST_QUARANTINE_DIR")
            .env_remove("INGEST_SUMMARY_PATH")
            .env_remove("INGEST_BACKUP_DIR")
            .env_remove("RUST_LOG");
        cmd
    }
}
