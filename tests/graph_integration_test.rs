//! Integration tests for the generate/databases/tables commands.

use std::fs;
use std::process::Command;
use tempfile::TempDir;

fn get_binary_path() -> String {
    std::env::var("CARGO_BIN_EXE_sql2gv").unwrap_or_else(|_| "target/debug/sql2gv".to_string())
}

fn create_test_catalog(dir: &TempDir) -> std::path::PathBuf {
    let path = dir.path().join("catalog.yaml");
    fs::write(
        &path,
        r#"
databases:
  - name: Shop
    tables:
      - id: dbo.Customers
        columns:
          - { name: CustomerId, type: int, primary_key: true }
          - { name: Email, type: nvarchar(255), nullable: true }
      - id: dbo.Orders
        columns:
          - { name: OrderId, type: int, primary_key: true }
          - { name: CustomerId, type: int }
          - { name: ShipperId, type: int, nullable: true }
          - { name: Notes, type: nvarchar(max), nullable: true }
      - id: sales.Products
        columns:
          - { name: ProductId, type: int, primary_key: true }
          - { name: Name, type: nvarchar(100) }
    foreign_keys:
      - name: FK_Orders_Customers
        source_table: dbo.Orders
        source_column: CustomerId
        target_table: dbo.Customers
        target_column: CustomerId
      - source_table: dbo.Orders
        source_column: ShipperId
        target_table: dbo.Shippers
        target_column: ShipperId
  - name: Archive
"#,
    )
    .unwrap();
    path
}

#[test]
fn test_generate_detailed_output() {
    let dir = TempDir::new().unwrap();
    let catalog = create_test_catalog(&dir);
    let output = dir.path().join("shop.gv");

    let status = Command::new(get_binary_path())
        .args([
            "generate",
            catalog.to_str().unwrap(),
            "-d",
            "Shop",
            "-o",
            output.to_str().unwrap(),
        ])
        .status()
        .unwrap();

    assert!(status.success());
    let content = fs::read_to_string(&output).unwrap();
    assert!(content.starts_with("digraph \"Shop\" {"));
    assert!(content.contains("<B>dbo.Orders</B>"));
    assert!(content.contains("🔑 <B>OrderId:int</B>"));
    assert!(content.contains(
        "\"dbo.Orders\":c1 -> \"dbo.Customers\":c0 [label=\"FK_Orders_Customers\"];"
    ));
    // Shippers is not in the catalog, the edge is still emitted
    assert!(content.contains("\"dbo.Orders\":c2 -> \"dbo.Shippers\";"));
}

#[test]
fn test_generate_simple_to_stdout() {
    let dir = TempDir::new().unwrap();
    let catalog = create_test_catalog(&dir);

    let output = Command::new(get_binary_path())
        .args(["generate", catalog.to_str().unwrap(), "-d", "shop", "--simple"])
        .output()
        .unwrap();

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("  \"dbo.Orders\" [label=\"dbo.Orders\"];"));
    assert!(!stdout.contains("<TABLE"));

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("3 tables"));
}

#[test]
fn test_generate_table_selection() {
    let dir = TempDir::new().unwrap();
    let catalog = create_test_catalog(&dir);

    let output = Command::new(get_binary_path())
        .args([
            "generate",
            catalog.to_str().unwrap(),
            "-d",
            "Shop",
            "--simple",
            "--tables",
            "dbo.*",
            "--exclude-tables",
            "*.customers",
        ])
        .output()
        .unwrap();

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("\"dbo.Orders\" [label="));
    assert!(!stdout.contains("\"dbo.Customers\" [label="));
    assert!(!stdout.contains("sales.Products"));
    // FKs of selected tables still point at unselected ones
    assert!(stdout.contains("\"dbo.Orders\" -> \"dbo.Customers\""));
}

#[test]
fn test_generate_schema_filter_and_layout() {
    let dir = TempDir::new().unwrap();
    let catalog = create_test_catalog(&dir);

    let output = Command::new(get_binary_path())
        .args([
            "generate",
            catalog.to_str().unwrap(),
            "-d",
            "Shop",
            "-s",
            "sales",
            "--layout",
            "tb",
        ])
        .output()
        .unwrap();

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("rankdir=TB;"));
    assert!(stdout.contains("sales.Products"));
    assert!(!stdout.contains("dbo.Orders"));
}

#[test]
fn test_generate_hides_excluded_columns() {
    let dir = TempDir::new().unwrap();
    let catalog = create_test_catalog(&dir);
    let config = dir.path().join("sql2gv.yaml");
    fs::write(
        &config,
        "generation:\n  database: Shop\n  exclude_pattern: \"(Id|Email)$\"\n  hide_excluded: true\n",
    )
    .unwrap();

    let output = Command::new(get_binary_path())
        .args([
            "generate",
            catalog.to_str().unwrap(),
            "-c",
            config.to_str().unwrap(),
            "--tables",
            "dbo.Customers",
        ])
        .output()
        .unwrap();

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    // The primary key is never hidden
    assert!(stdout.contains("CustomerId:int"));
    assert!(!stdout.contains("Email"));
}

#[test]
fn test_generate_json_summary() {
    let dir = TempDir::new().unwrap();
    let catalog = create_test_catalog(&dir);
    let out_file = dir.path().join("shop.gv");

    let output = Command::new(get_binary_path())
        .args([
            "generate",
            catalog.to_str().unwrap(),
            "-d",
            "Shop",
            "-o",
            out_file.to_str().unwrap(),
            "--json",
            "--quiet",
        ])
        .output()
        .unwrap();

    assert!(output.status.success());
    let summary: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(summary["database"], "Shop");
    assert_eq!(summary["tables"], 3);
    assert_eq!(summary["columns"], 8);
    assert_eq!(summary["relationships"], 2);
    assert_eq!(summary["dangling_relationships"], 1);
    assert!(output.stderr.is_empty());
}

#[test]
fn test_generate_invalid_pattern_fails() {
    let dir = TempDir::new().unwrap();
    let catalog = create_test_catalog(&dir);

    let output = Command::new(get_binary_path())
        .args([
            "generate",
            catalog.to_str().unwrap(),
            "-d",
            "Shop",
            "--exclude-pattern",
            "(Id",
        ])
        .output()
        .unwrap();

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("configuration error"));
    assert!(output.stdout.is_empty());
}

#[test]
fn test_generate_unknown_database_fails() {
    let dir = TempDir::new().unwrap();
    let catalog = create_test_catalog(&dir);

    let output = Command::new(get_binary_path())
        .args(["generate", catalog.to_str().unwrap(), "-d", "Nope"])
        .output()
        .unwrap();

    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("unknown database: Nope"));
}

#[test]
fn test_generate_empty_database() {
    let dir = TempDir::new().unwrap();
    let catalog = create_test_catalog(&dir);

    let output = Command::new(get_binary_path())
        .args(["generate", catalog.to_str().unwrap(), "-d", "Archive"])
        .output()
        .unwrap();

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.starts_with("digraph \"Archive\" {"));
    assert!(stdout.trim_end().ends_with('}'));
    assert!(!stdout.contains("[label="));
}

#[test]
fn test_databases_command() {
    let dir = TempDir::new().unwrap();
    let catalog = create_test_catalog(&dir);

    let output = Command::new(get_binary_path())
        .args(["databases", catalog.to_str().unwrap()])
        .output()
        .unwrap();

    assert!(output.status.success());
    assert_eq!(String::from_utf8_lossy(&output.stdout), "Shop\nArchive\n");
}

#[test]
fn test_tables_command_json() {
    let dir = TempDir::new().unwrap();
    let catalog = create_test_catalog(&dir);

    let output = Command::new(get_binary_path())
        .args(["tables", catalog.to_str().unwrap(), "-d", "Shop", "--json"])
        .output()
        .unwrap();

    assert!(output.status.success());
    let tables: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let tables = tables.as_array().unwrap();
    assert_eq!(tables.len(), 3);
    assert_eq!(tables[1]["id"], "dbo.Orders");
    assert_eq!(tables[1]["columns"], 4);
    assert_eq!(tables[1]["primary_key"][0], "OrderId");
}
