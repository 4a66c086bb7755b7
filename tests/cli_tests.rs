use assert_cmd::prelude::*;
use predicates::prelude::*;
use std::fs;
use std::path::Path;
use std::process::Command;
use tempfile::TempDir;

fn orbitdoc_cmd() -> Command {
    Command::new(assert_cmd::cargo::cargo_bin!("orbitdoc"))
}

fn init_config(config_path: &Path) {
    orbitdoc_cmd()
        .args(["-C", config_path.to_str().unwrap(), "init"])
        .assert()
        .success();
}

/// Base generate invocation with valid mandatory fields; tests override
/// what they need.
fn generate_args(config_path: &Path) -> Vec<String> {
    [
        "-C",
        config_path.to_str().unwrap(),
        "generate",
        "--doc-type",
        "quotation",
        "--number",
        "0042",
        "--name",
        "Ravi Kumar",
        "--address",
        "Village Road, Kolhapur",
        "--phone",
        "9876543210",
        "--item",
        "pt-pro:1",
        "--item",
        "battery:1",
    ]
    .iter()
    .map(|s| s.to_string())
    .collect()
}

#[test]
fn test_help() {
    orbitdoc_cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Quotation and proforma receipt generator",
        ));
}

#[test]
fn test_version() {
    orbitdoc_cmd()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("orbitdoc"));
}

#[test]
fn test_init_creates_config_and_templates() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("orbitdoc-config");

    orbitdoc_cmd()
        .args(["-C", config_path.to_str().unwrap(), "init"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Initialized orbitdoc config"));

    assert!(config_path.join("config.toml").exists());
    assert!(config_path.join("output").is_dir());
    assert!(config_path
        .join("templates/Orbit_Agritech_Quotation_Summary_Template.docx")
        .exists());
    assert!(config_path
        .join("templates/Orbit_Agritech_Partial_Proforma_Receipt.docx")
        .exists());
    assert!(config_path
        .join("templates/Orbit_Agritech_Full_Proforma_Receipt.docx")
        .exists());
}

#[test]
fn test_init_fails_if_exists() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("orbitdoc-config");

    init_config(&config_path);

    orbitdoc_cmd()
        .args(["-C", config_path.to_str().unwrap(), "init"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("already exists"));
}

#[test]
fn test_items_without_init() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("nonexistent");

    orbitdoc_cmd()
        .args(["-C", config_path.to_str().unwrap(), "items"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("not found"));
}

#[test]
fn test_items_list() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("orbitdoc-config");

    init_config(&config_path);

    orbitdoc_cmd()
        .args(["-C", config_path.to_str().unwrap(), "items"])
        .assert()
        .success()
        .stdout(predicate::str::contains("pt-pro"))
        .stdout(predicate::str::contains("12 HP PT Pro"))
        .stdout(predicate::str::contains("112,000"))
        .stdout(predicate::str::contains("Battery Sets"));
}

#[test]
fn test_roles_list() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("orbitdoc-config");

    init_config(&config_path);

    orbitdoc_cmd()
        .args(["-C", config_path.to_str().unwrap(), "roles"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Business Development Officer"))
        .stdout(predicate::str::contains("80,000"))
        .stdout(predicate::str::contains("Co-Founder"))
        .stdout(predicate::str::contains("120,000"));
}

#[test]
fn test_preview_quotation_with_subsidy() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("orbitdoc-config");

    init_config(&config_path);

    orbitdoc_cmd()
        .args([
            "-C",
            config_path.to_str().unwrap(),
            "preview",
            "--item",
            "pt-pro:1",
            "--item",
            "battery:1",
            "--filled-by",
            "manager",
            "--subsidy",
            "50000",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("168,000"))
        .stdout(predicate::str::contains("50,000"))
        .stdout(predicate::str::contains("118,000"));
}

#[test]
fn test_preview_subsidy_above_cap() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("orbitdoc-config");

    init_config(&config_path);

    // Manager with a single battery caps at 65,000
    orbitdoc_cmd()
        .args([
            "-C",
            config_path.to_str().unwrap(),
            "preview",
            "--item",
            "pt-pro:1",
            "--item",
            "battery:1",
            "--filled-by",
            "manager",
            "--subsidy",
            "70000",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("outside the allowed range"));
}

#[test]
fn test_preview_without_items() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("orbitdoc-config");

    init_config(&config_path);

    orbitdoc_cmd()
        .args(["-C", config_path.to_str().unwrap(), "preview"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("No item quantities selected"));
}

#[test]
fn test_generate_writes_docx() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("orbitdoc-config");

    init_config(&config_path);

    orbitdoc_cmd()
        .args(generate_args(&config_path))
        .assert()
        .success()
        .stdout(predicate::str::contains("Generated Quotation Summary 0042"))
        .stdout(predicate::str::contains("168,000"));

    assert!(config_path
        .join("output/Quotation_Summary_0042.docx")
        .exists());
}

#[test]
fn test_generate_truncates_document_number() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("orbitdoc-config");

    init_config(&config_path);

    let mut args = generate_args(&config_path);
    let number_pos = args.iter().position(|a| a == "0042").unwrap();
    args[number_pos] = "12345".to_string();

    orbitdoc_cmd()
        .args(&args)
        .assert()
        .success()
        .stdout(predicate::str::contains("Generated Quotation Summary 1234"));

    assert!(config_path
        .join("output/Quotation_Summary_1234.docx")
        .exists());
}

#[test]
fn test_generate_rejects_short_phone() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("orbitdoc-config");

    init_config(&config_path);

    let mut args = generate_args(&config_path);
    let phone_pos = args.iter().position(|a| a == "9876543210").unwrap();
    args[phone_pos] = "98765432".to_string();

    orbitdoc_cmd()
        .args(&args)
        .assert()
        .failure()
        .stderr(predicate::str::contains("exactly 10 digits"));

    // nothing may be written when validation fails
    assert!(!config_path
        .join("output/Quotation_Summary_0042.docx")
        .exists());
}

#[test]
fn test_generate_requires_amount_received_for_receipts() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("orbitdoc-config");

    init_config(&config_path);

    let mut args = generate_args(&config_path);
    let type_pos = args.iter().position(|a| a == "quotation").unwrap();
    args[type_pos] = "full-receipt".to_string();

    orbitdoc_cmd()
        .args(&args)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Amount received is required"));
}

#[test]
fn test_generate_full_receipt() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("orbitdoc-config");

    init_config(&config_path);

    let mut args = generate_args(&config_path);
    let type_pos = args.iter().position(|a| a == "quotation").unwrap();
    args[type_pos] = "full-receipt".to_string();
    args.extend([
        "--amount-received".to_string(),
        "168,000".to_string(),
        "--payment-mode".to_string(),
        "cash".to_string(),
    ]);

    orbitdoc_cmd()
        .args(&args)
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Generated Full Proforma Receipt 0042",
        ));

    assert!(config_path
        .join("output/Full_Proforma_Receipt_0042.docx")
        .exists());
}

#[test]
fn test_generate_no_items() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("orbitdoc-config");

    init_config(&config_path);

    let args: Vec<String> = generate_args(&config_path)
        .into_iter()
        .filter(|a| a != "--item" && a != "pt-pro:1" && a != "battery:1")
        .collect();

    orbitdoc_cmd()
        .args(&args)
        .assert()
        .failure()
        .stderr(predicate::str::contains("No item quantities selected"));
}

#[test]
fn test_generate_missing_template_is_fatal() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("orbitdoc-config");

    init_config(&config_path);
    fs::remove_file(
        config_path.join("templates/Orbit_Agritech_Quotation_Summary_Template.docx"),
    )
    .unwrap();

    orbitdoc_cmd()
        .args(generate_args(&config_path))
        .assert()
        .failure()
        .stderr(predicate::str::contains("Template file not found"));
}

#[test]
fn test_generate_pdf_falls_back_without_converter() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("orbitdoc-config");

    init_config(&config_path);

    // Point the converter at a binary that cannot exist so the fallback
    // path is exercised deterministically.
    fs::write(
        config_path.join("config.toml"),
        r#"[convert]
soffice = "orbitdoc-test-no-converter"
"#,
    )
    .unwrap();

    let mut args = generate_args(&config_path);
    args.push("--pdf".to_string());

    orbitdoc_cmd()
        .args(&args)
        .assert()
        .success()
        .stdout(predicate::str::contains("PDF:"));

    let pdf_path = config_path.join("output/Quotation_Summary_0042.pdf");
    assert!(pdf_path.exists());
    let bytes = fs::read(&pdf_path).unwrap();
    assert!(bytes.starts_with(b"%PDF"));
}

#[test]
fn test_generate_subsidy_on_receipt_is_rejected() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("orbitdoc-config");

    init_config(&config_path);

    let mut args = generate_args(&config_path);
    let type_pos = args.iter().position(|a| a == "quotation").unwrap();
    args[type_pos] = "partial-receipt".to_string();
    args.extend([
        "--amount-received".to_string(),
        "50,000".to_string(),
        "--balance-due".to_string(),
        "118,000".to_string(),
        "--subsidy".to_string(),
        "10000".to_string(),
    ]);

    orbitdoc_cmd()
        .args(&args)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Quotation Summary documents only"));
}
