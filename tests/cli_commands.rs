mod common;

use common::TestContext;
use predicates::prelude::*;
use std::fs;

#[test]
fn init_writes_starter_files() {
    let ctx = TestContext::new();

    ctx.cli()
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("rpt.toml"))
        .stdout(predicate::str::contains("prompt_template.txt"));

    assert!(ctx.read("rpt.toml").contains("[completion]"));
    assert!(ctx.read("prompt_template.txt").contains("{{nome_completo}}"));
}

#[test]
fn init_refuses_to_overwrite() {
    let ctx = TestContext::new();
    ctx.write("rpt.toml", "# existing\n");

    ctx.cli()
        .arg("init")
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("already exists"));

    assert_eq!(ctx.read("rpt.toml"), "# existing\n");
}

#[test]
fn prepare_writes_prompts_archive() {
    let ctx = TestContext::new();
    ctx.write_sample_inputs();

    ctx.cli()
        .args(["prepare", "--table", "dados.csv", "--template", "template.txt"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Prepared 2 prompt(s)"));

    assert_eq!(
        ctx.archive_entries("prompts.zip"),
        vec!["Ana_Souza_prompt.txt", "Bia_Lima_prompt.txt"]
    );
    assert_eq!(
        ctx.archive_entry("prompts.zip", "Bia_Lima_prompt.txt"),
        "Escreva um relatório para Bia Lima (41 anos): Qual seu desafio?"
    );
}

#[test]
fn prepare_with_columns_blanks_hidden_fields() {
    let ctx = TestContext::new();
    ctx.write_sample_inputs();

    ctx.cli()
        .args(["prepare", "--table", "dados.csv", "--template", "template.txt"])
        .args(["--columns", "nome_completo,Pergunta"])
        .assert()
        .success();

    assert_eq!(
        ctx.archive_entry("prompts.zip", "Ana_Souza_prompt.txt"),
        "Escreva um relatório para Ana Souza ( anos): Qual sua meta?"
    );
}

#[test]
fn prepare_rejects_unknown_column() {
    let ctx = TestContext::new();
    ctx.write_sample_inputs();

    ctx.cli()
        .args(["prepare", "--table", "dados.csv", "--template", "template.txt"])
        .args(["--columns", "renda"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Missing required column(s): renda"));
}

#[test]
fn run_mock_writes_docx_responses() {
    let ctx = TestContext::new();
    ctx.write_sample_inputs();

    ctx.cli()
        .args(["run", "--mock", "--table", "dados.csv", "--template", "template.txt"])
        .args(["--out-dir", "saida"])
        .assert()
        .success()
        .stdout(predicate::str::contains("[1/2] Ana Souza"))
        .stdout(predicate::str::contains("[2/2] Bia Lima"))
        .stdout(predicate::str::contains("2 succeeded, 0 failed"));

    assert_eq!(
        ctx.archive_entries("saida/respostas.zip"),
        vec!["RESPOSTA_Ana_Souza.docx", "RESPOSTA_Bia_Lima.docx"]
    );
    assert!(ctx.work_dir().join("saida/prompts.zip").is_file());
}

#[test]
fn run_mock_markdown_with_only_label() {
    let ctx = TestContext::new();
    ctx.write_sample_inputs();

    ctx.cli()
        .args(["run", "--mock", "--table", "dados.csv", "--template", "template.txt"])
        .args(["--format", "md", "--only", "Bia_Lima", "--model", "gpt-test"])
        .assert()
        .success()
        .stdout(predicate::str::contains("1 record(s)"));

    assert_eq!(ctx.archive_entries("respostas.zip"), vec!["RESPOSTA_Bia_Lima.md"]);
    let report = ctx.archive_entry("respostas.zip", "RESPOSTA_Bia_Lima.md");
    assert!(report.starts_with("# Mock report\n\n"));
    assert!(report.contains("Model: gpt-test"));
    assert!(report.contains("- **Prompt length:**"));
}

#[test]
fn run_unknown_label_fails() {
    let ctx = TestContext::new();
    ctx.write_sample_inputs();

    ctx.cli()
        .args(["run", "--mock", "--table", "dados.csv", "--template", "template.txt"])
        .args(["--only", "Zoe"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Record 'Zoe' not found"));
}

#[test]
fn run_without_api_key_fails_non_interactively() {
    let ctx = TestContext::new();
    ctx.write_sample_inputs();

    ctx.cli()
        .args(["run", "--table", "dados.csv", "--template", "template.txt"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("OPENAI_API_KEY"));
}

#[test]
fn run_against_unreachable_endpoint_records_failures() {
    let ctx = TestContext::new();
    ctx.write_sample_inputs();
    ctx.write(
        "rpt.toml",
        r#"[completion]
api_url = "http://127.0.0.1:9/v1/chat/completions"
timeout_secs = 1
max_attempts = 1
"#,
    );

    ctx.cli()
        .args(["run", "--table", "dados.csv", "--template", "template.txt", "--first", "1"])
        .args(["--format", "md", "--fail-on-error"])
        .env("OPENAI_API_KEY", "sk-test")
        .assert()
        .code(2)
        .stdout(predicate::str::contains("❌ Fatal connection error"))
        .stdout(predicate::str::contains("0 succeeded, 1 failed"));

    let report = ctx.archive_entry("respostas.zip", "RESPOSTA_Ana_Souza.md");
    assert!(report.starts_with("Fatal connection error"));
}

#[test]
fn invalid_config_is_rejected() {
    let ctx = TestContext::new();
    ctx.write_sample_inputs();
    ctx.write("custom.toml", "[completion]\ntemperature = 5.0\n");

    ctx.cli()
        .args(["--config", "custom.toml", "prepare", "--table", "dados.csv"])
        .args(["--template", "template.txt"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid configuration"));
}

#[test]
fn explicit_missing_config_is_an_error() {
    let ctx = TestContext::new();
    ctx.write_sample_inputs();

    ctx.cli()
        .args(["prepare", "--table", "dados.csv", "--template", "template.txt"])
        .args(["--config", "absent.toml"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Config file not found"));
}

#[test]
fn consolidate_merges_second_rows() {
    let ctx = TestContext::new();
    ctx.write("bruto.csv", "CPF;Pergunta;X\n1;Q;a\n1;Q2;b\n2;Q3;c\n;Q4;d\n");

    ctx.cli()
        .args(["consolidate", "--input", "bruto.csv", "--output", "consolidado.csv"])
        .args(["--delimiter", ";"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Consolidated 4 row(s) into 2 record(s)"));

    assert_eq!(
        ctx.read("consolidado.csv"),
        "CPF;Pergunta;X;Pergunta_2;X_2\n1;Q;a;Q2;b\n2;Q3;c;;\n"
    );
}

#[test]
fn consolidate_reports_missing_key_field() {
    let ctx = TestContext::new();
    ctx.write("bruto.csv", "id,Pergunta\n1,Q\n");

    ctx.cli()
        .args(["consolidate", "--input", "bruto.csv", "--output", "out.csv"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Missing required column(s): CPF"));

    assert!(!ctx.work_dir().join("out.csv").exists());
}

#[test]
fn placeholders_marks_missing_columns() {
    let ctx = TestContext::new();
    ctx.write_sample_inputs();
    ctx.write("extra.txt", "{{nome_completo}} {{renda}}");

    ctx.cli()
        .args(["placeholders", "--template", "extra.txt", "--table", "dados.csv"])
        .assert()
        .success()
        .stdout(predicate::str::contains("nome_completo\n"))
        .stdout(predicate::str::contains("renda (not in table, will be empty)"));
}

#[test]
fn render_converts_markdown_to_docx() {
    let ctx = TestContext::new();
    ctx.write("resposta.md", "# Título\n\n- **Ponto** forte\nTexto\n");

    ctx.cli()
        .args(["render", "--input", "resposta.md", "--output", "resposta.docx"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Rendered 3 block(s)"));

    let xml = ctx.archive_entry("resposta.docx", "word/document.xml");
    assert!(xml.contains("Heading1"));
    assert!(xml.contains("Ponto"));
    assert!(fs::metadata(ctx.work_dir().join("resposta.docx")).unwrap().len() > 0);
}
