mod common;

use common::TestContext;
use serial_test::serial;

#[test]
#[serial]
fn init_writes_scaffold_via_library_api() {
    let ctx = TestContext::new();

    let outcome = ctx.with_work_dir(|| rpt::init().expect("init should succeed"));

    assert_eq!(outcome.created.len(), 2);
    assert!(ctx.work_dir().join("rpt.toml").is_file());
}

#[test]
#[serial]
fn scaffolded_config_loads_from_working_directory() {
    let ctx = TestContext::new();

    let config = ctx.with_work_dir(|| {
        rpt::init().expect("init should succeed");
        rpt::load_config(None).expect("config should load")
    });

    assert_eq!(config.completion.model, "gpt-4o");
    assert_eq!(config.batch.display_field, "nome_completo");
}

#[test]
fn batch_job_runs_through_library_api() {
    let ctx = TestContext::new();
    ctx.write_sample_inputs();

    let mut config = rpt::RunConfig::default();
    config.batch.document_format = rpt::DocumentFormat::Markdown;
    let options = rpt::RunOptions {
        inputs: rpt::BatchInputs {
            table: ctx.work_dir().join("dados.csv"),
            template: ctx.work_dir().join("template.txt"),
            columns: None,
            delimiter: b',',
        },
        selection: rpt::Selection::First(1),
        out_dir: ctx.work_dir().to_path_buf(),
    };

    let mut progress = rpt::ports::NoopProgress;
    let result = rpt::run(&options, &config, rpt::CompletionBackend::Mock, &mut progress)
        .expect("run should succeed");

    assert_eq!(result.report.succeeded, 1);
    assert_eq!(result.responses[0].label, "Ana_Souza");
    assert_eq!(ctx.archive_entries("respostas.zip"), vec!["RESPOSTA_Ana_Souza.md"]);
}

#[test]
fn consolidate_through_library_api() {
    let ctx = TestContext::new();
    let input = ctx.write("bruto.csv", "CPF,Pergunta\n1,Q\n1,Q2\n");

    let outcome = rpt::consolidate(&rpt::ConsolidateOptions {
        input,
        output: ctx.work_dir().join("out.csv"),
        key_field: "CPF".into(),
        cutoff_field: "Pergunta".into(),
        delimiter: b',',
    })
    .expect("consolidate should succeed");

    assert_eq!(outcome.output_rows, 1);
    assert_eq!(ctx.read("out.csv"), "CPF,Pergunta,Pergunta_2\n1,Q,Q2\n");
}
