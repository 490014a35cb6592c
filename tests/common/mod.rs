//! Shared testing utilities for rpt CLI tests.

use assert_cmd::Command;
use std::env;
use std::fs;
use std::io::{Cursor, Read};
use std::path::{Path, PathBuf};
use tempfile::TempDir;
use zip::ZipArchive;

/// Survey-style table used across CLI tests.
pub const SAMPLE_TABLE: &str = "\
CPF,nome_completo,idade,Pergunta
1,Ana Souza,30,Qual sua meta?
2,Bia Lima,41,Qual seu desafio?
";

pub const SAMPLE_TEMPLATE: &str = "Escreva um relatório para {{nome_completo}} ({{idade}} anos): {{Pergunta}}";

/// Testing harness providing an isolated environment for CLI exercises.
#[allow(dead_code)]
pub struct TestContext {
    root: TempDir,
    work_dir: PathBuf,
    original_cwd: PathBuf,
}

#[allow(dead_code)]
impl TestContext {
    /// Create a new isolated environment.
    pub fn new() -> Self {
        let root = TempDir::new().expect("Failed to create temp directory for tests");
        let work_dir = root.path().join("work");
        fs::create_dir_all(&work_dir).expect("Failed to create test work directory");
        let original_cwd = env::current_dir().expect("Failed to get current directory");

        Self { root, work_dir, original_cwd }
    }

    /// Path to the workspace directory used for CLI invocations.
    pub fn work_dir(&self) -> &Path {
        &self.work_dir
    }

    /// Build a command for invoking the compiled `rpt` binary within the work directory.
    pub fn cli(&self) -> Command {
        let mut cmd = Command::cargo_bin("rpt").expect("Failed to locate rpt binary");
        cmd.current_dir(self.work_dir()).env_remove("OPENAI_API_KEY").env_remove("RUST_LOG");
        cmd
    }

    /// Write `content` to `name` inside the work directory.
    pub fn write(&self, name: &str, content: &str) -> PathBuf {
        let path = self.work_dir.join(name);
        fs::write(&path, content).expect("Failed to write fixture");
        path
    }

    /// Write the sample table and template as `dados.csv` and `template.txt`.
    pub fn write_sample_inputs(&self) {
        self.write("dados.csv", SAMPLE_TABLE);
        self.write("template.txt", SAMPLE_TEMPLATE);
    }

    pub fn read(&self, name: &str) -> String {
        fs::read_to_string(self.work_dir.join(name)).expect("Failed to read output")
    }

    /// Sorted entry names of a ZIP archive in the work directory.
    pub fn archive_entries(&self, name: &str) -> Vec<String> {
        let archive = self.open_archive(name);
        let mut names: Vec<String> = archive.file_names().map(String::from).collect();
        names.sort();
        names
    }

    /// Text content of one archive entry.
    pub fn archive_entry(&self, archive: &str, entry: &str) -> String {
        let mut archive = self.open_archive(archive);
        let mut content = String::new();
        archive
            .by_name(entry)
            .expect("Missing archive entry")
            .read_to_string(&mut content)
            .expect("Archive entry is not UTF-8");
        content
    }

    fn open_archive(&self, name: &str) -> ZipArchive<Cursor<Vec<u8>>> {
        let bytes = fs::read(self.work_dir.join(name)).expect("Failed to read archive");
        ZipArchive::new(Cursor::new(bytes)).expect("Invalid ZIP archive")
    }

    /// Execute a closure after temporarily switching into the work directory.
    pub fn with_work_dir<F, R>(&self, action: F) -> R
    where
        F: FnOnce() -> R,
    {
        let original = env::current_dir().expect("Failed to capture current dir");
        env::set_current_dir(&self.work_dir).expect("Failed to switch current dir");
        let result = action();
        env::set_current_dir(original).expect("Failed to restore current dir");
        result
    }
}

impl Drop for TestContext {
    fn drop(&mut self) {
        let _ = env::set_current_dir(&self.original_cwd);
    }
}
