//! End-to-end generation of the blog fixture through `clientforge.toml`.

use clientforge_core::config::ClientforgeConfig;
use clientforge_core::{ClientforgeError, GenerateClientOptions, build_client, generate_client};
use pretty_assertions::assert_eq;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

fn fixture_path() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/blog.dmmf.json")
}

const SCHEMA: &str = r#"datasource db {
  provider = "postgresql"
  url      = env("DATABASE_URL")
}

model User {
  id    Int    @id @default(autoincrement())
  email String @unique
  posts Post[]
}
"#;

fn write_project(dir: &Path, generator_extra: &str) -> PathBuf {
    fs::write(dir.join("schema.prisma"), SCHEMA).unwrap();
    let config = format!(
        r#"
[generator]
output = "./generated"
dmmf_path = "{dmmf}"
schema_path = "./schema.prisma"
client_version = "6.1.0"
engine_version = "abc123"
{generator_extra}

[[datasources]]
name = "db"
provider = "postgresql"
url = 'env("DATABASE_URL")'
"#,
        dmmf = fixture_path().display().to_string().replace('\\', "/"),
    );
    let path = dir.join("clientforge.toml");
    fs::write(&path, config).unwrap();
    path
}

fn options_for(dir: &TempDir, generator_extra: &str) -> GenerateClientOptions {
    let config_path = write_project(dir.path(), generator_extra);
    let config = ClientforgeConfig::from_path(&config_path).unwrap();
    GenerateClientOptions::from_config(&config).unwrap()
}

#[test]
fn test_generates_full_client() {
    let dir = TempDir::new().unwrap();
    let options = options_for(&dir, "");
    let report = generate_client(&options).unwrap();

    let output = dir.path().join("generated");
    assert_eq!(report.files.len(), 10);
    for name in [
        "client.ts",
        "browser.ts",
        "enums.ts",
        "models.ts",
        "commonInputTypes.ts",
        "internal/class.ts",
        "internal/prismaNamespace.ts",
        "internal/prismaNamespaceBrowser.ts",
        "models/User.ts",
        "models/Post.ts",
    ] {
        assert!(output.join(name).is_file(), "missing {}", name);
    }

    let class = fs::read_to_string(output.join("internal/class.ts")).unwrap();
    assert!(class.contains("\"inlineSchema\": \"datasource db {"));
    assert!(class.contains("\"clientVersion\": \"6.1.0\""));
    assert!(class.contains("\"relativePath\": \"..\""));
    assert!(class.contains("\"fromEnvVar\": \"DATABASE_URL\""));

    let user = fs::read_to_string(output.join("models/User.ts")).unwrap();
    assert!(user.contains("export type UserModel = runtime.Types.Result.DefaultSelection<Prisma.$UserPayload>"));
    assert!(user.contains("export interface UserDelegate<"));
}

#[test]
fn test_output_outside_schema_directory() {
    let dir = TempDir::new().unwrap();
    let prisma_dir = dir.path().join("prisma");
    fs::create_dir_all(&prisma_dir).unwrap();
    let config_path = write_project(&prisma_dir, "");
    let config_text = fs::read_to_string(&config_path)
        .unwrap()
        .replace("output = \"./generated\"", "output = \"../generated\"");
    fs::write(&config_path, config_text).unwrap();

    let config = ClientforgeConfig::from_path(&config_path).unwrap();
    assert_eq!(config.output_dir(), dir.path().join("generated"));

    let options = GenerateClientOptions::from_config(&config).unwrap();
    let result = build_client(&options).unwrap();
    let class = result.file_map.get("internal/class.ts").unwrap();
    assert!(class.contains("\"relativePath\": \"../prisma\""));
    let output = dir.path().join("generated").display().to_string().replace('\\', "/");
    assert!(class.contains(&format!("\"value\": \"{}\"", output)));
    assert!(!class.contains("/./"));
}

#[test]
fn test_mts_output_uses_esm_imports() {
    let dir = TempDir::new().unwrap();
    let options = options_for(&dir, "generated_file_extension = \"mts\"");
    let result = build_client(&options).unwrap();

    let client = result.file_map.get("client.mts").unwrap();
    assert!(client.contains("import * as $Class from './internal/class.mjs'"));
    assert!(client.contains("globalThis['__dirname']"));
}

#[test]
fn test_conflicting_module_format_is_rejected() {
    let dir = TempDir::new().unwrap();
    let config_path = write_project(
        dir.path(),
        "generated_file_extension = \"cts\"\nmodule_format = \"esm\"",
    );
    let config = ClientforgeConfig::from_path(&config_path).unwrap();
    let err = GenerateClientOptions::from_config(&config).unwrap_err();
    assert!(matches!(err, ClientforgeError::Config(_)));
}

#[test]
fn test_ts_no_check_preamble() {
    let dir = TempDir::new().unwrap();
    let options = options_for(&dir, "ts_no_check_preamble = true");
    let result = build_client(&options).unwrap();
    for (_, content) in &result.file_map {
        assert!(content.lines().nth(3) == Some("// @ts-nocheck"));
    }
}

#[test]
fn test_refuses_foreign_output_directory() {
    let dir = TempDir::new().unwrap();
    let options = options_for(&dir, "");
    let output = dir.path().join("generated");
    fs::create_dir_all(&output).unwrap();
    fs::write(output.join("index.html"), "<html></html>").unwrap();

    let err = generate_client(&options).unwrap_err();
    assert!(matches!(err, ClientforgeError::OutputDirectory(_)));
    assert!(output.join("index.html").exists());
    assert!(!output.join("client.ts").exists());
}

#[test]
fn test_edge_target_client() {
    let dir = TempDir::new().unwrap();
    let options = options_for(&dir, "target = \"workerd\"");
    let result = build_client(&options).unwrap();

    let client = result.file_map.get("client.ts").unwrap();
    assert!(client.contains("import * as runtime from '@prisma/client/runtime/wasm-compiler-edge'"));
    assert!(!client.contains("import.meta.url"));
    let class = result.file_map.get("internal/class.ts").unwrap();
    assert!(class.contains("export function getPrismaClientClass(): PrismaClientConstructor {"));
}
