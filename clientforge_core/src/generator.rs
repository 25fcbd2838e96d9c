//! Client generation: build the file map, then write it to disk.

use crate::clientforge_log;
use crate::config::ClientforgeConfig;
use crate::dmmf::{DmmfHelper, Document};
use crate::error::{ClientforgeError, Result};
use crate::generation::files::ClientMetadata;
use crate::generation::{ContextSettings, GenerateContext, build_source_files};
use crate::layout::{FileMap, GeneratedFileExtension, ImportFileExtension, ModuleFormat, ModuleGraph};
use crate::ts::to_source;
use crate::validation::{validate_denylists, validate_mappings};
use bon::Builder;
use rayon::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info, trace, warn};
use walkdir::WalkDir;

/// Files whose presence marks a directory as a previous client output.
const CLIENT_ENTRY_FILES: [&str; 4] = ["client.ts", "client.mts", "client.cts", "client.d.ts"];

/// Everything a generation run needs.
#[derive(Debug, Builder)]
pub struct GenerateClientOptions {
    pub dmmf: DmmfHelper,
    pub metadata: ClientMetadata,
    pub settings: ContextSettings,
    #[builder(default)]
    pub generated_file_extension: GeneratedFileExtension,
    #[builder(default)]
    pub ts_no_check_preamble: bool,
}

impl GenerateClientOptions {
    /// Reads the DMMF document and schema named by the configuration.
    pub fn from_config(config: &ClientforgeConfig) -> Result<Self> {
        let generator = &config.generator;
        let dmmf = DmmfHelper::new(Document::from_path(&config.dmmf_path())?);

        let inline_schema = match config.schema_path() {
            Some(path) => {
                debug!(path = %path.display(), "Reading schema source");
                fs::read_to_string(&path)?
            }
            None => {
                warn!("No schema_path configured, inlineSchema will be empty");
                String::new()
            }
        };

        let extension = generator.generated_file_extension;
        let module_format = ModuleFormat::resolve(generator.module_format, extension)?;
        let import_extension = generator
            .import_file_extension
            .unwrap_or_else(|| ImportFileExtension::default_for(extension));

        let settings = ContextSettings::builder()
            .preview_features(generator.preview_features.clone())
            .target(generator.target)
            .module_format(module_format)
            .import_extension(import_extension)
            .runtime_base(generator.runtime_base.clone())
            .build();

        Ok(GenerateClientOptions {
            dmmf,
            metadata: ClientMetadata::from_config(config, inline_schema),
            settings,
            generated_file_extension: extension,
            ts_no_check_preamble: generator.ts_no_check_preamble,
        })
    }

    pub fn context(&self) -> GenerateContext<'_> {
        GenerateContext::new(&self.dmmf, self.settings.clone())
    }

    fn schema_path(&self) -> PathBuf {
        self.metadata
            .schema_path
            .clone()
            .unwrap_or_else(|| PathBuf::from("schema.prisma"))
    }
}

/// Output of [`build_client`].
#[derive(Debug, Clone)]
pub struct BuildClientResult {
    pub file_map: FileMap,
    /// Module paths, dependencies first.
    pub order: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedFile {
    pub path: PathBuf,
    pub bytes_written: usize,
}

/// Summary of a [`generate_client`] run.
#[derive(Debug, Clone, Default)]
pub struct GenerationReport {
    pub files: Vec<GeneratedFile>,
    pub models: usize,
    pub enums: usize,
    pub input_types: usize,
}

impl GenerationReport {
    pub fn total_bytes(&self) -> usize {
        self.files.iter().map(|f| f.bytes_written).sum()
    }
}

/// Builds every generated file in memory. Nothing touches the file system.
pub fn build_client(options: &GenerateClientOptions) -> Result<BuildClientResult> {
    info!("Building client");
    validate_mappings(&options.dmmf)?;

    let ctx = options.context();
    let files = build_source_files(&ctx, &options.metadata)?;

    let graph = ModuleGraph::build(
        files.iter().map(|(name, file)| (name.as_str(), file)),
        ctx.import_extension,
    )?;
    graph.check_value_cycles()?;
    let order = graph.emission_order()?;
    trace!(order = ?order, "Module emission order");

    let extension = options.generated_file_extension;
    let rendered: Vec<(String, String)> = files
        .par_iter()
        .map(|(name, file)| (extension.file_name(name), to_source(file)))
        .collect();

    let mut file_map = FileMap::new();
    for (path, content) in rendered {
        clientforge_log!(content.clone(), path.replace('/', "_"));
        file_map.insert(path, content);
    }
    file_map.add_preamble(options.ts_no_check_preamble);

    debug!(
        files = file_map.len(),
        bytes = file_map.total_bytes(),
        "Client built"
    );
    Ok(BuildClientResult { file_map, order })
}

/// Validates, builds and writes the client to the configured output
/// directory.
pub fn generate_client(options: &GenerateClientOptions) -> Result<GenerationReport> {
    validate_denylists(&options.dmmf, &options.schema_path())?;

    let BuildClientResult { file_map, .. } = build_client(options)?;
    let output_dir = &options.metadata.output_dir;

    delete_output_dir(output_dir)?;
    fs::create_dir_all(output_dir)?;
    let files = write_file_map(output_dir, &file_map)?;

    let dmmf = &options.dmmf;
    let report = GenerationReport {
        files,
        models: dmmf.models().len(),
        enums: dmmf.datamodel_enums().len(),
        input_types: dmmf.all_input_types().count(),
    };
    info!(
        output = %output_dir.display(),
        files = report.files.len(),
        bytes = report.total_bytes(),
        "Client generated"
    );
    Ok(report)
}

fn write_file_map(output_dir: &Path, file_map: &FileMap) -> Result<Vec<GeneratedFile>> {
    let mut written = Vec::with_capacity(file_map.len());
    for (relative, content) in file_map {
        let path = output_dir.join(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, content)?;
        trace!(path = %path.display(), bytes = content.len(), "Wrote file");
        written.push(GeneratedFile {
            path,
            bytes_written: content.len(),
        });
    }
    Ok(written)
}

/// Whether a file left in the output directory by an earlier run should be
/// removed. `depth` is 1 for direct children of the output directory.
fn is_stale_output(name: &str, depth: usize) -> bool {
    let anywhere = [".js", ".ts", ".mts", ".cts", ".wasm", ".prisma"]
        .iter()
        .any(|ext| name.ends_with(ext));
    let top_level = depth == 1
        && (name.ends_with(".node")
            || name.starts_with("query-engine-")
            || name.starts_with("schema-engine-")
            || name == "package.json");
    anywhere || top_level
}

/// Clears files of a previous run. Refuses to touch a non-empty directory
/// that does not look like generated client output.
fn delete_output_dir(output_dir: &Path) -> Result<()> {
    let entries: Vec<String> = match fs::read_dir(output_dir) {
        Ok(entries) => entries
            .map(|entry| entry.map(|e| e.file_name().to_string_lossy().into_owned()))
            .collect::<std::io::Result<_>>()?,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(()),
        Err(e) => return Err(e.into()),
    };
    if entries.is_empty() {
        return Ok(());
    }

    if !entries.iter().any(|name| CLIENT_ENTRY_FILES.contains(&name.as_str())) {
        return Err(ClientforgeError::output_directory(format!(
            "{} exists and is not empty but doesn't look like a generated Prisma Client. \
             Please check your output path and remove the existing directory if you indeed want to generate the Prisma Client in that location.",
            output_dir.display()
        )));
    }

    let mut removed = 0usize;
    for entry in WalkDir::new(output_dir).min_depth(1).follow_links(false) {
        let entry = entry?;
        if !entry.file_type().is_file() {
            continue;
        }
        let name = entry.file_name().to_string_lossy();
        if is_stale_output(&name, entry.depth()) {
            trace!(path = %entry.path().display(), "Removing stale output");
            fs::remove_file(entry.path())?;
            removed += 1;
        }
    }
    debug!(removed, output = %output_dir.display(), "Output directory cleaned");
    Ok(())
}
