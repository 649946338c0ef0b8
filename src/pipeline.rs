use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::info;

use crate::core::catalog::{Catalog, CatalogStats};
use crate::core::model::PriceListRecord;
use crate::export::{
    Exporter, HtmlExporter, JsonExporter, ShellExporter, HTML_FILE, JSON_FILE, SHELL_FILE,
};
use crate::parser::{parse_filename, ContentExtractor, NoContentExtractor, PdfContentExtractor};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Html,
    Json,
    Shell,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentMode {
    Pdf { max_pages: usize },
    Disabled,
}

#[derive(Debug, Clone)]
pub struct PipelineConfig {
    pub input_dir: PathBuf,
    pub output_dir: PathBuf,
    /// Filenames in the report are relative to this directory; the parent
    /// of `input_dir` when unset.
    pub root: Option<PathBuf>,
    pub link_prefix: String,
    pub formats: Vec<OutputFormat>,
    pub content: ContentMode,
}

impl PipelineConfig {
    pub fn new(input_dir: PathBuf, output_dir: PathBuf) -> Self {
        Self {
            input_dir,
            output_dir,
            root: None,
            link_prefix: "../".to_string(),
            formats: vec![OutputFormat::Html, OutputFormat::Json, OutputFormat::Shell],
            content: ContentMode::Pdf {
                max_pages: crate::parser::DEFAULT_MAX_PAGES,
            },
        }
    }

    pub fn extractor(&self) -> Box<dyn ContentExtractor> {
        match self.content {
            ContentMode::Pdf { max_pages } => Box::new(PdfContentExtractor::new(max_pages)),
            ContentMode::Disabled => Box::new(NoContentExtractor),
        }
    }
}

#[derive(Debug)]
pub enum PipelineOutcome {
    MissingInput(PathBuf),
    NoInput(PathBuf),
    Written {
        stats: CatalogStats,
        files: Vec<PathBuf>,
    },
}

/// Input files found on disk, ready to be turned into a catalog.
#[derive(Debug)]
pub struct Discovered {
    root: PathBuf,
    files: Vec<PathBuf>,
}

#[derive(Debug)]
pub enum Discovery {
    MissingInput(PathBuf),
    NoInput(PathBuf),
    Ready(Discovered),
}

impl Discovered {
    pub fn file_count(&self) -> usize {
        self.files.len()
    }
}

/// Resolves the input folder and root to absolute paths and lists the PDFs.
pub fn discover(config: &PipelineConfig) -> Result<Discovery> {
    if !config.input_dir.is_dir() {
        return Ok(Discovery::MissingInput(config.input_dir.clone()));
    }

    let input = fs::canonicalize(&config.input_dir)
        .with_context(|| format!("failed to resolve {}", config.input_dir.display()))?;
    let root = match &config.root {
        Some(root) => {
            fs::canonicalize(root).with_context(|| format!("failed to resolve {}", root.display()))?
        }
        None => input.parent().unwrap_or(&input).to_path_buf(),
    };

    let files = scan_input(&input)?;
    if files.is_empty() {
        return Ok(Discovery::NoInput(config.input_dir.clone()));
    }
    info!(count = files.len(), dir = %input.display(), "found PDF files");
    Ok(Discovery::Ready(Discovered { root, files }))
}

pub fn process(discovered: &Discovered, config: &PipelineConfig) -> Result<PipelineOutcome> {
    let extractor = config.extractor();
    let catalog = build_catalog(&discovered.files, &discovered.root, extractor.as_ref());
    let files = export_catalog(&catalog, config)?;

    Ok(PipelineOutcome::Written {
        stats: catalog.stats(),
        files,
    })
}

pub fn run(config: &PipelineConfig) -> Result<PipelineOutcome> {
    match discover(config)? {
        Discovery::MissingInput(dir) => Ok(PipelineOutcome::MissingInput(dir)),
        Discovery::NoInput(dir) => Ok(PipelineOutcome::NoInput(dir)),
        Discovery::Ready(discovered) => process(&discovered, config),
    }
}

/// PDF files directly inside `dir`, sorted by filename.
pub fn scan_input(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for entry in fs::read_dir(dir).with_context(|| format!("failed to read {}", dir.display()))? {
        let path = entry?.path();
        let is_pdf = path
            .extension()
            .map(|ext| ext.eq_ignore_ascii_case("pdf"))
            .unwrap_or(false);
        if is_pdf && path.is_file() {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}

/// Path relative to `root` with forward slashes; the full path when it lies outside.
pub fn relative_name(path: &Path, root: &Path) -> String {
    let root = root.strip_prefix(".").unwrap_or(root);
    let rel = path
        .strip_prefix(root)
        .ok()
        .filter(|rel| !rel.as_os_str().is_empty())
        .unwrap_or(path);
    let rel = rel.strip_prefix(".").unwrap_or(rel);
    rel.to_string_lossy().replace('\\', "/")
}

pub fn build_record(path: &Path, root: &Path, extractor: &dyn ContentExtractor) -> PriceListRecord {
    let meta = parse_filename(&relative_name(path, root));
    let content = extractor.extract(path);
    info!(
        file = %meta.filename,
        make = %meta.make,
        model = %meta.model,
        prices = content.prices.len(),
        "parsed price list"
    );
    PriceListRecord::new(meta, content)
}

pub fn build_catalog(files: &[PathBuf], root: &Path, extractor: &dyn ContentExtractor) -> Catalog {
    Catalog::from_records(files.iter().map(|path| build_record(path, root, extractor)))
}

pub fn export_catalog(catalog: &Catalog, config: &PipelineConfig) -> Result<Vec<PathBuf>> {
    let out = &config.output_dir;
    let mut written = Vec::new();

    if config.formats.contains(&OutputFormat::Html) {
        HtmlExporter::new(out.clone(), config.link_prefix.clone()).export(catalog)?;
        written.push(out.join(HTML_FILE));
    }

    if config.formats.contains(&OutputFormat::Json) {
        JsonExporter::new(out.clone()).export(catalog)?;
        written.push(out.join(JSON_FILE));

        // the shell is useless without the JSON next to it
        if config.formats.contains(&OutputFormat::Shell) {
            ShellExporter::new(out.clone(), config.link_prefix.clone()).export(catalog)?;
            written.push(out.join(SHELL_FILE));
        }
    }

    Ok(written)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn relative_names_use_forward_slashes() {
        let name = relative_name(Path::new("cenniky/Transit.pdf"), Path::new("."));
        assert_eq!(name, "cenniky/Transit.pdf");

        let name = relative_name(Path::new("/data/repo/cenniky/Transit.pdf"), Path::new("/data/repo"));
        assert_eq!(name, "cenniky/Transit.pdf");

        let name = relative_name(Path::new("./cenniky/Transit.pdf"), Path::new("."));
        assert_eq!(name, "cenniky/Transit.pdf");
    }

    #[test]
    fn paths_outside_root_are_kept() {
        let name = relative_name(Path::new("/elsewhere/x.pdf"), Path::new("/data/repo"));
        assert_eq!(name, "/elsewhere/x.pdf");
    }

    #[test]
    fn scan_keeps_only_pdfs_in_sorted_order() -> Result<()> {
        let dir = tempfile::tempdir()?;
        for name in ["b.pdf", "a.PDF", "notes.txt", "c.pdf"] {
            fs::write(dir.path().join(name), b"x")?;
        }
        fs::create_dir(dir.path().join("nested.pdf"))?;

        let names: Vec<String> = scan_input(dir.path())?
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, vec!["a.PDF", "b.pdf", "c.pdf"]);
        Ok(())
    }

    #[test]
    fn default_root_is_parent_of_input() -> Result<()> {
        let dir = tempfile::tempdir()?;
        let input = dir.path().join("cenniky");
        fs::create_dir(&input)?;
        fs::write(input.join("Transit.pdf"), b"")?;

        let config = PipelineConfig::new(input, dir.path().join("docs"));
        let Discovery::Ready(discovered) = discover(&config)? else {
            panic!("expected PDFs to be found");
        };
        assert_eq!(discovered.file_count(), 1);
        assert_eq!(discovered.root, fs::canonicalize(dir.path())?);
        assert_eq!(relative_name(&discovered.files[0], &discovered.root), "cenniky/Transit.pdf");
        Ok(())
    }

    #[test]
    fn shell_requires_json() -> Result<()> {
        let dir = tempfile::tempdir()?;
        let mut config = PipelineConfig::new(dir.path().join("in"), dir.path().join("out"));
        config.formats = vec![OutputFormat::Html, OutputFormat::Shell];

        let written = export_catalog(&Catalog::default(), &config)?;
        assert_eq!(written, vec![dir.path().join("out").join(HTML_FILE)]);
        assert!(!dir.path().join("out").join(SHELL_FILE).exists());
        Ok(())
    }
}
