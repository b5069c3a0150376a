use std::io;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};

use tracing::{debug, warn};

use super::ParseError;

/// Rasterizes a PDF and recognizes the text of each page.
pub trait PageRecognizer: Send + Sync {
    /// Returns one string per page, in page order. A page that cannot be
    /// recognized may be skipped; a missing engine is an error.
    fn recognize_pages(&self, pdf: &[u8]) -> Result<Vec<String>, ParseError>;
}

/// OCR through the poppler and tesseract command-line tools.
#[derive(Debug, Clone)]
pub struct TesseractCli {
    languages: String,
    dpi: u32,
    pdftoppm_bin: String,
    tesseract_bin: String,
}

impl TesseractCli {
    pub fn new(languages: &[String], dpi: u32) -> Self {
        let languages = if languages.is_empty() {
            "eng".to_string()
        } else {
            languages.join("+")
        };
        Self {
            languages,
            dpi,
            pdftoppm_bin: "pdftoppm".to_string(),
            tesseract_bin: "tesseract".to_string(),
        }
    }

    pub fn with_binaries(mut self, pdftoppm: impl Into<String>, tesseract: impl Into<String>) -> Self {
        self.pdftoppm_bin = pdftoppm.into();
        self.tesseract_bin = tesseract.into();
        self
    }

    pub fn languages(&self) -> &str {
        &self.languages
    }

    fn rasterize(&self, pdf: &[u8], workdir: &Path) -> Result<Vec<PathBuf>, ParseError> {
        let input = workdir.join("input.pdf");
        std::fs::write(&input, pdf)?;

        let output = run(
            Command::new(&self.pdftoppm_bin)
                .arg("-r")
                .arg(self.dpi.to_string())
                .arg("-png")
                .arg(&input)
                .arg(workdir.join("page")),
            &self.pdftoppm_bin,
        )?;

        if !output.status.success() {
            warn!(
                "pdftoppm could not rasterize the document: {}",
                String::from_utf8_lossy(&output.stderr).trim()
            );
            return Ok(Vec::new());
        }

        let mut images: Vec<PathBuf> = std::fs::read_dir(workdir)?
            .filter_map(|entry| entry.ok().map(|e| e.path()))
            .filter(|p| p.extension().is_some_and(|ext| ext == "png"))
            .collect();
        images.sort_by_key(|p| page_number(p));
        Ok(images)
    }
}

impl PageRecognizer for TesseractCli {
    fn recognize_pages(&self, pdf: &[u8]) -> Result<Vec<String>, ParseError> {
        let workdir = tempfile::tempdir()?;
        let images = self.rasterize(pdf, workdir.path())?;
        debug!(pages = images.len(), dpi = self.dpi, "Rasterized PDF for OCR");

        let mut pages = Vec::with_capacity(images.len());
        for image in &images {
            let output = run(
                Command::new(&self.tesseract_bin)
                    .arg(image)
                    .arg("stdout")
                    .arg("-l")
                    .arg(&self.languages),
                &self.tesseract_bin,
            )?;

            if !output.status.success() {
                warn!(
                    page = page_number(image),
                    "tesseract failed on page: {}",
                    String::from_utf8_lossy(&output.stderr).trim()
                );
                continue;
            }
            pages.push(String::from_utf8_lossy(&output.stdout).into_owned());
        }
        Ok(pages)
    }
}

fn run(command: &mut Command, program: &str) -> Result<Output, ParseError> {
    command.output().map_err(|e| match e.kind() {
        io::ErrorKind::NotFound => {
            ParseError::ParserEngineMissing(format!("'{program}' is not installed or not on PATH"))
        }
        _ => ParseError::Io(e),
    })
}

/// pdftoppm names pages `page-1.png` or `page-01.png` depending on page count.
fn page_number(path: &Path) -> u32 {
    path.file_stem()
        .and_then(|s| s.to_str())
        .and_then(|s| s.rsplit('-').next())
        .and_then(|n| n.parse().ok())
        .unwrap_or(u32::MAX)
}
