//! Subcommands and their arguments.

use std::path::PathBuf;

use anyhow::{Context, Result as AnyhowResult};
use clap::{Args, Subcommand};
use docstash_object::prelude::ListPage;
use docstash_textract::TextractConfig;
use serde::{Deserialize, Serialize};

/// Key of the object the demo writes.
const DEMO_KEY: &str = "test_key.txt";
/// Body of the object the demo writes.
const DEMO_BODY: &str = "Hello, this is a test object.";
/// Content type of the object the demo writes.
const DEMO_CONTENT_TYPE: &str = "text/plain";

/// What `docstash` should do.
#[derive(Debug, Clone, Subcommand, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Command {
    /// Put a test object, read it back, then offer to empty the bucket.
    Demo(DemoArgs),
    /// Upload a document, detect its text and print it.
    Ocr(OcrArgs),
    /// Print the bucket listing page by page.
    List(PageArgs),
    /// Delete every object in the bucket, page by page.
    Clear(ClearArgs),
}

impl Command {
    /// Subcommand name as typed on the command line.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Demo(_) => "demo",
            Self::Ocr(_) => "ocr",
            Self::List(_) => "list",
            Self::Clear(_) => "clear",
        }
    }
}

impl Default for Command {
    fn default() -> Self {
        Self::Demo(DemoArgs::default())
    }
}

/// Which part of the bucket to walk and how many objects per page.
#[derive(Debug, Clone, Args, Serialize, Deserialize)]
pub struct PageArgs {
    /// Only visit keys starting with this prefix.
    #[arg(long, default_value = "")]
    #[serde(default)]
    pub prefix: String,

    /// Objects per listing page, clamped to 1..=1000.
    #[arg(long, default_value_t = ListPage::MAX_SIZE)]
    pub page_size: usize,
}

impl Default for PageArgs {
    fn default() -> Self {
        Self {
            prefix: String::new(),
            page_size: ListPage::MAX_SIZE,
        }
    }
}

/// Arguments of the `demo` command.
#[derive(Debug, Clone, Args, Serialize, Deserialize)]
pub struct DemoArgs {
    /// Key of the test object.
    #[arg(long, default_value = DEMO_KEY)]
    pub key: String,

    /// Body of the test object.
    #[arg(long, default_value = DEMO_BODY)]
    pub body: String,

    /// Content type of the test object.
    #[arg(long, default_value = DEMO_CONTENT_TYPE)]
    pub content_type: String,

    /// Delete without asking.
    #[arg(short, long)]
    #[serde(default)]
    pub yes: bool,

    #[clap(flatten)]
    pub page: PageArgs,
}

impl Default for DemoArgs {
    fn default() -> Self {
        Self {
            key: DEMO_KEY.to_owned(),
            body: DEMO_BODY.to_owned(),
            content_type: DEMO_CONTENT_TYPE.to_owned(),
            yes: false,
            page: PageArgs::default(),
        }
    }
}

/// Arguments of the `ocr` command.
#[derive(Debug, Clone, Args, Serialize, Deserialize)]
pub struct OcrArgs {
    /// Local document to upload and analyze.
    pub file: PathBuf,

    /// Object key for the upload. Defaults to the file name.
    #[arg(long)]
    pub key: Option<String>,

    /// Content type for the upload. Defaults to `application/pdf`.
    #[arg(long)]
    pub content_type: Option<String>,

    #[clap(flatten)]
    pub textract: TextractConfig,
}

impl OcrArgs {
    /// Object key the document is stored under.
    pub fn object_key(&self) -> AnyhowResult<String> {
        if let Some(key) = &self.key {
            return Ok(key.clone());
        }

        self.file
            .file_name()
            .and_then(|name| name.to_str())
            .map(str::to_owned)
            .with_context(|| format!("cannot derive an object key from {}", self.file.display()))
    }

    /// Content type the document is stored with.
    pub fn content_type(&self) -> String {
        self.content_type
            .clone()
            .unwrap_or_else(|| mime::APPLICATION_PDF.to_string())
    }
}

/// Arguments of the `clear` command.
#[derive(Debug, Clone, Args, Serialize, Deserialize)]
pub struct ClearArgs {
    /// Delete without asking.
    #[arg(short, long)]
    #[serde(default)]
    pub yes: bool,

    #[clap(flatten)]
    pub page: PageArgs,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ocr(file: &str) -> OcrArgs {
        OcrArgs {
            file: PathBuf::from(file),
            key: None,
            content_type: None,
            textract: TextractConfig::default(),
        }
    }

    #[test]
    fn object_key_defaults_to_file_name() {
        assert_eq!(ocr("scans/2024/invoice.pdf").object_key().unwrap(), "invoice.pdf");

        let mut explicit = ocr("scans/invoice.pdf");
        explicit.key = Some("inbox/invoice.pdf".to_owned());
        assert_eq!(explicit.object_key().unwrap(), "inbox/invoice.pdf");
    }

    #[test]
    fn object_key_needs_a_file_name() {
        assert!(ocr("..").object_key().is_err());
    }

    #[test]
    fn content_type_defaults_to_pdf() {
        assert_eq!(ocr("a.pdf").content_type(), "application/pdf");

        let mut png = ocr("a.png");
        png.content_type = Some("image/png".to_owned());
        assert_eq!(png.content_type(), "image/png");
    }

    #[test]
    fn command_names() {
        assert_eq!(Command::default().name(), "demo");
        assert_eq!(Command::List(PageArgs::default()).name(), "list");
    }
}
