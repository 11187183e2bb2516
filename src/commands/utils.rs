use anyhow::{Context, Result};
use clap::Args;
use std::io::Read;
use std::path::PathBuf;
use thiserror::Error;
use tracing::{debug, info};
use url::Url;

use selprobe::{
    Document, ElementHandle, FileStore, HistoryLog, KeyValueStore, SynthesisConfig,
};

/// The HTML source could not be read or fetched
#[derive(Debug, Error)]
pub enum SourceError {
    #[error("cannot read {path}: {reason}")]
    Read { path: String, reason: String },

    #[error("cannot fetch {url}: {reason}")]
    Fetch { url: String, reason: String },

    #[error("{url} returned HTTP {status}")]
    Status { url: String, status: u16 },
}

/// Pipeline tuning shared by the commands that synthesize selectors
#[derive(Args, Debug, Clone, Default)]
pub struct TuningArgs {
    /// Synthesis config file (default: ~/.selprobe/config.json when present)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Also return candidates that match the element among others
    #[arg(long)]
    pub include_ambiguous: bool,

    /// Levels searched upward for an anchor
    #[arg(long)]
    pub max_ancestor_depth: Option<usize>,

    /// Text shorter than this gets a :contains() hint
    #[arg(long)]
    pub max_text_length: Option<usize>,
}

impl TuningArgs {
    /// Config file first, then flag overrides
    pub fn resolve(&self) -> Result<SynthesisConfig> {
        let mut config = SynthesisConfig::resolve(self.config.as_deref())?;
        if self.include_ambiguous {
            config.include_ambiguous = true;
        }
        if let Some(depth) = self.max_ancestor_depth {
            config.max_ancestor_depth = depth;
        }
        if let Some(length) = self.max_text_length {
            config.max_text_length = length;
        }
        config.validate()?;
        Ok(config)
    }
}

/// Where a `<source>` argument points
#[derive(Debug, PartialEq, Eq)]
pub enum SourceKind {
    Stdin,
    Remote(Url),
    File(PathBuf),
}

impl SourceKind {
    pub fn classify(source: &str) -> Self {
        if source == "-" {
            return SourceKind::Stdin;
        }
        match Url::parse(source) {
            Ok(url) if matches!(url.scheme(), "http" | "https") => SourceKind::Remote(url),
            _ => SourceKind::File(PathBuf::from(source)),
        }
    }

    /// URL recorded with captures: the remote URL, or a `file://` URL for local files
    pub fn location(&self) -> Option<String> {
        match self {
            SourceKind::Stdin => None,
            SourceKind::Remote(url) => Some(url.to_string()),
            SourceKind::File(path) => {
                let absolute = std::fs::canonicalize(path).unwrap_or_else(|_| path.clone());
                Some(
                    Url::from_file_path(&absolute)
                        .map(|url| url.to_string())
                        .unwrap_or_else(|_| absolute.display().to_string()),
                )
            }
        }
    }
}

/// Read HTML from a file, stdin or an http(s) URL
pub async fn read_source(source: &str) -> Result<String> {
    match SourceKind::classify(source) {
        SourceKind::Stdin => {
            let mut html = String::new();
            std::io::stdin()
                .read_to_string(&mut html)
                .map_err(|e| SourceError::Read {
                    path: "stdin".to_string(),
                    reason: e.to_string(),
                })?;
            Ok(html)
        }
        SourceKind::Remote(url) => fetch(url).await,
        SourceKind::File(path) => std::fs::read_to_string(&path).map_err(|e| {
            SourceError::Read {
                path: path.display().to_string(),
                reason: e.to_string(),
            }
            .into()
        }),
    }
}

async fn fetch(url: Url) -> Result<String> {
    info!("Fetching {}", url);
    let client = reqwest::Client::new();
    let response = client
        .get(url.clone())
        .header("User-Agent", concat!("selprobe/", env!("CARGO_PKG_VERSION")))
        .send()
        .await
        .map_err(|e| SourceError::Fetch {
            url: url.to_string(),
            reason: e.to_string(),
        })?;

    if !response.status().is_success() {
        return Err(SourceError::Status {
            url: url.to_string(),
            status: response.status().as_u16(),
        }
        .into());
    }

    let html = response.text().await.map_err(|e| SourceError::Fetch {
        url: url.to_string(),
        reason: e.to_string(),
    })?;
    Ok(html)
}

/// Load the source and locate the target element in it
pub async fn load_target(
    source: &str,
    selector: &str,
    index: usize,
) -> Result<(Document, ElementHandle)> {
    let html = read_source(source).await?;
    let mut document = Document::parse(&html);
    if let Some(location) = SourceKind::classify(source).location() {
        document = document.with_url(location);
    }
    let target = document
        .locate(selector, index)
        .with_context(|| format!("Failed to locate target in {}", source))?;
    debug!("Located {}[{}] in {}", selector, index, source);
    Ok((document, target))
}

/// History log over `--store PATH` or the default store
pub fn open_history(store: Option<PathBuf>) -> Result<HistoryLog<Box<dyn KeyValueStore>>> {
    let store = match store {
        Some(path) => FileStore::new(path),
        None => FileStore::default_location()?,
    };
    debug!("Using history store {}", store.path().display());
    let store: Box<dyn KeyValueStore> = Box::new(store);
    Ok(HistoryLog::new(store))
}
