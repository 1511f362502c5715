use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Read, Write};
use std::ops::Deref;
use std::path::Path;

use reqwest::header::{HeaderMap, HeaderValue, USER_AGENT};
use url::Url;

use crate::config::IoOptions;
use crate::path::ResourcePath;
use crate::{EmmetIoError, Result};

const KILOBYTE: usize = 1024;
const BUFFER_CAPACITY: usize = 64 * KILOBYTE;

/// Raw resource content, one unit per byte.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct ByteString(Vec<u8>);

impl ByteString {
    pub fn new(bytes: Vec<u8>) -> Self {
        Self(bytes)
    }

    /// Build from a string whose characters each carry one byte in their
    /// code point. Higher code points keep only their low byte.
    pub fn from_units(units: &str) -> Self {
        Self(units.chars().map(|c| c as u32 as u8).collect())
    }

    /// Inverse of [`ByteString::from_units`]: every byte becomes the char
    /// with the same code point.
    pub fn to_units(&self) -> String {
        self.0.iter().map(|&b| char::from(b)).collect()
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.0
    }
}

impl Deref for ByteString {
    type Target = [u8];

    fn deref(&self) -> &[u8] {
        &self.0
    }
}

impl AsRef<[u8]> for ByteString {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl From<Vec<u8>> for ByteString {
    fn from(bytes: Vec<u8>) -> Self {
        Self(bytes)
    }
}

impl From<&[u8]> for ByteString {
    fn from(bytes: &[u8]) -> Self {
        Self(bytes.to_vec())
    }
}

/// Read the whole resource as bytes.
pub fn read_binary(
    path: &ResourcePath,
    options: &IoOptions,
) -> Result<ByteString> {
    let bytes = match path {
        ResourcePath::Remote(url) => fetch_remote_sync(url, &options.user_agent)?,
        ResourcePath::Local(path) => read_local(path)?,
    };
    log::debug!("{} bytes read from {}", bytes.len(), path);
    Ok(ByteString(bytes))
}

/// Read the whole resource as UTF-8 text.
pub fn read_text(path: &ResourcePath, options: &IoOptions) -> Result<String> {
    let bytes = read_binary(path, options)?;
    Ok(decode_text(&bytes, options.preserve_line_endings))
}

/// Write `content` to a local file, creating missing parent directories.
pub fn write<P: AsRef<Path>>(path: P, content: &[u8]) -> Result<()> {
    let path = path.as_ref();
    if let Some(parent) = path
        .parent()
        .filter(|parent| !parent.as_os_str().is_empty())
    {
        fs::create_dir_all(parent)?;
    }

    let file = File::create(path)?;
    let mut writer = BufWriter::new(file);
    writer.write_all(content)?;
    writer.flush()?;

    log::debug!("{} bytes written to {}", content.len(), path.display());
    Ok(())
}

fn read_local(path: &Path) -> Result<Vec<u8>> {
    let file = File::open(path)?;
    if !file.metadata()?.is_file() {
        return Err(EmmetIoError::Path(format!(
            "{} is not a regular file",
            path.display()
        )));
    }

    let mut reader = BufReader::with_capacity(BUFFER_CAPACITY, file);
    let mut bytes = Vec::new();
    reader.read_to_end(&mut bytes)?;
    Ok(bytes)
}

/// Lossy UTF-8 decoding. Dropping every CR and LF is the same as reading
/// line by line and concatenating the lines.
fn decode_text(bytes: &[u8], preserve_line_endings: bool) -> String {
    let text = String::from_utf8_lossy(bytes);
    if preserve_line_endings {
        text.into_owned()
    } else {
        text.chars()
            .filter(|c| *c != '\n' && *c != '\r')
            .collect()
    }
}

async fn fetch_remote(url: &str, user_agent: &str) -> Result<Vec<u8>> {
    let url = Url::parse(url)?;

    let mut header = HeaderMap::new();
    header.insert(
        USER_AGENT,
        HeaderValue::from_str(user_agent).map_err(anyhow::Error::from)?,
    );
    let client = reqwest::Client::builder()
        .default_headers(header)
        .build()?;

    let response = client
        .get(url)
        .send()
        .await?
        .error_for_status()?;
    Ok(response.bytes().await?.to_vec())
}

/// Synchronized version of [`fetch_remote`].
fn fetch_remote_sync(url: &str, user_agent: &str) -> Result<Vec<u8>> {
    let runtime = tokio::runtime::Runtime::new()?;
    runtime.block_on(fetch_remote(url, user_agent))
}
