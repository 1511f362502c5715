use std::path::{Path, PathBuf};

use crate::config::IoOptions;
use crate::content::{self, ByteString};
use crate::params::ReadParams;
use crate::path::{self, ResourcePath};
use crate::{EmmetIoError, Result};

/// File access as the expansion engine sees it.
#[derive(Debug, Clone, Default)]
pub struct FileInterface {
    options: IoOptions,
}

impl FileInterface {
    pub fn new(options: IoOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &IoOptions {
        &self.options
    }

    pub fn read_binary(&self, path: &str) -> Result<ByteString> {
        content::read_binary(&ResourcePath::from(path), &self.options)
    }

    pub fn read_text(&self, path: &str) -> Result<String> {
        content::read_text(&ResourcePath::from(path), &self.options)
    }

    /// Read binary content and hand it to the request's completion.
    pub fn read(&self, params: ReadParams<'_, ByteString>) {
        let outcome = self
            .read_binary(&params.path)
            .map_err(|e| EmmetIoError::unreadable(params.path.as_str(), &e));
        params.complete(outcome);
    }

    /// Read text content and hand it to the request's completion.
    pub fn read_text_with(&self, params: ReadParams<'_, String>) {
        let outcome = self
            .read_text(&params.path)
            .map_err(|e| EmmetIoError::unreadable(params.path.as_str(), &e));
        params.complete(outcome);
    }

    /// See [`path::locate`].
    pub fn locate<P: AsRef<Path>>(
        &self,
        editor_file: P,
        name: &str,
    ) -> Option<ResourcePath> {
        path::locate(editor_file, name)
    }

    pub fn resolve_relative<P: AsRef<Path>>(
        &self,
        parent: P,
        name: &str,
    ) -> Option<PathBuf> {
        path::resolve_relative(parent, name)
    }

    /// Same as [`FileInterface::resolve_relative`], also reporting the
    /// result to `completion`.
    pub fn resolve_relative_with<P: AsRef<Path>>(
        &self,
        parent: P,
        name: &str,
        completion: impl FnOnce(Option<&Path>),
    ) -> Option<PathBuf> {
        let resolved = path::resolve_relative(parent, name);
        completion(resolved.as_deref());
        resolved
    }

    /// Save `content` (empty when absent) to a local file.
    pub fn write(&self, path: &str, content: Option<&[u8]>) -> Result<()> {
        match ResourcePath::from(path) {
            ResourcePath::Remote(url) => Err(EmmetIoError::RemoteWrite(url)),
            ResourcePath::Local(path) => {
                content::write(path, content.unwrap_or_default())
            }
        }
    }

    pub fn extension(&self, path: &str) -> String {
        path::extension(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use tempdir::TempDir;

    #[test]
    fn read_completion_gets_content() {
        let dir = TempDir::new("emmet_io_facade").unwrap();
        let path = dir.path().join("data.bin");
        let path = path.to_str().unwrap();
        let files = FileInterface::default();
        files.write(path, Some(&[0u8, 159, 255][..])).unwrap();

        let received = RefCell::new(None);
        files.read(
            ReadParams::new(path, |outcome: Result<ByteString>| {
                *received.borrow_mut() = Some(outcome.unwrap())
            })
            .with_size_hint(3),
        );
        assert_eq!(
            received.into_inner(),
            Some(ByteString::new(vec![0, 159, 255]))
        );
    }

    #[test]
    fn read_failure_message() {
        let dir = TempDir::new("emmet_io_facade_missing").unwrap();
        let path = dir.path().join("missing.txt");
        let files = FileInterface::default();

        let message = RefCell::new(String::new());
        files.read_text_with(ReadParams::new(
            path.to_str().unwrap(),
            |outcome: Result<String>| {
                *message.borrow_mut() = outcome.unwrap_err().to_string()
            },
        ));
        assert_eq!(message.into_inner(), "Unable to read file");
    }

    #[test]
    fn write_without_content() {
        let dir = TempDir::new("emmet_io_facade_empty").unwrap();
        let path = dir.path().join("sub").join("empty.txt");
        let files = FileInterface::default();

        files.write(path.to_str().unwrap(), None).unwrap();
        assert_eq!(files.read_text(path.to_str().unwrap()).unwrap(), "");
    }

    #[test]
    fn remote_write_is_rejected() {
        let files = FileInterface::default();
        let err = files
            .write("https://example.com/a.txt", Some(&b"x"[..]))
            .unwrap_err();
        assert!(matches!(err, EmmetIoError::RemoteWrite(_)));
    }

    #[test]
    fn resolve_reports_to_completion() {
        let dir = TempDir::new("emmet_io_facade_resolve").unwrap();
        let files = FileInterface::default();

        let reported = RefCell::new(None);
        let resolved = files.resolve_relative_with(dir.path(), "a.css", |p| {
            *reported.borrow_mut() = p.map(Path::to_path_buf)
        });
        assert!(resolved.is_some());
        assert_eq!(reported.into_inner(), resolved);

        let missing = dir.path().join("gone");
        let reported = RefCell::new(Some(PathBuf::new()));
        let resolved = files.resolve_relative_with(&missing, "a.css", |p| {
            *reported.borrow_mut() = p.map(Path::to_path_buf)
        });
        assert_eq!(resolved, None);
        assert_eq!(reported.into_inner(), None);
    }
}
