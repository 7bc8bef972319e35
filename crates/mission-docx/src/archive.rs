//! Package archive handling
//!
//! DOCX and DOTX files are ZIP archives of XML parts. [`PackageArchive`]
//! holds every part in memory so parts can be replaced before writing.

use std::collections::HashMap;
use std::fs::File;
use std::io::{Cursor, Read, Seek, Write};
use std::path::Path;

use zip::read::ZipArchive;
use zip::write::ZipWriter;
use zip::CompressionMethod;

use crate::error::{DocxError, Result};

/// Main document part
pub const DOCUMENT_PART: &str = "word/document.xml";
/// Relationships of the main document part
pub const DOCUMENT_RELS_PART: &str = "word/_rels/document.xml.rels";
/// Package content types
pub const CONTENT_TYPES_PART: &str = "[Content_Types].xml";

/// An unpacked OOXML package
#[derive(Debug, Default, Clone)]
pub struct PackageArchive {
    /// All parts, keyed by path
    files: HashMap<String, Vec<u8>>,
}

impl PackageArchive {
    /// Create an empty package
    pub fn new() -> Self {
        Self::default()
    }

    /// Open and unpack a DOCX/DOTX file
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = File::open(path)?;
        Self::from_reader(file)
    }

    /// Unpack from in-memory bytes
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        Self::from_reader(Cursor::new(bytes))
    }

    /// Create from any reader that implements Read + Seek
    pub fn from_reader<R: Read + Seek>(reader: R) -> Result<Self> {
        let mut archive = ZipArchive::new(reader)?;
        let mut files = HashMap::new();

        for i in 0..archive.len() {
            let mut file = archive.by_index(i)?;
            let name = file.name().to_string();

            // Skip directories
            if name.ends_with('/') {
                continue;
            }

            let mut contents = Vec::new();
            file.read_to_end(&mut contents)?;
            files.insert(name, contents);
        }

        Ok(Self { files })
    }

    /// Get a part's contents by path
    pub fn get(&self, path: &str) -> Option<&[u8]> {
        self.files.get(path).map(|v| v.as_slice())
    }

    /// Get a part's contents as a string
    pub fn get_string(&self, path: &str) -> Option<String> {
        self.files
            .get(path)
            .map(|bytes| String::from_utf8_lossy(bytes).into_owned())
    }

    /// Get the main document part
    pub fn document_xml(&self) -> Result<&[u8]> {
        self.get(DOCUMENT_PART)
            .ok_or_else(|| DocxError::MissingFile(DOCUMENT_PART.to_string()))
    }

    /// Check if a part exists
    pub fn contains(&self, path: &str) -> bool {
        self.files.contains_key(path)
    }

    /// All part paths, sorted
    pub fn file_list(&self) -> Vec<&str> {
        let mut paths: Vec<&str> = self.files.keys().map(|s| s.as_str()).collect();
        paths.sort_unstable();
        paths
    }

    /// Set or update a part
    pub fn set(&mut self, path: impl Into<String>, contents: Vec<u8>) {
        self.files.insert(path.into(), contents);
    }

    /// Set a part from a string
    pub fn set_string(&mut self, path: impl Into<String>, contents: impl Into<String>) {
        self.files.insert(path.into(), contents.into().into_bytes());
    }

    /// Remove a part
    pub fn remove(&mut self, path: &str) -> Option<Vec<u8>> {
        self.files.remove(path)
    }

    /// Write the package to a file
    pub fn write_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let file = File::create(path)?;
        self.write_to(file)
    }

    /// Write the package to an in-memory buffer
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        let mut output = Cursor::new(Vec::new());
        self.write_to(&mut output)?;
        Ok(output.into_inner())
    }

    /// Write the package to any writer
    pub fn write_to<W: Write + Seek>(&self, writer: W) -> Result<()> {
        let mut zip = ZipWriter::new(writer);
        let options = zip::write::SimpleFileOptions::default()
            .compression_method(CompressionMethod::Deflated);

        // Sort keys for deterministic output
        for path in self.file_list() {
            zip.start_file(path, options)?;
            zip.write_all(&self.files[path])?;
        }

        zip.finish()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_and_roundtrip() {
        let mut archive = PackageArchive::new();
        archive.set_string("b.xml", "<b/>");
        archive.set_string("a.xml", "<a/>");

        let bytes = archive.to_bytes().unwrap();
        let reread = PackageArchive::from_bytes(&bytes).unwrap();
        assert_eq!(reread.file_list(), vec!["a.xml", "b.xml"]);
        assert_eq!(reread.get_string("a.xml").as_deref(), Some("<a/>"));
    }

    #[test]
    fn test_missing_document() {
        let archive = PackageArchive::new();
        assert!(matches!(
            archive.document_xml(),
            Err(DocxError::MissingFile(_))
        ));
    }

    #[test]
    fn test_not_a_zip() {
        assert!(PackageArchive::from_bytes(b"plain text").is_err());
    }

    #[test]
    fn test_write_to_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.docx");
        let mut archive = PackageArchive::new();
        archive.set_string(DOCUMENT_PART, "<w:document/>");
        archive.write_to_file(&path).unwrap();

        let mut reopened = PackageArchive::open(&path).unwrap();
        assert!(reopened.contains(DOCUMENT_PART));
        assert!(reopened.remove("missing.xml").is_none());
        assert!(reopened.remove(DOCUMENT_PART).is_some());
    }
}
