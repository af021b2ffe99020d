//! ZIP package access for word-processing documents.

use crate::error::{Error, Result};
use crate::xml::{parse_xml, NamespaceMap, XmlElement};
use std::cell::RefCell;
use std::fs::File;
use std::io::{BufReader, Cursor, Read, Seek};
use std::path::{Component, Path};

/// Fix XML encoding declaration from UTF-16 to UTF-8.
///
/// After UTF-16 bytes are decoded to a Rust String, the declaration still
/// says encoding="UTF-16", which quick-xml would then try to honour.
fn fix_xml_encoding_declaration(content: &str) -> String {
    if content.starts_with("<?xml") {
        if let Some(end_decl) = content.find("?>") {
            let decl = &content[..end_decl + 2];
            let rest = &content[end_decl + 2..];

            let fixed_decl = decl
                .replace("encoding=\"UTF-16\"", "encoding=\"UTF-8\"")
                .replace("encoding='UTF-16'", "encoding='UTF-8'")
                .replace("encoding=\"utf-16\"", "encoding=\"UTF-8\"")
                .replace("encoding='utf-16'", "encoding='UTF-8'");

            return format!("{}{}", fixed_decl, rest);
        }
    }
    content.to_string()
}

/// Decode XML bytes handling different encodings (UTF-8, UTF-16 LE/BE).
///
/// Parts are normally UTF-8, but some producers write UTF-16 with a byte
/// order mark.
pub fn decode_xml_bytes(bytes: &[u8]) -> Result<String> {
    if let Some(rest) = bytes.strip_prefix(b"\xEF\xBB\xBF") {
        return String::from_utf8(rest.to_vec())
            .map_err(|e| Error::XmlParse(format!("invalid UTF-8: {}", e)));
    }

    if let Some(rest) = bytes.strip_prefix(b"\xFF\xFE") {
        let content = decode_utf16(rest, u16::from_le_bytes)?;
        return Ok(fix_xml_encoding_declaration(&content));
    }

    if let Some(rest) = bytes.strip_prefix(b"\xFE\xFF") {
        let content = decode_utf16(rest, u16::from_be_bytes)?;
        return Ok(fix_xml_encoding_declaration(&content));
    }

    // No BOM: try UTF-8 first, then look for UTF-16 by its null bytes
    match String::from_utf8(bytes.to_vec()) {
        Ok(s) => Ok(s),
        Err(e) => {
            if bytes.len() >= 4 && bytes[1] == 0 && bytes[3] == 0 {
                decode_utf16(bytes, u16::from_le_bytes)
            } else if bytes.len() >= 4 && bytes[0] == 0 && bytes[2] == 0 {
                decode_utf16(bytes, u16::from_be_bytes)
            } else {
                Err(Error::XmlParse(format!("invalid UTF-8: {}", e)))
            }
        }
    }
}

fn decode_utf16(bytes: &[u8], unit: fn([u8; 2]) -> u16) -> Result<String> {
    let units = bytes.chunks_exact(2).map(|pair| unit([pair[0], pair[1]]));
    char::decode_utf16(units)
        .collect::<std::result::Result<String, _>>()
        .map_err(|e| Error::XmlParse(format!("invalid UTF-16: {}", e)))
}

/// A word-processing package: a ZIP archive of parts.
///
/// The archive is opened once and read through a shared reference; reads of
/// individual entries borrow it mutably for their duration only.
pub struct Package {
    archive: RefCell<zip::ZipArchive<Cursor<Vec<u8>>>>,
}

impl Package {
    /// Open a package from a file path.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use docxtree::package::Package;
    ///
    /// let package = Package::open("document.docx")?;
    /// # Ok::<(), docxtree::Error>(())
    /// ```
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let file = File::open(path.as_ref())?;
        Self::from_reader(BufReader::new(file))
    }

    /// Create a package from a byte vector.
    pub fn from_bytes(data: Vec<u8>) -> Result<Self> {
        let archive = zip::ZipArchive::new(Cursor::new(data))?;
        Ok(Self {
            archive: RefCell::new(archive),
        })
    }

    /// Create a package from a reader.
    pub fn from_reader<R: Read + Seek>(mut reader: R) -> Result<Self> {
        let mut data = Vec::new();
        reader.read_to_end(&mut data)?;
        Self::from_bytes(data)
    }

    /// Read the raw bytes of an entry.
    ///
    /// A missing entry is reported as [`Error::EntryNotFound`], distinct from
    /// archive corruption.
    pub fn open_entry(&self, path: &str) -> Result<Vec<u8>> {
        let mut archive = self.archive.borrow_mut();
        let mut file = match archive.by_name(path) {
            Ok(file) => file,
            Err(zip::result::ZipError::FileNotFound) => {
                return Err(Error::EntryNotFound(path.to_string()))
            }
            Err(e) => return Err(e.into()),
        };
        let mut data = Vec::new();
        file.read_to_end(&mut data)?;
        Ok(data)
    }

    /// Read and parse an XML entry.
    pub fn read_xml(&self, path: &str, namespaces: &NamespaceMap) -> Result<XmlElement> {
        let bytes = self.open_entry(path)?;
        log::debug!("parsing part {} ({} bytes)", path, bytes.len());
        parse_xml(&bytes, namespaces)
    }

    /// Read and parse an XML entry that may be absent.
    pub fn try_read_xml(&self, path: &str, namespaces: &NamespaceMap) -> Result<Option<XmlElement>> {
        match self.read_xml(path, namespaces) {
            Ok(element) => Ok(Some(element)),
            Err(Error::EntryNotFound(_)) => Ok(None),
            Err(e) => Err(e),
        }
    }

    /// Check if an entry exists in the archive.
    pub fn exists(&self, path: &str) -> bool {
        let archive = self.archive.borrow();
        let result = archive.file_names().any(|n| n == path);
        result
    }

    /// List all entries in the archive.
    pub fn list_entries(&self) -> Vec<String> {
        let archive = self.archive.borrow();
        archive.file_names().map(String::from).collect()
    }

    /// Path of the relationships file belonging to a part.
    ///
    /// The package itself (empty path) uses `_rels/.rels`.
    pub fn relationships_path_for(part_path: &str) -> String {
        let part_path = part_path.trim_start_matches('/');
        if part_path.is_empty() {
            return "_rels/.rels".to_string();
        }
        match part_path.rsplit_once('/') {
            Some((dir, file)) => format!("{}/_rels/{}.rels", dir, file),
            None => format!("_rels/{}.rels", part_path),
        }
    }

    /// Resolve a relationship target against the part it was declared by.
    ///
    /// Targets starting with `/` are package-absolute; others are relative to
    /// the directory of `base`. The result never has a leading separator.
    pub fn resolve_path(base: &str, relative: &str) -> String {
        if let Some(stripped) = relative.strip_prefix('/') {
            return stripped.trim_start_matches('/').to_string();
        }

        let base_path = Path::new(base);
        let base_dir = base_path.parent().unwrap_or(Path::new(""));

        let mut result = base_dir.to_path_buf();
        for component in Path::new(relative).components() {
            match component {
                Component::ParentDir => {
                    result.pop();
                }
                Component::Normal(c) => {
                    result.push(c);
                }
                _ => {}
            }
        }

        result.to_string_lossy().replace('\\', "/")
    }
}

impl std::fmt::Debug for Package {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Package")
            .field("entries", &self.list_entries().len())
            .finish()
    }
}
