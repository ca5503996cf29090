//! Workbook-level reader: shared strings, sheet directory, sheet matrices.

use crate::container::{Relationships, WorkbookArchive};
use crate::error::{Error, Result};
use quick_xml::events::Event;
use std::io::{Read, Seek};
use std::path::Path;

use super::shared_strings::SharedStrings;
use super::sheet::{read_matrix, CellMatrix};

const WORKBOOK_PART: &str = "xl/workbook.xml";
const SHARED_STRINGS_PART: &str = "xl/sharedStrings.xml";

/// One entry of the sheet directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SheetEntry {
    /// Display name, unique and case-sensitive.
    pub name: String,
    /// Archive path of the worksheet part.
    pub path: String,
}

/// Sheet display names mapped to their worksheet parts, in workbook order.
#[derive(Debug, Clone, Default)]
pub struct SheetDirectory {
    entries: Vec<SheetEntry>,
}

impl SheetDirectory {
    /// Look up a sheet part path by display name.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|e| e.name == name)
            .map(|e| e.path.as_str())
    }

    pub fn entries(&self) -> &[SheetEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn insert(&mut self, entry: SheetEntry) {
        match self.entries.iter_mut().find(|e| e.name == entry.name) {
            Some(existing) => *existing = entry,
            None => self.entries.push(entry),
        }
    }

    /// Build the directory from `xl/workbook.xml` and its relationships.
    ///
    /// Every sheet must resolve through `rels` to a part inside the archive;
    /// an unresolved id or an external target is fatal.
    pub fn parse(workbook_xml: &str, rels: &Relationships) -> Result<Self> {
        let mut directory = SheetDirectory::default();
        let mut reader = quick_xml::Reader::from_str(workbook_xml);
        reader.config_mut().trim_text(true);

        let mut buf = Vec::new();
        loop {
            match reader.read_event_into(&mut buf) {
                Ok(Event::Empty(ref e)) | Ok(Event::Start(ref e))
                    if e.local_name().as_ref() == b"sheet" =>
                {
                    let mut name = String::new();
                    let mut rel_id = String::new();

                    for attr in e.attributes() {
                        let attr = attr?;
                        match attr.key.local_name().as_ref() {
                            b"name" => name = attr.unescape_value()?.into_owned(),
                            b"id" => rel_id = attr.unescape_value()?.into_owned(),
                            _ => {}
                        }
                    }

                    let rel = rels.get(&rel_id).ok_or_else(|| {
                        Error::MissingComponent(format!(
                            "relationship {:?} for sheet {:?}",
                            rel_id, name
                        ))
                    })?;
                    if rel.external {
                        return Err(Error::InvalidData(format!(
                            "sheet {:?} points outside the archive: {}",
                            name, rel.target
                        )));
                    }
                    let path = WorkbookArchive::resolve_path(WORKBOOK_PART, &rel.target);
                    directory.insert(SheetEntry { name, path });
                }
                Ok(Event::Eof) => break,
                Err(e) => return Err(Error::XmlParse(e.to_string())),
                _ => {}
            }
            buf.clear();
        }

        Ok(directory)
    }
}

/// An opened XLSX workbook.
///
/// Construction eagerly loads the shared-string table and the sheet
/// directory; there is no partially opened state.
///
/// # Example
///
/// ```no_run
/// use fcisim::xlsx::Workbook;
///
/// let workbook = Workbook::open("FCI Abril 2025.xlsx")?;
/// for name in workbook.sheet_names() {
///     println!("{}", name);
/// }
/// let rows = workbook.read_sheet("FCI Ganancias")?;
/// # Ok::<(), fcisim::Error>(())
/// ```
#[derive(Debug)]
pub struct Workbook {
    archive: WorkbookArchive,
    shared_strings: SharedStrings,
    sheets: SheetDirectory,
}

impl Workbook {
    /// Open an XLSX file.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let archive = WorkbookArchive::open(path)?;
        Self::from_archive(archive)
    }

    /// Open a workbook held in memory, e.g. an uploaded file.
    pub fn from_bytes(data: Vec<u8>) -> Result<Self> {
        let archive = WorkbookArchive::from_bytes(data)?;
        Self::from_archive(archive)
    }

    /// Open a workbook from a reader.
    pub fn from_reader<R: Read + Seek>(reader: R) -> Result<Self> {
        let archive = WorkbookArchive::from_reader(reader)?;
        Self::from_archive(archive)
    }

    fn from_archive(archive: WorkbookArchive) -> Result<Self> {
        let shared_strings = SharedStrings::parse(&archive.read_xml(SHARED_STRINGS_PART)?)?;
        let rels = archive.read_relationships(WORKBOOK_PART)?;
        let sheets = SheetDirectory::parse(&archive.read_xml(WORKBOOK_PART)?, &rels)?;

        tracing::debug!(
            shared_strings = shared_strings.len(),
            sheets = sheets.len(),
            "workbook loaded"
        );

        Ok(Self {
            archive,
            shared_strings,
            sheets,
        })
    }

    /// Decode a sheet into rows of text cells.
    ///
    /// Fails with [`Error::SheetNotFound`] when `name` is not in the directory.
    pub fn read_sheet(&self, name: &str) -> Result<CellMatrix> {
        let path = self
            .sheets
            .get(name)
            .ok_or_else(|| Error::SheetNotFound(name.to_string()))?;
        let xml = self.archive.read_xml(path)?;
        let matrix = read_matrix(&xml, &self.shared_strings)?;
        tracing::debug!(sheet = name, rows = matrix.len(), "sheet decoded");
        Ok(matrix)
    }

    /// Whether the workbook declares a sheet with this exact name.
    pub fn has_sheet(&self, name: &str) -> bool {
        self.sheets.get(name).is_some()
    }

    /// Sheet names in workbook order.
    pub fn sheet_names(&self) -> Vec<&str> {
        self.sheets.entries().iter().map(|e| e.name.as_str()).collect()
    }

    pub fn sheets(&self) -> &SheetDirectory {
        &self.sheets
    }

    pub fn shared_strings(&self) -> &SharedStrings {
        &self.shared_strings
    }
}
