//! In-memory XLSX builder for unit tests.

use crate::xlsx::column_letters;
use std::io::{Cursor, Write};
use zip::write::SimpleFileOptions;
use zip::ZipWriter;

const SPREADSHEET_NS: &str = "http://schemas.openxmlformats.org/spreadsheetml/2006/main";
const REL_NS: &str = "http://schemas.openxmlformats.org/officeDocument/2006/relationships";

/// Builds a minimal but well-formed workbook.
///
/// Text cells go through the shared-string table, numeric-looking cells are
/// written inline, empty cells are left out of the sheet XML.
#[derive(Default)]
pub(crate) struct WorkbookFixture {
    sheets: Vec<(String, String)>,
    strings: Vec<String>,
    skip_parts: Vec<String>,
    replaced_parts: Vec<(String, String)>,
}

impl WorkbookFixture {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn sheet(mut self, name: &str, rows: &[&[&str]]) -> Self {
        let mut xml = String::new();
        for (r, row) in rows.iter().enumerate() {
            let row_no = r + 1;
            if row.iter().all(|c| c.is_empty()) {
                xml.push_str(&format!(r#"<row r="{}"/>"#, row_no));
                continue;
            }
            xml.push_str(&format!(r#"<row r="{}">"#, row_no));
            for (c, value) in row.iter().enumerate() {
                if value.is_empty() {
                    continue;
                }
                let reference = format!("{}{}", column_letters(c), row_no);
                if value.parse::<f64>().is_ok() {
                    xml.push_str(&format!(r#"<c r="{}"><v>{}</v></c>"#, reference, value));
                } else {
                    let idx = self.intern(value);
                    xml.push_str(&format!(r#"<c r="{}" t="s"><v>{}</v></c>"#, reference, idx));
                }
            }
            xml.push_str("</row>");
        }
        self.raw_sheet(name, &xml)
    }

    /// Add a sheet whose `<sheetData>` content is given verbatim.
    pub(crate) fn raw_sheet(mut self, name: &str, sheet_data: &str) -> Self {
        self.sheets.push((name.to_string(), sheet_data.to_string()));
        self
    }

    pub(crate) fn shared_string(mut self, text: &str) -> Self {
        self.intern(text);
        self
    }

    pub(crate) fn without_part(mut self, path: &str) -> Self {
        self.skip_parts.push(path.to_string());
        self
    }

    /// Write `content` verbatim in place of the generated part at `path`.
    pub(crate) fn replace_part(mut self, path: &str, content: &str) -> Self {
        self.replaced_parts
            .push((path.to_string(), content.to_string()));
        self
    }

    fn intern(&mut self, text: &str) -> usize {
        match self.strings.iter().position(|s| s == text) {
            Some(idx) => idx,
            None => {
                self.strings.push(text.to_string());
                self.strings.len() - 1
            }
        }
    }

    pub(crate) fn build(self) -> Vec<u8> {
        let mut parts: Vec<(String, String)> = Vec::new();

        let mut sheets_xml = String::new();
        let mut rels_xml = String::new();
        for (i, (name, data)) in self.sheets.iter().enumerate() {
            let n = i + 1;
            sheets_xml.push_str(&format!(
                r#"<sheet name="{}" sheetId="{}" r:id="rId{}"/>"#,
                escape(name),
                n,
                n
            ));
            rels_xml.push_str(&format!(
                r#"<Relationship Id="rId{}" Type="{}/worksheet" Target="worksheets/sheet{}.xml"/>"#,
                n, REL_NS, n
            ));
            parts.push((
                format!("xl/worksheets/sheet{}.xml", n),
                format!(
                    r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?><worksheet xmlns="{}"><sheetData>{}</sheetData></worksheet>"#,
                    SPREADSHEET_NS, data
                ),
            ));
        }

        parts.push((
            "xl/workbook.xml".to_string(),
            format!(
                r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?><workbook xmlns="{}" xmlns:r="{}"><sheets>{}</sheets></workbook>"#,
                SPREADSHEET_NS, REL_NS, sheets_xml
            ),
        ));
        parts.push((
            "xl/_rels/workbook.xml.rels".to_string(),
            format!(
                r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?><Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">{}</Relationships>"#,
                rels_xml
            ),
        ));

        let sst: String = self
            .strings
            .iter()
            .map(|s| format!("<si><t>{}</t></si>", escape(s)))
            .collect();
        parts.push((
            "xl/sharedStrings.xml".to_string(),
            format!(
                r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?><sst xmlns="{}" count="{}" uniqueCount="{}">{}</sst>"#,
                SPREADSHEET_NS,
                self.strings.len(),
                self.strings.len(),
                sst
            ),
        ));
        parts.push((
            "[Content_Types].xml".to_string(),
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?><Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types"><Override PartName="/xl/workbook.xml" ContentType="application/vnd.openxmlformats-officedocument.spreadsheetml.sheet.main+xml"/></Types>"#
                .to_string(),
        ));

        let mut zip = ZipWriter::new(Cursor::new(Vec::new()));
        let options =
            SimpleFileOptions::default().compression_method(zip::CompressionMethod::Stored);
        for (path, mut content) in parts {
            if self.skip_parts.contains(&path) {
                continue;
            }
            if let Some((_, replacement)) = self.replaced_parts.iter().find(|(p, _)| *p == path) {
                content = replacement.clone();
            }
            zip.start_file(path, options).unwrap();
            zip.write_all(content.as_bytes()).unwrap();
        }
        zip.finish().unwrap().into_inner()
    }
}

fn escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}
