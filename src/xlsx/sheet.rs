//! Worksheet decoding.
//!
//! Worksheet XML is first decoded into [`SheetRow`]s of [`RawCell`]s, a typed
//! view that still mirrors the file. Resolution against the shared-string
//! table then produces the dense text rows the fund logic consumes.

use crate::error::{Error, Result};
use quick_xml::events::{BytesStart, Event};

use super::cell_ref::{column_index, MAX_COLUMN_INDEX};
use super::shared_strings::SharedStrings;

/// Dense text rows of one worksheet, in document order.
pub type CellMatrix = Vec<Vec<String>>;

/// The `t` attribute of a worksheet cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CellKind {
    /// `t="s"`: the value is an index into the shared-string table.
    SharedString,
    /// `t="inlineStr"`: the text lives in an `<is>` child.
    InlineString,
    /// `t="str"`: cached string result of a formula.
    FormulaString,
    /// `t="b"`
    Boolean,
    /// `t="e"`
    Error,
    /// `t="n"` or no type marker.
    #[default]
    Number,
}

impl CellKind {
    fn from_marker(marker: &[u8]) -> Self {
        match marker {
            b"s" => CellKind::SharedString,
            b"inlineStr" => CellKind::InlineString,
            b"str" => CellKind::FormulaString,
            b"b" => CellKind::Boolean,
            b"e" => CellKind::Error,
            _ => CellKind::Number,
        }
    }
}

/// One `<c>` element as written in the worksheet.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawCell {
    /// The `r` attribute, e.g. `"C7"`. Empty when absent.
    pub reference: String,
    pub kind: CellKind,
    /// Text of the `<v>` node, or of `<is><t>` for inline strings.
    /// `None` when the cell carries no value at all.
    pub value: Option<String>,
}

/// One `<row>` element.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SheetRow {
    pub cells: Vec<RawCell>,
}

impl SheetRow {
    /// Materialize the row as dense text, padding skipped columns with `""`.
    ///
    /// Column positions come only from each cell's reference. A cell whose
    /// reference points left of the current width is appended as-is.
    /// A reference beyond column `XFD` is rejected.
    pub fn resolve(&self, shared_strings: &SharedStrings) -> Result<Vec<String>> {
        let mut out: Vec<String> = Vec::with_capacity(self.cells.len());
        for cell in &self.cells {
            let idx = column_index(&cell.reference);
            if idx > MAX_COLUMN_INDEX {
                return Err(Error::InvalidData(format!(
                    "cell reference {:?} out of range",
                    cell.reference
                )));
            }
            if out.len() < idx {
                out.resize(idx, String::new());
            }
            out.push(resolve_value(cell, shared_strings)?);
        }
        Ok(out)
    }
}

fn resolve_value(cell: &RawCell, shared_strings: &SharedStrings) -> Result<String> {
    let Some(raw) = cell.value.as_deref() else {
        return Ok(String::new());
    };

    match cell.kind {
        CellKind::SharedString => {
            let idx: usize = raw.trim().parse().map_err(|_| {
                Error::InvalidData(format!(
                    "cell {} has non-numeric shared string index {:?}",
                    cell.reference, raw
                ))
            })?;
            shared_strings
                .get(idx)
                .map(str::to_string)
                .ok_or_else(|| {
                    Error::InvalidData(format!(
                        "cell {} references shared string {} of {}",
                        cell.reference,
                        idx,
                        shared_strings.len()
                    ))
                })
        }
        _ => Ok(raw.to_string()),
    }
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum Capture {
    Off,
    Value,
    InlineText,
}

/// Decode worksheet XML into typed rows.
///
/// Every `<row>` yields one [`SheetRow`], including rows without cells.
pub fn decode_sheet(xml: &str) -> Result<Vec<SheetRow>> {
    let mut rows = Vec::new();
    let mut reader = quick_xml::Reader::from_str(xml);

    let mut buf = Vec::new();
    let mut current_row: Option<SheetRow> = None;
    let mut current_cell: Option<RawCell> = None;
    let mut inline_text: Option<String> = None;
    let mut capture = Capture::Off;

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(ref e)) => match e.local_name().as_ref() {
                b"row" => current_row = Some(SheetRow::default()),
                b"c" if current_row.is_some() => {
                    current_cell = Some(raw_cell_from_element(e)?);
                    inline_text = None;
                }
                b"v" => {
                    if let Some(cell) = current_cell.as_mut() {
                        cell.value.get_or_insert_with(String::new);
                        capture = Capture::Value;
                    }
                }
                b"t" if current_cell.is_some() => {
                    inline_text.get_or_insert_with(String::new);
                    capture = Capture::InlineText;
                }
                _ => {}
            },
            Ok(Event::Empty(ref e)) => match e.local_name().as_ref() {
                b"row" => rows.push(SheetRow::default()),
                b"c" => {
                    if let Some(row) = current_row.as_mut() {
                        row.cells.push(raw_cell_from_element(e)?);
                    }
                }
                b"v" => {
                    if let Some(cell) = current_cell.as_mut() {
                        cell.value.get_or_insert_with(String::new);
                    }
                }
                _ => {}
            },
            Ok(Event::Text(ref e)) if capture != Capture::Off => {
                let text = e.unescape()?;
                push_captured(capture, &text, &mut current_cell, &mut inline_text);
            }
            Ok(Event::CData(ref e)) if capture != Capture::Off => {
                let text = String::from_utf8_lossy(e);
                push_captured(capture, &text, &mut current_cell, &mut inline_text);
            }
            Ok(Event::End(ref e)) => match e.local_name().as_ref() {
                b"row" => {
                    if let Some(row) = current_row.take() {
                        rows.push(row);
                    }
                }
                b"c" => {
                    if let Some(mut cell) = current_cell.take() {
                        if cell.value.is_none() && cell.kind == CellKind::InlineString {
                            cell.value = inline_text.take();
                        }
                        if let Some(row) = current_row.as_mut() {
                            row.cells.push(cell);
                        }
                    }
                }
                b"v" | b"t" => capture = Capture::Off,
                _ => {}
            },
            Ok(Event::Eof) => break,
            Err(e) => return Err(Error::XmlParse(e.to_string())),
            _ => {}
        }
        buf.clear();
    }

    Ok(rows)
}

fn push_captured(
    capture: Capture,
    text: &str,
    cell: &mut Option<RawCell>,
    inline_text: &mut Option<String>,
) {
    match capture {
        Capture::Value => {
            if let Some(value) = cell.as_mut().and_then(|c| c.value.as_mut()) {
                value.push_str(text);
            }
        }
        Capture::InlineText => {
            if let Some(buf) = inline_text.as_mut() {
                buf.push_str(text);
            }
        }
        Capture::Off => {}
    }
}

fn raw_cell_from_element(e: &BytesStart<'_>) -> Result<RawCell> {
    let mut cell = RawCell::default();
    for attr in e.attributes() {
        let attr = attr?;
        match attr.key.as_ref() {
            b"r" => cell.reference = attr.unescape_value()?.into_owned(),
            b"t" => cell.kind = CellKind::from_marker(&attr.value),
            _ => {}
        }
    }
    Ok(cell)
}

/// Decode and resolve a worksheet in one step.
pub fn read_matrix(xml: &str, shared_strings: &SharedStrings) -> Result<CellMatrix> {
    decode_sheet(xml)?
        .iter()
        .map(|row| row.resolve(shared_strings))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn shared(items: &[&str]) -> SharedStrings {
        let body: String = items.iter().map(|s| format!("<si><t>{}</t></si>", s)).collect();
        SharedStrings::parse(&format!("<sst>{}</sst>", body)).unwrap()
    }

    fn wrap(sheet_data: &str) -> String {
        format!(
            r#"<?xml version="1.0" encoding="UTF-8"?><worksheet xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main"><sheetData>{}</sheetData></worksheet>"#,
            sheet_data
        )
    }

    #[test]
    fn test_decode_typed_rows() {
        let xml = wrap(
            r#"<row r="1"><c r="A1" t="s"><v>0</v></c><c r="C1"><v>12,5</v></c></row>
               <row r="2"/>
               <row r="3"><c r="B3" s="1"/></row>"#,
        );
        let rows = decode_sheet(&xml).unwrap();
        assert_eq!(rows.len(), 3);
        assert_eq!(
            rows[0].cells[0],
            RawCell {
                reference: "A1".to_string(),
                kind: CellKind::SharedString,
                value: Some("0".to_string()),
            }
        );
        assert_eq!(rows[0].cells[1].kind, CellKind::Number);
        assert!(rows[1].cells.is_empty());
        assert_eq!(rows[2].cells[0].value, None);
    }

    #[test]
    fn test_matrix_padding_follows_references() {
        let xml = wrap(
            r#"<row r="1"><c r="B1" t="s"><v>1</v></c><c r="D1"><v>7</v></c></row>
               <row r="2"></row>
               <row r="3"><c r="A3" t="s"><v>0</v></c></row>"#,
        );
        let matrix = read_matrix(&xml, &shared(&["Fecha", "Concepto"])).unwrap();
        assert_eq!(
            matrix,
            vec![
                vec!["".to_string(), "Concepto".to_string(), "".to_string(), "7".to_string()],
                Vec::<String>::new(),
                vec!["Fecha".to_string()],
            ]
        );
    }

    #[test]
    fn test_cell_without_value_is_empty_string() {
        let xml = wrap(r#"<row r="1"><c r="A1"/><c r="B1"><f>SUM(A1)</f></c><c r="C1"><v/></c></row>"#);
        let matrix = read_matrix(&xml, &SharedStrings::default()).unwrap();
        assert_eq!(matrix, vec![vec!["", "", ""]]);
    }

    #[test]
    fn test_inline_and_formula_strings() {
        let xml = wrap(
            r#"<row r="1"><c r="A1" t="inlineStr"><is><t>RESCATE</t></is></c><c r="B1" t="str"><f>A1</f><v>RESCATE</v></c><c r="C1" t="b"><v>1</v></c></row>"#,
        );
        let matrix = read_matrix(&xml, &SharedStrings::default()).unwrap();
        assert_eq!(matrix, vec![vec!["RESCATE", "RESCATE", "1"]]);
    }

    #[test]
    fn test_prefixed_elements() {
        let xml = r#"<x:worksheet xmlns:x="http://schemas.openxmlformats.org/spreadsheetml/2006/main"><x:sheetData><x:row r="1"><x:c r="B1"><x:v>3</x:v></x:c></x:row></x:sheetData></x:worksheet>"#;
        let matrix = read_matrix(xml, &SharedStrings::default()).unwrap();
        assert_eq!(matrix, vec![vec!["", "3"]]);
    }

    #[test]
    fn test_text_is_not_trimmed() {
        let xml = wrap(r#"<row r="1"><c r="A1" t="inlineStr"><is><t xml:space="preserve"> Total </t></is></c></row>"#);
        let matrix = read_matrix(&xml, &SharedStrings::default()).unwrap();
        assert_eq!(matrix[0][0], " Total ");
    }

    #[test]
    fn test_column_beyond_last_is_rejected() {
        let xml = wrap(r#"<row r="1"><c r="AAAAAAAAAAAAAA1"><v>1</v></c></row>"#);
        let err = read_matrix(&xml, &SharedStrings::default()).unwrap_err();
        assert!(matches!(err, Error::InvalidData(ref msg) if msg.contains("AAAAAAAAAAAAAA1")));

        let xml = wrap(r#"<row r="1"><c r="XFE1"><v>1</v></c></row>"#);
        assert!(read_matrix(&xml, &SharedStrings::default()).is_err());
    }

    #[test]
    fn test_last_column_is_accepted() {
        let xml = wrap(r#"<row r="1"><c r="XFD1"><v>1</v></c></row>"#);
        let matrix = read_matrix(&xml, &SharedStrings::default()).unwrap();
        assert_eq!(matrix[0].len(), MAX_COLUMN_INDEX + 1);
        assert_eq!(matrix[0][MAX_COLUMN_INDEX], "1");
    }

    #[test]
    fn test_shared_string_index_out_of_range() {
        let xml = wrap(r#"<row r="1"><c r="A1" t="s"><v>4</v></c></row>"#);
        let err = read_matrix(&xml, &shared(&["only"])).unwrap_err();
        assert!(matches!(err, Error::InvalidData(_)));
    }
}
