//! Benchmarks for fcisim simulation performance.
//!
//! Run with: cargo bench
//!
//! These benchmarks cover full runs over synthetic workbooks and FIFO
//! matching on its own, at various ledger sizes.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use fcisim::{match_lots, Movement};
use std::io::Cursor;

const LEDGER_SHEET: &str = "SBSAhorroPesosClaseD";
const VALUATION_SHEET: &str = "FCI Ganancias";
const WITHHOLDING_SHEET: &str = "Rescates IIBB";

fn inline(reference: &str, text: &str) -> String {
    format!(
        r#"<c r="{}" t="inlineStr"><is><t>{}</t></is></c>"#,
        reference, text
    )
}

fn number(reference: &str, value: impl std::fmt::Display) -> String {
    format!(r#"<c r="{}"><v>{}</v></c>"#, reference, value)
}

fn worksheet(rows: &[String]) -> String {
    let mut content = String::from(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<worksheet xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main"><sheetData>"#,
    );
    for (i, cells) in rows.iter().enumerate() {
        content.push_str(&format!(r#"<row r="{}">{}</row>"#, i + 1, cells));
    }
    content.push_str("</sheetData></worksheet>");
    content
}

/// Every third movement redeems, the rest subscribe at a rising price.
fn ledger_rows(movement_count: usize) -> Vec<String> {
    let mut rows = vec![[
        inline("A1", "Fecha"),
        inline("B1", "Concepto"),
        inline("C1", "Cuotapartes"),
        inline("D1", "Valor Cuotaparte"),
    ]
    .concat()];

    for i in 0..movement_count {
        let r = i + 2;
        let (concept, units) = if i % 3 == 2 {
            ("RESCATE", "-150")
        } else {
            ("SUSCRIPCION", "100")
        };
        rows.push(
            [
                inline(&format!("A{}", r), "01/04/2025"),
                inline(&format!("B{}", r), concept),
                number(&format!("C{}", r), units),
                number(&format!("D{}", r), 10.0 + i as f64 * 0.01),
            ]
            .concat(),
        );
    }
    rows
}

fn table_rows(columns: &[&str], row_count: usize) -> Vec<String> {
    let letters = ["A", "B", "C", "D"];
    let mut rows = vec![columns
        .iter()
        .zip(letters)
        .map(|(name, col)| inline(&format!("{}1", col), name))
        .collect::<String>()];

    for i in 0..row_count {
        let r = i + 2;
        rows.push(
            letters[..columns.len()]
                .iter()
                .map(|col| inline(&format!("{}{}", col, r), "1.234,56"))
                .collect(),
        );
    }
    rows
}

/// Creates a synthetic XLSX workbook with the three default sheets.
fn create_test_xlsx(movement_count: usize) -> Vec<u8> {
    use std::io::Write;
    use zip::write::SimpleFileOptions;
    use zip::ZipWriter;

    let mut buffer = Vec::new();
    let mut zip = ZipWriter::new(Cursor::new(&mut buffer));

    let options = SimpleFileOptions::default().compression_method(zip::CompressionMethod::Stored);

    // [Content_Types].xml
    zip.start_file("[Content_Types].xml", options).unwrap();
    zip.write_all(
        br#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types">
  <Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/>
  <Default Extension="xml" ContentType="application/xml"/>
  <Override PartName="/xl/workbook.xml" ContentType="application/vnd.openxmlformats-officedocument.spreadsheetml.sheet.main+xml"/>
</Types>"#,
    )
    .unwrap();

    // xl/workbook.xml
    zip.start_file("xl/workbook.xml", options).unwrap();
    zip.write_all(
        format!(
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<workbook xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main" xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships">
  <sheets>
    <sheet name="{}" sheetId="1" r:id="rId1"/>
    <sheet name="{}" sheetId="2" r:id="rId2"/>
    <sheet name="{}" sheetId="3" r:id="rId3"/>
  </sheets>
</workbook>"#,
            LEDGER_SHEET, VALUATION_SHEET, WITHHOLDING_SHEET
        )
        .as_bytes(),
    )
    .unwrap();

    // xl/_rels/workbook.xml.rels
    zip.start_file("xl/_rels/workbook.xml.rels", options)
        .unwrap();
    zip.write_all(
        br#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">
  <Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/worksheet" Target="worksheets/sheet1.xml"/>
  <Relationship Id="rId2" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/worksheet" Target="worksheets/sheet2.xml"/>
  <Relationship Id="rId3" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/worksheet" Target="worksheets/sheet3.xml"/>
</Relationships>"#,
    )
    .unwrap();

    // xl/sharedStrings.xml
    zip.start_file("xl/sharedStrings.xml", options).unwrap();
    zip.write_all(
        br#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<sst xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main" count="0" uniqueCount="0"/>"#,
    )
    .unwrap();

    let sheets = [
        worksheet(&ledger_rows(movement_count)),
        worksheet(&table_rows(
            &["Fondo", "Valuación Impositiva", "Valuación Contable"],
            movement_count / 10,
        )),
        worksheet(&table_rows(&["Fecha", "Rdo Imp X VTA"], movement_count / 10)),
    ];
    for (i, content) in sheets.iter().enumerate() {
        zip.start_file(format!("xl/worksheets/sheet{}.xml", i + 1), options)
            .unwrap();
        zip.write_all(content.as_bytes()).unwrap();
    }

    zip.finish().unwrap();
    buffer
}

fn synthetic_movements(count: usize) -> Vec<Movement> {
    (0..count)
        .map(|i| Movement {
            date: "01/04/2025".to_string(),
            concept: if i % 3 == 2 { "RESCATE" } else { "SUSCRIPCION" }.to_string(),
            units: if i % 3 == 2 { -150.0 } else { 100.0 },
            unit_value: Some(10.0 + i as f64 * 0.01),
            amount: None,
        })
        .collect()
}

/// Benchmark a full run: archive, sheets, FIFO and table totals.
fn bench_simulate_bytes(c: &mut Criterion) {
    let mut group = c.benchmark_group("simulate_bytes");

    for movement_count in [10, 100, 1000, 5000].iter() {
        let data = create_test_xlsx(*movement_count);
        let size = data.len() as u64;

        group.throughput(Throughput::Bytes(size));
        group.bench_with_input(
            BenchmarkId::new("movements", movement_count),
            &data,
            |b, data| {
                b.iter(|| {
                    let _ = fcisim::simulate_bytes(black_box(data));
                });
            },
        );
    }

    group.finish();
}

/// Benchmark FIFO matching alone.
fn bench_fifo_matching(c: &mut Criterion) {
    let mut group = c.benchmark_group("fifo_matching");

    for movement_count in [100, 1000, 10000].iter() {
        let movements = synthetic_movements(*movement_count);

        group.throughput(Throughput::Elements(*movement_count as u64));
        group.bench_with_input(
            BenchmarkId::new("movements", movement_count),
            &movements,
            |b, movements| {
                b.iter(|| {
                    let _ = match_lots(black_box(movements));
                });
            },
        );
    }

    group.finish();
}

criterion_group!(benches, bench_simulate_bytes, bench_fifo_matching);
criterion_main!(benches);
