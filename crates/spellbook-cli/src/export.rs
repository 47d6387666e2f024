//! CSV and XLSX export of spell records.
//!
//! Both sinks share the `Name,Level,Class,Category` column layout. The
//! workbook is a minimal SpreadsheetML package with one `Spells` sheet.

use crate::error::Result;
use spellbook_domain::SpellRecord;
use std::fs::File;
use std::io::{self, BufWriter, Seek, Write};
use std::path::Path;
use tracing::info;
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

/// Column headers shared by every export format
pub const HEADER: [&str; 4] = ["Name", "Level", "Class", "Category"];

/// Name of the worksheet written to XLSX files
pub const SHEET_NAME: &str = "Spells";

const CSV_SEPARATOR: char = ',';

fn needs_quotes(field: &str) -> bool {
    field.contains(CSV_SEPARATOR) || field.contains('"') || field.contains('\n') || field.contains('\r')
}

fn write_csv_row<W: Write, S: AsRef<str>>(w: &mut W, row: &[S]) -> io::Result<()> {
    let mut first = true;
    for cell in row {
        if !first {
            write!(w, "{}", CSV_SEPARATOR)?;
        } else {
            first = false;
        }
        let cell = cell.as_ref();
        if needs_quotes(cell) {
            write!(w, "\"{}\"", cell.replace('"', "\"\""))?;
        } else {
            write!(w, "{}", cell)?;
        }
    }
    write!(w, "\r\n")
}

/// Write records as CSV, header first.
pub fn write_csv<W: Write>(mut w: W, records: &[SpellRecord]) -> io::Result<()> {
    write_csv_row(&mut w, &HEADER)?;
    for record in records {
        write_csv_row(
            &mut w,
            &[
                record.name().to_string(),
                record.level().to_string(),
                record.joined_classes(),
                record.category().to_string(),
            ],
        )?;
    }
    w.flush()
}

/// Save records to a CSV file at `path`.
pub fn save_csv(path: &Path, records: &[SpellRecord]) -> Result<()> {
    let file = File::create(path)?;
    write_csv(BufWriter::new(file), records)?;
    info!("Saved {} spells to CSV file at {}", records.len(), path.display());
    Ok(())
}

fn xml_escape(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&apos;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

fn string_cell(column: char, row: usize, value: &str) -> String {
    format!(
        r#"<c r="{}{}" t="inlineStr"><is><t xml:space="preserve">{}</t></is></c>"#,
        column,
        row,
        xml_escape(value)
    )
}

fn number_cell(column: char, row: usize, value: u32) -> String {
    format!(r#"<c r="{}{}"><v>{}</v></c>"#, column, row, value)
}

fn sheet_xml(records: &[SpellRecord]) -> String {
    let mut xml = String::from(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<worksheet xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main"><sheetData>"#,
    );

    xml.push_str(r#"<row r="1">"#);
    for (column, title) in ('A'..='D').zip(HEADER) {
        xml.push_str(&string_cell(column, 1, title));
    }
    xml.push_str("</row>");

    for (index, record) in records.iter().enumerate() {
        let row = index + 2;
        xml.push_str(&format!(r#"<row r="{}">"#, row));
        xml.push_str(&string_cell('A', row, record.name()));
        xml.push_str(&number_cell('B', row, record.level()));
        xml.push_str(&string_cell('C', row, &record.joined_classes()));
        xml.push_str(&string_cell('D', row, record.category()));
        xml.push_str("</row>");
    }

    xml.push_str("</sheetData></worksheet>");
    xml
}

const CONTENT_TYPES: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types"><Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/><Default Extension="xml" ContentType="application/xml"/><Override PartName="/xl/workbook.xml" ContentType="application/vnd.openxmlformats-officedocument.spreadsheetml.sheet.main+xml"/><Override PartName="/xl/worksheets/sheet1.xml" ContentType="application/vnd.openxmlformats-officedocument.spreadsheetml.worksheet+xml"/></Types>"#;

const ROOT_RELS: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships"><Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument" Target="xl/workbook.xml"/></Relationships>"#;

const WORKBOOK_RELS: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships"><Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/worksheet" Target="worksheets/sheet1.xml"/></Relationships>"#;

fn workbook_xml() -> String {
    format!(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<workbook xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main" xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships"><sheets><sheet name="{}" sheetId="1" r:id="rId1"/></sheets></workbook>"#,
        SHEET_NAME
    )
}

/// Write records as an XLSX workbook.
pub fn write_xlsx<W: Write + Seek>(w: W, records: &[SpellRecord]) -> Result<()> {
    let mut zip = ZipWriter::new(w);
    let options = SimpleFileOptions::default().compression_method(CompressionMethod::Stored);

    let parts = [
        ("[Content_Types].xml", CONTENT_TYPES.to_string()),
        ("_rels/.rels", ROOT_RELS.to_string()),
        ("xl/workbook.xml", workbook_xml()),
        ("xl/_rels/workbook.xml.rels", WORKBOOK_RELS.to_string()),
        ("xl/worksheets/sheet1.xml", sheet_xml(records)),
    ];
    for (name, body) in parts {
        zip.start_file(name, options)?;
        zip.write_all(body.as_bytes())?;
    }

    zip.finish()?.flush()?;
    Ok(())
}

/// Save records to an XLSX file at `path`.
pub fn save_xlsx(path: &Path, records: &[SpellRecord]) -> Result<()> {
    let file = File::create(path)?;
    write_xlsx(BufWriter::new(file), records)?;
    info!("Saved {} spells to Excel file at {}", records.len(), path.display());
    Ok(())
}
