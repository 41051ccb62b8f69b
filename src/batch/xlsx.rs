//! Formatted XLSX rendering of the batch report.
//!
//! A single worksheet with a dark bold header row, light grey data rows,
//! thin borders on every cell and column widths sized to the content
//! (capped at [`MAX_COLUMN_WIDTH`]).

use std::fmt::{self, Write as FmtWrite};
use std::fs::File;
use std::io::{self, BufWriter, Seek, Write};
use std::path::Path;

use zip::CompressionMethod;
use zip::write::{SimpleFileOptions, ZipWriter};

use super::report::{CSV_HEADER, ReportRow};
use crate::common::error::Result;

/// Widest a column is allowed to grow, in characters.
pub const MAX_COLUMN_WIDTH: usize = 60;

const SHEET_NAME: &str = "Report";

/// Style indices into `cellXfs` of the generated styles part.
const STYLE_HEADER: usize = 1;
const STYLE_ROW: usize = 2;

const CONTENT_TYPES_XML: &str = concat!(
    r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#,
    r#"<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types">"#,
    r#"<Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/>"#,
    r#"<Default Extension="xml" ContentType="application/xml"/>"#,
    r#"<Override PartName="/xl/workbook.xml" ContentType="application/vnd.openxmlformats-officedocument.spreadsheetml.sheet.main+xml"/>"#,
    r#"<Override PartName="/xl/worksheets/sheet1.xml" ContentType="application/vnd.openxmlformats-officedocument.spreadsheetml.worksheet+xml"/>"#,
    r#"<Override PartName="/xl/styles.xml" ContentType="application/vnd.openxmlformats-officedocument.spreadsheetml.styles+xml"/>"#,
    r#"<Override PartName="/xl/sharedStrings.xml" ContentType="application/vnd.openxmlformats-officedocument.spreadsheetml.sharedStrings+xml"/>"#,
    "</Types>",
);

const ROOT_RELS_XML: &str = concat!(
    r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#,
    r#"<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">"#,
    r#"<Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument" Target="xl/workbook.xml"/>"#,
    "</Relationships>",
);

const WORKBOOK_RELS_XML: &str = concat!(
    r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#,
    r#"<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">"#,
    r#"<Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/worksheet" Target="worksheets/sheet1.xml"/>"#,
    r#"<Relationship Id="rId2" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/styles" Target="styles.xml"/>"#,
    r#"<Relationship Id="rId3" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/sharedStrings" Target="sharedStrings.xml"/>"#,
    "</Relationships>",
);

// Fonts: default, bold white. Fills: none, gray125 (both required), dark
// header, light row. Borders: none, thin on all four sides.
const STYLES_XML: &str = concat!(
    r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#,
    r#"<styleSheet xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main">"#,
    r#"<fonts count="2">"#,
    r#"<font><sz val="11"/><name val="Calibri"/></font>"#,
    r#"<font><b/><sz val="11"/><color rgb="FFFFFFFF"/><name val="Calibri"/></font>"#,
    "</fonts>",
    r#"<fills count="4">"#,
    r#"<fill><patternFill patternType="none"/></fill>"#,
    r#"<fill><patternFill patternType="gray125"/></fill>"#,
    r#"<fill><patternFill patternType="solid"><fgColor rgb="FF111111"/><bgColor indexed="64"/></patternFill></fill>"#,
    r#"<fill><patternFill patternType="solid"><fgColor rgb="FFE5E5E5"/><bgColor indexed="64"/></patternFill></fill>"#,
    "</fills>",
    r#"<borders count="2">"#,
    "<border><left/><right/><top/><bottom/><diagonal/></border>",
    "<border>",
    r#"<left style="thin"><color rgb="FF444444"/></left>"#,
    r#"<right style="thin"><color rgb="FF444444"/></right>"#,
    r#"<top style="thin"><color rgb="FF444444"/></top>"#,
    r#"<bottom style="thin"><color rgb="FF444444"/></bottom>"#,
    "<diagonal/>",
    "</border>",
    "</borders>",
    r#"<cellStyleXfs count="1"><xf numFmtId="0" fontId="0" fillId="0" borderId="0"/></cellStyleXfs>"#,
    r#"<cellXfs count="3">"#,
    r#"<xf numFmtId="0" fontId="0" fillId="0" borderId="0" xfId="0"/>"#,
    r#"<xf numFmtId="0" fontId="1" fillId="2" borderId="1" xfId="0" applyFont="1" applyFill="1" applyBorder="1" applyAlignment="1"><alignment horizontal="left" vertical="center"/></xf>"#,
    r#"<xf numFmtId="0" fontId="0" fillId="3" borderId="1" xfId="0" applyFill="1" applyBorder="1" applyAlignment="1"><alignment horizontal="left" vertical="center"/></xf>"#,
    "</cellXfs>",
    r#"<cellStyles count="1"><cellStyle name="Normal" xfId="0" builtinId="0"/></cellStyles>"#,
    "</styleSheet>",
);

/// Escape XML special characters.
fn escape_xml(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

/// Unique cell strings in first-use order.
#[derive(Debug, Default)]
struct SharedStrings {
    strings: Vec<String>,
    index: std::collections::HashMap<String, usize>,
}

impl SharedStrings {
    fn add(&mut self, s: &str) -> usize {
        if let Some(&i) = self.index.get(s) {
            return i;
        }
        let i = self.strings.len();
        self.strings.push(s.to_owned());
        self.index.insert(s.to_owned(), i);
        i
    }

    fn to_xml(&self, references: usize) -> std::result::Result<String, fmt::Error> {
        let mut xml = String::with_capacity(256 + self.strings.len() * 32);
        xml.push_str(r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#);
        write!(
            xml,
            r#"<sst xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main" count="{}" uniqueCount="{}">"#,
            references,
            self.strings.len()
        )?;
        for s in &self.strings {
            // Leading or trailing spaces are dropped unless preserved
            if s.trim() != s {
                write!(xml, r#"<si><t xml:space="preserve">{}</t></si>"#, escape_xml(s))?;
            } else {
                write!(xml, "<si><t>{}</t></si>", escape_xml(s))?;
            }
        }
        xml.push_str("</sst>");
        Ok(xml)
    }
}

/// Width for a column holding `cells`: longest value plus two, capped.
pub fn column_width<'a, I>(cells: I) -> usize
where
    I: IntoIterator<Item = &'a str>,
{
    let longest = cells.into_iter().map(|c| c.chars().count()).max().unwrap_or(0);
    (longest + 2).min(MAX_COLUMN_WIDTH)
}

fn column_letter(index: usize) -> char {
    char::from(b'A' + index as u8)
}

fn sheet_xml(
    table: &[[&str; 3]],
    strings: &mut SharedStrings,
) -> std::result::Result<String, fmt::Error> {
    let mut xml = String::with_capacity(512 + table.len() * 160);
    xml.push_str(r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#);
    xml.push_str(r#"<worksheet xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main">"#);

    xml.push_str("<cols>");
    for col in 0..3 {
        let width = column_width(table.iter().map(|row| row[col]));
        write!(
            xml,
            r#"<col min="{n}" max="{n}" width="{width}" customWidth="1"/>"#,
            n = col + 1
        )?;
    }
    xml.push_str("</cols>");

    xml.push_str("<sheetData>");
    for (r, row) in table.iter().enumerate() {
        let row_number = r + 1;
        let style = if r == 0 { STYLE_HEADER } else { STYLE_ROW };
        write!(xml, r#"<row r="{row_number}">"#)?;
        for (c, value) in row.iter().enumerate() {
            let reference = format!("{}{row_number}", column_letter(c));
            if value.is_empty() {
                write!(xml, r#"<c r="{reference}" s="{style}"/>"#)?;
            } else {
                let index = strings.add(value);
                write!(xml, r#"<c r="{reference}" s="{style}" t="s"><v>{index}</v></c>"#)?;
            }
        }
        xml.push_str("</row>");
    }
    xml.push_str("</sheetData>");
    xml.push_str("</worksheet>");
    Ok(xml)
}

fn workbook_xml() -> String {
    format!(
        concat!(
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#,
            r#"<workbook xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main" "#,
            r#"xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships">"#,
            r#"<sheets><sheet name="{}" sheetId="1" r:id="rId1"/></sheets>"#,
            "</workbook>"
        ),
        SHEET_NAME
    )
}

/// Write the rows as a formatted single-sheet workbook.
///
/// The header matches the CSV report; extensions carry a leading dot and
/// undetected rows leave the cell empty.
pub fn write_xlsx<W: Write + Seek>(writer: W, rows: &[ReportRow]) -> Result<W> {
    let extensions: Vec<String> = rows.iter().map(ReportRow::dotted_extension).collect();
    let mut table: Vec<[&str; 3]> = Vec::with_capacity(rows.len() + 1);
    table.push(CSV_HEADER);
    for (row, extension) in rows.iter().zip(&extensions) {
        table.push([
            row.original_name.as_str(),
            row.output_name.as_str(),
            extension.as_str(),
        ]);
    }

    let mut strings = SharedStrings::default();
    let sheet = sheet_xml(&table, &mut strings).map_err(io::Error::other)?;
    let references = table.iter().flatten().filter(|v| !v.is_empty()).count();
    let shared = strings.to_xml(references).map_err(io::Error::other)?;
    let workbook = workbook_xml();

    let parts: [(&str, &str); 7] = [
        ("[Content_Types].xml", CONTENT_TYPES_XML),
        ("_rels/.rels", ROOT_RELS_XML),
        ("xl/workbook.xml", &workbook),
        ("xl/_rels/workbook.xml.rels", WORKBOOK_RELS_XML),
        ("xl/styles.xml", STYLES_XML),
        ("xl/sharedStrings.xml", &shared),
        ("xl/worksheets/sheet1.xml", &sheet),
    ];

    let mut zip_writer = ZipWriter::new(writer);
    let options = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);
    for (name, content) in parts {
        zip_writer.start_file(name, options)?;
        zip_writer.write_all(content.as_bytes())?;
    }
    Ok(zip_writer.finish()?)
}

/// Write the XLSX report to `path`.
pub fn write_xlsx_file(path: &Path, rows: &[ReportRow]) -> Result<()> {
    let writer = write_xlsx(BufWriter::new(File::create(path)?), rows)?;
    writer.into_inner().map_err(io::IntoInnerError::into_error)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::detection::{FormatTag, detect_file_format_from_bytes};
    use std::io::{Cursor, Read};
    use zip::ZipArchive;

    fn row(original: &str, output: &str, extension: Option<&str>) -> ReportRow {
        ReportRow {
            original_name: original.to_owned(),
            output_name: output.to_owned(),
            extension: extension.map(str::to_owned),
        }
    }

    fn render(rows: &[ReportRow]) -> Vec<u8> {
        write_xlsx(Cursor::new(Vec::new()), rows).unwrap().into_inner()
    }

    fn read_part(data: &[u8], name: &str) -> String {
        let mut archive = ZipArchive::new(Cursor::new(data)).unwrap();
        let mut content = String::new();
        archive.by_name(name).unwrap().read_to_string(&mut content).unwrap();
        content
    }

    #[test]
    fn test_xlsx_is_detected_as_xlsx() {
        let data = render(&[row("scan", "scan.png", Some("png"))]);
        assert_eq!(detect_file_format_from_bytes(&data), Some(FormatTag::Xlsx));
    }

    #[test]
    fn test_xlsx_sheet_contents() {
        let data = render(&[
            row("scan", "scan.png", Some("png")),
            row("blob", "blob", None),
            row("a&b", "a&b.pdf", Some("pdf")),
        ]);

        let strings = read_part(&data, "xl/sharedStrings.xml");
        for expected in [
            "<t>original_name</t>",
            "<t>output_name</t>",
            "<t>detected_extension</t>",
            "<t>scan.png</t>",
            "<t>.png</t>",
            "<t>a&amp;b.pdf</t>",
        ] {
            assert!(strings.contains(expected), "missing {expected} in {strings}");
        }
        // "blob" appears twice but is stored once
        assert_eq!(strings.matches("<t>blob</t>").count(), 1);

        let sheet = read_part(&data, "xl/worksheets/sheet1.xml");
        assert_eq!(sheet.matches("<row ").count(), 4);
        assert!(sheet.contains(r#"<c r="A1" s="1" t="s">"#));
        assert!(sheet.contains(r#"<c r="B2" s="2" t="s">"#));
        // Undetected extension is an empty but styled cell
        assert!(sheet.contains(r#"<c r="C3" s="2"/>"#));
    }

    #[test]
    fn test_xlsx_styles() {
        let styles = read_part(&render(&[]), "xl/styles.xml");
        assert!(styles.contains(r#"<fgColor rgb="FF111111"/>"#));
        assert!(styles.contains(r#"<fgColor rgb="FFE5E5E5"/>"#));
        assert!(styles.contains(r#"<left style="thin"><color rgb="FF444444"/></left>"#));
        assert!(styles.contains("<b/>"));
    }

    #[test]
    fn test_column_widths_are_capped() {
        let long = "x".repeat(200);
        let data = render(&[row(&long, "short", Some("txt"))]);
        let sheet = read_part(&data, "xl/worksheets/sheet1.xml");
        assert!(sheet.contains(r#"<col min="1" max="1" width="60" customWidth="1"/>"#));
        // "output_name" (11 chars) is the widest cell of column B
        assert!(sheet.contains(r#"<col min="2" max="2" width="13" customWidth="1"/>"#));
    }

    #[test]
    fn test_column_width() {
        assert_eq!(column_width(["ab", "abcd"]), 6);
        assert_eq!(column_width(["ção"]), 5);
        assert_eq!(column_width(std::iter::empty()), 2);
    }

    #[test]
    fn test_preserved_whitespace() {
        let data = render(&[row(" padded ", " padded ", None)]);
        let strings = read_part(&data, "xl/sharedStrings.xml");
        assert!(strings.contains(r#"<t xml:space="preserve"> padded </t>"#));
    }

    #[test]
    fn test_write_xlsx_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("report.xlsx");
        write_xlsx_file(&path, &[row("a", "a.txt", Some("txt"))]).unwrap();
        let data = std::fs::read(&path).unwrap();
        assert!(read_part(&data, "xl/workbook.xml").contains(r#"<sheet name="Report""#));
    }
}
