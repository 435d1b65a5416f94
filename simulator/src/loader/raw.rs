use anyhow::Context;
use csv::ReaderBuilder;
use std::fs;
use std::path::Path;

/// Untyped export: trimmed headers plus string cells.
#[derive(Debug, Clone, Default)]
pub struct RawTable {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl RawTable {
    /// Index of the first header matching any of `names`, case-insensitively.
    pub fn column(&self, names: &[&str]) -> Option<usize> {
        names.iter().find_map(|name| {
            self.headers
                .iter()
                .position(|header| header.eq_ignore_ascii_case(name))
        })
    }

    /// Non-empty cell at `column`, if the row is long enough.
    pub fn cell<'r>(row: &'r [String], column: Option<usize>) -> Option<&'r str> {
        column
            .and_then(|idx| row.get(idx))
            .map(String::as_str)
            .filter(|value| !value.is_empty())
    }
}

/// Reads a `;`-separated export, falling back to `,` when the header does not split.
///
/// Bytes that are not valid UTF-8 are replaced rather than rejected.
pub fn read_table(path: &Path) -> anyhow::Result<RawTable> {
    let bytes = fs::read(path).with_context(|| format!("reading export {}", path.display()))?;
    let text = String::from_utf8_lossy(&bytes);

    let table = parse_delimited(&text, b';')
        .with_context(|| format!("parsing export {}", path.display()))?;
    if table.headers.len() <= 1 && text.lines().next().is_some_and(|line| line.contains(',')) {
        return parse_delimited(&text, b',')
            .with_context(|| format!("parsing export {} as comma-separated", path.display()));
    }
    Ok(table)
}

fn parse_delimited(text: &str, delimiter: u8) -> anyhow::Result<RawTable> {
    let mut reader = ReaderBuilder::new()
        .delimiter(delimiter)
        .has_headers(true)
        .flexible(true)
        .from_reader(text.as_bytes());

    let headers = reader
        .headers()?
        .iter()
        .map(|header| header.trim().trim_start_matches('\u{feff}').to_string())
        .collect();

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record?;
        rows.push(record.iter().map(|cell| cell.trim().to_string()).collect());
    }

    Ok(RawTable { headers, rows })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn reads_semicolon_export_with_padded_headers() {
        let mut temp = NamedTempFile::new().unwrap();
        temp.write_all(b" NUMBER ; LAP_NUMBER;LAP_TIME\n7;1;1:39.167\n13;1;1:40.002\n")
            .unwrap();
        let table = read_table(temp.path()).unwrap();
        assert_eq!(table.headers, vec!["NUMBER", "LAP_NUMBER", "LAP_TIME"]);
        assert_eq!(table.rows.len(), 2);
        assert_eq!(table.column(&["lap_time"]), Some(2));
        assert_eq!(RawTable::cell(&table.rows[1], Some(0)), Some("13"));
    }

    #[test]
    fn falls_back_to_comma() {
        let mut temp = NamedTempFile::new().unwrap();
        temp.write_all(b"POSITION,NUMBER,LAPS\n1,7,27\n").unwrap();
        let table = read_table(temp.path()).unwrap();
        assert_eq!(table.headers.len(), 3);
        assert_eq!(table.rows[0], vec!["1", "7", "27"]);
    }

    #[test]
    fn tolerates_invalid_utf8() {
        let mut temp = NamedTempFile::new().unwrap();
        temp.write_all(b"NUMBER;DRIVER\n7;M\xfcller\n").unwrap();
        let table = read_table(temp.path()).unwrap();
        assert_eq!(table.rows.len(), 1);
        assert!(table.rows[0][1].starts_with('M'));
    }

    #[test]
    fn missing_columns_read_as_absent() {
        let table = RawTable {
            headers: vec!["NUMBER".into()],
            rows: vec![vec!["".into()]],
        };
        assert_eq!(table.column(&["KPH"]), None);
        assert_eq!(RawTable::cell(&table.rows[0], Some(0)), None);
        assert_eq!(RawTable::cell(&table.rows[0], Some(4)), None);
    }
}
