// src/process/mod.rs

pub mod table;
pub mod unzip;

pub use table::{parse_table, Table};
pub use unzip::{extract_entry, pick_data_entry, select_data_entry};

use crate::error::Result;

/// Unwrap an archive and parse its primary data entry into a table.
pub fn read_table_from_zip(zip_bytes: &[u8]) -> Result<Table> {
    let entry = unzip::select_data_entry(zip_bytes)?;
    let raw = unzip::extract_entry(zip_bytes, &entry)?;
    table::parse_table(&raw)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{Cursor, Write};
    use zip::write::SimpleFileOptions;
    use zip::CompressionMethod;

    fn make_zip(files: &[(&str, &[u8])]) -> Vec<u8> {
        let mut buf = Vec::new();
        {
            let mut writer = zip::ZipWriter::new(Cursor::new(&mut buf));
            for (name, content) in files {
                let options =
                    SimpleFileOptions::default().compression_method(CompressionMethod::Stored);
                writer.start_file(*name, options).unwrap();
                writer.write_all(content).unwrap();
            }
            writer.finish().unwrap();
        }
        buf
    }

    #[test]
    fn reads_the_primary_entry_as_a_table() {
        let zip = make_zip(&[
            ("readme.txt", b"see cftc.gov"),
            ("annual.txt", b"col1,col2\n1,2\n3,4\n"),
        ]);
        let table = read_table_from_zip(&zip).unwrap();
        assert_eq!(table.columns, vec!["col1", "col2"]);
        assert_eq!(table.len(), 2);
    }

    #[test]
    fn surfaces_missing_data_entry() {
        let zip = make_zip(&[("image.png", b"binary")]);
        assert!(matches!(
            read_table_from_zip(&zip).unwrap_err(),
            crate::error::Error::NoDataFile { .. }
        ));
    }
}
