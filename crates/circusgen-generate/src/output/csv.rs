use std::fs::{File, OpenOptions};
use std::io::BufWriter;
use std::path::Path;

use serde::Serialize;

/// How the destination file is opened.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteMode {
    /// Create the file, discarding any previous content.
    Create,
    /// Append to the file, creating it when missing.
    Append,
}

/// Rows and bytes written by one call.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WriteStats {
    pub rows: u64,
    pub bytes: u64,
}

/// Write records as header-less CSV, one row per record, fields in
/// declaration order.
pub fn write_rows<T: Serialize>(
    path: &Path,
    rows: &[T],
    mode: WriteMode,
) -> Result<WriteStats, csv::Error> {
    let file = open(path, mode)?;
    let before = file.metadata()?.len();
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(BufWriter::new(file));

    for row in rows {
        writer.serialize(row)?;
    }

    let file = writer
        .into_inner()
        .map_err(|err| err.into_error())?
        .into_inner()
        .map_err(|err| err.into_error())?;
    let after = file.metadata()?.len();
    Ok(WriteStats {
        rows: rows.len() as u64,
        bytes: after.saturating_sub(before),
    })
}

fn open(path: &Path, mode: WriteMode) -> std::io::Result<File> {
    match mode {
        WriteMode::Create => File::create(path),
        WriteMode::Append => OpenOptions::new().create(true).append(true).open(path),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Serialize)]
    struct Row<'a> {
        id: u32,
        name: &'a str,
    }

    fn temp_path(label: &str) -> std::path::PathBuf {
        std::env::temp_dir().join(format!(
            "circusgen_csv_{label}_{}.csv",
            crate::ids::new_id(&mut rand::rng())
        ))
    }

    #[test]
    fn bytes_match_the_file_and_accumulate_on_append() {
        let path = temp_path("append");
        let first = [Row { id: 1, name: "Riga" }, Row { id: 2, name: "Oslo, Norway" }];
        let created = write_rows(&path, &first, WriteMode::Create).expect("create");
        assert_eq!(created.rows, 2);
        assert_eq!(created.bytes, std::fs::metadata(&path).expect("metadata").len());

        let appended =
            write_rows(&path, &[Row { id: 3, name: "Lima" }], WriteMode::Append).expect("append");
        assert_eq!(appended.rows, 1);
        assert_eq!(appended.bytes, "3,Lima\n".len() as u64);

        let content = std::fs::read_to_string(&path).expect("read");
        assert_eq!(content, "1,Riga\n2,\"Oslo, Norway\"\n3,Lima\n");
        assert_eq!(content.len() as u64, created.bytes + appended.bytes);
    }

    #[test]
    fn create_truncates_previous_content() {
        let path = temp_path("truncate");
        std::fs::write(&path, "stale,row\nstale,row\n").expect("seed file");
        let stats = write_rows(&path, &[Row { id: 7, name: "Kyiv" }], WriteMode::Create)
            .expect("create");
        assert_eq!(stats.bytes, 7);
        assert_eq!(std::fs::read_to_string(&path).expect("read"), "7,Kyiv\n");
    }
}
