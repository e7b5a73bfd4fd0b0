//! Pipeline tests for the processor module
//!
//! Drive the converter over small fixed-width and CSV files written to a
//! temporary directory.


use std::fs;
use std::path::Path;

/// Write lines to a file, creating parent directories
pub fn write_lines(path: &Path, lines: &[Vec<u8>]) {
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    let mut contents = Vec::new();
    for line in lines {
        contents.extend_from_slice(line);
        contents.push(b'\n');
    }
    fs::write(path, contents).unwrap();
}

/// Header line for products 100, 101 and 183
pub fn header(date: &str) -> Vec<u8> {
    format!("AAAAAAAA0001{}", date).into_bytes()
}

/// Trailer line
pub fn trailer(count: usize) -> Vec<u8> {
    format!("99999999{:08}", count).into_bytes()
}
