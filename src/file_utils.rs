use anyhow::{Context, Result};
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

// @module: File and path utilities

/// Suffix inserted before the extension of a derived output path
pub const DEFAULT_OUTPUT_SUFFIX: &str = "adjust";

// @struct: File operations utility
pub struct FileManager;

impl FileManager {
    // @checks: File existence
    pub fn file_exists<P: AsRef<Path>>(path: P) -> bool {
        path.as_ref().exists() && path.as_ref().is_file()
    }

    /// Read a whole file as byte lines, each keeping its original terminator.
    /// No decoding happens, so any ASCII-compatible encoding is accepted.
    pub fn read_lines<P: AsRef<Path>>(path: P) -> Result<Vec<Vec<u8>>> {
        let path = path.as_ref();
        let content = fs::read(path)
            .with_context(|| format!("Failed to read file: {:?}", path))?;

        Ok(Self::split_lines(&content))
    }

    /// Split after every `\n`, `\r\n` or lone `\r`; a trailing line without
    /// terminator is kept
    pub fn split_lines(content: &[u8]) -> Vec<Vec<u8>> {
        let mut lines = Vec::new();
        let mut start = 0;

        for (i, &byte) in content.iter().enumerate() {
            let line_end = match byte {
                b'\n' => true,
                b'\r' => content.get(i + 1) != Some(&b'\n'),
                _ => false,
            };
            if line_end {
                lines.push(content[start..=i].to_vec());
                start = i + 1;
            }
        }

        if start < content.len() {
            lines.push(content[start..].to_vec());
        }

        lines
    }

    /// Write lines back to back, replacing any existing file
    pub fn write_lines<P: AsRef<Path>, S: AsRef<[u8]>>(path: P, lines: &[S]) -> Result<()> {
        let path = path.as_ref();
        let file = File::create(path)
            .with_context(|| format!("Failed to create file: {:?}", path))?;

        let mut writer = BufWriter::new(file);
        for line in lines {
            writer
                .write_all(line.as_ref())
                .with_context(|| format!("Failed to write to file: {:?}", path))?;
        }
        writer
            .flush()
            .with_context(|| format!("Failed to write to file: {:?}", path))?;

        Ok(())
    }

    // @generates: Output path next to the input
    // @params: input_file, suffix
    // `movie.srt` with suffix `adjust` becomes `movie.adjust.srt`
    pub fn generate_output_path<P: AsRef<Path>>(input_file: P, suffix: &str) -> PathBuf {
        let input_file = input_file.as_ref();

        // Get the file stem (filename without extension)
        let stem = input_file.file_stem().unwrap_or_default();

        let mut output_filename = stem.to_os_string();
        output_filename.push(".");
        output_filename.push(suffix);
        if let Some(ext) = input_file.extension() {
            output_filename.push(".");
            output_filename.push(ext);
        }

        input_file.with_file_name(output_filename)
    }
}
