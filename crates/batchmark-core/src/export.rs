//! Naming of exported files.
//!
//! Every exported file is prefixed with its 1-based position in the batch,
//! zero padded to the digit count of the batch size, so archives sort in the
//! order the user arranged the images.

use crate::encode::OutputFormat;
use crate::pipeline::ProcessedImage;

/// `name` without its last extension. A leading dot is not an extension.
pub fn file_stem(name: &str) -> &str {
    match name.rfind('.') {
        Some(dot) if dot > 0 => &name[..dot],
        _ => name,
    }
}

fn index_prefix(index: usize, total: usize) -> String {
    let width = total.max(1).to_string().len();
    format!("{:0width$}", index, width = width)
}

/// File name for a processed image: `{index}_{stem}.{ext}`.
///
/// `index` is 1-based.
pub fn output_file_name(index: usize, total: usize, original_name: &str, format: OutputFormat) -> String {
    format!(
        "{}_{}.{}",
        index_prefix(index, total),
        file_stem(original_name),
        format.extension()
    )
}

/// File name for an original that is exported unprocessed: `{index}_{name}`.
pub fn passthrough_file_name(index: usize, total: usize, original_name: &str) -> String {
    format!("{}_{}", index_prefix(index, total), original_name)
}

/// One image of the batch as handed to the exporter.
#[derive(Debug, Clone, Copy)]
pub struct ExportSource<'a> {
    pub name: &'a str,
    pub original: &'a [u8],
    /// `None` when processing failed or was never run.
    pub processed: Option<&'a ProcessedImage>,
}

/// A file ready to be written or packed into an archive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportEntry {
    pub file_name: String,
    pub bytes: Vec<u8>,
    pub processed: bool,
}

/// Name every image of the batch, falling back to the original bytes for
/// images without a processed result.
pub fn export_entries(sources: &[ExportSource<'_>]) -> Vec<ExportEntry> {
    let total = sources.len();
    sources
        .iter()
        .enumerate()
        .map(|(i, source)| match source.processed {
            Some(image) => ExportEntry {
                file_name: output_file_name(i + 1, total, source.name, image.format),
                bytes: image.bytes.clone(),
                processed: true,
            },
            None => ExportEntry {
                file_name: passthrough_file_name(i + 1, total, source.name),
                bytes: source.original.to_vec(),
                processed: false,
            },
        })
        .collect()
}
