//! Loaders for datasets. Just opens them up and returns a labeled cloud.
//!
//! The on-disk layout is little endian and self contained:
//!
//! ```text
//! header:  u32 count, u32 dim
//! records: count * { i64 label, dim * f32 features }
//! ```

use log::debug;
use std::convert::TryInto;
use std::fs::File;
use std::io::{Read, Write};
use std::path::Path;

use crate::base_traits::*;
use crate::data_sources::*;
use crate::distances::Metric;
use crate::errors::*;
use crate::label_sources::*;
use crate::DefaultLabeledCloud;

const HEADER_LEN: usize = 8;
const LABEL_LEN: usize = 8;
const FEATURE_LEN: usize = 4;

/// Opens a binary labeled dataset and decodes the whole thing into ram.
pub fn labeled_ram_from_file<P: AsRef<Path>, M: Metric>(
    path: P,
) -> PixelCloudResult<DefaultLabeledCloud<M>> {
    let path = path.as_ref();
    let file_name = path.to_string_lossy().to_string();
    let mut file = File::open(path)?;
    let mut bytes = Vec::new();
    file.read_to_end(&mut bytes)?;
    labeled_ram_from_bytes(&bytes, &file_name)
}

/// Decodes an already read dataset file. The `file_name` only feeds diagnostics.
pub fn labeled_ram_from_bytes<M: Metric>(
    bytes: &[u8],
    file_name: &str,
) -> PixelCloudResult<DefaultLabeledCloud<M>> {
    if bytes.len() < HEADER_LEN {
        return Err(ParsingError::MalformedHeaderError {
            file_name: file_name.to_string(),
            field: "length",
        }
        .into());
    }
    let count = u32::from_le_bytes(bytes[0..4].try_into().unwrap()) as usize;
    let dim = u32::from_le_bytes(bytes[4..8].try_into().unwrap()) as usize;
    if dim == 0 {
        return Err(ParsingError::MalformedHeaderError {
            file_name: file_name.to_string(),
            field: "dim",
        }
        .into());
    }

    let record_len = LABEL_LEN + FEATURE_LEN * dim;
    let expected = count
        .checked_mul(record_len)
        .and_then(|body| body.checked_add(HEADER_LEN))
        .ok_or(ParsingError::MalformedHeaderError {
            file_name: file_name.to_string(),
            field: "count",
        })?;
    if bytes.len() != expected {
        return Err(ParsingError::TruncatedDataError {
            file_name: file_name.to_string(),
            expected,
            actual: bytes.len(),
        }
        .into());
    }

    let mut data: Vec<f32> = Vec::with_capacity(count * dim);
    let mut labels: Vec<i64> = Vec::with_capacity(count);
    let mut offset = HEADER_LEN;
    for _ in 0..count {
        labels.push(i64::from_le_bytes(
            bytes[offset..offset + LABEL_LEN].try_into().unwrap(),
        ));
        offset += LABEL_LEN;
        for _ in 0..dim {
            data.push(f32::from_le_bytes(
                bytes[offset..offset + FEATURE_LEN].try_into().unwrap(),
            ));
            offset += FEATURE_LEN;
        }
    }

    debug!("decoded {} images of dim {} from {}", count, dim, file_name);
    let data = PixelRam::new_named(file_name.to_string(), data, dim)?;
    let labels = IntLabels::new(labels);
    Ok(SimpleLabeledCloud::new(data, labels))
}

/// Writes a labeled dataset in the layout `labeled_ram_from_file` reads.
/// `data` is row major, `labels.len() * dim == data.len()`.
pub fn labeled_ram_to_file<P: AsRef<Path>>(
    path: P,
    dim: usize,
    labels: &[i64],
    data: &[f32],
) -> PixelCloudResult<()> {
    if dim == 0 || labels.len() * dim != data.len() {
        return Err(ParsingError::RegularParsingError(
            "label count, dimension and data length disagree",
        )
        .into());
    }
    let mut bytes: Vec<u8> =
        Vec::with_capacity(HEADER_LEN + labels.len() * (LABEL_LEN + FEATURE_LEN * dim));
    bytes.extend_from_slice(&(labels.len() as u32).to_le_bytes());
    bytes.extend_from_slice(&(dim as u32).to_le_bytes());
    for (label, row) in labels.iter().zip(data.chunks(dim)) {
        bytes.extend_from_slice(&label.to_le_bytes());
        for feature in row {
            bytes.extend_from_slice(&feature.to_le_bytes());
        }
    }
    let mut file = File::create(path)?;
    file.write_all(&bytes)?;
    Ok(())
}
