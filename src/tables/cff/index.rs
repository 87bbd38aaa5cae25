use std::io::{Read, Seek};

use crate::buffer::GlyphBufReader;

use super::CffError;

/// An INDEX: a count, an offset size, `count + 1` offsets and the data they
/// slice. Offsets are 1-based relative to the byte before the data.
#[derive(Debug, Default)]
pub struct CffIndex {
    offsets: Vec<u32>,
    data: Vec<u8>,
}

struct IndexHeader {
    offsets: Vec<u32>,
    data_len: u32,
}

fn read_header<B: Read + Seek>(
    reader: &mut GlyphBufReader<B>,
) -> Result<Option<IndexHeader>, CffError> {
    let count = reader.read_u16()?;
    if count == 0 {
        return Ok(None);
    }

    let off_size = reader.read_u8()?;
    if !(1..=4).contains(&off_size) {
        return Err(CffError::Unsupported(format!("INDEX offset size {off_size}")));
    }

    let mut offsets = Vec::with_capacity(usize::from(count) + 1);
    for _ in 0..=count {
        let mut offset = 0u32;
        for _ in 0..off_size {
            offset = (offset << 8) | u32::from(reader.read_u8()?);
        }
        offsets.push(offset);
    }

    let data_len = offsets.last().copied().unwrap_or(1).saturating_sub(1);
    Ok(Some(IndexHeader { offsets, data_len }))
}

impl CffIndex {
    /// Reads a whole INDEX, leaving the reader just past its data
    pub fn from_reader<B: Read + Seek>(reader: &mut GlyphBufReader<B>) -> Result<Self, CffError> {
        let Some(header) = read_header(reader)? else {
            return Ok(Self::default());
        };

        let data = reader.read_bytes(header.data_len as usize)?;
        Ok(Self {
            offsets: header.offsets,
            data,
        })
    }

    /// Moves the reader past an INDEX without keeping its data
    pub fn skip<B: Read + Seek>(reader: &mut GlyphBufReader<B>) -> Result<(), CffError> {
        if let Some(header) = read_header(reader)? {
            reader.skip(header.data_len.into())?;
        }
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.offsets.len().saturating_sub(1)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns the `index`th block, `None` if out of range or if its
    /// offsets are inconsistent
    pub fn get(&self, index: usize) -> Option<&[u8]> {
        let start = *self.offsets.get(index)? as usize;
        let end = *self.offsets.get(index + 1)? as usize;
        self.data.get(start.checked_sub(1)?..end.checked_sub(1)?)
    }
}
