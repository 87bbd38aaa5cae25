use std::io::{Read, Seek};

use indexmap::IndexMap;

use crate::buffer::{GlyphBufReader, GlyphBufReaderError};

use super::TableRecord;

/// Codepoint to glyph index, in the order ranges were expanded
pub type CodepointMap = IndexMap<u32, u16>;

/// Format 12 groups spanning more codepoints than Unicode has are corrupt
const MAX_GROUP_SPAN: u32 = 0x10FFFF;

/// A representation of the [cmap table](https://learn.microsoft.com/en-us/typography/opentype/spec/cmap)
/// supporting only formats 4 and 12 as these are the formats Unicode fonts
/// actually ship; the others are either for specialized uses or legacy
/// single-byte encodings.
#[derive(Debug)]
pub struct Cmap {
    /// Absolute offset of the cmap table, subtable offsets are relative to it
    offset: u32,

    /// The encoding records, in on-disk order
    subtables: Vec<CmapSub>,
}

/// A representation of a cmap encoding record
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CmapSub {
    /// The platform identifier
    pub platform_id: u16,

    /// The platform specific encoding identifier
    pub platform_specific_id: u16,

    /// The offset of the mapping table from the start of the cmap table
    pub offset: u32,
}

impl CmapSub {
    /// Ranks how much we trust this subtable to hold full Unicode coverage.
    ///
    /// Windows UCS-4 beats Unicode full repertoire, which beats Windows BMP.
    /// Everything else is tried last.
    pub fn priority(&self) -> u8 {
        match (self.platform_id, self.platform_specific_id) {
            (3, 10) => 3,
            (0, 4) => 2,
            (3, 1) => 1,
            _ => 0,
        }
    }
}

impl Cmap {
    /// Reads the cmap header and its encoding records
    pub fn from_reader<B: Read + Seek>(
        reader: &mut GlyphBufReader<B>,
        record: &TableRecord,
    ) -> Result<Self, GlyphBufReaderError> {
        reader.seek_to(record.offset.into())?;

        let _version = reader.read_u16()?;
        let num_subtables = reader.read_u16()?;

        let mut subtables = Vec::with_capacity(num_subtables.into());
        for _ in 0..num_subtables {
            subtables.push(CmapSub {
                platform_id: reader.read_u16()?,
                platform_specific_id: reader.read_u16()?,
                offset: reader.read_u32()?,
            });
        }

        Ok(Self {
            offset: record.offset,
            subtables,
        })
    }

    /// Subtables from highest to lowest priority, ties keep on-disk order
    pub fn by_priority(&self) -> Vec<CmapSub> {
        let mut ranked = self.subtables.clone();
        ranked.sort_by_key(|sub| std::cmp::Reverse(sub.priority()));
        ranked
    }

    /// Decodes the best subtable into a codepoint map.
    ///
    /// All subtables are first searched for format 12, in priority order. If
    /// none of them produces a mapping, the search is repeated for format 4.
    /// Returns `None` if no subtable has either format.
    pub fn codepoints<B: Read + Seek>(
        &self,
        reader: &mut GlyphBufReader<B>,
    ) -> Result<Option<CodepointMap>, GlyphBufReaderError> {
        let ranked = self.by_priority();
        let mut found_any = false;

        for format in [12, 4] {
            for sub in &ranked {
                let start = u64::from(self.offset) + u64::from(sub.offset);
                reader.seek_to(start)?;
                if reader.read_u16()? != format {
                    continue;
                }

                log::debug!(
                    "decoding cmap format {format} subtable ({}, {})",
                    sub.platform_id,
                    sub.platform_specific_id
                );
                found_any = true;

                let map = match format {
                    12 => read_format12(reader)?,
                    _ => read_format4(reader)?,
                };
                if !map.is_empty() || format == 4 {
                    return Ok(Some(map));
                }

                log::debug!("format 12 subtable is empty, falling back to format 4");
                break;
            }
        }

        Ok(found_any.then(CodepointMap::new))
    }
}

/// Decodes a format 12 body, positioned just after the format field.
///
/// Each group maps a run of codepoints to consecutive glyph indices.
fn read_format12<B: Read + Seek>(
    reader: &mut GlyphBufReader<B>,
) -> Result<CodepointMap, GlyphBufReaderError> {
    // reserved, length, language
    reader.skip(2 + 4 + 4)?;
    let num_groups = reader.read_u32()?;

    let mut map = CodepointMap::new();
    for _ in 0..num_groups {
        let start_code = reader.read_u32()?;
        let end_code = reader.read_u32()?;
        let start_glyph = reader.read_u32()?;

        let Some(span) = end_code.checked_sub(start_code) else {
            log::warn!("skipping cmap group with end {end_code:#x} before start {start_code:#x}");
            continue;
        };
        if span > MAX_GROUP_SPAN {
            log::warn!("skipping oversized cmap group {start_code:#x}..={end_code:#x}");
            continue;
        }

        for code in start_code..=end_code {
            let glyph = start_glyph.wrapping_add(code - start_code);
            map.insert(code, glyph as u16);
        }
    }

    Ok(map)
}

/// Decodes a format 4 body, positioned just after the format field.
fn read_format4<B: Read + Seek>(
    reader: &mut GlyphBufReader<B>,
) -> Result<CodepointMap, GlyphBufReaderError> {
    let length = reader.read_u16()?;
    let _language = reader.read_u16()?;
    let seg_count = usize::from(reader.read_u16()? / 2);
    // searchRange, entrySelector, rangeShift
    reader.skip(6)?;

    let end_codes = read_u16_array(reader, seg_count)?;
    let _reserved_pad = reader.read_u16()?;
    let start_codes = read_u16_array(reader, seg_count)?;
    let id_deltas = read_u16_array(reader, seg_count)?;
    let id_range_offsets = read_u16_array(reader, seg_count)?;

    let glyph_id_count = (usize::from(length) / 2).saturating_sub(8 + 4 * seg_count);
    let glyph_ids = read_u16_array(reader, glyph_id_count)?;

    let mut map = CodepointMap::new();
    for segment in 0..seg_count {
        let start = start_codes[segment];
        let end = end_codes[segment];
        let delta = id_deltas[segment];
        let range_offset = id_range_offsets[segment];

        for code in u32::from(start)..=u32::from(end) {
            let glyph = if range_offset == 0 {
                (code as u16).wrapping_add(delta)
            } else {
                // idRangeOffset is relative to its own slot in the offsets
                // array, which sits (seg_count - segment) words before
                // glyphIdArray
                let index = (range_offset / 2) as isize + (code - u32::from(start)) as isize
                    - (seg_count - segment) as isize;
                let glyph = usize::try_from(index)
                    .ok()
                    .and_then(|index| glyph_ids.get(index))
                    .copied()
                    .unwrap_or(0);
                if glyph == 0 {
                    0
                } else {
                    glyph.wrapping_add(delta)
                }
            };
            map.insert(code, glyph);
        }
    }

    Ok(map)
}

fn read_u16_array<B: Read + Seek>(
    reader: &mut GlyphBufReader<B>,
    count: usize,
) -> Result<Vec<u16>, GlyphBufReaderError> {
    (0..count).map(|_| reader.read_u16()).collect()
}
