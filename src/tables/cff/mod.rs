//! Glyph names from a [CFF table](https://adobe-type-tools.github.io/font-tech-notes/pdfs/5176.CFF.pdf),
//! for OpenType fonts whose `post` table carries none.

use std::io::{Read, Seek};

use thiserror::Error;

use crate::buffer::{GlyphBufReader, GlyphBufReaderError};

use super::{TableRecord, post::GlyphNames};

pub mod charset;
pub mod dict;
pub mod index;
pub mod strings;

use charset::Charset;
use index::CffIndex;

/// Charset offsets below this select one of the predefined charsets
const PREDEFINED_CHARSETS: i32 = 3;

#[derive(Error, Debug)]
pub enum CffError {
    #[error(transparent)]
    Read(#[from] GlyphBufReaderError),

    /// The table is well formed enough to read but uses something this
    /// reader does not handle
    #[error("{0}")]
    Unsupported(String),
}

/// Reads glyph names through the Top DICT's charset.
///
/// Only the first font of the FontSet is looked at. A predefined charset
/// yields just `.notdef` for glyph 0.
pub fn read_glyph_names<B: Read + Seek>(
    reader: &mut GlyphBufReader<B>,
    record: &TableRecord,
) -> Result<GlyphNames, CffError> {
    let base = u64::from(record.offset);
    reader.seek_to(base)?;

    let _major = reader.read_u8()?;
    let _minor = reader.read_u8()?;
    let header_size = reader.read_u8()?;
    let _off_size = reader.read_u8()?;
    reader.seek_to(base + u64::from(header_size))?;

    // Name INDEX
    CffIndex::skip(reader)?;
    let top_dicts = CffIndex::from_reader(reader)?;
    let strings = CffIndex::from_reader(reader)?;
    // Global Subr INDEX
    CffIndex::skip(reader)?;

    let top_dict = top_dicts
        .get(0)
        .ok_or_else(|| CffError::Unsupported("empty Top DICT INDEX".into()))?;
    if top_dicts.len() > 1 {
        log::debug!("CFF FontSet holds {} fonts, using the first", top_dicts.len());
    }

    let offsets = dict::parse_top_dict(top_dict)?;
    let char_strings = offsets
        .char_strings
        .and_then(|offset| u64::try_from(offset).ok())
        .ok_or_else(|| CffError::Unsupported("Top DICT has no CharStrings offset".into()))?;
    reader.seek_to(base + char_strings)?;
    let num_glyphs = reader.read_u16()?;

    let mut names = GlyphNames::new();
    names.insert(0, ".notdef".to_owned());

    if (0..PREDEFINED_CHARSETS).contains(&offsets.charset) {
        log::debug!(
            "CFF uses predefined charset {}, only .notdef is named",
            offsets.charset
        );
        return Ok(names);
    }

    let charset_offset = u64::try_from(offsets.charset)
        .map_err(|_| CffError::Unsupported(format!("charset offset {}", offsets.charset)))?;
    reader.seek_to(base + charset_offset)?;
    let charset = Charset::from_reader(reader, num_glyphs)?;

    for (glyph, sid) in charset.iter() {
        names.insert(glyph, strings::resolve_sid(sid, &strings));
    }

    Ok(names)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::test_data::{BeBuffer, cff};

    fn read(table: Vec<u8>) -> Result<GlyphNames, CffError> {
        // put the table somewhere other than offset 0
        let mut data = vec![0xEE; 7];
        data.extend_from_slice(&table);
        let record = TableRecord {
            offset: 7,
            length: table.len() as u32,
        };
        read_glyph_names(&mut BeBuffer::new().bytes(&data).reader(), &record)
    }

    #[test]
    fn names_through_format0_charset() {
        let charset = BeBuffer::new().u8(0).u16s(&[391, 392, 1, 999]).into_inner();
        let table = cff(
            &["ic_fluent_add_24_regular", "ic_fluent_add_24_filled"],
            5,
            Some(charset.as_slice()),
        );

        let names = read(table).unwrap();
        let expected = GlyphNames::from([
            (0, ".notdef".to_string()),
            (1, "ic_fluent_add_24_regular".to_string()),
            (2, "ic_fluent_add_24_filled".to_string()),
            (3, "space".to_string()),
            (4, "sid999".to_string()),
        ]);
        assert_eq!(names, expected);
    }

    #[test]
    fn names_through_range_charset() {
        let charset = BeBuffer::new().u8(1).u16(391).u8(1).into_inner();
        let table = cff(&["first", "second"], 3, Some(charset.as_slice()));

        let names = read(table).unwrap();
        assert_eq!(names[&1], "first");
        assert_eq!(names[&2], "second");
    }

    #[test]
    fn predefined_charset_is_degraded() {
        let table = cff(&["unused"], 10, None);

        let names = read(table).unwrap();
        assert_eq!(names, GlyphNames::from([(0, ".notdef".to_string())]));
    }

    #[test]
    fn missing_char_strings() {
        let mut table = vec![1, 0, 4, 1];
        table.extend(crate::test_data::cff_index(&[b"Font"]));
        table.extend(crate::test_data::cff_index(&[&[139, 15]]));
        table.extend(crate::test_data::cff_index(&[]));
        table.extend(crate::test_data::cff_index(&[]));

        assert!(matches!(read(table), Err(CffError::Unsupported(_))));
    }

    #[test]
    fn truncated_table() {
        let mut table = cff(&["a"], 3, Some(&[0u8, 1, 0x87][..]));
        table.truncate(30);
        assert!(matches!(read(table), Err(CffError::Read(_))));
    }
}
