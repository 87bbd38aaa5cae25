use std::{
    collections::BTreeMap,
    io::{Read, Seek},
};

use crate::buffer::GlyphBufReader;

use super::CffError;

/// Glyph index to SID, decoded from a custom charset.
///
/// Glyph 0 is always `.notdef` and is never stored.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct Charset {
    sids: BTreeMap<u16, u16>,
}

impl Charset {
    /// Decodes the charset under the reader, which must be positioned on
    /// its format byte. Glyphs at or past `num_glyphs` are ignored.
    pub fn from_reader<B: Read + Seek>(
        reader: &mut GlyphBufReader<B>,
        num_glyphs: u16,
    ) -> Result<Self, CffError> {
        let format = reader.read_u8()?;
        let mut sids = BTreeMap::new();

        match format {
            0 => {
                for glyph in 1..num_glyphs {
                    sids.insert(glyph, reader.read_u16()?);
                }
            }
            1 | 2 => {
                let mut glyph = 1u16;
                while glyph < num_glyphs {
                    let first = reader.read_u16()?;
                    let n_left = if format == 1 {
                        u16::from(reader.read_u8()?)
                    } else {
                        reader.read_u16()?
                    };

                    for offset in 0..=n_left {
                        if glyph >= num_glyphs {
                            break;
                        }
                        sids.insert(glyph, first.wrapping_add(offset));
                        glyph += 1;
                    }
                }
            }
            _ => {
                return Err(CffError::Unsupported(format!("charset format {format}")));
            }
        }

        Ok(Self { sids })
    }

    /// (glyph index, SID) pairs in glyph order
    pub fn iter(&self) -> impl Iterator<Item = (u16, u16)> + '_ {
        self.sids.iter().map(|(glyph, sid)| (*glyph, *sid))
    }
}
