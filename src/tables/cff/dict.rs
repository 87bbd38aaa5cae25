//! The Top DICT operand interpreter.
//!
//! Only the charset and CharStrings offsets are captured. Every other
//! operator is decoded just far enough to stay aligned on the byte stream.

use crate::buffer::GlyphBufReaderError;

const OP_ESCAPE: u8 = 12;
const OP_CHARSET: u8 = 15;
const OP_CHAR_STRINGS: u8 = 17;

const SHORT_INT: u8 = 28;
const LONG_INT: u8 = 29;
const REAL: u8 = 30;

const END_OF_FLOAT_FLAG: u8 = 0xf;

/// Offsets captured from a Top DICT, relative to the start of the CFF table
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TopDictOffsets {
    /// 0 unless the DICT says otherwise, which selects the ISOAdobe charset
    pub charset: i32,
    pub char_strings: Option<i32>,
}

/// Runs the DICT byte stream through an operand stack, capturing the top
/// operand whenever the charset or CharStrings operator is reached.
///
/// The stack is cleared after every operator. Real numbers are consumed but
/// pushed as 0.
pub fn parse_top_dict(data: &[u8]) -> Result<TopDictOffsets, GlyphBufReaderError> {
    let mut offsets = TopDictOffsets::default();
    let mut operands: Vec<i32> = Vec::new();
    let mut pos = 0;

    while let Some(&b0) = data.get(pos) {
        pos += 1;
        match b0 {
            OP_ESCAPE => {
                take(data, &mut pos, 1)?;
                operands.clear();
            }
            SHORT_INT => {
                let b = take(data, &mut pos, 2)?;
                operands.push(i16::from_be_bytes([b[0], b[1]]).into());
            }
            LONG_INT => {
                let b = take(data, &mut pos, 4)?;
                operands.push(i32::from_be_bytes([b[0], b[1], b[2], b[3]]));
            }
            REAL => {
                skip_real(data, &mut pos)?;
                operands.push(0);
            }
            32..=246 => operands.push(i32::from(b0) - 139),
            247..=250 => {
                let b1 = take(data, &mut pos, 1)?[0];
                operands.push((i32::from(b0) - 247) * 256 + i32::from(b1) + 108);
            }
            251..=254 => {
                let b1 = take(data, &mut pos, 1)?[0];
                operands.push(-(i32::from(b0) - 251) * 256 - i32::from(b1) - 108);
            }
            op => {
                match (op, operands.last()) {
                    (OP_CHARSET, Some(&top)) => offsets.charset = top,
                    (OP_CHAR_STRINGS, Some(&top)) => offsets.char_strings = Some(top),
                    _ => {}
                }
                operands.clear();
            }
        }
    }

    Ok(offsets)
}

fn take<'a>(data: &'a [u8], pos: &mut usize, n: usize) -> Result<&'a [u8], GlyphBufReaderError> {
    let bytes = data
        .get(*pos..*pos + n)
        .ok_or_else(|| GlyphBufReaderError::UnexpectedEndOfData {
            requested: *pos + n - data.len(),
        })?;
    *pos += n;
    Ok(bytes)
}

/// Consumes packed BCD nibbles up to and including the 0xf terminator
fn skip_real(data: &[u8], pos: &mut usize) -> Result<(), GlyphBufReaderError> {
    loop {
        let byte = take(data, pos, 1)?[0];
        if byte >> 4 == END_OF_FLOAT_FLAG || byte & 0xf == END_OF_FLOAT_FLAG {
            return Ok(());
        }
    }
}
