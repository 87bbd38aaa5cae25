//! Builders for synthetic font data used across the unit tests

use std::io::Cursor;

use crate::buffer::GlyphBufReader;

/// A growable big-endian byte buffer
#[derive(Clone, Debug, Default)]
pub(crate) struct BeBuffer {
    data: Vec<u8>,
}

impl BeBuffer {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn u8(mut self, value: u8) -> Self {
        self.data.push(value);
        self
    }

    pub(crate) fn u16(mut self, value: u16) -> Self {
        self.data.extend_from_slice(&value.to_be_bytes());
        self
    }

    pub(crate) fn i16(mut self, value: i16) -> Self {
        self.data.extend_from_slice(&value.to_be_bytes());
        self
    }

    pub(crate) fn u32(mut self, value: u32) -> Self {
        self.data.extend_from_slice(&value.to_be_bytes());
        self
    }

    pub(crate) fn bytes(mut self, value: &[u8]) -> Self {
        self.data.extend_from_slice(value);
        self
    }

    pub(crate) fn u16s(self, values: &[u16]) -> Self {
        values.iter().fold(self, |buf, v| buf.u16(*v))
    }

    /// Pascal string: one length byte then the bytes
    pub(crate) fn pascal(self, value: &str) -> Self {
        self.u8(value.len() as u8).bytes(value.as_bytes())
    }

    pub(crate) fn len(&self) -> usize {
        self.data.len()
    }

    pub(crate) fn into_inner(self) -> Vec<u8> {
        self.data
    }

    pub(crate) fn reader(self) -> GlyphBufReader<Cursor<Vec<u8>>> {
        GlyphBufReader::from_buffer(Cursor::new(self.data))
    }
}

/// Assembles a font file from (tag, table bytes) pairs, laying the tables out
/// back to back after the directory.
pub(crate) fn font_with_tables(tables: &[(&[u8; 4], Vec<u8>)]) -> Vec<u8> {
    let num_tables = tables.len() as u16;
    let mut header = BeBuffer::new()
        .u32(0x0001_0000)
        .u16(num_tables)
        .u16s(&[0, 0, 0]);

    let mut offset = 12 + 16 * tables.len() as u32;
    for (tag, data) in tables {
        header = header
            .bytes(&tag[..])
            .u32(0)
            .u32(offset)
            .u32(data.len() as u32);
        offset += data.len() as u32;
    }

    let mut font = header.into_inner();
    for (_, data) in tables {
        font.extend_from_slice(data);
    }
    font
}

/// A `post` table, version 2, with the given glyph name indices and custom names
pub(crate) fn post_v2(indices: &[u16], custom_names: &[&str]) -> BeBuffer {
    let buf = BeBuffer::new()
        .u32(0x0002_0000)
        .bytes(&[0; 28])
        .u16(indices.len() as u16)
        .u16s(indices);
    custom_names.iter().fold(buf, |buf, name| buf.pascal(name))
}

/// One format 4 segment: (start, end, id_delta, id_range_offset)
pub(crate) type Segment = (u16, u16, i16, u16);

/// A `cmap` format 4 subtable body, laid out as on disk
pub(crate) fn cmap4(segments: &[Segment], glyph_ids: &[u16]) -> BeBuffer {
    let seg_count = segments.len() as u16;
    let length = 16 + 8 * seg_count + 2 * glyph_ids.len() as u16;
    let mut buf = BeBuffer::new()
        .u16(4)
        .u16(length)
        .u16(0)
        .u16(seg_count * 2)
        .u16s(&[0, 0, 0]);
    for (_, end, _, _) in segments {
        buf = buf.u16(*end);
    }
    buf = buf.u16(0);
    for (start, _, _, _) in segments {
        buf = buf.u16(*start);
    }
    for (_, _, delta, _) in segments {
        buf = buf.i16(*delta);
    }
    for (_, _, _, range_offset) in segments {
        buf = buf.u16(*range_offset);
    }
    buf.u16s(glyph_ids)
}

/// A `cmap` format 12 subtable body from (start, end, start_glyph) groups
pub(crate) fn cmap12(groups: &[(u32, u32, u32)]) -> BeBuffer {
    let mut buf = BeBuffer::new()
        .u16(12)
        .u16(0)
        .u32(16 + 12 * groups.len() as u32)
        .u32(0)
        .u32(groups.len() as u32);
    for (start, end, glyph) in groups {
        buf = buf.u32(*start).u32(*end).u32(*glyph);
    }
    buf
}

/// A whole `cmap` table from (platform, encoding, subtable) records
pub(crate) fn cmap(subtables: &[(u16, u16, Vec<u8>)]) -> Vec<u8> {
    let mut buf = BeBuffer::new().u16(0).u16(subtables.len() as u16);
    let mut offset = 4 + 8 * subtables.len() as u32;
    for (platform, encoding, data) in subtables {
        buf = buf.u16(*platform).u16(*encoding).u32(offset);
        offset += data.len() as u32;
    }
    for (_, _, data) in subtables {
        buf = buf.bytes(data);
    }
    buf.into_inner()
}

/// A CFF INDEX with one-byte offsets
pub(crate) fn cff_index(items: &[&[u8]]) -> Vec<u8> {
    if items.is_empty() {
        return vec![0, 0];
    }
    let mut buf = BeBuffer::new().u16(items.len() as u16).u8(1);
    let mut offset = 1u8;
    buf = buf.u8(offset);
    for item in items {
        offset += item.len() as u8;
        buf = buf.u8(offset);
    }
    for item in items {
        buf = buf.bytes(item);
    }
    buf.into_inner()
}

/// Encodes an integer DICT operand using the five-byte form
pub(crate) fn dict_int(value: i32) -> Vec<u8> {
    let mut out = vec![29];
    out.extend_from_slice(&value.to_be_bytes());
    out
}

/// A CFF table whose Top DICT points at the given charset bytes and whose
/// CharStrings INDEX holds `glyph_count` empty charstrings.
///
/// `charset` of `None` selects the predefined ISOAdobe charset.
pub(crate) fn cff(strings: &[&str], glyph_count: u16, charset: Option<&[u8]>) -> Vec<u8> {
    let header = [1u8, 0, 4, 1];
    let name_index = cff_index(&[b"TestFont"]);
    let string_items = strings.iter().map(|s| s.as_bytes()).collect::<Vec<_>>();
    let string_index = cff_index(&string_items);
    let global_subrs = cff_index(&[]);

    // Top DICT uses fixed width operands so its length is known up front
    let top_dict_len = 5 + 1 + 5 + 1;
    let top_dict_index_len = 2 + 1 + 2 + top_dict_len;
    let charset_offset = header.len()
        + name_index.len()
        + top_dict_index_len
        + string_index.len()
        + global_subrs.len();
    let charset = charset.unwrap_or(&[]);
    let charstrings_offset = charset_offset + charset.len();

    let mut top_dict = Vec::new();
    top_dict.extend(dict_int(if charset.is_empty() {
        0
    } else {
        charset_offset as i32
    }));
    top_dict.push(15);
    top_dict.extend(dict_int(charstrings_offset as i32));
    top_dict.push(17);
    let top_dict_index = cff_index(&[&top_dict]);
    assert_eq!(top_dict_index.len(), top_dict_index_len);

    let mut charstrings = BeBuffer::new().u16(glyph_count);
    if glyph_count > 0 {
        charstrings = charstrings.u8(1);
        for _ in 0..=glyph_count {
            charstrings = charstrings.u8(1);
        }
    }

    let mut out = Vec::new();
    out.extend_from_slice(&header);
    out.extend(name_index);
    out.extend(top_dict_index);
    out.extend(string_index);
    out.extend(global_subrs);
    out.extend_from_slice(charset);
    out.extend(charstrings.into_inner());
    out
}
