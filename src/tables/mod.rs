use std::{
    collections::BTreeMap,
    fmt,
    io::{Read, Seek},
};

use crate::buffer::{GlyphBufReader, GlyphBufReaderError};

pub mod cff;
pub mod cmap;
pub mod post;

/// A 4-byte table identifier as it appears in the table directory
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Tag([u8; 4]);

impl Tag {
    pub const CMAP: Tag = Tag(*b"cmap");
    pub const POST: Tag = Tag(*b"post");
    pub const CFF: Tag = Tag(*b"CFF ");

    pub const fn new(bytes: [u8; 4]) -> Self {
        Self(bytes)
    }
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for byte in self.0 {
            if byte.is_ascii_graphic() || byte == b' ' {
                write!(f, "{}", byte as char)?;
            } else {
                write!(f, "\\x{byte:02x}")?;
            }
        }
        Ok(())
    }
}

/// Represents the offset subtable at the very start of the font file,
/// providing us with the number of tables in the directory
#[derive(Debug)]
pub struct OffsetTable {
    scaler_type: u32,
    num_tables: u16,
}

impl OffsetTable {
    /// The offset subtable is a fixed 12 bytes
    pub const SIZE: usize = 12;

    /// Constructs the offset sub table from its raw 12 bytes,
    /// the three binary search hints are discarded
    pub fn from_buffer(buf: &[u8; OffsetTable::SIZE]) -> Self {
        Self {
            scaler_type: u32::from_be_bytes([buf[0], buf[1], buf[2], buf[3]]),
            num_tables: u16::from_be_bytes([buf[4], buf[5]]),
        }
    }

    /// Reads the offset table from the start of the file
    pub(crate) fn from_reader<B: Read + Seek>(
        reader: &mut GlyphBufReader<B>,
    ) -> Result<Self, GlyphBufReaderError> {
        reader.seek_to(0)?;

        let mut buffer = [0u8; OffsetTable::SIZE];
        buffer.copy_from_slice(&reader.read_bytes(Self::SIZE)?);

        Ok(Self::from_buffer(&buffer))
    }

    /// Returns the sfnt version / scaler tag, e.g. `0x00010000` or `OTTO`
    pub fn scaler_type(&self) -> u32 {
        self.scaler_type
    }

    /// Returns the number of tables exists in the font file
    pub fn num_tables(&self) -> u16 {
        self.num_tables
    }
}

/// Byte location of one top-level table, relative to the start of the file
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TableRecord {
    pub offset: u32,
    pub length: u32,
}

impl TableRecord {
    /// Size of a directory entry: tag, checksum, offset and length
    pub const SIZE: usize = 16;

    /// Splits a 16 byte directory entry into its tag and location.
    /// The checksum in bytes 4-7 is not verified.
    ///
    /// # Examples
    ///
    /// ```
    /// use glyphmap::tables::{Tag, TableRecord};
    ///
    /// let entry: [u8; 16] = [
    ///     b'c', b'm', b'a', b'p', // Tag
    ///     0x12, 0x34, 0x56, 0x78, // Checksum
    ///     0x00, 0x00, 0x01, 0x00, // Offset: 256
    ///     0x00, 0x00, 0x0A, 0x00, // Length: 2560
    /// ];
    ///
    /// let (tag, record) = TableRecord::from_buffer(&entry);
    /// assert_eq!(tag, Tag::CMAP);
    /// assert_eq!(record.offset, 256);
    /// assert_eq!(record.length, 2560);
    /// ```
    pub fn from_buffer(buf: &[u8; TableRecord::SIZE]) -> (Tag, Self) {
        let tag = Tag([buf[0], buf[1], buf[2], buf[3]]);
        let record = Self {
            offset: u32::from_be_bytes([buf[8], buf[9], buf[10], buf[11]]),
            length: u32::from_be_bytes([buf[12], buf[13], buf[14], buf[15]]),
        };
        (tag, record)
    }

    /// Absolute offset of the first byte after this table
    pub fn end(&self) -> u64 {
        u64::from(self.offset) + u64::from(self.length)
    }
}

/// The font's table directory, mapping every tag to where its table lives
#[derive(Debug)]
pub struct TableDirectory {
    pub offset: OffsetTable,
    records: BTreeMap<Tag, TableRecord>,
}

impl TableDirectory {
    /// Reads the offset table followed by `num_tables` directory entries.
    ///
    /// Duplicate tags keep the entry that appears last on disk.
    ///
    /// # Errors
    ///
    /// Fails with `UnexpectedEndOfData` when the file is shorter than its
    /// directory claims to be.
    pub fn from_reader<B: Read + Seek>(
        reader: &mut GlyphBufReader<B>,
    ) -> Result<Self, GlyphBufReaderError> {
        let offset_table = OffsetTable::from_reader(reader)?;

        let mut records = BTreeMap::new();
        for _ in 0..offset_table.num_tables() {
            let mut entry = [0u8; TableRecord::SIZE];
            entry.copy_from_slice(&reader.read_bytes(TableRecord::SIZE)?);

            let (tag, record) = TableRecord::from_buffer(&entry);
            records.insert(tag, record);
        }

        log::debug!(
            "table directory has {} entries: {}",
            records.len(),
            records
                .keys()
                .map(Tag::to_string)
                .collect::<Vec<_>>()
                .join(", ")
        );

        Ok(Self {
            offset: offset_table,
            records,
        })
    }

    pub fn get(&self, tag: Tag) -> Option<TableRecord> {
        self.records.get(&tag).copied()
    }

    pub fn contains(&self, tag: Tag) -> bool {
        self.records.contains_key(&tag)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
