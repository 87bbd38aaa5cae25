use std::io::{self, BufReader, Read, Seek, SeekFrom};

use thiserror::Error;

macro_rules! impl_read {
    ($fn_name:ident, $typ:ty) => {
        pub fn $fn_name(&mut self) -> Result<$typ, GlyphBufReaderError> {
            let mut buf = [0u8; size_of::<$typ>()];
            self.fill(&mut buf)?;

            Ok(<$typ>::from_be_bytes(buf))
        }
    };
}

/// Represents the possible errors that can occur when using `GlyphBufReader`.
#[derive(Error, Debug)]
pub enum GlyphBufReaderError {
    /// Fewer bytes were left in the source than a read asked for.
    /// Nothing is zero-filled; the read is abandoned.
    #[error("Unexpected end of data, needed {requested} more bytes")]
    UnexpectedEndOfData { requested: usize },

    /// An error occurred during a read operation on the underlying buffer.
    /// This variant transparently wraps `std::io::Error`.
    #[error(transparent)]
    ReadError(#[from] io::Error),

    /// An error occurred during a seek operation on the underlying buffer.
    /// This variant contains the `std::io::Error` that caused the seek failure.
    #[error("Failed to seek, error context: {0}")]
    FailedToSeek(io::Error),
}

/// A Struct which encapsulates and provides a robust API
/// for reading big-endian font data out of a seekable buffer
pub struct GlyphBufReader<B: Read + Seek> {
    inner: BufReader<B>,
}

impl<B> GlyphBufReader<B>
where
    B: Read + Seek,
{
    /// Returns a new buf reader from anything which implements read and seek,
    /// the most obvious use case would be a File
    /// but an in-memory `Cursor` works just as well
    pub fn from_buffer(buffer: B) -> Self {
        Self {
            inner: BufReader::new(buffer),
        }
    }

    /// Seeks to a specific place in the buffer
    /// from the start of the file
    ///
    /// # Examples
    ///
    /// ```
    /// use std::io::Cursor;
    /// use glyphmap::buffer::GlyphBufReader;
    ///
    /// let data = vec![0, 0, 0, 10, 0, 0, 0, 20]; // Two u32 values: 10 and 20 in big-endian
    /// let mut reader = GlyphBufReader::from_buffer(Cursor::new(data));
    ///
    /// reader.seek_to(4).unwrap();
    /// assert_eq!(reader.read_u32().unwrap(), 20);
    /// ```
    pub fn seek_to(&mut self, pos: u64) -> Result<(), GlyphBufReaderError> {
        self.inner
            .seek(SeekFrom::Start(pos))
            .map_err(GlyphBufReaderError::FailedToSeek)?;

        Ok(())
    }

    /// Skips n bytes from the CURRENT cursor positon
    ///
    /// # Examples
    ///
    /// ```
    /// use std::io::Cursor;
    /// use glyphmap::buffer::GlyphBufReader;
    ///
    /// let data = vec![0, 0, 0, 10, 0, 0, 0, 20];
    /// let mut reader = GlyphBufReader::from_buffer(Cursor::new(data));
    ///
    /// assert_eq!(reader.read_u32().unwrap(), 10);
    /// reader.skip(4).unwrap();
    ///
    /// // Nothing left to read
    /// assert!(reader.read_u32().is_err());
    /// ```
    pub fn skip(&mut self, n: i64) -> Result<(), GlyphBufReaderError> {
        self.inner
            .seek_relative(n)
            .map_err(GlyphBufReaderError::FailedToSeek)?;

        Ok(())
    }

    /// Returns the absolute position of the cursor
    pub fn position(&mut self) -> Result<u64, GlyphBufReaderError> {
        self.inner
            .stream_position()
            .map_err(GlyphBufReaderError::FailedToSeek)
    }

    /// Reads exactly `n` bytes.
    ///
    /// The length usually comes straight out of the font, so the buffer is
    /// grown as bytes arrive instead of being allocated up front.
    pub fn read_bytes(&mut self, n: usize) -> Result<Vec<u8>, GlyphBufReaderError> {
        let mut buf = Vec::new();
        let read = (&mut self.inner).take(n as u64).read_to_end(&mut buf)?;

        if read < n {
            return Err(GlyphBufReaderError::UnexpectedEndOfData {
                requested: n - read,
            });
        }

        Ok(buf)
    }

    fn fill(&mut self, buf: &mut [u8]) -> Result<(), GlyphBufReaderError> {
        let requested = buf.len();
        self.inner.read_exact(buf).map_err(|err| match err.kind() {
            io::ErrorKind::UnexpectedEof => GlyphBufReaderError::UnexpectedEndOfData { requested },
            _ => GlyphBufReaderError::ReadError(err),
        })
    }

    impl_read!(read_i32, i32);
    impl_read!(read_u32, u32);
    impl_read!(read_i16, i16);
    impl_read!(read_u16, u16);
    impl_read!(read_u8, u8);
}
