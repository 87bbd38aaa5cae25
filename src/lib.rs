use std::io::{Read, Seek};

use buffer::{GlyphBufReader, GlyphBufReaderError};
use catalogue::{Catalogue, CatalogueBuilder};
use tables::{
    TableDirectory, Tag,
    cff::{self, CffError},
    cmap::Cmap,
    post::{self, GlyphNames},
};
use thiserror::Error;

pub mod buffer;
pub mod catalogue;
pub mod config;
pub mod tables;

#[cfg(test)]
mod test_data;

/// Which lookup came back with nothing in it
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EmptyTable {
    GlyphNames,
    Codepoints,
}

/// Everything that can stop one font from producing a catalogue.
/// None of these concern any other font being processed.
#[derive(Debug, Error)]
pub enum GlyphMapError {
    #[error("Required table '{0}' is missing")]
    MissingRequiredTable(Tag),

    #[error("Unsupported '{table}' table: {detail}")]
    UnsupportedFormat { table: Tag, detail: String },

    #[error("Unexpected end of data, needed {requested} more bytes")]
    UnexpectedEndOfData { requested: usize },

    #[error("No {0} were found")]
    EmptyResult(EmptyTable),

    #[error("No glyph names survived normalization")]
    NoGlyphsMatched,

    #[error(transparent)]
    Io(GlyphBufReaderError),
}

impl std::fmt::Display for EmptyTable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Self::GlyphNames => "glyph names",
            Self::Codepoints => "mapped codepoints",
        })
    }
}

impl From<GlyphBufReaderError> for GlyphMapError {
    fn from(err: GlyphBufReaderError) -> Self {
        match err {
            GlyphBufReaderError::UnexpectedEndOfData { requested } => {
                Self::UnexpectedEndOfData { requested }
            }
            other => Self::Io(other),
        }
    }
}

impl GlyphMapError {
    fn from_cff(err: CffError) -> Self {
        match err {
            CffError::Read(err) => err.into(),
            CffError::Unsupported(detail) => Self::UnsupportedFormat {
                table: Tag::CFF,
                detail,
            },
        }
    }
}

/// Builds the glyph catalogue of one font.
///
/// Names come from `post` when it is version 2, otherwise from `CFF `.
/// Codepoints come from the best format 12 or format 4 `cmap` subtable.
/// Each style group of the result is sorted by constant name.
///
/// # Errors
///
/// Fails if `cmap` is missing, if no names can be found in either `post` or
/// `CFF `, if either lookup is empty, if nothing survives normalization, or
/// if the file is truncated.
pub fn extract_catalogue<B: Read + Seek>(buffer: B) -> Result<Catalogue, GlyphMapError> {
    let mut reader = GlyphBufReader::from_buffer(buffer);
    let directory = TableDirectory::from_reader(&mut reader)?;

    let cmap_record = directory
        .get(Tag::CMAP)
        .ok_or(GlyphMapError::MissingRequiredTable(Tag::CMAP))?;

    let names = read_glyph_names(&mut reader, &directory)?;
    if names.is_empty() {
        return Err(GlyphMapError::EmptyResult(EmptyTable::GlyphNames));
    }

    let cmap = Cmap::from_reader(&mut reader, &cmap_record)?;
    let codepoints = cmap
        .codepoints(&mut reader)?
        .ok_or_else(|| GlyphMapError::UnsupportedFormat {
            table: Tag::CMAP,
            detail: "no format 4 or format 12 subtable".into(),
        })?;
    if codepoints.is_empty() {
        return Err(GlyphMapError::EmptyResult(EmptyTable::Codepoints));
    }

    log::debug!(
        "joining {} codepoints with {} glyph names",
        codepoints.len(),
        names.len()
    );

    let mut builder = CatalogueBuilder::new();
    builder.extend_from_tables(&codepoints, &names);
    let mut catalogue = builder.finish();
    if catalogue.is_empty() {
        return Err(GlyphMapError::NoGlyphsMatched);
    }

    catalogue.sort_by_constant_name();
    Ok(catalogue)
}

/// Prefers `post` names, falling back to `CFF ` when `post` has none
fn read_glyph_names<B: Read + Seek>(
    reader: &mut GlyphBufReader<B>,
    directory: &TableDirectory,
) -> Result<GlyphNames, GlyphMapError> {
    let post_record = directory.get(Tag::POST);
    let post_names = match post_record {
        Some(record) => post::read_glyph_names(reader, &record)?,
        None => None,
    };

    match (post_names, directory.get(Tag::CFF)) {
        (Some(names), _) if !names.is_empty() => Ok(names),
        (_, Some(record)) => {
            log::debug!("post table has no glyph names, reading CFF charset");
            cff::read_glyph_names(reader, &record).map_err(GlyphMapError::from_cff)
        }
        (Some(names), None) => Ok(names),
        (None, None) if post_record.is_some() => Err(GlyphMapError::UnsupportedFormat {
            table: Tag::POST,
            detail: "only version 2 carries glyph names".into(),
        }),
        (None, None) => Err(GlyphMapError::MissingRequiredTable(Tag::POST)),
    }
}
