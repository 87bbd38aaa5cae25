use std::{
    collections::BTreeMap,
    io::{Read, Seek},
};

use crate::buffer::{GlyphBufReader, GlyphBufReaderError};

use super::TableRecord;

/// The version tag of a `post` table which carries glyph names
pub const VERSION_2: u32 = 0x0002_0000;

/// Glyph index to glyph name, as recovered from `post` or `CFF `
pub type GlyphNames = BTreeMap<u16, String>;

/// Reads glyph names out of a [post table](https://learn.microsoft.com/en-us/typography/opentype/spec/post).
///
/// Only version 2 stores names per glyph. Every other version yields `None`
/// so the caller can look for names elsewhere.
///
/// Name indices below 258 resolve to the standard Macintosh ordering, the
/// rest index the Pascal strings stored after the index array. Only as many
/// strings are read as the largest index needs, and never past the end of
/// the table; indices pointing at strings that were not read, or at blank
/// names, are left out of the result.
pub fn read_glyph_names<B: Read + Seek>(
    reader: &mut GlyphBufReader<B>,
    record: &TableRecord,
) -> Result<Option<GlyphNames>, GlyphBufReaderError> {
    reader.seek_to(record.offset.into())?;

    let version = reader.read_u32()?;
    if version != VERSION_2 {
        log::debug!("post table version {version:#010x} carries no glyph names");
        return Ok(None);
    }

    // italicAngle through maxMemType1
    reader.skip(28)?;

    let num_glyphs = reader.read_u16()?;
    let mut name_indices = Vec::with_capacity(num_glyphs.into());
    for _ in 0..num_glyphs {
        name_indices.push(reader.read_u16()?);
    }

    let max_index = name_indices.iter().copied().max().unwrap_or(0);
    let custom_count = (usize::from(max_index) + 1).saturating_sub(MACINTOSH_NAMES.len());

    let mut custom_names = Vec::with_capacity(custom_count);
    while custom_names.len() < custom_count && reader.position()? < record.end() {
        let len = reader.read_u8()?;
        let bytes = reader.read_bytes(len.into())?;
        custom_names.push(String::from_utf8_lossy(&bytes).into_owned());
    }

    if custom_names.len() < custom_count {
        log::debug!(
            "post table ends after {} of {custom_count} custom names",
            custom_names.len()
        );
    }

    let mut names = GlyphNames::new();
    for (glyph, index) in name_indices.into_iter().enumerate() {
        let index = usize::from(index);
        let name = match MACINTOSH_NAMES.get(index) {
            Some(name) => *name,
            None => match custom_names.get(index - MACINTOSH_NAMES.len()) {
                Some(name) => name.as_str(),
                None => continue,
            },
        };

        if !name.trim().is_empty() {
            names.insert(glyph as u16, name.to_owned());
        }
    }

    Ok(Some(names))
}

// https://developer.apple.com/fonts/TrueType-Reference-Manual/RM06/Chap6post.html
#[rustfmt::skip]
pub(crate) const MACINTOSH_NAMES: [&str; 258] = [
    ".notdef", ".null", "nonmarkingreturn", "space", "exclam", "quotedbl", "numbersign",
    "dollar", "percent", "ampersand", "quotesingle", "parenleft", "parenright", "asterisk",
    "plus", "comma", "hyphen", "period", "slash", "zero", "one", "two", "three", "four",
    "five", "six", "seven", "eight", "nine", "colon", "semicolon", "less", "equal", "greater",
    "question", "at", "A", "B", "C", "D", "E", "F", "G", "H", "I", "J", "K", "L", "M", "N",
    "O", "P", "Q", "R", "S", "T", "U", "V", "W", "X", "Y", "Z", "bracketleft", "backslash",
    "bracketright", "asciicircum", "underscore", "grave", "a", "b", "c", "d", "e", "f", "g",
    "h", "i", "j", "k", "l", "m", "n", "o", "p", "q", "r", "s", "t", "u", "v", "w", "x", "y",
    "z", "braceleft", "bar", "braceright", "asciitilde", "Adieresis", "Aring", "Ccedilla",
    "Eacute", "Ntilde", "Odieresis", "Udieresis", "aacute", "agrave", "acircumflex",
    "adieresis", "atilde", "aring", "ccedilla", "eacute", "egrave", "ecircumflex", "edieresis",
    "iacute", "igrave", "icircumflex", "idieresis", "ntilde", "oacute", "ograve",
    "ocircumflex", "odieresis", "otilde", "uacute", "ugrave", "ucircumflex", "udieresis",
    "dagger", "degree", "cent", "sterling", "section", "bullet", "paragraph", "germandbls",
    "registered", "copyright", "trademark", "acute", "dieresis", "notequal", "AE", "Oslash",
    "infinity", "plusminus", "lessequal", "greaterequal", "yen", "mu", "partialdiff",
    "summation", "product", "pi", "integral", "ordfeminine", "ordmasculine", "Omega", "ae",
    "oslash", "questiondown", "exclamdown", "logicalnot", "radical", "florin", "approxequal",
    "Delta", "guillemotleft", "guillemotright", "ellipsis", "nonbreakingspace", "Agrave",
    "Atilde", "Otilde", "OE", "oe", "endash", "emdash", "quotedblleft", "quotedblright",
    "quoteleft", "quoteright", "divide", "lozenge", "ydieresis", "Ydieresis", "fraction",
    "currency", "guilsinglleft", "guilsinglright", "fi", "fl", "daggerdbl", "periodcentered",
    "quotesinglbase", "quotedblbase", "perthousand", "Acircumflex", "Ecircumflex", "Aacute",
    "Edieresis", "Egrave", "Iacute", "Icircumflex", "Idieresis", "Igrave", "Oacute",
    "Ocircumflex", "apple", "Ograve", "Uacute", "Ucircumflex", "Ugrave", "dotlessi",
    "circumflex", "tilde", "macron", "breve", "dotaccent", "ring", "cedilla", "hungarumlaut",
    "ogonek", "caron", "Lslash", "lslash", "Scaron", "scaron", "Zcaron", "zcaron", "brokenbar",
    "Eth", "eth", "Yacute", "yacute", "Thorn", "thorn", "minus", "multiply", "onesuperior",
    "twosuperior", "threesuperior", "onehalf", "onequarter", "threequarters", "franc",
    "Gbreve", "gbreve", "Idotaccent", "Scedilla", "scedilla", "Cacute", "cacute", "Ccaron",
    "ccaron", "dcroat",
];
