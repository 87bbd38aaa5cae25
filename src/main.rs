use std::{
    fs::File,
    path::{Path, PathBuf},
    process::ExitCode,
};

use rayon::prelude::*;

use glyphmap::{
    GlyphMapError,
    catalogue::Catalogue,
    config::{FontOptions, ResolvedFont},
    extract_catalogue,
};

/// List the glyph catalogue of one or more icon fonts
#[derive(clap::Parser, Debug)]
struct Args {
    /// Namespace for fonts without an override
    #[arg(long, default_value = "Glyphs")]
    namespace: String,
    /// Class name override, only valid with a single font
    #[arg(long)]
    class_name: Option<String>,
    /// Font family alias override, only valid with a single font
    #[arg(long)]
    font_alias: Option<String>,
    /// Print string literal escapes instead of U+ codepoints
    #[arg(long)]
    escapes: bool,
    /// Paths to OpenType, TrueType or CFF flavored font files
    #[arg(required = true)]
    files: Vec<PathBuf>,
}

#[derive(Debug, thiserror::Error)]
enum FileError {
    #[error("failed to open: {0}")]
    Open(#[from] std::io::Error),
    #[error(transparent)]
    Parse(#[from] GlyphMapError),
}

fn read_font(path: &Path) -> Result<Catalogue, FileError> {
    let file = File::open(path)?;
    Ok(extract_catalogue(file)?)
}

fn print_catalogue(path: &Path, font: &ResolvedFont, catalogue: &Catalogue, escapes: bool) {
    println!(
        "{}: {}.{} (font alias {})",
        path.display(),
        font.namespace,
        font.class_name,
        font.font_alias
    );
    for (style, entries) in catalogue.groups() {
        let class_name = font.class_name_for_style(*style, catalogue.style_count());
        println!("  {class_name} [{} glyphs]", entries.len());
        for entry in entries {
            let codepoint = if escapes {
                entry.escaped()
            } else {
                format!("U+{:04X}", entry.codepoint)
            };
            println!("    {} {codepoint} {}", entry.constant_name, entry.raw_name);
        }
    }
}

fn main() -> ExitCode {
    env_logger::init();
    let args = <Args as clap::Parser>::parse();

    if args.files.len() > 1 && (args.class_name.is_some() || args.font_alias.is_some()) {
        log::error!("--class-name and --font-alias need exactly one font file");
        return ExitCode::FAILURE;
    }

    let options = FontOptions {
        class_name: args.class_name.clone(),
        namespace: None,
        font_alias: args.font_alias.clone(),
    };

    // each font gets its own file handle, results come back in input order
    let results = args
        .files
        .par_iter()
        .map(|path| (path, read_font(path)))
        .collect::<Vec<_>>();

    let mut failed = 0;
    for (path, result) in results {
        match result {
            Ok(catalogue) => {
                let stem = path
                    .file_stem()
                    .map(|stem| stem.to_string_lossy())
                    .unwrap_or_default();
                let font = options.resolve(&stem, &args.namespace);
                print_catalogue(path, &font, &catalogue, args.escapes);
            }
            Err(err) => {
                log::error!("{}: {err}", path.display());
                failed += 1;
            }
        }
    }

    if failed > 0 {
        log::error!("{failed} of {} fonts failed", args.files.len());
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}
