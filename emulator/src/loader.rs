use std::{
    fs, io,
    path::{Path, PathBuf},
};

use libisa::Word;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("couldn't read program image {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("{}:{line}: malformed byte literal {literal:?}", .path.display())]
    MalformedLiteral {
        path: PathBuf,
        line: usize,
        literal: String,
    },

    #[error("program image {} holds {len} bytes, memory holds {memory_size}", .path.display())]
    TooLarge {
        path: PathBuf,
        len: usize,
        memory_size: usize,
    },
}

/// Reads a program image into the byte array memory is initialized from.
///
/// One byte per line, written in decimal or 0b-prefixed binary. Everything
/// from the first '#' on a line is a comment; blank and comment-only lines
/// don't consume an address.
pub fn load_program(path: &Path) -> Result<Vec<Word>, LoadError> {
    let text = fs::read_to_string(path).map_err(|source| LoadError::Io {
        path: path.to_owned(),
        source,
    })?;

    parse_program(&text, path)
}

fn parse_program(text: &str, path: &Path) -> Result<Vec<Word>, LoadError> {
    let mut program = Vec::new();

    for (index, line) in text.lines().enumerate() {
        let literal = line.split('#').next().unwrap_or_default().trim();
        if literal.is_empty() {
            continue;
        }

        let value = parse_byte_literal(literal).ok_or_else(|| LoadError::MalformedLiteral {
            path: path.to_owned(),
            line: index + 1,
            literal: literal.to_owned(),
        })?;

        program.push(value);
    }

    if program.len() > libisa::MEMORY_SIZE {
        return Err(LoadError::TooLarge {
            path: path.to_owned(),
            len: program.len(),
            memory_size: libisa::MEMORY_SIZE,
        });
    }

    Ok(program)
}

fn parse_byte_literal(literal: &str) -> Option<Word> {
    match literal.strip_prefix("0b") {
        Some(digits) => Word::from_str_radix(digits, 2).ok(),
        None => literal.parse().ok(),
    }
}

#[cfg(test)]
mod tests {
    use std::path::Path;

    use libisa::Word;

    use super::{parse_program, LoadError};

    fn parse(text: &str) -> Result<Vec<Word>, LoadError> {
        parse_program(text, Path::new("test.img"))
    }

    #[test]
    fn parses_decimal_and_binary_literals() {
        let program = parse("130\n0b00001000\n1\n").unwrap();

        assert_eq!(program, [130, 8, 1]);
    }

    #[test]
    fn comments_and_blank_lines_consume_no_address() {
        let text = "# boot\n\n130  # ldi %0\n0\n8\n\n71  # prn %0\n0\n1\n";

        assert_eq!(parse(text).unwrap(), [130, 0, 8, 71, 0, 1]);
    }

    #[test]
    fn malformed_literal_reports_its_line() {
        match parse("130\nbanana\n") {
            Err(LoadError::MalformedLiteral { line, literal, .. }) => {
                assert_eq!(line, 2);
                assert_eq!(literal, "banana");
            }
            other => panic!("expected a malformed literal error, got {:?}", other),
        }
    }

    #[test]
    fn out_of_range_byte_is_malformed() {
        assert!(matches!(
            parse("300\n"),
            Err(LoadError::MalformedLiteral { line: 1, .. })
        ));
    }

    #[test]
    fn oversized_image_is_rejected() {
        let text = "0\n".repeat(libisa::MEMORY_SIZE + 1);

        assert!(matches!(parse(&text), Err(LoadError::TooLarge { .. })));
    }
}
