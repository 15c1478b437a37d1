use std::path::PathBuf;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Unable to open input file {path:?}: {source}.")]
    SourceOpen {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Unable to create output file {path:?}: {source}.")]
    SinkCreate {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("An IO error occurred: {0}.")]
    Io(#[from] std::io::Error),

    #[error("The vcf header could not be parsed: {0}.")]
    VcfHeader(String),

    #[error("Malformed vcf record in line {line}: {message}.")]
    VcfRecord { line: usize, message: String },

    #[error("A parsing error of kind '{kind:?}' occurred when the remaining input was '{input}'.")]
    Parser {
        input: String,
        kind: nom::error::ErrorKind,
    },

    #[error("Parsing was unsuccessful due to incomplete input: {0:?}.")]
    ParserIncomplete(nom::Needed),

    #[error("Malformed fasta input: {0}.")]
    Fasta(String),

    /// `sample` is the index of the first sample column whose allele call count is off.
    #[error(
        "Genotype of sample column {sample} in sequence {sequence} at position {position} is not usable: expected {expected} allele calls, got {actual}."
    )]
    GenotypeCountMismatch {
        sequence: String,
        position: usize,
        sample: usize,
        expected: usize,
        actual: usize,
    },

    #[error("Empty allele in sequence {sequence} at position {position}.")]
    InvalidAllele { sequence: String, position: usize },

    #[error(
        "Variant in sequence {sequence} at position {position} starts beyond the sequence end {length}."
    )]
    VariantOutOfBounds {
        sequence: String,
        position: usize,
        length: usize,
    },
}
