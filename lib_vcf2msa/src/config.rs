use std::path::PathBuf;

#[derive(Debug, Clone, Eq, PartialEq)]
pub struct ProjectionConfig {
    /// The character used to pad the shorter allele of an indel.
    pub gap_character: u8,

    /// The directory in which the haplotype fasta files are created.
    pub output_directory: PathBuf,

    /// The extension of the haplotype fasta files, without the leading dot.
    pub output_extension: String,
}

impl Default for ProjectionConfig {
    fn default() -> Self {
        Self {
            gap_character: b'-',
            output_directory: PathBuf::from("."),
            output_extension: "fa".to_string(),
        }
    }
}
