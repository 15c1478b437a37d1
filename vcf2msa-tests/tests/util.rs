use std::path::{Path, PathBuf};

use anyhow::Result;
use clap::Parser;
use lib_vcf2msa::{config::ProjectionConfig, filter::FilterStatistics};
use vcf2msa::project;

/// The path to a file in the `test_files` directory at the repository root.
pub fn test_file(name: &str) -> PathBuf {
    // working directory is this crate, a.k.a. "[...]/vcf2msa/vcf2msa-tests"
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("..")
        .join("test_files")
        .join(name)
}

/// Run the cli on the given test files, writing its output into `output_directory`.
pub fn run_projection(
    reference: &str,
    variants: &str,
    output_directory: &Path,
) -> Result<Vec<(String, FilterStatistics)>> {
    let cli = project::Cli::try_parse_from([
        PathBuf::from("vcf2msa"),
        test_file(reference),
        test_file(variants),
    ])?;
    let config = ProjectionConfig {
        output_directory: output_directory.to_path_buf(),
        ..Default::default()
    };

    project::run(&cli, &config)
}
