use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use lib_vcf2msa::{
    config::ProjectionConfig,
    filter::FilterStatistics,
    projection::project_references,
    reference::open_fasta,
    sink::create_file_sinks,
    variant::{VariantSource, vcf::VcfFile},
};
use log::info;

/// Project the variants of a sorted vcf file onto a reference to create per-haplotype aligned fasta files.
///
/// For each sample in the vcf file, the files `{sample}_1.fa` and `{sample}_2.fa` are written
/// into the current working directory.
#[derive(Parser)]
pub struct Cli {
    /// The reference fasta file, may be gzipped.
    reference: PathBuf,

    /// The vcf file, sorted by position, may be gzipped or bgzipped.
    variants: PathBuf,
}

pub fn cli(cli: Cli) -> Result<()> {
    run(&cli, &ProjectionConfig::default())?;
    Ok(())
}

/// Run the projection with the given configuration.
///
/// Returns the name and variant statistics of each reference sequence.
pub fn run(cli: &Cli, config: &ProjectionConfig) -> Result<Vec<(String, FilterStatistics)>> {
    info!("Loading vcf file {:?}", cli.variants);
    let variants = VcfFile::open(&cli.variants)
        .with_context(|| format!("Failure to read vcf file {:?}", cli.variants))?;

    info!("Loading reference file {:?}", cli.reference);
    let references = open_fasta(&cli.reference)
        .with_context(|| format!("Failure to read fasta file {:?}", cli.reference))?;

    let mut sinks = create_file_sinks(variants.sample_names(), config)?;
    let summary = project_references(references, &variants, &mut sinks, config)?;
    sinks.release()?;

    info!(
        "Projected {} sequences onto {} haplotypes",
        summary.len(),
        sinks.len()
    );
    Ok(summary)
}
