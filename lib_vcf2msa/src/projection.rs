//! Projection of variant records onto a reference sequence.
//!
//! For every haplotype of every sample, the reference sequence is copied into the haplotype's sink,
//! substituting the allele selected by the haplotype's genotype at each accepted variant.
//! Indels are padded with gap characters, so all haplotypes of a sequence stay column-aligned.

use log::{debug, info, trace, warn};

use crate::{
    allele::AlignedAllelePair,
    config::ProjectionConfig,
    error::{Error, Result},
    filter::{FilterStatistics, SkipReason, VariantFilter, Verdict},
    reference::ReferenceSequence,
    sink::{Haplotype, HaplotypeSink, HaplotypeSinks},
    variant::{VariantRecord, VariantSource},
};


/// The state of projecting variants onto a single reference sequence.
struct ProjectionSession<'reference, 'sinks, Sink> {
    reference: &'reference ReferenceSequence,
    sinks: &'sinks mut HaplotypeSinks<Sink>,
    gap_character: u8,
    filter: VariantFilter<'reference>,
    /// The end of the last reference span written to the sinks.
    processed_position: usize,
}

impl<'reference, 'sinks, Sink: HaplotypeSink> ProjectionSession<'reference, 'sinks, Sink> {
    fn start(
        reference: &'reference ReferenceSequence,
        sinks: &'sinks mut HaplotypeSinks<Sink>,
        config: &ProjectionConfig,
    ) -> Result<Self> {
        sinks.emit_headers(&reference.name)?;

        Ok(Self {
            reference,
            sinks,
            gap_character: config.gap_character,
            filter: VariantFilter::new(&reference.name),
            processed_position: 0,
        })
    }

    fn is_complete(&self) -> bool {
        self.processed_position >= self.reference.len()
    }

    /// Every declared sample needs exactly one call per haplotype, and no undeclared sample column may carry calls.
    fn check_genotypes(&self, record: &VariantRecord) -> Result<()> {
        let sample_count = self.sinks.sample_names().len();

        for sample in 0..sample_count.max(record.genotypes.len()) {
            let expected = if sample < sample_count {
                Haplotype::ALL.len()
            } else {
                0
            };
            let actual = record.genotypes.get(sample).map_or(0, Vec::len);

            if actual != expected {
                return Err(Error::GenotypeCountMismatch {
                    sequence: self.reference.name.clone(),
                    position: record.position,
                    sample,
                    expected,
                    actual,
                });
            }
        }

        Ok(())
    }

    fn project_variant(&mut self, record: &VariantRecord) -> Result<()> {
        let reference = self.reference;

        self.check_genotypes(record)?;

        if record.position >= reference.len() {
            return Err(Error::VariantOutOfBounds {
                sequence: reference.name.clone(),
                position: record.position,
                length: reference.len(),
            });
        }

        let reference_allele = record.reference_allele().as_bytes();
        let alleles = AlignedAllelePair::align(
            reference_allele,
            record.alternate_allele().as_bytes(),
            self.gap_character,
            &reference.name,
            record.position,
        )?;

        let reference_end = record.position + reference_allele.len();
        let covered = &reference.bases[record.position..reference_end.min(reference.len())];
        if !covered.eq_ignore_ascii_case(reference_allele) {
            warn!(
                "Reference allele {} of variant at {}:{} does not match the reference {}",
                record.reference_allele(),
                reference.name,
                record.position,
                String::from_utf8_lossy(covered),
            );
            self.filter.record_reference_mismatch();
        }

        let unchanged = &reference.bases[self.processed_position..record.position];
        let calls = record.genotypes.iter().flatten();
        for ((_, _, sink), call) in self.sinks.iter_mut().zip(calls) {
            sink.append_span(unchanged)?;
            sink.append_span(alleles.select(call.is_reference()))?;
        }

        self.processed_position = reference_end;
        Ok(())
    }

    fn finish(self) -> Result<FilterStatistics> {
        let reference = self.reference;
        let suffix = &reference.bases[self.processed_position.min(reference.len())..];
        for (_, _, sink) in self.sinks.iter_mut() {
            sink.append_span(suffix)?;
            sink.finish()?;
        }

        let statistics = self.filter.into_statistics();
        info!("{}: {statistics}", reference.name);
        if statistics.reference_mismatches > 0 {
            warn!(
                "{}: {} accepted variants did not match the reference",
                reference.name, statistics.reference_mismatches
            );
        }
        Ok(statistics)
    }
}

/// Project the variants of one reference sequence into all haplotype sinks.
///
/// The variants must be sorted by position within the reference sequence.
/// Once a variant of this reference sequence was seen, the first variant of another sequence ends the projection,
/// as all variants of a sequence are expected to be consecutive.
pub fn project_sequence<Sink: HaplotypeSink>(
    reference: &ReferenceSequence,
    variants: impl IntoIterator<Item = Result<VariantRecord>>,
    sinks: &mut HaplotypeSinks<Sink>,
    config: &ProjectionConfig,
) -> Result<FilterStatistics> {
    debug!(
        "Projecting onto {} of length {}",
        reference.name,
        reference.len()
    );
    let mut session = ProjectionSession::start(reference, sinks, config)?;
    let mut variants = variants.into_iter();

    while !session.is_complete() {
        let Some(record) = variants.next() else {
            break;
        };
        let record = record?;

        match session
            .filter
            .evaluate(&record, session.processed_position)
        {
            Verdict::Accept => session.project_variant(&record)?,
            Verdict::Reject(SkipReason::OtherSequence) if session.filter.has_observed() => {
                trace!(
                    "Variants of {} end before {}:{}",
                    reference.name, record.sequence_name, record.position
                );
                break;
            }
            Verdict::Reject(reason) => trace!(
                "Skipping variant at {}:{} ({reason:?})",
                record.sequence_name, record.position
            ),
        }
    }

    session.finish()
}

/// Project all reference sequences in order, scanning the variant source once per sequence.
///
/// Returns the name and filter statistics of each projected sequence.
pub fn project_references<Source: VariantSource, Sink: HaplotypeSink>(
    references: impl IntoIterator<Item = Result<ReferenceSequence>>,
    variants: &Source,
    sinks: &mut HaplotypeSinks<Sink>,
    config: &ProjectionConfig,
) -> Result<Vec<(String, FilterStatistics)>> {
    let mut summary = Vec::new();

    for reference in references {
        let reference = reference?;
        let statistics = project_sequence(&reference, variants.scan()?, sinks, config)?;
        summary.push((reference.name, statistics));
    }

    Ok(summary)
}
