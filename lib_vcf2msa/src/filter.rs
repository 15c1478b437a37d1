use std::fmt::Display;

use crate::variant::VariantRecord;


#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum Verdict {
    Accept,
    Reject(SkipReason),
}

#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum SkipReason {
    /// The record belongs to a different reference sequence.
    OtherSequence,
    /// The record does not have exactly two alleles.
    MultiAllelic,
    /// The record starts inside the reference allele of a previously projected variant.
    Overlapping,
}

#[derive(Debug, Default, Clone, Eq, PartialEq)]
pub struct FilterStatistics {
    /// Records on the current reference sequence.
    pub observed: usize,
    pub accepted: usize,
    pub skipped_overlapping: usize,
    pub skipped_multi_allelic: usize,
    /// Records on other reference sequences, not part of `observed`.
    pub skipped_other_sequence: usize,
    /// Accepted records whose reference allele disagrees with the reference sequence.
    pub reference_mismatches: usize,
}

impl FilterStatistics {
    pub fn skipped(&self) -> usize {
        self.skipped_overlapping + self.skipped_multi_allelic
    }

    pub fn skip_percentage(&self) -> f64 {
        if self.observed == 0 {
            0.0
        } else {
            self.skipped() as f64 / self.observed as f64 * 100.0
        }
    }
}

impl Display for FilterStatistics {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "nvars: {}, skipped {} ({:.3}%)",
            self.observed,
            self.skipped(),
            self.skip_percentage()
        )
    }
}

/// Decides which variant records of one reference sequence are projected.
#[derive(Debug)]
pub struct VariantFilter<'name> {
    sequence_name: &'name str,
    statistics: FilterStatistics,
}

impl<'name> VariantFilter<'name> {
    pub fn new(sequence_name: &'name str) -> Self {
        Self {
            sequence_name,
            statistics: Default::default(),
        }
    }

    /// Evaluate the record against the end of the previously projected span.
    ///
    /// A record starting exactly at `processed_position` does not overlap.
    /// Rejected records never move `processed_position`.
    pub fn evaluate(&mut self, record: &VariantRecord, processed_position: usize) -> Verdict {
        if record.sequence_name != self.sequence_name {
            self.statistics.skipped_other_sequence += 1;
            return Verdict::Reject(SkipReason::OtherSequence);
        }

        self.statistics.observed += 1;

        if !record.is_biallelic() {
            self.statistics.skipped_multi_allelic += 1;
            Verdict::Reject(SkipReason::MultiAllelic)
        } else if record.position < processed_position {
            self.statistics.skipped_overlapping += 1;
            Verdict::Reject(SkipReason::Overlapping)
        } else {
            self.statistics.accepted += 1;
            Verdict::Accept
        }
    }

    pub fn record_reference_mismatch(&mut self) {
        self.statistics.reference_mismatches += 1;
    }

    /// True if a record of the current reference sequence was evaluated.
    pub fn has_observed(&self) -> bool {
        self.statistics.observed > 0
    }

    pub fn statistics(&self) -> &FilterStatistics {
        &self.statistics
    }

    pub fn into_statistics(self) -> FilterStatistics {
        self.statistics
    }
}
