use crate::error::Result;

pub mod vcf;

/// A single allele call of a genotype.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum AlleleCall {
    /// The index into the alleles of the record, where 0 is the reference allele.
    Index(usize),
    /// The call is unknown (`.` in vcf).
    Missing,
}

impl AlleleCall {
    /// Only index 0 selects the reference allele, all other calls including missing ones select the alternate allele.
    pub fn is_reference(self) -> bool {
        self == Self::Index(0)
    }
}

#[derive(Debug, Clone, Eq, PartialEq)]
pub struct VariantRecord {
    /// The name of the reference sequence this variant belongs to.
    pub sequence_name: String,
    /// Zero-based offset into the reference sequence.
    pub position: usize,
    /// The reference allele followed by all alternate alleles.
    pub alleles: Vec<String>,
    /// The allele calls of each sample column, in sample order.
    pub genotypes: Vec<Vec<AlleleCall>>,
}

impl VariantRecord {
    pub fn new(
        sequence_name: impl Into<String>,
        position: usize,
        alleles: impl IntoIterator<Item = impl Into<String>>,
        genotypes: impl IntoIterator<Item = impl IntoIterator<Item = AlleleCall>>,
    ) -> Self {
        Self {
            sequence_name: sequence_name.into(),
            position,
            alleles: alleles.into_iter().map(Into::into).collect(),
            genotypes: genotypes
                .into_iter()
                .map(|calls| calls.into_iter().collect())
                .collect(),
        }
    }

    pub fn reference_allele(&self) -> &str {
        self.alleles.first().map(String::as_str).unwrap_or_default()
    }

    pub fn alternate_allele(&self) -> &str {
        self.alleles.get(1).map(String::as_str).unwrap_or_default()
    }

    /// True if the record has exactly one reference and one alternate allele.
    pub fn is_biallelic(&self) -> bool {
        self.alleles.len() == 2
    }
}

/// An ordered source of variant records that can be scanned from its beginning repeatedly.
pub trait VariantSource {
    type Records<'source>: Iterator<Item = Result<VariantRecord>>
    where
        Self: 'source;

    fn sample_names(&self) -> &[String];

    /// Start a fresh pass over all records, ordered by sequence and position.
    fn scan(&self) -> Result<Self::Records<'_>>;
}

/// Variant records held in memory.
#[derive(Debug, Clone, Default)]
pub struct VariantList {
    sample_names: Vec<String>,
    records: Vec<VariantRecord>,
}

impl VariantList {
    pub fn new(
        sample_names: impl IntoIterator<Item = impl Into<String>>,
        records: impl IntoIterator<Item = VariantRecord>,
    ) -> Self {
        Self {
            sample_names: sample_names.into_iter().map(Into::into).collect(),
            records: records.into_iter().collect(),
        }
    }
}

impl VariantSource for VariantList {
    type Records<'source>
        = std::iter::Map<
        std::iter::Cloned<std::slice::Iter<'source, VariantRecord>>,
        fn(VariantRecord) -> Result<VariantRecord>,
    >
    where
        Self: 'source;

    fn sample_names(&self) -> &[String] {
        &self.sample_names
    }

    fn scan(&self) -> Result<Self::Records<'_>> {
        Ok(self
            .records
            .iter()
            .cloned()
            .map(Ok as fn(VariantRecord) -> Result<VariantRecord>))
    }
}
