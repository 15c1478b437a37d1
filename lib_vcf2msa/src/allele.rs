//! Length-based alignment of a reference allele against an alternate allele.

use crate::error::{Error, Result};


/// A reference and an alternate allele, right-padded with gap characters to equal length.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct AlignedAllelePair {
    reference: Vec<u8>,
    alternate: Vec<u8>,
}

impl AlignedAllelePair {
    /// Pads the shorter of the two alleles on the right until both have the length of the longer one.
    ///
    /// No bases are compared, so this only aligns alleles that share their prefix,
    /// which is the usual vcf representation of indels.
    /// The location arguments are only used for error reporting.
    pub fn align(
        reference: &[u8],
        alternate: &[u8],
        gap_character: u8,
        sequence: &str,
        position: usize,
    ) -> Result<Self> {
        if reference.is_empty() || alternate.is_empty() {
            return Err(Error::InvalidAllele {
                sequence: sequence.to_string(),
                position,
            });
        }

        let length = reference.len().max(alternate.len());
        let mut reference = reference.to_vec();
        let mut alternate = alternate.to_vec();
        reference.resize(length, gap_character);
        alternate.resize(length, gap_character);

        Ok(Self {
            reference,
            alternate,
        })
    }

    pub fn reference(&self) -> &[u8] {
        &self.reference
    }

    pub fn alternate(&self) -> &[u8] {
        &self.alternate
    }

    /// Returns the padded reference allele if `is_reference` is true, and the padded alternate allele otherwise.
    pub fn select(&self, is_reference: bool) -> &[u8] {
        if is_reference {
            &self.reference
        } else {
            &self.alternate
        }
    }
}
