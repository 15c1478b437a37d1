//! Reading variant records from (optionally gzipped) vcf files.
//!
//! The header is parsed with `noodles-vcf` to obtain the sample names.
//! Data lines are parsed directly, only the columns required for projection are interpreted.

use std::{
    io::BufRead,
    path::{Path, PathBuf},
};

use log::{debug, info};
use nom::{
    IResult, Parser,
    branch::alt,
    character::complete::{char, digit1, one_of},
    combinator::{all_consuming, map_res, value},
    multi::separated_list1,
};

use crate::{
    error::{Error, Result},
    io::{is_any_line_break, open_input, translate_nom_error},
};

use super::{AlleleCall, VariantRecord, VariantSource};

#[cfg(test)]
mod tests;

const CHROM_COLUMN: usize = 0;
const POS_COLUMN: usize = 1;
const REF_COLUMN: usize = 3;
const ALT_COLUMN: usize = 4;
const FORMAT_COLUMN: usize = 8;
const MANDATORY_COLUMN_COUNT: usize = 8;
const GENOTYPE_KEY: &str = "GT";

/// A vcf file on disk that is reopened for every scan.
#[derive(Debug, Clone)]
pub struct VcfFile {
    path: PathBuf,
    sample_names: Vec<String>,
}

impl VcfFile {
    /// Open the file and read its header.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        info!("Reading vcf header of {path:?}");
        let reader = VcfReader::new(open_input(&path)?)?;
        let sample_names = reader.sample_names().to_vec();
        debug!("Found {} samples", sample_names.len());

        Ok(Self { path, sample_names })
    }
}

impl VariantSource for VcfFile {
    type Records<'source>
        = VcfReader<Box<dyn BufRead>>
    where
        Self: 'source;

    fn sample_names(&self) -> &[String] {
        &self.sample_names
    }

    fn scan(&self) -> Result<Self::Records<'_>> {
        debug!("Scanning vcf file {:?} from the start", self.path);
        VcfReader::new(open_input(&self.path)?)
    }
}

/// Iterates over the data lines of a vcf stream.
pub struct VcfReader<Reader: BufRead> {
    reader: Reader,
    sample_names: Vec<String>,
    line_number: usize,
    buffer: String,
}

impl<Reader: BufRead> VcfReader<Reader> {
    /// Consume and parse the header of the given stream.
    pub fn new(mut reader: Reader) -> Result<Self> {
        let mut header = String::new();
        let mut line_number = 0;

        loop {
            let buffer = reader.fill_buf()?;
            if buffer.first() != Some(&b'#') {
                break;
            }

            let line_start = header.len();
            reader.read_line(&mut header)?;
            line_number += 1;
            if header[line_start..].starts_with("#CHROM") {
                break;
            }
        }

        if header.is_empty() {
            return Err(Error::VcfHeader("the input contains no header".to_string()));
        }

        let header = header
            .parse::<noodles_vcf::Header>()
            .map_err(|error| Error::VcfHeader(error.to_string()))?;
        let sample_names = header.sample_names().iter().cloned().collect();

        Ok(Self {
            reader,
            sample_names,
            line_number,
            buffer: String::new(),
        })
    }

    pub fn sample_names(&self) -> &[String] {
        &self.sample_names
    }
}

impl<Reader: BufRead> Iterator for VcfReader<Reader> {
    type Item = Result<VariantRecord>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            self.buffer.clear();
            match self.reader.read_line(&mut self.buffer) {
                Ok(0) => return None,
                Ok(_) => self.line_number += 1,
                Err(error) => return Some(Err(error.into())),
            }

            let line = self.buffer.trim_end_matches(is_any_line_break);
            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            return Some(parse_record(line, self.line_number));
        }
    }
}

fn parse_record(line: &str, line_number: usize) -> Result<VariantRecord> {
    let record_error = |message: String| Error::VcfRecord {
        line: line_number,
        message,
    };

    let columns: Vec<&str> = line.split('\t').collect();
    if columns.len() < MANDATORY_COLUMN_COUNT {
        return Err(record_error(format!(
            "expected at least {MANDATORY_COLUMN_COUNT} columns, but found {}",
            columns.len()
        )));
    }

    let position: usize = columns[POS_COLUMN]
        .parse()
        .map_err(|error| record_error(format!("invalid POS '{}': {error}", columns[POS_COLUMN])))?;
    if position == 0 {
        return Err(record_error("POS must be at least 1".to_string()));
    }

    let mut alleles = vec![columns[REF_COLUMN].to_string()];
    if columns[ALT_COLUMN] != "." {
        alleles.extend(columns[ALT_COLUMN].split(',').map(str::to_string));
    }

    let mut genotypes = Vec::new();
    if let Some(format) = columns.get(FORMAT_COLUMN) {
        if let Some(genotype_index) = format.split(':').position(|key| key == GENOTYPE_KEY) {
            for sample in &columns[FORMAT_COLUMN + 1..] {
                let genotype = sample.split(':').nth(genotype_index).unwrap_or(".");
                genotypes.push(parse_genotype(genotype)?);
            }
        }
    }

    Ok(VariantRecord {
        sequence_name: columns[CHROM_COLUMN].to_string(),
        position: position - 1,
        alleles,
        genotypes,
    })
}

/// Parse a GT value such as `0|1`, `1/1`, `./.` or `0`.
///
/// A lone `.` marks the whole genotype as unknown and yields two missing calls.
fn parse_genotype(input: &str) -> Result<Vec<AlleleCall>> {
    if input == "." {
        return Ok(vec![AlleleCall::Missing; 2]);
    }

    all_consuming(separated_list1(one_of("/|"), parse_allele_call))
        .parse(input)
        .map(|(_, calls)| calls)
        .map_err(translate_nom_error)
}

fn parse_allele_call(input: &str) -> IResult<&str, AlleleCall> {
    alt((
        map_res(digit1, |digits: &str| digits.parse().map(AlleleCall::Index)),
        value(AlleleCall::Missing, char('.')),
    ))
    .parse(input)
}
