use std::{fs::File, io::Write};

use flate2::{Compression, write::GzEncoder};

use crate::{
    error::Error,
    variant::{AlleleCall, VariantSource},
};

use super::{VcfFile, VcfReader};

const HEADER: &str = "##fileformat=VCFv4.2\n##contig=<ID=chr1>\n##FORMAT=<ID=GT,Number=1,Type=String,Description=\"Genotype\">\n#CHROM\tPOS\tID\tREF\tALT\tQUAL\tFILTER\tINFO\tFORMAT\tHG01\tHG02\n";

fn read_all(body: &str) -> Vec<crate::error::Result<crate::variant::VariantRecord>> {
    let input = format!("{HEADER}{body}");
    VcfReader::new(input.as_bytes()).unwrap().collect()
}

#[test]
fn test_sample_names() {
    let reader = VcfReader::new(HEADER.as_bytes()).unwrap();
    assert_eq!(reader.sample_names(), ["HG01", "HG02"]);
}

#[test]
fn test_parse_records() {
    let records = read_all(
        "chr1\t3\t.\tG\tT\t.\tPASS\t.\tGT\t0|1\t1|1\nchr1\t5\trs7\tA\tAGT\t50\tPASS\tDP=3\tGT:DP\t1/0:7\t0/0:2\n",
    );
    assert_eq!(records.len(), 2);

    let first = records[0].as_ref().unwrap();
    assert_eq!(first.sequence_name, "chr1");
    assert_eq!(first.position, 2);
    assert_eq!(first.alleles, ["G", "T"]);
    assert_eq!(
        first.genotypes,
        [
            [AlleleCall::Index(0), AlleleCall::Index(1)],
            [AlleleCall::Index(1), AlleleCall::Index(1)]
        ]
    );

    let second = records[1].as_ref().unwrap();
    assert_eq!(second.position, 4);
    assert_eq!(second.reference_allele(), "A");
    assert_eq!(second.alternate_allele(), "AGT");
    assert_eq!(
        second.genotypes,
        [
            [AlleleCall::Index(1), AlleleCall::Index(0)],
            [AlleleCall::Index(0), AlleleCall::Index(0)]
        ]
    );
}

#[test]
fn test_allele_counts() {
    let records = read_all(
        "chr1\t1\t.\tA\t.\t.\t.\t.\tGT\t0|0\t0|0\nchr1\t2\t.\tA\tC,G\t.\t.\t.\tGT\t0|2\t1|0\n",
    );
    let monomorphic = records[0].as_ref().unwrap();
    assert_eq!(monomorphic.alleles, ["A"]);
    assert!(!monomorphic.is_biallelic());

    let multi_allelic = records[1].as_ref().unwrap();
    assert_eq!(multi_allelic.alleles, ["A", "C", "G"]);
    assert!(!multi_allelic.is_biallelic());
}

#[test]
fn test_missing_and_haploid_calls() {
    let records = read_all(
        "chr1\t7\t.\tC\tT\t.\t.\t.\tGT\t./.\t1\nchr1\t8\t.\tC\tT\t.\t.\t.\tGT:DP\t.\t0|1/1\n",
    );
    let record = records[0].as_ref().unwrap();
    assert_eq!(
        record.genotypes,
        [
            vec![AlleleCall::Missing, AlleleCall::Missing],
            vec![AlleleCall::Index(1)]
        ]
    );
    assert!(!AlleleCall::Missing.is_reference());

    // A lone `.` stands for an unknown diploid genotype, ploidy is kept per sample.
    let record = records[1].as_ref().unwrap();
    assert_eq!(
        record.genotypes,
        [
            vec![AlleleCall::Missing, AlleleCall::Missing],
            vec![AlleleCall::Index(0), AlleleCall::Index(1), AlleleCall::Index(1)]
        ]
    );
}

#[test]
fn test_absent_genotype_subfield_is_unknown() {
    let records = read_all("chr1\t7\t.\tC\tT\t.\t.\t.\tDP:GT\t3\t4:1|0\n");
    assert_eq!(
        records[0].as_ref().unwrap().genotypes,
        [
            [AlleleCall::Missing, AlleleCall::Missing],
            [AlleleCall::Index(1), AlleleCall::Index(0)]
        ]
    );
}

#[test]
fn test_without_genotype_key() {
    let records = read_all("chr1\t7\t.\tC\tT\t.\t.\t.\tDP\t3\t4\nchr1\t8\t.\tC\tT\t.\t.\t.\n");
    assert!(records[0].as_ref().unwrap().genotypes.is_empty());
    assert!(records[1].as_ref().unwrap().genotypes.is_empty());
}

#[test]
fn test_invalid_position() {
    let records = read_all("chr1\tx\t.\tC\tT\t.\t.\t.\tGT\t0|0\t0|0\nchr1\t0\t.\tC\tT\t.\t.\t.\tGT\t0|0\t0|0\n");
    // The header spans four lines.
    assert!(matches!(records[0], Err(Error::VcfRecord { line: 5, .. })));
    assert!(matches!(records[1], Err(Error::VcfRecord { line: 6, .. })));
}

#[test]
fn test_too_few_columns() {
    let records = read_all("chr1\t7\t.\tC\tT\nchr1\t8\t.\tC\tT\t.\t.\nchr1\t9\t.\tC\tT\t.\t.\t.\n");
    assert!(matches!(records[0], Err(Error::VcfRecord { line: 5, .. })));
    assert!(matches!(records[1], Err(Error::VcfRecord { line: 6, .. })));
    // Sites-only records have no genotype columns.
    assert!(records[2].as_ref().unwrap().genotypes.is_empty());
}

#[test]
fn test_invalid_genotype() {
    let records = read_all("chr1\t7\t.\tC\tT\t.\t.\t.\tGT\t0|x\t0|0\n");
    assert!(matches!(records[0], Err(Error::Parser { .. })));
}

#[test]
fn test_missing_header() {
    let result = VcfReader::new("chr1\t7\t.\tC\tT\t.\t.\t.\n".as_bytes());
    assert!(matches!(result, Err(Error::VcfHeader(_))));
}

#[test]
fn test_gzipped_file_is_rescanned() {
    let directory = tempfile::tempdir().unwrap();
    let path = directory.path().join("variants.vcf.gz");
    let mut encoder = GzEncoder::new(File::create(&path).unwrap(), Compression::default());
    write!(encoder, "{HEADER}chr1\t3\t.\tG\tT\t.\t.\t.\tGT\t0|1\t0|0\n").unwrap();
    encoder.finish().unwrap();

    let vcf = VcfFile::open(&path).unwrap();
    assert_eq!(vcf.sample_names(), ["HG01", "HG02"]);
    for _ in 0..2 {
        let records = vcf.scan().unwrap().collect::<Result<Vec<_>, _>>().unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].position, 2);
    }
}

#[test]
fn test_missing_file() {
    let result = VcfFile::open("does/not/exist.vcf");
    assert!(matches!(result, Err(Error::SourceOpen { .. })));
}
