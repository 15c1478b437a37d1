//! Per-haplotype output destinations.

use std::{
    fmt::Display,
    fs::File,
    io::{BufWriter, Write},
};

use log::info;

use crate::{
    config::ProjectionConfig,
    error::{Error, Result},
};


#[derive(Debug, Clone, Copy, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub enum Haplotype {
    First,
    Second,
}

impl Haplotype {
    pub const ALL: [Self; 2] = [Self::First, Self::Second];

    /// The one-based number used in file names and fasta headers.
    pub fn number(self) -> usize {
        match self {
            Self::First => 1,
            Self::Second => 2,
        }
    }
}

impl Display for Haplotype {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.number())
    }
}

/// An append-only destination for the projected sequences of one haplotype of one sample.
pub trait HaplotypeSink {
    /// Start a new fasta record `>{sample}_{haplotype}.{sequence_name}`.
    fn emit_header(&mut self, sample: &str, haplotype: Haplotype, sequence_name: &str)
    -> Result<()>;

    fn append_span(&mut self, bytes: &[u8]) -> Result<()>;

    /// Terminate the current fasta record.
    fn finish(&mut self) -> Result<()>;

    /// Make all written data durable.
    fn release(&mut self) -> Result<()>;
}

impl<Writer: Write> HaplotypeSink for Writer {
    fn emit_header(
        &mut self,
        sample: &str,
        haplotype: Haplotype,
        sequence_name: &str,
    ) -> Result<()> {
        writeln!(self, ">{sample}_{haplotype}.{sequence_name}")?;
        Ok(())
    }

    fn append_span(&mut self, bytes: &[u8]) -> Result<()> {
        self.write_all(bytes)?;
        Ok(())
    }

    fn finish(&mut self) -> Result<()> {
        self.write_all(b"\n")?;
        Ok(())
    }

    fn release(&mut self) -> Result<()> {
        self.flush()?;
        Ok(())
    }
}

/// The two haplotype sinks of every sample, kept in sample order.
#[derive(Debug)]
pub struct HaplotypeSinks<Sink> {
    sample_names: Vec<String>,
    sinks: Vec<[Sink; 2]>,
}

impl<Sink: HaplotypeSink> HaplotypeSinks<Sink> {
    /// Create both sinks for every sample with `create`.
    pub fn from_fn(
        sample_names: &[String],
        mut create: impl FnMut(&str, Haplotype) -> Result<Sink>,
    ) -> Result<Self> {
        let sinks = sample_names
            .iter()
            .map(|sample| {
                Ok([
                    create(sample, Haplotype::First)?,
                    create(sample, Haplotype::Second)?,
                ])
            })
            .collect::<Result<_>>()?;

        Ok(Self {
            sample_names: sample_names.to_vec(),
            sinks,
        })
    }

    pub fn sample_names(&self) -> &[String] {
        &self.sample_names
    }

    /// The number of haplotype sinks, i.e. twice the number of samples.
    pub fn len(&self) -> usize {
        self.sinks.len() * 2
    }

    pub fn is_empty(&self) -> bool {
        self.sinks.is_empty()
    }

    pub fn get(&self, sample: &str, haplotype: Haplotype) -> Option<&Sink> {
        let index = self.sample_names.iter().position(|name| name == sample)?;
        Some(&self.sinks[index][haplotype.number() - 1])
    }

    /// Iterate over all sinks, sample-major and haplotype-minor.
    pub fn iter_mut(&mut self) -> impl Iterator<Item = (&str, Haplotype, &mut Sink)> {
        self.sample_names
            .iter()
            .zip(self.sinks.iter_mut())
            .flat_map(|(sample, sinks)| {
                Haplotype::ALL
                    .into_iter()
                    .zip(sinks)
                    .map(move |(haplotype, sink)| (sample.as_str(), haplotype, sink))
            })
    }

    pub fn emit_headers(&mut self, sequence_name: &str) -> Result<()> {
        for (sample, haplotype, sink) in self.iter_mut() {
            sink.emit_header(sample, haplotype, sequence_name)?;
        }
        Ok(())
    }

    pub fn release(&mut self) -> Result<()> {
        for (_, _, sink) in self.iter_mut() {
            sink.release()?;
        }
        Ok(())
    }

    pub fn into_sinks(self) -> impl Iterator<Item = (String, Haplotype, Sink)> {
        self.sample_names
            .into_iter()
            .zip(self.sinks)
            .flat_map(|(sample, sinks)| {
                Haplotype::ALL
                    .into_iter()
                    .zip(sinks)
                    .map(move |(haplotype, sink)| (sample.clone(), haplotype, sink))
            })
    }
}

pub type FileSink = BufWriter<File>;

/// Create the files `{sample}_1.{extension}` and `{sample}_2.{extension}` for every sample in the output directory.
pub fn create_file_sinks(
    sample_names: &[String],
    config: &ProjectionConfig,
) -> Result<HaplotypeSinks<FileSink>> {
    info!(
        "Creating {} haplotype files in {:?}",
        sample_names.len() * 2,
        config.output_directory
    );

    HaplotypeSinks::from_fn(sample_names, |sample, haplotype| {
        let path = config
            .output_directory
            .join(format!("{sample}_{haplotype}.{}", config.output_extension));
        let file = File::create(&path).map_err(|source| Error::SinkCreate { path, source })?;
        Ok(BufWriter::new(file))
    })
}
