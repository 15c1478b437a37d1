use std::{
    io::{BufRead, Bytes, Read},
    path::Path,
};

use log::debug;

use crate::{
    error::{Error, Result},
    io::open_input,
};


/// A named reference sequence.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct ReferenceSequence {
    /// The fasta record id, i.e. the header up to the first whitespace.
    pub name: String,
    /// The remainder of the fasta header.
    pub comment: String,
    pub bases: Vec<u8>,
}

impl ReferenceSequence {
    pub fn new(name: impl Into<String>, bases: impl Into<Vec<u8>>) -> Self {
        Self {
            name: name.into(),
            comment: String::new(),
            bases: bases.into(),
        }
    }

    pub fn len(&self) -> usize {
        self.bases.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bases.is_empty()
    }
}

/// Open a (optionally gzipped) fasta file for streaming its records.
pub fn open_fasta(path: impl AsRef<Path>) -> Result<FastaReader<Box<dyn BufRead>>> {
    let path = path.as_ref();
    debug!("Opening fasta file {path:?}");
    Ok(FastaReader::new(open_input(path)?))
}

#[derive(Debug, Clone, Copy, Eq, PartialEq)]
enum State {
    FileStart,
    /// The `>` of the next record was consumed.
    RecordStart,
    Finished,
}

/// Reads one fasta record at a time.
pub struct FastaReader<Reader: Read> {
    input: CharacterIterator<Reader>,
    state: State,
}

impl<Reader: Read> FastaReader<Reader> {
    pub fn new(reader: Reader) -> Self {
        Self {
            input: CharacterIterator::new(reader),
            state: State::FileStart,
        }
    }

    /// Skip to the `>` of the first record.
    ///
    /// Returns false if the input contains no record.
    fn find_first_record(&mut self) -> Result<bool> {
        let mut newline = true;

        loop {
            match self.input.next().transpose()? {
                Some(Character::Newline) => newline = true,
                Some(Character::RecordStart) => {
                    return if newline {
                        Ok(true)
                    } else {
                        Err(Error::Fasta(
                            "first fasta record is not preceded by a newline character"
                                .to_string(),
                        ))
                    };
                }
                Some(Character::Other(c)) => {
                    newline = false;
                    if !c.is_ascii_whitespace() {
                        return Err(Error::Fasta(format!(
                            "found non-whitespace character before first fasta record: {}",
                            char::from(c)
                        )));
                    }
                }
                None => return Ok(false),
            }
        }
    }

    fn read_record(&mut self) -> Result<Option<ReferenceSequence>> {
        match self.state {
            State::Finished => return Ok(None),
            State::FileStart => {
                if !self.find_first_record()? {
                    self.state = State::Finished;
                    return Ok(None);
                }
            }
            State::RecordStart => {}
        }

        let mut id = Vec::new();
        let mut comment = Vec::new();
        let mut bases = Vec::new();

        let mut in_comment = false;
        'header: loop {
            match self.input.next().transpose()? {
                Some(Character::Newline) => break 'header,
                Some(Character::RecordStart) if in_comment => comment.push(b'>'),
                Some(Character::RecordStart) => id.push(b'>'),
                Some(Character::Other(c)) => {
                    if in_comment {
                        comment.push(c);
                    } else if c.is_ascii_whitespace() {
                        in_comment = true;
                    } else {
                        id.push(c);
                    }
                }
                None => {
                    self.state = State::Finished;
                    return Ok(Some(build_record(&id, &comment, bases)));
                }
            }
        }

        let mut newline = true;
        'sequence: loop {
            match self.input.next().transpose()? {
                Some(Character::Newline) => newline = true,
                Some(Character::RecordStart) if newline => {
                    self.state = State::RecordStart;
                    break 'sequence;
                }
                Some(Character::RecordStart) => bases.push(b'>'),
                Some(Character::Other(c)) => {
                    newline = false;
                    if !c.is_ascii_whitespace() {
                        bases.push(c);
                    }
                }
                None => {
                    self.state = State::Finished;
                    break 'sequence;
                }
            }
        }

        Ok(Some(build_record(&id, &comment, bases)))
    }
}

impl<Reader: Read> Iterator for FastaReader<Reader> {
    type Item = Result<ReferenceSequence>;

    fn next(&mut self) -> Option<Self::Item> {
        let result = self.read_record();
        if result.is_err() {
            self.state = State::Finished;
        }
        result.transpose()
    }
}

fn build_record(id: &[u8], comment: &[u8], bases: Vec<u8>) -> ReferenceSequence {
    let record = ReferenceSequence {
        name: String::from_utf8_lossy(id).into_owned(),
        comment: String::from_utf8_lossy(comment).trim().to_string(),
        bases,
    };
    debug!("Read fasta record {} of length {}", record.name, record.len());
    record
}

enum Character {
    Newline,
    RecordStart,
    Other(u8),
}

struct CharacterIterator<Reader: Read> {
    bytes: Bytes<Reader>,
}

impl<Reader: Read> CharacterIterator<Reader> {
    fn new(reader: Reader) -> Self {
        Self {
            bytes: reader.bytes(),
        }
    }
}

impl<Reader: Read> Iterator for CharacterIterator<Reader> {
    type Item = Result<Character>;

    fn next(&mut self) -> Option<Self::Item> {
        self.bytes.next().map(|result| {
            result
                .map(|c| match c {
                    b'\n' | b'\r' => Character::Newline,
                    b'>' => Character::RecordStart,
                    other => Character::Other(other),
                })
                .map_err(Error::from)
        })
    }
}
