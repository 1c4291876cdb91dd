use crate::error::{GibbsError, GibbsResult};
use crate::seq::{SeqRecord, SequenceSet};
use std::fs::File;
use std::io::{BufRead, BufReader, Cursor};
use std::path::Path;

/// Streaming FASTA reader. Wrapped sequence lines are joined and whitespace dropped;
/// sequence bytes are not validated here.
pub struct FastaReader<R> {
    reader: R,
    line: String,
    line_no: usize,
    header: Option<(String, usize)>,
    done: bool,
}

impl<R: BufRead> FastaReader<R> {
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            line: String::new(),
            line_no: 0,
            header: None,
            done: false,
        }
    }

    fn read_line(&mut self) -> GibbsResult<bool> {
        self.line.clear();
        let n = self.reader.read_line(&mut self.line)?;
        if n > 0 {
            self.line_no += 1;
        }
        Ok(n > 0)
    }

    /// Skip blank lines up to the first header.
    fn first_header(&mut self) -> GibbsResult<Option<(String, usize)>> {
        while self.read_line()? {
            if self.line.starts_with('>') {
                return Ok(Some((self.line.clone(), self.line_no)));
            }
            if !self.line.trim().is_empty() {
                return Err(GibbsError::FastaFormat {
                    msg: "expected header line starting with '>'",
                    line: self.line_no,
                });
            }
        }
        Ok(None)
    }

    fn next_record(&mut self) -> GibbsResult<Option<SeqRecord>> {
        let (header, header_line) = match self.header.take() {
            Some(h) => h,
            None => match self.first_header()? {
                Some(h) => h,
                None => return Ok(None),
            },
        };
        let (id, desc) = parse_header(&header, header_line)?;

        let mut seq = Vec::new();
        while self.read_line()? {
            if self.line.starts_with('>') {
                self.header = Some((self.line.clone(), self.line_no));
                break;
            }
            seq.extend(self.line.bytes().filter(|b| !b.is_ascii_whitespace()));
        }

        Ok(Some(SeqRecord { id, desc, seq }))
    }
}

impl<R: BufRead> Iterator for FastaReader<R> {
    type Item = GibbsResult<SeqRecord>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        match self.next_record() {
            Ok(Some(record)) => Some(Ok(record)),
            Ok(None) => {
                self.done = true;
                None
            }
            Err(err) => {
                self.done = true;
                Some(Err(err))
            }
        }
    }
}

pub fn read_fasta_from_reader<R: BufRead>(reader: R) -> GibbsResult<Vec<SeqRecord>> {
    FastaReader::new(reader).collect()
}

pub fn read_fasta_from_path(path: impl AsRef<Path>) -> GibbsResult<Vec<SeqRecord>> {
    let file = File::open(path)?;
    read_fasta_from_reader(BufReader::new(file))
}

pub fn read_fasta_from_bytes(data: &[u8]) -> GibbsResult<Vec<SeqRecord>> {
    read_fasta_from_reader(Cursor::new(data))
}

/// Read and encode a FASTA file into a set ready for searching.
pub fn read_sequence_set(path: impl AsRef<Path>) -> GibbsResult<SequenceSet> {
    let records = read_fasta_from_path(path)?;
    SequenceSet::from_records(&records)
}

fn parse_header(line: &str, line_no: usize) -> GibbsResult<(Box<str>, Option<Box<str>>)> {
    let header = line
        .strip_prefix('>')
        .unwrap_or(line)
        .trim_end_matches(&['\n', '\r'][..])
        .trim_start();
    if header.is_empty() {
        return Err(GibbsError::FastaFormat {
            msg: "empty header",
            line: line_no,
        });
    }

    Ok(match header.split_once(char::is_whitespace) {
        Some((id, rest)) => {
            let desc = rest.trim();
            (id.into(), (!desc.is_empty()).then(|| desc.into()))
        }
        None => (header.into(), None),
    })
}
