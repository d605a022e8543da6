/// One FASTA or FASTQ record.
///
/// `header` is the whole header line without its `>`/`@` sigil; `qual` is
/// present only for FASTQ input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeqRecord {
    pub header: String,
    pub seq: Vec<u8>,
    pub qual: Option<Vec<u8>>,
}

impl SeqRecord {
    pub fn fasta(header: impl Into<String>, seq: impl Into<Vec<u8>>) -> Self {
        Self {
            header: header.into(),
            seq: seq.into(),
            qual: None,
        }
    }

    pub fn fastq(
        header: impl Into<String>,
        seq: impl Into<Vec<u8>>,
        qual: impl Into<Vec<u8>>,
    ) -> Self {
        Self {
            header: header.into(),
            seq: seq.into(),
            qual: Some(qual.into()),
        }
    }

    /// Header up to the first whitespace.
    pub fn id(&self) -> &str {
        self.header
            .split(char::is_whitespace)
            .next()
            .unwrap_or_default()
    }

    /// Header text after the first whitespace run, if any.
    pub fn desc(&self) -> Option<&str> {
        self.header
            .split_once(char::is_whitespace)
            .map(|(_, rest)| rest.trim())
            .filter(|d| !d.is_empty())
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.seq.len()
    }
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.seq.is_empty()
    }
}
