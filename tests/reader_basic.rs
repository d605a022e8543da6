use seqline::{FormatError, FormatHint, LineMode, ReaderOptions, SeqError, SeqReader};
use std::io::{self, BufReader, Read};

const FASTQ: &str = "\
@read1 desc
ACGTN
+
!!!!!
@read2
ACGT
+
####";

fn reader(text: &'static str, opts: ReaderOptions) -> SeqReader {
    SeqReader::from_bufread(BufReader::new(text.as_bytes()), opts)
}

#[test]
fn parse_two_fastq_records_single_line() {
    let mut fq = reader(
        FASTQ,
        ReaderOptions {
            format: FormatHint::Fastq,
            line_mode: LineMode::Single,
        },
    );

    let r1 = fq.next().unwrap().unwrap();
    assert_eq!(r1.header, "read1 desc");
    assert_eq!(r1.id(), "read1");
    assert_eq!(r1.desc(), Some("desc"));
    assert_eq!(r1.seq, b"ACGTN");
    assert_eq!(r1.qual.as_deref(), Some(&b"!!!!!"[..]));

    let r2 = fq.next().unwrap().unwrap();
    assert_eq!(r2.id(), "read2");
    assert_eq!(r2.desc(), None);
    assert_eq!(r2.seq, b"ACGT");
    assert_eq!(r2.qual.as_deref(), Some(&b"####"[..]));

    assert!(fq.next().is_none());
}

#[test]
fn multi_line_fastq_rejected_in_single_mode() {
    let bad = "\
@r1
ACG
T
+
####
";
    let mut fq = reader(
        bad,
        ReaderOptions {
            format: FormatHint::Auto,
            line_mode: LineMode::Single,
        },
    );
    // second seq line will cause MissingPlus error
    let err = fq.next().unwrap().unwrap_err();
    match err {
        SeqError::Format {
            source: FormatError::MissingPlus,
            ..
        } => {}
        other => panic!("expected missing '+' error, got {other}"),
    }
}

#[test]
fn multi_line_fastq_with_at_sign_in_quality() {
    let text = "\
@r1
ACG
T
+
@@
@@
@r2
A
+
I
";
    let recs: Vec<_> = reader(text, ReaderOptions::default())
        .collect::<Result<_, _>>()
        .unwrap();
    assert_eq!(recs.len(), 2);
    assert_eq!(recs[0].seq, b"ACGT");
    assert_eq!(recs[0].qual.as_deref(), Some(&b"@@@@"[..]));
    assert_eq!(recs[1].id(), "r2");
}

#[test]
fn quality_length_mismatch_is_an_error() {
    let bad = "\
@r1
ACGT
+
###
@r2
A
+
#";
    let mut fq = reader(
        bad,
        ReaderOptions {
            format: FormatHint::Fastq,
            line_mode: LineMode::Single,
        },
    );
    let err = fq.next().unwrap().unwrap_err();
    match err {
        SeqError::Format {
            source: FormatError::LengthMismatch { seq: 4, qual: 3 },
            ctx,
        } => assert_eq!(ctx.line_num, 4),
        other => panic!("expected length mismatch, got {other}"),
    }
}

#[test]
fn wrapped_fasta_is_joined() {
    let text = "\
>gene_1 human
ACGT
AC

>gene_2
GG
>empty
";
    let mut fa = reader(text, ReaderOptions::default());
    assert!(!fa.at_end().unwrap());

    let r1 = fa.read_record().unwrap().unwrap();
    assert_eq!(r1.header, "gene_1 human");
    assert_eq!(r1.seq, b"ACGTAC");
    assert_eq!(r1.qual, None);

    let r2 = fa.read_record().unwrap().unwrap();
    assert_eq!(r2.header, "gene_2");
    assert_eq!(r2.seq, b"GG");

    let r3 = fa.read_record().unwrap().unwrap();
    assert_eq!(r3.header, "empty");
    assert!(r3.is_empty());

    assert!(fa.at_end().unwrap());
    assert!(fa.read_record().unwrap().is_none());
}

#[test]
fn format_hint_restricts_input() {
    let mut only_fastq = reader(
        ">a\nAC\n",
        ReaderOptions {
            format: FormatHint::Fastq,
            line_mode: LineMode::Multi,
        },
    );
    assert!(matches!(
        only_fastq.next(),
        Some(Err(SeqError::Format {
            source: FormatError::FastaNotAllowed,
            ..
        }))
    ));

    let mut only_fasta = reader(
        FASTQ,
        ReaderOptions {
            format: FormatHint::Fasta,
            line_mode: LineMode::Multi,
        },
    );
    assert!(matches!(
        only_fasta.next(),
        Some(Err(SeqError::Format {
            source: FormatError::FastqNotAllowed,
            ..
        }))
    ));
}

#[test]
fn text_before_first_header_is_rejected() {
    let mut r = reader("ACGT\n>a\nAC\n", ReaderOptions::default());
    assert!(matches!(
        r.next(),
        Some(Err(SeqError::Format {
            source: FormatError::MissingHeader,
            ..
        }))
    ));
}

#[test]
fn empty_input_has_no_records() {
    let mut r = reader("\n\n", ReaderOptions::default());
    assert!(r.at_end().unwrap());
    assert!(r.next().is_none());
    r.close();
}

/// Hands out `data`, then fails every later read.
struct FailAfter {
    data: &'static [u8],
}

impl Read for FailAfter {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        if self.data.is_empty() {
            return Err(io::Error::other("device gone"));
        }
        let n = self.data.len().min(buf.len());
        buf[..n].copy_from_slice(&self.data[..n]);
        self.data = &self.data[n..];
        Ok(n)
    }
}

#[test]
fn io_error_reports_the_line_being_read() {
    let src = BufReader::new(FailAfter { data: b">a\nAC\n" });
    let mut r = SeqReader::from_bufread(src, ReaderOptions::default());
    match r.next() {
        Some(Err(SeqError::Io { ctx, .. })) => {
            assert_eq!(ctx.line_num, 3);
            assert_eq!(ctx.byte_pos, 6);
        }
        other => panic!("expected I/O error, got {other:?}"),
    }

    let first = BufReader::new(FailAfter { data: b"" });
    let mut r = SeqReader::from_bufread(first, ReaderOptions::default());
    assert!(matches!(
        r.next(),
        Some(Err(SeqError::Io { ctx, .. })) if ctx.line_num == 1
    ));
}

#[test]
fn trailing_whitespace_is_ignored_in_fastq() {
    let cases = [
        (LineMode::Multi, "@r1\nACG \nT\n+\n##\t\n## \n@r2\nAC\r\n+\nII \n"),
        (LineMode::Single, "@r1\nACGT \n+\n#### \n"),
    ];
    for (line_mode, text) in cases {
        let recs: Vec<_> = reader(
            text,
            ReaderOptions {
                format: FormatHint::Fastq,
                line_mode,
            },
        )
        .collect::<Result<_, _>>()
        .unwrap();
        assert_eq!(recs[0].seq, b"ACGT");
        assert_eq!(recs[0].qual.as_deref(), Some(&b"####"[..]));
    }
}

#[test]
fn raw_bytes_survive_in_sequences_and_headers() {
    let src = BufReader::new(&b">caf\xe9 x\nAC\xffT\n"[..]);
    let mut r = SeqReader::from_bufread(src, ReaderOptions::default());
    let rec = r.next().unwrap().unwrap();
    assert_eq!(rec.header, "caf\u{FFFD} x");
    assert_eq!(rec.id(), "caf\u{FFFD}");
    assert_eq!(rec.seq, b"AC\xffT");
}
