//! `head` and `tail` over records instead of lines.

use std::collections::VecDeque;
use std::io::Write;
use std::str::FromStr;

use crate::error::StreamError;
use crate::reader::SeqReader;
use crate::writer::SeqWriter;

/// How many records `head` emits per file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeadCount {
    /// The first `n` records.
    First(usize),
    /// Every record except the last `n`.
    AllBut(usize),
}

impl Default for HeadCount {
    fn default() -> Self {
        HeadCount::First(10)
    }
}

impl FromStr for HeadCount {
    type Err = String;

    /// `N` or `-N`. `-0` is a zero count, so it prints nothing.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let parse = |t: &str| {
            t.parse::<usize>()
                .map_err(|e| format!("invalid record count '{s}': {e}"))
        };
        match s.strip_prefix('-') {
            Some(n) => parse(n).map(|n| match n {
                0 => HeadCount::First(0),
                n => HeadCount::AllBut(n),
            }),
            None => parse(s.strip_prefix('+').unwrap_or(s)).map(HeadCount::First),
        }
    }
}

/// Which records `tail` emits per file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TailCount {
    /// The last `n` records.
    Last(usize),
    /// Every record from the `n`-th (1-based) onward.
    From(usize),
}

impl Default for TailCount {
    fn default() -> Self {
        TailCount::Last(10)
    }
}

impl FromStr for TailCount {
    type Err = String;

    /// `N` or `+N`; negative counts are rejected. `+0` is a zero count, so
    /// it prints nothing.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.starts_with('-') {
            return Err(format!("can't have a negative number of records: '{s}'"));
        }
        let parse = |t: &str| {
            t.parse::<usize>()
                .map_err(|e| format!("invalid record count '{s}': {e}"))
        };
        match s.strip_prefix('+') {
            Some(n) => parse(n).map(|n| match n {
                0 => TailCount::Last(0),
                n => TailCount::From(n),
            }),
            None => parse(s).map(TailCount::Last),
        }
    }
}

/// Copy the head of one stream to `out`. Returns the number of records written.
pub fn head<W: Write>(
    reader: &mut SeqReader,
    count: HeadCount,
    out: &mut SeqWriter<W>,
) -> Result<u64, StreamError> {
    let mut written = 0u64;
    match count {
        HeadCount::First(n) => {
            for _ in 0..n {
                let Some(rec) = reader.read_record()? else {
                    break;
                };
                out.write(&rec)?;
                written += 1;
            }
        }
        HeadCount::AllBut(n) => {
            // Hold back the last `n` records seen; anything older is safe to emit.
            let mut held = VecDeque::with_capacity(n + 1);
            while let Some(rec) = reader.read_record()? {
                held.push_back(rec);
                if held.len() > n {
                    if let Some(old) = held.pop_front() {
                        out.write(&old)?;
                        written += 1;
                    }
                }
            }
        }
    }
    Ok(written)
}

/// Copy the tail of one stream to `out`. Returns the number of records written.
pub fn tail<W: Write>(
    reader: &mut SeqReader,
    count: TailCount,
    out: &mut SeqWriter<W>,
) -> Result<u64, StreamError> {
    let mut written = 0u64;
    match count {
        TailCount::From(start) => {
            let mut index = 0usize;
            while let Some(rec) = reader.read_record()? {
                index += 1;
                if index >= start {
                    out.write(&rec)?;
                    written += 1;
                }
            }
        }
        TailCount::Last(n) => {
            if n == 0 {
                // still drain, so read errors surface
                while reader.read_record()?.is_some() {}
                return Ok(0);
            }
            let mut window = VecDeque::with_capacity(n + 1);
            while let Some(rec) = reader.read_record()? {
                window.push_back(rec);
                if window.len() > n {
                    window.pop_front();
                }
            }
            for rec in &window {
                out.write(rec)?;
                written += 1;
            }
        }
    }
    Ok(written)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn head_counts_parse() {
        assert_eq!("5".parse::<HeadCount>(), Ok(HeadCount::First(5)));
        assert_eq!("-3".parse::<HeadCount>(), Ok(HeadCount::AllBut(3)));
        assert_eq!("-0".parse::<HeadCount>(), Ok(HeadCount::First(0)));
        assert!("x".parse::<HeadCount>().is_err());
    }

    #[test]
    fn tail_counts_parse() {
        assert_eq!("7".parse::<TailCount>(), Ok(TailCount::Last(7)));
        assert_eq!("+2".parse::<TailCount>(), Ok(TailCount::From(2)));
        assert_eq!("+0".parse::<TailCount>(), Ok(TailCount::Last(0)));
        assert_eq!("+1".parse::<TailCount>(), Ok(TailCount::From(1)));
        assert!("-1".parse::<TailCount>().is_err());
    }
}
