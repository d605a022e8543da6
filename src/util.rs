use std::fs::File;
use std::io::{self, BufRead, Read, Seek, SeekFrom};
use std::path::Path;

/// Path that stands for standard input.
pub const STDIN_PATH: &str = "-";

const GZIP_MAGIC: [u8; 2] = [0x1F, 0x8B];

pub fn looks_like_gzip<R: Read + Seek>(mut r: R) -> io::Result<bool> {
    let mut magic = [0u8; 2];
    let pos = r.stream_position()?;
    let n = r.read(&mut magic)?;
    r.seek(SeekFrom::Start(pos))?;
    Ok(n >= 2 && magic == GZIP_MAGIC)
}

/// Magic-byte check for streams that cannot seek (stdin); only peeks at the
/// buffer, nothing is consumed.
pub fn peek_gzip<R: BufRead>(r: &mut R) -> io::Result<bool> {
    let buf = r.fill_buf()?;
    Ok(buf.len() >= 2 && buf[..2] == GZIP_MAGIC)
}

pub fn open_file(path: &Path) -> io::Result<File> {
    File::open(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{BufReader, Cursor};

    #[test]
    fn gzip_magic_is_detected_without_consuming() {
        let mut plain = Cursor::new(b">a\nAC\n".to_vec());
        assert!(!looks_like_gzip(&mut plain).unwrap());
        assert_eq!(plain.position(), 0);

        let mut gz = BufReader::new(&[0x1F, 0x8B, 0x08, 0x00][..]);
        assert!(peek_gzip(&mut gz).unwrap());
        assert_eq!(gz.fill_buf().unwrap().len(), 4);
    }
}
