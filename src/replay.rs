//! Recorded landmark frames, one JSON document per line.
//!
//! A line is either an array of landmark objects
//! (`[{"id": 11, "x": 0.41, "y": 0.32, "visibility": 0.97}, ...]`) or a flat
//! numeric array of `x, y, z, visibility` quadruples in joint order, the
//! layout the pose model emits. `[]` is a frame with nobody in it. Blank
//! lines and lines starting with `#` are skipped.

use serde::de::Error as _;
use serde::Deserialize;
use std::io::BufRead;

use crate::error::{Error, Result};
use crate::landmark::{self, Landmark};

/// Values per landmark in the flat layout.
pub const FLAT_STRIDE: usize = 4;

#[derive(Deserialize)]
#[serde(untagged)]
enum FrameLine {
    Landmarks(Vec<Landmark>),
    Flat(Vec<f32>),
}

/// Decode one frame. A flat array must hold whole `FLAT_STRIDE` rows.
pub fn parse_frame(line: &str) -> serde_json::Result<Vec<Landmark>> {
    Ok(match serde_json::from_str(line)? {
        FrameLine::Landmarks(landmarks) => landmarks,
        FrameLine::Flat(data) if data.len() % FLAT_STRIDE != 0 => {
            return Err(serde_json::Error::custom(format!(
                "flat frame has {} values, expected a multiple of {}",
                data.len(),
                FLAT_STRIDE
            )));
        }
        FrameLine::Flat(data) => landmark::from_flat(&data, FLAT_STRIDE),
    })
}

pub struct FrameReader<R> {
    reader: R,
    line: usize,
    buf: String,
}

impl<R: BufRead> FrameReader<R> {
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            line: 0,
            buf: String::new(),
        }
    }

    /// Line number of the most recently read frame.
    pub fn line(&self) -> usize {
        self.line
    }
}

impl<R: BufRead> Iterator for FrameReader<R> {
    type Item = Result<Vec<Landmark>>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            self.buf.clear();
            match self.reader.read_line(&mut self.buf) {
                Ok(0) => return None,
                Ok(_) => self.line += 1,
                Err(e) => return Some(Err(Error::Io(e))),
            }

            let text = self.buf.trim();
            if text.is_empty() || text.starts_with('#') {
                continue;
            }

            return Some(parse_frame(text).map_err(|source| Error::Frame {
                line: self.line,
                source,
            }));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_reads_both_layouts() {
        let input = "# session 1\n\
            [{\"id\": 11, \"x\": 0.4, \"y\": 0.3, \"visibility\": 0.9}]\n\
            \n\
            [0.1, 0.2, 0.0, 0.8, 0.3, 0.4, 0.0, 0.7]\n\
            []\n";
        let frames: Vec<_> = FrameReader::new(Cursor::new(input))
            .collect::<Result<Vec<_>>>()
            .unwrap();

        assert_eq!(frames.len(), 3);
        assert_eq!(frames[0][0].id, 11);
        assert_eq!(frames[0][0].visibility, Some(0.9));
        assert_eq!(frames[1].len(), 2);
        assert_eq!(frames[1][1].visibility, Some(0.7));
        assert!(frames[2].is_empty());
    }

    #[test]
    fn test_object_without_visibility() {
        let frame = parse_frame(r#"[{"id": 3, "x": 0.5, "y": 0.5, "z": -0.2}]"#).unwrap();
        assert_eq!(frame[0].visibility, None);
        assert_eq!(frame[0].z, -0.2);
    }

    #[test]
    fn test_bad_line_reports_line_number() {
        let input = "[]\n\n{not json}\n";
        let mut reader = FrameReader::new(Cursor::new(input));
        assert!(reader.next().unwrap().is_ok());
        match reader.next() {
            Some(Err(Error::Frame { line, .. })) => assert_eq!(line, 3),
            other => panic!("expected frame error, got {:?}", other.map(|r| r.is_ok())),
        }
    }

    #[test]
    fn test_partial_flat_row_rejected() {
        assert!(parse_frame("[0.1, 0.2, 0.0]").is_err());

        let input = "[0.1, 0.2, 0.0, 0.8]\n[0.1, 0.2, 0.0, 0.8, 0.3, 0.4]\n";
        let mut reader = FrameReader::new(Cursor::new(input));
        assert_eq!(reader.next().unwrap().unwrap().len(), 1);
        match reader.next() {
            Some(Err(Error::Frame { line, .. })) => assert_eq!(line, 2),
            other => panic!("expected frame error, got {:?}", other.map(|r| r.is_ok())),
        }
    }
}
