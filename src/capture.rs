//! Capture file reading
//!
//! A capture holds one sample per clock edge, as exported by a logic
//! analyzer's "SPI data" view:
//!
//! ```text
//! Time [s],Value
//! 0.000012500,0x0001
//! 0.000012600,0x0000
//! ```
//!
//! Fields may be separated by commas or whitespace. Blank lines and lines
//! starting with `#` are ignored, and a first line whose time field is not
//! a number is taken as a header. Timestamps are rebased so the first
//! sample is at 0 ns; the decoder only looks at differences.

use flashsniff_core::Sample;
use std::io::BufRead;
use thiserror::Error;

/// Errors while reading a capture
#[derive(Debug, Error)]
pub enum CaptureError {
    /// I/O error reading the capture
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Malformed sample line
    #[error("line {line}: {reason}")]
    Parse { line: usize, reason: String },

    /// Timestamp earlier than the previous sample
    #[error("line {line}: timestamp goes backwards")]
    NonMonotonic { line: usize },
}

/// Parse a value that can be hex (0x...) or decimal
fn parse_value(s: &str) -> Result<u16, String> {
    let value = if let Some(hex) = s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")) {
        u32::from_str_radix(hex, 16).map_err(|e| format!("invalid hex value: {}", e))?
    } else {
        s.parse::<u32>().map_err(|e| format!("invalid value: {}", e))?
    };
    u16::try_from(value).map_err(|_| format!("value 0x{:X} wider than 16 bits", value))
}

fn fields(line: &str) -> impl Iterator<Item = &str> {
    line.split(|c: char| c == ',' || c.is_whitespace())
        .filter(|f| !f.is_empty())
}

/// Split a line into its time and value fields
fn split_fields(line: &str) -> Result<(&str, &str), String> {
    let mut fields = fields(line);
    match (fields.next(), fields.next(), fields.next()) {
        (Some(time), Some(value), None) => Ok((time, value)),
        _ => Err(format!("expected 2 fields, got {:?}", line)),
    }
}

fn is_number(field: Option<&str>) -> bool {
    field.is_some_and(|f| f.parse::<f64>().is_ok())
}

/// Iterator over the samples of a capture
pub struct CaptureReader<R> {
    input: R,
    buf: String,
    line: usize,
    origin: Option<f64>,
    last_ns: u64,
}

impl<R: BufRead> CaptureReader<R> {
    /// Create a reader over buffered input
    pub fn new(input: R) -> Self {
        Self {
            input,
            buf: String::new(),
            line: 0,
            origin: None,
            last_ns: 0,
        }
    }

    fn parse_line(&mut self) -> Result<Option<Sample>, CaptureError> {
        let line_no = self.line;
        let text = self.buf.trim();
        if text.is_empty() || text.starts_with('#') {
            return Ok(None);
        }

        // Column titles may contain separators, so only the first field counts
        if self.origin.is_none() && !is_number(fields(text).next()) {
            log::debug!("Skipping header line: {}", text);
            return Ok(None);
        }

        let parse_err = |reason: String| CaptureError::Parse {
            line: line_no,
            reason,
        };
        let (time, value) = split_fields(text).map_err(parse_err)?;

        let seconds: f64 = time
            .parse()
            .map_err(|e| parse_err(format!("invalid time {:?}: {}", time, e)))?;
        if !seconds.is_finite() {
            return Err(parse_err(format!("invalid time {:?}", time)));
        }
        let raw = parse_value(value).map_err(parse_err)?;

        let origin = *self.origin.get_or_insert(seconds);
        let offset = (seconds - origin) * 1e9;
        if offset < 0.0 {
            return Err(CaptureError::NonMonotonic { line: line_no });
        }
        let time_ns = offset.round() as u64;
        if time_ns < self.last_ns {
            return Err(CaptureError::NonMonotonic { line: line_no });
        }
        self.last_ns = time_ns;

        Ok(Some(Sample::new(raw, time_ns)))
    }
}

impl<R: BufRead> Iterator for CaptureReader<R> {
    type Item = Result<Sample, CaptureError>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            self.buf.clear();
            match self.input.read_line(&mut self.buf) {
                Ok(0) => return None,
                Ok(_) => self.line += 1,
                Err(e) => return Some(Err(e.into())),
            }
            match self.parse_line() {
                Ok(Some(sample)) => return Some(Ok(sample)),
                Ok(None) => continue,
                Err(e) => return Some(Err(e)),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn read_all(text: &str) -> Result<Vec<Sample>, CaptureError> {
        CaptureReader::new(Cursor::new(text)).collect()
    }

    #[test]
    fn test_parse_value() {
        assert_eq!(parse_value("0x8001").unwrap(), 0x8001);
        assert_eq!(parse_value("3").unwrap(), 3);
        assert!(parse_value("0x10000").is_err());
        assert!(parse_value("x").is_err());
    }

    #[test]
    fn test_read_capture() {
        let text = "Time [s],Value\n\
                    # comment\n\
                    \n\
                    -0.000001,0x0001\n\
                    -0.0000009,0x0000\n\
                    0.0000001 0x8000\n";
        let samples = read_all(text).unwrap();
        assert_eq!(
            samples,
            vec![
                Sample::new(0x0001, 0),
                Sample::new(0x0000, 100),
                Sample::new(0x8000, 1100),
            ]
        );
    }

    #[test]
    fn test_header_with_spaced_titles() {
        let samples = read_all("Time [s],Value\n0.0,0x0001\n").unwrap();
        assert_eq!(samples, vec![Sample::new(0x0001, 0)]);

        let samples = read_all("Time [s]  Channel value\n1.5 2\n").unwrap();
        assert_eq!(samples, vec![Sample::new(2, 0)]);
    }

    #[test]
    fn test_bad_line_reports_number() {
        let err = read_all("0.0,1\n0.1,zz\n").unwrap_err();
        assert!(matches!(err, CaptureError::Parse { line: 2, .. }));
        assert!(err.to_string().starts_with("line 2:"));
    }

    #[test]
    fn test_header_only_on_first_data_line() {
        let err = read_all("0.0,1\ntime,value\n").unwrap_err();
        assert!(matches!(err, CaptureError::Parse { line: 2, .. }));
    }

    #[test]
    fn test_time_going_backwards() {
        let err = read_all("0.5,1\n0.4,1\n").unwrap_err();
        assert!(matches!(err, CaptureError::NonMonotonic { line: 2 }));
    }

    #[test]
    fn test_extra_field_rejected() {
        let err = read_all("0.0,1,2\n").unwrap_err();
        assert!(matches!(err, CaptureError::Parse { line: 1, .. }));
    }
}
