//! Range header parsing.
//!
//! Single-range subset of RFC 7233, enough for resumable downloads of the
//! served assets. Multi-range and non-byte units are ignored and the full
//! body is returned instead.

/// One byte range resolved against a known file size.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ByteRange {
    /// First byte position, inclusive.
    pub start: usize,
    /// Last byte position, inclusive.
    pub end: usize,
}

impl ByteRange {
    /// Number of bytes the 206 body carries. For test validation only.
    #[cfg(test)]
    pub const fn byte_count(&self) -> usize {
        self.end - self.start + 1
    }
}

/// What to do with a request after looking at its Range header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RangeOutcome {
    /// Serve the given slice as 206 Partial Content.
    Partial(ByteRange),
    /// Range cannot be satisfied, respond 416.
    Unsatisfiable,
    /// No usable Range header, serve the full body.
    Full,
}

/// Parse a Range header value against the file size.
///
/// Accepted forms: `bytes=start-end`, `bytes=start-`, `bytes=-suffix`.
/// Anything else (wrong unit, multiple ranges, garbage) degrades to
/// [`RangeOutcome::Full`] rather than an error, matching how lenient
/// servers treat malformed ranges.
pub fn evaluate(range_header: Option<&str>, file_size: usize) -> RangeOutcome {
    let Some(spec) = range_header.and_then(|h| h.strip_prefix("bytes=")) else {
        return RangeOutcome::Full;
    };

    if spec.contains(',') {
        return RangeOutcome::Full;
    }

    let Some((start_str, end_str)) = spec.split_once('-') else {
        return RangeOutcome::Full;
    };
    let (start_str, end_str) = (start_str.trim(), end_str.trim());

    if start_str.is_empty() {
        return suffix_range(end_str, file_size);
    }

    bounded_range(start_str, end_str, file_size)
}

/// `bytes=-N`: the last N bytes of the file.
fn suffix_range(suffix_str: &str, file_size: usize) -> RangeOutcome {
    let Ok(suffix) = suffix_str.parse::<usize>() else {
        return RangeOutcome::Full;
    };

    if suffix == 0 || file_size == 0 {
        return RangeOutcome::Unsatisfiable;
    }

    // A suffix longer than the file selects the whole file.
    RangeOutcome::Partial(ByteRange {
        start: file_size.saturating_sub(suffix),
        end: file_size - 1,
    })
}

/// `bytes=start-` or `bytes=start-end`.
fn bounded_range(start_str: &str, end_str: &str, file_size: usize) -> RangeOutcome {
    let Ok(start) = start_str.parse::<usize>() else {
        return RangeOutcome::Full;
    };

    if start >= file_size {
        return RangeOutcome::Unsatisfiable;
    }

    let end = if end_str.is_empty() {
        file_size - 1
    } else {
        match end_str.parse::<usize>() {
            // End positions past EOF are clamped, not rejected.
            Ok(e) => e.min(file_size - 1),
            Err(_) => return RangeOutcome::Full,
        }
    };

    if start > end {
        return RangeOutcome::Unsatisfiable;
    }

    RangeOutcome::Partial(ByteRange { start, end })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn absent_header_serves_full_body() {
        assert_eq!(evaluate(None, 100), RangeOutcome::Full);
    }

    #[test]
    fn bounded_range_is_inclusive() {
        let outcome = evaluate(Some("bytes=0-9"), 100);
        assert_eq!(
            outcome,
            RangeOutcome::Partial(ByteRange { start: 0, end: 9 })
        );
        if let RangeOutcome::Partial(r) = outcome {
            assert_eq!(r.byte_count(), 10);
        }
    }

    #[test]
    fn open_ended_range_runs_to_eof() {
        assert_eq!(
            evaluate(Some("bytes=50-"), 100),
            RangeOutcome::Partial(ByteRange { start: 50, end: 99 })
        );
    }

    #[test]
    fn end_past_eof_is_clamped() {
        assert_eq!(
            evaluate(Some("bytes=90-500"), 100),
            RangeOutcome::Partial(ByteRange { start: 90, end: 99 })
        );
    }

    #[test]
    fn suffix_range_selects_tail() {
        assert_eq!(
            evaluate(Some("bytes=-20"), 100),
            RangeOutcome::Partial(ByteRange { start: 80, end: 99 })
        );
    }

    #[test]
    fn oversized_suffix_selects_whole_file() {
        assert_eq!(
            evaluate(Some("bytes=-500"), 100),
            RangeOutcome::Partial(ByteRange { start: 0, end: 99 })
        );
    }

    #[test]
    fn start_past_eof_is_unsatisfiable() {
        assert_eq!(evaluate(Some("bytes=200-"), 100), RangeOutcome::Unsatisfiable);
        assert_eq!(evaluate(Some("bytes=-0"), 100), RangeOutcome::Unsatisfiable);
    }

    #[test]
    fn malformed_ranges_degrade_to_full() {
        assert_eq!(evaluate(Some("bytes=a-b"), 100), RangeOutcome::Full);
        assert_eq!(evaluate(Some("bytes=0-9,20-29"), 100), RangeOutcome::Full);
        assert_eq!(evaluate(Some("items=0-9"), 100), RangeOutcome::Full);
    }
}
