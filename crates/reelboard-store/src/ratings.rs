use reelboard_core::error::{CoreError, Result};
use reelboard_core::types::RatingRecord;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};

/// The shared append-only ratings log.
///
/// `movie_id,rating,timestamp` rows, no header. Up to two independent
/// processes append (producer and submission handler); the aggregation engine
/// re-reads the whole file every cycle. Each append call serializes its whole
/// batch into one buffer and issues a single write on a freshly opened
/// append-mode handle, so a batch never produces a torn line even with a
/// concurrent appender.
#[derive(Debug, Clone)]
pub struct RatingsLog {
    path: PathBuf,
}

impl RatingsLog {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read every record currently in the log.
    ///
    /// A missing file means "no ratings yet" and returns an empty vec; any
    /// other IO failure or a malformed line is an error.
    pub fn read_all(&self) -> Result<Vec<RatingRecord>> {
        let data = match std::fs::read_to_string(&self.path) {
            Ok(data) => data,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!(path = %self.path.display(), "ratings log missing, treating as empty");
                return Ok(Vec::new());
            }
            Err(e) => return Err(e.into()),
        };

        let mut records = Vec::new();
        for (idx, line) in data.lines().enumerate() {
            if line.trim().is_empty() {
                continue;
            }
            records.push(self.parse_record(idx + 1, line)?);
        }
        Ok(records)
    }

    /// Append a batch of records as one atomic write.
    ///
    /// All records in the batch become visible together; callers rely on this
    /// for multi-genre submissions sharing one timestamp.
    pub fn append(&self, records: &[RatingRecord]) -> Result<()> {
        if records.is_empty() {
            return Ok(());
        }

        let mut buffer = String::new();
        for record in records {
            buffer.push_str(&format!(
                "{},{},{}\n",
                record.movie_id, record.rating, record.timestamp
            ));
        }

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        file.write_all(buffer.as_bytes())?;

        tracing::debug!(
            path = %self.path.display(),
            records = records.len(),
            "appended ratings"
        );
        Ok(())
    }

    fn parse_record(&self, line_no: usize, line: &str) -> Result<RatingRecord> {
        let mut fields = line.split(',');
        let (id, rating, timestamp) = match (fields.next(), fields.next(), fields.next(), fields.next()) {
            (Some(id), Some(rating), Some(ts), None) => (id, rating, ts),
            _ => return Err(self.parse_error(line_no, "expected 3 fields".into())),
        };

        Ok(RatingRecord {
            movie_id: id
                .trim()
                .parse()
                .map_err(|e| self.parse_error(line_no, format!("bad movie_id: {}", e)))?,
            rating: rating
                .trim()
                .parse()
                .map_err(|e| self.parse_error(line_no, format!("bad rating: {}", e)))?,
            timestamp: timestamp
                .trim()
                .parse()
                .map_err(|e| self.parse_error(line_no, format!("bad timestamp: {}", e)))?,
        })
    }

    fn parse_error(&self, line: usize, message: String) -> CoreError {
        CoreError::Parse {
            path: self.path.display().to_string(),
            line,
            message,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn setup() -> (RatingsLog, TempDir) {
        let dir = TempDir::new().unwrap();
        let log = RatingsLog::new(dir.path().join("ratings.csv"));
        (log, dir)
    }

    #[test]
    fn missing_log_reads_as_empty() {
        let (log, _dir) = setup();
        assert_eq!(log.read_all().unwrap(), Vec::new());
    }

    #[test]
    fn append_then_read_round_trips() {
        let (log, _dir) = setup();
        let records = vec![
            RatingRecord { movie_id: 1, rating: 7.5, timestamp: 1_700_000_000 },
            RatingRecord { movie_id: 2, rating: 9.0, timestamp: 1_700_000_001 },
        ];
        log.append(&records).unwrap();
        assert_eq!(log.read_all().unwrap(), records);
    }

    #[test]
    fn appends_accumulate() {
        let (log, _dir) = setup();
        let a = RatingRecord { movie_id: 1, rating: 5.0, timestamp: 10 };
        let b = RatingRecord { movie_id: 1, rating: 6.0, timestamp: 20 };
        log.append(std::slice::from_ref(&a)).unwrap();
        log.append(std::slice::from_ref(&b)).unwrap();
        assert_eq!(log.read_all().unwrap(), vec![a, b]);
    }

    #[test]
    fn empty_batch_does_not_create_file() {
        let (log, _dir) = setup();
        log.append(&[]).unwrap();
        assert!(!log.path().exists());
    }

    #[test]
    fn malformed_line_reports_line_number() {
        let (log, _dir) = setup();
        std::fs::write(log.path(), "1,7.5,100\n1,not-a-rating,200\n").unwrap();
        let err = log.read_all().unwrap_err();
        assert!(err.to_string().contains("line 2"), "{}", err);
    }

    #[test]
    fn blank_lines_are_skipped() {
        let (log, _dir) = setup();
        std::fs::write(log.path(), "1,7.5,100\n\n2,8.0,200\n").unwrap();
        assert_eq!(log.read_all().unwrap().len(), 2);
    }
}
