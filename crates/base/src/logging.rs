//! Backends for the `log` facade.
//!
//! Records are formatted as `<UTC timestamp> <LEVEL> <target>: <message>`.
//! The level threshold comes from the `RECORDER_LOG` environment variable
//! (`error`, `warn`, `info`, `debug`, `trace`, `off`), defaulting to `debug`
//! in debug builds and `info` otherwise.

use {
    anyhow::{Context, Result},
    log::{LevelFilter, Log, Metadata, Record},
    std::{
        env,
        fs::{self, File, OpenOptions},
        io::{self, Write},
        path::{Path, PathBuf},
        sync::Mutex,
        time::{SystemTime, UNIX_EPOCH},
    },
};

/// Environment variable holding the log level threshold.
pub const LOG_LEVEL_VAR: &str = "RECORDER_LOG";

/// UTC calendar time, to the second.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UtcTime {
    pub year: i64,
    pub month: u32,
    pub day: u32,
    pub hour: u64,
    pub minute: u64,
    pub second: u64,
}

impl UtcTime {
    pub fn now() -> Self {
        let secs = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs())
            .unwrap_or(0);
        Self::from_unix(secs)
    }

    pub fn from_unix(secs: u64) -> Self {
        let (year, month, day) = civil_from_days((secs / 86400) as i64);
        let time_of_day = secs % 86400;
        Self {
            year,
            month,
            day,
            hour: time_of_day / 3600,
            minute: (time_of_day % 3600) / 60,
            second: time_of_day % 60,
        }
    }

    /// `YYYY-MM-DD`
    pub fn date(&self) -> String {
        format!("{:04}-{:02}-{:02}", self.year, self.month, self.day)
    }

    /// `YYYY-MM-DDTHH:MM:SS`, or with `-` between the time fields when
    /// `file_safe` is set.
    pub fn timestamp(&self, file_safe: bool) -> String {
        let sep = if file_safe { '-' } else { ':' };
        format!(
            "{}T{:02}{sep}{:02}{sep}{:02}",
            self.date(),
            self.hour,
            self.minute,
            self.second
        )
    }
}

/// Current UTC time as `YYYY-MM-DDTHH:MM:SS`.
pub fn format_timestamp() -> String {
    UtcTime::now().timestamp(false)
}

/// Current UTC time as `YYYY-MM-DDTHH-MM-SS`, safe to embed in file names.
pub fn format_file_timestamp() -> String {
    UtcTime::now().timestamp(true)
}

/// Current UTC date as `YYYY-MM-DD`.
pub fn format_today() -> String {
    UtcTime::now().date()
}

// days since 1970-01-01 to (year, month, day), Howard Hinnant's algorithm
fn civil_from_days(z: i64) -> (i64, u32, u32) {
    let z = z + 719468;
    let era = if z >= 0 { z } else { z - 146096 } / 146097;
    let doe = (z - era * 146097) as u32;
    let yoe = (doe - doe / 1460 + doe / 36524 - doe / 146096) / 365;
    let y = yoe as i64 + era * 400;
    let doy = doe - (365 * yoe + yoe / 4 - yoe / 100);
    let mp = (5 * doy + 2) / 153;
    let d = doy - (153 * mp + 2) / 5 + 1;
    let m = if mp < 10 { mp + 3 } else { mp - 9 };
    let y = if m <= 2 { y + 1 } else { y };
    (y, m, d)
}

/// Level threshold from [`LOG_LEVEL_VAR`], or the build default when unset
/// or unparsable.
pub fn level_from_env() -> LevelFilter {
    env::var(LOG_LEVEL_VAR)
        .ok()
        .and_then(|value| value.trim().parse().ok())
        .unwrap_or(if cfg!(debug_assertions) {
            LevelFilter::Debug
        } else {
            LevelFilter::Info
        })
}

pub fn format_record(record: &Record) -> String {
    format!(
        "{} {:<5} {}: {}",
        format_timestamp(),
        record.level(),
        record.target(),
        record.args()
    )
}

/// Writes records to stdout.
pub struct StdoutLogger {
    level: LevelFilter,
}

impl StdoutLogger {
    pub fn new(level: LevelFilter) -> Self {
        Self { level }
    }
}

impl Log for StdoutLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            println!("{}", format_record(record));
        }
    }

    fn flush(&self) {
        io::stdout().flush().ok();
    }
}

// the log file for one day
struct DailyFile {
    dir: PathBuf,
    date: String,
    file: File,
}

impl DailyFile {
    fn open(dir: &Path, date: String) -> io::Result<Self> {
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(dir.join(format!("{date}.log")))?;
        Ok(Self {
            dir: dir.to_path_buf(),
            date,
            file,
        })
    }

    // switch to `today`'s file if the date moved on; keeps the old file on
    // failure
    fn roll(&mut self, today: String) {
        if today == self.date {
            return;
        }
        match Self::open(&self.dir, today.clone()) {
            Ok(next) => *self = next,
            Err(err) => eprintln!("could not open log file for {today}: {err}"),
        }
    }
}

/// Writes records to `<dir>/<YYYY-MM-DD>.log`, moving to a new file when
/// the UTC date changes.
pub struct FileLogger {
    level: LevelFilter,
    current: Mutex<DailyFile>,
}

impl FileLogger {
    pub fn new(dir: impl AsRef<Path>, level: LevelFilter) -> Result<Self> {
        let dir = dir.as_ref();
        fs::create_dir_all(dir)
            .with_context(|| format!("could not create log directory {}", dir.display()))?;
        let current = DailyFile::open(dir, format_today())
            .with_context(|| format!("could not open log file in {}", dir.display()))?;
        Ok(Self {
            level,
            current: Mutex::new(current),
        })
    }

    /// Path of the file records currently go to.
    pub fn current_path(&self) -> PathBuf {
        let current = self.current.lock().unwrap_or_else(|e| e.into_inner());
        current.dir.join(format!("{}.log", current.date))
    }
}

impl Log for FileLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let line = format!("{}\n", format_record(record));
        let mut current = self.current.lock().unwrap_or_else(|e| e.into_inner());
        current.roll(format_today());
        if let Err(err) = current.file.write_all(line.as_bytes()) {
            eprintln!("could not write log file: {err}");
            eprint!("{line}");
        }
    }

    fn flush(&self) {
        let mut current = self.current.lock().unwrap_or_else(|e| e.into_inner());
        current.file.flush().ok();
    }
}

/// Install a [`StdoutLogger`] at the [`level_from_env`] threshold. Later
/// calls are ignored.
pub fn init_stdout_logger() {
    let level = level_from_env();
    if log::set_boxed_logger(Box::new(StdoutLogger::new(level))).is_ok() {
        log::set_max_level(level);
    }
}

/// Install a [`FileLogger`] writing into `dir` at the [`level_from_env`]
/// threshold. Later calls are ignored once a logger is set.
pub fn init_file_logger(dir: impl AsRef<Path>) -> Result<()> {
    let level = level_from_env();
    let logger = FileLogger::new(dir, level)?;
    if log::set_boxed_logger(Box::new(logger)).is_ok() {
        log::set_max_level(level);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_civil_from_days() {
        assert_eq!(civil_from_days(0), (1970, 1, 1));
        assert_eq!(civil_from_days(11016), (2000, 2, 29));
        assert_eq!(civil_from_days(20088), (2024, 12, 31));
    }

    #[test]
    fn test_utc_time_formats() {
        // 2024-12-31T23:59:58
        let time = UtcTime::from_unix(20088 * 86400 + 86398);
        assert_eq!(time.date(), "2024-12-31");
        assert_eq!(time.timestamp(false), "2024-12-31T23:59:58");
        assert_eq!(time.timestamp(true), "2024-12-31T23-59-58");
    }

    #[test]
    fn test_daily_file_rolls_to_new_date() {
        let dir = std::env::temp_dir().join(format!("base-log-test-{}-roll", std::process::id()));
        let _ = fs::remove_dir_all(&dir);
        fs::create_dir_all(&dir).unwrap();

        let mut current = DailyFile::open(&dir, "1999-01-01".to_string()).unwrap();
        current.roll("1999-01-01".to_string());
        assert_eq!(current.date, "1999-01-01");

        current.roll("1999-01-02".to_string());
        assert_eq!(current.date, "1999-01-02");
        current.file.write_all(b"next day\n").unwrap();

        assert_eq!(fs::read_to_string(dir.join("1999-01-01.log")).unwrap(), "");
        assert_eq!(fs::read_to_string(dir.join("1999-01-02.log")).unwrap(), "next day\n");
        fs::remove_dir_all(&dir).ok();
    }
}
