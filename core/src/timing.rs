use parking_lot::Mutex;
use std::io::Write;
use std::time::Duration;

/// Receives elapsed wall-clock time per operation. Never affects results.
pub trait TimingSink: Send + Sync {
    fn record(&self, op: &str, arg: &str, elapsed: Duration);
}

/// Writes `[benchmark] <op> <arg>: <ms>ms` lines.
pub struct BenchmarkLog<W: Write + Send> {
    out: Mutex<W>,
}

impl<W: Write + Send> BenchmarkLog<W> {
    pub fn new(out: W) -> Self { Self { out: Mutex::new(out) } }

    pub fn into_inner(self) -> W { self.out.into_inner() }
}

impl<W: Write + Send> TimingSink for BenchmarkLog<W> {
    fn record(&self, op: &str, arg: &str, elapsed: Duration) {
        let mut out = self.out.lock();
        let line = if arg.is_empty() {
            writeln!(out, "[benchmark] {op}: {}ms", elapsed.as_millis())
        } else {
            writeln!(out, "[benchmark] {op} {arg}: {}ms", elapsed.as_millis())
        };
        if let Err(e) = line {
            tracing::error!(error = %e, "cannot write benchmark log");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_operation_and_argument() {
        let log = BenchmarkLog::new(Vec::new());
        log.record("Read Doc", "a.txt", Duration::from_millis(12));
        log.record("Sort", "", Duration::from_millis(3));
        let text = String::from_utf8(log.into_inner()).unwrap();
        assert_eq!(text, "[benchmark] Read Doc a.txt: 12ms\n[benchmark] Sort: 3ms\n");
    }
}
