use crate::command::Command;
use anyhow::{Context, Result};
use stemdex::{Database, IndexBackend, QueryOutcome};
use std::io::{self, BufRead, Write};
use tracing::{error, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// Plain status lines.
    Text,
    /// One JSON object per line.
    Json,
}

/// Executes instructions from `input` until `END` or end of input.
pub fn run<B: IndexBackend>(
    db: &mut Database<B>,
    input: impl BufRead,
    out: &mut impl Write,
    format: OutputFormat,
) -> Result<()> {
    for line in input.lines() {
        let line = line.context("cannot read instruction")?;
        let cmd = match Command::parse(&line) {
            Ok(Some(Command::End)) => break,
            Ok(Some(cmd)) => cmd,
            Ok(None) => continue,
            Err(e) => {
                warn!(error = %e, "skipping instruction");
                continue;
            }
        };
        if let Err(e) = execute(db, &cmd, out, format) {
            error!(?cmd, error = %e, "cannot write output");
        }
    }
    out.flush().context("cannot flush output")
}

fn execute<B: IndexBackend>(
    db: &mut Database<B>,
    cmd: &Command,
    out: &mut impl Write,
    format: OutputFormat,
) -> io::Result<()> {
    match cmd {
        Command::ReadDoc(path) => {
            db.read_doc(path);
        }
        Command::ReadDocList(path) => {
            db.read_doc_list(path);
        }
        Command::ReadStopWords(path) => {
            db.read_stop_words(path);
        }
        Command::QueryWord { word, limit } => match format {
            OutputFormat::Text => db.write_query(word, *limit, out)?,
            OutputFormat::Json => write_json_outcome(db, &db.query_word(word, *limit), out)?,
        },
        Command::QueryList { path, limit } => match format {
            OutputFormat::Text => db.write_query_list(path, *limit, out)?,
            OutputFormat::Json => {
                for outcome in db.query_list(path, *limit).unwrap_or_default() {
                    write_json_outcome(db, &outcome, out)?;
                }
            }
        },
        Command::ShowInfo => match format {
            OutputFormat::Text => db.write_info(out)?,
            OutputFormat::Json => {
                serde_json::to_writer(&mut *out, &db.info())?;
                writeln!(out)?;
            }
        },
        Command::ShowTerms => match format {
            OutputFormat::Text => db.write_terms(out)?,
            OutputFormat::Json => {
                let terms = db.terms();
                serde_json::to_writer(&mut *out, &serde_json::json!({ "count": terms.len(), "terms": terms }))?;
                writeln!(out)?;
            }
        },
        Command::Sort => db.sort(),
        Command::End => {}
    }
    Ok(())
}

fn write_json_outcome<B: IndexBackend>(db: &Database<B>, outcome: &QueryOutcome<'_>, out: &mut impl Write) -> io::Result<()> {
    let mut value = serde_json::to_value(outcome)?;
    if let Some(check) = db.check(outcome) {
        value["verified"] = check.is_ok().into();
    }
    serde_json::to_writer(&mut *out, &value)?;
    writeln!(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Value;
    use stemdex::{Config, HashBackend, TrackingMode, TrieBackend};
    use std::fs;
    use std::io::Cursor;
    use tempfile::tempdir;

    fn session<B: IndexBackend>(db: &mut Database<B>, script: &str, format: OutputFormat) -> String {
        let mut out = Vec::new();
        run(db, Cursor::new(script), &mut out, format).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn text_session_until_end() {
        let dir = tempdir().unwrap();
        let a = dir.path().join("a.txt");
        let b = dir.path().join("b.txt");
        fs::write(&a, "the cat sat").unwrap();
        fs::write(&b, "cat cat").unwrap();
        fs::write(dir.path().join("list.txt"), format!("{}\n{}\n", a.display(), b.display())).unwrap();
        fs::write(dir.path().join("stop.txt"), "the").unwrap();
        let script = format!(
            "Read StopWord {dir}/stop.txt\nRead DocList {dir}/list.txt\n\nQuery Word cat\nSort\nQuery Word cat 1\n\
             Query Word the\nBogus line\nShow Info\nEND\nQuery Word sat\n",
            dir = dir.path().display()
        );

        let mut db: Database<TrieBackend> = Database::default();
        let text = session(&mut db, &script, OutputFormat::Text);
        assert_eq!(
            text,
            "[queryWord] Querying cat\n0 1\n1 2\n\
             [queryWord] Querying cat\n1 2\n\
             [queryWord] Querying the\n[queryWord] Can't Query Stop Word: the\n\
             [Info] Documents: 2\n[Info] Stop Words: 1\n\n"
        );
    }

    #[test]
    fn json_session_reports_verification() {
        let dir = tempdir().unwrap();
        let a = dir.path().join("a.txt");
        fs::write(&a, "bank bank river").unwrap();
        let script = format!("Read Doc {}\nQuery Word banks\nQuery Word zebra\nShow Term\n", a.display());

        let mut db: Database<HashBackend> =
            Database::new(Config { tracking: TrackingMode::Verifying, ..Config::default() });
        let text = session(&mut db, &script, OutputFormat::Json);
        let lines: Vec<Value> = text.lines().map(|l| serde_json::from_str(l).unwrap()).collect();

        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0]["status"], "found");
        assert_eq!(lines[0]["term"], "bank");
        assert_eq!(lines[0]["postings"][0]["freq"], 2);
        assert_eq!(lines[0]["verified"], true);
        assert_eq!(lines[1]["status"], "not_found");
        assert_eq!(lines[2]["count"], 2);
    }

    #[test]
    fn json_session_reports_changed_source() {
        let dir = tempdir().unwrap();
        let a = dir.path().join("a.txt");
        fs::write(&a, "bank bank").unwrap();

        let mut db: Database<TrieBackend> =
            Database::new(Config { tracking: TrackingMode::Verifying, ..Config::default() });
        session(&mut db, &format!("Read Doc {}\n", a.display()), OutputFormat::Json);
        fs::write(&a, "bank river").unwrap();
        let text = session(&mut db, "Query Word bank\n", OutputFormat::Json);
        let lines: Vec<Value> = text.lines().map(|l| serde_json::from_str(l).unwrap()).collect();

        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0]["postings"][0]["freq"], 2);
        assert_eq!(lines[0]["verified"], false);
    }

    struct ClosedSink {
        attempts: usize,
    }

    impl Write for ClosedSink {
        fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
            self.attempts += 1;
            Err(io::Error::new(io::ErrorKind::BrokenPipe, "closed"))
        }

        fn flush(&mut self) -> io::Result<()> { Ok(()) }
    }

    #[test]
    fn write_failures_do_not_stop_the_session() {
        let dir = tempdir().unwrap();
        let a = dir.path().join("a.txt");
        fs::write(&a, "cat cat").unwrap();
        let script = format!("Query Word cat\nRead Doc {}\nShow Info\nShow Term\nQuery Word cat\n", a.display());

        for format in [OutputFormat::Text, OutputFormat::Json] {
            let mut db: Database<TrieBackend> = Database::default();
            let mut sink = ClosedSink { attempts: 0 };
            run(&mut db, Cursor::new(script.as_str()), &mut sink, format).unwrap();

            // one failed attempt per output instruction
            assert_eq!(sink.attempts, 4);
            assert_eq!(db.info().documents, 1);
            assert_eq!(db.terms(), vec!["cat"]);
        }
    }
}
