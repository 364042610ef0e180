use anyhow::{bail, Context, Result};
use stemdex::limit_from_signed;
use std::path::PathBuf;

/// One line of the instruction script.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    ReadDoc(PathBuf),
    ReadDocList(PathBuf),
    ReadStopWords(PathBuf),
    QueryWord { word: String, limit: Option<usize> },
    QueryList { path: PathBuf, limit: Option<usize> },
    ShowInfo,
    ShowTerms,
    Sort,
    End,
}

impl Command {
    /// `Ok(None)` for blank lines.
    pub fn parse(line: &str) -> Result<Option<Self>> {
        let parts: Vec<&str> = line.split_whitespace().collect();
        let cmd = match parts.as_slice() {
            [] => return Ok(None),
            ["END"] => Command::End,
            ["Read", "Doc", path] => Command::ReadDoc(path.into()),
            ["Read", "DocList", path] => Command::ReadDocList(path.into()),
            ["Read", "StopWord", path] => Command::ReadStopWords(path.into()),
            ["Query", "Word", word, rest @ ..] => Command::QueryWord { word: word.to_string(), limit: parse_limit(rest)? },
            ["Query", "List", path, rest @ ..] => Command::QueryList { path: path.into(), limit: parse_limit(rest)? },
            ["Show", "Info"] => Command::ShowInfo,
            ["Show", "Term"] => Command::ShowTerms,
            ["Sort"] => Command::Sort,
            _ => bail!("unrecognized instruction: {}", line.trim()),
        };
        Ok(Some(cmd))
    }
}

fn parse_limit(rest: &[&str]) -> Result<Option<usize>> {
    match rest {
        [] => Ok(None),
        [n] => {
            let n: i64 = n.parse().with_context(|| format!("invalid limit {n:?}"))?;
            Ok(limit_from_signed(n))
        }
        _ => bail!("unexpected arguments after limit: {}", rest[1..].join(" ")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_every_instruction() {
        assert_eq!(Command::parse("Read Doc a.txt").unwrap(), Some(Command::ReadDoc("a.txt".into())));
        assert_eq!(Command::parse("Read DocList l.txt").unwrap(), Some(Command::ReadDocList("l.txt".into())));
        assert_eq!(Command::parse("Read StopWord s.txt").unwrap(), Some(Command::ReadStopWords("s.txt".into())));
        assert_eq!(
            Command::parse("Query Word cat 5").unwrap(),
            Some(Command::QueryWord { word: "cat".into(), limit: Some(5) })
        );
        assert_eq!(
            Command::parse("Query List q.txt").unwrap(),
            Some(Command::QueryList { path: "q.txt".into(), limit: None })
        );
        assert_eq!(Command::parse("  Show   Info ").unwrap(), Some(Command::ShowInfo));
        assert_eq!(Command::parse("Show Term").unwrap(), Some(Command::ShowTerms));
        assert_eq!(Command::parse("Sort").unwrap(), Some(Command::Sort));
        assert_eq!(Command::parse("END").unwrap(), Some(Command::End));
    }

    #[test]
    fn negative_limit_means_everything() {
        assert_eq!(
            Command::parse("Query Word cat -1").unwrap(),
            Some(Command::QueryWord { word: "cat".into(), limit: None })
        );
        assert_eq!(
            Command::parse("Query Word cat 0").unwrap(),
            Some(Command::QueryWord { word: "cat".into(), limit: Some(0) })
        );
    }

    #[test]
    fn blank_lines_are_skipped() {
        assert_eq!(Command::parse("").unwrap(), None);
        assert_eq!(Command::parse(" \t ").unwrap(), None);
    }

    #[test]
    fn malformed_lines_are_errors() {
        assert!(Command::parse("Query Word cat many").is_err());
        assert!(Command::parse("Query Word cat 1 2").is_err());
        assert!(Command::parse("Read Doc").is_err());
        assert!(Command::parse("Delete Doc a.txt").is_err());
    }
}
