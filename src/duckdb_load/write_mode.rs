use clap::ValueEnum;
use serde::Deserialize;
use std::fmt;
use std::io::{BufRead, Write};
use std::str::FromStr;

use crate::error::{LoadError, Result};

const MODE_PROMPT: &str = "Invalid argument. Please enter either \"overwrite\" or \"append\".";

/// How every load statement in a run writes into its target table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum WriteMode {
    /// Create or replace the target table from the shard
    Overwrite,
    /// Insert the shard's rows into an existing table
    Append,
}

impl FromStr for WriteMode {
    type Err = LoadError;

    // Exact, case-sensitive match only.
    fn from_str(token: &str) -> Result<Self> {
        match token {
            "overwrite" => Ok(WriteMode::Overwrite),
            "append" => Ok(WriteMode::Append),
            other => Err(LoadError::InvalidMode(other.to_string())),
        }
    }
}

impl fmt::Display for WriteMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WriteMode::Overwrite => write!(f, "overwrite"),
            WriteMode::Append => write!(f, "append"),
        }
    }
}

/// What an overwrite run does with the second and later shards of a table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum OverwritePolicy {
    /// Every shard replaces the table, so only the last existing shard survives
    #[default]
    ReplaceEachShard,
    /// The first existing shard replaces the table and later shards append to it
    ReplaceFirstShard,
}

/// Ask for the write mode on `output`, reading lines from `input` until an
/// exact "overwrite" or "append" is entered.
pub fn prompt_for_mode<R: BufRead, W: Write>(mut input: R, mut output: W) -> Result<WriteMode> {
    loop {
        writeln!(output, "{}", MODE_PROMPT)?;
        output.flush()?;

        let mut line = String::new();
        if input.read_line(&mut line)? == 0 {
            return Err(LoadError::NoModeSupplied);
        }
        if let Ok(mode) = line.trim_end_matches(['\r', '\n']).parse::<WriteMode>() {
            return Ok(mode);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn parses_exact_tokens_only() {
        assert_eq!("overwrite".parse::<WriteMode>().unwrap(), WriteMode::Overwrite);
        assert_eq!("append".parse::<WriteMode>().unwrap(), WriteMode::Append);

        for bad in ["foo", "", "OVERWRITE", "Append", " append"] {
            assert!(matches!(
                bad.parse::<WriteMode>(),
                Err(LoadError::InvalidMode(_))
            ));
        }
    }

    #[test]
    fn reprompts_until_valid_token() {
        let mut out = Vec::new();
        let input = Cursor::new("foo\n\nOVERWRITE\noverwrite\nappend\n");
        let mode = prompt_for_mode(input, &mut out).unwrap();

        assert_eq!(mode, WriteMode::Overwrite);
        let printed = String::from_utf8(out).unwrap();
        assert_eq!(printed.matches(MODE_PROMPT).count(), 4);
    }

    #[test]
    fn accepts_crlf_terminated_token() {
        let mut out = Vec::new();
        let mode = prompt_for_mode(Cursor::new("append\r\n"), &mut out).unwrap();
        assert_eq!(mode, WriteMode::Append);
        assert_eq!(String::from_utf8(out).unwrap().matches(MODE_PROMPT).count(), 1);
    }

    #[test]
    fn end_of_input_without_valid_token_fails() {
        let err = prompt_for_mode(Cursor::new("nope\n"), Vec::new()).unwrap_err();
        assert!(matches!(err, LoadError::NoModeSupplied));
    }

    #[test]
    fn overwrite_policy_defaults_to_replace_each_shard() {
        assert_eq!(OverwritePolicy::default(), OverwritePolicy::ReplaceEachShard);
    }
}
