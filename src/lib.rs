pub mod galago;

use std::path::PathBuf;
use thiserror::Error;

/// Every fatal condition this crate can report: lexicon loading failures
/// and the one usage error (stemming before the lexicon is loaded).
///
/// The reference C tool calls `exit()` on any of these; a library has no
/// business doing that, so each becomes a variant here instead.
#[derive(Debug, Error)]
pub enum Error {
    #[error("could not open lexicon file {file}: {source}")]
    LexiconOpen {
        file: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("duplicate word {word:?} in {file}")]
    LexiconDuplicate { word: String, file: &'static str },

    #[error("e-exception word {word:?} has no entry in the main or supplemental dictionary")]
    LexiconCrossRef { word: String },

    #[error("{file} has a line with {line_token_count} whitespace-separated tokens, expected an even count of variant/root pairs")]
    LexiconMalformedPair {
        file: &'static str,
        line_token_count: usize,
    },

    #[error("no lexicon directory was supplied")]
    ConfigMissing,

    #[error("lexicon directory path is {len} bytes long, limit is {limit}")]
    ConfigPathTooLong { len: usize, limit: usize },

    #[error("stem() called before init_lexicon() succeeded")]
    NotInitialized,
}

pub(crate) use fnv::FnvHashMap as HashMap;
