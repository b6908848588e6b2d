//! Loader for the Krovetz stemmer's dictionary.
//!
//! The lexicon is built once from six fixed-name files and installed into a
//! process-wide singleton (`LEXICON`). This mirrors the reference
//! implementation's single global hash table, but without a raw mutable
//! global: initialization happens exactly once, and every `stem()` call
//! after that only reads.

use crate::{Error, HashMap};
use once_cell::sync::OnceCell;
use std::path::{Path, PathBuf};
use std::{fs, io};

/// Longest lexicon directory path the reference accepted from `STEM_DIR`.
pub const MAX_LEXICON_DIR_LEN: usize = 100;

static LEXICON: OnceCell<Lexicon> = OnceCell::new();

/// A single entry in the lexicon.
///
/// A raw C port would use the reference's sentinel convention (`root == ""`
/// meaning "no mapping"); this tagged enum makes that distinction a type
/// rather than a string convention, so a `Mapped` entry with an empty root
/// can't be constructed by accident.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DictEntry {
    /// The key is its own root. `e_exception` forbids re-adding a final `e`
    /// after an inflectional ending is stripped for this particular word.
    SelfRoot { e_exception: bool },
    /// The key is a variant; the stem is `root`, not the key itself.
    Mapped { root: String },
}

/// The loaded dictionary. Immutable once built.
#[derive(Debug, Default)]
pub struct Lexicon {
    entries: HashMap<String, DictEntry>,
}

impl Lexicon {
    pub fn get(&self, word: &str) -> Option<&DictEntry> {
        self.entries.get(word)
    }

    pub fn contains(&self, word: &str) -> bool {
        self.entries.contains_key(word)
    }
}

/// Returns the process-wide lexicon, if `init_lexicon` has already succeeded.
pub fn lexicon() -> Option<&'static Lexicon> {
    LEXICON.get()
}

/// Loads the six fixed-name files under `dir` and installs the resulting
/// lexicon as the process-wide singleton. Fails without touching the
/// singleton if any file is missing, malformed, or violates a duplicate or
/// cross-reference rule.
///
/// Calling this a second time after a prior success is a usage error (see
/// the crate's concurrency notes); `OnceCell` reports it as `Ok(())` being
/// skipped silently by `set` returning an error, which we surface as
/// `Error::NotInitialized` since from the caller's perspective the lexicon
/// they asked to install never took effect.
pub fn init_lexicon(dir: impl AsRef<Path>) -> Result<(), Error> {
    let dir = dir.as_ref();
    let built = build_lexicon(dir)?;
    LEXICON.set(built).map_err(|_| Error::NotInitialized)
}

fn build_lexicon(dir: &Path) -> Result<Lexicon, Error> {
    let mut entries: HashMap<String, DictEntry> = HashMap::default();

    for word in read_words(dir, "head_word_list.txt")? {
        insert_self_root(&mut entries, word, "head_word_list.txt")?;
    }
    for word in read_words(dir, "dict_supplement.txt")? {
        insert_self_root(&mut entries, word, "dict_supplement.txt")?;
    }
    for word in read_words(dir, "e_exception_words.txt")? {
        apply_e_exception(&mut entries, word)?;
    }
    for (variant, root) in read_pairs(dir, "direct_conflations.txt")? {
        insert_mapped(&mut entries, variant, root, "direct_conflations.txt")?;
    }
    for (variant, root) in read_pairs(dir, "country_nationality.txt")? {
        insert_mapped(&mut entries, variant, root, "country_nationality.txt")?;
    }
    for word in read_words(dir, "proper_nouns.txt")? {
        insert_self_root(&mut entries, word, "proper_nouns.txt")?;
    }

    Ok(Lexicon { entries })
}

fn insert_self_root(
    entries: &mut HashMap<String, DictEntry>,
    word: String,
    file: &'static str,
) -> Result<(), Error> {
    if entries.contains_key(&word) {
        return Err(Error::LexiconDuplicate { word, file });
    }
    entries.insert(word, DictEntry::SelfRoot { e_exception: false });
    Ok(())
}

fn insert_mapped(
    entries: &mut HashMap<String, DictEntry>,
    variant: String,
    root: String,
    file: &'static str,
) -> Result<(), Error> {
    if entries.contains_key(&variant) {
        return Err(Error::LexiconDuplicate {
            word: variant,
            file,
        });
    }
    entries.insert(variant, DictEntry::Mapped { root });
    Ok(())
}

fn apply_e_exception(entries: &mut HashMap<String, DictEntry>, word: String) -> Result<(), Error> {
    match entries.get_mut(&word) {
        Some(DictEntry::SelfRoot { e_exception }) => {
            if *e_exception {
                return Err(Error::LexiconDuplicate {
                    word,
                    file: "e_exception_words.txt",
                });
            }
            *e_exception = true;
            Ok(())
        }
        Some(DictEntry::Mapped { .. }) | None => Err(Error::LexiconCrossRef { word }),
    }
}

fn read_words(dir: &Path, name: &'static str) -> Result<Vec<String>, Error> {
    Ok(read_file(dir, name)?
        .split_whitespace()
        .map(|s| s.to_string())
        .collect())
}

fn read_pairs(dir: &Path, name: &'static str) -> Result<Vec<(String, String)>, Error> {
    let tokens: Vec<String> = read_file(dir, name)?
        .split_whitespace()
        .map(|s| s.to_string())
        .collect();
    if tokens.len() % 2 != 0 {
        return Err(Error::LexiconMalformedPair {
            file: name,
            line_token_count: tokens.len(),
        });
    }
    Ok(tokens
        .chunks_exact(2)
        .map(|pair| (pair[0].clone(), pair[1].clone()))
        .collect())
}

fn read_file(dir: &Path, name: &'static str) -> Result<String, Error> {
    let path: PathBuf = dir.join(name);
    fs::read_to_string(&path).map_err(|source| Error::LexiconOpen { file: path, source })
}

/// Checked before `init_lexicon` opens any file, matching the reference's
/// `STEM_DIR` length cap.
pub fn check_dir_len(dir: &Path) -> Result<(), Error> {
    let len = dir.as_os_str().len();
    if len > MAX_LEXICON_DIR_LEN {
        return Err(Error::ConfigPathTooLong {
            len,
            limit: MAX_LEXICON_DIR_LEN,
        });
    }
    Ok(())
}

/// Reads the lexicon directory from `STEM_DIR` and installs it as the
/// process-wide lexicon. Shared by all three CLI binaries, which otherwise
/// differ only in how they turn a line of text into a stem.
pub fn init_from_env() -> Result<(), Error> {
    let dir = std::env::var_os("STEM_DIR").ok_or(Error::ConfigMissing)?;
    let dir = PathBuf::from(dir);
    check_dir_len(&dir)?;
    init_lexicon(&dir)
}

/// Builds a small in-memory lexicon from the bundled word lists in
/// `kstem_data`, for `kstem`'s own tests. Follows the same source order as
/// `build_lexicon`, but skips the duplicate/cross-reference error paths --
/// the bundled tables are curated by hand, not read off disk.
#[cfg(test)]
pub(crate) fn build_lexicon_for_test() -> Lexicon {
    use super::kstem_data::*;

    let mut entries: HashMap<String, DictEntry> = HashMap::default();
    for word in BASE_HEADWORDS
        .iter()
        .chain(EXCEPTION_WORDS.iter())
        .chain(SUPPLEMENT_DICT.iter())
        .chain(PROPER_NOUNS.iter())
    {
        entries
            .entry(word.to_string())
            .or_insert(DictEntry::SelfRoot { e_exception: false });
    }
    for word in EXCEPTION_WORDS {
        if let Some(DictEntry::SelfRoot { e_exception }) = entries.get_mut(*word) {
            *e_exception = true;
        }
    }
    for (variant, root) in DIRECT_CONFLATIONS.iter().chain(COUNTRY_NATIONALITY.iter()) {
        entries.insert(
            variant.to_string(),
            DictEntry::Mapped {
                root: root.to_string(),
            },
        );
    }
    Lexicon { entries }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_dir(files: &[(&str, &str)]) -> tempfile::TempDir {
        let dir = tempfile::tempdir().unwrap();
        for (name, contents) in files {
            let mut f = fs::File::create(dir.path().join(name)).unwrap();
            write!(f, "{}", contents).unwrap();
        }
        dir
    }

    fn minimal_files(extra: &[(&str, &str)]) -> Vec<(&'static str, &'static str)> {
        let mut files: Vec<(&'static str, &'static str)> = vec![
            ("head_word_list.txt", ""),
            ("dict_supplement.txt", ""),
            ("e_exception_words.txt", ""),
            ("direct_conflations.txt", ""),
            ("country_nationality.txt", ""),
            ("proper_nouns.txt", ""),
        ];
        for (name, contents) in extra {
            if let Some(slot) = files.iter_mut().find(|(n, _)| n == name) {
                slot.1 = contents;
            }
        }
        files
    }

    #[test]
    fn loads_headwords_and_pairs() {
        let files = minimal_files(&[
            ("head_word_list.txt", "calorie cross dog"),
            ("direct_conflations.txt", "went go"),
        ]);
        let dir = write_dir(&files);
        let lexicon = build_lexicon(dir.path()).unwrap();
        assert_eq!(
            lexicon.get("calorie"),
            Some(&DictEntry::SelfRoot { e_exception: false })
        );
        assert_eq!(
            lexicon.get("went"),
            Some(&DictEntry::Mapped {
                root: "go".to_string()
            })
        );
        assert!(lexicon.get("missing").is_none());
    }

    #[test]
    fn duplicate_headword_is_an_error() {
        let files = minimal_files(&[("head_word_list.txt", "dog dog")]);
        let dir = write_dir(&files);
        match build_lexicon(dir.path()) {
            Err(Error::LexiconDuplicate { word, file }) => {
                assert_eq!(word, "dog");
                assert_eq!(file, "head_word_list.txt");
            }
            other => panic!("expected LexiconDuplicate, got {:?}", other),
        }
    }

    #[test]
    fn e_exception_requires_existing_headword() {
        let files = minimal_files(&[("e_exception_words.txt", "ghost")]);
        let dir = write_dir(&files);
        match build_lexicon(dir.path()) {
            Err(Error::LexiconCrossRef { word }) => assert_eq!(word, "ghost"),
            other => panic!("expected LexiconCrossRef, got {:?}", other),
        }
    }

    #[test]
    fn e_exception_marks_existing_entry() {
        let files = minimal_files(&[
            ("head_word_list.txt", "ague"),
            ("e_exception_words.txt", "ague"),
        ]);
        let dir = write_dir(&files);
        let lexicon = build_lexicon(dir.path()).unwrap();
        assert_eq!(
            lexicon.get("ague"),
            Some(&DictEntry::SelfRoot { e_exception: true })
        );
    }

    #[test]
    fn odd_token_pair_file_is_malformed() {
        let files = minimal_files(&[("direct_conflations.txt", "went go ran")]);
        let dir = write_dir(&files);
        match build_lexicon(dir.path()) {
            Err(Error::LexiconMalformedPair {
                file,
                line_token_count,
            }) => {
                assert_eq!(file, "direct_conflations.txt");
                assert_eq!(line_token_count, 3);
            }
            other => panic!("expected LexiconMalformedPair, got {:?}", other),
        }
    }

    #[test]
    fn missing_file_is_an_open_error() {
        let dir = tempfile::tempdir().unwrap();
        match build_lexicon(dir.path()) {
            Err(Error::LexiconOpen { file, .. }) => {
                assert_eq!(file.file_name().unwrap(), "head_word_list.txt");
            }
            other => panic!("expected LexiconOpen, got {:?}", other),
        }
    }

    #[test]
    fn dir_length_is_checked_before_loading() {
        let long = "x".repeat(MAX_LEXICON_DIR_LEN + 1);
        let err = check_dir_len(Path::new(&long)).unwrap_err();
        assert!(matches!(err, Error::ConfigPathTooLong { .. }));
    }
}
