//! Host completion-entry records.

use serde::{Deserialize, Serialize, Serializer};

use crate::provider::Candidate;

/// Matching behavior stamped onto every completion entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MatchFlags {
    /// Candidates match the typed text case-insensitively.
    pub case_insensitive: bool,
    /// Entries sharing insertion text may coexist in the popup.
    pub allow_duplicates: bool,
}

impl Default for MatchFlags {
    fn default() -> Self {
        Self {
            case_insensitive: true,
            allow_duplicates: true,
        }
    }
}

/// One completion record in the shape the host editor expects.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CompletionEntry {
    /// Text inserted when the entry is selected.
    pub word: String,
    /// Abbreviation shown in the popup instead of `word`.
    pub abbr: String,
    /// Extra detail shown after the abbreviation.
    pub menu: String,
    /// Long-form documentation for the preview window.
    pub info: String,
    /// Category tag used for the entry's icon and grouping.
    pub kind: String,
    /// Case-insensitivity flag; the host dialect wants 0/1, not a boolean.
    #[serde(serialize_with = "flag_as_int")]
    pub icase: bool,
    /// Duplicates-allowed flag, same 0/1 encoding.
    #[serde(serialize_with = "flag_as_int")]
    pub dup: bool,
}

fn flag_as_int<S: Serializer>(flag: &bool, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_u8(u8::from(*flag))
}

impl CompletionEntry {
    /// Map one provider candidate into the host record shape.
    ///
    /// The mapping is total: every candidate field lands in exactly one
    /// entry field, and the flags come from configuration.
    pub fn from_candidate(candidate: Candidate, flags: MatchFlags) -> Self {
        Self {
            word: candidate.complete,
            abbr: candidate.display,
            menu: candidate.description,
            info: candidate.help,
            kind: candidate.kind,
            icase: flags.case_insensitive,
            dup: flags.allow_duplicates,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn candidate() -> Candidate {
        Candidate {
            complete: "foo".to_string(),
            display: "foo()".to_string(),
            description: "function".to_string(),
            help: "docstring".to_string(),
            kind: "function".to_string(),
        }
    }

    #[test]
    fn from_candidate_maps_all_five_fields() {
        let entry = CompletionEntry::from_candidate(candidate(), MatchFlags::default());

        assert_eq!(entry.word, "foo");
        assert_eq!(entry.abbr, "foo()");
        assert_eq!(entry.menu, "function");
        assert_eq!(entry.info, "docstring");
        assert_eq!(entry.kind, "function");
        assert!(entry.icase);
        assert!(entry.dup);
    }

    #[test]
    fn entry_serializes_flags_as_integers() {
        let entry = CompletionEntry::from_candidate(candidate(), MatchFlags::default());

        let value = serde_json::to_value(&entry).unwrap();
        assert_eq!(
            value,
            json!({
                "word": "foo",
                "abbr": "foo()",
                "menu": "function",
                "info": "docstring",
                "kind": "function",
                "icase": 1,
                "dup": 1,
            })
        );
    }

    #[test]
    fn disabled_flags_serialize_as_zero() {
        let flags = MatchFlags {
            case_insensitive: false,
            allow_duplicates: false,
        };
        let entry = CompletionEntry::from_candidate(candidate(), flags);

        let value = serde_json::to_value(&entry).unwrap();
        assert_eq!(value["icase"], 0);
        assert_eq!(value["dup"], 0);
    }

    #[test]
    fn match_flags_default_to_permissive() {
        let flags = MatchFlags::default();
        assert!(flags.case_insensitive);
        assert!(flags.allow_duplicates);
    }

    #[test]
    fn match_flags_deserialize_with_partial_fields() {
        let flags: MatchFlags =
            toml::from_str("case_insensitive = false").unwrap();
        assert!(!flags.case_insensitive);
        assert!(flags.allow_duplicates);
    }
}
