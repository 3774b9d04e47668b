//! Plaintext payload encoding.
//!
//! The payload is compact JSON of the form `{"entries":[...]}`.  Field
//! order follows the struct definition and entries keep document order,
//! so the same content always encodes to the same bytes.  The session
//! key never enters the payload.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use zeroize::Zeroizing;

use super::document::Document;
use super::entry::Entry;
use crate::errors::{PassVaultError, Result};

#[derive(Serialize)]
struct PayloadRef<'a> {
    entries: &'a [Entry],
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct Payload {
    entries: Vec<Entry>,
}

/// Serialize the document's entries.
pub fn encode(document: &Document) -> Result<Zeroizing<Vec<u8>>> {
    let payload = PayloadRef {
        entries: document.entries(),
    };
    serde_json::to_vec(&payload)
        .map(Zeroizing::new)
        .map_err(|e| PassVaultError::MalformedPayload(format!("cannot encode entries: {e}")))
}

/// Parse a payload back into a clean, unnamed document.
///
/// Rejects anything that could not have come from `encode`: bad JSON,
/// unknown fields, blank titles and repeated titles.
pub fn decode(bytes: &[u8]) -> Result<Document> {
    let payload: Payload = serde_json::from_slice(bytes)
        .map_err(|e| PassVaultError::MalformedPayload(format!("entries JSON: {e}")))?;

    validate_entries(&payload.entries)?;
    Ok(Document::from_entries(payload.entries))
}

fn validate_entries(entries: &[Entry]) -> Result<()> {
    let mut seen = HashSet::with_capacity(entries.len());
    for (index, entry) in entries.iter().enumerate() {
        if !entry.has_valid_title() {
            return Err(PassVaultError::MalformedPayload(format!(
                "entry {index} has a blank title"
            )));
        }
        if !seen.insert(entry.title.as_str()) {
            return Err(PassVaultError::MalformedPayload(format!(
                "entry {index} repeats the title '{}'",
                entry.title
            )));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Document {
        let mut doc = Document::new();
        doc.add(
            Entry::new("Bank")
                .with_url("https://bank.example")
                .with_user("alice")
                .with_password("p@ss")
                .with_rotation_days(90),
        )
        .unwrap();
        doc.add(Entry::new("Notes only").with_notes("line one\nline two"))
            .unwrap();
        doc
    }

    #[test]
    fn decode_inverts_encode() {
        let doc = sample();
        let bytes = encode(&doc).unwrap();
        let back = decode(&bytes).unwrap();

        assert_eq!(back.entries(), doc.entries());
        assert_eq!(
            back.entries()[0].modified_date,
            doc.entries()[0].modified_date
        );
        assert!(!back.is_modified());
        assert!(back.file_name().is_none());
    }

    #[test]
    fn encoding_is_deterministic() {
        let doc = sample();
        assert_eq!(*encode(&doc).unwrap(), *encode(&doc).unwrap());
    }

    #[test]
    fn empty_document_encodes() {
        let bytes = encode(&Document::new()).unwrap();
        assert_eq!(&bytes[..], br#"{"entries":[]}"#);
        assert!(decode(&bytes).unwrap().is_empty());
    }

    #[test]
    fn payload_excludes_transient_flag() {
        let bytes = encode(&sample()).unwrap();
        let text = std::str::from_utf8(&bytes).unwrap();
        assert!(!text.contains("is_password_changed"));
    }

    #[test]
    fn rejects_truncated_input() {
        let bytes = encode(&sample()).unwrap();
        let cut = &bytes[..bytes.len() / 2];
        assert!(matches!(
            decode(cut),
            Err(PassVaultError::MalformedPayload(_))
        ));
    }

    #[test]
    fn rejects_blank_and_duplicate_titles() {
        let blank = br#"{"entries":[{"title":"  "}]}"#;
        assert!(matches!(
            decode(blank),
            Err(PassVaultError::MalformedPayload(_))
        ));

        let dup = br#"{"entries":[{"title":"A"},{"title":"A"}]}"#;
        assert!(matches!(
            decode(dup),
            Err(PassVaultError::MalformedPayload(_))
        ));
    }

    #[test]
    fn rejects_unknown_fields() {
        let extra = br#"{"entries":[{"title":"A","colour":"red"}]}"#;
        assert!(decode(extra).is_err());

        let top = br#"{"entries":[],"version":2}"#;
        assert!(decode(top).is_err());
    }

    #[test]
    fn missing_optional_fields_default() {
        let doc = decode(br#"{"entries":[{"title":"Minimal"}]}"#).unwrap();
        let entry = doc.find_by_title("Minimal").unwrap();
        assert_eq!(entry.user, None);
        assert_eq!(entry.change_password_in_days, 0);
    }
}
