//! Encoding of proxy list documents
//!
//! Documents are pretty-printed JSON with a four space indent. When a key is
//! given the bytes are XOR-obfuscated with it, the same way consumers of the
//! list expect a published list to be scrambled with their shared password.

use crate::error::GeneratorError;
use crate::proxy::models::ProxyGroups;
use crate::Result;
use serde::Serialize;
use serde_json::ser::{PrettyFormatter, Serializer};

/// Indentation used for rendered documents
const INDENT: &[u8] = b"    ";

/// XOR `data` in place with a repeating `key`. An empty key leaves data untouched.
pub fn xor(data: &mut [u8], key: &[u8]) {
    if key.is_empty() {
        return;
    }
    for (byte, k) in data.iter_mut().zip(key.iter().cycle()) {
        *byte ^= k;
    }
}

/// Render a document as indented JSON, obfuscated when `key` is set
pub fn encode_document(document: &ProxyGroups, key: Option<&str>) -> Result<Vec<u8>> {
    let mut buf = Vec::new();
    let mut serializer = Serializer::with_formatter(&mut buf, PrettyFormatter::with_indent(INDENT));
    document.serialize(&mut serializer)?;

    if let Some(key) = key {
        xor(&mut buf, key.as_bytes());
    }
    Ok(buf)
}

/// Load a document produced by [`encode_document`]
///
/// A document without any record is rejected, since there is nothing a
/// consumer could select from.
pub fn decode_document(data: &[u8], key: Option<&str>) -> Result<ProxyGroups> {
    let mut buf = data.to_vec();
    if let Some(key) = key {
        xor(&mut buf, key.as_bytes());
    }

    let document: ProxyGroups = serde_json::from_slice(&buf)?;
    if document.record_count() == 0 {
        return Err(GeneratorError::NoRecords);
    }
    Ok(document)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::proxy::models::{ProxyGroup, ProxyRecord};

    fn sample_document() -> ProxyGroups {
        let mut record = ProxyRecord::new(3);
        record.proxy_type = Some("ss".to_string());
        record.host = Some("1.2.3.4".to_string());
        record.port = Some(8388);
        record.password = Some("p@ss:w0rd".to_string());
        record
            .params
            .insert("name".to_string(), "hk-01".to_string());

        let mut document = ProxyGroups::new(2);
        document
            .groups
            .push(ProxyGroup::new("hk.yaml".to_string(), vec![record]));
        document
    }

    #[test]
    fn test_xor_is_reversible() {
        let mut data = b"selectPerGroup".to_vec();
        xor(&mut data, b"key");
        assert_ne!(data, b"selectPerGroup");
        xor(&mut data, b"key");
        assert_eq!(data, b"selectPerGroup");
    }

    #[test]
    fn test_xor_empty_key() {
        let mut data = b"plain".to_vec();
        xor(&mut data, b"");
        assert_eq!(data, b"plain");
    }

    #[test]
    fn test_encode_uses_four_space_indent() {
        let encoded = encode_document(&sample_document(), None).unwrap();
        let text = String::from_utf8(encoded).unwrap();
        assert!(text.starts_with("{\n    \"selectPerGroup\": 2,\n    \"groups\": ["));
        assert!(text.contains("\n                    \"connNum\": 3,"));
    }

    #[test]
    fn test_decode_encoded_document() {
        let document = sample_document();
        let encoded = encode_document(&document, None).unwrap();
        assert_eq!(decode_document(&encoded, None).unwrap(), document);
    }

    #[test]
    fn test_decode_with_key() {
        let document = sample_document();
        let encoded = encode_document(&document, Some("secret")).unwrap();
        assert!(serde_json::from_slice::<ProxyGroups>(&encoded).is_err());
        assert_eq!(decode_document(&encoded, Some("secret")).unwrap(), document);
    }

    #[test]
    fn test_decode_rejects_empty_document() {
        let encoded = encode_document(&ProxyGroups::new(2), None).unwrap();
        let err = decode_document(&encoded, None).unwrap_err();
        assert!(matches!(err, GeneratorError::NoRecords));
    }

    #[test]
    fn test_decode_invalid_json() {
        let err = decode_document(b"not json", None).unwrap_err();
        assert!(matches!(err, GeneratorError::Json(_)));
    }
}
