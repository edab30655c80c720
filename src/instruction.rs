//! Decodes a single frame from the device into an [`Instruction`].
//!
//! The wire format is one JSON object per line. The only field the host
//! cares about is the element identifier, carried as `element` or (from
//! older firmware) `symbol`:
//!
//! ```text
//! {"element":"Au"}
//! {"symbol":"fe","battery":87}
//! ```
//!
//! Anything else in the object is ignored. The decoder never drops a frame
//! silently; every outcome is spelled out in [`FrameDecode`] and the caller
//! decides what to log.

use serde_json::Value;

/// A decoded request from the device: show this element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Instruction {
    /// Element symbol or full name, exactly as the device sent it. Case is
    /// preserved here; the directory lookup is case-insensitive.
    pub identifier: String,
}

/// Everything a frame can turn out to be.
#[derive(Debug)]
pub enum FrameDecode {
    /// A well-formed instruction carrying an element identifier.
    Instruction(Instruction),
    /// Valid JSON, but no usable identifier: the field is absent, not a
    /// string, or empty.
    MissingIdentifier,
    /// Not valid JSON at all. Common right after the device boots, while
    /// its output buffer still holds garbage.
    Malformed(serde_json::Error),
}

/// Decodes one delimiter-stripped frame.
pub fn decode_frame(frame: &[u8]) -> FrameDecode {
    let value: Value = match serde_json::from_slice(frame) {
        Ok(value) => value,
        Err(error) => return FrameDecode::Malformed(error),
    };

    let identifier = value
        .get("element")
        .or_else(|| value.get("symbol"))
        .and_then(Value::as_str);

    match identifier {
        Some(id) if !id.is_empty() => FrameDecode::Instruction(Instruction {
            identifier: id.to_owned(),
        }),
        _ => FrameDecode::MissingIdentifier,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn expect_instruction(frame: &[u8]) -> Instruction {
        match decode_frame(frame) {
            FrameDecode::Instruction(instruction) => instruction,
            other => panic!("expected an instruction from {:?}, got {:?}", frame, other),
        }
    }

    #[test]
    fn element_field_decodes() {
        let instruction = expect_instruction(b"{\"element\":\"Au\"}");
        assert_eq!(instruction.identifier, "Au");
    }

    #[test]
    fn symbol_field_is_accepted_as_fallback() {
        let instruction = expect_instruction(b"{\"symbol\":\"Fe\"}");
        assert_eq!(instruction.identifier, "Fe");
    }

    #[test]
    fn element_wins_when_both_fields_are_present() {
        let instruction = expect_instruction(b"{\"symbol\":\"Fe\",\"element\":\"Au\"}");
        assert_eq!(instruction.identifier, "Au");
    }

    #[test]
    fn unrecognized_fields_are_ignored() {
        let instruction = expect_instruction(b"{\"element\":\"He\",\"battery\":87,\"mode\":\"normal\"}");
        assert_eq!(instruction.identifier, "He");
    }

    #[test]
    fn case_is_preserved_for_the_directory_to_handle() {
        let instruction = expect_instruction(b"{\"element\":\"au\"}");
        assert_eq!(instruction.identifier, "au");
    }

    #[test]
    fn missing_identifier_field() {
        assert!(matches!(
            decode_frame(b"{\"battery\":87}"),
            FrameDecode::MissingIdentifier
        ));
    }

    #[test]
    fn non_string_identifier_is_missing() {
        assert!(matches!(
            decode_frame(b"{\"element\":79}"),
            FrameDecode::MissingIdentifier
        ));
    }

    #[test]
    fn empty_identifier_is_missing() {
        assert!(matches!(
            decode_frame(b"{\"element\":\"\"}"),
            FrameDecode::MissingIdentifier
        ));
    }

    #[test]
    fn non_object_json_has_no_identifier() {
        assert!(matches!(
            decode_frame(b"[\"Au\"]"),
            FrameDecode::MissingIdentifier
        ));
    }

    #[test]
    fn truncated_json_is_malformed() {
        assert!(matches!(
            decode_frame(b"{\"element\":\"A"),
            FrameDecode::Malformed(_)
        ));
    }

    #[test]
    fn boot_garbage_is_malformed() {
        assert!(matches!(
            decode_frame(b"\xfe\x00Quimikey v2 ready"),
            FrameDecode::Malformed(_)
        ));
    }
}
