//! Property-based tests for wire decoding.
//!
//! Decoding must be total: any payload either decodes or yields a
//! `ProtocolError`, and lenient fields never lose information.

use proptest::prelude::*;
use streamview_proto::{ProtocolError, ReactionType, Submessage, VisibilityPolicy};

proptest! {
    /// Property: Reaction namespaces keep their wire name, known or not
    #[test]
    fn prop_reaction_type_preserves_wire_name(name in "[a-z_]{1,24}") {
        let parsed = ReactionType::from(name.clone());
        prop_assert_eq!(parsed.as_str(), name.as_str());
    }

    /// Property: Only 0..=3 are visibility policies
    #[test]
    fn prop_visibility_policy_range(value in any::<u8>()) {
        let result = VisibilityPolicy::try_from(value);
        if value <= 3 {
            prop_assert_eq!(result.map(u8::from), Ok(value));
        } else {
            prop_assert_eq!(result, Err(ProtocolError::UnknownVisibilityPolicy(value)));
        }
    }

    /// Property: Arbitrary submessage content never panics the decoders
    #[test]
    fn prop_submessage_decoding_is_total(content in ".{0,128}") {
        let sub = Submessage::widget(1, 1, content);
        let _ = sub.decode_widget_data();
        let _ = sub.decode_poll_event();
    }
}
