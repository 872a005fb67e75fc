//! Property-based tests for session advancement

use super::*;
use proptest::prelude::*;

fn arb_session() -> impl Strategy<Value = Session> {
    (proptest::option::of("[a-z0-9-]{1,36}"), "[0-9]\\.[0-9]").prop_map(|(id, version)| {
        let session = Session::initial().with_version(version);
        match id {
            Some(id) => session.with_session_id(id),
            None => session,
        }
    })
}

proptest! {
    #[test]
    fn prop_message_id_increases_by_one(session in arb_session(), turns in 1usize..50) {
        let mut current = session.clone();
        for _ in 0..turns {
            let next = current.advance();
            prop_assert_eq!(next.message_id, current.message_id + 1);
            prop_assert!(!next.is_new);
            current = next;
        }
        prop_assert_eq!(current.message_id, INITIAL_MESSAGE_ID + turns as u64);
    }

    #[test]
    fn prop_is_new_iff_initial_message_id(session in arb_session(), turns in 0usize..20) {
        let mut current = session;
        for _ in 0..turns {
            current = current.advance();
        }
        prop_assert_eq!(current.is_new, current.message_id == INITIAL_MESSAGE_ID);
    }

    #[test]
    fn prop_identity_is_stable(session in arb_session(), turns in 0usize..20) {
        let mut current = session.clone();
        for _ in 0..turns {
            current = current.advance();
        }
        prop_assert_eq!(current.session_id, session.session_id);
        prop_assert_eq!(current.version, session.version);
    }
}
