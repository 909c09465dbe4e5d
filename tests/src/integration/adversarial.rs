//! Hostile-input coverage: forged and replayed authorizations, double
//! claims, premature claims, malformed signature blobs.

#[cfg(test)]
mod tests {
    use crate::common::{principal, NodeIdentity, TestEnv, START, UNIT};
    use escrow_protocol::{EscrowError, SessionEscrowApi, SESSION_TIMEOUT_SECS};
    use escrow_signature::ecdsa::invert_s;

    #[test]
    fn test_signature_from_wrong_key_rejected() {
        let env = TestEnv::new();
        let _node = env.register_node(1);
        let impostor = NodeIdentity::random();
        let user = principal(0xA1);

        env.service.deposit(user, UNIT).unwrap();
        let session_id = env.service.open_session(user, UNIT / 2, 1).unwrap();

        // Signed by a key that is not the registered node owner
        let sig = impostor.sign_settlement(session_id, UNIT / 10);
        assert_eq!(
            env.service
                .close_session(user, session_id, UNIT / 10, &sig)
                .unwrap_err(),
            EscrowError::InvalidSignature
        );
    }

    #[test]
    fn test_signature_bound_to_amount() {
        let env = TestEnv::new();
        let node = env.register_node(1);
        let user = principal(0xA1);

        env.service.deposit(user, UNIT).unwrap();
        let session_id = env.service.open_session(user, UNIT / 2, 1).unwrap();

        // The node agreed to 0.1; the user presents 0.4
        let sig = node.sign_settlement(session_id, UNIT / 10);
        assert_eq!(
            env.service
                .close_session(user, session_id, 4 * UNIT / 10, &sig)
                .unwrap_err(),
            EscrowError::InvalidSignature
        );

        // Nothing moved
        assert_eq!(env.service.get_balance(user), UNIT);
        assert!(env.service.get_session(session_id).unwrap().is_active);
    }

    #[test]
    fn test_signature_bound_to_session() {
        let env = TestEnv::new();
        let node = env.register_node(1);
        let user = principal(0xA1);

        env.service.deposit(user, UNIT).unwrap();
        let first = env.service.open_session(user, UNIT / 4, 1).unwrap();
        let second = env.service.open_session(user, UNIT / 4, 1).unwrap();

        // A valid settlement for session 1 is replayed against session 2
        let sig = node.sign_settlement(first, UNIT / 10);
        assert_eq!(
            env.service
                .close_session(user, second, UNIT / 10, &sig)
                .unwrap_err(),
            EscrowError::InvalidSignature
        );

        // The signature still works where it belongs
        env.service.close_session(user, first, UNIT / 10, &sig).unwrap();
    }

    #[test]
    fn test_malleated_signature_rejected() {
        let env = TestEnv::new();
        let node = env.register_node(1);
        let user = principal(0xA1);

        env.service.deposit(user, UNIT).unwrap();
        let session_id = env.service.open_session(user, UNIT / 2, 1).unwrap();

        // Flip S into the upper half of the curve order: same curve
        // equation, different byte encoding.
        let mut sig = node.sign_settlement(session_id, UNIT / 10);
        let mut s = [0u8; 32];
        s.copy_from_slice(&sig[32..64]);
        sig[32..64].copy_from_slice(&invert_s(&s));

        assert_eq!(
            env.service
                .close_session(user, session_id, UNIT / 10, &sig)
                .unwrap_err(),
            EscrowError::InvalidSignature
        );
    }

    #[test]
    fn test_malformed_signature_blob_is_input_error() {
        let env = TestEnv::new();
        let _node = env.register_node(1);
        let user = principal(0xA1);

        env.service.deposit(user, UNIT).unwrap();
        let session_id = env.service.open_session(user, UNIT / 2, 1).unwrap();

        for len in [0usize, 1, 64, 66] {
            let blob = vec![0x5Au8; len];
            assert_eq!(
                env.service
                    .close_session(user, session_id, UNIT / 10, &blob)
                    .unwrap_err(),
                EscrowError::InvalidSignatureLength(len)
            );
        }

        // Right length, nonsense recovery byte
        let mut blob = vec![0x5Au8; 65];
        blob[64] = 9;
        assert_eq!(
            env.service
                .close_session(user, session_id, UNIT / 10, &blob)
                .unwrap_err(),
            EscrowError::InvalidSignature
        );
    }

    #[test]
    fn test_stranger_cannot_close_with_valid_node_signature() {
        let env = TestEnv::new();
        let node = env.register_node(1);
        let user = principal(0xA1);
        let stranger = principal(0xEE);

        env.service.deposit(user, UNIT).unwrap();
        env.service.deposit(stranger, UNIT).unwrap();
        let session_id = env.service.open_session(user, UNIT / 2, 1).unwrap();

        // Even a genuine settlement authorization does not let a third
        // party close someone else's session.
        let sig = node.sign_settlement(session_id, UNIT / 10);
        assert_eq!(
            env.service
                .close_session(stranger, session_id, UNIT / 10, &sig)
                .unwrap_err(),
            EscrowError::NotSessionOwner
        );
    }

    #[test]
    fn test_double_claim_pays_once() {
        let env = TestEnv::new();
        let node = env.register_node(1);
        let user = principal(0xA1);

        env.service.deposit(user, UNIT).unwrap();
        let session_id = env.service.open_session(user, UNIT / 2, 1).unwrap();
        let sig = node.sign_settlement(session_id, UNIT / 5);
        env.service.close_session(user, session_id, UNIT / 5, &sig).unwrap();

        assert_eq!(
            env.service.claim_payment(node.owner, session_id).unwrap(),
            UNIT / 5
        );
        assert_eq!(
            env.service.claim_payment(node.owner, session_id).unwrap_err(),
            EscrowError::NoClaimableAmount(session_id)
        );
        assert_eq!(env.service.get_balance(node.owner), UNIT / 5);
    }

    #[test]
    fn test_claim_before_timeout_rejected() {
        let env = TestEnv::new();
        let node = env.register_node(1);
        let user = principal(0xA1);

        env.service.deposit(user, UNIT).unwrap();
        let session_id = env.service.open_session(user, UNIT / 2, 1).unwrap();

        // Exactly at the window boundary is still too early; the window
        // must be strictly exceeded.
        env.clock.set(START + SESSION_TIMEOUT_SECS);
        assert_eq!(
            env.service.claim_payment(node.owner, session_id).unwrap_err(),
            EscrowError::SessionNotClaimable(session_id)
        );
    }

    #[test]
    fn test_timeout_claim_still_gated_on_node_owner() {
        let env = TestEnv::new();
        let _node = env.register_node(1);
        let user = principal(0xA1);
        let stranger = principal(0xEE);

        env.service.deposit(user, UNIT).unwrap();
        let session_id = env.service.open_session(user, UNIT / 2, 1).unwrap();

        env.clock.set(START + SESSION_TIMEOUT_SECS + 1);
        assert_eq!(
            env.service.claim_payment(stranger, session_id).unwrap_err(),
            EscrowError::NotNodeOwner
        );
    }

    #[test]
    fn test_close_on_settled_session_rejected_even_with_fresh_signature() {
        let env = TestEnv::new();
        let node = env.register_node(1);
        let user = principal(0xA1);

        env.service.deposit(user, UNIT).unwrap();
        let session_id = env.service.open_session(user, UNIT / 2, 1).unwrap();
        let sig = node.sign_settlement(session_id, UNIT / 10);
        env.service.close_session(user, session_id, UNIT / 10, &sig).unwrap();

        // A second, larger authorization cannot reopen the settlement.
        let second_sig = node.sign_settlement(session_id, UNIT / 4);
        assert_eq!(
            env.service
                .close_session(user, session_id, UNIT / 4, &second_sig)
                .unwrap_err(),
            EscrowError::SessionNotActive(session_id)
        );
        assert_eq!(env.service.get_balance(user), UNIT - UNIT / 10);
    }

    #[test]
    fn test_drained_balance_starves_close() {
        let env = TestEnv::new();
        let node = env.register_node(1);
        let user = principal(0xA1);

        env.service.deposit(user, UNIT).unwrap();
        let session_id = env.service.open_session(user, UNIT / 2, 1).unwrap();

        // Withdrawal is not blocked by the open commitment…
        env.service.withdraw(user, UNIT).unwrap();

        // …so the settlement the node signed for can no longer be funded.
        let sig = node.sign_settlement(session_id, UNIT / 2);
        assert_eq!(
            env.service
                .close_session(user, session_id, UNIT / 2, &sig)
                .unwrap_err(),
            EscrowError::InsufficientBalance {
                required: UNIT / 2,
                available: 0
            }
        );
    }
}
