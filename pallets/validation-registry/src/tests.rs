use crate::{mock::*, Error, Event};
use agenttrust_primitives::{BoundedTag, BoundedUri};
use frame_support::{assert_noop, assert_ok};
use sp_core::H256;
use sp_runtime::DispatchResult;

const AGENT: u64 = 0;
const OWNER: u64 = 1;
const VALIDATOR: u64 = 2;

fn uri(bytes: &[u8]) -> BoundedUri {
    bytes.to_vec().try_into().unwrap()
}

fn tag(bytes: &[u8]) -> BoundedTag {
    bytes.to_vec().try_into().unwrap()
}

fn hash(n: u8) -> H256 {
    H256::repeat_byte(n)
}

/// Register one agent owned by [`OWNER`]; its id is [`AGENT`].
fn setup_agent() {
    assert_ok!(IdentityRegistry::register(RuntimeOrigin::signed(OWNER)));
}

fn request(caller: u64, validator: u64, agent: u64, request_hash: H256) -> DispatchResult {
    ValidationRegistry::validation_request(
        RuntimeOrigin::signed(caller),
        validator,
        agent,
        uri(b"ipfs://validation-request"),
        request_hash,
    )
}

fn respond(caller: u64, request_hash: H256, score: u8) -> DispatchResult {
    ValidationRegistry::validation_response(
        RuntimeOrigin::signed(caller),
        request_hash,
        score,
        uri(b"ipfs://validation-report"),
        hash(0xee),
        tag(b"softfin-v1"),
    )
}

// ================================================================
// Requests
// ================================================================

#[test]
fn request_creates_a_pending_record_with_neutral_defaults() {
    new_test_ext().execute_with(|| {
        setup_agent();
        assert_ok!(request(OWNER, VALIDATOR, AGENT, hash(1)));

        let record = ValidationRegistry::get_validation_status(hash(1)).unwrap();
        assert_eq!(record.agent_id, AGENT);
        assert_eq!(record.validator, VALIDATOR);
        assert_eq!(record.request_uri, uri(b"ipfs://validation-request"));
        // Pending: score 0, no URI/tag/hash, not counted anywhere.
        assert_eq!(record.response, 0);
        assert!(!record.has_response);
        assert!(record.response_uri.is_empty());
        assert!(record.tag.is_empty());
        assert_eq!(record.response_hash, H256::zero());
        assert_eq!(record.requested_at, 1);

        assert_eq!(ValidationRegistry::get_summary(AGENT).count, 0);
        System::assert_last_event(
            Event::ValidationRequested { agent_id: AGENT, validator: VALIDATOR, request_hash: hash(1) }.into(),
        );
    });
}

#[test]
fn request_requires_owner_or_operator() {
    new_test_ext().execute_with(|| {
        setup_agent();

        assert_noop!(request(3, VALIDATOR, AGENT, hash(1)), Error::<Test>::NotAuthorized);
        assert_noop!(request(OWNER, VALIDATOR, 9, hash(1)), Error::<Test>::AgentNotFound);

        // Operators may request on the agent's behalf.
        assert_ok!(IdentityRegistry::set_approval_for_all(RuntimeOrigin::signed(OWNER), AGENT, 4, true));
        assert_ok!(request(4, VALIDATOR, AGENT, hash(1)));
    });
}

#[test]
fn the_owner_cannot_be_the_validator() {
    new_test_ext().execute_with(|| {
        setup_agent();

        assert_noop!(request(OWNER, OWNER, AGENT, hash(1)), Error::<Test>::InvalidValidator);
    });
}

#[test]
fn request_hashes_are_globally_unique() {
    new_test_ext().execute_with(|| {
        setup_agent();
        assert_ok!(IdentityRegistry::register(RuntimeOrigin::signed(5))); // agent 1

        assert_ok!(request(OWNER, VALIDATOR, AGENT, hash(1)));
        // Same hash again, same agent.
        assert_noop!(request(OWNER, VALIDATOR, AGENT, hash(1)), Error::<Test>::ValidationExists);
        // Same hash on a different agent is just as dead.
        assert_noop!(request(5, VALIDATOR, 1, hash(1)), Error::<Test>::ValidationExists);
    });
}

// ================================================================
// Responses
// ================================================================

#[test]
fn first_response_scores_the_request() {
    new_test_ext().execute_with(|| {
        setup_agent();
        assert_ok!(request(OWNER, VALIDATOR, AGENT, hash(1)));
        System::set_block_number(5);

        assert_ok!(respond(VALIDATOR, hash(1), 80));

        let record = ValidationRegistry::get_validation_status(hash(1)).unwrap();
        assert_eq!(record.response, 80);
        assert!(record.has_response);
        assert_eq!(record.response_uri, uri(b"ipfs://validation-report"));
        assert_eq!(record.response_hash, hash(0xee));
        assert_eq!(record.tag, tag(b"softfin-v1"));
        assert_eq!(record.requested_at, 1);
        assert_eq!(record.last_update, 5);

        let summary = ValidationRegistry::get_summary(AGENT);
        assert_eq!(summary.count, 1);
        assert_eq!(summary.avg_response, 80);
    });
}

#[test]
fn only_the_named_validator_responds() {
    new_test_ext().execute_with(|| {
        setup_agent();
        assert_ok!(request(OWNER, VALIDATOR, AGENT, hash(1)));

        assert_noop!(respond(VALIDATOR, hash(2), 80), Error::<Test>::ValidationNotFound);
        assert_noop!(respond(3, hash(1), 80), Error::<Test>::NotAuthorized);
        assert_noop!(respond(OWNER, hash(1), 80), Error::<Test>::NotAuthorized);
        assert_noop!(respond(VALIDATOR, hash(1), 101), Error::<Test>::InvalidResponse);
    });
}

#[test]
fn repeat_responses_replace_the_score_without_recounting() {
    new_test_ext().execute_with(|| {
        setup_agent();
        assert_ok!(request(OWNER, VALIDATOR, AGENT, hash(1)));

        assert_ok!(respond(VALIDATOR, hash(1), 50));
        assert_ok!(respond(VALIDATOR, hash(1), 100));

        let summary = ValidationRegistry::get_summary(AGENT);
        assert_eq!(summary.count, 1);
        assert_eq!(summary.avg_response, 100);

        // No monotonicity: a later, worse score is equally valid.
        assert_ok!(respond(VALIDATOR, hash(1), 30));
        assert_eq!(ValidationRegistry::get_summary(AGENT).avg_response, 30);
        assert_eq!(ValidationRegistry::get_summary(AGENT).count, 1);
    });
}

#[test]
fn summary_averages_only_responded_requests_and_truncates() {
    new_test_ext().execute_with(|| {
        setup_agent();
        assert_ok!(request(OWNER, VALIDATOR, AGENT, hash(1)));
        assert_ok!(request(OWNER, VALIDATOR, AGENT, hash(2)));
        assert_ok!(request(OWNER, VALIDATOR, AGENT, hash(3)));

        assert_ok!(respond(VALIDATOR, hash(1), 80));
        assert_ok!(respond(VALIDATOR, hash(2), 91));

        let summary = ValidationRegistry::get_summary(AGENT);
        // (80 + 91) / 2 = 85.5, truncated; the pending request is invisible.
        assert_eq!(summary.count, 2);
        assert_eq!(summary.avg_response, 85);
    });
}

// ================================================================
// Paged reads
// ================================================================

#[test]
fn agent_and_validator_listings_page_in_request_order() {
    new_test_ext().execute_with(|| {
        setup_agent();
        for n in 1..=16u8 {
            assert_ok!(request(OWNER, VALIDATOR, AGENT, hash(n)));
        }

        let p1 = ValidationRegistry::get_agent_validations(AGENT, None);
        assert_eq!(p1.items.len(), 15);
        assert_eq!(p1.items[0], hash(1));
        assert_eq!(p1.cursor, Some(15));

        let p2 = ValidationRegistry::get_agent_validations(AGENT, p1.cursor);
        assert_eq!(p2.items, vec![hash(16)]);
        assert_eq!(p2.cursor, None);

        // The validator's view pages over the same hashes.
        let v1 = ValidationRegistry::get_validator_requests(&VALIDATOR, None);
        assert_eq!(v1.items.len(), 15);
        assert_eq!(v1.cursor, Some(15));
        let v2 = ValidationRegistry::get_validator_requests(&VALIDATOR, v1.cursor);
        assert_eq!(v2.items, vec![hash(16)]);
        assert_eq!(v2.cursor, None);
    });
}

#[test]
fn version_is_reported() {
    new_test_ext().execute_with(|| {
        assert_eq!(ValidationRegistry::get_version(), "2.0.0");
    });
}
