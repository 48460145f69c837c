//! # Reputation Registry Pallet
//!
//! Append-only client feedback ledger for registered agents, with an
//! O(1) WAD-scaled running summary and per-feedback response threads.
//!
//! ## Responsibilities
//! - Three feedback submission paths: permissionless, quota-approved,
//!   and owner-signed
//! - Self-dealing rejection on every path (an agent's owner or operator
//!   can never rate the agent)
//! - Soft revocation keyed by the submitting client, reflected in the
//!   summary but never deleting history
//! - Response threads on individual feedback entries, open to anyone
//! - Cursor-paged listings of clients, feedback, and responders
//!
//! ## Summary arithmetic
//! Feedback values arrive at caller-chosen precision (0–18 decimals)
//! and are normalized into the WAD (10^18) scale at submission. The
//! summary is a `{count, sum}` running aggregate: submission adds the
//! precomputed WAD value, revocation subtracts it, and the reported
//! mean is an integer division truncated toward zero. Nothing ever
//! re-reads stored history to recompute.

#![cfg_attr(not(feature = "std"), no_std)]

pub use pallet::*;

#[frame_support::pallet]
pub mod pallet {
    use agenttrust_primitives::*;
    use codec::Encode;
    use frame_support::pallet_prelude::*;
    use frame_system::pallet_prelude::*;
    use sp_runtime::ArithmeticError;

    /// Registry interface version reported by [`Pallet::get_version`].
    pub const VERSION: &str = "2.0.0";

    // ================================================================
    // Pallet-local types
    // ================================================================

    /// One feedback entry, keyed by (agent, client, index).
    #[derive(Clone, PartialEq, Eq, Encode, Decode, MaxEncodedLen, TypeInfo, Debug)]
    #[scale_info(skip_type_params(T))]
    pub struct FeedbackRecord<T: Config> {
        /// Raw value at the client's chosen precision.
        pub value: i64,
        /// Decimal places of `value` (0–18).
        pub value_decimals: u8,
        /// `value` normalized into the WAD scale at submission, so
        /// revocation can adjust the summary without rescaling.
        pub wad_value: i128,
        /// Free-form classification tags, matched by byte equality.
        pub tag1: BoundedTag,
        pub tag2: BoundedTag,
        /// URI of the interaction context the feedback refers to.
        pub context_uri: BoundedUri,
        /// URI of the off-chain feedback document.
        pub feedback_uri: BoundedUri,
        /// Content hash of the off-chain feedback document.
        pub feedback_hash: H256,
        /// Soft-revocation flag. Revoked entries stay readable.
        pub is_revoked: bool,
        /// Block number when the feedback was submitted.
        pub created_at: BlockNumberFor<T>,
    }

    /// Feedback quota granted by an agent's owner to one client.
    #[derive(Clone, Copy, PartialEq, Eq, Encode, Decode, MaxEncodedLen, TypeInfo, Debug, Default)]
    pub struct ApprovalRecord {
        /// Approved submissions left on the quota.
        pub remaining: u64,
        /// Feedback index the quota was last spent on.
        pub last_used_index: u64,
    }

    /// One entry in a feedback response thread.
    #[derive(Clone, PartialEq, Eq, Encode, Decode, MaxEncodedLen, TypeInfo, Debug)]
    #[scale_info(skip_type_params(T))]
    pub struct ResponseRecord<T: Config> {
        pub responder: T::AccountId,
        pub uri: BoundedUri,
        pub hash: H256,
        pub created_at: BlockNumberFor<T>,
    }

    /// Aggregate view returned by [`Pallet::get_summary`].
    #[derive(Clone, Copy, PartialEq, Eq, Encode, Decode, TypeInfo, Debug)]
    pub struct FeedbackSummary {
        /// Non-revoked feedback entries in the aggregate.
        pub count: u64,
        /// Truncated mean of the WAD-scaled values; 0 when empty.
        pub summary_value: i128,
        /// Always [`WAD_DECIMALS`], whatever precisions were submitted.
        pub summary_value_decimals: u8,
    }

    // ================================================================
    // Pallet configuration
    // ================================================================

    #[pallet::config]
    pub trait Config: frame_system::Config {
        /// The overarching runtime event type.
        type RuntimeEvent: From<Event<Self>> + IsType<<Self as frame_system::Config>::RuntimeEvent>;

        /// Identity registry seam: existence, ownership, and
        /// operator-authorization queries.
        type Identity: AgentRegistryInterface<Self::AccountId>;

        /// Verifier for the owner-signed feedback path.
        type SignatureVerifier: SignatureVerifier<Self::AccountId>;

        type WeightInfo: WeightInfo;
    }

    pub trait WeightInfo {
        fn approve_client() -> Weight;
        fn give_feedback() -> Weight;
        fn revoke_feedback() -> Weight;
        fn append_response() -> Weight;
    }

    pub struct DefaultWeightInfo;
    impl WeightInfo for DefaultWeightInfo {
        fn approve_client() -> Weight { Weight::from_parts(40_000_000, 0) }
        fn give_feedback() -> Weight { Weight::from_parts(100_000_000, 0) }
        fn revoke_feedback() -> Weight { Weight::from_parts(60_000_000, 0) }
        fn append_response() -> Weight { Weight::from_parts(80_000_000, 0) }
    }

    #[pallet::pallet]
    pub struct Pallet<T>(_);

    // ================================================================
    // Storage
    // ================================================================

    /// Feedback entries: (agent, client, index ≥ 1) → record.
    #[pallet::storage]
    pub type Feedback<T: Config> = StorageNMap<
        _,
        (
            NMapKey<Blake2_128Concat, AgentId>,
            NMapKey<Blake2_128Concat, T::AccountId>,
            NMapKey<Blake2_128Concat, FeedbackIndex>,
        ),
        FeedbackRecord<T>,
        OptionQuery,
    >;

    /// Highest feedback index per (agent, client). 0 = none yet;
    /// the first submission gets index 1.
    #[pallet::storage]
    #[pallet::getter(fn get_last_index)]
    pub type LastIndex<T: Config> = StorageDoubleMap<
        _,
        Blake2_128Concat, AgentId,
        Blake2_128Concat, T::AccountId,
        FeedbackIndex,
        ValueQuery,
    >;

    /// Owner-granted feedback quotas: (agent, client) → approval.
    #[pallet::storage]
    #[pallet::getter(fn get_approved_limit)]
    pub type ClientApprovals<T: Config> = StorageDoubleMap<
        _,
        Blake2_128Concat, AgentId,
        Blake2_128Concat, T::AccountId,
        ApprovalRecord,
        OptionQuery,
    >;

    /// Dense sequence of distinct clients per agent, in order of first
    /// feedback. Backs the paged client listing.
    #[pallet::storage]
    pub type Clients<T: Config> = StorageDoubleMap<
        _,
        Blake2_128Concat, AgentId,
        Blake2_128Concat, u64,
        T::AccountId,
        OptionQuery,
    >;

    /// Length of the [`Clients`] sequence per agent.
    #[pallet::storage]
    #[pallet::getter(fn client_count)]
    pub type ClientCount<T: Config> =
        StorageMap<_, Blake2_128Concat, AgentId, u64, ValueQuery>;

    /// Dense global feedback log per agent, in submission order:
    /// (agent, seq) → (client, index). Backs the paged feedback scan.
    #[pallet::storage]
    pub type FeedbackLog<T: Config> = StorageDoubleMap<
        _,
        Blake2_128Concat, AgentId,
        Blake2_128Concat, u64,
        (T::AccountId, FeedbackIndex),
        OptionQuery,
    >;

    /// Length of the [`FeedbackLog`] sequence per agent. Counts every
    /// submission ever made, revoked or not.
    #[pallet::storage]
    #[pallet::getter(fn get_agent_feedback_count)]
    pub type FeedbackCount<T: Config> =
        StorageMap<_, Blake2_128Concat, AgentId, u64, ValueQuery>;

    /// Response threads: (agent, client, index, seq) → response.
    #[pallet::storage]
    pub type Responses<T: Config> = StorageNMap<
        _,
        (
            NMapKey<Blake2_128Concat, AgentId>,
            NMapKey<Blake2_128Concat, T::AccountId>,
            NMapKey<Blake2_128Concat, FeedbackIndex>,
            NMapKey<Blake2_128Concat, u64>,
        ),
        ResponseRecord<T>,
        OptionQuery,
    >;

    /// Thread length per feedback entry.
    #[pallet::storage]
    pub type ResponseTotal<T: Config> = StorageNMap<
        _,
        (
            NMapKey<Blake2_128Concat, AgentId>,
            NMapKey<Blake2_128Concat, T::AccountId>,
            NMapKey<Blake2_128Concat, FeedbackIndex>,
        ),
        u64,
        ValueQuery,
    >;

    /// Responses by one responder on one feedback entry.
    #[pallet::storage]
    #[pallet::getter(fn get_response_count_single)]
    pub type ResponseCountByResponder<T: Config> = StorageNMap<
        _,
        (
            NMapKey<Blake2_128Concat, AgentId>,
            NMapKey<Blake2_128Concat, T::AccountId>,
            NMapKey<Blake2_128Concat, FeedbackIndex>,
            NMapKey<Blake2_128Concat, T::AccountId>,
        ),
        u64,
        ValueQuery,
    >;

    /// Dense sequence of distinct responders per feedback entry, in
    /// order of first response. Backs the paged responder listing.
    #[pallet::storage]
    pub type Responders<T: Config> = StorageNMap<
        _,
        (
            NMapKey<Blake2_128Concat, AgentId>,
            NMapKey<Blake2_128Concat, T::AccountId>,
            NMapKey<Blake2_128Concat, FeedbackIndex>,
            NMapKey<Blake2_128Concat, u64>,
        ),
        T::AccountId,
        OptionQuery,
    >;

    /// Length of the [`Responders`] sequence per feedback entry.
    #[pallet::storage]
    pub type ResponderCount<T: Config> = StorageNMap<
        _,
        (
            NMapKey<Blake2_128Concat, AgentId>,
            NMapKey<Blake2_128Concat, T::AccountId>,
            NMapKey<Blake2_128Concat, FeedbackIndex>,
        ),
        u64,
        ValueQuery,
    >;

    /// WAD-scaled running aggregate of non-revoked feedback per agent.
    #[pallet::storage]
    #[pallet::getter(fn summary)]
    pub type Summary<T: Config> =
        StorageMap<_, Blake2_128Concat, AgentId, RunningAggregate, ValueQuery>;

    // ================================================================
    // Events
    // ================================================================

    #[pallet::event]
    #[pallet::generate_deposit(pub(super) fn deposit_event)]
    pub enum Event<T: Config> {
        /// An agent's owner or operator granted a client a feedback quota.
        ClientApproved {
            agent_id: AgentId,
            client: T::AccountId,
            quota: u64,
        },
        /// Feedback was recorded. `index` is the client's per-agent
        /// feedback index (1-based).
        NewFeedback {
            agent_id: AgentId,
            client: T::AccountId,
            index: FeedbackIndex,
            value: i64,
            value_decimals: u8,
        },
        /// A client revoked their own feedback entry.
        FeedbackRevoked {
            agent_id: AgentId,
            client: T::AccountId,
            index: FeedbackIndex,
        },
        /// A response was appended to a feedback thread.
        ResponseAppended {
            agent_id: AgentId,
            client: T::AccountId,
            index: FeedbackIndex,
            responder: T::AccountId,
        },
    }

    // ================================================================
    // Errors — stable numeric codes in `primitives::codes::reputation`
    // ================================================================

    #[pallet::error]
    pub enum Error<T> {
        /// Caller is neither the agent's owner nor an operator (3000).
        NotAuthorized,
        /// No agent with this id (3001).
        AgentNotFound,
        /// No feedback at this (agent, client, index) (3002).
        FeedbackNotFound,
        /// The feedback entry is already revoked (3003).
        AlreadyRevoked,
        /// The agent's owner or an operator may not rate the agent (3005).
        SelfFeedback,
        /// The client's approved quota is exhausted or absent (3009).
        IndexLimitExceeded,
        /// Response URI must not be empty (3010).
        EmptyUri,
        /// Feedback value precision exceeds 18 decimals (3011).
        InvalidDecimals,
        /// Owner-signed feedback authorization deadline passed (3012).
        ExpiredSignature,
        /// Owner-signed feedback authorization did not verify (3013).
        InvalidSignature,
    }

    // ================================================================
    // Extrinsics
    // ================================================================

    #[pallet::call]
    impl<T: Config> Pallet<T> {
        /// Grant `client` a feedback quota of `quota` submissions on
        /// the approved path. Owner or operator only. Re-approving
        /// replaces the remaining quota outright.
        #[pallet::call_index(0)]
        #[pallet::weight(T::WeightInfo::approve_client())]
        pub fn approve_client(
            origin: OriginFor<T>,
            agent_id: AgentId,
            client: T::AccountId,
            quota: u64,
        ) -> DispatchResult {
            let who = ensure_signed(origin)?;
            let authorized = T::Identity::is_authorized_or_owner(&who, agent_id)
                .ok_or(Error::<T>::AgentNotFound)?;
            ensure!(authorized, Error::<T>::NotAuthorized);

            ClientApprovals::<T>::mutate(agent_id, &client, |approval| {
                let last_used_index = approval.map(|a| a.last_used_index).unwrap_or(0);
                *approval = Some(ApprovalRecord { remaining: quota, last_used_index });
            });

            Self::deposit_event(Event::ClientApproved { agent_id, client, quota });
            Ok(())
        }

        /// Submit feedback on the permissionless path. Anyone except
        /// the agent's owner and operators.
        #[pallet::call_index(1)]
        #[pallet::weight(T::WeightInfo::give_feedback())]
        #[allow(clippy::too_many_arguments)]
        pub fn give_feedback(
            origin: OriginFor<T>,
            agent_id: AgentId,
            value: i64,
            value_decimals: u8,
            tag1: BoundedTag,
            tag2: BoundedTag,
            context_uri: BoundedUri,
            feedback_uri: BoundedUri,
            feedback_hash: H256,
        ) -> DispatchResult {
            let who = ensure_signed(origin)?;
            Self::validate_submission(&who, agent_id, value_decimals)?;
            Self::store_feedback(
                who, agent_id, value, value_decimals,
                tag1, tag2, context_uri, feedback_uri, feedback_hash,
            )
        }

        /// Submit feedback against a previously granted quota.
        /// Decrements `remaining`; fails with `IndexLimitExceeded`
        /// when no quota is left.
        #[pallet::call_index(2)]
        #[pallet::weight(T::WeightInfo::give_feedback())]
        #[allow(clippy::too_many_arguments)]
        pub fn give_feedback_approved(
            origin: OriginFor<T>,
            agent_id: AgentId,
            value: i64,
            value_decimals: u8,
            tag1: BoundedTag,
            tag2: BoundedTag,
            context_uri: BoundedUri,
            feedback_uri: BoundedUri,
            feedback_hash: H256,
        ) -> DispatchResult {
            let who = ensure_signed(origin)?;
            Self::validate_submission(&who, agent_id, value_decimals)?;

            let next_index = Self::get_last_index(agent_id, &who)
                .checked_add(1)
                .ok_or(ArithmeticError::Overflow)?;
            ClientApprovals::<T>::try_mutate(agent_id, &who, |approval| -> DispatchResult {
                let record = approval.as_mut().ok_or(Error::<T>::IndexLimitExceeded)?;
                record.remaining = record
                    .remaining
                    .checked_sub(1)
                    .ok_or(Error::<T>::IndexLimitExceeded)?;
                record.last_used_index = next_index;
                Ok(())
            })?;

            Self::store_feedback(
                who, agent_id, value, value_decimals,
                tag1, tag2, context_uri, feedback_uri, feedback_hash,
            )
        }

        /// Submit feedback authorized by the agent owner's signature
        /// over `(agent_id, client, deadline)` (SCALE-encoded). The
        /// caller is the client; the signature is the owner's one-shot
        /// invitation to rate.
        #[pallet::call_index(3)]
        #[pallet::weight(T::WeightInfo::give_feedback())]
        #[allow(clippy::too_many_arguments)]
        pub fn give_feedback_signed(
            origin: OriginFor<T>,
            agent_id: AgentId,
            value: i64,
            value_decimals: u8,
            tag1: BoundedTag,
            tag2: BoundedTag,
            context_uri: BoundedUri,
            feedback_uri: BoundedUri,
            feedback_hash: H256,
            deadline: BlockNumberFor<T>,
            signature: BoundedSignature,
        ) -> DispatchResult {
            let who = ensure_signed(origin)?;
            Self::validate_submission(&who, agent_id, value_decimals)?;

            let now = frame_system::Pallet::<T>::block_number();
            ensure!(now <= deadline, Error::<T>::ExpiredSignature);

            // Existence was checked above, so the owner resolves.
            let owner = T::Identity::owner_of(agent_id).ok_or(Error::<T>::AgentNotFound)?;
            let message = (agent_id, &who, deadline).encode();
            ensure!(
                T::SignatureVerifier::verify(&message, &signature, &owner),
                Error::<T>::InvalidSignature,
            );

            Self::store_feedback(
                who, agent_id, value, value_decimals,
                tag1, tag2, context_uri, feedback_uri, feedback_hash,
            )
        }

        /// Revoke the caller's own feedback entry. The record stays
        /// readable; the summary drops its value. A foreign caller sees
        /// `FeedbackNotFound` — revocation is keyed by (caller, index),
        /// so someone else's index simply does not resolve.
        #[pallet::call_index(4)]
        #[pallet::weight(T::WeightInfo::revoke_feedback())]
        pub fn revoke_feedback(
            origin: OriginFor<T>,
            agent_id: AgentId,
            index: FeedbackIndex,
        ) -> DispatchResult {
            let who = ensure_signed(origin)?;
            let mut record = Feedback::<T>::get((agent_id, &who, index))
                .ok_or(Error::<T>::FeedbackNotFound)?;
            ensure!(!record.is_revoked, Error::<T>::AlreadyRevoked);

            Summary::<T>::try_mutate(agent_id, |agg| -> DispatchResult {
                *agg = agg.remove(record.wad_value).ok_or(ArithmeticError::Underflow)?;
                Ok(())
            })?;

            record.is_revoked = true;
            Feedback::<T>::insert((agent_id, &who, index), record);

            Self::deposit_event(Event::FeedbackRevoked { agent_id, client: who, index });
            Ok(())
        }

        /// Append a response to a feedback thread. Open to anyone —
        /// agent owners answering criticism, clients following up,
        /// third parties disputing. Never touches the summary.
        #[pallet::call_index(5)]
        #[pallet::weight(T::WeightInfo::append_response())]
        pub fn append_response(
            origin: OriginFor<T>,
            agent_id: AgentId,
            client: T::AccountId,
            index: FeedbackIndex,
            uri: BoundedUri,
            hash: H256,
        ) -> DispatchResult {
            let who = ensure_signed(origin)?;
            ensure!(
                Feedback::<T>::contains_key((agent_id, &client, index)),
                Error::<T>::FeedbackNotFound,
            );
            ensure!(!uri.is_empty(), Error::<T>::EmptyUri);

            let seq = ResponseTotal::<T>::get((agent_id, &client, index));
            let record = ResponseRecord::<T> {
                responder: who.clone(),
                uri,
                hash,
                created_at: frame_system::Pallet::<T>::block_number(),
            };
            Responses::<T>::insert((agent_id, &client, index, seq), record);
            ResponseTotal::<T>::insert(
                (agent_id, &client, index),
                seq.checked_add(1).ok_or(ArithmeticError::Overflow)?,
            );

            // First response from this responder joins the distinct-
            // responder sequence.
            let by_responder = ResponseCountByResponder::<T>::get((agent_id, &client, index, &who));
            if by_responder == 0 {
                let responder_seq = ResponderCount::<T>::get((agent_id, &client, index));
                Responders::<T>::insert((agent_id, &client, index, responder_seq), who.clone());
                ResponderCount::<T>::insert(
                    (agent_id, &client, index),
                    responder_seq.checked_add(1).ok_or(ArithmeticError::Overflow)?,
                );
            }
            ResponseCountByResponder::<T>::insert(
                (agent_id, &client, index, &who),
                by_responder.checked_add(1).ok_or(ArithmeticError::Overflow)?,
            );

            Self::deposit_event(Event::ResponseAppended { agent_id, client, index, responder: who });
            Ok(())
        }
    }

    // ================================================================
    // Internal helpers
    // ================================================================

    impl<T: Config> Pallet<T> {
        /// Checks shared by all three submission paths, in a fixed
        /// order: existence, then precision, then self-dealing.
        fn validate_submission(
            who: &T::AccountId,
            agent_id: AgentId,
            value_decimals: u8,
        ) -> DispatchResult {
            let is_insider = T::Identity::is_authorized_or_owner(who, agent_id)
                .ok_or(Error::<T>::AgentNotFound)?;
            ensure!(value_decimals <= MAX_VALUE_DECIMALS, Error::<T>::InvalidDecimals);
            ensure!(!is_insider, Error::<T>::SelfFeedback);
            Ok(())
        }

        #[allow(clippy::too_many_arguments)]
        fn store_feedback(
            client: T::AccountId,
            agent_id: AgentId,
            value: i64,
            value_decimals: u8,
            tag1: BoundedTag,
            tag2: BoundedTag,
            context_uri: BoundedUri,
            feedback_uri: BoundedUri,
            feedback_hash: H256,
        ) -> DispatchResult {
            // Decimals were validated, so only true overflow can fail here.
            let wad_value =
                wad_scale(value, value_decimals).ok_or(ArithmeticError::Overflow)?;

            let index = Self::get_last_index(agent_id, &client)
                .checked_add(1)
                .ok_or(ArithmeticError::Overflow)?;

            // A client's first feedback adds them to the client sequence.
            if index == 1 {
                let client_seq = ClientCount::<T>::get(agent_id);
                Clients::<T>::insert(agent_id, client_seq, &client);
                ClientCount::<T>::insert(
                    agent_id,
                    client_seq.checked_add(1).ok_or(ArithmeticError::Overflow)?,
                );
            }

            let log_seq = FeedbackCount::<T>::get(agent_id);
            FeedbackLog::<T>::insert(agent_id, log_seq, (&client, index));
            FeedbackCount::<T>::insert(
                agent_id,
                log_seq.checked_add(1).ok_or(ArithmeticError::Overflow)?,
            );

            Summary::<T>::try_mutate(agent_id, |agg| -> DispatchResult {
                *agg = agg.add(wad_value).ok_or(ArithmeticError::Overflow)?;
                Ok(())
            })?;

            let record = FeedbackRecord::<T> {
                value,
                value_decimals,
                wad_value,
                tag1,
                tag2,
                context_uri,
                feedback_uri,
                feedback_hash,
                is_revoked: false,
                created_at: frame_system::Pallet::<T>::block_number(),
            };
            Feedback::<T>::insert((agent_id, &client, index), record);
            LastIndex::<T>::insert(agent_id, &client, index);

            Self::deposit_event(Event::NewFeedback {
                agent_id,
                client,
                index,
                value,
                value_decimals,
            });
            Ok(())
        }
    }

    // ================================================================
    // Read API
    // ================================================================

    impl<T: Config> Pallet<T> {
        pub fn read_feedback(
            agent_id: AgentId,
            client: &T::AccountId,
            index: FeedbackIndex,
        ) -> Option<FeedbackRecord<T>> {
            Feedback::<T>::get((agent_id, client, index))
        }

        /// Distinct clients in order of first feedback, one page at a time.
        pub fn get_clients(agent_id: AgentId, cursor: Option<u64>) -> Page<T::AccountId> {
            paginate(ClientCount::<T>::get(agent_id), cursor, |seq| {
                Clients::<T>::get(agent_id, seq)
            })
        }

        /// Scan the agent's feedback log in submission order. Tag
        /// filters match by byte equality; revoked entries are dropped
        /// unless `include_revoked`. Filters apply inside the scanned
        /// window, so a page may come back short (or empty) while the
        /// cursor still advances — the per-call read budget holds
        /// regardless of match rate.
        pub fn read_all_feedback(
            agent_id: AgentId,
            tag1: Option<BoundedTag>,
            tag2: Option<BoundedTag>,
            include_revoked: bool,
            cursor: Option<u64>,
        ) -> Page<(T::AccountId, FeedbackIndex, FeedbackRecord<T>)> {
            paginate(FeedbackCount::<T>::get(agent_id), cursor, |seq| {
                let (client, index) = FeedbackLog::<T>::get(agent_id, seq)?;
                let record = Feedback::<T>::get((agent_id, &client, index))?;
                if record.is_revoked && !include_revoked {
                    return None;
                }
                if let Some(ref want) = tag1 {
                    if record.tag1 != *want {
                        return None;
                    }
                }
                if let Some(ref want) = tag2 {
                    if record.tag2 != *want {
                        return None;
                    }
                }
                Some((client, index, record))
            })
        }

        /// O(1) summary of all non-revoked feedback, WAD-scaled.
        pub fn get_summary(agent_id: AgentId) -> FeedbackSummary {
            let agg = Summary::<T>::get(agent_id);
            FeedbackSummary {
                count: agg.count,
                summary_value: agg.mean(),
                summary_value_decimals: WAD_DECIMALS,
            }
        }

        /// Distinct responders on one feedback entry, in order of first
        /// response, one page at a time.
        pub fn get_responders(
            agent_id: AgentId,
            client: &T::AccountId,
            index: FeedbackIndex,
            cursor: Option<u64>,
        ) -> Page<T::AccountId> {
            paginate(
                ResponderCount::<T>::get((agent_id, client, index)),
                cursor,
                |seq| Responders::<T>::get((agent_id, client, index, seq)),
            )
        }

        pub fn get_version() -> &'static str {
            VERSION
        }
    }
}

#[cfg(test)]
mod mock;
