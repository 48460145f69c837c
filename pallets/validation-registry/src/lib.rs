//! # Validation Registry Pallet
//!
//! Hash-keyed validation workflow: an agent's owner (or operator)
//! requests a validation from a named validator, and the validator
//! answers with a 0–100 score. Requests are globally unique by their
//! request hash; responses may be overwritten by the same validator at
//! any time — re-validation after model updates is a feature, so no
//! monotonicity is imposed.
//!
//! The per-agent summary is a `{count, sum}` running aggregate over
//! raw scores. Only responded requests count; a repeat response
//! replaces its earlier score without changing the count.

#![cfg_attr(not(feature = "std"), no_std)]

pub use pallet::*;

#[frame_support::pallet]
pub mod pallet {
    use agenttrust_primitives::*;
    use frame_support::pallet_prelude::*;
    use frame_system::pallet_prelude::*;
    use sp_runtime::ArithmeticError;

    /// Registry interface version reported by [`Pallet::get_version`].
    pub const VERSION: &str = "2.0.0";

    // ================================================================
    // Pallet-local types
    // ================================================================

    /// One validation request, keyed by its request hash.
    ///
    /// A pending record carries neutral response fields: score 0,
    /// empty URI and tag, zero hash, `has_response = false`.
    #[derive(Clone, PartialEq, Eq, Encode, Decode, MaxEncodedLen, TypeInfo, Debug)]
    #[scale_info(skip_type_params(T))]
    pub struct ValidationRecord<T: Config> {
        /// Agent the validation is about.
        pub agent_id: AgentId,
        /// The only account allowed to respond.
        pub validator: T::AccountId,
        /// URI of the off-chain validation request payload.
        pub request_uri: BoundedUri,
        /// Latest response score (0–100); 0 while pending.
        pub response: ResponseScore,
        /// URI of the off-chain response document.
        pub response_uri: BoundedUri,
        /// Content hash of the response document.
        pub response_hash: H256,
        /// Validator-chosen classification tag.
        pub tag: BoundedTag,
        /// Distinguishes a real score of 0 from "no response yet".
        pub has_response: bool,
        /// Block number of the request.
        pub requested_at: BlockNumberFor<T>,
        /// Block number of the last response (or the request, if none).
        pub last_update: BlockNumberFor<T>,
    }

    /// Aggregate view returned by [`Pallet::get_summary`].
    #[derive(Clone, Copy, PartialEq, Eq, Encode, Decode, TypeInfo, Debug)]
    pub struct ValidationSummary {
        /// Requests that have received at least one response.
        pub count: u64,
        /// Truncated mean of the latest scores; 0 when empty.
        pub avg_response: ResponseScore,
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

        type WeightInfo: WeightInfo;
    }

    pub trait WeightInfo {
        fn validation_request() -> Weight;
        fn validation_response() -> Weight;
    }

    pub struct DefaultWeightInfo;
    impl WeightInfo for DefaultWeightInfo {
        fn validation_request() -> Weight { Weight::from_parts(80_000_000, 0) }
        fn validation_response() -> Weight { Weight::from_parts(60_000_000, 0) }
    }

    #[pallet::pallet]
    pub struct Pallet<T>(_);

    // ================================================================
    // Storage
    // ================================================================

    /// Map: request hash → validation record. The hash is the global
    /// identity of a request; reuse is rejected across all agents.
    #[pallet::storage]
    #[pallet::getter(fn get_validation_status)]
    pub type Validations<T: Config> =
        StorageMap<_, Blake2_128Concat, H256, ValidationRecord<T>, OptionQuery>;

    /// Dense sequence of request hashes per agent, in request order.
    #[pallet::storage]
    pub type AgentValidations<T: Config> = StorageDoubleMap<
        _,
        Blake2_128Concat, AgentId,
        Blake2_128Concat, u64,
        H256,
        OptionQuery,
    >;

    /// Length of the [`AgentValidations`] sequence per agent.
    #[pallet::storage]
    #[pallet::getter(fn agent_validation_count)]
    pub type AgentValidationCount<T: Config> =
        StorageMap<_, Blake2_128Concat, AgentId, u64, ValueQuery>;

    /// Dense sequence of request hashes per validator, in request order.
    #[pallet::storage]
    pub type ValidatorRequests<T: Config> = StorageDoubleMap<
        _,
        Blake2_128Concat, T::AccountId,
        Blake2_128Concat, u64,
        H256,
        OptionQuery,
    >;

    /// Length of the [`ValidatorRequests`] sequence per validator.
    #[pallet::storage]
    #[pallet::getter(fn validator_request_count)]
    pub type ValidatorRequestCount<T: Config> =
        StorageMap<_, Blake2_128Concat, T::AccountId, u64, ValueQuery>;

    /// Running aggregate of latest scores per agent. Raw 0–100 values,
    /// responded requests only.
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
        /// A validation was requested from a validator.
        ValidationRequested {
            agent_id: AgentId,
            validator: T::AccountId,
            request_hash: H256,
        },
        /// A validator responded (first time or overwrite).
        ValidationResponded {
            agent_id: AgentId,
            validator: T::AccountId,
            request_hash: H256,
            response: ResponseScore,
        },
    }

    // ================================================================
    // Errors — stable numeric codes in `primitives::codes::validation`
    // ================================================================

    #[pallet::error]
    pub enum Error<T> {
        /// Caller may not act for this agent / is not the validator (2000).
        NotAuthorized,
        /// No agent with this id (2001).
        AgentNotFound,
        /// No validation with this request hash (2002).
        ValidationNotFound,
        /// The request hash is already in use (2003).
        ValidationExists,
        /// The agent's owner cannot be its validator (2004).
        InvalidValidator,
        /// Response score exceeds 100 (2005).
        InvalidResponse,
    }

    // ================================================================
    // Extrinsics
    // ================================================================

    #[pallet::call]
    impl<T: Config> Pallet<T> {
        /// Request a validation of `agent_id` from `validator`. Caller
        /// must be the agent's owner or an operator; the validator must
        /// be someone else — self-attestation scores are worthless.
        #[pallet::call_index(0)]
        #[pallet::weight(T::WeightInfo::validation_request())]
        pub fn validation_request(
            origin: OriginFor<T>,
            validator: T::AccountId,
            agent_id: AgentId,
            uri: BoundedUri,
            request_hash: H256,
        ) -> DispatchResult {
            let who = ensure_signed(origin)?;
            let authorized = T::Identity::is_authorized_or_owner(&who, agent_id)
                .ok_or(Error::<T>::AgentNotFound)?;
            ensure!(authorized, Error::<T>::NotAuthorized);

            let owner = T::Identity::owner_of(agent_id).ok_or(Error::<T>::AgentNotFound)?;
            ensure!(validator != owner, Error::<T>::InvalidValidator);
            ensure!(!Validations::<T>::contains_key(request_hash), Error::<T>::ValidationExists);

            let now = frame_system::Pallet::<T>::block_number();
            let record = ValidationRecord::<T> {
                agent_id,
                validator: validator.clone(),
                request_uri: uri,
                response: 0,
                response_uri: BoundedUri::default(),
                response_hash: H256::zero(),
                tag: BoundedTag::default(),
                has_response: false,
                requested_at: now,
                last_update: now,
            };
            Validations::<T>::insert(request_hash, record);

            let agent_seq = AgentValidationCount::<T>::get(agent_id);
            AgentValidations::<T>::insert(agent_id, agent_seq, request_hash);
            AgentValidationCount::<T>::insert(
                agent_id,
                agent_seq.checked_add(1).ok_or(ArithmeticError::Overflow)?,
            );

            let validator_seq = ValidatorRequestCount::<T>::get(&validator);
            ValidatorRequests::<T>::insert(&validator, validator_seq, request_hash);
            ValidatorRequestCount::<T>::insert(
                &validator,
                validator_seq.checked_add(1).ok_or(ArithmeticError::Overflow)?,
            );

            Self::deposit_event(Event::ValidationRequested { agent_id, validator, request_hash });
            Ok(())
        }

        /// Respond to a validation request. Only the named validator;
        /// re-entering overwrites the previous response and replaces
        /// its score in the summary, count unchanged.
        #[pallet::call_index(1)]
        #[pallet::weight(T::WeightInfo::validation_response())]
        pub fn validation_response(
            origin: OriginFor<T>,
            request_hash: H256,
            response: ResponseScore,
            uri: BoundedUri,
            response_hash: H256,
            tag: BoundedTag,
        ) -> DispatchResult {
            let who = ensure_signed(origin)?;
            let mut record =
                Validations::<T>::get(request_hash).ok_or(Error::<T>::ValidationNotFound)?;
            ensure!(record.validator == who, Error::<T>::NotAuthorized);
            ensure!(response <= MAX_RESPONSE_SCORE, Error::<T>::InvalidResponse);

            Summary::<T>::try_mutate(record.agent_id, |agg| -> DispatchResult {
                *agg = if record.has_response {
                    agg.replace(record.response as i128, response as i128)
                } else {
                    agg.add(response as i128)
                }
                .ok_or(ArithmeticError::Overflow)?;
                Ok(())
            })?;

            record.response = response;
            record.response_uri = uri;
            record.response_hash = response_hash;
            record.tag = tag;
            record.has_response = true;
            record.last_update = frame_system::Pallet::<T>::block_number();
            let agent_id = record.agent_id;
            Validations::<T>::insert(request_hash, record);

            Self::deposit_event(Event::ValidationResponded {
                agent_id,
                validator: who,
                request_hash,
                response,
            });
            Ok(())
        }
    }

    // ================================================================
    // Read API
    // ================================================================

    impl<T: Config> Pallet<T> {
        /// Request hashes for one agent, in request order, one page at
        /// a time.
        pub fn get_agent_validations(agent_id: AgentId, cursor: Option<u64>) -> Page<H256> {
            paginate(AgentValidationCount::<T>::get(agent_id), cursor, |seq| {
                AgentValidations::<T>::get(agent_id, seq)
            })
        }

        /// Request hashes addressed to one validator, in request order,
        /// one page at a time.
        pub fn get_validator_requests(
            validator: &T::AccountId,
            cursor: Option<u64>,
        ) -> Page<H256> {
            paginate(ValidatorRequestCount::<T>::get(validator), cursor, |seq| {
                ValidatorRequests::<T>::get(validator, seq)
            })
        }

        /// O(1) summary of the latest scores across responded requests.
        pub fn get_summary(agent_id: AgentId) -> ValidationSummary {
            let agg = Summary::<T>::get(agent_id);
            ValidationSummary {
                count: agg.count,
                // Scores are 0–100, so the truncated mean fits.
                avg_response: agg.mean() as ResponseScore,
            }
        }

        pub fn get_version() -> &'static str {
            VERSION
        }
    }
}

#[cfg(test)]
mod mock;
#[cfg(test)]
mod tests;
