//! # Identity Registry Pallet
//!
//! The foundation pallet of AgentTrust. Every agent is a numbered entry
//! with an owner account, an optional bound agent wallet, a service URI,
//! and a small key/value metadata store.
//!
//! ## Responsibilities
//! - Sequential agent registration (ids are dense, starting at 0)
//! - Ownership transfer with a stale-owner guard
//! - Per-agent operator approvals (owner-granted)
//! - Metadata with one reserved key (`agentWallet`) that only the
//!   dedicated wallet entry points may touch
//! - Wallet binding, direct or by the new wallet's signature
//! - `AgentRegistryInterface` for the reputation and validation pallets
//!
//! ## Reverse index caveat
//! `AgentIdByAccount` is a single-valued map shared by owner and wallet
//! lookups, last write wins. An owner holding several agents only
//! resolves to the most recently written one, and wallet operations can
//! clear the owner's entry. This mirrors the behavior indexers already
//! depend on; widening it to a multi-map is a breaking change.

#![cfg_attr(not(feature = "std"), no_std)]

pub use pallet::*;

#[frame_support::pallet]
pub mod pallet {
    use agenttrust_primitives::*;
    use codec::Encode;
    use frame_support::pallet_prelude::*;
    use frame_system::pallet_prelude::*;

    /// Registry interface version reported by [`Pallet::get_version`].
    pub const VERSION: &str = "3.0.0";

    // ================================================================
    // Pallet-local types
    // ================================================================

    /// Full on-chain record for a registered agent.
    #[derive(Clone, PartialEq, Eq, Encode, Decode, MaxEncodedLen, TypeInfo, Debug)]
    #[scale_info(skip_type_params(T))]
    pub struct AgentRecord<T: Config> {
        /// Current owner. Full control: transfer, approvals, metadata.
        pub owner: T::AccountId,
        /// Bound agent wallet. Auto-bound to the owner at registration,
        /// cleared on transfer, otherwise only mutable through the
        /// wallet entry points.
        pub wallet: Option<T::AccountId>,
        /// Service endpoint / agent card URI. May be empty.
        pub uri: BoundedUri,
        /// Block number when the agent registered.
        pub registered_at: BlockNumberFor<T>,
    }

    /// Metadata entries accepted by `register_full` in one call.
    pub type MetadataEntries = BoundedVec<(BoundedMetadataKey, BoundedMetadataValue), MaxMetadataEntries>;

    // ================================================================
    // Pallet configuration
    // ================================================================

    #[pallet::config]
    pub trait Config: frame_system::Config {
        /// The overarching runtime event type.
        type RuntimeEvent: From<Event<Self>> + IsType<<Self as frame_system::Config>::RuntimeEvent>;

        /// Verifier for the signed wallet-change path. The pallet never
        /// inspects signature internals; it hands over the encoded
        /// message and acts on the boolean.
        type SignatureVerifier: SignatureVerifier<Self::AccountId>;

        type WeightInfo: WeightInfo;
    }

    pub trait WeightInfo {
        fn register() -> Weight;
        fn transfer() -> Weight;
        fn set_approval_for_all() -> Weight;
        fn set_metadata() -> Weight;
        fn set_agent_wallet() -> Weight;
    }

    pub struct DefaultWeightInfo;
    impl WeightInfo for DefaultWeightInfo {
        fn register() -> Weight { Weight::from_parts(80_000_000, 0) }
        fn transfer() -> Weight { Weight::from_parts(60_000_000, 0) }
        fn set_approval_for_all() -> Weight { Weight::from_parts(40_000_000, 0) }
        fn set_metadata() -> Weight { Weight::from_parts(40_000_000, 0) }
        fn set_agent_wallet() -> Weight { Weight::from_parts(60_000_000, 0) }
    }

    #[pallet::pallet]
    pub struct Pallet<T>(_);

    // ================================================================
    // Storage
    // ================================================================

    /// Next agent id to allocate. The first registered agent gets 0,
    /// so this doubles as the total agent count.
    #[pallet::storage]
    #[pallet::getter(fn next_agent_id)]
    pub type NextAgentId<T: Config> = StorageValue<_, AgentId, ValueQuery>;

    /// Map: AgentId → AgentRecord.
    #[pallet::storage]
    #[pallet::getter(fn agents)]
    pub type Agents<T: Config> =
        StorageMap<_, Blake2_128Concat, AgentId, AgentRecord<T>, OptionQuery>;

    /// Operator approvals: (AgentId, operator) → approved.
    /// Operators can do everything the owner can except transfer
    /// ownership and grant further approvals.
    #[pallet::storage]
    #[pallet::getter(fn is_approved_for_all)]
    pub type OperatorApprovals<T: Config> = StorageDoubleMap<
        _,
        Blake2_128Concat, AgentId,
        Blake2_128Concat, T::AccountId,
        bool,
        ValueQuery,
    >;

    /// Free-form metadata: (AgentId, key) → value.
    /// The `agentWallet` key is reserved and never stored here.
    #[pallet::storage]
    #[pallet::getter(fn metadata)]
    pub type Metadata<T: Config> = StorageDoubleMap<
        _,
        Blake2_128Concat, AgentId,
        Blake2_128Concat, BoundedMetadataKey,
        BoundedMetadataValue,
        OptionQuery,
    >;

    /// Single-valued reverse index: account → most recently associated
    /// agent id. Written on registration (owner), wallet binding
    /// (wallet), and transfer (new owner); cleared on transfer (old
    /// owner + old wallet) and wallet unset. Last write wins — see the
    /// pallet-level doc for the information-loss caveat.
    #[pallet::storage]
    #[pallet::getter(fn agent_id_by_account)]
    pub type AgentIdByAccount<T: Config> =
        StorageMap<_, Blake2_128Concat, T::AccountId, AgentId, OptionQuery>;

    // ================================================================
    // Events
    // ================================================================

    #[pallet::event]
    #[pallet::generate_deposit(pub(super) fn deposit_event)]
    pub enum Event<T: Config> {
        /// A new agent was registered. The wallet is auto-bound to the owner.
        AgentRegistered {
            agent_id: AgentId,
            owner: T::AccountId,
        },
        /// Agent ownership changed hands. The wallet binding was cleared.
        AgentTransferred {
            agent_id: AgentId,
            old_owner: T::AccountId,
            new_owner: T::AccountId,
        },
        /// An operator approval was granted or revoked.
        ApprovalSet {
            agent_id: AgentId,
            operator: T::AccountId,
            approved: bool,
        },
        /// A metadata entry was written.
        MetadataSet {
            agent_id: AgentId,
            key: BoundedMetadataKey,
        },
        /// The agent's service URI was replaced.
        UriUpdated {
            agent_id: AgentId,
        },
        /// The agent wallet was bound.
        WalletSet {
            agent_id: AgentId,
            wallet: T::AccountId,
        },
        /// The agent wallet binding was cleared.
        WalletUnset {
            agent_id: AgentId,
        },
    }

    // ================================================================
    // Errors — stable numeric codes in `primitives::codes::identity`
    // ================================================================

    #[pallet::error]
    pub enum Error<T> {
        /// Caller is neither the owner nor an approved operator (1000).
        NotAuthorized,
        /// No agent with this id (1001).
        AgentNotFound,
        /// Transfer caller does not match the stated current owner (1002).
        InvalidSender,
        /// The `agentWallet` metadata key is reserved (1004).
        ReservedKey,
        /// Wallet-consent signature did not verify (1005).
        InvalidSignature,
        /// Wallet-consent signature deadline has passed (1006).
        ExpiredSignature,
        /// The agent id space is exhausted (1007).
        AgentIdOverflow,
        /// The account is already this agent's wallet (1008).
        WalletAlreadySet,
        /// The reverse index binds this account to a different agent (1009).
        WalletConflict,
    }

    // ================================================================
    // Extrinsics
    // ================================================================

    #[pallet::call]
    impl<T: Config> Pallet<T> {
        /// Register a new agent with no URI and no metadata.
        /// The caller becomes owner and auto-bound wallet.
        #[pallet::call_index(0)]
        #[pallet::weight(T::WeightInfo::register())]
        pub fn register(origin: OriginFor<T>) -> DispatchResult {
            let who = ensure_signed(origin)?;
            Self::do_register(who, BoundedUri::default(), &[])?;
            Ok(())
        }

        /// Register a new agent with a service URI.
        #[pallet::call_index(1)]
        #[pallet::weight(T::WeightInfo::register())]
        pub fn register_with_uri(origin: OriginFor<T>, uri: BoundedUri) -> DispatchResult {
            let who = ensure_signed(origin)?;
            Self::do_register(who, uri, &[])?;
            Ok(())
        }

        /// Register a new agent with a URI and initial metadata.
        /// Rejects the reserved `agentWallet` key before any write.
        #[pallet::call_index(2)]
        #[pallet::weight(T::WeightInfo::register())]
        pub fn register_full(
            origin: OriginFor<T>,
            uri: BoundedUri,
            metadata: MetadataEntries,
        ) -> DispatchResult {
            let who = ensure_signed(origin)?;
            Self::do_register(who, uri, &metadata)?;
            Ok(())
        }

        /// Transfer agent ownership. `expected_owner` guards against a
        /// transfer racing another transfer: the caller states who they
        /// believe the current owner is, and the call fails if storage
        /// disagrees. Clears the wallet binding — the new owner rebinds
        /// explicitly.
        #[pallet::call_index(3)]
        #[pallet::weight(T::WeightInfo::transfer())]
        pub fn transfer(
            origin: OriginFor<T>,
            agent_id: AgentId,
            expected_owner: T::AccountId,
            new_owner: T::AccountId,
        ) -> DispatchResult {
            let who = ensure_signed(origin)?;
            ensure!(who == expected_owner, Error::<T>::InvalidSender);

            let mut record = Agents::<T>::get(agent_id).ok_or(Error::<T>::AgentNotFound)?;
            ensure!(record.owner == expected_owner, Error::<T>::NotAuthorized);

            if let Some(old_wallet) = record.wallet.take() {
                AgentIdByAccount::<T>::remove(&old_wallet);
            }
            // Clears the old owner's reverse entry even if they still
            // own other agents (last-write-wins index, see pallet doc).
            AgentIdByAccount::<T>::remove(&record.owner);

            let old_owner = record.owner.clone();
            record.owner = new_owner.clone();
            Agents::<T>::insert(agent_id, record);
            AgentIdByAccount::<T>::insert(&new_owner, agent_id);

            Self::deposit_event(Event::AgentTransferred { agent_id, old_owner, new_owner });
            Ok(())
        }

        /// Grant or revoke an operator approval. Owner only.
        #[pallet::call_index(4)]
        #[pallet::weight(T::WeightInfo::set_approval_for_all())]
        pub fn set_approval_for_all(
            origin: OriginFor<T>,
            agent_id: AgentId,
            operator: T::AccountId,
            approved: bool,
        ) -> DispatchResult {
            let who = ensure_signed(origin)?;
            let record = Agents::<T>::get(agent_id).ok_or(Error::<T>::AgentNotFound)?;
            ensure!(record.owner == who, Error::<T>::NotAuthorized);

            if approved {
                OperatorApprovals::<T>::insert(agent_id, &operator, true);
            } else {
                OperatorApprovals::<T>::remove(agent_id, &operator);
            }

            Self::deposit_event(Event::ApprovalSet { agent_id, operator, approved });
            Ok(())
        }

        /// Write a metadata entry. Owner or operator.
        #[pallet::call_index(5)]
        #[pallet::weight(T::WeightInfo::set_metadata())]
        pub fn set_metadata(
            origin: OriginFor<T>,
            agent_id: AgentId,
            key: BoundedMetadataKey,
            value: BoundedMetadataValue,
        ) -> DispatchResult {
            let who = ensure_signed(origin)?;
            Self::ensure_owner_or_operator(&who, agent_id)?;
            ensure!(key.as_slice() != RESERVED_METADATA_KEY, Error::<T>::ReservedKey);

            Metadata::<T>::insert(agent_id, &key, value);
            Self::deposit_event(Event::MetadataSet { agent_id, key });
            Ok(())
        }

        /// Replace the agent's service URI. Owner or operator.
        #[pallet::call_index(6)]
        #[pallet::weight(T::WeightInfo::set_metadata())]
        pub fn set_agent_uri(
            origin: OriginFor<T>,
            agent_id: AgentId,
            uri: BoundedUri,
        ) -> DispatchResult {
            let who = ensure_signed(origin)?;
            let mut record = Self::ensure_owner_or_operator(&who, agent_id)?;

            record.uri = uri;
            Agents::<T>::insert(agent_id, record);
            Self::deposit_event(Event::UriUpdated { agent_id });
            Ok(())
        }

        /// Bind the caller as the agent's wallet. Owner or operator.
        /// A caller the reverse index already binds to a DIFFERENT
        /// agent is rejected — one account, one wallet role.
        #[pallet::call_index(7)]
        #[pallet::weight(T::WeightInfo::set_agent_wallet())]
        pub fn set_agent_wallet_direct(origin: OriginFor<T>, agent_id: AgentId) -> DispatchResult {
            let who = ensure_signed(origin)?;
            let record = Self::ensure_owner_or_operator(&who, agent_id)?;

            ensure!(record.wallet.as_ref() != Some(&who), Error::<T>::WalletAlreadySet);
            Self::ensure_no_foreign_binding(&who, agent_id)?;

            Self::bind_wallet(agent_id, record, who);
            Ok(())
        }

        /// Bind `new_wallet` as the agent's wallet with the wallet's
        /// consent: `new_wallet` must have signed
        /// `(agent_id, new_wallet, owner, deadline)` (SCALE-encoded).
        /// Caller is owner or operator; the signature proves the wallet
        /// agreed to the binding.
        #[pallet::call_index(8)]
        #[pallet::weight(T::WeightInfo::set_agent_wallet())]
        pub fn set_agent_wallet_signed(
            origin: OriginFor<T>,
            agent_id: AgentId,
            new_wallet: T::AccountId,
            deadline: BlockNumberFor<T>,
            signature: BoundedSignature,
        ) -> DispatchResult {
            let who = ensure_signed(origin)?;
            let record = Self::ensure_owner_or_operator(&who, agent_id)?;

            let now = frame_system::Pallet::<T>::block_number();
            ensure!(now <= deadline, Error::<T>::ExpiredSignature);

            ensure!(record.wallet.as_ref() != Some(&new_wallet), Error::<T>::WalletAlreadySet);
            Self::ensure_no_foreign_binding(&new_wallet, agent_id)?;

            let message = (agent_id, &new_wallet, &record.owner, deadline).encode();
            ensure!(
                T::SignatureVerifier::verify(&message, &signature, &new_wallet),
                Error::<T>::InvalidSignature,
            );

            Self::bind_wallet(agent_id, record, new_wallet);
            Ok(())
        }

        /// Clear the agent's wallet binding. Owner or operator.
        /// Idempotent: unsetting an unbound agent succeeds.
        #[pallet::call_index(9)]
        #[pallet::weight(T::WeightInfo::set_agent_wallet())]
        pub fn unset_agent_wallet(origin: OriginFor<T>, agent_id: AgentId) -> DispatchResult {
            let who = ensure_signed(origin)?;
            let mut record = Self::ensure_owner_or_operator(&who, agent_id)?;

            if let Some(old_wallet) = record.wallet.take() {
                // Removes the reverse entry even when the wallet is
                // still the owner (registration auto-bind case).
                AgentIdByAccount::<T>::remove(&old_wallet);
                Agents::<T>::insert(agent_id, record);
            }

            Self::deposit_event(Event::WalletUnset { agent_id });
            Ok(())
        }
    }

    // ================================================================
    // Internal helpers
    // ================================================================

    impl<T: Config> Pallet<T> {
        fn do_register(
            who: T::AccountId,
            uri: BoundedUri,
            metadata: &[(BoundedMetadataKey, BoundedMetadataValue)],
        ) -> Result<AgentId, DispatchError> {
            // Reject the reserved key before any state is touched.
            ensure!(
                metadata.iter().all(|(key, _)| key.as_slice() != RESERVED_METADATA_KEY),
                Error::<T>::ReservedKey,
            );

            let agent_id = NextAgentId::<T>::get();
            let next = agent_id.checked_add(1).ok_or(Error::<T>::AgentIdOverflow)?;

            let record = AgentRecord::<T> {
                owner: who.clone(),
                wallet: Some(who.clone()),
                uri,
                registered_at: frame_system::Pallet::<T>::block_number(),
            };

            NextAgentId::<T>::put(next);
            Agents::<T>::insert(agent_id, record);
            AgentIdByAccount::<T>::insert(&who, agent_id);
            for (key, value) in metadata {
                Metadata::<T>::insert(agent_id, key, value);
            }

            Self::deposit_event(Event::AgentRegistered { agent_id, owner: who });
            Ok(agent_id)
        }

        /// Load the record and check the caller is owner or approved
        /// operator. Missing agent beats missing authorization.
        fn ensure_owner_or_operator(
            who: &T::AccountId,
            agent_id: AgentId,
        ) -> Result<AgentRecord<T>, DispatchError> {
            let record = Agents::<T>::get(agent_id).ok_or(Error::<T>::AgentNotFound)?;
            ensure!(
                record.owner == *who || OperatorApprovals::<T>::get(agent_id, who),
                Error::<T>::NotAuthorized,
            );
            Ok(record)
        }

        /// Reject a wallet candidate the reverse index already binds to
        /// a different agent.
        fn ensure_no_foreign_binding(
            candidate: &T::AccountId,
            agent_id: AgentId,
        ) -> DispatchResult {
            if let Some(bound) = AgentIdByAccount::<T>::get(candidate) {
                ensure!(bound == agent_id, Error::<T>::WalletConflict);
            }
            Ok(())
        }

        fn bind_wallet(agent_id: AgentId, mut record: AgentRecord<T>, new_wallet: T::AccountId) {
            if let Some(old_wallet) = record.wallet.take() {
                AgentIdByAccount::<T>::remove(&old_wallet);
            }
            record.wallet = Some(new_wallet.clone());
            Agents::<T>::insert(agent_id, record);
            AgentIdByAccount::<T>::insert(&new_wallet, agent_id);

            Self::deposit_event(Event::WalletSet { agent_id, wallet: new_wallet });
        }
    }

    // ================================================================
    // Read API
    // ================================================================

    impl<T: Config> Pallet<T> {
        pub fn owner_of(agent_id: AgentId) -> Option<T::AccountId> {
            Agents::<T>::get(agent_id).map(|r| r.owner)
        }

        pub fn get_uri(agent_id: AgentId) -> Option<BoundedUri> {
            Agents::<T>::get(agent_id).map(|r| r.uri)
        }

        pub fn get_metadata(agent_id: AgentId, key: &BoundedMetadataKey) -> Option<BoundedMetadataValue> {
            Metadata::<T>::get(agent_id, key)
        }

        pub fn get_agent_wallet(agent_id: AgentId) -> Option<T::AccountId> {
            Agents::<T>::get(agent_id).and_then(|r| r.wallet)
        }

        /// `Some(true)` owner or operator, `Some(false)` neither,
        /// `None` no such agent.
        pub fn is_authorized_or_owner(who: &T::AccountId, agent_id: AgentId) -> Option<bool> {
            let record = Agents::<T>::get(agent_id)?;
            Some(record.owner == *who || OperatorApprovals::<T>::get(agent_id, who))
        }

        /// Total agents ever registered (ids are dense and never freed).
        pub fn agent_count() -> u64 {
            NextAgentId::<T>::get()
        }

        pub fn get_version() -> &'static str {
            VERSION
        }
    }

    // ================================================================
    // Implement the cross-pallet trait interface
    // ================================================================

    impl<T: Config> AgentRegistryInterface<T::AccountId> for Pallet<T> {
        fn agent_exists(agent_id: AgentId) -> bool {
            Agents::<T>::contains_key(agent_id)
        }

        fn owner_of(agent_id: AgentId) -> Option<T::AccountId> {
            Pallet::<T>::owner_of(agent_id)
        }

        fn is_authorized_or_owner(who: &T::AccountId, agent_id: AgentId) -> Option<bool> {
            Pallet::<T>::is_authorized_or_owner(who, agent_id)
        }
    }
}

#[cfg(test)]
mod mock;
