use crate as pallet_validation_registry;
use agenttrust_primitives::SignatureVerifier;
use frame_support::derive_impl;
use sp_runtime::BuildStorage;

type Block = frame_system::mocking::MockBlock<Test>;

// The mock wires the real identity pallet so authorization flows run
// against real ownership state.
frame_support::construct_runtime!(
    pub enum Test {
        System: frame_system,
        IdentityRegistry: pallet_identity_registry,
        ValidationRegistry: pallet_validation_registry,
    }
);

#[derive_impl(frame_system::config_preludes::TestDefaultConfig as frame_system::DefaultConfig)]
impl frame_system::Config for Test {
    type Block = Block;
}

impl pallet_identity_registry::Config for Test {
    type RuntimeEvent = RuntimeEvent;
    type SignatureVerifier = MockVerifier;
    type WeightInfo = pallet_identity_registry::DefaultWeightInfo;
}

impl pallet_validation_registry::Config for Test {
    type RuntimeEvent = RuntimeEvent;
    type Identity = IdentityRegistry;
    type WeightInfo = pallet_validation_registry::DefaultWeightInfo;
}

/// Deterministic stand-in for the identity pallet's signature scheme;
/// the validation tests never exercise the signed wallet path.
pub struct MockVerifier;

impl SignatureVerifier<u64> for MockVerifier {
    fn verify(message: &[u8], signature: &[u8], expected_signer: &u64) -> bool {
        let mut expected = sp_io::hashing::blake2_256(message).to_vec();
        expected.extend_from_slice(&sp_io::hashing::blake2_256(&expected_signer.to_le_bytes()));
        signature == expected.as_slice()
    }
}

pub fn new_test_ext() -> sp_io::TestExternalities {
    let storage = frame_system::GenesisConfig::<Test>::default()
        .build_storage()
        .unwrap();
    let mut ext = sp_io::TestExternalities::new(storage);
    ext.execute_with(|| System::set_block_number(1));
    ext
}
