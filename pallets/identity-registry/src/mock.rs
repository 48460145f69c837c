use crate as pallet_identity_registry;
use agenttrust_primitives::SignatureVerifier;
use frame_support::derive_impl;
use sp_runtime::BuildStorage;

type Block = frame_system::mocking::MockBlock<Test>;

frame_support::construct_runtime!(
    pub enum Test {
        System: frame_system,
        IdentityRegistry: pallet_identity_registry,
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

/// Deterministic stand-in for the runtime's signature scheme: a
/// "signature" is valid iff it equals [`sign`] of the same message and
/// signer. Lets tests mint valid and invalid consent signatures without
/// real key material.
pub struct MockVerifier;

impl SignatureVerifier<u64> for MockVerifier {
    fn verify(message: &[u8], signature: &[u8], expected_signer: &u64) -> bool {
        signature == sign(message, *expected_signer).as_slice()
    }
}

/// Produce the 64-byte "signature" [`MockVerifier`] accepts.
pub fn sign(message: &[u8], signer: u64) -> Vec<u8> {
    let mut out = sp_io::hashing::blake2_256(message).to_vec();
    out.extend_from_slice(&sp_io::hashing::blake2_256(&signer.to_le_bytes()));
    out
}

pub fn new_test_ext() -> sp_io::TestExternalities {
    let storage = frame_system::GenesisConfig::<Test>::default()
        .build_storage()
        .unwrap();
    let mut ext = sp_io::TestExternalities::new(storage);
    ext.execute_with(|| System::set_block_number(1));
    ext
}
