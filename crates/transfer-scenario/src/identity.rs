use alloy_primitives::Address;
use ledger_sdk::signer::LocalSigner;

/// A recipient created for a single run.
///
/// The address comes from a freshly generated random key which is dropped immediately, so
/// the account has no history on any chain and is never reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FreshIdentity {
    address: Address,
}

impl FreshIdentity {
    pub fn generate() -> Self {
        Self { address: LocalSigner::random().address() }
    }

    pub const fn address(&self) -> Address {
        self.address
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_generated_identities_are_unique() {
        let addresses: HashSet<_> = (0..64).map(|_| FreshIdentity::generate().address()).collect();
        assert_eq!(addresses.len(), 64);
    }
}
