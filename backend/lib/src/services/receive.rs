//! Receive address generation.
//!
//! Deposit addresses are demo placeholders: random strings in the right
//! format, not derived from any key material. The trait is the seam where a
//! real derivation scheme would plug in.

use rand::Rng;

use crate::repository::ReceiveAddresses;

/// Base58 alphabet used by legacy Bitcoin addresses (no 0, O, I, l)
const BASE58_ALPHABET: &[u8] = b"123456789ABCDEFGHJKLMNPQRSTUVWXYZabcdefghijkmnopqrstuvwxyz";

/// Source of deposit addresses assigned to new users.
pub trait ReceiveAddressProvider: Send + Sync {
    fn bitcoin_address(&self) -> String;

    fn ethereum_address(&self) -> String;

    /// One address per supported currency, for a freshly created user.
    fn generate(&self) -> ReceiveAddresses {
        ReceiveAddresses {
            btc_address: self.bitcoin_address(),
            eth_address: self.ethereum_address(),
        }
    }
}

/// Random placeholder addresses in valid formats.
pub struct MockAddressProvider;

impl ReceiveAddressProvider for MockAddressProvider {
    fn bitcoin_address(&self) -> String {
        let mut rng = rand::thread_rng();
        let mut address = String::with_capacity(34);
        address.push('1');
        for _ in 0..33 {
            let idx = rng.gen_range(0..BASE58_ALPHABET.len());
            address.push(BASE58_ALPHABET[idx] as char);
        }
        address
    }

    fn ethereum_address(&self) -> String {
        let mut bytes = [0u8; 20];
        rand::thread_rng().fill(&mut bytes);
        format!("0x{}", hex::encode(bytes))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::validation::{validate_btc_address, validate_eth_address};

    #[test]
    fn generated_btc_addresses_are_valid_legacy() {
        let provider = MockAddressProvider;
        for _ in 0..100 {
            let address = provider.bitcoin_address();
            assert_eq!(address.len(), 34);
            assert!(address.starts_with('1'));
            validate_btc_address(&address).expect("generated BTC address should validate");
        }
    }

    #[test]
    fn generated_eth_addresses_are_valid() {
        let provider = MockAddressProvider;
        for _ in 0..100 {
            let address = provider.ethereum_address();
            validate_eth_address(&address).expect("generated ETH address should validate");
        }
    }

    #[test]
    fn generate_assigns_both_currencies() {
        let addresses = MockAddressProvider.generate();
        assert!(addresses.btc_address.starts_with('1'));
        assert!(addresses.eth_address.starts_with("0x"));
        assert_ne!(addresses.btc_address, MockAddressProvider.bitcoin_address());
    }
}
