use crate::error::Error;

/// Validates that the passed in ethereum address is:
///
/// * a hex string
/// * is 42 characters long (0x + 20 bytes)
/// * all characters after the first 0x are valid ascii hex digits
//TODO: consider switching to validating with a dedicated library
pub fn validate_eth_address(address: &str) -> Result<(), Error> {
    if address.starts_with("0x")
        && address.len() == 42
        && address[2..].chars().all(|c| c.is_ascii_hexdigit())
    {
        Ok(())
    } else {
        Err(Error::BadRequest("Invalid Ethereum address".to_string()))
    }
}

/// Validates that the passed in bitcoin address is either:
///
/// * a legacy/P2SH address: '1' or '3' followed by 25-34 base58 characters
///   (the base58 alphabet excludes 0, O, I and l)
/// * a bech32 address: "bc1" followed by 7-87 characters of the bech32 set
pub fn validate_btc_address(address: &str) -> Result<(), Error> {
    let valid = if let Some(rest) = address.strip_prefix("bc1") {
        (7..=87).contains(&rest.len()) && rest.chars().all(is_bech32_char)
    } else if address.starts_with('1') || address.starts_with('3') {
        (26..=35).contains(&address.len()) && address.chars().all(is_base58_char)
    } else {
        false
    };

    if valid {
        Ok(())
    } else {
        Err(Error::BadRequest("Invalid Bitcoin address".to_string()))
    }
}

fn is_base58_char(c: char) -> bool {
    c.is_ascii_alphanumeric() && !matches!(c, '0' | 'O' | 'I' | 'l')
}

fn is_bech32_char(c: char) -> bool {
    // bech32 excludes '1', 'b', 'i' and 'o'
    matches!(c, '0' | '2'..='9' | 'a' | 'c'..='h' | 'j'..='n' | 'p'..='z')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_valid_eth_addresses() {
        validate_eth_address("0x8ba1f109551bD432803012645Ac136ddd64DBA72").unwrap();
        validate_eth_address("0x0000000000000000000000000000000000000000").unwrap();
    }

    #[test]
    fn rejects_invalid_eth_addresses() {
        for bad in [
            "",
            "0x",
            "8ba1f109551bD432803012645Ac136ddd64DBA72",
            "0x8ba1f109551bD432803012645Ac136ddd64DBA7",
            "0x8ba1f109551bD432803012645Ac136ddd64DBA723",
            "0xZZa1f109551bD432803012645Ac136ddd64DBA72",
        ] {
            assert!(validate_eth_address(bad).is_err(), "{bad:?}");
        }
    }

    #[test]
    fn accepts_valid_btc_addresses() {
        // Legacy
        validate_btc_address("1BvBMSEYstWetqTFn5Au4m4GFg7xJaNVN2").unwrap();
        // P2SH
        validate_btc_address("3J98t1WpEZ73CNmQviecrnyiWrnqRhWNLy").unwrap();
        // Bech32
        validate_btc_address("bc1qar0srrr7xfkvy5l643lydnw9re59gtzzwf5mdq").unwrap();
    }

    #[test]
    fn rejects_invalid_btc_addresses() {
        for bad in [
            "",
            "2BvBMSEYstWetqTFn5Au4m4GFg7xJaNVN2",
            // base58 never contains '0', 'O', 'I' or 'l'
            "10vBMSEYstWetqTFn5Au4m4GFg7xJaNVN2",
            "1short",
            "bc1",
            "bc1qar0srrr7xfkvy5l643lydnw9re59gtzzwf5mdb", // 'b' is not bech32
        ] {
            assert!(validate_btc_address(bad).is_err(), "{bad:?}");
        }
    }
}
