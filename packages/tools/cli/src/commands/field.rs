//! 필드 암복호화

use opr_core::crypto::FieldCipher;
use opr_core::keys::EncryptionKey;

fn cipher(secret: &str) -> anyhow::Result<FieldCipher> {
    Ok(FieldCipher::new(&EncryptionKey::from_secret(secret)?))
}

pub fn encrypt(secret: &str, value: &str) -> anyhow::Result<()> {
    println!("{}", cipher(secret)?.encrypt(value)?);
    Ok(())
}

pub fn decrypt(secret: &str, value: &str) -> anyhow::Result<()> {
    println!("{}", cipher(secret)?.decrypt(value)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_weak_secret_is_rejected() {
        assert!(cipher("short").is_err());
        assert!(encrypt("short", "value").is_err());
    }

    #[test]
    fn test_decrypt_with_wrong_secret_fails() {
        let blob = cipher("operum-field-secret-2024")
            .unwrap()
            .encrypt("12345678901")
            .unwrap();
        assert!(decrypt("another-field-secret-2024", &blob).is_err());
        assert!(decrypt("operum-field-secret-2024", &blob).is_ok());
    }
}
