//! 시크릿 생성

use base64::{engine::general_purpose, Engine as _};
use opr_core::keys::{KeyMaterial, SecuritySettings, DEFAULT_TOKEN_TTL};
use rand::distributions::Alphanumeric;
use rand::{Rng, RngCore};

const SIGNING_SECRET_BYTES: usize = 48;
const ENCRYPTION_SECRET_CHARS: usize = 32;

/// (서명 시크릿, 암호화 시크릿) 생성
fn generate_secrets() -> (String, String) {
    let mut rng = rand::thread_rng();

    let mut signing = [0u8; SIGNING_SECRET_BYTES];
    rng.fill_bytes(&mut signing);

    let encryption: String = (&mut rng)
        .sample_iter(&Alphanumeric)
        .take(ENCRYPTION_SECRET_CHARS)
        .map(char::from)
        .collect();

    (general_purpose::STANDARD.encode(signing), encryption)
}

pub fn generate() -> anyhow::Result<()> {
    let (signing_secret, encryption_secret) = generate_secrets();

    // Advisor가 기동 시 거부하지 않는지 확인
    KeyMaterial::load(&SecuritySettings {
        signing_secret: signing_secret.clone(),
        encryption_secret: encryption_secret.clone(),
        token_ttl: DEFAULT_TOKEN_TTL,
    })?;

    println!("OPR_JWT_SECRET={}", signing_secret);
    println!("OPR_ENCRYPTION_SECRET={}", encryption_secret);
    eprintln!("Changing OPR_ENCRYPTION_SECRET makes previously encrypted fields unreadable.");
    Ok(())
}
