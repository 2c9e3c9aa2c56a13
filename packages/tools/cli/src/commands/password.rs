//! 비밀번호 해시

pub fn hash(password: &str) -> anyhow::Result<()> {
    if password.is_empty() {
        anyhow::bail!("password must not be empty");
    }
    println!("{}", opr_core::auth::hash_password(password)?);
    Ok(())
}
