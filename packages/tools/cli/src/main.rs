//! Operum CLI (`opr`)
//!
//! 키 생성, 비밀번호 해시, 필드 암복호화, 토큰 발급/검사 같은 운영 작업과
//! Advisor 로그인 세션 관리를 수행합니다.

use clap::{Parser, Subcommand};

mod commands;
mod config;

use config::CliConfig;

#[derive(Parser)]
#[command(name = "opr")]
#[command(author, version, about = "Operum CLI - operator tool for the Operum advisor", long_about = None)]
struct Cli {
    /// Advisor URL (overrides saved config)
    #[arg(long, global = true)]
    url: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    // ─────────────────────────────────────────────────────────────────────────
    // Session
    // ─────────────────────────────────────────────────────────────────────────
    /// Login to the advisor
    Login {
        #[arg(long)]
        username: String,
        #[arg(long, env = "OPR_PASSWORD", hide_env_values = true)]
        password: String,
    },

    /// Forget the saved token
    Logout,

    /// Show current principal
    Whoami,

    // ─────────────────────────────────────────────────────────────────────────
    // Offline tooling
    // ─────────────────────────────────────────────────────────────────────────
    /// Manage secrets
    Keys {
        #[command(subcommand)]
        action: KeysAction,
    },

    /// Password hashing
    Password {
        #[command(subcommand)]
        action: PasswordAction,
    },

    /// Encrypt or decrypt a stored field value
    Field {
        #[command(subcommand)]
        action: FieldAction,
    },

    /// Issue or inspect bearer tokens
    Token {
        #[command(subcommand)]
        action: TokenAction,
    },
}

// ─────────────────────────────────────────────────────────────────────────────
// Subcommand enums
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Subcommand)]
enum KeysAction {
    /// Generate a signing secret and an encryption secret
    Generate,
}

#[derive(Subcommand)]
enum PasswordAction {
    /// Hash a password for a credential store
    Hash {
        #[arg(long)]
        password: String,
    },
}

#[derive(Subcommand)]
enum FieldAction {
    /// Encrypt a plaintext value
    Encrypt {
        #[arg(long)]
        value: String,
        #[arg(long, env = "OPR_ENCRYPTION_SECRET", hide_env_values = true)]
        secret: String,
    },
    /// Decrypt a stored value
    Decrypt {
        #[arg(long)]
        value: String,
        #[arg(long, env = "OPR_ENCRYPTION_SECRET", hide_env_values = true)]
        secret: String,
    },
}

#[derive(Subcommand)]
enum TokenAction {
    /// Issue a token for a subject
    Issue {
        #[arg(long)]
        subject: String,
        #[arg(long, env = "OPR_TOKEN_TTL_SECS", default_value = "86400")]
        ttl_secs: u64,
        #[arg(long, env = "OPR_JWT_SECRET", hide_env_values = true)]
        secret: String,
    },
    /// Validate a token and print its claims
    Inspect {
        #[arg(long)]
        token: String,
        #[arg(long, env = "OPR_JWT_SECRET", hide_env_values = true)]
        secret: String,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    // 설정 로드
    let mut config = CliConfig::load()?;

    // 명령 실행
    match cli.command {
        Commands::Login { username, password } => {
            commands::auth::login(&mut config, cli.url.as_deref(), &username, &password).await
        }
        Commands::Logout => commands::auth::logout(&mut config),
        Commands::Whoami => commands::auth::whoami(&config, cli.url.as_deref()).await,

        Commands::Keys { action } => match action {
            KeysAction::Generate => commands::keys::generate(),
        },

        Commands::Password { action } => match action {
            PasswordAction::Hash { password } => commands::password::hash(&password),
        },

        Commands::Field { action } => match action {
            FieldAction::Encrypt { value, secret } => commands::field::encrypt(&secret, &value),
            FieldAction::Decrypt { value, secret } => commands::field::decrypt(&secret, &value),
        },

        Commands::Token { action } => match action {
            TokenAction::Issue {
                subject,
                ttl_secs,
                secret,
            } => commands::token::issue(&secret, &subject, ttl_secs),
            TokenAction::Inspect { token, secret } => commands::token::inspect(&secret, &token),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_token_issue() {
        let cli = Cli::try_parse_from([
            "opr", "token", "issue", "--subject", "operum", "--ttl-secs", "60", "--secret", "x",
        ])
        .unwrap();
        match cli.command {
            Commands::Token {
                action: TokenAction::Issue { subject, ttl_secs, .. },
            } => {
                assert_eq!(subject, "operum");
                assert_eq!(ttl_secs, 60);
            }
            _ => panic!("expected token issue"),
        }
    }
}
