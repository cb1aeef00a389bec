use std::sync::Arc;

use demobank_client::client::HttpBankingClient;
use demobank_client::config::ClientConfig;
use demobank_client::session::Session;
use demobank_client::token::{MemoryTokenStore, TokenStore};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = ClientConfig::from_env();
    log::info!("Connecting to banking backend at {}", config.base_url);

    let tokens: Arc<dyn TokenStore> = Arc::new(MemoryTokenStore::new());
    let client = Arc::new(HttpBankingClient::new(&config.base_url, tokens.clone())?);
    let mut session = Session::new(client, tokens);

    if !session.log_in(&config.username, &config.password).await {
        anyhow::bail!(
            "login failed: {}",
            session.last_error.as_deref().unwrap_or("unknown error")
        );
    }

    session.refresh(&config.account_id).await;
    if let Some(error) = &session.last_error {
        anyhow::bail!("refresh failed: {error}");
    }

    if let Some(account) = &session.account {
        log::info!("Account {} balance: {:.2}", account.id, account.balance);
    }
    for tx in session.transactions.iter().take(10) {
        log::info!(
            "  {} {:?} {:.2}",
            tx.created_at.format("%Y-%m-%d %H:%M"),
            tx.kind,
            tx.amount
        );
    }

    Ok(())
}
