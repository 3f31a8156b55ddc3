//! Execution of parsed CLI commands.

use secrecy::ExposeSecret;
use std::sync::Arc;

use super::output::{account_json, account_line, job_line, ConsoleObserver};
use super::{AccountCommand, AuthCommand, Cli, CliError, Command, PublishArgs};
use tikpublish::adapters::{FileAccountStore, LocalVideoFile, TikTokClientConfig, TikTokHttpClient};
use tikpublish::application::{
    AccountBook, CreatorVerifier, ExchangeTokenCommand, ExchangeTokenHandler, JobBoard,
    PublishOrchestrator, SharedAccountBook, StatusPoller,
};
use tikpublish::config::{AppConfig, ConfigError};
use tikpublish::domain::foundation::AccountId;
use tikpublish::ports::TokenExchangeRequest;

/// Everything a command needs, built once from configuration.
struct Context {
    config: AppConfig,
    client: Arc<TikTokHttpClient>,
    accounts: SharedAccountBook,
}

impl Context {
    async fn build() -> Result<Self, CliError> {
        let config = AppConfig::load()?;
        config.validate().map_err(ConfigError::from)?;

        let client = TikTokHttpClient::new(
            TikTokClientConfig::new()
                .with_base_url(config.tiktok.api_base_url.clone())
                .with_timeout(config.tiktok.timeout()),
        )?;

        let store = Arc::new(FileAccountStore::new(&config.storage.data_dir));
        tracing::debug!(path = %store.file_path().display(), "Using account store");
        let accounts = AccountBook::load(store).await.into_shared();

        Ok(Self {
            config,
            client: Arc::new(client),
            accounts,
        })
    }
}

pub async fn run(cli: Cli) -> Result<(), CliError> {
    let ctx = Context::build().await?;

    match cli.command {
        Command::Account(cmd) => account(&ctx, cmd).await,
        Command::Auth(cmd) => auth(&ctx, cmd).await,
        Command::Publish(args) => publish(&ctx, args).await,
    }
}

async fn account(ctx: &Context, cmd: AccountCommand) -> Result<(), CliError> {
    match cmd {
        AccountCommand::Add {
            token,
            label,
            verify,
        } => {
            let id = ctx.accounts.write().await.add(label, token).await;
            println!("Added account {}", id);
            if verify {
                verify_one(ctx, &id).await?;
            }
        }
        AccountCommand::List { json } => {
            let book = ctx.accounts.read().await;
            if json {
                let records: Vec<_> = book.accounts().iter().map(account_json).collect();
                println!("{}", serde_json::Value::Array(records));
            } else if book.is_empty() {
                println!("No accounts stored. Add one with `tikpublish account add --token <TOKEN>`.");
            } else {
                let verified = book.accounts().iter().filter(|a| a.is_verified()).count();
                for account in book.accounts() {
                    println!("{}", account_line(account));
                }
                println!("{} accounts, {} verified", book.len(), verified);
            }
        }
        AccountCommand::SetLabel { id, label } => {
            let id: AccountId = id.parse()?;
            ctx.accounts.write().await.set_label(&id, label).await?;
            println!("Renamed {}", id);
        }
        AccountCommand::SetToken { id, token } => {
            let id: AccountId = id.parse()?;
            ctx.accounts.write().await.set_token(&id, token).await?;
            println!("Token updated for {}", id);
        }
        AccountCommand::Remove { id } => {
            let id: AccountId = id.parse()?;
            let removed = ctx.accounts.write().await.remove(&id).await?;
            println!("Removed {}", removed.display_name());
        }
        AccountCommand::Verify { id, all } => {
            if all {
                let ids: Vec<AccountId> = ctx
                    .accounts
                    .read()
                    .await
                    .accounts()
                    .iter()
                    .map(|a| a.id().clone())
                    .collect();
                let mut failed = 0;
                for id in &ids {
                    if let Err(e) = verify_one(ctx, id).await {
                        println!("{}: {}", id, e);
                        failed += 1;
                    }
                }
                if failed > 0 {
                    return Err(CliError::Usage(format!(
                        "{} of {} accounts failed verification",
                        failed,
                        ids.len()
                    )));
                }
            } else if let Some(id) = id {
                verify_one(ctx, &id.parse()?).await?;
            }
        }
    }
    Ok(())
}

async fn verify_one(ctx: &Context, id: &AccountId) -> Result<(), CliError> {
    let verifier = CreatorVerifier::new(ctx.client.clone());
    let account = verifier.verify_account(&ctx.accounts, id).await?;
    println!("{}", account_line(&account));
    Ok(())
}

async fn auth(ctx: &Context, cmd: AuthCommand) -> Result<(), CliError> {
    match cmd {
        AuthCommand::Exchange {
            code,
            client_key,
            client_secret,
            redirect_uri,
            store_as,
        } => {
            let oauth = &ctx.config.oauth;
            let client_key = client_key.or_else(|| oauth.client_key.clone()).unwrap_or_default();
            let client_secret = client_secret
                .or_else(|| {
                    oauth
                        .client_secret
                        .as_ref()
                        .map(|s| s.expose_secret().clone())
                })
                .unwrap_or_default();
            let redirect_uri = redirect_uri
                .or_else(|| oauth.redirect_uri.clone())
                .unwrap_or_default();

            let handler = ExchangeTokenHandler::new(ctx.client.clone(), ctx.accounts.clone());
            let result = handler
                .handle(ExchangeTokenCommand {
                    request: TokenExchangeRequest::new(code, client_key, client_secret, redirect_uri),
                    store_as,
                })
                .await?;

            println!(
                "Token issued for open_id {} (expires in {}s, scope: {})",
                result.grant.open_id, result.grant.expires_in, result.grant.scope
            );
            match result.account_id {
                Some(id) => println!("Stored as account {}", id),
                None => println!("{}", result.grant.access_token.expose()),
            }
        }
    }
    Ok(())
}

async fn publish(ctx: &Context, args: PublishArgs) -> Result<(), CliError> {
    if args.files.is_empty() && args.urls.is_empty() {
        return Err(CliError::Usage(
            "Nothing to publish: pass at least one --file or --url".to_string(),
        ));
    }

    let account = {
        let book = ctx.accounts.read().await;
        let account = match &args.account {
            Some(id) => book.get(&id.parse()?).cloned(),
            None => book.first().cloned(),
        };
        account.ok_or_else(|| {
            CliError::Usage("No matching account. Add one with `tikpublish account add`.".to_string())
        })?
    };

    if let Some(level) = &args.privacy {
        let options = account.privacy_options();
        if account.is_verified() && !options.contains(level) {
            return Err(CliError::Usage(format!(
                "Privacy level {} is not offered for {} (options: {})",
                level,
                account.display_name(),
                options.join(", ")
            )));
        }
    }

    let mut board = JobBoard::new();
    for path in &args.files {
        let file = LocalVideoFile::open(path).await?;
        let job = board.create(Some(&account));
        configure(job, &args)?;
        job.use_file(Arc::new(file))?;
    }
    for url in &args.urls {
        let job = board.create(Some(&account));
        configure(job, &args)?;
        job.use_url(url.clone())?;
    }

    let poller = StatusPoller::new(ctx.client.clone())
        .with_interval(ctx.config.publish.poll_interval())
        .with_max_attempts(ctx.config.publish.max_poll_attempts);
    let orchestrator =
        PublishOrchestrator::new(ctx.client.clone(), ctx.client.clone(), ctx.accounts.clone())
            .with_poller(poller)
            .with_observer(Arc::new(ConsoleObserver));

    let results = orchestrator.publish_all(board.idle_mut()).await;

    let total = results.len();
    let failed = results.iter().filter(|r| r.is_err()).count();
    println!();
    for job in board.jobs() {
        println!("{}", job_line(job));
    }
    if failed > 0 {
        return Err(CliError::JobsFailed { failed, total });
    }
    Ok(())
}

fn configure(
    job: &mut tikpublish::domain::publish::PublishJob,
    args: &PublishArgs,
) -> Result<(), CliError> {
    job.set_title(args.title.clone())?;
    if let Some(level) = &args.privacy {
        job.set_privacy_level(level.clone())?;
    }
    job.set_disable_comment(args.disable_comment)?;
    job.set_disable_duet(args.disable_duet)?;
    job.set_disable_stitch(args.disable_stitch)?;
    if let Some(ms) = args.cover_ms {
        job.set_video_cover_timestamp_ms(ms)?;
    }
    Ok(())
}
