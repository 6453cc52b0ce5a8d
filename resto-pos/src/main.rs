//! Resto POS headless runner
//!
//! - `resto-pos` / `resto-pos status`: load the catalog and the stored cart, log a summary
//! - `resto-pos checkout`: submit the stored cart as an order

use std::sync::Arc;

use clap::{Args, Parser, Subcommand};
use resto_client::DataClient;
use resto_pos::cart::FileStore;
use resto_pos::utils::{cleanup_old_logs, init_logger_with_file};
use resto_pos::{
    CartSession, Catalog, CheckoutRequest, CheckoutSubmitter, Config, Customer, LoggedNotifier,
    PackagingFee, TaxRate,
};
use shared::AppError;
use shared::order::PaymentMethod;
use shared::util::format_rupiah;

#[derive(Parser)]
#[command(name = "resto-pos", version, about = "Resto POS cart runner")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the catalog and stored cart summary
    Status,
    /// Submit the stored cart as an order
    Checkout(CheckoutArgs),
}

#[derive(Args)]
struct CheckoutArgs {
    /// Customer id; "legacy" records an anonymous order
    #[arg(long, env = "CUSTOMER_ID")]
    customer: Option<String>,

    /// Address for the order confirmation
    #[arg(long, env = "CUSTOMER_EMAIL")]
    email: Option<String>,

    /// CASH, QRIS, CARD or TRANSFER
    #[arg(long, default_value = "QRIS")]
    payment: PaymentMethod,
}

/// Checkout wired to the hosted backend; email only when an API key is set
fn build_submitter(config: &Config, data: &DataClient) -> anyhow::Result<CheckoutSubmitter> {
    let mut submitter = CheckoutSubmitter::new(
        Arc::new(data.clone()),
        TaxRate::percent(config.tax_rate_percent),
    );
    if let Some(branch_id) = &config.branch_id {
        submitter = submitter.with_branch(branch_id.clone());
    }
    match config.email_config() {
        Some(email_config) => {
            let email = email_config.build_email_client()?;
            submitter = submitter.with_notifier(Arc::new(LoggedNotifier::new(email, data.clone())));
        }
        None => tracing::warn!("BREVO_API_KEY not set, order confirmations disabled"),
    }
    Ok(submitter)
}

async fn checkout(
    config: &Config,
    data: &DataClient,
    session: &mut CartSession,
    args: CheckoutArgs,
) -> anyhow::Result<()> {
    let submitter = build_submitter(config, data)?;
    let request = CheckoutRequest {
        customer: Customer {
            id: args.customer,
            email: args.email,
        },
        payment_method: args.payment,
    };

    match submitter.submit(session, request).await {
        Ok(receipt) => {
            tracing::info!(
                transaction_id = %receipt.transaction_id,
                total = %format_rupiah(receipt.totals.total),
                notification = ?receipt.notification,
                "Order submitted"
            );
            Ok(())
        }
        Err(e) => {
            let app: AppError = e.clone().into();
            tracing::error!(code = %app.code, error = %e, "Checkout failed");
            Err(e.into())
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // 1. 加载配置 (.env + 环境变量)
    let config = Config::from_env();

    // 2. 初始化日志
    let log_dir = config.log_dir();
    init_logger_with_file(&config.log_level, config.log_json, Some(&log_dir))?;
    if let Err(e) = cleanup_old_logs(&log_dir, 14) {
        tracing::warn!(error = %e, "Log cleanup failed");
    }

    tracing::info!(environment = %config.environment, "Resto POS starting...");

    // 3. 恢复购物车
    let store = FileStore::new(config.storage_dir());
    let mut session = CartSession::restore(
        Box::new(store),
        PackagingFee::with_price(config.packaging_fee_price),
    );

    let data = config.client_config().build_data_client()?;

    // 4. 执行命令
    match cli.command.unwrap_or(Commands::Status) {
        Commands::Checkout(args) => checkout(&config, &data, &mut session, args).await,
        Commands::Status => {
            let catalog = match Catalog::load(&data).await {
                Ok(catalog) => catalog,
                Err(e) => {
                    tracing::error!(error = %e, "Catalog unavailable, continuing with an empty menu");
                    Catalog::default()
                }
            };

            let cart = session.cart();
            tracing::info!(
                products = catalog.products().len(),
                categories = catalog.categories().len(),
                cart_lines = cart.lines().len(),
                cart_items = cart.total_items(),
                cart_total = %format_rupiah(cart.total_price()),
                order_type = %cart.order_type(),
                tax_rate = config.tax_rate_percent,
                email_enabled = config.email_config().is_some(),
                "Resto POS ready"
            );
            Ok(())
        }
    }
}
