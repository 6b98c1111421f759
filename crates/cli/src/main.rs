//! `returnshield` command-line client.
//!
//! # Usage
//!
//! ```bash
//! # Forecast ROI from a preset, then tweak one input
//! returnshield roi --preset "DTC Apparel" --orders 900
//!
//! # Start a return as a shopper
//! returnshield return --order "#1001" --email shopper@example.com \
//!     --items a,b --reason "Size too small" --resolution exchange
//!
//! # Operator session
//! returnshield login --username ops@brand.co
//! returnshield dashboard
//! returnshield logout
//! ```
//!
//! # Environment Variables
//!
//! See `ClientConfig::from_env`. `--api-url` and `--token-path` override the
//! environment. `RETURNSHIELD_PASSWORD` supplies the login password when
//! `--password` is omitted.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result, anyhow, bail};
use clap::{Parser, Subcommand};
use returnshield_auth::{SubscriptionTier, TokenStore};
use returnshield_client::api::{CheckoutRequest, checkout_error_message};
use returnshield_client::{
    ApiClient, ClientConfig, DashboardWalkthrough, FileTokenStore, GateMode, NoticeBus,
    SessionManager, ShopperFlow, dashboard_error_message, spawn_analytics, spawn_dashboard,
};
use returnshield_core::LineItemId;
use returnshield_events::{AlertCenter, EventBus, InMemoryEventBus};
use returnshield_insights::{RoiInputs, RoiPreset};
use returnshield_returns::{LookupRequest, Resolution, ReturnReason};

const PASSWORD_ENV: &str = "RETURNSHIELD_PASSWORD";

/// ReturnShield client for shoppers and store operators.
#[derive(Parser)]
#[command(name = "returnshield")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// API base URL (overrides RETURNSHIELD_API_URL)
    #[arg(long, global = true)]
    api_url: Option<String>,

    /// Token file (overrides RETURNSHIELD_TOKEN_PATH)
    #[arg(long, global = true)]
    token_path: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Forecast monthly revenue reclaimed
    Roi {
        /// Benchmark preset, e.g. "DTC Apparel"
        #[arg(short, long)]
        preset: Option<String>,

        /// Monthly orders (0-2000)
        #[arg(long)]
        orders: Option<f64>,

        /// Average order value (0-500)
        #[arg(long)]
        aov: Option<f64>,

        /// Return rate as a fraction (0-0.5)
        #[arg(long)]
        return_rate: Option<f64>,
    },

    /// Look up an order and list its items
    Lookup {
        #[command(flatten)]
        order: OrderArgs,
    },

    /// Walk the full return flow and submit
    Return {
        #[command(flatten)]
        order: OrderArgs,

        /// Comma-separated line item ids
        #[arg(long, value_delimiter = ',', required = true)]
        items: Vec<String>,

        /// Return reason, e.g. "Size too small"
        #[arg(long)]
        reason: String,

        /// exchange or refund
        #[arg(long)]
        resolution: String,
    },

    /// Sign in as a store operator
    Login {
        #[arg(short, long)]
        username: String,

        #[arg(short, long)]
        password: Option<String>,
    },

    /// Forget the stored token
    Logout,

    /// Show the signed-in profile
    Whoami,

    /// Load the merchant dashboard
    Dashboard,

    /// Load the analytics panels
    Analytics,

    /// List enabled feature flags
    Flags,

    /// Start a subscription checkout
    Checkout {
        /// launch, scale or elite
        #[arg(long)]
        plan: String,

        #[arg(long)]
        price_id: Option<String>,
    },
}

#[derive(clap::Args)]
struct OrderArgs {
    /// Order number, e.g. "#1001"
    #[arg(short, long)]
    order: String,

    /// Email used at checkout
    #[arg(short, long)]
    email: String,

    #[arg(long)]
    zip: Option<String>,

    /// The order was received as a gift
    #[arg(long)]
    gift: bool,
}

impl OrderArgs {
    fn request(&self) -> LookupRequest {
        let mut request = LookupRequest::new(&self.order, &self.email);
        if let Some(zip) = &self.zip {
            request = request.with_zip_code(zip);
        }
        if self.gift {
            request = request.as_gift();
        }
        request
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    returnshield_observability::init();

    let cli = Cli::parse();

    let mut config = ClientConfig::from_env().context("failed to read configuration")?;
    if let Some(url) = &cli.api_url {
        config = config.with_api_url(url);
    }
    if let Some(path) = &cli.token_path {
        config = config.with_token_path(path);
    }

    match cli.command {
        Commands::Roi {
            preset,
            orders,
            aov,
            return_rate,
        } => roi(preset.as_deref(), orders, aov, return_rate),
        Commands::Lookup { order } => lookup(&config, &order).await,
        Commands::Return {
            order,
            items,
            reason,
            resolution,
        } => submit_return(&config, &order, &items, &reason, &resolution).await,
        Commands::Login { username, password } => login(&config, username, password).await,
        Commands::Logout => {
            session(&config)?.logout().await?;
            println!("Signed out.");
            Ok(())
        }
        Commands::Whoami => whoami(&config).await,
        Commands::Dashboard => dashboard(&config).await,
        Commands::Analytics => analytics(&config).await,
        Commands::Flags => flags(&config).await,
        Commands::Checkout { plan, price_id } => checkout(&config, &plan, price_id).await,
    }
}

fn session(config: &ClientConfig) -> Result<SessionManager> {
    let api = ApiClient::new(config).context("failed to build HTTP client")?;
    let store: Arc<dyn TokenStore> = Arc::new(FileTokenStore::new(&config.token_path));
    Ok(SessionManager::new(api, store))
}

async fn signed_in_session(config: &ClientConfig) -> Result<SessionManager> {
    let session = session(config)?;
    let restored = session
        .restore()
        .await
        .map_err(|e| anyhow!(e.user_message()))
        .context("stored session is no longer valid; run `returnshield login`")?;
    if !restored {
        bail!("not signed in; run `returnshield login`");
    }
    Ok(session)
}

fn roi(
    preset: Option<&str>,
    orders: Option<f64>,
    aov: Option<f64>,
    return_rate: Option<f64>,
) -> Result<()> {
    let mut inputs = RoiInputs::default();
    if let Some(name) = preset {
        let preset = RoiPreset::find(name).with_context(|| format!("unknown preset: {name}"))?;
        inputs.apply_preset(preset);
    }
    if let Some(v) = orders {
        inputs.set_monthly_orders(v);
    }
    if let Some(v) = aov {
        inputs.set_average_order_value(v);
    }
    if let Some(v) = return_rate {
        inputs.set_return_rate(v);
    }

    let f = inputs.forecast();
    println!(
        "Inputs: {} orders/mo, ${:.0} AOV, {:.1}% return rate{}",
        inputs.monthly_orders(),
        inputs.average_order_value(),
        inputs.return_rate() * 100.0,
        inputs
            .active_preset()
            .map(|p| format!(" ({})", p.label))
            .unwrap_or_default()
    );
    println!("Monthly gross sales:   ${:.2}", f.monthly_gross_sales);
    println!("Current return loss:   ${:.2}", f.current_return_loss);
    println!("Refunds prevented:     ${:.2}", f.refunds_prevented);
    println!("Exchange revenue:      ${:.2}", f.exchange_revenue);
    println!("Total reclaimed:       ${:.2}", f.total_reclaimed);
    println!("Return rate after:     {:.1}%", f.return_rate_after * 100.0);
    println!("ROI multiple:          {:.1}x", f.roi_multiple);
    Ok(())
}

async fn lookup(config: &ClientConfig, args: &OrderArgs) -> Result<()> {
    let mut flow = ShopperFlow::new(ApiClient::new(config)?);
    let order = flow.lookup(args.request()).await?;

    println!("Order {} ({})", order.order_number, order.currency);
    for item in &order.items {
        println!(
            "  {:<12} {:<30} {:>10} x{}",
            item.line_item_id, item.title, item.price, item.quantity
        );
    }
    Ok(())
}

async fn submit_return(
    config: &ClientConfig,
    args: &OrderArgs,
    items: &[String],
    reason: &str,
    resolution: &str,
) -> Result<()> {
    let reason: ReturnReason = reason.parse().context("invalid --reason")?;
    let resolution: Resolution = resolution.parse().context("invalid --resolution")?;

    let mut flow = ShopperFlow::new(ApiClient::new(config)?);
    flow.lookup(args.request()).await?;
    for id in items {
        flow.toggle_item(LineItemId::new(id.trim()))
            .with_context(|| format!("cannot select item {id}"))?;
    }
    flow.continue_to_next()?;
    flow.choose_reason(reason)?;
    flow.continue_to_next()?;
    flow.choose_resolution(resolution)?;

    if let Some(quote) = flow.wizard().quote() {
        println!(
            "Refund ${} / store credit ${}",
            quote.refund_amount, quote.bonus_amount
        );
    }

    let confirmation = flow.submit().await?;
    println!("Return #{}: {}", confirmation.id, confirmation.message);
    if let Some(url) = &confirmation.label_url {
        println!("Shipping label: {url}");
    }
    Ok(())
}

async fn login(config: &ClientConfig, username: String, password: Option<String>) -> Result<()> {
    let password = match password {
        Some(p) => p,
        None => std::env::var(PASSWORD_ENV)
            .with_context(|| format!("pass --password or set {PASSWORD_ENV}"))?,
    };

    let session = session(config)?;
    let user = session
        .login(username, password)
        .await
        .map_err(|e| anyhow!(e.user_message()))?;
    println!("Signed in as {} ({})", user.display_name(), user.subscription_status);
    Ok(())
}

async fn whoami(config: &ClientConfig) -> Result<()> {
    let session = signed_in_session(config).await?;
    let user = session.user().await.context("profile not loaded")?;

    println!("{} <{}>", user.display_name(), user.email);
    println!("Company:      {}", user.company_name);
    println!("Platform:     {} {}", user.store_platform, user.store_domain);
    println!("Plan:         {}", user.subscription_status);
    println!("Onboarding:   {}", user.onboarding_stage);
    Ok(())
}

async fn dashboard(config: &ClientConfig) -> Result<()> {
    let session = signed_in_session(config).await?;
    let bus: NoticeBus = Arc::new(InMemoryEventBus::new());
    let notices = bus.subscribe();
    let api = if config.broadcast_errors {
        session.api().clone().with_notifier(bus)
    } else {
        session.api().clone()
    };

    let tour = DashboardWalkthrough::for_user(session.user().await.as_ref());
    let data = spawn_dashboard(api, session.token().await).join().await?;

    let mut alerts = AlertCenter::new();
    alerts.drain(&notices);
    for alert in alerts.alerts() {
        eprintln!(
            "[{}] {}",
            alert.title,
            alert.message.as_deref().unwrap_or_default()
        );
    }

    let data = data.map_err(|e| anyhow!(dashboard_error_message(&e)))?;

    if tour.is_active() {
        println!(
            "Walkthrough step {}: {}",
            tour.step_number(),
            tour.current_section().title()
        );
    }
    for section in returnshield_client::DashboardSection::ALL {
        let mode = tour.gate_mode(section);
        if mode != GateMode::Open {
            println!("{section}: {mode:?}");
        }
    }

    let summary = &data.returnless.summary;
    println!("Returnless ({})", summary.period);
    println!("  Annualized margin recovery: ${:.2}", summary.annualized_margin_recovery);
    println!("  Candidates: {}", data.returnless.candidates.len());
    println!("Exchange coach ({})", data.coach.summary.period);
    println!("  Margin at risk: ${:.2}", data.coach.summary.aggregate_margin_at_risk);
    for action in &data.coach.actions {
        println!("  - {} [{}]", action.headline, action.sku);
    }
    println!("VIP queue: {} open", data.vip.summary.open_tickets);
    for entry in &data.vip.queue {
        println!(
            "  - {} {} ({}): {}",
            entry.ticket_id, entry.customer, entry.loyalty_segment, entry.recommended_action
        );
    }
    Ok(())
}

async fn analytics(config: &ClientConfig) -> Result<()> {
    let session = signed_in_session(config).await?;
    let panels = spawn_analytics(session.api().clone(), session.token().await)
        .join()
        .await?;

    match &panels.reasons {
        Ok(rows) => {
            println!("Return reasons by SKU");
            for row in rows {
                println!("  {:<16} {:>5}  {}", row.sku, row.total_returns, row.top_reason_label());
            }
        }
        Err(e) => eprintln!("Return reasons unavailable: {}", e.user_message()),
    }
    match &panels.cohorts {
        Ok(c) => println!(
            "Cohorts: new {:.1}% / returning {:.1}%",
            c.new_customers.return_rate, c.returning_customers.return_rate
        ),
        Err(e) => eprintln!("Cohorts unavailable: {}", e.user_message()),
    }
    match &panels.profitability {
        Ok(p) => println!(
            "Retained ${:.2} vs refunded ${:.2} ({:.1}% retained)",
            p.revenue_retained, p.revenue_refunded, p.retained_percentage
        ),
        Err(e) => eprintln!("Profitability unavailable: {}", e.user_message()),
    }
    Ok(())
}

async fn flags(config: &ClientConfig) -> Result<()> {
    let session = signed_in_session(config).await?;
    let snapshot = session.snapshot().await;
    if snapshot.flags().is_empty() {
        println!("No feature flags enabled.");
    }
    for name in snapshot.flags().names() {
        println!("{name}");
    }
    Ok(())
}

async fn checkout(config: &ClientConfig, plan: &str, price_id: Option<String>) -> Result<()> {
    let plan: SubscriptionTier = plan.parse().context("invalid --plan")?;
    if !plan.is_paid() {
        bail!("choose launch, scale or elite");
    }
    let session = signed_in_session(config).await?;

    let mut request = CheckoutRequest::new(plan);
    if let Some(id) = price_id {
        request = request.with_price_id(id);
    }
    let token = session.token().await;
    let checkout = session
        .api()
        .create_checkout_session(&request, token.as_ref())
        .await
        .map_err(|e| anyhow!(checkout_error_message(&e)))?;

    tracing::info!(%plan, "checkout session created");
    println!("Continue checkout at {}", checkout.checkout_url);
    Ok(())
}
