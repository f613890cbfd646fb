use clap::{Parser, Subcommand};
use miette::{IntoDiagnostic, Result};
use tracing_subscriber::EnvFilter;
use vertex_deposits::application::deposits::DepositService;
use vertex_deposits::config::GatewayConfig;
use vertex_deposits::domain::method::PaymentMethod;
use vertex_deposits::infrastructure::in_memory::InMemoryLedger;
use vertex_deposits::infrastructure::pesapal::PesapalGateway;
use vertex_deposits::interfaces::cli::console::ConsoleNotifier;
use vertex_deposits::interfaces::cli::selector::MethodSelector;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Run a deposit
    Deposit {
        /// Deposit amount, e.g. 250.00
        #[arg(long)]
        amount: String,

        /// Payment method; prompts when omitted
        #[arg(long, value_enum)]
        method: Option<PaymentMethod>,

        /// M-Pesa phone number (mobile-money deposits)
        #[arg(long, default_value = "")]
        phone: String,

        /// Billing email address
        #[arg(long, default_value = "")]
        email: String,
    },

    /// Query the status of a submitted order
    Status {
        #[arg(long)]
        order_tracking_id: String,
    },

    /// Register the IPN notification URL (one-time setup)
    RegisterIpn,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    let config = GatewayConfig::from_env().into_diagnostic()?;

    let service = DepositService::new(
        Box::new(InMemoryLedger::new()),
        Box::new(ConsoleNotifier::new()),
        Box::new(PesapalGateway::new(config)),
    );

    match cli.command {
        Command::Deposit {
            amount,
            method,
            phone,
            email,
        } => {
            let method = match method {
                Some(method) => method,
                None => prompt_for_method()?,
            };

            match method {
                PaymentMethod::Mpesa => {
                    let checkout = service
                        .process_mpesa_deposit(&amount, &phone, &email)
                        .await
                        .into_diagnostic()?;
                    println!("Complete your payment at: {}", checkout.redirect_url);
                    if let Some(id) = checkout.order_tracking_id {
                        println!("Order tracking id: {id}");
                    }
                }
                PaymentMethod::Card | PaymentMethod::Crypto => {
                    let recorded = service
                        .process_instant_deposit(&amount, method)
                        .await
                        .into_diagnostic()?;
                    println!(
                        "Deposit recorded: #{} ${} - {}",
                        recorded.id, recorded.amount, recorded.details
                    );
                }
            }
        }
        Command::Status { order_tracking_id } => {
            println!("{}", service.check_payment_status(&order_tracking_id).await);
        }
        Command::RegisterIpn => {
            let registration = service.register_ipn().await.into_diagnostic()?;
            match registration.ipn_id {
                Some(id) => println!("IPN URL registered: {id}"),
                None => println!("IPN URL registered"),
            }
        }
    }

    Ok(())
}

fn prompt_for_method() -> Result<PaymentMethod> {
    let mut chosen = None;
    {
        let mut selector = MethodSelector::new(None, false, |method| chosen = Some(method));
        let mut stdin = std::io::stdin().lock();
        let mut stderr = std::io::stderr();
        selector.prompt(&mut stdin, &mut stderr).into_diagnostic()?;
    }
    chosen.ok_or_else(|| miette::miette!("no payment method selected"))
}
