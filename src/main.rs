use clap::Parser;
use clearfolio::application::accounts::{NewUser, UserPatch};
use clearfolio::application::trades::OpenTrade;
use clearfolio::cli::commands::{Cli, Commands};
use clearfolio::domain::ports::trade_repository::TradeFilter;
use clearfolio::domain::values::trade_side::TradeSide;
use clearfolio::domain::values::trade_status::TradeStatus;
use clearfolio::domain::values::user_role::UserRole;
use clearfolio::infrastructure::prices::refresher::{self, PriceRefresher};
use clearfolio::Clearfolio;
use std::time::Duration;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    let db_path = std::env::var("CLEARFOLIO_DB").unwrap_or_else(|_| "./clearfolio.db".into());

    let folio = match Clearfolio::new(&db_path) {
        Ok(folio) => folio,
        Err(e) => {
            eprintln!("Error initializing clearfolio: {e}");
            std::process::exit(1);
        }
    };

    if let Err(e) = run_command(folio, cli.command).await {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

async fn run_command(folio: Clearfolio, cmd: Commands) -> Result<(), Box<dyn std::error::Error>> {
    match cmd {
        Commands::Init {
            email,
            name,
            password,
        } => {
            let user = folio.bootstrap_admin(email, name, password)?;
            println!("{}", serde_json::to_string_pretty(&user)?);
        }
        Commands::Login { email, password } => {
            let user = folio.login(&email, &password)?;
            println!("{}", serde_json::to_string_pretty(&user)?);
        }
        Commands::UserAdd { actor, json } => {
            let data: serde_json::Value = serde_json::from_str(&json)?;
            let email = data["email"]
                .as_str()
                .ok_or("Missing required field: email")?
                .to_string();
            let name = data["name"]
                .as_str()
                .ok_or("Missing required field: name")?
                .to_string();
            let password = data["password"]
                .as_str()
                .ok_or("Missing required field: password")?
                .to_string();
            let initial_deposit = data["initial_deposit"].as_f64().unwrap_or(0.0);
            let role: UserRole = data["role"]
                .as_str()
                .unwrap_or("CLIENT")
                .parse()
                .map_err(|e: String| e)?;

            let user = folio.user_add(
                &actor,
                NewUser {
                    email,
                    name,
                    role,
                    initial_deposit,
                    password,
                },
            )?;
            println!("{}", serde_json::to_string_pretty(&user)?);
        }
        Commands::Users { actor } => {
            let users = folio.user_list(&actor)?;
            println!("{}", serde_json::to_string_pretty(&users)?);
        }
        Commands::UserUpdate { actor, id, json } => {
            let data: serde_json::Value = serde_json::from_str(&json)?;
            let patch = UserPatch {
                name: data["name"].as_str().map(String::from),
                email: data["email"].as_str().map(String::from),
                initial_deposit: data["initial_deposit"].as_f64(),
            };
            let user = folio.user_update(&actor, &id, patch)?;
            println!("{}", serde_json::to_string_pretty(&user)?);
        }
        Commands::UserRemove { actor, id } => {
            folio.user_remove(&actor, &id)?;
            println!("User {id} deleted");
        }
        Commands::TradeOpen { actor, json } => {
            let data: serde_json::Value = serde_json::from_str(&json)?;
            let client_id = data["client_id"]
                .as_str()
                .ok_or("Missing required field: client_id")?
                .to_string();
            let coin_id = data["coin_id"]
                .as_str()
                .ok_or("Missing required field: coin_id")?
                .to_string();
            let coin_symbol = data["coin_symbol"]
                .as_str()
                .ok_or("Missing required field: coin_symbol")?
                .to_string();
            let entry_price = data["entry_price"]
                .as_f64()
                .ok_or("Missing required field: entry_price")?;
            let quantity = data["quantity"]
                .as_f64()
                .ok_or("Missing required field: quantity")?;
            let side: TradeSide = data["side"]
                .as_str()
                .unwrap_or("LONG")
                .parse()
                .map_err(|e: String| e)?;

            let trade = folio.trade_open(
                &actor,
                OpenTrade {
                    client_id,
                    coin_id,
                    coin_symbol,
                    side,
                    entry_price,
                    quantity,
                    take_profit: data["take_profit"].as_f64(),
                    stop_loss: data["stop_loss"].as_f64(),
                    notes: data["notes"].as_str().map(String::from),
                },
            )?;
            println!("{}", serde_json::to_string_pretty(&trade)?);
        }
        Commands::TradeClose {
            actor,
            id,
            exit_price,
        } => {
            let trade = folio.trade_close(&actor, &id, exit_price)?;
            println!("{}", serde_json::to_string_pretty(&trade)?);
        }
        Commands::TradeDelete { actor, id } => {
            folio.trade_remove(&actor, &id)?;
            println!("Trade {id} deleted");
        }
        Commands::Trades {
            actor,
            client,
            status,
            limit,
        } => {
            let status: Option<TradeStatus> = status
                .map(|s| s.parse())
                .transpose()
                .map_err(|e: String| e)?;
            let trades = folio.trade_list(
                &actor,
                TradeFilter {
                    client_id: client,
                    status,
                    limit,
                },
            )?;
            println!("{}", serde_json::to_string_pretty(&trades)?);
        }
        Commands::Portfolio { actor, user } => {
            let summary = folio.portfolio_summary(&actor, &user).await?;
            println!("{}", serde_json::to_string_pretty(&summary)?);
        }
        Commands::Positions { actor, user } => {
            let positions = folio.positions(&actor, &user).await?;
            println!("{}", serde_json::to_string_pretty(&positions)?);
        }
        Commands::Post {
            actor,
            title,
            content,
        } => {
            let announcement = folio.announce(&actor, title, content)?;
            println!("{}", serde_json::to_string_pretty(&announcement)?);
        }
        Commands::Announcements { actor } => {
            let announcements = folio.announcement_list(&actor)?;
            println!("{}", serde_json::to_string_pretty(&announcements)?);
        }
        Commands::AnnouncementDelete { actor, id } => {
            folio.announcement_remove(&actor, &id)?;
            println!("Announcement {id} deleted");
        }
        Commands::Reply {
            actor,
            announcement,
            content,
        } => {
            let reply = folio.reply_add(&actor, &announcement, content)?;
            println!("{}", serde_json::to_string_pretty(&reply)?);
        }
        Commands::Replies {
            actor,
            announcement,
        } => {
            let replies = folio.reply_list(&actor, &announcement)?;
            println!("{}", serde_json::to_string_pretty(&replies)?);
        }
        Commands::ReplyDelete { actor, id } => {
            folio.reply_remove(&actor, &id)?;
            println!("Reply {id} deleted");
        }
        Commands::Coins { query } => {
            let coins = folio.coin_search(&query).await?;
            println!("{}", serde_json::to_string_pretty(&coins)?);
        }
        Commands::Prices { ids } => {
            let prices = folio.prices_for(&ids).await?;
            println!("{}", serde_json::to_string_pretty(&prices)?);
        }
        Commands::Watch {
            actor,
            user,
            interval,
        } => {
            let secs = interval
                .or_else(|| {
                    std::env::var("CLEARFOLIO_PRICE_REFRESH_SECS")
                        .ok()
                        .and_then(|v| v.parse().ok())
                })
                .unwrap_or(refresher::DEFAULT_PERIOD.as_secs());
            let period = Duration::from_secs(secs.max(1));

            let coin_ids = folio.open_coin_ids(&actor, &user)?;
            let quotes = PriceRefresher::new(folio.price_source(), period);
            let handle = quotes.spawn(coin_ids);

            let mut ticker = tokio::time::interval(period);
            loop {
                tokio::select! {
                    _ = ticker.tick() => {
                        let summary =
                            folio.portfolio_summary_with(&actor, &user, &quotes.snapshot())?;
                        println!("{}", serde_json::to_string_pretty(&summary)?);
                    }
                    _ = tokio::signal::ctrl_c() => break,
                }
            }
            handle.stopped().await;
        }
    }
    Ok(())
}
