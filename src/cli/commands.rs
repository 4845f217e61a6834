use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "clearfolio",
    about = "Client-portfolio transparency portal for a crypto trading advisory"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Create the first admin account on a fresh database
    Init {
        email: String,
        name: String,
        password: String,
    },
    /// Verify credentials and print the account
    Login { email: String, password: String },
    /// Create an account (admin only)
    UserAdd {
        /// Acting user id
        #[arg(long)]
        actor: String,
        /// JSON with email, name, password, initial_deposit, role (ADMIN|CLIENT)
        json: String,
    },
    /// List client accounts (admin only)
    Users {
        #[arg(long)]
        actor: String,
    },
    /// Update an account (admin only)
    UserUpdate {
        #[arg(long)]
        actor: String,
        /// User id
        id: String,
        /// JSON with any of name, email, initial_deposit
        json: String,
    },
    /// Delete an account and its trades (admin only)
    UserRemove {
        #[arg(long)]
        actor: String,
        id: String,
    },
    /// Open a trade for a client (admin only)
    TradeOpen {
        #[arg(long)]
        actor: String,
        /// JSON with client_id, coin_id, coin_symbol, entry_price, quantity,
        /// side (LONG|SHORT), take_profit, stop_loss, notes
        json: String,
    },
    /// Close an open trade at an exit price (admin only)
    TradeClose {
        #[arg(long)]
        actor: String,
        /// Trade id
        id: String,
        exit_price: f64,
    },
    /// Delete a trade (admin only)
    TradeDelete {
        #[arg(long)]
        actor: String,
        id: String,
    },
    /// List trades (clients see their own)
    Trades {
        #[arg(long)]
        actor: String,
        /// Filter by client id (admins only)
        #[arg(long)]
        client: Option<String>,
        /// Filter by status (OPEN|CLOSED)
        #[arg(long)]
        status: Option<String>,
        #[arg(long)]
        limit: Option<usize>,
    },
    /// Portfolio summary for a user
    Portfolio {
        #[arg(long)]
        actor: String,
        /// User id
        user: String,
    },
    /// Per-trade P&L for a user
    Positions {
        #[arg(long)]
        actor: String,
        user: String,
    },
    /// Post an announcement
    Post {
        #[arg(long)]
        actor: String,
        title: String,
        content: String,
    },
    /// List announcements, newest first
    Announcements {
        #[arg(long)]
        actor: String,
    },
    /// Delete an announcement (author only)
    AnnouncementDelete {
        #[arg(long)]
        actor: String,
        id: String,
    },
    /// Reply to an announcement
    Reply {
        #[arg(long)]
        actor: String,
        /// Announcement id
        announcement: String,
        content: String,
    },
    /// List replies under an announcement, oldest first
    Replies {
        #[arg(long)]
        actor: String,
        announcement: String,
    },
    /// Delete a reply (author only)
    ReplyDelete {
        #[arg(long)]
        actor: String,
        id: String,
    },
    /// Search coins by name or symbol
    Coins { query: String },
    /// Fetch current quotes for coin ids
    Prices {
        /// CoinGecko coin ids (e.g. bitcoin ethereum)
        ids: Vec<String>,
    },
    /// Reprint a user's summary as quotes refresh; Ctrl-C to stop
    Watch {
        #[arg(long)]
        actor: String,
        user: String,
        /// Refresh period in seconds (default from
        /// CLEARFOLIO_PRICE_REFRESH_SECS, else 10)
        #[arg(long)]
        interval: Option<u64>,
    },
}
