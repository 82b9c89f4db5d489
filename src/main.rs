use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{anyhow, bail, Context};
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use uuid::Uuid;

use staykit::auth::{AuthExpiredTransport, AuthPredicate, AuthService, SessionState};
use staykit::booking::{BookedListing, BookingService, CancelBooking, DateRangeSet};
use staykit::config::{Config, ConfigStore};
use staykit::listing::{CategoryName, Pagination, TenantListingService};
use staykit::logging::init_tracing;
use staykit::remote::{HttpTransport, Transport};
use staykit::state::AsyncState;

#[derive(Debug, Parser)]
#[command(name = "staykit", about = "Rental marketplace client")]
struct Cli {
    /// Config file (default: platform config dir/staykit/config.toml).
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Override the API base URL.
    #[arg(long, global = true)]
    api_url: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Show the signed-in user.
    Whoami,
    /// Show booked days of a listing and optionally price a stay.
    Availability {
        listing: Uuid,
        #[arg(long, requires = "end")]
        start: Option<NaiveDate>,
        #[arg(long, requires = "start")]
        end: Option<NaiveDate>,
        /// Nightly rate used for the estimate.
        #[arg(long, default_value_t = 0)]
        rate: i64,
    },
    /// Browse listings of a category.
    Listings {
        #[arg(long, default_value = "ALL")]
        category: CategoryName,
        #[arg(long, default_value_t = 0)]
        page: u32,
        #[arg(long, default_value_t = 20)]
        size: u32,
    },
    /// List your bookings.
    Bookings {
        /// Bookings on your listings instead of your own stays.
        #[arg(long)]
        landlord: bool,
    },
    /// Cancel a booking.
    Cancel {
        booking: Uuid,
        listing: Uuid,
        #[arg(long)]
        landlord: bool,
    },
}

/// Turn a store state into a command result.
fn settled<T>(state: AsyncState<T>) -> anyhow::Result<T> {
    match state {
        AsyncState::Init => bail!("no response received"),
        AsyncState::Ok(value) => Ok(value),
        AsyncState::Error(failure) => Err(anyhow!(failure)),
    }
}

fn print_bookings(bookings: &[BookedListing]) {
    if bookings.is_empty() {
        println!("no bookings");
    }
    for booking in bookings {
        println!(
            "{}  {} → {}  {}  total {}",
            booking.booking_public_id,
            booking.dates.start_date(),
            booking.dates.end_date(),
            booking.location,
            booking.total_price.value
        );
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing();

    let path = cli.config.clone().unwrap_or_else(Config::config_path);
    let config_store = ConfigStore::open(path).context("loading configuration")?;
    if let Some(url) = &cli.api_url {
        config_store.update(|c| c.api.base_url = url.clone());
    }
    let config = config_store.get();
    config.validate()?;

    let http: Arc<dyn Transport> = Arc::new(HttpTransport::new(&config.api)?);
    let auth = AuthService::new(Arc::clone(&http), &config.auth);
    let _session_log = auth.fetch_user_state().subscribe(|state| {
        tracing::debug!(status = %state.status(), "session state");
    });
    let (guarded, mut login_required) = AuthExpiredTransport::new(http, &auth);
    let transport: Arc<dyn Transport> = Arc::new(guarded);

    let outcome = run(cli.command, &auth, &transport).await;
    while let Ok(login) = login_required.try_recv() {
        eprintln!(
            "session expired during {}; log in again at {}",
            login.path, login.login_url
        );
    }
    outcome
}

async fn run(
    command: Command,
    auth: &AuthService,
    transport: &Arc<dyn Transport>,
) -> anyhow::Result<()> {
    match command {
        Command::Whoami => {
            auth.fetch(false).await;
            match auth.session() {
                SessionState::Authenticated(user) => {
                    println!("{} ({})", user.email, user.authorities.join(", "));
                }
                SessionState::Anonymous | SessionState::Unknown => {
                    println!("not signed in; log in at {}", auth.login_url());
                }
                SessionState::Failed(failure) => return Err(anyhow!(failure)),
            }
        }
        Command::Availability {
            listing,
            start,
            end,
            rate,
        } => {
            let booking = BookingService::new(Arc::clone(transport));
            booking.check_availability(listing).await;
            settled(booking.check_availability_state().read())?;
            let unavailable = booking.unavailable_days().unwrap_or_default();

            if unavailable.is_empty() {
                println!("unavailable: none");
            } else {
                let days: Vec<String> = unavailable.days().map(|d| d.to_string()).collect();
                println!("unavailable: {}", days.join(" "));
            }

            if let (Some(start), Some(end)) = (start, end) {
                auth.fetch(false).await;
                if unavailable.is_bookable(start, end, auth) {
                    let total = DateRangeSet::price_estimate(start, end, rate);
                    println!("{start} → {end}: bookable, estimated total {total}");
                } else if !auth.is_authenticated() {
                    println!("{start} → {end}: sign in to book ({})", auth.login_url());
                } else {
                    println!("{start} → {end}: not bookable");
                }
            }
        }
        Command::Listings {
            category,
            page,
            size,
        } => {
            let tenant = TenantListingService::new(Arc::clone(transport));
            let pagination = Pagination {
                page,
                size,
                ..Pagination::default()
            };
            tenant.get_all_by_category(pagination, category).await;
            let page = settled(tenant.get_all_by_category_state().read())?;
            for card in &page.content {
                println!(
                    "{}  {:<20} {:>8}/night  {}",
                    card.public_id, card.location, card.price.value, card.booking_category
                );
            }
            println!(
                "page {}/{} ({} listings)",
                page.number + 1,
                page.total_pages.max(1),
                page.total_elements
            );
        }
        Command::Bookings { landlord } => {
            let booking = BookingService::new(Arc::clone(transport));
            let bookings = if landlord {
                booking.get_booked_listing_for_landlord().await;
                settled(booking.booked_listing_for_landlord_state().read())?
            } else {
                booking.get_booked_listing().await;
                settled(booking.booked_listing_state().read())?
            };
            print_bookings(&bookings);
        }
        Command::Cancel {
            booking: booking_id,
            listing,
            landlord,
        } => {
            let booking = BookingService::new(Arc::clone(transport));
            booking
                .cancel(CancelBooking {
                    booking_public_id: booking_id,
                    listing_public_id: listing,
                    by_landlord: landlord,
                })
                .await;
            let cancelled = settled(booking.cancel_state().read())?;
            println!("cancelled {cancelled}");
            booking.reset_cancel();
        }
    }

    Ok(())
}
