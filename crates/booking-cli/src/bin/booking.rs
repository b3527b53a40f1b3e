use anyhow::Result;
use booking_cli::{render, BookingClient};
use booking_core::{BookingFilter, BookingRequest, CreateDroneRequest, CreateUserRequest};
use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(author, version, about = "Drone booking client", long_about = None)]
struct Args {
    /// Booking server URL
    #[arg(long, default_value = "http://localhost:8000")]
    url: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List all users
    Users,
    /// Add a user
    AddUser {
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: Option<String>,
    },
    /// List all drones
    Drones,
    /// Add a drone
    AddDrone {
        #[arg(long)]
        name: String,
        #[arg(long)]
        location: Option<String>,
    },
    /// List bookings, optionally for one user or drone
    Bookings {
        #[arg(long)]
        user: Option<i64>,
        #[arg(long)]
        drone: Option<i64>,
    },
    /// Book a drone for a date, optionally between two times
    Book {
        #[arg(long)]
        user: i64,
        #[arg(long)]
        drone: i64,
        /// Date as YYYY-MM-DD
        #[arg(long)]
        on: String,
        /// Start time as HH:MM (default: start of day)
        #[arg(long)]
        from: Option<String>,
        /// End time as HH:MM (default: end of day)
        #[arg(long)]
        to: Option<String>,
    },
}

fn main() -> Result<()> {
    let args = Args::parse();
    let client = BookingClient::new(args.url);

    match args.command {
        Command::Users => {
            for user in client.list_users()? {
                println!("{}", render::user_line(&user));
            }
        }
        Command::AddUser { name, email } => {
            let user = client.add_user(&CreateUserRequest {
                name: Some(name),
                email_address: email,
            })?;
            println!("Added user {}", render::user_line(&user).trim_start());
        }
        Command::Drones => {
            for drone in client.list_drones()? {
                println!("{}", render::drone_line(&drone));
            }
        }
        Command::AddDrone { name, location } => {
            let drone = client.add_drone(&CreateDroneRequest {
                name: Some(name),
                location,
            })?;
            println!("Added drone {}", render::drone_line(&drone).trim_start());
        }
        Command::Bookings { user, drone } => {
            let filter = BookingFilter {
                user_id: user,
                drone_id: drone,
            };
            for booking in client.list_bookings(filter)? {
                println!("{}", render::booking_line(&booking));
            }
        }
        Command::Book {
            user,
            drone,
            on,
            from,
            to,
        } => {
            let request = BookingRequest {
                user_id: Some(user),
                drone_id: Some(drone),
                booked_on: on,
                booked_from: from,
                booked_to: to,
            };
            match client.book(&request) {
                Ok(booking) => println!("{}", render::created_booking(&booking)),
                Err(e) => {
                    eprintln!("Booking failed: {}", e);
                    std::process::exit(1);
                }
            }
        }
    }

    Ok(())
}
