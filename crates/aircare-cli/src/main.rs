//! Aircare CLI Application
//!
//! Command-line interface and MCP server for the aircon service desk.

mod args;
mod cli;
mod mcp;
mod renderer;

use std::time::Duration;

use aircare_core::ServiceDeskBuilder;
use anyhow::{Context, Result};
use args::{Args, Commands};
use clap::Parser;
use cli::Cli;
use log::info;
use mcp::{run_stdio_server, AircareMcpServer};
use renderer::TerminalRenderer;
use Commands::*;

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();

    let Args {
        database_file,
        no_color,
        role,
        busy_timeout,
        today,
        command,
    } = Args::parse();

    let mut builder = ServiceDeskBuilder::new()
        .with_database_path(database_file)
        .with_busy_timeout(Duration::from_millis(busy_timeout));
    if let Some(today) = today {
        builder = builder.with_today(today);
    }
    let desk = builder
        .build()
        .await
        .context("Failed to initialize service desk")?;

    info!("Aircare started as {role:?}");

    let cli = || Cli::new(desk.clone(), TerminalRenderer::new(!no_color), role.into());

    match command {
        Some(Customer { command }) => cli().handle_customer_command(command).await,
        Some(Unit { command }) => cli().handle_unit_command(command).await,
        Some(Technician { command }) => cli().handle_technician_command(command).await,
        Some(Booking { command }) => cli().handle_booking_command(command).await,
        Some(Assignment { command }) => cli().handle_assignment_command(command).await,
        Some(Record { command }) => cli().handle_record_command(command).await,
        Some(Availability { command }) => cli().handle_availability_command(command).await,
        Some(Serve) => {
            info!("Starting Aircare MCP server");
            run_stdio_server(AircareMcpServer::new(desk.clone(), role.into()))
                .await
                .context("MCP server failed")
        }
        None => cli().pending_bookings().await,
    }
}
