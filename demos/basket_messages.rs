//! Basket Messages Demo
//!
//! Settles offers on a small basket, adds the rest of the fixture lines, and
//! prints the flash messages a customer would see for the change.
//!
//! Use `-f` to load a fixture set by name
//! Use `-n` to choose how many lines the basket starts with
//! Use `--no-buttons` to render the new-total message without the checkout link

use anyhow::Result;
use clap::Parser;
use tabled::{builder::Builder, settings::Style};
use tracing_subscriber::EnvFilter;

use wicker::{
    fixtures::Fixture,
    messages::{generator::{BasketMessageGenerator, Session}, sink::FlashQueue},
    offers::applicator::OfferApplicator,
    utils::DemoBasketArgs,
};

/// Basket Messages Demo
#[expect(clippy::print_stdout, reason = "Example code")]
pub fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args = DemoBasketArgs::parse();

    let fixture = Fixture::from_set(&args.fixture)?;
    let applicator = fixture.applicator();

    // Settle offers on the starting basket and snapshot them.
    let start = args.n.unwrap_or(1);
    let mut basket = fixture.basket(Some(start))?;

    applicator.apply(&mut basket)?;

    let before = basket.applied_offers();

    let mut session = Session::new(basket, FlashQueue::new());

    // The customer adds the rest of the fixture basket.
    for line in fixture.lines().iter().skip(start) {
        session.basket.add_line(line.clone())?;
    }

    let generator = BasketMessageGenerator::text();

    generator.apply_changes(&mut session, &applicator, &before, !args.no_buttons)?;

    let mut builder = Builder::default();

    builder.push_record(["Severity", "Message"]);

    for message in session.messages.drain() {
        builder.push_record([format!("{:?}", message.severity), message.text]);
    }

    let mut table = builder.build();

    table.with(Style::rounded());

    println!("{table}");

    Ok(())
}
