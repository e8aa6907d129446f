//! Utils

use clap::Parser;

/// Arguments for the basket message demos
#[derive(Debug, Parser)]
pub struct DemoBasketArgs {
    /// Fixture set to use for the products, basket & offers
    #[clap(short, long, default_value = "storefront")]
    pub fixture: String,

    /// Number of basket lines the session starts with, before the change
    #[clap(short, long)]
    pub n: Option<usize>,

    /// Render the new-total message without the checkout call-to-action
    #[clap(long)]
    pub no_buttons: bool,
}
