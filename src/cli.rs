use clap::Parser;

use crate::domain::region::DEFAULT_REGION_ID;

/// Scrape the published outage table and store it as JSON for one region.
#[derive(Debug, Parser)]
#[command(author, version, about)]
pub struct Args {
    /// Region id from the registry.
    #[arg(env = "REGION", default_value = DEFAULT_REGION_ID)]
    pub region: String,

    /// Print known regions and exit.
    #[arg(long)]
    pub list_regions: bool,
}
