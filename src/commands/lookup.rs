//! Lookup commands: show, list.
//!
//! CHANGELOG:
//! - 10/19/2026 - Initial implementation

use crate::output::{format_parcel, OutputControls};
use crate::service::ParcelService;
use anyhow::Result;

/// Show a single parcel.
pub fn show(service: &ParcelService<'_>, number: i64, output: &OutputControls) -> Result<()> {
    let parcel = service.parcel(number)?;

    if output.json {
        output.print(&parcel);
    } else {
        println!("{}", format_parcel(&parcel));
    }

    Ok(())
}

/// List every parcel of a client.
pub fn list(service: &ParcelService<'_>, client: i64, output: &OutputControls) -> Result<()> {
    let mut parcels = service.client_parcels(client)?;
    parcels.sort_by_key(|p| p.number);

    if output.json {
        output.print(&parcels);
    } else {
        if parcels.is_empty() {
            println!("No parcels found for client {}.", client);
            return Ok(());
        }

        println!("Parcels for client {} ({}):", client, parcels.len());
        println!("{}", "-".repeat(50));
        for parcel in &parcels {
            println!("{}", format_parcel(parcel));
        }
    }

    Ok(())
}
