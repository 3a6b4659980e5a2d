//! Tracking commands: register, advance, set-status, set-address, delete.
//!
//! CHANGELOG:
//! - 10/19/2026 - Initial implementation

use crate::output::{format_parcel, OutputControls};
use crate::service::ParcelService;
use anyhow::{Context, Result};
use serde_json::json;

/// Register a new parcel.
pub fn register(
    service: &ParcelService<'_>,
    client: i64,
    address: &str,
    output: &OutputControls,
) -> Result<()> {
    let parcel = service
        .register(client, address)
        .with_context(|| format!("Failed to register parcel for client {}", client))?;

    if output.json {
        output.print(&parcel);
    } else {
        println!("Registered {}", format_parcel(&parcel));
    }

    Ok(())
}

/// Advance a parcel to its next lifecycle status.
pub fn advance(service: &ParcelService<'_>, number: i64, output: &OutputControls) -> Result<()> {
    let next = service.next_status(number)?;

    if output.json {
        output.print(&json!({
            "success": true,
            "number": number,
            "status": next,
            "changed": next.is_some()
        }));
    } else {
        match next {
            Some(status) => println!("Parcel {} is now {}", number, status),
            None => println!("Parcel {} has no further status", number),
        }
    }

    Ok(())
}

/// Overwrite the status of a parcel.
pub fn set_status(
    service: &ParcelService<'_>,
    number: i64,
    status: &str,
    output: &OutputControls,
) -> Result<()> {
    service.set_status(number, status)?;

    if output.json {
        output.print(&json!({
            "success": true,
            "number": number,
            "status": status
        }));
    } else {
        println!("Parcel {} status set to {}", number, status);
    }

    Ok(())
}

/// Change the delivery address of a registered parcel.
pub fn set_address(
    service: &ParcelService<'_>,
    number: i64,
    address: &str,
    output: &OutputControls,
) -> Result<()> {
    service.change_address(number, address)?;

    if output.json {
        output.print(&json!({
            "success": true,
            "number": number,
            "address": address
        }));
    } else {
        println!("Parcel {} address changed to {}", number, address);
    }

    Ok(())
}

/// Delete a registered parcel.
pub fn delete(service: &ParcelService<'_>, number: i64, output: &OutputControls) -> Result<()> {
    service.delete(number)?;

    if output.json {
        output.print(&json!({
            "success": true,
            "number": number
        }));
    } else {
        println!("Parcel {} deleted", number);
    }

    Ok(())
}
