use anyhow::Result;
use owo_colors::OwoColorize;
use roomcal_core::config::RoomcalConfig;

pub fn run() -> Result<()> {
    let config_path = RoomcalConfig::config_path()?;
    let config = RoomcalConfig::load()?;

    println!("{}", "Paths".bold());
    println!("  Config:     {}", config_path.display());
    println!("  Inventory:  {}", config.inventory_path().display());

    println!();
    println!("{}", "Booking".bold());
    println!("  Min date:   {}", config.min_date);
    println!(
        "  Room type:  {}",
        config.room_type.as_deref().unwrap_or("(any)")
    );

    Ok(())
}
