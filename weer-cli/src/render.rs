//! Terminal rendering of the dashboard pages.

use std::io::Write;

use anyhow::Result;
use weer_core::{
    CurrentView, DailyCard, DailyForecast, FavoritesList, MapMarker, WeatherSnapshot,
    present::capitalize,
};

pub fn current(snapshot: &WeatherSnapshot, out: &mut impl Write) -> Result<()> {
    let view = CurrentView::from_snapshot(snapshot)?;

    writeln!(out, "{}", view.title)?;
    writeln!(out, "{}", view.observed_at)?;
    writeln!(out)?;
    writeln!(out, "Temperatuur   {} ({})", view.temperature, view.color.hex())?;
    writeln!(out, "  Voelt als   {}", view.feels_like)?;
    writeln!(out, "Weer          {} {}", view.emoji, view.description)?;
    writeln!(out, "Details")?;
    writeln!(out, "  Luchtvochtigheid: {}", view.humidity)?;
    writeln!(out, "  Windsnelheid: {}", view.wind)?;
    writeln!(out, "  Fahrenheit: {}", view.fahrenheit)?;
    writeln!(out, "Zonsopgang    🌅 {}", view.sunrise)?;
    writeln!(out, "Zonsondergang 🌇 {}", view.sunset)?;
    Ok(())
}

pub fn map(snapshot: &WeatherSnapshot, out: &mut impl Write) -> Result<()> {
    let marker = MapMarker::from_snapshot(snapshot)?;

    writeln!(out, "Weerkaart voor {}", capitalize(&marker.popup))?;
    writeln!(out, "  {:.4}, {:.4}", marker.latitude, marker.longitude)?;
    writeln!(out, "  {}", marker.openstreetmap_url())?;
    Ok(())
}

pub fn forecast(city: &str, daily: &DailyForecast, out: &mut impl Write) -> Result<()> {
    writeln!(out, "5-daagse voorspelling voor {}", capitalize(city))?;

    if daily.is_empty() {
        writeln!(out, "Geen voorspelling beschikbaar")?;
        return Ok(());
    }

    for entry in daily {
        let card = DailyCard::from_entry(entry)?;
        writeln!(out, "  {}  {:>7}  {}", card.date, card.temperature, card.description)?;
    }
    Ok(())
}

pub fn favorites(list: &FavoritesList, out: &mut impl Write) -> Result<()> {
    if list.is_empty() {
        writeln!(out, "Nog geen favoriete steden toegevoegd")?;
        return Ok(());
    }

    writeln!(out, "Favoriete steden")?;
    for city in list {
        writeln!(out, "  {city}")?;
    }
    Ok(())
}
