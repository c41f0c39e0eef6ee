//! Plain-text rendering of a [`ViewModel`].

use std::io::{self, Write};

use skycast_core::{ReadingView, ViewModel};

pub fn write_view(out: &mut impl Write, view: &ViewModel) -> io::Result<()> {
    if view.loading {
        writeln!(out, "Loading weather...")?;
    }

    if let Some(message) = &view.error_message {
        writeln!(out, "{message}")?;
    }

    if let Some(result) = &view.result {
        write_reading(out, result)?;
    }

    Ok(())
}

fn write_reading(out: &mut impl Write, result: &ReadingView) -> io::Result<()> {
    let gradient = result.preset.gradient();

    writeln!(out, "{}", result.title)?;
    writeln!(out, "  {}  {}", result.temperature_display, result.description)?;
    writeln!(out, "  Humidity  {}", result.humidity)?;
    writeln!(out, "  Pressure  {}", result.pressure)?;
    writeln!(out, "  Wind      {}", result.wind)?;
    writeln!(out, "  Icon      {}", result.icon_url)?;
    writeln!(
        out,
        "  Theme     {} ({} -> {})",
        result.preset.id(),
        gradient.from,
        gradient.to
    )?;
    if let Some(observed_at) = result.observed_at {
        writeln!(out, "  Updated   {}", observed_at.format("%Y-%m-%d %H:%M UTC"))?;
    }
    Ok(())
}
