//! Interactive lookup form: the terminal counterpart of the city/country form
//! with a unit toggle.

use std::{fmt, io};

use inquire::{InquireError, Select, Text};
use skycast_core::{DisplayUnit, LocationQuery, WeatherLookupController};

use crate::render;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum MenuAction {
    NewLookup,
    ToggleUnit(DisplayUnit),
    Quit,
}

impl fmt::Display for MenuAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MenuAction::NewLookup => f.write_str("Look up another city"),
            MenuAction::ToggleUnit(target) => write!(f, "Show in {}", target.symbol()),
            MenuAction::Quit => f.write_str("Quit"),
        }
    }
}

fn menu(current: DisplayUnit) -> Vec<MenuAction> {
    vec![MenuAction::NewLookup, MenuAction::ToggleUnit(current.toggled()), MenuAction::Quit]
}

/// `Ok(None)` when the user pressed Esc or Ctrl-C.
fn answered<T>(result: Result<T, InquireError>) -> anyhow::Result<Option<T>> {
    match result {
        Ok(value) => Ok(Some(value)),
        Err(InquireError::OperationCanceled | InquireError::OperationInterrupted) => Ok(None),
        Err(err) => Err(err.into()),
    }
}

fn print_view(controller: &WeatherLookupController) -> io::Result<()> {
    render::write_view(&mut io::stdout().lock(), &controller.render())
}

pub async fn run(mut controller: WeatherLookupController) -> anyhow::Result<()> {
    loop {
        let Some(city) = answered(Text::new("City:").with_placeholder("New York").prompt())? else {
            return Ok(());
        };
        let Some(country) = answered(Text::new("Country:").with_placeholder("US").prompt())? else {
            return Ok(());
        };

        if let Err(err) = controller.submit(LocationQuery::new(city, country)) {
            println!("{err}");
            continue;
        }

        print_view(&controller)?;
        controller.settle().await;
        print_view(&controller)?;

        loop {
            let choice = Select::new("Next:", menu(controller.display_unit()))
                .prompt();
            match answered(choice)? {
                Some(MenuAction::ToggleUnit(_)) => {
                    controller.toggle_display_unit();
                    print_view(&controller)?;
                }
                Some(MenuAction::NewLookup) => break,
                Some(MenuAction::Quit) | None => return Ok(()),
            }
        }
    }
}
