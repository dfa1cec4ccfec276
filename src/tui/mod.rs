//! Terminal UI: data entry, results and history in two tabs.

mod actions;
mod app;
mod input;
mod keymap;
mod ui;

pub use app::App;

/// Take over the terminal and run the app until the user quits.
pub fn run(app: &mut App) -> anyhow::Result<()> {
    let mut terminal = ratatui::init();
    let result = input::run_app(&mut terminal, app);
    ratatui::restore();
    Ok(result?)
}
