mod command;
mod logging;
mod store;
mod tui;
mod ui;

fn main() -> anyhow::Result<()> {
    command::run()
}
