mod command;
mod feed;
mod insights;
mod util;

fn main() -> anyhow::Result<()> {
    command::run()
}
