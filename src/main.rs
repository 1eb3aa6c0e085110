use tareo::{commands::Cli, libs::logging};

fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();
    logging::init();

    Cli::menu()
}
