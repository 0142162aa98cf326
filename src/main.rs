use rxiv_files::{cli, logging, runner};

fn main() -> anyhow::Result<()> {
    let app = cli::parse();
    logging::init(app.verbose);
    runner::run(app)
}
