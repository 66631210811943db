use clap::Parser;

fn main() -> anyhow::Result<()> {
    let args = bt_cli::CliArgs::parse();
    let code = bt_cli::run(args)?;
    std::process::exit(code);
}
