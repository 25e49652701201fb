use anyhow::Result;
use indc_cli::app;

fn main() -> Result<()> {
    app::run()
}
