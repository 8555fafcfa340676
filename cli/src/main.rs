use clap::Parser;
use folio::errors::EbookResult;
use folio_cli::Cli;
use folio_cli::command::Commands;
use tracing_subscriber::EnvFilter;

fn main() -> EbookResult<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.commands {
        Commands::Debug(debug) => debug.debug()?,
        Commands::Metadata(metadata) => metadata.print()?,
        Commands::Toc(toc) => toc.print()?,
        Commands::Markdown(markdown) => markdown.convert()?,
        Commands::Inline(inline) => inline.inline()?,
    }

    Ok(())
}
