use clap::Parser;
use type_decl_index::SearchConfig;
use type_decl_index::cli::{
    Cli, Commands, SearchRequest, execute_decode, execute_encode, execute_search,
    load_declarations,
};

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    type_decl_index::tracing::init(cli.verbose);

    let config = match &cli.config {
        Some(path) => SearchConfig::load(path)?,
        None => SearchConfig::load_default()?,
    };
    tracing::debug!("Using config {:?}", config);

    let output = match cli.command {
        Commands::Encode { json } => execute_encode(&load_declarations(&json)?),
        Commands::Decode { key } => execute_decode(&key)?,
        Commands::Search {
            name,
            decls,
            qualification,
            suffix,
            mode,
            ignore_case,
            camel_case,
            module,
        } => {
            let declarations = load_declarations(&decls)?;
            let request = SearchRequest {
                name,
                qualification,
                suffix,
                mode: mode.map(Into::into),
                ignore_case,
                camel_case,
                module,
            };
            execute_search(config, &declarations, &request).inspect_err(|e| {
                tracing::error!("Search failed: {:?}", e);
            })?
        }
    };

    print!("{}", output);
    Ok(())
}
