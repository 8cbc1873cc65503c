use clap::Parser;
use dialoguer::Select;
use std::process;
use top_series::{
    Catalog, Config, ProgressEvent, Session, Show, TimeWindow, TmdbClient, YouTubeClient,
};
use tracing_subscriber::EnvFilter;

/// Trending TV shows, their trailers and where to watch them
#[derive(Debug, Parser)]
#[command(name = "top-series", version, about)]
struct Cli {
    /// Time window to pick the top shows from: day, week or month
    #[arg(short, long, default_value_t = TimeWindow::Week)]
    window: TimeWindow,

    /// TMDB API read access token
    #[arg(long, env = "TMDB_BEARER_TOKEN", hide_env_values = true)]
    tmdb_token: String,

    /// YouTube Data API key, used to mine trailer descriptions for providers
    #[arg(long, env = "YOUTUBE_API_KEY", hide_env_values = true)]
    youtube_key: Option<String>,

    /// Language for show names and synopses
    #[arg(long)]
    language: Option<String>,

    /// Country whose streaming providers are listed
    #[arg(long)]
    region: Option<String>,

    /// Browse windows and shows interactively
    #[arg(short, long)]
    interactive: bool,

    /// Print the enriched shows as JSON
    #[arg(long, conflicts_with = "interactive")]
    json: bool,
}

type TopSeriesSession = Session<TmdbClient, YouTubeClient>;

/// Handles progress events and prints formatted output to stdout
fn handle_progress_event(event: ProgressEvent) {
    match event {
        ProgressEvent::FetchingCatalog { window } => {
            println!("Buscando as melhores séries ({})...", window.display_name());
        }
        ProgressEvent::CatalogFetched { count } => {
            println!("{} série(s) encontrada(s)\n", count);
        }
        ProgressEvent::EnrichingShow { index, total, name } => {
            println!("[{}/{}] {}", index + 1, total, name);
        }
        ProgressEvent::ShowEnriched {
            has_trailer,
            provider_count,
            ..
        } => {
            println!(
                "  Trailer: {}, provedores: {}",
                if has_trailer { "sim" } else { "não" },
                provider_count
            );
        }
        ProgressEvent::Complete { .. } => {
            println!();
        }
    }
}

/// Prints a show; `detailed` adds the backdrop image and the embeddable player
fn print_show(position: usize, show: &Show, detailed: bool) {
    println!("#{} {}", position, show.name);
    if let Some(original_name) = show.original_name.as_ref().filter(|n| **n != show.name) {
        println!("  Título Original: {}", original_name);
    }
    println!("  Data de Estreia: {}", show.formatted_first_air_date());
    println!("  Avaliação: {}", show.formatted_rating());
    if !show.overview.is_empty() {
        println!("  Sinopse: {}", show.overview);
    }
    if let Some(url) = show.poster_url() {
        println!("  Pôster: {}", url);
    }
    if let Some(url) = show.trailer_url() {
        println!("  Trailer: {}", url);
    }
    match &show.watch_providers {
        Some(providers) => {
            println!("  Disponível em:");
            for provider in providers {
                match provider.logo_url() {
                    Some(logo) => println!("    - {} ({})", provider.display_name(), logo),
                    None => println!("    - {}", provider.display_name()),
                }
            }
        }
        None => println!("  Disponível em: desconhecido"),
    }
    if detailed {
        if let Some(url) = show.backdrop_url() {
            println!("  Imagem de fundo: {}", url);
        }
        if let Some(url) = show.trailer_embed_url() {
            println!("  Player: {}", url);
        }
    }
    println!();
}

/// Lets the user pick shows from the current results until they go back
fn browse_shows(session: &TopSeriesSession) -> Result<(), dialoguer::Error> {
    loop {
        let state = session.snapshot();
        let mut items: Vec<String> = state.shows.iter().map(|s| s.name.clone()).collect();
        items.push("Voltar".to_string());

        let default = state
            .selected
            .as_ref()
            .and_then(|selected| state.shows.iter().position(|s| s.id == selected.id))
            .unwrap_or(0);

        let choice = Select::new()
            .with_prompt("Série")
            .items(&items)
            .default(default)
            .interact()?;

        let Some(show) = state.shows.get(choice) else {
            return Ok(());
        };

        session.select(show.id);
        print_show(choice + 1, show, true);
    }
}

fn run_interactive(
    session: &TopSeriesSession,
    initial: TimeWindow,
) -> Result<(), dialoguer::Error> {
    let mut items: Vec<&str> = TimeWindow::ALL.iter().map(|w| w.display_name()).collect();
    items.push("Sair");

    let mut current = initial;
    loop {
        let default = TimeWindow::ALL
            .iter()
            .position(|w| *w == current)
            .unwrap_or(0);

        let choice = Select::new()
            .with_prompt("Top Séries")
            .items(&items)
            .default(default)
            .interact()?;

        let Some(window) = TimeWindow::ALL.get(choice).copied() else {
            return Ok(());
        };
        current = window;

        session.refresh(window, handle_progress_event);

        let state = session.snapshot();
        if let Some(error) = state.error {
            eprintln!("Erro ao carregar dados: {}\n", error);
            continue;
        }

        browse_shows(session)?;
    }
}

fn main() {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let mut config = Config::new(cli.tmdb_token, cli.youtube_key);
    if let Some(language) = cli.language {
        config.language = language;
    }
    if let Some(region) = cli.region {
        config.region = region;
    }

    let clients = TmdbClient::new(config.clone())
        .and_then(|tmdb| Ok((tmdb, YouTubeClient::new(&config)?)));
    let (tmdb, youtube) = match clients {
        Ok(clients) => clients,
        Err(e) => {
            eprintln!("Error: {}", e);
            process::exit(1);
        }
    };

    let session = Session::new(Catalog::new(tmdb, youtube, config));

    if cli.interactive {
        if let Err(e) = run_interactive(&session, cli.window) {
            eprintln!("Error: {}", e);
            process::exit(1);
        }
        return;
    }

    if cli.json {
        session.refresh(cli.window, |_| {});
    } else {
        session.refresh(cli.window, handle_progress_event);
    }

    let state = session.snapshot();
    if let Some(error) = state.error {
        eprintln!("Erro ao carregar dados: {}", error);
        process::exit(1);
    }

    if cli.json {
        match serde_json::to_string_pretty(&state.shows) {
            Ok(json) => println!("{}", json),
            Err(e) => {
                eprintln!("Error: {}", e);
                process::exit(1);
            }
        }
        return;
    }

    println!("=== Top Séries: {} ===\n", state.time_window.display_name());

    if state.shows.is_empty() {
        println!("Nenhuma série encontrada.");
        return;
    }

    for (index, show) in state.shows.iter().enumerate() {
        print_show(index + 1, show, false);
    }
}
