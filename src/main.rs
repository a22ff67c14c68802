use clap::Parser;
use notecmd::api::RemoteNotesApi;
use notecmd::cli::{
    run_add, run_delete, run_edit, run_enhance, run_health, run_list, run_menu, run_seed,
    run_show, Cli, Commands,
};
use notecmd::config::ClientConfig;
use notecmd::dictation::CommandRecognizer;
use notecmd::logging::init_logging;
use notecmd::session::NoteSession;

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let mut config = ClientConfig::load();
    if let Some(url) = cli.api_url {
        config.api_url = Some(url);
    }
    let api = RemoteNotesApi::new(&config)?;

    let command = match cli.command {
        Some(Commands::Health) => return run_health(&api),
        Some(Commands::Seed) => return run_seed(&api),
        other => other,
    };

    let mut session = NoteSession::new(Box::new(api)).with_empty_draft_policy(config.empty_drafts);
    if let Some(recognizer) = CommandRecognizer::from_config(&config) {
        session = session.with_recognizer(Box::new(recognizer));
    }

    match command {
        None => {
            // No subcommand provided - show interactive menu
            run_menu(&mut session)?;
        }
        Some(Commands::List) => {
            run_list(&mut session)?;
        }
        Some(Commands::Show(args)) => {
            run_show(&mut session, &args.id)?;
        }
        Some(Commands::Add(args)) => {
            run_add(&mut session, args.title, args.content, args.dictate)?;
        }
        Some(Commands::Edit(args)) => {
            run_edit(&mut session, &args.id, args.title, args.content, args.enhance)?;
        }
        Some(Commands::Enhance(args)) => {
            run_enhance(&mut session, &args.id, args.save)?;
        }
        Some(Commands::Delete(args)) => {
            run_delete(&mut session, &args.id, args.force)?;
        }
        Some(Commands::Health) | Some(Commands::Seed) => {}
    }

    Ok(())
}
