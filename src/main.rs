use hangman::audio::{AudioSink, TerminalBell};
use hangman::cli::{parse_cli, run_plain};
use hangman::event_log::{EventLog, default_log_path};
use hangman::flow::ScreenFlowController;
use hangman::logging;
use hangman::tui::TuiApp;
use hangman::wordbank::{load_corpus_from_files, load_embedded_corpus};
use log::info;
use std::io;
use std::process::ExitCode;

fn main() -> ExitCode {
    let cli = parse_cli();
    if let Err(e) = logging::init(cli.trace_file.as_deref(), !cli.plain) {
        eprintln!("Failed to open trace file: {e}");
        return ExitCode::FAILURE;
    }

    let loaded = match cli.corpus_paths() {
        Some((words, riddles)) => load_corpus_from_files(words, riddles),
        None => load_embedded_corpus(),
    };
    let corpus = match loaded {
        Ok(corpus) => corpus,
        Err(e) => {
            eprintln!("Failed to load word corpus: {e}");
            return ExitCode::FAILURE;
        }
    };

    let log_path = cli.log_file.clone().unwrap_or_else(default_log_path);
    info!("Game log: {}", log_path.display());
    let mut event_log = EventLog::open(&log_path);

    let mut controller = ScreenFlowController::new(&corpus, &mut event_log);
    controller.set_sound_enabled(!cli.mute);

    let result = if cli.plain {
        let stdin = io::stdin();
        run_plain(&mut controller, stdin.lock(), io::stdout(), &mut TerminalBell::stdout())
    } else {
        let audio: Box<dyn AudioSink> = Box::new(TerminalBell::stdout());
        TuiApp::new(controller, audio, cli.fps).and_then(|mut app| app.run())
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Terminal error: {e}");
            ExitCode::FAILURE
        }
    }
}
