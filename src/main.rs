use std::io::{stdout, BufWriter};
use std::sync::atomic::AtomicBool;
use std::sync::mpsc;
use std::thread;

use crossterm::{
    cursor,
    event::{
        self, KeyboardEnhancementFlags, PopKeyboardEnhancementFlags,
        PushKeyboardEnhancementFlags,
    },
    terminal, ExecutableCommand,
};
use log::{error, info, LevelFilter};
use rand::rngs::StdRng;
use rand::SeedableRng;

use rage_invaders::audio::NullAudio;
use rage_invaders::clock::{Clock, SystemClock};
use rage_invaders::config;
use rage_invaders::display::TerminalRenderer;
use rage_invaders::input::TerminalConsole;
use rage_invaders::scheduler::{self, Ports};
use rage_invaders::scoreboard::Scoreboard;
use rage_invaders::session::Session;

fn main() -> std::io::Result<()> {
    let args = config::parse();

    if let Err(err) = simple_logging::log_to_file("rage_invaders.log", LevelFilter::Info) {
        eprintln!("warning: could not open log file: {err}");
    }
    info!("starting, target {} fps", args.fps);

    // A broken score file must not keep the game from starting: log the
    // problem and play on with an empty board.
    let mut scores = match Scoreboard::load(&args.scores) {
        Ok(scores) => scores,
        Err(err) => {
            error!("could not load high scores from {:?}: {err}", args.scores);
            Scoreboard::new(args.scores.clone())
        }
    };

    let mut rng = match args.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    let raw_out = stdout();
    let mut out = BufWriter::new(raw_out);

    terminal::enable_raw_mode()?;
    out.execute(terminal::EnterAlternateScreen)?;
    out.execute(cursor::Hide)?;

    // Request key-release (and key-repeat) events from the terminal.
    // Ghostty / kitty-protocol terminals support this; others fall back
    // to the hold-window heuristic in TerminalConsole.
    let keyboard_enhanced = out
        .execute(PushKeyboardEnhancementFlags(
            KeyboardEnhancementFlags::REPORT_EVENT_TYPES,
        ))
        .is_ok();

    // Dedicate a thread exclusively to blocking event reads, sending them
    // through a channel so the game loop never has to block on I/O.
    let (tx, rx) = mpsc::channel::<event::Event>();
    thread::spawn(move || loop {
        match event::read() {
            Ok(ev) => {
                if tx.send(ev).is_err() {
                    break; // receiver dropped → program exiting
                }
            }
            Err(_) => break,
        }
    });

    let clock = SystemClock::new();
    let mut session = Session::new(clock.now() / 1_000_000, &mut rng);
    let mut console = TerminalConsole::new(rx);
    let (cols, rows) = terminal::size()?;
    let mut renderer = TerminalRenderer::new(&mut out, cols, rows);
    let mut audio = NullAudio;
    let running = AtomicBool::new(true);

    let summary = scheduler::run(
        &mut session,
        &mut scores,
        &mut Ports {
            console: &mut console,
            renderer: &mut renderer,
            audio: &mut audio,
        },
        &clock,
        &mut rng,
        args.period_ns(),
        &running,
    );

    // Always restore the terminal
    if keyboard_enhanced {
        let _ = out.execute(PopKeyboardEnhancementFlags);
    }
    let _ = out.execute(cursor::Show);
    let _ = out.execute(terminal::LeaveAlternateScreen);
    let _ = terminal::disable_raw_mode();

    println!("{summary}");
    Ok(())
}
