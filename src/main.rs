//! Word Dash entry point
//!
//! The browser build starts from `platform::web`. Natively this runs a
//! line-oriented console round: type a word and press Enter.
//!
//! Usage: `word-dash [difficulty] [settings.json]`

#[cfg(not(target_arch = "wasm32"))]
mod console {
    use std::error::Error;
    use std::io::{self, BufRead, Write};

    use word_dash::platform::{Clock, ManualScheduler, SystemClock};
    use word_dash::sim::{GameEngine, GameEvent, RoundSnapshot, RoundStatus};
    use word_dash::{InputMode, Settings};

    type Engine = GameEngine<ManualScheduler, SystemClock>;

    /// Delivers the ticks a real interval would have fired since the last call
    struct TickPacer {
        period_secs: f64,
        last: f64,
    }

    impl TickPacer {
        fn new(period_ms: u32, now: f64) -> Self {
            Self {
                period_secs: period_ms as f64 / 1000.0,
                last: now,
            }
        }

        fn due(&mut self, now: f64) -> u64 {
            let ticks = ((now - self.last) / self.period_secs).floor().max(0.0) as u64;
            self.last += ticks as f64 * self.period_secs;
            ticks
        }
    }

    fn load_settings(path: Option<&str>) -> Result<Settings, Box<dyn Error>> {
        let mut settings = match path {
            Some(path) => Settings::from_json(&std::fs::read_to_string(path)?)?,
            None => Settings::default(),
        };
        // Lines arrive only on Enter
        settings.input_mode = InputMode::ConfirmKey;
        Ok(settings)
    }

    fn render(snapshot: &RoundSnapshot) {
        let target = match (&snapshot.current_word, snapshot.obstacles.first()) {
            (_, Some(lead)) => format!(
                "{} ({} incoming)",
                lead.word,
                snapshot.obstacles.len()
            ),
            (Some(word), None) => word.clone(),
            (None, None) => "...".to_string(),
        };
        let hint = snapshot
            .hint
            .as_deref()
            .map(|h| format!("  hint: {h}"))
            .unwrap_or_default();
        print!(
            "[score {} | lives {} | time {}s | {}/{} correct]  type: {}{}\n> ",
            snapshot.score,
            snapshot.lives,
            snapshot.time_remaining,
            snapshot.words_correct,
            snapshot.total_attempts,
            target,
            hint
        );
    }

    fn report(events: &[GameEvent]) {
        for event in events {
            match event {
                GameEvent::Success { word } => println!("  + {word}"),
                GameEvent::Error { typed } => println!("  x {typed}"),
                GameEvent::Collision { word } => println!("  ! '{word}' hit you"),
                GameEvent::SpeedUp { speed } => println!("  >> speed {speed}"),
                GameEvent::RoundEnded { summary } => println!(
                    "\n{:?}! score {}, {} words, {}% accuracy, {}s",
                    summary.outcome,
                    summary.score,
                    summary.words_correct,
                    summary.accuracy,
                    summary.elapsed_secs
                ),
                _ => {}
            }
        }
    }

    /// Feed a typed line along with the ticks that fell due while it was
    /// typed. Overdue ticks land first; the line only shares a step with the
    /// last one.
    fn deliver<C: Clock>(engine: &mut GameEngine<ManualScheduler, C>, due: u64, text: &str) {
        if due == 0 {
            engine.submit_input(text);
            return;
        }
        for _ in 1..due {
            engine.on_tick();
            if engine.status() != RoundStatus::Active {
                return;
            }
        }
        engine.step([text]);
    }

    fn play(engine: &mut Engine, difficulty: &str) -> Result<(), Box<dyn Error>> {
        engine.start(difficulty)?;
        let mut pacer = TickPacer::new(
            engine.settings().variant.tick_period_ms(),
            SystemClock.now_secs(),
        );
        report(&engine.drain_events());
        render(&engine.snapshot());
        io::stdout().flush()?;

        let stdin = io::stdin();
        for line in stdin.lock().lines() {
            let line = line?;
            let due = pacer.due(SystemClock.now_secs());
            match line.trim() {
                "?" => {
                    for _ in 0..due {
                        engine.on_tick();
                    }
                    engine.request_hint();
                }
                ":menu" | ":q" => {
                    engine.return_to_menu();
                    return Ok(());
                }
                text => deliver(engine, due, text),
            }
            report(&engine.drain_events());
            if engine.status() != RoundStatus::Active {
                break;
            }
            render(&engine.snapshot());
            io::stdout().flush()?;
        }
        Ok(())
    }

    pub fn run() -> Result<(), Box<dyn Error>> {
        let args: Vec<String> = std::env::args().skip(1).collect();
        let difficulty = args.first().cloned().unwrap_or_else(|| "easy".to_string());
        let settings = load_settings(args.get(1).map(String::as_str))?;
        log::info!(
            "Word Dash (console) starting: {} variant",
            settings.variant.as_str()
        );

        let mut engine = GameEngine::with_defaults(settings, ManualScheduler::new(), SystemClock)?;
        play(&mut engine, &difficulty)?;
        Ok(())
    }

}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    if let Err(e) = console::run() {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is platform::web::wasm_main, this is just to satisfy the compiler
}
