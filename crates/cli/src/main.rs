use omendeck_core::{Card, Event, EventBus, Phase, RebuildReason, RngState, SessionState, HOLD_LIMIT};
use omendeck_data::{default_cards_path, load_catalog};
use serde::Serialize;
use std::io::{self, Write};
use std::path::PathBuf;

#[derive(Debug, Clone)]
struct CliOptions {
    cui: bool,
    demo: bool,
    seed: Option<u64>,
    cards: Option<PathBuf>,
}

fn parse_cli_options(args: &[String]) -> CliOptions {
    let mut cui = false;
    let mut demo = false;
    let mut seed = None;
    let mut cards = None;
    let mut idx = 0usize;
    while idx < args.len() {
        match args[idx].as_str() {
            "--cui" => cui = true,
            "--demo" => demo = true,
            "--seed" => {
                if let Some(value) = args.get(idx + 1) {
                    seed = value.parse::<u64>().ok();
                    idx += 1;
                }
            }
            "--cards" => {
                if let Some(value) = args.get(idx + 1) {
                    cards = Some(PathBuf::from(value));
                    idx += 1;
                }
            }
            _ => {}
        }
        idx += 1;
    }
    CliOptions {
        cui,
        demo,
        seed,
        cards,
    }
}

fn main() {
    let args: Vec<String> = std::env::args().skip(1).collect();
    let options = parse_cli_options(&args);
    if options.cui {
        let launch = omendeck_cui::LaunchOptions {
            seed: options.seed,
            cards: options.cards.clone(),
        };
        if let Err(err) = omendeck_cui::run(launch) {
            eprintln!("cui launch error: {err}");
            std::process::exit(1);
        }
        return;
    }
    if options.demo {
        run_demo(&options);
        return;
    }
    run_repl(&options);
}

fn build_session(options: &CliOptions) -> Result<SessionState, String> {
    let path = options.cards.clone().unwrap_or_else(default_cards_path);
    let catalog = load_catalog(&path).map_err(|err| format!("{err:#}"))?;
    let rng = match options.seed {
        Some(seed) => RngState::from_seed(seed),
        None => RngState::from_entropy(),
    };
    Ok(SessionState::new(catalog, rng))
}

fn run_demo(options: &CliOptions) {
    let mut events = EventBus::default();
    let mut state = build_session(options).expect("load cards");
    println!("cards: {}", state.catalog().len());
    println!("seed: {}", state.seed());

    for _ in 0..4 {
        state.draw(&mut events);
        if state.can_hold_current() {
            state.hold_current(&mut events);
        }
    }

    let mut guard = 0;
    while !state.pending_reshuffle() && guard < 64 {
        state.draw(&mut events);
        guard += 1;
    }
    if state.pending_reshuffle() {
        // The queued reshuffle consumes its own draw; the one after deals again.
        state.draw(&mut events);
        state.draw(&mut events);
    }

    print_state(&state);
    for event in events.drain() {
        println!("event: {}", format_event(&event));
    }
}

fn run_repl(options: &CliOptions) {
    let mut events = EventBus::default();
    let mut state = build_session(options).expect("load cards");
    println!("cards: {}", state.catalog().len());
    println!("seed: {}", state.seed());
    print_help();
    loop {
        let line = match read_line(&prompt_text(&state)) {
            Some(line) => line,
            None => break,
        };
        let input = line.trim();
        if input.is_empty() {
            continue;
        }
        let mut parts = input.split_whitespace();
        let cmd = parts.next().unwrap_or("");
        let args: Vec<&str> = parts.collect();
        match cmd {
            "help" | "h" | "?" => print_help(),
            "quit" | "exit" => break,
            "draw" | "d" => {
                state.draw(&mut events);
                drain_events(&mut events);
                print_current(&state);
            }
            "hold" => {
                if state.can_hold_current() {
                    state.hold_current(&mut events);
                    drain_events(&mut events);
                } else {
                    println!("{}", hold_refusal(&state));
                }
            }
            "discard" | "x" => {
                if state.current().is_none() {
                    println!("nothing is face up");
                } else {
                    state.discard_current(&mut events);
                    drain_events(&mut events);
                }
            }
            "play" | "drop" => match parse_slot(&args) {
                Some(index) if index < state.held().len() => {
                    state.discard_held(index, &mut events);
                    drain_events(&mut events);
                }
                Some(index) => println!("no held card in slot {index}"),
                None => println!("usage: {cmd} <slot>"),
            },
            "held" => print_held(&state),
            "state" | "s" | "status" => print_state(&state),
            "json" => print_json(&state),
            _ => println!("unknown command: {cmd} (try help)"),
        }
    }
}

fn read_line(prompt: &str) -> Option<String> {
    print!("{prompt}");
    let _ = io::stdout().flush();
    let mut line = String::new();
    if io::stdin().read_line(&mut line).ok()? == 0 {
        return None;
    }
    Some(line.trim_end_matches(&['\n', '\r'][..]).to_string())
}

fn prompt_text(state: &SessionState) -> String {
    let flag = if state.pending_reshuffle() { " RS" } else { "" };
    format!(
        "[D{} X{} H{}/{}{}] > ",
        state.deck_len(),
        state.discard_len(),
        state.held().len(),
        HOLD_LIMIT,
        flag
    )
}

fn parse_slot(args: &[&str]) -> Option<usize> {
    args.first()?.parse::<usize>().ok()
}

fn hold_refusal(state: &SessionState) -> &'static str {
    match state.current() {
        None => "nothing is face up",
        Some(card) if !card.holdable() => "only Hold-timing cards can be held",
        Some(_) => "hold is full",
    }
}

fn print_help() {
    println!("Commands:");
    println!("  help|h|?       show help");
    println!("  draw|d         draw the next card (resolves a queued reshuffle first)");
    println!("  hold           move the face-up card into hold");
    println!("  discard|x      discard the face-up card");
    println!("  play <slot>    play a held card (it goes to the discard pile)");
    println!("  drop <slot>    discard a held card");
    println!("  held           list held cards");
    println!("  state|s        show counts and the face-up card");
    println!("  json           dump the session as JSON");
    println!("  quit|exit      exit");
}

fn print_state(state: &SessionState) {
    println!("== State ==");
    println!(
        "Phase {} | Deck {} | Discard {} | Held {}/{}",
        phase_label(state.phase()),
        state.deck_len(),
        state.discard_len(),
        state.held().len(),
        HOLD_LIMIT
    );
    if state.pending_reshuffle() {
        println!("Reshuffle is queued. Next draw resets the deck (held cards stay out).");
    }
    print_current(state);
}

fn print_current(state: &SessionState) {
    match state.current() {
        Some(card) => println!("current: {}", format_card(card)),
        None => println!("current: none (draw a card to begin)"),
    }
}

fn print_held(state: &SessionState) {
    if state.held().is_empty() {
        println!("held: none");
        return;
    }
    for (index, card) in state.held().iter().enumerate() {
        println!("{index:>2}: {}", format_card(card));
    }
}

fn format_card(card: &Card) -> String {
    let mut tags = vec![card.group.as_str(), card.timing.as_str()];
    if card.reshuffle {
        tags.push("RESHUFFLE");
    }
    let effect = if card.effect.is_empty() {
        String::new()
    } else {
        format!(" - {}", card.effect)
    };
    format!("[{}] {} ({}){}", card.id, card.name, tags.join(", "), effect)
}

fn format_event(event: &Event) -> String {
    match event {
        Event::DeckRebuilt {
            reason,
            deck_size,
            held_out,
        } => {
            let cause = match reason {
                RebuildReason::DeckExhausted => "deck refilled",
                RebuildReason::QueuedReshuffle => "deck reset",
            };
            format!("{cause}: {deck_size} cards in, {held_out} held out")
        }
        Event::CardDrawn { card } => format!("card drawn: [{}] {}", card.id, card.name),
        Event::ReshuffleQueued { card_id, name } => {
            format!("reshuffle queued: [{card_id}] {name}")
        }
        Event::CardDiscarded { card, auto } => {
            if *auto {
                format!("card discarded (auto): [{}] {}", card.id, card.name)
            } else {
                format!("card discarded: [{}] {}", card.id, card.name)
            }
        }
        Event::CardHeld { card, .. } => format!("card held: [{}] {}", card.id, card.name),
        Event::HeldDiscarded { card, .. } => {
            format!("held card discarded: [{}] {}", card.id, card.name)
        }
    }
}

fn drain_events(events: &mut EventBus) {
    for event in events.drain() {
        println!("event: {}", format_event(&event));
    }
}

fn phase_label(phase: Phase) -> &'static str {
    match phase {
        Phase::Idle => "idle",
        Phase::CardUp => "card up",
        Phase::ReshuffleQueued => "reshuffle queued",
    }
}

#[derive(Debug, Serialize)]
struct Snapshot<'a> {
    seed: u64,
    phase: Phase,
    pending_reshuffle: bool,
    deck: usize,
    discard: usize,
    hold_limit: usize,
    can_hold: bool,
    current: Option<&'a Card>,
    held: &'a [Card],
}

fn print_json(state: &SessionState) {
    let snapshot = Snapshot {
        seed: state.seed(),
        phase: state.phase(),
        pending_reshuffle: state.pending_reshuffle(),
        deck: state.deck_len(),
        discard: state.discard_len(),
        hold_limit: HOLD_LIMIT,
        can_hold: state.can_hold_current(),
        current: state.current(),
        held: state.held(),
    };
    match serde_json::to_string_pretty(&snapshot) {
        Ok(json) => println!("{json}"),
        Err(err) => println!("error: {err}"),
    }
}
