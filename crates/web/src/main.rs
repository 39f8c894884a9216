use omendeck_core::{Card, Event, EventBus, Phase, RebuildReason, RngState, SessionState, HOLD_LIMIT};
use omendeck_data::{default_cards_path, load_catalog};
use serde::{Deserialize, Serialize};
use std::io::Read;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use tiny_http::{Header, Method, Response, Server, StatusCode};

fn main() {
    let server = Server::http("0.0.0.0:7878").expect("start server");
    println!("Omendeck web server on http://localhost:7878");
    let state = Arc::new(Mutex::new(AppState::new()));
    for request in server.incoming_requests() {
        let state = state.clone();
        if let Err(err) = handle_request(request, state) {
            eprintln!("request error: {err}");
        }
    }
}

struct AppState {
    session: SessionState,
    events: EventBus,
}

impl AppState {
    fn new() -> Self {
        let catalog = load_catalog(&default_cards_path()).expect("load cards");
        Self {
            session: SessionState::new(catalog, RngState::from_entropy()),
            events: EventBus::default(),
        }
    }
}

#[derive(Serialize)]
struct ApiResponse {
    ok: bool,
    error: Option<String>,
    state: UiState,
    events: Vec<String>,
}

#[derive(Serialize)]
struct UiState {
    deck: usize,
    discard: usize,
    held: Vec<UiCard>,
    hold_limit: usize,
    current: Option<UiCard>,
    pending_reshuffle: bool,
    can_hold: bool,
    phase: Phase,
}

#[derive(Serialize)]
struct UiCard {
    id: String,
    name: String,
    group: String,
    badge: &'static str,
    timing: String,
    effect: String,
    reshuffle: bool,
    holdable: bool,
}

#[derive(Deserialize)]
struct ActionRequest {
    action: String,
    #[serde(default)]
    target: Option<String>,
}

fn handle_request(
    mut request: tiny_http::Request,
    state: Arc<Mutex<AppState>>,
) -> Result<(), Box<dyn std::error::Error>> {
    let url = request.url().to_string();
    match (request.method(), url.as_str()) {
        (&Method::Get, "/") => {
            respond_with_file(request, web_path("index.html"), "text/html; charset=utf-8")?;
        }
        (&Method::Get, "/app.js") => {
            respond_with_file(request, web_path("app.js"), "application/javascript")?;
        }
        (&Method::Get, "/styles.css") => {
            respond_with_file(request, web_path("styles.css"), "text/css; charset=utf-8")?;
        }
        (&Method::Get, "/api/state") => {
            let mut guard = state.lock().unwrap();
            let response = build_response(&mut *guard, None);
            respond_json(request, response)?;
        }
        (&Method::Post, "/api/action") => {
            let mut body = String::new();
            request.as_reader().read_to_string(&mut body)?;
            let action: ActionRequest = serde_json::from_str(&body)?;
            let mut guard = state.lock().unwrap();
            let err = apply_action(&mut *guard, action);
            let response = build_response(&mut *guard, err);
            respond_json(request, response)?;
        }
        _ => {
            let response = Response::empty(StatusCode(404));
            request.respond(response)?;
        }
    }
    Ok(())
}

fn web_path(file: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("..")
        .join("..")
        .join("web")
        .join(file)
}

fn respond_with_file(
    request: tiny_http::Request,
    path: PathBuf,
    content_type: &str,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut file = std::fs::File::open(path)?;
    let mut content = Vec::new();
    file.read_to_end(&mut content)?;
    let header = Header::from_bytes(&b"Content-Type"[..], content_type)
        .map_err(|()| "invalid Content-Type header")?;
    let response = Response::from_data(content).with_header(header);
    request.respond(response)?;
    Ok(())
}

fn respond_json(
    request: tiny_http::Request,
    response: ApiResponse,
) -> Result<(), Box<dyn std::error::Error>> {
    let body = serde_json::to_vec_pretty(&response)?;
    let header = Header::from_bytes(&b"Content-Type"[..], &b"application/json"[..])
        .map_err(|()| "invalid Content-Type header")?;
    request.respond(Response::from_data(body).with_header(header))?;
    Ok(())
}

fn build_response(state: &mut AppState, err: Option<String>) -> ApiResponse {
    let events: Vec<String> = state.events.drain().map(|event| format_event(&event)).collect();
    ApiResponse {
        ok: err.is_none(),
        error: err,
        state: snapshot_state(&state.session),
        events,
    }
}

fn snapshot_state(session: &SessionState) -> UiState {
    UiState {
        deck: session.deck_len(),
        discard: session.discard_len(),
        held: session.held().iter().map(snapshot_card).collect(),
        hold_limit: HOLD_LIMIT,
        current: session.current().map(snapshot_card),
        pending_reshuffle: session.pending_reshuffle(),
        can_hold: session.can_hold_current(),
        phase: session.phase(),
    }
}

fn snapshot_card(card: &Card) -> UiCard {
    UiCard {
        id: card.id.clone(),
        name: card.name.clone(),
        group: card.group.clone(),
        badge: card.group_kind().label(),
        timing: card.timing.clone(),
        effect: card.effect.clone(),
        reshuffle: card.reshuffle,
        holdable: card.holdable(),
    }
}

fn apply_action(state: &mut AppState, req: ActionRequest) -> Option<String> {
    match req.action.as_str() {
        "reset" => {
            *state = AppState::new();
            None
        }
        "draw" => {
            state.session.draw(&mut state.events);
            None
        }
        "hold" => {
            if state.session.can_hold_current() {
                state.session.hold_current(&mut state.events);
                None
            } else {
                Some(hold_refusal(&state.session).to_string())
            }
        }
        "discard" => {
            if state.session.current().is_none() {
                return Some("Nothing is face up.".to_string());
            }
            state.session.discard_current(&mut state.events);
            None
        }
        "play_held" | "discard_held" => {
            let idx = match index(req.target) {
                Ok(idx) => idx,
                Err(err) => return Some(err),
            };
            if idx >= state.session.held().len() {
                return Some("No held card at that slot.".to_string());
            }
            state.session.discard_held(idx, &mut state.events);
            None
        }
        _ => Some("unknown action".to_string()),
    }
}

fn hold_refusal(session: &SessionState) -> &'static str {
    match session.current() {
        None => "Nothing is face up.",
        Some(card) if !card.holdable() => "Only Hold-timing cards can be held.",
        Some(_) => "Hold is full.",
    }
}

fn index(target: Option<String>) -> Result<usize, String> {
    target
        .as_deref()
        .ok_or_else(|| "missing target index".to_string())?
        .parse::<usize>()
        .map_err(|_| "invalid index".to_string())
}

fn format_event(event: &Event) -> String {
    match event {
        Event::DeckRebuilt {
            reason,
            deck_size,
            held_out,
        } => match reason {
            RebuildReason::QueuedReshuffle => {
                format!("Deck reset: {deck_size} cards back in, {held_out} held out.")
            }
            RebuildReason::DeckExhausted => {
                format!("Deck refilled: {deck_size} cards back in, {held_out} held out.")
            }
        },
        Event::CardDrawn { card } => format!("Drew: {}", card.name),
        Event::ReshuffleQueued { name, .. } => format!("Reshuffle queued by: {name}"),
        Event::CardDiscarded { card, auto } => {
            if *auto {
                format!("Auto-discarded: {}", card.name)
            } else {
                format!("Discarded: {}", card.name)
            }
        }
        Event::CardHeld { card, slot } => format!("Held: {} (slot {})", card.name, slot + 1),
        Event::HeldDiscarded { card, slot } => {
            format!("Discarded held: {} (slot {})", card.name, slot + 1)
        }
    }
}
