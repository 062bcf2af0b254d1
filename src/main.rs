use spider_arena::config::{self, CLEANUP_INTERVAL_SECONDS, LOG_DIRECTIVE, SESSION_TIMEOUT_SECONDS};
use spider_arena::game::Game;
use spider_arena::games::spider::SpiderGame;
use spider_arena::network::udp::UdpServer;
use spider_arena::protocol::client::{
    ClientMessage, Join, Ping,
    client_message::Payload,
};
use spider_arena::protocol::server::{
    ServerMessage, server_message,
    Joined, GameMessage as ServerGameMessage, Error, Pong,
};
use spider_arena::session::SessionManager;
use prost::Message;
use std::net::SocketAddr;
use tokio::time::{Duration, MissedTickBehavior};

#[tokio::main]
async fn main() -> std::io::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(LOG_DIRECTIVE.parse().map_err(std::io::Error::other)?),
        )
        .init();

    let server = UdpServer::bind(&config::bind_addr()).await?;
    let mut sessions = SessionManager::new(SESSION_TIMEOUT_SECONDS);
    let mut game = SpiderGame::new();

    let (width, height) = game.state().grid.get_grid_dimensions();
    tracing::info!(
        "Spider arena started: {}x{} cells, {} Hz",
        width,
        height,
        game.config().tick_rate_hz
    );

    let mut tick_interval = tokio::time::interval(game.tick_rate());
    tick_interval.set_missed_tick_behavior(MissedTickBehavior::Skip);
    let mut cleanup_interval =
        tokio::time::interval(Duration::from_secs(CLEANUP_INTERVAL_SECONDS));

    // One task owns the arena: inputs, ticks and cleanup never interleave.
    loop {
        tokio::select! {
            received = server.recv() => {
                let (data, addr) = match received {
                    Ok(result) => result,
                    Err(e) => {
                        tracing::debug!("recv error - sent to closed port. Ignoring. Error: {}", e);
                        continue;
                    }
                };
                handle_datagram(&server, &mut sessions, &mut game, addr, &data).await;
            }

            _ = tick_interval.tick() => {
                run_tick(&server, &sessions, &mut game).await;
            }

            _ = cleanup_interval.tick() => {
                let timed_out = sessions.cleanup_timed_out();
                if !timed_out.is_empty() {
                    tracing::debug!(
                        "{} sessions left, {} timed out",
                        sessions.len(),
                        timed_out.len()
                    );
                }
            }
        }
    }
}

async fn handle_datagram(
    server: &UdpServer,
    sessions: &mut SessionManager,
    game: &mut SpiderGame,
    addr: SocketAddr,
    data: &[u8],
) {
    let msg = match ClientMessage::decode(data) {
        Ok(msg) => msg,
        Err(e) => {
            tracing::warn!("Failed to decode from {}: {}", addr, e);
            return;
        }
    };

    match msg.payload {
        Some(Payload::Join(join)) => {
            handle_join(server, sessions, game, addr, join).await;
        }

        Some(Payload::Leave(_)) => {
            sessions.remove(&addr);
        }

        Some(Payload::GameMessage(game_msg)) => {
            handle_game_message(server, sessions, game, addr, &game_msg.payload).await;
        }

        Some(Payload::Reset(_)) => {
            if sessions.get_by_addr(&addr).is_none() {
                send_error(server, addr, "Join before resetting the arena").await;
                return;
            }
            sessions.update_last_seen(&addr);
            game.reset();
            broadcast(server, sessions, game.encode_state()).await;
        }

        Some(Payload::Ping(ping)) => {
            handle_ping(server, sessions, addr, ping).await;
        }

        None => {
            tracing::warn!("Empty message from {}", addr);
        }
    }
}

async fn handle_join(
    server: &UdpServer,
    sessions: &mut SessionManager,
    game: &SpiderGame,
    addr: SocketAddr,
    join: Join,
) {
    let session_id = sessions.register(addr, join.player_name.clone()).session_id;

    let response = ServerMessage {
        payload: Some(server_message::Payload::Joined(Joined {
            session_id,
            tick_rate_hz: game.config().tick_rate_hz,
        })),
    };
    send_message(server, addr, response).await;
    send_message(server, addr, wrap_game_payload(game.encode_state())).await;

    tracing::info!(
        "Session {} ({}) joined ({} connected)",
        session_id,
        join.player_name,
        sessions.len()
    );
}

async fn handle_game_message(
    server: &UdpServer,
    sessions: &mut SessionManager,
    game: &mut SpiderGame,
    addr: SocketAddr,
    payload: &[u8],
) {
    sessions.update_last_seen(&addr);

    let Some(session) = sessions.get_by_addr(&addr) else {
        tracing::warn!("GameMessage from unknown address: {}", addr);
        send_error(server, addr, "Join before sending input").await;
        return;
    };

    if let Err(e) = game.handle_input(payload) {
        tracing::debug!("Rejected input from session {}: {}", session.session_id, e);
        send_error(server, addr, &e.to_string()).await;
    }
}

async fn handle_ping(
    server: &UdpServer,
    sessions: &mut SessionManager,
    addr: SocketAddr,
    ping: Ping,
) {
    sessions.ping(&addr);

    if let Some(session) = sessions.get_by_addr(&addr) {
        tracing::trace!(
            "Ping from session {} (seq={}, count={})",
            session.session_id,
            ping.sequence,
            session.ping_count
        );
    } else {
        tracing::warn!("Ping from unknown address {}", addr);
    }

    let pong_message = ServerMessage {
        payload: Some(server_message::Payload::Pong(Pong {
            timestamp: ping.timestamp,
            sequence: ping.sequence,
            server_time: current_timestamp_ms(),
        })),
    };
    send_message(server, addr, pong_message).await;
}

async fn run_tick(server: &UdpServer, sessions: &SessionManager, game: &mut SpiderGame) {
    let result = game.tick();

    if sessions.is_empty() {
        return;
    }

    if let Some(event) = result.broadcast {
        broadcast(server, sessions, event).await;
    }
    broadcast(server, sessions, game.encode_state()).await;
}

async fn broadcast(server: &UdpServer, sessions: &SessionManager, payload: Vec<u8>) {
    let bytes = wrap_game_payload(payload).encode_to_vec();
    server.send_to_many(&bytes, &sessions.addrs()).await;
}

fn wrap_game_payload(payload: Vec<u8>) -> ServerMessage {
    ServerMessage {
        payload: Some(server_message::Payload::GameMessage(ServerGameMessage { payload })),
    }
}

async fn send_error(server: &UdpServer, addr: SocketAddr, message: &str) {
    let response = ServerMessage {
        payload: Some(server_message::Payload::Error(Error {
            message: message.to_string(),
        })),
    };
    send_message(server, addr, response).await;
}

async fn send_message(server: &UdpServer, addr: SocketAddr, message: ServerMessage) {
    if let Err(e) = server.send(&message.encode_to_vec(), addr).await {
        tracing::warn!("Failed to send to {}: {}", addr, e);
    }
}

fn current_timestamp_ms() -> u64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|elapsed| elapsed.as_millis() as u64)
        .unwrap_or_default()
}
