use prost::Message;
use std::net::UdpSocket;
use std::time::{Duration, Instant};
use spider_arena::config;
use spider_arena::protocol::client::{
    ClientMessage, Join, GameMessage, Leave,
    client_message::Payload,
};
use spider_arena::protocol::server::{ServerMessage, server_message};
use spider_arena::protocol::spider::{
    InputDirection, SpiderEvent, SpiderInput, SpiderModeKind, spider_event,
};

/// Turns every 900ms; the spider cuts a pocket near the top-left corner.
const SCRIPT: &[(InputDirection, u64)] = &[
    (InputDirection::Right, 900),
    (InputDirection::Down, 900),
    (InputDirection::Left, 900),
    (InputDirection::Up, 900),
];

fn main() -> std::io::Result<()> {
    let socket = UdpSocket::bind("127.0.0.1:0")?;
    socket.set_read_timeout(Some(Duration::from_millis(200)))?;
    let server_addr = config::bind_addr();

    // 1. Join
    let join_msg = ClientMessage {
        payload: Some(Payload::Join(Join {
            player_name: "Spider1".to_string(),
        })),
    };
    socket.send_to(&join_msg.encode_to_vec(), &server_addr)?;
    println!("Sent: Join");

    // 2. Steer the spider through the script
    for (direction, hold_ms) in SCRIPT {
        let input = SpiderInput {
            direction: *direction as i32,
        };
        let game_msg = ClientMessage {
            payload: Some(Payload::GameMessage(GameMessage {
                payload: input.encode_to_vec(),
            })),
        };
        socket.send_to(&game_msg.encode_to_vec(), &server_addr)?;
        println!("Sent: {:?}", direction);

        drain_for(&socket, Duration::from_millis(*hold_ms));
    }

    // 3. Leave
    let leave_msg = ClientMessage {
        payload: Some(Payload::Leave(Leave {})),
    };
    socket.send_to(&leave_msg.encode_to_vec(), &server_addr)?;
    println!("Done!");
    Ok(())
}

fn drain_for(socket: &UdpSocket, duration: Duration) {
    let deadline = Instant::now() + duration;
    let mut buf = vec![0u8; 65536];
    let mut last_line = String::new();

    while Instant::now() < deadline {
        let len = match socket.recv_from(&mut buf) {
            Ok((len, _)) => len,
            Err(_) => continue,
        };

        let Ok(response) = ServerMessage::decode(&buf[..len]) else {
            println!("Received {} bytes (failed to decode)", len);
            continue;
        };

        match response.payload {
            Some(server_message::Payload::GameMessage(msg)) => {
                if let Some(line) = describe_event(&msg.payload) {
                    if line != last_line {
                        println!("{}", line);
                        last_line = line;
                    }
                }
            }
            other => println!("Received: {:?}", other),
        }
    }
}

fn describe_event(payload: &[u8]) -> Option<String> {
    match SpiderEvent::decode(payload).ok()?.event? {
        spider_event::Event::State(state) => {
            let mode = SpiderModeKind::try_from(state.mode).unwrap_or(SpiderModeKind::Idle);
            Some(format!(
                "spider at ({}, {}) {:?}, {:.2}% claimed",
                state.spider_x,
                state.spider_y,
                mode,
                percentage(state.claimed_count, state.total_cells)
            ))
        }
        spider_event::Event::Claimed(claimed) => Some(format!(
            "CLAIMED {} cells ({}), now {:.2}%",
            claimed.cells_claimed,
            if claimed.self_intersection { "loop" } else { "reached territory" },
            percentage(claimed.claimed_count, claimed.total_cells)
        )),
    }
}

fn percentage(claimed: u32, total: u32) -> f32 {
    if total == 0 {
        return 0.0;
    }
    claimed as f32 * 100.0 / total as f32
}
